//! Screen-side visual tree.
//!
//! A [`VisualNode`] is a tag, an inline style map and either text or
//! children. It serializes to JSON as-is and to HTML via
//! [`VisualNode::to_html`].

use std::collections::BTreeMap;
use std::fmt::Write as _;

use serde::Serialize;

/// One node of the preview tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VisualNode {
    /// HTML tag name.
    pub tag: &'static str,
    /// Layout element id this node was rendered from, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub element_id: Option<String>,
    /// CSS properties, sorted for stable output.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub style: BTreeMap<&'static str, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Image source for `img` nodes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<VisualNode>,
}

impl VisualNode {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            ..Default::default()
        }
    }

    pub fn div() -> Self {
        Self::new("div")
    }

    pub fn span(text: impl Into<String>) -> Self {
        Self::new("span").text(text)
    }

    pub fn img(src: impl Into<String>, alt: impl Into<String>) -> Self {
        Self {
            tag: "img",
            src: Some(src.into()),
            alt: Some(alt.into()),
            ..Default::default()
        }
    }

    pub fn id(mut self, id: &str) -> Self {
        self.element_id = Some(id.to_string());
        self
    }

    pub fn style(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.style.insert(key, value.into());
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn child(mut self, child: VisualNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = VisualNode>) -> Self {
        self.children.extend(children);
        self
    }

    /// Depth-first search by tag.
    pub fn find_all(&self, tag: &str) -> Vec<&VisualNode> {
        let mut out = Vec::new();
        self.collect(tag, &mut out);
        out
    }

    fn collect<'a>(&'a self, tag: &str, out: &mut Vec<&'a VisualNode>) {
        if self.tag == tag {
            out.push(self);
        }
        for child in &self.children {
            child.collect(tag, out);
        }
    }

    /// Inline-styled HTML with escaped content.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(self.tag);
        if let Some(id) = &self.element_id {
            let _ = write!(out, " data-element-id=\"{}\"", escape(id));
        }
        if !self.style.is_empty() {
            out.push_str(" style=\"");
            for (i, (key, value)) in self.style.iter().enumerate() {
                if i > 0 {
                    out.push(' ');
                }
                let _ = write!(out, "{}: {};", key, escape(value));
            }
            out.push('"');
        }
        if let Some(src) = &self.src {
            let _ = write!(out, " src=\"{}\"", escape(src));
        }
        if let Some(alt) = &self.alt {
            let _ = write!(out, " alt=\"{}\"", escape(alt));
        }

        if self.tag == "img" {
            out.push_str(" />");
            return;
        }
        out.push('>');
        if let Some(text) = &self.text {
            out.push_str(&escape(text));
        }
        for child in &self.children {
            child.write_html(out);
        }
        let _ = write!(out, "</{}>", self.tag);
    }
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_escapes_text_and_attributes() {
        let node = VisualNode::div()
            .style("color", "#fff")
            .child(VisualNode::span("<b>&"))
            .child(VisualNode::img("a\"b.png", "x"));
        assert_eq!(
            node.to_html(),
            "<div style=\"color: #fff;\"><span>&lt;b&gt;&amp;</span><img src=\"a&quot;b.png\" alt=\"x\" /></div>"
        );
    }

    #[test]
    fn test_styles_sorted() {
        let node = VisualNode::div().style("width", "1px").style("color", "red");
        assert_eq!(node.to_html(), "<div style=\"color: red; width: 1px;\"></div>");
    }

    #[test]
    fn test_json_skips_empty_fields() {
        let json = serde_json::to_value(VisualNode::span("hi")).unwrap();
        assert_eq!(json, serde_json::json!({ "tag": "span", "text": "hi" }));
    }
}
