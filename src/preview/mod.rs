//! # Screen Preview
//!
//! Renders a [`CardLayout`] into a [`VisualNode`] tree for on-screen
//! display. Inches become pixels through [`PreviewScale::spatial_scale`]
//! and points through [`PreviewScale::font_scale`].
//!
//! ## Example
//!
//! ```
//! use speccard::card::{CardSize, ProductConfig};
//! use speccard::layout::{BuilderContext, build_layout};
//! use speccard::preview::{PreviewScale, render_preview};
//!
//! let config = ProductConfig::sample();
//! let layout = build_layout(&BuilderContext::new(&config, CardSize::Shelf));
//! let html = render_preview(&layout, &PreviewScale::default()).to_html();
//! assert!(html.contains("Nebula RTX Gaming PC"));
//! ```

mod node;

pub use node::VisualNode;

use serde::{Deserialize, Serialize};

use crate::layout::{
    Align, BadgeElement, BadgeRowElement, CardLayout, ContainerElement, Direction,
    FooterAccentElement, HeaderElement, InfoBarElement, LayoutElement, PriceElement, SpecLayout,
    SpecsElement, TextElement,
};

/// Pixel density of the preview surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewScale {
    /// Pixels per point.
    pub font_scale: f32,
    /// Pixels per inch.
    pub spatial_scale: f32,
}

impl Default for PreviewScale {
    /// CSS reference pixel: 96 per inch, so 96/72 per point.
    fn default() -> Self {
        Self {
            font_scale: 96.0 / 72.0,
            spatial_scale: 96.0,
        }
    }
}

impl PreviewScale {
    fn px(&self, inches: f32) -> String {
        format!("{:.1}px", inches * self.spatial_scale)
    }

    fn font(&self, points: f32) -> String {
        format!("{:.1}px", points * self.font_scale)
    }
}

/// Render `layout` as a tree rooted at the card surface.
pub fn render_preview(layout: &CardLayout, scale: &PreviewScale) -> VisualNode {
    let mut root = VisualNode::div()
        .style("position", "relative")
        .style("box-sizing", "border-box")
        .style("overflow", "hidden")
        .style("display", "flex")
        .style("flex-direction", "column")
        .style("width", scale.px(layout.width))
        .style("height", scale.px(layout.height))
        .style("padding", scale.px(layout.margin))
        .style("gap", scale.px(layout.gap))
        .style("background-color", layout.background.color.clone())
        .style("font-family", layout.font_family.clone());
    if let Some((image, size)) = background_pattern(layout, scale) {
        root = root
            .style("background-image", image)
            .style("background-size", size);
    }

    let renderer = PreviewRenderer { layout, scale };
    root.children(
        layout
            .elements
            .iter()
            .filter_map(|element| renderer.element(element)),
    )
}

/// CSS `(background-image, background-size)` for the named pattern.
fn background_pattern(layout: &CardLayout, scale: &PreviewScale) -> Option<(String, String)> {
    let ink = crate::color::lighten_color(&layout.theme.primary, 0.9);
    let image = match layout.background.pattern.as_deref()? {
        "grid" => format!(
            "linear-gradient({ink} 1px, transparent 1px), linear-gradient(90deg, {ink} 1px, transparent 1px)"
        ),
        "dots" => format!("radial-gradient({ink} 1px, transparent 1px)"),
        _ => return None,
    };
    let pitch = scale.px(0.25);
    Some((image, format!("{pitch} {pitch}")))
}

fn text_align(align: Align) -> &'static str {
    match align {
        Align::Left => "left",
        Align::Center => "center",
        Align::Right => "right",
    }
}

fn justify(align: Align) -> &'static str {
    match align {
        Align::Left => "flex-start",
        Align::Center => "center",
        Align::Right => "flex-end",
    }
}

struct PreviewRenderer<'a> {
    layout: &'a CardLayout,
    scale: &'a PreviewScale,
}

impl PreviewRenderer<'_> {
    fn element(&self, element: &LayoutElement) -> Option<VisualNode> {
        if !element.is_visible() {
            return None;
        }
        let s = self.scale;
        let node = match element {
            LayoutElement::Header(header) => self.header(header),
            LayoutElement::Text(text) => self.text(text),
            LayoutElement::Sku(sku) => VisualNode::div()
                .style("text-align", "center")
                .style("font-size", s.font(sku.font_size))
                .style("color", sku.color.clone())
                .text(sku.text.clone()),
            LayoutElement::Badge(badge) => self.badge(badge),
            LayoutElement::BadgeRow(row) => self.badge_row(row),
            LayoutElement::Price(price) => self.price(price),
            LayoutElement::Financing(financing) => VisualNode::div()
                .style("text-align", "center")
                .style("font-size", s.font(financing.font_size))
                .style("color", financing.color.clone())
                .text(financing.text.clone()),
            LayoutElement::Specs(specs) => self.specs(specs),
            LayoutElement::InfoBar(bar) => self.info_bar(bar),
            LayoutElement::Image(image) => {
                if image.src.trim().is_empty() {
                    return None;
                }
                VisualNode::div()
                    .style("display", "flex")
                    .style("justify-content", justify(image.align))
                    .child(
                        VisualNode::img(image.src.clone(), image.alt.clone())
                            .style("max-width", s.px(image.max_width))
                            .style("max-height", s.px(image.max_height))
                            .style("object-fit", "contain"),
                    )
            }
            LayoutElement::Barcode(barcode) => {
                if barcode.src.is_empty() {
                    return None;
                }
                VisualNode::div()
                    .style("display", "flex")
                    .style("justify-content", "center")
                    .child(
                        VisualNode::img(barcode.src.clone(), barcode.value.clone())
                            .style("width", s.px(barcode.width))
                            .style("height", s.px(barcode.height)),
                    )
            }
            LayoutElement::QrCode(qr) => {
                if qr.src.is_empty() {
                    return None;
                }
                VisualNode::img(qr.src.clone(), qr.value.clone())
                    .style("width", s.px(qr.size))
                    .style("height", s.px(qr.size))
            }
            LayoutElement::Divider(divider) => VisualNode::div()
                .style("height", s.px(divider.thickness))
                .style("background-color", divider.color.clone()),
            LayoutElement::Container(container) => self.container(container)?,
            LayoutElement::FooterAccent(footer) => self.footer(footer),
        };
        Some(node.id(element.id()))
    }

    fn header(&self, header: &HeaderElement) -> VisualNode {
        let s = self.scale;
        let bleed = s.px(-self.layout.margin);
        let mut node = VisualNode::div()
            .style("display", "flex")
            .style("align-items", "center")
            .style("justify-content", "center")
            .style("flex-shrink", "0")
            .style("box-sizing", "border-box")
            .style("margin", format!("{bleed} {bleed} 0 {bleed}"))
            .style("height", s.px(header.height))
            .style("background-color", header.background.clone())
            .style("color", header.color.clone())
            .style("font-size", s.font(header.font_size))
            .style("font-weight", "bold")
            .text(header.text.clone());
        if let Some(stripe) = &header.stripe {
            node = node.style(
                "border-bottom",
                format!("{} solid {}", s.px(stripe.height), stripe.color),
            );
        }
        node
    }

    fn text(&self, text: &TextElement) -> VisualNode {
        let s = self.scale;
        let mut node = VisualNode::div()
            .style("text-align", text_align(text.align))
            .style("font-size", s.font(text.font_size))
            .style("line-height", "1.2")
            .style("color", text.color.clone())
            .text(text.text.clone());
        if text.bold {
            node = node.style("font-weight", "bold");
        }
        if text.max_lines > 0 {
            node = node
                .style("display", "-webkit-box")
                .style("-webkit-box-orient", "vertical")
                .style("-webkit-line-clamp", text.max_lines.to_string())
                .style("overflow", "hidden");
        }
        node
    }

    fn pill(&self, text: &str, background: &str, color: &str, font: f32, pad: (f32, f32), radius: f32) -> VisualNode {
        let s = self.scale;
        VisualNode::span(text)
            .style("display", "inline-block")
            .style("white-space", "nowrap")
            .style("font-weight", "bold")
            .style("font-size", s.font(font))
            .style("padding", format!("{} {}", s.px(pad.1), s.px(pad.0)))
            .style("border-radius", s.px(radius))
            .style("background-color", background.to_string())
            .style("color", color.to_string())
    }

    fn badge(&self, element: &BadgeElement) -> VisualNode {
        let badge = &element.badge;
        VisualNode::div()
            .style("display", "flex")
            .style("justify-content", justify(element.align))
            .child(self.pill(
                &badge.text,
                &badge.background,
                &badge.color,
                element.font_size,
                (element.pad_x, element.pad_y),
                element.radius,
            ))
    }

    fn badge_row(&self, row: &BadgeRowElement) -> VisualNode {
        VisualNode::div()
            .style("display", "flex")
            .style("flex-wrap", "wrap")
            .style("justify-content", "center")
            .style("gap", self.scale.px(row.gap))
            .children(row.badges.iter().map(|badge| {
                self.pill(
                    &badge.text,
                    &badge.background,
                    &badge.color,
                    row.font_size,
                    (row.pad_x, row.pad_y),
                    row.radius,
                )
            }))
    }

    fn price(&self, price: &PriceElement) -> VisualNode {
        let s = self.scale;
        let mut inner = VisualNode::div()
            .style("display", "inline-flex")
            .style("flex-direction", "column")
            .style("align-items", "center");
        if let Some(bg) = &price.background {
            inner = inner
                .style("background-color", bg.color.clone())
                .style("padding", s.px(bg.padding))
                .style("border-radius", s.px(bg.radius));
        }
        if let Some(original) = &price.original {
            inner = inner.child(
                VisualNode::span(original.clone())
                    .style("font-size", s.font(price.original_font_size))
                    .style("color", "#6b7280")
                    .style("text-decoration", "line-through"),
            );
        }
        inner = inner.child(
            VisualNode::span(price.price.clone())
                .style("font-size", s.font(price.font_size))
                .style("font-weight", "bold")
                .style("line-height", "1.1")
                .style("color", price.color.clone()),
        );
        VisualNode::div().style("text-align", "center").child(inner)
    }

    fn specs(&self, specs: &SpecsElement) -> VisualNode {
        let s = self.scale;
        let columns = match specs.layout {
            SpecLayout::OneColumn => "1fr",
            SpecLayout::TwoColumn => "1fr 1fr",
        };
        VisualNode::div()
            .style("display", "grid")
            .style("grid-template-columns", columns)
            .style("column-gap", s.px(self.layout.gap * 2.0))
            .children(specs.columns.iter().map(|column| {
                VisualNode::div()
                    .style("display", "flex")
                    .style("flex-direction", "column")
                    .style("gap", s.px(specs.row_gap))
                    .children(column.iter().map(|item| {
                        let mut row = VisualNode::div()
                            .style("display", "flex")
                            .style("align-items", "center")
                            .style("gap", s.px(0.04))
                            .style("white-space", "nowrap")
                            .style("overflow", "hidden");
                        if let Some(icon) = &item.icon {
                            row = row.child(
                                VisualNode::img(icon.src.clone(), icon.name.clone())
                                    .style("width", s.px(specs.icon_size))
                                    .style("height", s.px(specs.icon_size)),
                            );
                        }
                        row.child(
                            VisualNode::span(format!("{}:", item.label))
                                .style("font-weight", "bold")
                                .style("font-size", s.font(specs.label_font))
                                .style("color", specs.label_color.clone()),
                        )
                        .child(
                            VisualNode::span(item.value.clone())
                                .style("font-size", s.font(specs.value_font))
                                .style("color", specs.value_color.clone())
                                .style("overflow", "hidden")
                                .style("text-overflow", "ellipsis"),
                        )
                    }))
            }))
    }

    fn info_bar(&self, bar: &InfoBarElement) -> VisualNode {
        let s = self.scale;
        VisualNode::div()
            .style("display", "flex")
            .style("justify-content", "space-around")
            .style("padding", s.font(bar.font_size * 0.6))
            .style("background-color", bar.background.clone())
            .style("color", bar.color.clone())
            .style("font-size", s.font(bar.font_size))
            .children(bar.entries.iter().map(|entry| {
                VisualNode::div()
                    .style("text-align", "center")
                    .child(VisualNode::div().style("font-weight", "bold").text(entry.label.clone()))
                    .child(VisualNode::div().text(entry.value.clone()))
            }))
    }

    fn container(&self, container: &ContainerElement) -> Option<VisualNode> {
        let children: Vec<VisualNode> = container
            .children
            .iter()
            .filter_map(|child| self.element(child))
            .collect();
        if children.is_empty() {
            return None;
        }
        let direction = match container.direction {
            Direction::Row => "row",
            Direction::Column => "column",
        };
        Some(
            VisualNode::div()
                .style("display", "flex")
                .style("flex-direction", direction)
                .style("align-items", "center")
                .style("justify-content", "center")
                .style("gap", self.scale.px(container.gap))
                .children(children),
        )
    }

    fn footer(&self, footer: &FooterAccentElement) -> VisualNode {
        let s = self.scale;
        let mut node = VisualNode::div()
            .style("position", "absolute")
            .style("left", "0")
            .style("right", "0")
            .style("bottom", "0")
            .style("height", s.px(footer.height))
            .style("background-color", footer.color.clone());
        if let Some(stripe) = &footer.stripe {
            node = node.child(
                VisualNode::div()
                    .style("height", s.px(stripe.height))
                    .style("background-color", stripe.color.clone()),
            );
        }
        node
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{CardSize, ProductConfig};
    use crate::layout::{AsyncAssets, BuilderContext, build_layout};

    fn layout(size: CardSize, assets: Option<&AsyncAssets>) -> CardLayout {
        let config = ProductConfig::sample();
        let mut ctx = BuilderContext::new(&config, size);
        if let Some(assets) = assets {
            ctx = ctx.with_assets(assets);
        }
        build_layout(&ctx)
    }

    #[test]
    fn test_root_uses_spatial_scale() {
        let tree = render_preview(&layout(CardSize::Shelf, None), &PreviewScale::default());
        assert_eq!(tree.style["width"], "192.0px");
        assert_eq!(tree.style["height"], "288.0px");

        let half = PreviewScale {
            font_scale: 1.0,
            spatial_scale: 48.0,
        };
        let tree = render_preview(&layout(CardSize::Shelf, None), &half);
        assert_eq!(tree.style["width"], "96.0px");
    }

    #[test]
    fn test_one_node_per_visible_element() {
        let mut layout = layout(CardSize::Price, None);
        let total = layout.elements.len();
        let tree = render_preview(&layout, &PreviewScale::default());
        assert_eq!(tree.children.len(), total);

        layout.elements[0].set_visible(false);
        let tree = render_preview(&layout, &PreviewScale::default());
        assert_eq!(tree.children.len(), total - 1);
    }

    #[test]
    fn test_empty_src_omitted() {
        let mut layout = layout(
            CardSize::Poster,
            Some(&AsyncAssets {
                qr_code: Some("data:image/png;base64,QR".into()),
                barcode: Some("data:image/png;base64,BC".into()),
            }),
        );
        for element in &mut layout.elements {
            match element {
                LayoutElement::Barcode(b) => b.src.clear(),
                LayoutElement::Container(c) => {
                    for child in &mut c.children {
                        if let LayoutElement::QrCode(q) = child {
                            q.src.clear();
                        }
                    }
                }
                _ => {}
            }
        }
        let tree = render_preview(&layout, &PreviewScale::default());
        assert!(tree.find_all("img").is_empty());
    }

    #[test]
    fn test_footer_is_absolute_with_stripe() {
        let tree = render_preview(&layout(CardSize::Poster, None), &PreviewScale::default());
        let footer = tree.children.last().unwrap();
        assert_eq!(footer.style["position"], "absolute");
        assert_eq!(footer.style["bottom"], "0");
        assert_eq!(footer.children.len(), 1);
    }

    #[test]
    fn test_badge_row_wraps() {
        let layout = layout(CardSize::Price, None);
        let tree = render_preview(&layout, &PreviewScale::default());
        let row_id = layout.find("badge-row").unwrap().id();
        let row = tree
            .children
            .iter()
            .find(|n| n.element_id.as_deref() == Some(row_id))
            .unwrap();
        assert_eq!(row.style["flex-wrap"], "wrap");
        assert!(!row.children.is_empty());
    }

    #[test]
    fn test_html_contains_price() {
        let html = render_preview(&layout(CardSize::Shelf, None), &PreviewScale::default()).to_html();
        assert!(html.contains("$1,299.99"));
        assert!(html.contains("line-through"));
    }
}
