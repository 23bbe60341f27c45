//! Brand-icon lookup.
//!
//! Maps a free-text component value ("AMD Ryzen 7 7800X3D") to a brand icon
//! (the AMD logo). Builders only see the [`BrandLookup`] trait; the bundled
//! [`BrandIconSet`] does a plain keyword match and can be swapped for any
//! smarter matcher.

use serde::{Deserialize, Serialize};

/// A resolved brand icon attached to a spec row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandIcon {
    /// Brand display name (used as alt text).
    pub name: String,
    /// Image source: data URL, file path or http(s) URL.
    pub src: String,
}

/// One entry of an icon set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandIconEntry {
    pub name: String,
    pub src: String,
    /// Extra words; any one appearing in the value selects this icon.
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// Available brand-icon assets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandIconSet {
    #[serde(default)]
    pub icons: Vec<BrandIconEntry>,
}

impl BrandIconSet {
    pub fn new(icons: Vec<BrandIconEntry>) -> Self {
        Self { icons }
    }

    pub fn is_empty(&self) -> bool {
        self.icons.is_empty()
    }
}

/// Synchronous, pure value → icon lookup.
pub trait BrandLookup: Send + Sync {
    fn find(&self, value: &str) -> Option<BrandIcon>;
}

impl BrandLookup for BrandIconSet {
    fn find(&self, value: &str) -> Option<BrandIcon> {
        find_brand_icon(value, self)
    }
}

/// Find the first icon whose name or keywords occur in `value`
/// (case-insensitive, on word boundaries).
pub fn find_brand_icon(value: &str, icons: &BrandIconSet) -> Option<BrandIcon> {
    let value = value.to_lowercase();
    if value.trim().is_empty() {
        return None;
    }

    icons
        .icons
        .iter()
        .find(|entry| {
            std::iter::once(entry.name.as_str())
                .chain(entry.keywords.iter().map(String::as_str))
                .any(|kw| contains_word(&value, &kw.trim().to_lowercase()))
        })
        .map(|entry| BrandIcon {
            name: entry.name.clone(),
            src: entry.src.clone(),
        })
}

/// `needle` occurs in `haystack` with no alphanumeric char touching either end.
fn contains_word(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }
    haystack.match_indices(needle).any(|(start, found)| {
        let before = haystack[..start].chars().next_back();
        let after = haystack[start + found.len()..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn icons() -> BrandIconSet {
        BrandIconSet::new(vec![
            BrandIconEntry {
                name: "AMD".into(),
                src: "icons/amd.png".into(),
                keywords: vec!["ryzen".into(), "radeon".into()],
            },
            BrandIconEntry {
                name: "NVIDIA".into(),
                src: "icons/nvidia.png".into(),
                keywords: vec!["geforce".into(), "rtx".into()],
            },
        ])
    }

    #[test]
    fn test_match_by_name() {
        let icon = find_brand_icon("AMD Ryzen 7 7800X3D", &icons()).unwrap();
        assert_eq!(icon.name, "AMD");
    }

    #[test]
    fn test_match_by_keyword() {
        let icon = icons().find("GeForce RTX 4070").unwrap();
        assert_eq!(icon.src, "icons/nvidia.png");
    }

    #[test]
    fn test_no_partial_word_match() {
        // "amdahl" must not match "amd"
        assert!(find_brand_icon("Amdahl Storage", &icons()).is_none());
    }

    #[test]
    fn test_multi_word_and_punctuated_names() {
        let set = BrandIconSet::new(vec![
            BrandIconEntry {
                name: "Cooler Master".into(),
                src: "icons/cm.png".into(),
                keywords: vec![],
            },
            BrandIconEntry {
                name: "WD".into(),
                src: "icons/wd.png".into(),
                keywords: vec!["Western Digital".into()],
            },
            BrandIconEntry {
                name: "G.Skill".into(),
                src: "icons/gskill.png".into(),
                keywords: vec![],
            },
        ]);
        assert_eq!(
            find_brand_icon("Cooler Master Hyper 212", &set).unwrap().src,
            "icons/cm.png"
        );
        assert_eq!(
            find_brand_icon("Western Digital SN850X 2TB", &set).unwrap().name,
            "WD"
        );
        assert_eq!(
            find_brand_icon("32GB G.SKILL Trident Z5", &set).unwrap().name,
            "G.Skill"
        );
        assert!(find_brand_icon("Cooler Masterpiece", &set).is_none());
    }

    #[test]
    fn test_empty_value() {
        assert!(find_brand_icon("   ", &icons()).is_none());
        assert!(find_brand_icon("Ryzen", &BrandIconSet::default()).is_none());
    }
}
