//! Theme presets and resolution.
//!
//! A card's palette is the `{primary, accent, price_color}` triple. It is
//! resolved once per render from either a named preset or user values.

use serde::{Deserialize, Serialize};

/// Resolved palette handed to the builders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeColors {
    pub primary: String,
    pub accent: String,
    pub price_color: String,
}

impl ThemeColors {
    fn new(primary: &str, accent: &str, price_color: &str) -> Self {
        Self {
            primary: primary.to_string(),
            accent: accent.to_string(),
            price_color: price_color.to_string(),
        }
    }
}

/// Built-in preset names, in menu order.
pub const PRESETS: &[&str] = &["classic", "gaming", "minimal", "eco"];

/// Look up a built-in preset.
pub fn preset(name: &str) -> Option<ThemeColors> {
    match name {
        "classic" => Some(ThemeColors::new("#1e3a8a", "#3b82f6", "#dc2626")),
        "gaming" => Some(ThemeColors::new("#7c3aed", "#ec4899", "#16a34a")),
        "minimal" => Some(ThemeColors::new("#111827", "#4b5563", "#111827")),
        "eco" => Some(ThemeColors::new("#166534", "#22c55e", "#15803d")),
        _ => None,
    }
}

fn default_preset() -> String {
    "classic".to_string()
}

/// What the user picked: a preset name, or `"custom"` with explicit colors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeSelection {
    pub preset: String,
    pub custom: Option<ThemeColors>,
}

impl Default for ThemeSelection {
    fn default() -> Self {
        Self {
            preset: default_preset(),
            custom: None,
        }
    }
}

impl ThemeSelection {
    /// Resolve to concrete colors.
    ///
    /// `"custom"` uses the user colors when present; unknown presets fall
    /// back to `classic`.
    pub fn resolve(&self) -> ThemeColors {
        if self.preset == "custom" {
            if let Some(custom) = &self.custom {
                return custom.clone();
            }
        }
        preset(&self.preset)
            .or_else(|| preset("classic"))
            .unwrap_or_else(|| ThemeColors::new("#1e3a8a", "#3b82f6", "#dc2626"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_presets_resolve() {
        for name in PRESETS {
            assert!(preset(name).is_some(), "missing preset {name}");
        }
    }

    #[test]
    fn test_custom_theme() {
        let selection = ThemeSelection {
            preset: "custom".into(),
            custom: Some(ThemeColors::new("#000001", "#000002", "#000003")),
        };
        assert_eq!(selection.resolve().accent, "#000002");
    }

    #[test]
    fn test_unknown_preset_falls_back() {
        let selection = ThemeSelection {
            preset: "neon".into(),
            custom: None,
        };
        assert_eq!(selection.resolve(), preset("classic").unwrap());
    }
}
