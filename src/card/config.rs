//! # Layout Configuration
//!
//! Per-size geometry tables. Every header height, margin, font size and
//! padding a builder needs lives here, so card geometry can be tuned (or
//! injected from a JSON file) without touching builder logic.
//!
//! ## Units
//!
//! | Field suffix | Unit |
//! |--------------|------|
//! | `*_font` | points (1/72 in) |
//! | everything else | inches |
//!
//! ## Usage
//!
//! ```
//! use speccard::card::{CardSize, LayoutConfig};
//!
//! let config = LayoutConfig::for_size(CardSize::Price);
//! assert!(config.include_stock_badge);
//! assert_eq!(config.max_feature_badges, 4);
//! ```

use serde::{Deserialize, Serialize};

use super::CardSize;
use crate::error::CardError;

/// # Layout Configuration
///
/// Geometry for one card size. The builders copy these values into the
/// layout elements they emit, which is how both backends end up drawing
/// from the same numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Content inset from the card edge.
    pub margin: f32,
    /// Vertical gap between flowed elements.
    pub gap: f32,

    /// Store-name bar height.
    pub header_height: f32,
    pub header_font: f32,
    /// Primary-colored stripe at the bottom of the header (0 = none).
    pub header_stripe: f32,

    pub logo_max_height: f32,

    pub model_font: f32,
    pub model_max_lines: usize,

    pub badge_font: f32,
    pub badge_pad_x: f32,
    pub badge_pad_y: f32,
    pub badge_gap: f32,
    pub badge_radius: f32,
    /// Whether the stock-status badge joins the badge row on this size.
    pub include_stock_badge: bool,

    pub price_font: f32,
    pub original_price_font: f32,
    /// Draw a tinted rounded box behind the price.
    pub price_box: bool,
    pub price_box_padding: f32,
    pub price_box_radius: f32,

    pub financing_font: f32,

    /// Maximum number of feature badges (0 = no feature row).
    pub max_feature_badges: usize,
    pub feature_font: f32,

    pub spec_label_font: f32,
    pub spec_value_font: f32,
    /// 1 or 2 spec columns.
    pub spec_columns: u8,
    pub spec_row_gap: f32,
    pub spec_icon_size: f32,

    pub info_font: f32,

    pub description_font: f32,
    pub description_max_lines: usize,

    pub product_image_max_height: f32,
    pub qr_size: f32,

    pub barcode_width: f32,
    pub barcode_height: f32,
    pub sku_font: f32,

    pub footer_height: f32,
    /// Thinner stripe along the top of the footer (0 = none).
    pub footer_stripe: f32,
}

impl LayoutConfig {
    /// # Shelf Tag (2 × 3 in)
    ///
    /// Single spec column, no price box, no stock badge.
    pub const SHELF: Self = Self {
        margin: 0.12,
        gap: 0.05,
        header_height: 0.32,
        header_font: 11.0,
        header_stripe: 0.0,
        logo_max_height: 0.35,
        model_font: 11.0,
        model_max_lines: 2,
        badge_font: 6.0,
        badge_pad_x: 0.05,
        badge_pad_y: 0.025,
        badge_gap: 0.04,
        badge_radius: 0.04,
        include_stock_badge: false,
        price_font: 20.0,
        original_price_font: 9.0,
        price_box: false,
        price_box_padding: 0.0,
        price_box_radius: 0.0,
        financing_font: 7.0,
        max_feature_badges: 0,
        feature_font: 6.0,
        spec_label_font: 6.5,
        spec_value_font: 6.5,
        spec_columns: 1,
        spec_row_gap: 0.03,
        spec_icon_size: 0.1,
        info_font: 5.5,
        description_font: 7.0,
        description_max_lines: 2,
        product_image_max_height: 0.0,
        qr_size: 0.0,
        barcode_width: 1.5,
        barcode_height: 0.3,
        sku_font: 6.0,
        footer_height: 0.08,
        footer_stripe: 0.0,
    };

    /// # Price Card (4 × 6 in)
    pub const PRICE: Self = Self {
        margin: 0.2,
        gap: 0.08,
        header_height: 0.55,
        header_font: 18.0,
        header_stripe: 0.05,
        logo_max_height: 0.5,
        model_font: 18.0,
        model_max_lines: 2,
        badge_font: 8.0,
        badge_pad_x: 0.08,
        badge_pad_y: 0.04,
        badge_gap: 0.06,
        badge_radius: 0.06,
        include_stock_badge: true,
        price_font: 36.0,
        original_price_font: 14.0,
        price_box: true,
        price_box_padding: 0.1,
        price_box_radius: 0.1,
        financing_font: 10.0,
        max_feature_badges: 4,
        feature_font: 7.5,
        spec_label_font: 8.0,
        spec_value_font: 8.0,
        spec_columns: 2,
        spec_row_gap: 0.05,
        spec_icon_size: 0.16,
        info_font: 7.5,
        description_font: 9.0,
        description_max_lines: 2,
        product_image_max_height: 1.2,
        qr_size: 0.9,
        barcode_width: 2.4,
        barcode_height: 0.45,
        sku_font: 8.0,
        footer_height: 0.15,
        footer_stripe: 0.0,
    };

    /// # Poster (8.5 × 11 in)
    ///
    /// Largest type, six feature badges, split footer accent.
    pub const POSTER: Self = Self {
        margin: 0.45,
        gap: 0.15,
        header_height: 1.0,
        header_font: 36.0,
        header_stripe: 0.1,
        logo_max_height: 1.0,
        model_font: 36.0,
        model_max_lines: 2,
        badge_font: 14.0,
        badge_pad_x: 0.14,
        badge_pad_y: 0.07,
        badge_gap: 0.1,
        badge_radius: 0.1,
        include_stock_badge: true,
        price_font: 72.0,
        original_price_font: 28.0,
        price_box: true,
        price_box_padding: 0.2,
        price_box_radius: 0.18,
        financing_font: 18.0,
        max_feature_badges: 6,
        feature_font: 13.0,
        spec_label_font: 14.0,
        spec_value_font: 14.0,
        spec_columns: 2,
        spec_row_gap: 0.1,
        spec_icon_size: 0.28,
        info_font: 13.0,
        description_font: 16.0,
        description_max_lines: 2,
        product_image_max_height: 2.8,
        qr_size: 1.6,
        barcode_width: 3.5,
        barcode_height: 0.7,
        sku_font: 12.0,
        footer_height: 0.4,
        footer_stripe: 0.1,
    };

    /// The built-in table for a card size.
    pub fn for_size(size: CardSize) -> Self {
        match size {
            CardSize::Shelf => Self::SHELF,
            CardSize::Price => Self::PRICE,
            CardSize::Poster => Self::POSTER,
        }
    }

    /// Overlay the keys of a JSON object onto this table.
    ///
    /// Unknown keys are rejected so a typo in an override file doesn't
    /// silently do nothing.
    pub fn with_overrides(&self, overrides: &serde_json::Value) -> Result<Self, CardError> {
        let serde_json::Value::Object(patch) = overrides else {
            return Err(CardError::Config(
                "layout overrides must be a JSON object".to_string(),
            ));
        };

        let mut base = serde_json::to_value(self)?;
        if let serde_json::Value::Object(fields) = &mut base {
            for (key, value) in patch {
                if !fields.contains_key(key) {
                    return Err(CardError::Config(format!(
                        "unknown layout config key '{}'",
                        key
                    )));
                }
                fields.insert(key.clone(), value.clone());
            }
        }

        let merged: LayoutConfig = serde_json::from_value(base)?;
        Ok(merged)
    }

    /// Content width available inside the margins of a card of `size`.
    pub fn content_width(&self, size: CardSize) -> f32 {
        let (width, _) = size.dimensions();
        (width - 2.0 * self.margin).max(0.0)
    }

    /// Reject tables that cannot produce a drawable card.
    pub fn validate(&self, size: CardSize) -> Result<(), CardError> {
        let (width, height) = size.dimensions();
        if self.margin < 0.0 || self.margin * 2.0 >= width {
            return Err(CardError::Config(format!(
                "margin {} leaves no content width on a {} card",
                self.margin, size
            )));
        }
        if self.header_height + self.footer_height >= height {
            return Err(CardError::Config(format!(
                "header and footer fill the whole {} card",
                size
            )));
        }
        if !(1..=2).contains(&self.spec_columns) {
            return Err(CardError::Config(format!(
                "spec_columns must be 1 or 2, got {}",
                self.spec_columns
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_tables_validate() {
        for size in CardSize::ALL {
            LayoutConfig::for_size(size).validate(size).unwrap();
        }
    }

    #[test]
    fn test_stock_badge_flags() {
        assert!(!LayoutConfig::SHELF.include_stock_badge);
        assert!(LayoutConfig::PRICE.include_stock_badge);
        assert!(LayoutConfig::POSTER.include_stock_badge);
    }

    #[test]
    fn test_overrides_merge() {
        let patched = LayoutConfig::PRICE
            .with_overrides(&serde_json::json!({"margin": 0.3, "include_stock_badge": false}))
            .unwrap();
        assert_eq!(patched.margin, 0.3);
        assert!(!patched.include_stock_badge);
        assert_eq!(patched.price_font, LayoutConfig::PRICE.price_font);
    }

    #[test]
    fn test_overrides_reject_unknown_key() {
        let err = LayoutConfig::SHELF
            .with_overrides(&serde_json::json!({"margn": 0.3}))
            .unwrap_err();
        assert!(err.to_string().contains("margn"));
    }

    #[test]
    fn test_validate_rejects_huge_margin() {
        let config = LayoutConfig {
            margin: 1.5,
            ..LayoutConfig::SHELF
        };
        assert!(config.validate(CardSize::Shelf).is_err());
    }

    #[test]
    fn test_content_width() {
        assert!((LayoutConfig::PRICE.content_width(CardSize::Price) - 3.6).abs() < 1e-5);
    }
}
