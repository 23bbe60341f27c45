//! # Card Definitions
//!
//! Physical card sizes, the per-size layout tables, and the product
//! configuration a card is built from.
//!
//! ## Card Sizes
//!
//! | Size | Name | Width × Height |
//! |------|------|----------------|
//! | `shelf` | Shelf Tag | 2 × 3 in |
//! | `price` | Price Card | 4 × 6 in |
//! | `poster` | Poster | 8.5 × 11 in |
//!
//! The table is authoritative for both the print and the preview backend.

pub mod config;
pub mod product;
pub mod theme;

pub use config::LayoutConfig;
pub use product::{
    Condition, FinancingInfo, ProductConfig, SaleInfo, SpecCategory, SpecValues, StockStatus,
};
pub use theme::{ThemeColors, ThemeSelection};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CardError;

/// One of the three physical card sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardSize {
    /// 2 × 3 in shelf tag.
    Shelf,
    /// 4 × 6 in price card.
    Price,
    /// 8.5 × 11 in poster.
    Poster,
}

impl CardSize {
    /// All sizes, smallest first.
    pub const ALL: [CardSize; 3] = [CardSize::Shelf, CardSize::Price, CardSize::Poster];

    /// Physical `(width, height)` in inches.
    pub fn dimensions(self) -> (f32, f32) {
        match self {
            CardSize::Shelf => (2.0, 3.0),
            CardSize::Price => (4.0, 6.0),
            CardSize::Poster => (8.5, 11.0),
        }
    }

    /// Human-readable name used in captions and file names.
    pub fn label(self) -> &'static str {
        match self {
            CardSize::Shelf => "Shelf Tag",
            CardSize::Price => "Price Card",
            CardSize::Poster => "Poster",
        }
    }

    /// Serde/URL key (`shelf`, `price`, `poster`).
    pub fn key(self) -> &'static str {
        match self {
            CardSize::Shelf => "shelf",
            CardSize::Price => "price",
            CardSize::Poster => "poster",
        }
    }
}

impl fmt::Display for CardSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for CardSize {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "shelf" | "shelf-tag" | "shelf_tag" => Ok(CardSize::Shelf),
            "price" | "price-card" | "price_card" => Ok(CardSize::Price),
            "poster" => Ok(CardSize::Poster),
            other => Err(CardError::Config(format!(
                "unknown card size '{}' (expected shelf, price or poster)",
                other
            ))),
        }
    }
}
