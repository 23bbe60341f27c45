//! # Speccard - Spec Cards for Prebuilt PCs
//!
//! Speccard turns a retailer's description of a prebuilt computer into
//! print-ready spec cards in three physical sizes, plus a matching on-screen
//! preview. It provides:
//!
//! - **Layout model**: one device-independent `CardLayout` per card
//! - **Builders**: per-size layout builders driven by injectable tables
//! - **Print backend**: vector PDF output, multi-up sheets with crop marks
//! - **Preview backend**: an inline-styled HTML / JSON visual tree
//!
//! ## Quick Start
//!
//! ```no_run
//! use speccard::{
//!     card::{CardSize, ProductConfig},
//!     print::{PrintOptions, generate_multi_up},
//! };
//!
//! # async fn example() -> Result<(), speccard::CardError> {
//! let config = ProductConfig::sample();
//! let options = PrintOptions::default().with_crop_marks(true);
//!
//! // Twelve shelf tags on one letter sheet
//! let output = generate_multi_up(&config, CardSize::Shelf, &options).await?;
//! output.document.save("shelf-tags.pdf")?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`card`] | Sizes, product configuration, themes, layout tables |
//! | [`layout`] | Layout element model and builders |
//! | [`assets`] | QR codes, barcodes and image loading |
//! | [`print`] | Vector renderer, tiling and PDF output |
//! | [`preview`] | Screen preview tree |
//! | [`server`] | HTTP API |
//! | [`error`] | Error types |

pub mod assets;
pub mod brand;
pub mod card;
pub mod color;
pub mod error;
pub mod layout;
pub mod preview;
pub mod print;
pub mod server;

// Re-exports for convenience
pub use card::{CardSize, ProductConfig};
pub use error::CardError;
pub use layout::{BuilderContext, CardLayout, build_layout};
