//! # Error Types
//!
//! This module defines error types used throughout the speccard library.
//!
//! Asset-level failures ([`CardError::Asset`]) are normally recovered where they
//! happen: the element that needed the asset is dropped and the failure is
//! recorded as an [`AssetWarning`](crate::assets::AssetWarning). Everything
//! else is fatal to the single export call that raised it.

use thiserror::Error;

use crate::card::CardSize;

/// Main error type for speccard operations
#[derive(Debug, Error)]
pub enum CardError {
    /// An image, QR code or barcode could not be produced
    #[error("Asset error: {0}")]
    Asset(String),

    /// Unexpected failure while assembling a document
    #[error("Generation failed: {0}")]
    Generation(String),

    /// One size of a multi-size export failed; the batch stops here
    #[error("Export of {size} failed: {source}")]
    Export {
        size: CardSize,
        #[source]
        source: Box<CardError>,
    },

    /// Invalid configuration input (unknown size, bad layout table, ...)
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Image decoding/encoding error
    #[error("Image error: {0}")]
    Image(String),

    /// JSON error wrapper
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CardError {
    /// Wrap this error as the failure of one size in a batch export.
    pub fn for_size(self, size: CardSize) -> Self {
        CardError::Export {
            size,
            source: Box::new(self),
        }
    }
}
