//! # Raster Assets
//!
//! QR codes, Code128 barcodes and the images a card embeds (logo, product
//! photo, brand icons).
//!
//! Assets are generated fresh on every call. A failure never aborts a
//! document: it is logged, recorded in [`AssetWarnings`], and the element
//! that needed the asset is left out.

pub mod barcode;
pub mod fit;
pub mod image;
pub mod qr;
pub mod resolve;

pub use barcode::generate_barcode_data_url;
pub use fit::{FittedImage, fit_within};
pub use image::{DefaultImageLoader, ImageLoader};
pub use qr::generate_qr_data_url;
pub use resolve::resolve_assets;

use ::image::{ExtendedColorType, GrayImage, ImageEncoder, codecs::png::PngEncoder};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::Serialize;
use tracing::warn;

use crate::error::CardError;

/// One recovered asset failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssetWarning {
    /// Which asset: `"qrcode"`, `"barcode"`, or an image src.
    pub asset: String,
    pub message: String,
}

/// Asset failures collected during one render.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AssetWarnings(Vec<AssetWarning>);

impl AssetWarnings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record and log a failure.
    pub fn push(&mut self, asset: impl Into<String>, error: &CardError) {
        let asset = asset.into();
        warn!(asset = %asset, error = %error, "asset omitted");
        self.0.push(AssetWarning {
            asset,
            message: error.to_string(),
        });
    }

    pub fn extend(&mut self, other: AssetWarnings) {
        self.0.extend(other.0);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AssetWarning> {
        self.0.iter()
    }
}

/// Encode an 8-bit grayscale image as PNG.
pub(crate) fn encode_png_gray(img: &GrayImage) -> Result<Vec<u8>, CardError> {
    let mut png_bytes = Vec::new();
    PngEncoder::new(&mut png_bytes)
        .write_image(img.as_raw(), img.width(), img.height(), ExtendedColorType::L8)
        .map_err(|e| CardError::Image(format!("PNG encoding failed: {}", e)))?;
    Ok(png_bytes)
}

/// `data:image/png;base64,...`
pub fn png_data_url(png: &[u8]) -> String {
    format!("data:image/png;base64,{}", STANDARD.encode(png))
}

/// Decode the payload of a `data:` URL.
///
/// Both base64 and plain (percent-free) payloads are accepted.
pub fn decode_data_url(url: &str) -> Result<Vec<u8>, CardError> {
    let rest = url
        .strip_prefix("data:")
        .ok_or_else(|| CardError::Asset("not a data URL".to_string()))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| CardError::Asset("data URL has no payload".to_string()))?;

    if header.ends_with(";base64") {
        STANDARD
            .decode(payload.trim())
            .map_err(|e| CardError::Asset(format!("invalid base64 in data URL: {}", e)))
    } else {
        Ok(payload.as_bytes().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_url_round_trip() {
        let url = png_data_url(&[1, 2, 3, 250]);
        assert!(url.starts_with("data:image/png;base64,"));
        assert_eq!(decode_data_url(&url).unwrap(), vec![1, 2, 3, 250]);
    }

    #[test]
    fn test_decode_rejects_non_data_url() {
        assert!(decode_data_url("https://example.com/a.png").is_err());
        assert!(decode_data_url("data:image/png;base64").is_err());
    }

    #[test]
    fn test_warnings_collect() {
        let mut warnings = AssetWarnings::new();
        warnings.push("qrcode", &CardError::Asset("too long".into()));
        assert_eq!(warnings.len(), 1);
        let first = warnings.iter().next().unwrap();
        assert_eq!(first.asset, "qrcode");
        assert!(first.message.contains("too long"));
    }
}
