//! QR code rasterization.

use ::image::{GrayImage, Luma};
use qrcode::{EcLevel, QrCode};

use super::{encode_png_gray, png_data_url};
use crate::error::CardError;

/// Pixels per QR module in the generated PNG.
const MODULE_PX: u32 = 8;
/// Quiet zone on every side, in modules.
const QUIET_ZONE: u32 = 4;

/// Render `text` as a QR code PNG.
pub fn qr_png(text: &str) -> Result<Vec<u8>, CardError> {
    if text.trim().is_empty() {
        return Err(CardError::Asset("QR code content is empty".to_string()));
    }
    let code = QrCode::with_error_correction_level(text, EcLevel::M)
        .map_err(|e| CardError::Asset(format!("QR code generation failed: {}", e)))?;

    let modules = code.width() as u32;
    let side = (modules + 2 * QUIET_ZONE) * MODULE_PX;
    let mut img = GrayImage::from_pixel(side, side, Luma([255u8]));

    for qy in 0..modules {
        for qx in 0..modules {
            if code[(qx as usize, qy as usize)] != qrcode::Color::Dark {
                continue;
            }
            let x0 = (qx + QUIET_ZONE) * MODULE_PX;
            let y0 = (qy + QUIET_ZONE) * MODULE_PX;
            for y in y0..y0 + MODULE_PX {
                for x in x0..x0 + MODULE_PX {
                    img.put_pixel(x, y, Luma([0u8]));
                }
            }
        }
    }

    encode_png_gray(&img)
}

/// Fallible form of [`generate_qr_data_url`].
pub async fn try_generate_qr_data_url(text: &str) -> Result<String, CardError> {
    qr_png(text).map(|png| png_data_url(&png))
}

/// QR code for `text` as a PNG data URL; `None` on failure.
pub async fn generate_qr_data_url(text: &str) -> Option<String> {
    try_generate_qr_data_url(text).await.ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_qr_data_url() {
        let url = generate_qr_data_url("https://example.com/nebula").await.unwrap();
        assert!(url.starts_with("data:image/png;base64,"));
    }

    #[test]
    fn test_qr_png_is_square_with_quiet_zone() {
        let png = qr_png("hello").unwrap();
        let img = ::image::load_from_memory(&png).unwrap().to_luma8();
        assert_eq!(img.width(), img.height());
        // corner lies in the quiet zone
        assert_eq!(img.get_pixel(0, 0)[0], 255);
    }

    #[tokio::test]
    async fn test_empty_text_fails() {
        assert!(generate_qr_data_url("  ").await.is_none());
    }

    #[tokio::test]
    async fn test_oversized_payload_fails() {
        let huge = "x".repeat(8000);
        assert!(try_generate_qr_data_url(&huge).await.is_err());
    }
}
