//! Code128 barcode rasterization.

use ::image::{GrayImage, Luma};
use barcoders::sym::code128::Code128;

use super::{encode_png_gray, png_data_url};
use crate::error::CardError;

/// Pixels per barcode module.
const MODULE_PX: u32 = 3;
/// Bar height in pixels.
const BAR_HEIGHT: u32 = 90;
/// Quiet zone on each side, in modules.
const QUIET_ZONE: u32 = 10;

/// Encode `data` as Code128 modules (`true` = bar).
///
/// Uses character set B, which covers all printable ASCII.
pub fn encode_code128(data: &str) -> Result<Vec<bool>, CardError> {
    if data.is_empty() {
        return Err(CardError::Asset("barcode content is empty".to_string()));
    }
    let prefixed = format!("\u{0181}{}", data);
    let barcode = Code128::new(&prefixed)
        .map_err(|e| CardError::Asset(format!("Code128 cannot encode '{}': {:?}", data, e)))?;
    Ok(barcode.encode().into_iter().map(|m| m == 1).collect())
}

/// Render `data` as a Code128 PNG.
pub fn barcode_png(data: &str) -> Result<Vec<u8>, CardError> {
    let modules = encode_code128(data)?;
    let width = (modules.len() as u32 + 2 * QUIET_ZONE) * MODULE_PX;
    let mut img = GrayImage::from_pixel(width, BAR_HEIGHT, Luma([255u8]));

    for (i, _) in modules.iter().enumerate().filter(|(_, bar)| **bar) {
        let x0 = (i as u32 + QUIET_ZONE) * MODULE_PX;
        for x in x0..x0 + MODULE_PX {
            for y in 0..BAR_HEIGHT {
                img.put_pixel(x, y, Luma([0u8]));
            }
        }
    }

    encode_png_gray(&img)
}

/// Fallible form of [`generate_barcode_data_url`].
pub async fn try_generate_barcode_data_url(data: &str) -> Result<String, CardError> {
    barcode_png(data).map(|png| png_data_url(&png))
}

/// Code128 barcode for `data` as a PNG data URL; `None` on failure.
pub async fn generate_barcode_data_url(data: &str) -> Option<String> {
    try_generate_barcode_data_url(data).await.ok()
}
