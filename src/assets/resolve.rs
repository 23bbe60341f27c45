//! Producing the [`AsyncAssets`] bundle before a builder runs.

use tracing::{debug, instrument};

use super::AssetWarnings;
use super::barcode::try_generate_barcode_data_url;
use super::qr::try_generate_qr_data_url;
use crate::card::ProductConfig;
use crate::layout::AsyncAssets;

/// Generate the QR code (from `qr_url`) and barcode (from `sku`).
///
/// Each is attempted only when its input is non-empty. Failures are logged
/// and recorded; the corresponding field stays `None`.
#[instrument(skip_all)]
pub async fn resolve_assets(config: &ProductConfig) -> (AsyncAssets, AssetWarnings) {
    let mut assets = AsyncAssets::default();
    let mut warnings = AssetWarnings::new();

    let qr_url = config.qr_url.trim();
    if !qr_url.is_empty() {
        match try_generate_qr_data_url(qr_url).await {
            Ok(url) => assets.qr_code = Some(url),
            Err(e) => warnings.push("qrcode", &e),
        }
    }

    let sku = config.sku.trim();
    if !sku.is_empty() {
        match try_generate_barcode_data_url(sku).await {
            Ok(url) => assets.barcode = Some(url),
            Err(e) => warnings.push("barcode", &e),
        }
    }

    debug!(
        qr = assets.qr_code.is_some(),
        barcode = assets.barcode.is_some(),
        warnings = warnings.len(),
        "resolved card assets"
    );
    (assets, warnings)
}
