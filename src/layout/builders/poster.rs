//! 8.5 × 11 in poster: everything the price card has plus the description,
//! the financing APR and a divider above the barcode.

use super::shared::CardComposer;
use crate::card::SpecCategory;
use crate::layout::{BuilderContext, CardLayout, IdGenerator};

pub fn build_poster(ctx: &BuilderContext<'_>, ids: &mut IdGenerator) -> CardLayout {
    let mut card = CardComposer::new(ctx, ids);
    let heading = card.accent_heading_color();
    card.header()
        .logo()
        .model_name(&heading)
        .description()
        .status_badges()
        .price()
        .financing(true)
        .feature_badges()
        .specs(&SpecCategory::ALL)
        .info_bar()
        .media_row()
        .divider()
        .barcode_and_sku()
        .footer();
    card.finish()
}
