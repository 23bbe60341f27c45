//! 4 × 6 in price card.

use super::shared::CardComposer;
use crate::card::SpecCategory;
use crate::layout::{BuilderContext, CardLayout, IdGenerator};

pub fn build_price_card(ctx: &BuilderContext<'_>, ids: &mut IdGenerator) -> CardLayout {
    let mut card = CardComposer::new(ctx, ids);
    let heading = card.accent_heading_color();
    card.header()
        .logo()
        .model_name(&heading)
        .status_badges()
        .price()
        .financing(false)
        .feature_badges()
        .specs(&SpecCategory::ALL)
        .info_bar()
        .media_row()
        .barcode_and_sku()
        .footer();
    card.finish()
}
