//! 2 × 3 in shelf tag: the essentials only.

use super::shared::CardComposer;
use crate::card::SpecCategory;
use crate::layout::{BuilderContext, CardLayout, IdGenerator};

/// Header, logo, model, status badges, price, headline specs, info bar,
/// barcode/SKU and footer. Never financing or feature badges.
pub fn build_shelf_tag(ctx: &BuilderContext<'_>, ids: &mut IdGenerator) -> CardLayout {
    let mut card = CardComposer::new(ctx, ids);
    card.header()
        .logo()
        .model_name("#000000")
        .status_badges()
        .price()
        .specs(&SpecCategory::HEADLINE)
        .info_bar()
        .barcode_and_sku()
        .footer();
    card.finish()
}
