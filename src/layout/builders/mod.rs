//! # Layout Builders
//!
//! Turn a [`BuilderContext`] into a [`CardLayout`]. Builders are synchronous
//! and pure: the same context and a fresh [`IdGenerator`] always produce the
//! same layout.
//!
//! | Size | Builder | Adds over the previous size |
//! |------|---------|-----------------------------|
//! | shelf | [`build_shelf_tag`] | |
//! | price | [`build_price_card`] | financing, features, all specs, media row |
//! | poster | [`build_poster`] | description, APR, divider, split footer |

pub mod finance;
mod poster;
mod price;
mod shared;
mod shelf;

pub use finance::{calculate_monthly_payment, discount_percent, format_price};
pub use poster::build_poster;
pub use price::build_price_card;
pub use shelf::build_shelf_tag;

use tracing::debug;

use super::{BuilderContext, CardLayout, IdGenerator};
use crate::card::CardSize;

/// Build the layout for `ctx.size` with a fresh id sequence.
pub fn build_layout(ctx: &BuilderContext<'_>) -> CardLayout {
    let mut ids = IdGenerator::new();
    build_layout_with_ids(ctx, &mut ids)
}

/// Build with a caller-owned id sequence.
pub fn build_layout_with_ids(ctx: &BuilderContext<'_>, ids: &mut IdGenerator) -> CardLayout {
    let layout = match ctx.size {
        CardSize::Shelf => build_shelf_tag(ctx, ids),
        CardSize::Price => build_price_card(ctx, ids),
        CardSize::Poster => build_poster(ctx, ids),
    };
    debug!(
        size = %ctx.size,
        elements = layout.elements.len(),
        "built card layout"
    );
    layout
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brand::{BrandIconEntry, BrandIconSet};
    use crate::card::{ProductConfig, SaleInfo};
    use crate::layout::{AsyncAssets, LayoutElement, SpecLayout};

    fn assets() -> AsyncAssets {
        AsyncAssets {
            qr_code: Some("data:image/png;base64,QR".into()),
            barcode: Some("data:image/png;base64,BC".into()),
        }
    }

    fn kinds(layout: &CardLayout) -> Vec<&'static str> {
        layout.elements.iter().map(LayoutElement::kind).collect()
    }

    #[test]
    fn test_shelf_element_order() {
        let config = ProductConfig::sample();
        let layout = build_layout(&BuilderContext::new(&config, CardSize::Shelf));
        assert_eq!(
            kinds(&layout),
            vec!["header", "text", "badge-row", "price", "specs", "info-bar", "sku", "footer-accent"]
        );
    }

    #[test]
    fn test_shelf_tag_never_has_financing() {
        let config = ProductConfig::sample();
        let layout = build_layout(&BuilderContext::new(&config, CardSize::Shelf));
        assert!(layout.find("financing").is_none());
        assert_eq!(layout.size, CardSize::Shelf);
        assert_eq!((layout.width, layout.height), (2.0, 3.0));
    }

    #[test]
    fn test_price_card_has_financing_without_apr() {
        let config = ProductConfig::sample();
        let layout = build_layout(&BuilderContext::new(&config, CardSize::Price));
        let Some(LayoutElement::Financing(f)) = layout.find("financing") else {
            panic!("no financing element");
        };
        assert!(f.text.starts_with("or $"));
        assert!(!f.text.contains("APR"));
        assert_eq!(f.apr, None);
    }

    #[test]
    fn test_poster_shows_apr() {
        let config = ProductConfig::sample();
        let layout = build_layout(&BuilderContext::new(&config, CardSize::Poster));
        let Some(LayoutElement::Financing(f)) = layout.find("financing") else {
            panic!("no financing element");
        };
        assert!(f.text.ends_with("@ 9.99% APR"), "{}", f.text);
    }

    #[test]
    fn test_financing_requires_positive_price() {
        let mut config = ProductConfig::sample();
        config.price = 0.0;
        let layout = build_layout(&BuilderContext::new(&config, CardSize::Poster));
        assert!(layout.find("financing").is_none());
    }

    #[test]
    fn test_sale_badge_discount() {
        let config = ProductConfig {
            price: 800.0,
            sale: SaleInfo {
                enabled: true,
                original_price: 1000.0,
                badge_text: "SALE".into(),
            },
            ..Default::default()
        };
        let layout = build_layout(&BuilderContext::new(&config, CardSize::Shelf));
        let Some(LayoutElement::BadgeRow(row)) = layout.find("badge-row") else {
            panic!("no badge row");
        };
        assert_eq!(row.badges.len(), 1);
        assert!(row.badges[0].text.ends_with("20% OFF"));
        assert_eq!(row.badges[0].background, "#dc2626");
    }

    #[test]
    fn test_empty_badge_row_omitted() {
        let config = ProductConfig {
            model_name: "Plain".into(),
            price: 499.0,
            ..Default::default()
        };
        for size in CardSize::ALL {
            let layout = build_layout(&BuilderContext::new(&config, size));
            assert!(layout.find("badge-row").is_none(), "{size}");
        }
    }

    #[test]
    fn test_stock_badge_only_on_larger_sizes() {
        let config = ProductConfig::sample();
        let shelf = build_layout(&BuilderContext::new(&config, CardSize::Shelf));
        let price = build_layout(&BuilderContext::new(&config, CardSize::Price));
        let has_stock = |layout: &CardLayout| match layout.find("badge-row") {
            Some(LayoutElement::BadgeRow(row)) => row.badges.iter().any(|b| b.text == "IN STOCK"),
            _ => false,
        };
        assert!(!has_stock(&shelf));
        assert!(has_stock(&price));
    }

    #[test]
    fn test_empty_sku_has_no_barcode_or_sku() {
        let mut config = ProductConfig::sample();
        config.sku = String::new();
        let assets = assets();
        for size in CardSize::ALL {
            let ctx = BuilderContext::new(&config, size).with_assets(&assets);
            let layout = build_layout(&ctx);
            assert!(layout.find("barcode").is_none());
            assert!(layout.find("sku").is_none());
        }
    }

    #[test]
    fn test_barcode_needs_resolved_asset() {
        let config = ProductConfig::sample();
        let layout = build_layout(&BuilderContext::new(&config, CardSize::Price));
        assert!(layout.find("barcode").is_none());
        assert!(layout.find("sku").is_some());

        let assets = assets();
        let ctx = BuilderContext::new(&config, CardSize::Price).with_assets(&assets);
        assert!(build_layout(&ctx).find("barcode").is_some());
    }

    #[test]
    fn test_qr_recorded_only_with_asset() {
        let config = ProductConfig::sample();
        let bare = build_layout(&BuilderContext::new(&config, CardSize::Poster));
        assert!(!bare.walk().iter().any(|e| e.kind() == "qrcode"));

        let assets = assets();
        let ctx = BuilderContext::new(&config, CardSize::Poster).with_assets(&assets);
        let layout = build_layout(&ctx);
        let Some(LayoutElement::Container(row)) = layout.find("container") else {
            panic!("no media row");
        };
        assert_eq!(row.children.len(), 1);
        assert_eq!(row.children[0].kind(), "qrcode");
    }

    #[test]
    fn test_empty_spec_values_skipped() {
        let mut config = ProductConfig::sample();
        config.specs.gpu = "   ".into();
        config.specs.psu = String::new();
        let layout = build_layout(&BuilderContext::new(&config, CardSize::Price));
        let Some(LayoutElement::Specs(specs)) = layout.find("specs") else {
            panic!("no specs");
        };
        assert_eq!(specs.items().count(), 6);
        assert!(specs.items().all(|item| !item.value.is_empty()));
        assert_eq!(specs.layout, SpecLayout::TwoColumn);
        assert_eq!(specs.columns[0].len(), 3);
        assert_eq!(specs.columns[1].len(), 3);
    }

    #[test]
    fn test_shelf_specs_headline_only() {
        let config = ProductConfig::sample();
        let layout = build_layout(&BuilderContext::new(&config, CardSize::Shelf));
        let Some(LayoutElement::Specs(specs)) = layout.find("specs") else {
            panic!("no specs");
        };
        assert_eq!(specs.layout, SpecLayout::OneColumn);
        assert_eq!(specs.items().count(), 4);
    }

    #[test]
    fn test_two_column_split_favors_left() {
        let mut config = ProductConfig::sample();
        config.specs.cooling = String::new();
        let layout = build_layout(&BuilderContext::new(&config, CardSize::Poster));
        let Some(LayoutElement::Specs(specs)) = layout.find("specs") else {
            panic!("no specs");
        };
        assert_eq!(specs.columns[0].len(), 4);
        assert_eq!(specs.columns[1].len(), 3);
    }

    #[test]
    fn test_brand_icons_attached() {
        let config = ProductConfig::sample();
        let icons = BrandIconSet::new(vec![BrandIconEntry {
            name: "AMD".into(),
            src: "icons/amd.png".into(),
            keywords: vec![],
        }]);
        let ctx = BuilderContext::new(&config, CardSize::Shelf).with_brand_icons(&icons);
        let layout = build_layout(&ctx);
        let Some(LayoutElement::Specs(specs)) = layout.find("specs") else {
            panic!("no specs");
        };
        let cpu = specs.items().next().unwrap();
        assert_eq!(cpu.icon.as_ref().map(|i| i.name.as_str()), Some("AMD"));
    }

    #[test]
    fn test_feature_cap() {
        let config = ProductConfig::sample();
        let count_features = |size| {
            let layout = build_layout(&BuilderContext::new(&config, size));
            layout
                .elements
                .iter()
                .filter_map(|e| match e {
                    LayoutElement::BadgeRow(row) => Some(row.badges.len()),
                    _ => None,
                })
                .nth(1)
                .unwrap_or(0)
        };
        assert_eq!(count_features(CardSize::Price), 4);
        assert_eq!(count_features(CardSize::Poster), 6);
    }

    #[test]
    fn test_builders_are_deterministic() {
        let config = ProductConfig::sample();
        let assets = assets();
        for size in CardSize::ALL {
            let ctx = BuilderContext::new(&config, size).with_assets(&assets);
            assert_eq!(build_layout(&ctx), build_layout(&ctx));
        }
    }

    #[test]
    fn test_ids_unique_within_pass() {
        let config = ProductConfig::sample();
        let assets = assets();
        let ctx = BuilderContext::new(&config, CardSize::Poster).with_assets(&assets);
        let layout = build_layout(&ctx);
        let all = layout.walk();
        let mut ids: Vec<&str> = all.iter().map(|e| e.id()).collect();
        let total = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), total);
    }

    #[test]
    fn test_model_name_fallback_and_colors() {
        let config = ProductConfig::default();
        let shelf = build_layout(&BuilderContext::new(&config, CardSize::Shelf));
        let Some(LayoutElement::Text(model)) = shelf.find("text") else {
            panic!("no model name");
        };
        assert_eq!(model.text, "PC Build");
        assert_eq!(model.color, "#000000");
        assert!(model.bold);

        let price = build_layout(&BuilderContext::new(&config, CardSize::Price));
        let Some(LayoutElement::Text(model)) = price.find("text") else {
            panic!("no model name");
        };
        assert_eq!(model.color, crate::color::darken_color("#3b82f6", 0.3));
    }

    #[test]
    fn test_header_omitted_without_store_name() {
        let config = ProductConfig::default();
        let layout = build_layout(&BuilderContext::new(&config, CardSize::Price));
        assert!(layout.find("header").is_none());
    }

    #[test]
    fn test_poster_footer_is_split() {
        let config = ProductConfig::sample();
        let layout = build_layout(&BuilderContext::new(&config, CardSize::Poster));
        let Some(LayoutElement::FooterAccent(footer)) = layout.elements.last() else {
            panic!("footer must be last");
        };
        let stripe = footer.stripe.as_ref().unwrap();
        assert_eq!(footer.color, "#3b82f6");
        assert_eq!(stripe.color, "#1e3a8a");
        assert!(stripe.height < footer.height);
    }
}
