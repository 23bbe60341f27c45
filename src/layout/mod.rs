//! # Card Layout Model
//!
//! A [`CardLayout`] is the declarative description of one rendered card:
//! its physical size, resolved theme, and an ordered list of
//! [`LayoutElement`]s. Builders produce it; the print and preview backends
//! consume it. Nothing downstream of a builder decides per-size geometry.
//!
//! ## Element Order
//!
//! List order is top-to-bottom paint order. Every element flows below the
//! previous one except `footer-accent`, which is pinned to the bottom edge.
//!
//! ## Example (JSON)
//!
//! ```json
//! {
//!   "size": "shelf",
//!   "width": 2.0,
//!   "height": 3.0,
//!   "elements": [
//!     {"type": "header", "id": "header-1", "text": "Circuit City Labs", ...},
//!     {"type": "badge-row", "id": "badge-row-2", "badges": [...], ...}
//!   ]
//! }
//! ```

pub mod builders;
pub mod ids;
pub mod types;

pub use builders::{build_layout, build_layout_with_ids, build_poster, build_price_card, build_shelf_tag};
pub use ids::IdGenerator;
pub use types::*;

use serde::{Deserialize, Serialize};

use crate::brand::{BrandIconSet, BrandLookup};
use crate::card::{CardSize, LayoutConfig, ProductConfig, ThemeColors};

// ============================================================================
// ELEMENT ENUM
// ============================================================================

/// Generates the [`LayoutElement`] enum and the dispatch methods that need
/// to match over every variant.
macro_rules! define_elements {
    ($($(#[$attr:meta])* $variant:ident($inner:ty)),+ $(,)?) => {
        /// One drawable item of a card.
        ///
        /// Tagged as `{"type": "badge-row", ...}` in JSON.
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        #[serde(tag = "type", rename_all = "kebab-case")]
        pub enum LayoutElement {
            $($(#[$attr])* $variant($inner),)+
        }

        impl LayoutElement {
            /// Generated id, unique within one render pass.
            pub fn id(&self) -> &str {
                match self { $(LayoutElement::$variant(e) => &e.id,)+ }
            }

            pub fn is_visible(&self) -> bool {
                match self { $(LayoutElement::$variant(e) => e.visible,)+ }
            }

            pub fn set_visible(&mut self, visible: bool) {
                match self { $(LayoutElement::$variant(e) => e.visible = visible,)+ }
            }

            /// Human-readable label (from [`ElementMeta::label`]).
            pub fn label(&self) -> &'static str {
                match self { $(LayoutElement::$variant(_) => <$inner>::label(),)+ }
            }

            /// Serialized type tag, e.g. `"badge-row"`.
            pub fn kind(&self) -> &'static str {
                match self { $(LayoutElement::$variant(_) => <$inner>::id_prefix(),)+ }
            }
        }
    };
}

define_elements! {
    Header(HeaderElement),
    Text(TextElement),
    Badge(BadgeElement),
    BadgeRow(BadgeRowElement),
    Image(ImageElement),
    Price(PriceElement),
    Financing(FinancingElement),
    Specs(SpecsElement),
    InfoBar(InfoBarElement),
    Barcode(BarcodeElement),
    #[serde(rename = "qrcode")]
    QrCode(QrCodeElement),
    Sku(SkuElement),
    Divider(DividerElement),
    Container(ContainerElement),
    FooterAccent(FooterAccentElement),
}

// ============================================================================
// CARD LAYOUT
// ============================================================================

/// Card background.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Background {
    pub color: String,
    #[serde(default)]
    pub pattern: Option<String>,
}

/// Complete description of one card.
///
/// Built fresh per render and never mutated by a backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardLayout {
    pub size: CardSize,
    /// Width in inches.
    pub width: f32,
    /// Height in inches.
    pub height: f32,
    pub theme: ThemeColors,
    pub background: Background,
    pub font_family: String,
    /// Content inset from the card edge, inches.
    pub margin: f32,
    /// Gap between flowed elements, inches.
    pub gap: f32,
    pub elements: Vec<LayoutElement>,
}

impl CardLayout {
    /// Width between the left and right margins.
    pub fn content_width(&self) -> f32 {
        (self.width - 2.0 * self.margin).max(0.0)
    }

    /// First element with the given type tag.
    pub fn find(&self, kind: &str) -> Option<&LayoutElement> {
        self.elements.iter().find(|e| e.kind() == kind)
    }

    /// Every element, containers expanded depth-first.
    pub fn walk(&self) -> Vec<&LayoutElement> {
        fn visit<'a>(elements: &'a [LayoutElement], out: &mut Vec<&'a LayoutElement>) {
            for element in elements {
                out.push(element);
                if let LayoutElement::Container(c) = element {
                    visit(&c.children, out);
                }
            }
        }
        let mut out = Vec::new();
        visit(&self.elements, &mut out);
        out
    }
}

// ============================================================================
// BUILDER CONTEXT
// ============================================================================

/// Pre-resolved raster assets, as PNG data URLs.
///
/// Produced by [`crate::assets::resolve_assets`]; builders only read it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AsyncAssets {
    pub qr_code: Option<String>,
    pub barcode: Option<String>,
}

static NO_BRAND_ICONS: BrandIconSet = BrandIconSet { icons: Vec::new() };

/// Everything a builder reads.
///
/// Builders never fetch or decode anything; assets arrive already resolved.
#[derive(Clone, Copy)]
pub struct BuilderContext<'a> {
    pub config: &'a ProductConfig,
    pub size: CardSize,
    pub brand_icons: &'a dyn BrandLookup,
    pub layout_override: Option<&'a LayoutConfig>,
    pub assets: Option<&'a AsyncAssets>,
}

impl<'a> BuilderContext<'a> {
    /// Context with no brand icons, default geometry and no assets.
    pub fn new(config: &'a ProductConfig, size: CardSize) -> Self {
        Self {
            config,
            size,
            brand_icons: &NO_BRAND_ICONS,
            layout_override: None,
            assets: None,
        }
    }

    pub fn with_brand_icons(mut self, icons: &'a dyn BrandLookup) -> Self {
        self.brand_icons = icons;
        self
    }

    pub fn with_layout_config(mut self, layout: &'a LayoutConfig) -> Self {
        self.layout_override = Some(layout);
        self
    }

    pub fn with_assets(mut self, assets: &'a AsyncAssets) -> Self {
        self.assets = Some(assets);
        self
    }

    /// Resolved theme for this render.
    pub fn theme(&self) -> ThemeColors {
        self.config.theme.resolve()
    }

    /// Geometry table: the override if one was injected, else the built-in.
    pub fn layout_config(&self) -> LayoutConfig {
        self.layout_override
            .cloned()
            .unwrap_or_else(|| LayoutConfig::for_size(self.size))
    }

    pub fn qr_code(&self) -> Option<&'a str> {
        self.assets.and_then(|a| a.qr_code.as_deref())
    }

    pub fn barcode(&self) -> Option<&'a str> {
        self.assets.and_then(|a| a.barcode.as_deref())
    }
}

impl std::fmt::Debug for BuilderContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuilderContext")
            .field("size", &self.size)
            .field("layout_override", &self.layout_override.is_some())
            .field("assets", &self.assets)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_tags() {
        let qr = LayoutElement::QrCode(QrCodeElement {
            id: "qrcode-1".into(),
            visible: true,
            src: "data:image/png;base64,AAAA".into(),
            value: "https://example.com".into(),
            size: 1.0,
        });
        let json = serde_json::to_value(&qr).unwrap();
        assert_eq!(json["type"], "qrcode");
        assert_eq!(qr.kind(), "qrcode");

        let footer = LayoutElement::FooterAccent(FooterAccentElement {
            id: "footer-accent-2".into(),
            visible: true,
            color: "#000000".into(),
            height: 0.1,
            stripe: None,
        });
        let json = serde_json::to_value(&footer).unwrap();
        assert_eq!(json["type"], "footer-accent");
        assert_eq!(footer.kind(), "footer-accent");
    }

    #[test]
    fn test_visible_defaults_true() {
        let el: LayoutElement = serde_json::from_str(
            r##"{"type": "divider", "id": "divider-1", "color": "#cccccc", "thickness": 0.01}"##,
        )
        .unwrap();
        assert!(el.is_visible());
        assert_eq!(el.label(), "Divider");
    }

    #[test]
    fn test_context_layout_override() {
        let config = ProductConfig::default();
        let custom = LayoutConfig {
            margin: 0.3,
            ..LayoutConfig::SHELF
        };
        let ctx = BuilderContext::new(&config, CardSize::Shelf);
        assert_eq!(ctx.layout_config(), LayoutConfig::SHELF);
        let ctx = ctx.with_layout_config(&custom);
        assert_eq!(ctx.layout_config().margin, 0.3);
    }
}
