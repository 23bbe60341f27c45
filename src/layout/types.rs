//! Element struct types for the card layout model.
//!
//! All types derive `Serialize + Deserialize` so a `CardLayout` can be
//! inspected as JSON, stored, or hand-written and fed to either backend.
//!
//! Geometry is in inches and font sizes in points, copied from the card's
//! [`LayoutConfig`](crate::card::LayoutConfig) at build time. Renderers never
//! look the size tables up themselves.
//!
//! Each element implements [`ElementMeta`] to declare its display label and
//! id prefix.

use serde::{Deserialize, Serialize};

use crate::brand::BrandIcon;
use crate::card::SpecCategory;

/// Metadata that every element struct must provide.
pub trait ElementMeta {
    /// Human-readable label (e.g. "Badge Row").
    fn label() -> &'static str;

    /// Prefix used when generating this element's id.
    fn id_prefix() -> &'static str;
}

fn default_true() -> bool {
    true
}

/// Horizontal alignment within the content width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Align {
    Left,
    #[default]
    Center,
    Right,
}

/// A solid band of color with a height, used for header and footer stripes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stripe {
    pub color: String,
    pub height: f32,
}

/// One pill-shaped label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badge {
    pub text: String,
    pub background: String,
    pub color: String,
}

impl Badge {
    pub fn new(text: impl Into<String>, background: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            background: background.into(),
            color: "#ffffff".into(),
        }
    }
}

// ============================================================================
// TEXT ELEMENTS
// ============================================================================

/// Store-name bar across the top of the card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeaderElement {
    pub id: String,
    #[serde(default = "default_true")]
    pub visible: bool,
    pub text: String,
    pub background: String,
    pub color: String,
    pub font_size: f32,
    pub height: f32,
    /// Accent stripe along the bottom edge of the bar.
    #[serde(default)]
    pub stripe: Option<Stripe>,
}

impl ElementMeta for HeaderElement {
    fn label() -> &'static str { "Header" }
    fn id_prefix() -> &'static str { "header" }
}

/// Word-wrapped text block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextElement {
    pub id: String,
    #[serde(default = "default_true")]
    pub visible: bool,
    pub text: String,
    pub font_size: f32,
    #[serde(default)]
    pub bold: bool,
    pub color: String,
    #[serde(default)]
    pub align: Align,
    /// Maximum wrapped lines; overflow is cut with an ellipsis. 0 = unlimited.
    #[serde(default)]
    pub max_lines: usize,
}

impl ElementMeta for TextElement {
    fn label() -> &'static str { "Text" }
    fn id_prefix() -> &'static str { "text" }
}

/// Stock-keeping-unit line under the barcode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkuElement {
    pub id: String,
    #[serde(default = "default_true")]
    pub visible: bool,
    pub text: String,
    pub font_size: f32,
    pub color: String,
}

impl ElementMeta for SkuElement {
    fn label() -> &'static str { "SKU" }
    fn id_prefix() -> &'static str { "sku" }
}

// ============================================================================
// BADGES
// ============================================================================

/// A single standalone badge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BadgeElement {
    pub id: String,
    #[serde(default = "default_true")]
    pub visible: bool,
    pub badge: Badge,
    pub font_size: f32,
    pub pad_x: f32,
    pub pad_y: f32,
    pub radius: f32,
    #[serde(default)]
    pub align: Align,
}

impl ElementMeta for BadgeElement {
    fn label() -> &'static str { "Badge" }
    fn id_prefix() -> &'static str { "badge" }
}

/// A centered, wrapping row of badges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BadgeRowElement {
    pub id: String,
    #[serde(default = "default_true")]
    pub visible: bool,
    pub badges: Vec<Badge>,
    pub font_size: f32,
    pub pad_x: f32,
    pub pad_y: f32,
    pub gap: f32,
    pub radius: f32,
}

impl ElementMeta for BadgeRowElement {
    fn label() -> &'static str { "Badge Row" }
    fn id_prefix() -> &'static str { "badge-row" }
}

// ============================================================================
// PRICING
// ============================================================================

/// Tinted rounded box drawn behind the price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBox {
    pub color: String,
    pub padding: f32,
    pub radius: f32,
}

/// Current price, optionally preceded by a struck-through original price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceElement {
    pub id: String,
    #[serde(default = "default_true")]
    pub visible: bool,
    pub price: String,
    /// Pre-sale price, rendered with a strikethrough.
    #[serde(default)]
    pub original: Option<String>,
    pub font_size: f32,
    pub original_font_size: f32,
    pub color: String,
    #[serde(default)]
    pub background: Option<PriceBox>,
}

impl ElementMeta for PriceElement {
    fn label() -> &'static str { "Price" }
    fn id_prefix() -> &'static str { "price" }
}

/// Monthly-payment line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancingElement {
    pub id: String,
    #[serde(default = "default_true")]
    pub visible: bool,
    /// Full display text, e.g. "or $108.33/mo for 12 months".
    pub text: String,
    /// Monthly payment, 2 decimals.
    pub monthly: String,
    pub months: u32,
    /// APR shown on the card, if any.
    #[serde(default)]
    pub apr: Option<f64>,
    pub font_size: f32,
    pub color: String,
}

impl ElementMeta for FinancingElement {
    fn label() -> &'static str { "Financing" }
    fn id_prefix() -> &'static str { "financing" }
}

// ============================================================================
// SPECS & INFO
// ============================================================================

/// One spec row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecItem {
    pub category: SpecCategory,
    pub label: String,
    pub value: String,
    #[serde(default)]
    pub icon: Option<BrandIcon>,
}

/// Spec grid arrangement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpecLayout {
    #[default]
    OneColumn,
    TwoColumn,
}

/// Spec list. `columns` holds one list per column, already split.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecsElement {
    pub id: String,
    #[serde(default = "default_true")]
    pub visible: bool,
    pub layout: SpecLayout,
    pub columns: Vec<Vec<SpecItem>>,
    pub label_font: f32,
    pub value_font: f32,
    pub row_gap: f32,
    pub icon_size: f32,
    pub label_color: String,
    pub value_color: String,
}

impl ElementMeta for SpecsElement {
    fn label() -> &'static str { "Specs" }
    fn id_prefix() -> &'static str { "specs" }
}

impl SpecsElement {
    /// All items, column by column.
    pub fn items(&self) -> impl Iterator<Item = &SpecItem> {
        self.columns.iter().flatten()
    }

    /// Rows needed for the tallest column.
    pub fn row_count(&self) -> usize {
        self.columns.iter().map(Vec::len).max().unwrap_or(0)
    }
}

/// One label/value cell of the info bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfoEntry {
    pub label: String,
    pub value: String,
}

/// OS / Warranty / Connectivity strip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfoBarElement {
    pub id: String,
    #[serde(default = "default_true")]
    pub visible: bool,
    pub entries: Vec<InfoEntry>,
    pub font_size: f32,
    pub background: String,
    pub color: String,
}

impl ElementMeta for InfoBarElement {
    fn label() -> &'static str { "Info Bar" }
    fn id_prefix() -> &'static str { "info-bar" }
}

// ============================================================================
// GRAPHICS
// ============================================================================

/// Raster image fitted into a bounding box at render time.
///
/// Only the source and the box are recorded; the aspect ratio is resolved by
/// the backend once the image has been decoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageElement {
    pub id: String,
    #[serde(default = "default_true")]
    pub visible: bool,
    pub src: String,
    #[serde(default)]
    pub alt: String,
    pub max_width: f32,
    pub max_height: f32,
    #[serde(default)]
    pub align: Align,
}

impl ElementMeta for ImageElement {
    fn label() -> &'static str { "Image" }
    fn id_prefix() -> &'static str { "image" }
}

/// Pre-rendered barcode image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarcodeElement {
    pub id: String,
    #[serde(default = "default_true")]
    pub visible: bool,
    /// PNG data URL; empty means the asset has not resolved.
    pub src: String,
    pub value: String,
    pub width: f32,
    pub height: f32,
}

impl ElementMeta for BarcodeElement {
    fn label() -> &'static str { "Barcode" }
    fn id_prefix() -> &'static str { "barcode" }
}

/// Pre-rendered QR code image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QrCodeElement {
    pub id: String,
    #[serde(default = "default_true")]
    pub visible: bool,
    /// PNG data URL; empty means the asset has not resolved.
    pub src: String,
    pub value: String,
    pub size: f32,
}

impl ElementMeta for QrCodeElement {
    fn label() -> &'static str { "QR Code" }
    fn id_prefix() -> &'static str { "qrcode" }
}

/// Horizontal rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DividerElement {
    pub id: String,
    #[serde(default = "default_true")]
    pub visible: bool,
    pub color: String,
    pub thickness: f32,
}

impl ElementMeta for DividerElement {
    fn label() -> &'static str { "Divider" }
    fn id_prefix() -> &'static str { "divider" }
}

// ============================================================================
// STRUCTURE
// ============================================================================

/// Main axis of a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    #[default]
    Row,
    Column,
}

/// Groups child elements along one axis, centered as a unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerElement {
    pub id: String,
    #[serde(default = "default_true")]
    pub visible: bool,
    #[serde(default)]
    pub direction: Direction,
    pub gap: f32,
    pub children: Vec<super::LayoutElement>,
}

impl ElementMeta for ContainerElement {
    fn label() -> &'static str { "Container" }
    fn id_prefix() -> &'static str { "container" }
}

/// Colored strip pinned to the bottom edge of the card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FooterAccentElement {
    pub id: String,
    #[serde(default = "default_true")]
    pub visible: bool,
    pub color: String,
    pub height: f32,
    /// Thinner stripe along the top of the strip.
    #[serde(default)]
    pub stripe: Option<Stripe>,
}

impl ElementMeta for FooterAccentElement {
    fn label() -> &'static str { "Footer Accent" }
    fn id_prefix() -> &'static str { "footer-accent" }
}
