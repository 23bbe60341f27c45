//! # Print Backend
//!
//! Physically dimensioned PDF output.
//!
//! ```text
//! ProductConfig ─► resolve_assets ─► build_layout ─► vector::render_card ─► Page ─► pdf
//! ```
//!
//! Everything is measured in inches with text in points. Single cards come
//! out at their own size; [`generate_multi_up`] tiles as many copies as fit
//! on a US Letter sheet.

pub mod badges;
pub mod ops;
pub mod pdf;
pub mod text;
pub mod tiling;
pub mod vector;

use std::path::Path;
use std::sync::Arc;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use tracing::{debug, info};

use crate::assets::{AssetWarnings, DefaultImageLoader, ImageLoader, resolve_assets};
use crate::brand::BrandIconSet;
use crate::card::{CardSize, LayoutConfig, ProductConfig};
use crate::error::CardError;
use crate::layout::{BuilderContext, CardLayout, build_layout};

pub use ops::{DrawOp, Page};
pub use tiling::TileGrid;
use text::{ascent, line_height, text_width, truncate_to_width};
use tiling::{CROP_MARK_LENGTH, CROP_MARK_OFFSET};

const CROP_MARK_COLOR: &str = "#000000";
/// 0.25pt hairline.
const CROP_MARK_THICKNESS: f32 = 0.25 / 72.0;
const CAPTION_SIZE: f32 = 8.0;
const CAPTION_COLOR: &str = "#6b7280";

/// Knobs shared by every print entry point.
#[derive(Clone, Default)]
pub struct PrintOptions {
    /// Draw crop marks around a multi-up grid.
    pub crop_marks: bool,
    /// Partial `LayoutConfig` JSON merged over each size's built-in table.
    pub layout_overrides: Option<serde_json::Value>,
    pub brand_icons: Option<Arc<BrandIconSet>>,
    /// Defaults to [`DefaultImageLoader`].
    pub loader: Option<Arc<dyn ImageLoader>>,
}

impl std::fmt::Debug for PrintOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrintOptions")
            .field("crop_marks", &self.crop_marks)
            .field("layout_overrides", &self.layout_overrides)
            .field("brand_icons", &self.brand_icons.as_ref().map(|b| b.icons.len()))
            .field("custom_loader", &self.loader.is_some())
            .finish()
    }
}

impl PrintOptions {
    pub fn with_crop_marks(mut self, crop_marks: bool) -> Self {
        self.crop_marks = crop_marks;
        self
    }

    /// Layout table for `size` with any overrides applied.
    pub fn layout_config(&self, size: CardSize) -> Result<LayoutConfig, CardError> {
        let base = LayoutConfig::for_size(size);
        let config = match &self.layout_overrides {
            Some(overrides) => base.with_overrides(overrides)?,
            None => base,
        };
        config.validate(size)?;
        Ok(config)
    }

    fn loader(&self) -> Result<Arc<dyn ImageLoader>, CardError> {
        match &self.loader {
            Some(loader) => Ok(Arc::clone(loader)),
            None => Ok(Arc::new(DefaultImageLoader::new()?)),
        }
    }
}

// ============================================================================
// DOCUMENT
// ============================================================================

/// A finished, not yet serialized, print document.
#[derive(Debug, Clone, PartialEq)]
pub struct PrintDocument {
    pub title: String,
    pub pages: Vec<Page>,
}

impl PrintDocument {
    /// Serialize to PDF.
    pub fn to_bytes(&self) -> Result<Vec<u8>, CardError> {
        pdf::write_pdf(&self.title, &self.pages)
    }

    /// PDF bytes as standard base64, for attachments.
    pub fn to_base64(&self) -> Result<String, CardError> {
        Ok(STANDARD.encode(self.to_bytes()?))
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), CardError> {
        let path = path.as_ref();
        std::fs::write(path, self.to_bytes()?)?;
        info!(path = %path.display(), pages = self.pages.len(), "saved PDF");
        Ok(())
    }
}

/// A document plus whatever assets had to be left out of it.
#[derive(Debug, Clone)]
pub struct PrintOutput {
    pub document: PrintDocument,
    pub warnings: AssetWarnings,
}

/// One size of a batch export, already serialized.
#[derive(Debug, Clone)]
pub struct ExportedCard {
    pub size: CardSize,
    pub pdf: Vec<u8>,
    pub warnings: AssetWarnings,
}

// ============================================================================
// ENTRY POINTS
// ============================================================================

/// Resolve assets and build the layout the print path will draw.
pub async fn prepare_layout(
    config: &ProductConfig,
    size: CardSize,
    options: &PrintOptions,
) -> Result<(CardLayout, AssetWarnings), CardError> {
    let layout_config = options.layout_config(size)?;
    let (assets, warnings) = resolve_assets(config).await;

    let mut ctx = BuilderContext::new(config, size)
        .with_layout_config(&layout_config)
        .with_assets(&assets);
    if let Some(icons) = options.brand_icons.as_deref() {
        ctx = ctx.with_brand_icons(icons);
    }
    Ok((build_layout(&ctx), warnings))
}

async fn render_single(
    config: &ProductConfig,
    size: CardSize,
    options: &PrintOptions,
) -> Result<(Page, AssetWarnings), CardError> {
    let (layout, mut warnings) = prepare_layout(config, size, options).await?;
    let loader = options.loader()?;
    let (page, render_warnings) = vector::render_card(&layout, loader.as_ref()).await;
    warnings.extend(render_warnings);
    Ok((page, warnings))
}

fn title(config: &ProductConfig, size: CardSize) -> String {
    format!("{} · {}", config.display_name(), size.label())
}

/// One card on a page of its own size.
pub async fn generate_card(
    config: &ProductConfig,
    size: CardSize,
    options: &PrintOptions,
) -> Result<PrintOutput, CardError> {
    let (page, warnings) = render_single(config, size, options).await?;
    info!(
        size = %size,
        warnings = warnings.len(),
        "generated card document"
    );
    Ok(PrintOutput {
        document: PrintDocument {
            title: title(config, size),
            pages: vec![page],
        },
        warnings,
    })
}

/// As many copies of the card as fit on one US Letter sheet.
pub async fn generate_multi_up(
    config: &ProductConfig,
    size: CardSize,
    options: &PrintOptions,
) -> Result<PrintOutput, CardError> {
    let (card, warnings) = render_single(config, size, options).await?;
    let grid = TileGrid::letter(card.width, card.height)?;
    let mut sheet = Page::new(grid.page_width, grid.page_height);

    for (i, (x, y)) in grid.cells().enumerate() {
        sheet.stamp(&card, x, y);
        debug!(tile = i, x, y, "placed card");
    }

    if options.crop_marks {
        for mark in grid.crop_marks(CROP_MARK_OFFSET, CROP_MARK_LENGTH) {
            sheet.push(DrawOp::Line {
                x1: mark.x1,
                y1: mark.y1,
                x2: mark.x2,
                y2: mark.y2,
                color: CROP_MARK_COLOR.into(),
                thickness: CROP_MARK_THICKNESS,
            });
        }
    }

    let caption = title(config, size);
    stamp_caption(&mut sheet, &grid, &caption);

    info!(
        size = %size,
        cols = grid.cols,
        rows = grid.rows,
        crop_marks = options.crop_marks,
        "generated multi-up sheet"
    );
    Ok(PrintOutput {
        document: PrintDocument {
            title: caption,
            pages: vec![sheet],
        },
        warnings,
    })
}

/// Center `caption` in the bottom margin, below any crop marks. Skipped when
/// the margin has no room for a line of text.
fn stamp_caption(sheet: &mut Page, grid: &TileGrid, caption: &str) {
    let margin_top = grid.margin_y + grid.rows as f32 * grid.card_height;
    let room = grid.page_height - margin_top - CROP_MARK_OFFSET - CROP_MARK_LENGTH;
    if room < line_height(CAPTION_SIZE) {
        debug!("no bottom margin for caption");
        return;
    }
    let text = truncate_to_width(caption, CAPTION_SIZE, false, grid.page_width - 0.5);
    let x = (grid.page_width - text_width(&text, CAPTION_SIZE, false)) / 2.0;
    let top = margin_top + CROP_MARK_OFFSET + CROP_MARK_LENGTH + (room - line_height(CAPTION_SIZE)) / 2.0;
    sheet.push(DrawOp::Text {
        x,
        y: top + ascent(CAPTION_SIZE),
        text,
        size: CAPTION_SIZE,
        bold: false,
        color: CAPTION_COLOR.into(),
    });
}

/// Every size as a single-card PDF, in [`CardSize::ALL`] order.
///
/// Stops at the first size that fails; the error names that size.
pub async fn export_all_sizes(
    config: &ProductConfig,
    options: &PrintOptions,
) -> Result<Vec<ExportedCard>, CardError> {
    let mut out = Vec::with_capacity(CardSize::ALL.len());
    for size in CardSize::ALL {
        let exported = async {
            let output = generate_card(config, size, options).await?;
            Ok::<_, CardError>(ExportedCard {
                size,
                pdf: output.document.to_bytes()?,
                warnings: output.warnings,
            })
        }
        .await
        .map_err(|e| e.for_size(size))?;
        out.push(exported);
    }
    info!(sizes = out.len(), "exported all sizes");
    Ok(out)
}
