//! # Vector Renderer
//!
//! Lowers a [`CardLayout`] into a [`Page`] of draw ops.
//!
//! Elements flow top to bottom from the margin, separated by the layout's
//! gap. The header is full-bleed at the top edge; the footer accent is
//! painted last, pinned to the bottom edge. Images are loaded one at a time
//! in element order; one that fails to load is left out and recorded as a
//! warning.

use std::sync::Arc;

use tracing::{debug, warn};

use super::badges::{BadgeStyle, pack_badges};
use super::ops::{DrawOp, Page, RasterImage};
use super::text::{ascent, line_height, text_width, truncate_to_width, wrap_text};
use crate::assets::fit::fit_within;
use crate::assets::{AssetWarnings, ImageLoader};
use crate::color::lighten_color;
use crate::error::CardError;
use crate::layout::{
    Align, Badge, BadgeElement, BadgeRowElement, CardLayout, ContainerElement, Direction,
    FooterAccentElement, HeaderElement, InfoBarElement, LayoutElement, PriceElement,
    SpecsElement, TextElement,
};

const STRUCK_PRICE: &str = "#6b7280";
/// Horizontal space between spec columns, as a multiple of the layout gap.
const SPEC_COLUMN_GAP: f32 = 2.0;
/// Space between a spec icon and its label.
const ICON_GAP: f32 = 0.04;
/// Spacing of background pattern cells.
const PATTERN_PITCH: f32 = 0.25;

/// Render `layout` into a single page the size of the card.
pub async fn render_card(layout: &CardLayout, loader: &dyn ImageLoader) -> (Page, AssetWarnings) {
    let mut renderer = VectorRenderer::new(layout, loader);
    renderer.render().await;
    (renderer.page, renderer.warnings)
}

/// Baseline that vertically centers a line of `size` pt in a `h`-tall box.
fn centered_baseline(top: f32, h: f32, size: f32) -> f32 {
    top + h / 2.0 + size * 0.35 / 72.0
}

/// A child of a container after loading, ready to place.
struct PlacedImage {
    image: Arc<RasterImage>,
    width: f32,
    height: f32,
}

struct VectorRenderer<'a> {
    layout: &'a CardLayout,
    loader: &'a dyn ImageLoader,
    page: Page,
    warnings: AssetWarnings,
    /// Top of the next flowed element.
    cursor: f32,
    content_x: f32,
    content_w: f32,
}

impl<'a> VectorRenderer<'a> {
    fn new(layout: &'a CardLayout, loader: &'a dyn ImageLoader) -> Self {
        Self {
            layout,
            loader,
            page: Page::new(layout.width, layout.height),
            warnings: AssetWarnings::new(),
            cursor: layout.margin,
            content_x: layout.margin,
            content_w: layout.content_width(),
        }
    }

    async fn render(&mut self) {
        self.background();

        let layout = self.layout;
        let mut footers: Vec<&FooterAccentElement> = Vec::new();
        for element in layout.elements.iter().filter(|e| e.is_visible()) {
            match element {
                LayoutElement::Header(header) => {
                    let bottom = self.header(header);
                    self.cursor = self.cursor.max(bottom + self.layout.gap);
                }
                LayoutElement::FooterAccent(footer) => footers.push(footer),
                other => {
                    if let Some(height) = self.flowed(other).await {
                        self.cursor += height + self.layout.gap;
                    }
                }
            }
        }

        let footer_height: f32 = footers.iter().map(|f| f.height).fold(0.0, f32::max);
        for footer in footers {
            self.footer(footer);
        }

        let content_bottom = self.cursor - self.layout.gap;
        let limit = self.layout.height - footer_height;
        if content_bottom > limit + 1e-3 {
            warn!(
                size = %self.layout.size,
                overflow = content_bottom - limit,
                "card content overflows the page"
            );
        }
        debug!(
            size = %self.layout.size,
            ops = self.page.ops.len(),
            "rendered card page"
        );
    }

    /// Draw one flowed element at the cursor; returns its height, or `None`
    /// if nothing was drawn.
    async fn flowed(&mut self, element: &LayoutElement) -> Option<f32> {
        match element {
            LayoutElement::Text(text) => self.text(text),
            LayoutElement::Badge(badge) => self.single_badge(badge),
            LayoutElement::BadgeRow(row) => self.badge_row(row),
            LayoutElement::Image(image) => {
                let raster = self.load(&image.src).await?;
                let max_w = image.max_width.min(self.content_w);
                let fit = fit_within(raster.width, raster.height, max_w, image.max_height);
                if fit.width <= 0.0 {
                    return None;
                }
                let x = self.aligned_x(fit.width, image.align);
                self.image_op(x, self.cursor, fit.width, fit.height, raster);
                Some(fit.height)
            }
            LayoutElement::Price(price) => Some(self.price(price)),
            LayoutElement::Financing(financing) => {
                let lines = wrap_text(&financing.text, financing.font_size, false, self.content_w, 2);
                Some(self.lines(&lines, financing.font_size, false, &financing.color, Align::Center))
            }
            LayoutElement::Specs(specs) => self.specs(specs).await,
            LayoutElement::InfoBar(bar) => self.info_bar(bar),
            LayoutElement::Barcode(barcode) => {
                let raster = self.load(&barcode.src).await?;
                let w = barcode.width.min(self.content_w);
                let x = self.aligned_x(w, Align::Center);
                self.image_op(x, self.cursor, w, barcode.height, raster);
                Some(barcode.height)
            }
            LayoutElement::QrCode(qr) => {
                let raster = self.load(&qr.src).await?;
                let x = self.aligned_x(qr.size, Align::Center);
                self.image_op(x, self.cursor, qr.size, qr.size, raster);
                Some(qr.size)
            }
            LayoutElement::Sku(sku) => {
                let line = truncate_to_width(&sku.text, sku.font_size, false, self.content_w);
                Some(self.lines(&[line], sku.font_size, false, &sku.color, Align::Center))
            }
            LayoutElement::Divider(divider) => {
                let y = self.cursor + divider.thickness / 2.0;
                self.page.push(DrawOp::Line {
                    x1: self.content_x,
                    y1: y,
                    x2: self.content_x + self.content_w,
                    y2: y,
                    color: divider.color.clone(),
                    thickness: divider.thickness,
                });
                Some(divider.thickness)
            }
            LayoutElement::Container(container) => self.container(container).await,
            LayoutElement::Header(_) | LayoutElement::FooterAccent(_) => None,
        }
    }

    // ------------------------------------------------------------------------
    // Primitives
    // ------------------------------------------------------------------------

    async fn load(&mut self, src: &str) -> Option<Arc<RasterImage>> {
        if src.trim().is_empty() {
            return None;
        }
        match self.loader.load(src).await {
            Ok(img) => Some(Arc::new(RasterImage::from_dynamic(&img))),
            Err(e) => {
                self.warnings.push(asset_name(src), &e);
                None
            }
        }
    }

    fn aligned_x(&self, width: f32, align: Align) -> f32 {
        match align {
            Align::Left => self.content_x,
            Align::Center => self.content_x + (self.content_w - width) / 2.0,
            Align::Right => self.content_x + self.content_w - width,
        }
    }

    fn image_op(&mut self, x: f32, y: f32, w: f32, h: f32, image: Arc<RasterImage>) {
        self.page.push(DrawOp::Image { x, y, w, h, image });
    }

    fn text_op(&mut self, x: f32, baseline: f32, text: &str, size: f32, bold: bool, color: &str) {
        self.page.push(DrawOp::Text {
            x,
            y: baseline,
            text: text.to_string(),
            size,
            bold,
            color: color.to_string(),
        });
    }

    /// Stack pre-wrapped lines at the cursor; returns the block height.
    fn lines(&mut self, lines: &[String], size: f32, bold: bool, color: &str, align: Align) -> f32 {
        let lh = line_height(size);
        for (i, line) in lines.iter().enumerate() {
            let x = self.aligned_x(text_width(line, size, bold), align);
            let baseline = self.cursor + i as f32 * lh + ascent(size);
            self.text_op(x, baseline, line, size, bold, color);
        }
        lines.len() as f32 * lh
    }

    // ------------------------------------------------------------------------
    // Elements
    // ------------------------------------------------------------------------

    fn background(&mut self) {
        let layout = self.layout;
        self.page.push(DrawOp::Rect {
            x: 0.0,
            y: 0.0,
            w: layout.width,
            h: layout.height,
            fill: layout.background.color.clone(),
        });

        let ink = lighten_color(&layout.theme.primary, 0.9);
        match layout.background.pattern.as_deref() {
            None | Some("") | Some("none") => {}
            Some("grid") => {
                let mut x = PATTERN_PITCH;
                while x < layout.width {
                    self.page.push(DrawOp::Line {
                        x1: x,
                        y1: 0.0,
                        x2: x,
                        y2: layout.height,
                        color: ink.clone(),
                        thickness: 0.005,
                    });
                    x += PATTERN_PITCH;
                }
                let mut y = PATTERN_PITCH;
                while y < layout.height {
                    self.page.push(DrawOp::Line {
                        x1: 0.0,
                        y1: y,
                        x2: layout.width,
                        y2: y,
                        color: ink.clone(),
                        thickness: 0.005,
                    });
                    y += PATTERN_PITCH;
                }
            }
            Some("dots") => {
                let dot = 0.02;
                let mut y = PATTERN_PITCH;
                while y < layout.height {
                    let mut x = PATTERN_PITCH;
                    while x < layout.width {
                        self.page.push(DrawOp::Rect {
                            x: x - dot / 2.0,
                            y: y - dot / 2.0,
                            w: dot,
                            h: dot,
                            fill: ink.clone(),
                        });
                        x += PATTERN_PITCH;
                    }
                    y += PATTERN_PITCH;
                }
            }
            Some(other) => debug!(pattern = other, "unknown background pattern ignored"),
        }
    }

    /// Full-bleed bar at the top edge; returns its bottom y.
    fn header(&mut self, header: &HeaderElement) -> f32 {
        let width = self.layout.width;
        self.page.push(DrawOp::Rect {
            x: 0.0,
            y: 0.0,
            w: width,
            h: header.height,
            fill: header.background.clone(),
        });
        let stripe_h = match &header.stripe {
            Some(stripe) => {
                self.page.push(DrawOp::Rect {
                    x: 0.0,
                    y: header.height - stripe.height,
                    w: width,
                    h: stripe.height,
                    fill: stripe.color.clone(),
                });
                stripe.height
            }
            None => 0.0,
        };

        let text = truncate_to_width(&header.text, header.font_size, true, self.content_w);
        let x = (width - text_width(&text, header.font_size, true)) / 2.0;
        let baseline = centered_baseline(0.0, header.height - stripe_h, header.font_size);
        self.text_op(x, baseline, &text, header.font_size, true, &header.color);
        header.height
    }

    fn text(&mut self, text: &TextElement) -> Option<f32> {
        let lines = wrap_text(&text.text, text.font_size, text.bold, self.content_w, text.max_lines);
        if lines.is_empty() {
            return None;
        }
        Some(self.lines(&lines, text.font_size, text.bold, &text.color, text.align))
    }

    fn draw_badges(&mut self, badges: &[Badge], style: &BadgeStyle, radius: f32, left: f32, width: f32) -> f32 {
        let texts: Vec<&str> = badges.iter().map(|b| b.text.as_str()).collect();
        let packing = pack_badges(&texts, style, width);
        for placed in &packing.badges {
            let badge = &badges[placed.index];
            let x = left + placed.x;
            let y = self.cursor + placed.y;
            self.page.push(DrawOp::RoundedRect {
                x,
                y,
                w: placed.width,
                h: placed.height,
                radius,
                fill: badge.background.clone(),
            });
            let baseline = centered_baseline(y, placed.height, style.font_size);
            self.text_op(x + style.pad_x, baseline, &badge.text, style.font_size, true, &badge.color);
        }
        packing.height
    }

    fn badge_row(&mut self, row: &BadgeRowElement) -> Option<f32> {
        if row.badges.is_empty() {
            return None;
        }
        let style = BadgeStyle {
            font_size: row.font_size,
            pad_x: row.pad_x,
            pad_y: row.pad_y,
            gap: row.gap,
        };
        Some(self.draw_badges(&row.badges, &style, row.radius, self.content_x, self.content_w))
    }

    fn single_badge(&mut self, element: &BadgeElement) -> Option<f32> {
        let style = BadgeStyle {
            font_size: element.font_size,
            pad_x: element.pad_x,
            pad_y: element.pad_y,
            gap: 0.0,
        };
        let width = super::badges::measure_badge(&element.badge.text, &style).width;
        let left = self.aligned_x(width, element.align);
        let badges = std::slice::from_ref(&element.badge);
        Some(self.draw_badges(badges, &style, element.radius, left, width))
    }

    fn price(&mut self, price: &PriceElement) -> f32 {
        let original_h = price.original.as_ref().map_or(0.0, |_| line_height(price.original_font_size));
        let price_h = line_height(price.font_size);
        let price_w = text_width(&price.price, price.font_size, true);
        let original_w = price
            .original
            .as_ref()
            .map_or(0.0, |o| text_width(o, price.original_font_size, false));
        let inner_w = price_w.max(original_w);
        let inner_h = original_h + price_h;

        let pad = price.background.as_ref().map_or(0.0, |b| b.padding);
        if let Some(bg) = &price.background {
            let box_w = (inner_w + 2.0 * pad).min(self.content_w);
            self.page.push(DrawOp::RoundedRect {
                x: self.aligned_x(box_w, Align::Center),
                y: self.cursor,
                w: box_w,
                h: inner_h + 2.0 * pad,
                radius: bg.radius,
                fill: bg.color.clone(),
            });
        }

        let mut y = self.cursor + pad;
        if let Some(original) = &price.original {
            let size = price.original_font_size;
            let x = self.aligned_x(original_w, Align::Center);
            let baseline = y + ascent(size);
            self.text_op(x, baseline, original, size, false, STRUCK_PRICE);
            let strike_y = baseline - size * 0.3 / 72.0;
            self.page.push(DrawOp::Line {
                x1: x,
                y1: strike_y,
                x2: x + original_w,
                y2: strike_y,
                color: STRUCK_PRICE.into(),
                thickness: (size / 72.0 * 0.07).max(0.005),
            });
            y += original_h;
        }

        let x = self.aligned_x(price_w, Align::Center);
        self.text_op(x, y + ascent(price.font_size), &price.price, price.font_size, true, &price.color);

        inner_h + 2.0 * pad
    }

    async fn specs(&mut self, specs: &SpecsElement) -> Option<f32> {
        let rows = specs.row_count();
        if rows == 0 {
            return None;
        }
        let cols = specs.columns.len().max(1);
        let col_gap = self.layout.gap * SPEC_COLUMN_GAP;
        let col_w = (self.content_w - col_gap * (cols - 1) as f32) / cols as f32;
        let row_inner = line_height(specs.value_font.max(specs.label_font)).max(specs.icon_size);
        let pitch = row_inner + specs.row_gap;
        let top = self.cursor;

        for (c, column) in specs.columns.iter().enumerate() {
            let col_x = self.content_x + c as f32 * (col_w + col_gap);
            for (r, item) in column.iter().enumerate() {
                let row_top = top + r as f32 * pitch;
                let mut x = col_x;

                if let Some(icon) = &item.icon {
                    if let Some(raster) = self.load(&icon.src).await {
                        let fit = fit_within(raster.width, raster.height, specs.icon_size, specs.icon_size);
                        if fit.width > 0.0 {
                            let y = row_top + (row_inner - fit.height) / 2.0;
                            self.image_op(x, y, fit.width, fit.height, raster);
                        }
                        x += specs.icon_size + ICON_GAP;
                    }
                }

                let baseline = centered_baseline(row_top, row_inner, specs.value_font);
                let label = format!("{}: ", item.label);
                self.text_op(x, baseline, &label, specs.label_font, true, &specs.label_color);
                x += text_width(&label, specs.label_font, true);

                let room = (col_x + col_w - x).max(0.0);
                let value = truncate_to_width(&item.value, specs.value_font, false, room);
                self.text_op(x, baseline, &value, specs.value_font, false, &specs.value_color);
            }
        }

        Some(rows as f32 * pitch - specs.row_gap)
    }

    fn info_bar(&mut self, bar: &InfoBarElement) -> Option<f32> {
        if bar.entries.is_empty() {
            return None;
        }
        let size = bar.font_size;
        let pad = size / 72.0 * 0.6;
        let lh = line_height(size);
        let height = 2.0 * lh + 2.0 * pad;
        let top = self.cursor;
        self.page.push(DrawOp::Rect {
            x: self.content_x,
            y: top,
            w: self.content_w,
            h: height,
            fill: bar.background.clone(),
        });

        let cell_w = self.content_w / bar.entries.len() as f32;
        for (i, entry) in bar.entries.iter().enumerate() {
            let center = self.content_x + cell_w * (i as f32 + 0.5);
            let room = (cell_w - 2.0 * pad).max(0.0);

            let label = truncate_to_width(&entry.label, size, true, room);
            let x = center - text_width(&label, size, true) / 2.0;
            self.text_op(x, top + pad + ascent(size), &label, size, true, &bar.color);

            let value = truncate_to_width(&entry.value, size, false, room);
            let x = center - text_width(&value, size, false) / 2.0;
            self.text_op(x, top + pad + lh + ascent(size), &value, size, false, &bar.color);
        }
        Some(height)
    }

    /// Image-like children side by side (row) or stacked (column), centered
    /// as a group.
    async fn container(&mut self, container: &ContainerElement) -> Option<f32> {
        let mut sized = Vec::new();
        for child in container.children.iter().filter(|c| c.is_visible()) {
            let loaded = match child {
                LayoutElement::Image(image) => {
                    let raster = self.load(&image.src).await;
                    raster.map(|r| {
                        let fit = fit_within(r.width, r.height, image.max_width, image.max_height);
                        PlacedImage { image: r, width: fit.width, height: fit.height }
                    })
                }
                LayoutElement::QrCode(qr) => self.load(&qr.src).await.map(|r| PlacedImage {
                    image: r,
                    width: qr.size,
                    height: qr.size,
                }),
                LayoutElement::Barcode(barcode) => self.load(&barcode.src).await.map(|r| PlacedImage {
                    image: r,
                    width: barcode.width,
                    height: barcode.height,
                }),
                other => {
                    debug!(kind = other.kind(), "container child not drawable in print");
                    None
                }
            };
            if let Some(s) = loaded.filter(|s| s.width > 0.0 && s.height > 0.0) {
                sized.push(s);
            }
        }
        if sized.is_empty() {
            return None;
        }

        let gaps = container.gap * (sized.len() - 1) as f32;
        match container.direction {
            Direction::Row => {
                let total: f32 = sized.iter().map(|s| s.width).sum::<f32>() + gaps;
                let row_h = sized.iter().map(|s| s.height).fold(0.0, f32::max);
                let mut x = self.aligned_x(total, Align::Center);
                let top = self.cursor;
                for s in sized {
                    let y = top + (row_h - s.height) / 2.0;
                    let w = s.width;
                    self.image_op(x, y, w, s.height, s.image);
                    x += w + container.gap;
                }
                Some(row_h)
            }
            Direction::Column => {
                let total: f32 = sized.iter().map(|s| s.height).sum::<f32>() + gaps;
                let mut y = self.cursor;
                for s in sized {
                    let x = self.aligned_x(s.width, Align::Center);
                    let h = s.height;
                    self.image_op(x, y, s.width, h, s.image);
                    y += h + container.gap;
                }
                Some(total)
            }
        }
    }

    fn footer(&mut self, footer: &FooterAccentElement) {
        let top = self.layout.height - footer.height;
        self.page.push(DrawOp::Rect {
            x: 0.0,
            y: top,
            w: self.layout.width,
            h: footer.height,
            fill: footer.color.clone(),
        });
        if let Some(stripe) = &footer.stripe {
            self.page.push(DrawOp::Rect {
                x: 0.0,
                y: top,
                w: self.layout.width,
                h: stripe.height,
                fill: stripe.color.clone(),
            });
        }
    }
}

/// Short, log-friendly name for an image source.
fn asset_name(src: &str) -> String {
    if src.starts_with("data:") {
        let kind = src
            .split_once(';')
            .map_or("data", |(head, _)| head.trim_start_matches("data:"));
        format!("inline {}", kind)
    } else {
        src.to_string()
    }
}

/// Loader that refuses every source; handy when a card has no images.
pub struct NoImages;

#[async_trait::async_trait]
impl ImageLoader for NoImages {
    async fn load(&self, src: &str) -> Result<::image::DynamicImage, CardError> {
        Err(CardError::Image(format!("image loading disabled ({})", asset_name(src))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::DefaultImageLoader;
    use crate::card::{CardSize, ProductConfig};
    use crate::layout::{BuilderContext, build_layout};

    async fn render(config: &ProductConfig, size: CardSize) -> (Page, AssetWarnings) {
        let (assets, _) = crate::assets::resolve_assets(config).await;
        let ctx = BuilderContext::new(config, size).with_assets(&assets);
        let layout = build_layout(&ctx);
        let loader = DefaultImageLoader::new().unwrap();
        render_card(&layout, &loader).await
    }

    #[tokio::test]
    async fn test_page_matches_card_size() {
        for size in CardSize::ALL {
            let (page, warnings) = render(&ProductConfig::sample(), size).await;
            assert_eq!((page.width, page.height), size.dimensions());
            assert!(warnings.is_empty(), "{size}: {warnings:?}");
        }
    }

    #[tokio::test]
    async fn test_text_content_drawn() {
        let (page, _) = render(&ProductConfig::sample(), CardSize::Price).await;
        let texts: Vec<&str> = page.texts().collect();
        assert!(texts.contains(&"Circuit City Labs"));
        assert!(texts.contains(&"$1,299.99"));
        assert!(texts.contains(&"$1,499.99"));
        assert!(texts.contains(&"SKU: NEB-4070-01"));
    }

    #[tokio::test]
    async fn test_barcode_and_qr_embedded() {
        let (page, _) = render(&ProductConfig::sample(), CardSize::Poster).await;
        let images = page.ops.iter().filter(|op| matches!(op, DrawOp::Image { .. })).count();
        assert_eq!(images, 2);
    }

    #[tokio::test]
    async fn test_broken_image_is_omitted_with_warning() {
        let config = ProductConfig {
            model_name: "Box".into(),
            logo: Some("/no/such/logo.png".into()),
            ..Default::default()
        };
        let (page, warnings) = render(&config, CardSize::Shelf).await;
        assert_eq!(warnings.len(), 1);
        assert!(!page.ops.iter().any(|op| matches!(op, DrawOp::Image { .. })));
        assert!(page.texts().any(|t| t == "Box"));
    }

    #[tokio::test]
    async fn test_footer_pinned_to_bottom() {
        let (page, _) = render(&ProductConfig::sample(), CardSize::Shelf).await;
        let bottom_rect = page.ops.iter().rev().find_map(|op| match op {
            DrawOp::Rect { y, h, .. } => Some(y + h),
            _ => None,
        });
        assert!((bottom_rect.unwrap() - 3.0).abs() < 1e-5);
    }

    #[tokio::test]
    async fn test_invisible_elements_skipped() {
        let config = ProductConfig::sample();
        let mut layout = build_layout(&BuilderContext::new(&config, CardSize::Shelf));
        for element in &mut layout.elements {
            element.set_visible(false);
        }
        let (page, _) = render_card(&layout, &NoImages).await;
        // background only
        assert_eq!(page.ops.len(), 1);
    }

    #[test]
    fn test_asset_name() {
        assert_eq!(asset_name("data:image/png;base64,AAA"), "inline image/png");
        assert_eq!(asset_name("logo.png"), "logo.png");
    }
}
