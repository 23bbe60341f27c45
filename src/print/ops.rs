//! # Draw-Op IR
//!
//! The vector renderer lowers a [`CardLayout`](crate::layout::CardLayout)
//! into a flat list of [`DrawOp`]s per [`Page`]; the PDF codegen turns
//! those into content-stream operators.
//!
//! Coordinates are inches from the **top-left** of the page. Text `y` is the
//! baseline. Font sizes are points.

use std::sync::Arc;

use ::image::DynamicImage;

/// Decoded RGB pixels, alpha already flattened onto white.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterImage {
    pub width: u32,
    pub height: u32,
    /// Row-major RGB8.
    pub rgb: Vec<u8>,
}

impl RasterImage {
    pub fn from_dynamic(img: &DynamicImage) -> Self {
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        let mut rgb = Vec::with_capacity((width * height * 3) as usize);
        for px in rgba.pixels() {
            let alpha = px[3] as f32 / 255.0;
            for c in 0..3 {
                let blended = px[c] as f32 * alpha + 255.0 * (1.0 - alpha);
                rgb.push(blended.round() as u8);
            }
        }
        Self { width, height, rgb }
    }
}

/// One drawing instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Filled rectangle.
    Rect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        fill: String,
    },
    /// Filled rectangle with rounded corners.
    RoundedRect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        radius: f32,
        fill: String,
    },
    /// Stroked segment; `thickness` in inches.
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        color: String,
        thickness: f32,
    },
    /// Single line of Helvetica text.
    Text {
        x: f32,
        y: f32,
        text: String,
        size: f32,
        bold: bool,
        color: String,
    },
    /// Raster image scaled into `w × h`.
    Image {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        image: Arc<RasterImage>,
    },
}

impl DrawOp {
    /// Same op shifted by `(dx, dy)`.
    pub fn translated(&self, dx: f32, dy: f32) -> DrawOp {
        let mut op = self.clone();
        match &mut op {
            DrawOp::Rect { x, y, .. }
            | DrawOp::RoundedRect { x, y, .. }
            | DrawOp::Text { x, y, .. }
            | DrawOp::Image { x, y, .. } => {
                *x += dx;
                *y += dy;
            }
            DrawOp::Line { x1, y1, x2, y2, .. } => {
                *x1 += dx;
                *x2 += dx;
                *y1 += dy;
                *y2 += dy;
            }
        }
        op
    }
}

/// One physical page.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// Width in inches.
    pub width: f32,
    /// Height in inches.
    pub height: f32,
    pub ops: Vec<DrawOp>,
}

impl Page {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ops: Vec::new(),
        }
    }

    pub fn push(&mut self, op: DrawOp) {
        self.ops.push(op);
    }

    /// Paint every op of `other` at `(dx, dy)` on this page.
    pub fn stamp(&mut self, other: &Page, dx: f32, dy: f32) {
        self.ops
            .extend(other.ops.iter().map(|op| op.translated(dx, dy)));
    }

    /// All text drawn on this page, in paint order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_line() {
        let op = DrawOp::Line {
            x1: 0.0,
            y1: 0.0,
            x2: 1.0,
            y2: 0.0,
            color: "#000000".into(),
            thickness: 0.01,
        };
        let DrawOp::Line { x1, y1, x2, .. } = op.translated(2.0, 3.0) else {
            unreachable!()
        };
        assert_eq!((x1, y1, x2), (2.0, 3.0, 3.0));
    }

    #[test]
    fn test_alpha_flattened_onto_white() {
        let img = DynamicImage::ImageRgba8(::image::RgbaImage::from_pixel(
            1,
            1,
            ::image::Rgba([0, 0, 0, 0]),
        ));
        assert_eq!(RasterImage::from_dynamic(&img).rgb, vec![255, 255, 255]);
    }

    #[test]
    fn test_stamp() {
        let mut card = Page::new(2.0, 3.0);
        card.push(DrawOp::Rect {
            x: 0.0,
            y: 0.0,
            w: 2.0,
            h: 3.0,
            fill: "#ffffff".into(),
        });
        let mut sheet = Page::new(8.5, 11.0);
        sheet.stamp(&card, 0.25, 1.0);
        sheet.stamp(&card, 2.25, 1.0);
        assert_eq!(sheet.ops.len(), 2);
        assert!(matches!(sheet.ops[1], DrawOp::Rect { x, .. } if x == 2.25));
    }
}
