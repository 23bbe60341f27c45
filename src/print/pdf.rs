//! # PDF Codegen
//!
//! Lowers [`Page`]s of [`DrawOp`]s to a PDF with `printpdf`.
//!
//! Draw ops use inches from the top-left; PDF user space is millimetres
//! (through printpdf's `Mm`) from the bottom-left, so every y is flipped
//! against the page height here and nowhere else.
//!
//! printpdf embeds one image XObject per draw, so a tiled sheet would carry
//! the same QR and barcode rasters once per tile. After serialization,
//! identical image streams are collapsed onto a single object.

use std::collections::HashMap;
use std::io::{BufWriter, Cursor, Write};

use printpdf::lopdf::{self, Object, ObjectId};
use printpdf::path::{PaintMode, WindingOrder};
use printpdf::{
    BuiltinFont, Color, ColorBits, ColorSpace, ImageTransform, ImageXObject, IndirectFontRef,
    Line, Mm, PdfDocument, PdfLayerReference, Point, Polygon, Px, Rgb,
};

use super::ops::{DrawOp, Page, RasterImage};
use crate::color::hex_to_unit_rgb;
use crate::error::CardError;

const MM_PER_INCH: f32 = 25.4;
const PT_PER_INCH: f32 = 72.0;
/// Segments per rounded-corner quarter circle.
const ARC_SEGMENTS: usize = 6;

fn mm(inches: f32) -> Mm {
    Mm(inches * MM_PER_INCH)
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

/// Serialize `pages` into a PDF document.
pub fn write_pdf(title: &str, pages: &[Page]) -> Result<Vec<u8>, CardError> {
    let first = pages
        .first()
        .ok_or_else(|| CardError::Generation("document has no pages".to_string()))?;

    let (doc, page1, layer1) =
        PdfDocument::new(title, mm(first.width), mm(first.height), "Layer 1");

    let fonts = Fonts {
        regular: doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| CardError::Generation(format!("font setup failed: {}", e)))?,
        bold: doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| CardError::Generation(format!("font setup failed: {}", e)))?,
    };

    for (i, page) in pages.iter().enumerate() {
        let layer = if i == 0 {
            doc.get_page(page1).get_layer(layer1)
        } else {
            let (page_idx, layer_idx) = doc.add_page(mm(page.width), mm(page.height), "Layer 1");
            doc.get_page(page_idx).get_layer(layer_idx)
        };
        for op in &page.ops {
            draw_op(&layer, op, page.height, &fonts);
        }
    }

    let mut buf = Vec::new();
    {
        let mut writer = BufWriter::new(Cursor::new(&mut buf));
        doc.save(&mut writer)
            .map_err(|e| CardError::Generation(format!("PDF serialization failed: {}", e)))?;
        writer.flush()?;
    }
    share_identical_images(&buf)
}

// ============================================================================
// IMAGE SHARING
// ============================================================================

fn image_key(object: &Object) -> Option<(i64, i64, &[u8])> {
    let Object::Stream(stream) = object else {
        return None;
    };
    let subtype = stream.dict.get(b"Subtype").and_then(Object::as_name).ok()?;
    if subtype != b"Image" {
        return None;
    }
    let width = stream.dict.get(b"Width").and_then(Object::as_i64).ok()?;
    let height = stream.dict.get(b"Height").and_then(Object::as_i64).ok()?;
    Some((width, height, stream.content.as_slice()))
}

/// Point every reference to a duplicate image at its first copy, then drop
/// the duplicates.
fn share_identical_images(pdf: &[u8]) -> Result<Vec<u8>, CardError> {
    let mut doc = lopdf::Document::load_mem(pdf)
        .map_err(|e| CardError::Generation(format!("PDF reload failed: {}", e)))?;

    let mut remap: HashMap<ObjectId, ObjectId> = HashMap::new();
    {
        let mut first: HashMap<(i64, i64, &[u8]), ObjectId> = HashMap::new();
        for (&id, object) in &doc.objects {
            if let Some(key) = image_key(object) {
                let canonical = *first.entry(key).or_insert(id);
                if canonical != id {
                    remap.insert(id, canonical);
                }
            }
        }
    }
    if remap.is_empty() {
        return Ok(pdf.to_vec());
    }

    for id in remap.keys() {
        doc.objects.remove(id);
    }
    for object in doc.objects.values_mut() {
        relink(object, &remap);
    }

    let mut buf = Vec::new();
    doc.save_to(&mut buf)
        .map_err(|e| CardError::Generation(format!("PDF serialization failed: {}", e)))?;
    Ok(buf)
}

fn relink(object: &mut Object, remap: &HashMap<ObjectId, ObjectId>) {
    match object {
        Object::Reference(id) => {
            if let Some(to) = remap.get(id) {
                *id = *to;
            }
        }
        Object::Array(items) => items.iter_mut().for_each(|o| relink(o, remap)),
        Object::Dictionary(dict) => dict.iter_mut().for_each(|(_, o)| relink(o, remap)),
        Object::Stream(stream) => stream.dict.iter_mut().for_each(|(_, o)| relink(o, remap)),
        _ => {}
    }
}

fn draw_op(layer: &PdfLayerReference, op: &DrawOp, page_h: f32, fonts: &Fonts) {
    match op {
        DrawOp::Rect { x, y, w, h, fill } => {
            let (x, y, w, h) = (*x, *y, *w, *h);
            let ring = vec![
                point(x, page_h - y),
                point(x + w, page_h - y),
                point(x + w, page_h - y - h),
                point(x, page_h - y - h),
            ];
            fill_ring(layer, ring, fill);
        }
        DrawOp::RoundedRect {
            x,
            y,
            w,
            h,
            radius,
            fill,
        } => {
            let ring = rounded_ring(*x, page_h - *y - *h, *w, *h, *radius);
            fill_ring(layer, ring, fill);
        }
        DrawOp::Line {
            x1,
            y1,
            x2,
            y2,
            color,
            thickness,
        } => {
            layer.set_outline_color(pdf_color(color));
            layer.set_outline_thickness(thickness * PT_PER_INCH);
            layer.add_line(Line {
                points: vec![point(*x1, page_h - *y1), point(*x2, page_h - *y2)],
                is_closed: false,
            });
        }
        DrawOp::Text {
            x,
            y,
            text,
            size,
            bold,
            color,
        } => {
            let font = if *bold { &fonts.bold } else { &fonts.regular };
            layer.set_fill_color(pdf_color(color));
            layer.use_text(text.as_str(), *size, mm(*x), mm(page_h - *y), font);
        }
        DrawOp::Image { x, y, w, h, image } => {
            draw_image(layer, image, *x, page_h - *y - *h, *w, *h);
        }
    }
}

fn point(x: f32, y: f32) -> (Point, bool) {
    (Point::new(mm(x), mm(y)), false)
}

fn pdf_color(hex: &str) -> Color {
    let (r, g, b) = hex_to_unit_rgb(hex);
    Color::Rgb(Rgb::new(r, g, b, None))
}

fn fill_ring(layer: &PdfLayerReference, ring: Vec<(Point, bool)>, fill: &str) {
    layer.set_fill_color(pdf_color(fill));
    layer.add_polygon(Polygon {
        rings: vec![ring],
        mode: PaintMode::Fill,
        winding_order: WindingOrder::NonZero,
    });
}

/// Outline of a rounded rectangle whose bottom-left corner is `(x, y)` in
/// bottom-up coordinates.
fn rounded_ring(x: f32, y: f32, w: f32, h: f32, radius: f32) -> Vec<(Point, bool)> {
    let r = radius.clamp(0.0, (w / 2.0).min(h / 2.0));
    let mut ring = Vec::with_capacity(4 * (ARC_SEGMENTS + 1));
    let corners = [
        (x + w - r, y + r, -90.0_f32),
        (x + w - r, y + h - r, 0.0),
        (x + r, y + h - r, 90.0),
        (x + r, y + r, 180.0),
    ];
    for (cx, cy, start) in corners {
        for i in 0..=ARC_SEGMENTS {
            let angle = (start + 90.0 * i as f32 / ARC_SEGMENTS as f32).to_radians();
            ring.push(point(cx + r * angle.cos(), cy + r * angle.sin()));
        }
    }
    ring
}

/// Place `image` so it covers `w × h` inches with its bottom-left at `(x, y)`.
fn draw_image(layer: &PdfLayerReference, image: &RasterImage, x: f32, y: f32, w: f32, h: f32) {
    if image.width == 0 || image.height == 0 {
        return;
    }
    let xobject = ImageXObject {
        width: Px(image.width as usize),
        height: Px(image.height as usize),
        color_space: ColorSpace::Rgb,
        bits_per_component: ColorBits::Bit8,
        interpolate: true,
        image_data: image.rgb.clone(),
        image_filter: None,
        clipping_bbox: None,
        smask: None,
    };
    // At 72 dpi one pixel is one point
    printpdf::Image::from(xobject).add_to_layer(
        layer.clone(),
        ImageTransform {
            translate_x: Some(mm(x)),
            translate_y: Some(mm(y)),
            scale_x: Some(w * PT_PER_INCH / image.width as f32),
            scale_y: Some(h * PT_PER_INCH / image.height as f32),
            dpi: Some(72.0),
            ..Default::default()
        },
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_empty_document_is_an_error() {
        assert!(matches!(write_pdf("x", &[]), Err(CardError::Generation(_))));
    }

    #[test]
    fn test_writes_pdf_header() {
        let mut page = Page::new(2.0, 3.0);
        page.push(DrawOp::RoundedRect {
            x: 0.1,
            y: 0.1,
            w: 1.0,
            h: 0.3,
            radius: 0.05,
            fill: "#dc2626".into(),
        });
        page.push(DrawOp::Text {
            x: 0.2,
            y: 0.3,
            text: "SALE".into(),
            size: 8.0,
            bold: true,
            color: "#ffffff".into(),
        });
        page.push(DrawOp::Image {
            x: 0.5,
            y: 1.0,
            w: 1.0,
            h: 1.0,
            image: Arc::new(RasterImage {
                width: 1,
                height: 1,
                rgb: vec![0, 0, 0],
            }),
        });
        let bytes = write_pdf("test", &[page.clone(), page]).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    fn image_op(x: f32, image: Arc<RasterImage>) -> DrawOp {
        DrawOp::Image {
            x,
            y: 0.5,
            w: 0.5,
            h: 0.5,
            image,
        }
    }

    fn image_streams(pdf: &[u8]) -> usize {
        let doc = lopdf::Document::load_mem(pdf).unwrap();
        doc.objects.values().filter_map(image_key).count()
    }

    #[test]
    fn test_repeated_images_embedded_once() {
        let qr = Arc::new(RasterImage {
            width: 2,
            height: 2,
            rgb: vec![0, 0, 0, 255, 255, 255, 255, 255, 255, 0, 0, 0],
        });
        let barcode = Arc::new(RasterImage {
            width: 2,
            height: 1,
            rgb: vec![0, 0, 0, 255, 255, 255],
        });

        let mut sheet = Page::new(8.5, 11.0);
        for i in 0..12 {
            sheet.push(image_op(i as f32 * 0.6, qr.clone()));
            sheet.push(image_op(i as f32 * 0.6, barcode.clone()));
        }
        let mut second = Page::new(8.5, 11.0);
        second.push(image_op(1.0, qr.clone()));

        let bytes = write_pdf("sheet", &[sheet, second]).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert_eq!(image_streams(&bytes), 2);
    }

    #[test]
    fn test_rounded_ring_closes_near_start() {
        let ring = rounded_ring(0.0, 0.0, 1.0, 0.5, 0.1);
        assert_eq!(ring.len(), 4 * (ARC_SEGMENTS + 1));
    }
}
