//! Two-pass badge packing.
//!
//! Pass 1 measures every badge box (bold text width plus horizontal
//! padding, font size plus vertical padding). Pass 2 lays boxes left to
//! right, wrapping when a row would exceed the content width, and centers
//! each row on its own.

use super::text::text_width;

/// Measured badge box, inches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BadgeBox {
    pub width: f32,
    pub height: f32,
}

/// A badge's final position relative to the row block's top-left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedBadge {
    /// Index into the input list.
    pub index: usize,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Result of packing a badge list.
#[derive(Debug, Clone, PartialEq)]
pub struct BadgePacking {
    pub badges: Vec<PlacedBadge>,
    /// Total block height including the gaps between rows.
    pub height: f32,
}

/// Badge styling shared by one row element.
#[derive(Debug, Clone, Copy)]
pub struct BadgeStyle {
    pub font_size: f32,
    pub pad_x: f32,
    pub pad_y: f32,
    pub gap: f32,
}

/// Pass 1.
pub fn measure_badge(text: &str, style: &BadgeStyle) -> BadgeBox {
    BadgeBox {
        width: text_width(text, style.font_size, true) + 2.0 * style.pad_x,
        height: style.font_size / 72.0 + 2.0 * style.pad_y,
    }
}

/// Pass 2: place `texts` inside a block `available` inches wide.
///
/// `x` values are measured from the block's left edge, so a row of total
/// width `w` starts at `(available − w) / 2`.
pub fn pack_badges<S: AsRef<str>>(texts: &[S], style: &BadgeStyle, available: f32) -> BadgePacking {
    let boxes: Vec<BadgeBox> = texts
        .iter()
        .map(|t| measure_badge(t.as_ref(), style))
        .collect();

    // Group consecutive boxes into rows
    let mut rows: Vec<Vec<usize>> = Vec::new();
    let mut row_width = 0.0;
    for (i, b) in boxes.iter().enumerate() {
        match rows.last_mut() {
            Some(row) if row_width + style.gap + b.width <= available => {
                row.push(i);
                row_width += style.gap + b.width;
            }
            _ => {
                rows.push(vec![i]);
                row_width = b.width;
            }
        }
    }

    let mut badges = Vec::with_capacity(boxes.len());
    let mut y = 0.0;
    for (r, row) in rows.iter().enumerate() {
        if r > 0 {
            y += style.gap;
        }
        let total: f32 = row.iter().map(|&i| boxes[i].width).sum::<f32>()
            + style.gap * (row.len().saturating_sub(1)) as f32;
        let row_height = row.iter().map(|&i| boxes[i].height).fold(0.0, f32::max);

        let mut x = (available - total) / 2.0;
        for &i in row {
            badges.push(PlacedBadge {
                index: i,
                x,
                y,
                width: boxes[i].width,
                height: boxes[i].height,
            });
            x += boxes[i].width + style.gap;
        }
        y += row_height;
    }

    BadgePacking { badges, height: y }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STYLE: BadgeStyle = BadgeStyle {
        font_size: 8.0,
        pad_x: 0.08,
        pad_y: 0.04,
        gap: 0.06,
    };

    #[test]
    fn test_single_row_is_centered() {
        let packing = pack_badges(&["NEW", "SALE 20% OFF"], &STYLE, 3.6);
        assert_eq!(packing.badges.len(), 2);
        let first = packing.badges[0];
        let last = packing.badges[1];
        let left = first.x;
        let right = 3.6 - (last.x + last.width);
        assert!((left - right).abs() < 1e-4);
        assert!((last.x - (first.x + first.width + STYLE.gap)).abs() < 1e-5);
    }

    #[test]
    fn test_wraps_and_centers_each_row() {
        let texts = ["WIFI 6E", "RGB LIGHTING", "TEMPERED GLASS", "USB-C"];
        let packing = pack_badges(&texts, &STYLE, 1.6);
        let rows: Vec<f32> = {
            let mut ys: Vec<f32> = packing.badges.iter().map(|b| b.y).collect();
            ys.dedup();
            ys
        };
        assert!(rows.len() > 1);
        for b in &packing.badges {
            assert!(b.x >= -1e-5 && b.x + b.width <= 1.6 + 1e-5);
        }
        let height = measure_badge("X", &STYLE).height;
        assert!(
            (packing.height - (rows.len() as f32 * height + (rows.len() - 1) as f32 * STYLE.gap))
                .abs()
                < 1e-5
        );
    }

    #[test]
    fn test_deterministic() {
        let texts = ["IN STOCK", "REFURBISHED", "PERFORMANCE"];
        assert_eq!(pack_badges(&texts, &STYLE, 3.0), pack_badges(&texts, &STYLE, 3.0));
    }

    #[test]
    fn test_empty() {
        let packing = pack_badges::<&str>(&[], &STYLE, 3.0);
        assert!(packing.badges.is_empty());
        assert_eq!(packing.height, 0.0);
    }
}
