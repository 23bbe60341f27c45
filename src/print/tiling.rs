//! # Multi-Up Tiling
//!
//! Fits as many copies of a card as possible onto a US Letter sheet in an
//! integer grid, centered with symmetric margins.
//!
//! | Card | Grid |
//! |------|------|
//! | 2 × 3 in | 4 × 3 |
//! | 4 × 6 in | 2 × 1 |
//! | 8.5 × 11 in | 1 × 1 |
//!
//! Crop marks sit in the margin outside the grid, one pair per boundary
//! line, offset from the grid edge so they never touch a card.

use crate::error::CardError;

/// US Letter, inches.
pub const SHEET_WIDTH: f32 = 8.5;
pub const SHEET_HEIGHT: f32 = 11.0;

/// Gap between the grid edge and the start of a crop mark.
pub const CROP_MARK_OFFSET: f32 = 0.0625;
/// Nominal crop mark length (shortened when the margin is narrower).
pub const CROP_MARK_LENGTH: f32 = 0.125;

/// Tolerance for float division when counting whole cards.
const EPSILON: f32 = 1e-4;

/// A line segment in page inches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

/// Card grid on one sheet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileGrid {
    pub cols: usize,
    pub rows: usize,
    pub card_width: f32,
    pub card_height: f32,
    pub page_width: f32,
    pub page_height: f32,
    /// Left and right margin.
    pub margin_x: f32,
    /// Top and bottom margin.
    pub margin_y: f32,
}

impl TileGrid {
    /// Grid for a `card_width × card_height` card on US Letter.
    pub fn letter(card_width: f32, card_height: f32) -> Result<Self, CardError> {
        Self::new(card_width, card_height, SHEET_WIDTH, SHEET_HEIGHT)
    }

    pub fn new(
        card_width: f32,
        card_height: f32,
        page_width: f32,
        page_height: f32,
    ) -> Result<Self, CardError> {
        if card_width <= 0.0 || card_height <= 0.0 {
            return Err(CardError::Generation(format!(
                "invalid card size {}x{}",
                card_width, card_height
            )));
        }
        let cols = ((page_width + EPSILON) / card_width).floor() as usize;
        let rows = ((page_height + EPSILON) / card_height).floor() as usize;
        if cols == 0 || rows == 0 {
            return Err(CardError::Generation(format!(
                "a {}x{} in card does not fit on a {}x{} in page",
                card_width, card_height, page_width, page_height
            )));
        }

        Ok(Self {
            cols,
            rows,
            card_width,
            card_height,
            page_width,
            page_height,
            margin_x: ((page_width - cols as f32 * card_width) / 2.0).max(0.0),
            margin_y: ((page_height - rows as f32 * card_height) / 2.0).max(0.0),
        })
    }

    pub fn count(&self) -> usize {
        self.cols * self.rows
    }

    /// Top-left corner of the card at `(col, row)`.
    pub fn cell_origin(&self, col: usize, row: usize) -> (f32, f32) {
        (
            self.margin_x + col as f32 * self.card_width,
            self.margin_y + row as f32 * self.card_height,
        )
    }

    /// Every cell origin, row by row.
    pub fn cells(&self) -> impl Iterator<Item = (f32, f32)> + '_ {
        (0..self.rows).flat_map(move |r| (0..self.cols).map(move |c| self.cell_origin(c, r)))
    }

    fn grid_right(&self) -> f32 {
        self.margin_x + self.cols as f32 * self.card_width
    }

    fn grid_bottom(&self) -> f32 {
        self.margin_y + self.rows as f32 * self.card_height
    }

    /// Crop marks for every vertical and horizontal boundary line.
    ///
    /// Each mark starts `offset` outside the grid and runs outward for
    /// `length`, clamped to the margin. Boundaries with no room for a mark
    /// get none.
    ///
    /// Interior intersections are not marked on the sheet itself; they are
    /// located by the margin ticks of the two boundary lines that cross there.
    pub fn crop_marks(&self, offset: f32, length: f32) -> Vec<Segment> {
        let mut marks = Vec::new();
        let top_room = self.margin_y - offset;
        let bottom_room = self.page_height - self.grid_bottom() - offset;
        let left_room = self.margin_x - offset;
        let right_room = self.page_width - self.grid_right() - offset;

        for i in 0..=self.cols {
            let x = self.margin_x + i as f32 * self.card_width;
            if top_room > 0.0 {
                let start = self.margin_y - offset;
                marks.push(Segment {
                    x1: x,
                    y1: start,
                    x2: x,
                    y2: start - length.min(top_room),
                });
            }
            if bottom_room > 0.0 {
                let start = self.grid_bottom() + offset;
                marks.push(Segment {
                    x1: x,
                    y1: start,
                    x2: x,
                    y2: start + length.min(bottom_room),
                });
            }
        }

        for j in 0..=self.rows {
            let y = self.margin_y + j as f32 * self.card_height;
            if left_room > 0.0 {
                let start = self.margin_x - offset;
                marks.push(Segment {
                    x1: start,
                    y1: y,
                    x2: start - length.min(left_room),
                    y2: y,
                });
            }
            if right_room > 0.0 {
                let start = self.grid_right() + offset;
                marks.push(Segment {
                    x1: start,
                    y1: y,
                    x2: start + length.min(right_room),
                    y2: y,
                });
            }
        }
        marks
    }

    /// Whether `(x, y)` lies inside any card cell (edges excluded).
    pub fn touches_card(&self, x: f32, y: f32) -> bool {
        x > self.margin_x + EPSILON
            && x < self.grid_right() - EPSILON
            && y > self.margin_y + EPSILON
            && y < self.grid_bottom() - EPSILON
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_sizes() {
        let shelf = TileGrid::letter(2.0, 3.0).unwrap();
        assert_eq!((shelf.cols, shelf.rows), (4, 3));
        let price = TileGrid::letter(4.0, 6.0).unwrap();
        assert_eq!((price.cols, price.rows), (2, 1));
        let poster = TileGrid::letter(8.5, 11.0).unwrap();
        assert_eq!((poster.cols, poster.rows), (1, 1));
    }

    #[test]
    fn test_symmetric_margins() {
        let grid = TileGrid::letter(2.0, 3.0).unwrap();
        assert!((grid.margin_x - 0.25).abs() < 1e-5);
        assert!((grid.margin_y - 1.0).abs() < 1e-5);
        let right = grid.page_width - (grid.margin_x + 4.0 * 2.0);
        let bottom = grid.page_height - (grid.margin_y + 3.0 * 3.0);
        assert!((right - grid.margin_x).abs() < 1e-5);
        assert!((bottom - grid.margin_y).abs() < 1e-5);
    }

    #[test]
    fn test_cells_cover_grid() {
        let grid = TileGrid::letter(2.0, 3.0).unwrap();
        let cells: Vec<_> = grid.cells().collect();
        assert_eq!(cells.len(), 12);
        assert_eq!(cells[0], (grid.margin_x, grid.margin_y));
        assert_eq!(cells[5], grid.cell_origin(1, 1));
    }

    #[test]
    fn test_crop_marks_stay_in_margin() {
        let grid = TileGrid::letter(2.0, 3.0).unwrap();
        let marks = grid.crop_marks(CROP_MARK_OFFSET, CROP_MARK_LENGTH);
        // 5 vertical boundaries × 2 + 4 horizontal boundaries × 2
        assert_eq!(marks.len(), 18);
        for m in &marks {
            assert!(!grid.touches_card(m.x1, m.y1));
            assert!(!grid.touches_card(m.x2, m.y2));
            for (x, y) in [(m.x1, m.y1), (m.x2, m.y2)] {
                assert!((0.0..=grid.page_width).contains(&x));
                assert!((0.0..=grid.page_height).contains(&y));
            }
        }
    }

    #[test]
    fn test_interior_intersections_located_by_margin_ticks() {
        let grid = TileGrid::letter(2.0, 3.0).unwrap();
        let marks = grid.crop_marks(CROP_MARK_OFFSET, CROP_MARK_LENGTH);
        for i in 1..grid.cols {
            for j in 1..grid.rows {
                let (x, y) = grid.cell_origin(i, j);
                let vertical = marks.iter().filter(|m| m.x1 == x && m.x2 == x).count();
                let horizontal = marks.iter().filter(|m| m.y1 == y && m.y2 == y).count();
                assert_eq!((vertical, horizontal), (2, 2), "({i}, {j})");
                assert!(marks.iter().all(|m| (m.x1, m.y1) != (x, y)));
            }
        }
    }

    #[test]
    fn test_crop_marks_clamped_to_narrow_margin() {
        let grid = TileGrid::letter(2.0, 3.0).unwrap();
        // side margin is 0.25: 0.25 - offset 0.0625 leaves 0.1875
        let marks = grid.crop_marks(CROP_MARK_OFFSET, 1.0);
        let left = marks.iter().find(|m| m.y1 == m.y2 && m.x2 < m.x1).unwrap();
        assert!(left.x2 >= 0.0);
        assert!((left.x1 - left.x2 - 0.1875).abs() < 1e-5);
    }

    #[test]
    fn test_full_page_card_has_no_marks() {
        let grid = TileGrid::letter(8.5, 11.0).unwrap();
        assert!(grid.crop_marks(CROP_MARK_OFFSET, CROP_MARK_LENGTH).is_empty());
    }

    #[test]
    fn test_card_too_big() {
        assert!(TileGrid::letter(9.0, 11.0).is_err());
    }
}
