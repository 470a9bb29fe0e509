//! Dot-matrix grid and glyph stamping
//!
//! The grid is rebuilt from scratch on every render pass; nothing is patched
//! in place.

use serde::{Deserialize, Serialize};

use super::font::glyph;
use crate::consts::{GLYPH_ADVANCE, GLYPH_HEIGHT, GRID_COLS, GRID_ROWS};

/// First grid row of the vertically centered 7-row font
pub const START_ROW: usize = (GRID_ROWS - GLYPH_HEIGHT) / 2;

/// ROWS x COLS binary cells (0 = off, 1 = lit)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    cells: [[u8; GRID_COLS]; GRID_ROWS],
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl Grid {
    /// All-off grid
    pub fn new() -> Self {
        Self {
            cells: [[0; GRID_COLS]; GRID_ROWS],
        }
    }

    pub fn rows(&self) -> &[[u8; GRID_COLS]; GRID_ROWS] {
        &self.cells
    }

    /// Whether a cell is lit; out-of-range coordinates read as off
    pub fn is_lit(&self, row: usize, col: usize) -> bool {
        self.cells
            .get(row)
            .and_then(|r| r.get(col))
            .is_some_and(|&cell| cell == 1)
    }

    pub fn lit_count(&self) -> usize {
        self.cells.iter().flatten().filter(|&&c| c == 1).count()
    }

    pub fn is_blank(&self) -> bool {
        self.lit_count() == 0
    }

    /// Write a cell at a signed column, dropping writes outside [0, COLS)
    fn set(&mut self, row: usize, col: i32, value: u8) {
        if row >= GRID_ROWS || col < 0 || col >= GRID_COLS as i32 {
            return;
        }
        self.cells[row][col as usize] = value;
    }

    /// Text rendering for terminals and logs (`#` lit, `.` off)
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity(GRID_ROWS * (GRID_COLS + 1));
        for row in &self.cells {
            out.extend(row.iter().map(|&c| if c == 1 { '#' } else { '.' }));
            out.push('\n');
        }
        out
    }
}

/// Render `text` into a fresh grid with its first glyph at `scroll_position`
///
/// Characters without a glyph stamp nothing but still take a full glyph step.
pub fn render(text: &str, scroll_position: i32) -> Grid {
    let mut grid = Grid::new();
    let mut cursor = scroll_position;

    for c in text.chars() {
        if let Some(pattern) = glyph(c) {
            for (row, bits) in pattern.iter().enumerate() {
                for (col, &bit) in bits.iter().enumerate() {
                    grid.set(START_ROW + row, cursor.saturating_add(col as i32), bit);
                }
            }
        }
        cursor = cursor.saturating_add(GLYPH_ADVANCE);
    }

    grid
}
