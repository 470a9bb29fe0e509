//! Marquee scroll driver
//!
//! Text enters from the right edge, moves one column left per scroll tick,
//! and re-enters from the right once it has fully left the grid.

use serde::{Deserialize, Serialize};

use super::grid::{Grid, render};
use crate::consts::{GLYPH_ADVANCE, GRID_COLS, IDLE_BANNER};

/// Scrolling banner state plus its last rendered grid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Marquee {
    display_text: String,
    scroll_position: i32,
    grid: Grid,
}

impl Default for Marquee {
    fn default() -> Self {
        Self::new(IDLE_BANNER)
    }
}

impl Marquee {
    pub fn new(text: &str) -> Self {
        let scroll_position = GRID_COLS as i32;
        Self {
            display_text: text.to_string(),
            scroll_position,
            grid: render(text, scroll_position),
        }
    }

    pub fn display_text(&self) -> &str {
        &self.display_text
    }

    pub fn scroll_position(&self) -> i32 {
        self.scroll_position
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Position at or below which the text has fully scrolled off the left edge
    ///
    /// Depends only on the character count, not on which glyphs exist.
    pub fn wrap_threshold(&self) -> i32 {
        let len = i32::try_from(self.display_text.chars().count()).unwrap_or(i32::MAX);
        len.saturating_mul(GLYPH_ADVANCE).saturating_neg()
    }

    /// One scroll tick: wrap back to the right edge or move one column left
    pub fn advance(&mut self) {
        self.scroll_position = if self.scroll_position <= self.wrap_threshold() {
            GRID_COLS as i32
        } else {
            self.scroll_position - 1
        };
        self.rerender();
    }

    /// Replace the banner text, keeping the current scroll position
    pub fn set_text(&mut self, text: &str) {
        if self.display_text != text {
            self.display_text = text.to_string();
            self.rerender();
        }
    }

    fn rerender(&mut self) {
        self.grid = render(&self.display_text, self.scroll_position);
    }
}
