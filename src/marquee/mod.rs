//! LED-matrix marquee
//!
//! Pure rendering of text into a fixed dot-matrix grid plus the scroll
//! state that moves it. No timing lives here; the simulation engine calls
//! `Marquee::advance` on every scroll tick.

pub mod font;
pub mod grid;
pub mod scroll;

pub use font::{Glyph, SUPPORTED_CHARS, glyph};
pub use grid::{Grid, START_ROW, render};
pub use scroll::Marquee;
