//! Axis-aligned bounding box collision between the player and obstacles
//!
//! Screen space: x grows to the right, y grows downward, the ground line is
//! at `GROUND_Y`. The player box hangs from `GROUND_Y - vertical_offset`, so a
//! grounded player only touches obstacle tops edge-to-edge; a jump carries it
//! into any obstacle that is under it.

use glam::Vec2;

use super::state::{Obstacle, Player};
use crate::consts::*;

/// Axis-aligned rectangle (top-left origin + size)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.origin + self.size
    }

    /// Strict overlap: all four separating-axis tests must fail.
    /// Rectangles that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.origin.x < other.max().x
            && self.max().x > other.origin.x
            && self.origin.y < other.max().y
            && self.max().y > other.origin.y
    }
}

/// The player's hit box at its current height
pub fn player_rect(player: &Player) -> Rect {
    Rect::new(
        PLAYER_X,
        GROUND_Y - player.vertical_offset,
        PLAYER_WIDTH,
        PLAYER_HEIGHT,
    )
}

/// An obstacle's hit box, standing on the ground line
pub fn obstacle_rect(obstacle: &Obstacle) -> Rect {
    Rect::new(
        obstacle.position,
        GROUND_Y - obstacle.height,
        OBSTACLE_WIDTH,
        obstacle.height,
    )
}

/// First obstacle overlapping the player, if any
pub fn first_collision<'a>(player: &Player, obstacles: &'a [Obstacle]) -> Option<&'a Obstacle> {
    let player_box = player_rect(player);
    obstacles
        .iter()
        .find(|o| player_box.overlaps(&obstacle_rect(o)))
}
