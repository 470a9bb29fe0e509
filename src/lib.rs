//! Ninja Run - a side-scrolling runner with an LED-matrix marquee
//!
//! Core modules:
//! - `marquee`: 5x7 glyph font, dot-matrix grid rendering, scroll driver
//! - `sim`: Deterministic simulation (ticks, obstacles, collisions, lifecycle)
//! - `platform`: Browser/native input mapping and seeding

pub mod marquee;
pub mod platform;
pub mod sim;

pub use marquee::{Grid, Marquee, render};
pub use sim::{Engine, GameEvent, GamePhase, Input, Snapshot};

/// Game configuration constants
///
/// All time values are in milliseconds, all distances in view pixels.
pub mod consts {
    /// Marquee grid dimensions
    pub const GRID_ROWS: usize = 15;
    pub const GRID_COLS: usize = 20;

    /// Glyph bitmap size and horizontal step (pattern width + 1 spacer column)
    pub const GLYPH_WIDTH: usize = 5;
    pub const GLYPH_HEIGHT: usize = 7;
    pub const GLYPH_ADVANCE: i32 = GLYPH_WIDTH as i32 + 1;

    /// Banner shown before any game has started
    pub const IDLE_BANNER: &str = "MATRIX";
    /// Lit-cell color before the first pulse
    pub const INITIAL_LIT_COLOR: u32 = 0x00ff00;
    /// Longest accepted username (characters)
    pub const MAX_USERNAME_LEN: usize = 10;

    /// Tick periods
    pub const ANIMATION_PERIOD_MS: u64 = 150;
    pub const OBSTACLE_PERIOD_MS: u64 = 50;
    pub const COLLISION_PERIOD_MS: u64 = 16;
    pub const SCROLL_PERIOD_MS: u64 = 100;
    pub const COLOR_PULSE_PERIOD_MS: u64 = 2000;
    /// Time the player stays airborne
    pub const JUMP_DURATION_MS: u64 = 500;

    /// Jump height (fixed up/hold/down step, no gravity)
    pub const JUMP_PEAK: f32 = 100.0;

    /// Obstacle motion and spawning
    pub const OBSTACLE_STEP: f32 = 5.0;
    /// Obstacles at or left of this position are despawned
    pub const OBSTACLE_DESPAWN_X: f32 = -20.0;
    /// Trailing (right) edge where new obstacles appear
    pub const OBSTACLE_SPAWN_X: f32 = 800.0;
    pub const OBSTACLE_SPAWN_CHANCE: f64 = 0.02;
    pub const OBSTACLE_TALL_HEIGHT: f32 = 40.0;
    pub const OBSTACLE_SHORT_HEIGHT: f32 = 30.0;
    pub const OBSTACLE_WIDTH: f32 = 40.0;

    /// Player collision box (screen space, y grows downward)
    pub const GROUND_Y: f32 = 300.0;
    pub const PLAYER_X: f32 = 50.0;
    pub const PLAYER_WIDTH: f32 = 60.0;
    pub const PLAYER_HEIGHT: f32 = 80.0;

    /// Sprite frame counts per pose
    pub const RUN_FRAMES: u32 = 6;
    pub const JUMP_FRAMES: u32 = 3;

    /// Parallax layers: step per animation tick and wrap period
    pub const BUILDING_STEP: i32 = 2;
    pub const BUILDING_WRAP: i32 = 1200;
    pub const GROUND_STEP: i32 = 5;
    pub const GROUND_WRAP: i32 = 800;
}
