//! Game state and core simulation types
//!
//! Everything the view reads lives here. The RNG and the task schedule are
//! owned by the engine, so a `GameState` is plain data.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::marquee::Marquee;

/// Current phase of the game lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for a username; only the marquee and color pulse run
    #[default]
    NotStarted,
    /// Active gameplay
    Running,
    /// Game is paused
    Paused,
    /// Collision happened; terminal until restart
    GameOver,
}

/// Which sprite set the view should draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pose {
    Running,
    Jumping,
}

impl Pose {
    /// Number of animation frames in this pose's sprite set
    pub fn frame_count(self) -> u32 {
        match self {
            Pose::Running => RUN_FRAMES,
            Pose::Jumping => JUMP_FRAMES,
        }
    }
}

/// The runner
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Player {
    /// Height above the ground line (0 = grounded)
    pub vertical_offset: f32,
    pub is_jumping: bool,
}

impl Player {
    /// Leave the ground. Returns false if already airborne.
    pub fn jump(&mut self) -> bool {
        if self.is_jumping {
            return false;
        }
        self.is_jumping = true;
        self.vertical_offset = JUMP_PEAK;
        true
    }

    /// Back on the ground
    pub fn land(&mut self) {
        self.vertical_offset = 0.0;
        self.is_jumping = false;
    }

    pub fn pose(&self) -> Pose {
        if self.is_jumping {
            Pose::Jumping
        } else {
            Pose::Running
        }
    }
}

/// Obstacle types (purely cosmetic; the height decides the hit box)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    Bat,
    Cactus,
}

/// An obstacle scrolling toward the player
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Left edge in view pixels
    pub position: f32,
    pub kind: ObstacleKind,
    pub height: f32,
}

impl Obstacle {
    pub fn new(position: f32, kind: ObstacleKind, height: f32) -> Self {
        Self {
            position,
            kind,
            height,
        }
    }

    /// New obstacle at the trailing edge with coin-flip kind and height
    pub fn spawn(rng: &mut impl Rng) -> Self {
        let kind = if rng.random_bool(0.5) {
            ObstacleKind::Bat
        } else {
            ObstacleKind::Cactus
        };
        let height = if rng.random_bool(0.5) {
            OBSTACLE_TALL_HEIGHT
        } else {
            OBSTACLE_SHORT_HEIGHT
        };
        Self::new(OBSTACLE_SPAWN_X, kind, height)
    }

    pub fn is_expired(&self) -> bool {
        self.position <= OBSTACLE_DESPAWN_X
    }
}

/// Sprite frame and parallax offsets advanced by the animation tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Scenery {
    pub sprite_frame: u32,
    /// Background buildings offset, in (-BUILDING_WRAP, 0]
    pub building_offset: i32,
    /// Road offset, in (-GROUND_WRAP, 0]
    pub ground_offset: i32,
}

/// 24-bit RGB color for lit marquee cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LitColor(u32);

impl Default for LitColor {
    fn default() -> Self {
        Self(INITIAL_LIT_COLOR)
    }
}

impl LitColor {
    pub fn new(rgb: u32) -> Self {
        Self(rgb & 0xff_ffff)
    }

    pub fn random(rng: &mut impl Rng) -> Self {
        Self(rng.random_range(0..=0xff_ffff))
    }

    pub fn rgb(self) -> u32 {
        self.0
    }
}

impl fmt::Display for LitColor {
    /// CSS hex notation, always 6 digits
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.0)
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub phase: GamePhase,
    /// Name entered at start (trimmed, length-capped, original casing)
    pub username: String,
    pub player: Player,
    /// Live obstacles, oldest first
    pub obstacles: Vec<Obstacle>,
    pub score: u64,
    pub marquee: Marquee,
    pub lit_color: LitColor,
    pub scenery: Scenery,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    pub fn new() -> Self {
        Self {
            phase: GamePhase::NotStarted,
            username: String::new(),
            player: Player::default(),
            obstacles: Vec::new(),
            score: 0,
            marquee: Marquee::default(),
            lit_color: LitColor::default(),
            scenery: Scenery::default(),
        }
    }

    /// Username as shown on the marquee (uppercase, so every letter has a glyph)
    pub fn banner_name(&self) -> String {
        self.username.to_uppercase()
    }

    pub fn game_over_text(&self) -> String {
        format!("GAME OVER {} - {}", self.banner_name(), self.score)
    }

    /// Clear the run back to its starting values (obstacles, score, player)
    pub fn reset_run(&mut self) {
        self.obstacles.clear();
        self.score = 0;
        self.player = Player::default();
        self.scenery.sprite_frame = 0;
    }
}
