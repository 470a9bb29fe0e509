//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Virtual clock only, advanced by the caller
//! - Seeded RNG only
//! - One task or input applied at a time, in time order
//! - No rendering or platform dependencies

pub mod collision;
pub mod engine;
pub mod event;
pub mod schedule;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use collision::{Rect, first_collision, obstacle_rect, player_rect};
pub use engine::Engine;
pub use event::GameEvent;
pub use schedule::{Scheduler, Task};
pub use snapshot::Snapshot;
pub use state::{
    GamePhase, GameState, LitColor, Obstacle, ObstacleKind, Player, Pose, Scenery,
};
pub use tick::{Input, apply_input, run_task, sanitize_username};
