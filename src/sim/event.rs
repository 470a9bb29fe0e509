//! Events emitted by inputs and ticks.
//! The view/sound layer consumes these; the simulation never reads them back.

use serde::{Deserialize, Serialize};

use super::state::ObstacleKind;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    Restarted,
    Paused,
    Resumed,
    Jumped,
    Landed,
    ObstacleSpawned { kind: ObstacleKind, height: f32 },
    GameOver { score: u64 },
    ColorChanged { rgb: u32 },
}
