//! Read-only render surface for the view layer

use serde::{Deserialize, Serialize};

use super::state::{GamePhase, GameState, Obstacle, Player, Pose, Scenery};
use crate::marquee::Grid;

/// Everything a view needs to paint one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Virtual time (ms) the snapshot was taken at
    pub time: u64,
    pub phase: GamePhase,
    pub score: u64,
    pub grid: Grid,
    /// CSS color for lit cells, e.g. `#00ff00`
    pub lit_color: String,
    pub display_text: String,
    pub scroll_position: i32,
    pub player: Player,
    pub pose: Pose,
    pub obstacles: Vec<Obstacle>,
    pub scenery: Scenery,
}

impl Snapshot {
    pub fn capture(state: &GameState, time: u64) -> Self {
        Self {
            time,
            phase: state.phase,
            score: state.score,
            grid: state.marquee.grid().clone(),
            lit_color: state.lit_color.to_string(),
            display_text: state.marquee.display_text().to_string(),
            scroll_position: state.marquee.scroll_position(),
            player: state.player,
            pose: state.player.pose(),
            obstacles: state.obstacles.clone(),
            scenery: state.scenery,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Engine, Input};

    #[test]
    fn test_capture_reflects_state() {
        let mut engine = Engine::new(9);
        engine.handle(Input::Start {
            username: "ZED".to_string(),
        });
        engine.advance(250);

        let snap = engine.snapshot();
        assert_eq!(snap.time, 250);
        assert_eq!(snap.phase, GamePhase::Running);
        assert_eq!(snap.display_text, "ZED");
        assert_eq!(snap.score, engine.state().score);
        assert_eq!(&snap.grid, engine.state().marquee.grid());
        assert_eq!(snap.lit_color, "#00ff00");
        assert_eq!(snap.pose, Pose::Running);
    }

    #[test]
    fn test_json_round_trip() {
        let engine = Engine::new(3);
        let json = engine.snapshot().to_json().unwrap();
        assert!(json.contains("\"phase\":\"NotStarted\""));
        assert!(json.contains("\"display_text\":\"MATRIX\""));

        let back: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, engine.snapshot());
    }
}
