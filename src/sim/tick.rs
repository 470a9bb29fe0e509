//! Per-task updates and input handling
//!
//! Every function here mutates a `GameState` in place and reports what
//! happened as events. None of them know about time; the engine decides
//! when each one runs.

use rand::Rng;

use super::collision::first_collision;
use super::event::GameEvent;
use super::schedule::Task;
use super::state::{GamePhase, GameState, LitColor, Obstacle};
use crate::consts::*;

/// Discrete player/UI input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Start a game from the title screen
    Start { username: String },
    /// Jump (key press or tap)
    Jump,
    /// Pause/resume toggle
    TogglePause,
    /// Throw away the current run and start over
    Restart,
}

/// Normalize a typed username: trimmed and capped at `MAX_USERNAME_LEN` chars
pub fn sanitize_username(raw: &str) -> String {
    raw.trim().chars().take(MAX_USERNAME_LEN).collect()
}

/// Apply one input to the state
pub fn apply_input(state: &mut GameState, input: &Input) -> Vec<GameEvent> {
    match input {
        Input::Start { username } => start(state, username),
        Input::Jump => jump(state),
        Input::TogglePause => toggle_pause(state),
        Input::Restart => restart(state),
    }
}

fn start(state: &mut GameState, username: &str) -> Vec<GameEvent> {
    if state.phase != GamePhase::NotStarted {
        log::debug!("start ignored in {:?}", state.phase);
        return vec![];
    }
    let username = sanitize_username(username);
    if username.is_empty() {
        log::debug!("start ignored: empty username");
        return vec![];
    }

    state.username = username;
    state.reset_run();
    state.phase = GamePhase::Running;
    let banner = state.banner_name();
    state.marquee.set_text(&banner);
    log::info!("Game started for {}", state.username);
    vec![GameEvent::Started]
}

fn jump(state: &mut GameState) -> Vec<GameEvent> {
    if state.phase != GamePhase::Running {
        log::debug!("jump ignored in {:?}", state.phase);
        return vec![];
    }
    if !state.player.jump() {
        return vec![];
    }
    state.scenery.sprite_frame = 0;
    vec![GameEvent::Jumped]
}

fn toggle_pause(state: &mut GameState) -> Vec<GameEvent> {
    match state.phase {
        GamePhase::Running => {
            state.phase = GamePhase::Paused;
            log::info!("Paused at score {}", state.score);
            vec![GameEvent::Paused]
        }
        GamePhase::Paused => {
            state.phase = GamePhase::Running;
            log::info!("Resumed");
            vec![GameEvent::Resumed]
        }
        _ => {
            log::debug!("pause toggle ignored in {:?}", state.phase);
            vec![]
        }
    }
}

fn restart(state: &mut GameState) -> Vec<GameEvent> {
    if state.phase == GamePhase::NotStarted {
        log::debug!("restart ignored before start");
        return vec![];
    }
    state.reset_run();
    state.phase = GamePhase::Running;
    let banner = state.banner_name();
    state.marquee.set_text(&banner);
    log::info!("Game restarted for {}", state.username);
    vec![GameEvent::Restarted]
}

/// Run whichever update a scheduled task stands for
pub fn run_task(state: &mut GameState, task: Task, rng: &mut impl Rng) -> Vec<GameEvent> {
    if task.needs_running() && state.phase != GamePhase::Running {
        return vec![];
    }
    match task {
        Task::JumpReset => jump_reset(state),
        Task::CollisionCheck => collision_tick(state),
        Task::ObstacleTick => obstacle_tick(state, rng),
        Task::AnimationFrame => {
            animation_tick(state);
            vec![]
        }
        Task::MarqueeScroll => {
            state.marquee.advance();
            vec![]
        }
        Task::ColorPulse => vec![color_tick(state, rng)],
    }
}

/// End of the fixed-duration jump
pub fn jump_reset(state: &mut GameState) -> Vec<GameEvent> {
    if !state.player.is_jumping {
        return vec![];
    }
    state.player.land();
    state.scenery.sprite_frame = 0;
    vec![GameEvent::Landed]
}

/// Scroll obstacles left, despawn the ones off-screen, maybe spawn one,
/// and bump the score.
pub fn obstacle_tick(state: &mut GameState, rng: &mut impl Rng) -> Vec<GameEvent> {
    let mut events = Vec::new();

    for obstacle in &mut state.obstacles {
        obstacle.position -= OBSTACLE_STEP;
    }
    state.obstacles.retain(|o| !o.is_expired());

    if rng.random_bool(OBSTACLE_SPAWN_CHANCE) {
        let obstacle = Obstacle::spawn(rng);
        log::debug!("Spawned {:?} (h={})", obstacle.kind, obstacle.height);
        events.push(GameEvent::ObstacleSpawned {
            kind: obstacle.kind,
            height: obstacle.height,
        });
        state.obstacles.push(obstacle);
    }

    state.score += 1;
    events
}

/// AABB test of the player against every live obstacle.
/// Any hit ends the run; further hits in the same check change nothing.
pub fn collision_tick(state: &mut GameState) -> Vec<GameEvent> {
    if state.phase != GamePhase::Running {
        return vec![];
    }
    if first_collision(&state.player, &state.obstacles).is_none() {
        return vec![];
    }

    state.phase = GamePhase::GameOver;
    let text = state.game_over_text();
    state.marquee.set_text(&text);
    log::info!("Game over for {} at score {}", state.username, state.score);
    vec![GameEvent::GameOver { score: state.score }]
}

/// Sprite frame and parallax scroll
pub fn animation_tick(state: &mut GameState) {
    let frames = state.player.pose().frame_count();
    let scenery = &mut state.scenery;
    scenery.sprite_frame = (scenery.sprite_frame + 1) % frames;
    scenery.building_offset = (scenery.building_offset - BUILDING_STEP) % BUILDING_WRAP;
    scenery.ground_offset = (scenery.ground_offset - GROUND_STEP) % GROUND_WRAP;
}

/// New random lit color
pub fn color_tick(state: &mut GameState, rng: &mut impl Rng) -> GameEvent {
    state.lit_color = LitColor::random(rng);
    GameEvent::ColorChanged {
        rgb: state.lit_color.rgb(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::ObstacleKind;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn running(name: &str) -> GameState {
        let mut state = GameState::new();
        apply_input(
            &mut state,
            &Input::Start {
                username: name.to_string(),
            },
        );
        state
    }

    #[test]
    fn test_start_sets_banner() {
        let state = running("al");
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.username, "al");
        assert_eq!(state.marquee.display_text(), "AL");
    }

    #[test]
    fn test_start_rejects_blank_username() {
        let mut state = GameState::new();
        let events = apply_input(
            &mut state,
            &Input::Start {
                username: "   ".to_string(),
            },
        );
        assert!(events.is_empty());
        assert_eq!(state.phase, GamePhase::NotStarted);
        assert_eq!(state.marquee.display_text(), IDLE_BANNER);
    }

    #[test]
    fn test_username_is_trimmed_and_capped() {
        assert_eq!(sanitize_username("  bob "), "bob");
        assert_eq!(sanitize_username("abcdefghijklmnop"), "abcdefghij");
        assert_eq!(sanitize_username(""), "");
    }

    #[test]
    fn test_start_only_once() {
        let mut state = running("AL");
        let events = apply_input(
            &mut state,
            &Input::Start {
                username: "BOB".to_string(),
            },
        );
        assert!(events.is_empty());
        assert_eq!(state.username, "AL");
    }

    #[test]
    fn test_obstacle_tick_shifts_and_despawns() {
        let mut state = running("AL");
        state.obstacles = vec![
            Obstacle::new(-14.0, ObstacleKind::Bat, 40.0),
            Obstacle::new(-16.0, ObstacleKind::Cactus, 30.0),
            Obstacle::new(100.0, ObstacleKind::Bat, 30.0),
            Obstacle::new(800.0, ObstacleKind::Cactus, 40.0),
        ];
        let mut rng = Pcg32::seed_from_u64(1);

        obstacle_tick(&mut state, &mut rng);

        // -16 - 5 = -21 is gone; -14 - 5 = -19 stays
        let positions: Vec<f32> = state.obstacles.iter().take(3).map(|o| o.position).collect();
        assert_eq!(positions, vec![-19.0, 95.0, 795.0]);
        assert!(state.obstacles.iter().all(|o| o.position > OBSTACLE_DESPAWN_X));
        assert_eq!(state.score, 1);
    }

    #[test]
    fn test_obstacle_at_threshold_is_dropped() {
        let mut state = running("AL");
        state.obstacles = vec![Obstacle::new(-15.0, ObstacleKind::Bat, 40.0)];
        let mut rng = Pcg32::seed_from_u64(3);
        obstacle_tick(&mut state, &mut rng);
        assert!(state.obstacles.iter().all(|o| o.position != -20.0));
    }

    #[test]
    fn test_spawn_rate_matches_probability() {
        let mut state = running("AL");
        let mut rng = Pcg32::seed_from_u64(2024);
        let mut spawned = 0;

        for _ in 0..1000 {
            let events = obstacle_tick(&mut state, &mut rng);
            spawned += events
                .iter()
                .filter(|e| matches!(e, GameEvent::ObstacleSpawned { .. }))
                .count();
        }

        // Expected 20, standard deviation ~4.4
        assert!((5..=40).contains(&spawned), "spawned {spawned}");
        assert_eq!(state.score, 1000);
        // Spawns appended at the tail, so positions are strictly increasing
        assert!(state.obstacles.windows(2).all(|w| w[0].position < w[1].position));
    }

    #[test]
    fn test_running_tasks_skip_outside_running() {
        let mut state = running("AL");
        apply_input(&mut state, &Input::TogglePause);
        let mut rng = Pcg32::seed_from_u64(0);

        assert!(run_task(&mut state, Task::ObstacleTick, &mut rng).is_empty());
        run_task(&mut state, Task::AnimationFrame, &mut rng);
        assert_eq!(state.score, 0);
        assert_eq!(state.scenery.sprite_frame, 0);

        // The marquee keeps scrolling while paused
        let before = state.marquee.scroll_position();
        run_task(&mut state, Task::MarqueeScroll, &mut rng);
        assert_eq!(state.marquee.scroll_position(), before - 1);
    }

    #[test]
    fn test_collision_ends_game_once() {
        let mut state = running("AL");
        state.score = 42;
        state.obstacles = vec![
            Obstacle::new(PLAYER_X, ObstacleKind::Bat, 40.0),
            Obstacle::new(PLAYER_X + 5.0, ObstacleKind::Cactus, 30.0),
        ];
        apply_input(&mut state, &Input::Jump);

        let events = collision_tick(&mut state);
        assert_eq!(events, vec![GameEvent::GameOver { score: 42 }]);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.marquee.display_text(), "GAME OVER AL - 42");

        assert!(collision_tick(&mut state).is_empty());
    }

    #[test]
    fn test_collision_without_obstacles_is_noop() {
        let mut state = running("AL");
        apply_input(&mut state, &Input::Jump);
        assert!(collision_tick(&mut state).is_empty());
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_jump_guards() {
        let mut state = running("AL");
        assert_eq!(apply_input(&mut state, &Input::Jump), vec![GameEvent::Jumped]);
        assert!(apply_input(&mut state, &Input::Jump).is_empty());
        assert_eq!(state.player.vertical_offset, JUMP_PEAK);

        assert_eq!(jump_reset(&mut state), vec![GameEvent::Landed]);
        assert!(jump_reset(&mut state).is_empty());

        apply_input(&mut state, &Input::TogglePause);
        assert!(apply_input(&mut state, &Input::Jump).is_empty());

        let mut fresh = GameState::new();
        assert!(apply_input(&mut fresh, &Input::Jump).is_empty());
    }

    #[test]
    fn test_pause_toggle_only_between_running_and_paused() {
        let mut state = GameState::new();
        assert!(apply_input(&mut state, &Input::TogglePause).is_empty());
        assert_eq!(state.phase, GamePhase::NotStarted);

        let mut state = running("AL");
        assert_eq!(apply_input(&mut state, &Input::TogglePause), vec![GameEvent::Paused]);
        assert_eq!(apply_input(&mut state, &Input::TogglePause), vec![GameEvent::Resumed]);

        state.phase = GamePhase::GameOver;
        assert!(apply_input(&mut state, &Input::TogglePause).is_empty());
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_restart_resets_run() {
        let mut state = running("al");
        state.score = 99;
        state.obstacles.push(Obstacle::new(300.0, ObstacleKind::Bat, 40.0));
        apply_input(&mut state, &Input::Jump);
        state.phase = GamePhase::GameOver;
        state.marquee.set_text("GAME OVER AL - 99");

        assert_eq!(apply_input(&mut state, &Input::Restart), vec![GameEvent::Restarted]);
        assert_eq!(state.phase, GamePhase::Running);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.score, 0);
        assert!(!state.player.is_jumping);
        assert_eq!(state.player.vertical_offset, 0.0);
        assert_eq!(state.marquee.display_text(), "AL");
    }

    #[test]
    fn test_restart_ignored_before_start() {
        let mut state = GameState::new();
        assert!(apply_input(&mut state, &Input::Restart).is_empty());
        assert_eq!(state.phase, GamePhase::NotStarted);
    }

    #[test]
    fn test_animation_frames_and_parallax_wrap() {
        let mut state = running("AL");
        for i in 1..=7 {
            animation_tick(&mut state);
            assert_eq!(state.scenery.sprite_frame, i % RUN_FRAMES);
        }

        apply_input(&mut state, &Input::Jump);
        assert_eq!(state.scenery.sprite_frame, 0);
        for _ in 0..4 {
            animation_tick(&mut state);
            assert!(state.scenery.sprite_frame < JUMP_FRAMES);
        }

        let mut state = running("AL");
        for _ in 0..(GROUND_WRAP / GROUND_STEP) {
            animation_tick(&mut state);
            assert!(state.scenery.ground_offset > -GROUND_WRAP && state.scenery.ground_offset <= 0);
        }
        assert_eq!(state.scenery.ground_offset, 0);
        assert_eq!(state.scenery.building_offset, -(GROUND_WRAP / GROUND_STEP) * BUILDING_STEP);
    }

    #[test]
    fn test_color_tick_is_seeded() {
        let mut a = GameState::new();
        let mut b = GameState::new();
        let mut rng_a = Pcg32::seed_from_u64(5);
        let mut rng_b = Pcg32::seed_from_u64(5);
        for _ in 0..10 {
            assert_eq!(color_tick(&mut a, &mut rng_a), color_tick(&mut b, &mut rng_b));
        }
        assert_eq!(a.lit_color, b.lit_color);
    }
}
