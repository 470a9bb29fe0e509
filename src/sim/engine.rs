//! Clock-driven engine
//!
//! Owns the authoritative `GameState`, the task schedule and the seeded RNG.
//! Inputs are applied at the current virtual time; `advance_to` fires every
//! task that falls due, strictly in time order, one at a time. After each
//! input or firing the Running-only drivers are armed or cancelled to match
//! the lifecycle phase, so a driver can never fire after its phase has ended.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::event::GameEvent;
use super::schedule::{Scheduler, Task};
use super::snapshot::Snapshot;
use super::state::{GamePhase, GameState};
use super::tick::{Input, apply_input, run_task};

pub struct Engine {
    seed: u64,
    state: GameState,
    scheduler: Scheduler,
    rng: Pcg32,
}

impl Engine {
    /// Fresh engine at time 0 with the marquee and color pulse running
    pub fn new(seed: u64) -> Self {
        let mut scheduler = Scheduler::new();
        scheduler.start(Task::MarqueeScroll);
        scheduler.start(Task::ColorPulse);
        log::info!("Engine created with seed {}", seed);
        Self {
            seed,
            state: GameState::new(),
            scheduler,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Current virtual time (ms)
    pub fn now(&self) -> u64 {
        self.scheduler.now()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn is_task_live(&self, task: Task) -> bool {
        self.scheduler.is_live(task)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state, self.now())
    }

    /// Apply a discrete input at the current time
    pub fn handle(&mut self, input: Input) -> Vec<GameEvent> {
        let events = apply_input(&mut self.state, &input);
        self.after(&events);
        events
    }

    /// Advance the clock by `dt` ms
    pub fn advance(&mut self, dt: u64) -> Vec<GameEvent> {
        self.advance_to(self.now().saturating_add(dt))
    }

    /// Fire every task due up to and including `time`
    pub fn advance_to(&mut self, time: u64) -> Vec<GameEvent> {
        let mut events = Vec::new();
        while let Some(task) = self.scheduler.pop_due(time) {
            let fired = run_task(&mut self.state, task, &mut self.rng);
            self.after(&fired);
            events.extend(fired);
        }
        self.scheduler.set_now(time);
        events
    }

    /// Schedule bookkeeping after state changed
    fn after(&mut self, events: &[GameEvent]) {
        for event in events {
            match event {
                GameEvent::Jumped => {
                    self.scheduler.cancel(Task::JumpReset);
                    self.scheduler.start(Task::JumpReset);
                }
                // Player was reset directly; a pending landing must not fire
                GameEvent::Started | GameEvent::Restarted => {
                    self.scheduler.cancel(Task::JumpReset);
                }
                _ => {}
            }
        }
        self.sync_drivers();
    }

    /// Arm Running-only tasks while Running, cancel them otherwise
    fn sync_drivers(&mut self) {
        let running = self.state.phase == GamePhase::Running;
        for task in Task::ALL.into_iter().filter(|t| t.needs_running()) {
            if running {
                self.scheduler.start(task);
            } else {
                self.scheduler.cancel(task);
            }
        }
    }
}
