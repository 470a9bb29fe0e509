//! Virtual clock and named periodic tasks
//!
//! Each task is either live (has a next due time) or cancelled. Cancelling
//! takes effect immediately: a cancelled task never fires again until it is
//! started anew, and a fresh start always waits one full period.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Every scheduled action the engine knows about
///
/// Declaration order is the firing order for tasks due at the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Task {
    /// One-shot: bring the player back to the ground
    JumpReset,
    CollisionCheck,
    ObstacleTick,
    AnimationFrame,
    MarqueeScroll,
    ColorPulse,
}

impl Task {
    pub const ALL: [Task; 6] = [
        Task::JumpReset,
        Task::CollisionCheck,
        Task::ObstacleTick,
        Task::AnimationFrame,
        Task::MarqueeScroll,
        Task::ColorPulse,
    ];

    /// Period for repeating tasks, delay for one-shots
    pub fn period(self) -> u64 {
        match self {
            Task::JumpReset => JUMP_DURATION_MS,
            Task::CollisionCheck => COLLISION_PERIOD_MS,
            Task::ObstacleTick => OBSTACLE_PERIOD_MS,
            Task::AnimationFrame => ANIMATION_PERIOD_MS,
            Task::MarqueeScroll => SCROLL_PERIOD_MS,
            Task::ColorPulse => COLOR_PULSE_PERIOD_MS,
        }
    }

    pub fn is_one_shot(self) -> bool {
        matches!(self, Task::JumpReset)
    }

    /// Tasks that only run while the game is in `Running`
    pub fn needs_running(self) -> bool {
        matches!(
            self,
            Task::CollisionCheck | Task::ObstacleTick | Task::AnimationFrame
        )
    }

    fn slot(self) -> usize {
        self as usize
    }
}

/// Virtual clock plus the next due time of each task
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scheduler {
    now: u64,
    due: [Option<u64>; Task::ALL.len()],
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time
    pub fn now(&self) -> u64 {
        self.now
    }

    pub fn is_live(&self, task: Task) -> bool {
        self.due[task.slot()].is_some()
    }

    pub fn due_at(&self, task: Task) -> Option<u64> {
        self.due[task.slot()]
    }

    /// Arm a task one period from now. Already-live tasks keep their phase.
    /// Returns true if the task was armed by this call.
    pub fn start(&mut self, task: Task) -> bool {
        if self.is_live(task) {
            return false;
        }
        self.due[task.slot()] = Some(self.now + task.period());
        true
    }

    /// Drop a task's pending firing. Returns true if it was live.
    pub fn cancel(&mut self, task: Task) -> bool {
        self.due[task.slot()].take().is_some()
    }

    /// Earliest pending firing, ties broken by task order
    pub fn next_due(&self) -> Option<(u64, Task)> {
        Task::ALL
            .iter()
            .filter_map(|&task| self.due_at(task).map(|at| (at, task)))
            .min()
    }

    /// Pop the next task due at or before `until`, moving the clock to its due
    /// time. Repeating tasks are re-armed one period later; one-shots are
    /// consumed.
    pub fn pop_due(&mut self, until: u64) -> Option<Task> {
        let (at, task) = self.next_due().filter(|&(at, _)| at <= until)?;
        self.now = at;
        self.due[task.slot()] = if task.is_one_shot() {
            None
        } else {
            Some(at + task.period())
        };
        log::trace!("t={} fire {:?}", at, task);
        Some(task)
    }

    /// Move the clock forward without firing anything. Never moves backward.
    pub fn set_now(&mut self, now: u64) {
        self.now = self.now.max(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(s: &mut Scheduler, until: u64) -> Vec<(u64, Task)> {
        let mut fired = Vec::new();
        while let Some(task) = s.pop_due(until) {
            fired.push((s.now(), task));
        }
        s.set_now(until);
        fired
    }

    #[test]
    fn test_new_scheduler_is_idle() {
        let s = Scheduler::new();
        assert_eq!(s.now(), 0);
        assert!(Task::ALL.iter().all(|&t| !s.is_live(t)));
        assert!(s.next_due().is_none());
    }

    #[test]
    fn test_periodic_task_fires_every_period() {
        let mut s = Scheduler::new();
        s.start(Task::MarqueeScroll);
        let fired = drain(&mut s, 350);
        assert_eq!(
            fired,
            vec![
                (100, Task::MarqueeScroll),
                (200, Task::MarqueeScroll),
                (300, Task::MarqueeScroll),
            ]
        );
        assert_eq!(s.now(), 350);
        assert_eq!(s.due_at(Task::MarqueeScroll), Some(400));
    }

    #[test]
    fn test_one_shot_fires_once() {
        let mut s = Scheduler::new();
        s.start(Task::JumpReset);
        assert_eq!(drain(&mut s, 2000), vec![(500, Task::JumpReset)]);
        assert!(!s.is_live(Task::JumpReset));
    }

    #[test]
    fn test_start_keeps_phase_of_live_task() {
        let mut s = Scheduler::new();
        assert!(s.start(Task::ObstacleTick));
        s.set_now(30);
        assert!(!s.start(Task::ObstacleTick));
        assert_eq!(s.due_at(Task::ObstacleTick), Some(50));
    }

    #[test]
    fn test_cancel_is_immediate_and_restart_waits_full_period() {
        let mut s = Scheduler::new();
        s.start(Task::ObstacleTick);
        s.set_now(40);
        assert!(s.cancel(Task::ObstacleTick));
        assert!(!s.cancel(Task::ObstacleTick));
        assert!(drain(&mut s, 1000).is_empty());

        s.start(Task::ObstacleTick);
        assert_eq!(s.due_at(Task::ObstacleTick), Some(1050));
    }

    #[test]
    fn test_interleaving_and_tie_order() {
        let mut s = Scheduler::new();
        s.start(Task::ColorPulse);
        s.start(Task::MarqueeScroll);
        s.start(Task::ObstacleTick);
        s.start(Task::CollisionCheck);

        let fired = drain(&mut s, 100);
        let times: Vec<u64> = fired.iter().map(|(t, _)| *t).collect();
        let mut sorted = times.clone();
        sorted.sort();
        assert_eq!(times, sorted);

        // At t=100 both the obstacle tick and the scroll are due; obstacle first
        let at_100: Vec<Task> = fired.iter().filter(|(t, _)| *t == 100).map(|(_, k)| *k).collect();
        assert_eq!(at_100, vec![Task::ObstacleTick, Task::MarqueeScroll]);
        assert_eq!(fired.iter().filter(|(_, k)| *k == Task::CollisionCheck).count(), 6);
    }

    #[test]
    fn test_clock_never_moves_backward() {
        let mut s = Scheduler::new();
        s.set_now(500);
        s.set_now(100);
        assert_eq!(s.now(), 500);
    }

    #[test]
    fn test_running_only_tasks() {
        let gated: Vec<Task> = Task::ALL.into_iter().filter(|t| t.needs_running()).collect();
        assert_eq!(
            gated,
            vec![Task::CollisionCheck, Task::ObstacleTick, Task::AnimationFrame]
        );
    }
}
