//! Deferred logical transitions
//!
//! Delays (level banner, restart countdown) are entries in a queue, each
//! counting down its own remaining time. The queue is polled once per step;
//! each entry fires once.

use serde::{Deserialize, Serialize};

/// Something the session should do later
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScheduledAction {
    /// Leave the level banner and resume play
    ResumePlay,
    /// Tell the host a fresh session may be created
    RestartDue,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Pending {
    /// Seconds until due
    remaining: f32,
    action: ScheduledAction,
}

/// Queue of pending actions, each counting down its own delay
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scheduler {
    /// Session time in seconds (reporting only)
    elapsed: f64,
    /// Sorted by remaining time, FIFO among equal times
    pending: Vec<Pending>,
}

impl Scheduler {
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Queue `action` to fire `delay` seconds from now
    pub fn schedule(&mut self, delay: f32, action: ScheduledAction) {
        let remaining = delay.max(0.0);
        let index = self.pending.partition_point(|p| p.remaining <= remaining);
        self.pending.insert(index, Pending { remaining, action });
    }

    /// Count every entry down by `dt` and pop the ones that have come due
    pub fn advance(&mut self, dt: f32) -> Vec<ScheduledAction> {
        self.elapsed += f64::from(dt);
        for p in &mut self.pending {
            p.remaining -= dt;
        }
        let ready = self.pending.partition_point(|p| p.remaining <= 0.0);
        self.pending.drain(..ready).map(|p| p.action).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_after_delay() {
        let mut s = Scheduler::default();
        s.schedule(1.0, ScheduledAction::ResumePlay);
        assert!(s.advance(0.5).is_empty());
        assert_eq!(s.advance(0.5), vec![ScheduledAction::ResumePlay]);
        assert!(s.advance(5.0).is_empty());
        assert!(s.is_empty());
    }

    #[test]
    fn test_due_order_preserved() {
        let mut s = Scheduler::default();
        s.schedule(3.0, ScheduledAction::RestartDue);
        s.schedule(1.0, ScheduledAction::ResumePlay);
        assert_eq!(
            s.advance(10.0),
            vec![ScheduledAction::ResumePlay, ScheduledAction::RestartDue]
        );
    }

    #[test]
    fn test_delay_is_relative_to_now() {
        let mut s = Scheduler::default();
        s.advance(2.0);
        s.schedule(1.0, ScheduledAction::ResumePlay);
        assert!(s.advance(0.9).is_empty());
        assert_eq!(s.advance(0.2).len(), 1);
    }

    #[test]
    fn test_delays_still_elapse_in_a_long_session() {
        let mut s = Scheduler::default();
        s.advance(600_000.0);
        s.schedule(1.8, ScheduledAction::ResumePlay);
        let mut fired = Vec::new();
        for _ in 0..120 {
            fired.extend(s.advance(1.0 / 60.0));
        }
        assert_eq!(fired, vec![ScheduledAction::ResumePlay]);
        assert!(s.elapsed() > 600_001.0);
    }
}
