//! Virtual-time timer queue
//!
//! Delayed match work (the opponent's wind-up, impacts, next-turn setup) is
//! queued here instead of on wall-clock callbacks. The host advances time each
//! frame and the controller pops whatever has come due, in due order.

/// Cancellation token for a scheduled task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

#[derive(Debug, Clone)]
struct Timer<T> {
    id: TimerId,
    due: f64,
    task: T,
}

#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    /// Time of the task currently firing, or the horizon when idle
    now: f64,
    /// How far the host has advanced the clock
    horizon: f64,
    next_id: u64,
    pending: Vec<Timer<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            now: 0.0,
            horizon: 0.0,
            next_id: 1,
            pending: Vec::new(),
        }
    }

    /// Current virtual time
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Queue `task` to fire `delay` seconds from now
    pub fn schedule(&mut self, delay: f32, task: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.push(Timer {
            id,
            due: self.now + f64::from(delay.max(0.0)),
            task,
        });
        id
    }

    /// Drop a pending task. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|t| t.id != id);
        self.pending.len() != before
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.pending.iter().any(|t| t.id == id)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Move the horizon forward; due tasks are collected with `pop_due`
    pub fn advance(&mut self, dt: f32) {
        self.horizon += f64::from(dt.max(0.0));
    }

    /// Earliest task due by the horizon (ties fire in scheduling order).
    ///
    /// While it fires, `now` is its due time, so follow-up tasks scheduled from
    /// it are timed from the moment it fired rather than the end of the frame.
    pub fn pop_due(&mut self) -> Option<T> {
        let next = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= self.horizon)
            .min_by(|(_, a), (_, b)| a.due.total_cmp(&b.due).then(a.id.0.cmp(&b.id.0)))
            .map(|(i, _)| i);

        match next {
            Some(index) => {
                let timer = self.pending.remove(index);
                self.now = self.now.max(timer.due);
                Some(timer.task)
            }
            None => {
                self.now = self.horizon;
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(s: &mut Scheduler<&'static str>) -> Vec<&'static str> {
        std::iter::from_fn(|| s.pop_due()).collect()
    }

    #[test]
    fn test_fires_in_due_order() {
        let mut s = Scheduler::new();
        s.schedule(2.0, "late");
        s.schedule(1.0, "early");
        s.schedule(1.0, "early-second");

        s.advance(0.5);
        assert!(drain(&mut s).is_empty());

        s.advance(2.0);
        assert_eq!(drain(&mut s), vec!["early", "early-second", "late"]);
        assert!((s.now() - 2.5).abs() < 1e-9);
    }

    #[test]
    fn test_cancelled_never_fires() {
        let mut s = Scheduler::new();
        let keep = s.schedule(1.0, "keep");
        let drop = s.schedule(1.0, "drop");
        assert!(s.cancel(drop));
        assert!(!s.cancel(drop));
        assert!(s.is_pending(keep));

        s.advance(5.0);
        assert_eq!(drain(&mut s), vec!["keep"]);
        assert_eq!(s.pending_count(), 0);
    }

    #[test]
    fn test_follow_up_timed_from_fire_moment() {
        let mut s: Scheduler<u32> = Scheduler::new();
        s.schedule(1.0, 1);
        s.advance(3.0);

        let mut fired = Vec::new();
        while let Some(task) = s.pop_due() {
            fired.push((task, s.now()));
            if task == 1 {
                // Due at 2.0, still inside this frame
                s.schedule(1.0, 2);
                // Due at 4.0, next frame
                s.schedule(3.0, 3);
            }
        }
        assert_eq!(fired.len(), 2);
        assert_eq!(fired[1].0, 2);
        assert!((fired[1].1 - 2.0).abs() < 1e-9);
        assert_eq!(s.pending_count(), 1);

        s.advance(1.0);
        assert_eq!(s.pop_due(), Some(3));
    }
}
