use std::time::{Duration, Instant};

/// Fixed-interval tick clock. It only runs while armed, so the shell can stop
/// it whenever the game leaves the running state.
#[derive(Debug)]
pub struct TickScheduler {
    interval: Duration,
    next_due: Option<Instant>,
}

impl TickScheduler {
    pub fn new(interval: Duration) -> Self {
        TickScheduler { interval, next_due: None }
    }

    /// Arms the clock with the first tick due straight away.
    pub fn start(&mut self, now: Instant) {
        self.next_due = Some(now);
    }

    pub fn stop(&mut self) {
        self.next_due = None;
    }

    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    /// How long the caller may wait for input before the next tick is due.
    /// `None` while stopped.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.next_due.map(|due| due.saturating_duration_since(now))
    }

    /// Returns true at most once per interval. After a stall longer than one
    /// interval the clock re-anchors on `now` rather than firing in a burst.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if now >= due => {
                let next = due + self.interval;
                self.next_due = Some(if next <= now { now + self.interval } else { next });
                true
            }
            _ => false,
        }
    }
}
