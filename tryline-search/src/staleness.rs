use std::time::{Duration, Instant};

/// Advisory wall-clock timer flagging displayed results as possibly
/// outdated. It never invalidates data or cancels anything; when it fires
/// the UI prompts the user to refresh or edit the search. Suspended while
/// any modal is open so a user mid-selection is not interrupted.
#[derive(Debug)]
pub struct StalenessTimer {
    delay: Duration,
    deadline: Option<Instant>,
    suspended: bool,
}

impl StalenessTimer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
            suspended: false,
        }
    }

    /// Arm the timer, e.g. on entering the results view or after a refresh.
    pub fn arm(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
        self.suspended = false;
    }

    /// Disarm entirely (leaving the results view).
    pub fn clear(&mut self) {
        self.deadline = None;
        self.suspended = false;
    }

    /// Pause while a modal is open.
    pub fn suspend(&mut self) {
        self.suspended = true;
    }

    /// Resume after the modal closes; the viewing window restarts.
    pub fn resume(&mut self, now: Instant) {
        if self.deadline.is_some() {
            self.arm(now);
        }
    }

    pub fn is_stale(&self, now: Instant) -> bool {
        !self.suspended && self.deadline.is_some_and(|d| now >= d)
    }
}
