/// Fixed-interval drop deadline driven by a monotonic millisecond clock.
///
/// The engine owns no timers; the front end polls this once per loop
/// iteration and issues a drop when it fires. Late polls fire once and
/// re-arm from the poll time, so a stalled terminal never produces a burst
/// of drops.
#[derive(Debug, Clone)]
pub struct DropTimer {
    interval_ms: u64,
    due_ms: u64,
    /// Time left on the deadline when paused.
    frozen: Option<u64>,
}

impl DropTimer {
    pub fn new(interval_ms: u64, now_ms: u64) -> Self {
        let interval_ms = interval_ms.max(1);
        Self {
            interval_ms,
            due_ms: now_ms.saturating_add(interval_ms),
            frozen: None,
        }
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    pub fn is_paused(&self) -> bool {
        self.frozen.is_some()
    }

    /// Switch to a new interval and restart the deadline from `now_ms`.
    pub fn set_interval(&mut self, interval_ms: u64, now_ms: u64) {
        self.interval_ms = interval_ms.max(1);
        if self.frozen.is_some() {
            self.frozen = Some(self.interval_ms);
        } else {
            self.due_ms = now_ms.saturating_add(self.interval_ms);
        }
    }

    /// Restart the deadline without changing the interval.
    pub fn reset(&mut self, now_ms: u64) {
        self.set_interval(self.interval_ms, now_ms);
    }

    /// Freeze or thaw the remaining time. Repeated calls with the same
    /// value are no-ops.
    pub fn set_paused(&mut self, paused: bool, now_ms: u64) {
        match (paused, self.frozen) {
            (true, None) => self.frozen = Some(self.due_ms.saturating_sub(now_ms)),
            (false, Some(left)) => {
                self.due_ms = now_ms.saturating_add(left);
                self.frozen = None;
            }
            _ => {}
        }
    }

    /// `true` when a drop is due. Re-arms on firing.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        if self.frozen.is_some() || now_ms < self.due_ms {
            return false;
        }
        self.due_ms = now_ms.saturating_add(self.interval_ms);
        true
    }

    /// How long the caller may block waiting for input.
    pub fn timeout_ms(&self, now_ms: u64) -> u64 {
        match self.frozen {
            Some(_) => self.interval_ms,
            None => self.due_ms.saturating_sub(now_ms),
        }
    }
}
