// src/util/debounce.rs

//! Tick-polled debouncing. Rapid toggling arms the debouncer over and over;
//! only the most recent arm within the window fires, from the main loop's
//! tick handler, so layout work coalesces instead of accumulating.

use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct Debouncer {
    window: Duration,
    armed_at: Option<Instant>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            armed_at: None,
        }
    }

    /// Starts (or restarts) the window. A later arm supersedes a pending one
    /// rather than queueing a second firing.
    pub fn arm(&mut self) {
        self.armed_at = Some(Instant::now());
    }

    pub fn is_armed(&self) -> bool {
        self.armed_at.is_some()
    }

    /// Returns `true` once per arm, after the window has elapsed. Firing
    /// clears the pending state.
    pub fn fire(&mut self) -> bool {
        match self.armed_at {
            Some(at) if at.elapsed() >= self.window => {
                self.armed_at = None;
                true
            }
            _ => false,
        }
    }

    /// Drops any pending firing without running it.
    pub fn cancel(&mut self) {
        self.armed_at = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_after_window() {
        let mut d = Debouncer::new(Duration::ZERO);
        assert!(!d.fire(), "unarmed debouncer never fires");
        d.arm();
        assert!(d.is_armed());
        assert!(d.fire());
        assert!(!d.fire(), "firing clears the pending state");
    }

    #[test]
    fn rearm_supersedes_pending() {
        let mut d = Debouncer::new(Duration::from_millis(50));
        d.arm();
        d.arm();
        // window not elapsed: nothing fires yet
        assert!(!d.fire());
        assert!(d.is_armed());
    }

    #[test]
    fn cancel_clears_pending() {
        let mut d = Debouncer::new(Duration::ZERO);
        d.arm();
        d.cancel();
        assert!(!d.fire());
    }
}
