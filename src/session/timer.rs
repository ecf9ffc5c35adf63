use std::time::{Duration, Instant};

/// Wall-clock countdown for timed sessions. Time is always passed in so the
/// caller's event loop decides when to check it.
#[derive(Clone, Debug)]
pub struct Countdown {
    limit: Duration,
    started_at: Option<Instant>,
    stopped_at: Option<Instant>,
}

impl Countdown {
    pub fn new(limit: Duration) -> Self {
        Self {
            limit,
            started_at: None,
            stopped_at: None,
        }
    }

    pub fn limit(&self) -> Duration {
        self.limit
    }

    pub fn start(&mut self, now: Instant) {
        self.started_at = Some(now);
        self.stopped_at = None;
    }

    pub fn stop(&mut self, now: Instant) {
        if self.is_running() {
            self.stopped_at = Some(now);
        }
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some() && self.stopped_at.is_none()
    }

    pub fn elapsed(&self, now: Instant) -> Duration {
        let elapsed = match (self.started_at, self.stopped_at) {
            (Some(start), Some(end)) => end.saturating_duration_since(start),
            (Some(start), None) => now.saturating_duration_since(start),
            _ => Duration::ZERO,
        };
        elapsed.min(self.limit)
    }

    pub fn remaining(&self, now: Instant) -> Duration {
        self.limit.saturating_sub(self.elapsed(now))
    }

    /// Only a running countdown can expire.
    pub fn is_expired(&self, now: Instant) -> bool {
        self.is_running() && self.remaining(now).is_zero()
    }
}

/// `mm:ss` for display.
pub fn format_clock(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_started_never_expires() {
        let countdown = Countdown::new(Duration::from_secs(10));
        let now = Instant::now();
        assert!(!countdown.is_expired(now + Duration::from_secs(60)));
        assert_eq!(countdown.remaining(now), Duration::from_secs(10));
    }

    #[test]
    fn test_expires_at_limit() {
        let t0 = Instant::now();
        let mut countdown = Countdown::new(Duration::from_secs(10));
        countdown.start(t0);
        assert!(!countdown.is_expired(t0 + Duration::from_secs(9)));
        assert_eq!(countdown.remaining(t0 + Duration::from_secs(4)), Duration::from_secs(6));
        assert!(countdown.is_expired(t0 + Duration::from_secs(10)));
        assert_eq!(countdown.elapsed(t0 + Duration::from_secs(99)), Duration::from_secs(10));
    }

    #[test]
    fn test_stopped_countdown_freezes() {
        let t0 = Instant::now();
        let mut countdown = Countdown::new(Duration::from_secs(10));
        countdown.start(t0);
        countdown.stop(t0 + Duration::from_secs(3));
        assert!(!countdown.is_running());
        assert!(!countdown.is_expired(t0 + Duration::from_secs(30)));
        assert_eq!(countdown.elapsed(t0 + Duration::from_secs(30)), Duration::from_secs(3));
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(Duration::from_secs(300)), "05:00");
        assert_eq!(format_clock(Duration::from_secs(61)), "01:01");
    }
}
