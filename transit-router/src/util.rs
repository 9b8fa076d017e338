//! Small shared utilities.

use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Gate that lets at most one event through per period.
///
/// Used to rate-limit warnings emitted from per-candidate code, where
/// one data defect would otherwise flood the log.
#[derive(Debug)]
pub struct LogThrottle {
    period: Duration,
    last: Mutex<Option<Instant>>,
}

impl LogThrottle {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            last: Mutex::new(None),
        }
    }

    /// True if the caller may log now; advances the gate when it does.
    pub fn allow(&self) -> bool {
        let mut last = match self.last.lock() {
            Ok(guard) => guard,
            // A poisoned gate only affects logging; fail open.
            Err(poisoned) => poisoned.into_inner(),
        };
        let now = Instant::now();
        match *last {
            Some(previous) if now.duration_since(previous) < self.period => false,
            _ => {
                *last = Some(now);
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_event_passes() {
        let throttle = LogThrottle::new(Duration::from_secs(60));
        assert!(throttle.allow());
    }

    #[test]
    fn second_event_within_period_is_blocked() {
        let throttle = LogThrottle::new(Duration::from_secs(60));
        assert!(throttle.allow());
        assert!(!throttle.allow());
        assert!(!throttle.allow());
    }

    #[test]
    fn zero_period_never_blocks() {
        let throttle = LogThrottle::new(Duration::ZERO);
        assert!(throttle.allow());
        assert!(throttle.allow());
    }
}
