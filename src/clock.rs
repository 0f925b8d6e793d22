//! Wall-clock timestamps and process uptime.

use std::time::{Duration, Instant};

use chrono::{SecondsFormat, Utc};

/// Current UTC time as RFC 3339 with millisecond precision, e.g.
/// `2024-05-01T12:30:00.123Z`.
pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Start time of the service, used for uptime reporting.
///
/// Backed by a monotonic clock, so uptime never goes backwards even if the
/// system time is adjusted.
#[derive(Debug, Clone, Copy)]
pub struct ServiceClock {
    started: Instant,
}

impl ServiceClock {
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    pub fn uptime(&self) -> Duration {
        self.started.elapsed()
    }

    /// Uptime in fractional seconds.
    pub fn uptime_secs(&self) -> f64 {
        self.uptime().as_secs_f64()
    }
}

impl Default for ServiceClock {
    fn default() -> Self {
        Self::start()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_format() {
        let ts = now_rfc3339();
        assert!(ts.ends_with('Z'));
        assert!(chrono::DateTime::parse_from_rfc3339(&ts).is_ok());
        // yyyy-mm-ddThh:mm:ss.mmmZ
        assert_eq!(ts.len(), 24);
    }

    #[test]
    fn test_uptime_is_monotonic() {
        let clock = ServiceClock::start();
        let first = clock.uptime_secs();
        std::thread::sleep(Duration::from_millis(5));
        let second = clock.uptime_secs();
        assert!(second >= first);
        assert!(second > 0.0);
    }
}
