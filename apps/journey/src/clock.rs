//! Wall-clock and monotonic time for the terminal front-end.

use chrono::{DateTime, Datelike, Local, TimeZone};
use journey_core::{Clock, Millis};
use tokio::time::Instant;

/// Calendar facts from the local system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn current_year(&self) -> i32 {
        Local::now().year()
    }

    fn timestamp(&self) -> String {
        format_timestamp(&Local::now())
    }
}

/// `10/16/2026, 9:05:03 AM` style timestamp.
pub fn format_timestamp<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
}

/// Logical journey time: milliseconds since the loop started.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicTime {
    origin: Instant,
}

impl MonotonicTime {
    #[must_use]
    pub fn start() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    #[must_use]
    pub fn now(&self) -> Millis {
        let elapsed = self.origin.elapsed().as_millis();
        Millis(u64::try_from(elapsed).unwrap_or(u64::MAX))
    }
}
