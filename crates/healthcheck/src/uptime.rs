use std::fmt::Write;
use std::time::{Duration, Instant};

/// The moment the process started serving, on a monotonic clock
///
/// Captured once in `main` and handed to the health state; copies all refer
/// to the same instant.
#[derive(Debug, Clone, Copy)]
pub struct StartTime(Instant);

impl StartTime {
    /// Capture the current instant
    pub fn now() -> Self {
        Self(Instant::now())
    }

    /// Use an instant captured elsewhere
    pub fn at(instant: Instant) -> Self {
        Self(instant)
    }

    /// Time elapsed since the start, never negative
    pub fn elapsed(&self) -> Duration {
        self.0.elapsed()
    }

    /// Elapsed time rounded to whole seconds, e.g. `3m7s`
    pub fn uptime(&self) -> String {
        format_uptime(self.elapsed())
    }
}

/// Render a duration as `0s`, `42s`, `3m7s` or `26h0m5s`
///
/// Rounds to the nearest second, halves away from zero. Hours are not folded
/// into days.
pub(crate) fn format_uptime(elapsed: Duration) -> String {
    let mut seconds = elapsed.as_secs();
    if elapsed.subsec_nanos() >= 500_000_000 {
        seconds += 1;
    }

    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let seconds = seconds % 60;

    let mut out = String::new();

    if hours > 0 {
        let _ = write!(out, "{hours}h{minutes}m");
    } else if minutes > 0 {
        let _ = write!(out, "{minutes}m");
    }

    let _ = write!(out, "{seconds}s");
    out
}
