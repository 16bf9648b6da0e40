use std::time::Instant;

use crate::prelude::*;

pub mod tracing;

pub fn format_duration(duration: StdDuration) -> String {
    humantime::format_duration(duration).to_string()
}

/// Formats the time elapsed since the instant, rounded down to milliseconds.
pub fn format_elapsed(instant: Instant) -> String {
    let elapsed = instant.elapsed();
    format_duration(StdDuration::from_millis(elapsed.as_millis() as u64))
}
