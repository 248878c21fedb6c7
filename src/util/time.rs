//! Human readable duration formatting shared by the reply builders.

use chrono::TimeDelta;

/// Splits a duration into whole hours and remaining minutes.
///
/// Negative durations are clamped to zero.
pub fn hours_minutes(duration: TimeDelta) -> (i64, i64) {
    let seconds = duration.num_seconds().max(0);

    (seconds / 3600, (seconds % 3600) / 60)
}

/// Formats a duration as `{h}h {m}m`, always including the hour part.
pub fn format_hours_minutes(duration: TimeDelta) -> String {
    let (hours, minutes) = hours_minutes(duration);

    format!("{}h {}m", hours, minutes)
}

/// Formats a duration as `{h}h {m}m`, or `{m}m` when under an hour.
pub fn format_short(duration: TimeDelta) -> String {
    let (hours, minutes) = hours_minutes(duration);

    if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else {
        format!("{}m", minutes)
    }
}

/// Formats a number of seconds as `{h}h {m}m {s}s`.
pub fn format_hms(total_seconds: i64) -> String {
    let total_seconds = total_seconds.max(0);
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}h {}m {}s", hours, minutes, seconds)
}
