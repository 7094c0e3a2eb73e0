//! Formatting helpers shared across report front ends.

/// Format a duration in fractional minutes as `M:SS`
/// (3.5 minutes renders as "3:30").
pub fn format_minutes_seconds(minutes: f64) -> String {
    let whole = minutes.floor();
    let seconds = ((minutes - whole) * 60.0).round() as u32;
    // Fractions that round up to a full minute carry into the minute part
    if seconds >= 60 {
        format!("{}:00", whole as u64 + 1)
    } else {
        format!("{}:{:02}", whole as u64, seconds)
    }
}

/// Format a duration total for a report heading (e.g. "1h 15m", "45m").
pub fn format_duration_minutes(minutes: f64) -> String {
    let total = minutes.round() as u64;
    let hours = total / 60;
    let mins = total % 60;
    if hours > 0 {
        format!("{}h {}m", hours, mins)
    } else {
        format!("{}m", mins)
    }
}
