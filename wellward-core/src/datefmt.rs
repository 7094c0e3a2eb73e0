//! Parsing and display for the textual date/time grammar used by
//! activity records.
//!
//! Producers write dates as `DD/MM/YYYY`, task deadlines as
//! `DD/MM/YYYY, HH:MM am|pm`, and journal times as 24-hour `HH:MM`.
//! Anything that fails these grammars is a hard [`Error::MalformedDate`];
//! callers decide whether to drop the row or abort.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::{Error, Result};

/// Parse a `DD/MM/YYYY` calendar date.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    let trimmed = s.trim();
    NaiveDate::parse_from_str(trimmed, "%d/%m/%Y")
        .map_err(|e| Error::malformed_date(s, format!("expected DD/MM/YYYY: {}", e)))
}

/// Format a date back to `DD/MM/YYYY`, the form records are stamped with.
pub fn format_date(date: NaiveDate) -> String {
    format!("{:02}/{:02}/{:04}", date.day(), date.month(), date.year())
}

/// Parse a `DD/MM/YYYY, HH:MM am|pm` deadline into a date-time.
///
/// 12-hour clock conversion: `12am` is hour 0, `12pm` stays 12, any other
/// `pm` hour gains 12.
pub fn parse_date_time(s: &str) -> Result<NaiveDateTime> {
    let (date_part, time_part) = s
        .split_once(',')
        .ok_or_else(|| Error::malformed_date(s, "expected 'DD/MM/YYYY, HH:MM am|pm'"))?;

    let date = parse_date(date_part)?;
    let time = parse_clock_12h(time_part.trim()).map_err(|_| {
        Error::malformed_date(s, "expected 12-hour time 'HH:MM am|pm' after the comma")
    })?;
    Ok(date.and_time(time))
}

/// Parse a 12-hour `HH:MM am|pm` clock time.
pub fn parse_clock_12h(s: &str) -> Result<NaiveTime> {
    let trimmed = s.trim();
    let (clock, meridiem) = trimmed
        .rsplit_once(' ')
        .ok_or_else(|| Error::malformed_date(s, "expected 'HH:MM am|pm'"))?;

    let is_pm = match meridiem.to_ascii_lowercase().as_str() {
        "am" => false,
        "pm" => true,
        other => {
            return Err(Error::malformed_date(
                s,
                format!("expected am or pm, got {:?}", other),
            ))
        }
    };

    let (hour_s, minute_s) = clock
        .split_once(':')
        .ok_or_else(|| Error::malformed_date(s, "expected 'HH:MM'"))?;
    let hour: u32 = hour_s
        .trim()
        .parse()
        .map_err(|_| Error::malformed_date(s, "hour is not a number"))?;
    let minute: u32 = minute_s
        .trim()
        .parse()
        .map_err(|_| Error::malformed_date(s, "minute is not a number"))?;

    if !(1..=12).contains(&hour) {
        return Err(Error::malformed_date(s, "12-hour clock hour must be 1-12"));
    }

    let hour24 = match (hour, is_pm) {
        (12, false) => 0,
        (12, true) => 12,
        (h, false) => h,
        (h, true) => h + 12,
    };

    NaiveTime::from_hms_opt(hour24, minute, 0)
        .ok_or_else(|| Error::malformed_date(s, "minute out of range"))
}

/// Parse a 24-hour `HH:MM` clock time.
pub fn parse_clock(s: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(s.trim(), "%H:%M")
        .map_err(|e| Error::malformed_date(s, format!("expected 24-hour HH:MM: {}", e)))
}

/// Short weekday label for chart axes ("Mon".."Sun").
pub fn weekday_label(date: NaiveDate) -> &'static str {
    match date.weekday() {
        chrono::Weekday::Mon => "Mon",
        chrono::Weekday::Tue => "Tue",
        chrono::Weekday::Wed => "Wed",
        chrono::Weekday::Thu => "Thu",
        chrono::Weekday::Fri => "Fri",
        chrono::Weekday::Sat => "Sat",
        chrono::Weekday::Sun => "Sun",
    }
}
