//! Week boundary arithmetic.
//!
//! Every reporting view is scoped to a Monday-through-Sunday week. The
//! functions here are the single source of truth for where a week starts
//! and ends; nothing else in the crate does its own day arithmetic.
//!
//! A Sunday belongs to the week that began six days earlier, not to the
//! week starting the next day. All arithmetic goes through chrono, so
//! month/year rollover and leap days behave correctly.

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Returns the Monday of the week containing `date`.
pub fn monday_of(date: NaiveDate) -> NaiveDate {
    let back = date.weekday().num_days_from_monday() as u64;
    date - Days::new(back)
}

/// Returns the Sunday of the week containing `date`.
pub fn sunday_of(date: NaiveDate) -> NaiveDate {
    monday_of(date) + Days::new(6)
}

/// Returns the seven consecutive calendar dates Monday..Sunday for the
/// week containing `date`.
pub fn week_dates(date: NaiveDate) -> [NaiveDate; 7] {
    let monday = monday_of(date);
    std::array::from_fn(|i| monday + Days::new(i as u64))
}

/// A derived Monday-through-Sunday reporting window.
///
/// Never persisted; recomputed from a reference date whenever the
/// selected week changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekWindow {
    /// The Monday this week commences on
    pub monday: NaiveDate,
    /// The Sunday this week ends on
    pub sunday: NaiveDate,
}

impl WeekWindow {
    /// Build the window containing `date`.
    pub fn containing(date: NaiveDate) -> Self {
        let monday = monday_of(date);
        Self {
            monday,
            sunday: monday + Days::new(6),
        }
    }

    /// Window start as a filter lower bound (Monday 00:00:00).
    pub fn start(&self) -> NaiveDateTime {
        self.monday.and_time(NaiveTime::MIN)
    }

    /// Window end as a filter upper bound (Sunday 23:59:59).
    pub fn end(&self) -> NaiveDateTime {
        self.sunday
            .and_time(NaiveTime::from_hms_opt(23, 59, 59).expect("valid end-of-day time"))
    }

    /// Whether `date` falls inside the closed `[monday, sunday]` range.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.monday <= date && date <= self.sunday
    }

    /// The window for the week immediately before this one.
    pub fn previous(&self) -> Self {
        Self::containing(self.monday - Days::new(7))
    }

    /// The window for the week immediately after this one.
    pub fn next(&self) -> Self {
        Self::containing(self.monday + Days::new(7))
    }
}
