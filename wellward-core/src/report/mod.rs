//! Weekly reporting pipeline
//!
//! Data flows store snapshot → [`filter`] (by selected week) → the
//! [`sort`] comparators for table ordering and [`aggregate`] →
//! [`chart`] for chart series. [`weekly`] assembles the section-keyed
//! report both front ends render.
//!
//! Everything here is a pure function of an immutable snapshot:
//! recomputation happens on every view, nothing is cached between calls.

use chrono::NaiveDate;

use crate::types::{BreathingRecord, MeditationRecord, PracticeRecord};

pub mod aggregate;
pub mod chart;
pub mod filter;
pub mod sort;
pub mod weekly;

pub use aggregate::{best_score_by_weekday, best_scores, duration_by_weekday, mood_counts, status_counts};
pub use chart::{breakdown, category_color, percentage, week_series, PieSlice, WeekSeries, WEEKDAY_LABELS};
pub use filter::{select_week, WeekFilterMode};
pub use sort::{
    date_then_duration_desc, date_then_time, deadline_then_name, sort_journals, sort_sessions,
    sort_tasks, DateDurationKey, DateTimeKey, DeadlineKey, RejectedRow, SortOutcome,
};
pub use weekly::{WeeklyReport, WeeklySnapshot};

/// A record representing a timed activity session, aggregated per
/// weekday and sorted longest-first within a day.
pub trait TimedSession {
    fn session_date(&self) -> NaiveDate;
    fn duration_minutes(&self) -> f64;
}

impl TimedSession for PracticeRecord {
    fn session_date(&self) -> NaiveDate {
        self.meta.date
    }

    fn duration_minutes(&self) -> f64 {
        self.duration_minutes
    }
}

impl TimedSession for MeditationRecord {
    fn session_date(&self) -> NaiveDate {
        self.meta.date
    }

    fn duration_minutes(&self) -> f64 {
        self.duration_minutes
    }
}

impl TimedSession for BreathingRecord {
    fn session_date(&self) -> NaiveDate {
        self.meta.date
    }

    fn duration_minutes(&self) -> f64 {
        self.duration_minutes
    }
}
