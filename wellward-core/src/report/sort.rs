//! Total orders for the report tables.
//!
//! Three named orders cover every table: task lists by deadline (ties
//! broken by name), journals by date then time of day, and activity
//! sessions by date then duration, longest first.
//!
//! Sort keys are parsed up front; a row whose textual date/time fails
//! the grammar is omitted from the sorted output and reported in
//! [`SortOutcome::rejected`], never coerced into an arbitrary position.
//! All sorts are stable.

use std::cmp::Ordering;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::datefmt::{parse_clock, parse_date_time};
use crate::error::{Error, Result};
use crate::report::TimedSession;
use crate::types::{JournalRecord, TaskRecord};

/// One table row dropped for a malformed sort key.
#[derive(Debug)]
pub struct RejectedRow {
    /// Record id of the dropped row
    pub id: String,
    /// The parse error that disqualified it
    pub error: Error,
}

/// A sorted table: the ordered rows plus the rows that could not be
/// keyed. Callers render `rows` and surface `rejected` as a
/// data-quality note.
#[derive(Debug)]
pub struct SortOutcome<T> {
    pub rows: Vec<T>,
    pub rejected: Vec<RejectedRow>,
}

impl<T> SortOutcome<T> {
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

// ============================================
// Sort keys
// ============================================

/// Key for the task table: parsed deadline, then case-folded name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeadlineKey {
    pub at: NaiveDateTime,
    name_folded: String,
}

impl DeadlineKey {
    /// Parse a task's deadline text into a key.
    pub fn parse(task: &TaskRecord) -> Result<Self> {
        Ok(Self {
            at: parse_date_time(&task.deadline)?,
            name_folded: task.name.to_lowercase(),
        })
    }
}

/// Deadline ascending, ties broken by case-insensitive name.
pub fn deadline_then_name(a: &DeadlineKey, b: &DeadlineKey) -> Ordering {
    a.at.cmp(&b.at).then_with(|| a.name_folded.cmp(&b.name_folded))
}

/// Key for the journal table: record date, then time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateTimeKey {
    pub date: NaiveDate,
    pub time: NaiveTime,
}

impl DateTimeKey {
    /// Parse a journal entry's 24-hour time into a key.
    pub fn parse(journal: &JournalRecord) -> Result<Self> {
        Ok(Self {
            date: journal.meta.date,
            time: parse_clock(&journal.time)?,
        })
    }
}

/// Date ascending, ties broken by time of day ascending.
pub fn date_then_time(a: &DateTimeKey, b: &DateTimeKey) -> Ordering {
    a.date.cmp(&b.date).then_with(|| a.time.cmp(&b.time))
}

/// Key for session tables: record date, then duration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DateDurationKey {
    pub date: NaiveDate,
    pub duration_minutes: f64,
}

impl DateDurationKey {
    pub fn of<T: TimedSession>(session: &T) -> Self {
        Self {
            date: session.session_date(),
            duration_minutes: session.duration_minutes(),
        }
    }
}

/// Date ascending, ties broken by duration descending (longest session
/// first within a day).
pub fn date_then_duration_desc(a: &DateDurationKey, b: &DateDurationKey) -> Ordering {
    a.date
        .cmp(&b.date)
        .then_with(|| b.duration_minutes.total_cmp(&a.duration_minutes))
}

// ============================================
// Sort drivers
// ============================================

/// Stable-sort tasks by [`deadline_then_name`], dropping and reporting
/// rows with malformed deadlines.
pub fn sort_tasks(tasks: Vec<TaskRecord>) -> SortOutcome<TaskRecord> {
    sort_keyed(tasks, DeadlineKey::parse, |t| &t.meta.id, deadline_then_name)
}

/// Stable-sort journal entries by [`date_then_time`], dropping and
/// reporting rows with malformed times.
pub fn sort_journals(journals: Vec<JournalRecord>) -> SortOutcome<JournalRecord> {
    sort_keyed(journals, DateTimeKey::parse, |j| &j.meta.id, date_then_time)
}

/// Stable-sort sessions by [`date_then_duration_desc`]. Session keys
/// are typed, so no row can be rejected.
pub fn sort_sessions<T: TimedSession>(mut sessions: Vec<T>) -> Vec<T> {
    sessions.sort_by(|a, b| {
        date_then_duration_desc(&DateDurationKey::of(a), &DateDurationKey::of(b))
    });
    sessions
}

fn sort_keyed<T, K>(
    items: Vec<T>,
    parse: impl Fn(&T) -> Result<K>,
    id: impl Fn(&T) -> &str,
    cmp: impl Fn(&K, &K) -> Ordering,
) -> SortOutcome<T> {
    let mut keyed: Vec<(K, T)> = Vec::with_capacity(items.len());
    let mut rejected = Vec::new();

    for item in items {
        match parse(&item) {
            Ok(key) => keyed.push((key, item)),
            Err(error) => {
                tracing::warn!(id = id(&item), %error, "dropping row with malformed sort key");
                rejected.push(RejectedRow {
                    id: id(&item).to_string(),
                    error,
                });
            }
        }
    }

    keyed.sort_by(|(a, _), (b, _)| cmp(a, b));

    SortOutcome {
        rows: keyed.into_iter().map(|(_, item)| item).collect(),
        rejected,
    }
}
