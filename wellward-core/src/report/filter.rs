//! Week-scoped record selection.

use serde::{Deserialize, Serialize};

use crate::types::{ActivityRecord, RecordCollection};
use crate::week::WeekWindow;

/// How records are matched against the selected week.
///
/// The two report surfaces have historically used different predicates,
/// and both are kept as distinct modes rather than silently unified:
/// the patient-facing report matches every record stamped with this
/// week's Monday *or any later one*, while the clinician-facing report
/// matches only records whose own date falls inside the closed
/// Monday-to-Sunday range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeekFilterMode {
    /// `week_commencing >= monday`, no upper bound (patient report)
    FromWeekOnward,
    /// `monday <= date <= sunday` (clinician report)
    WithinWeek,
}

impl WeekFilterMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeekFilterMode::FromWeekOnward => "from_week_onward",
            WeekFilterMode::WithinWeek => "within_week",
        }
    }

    /// Whether one record matches the window under this mode.
    pub fn matches(&self, record: &ActivityRecord, window: &WeekWindow) -> bool {
        match self {
            WeekFilterMode::FromWeekOnward => record.week_commencing() >= window.monday,
            WeekFilterMode::WithinWeek => window.contains(record.date()),
        }
    }
}

impl std::fmt::Display for WeekFilterMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Select the records belonging to `window` under `mode`, in creation
/// order. Applying the same selection again is a no-op.
pub fn select_week<'a>(
    collection: &'a RecordCollection,
    window: &WeekWindow,
    mode: WeekFilterMode,
) -> Vec<&'a ActivityRecord> {
    collection
        .in_creation_order()
        .into_iter()
        .filter(|record| mode.matches(record, window))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ActivityKind, Mood, MoodRecord, RecordMeta};
    use crate::week::monday_of;
    use chrono::NaiveDate;

    fn mood(id: &str, y: i32, m: u32, d: u32) -> ActivityRecord {
        let date = NaiveDate::from_ymd_opt(y, m, d).unwrap();
        ActivityRecord::Mood(MoodRecord {
            meta: RecordMeta {
                id: id.to_string(),
                date,
                week_commencing: monday_of(date),
            },
            mood: Mood::Neutral,
        })
    }

    fn collection(records: Vec<ActivityRecord>) -> RecordCollection {
        let mut c = RecordCollection::new(ActivityKind::Mood);
        for r in records {
            c.insert(r).unwrap();
        }
        c
    }

    #[test]
    fn closed_mode_matches_only_the_selected_week() {
        let c = collection(vec![
            mood("1", 2024, 5, 26), // Sunday of the previous week
            mood("2", 2024, 5, 27), // Monday
            mood("3", 2024, 6, 2),  // Sunday
            mood("4", 2024, 6, 3),  // next Monday
        ]);
        let window = WeekWindow::containing(NaiveDate::from_ymd_opt(2024, 5, 29).unwrap());

        let ids: Vec<_> = select_week(&c, &window, WeekFilterMode::WithinWeek)
            .iter()
            .map(|r| r.id().to_string())
            .collect();
        assert_eq!(ids, ["2", "3"]);
    }

    #[test]
    fn open_mode_includes_future_weeks() {
        let c = collection(vec![
            mood("1", 2024, 5, 26),
            mood("2", 2024, 5, 27),
            mood("3", 2024, 6, 5), // the following week
        ]);
        let window = WeekWindow::containing(NaiveDate::from_ymd_opt(2024, 5, 29).unwrap());

        let ids: Vec<_> = select_week(&c, &window, WeekFilterMode::FromWeekOnward)
            .iter()
            .map(|r| r.id().to_string())
            .collect();
        assert_eq!(ids, ["2", "3"]);
    }

    #[test]
    fn the_two_modes_stay_distinguishable() {
        // A record one week in the future is the distinguishing case.
        let c = collection(vec![mood("future", 2024, 6, 5)]);
        let window = WeekWindow::containing(NaiveDate::from_ymd_opt(2024, 5, 29).unwrap());

        assert_eq!(
            select_week(&c, &window, WeekFilterMode::FromWeekOnward).len(),
            1
        );
        assert_eq!(select_week(&c, &window, WeekFilterMode::WithinWeek).len(), 0);
    }

    #[test]
    fn selection_is_idempotent() {
        let c = collection(vec![mood("1", 2024, 5, 27), mood("2", 2024, 6, 10)]);
        let window = WeekWindow::containing(NaiveDate::from_ymd_opt(2024, 5, 29).unwrap());

        let once = select_week(&c, &window, WeekFilterMode::WithinWeek);
        let mut reselected = RecordCollection::new(ActivityKind::Mood);
        for r in &once {
            reselected.insert((*r).clone()).unwrap();
        }
        let twice = select_week(&reselected, &window, WeekFilterMode::WithinWeek);
        assert_eq!(once.len(), twice.len());
    }

    #[test]
    fn empty_collection_selects_nothing() {
        let c = RecordCollection::new(ActivityKind::Mood);
        let window = WeekWindow::containing(NaiveDate::from_ymd_opt(2024, 5, 29).unwrap());
        assert!(select_week(&c, &window, WeekFilterMode::WithinWeek).is_empty());
        assert!(select_week(&c, &window, WeekFilterMode::FromWeekOnward).is_empty());
    }
}
