//! Reductions from a week-filtered record set to chart-ready numbers.
//!
//! Aggregates are recomputed from the full filtered set on every call;
//! nothing here is incrementally maintained, so a snapshot that picked
//! up new records between two renders always aggregates correctly.
//! Zero records always produce all-zero output.

use std::collections::HashMap;

use chrono::{Datelike, Weekday};

use crate::report::TimedSession;
use crate::types::{Mood, MoodRecord, PracticeRecord, TaskRecord, TaskStatus};

/// Sum session durations per weekday.
///
/// Days with no sessions are absent from the map; the chart projector
/// fills them with zero.
pub fn duration_by_weekday<'a, T, I>(sessions: I) -> HashMap<Weekday, f64>
where
    T: TimedSession + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut totals = HashMap::new();
    for session in sessions {
        *totals.entry(session.session_date().weekday()).or_insert(0.0) +=
            session.duration_minutes();
    }
    totals
}

/// Best observed score per game discriminator.
///
/// Unscored sessions contribute nothing; a game with no scored sessions
/// has no entry.
pub fn best_scores<'a, I>(practices: I) -> HashMap<String, u32>
where
    I: IntoIterator<Item = &'a PracticeRecord>,
{
    let mut best: HashMap<String, u32> = HashMap::new();
    for practice in practices {
        if let Some(score) = practice.score {
            best.entry(practice.game.clone())
                .and_modify(|b| *b = (*b).max(score))
                .or_insert(score);
        }
    }
    best
}

/// Best score per weekday, per game discriminator, for the score chart.
pub fn best_score_by_weekday<'a, I>(practices: I) -> HashMap<String, HashMap<Weekday, u32>>
where
    I: IntoIterator<Item = &'a PracticeRecord>,
{
    let mut best: HashMap<String, HashMap<Weekday, u32>> = HashMap::new();
    for practice in practices {
        if let Some(score) = practice.score {
            best.entry(practice.game.clone())
                .or_default()
                .entry(practice.meta.date.weekday())
                .and_modify(|b| *b = (*b).max(score))
                .or_insert(score);
        }
    }
    best
}

/// Count tasks per status, zero-seeded over the whole enumeration so an
/// unseen status reads as zero instead of being missing.
pub fn status_counts<'a, I>(tasks: I) -> Vec<(TaskStatus, usize)>
where
    I: IntoIterator<Item = &'a TaskRecord>,
{
    let mut counts: Vec<(TaskStatus, usize)> =
        TaskStatus::ALL.iter().map(|s| (*s, 0)).collect();
    for task in tasks {
        if let Some(slot) = counts.iter_mut().find(|(s, _)| *s == task.status) {
            slot.1 += 1;
        }
    }
    counts
}

/// Count mood check-ins per mood category, zero-seeded over the scale.
pub fn mood_counts<'a, I>(moods: I) -> Vec<(Mood, usize)>
where
    I: IntoIterator<Item = &'a MoodRecord>,
{
    let mut counts: Vec<(Mood, usize)> = Mood::ALL.iter().map(|m| (*m, 0)).collect();
    for record in moods {
        if let Some(slot) = counts.iter_mut().find(|(m, _)| *m == record.mood) {
            slot.1 += 1;
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RecordMeta;
    use crate::week::monday_of;
    use chrono::NaiveDate;

    fn meta(id: &str, y: i32, m: u32, d: u32) -> RecordMeta {
        let date = NaiveDate::from_ymd_opt(y, m, d).unwrap();
        RecordMeta {
            id: id.to_string(),
            date,
            week_commencing: monday_of(date),
        }
    }

    // `day` is an offset from Monday 27/05/2024.
    fn practice(id: &str, day: u64, game: &str, minutes: f64, score: Option<u32>) -> PracticeRecord {
        let date = NaiveDate::from_ymd_opt(2024, 5, 27).unwrap() + chrono::Days::new(day);
        PracticeRecord {
            meta: RecordMeta {
                id: id.to_string(),
                date,
                week_commencing: monday_of(date),
            },
            game: game.to_string(),
            duration_minutes: minutes,
            score,
        }
    }

    #[test]
    fn sums_durations_per_weekday() {
        let sessions = vec![
            practice("1", 0, "Secret Word", 3.0, None), // Monday
            practice("2", 0, "Secret Word", 2.5, None), // Monday
            practice("3", 2, "Secret Word", 4.0, None), // Wednesday
        ];

        let totals = duration_by_weekday(sessions.iter());
        assert_eq!(totals.len(), 2);
        assert_eq!(totals[&Weekday::Mon], 5.5);
        assert_eq!(totals[&Weekday::Wed], 4.0);
        assert!(!totals.contains_key(&Weekday::Tue));
    }

    #[test]
    fn best_score_is_the_week_maximum_per_game() {
        let sessions = vec![
            practice("1", 0, "Reaction Test", 1.0, Some(40)),
            practice("2", 1, "Reaction Test", 1.0, Some(55)),
            practice("3", 2, "Reaction Test", 1.0, Some(30)),
            practice("4", 2, "Secret Word", 1.0, Some(12)),
            practice("5", 3, "Secret Word", 1.0, None),
        ];

        let best = best_scores(sessions.iter());
        assert_eq!(best["Reaction Test"], 55);
        assert_eq!(best["Secret Word"], 12);
    }

    #[test]
    fn best_score_recomputes_after_a_merge() {
        let mut sessions = vec![practice("1", 0, "Reaction Test", 1.0, Some(40))];
        assert_eq!(best_scores(sessions.iter())["Reaction Test"], 40);

        // A record merged upstream between renders lands in the next
        // snapshot and the derived best moves with it.
        sessions.push(practice("2", 1, "Reaction Test", 1.0, Some(70)));
        assert_eq!(best_scores(sessions.iter())["Reaction Test"], 70);
    }

    #[test]
    fn per_weekday_best_scores() {
        let sessions = vec![
            practice("1", 0, "Reaction Test", 1.0, Some(40)),
            practice("2", 0, "Reaction Test", 1.0, Some(55)),
            practice("3", 6, "Reaction Test", 1.0, Some(30)), // Sunday
        ];

        let by_day = best_score_by_weekday(sessions.iter());
        let reaction = &by_day["Reaction Test"];
        assert_eq!(reaction[&Weekday::Mon], 55);
        assert_eq!(reaction[&Weekday::Sun], 30);
        assert!(!reaction.contains_key(&Weekday::Tue));
    }

    #[test]
    fn status_counts_are_zero_seeded() {
        let tasks = vec![TaskRecord {
            meta: meta("1", 2024, 6, 1),
            name: "Walk".to_string(),
            details: None,
            status: TaskStatus::Completed,
            deadline: "01/06/2024, 5:00 pm".to_string(),
        }];

        let counts = status_counts(tasks.iter());
        assert_eq!(counts.len(), TaskStatus::ALL.len());
        assert_eq!(
            counts,
            vec![
                (TaskStatus::Created, 0),
                (TaskStatus::Started, 0),
                (TaskStatus::InProgress, 0),
                (TaskStatus::Completed, 1),
            ]
        );
    }

    #[test]
    fn empty_input_aggregates_to_zero_everywhere() {
        let no_sessions: Vec<PracticeRecord> = vec![];
        assert!(duration_by_weekday(no_sessions.iter()).is_empty());
        assert!(best_scores(no_sessions.iter()).is_empty());

        let no_tasks: Vec<TaskRecord> = vec![];
        assert!(status_counts(no_tasks.iter()).iter().all(|(_, n)| *n == 0));

        let no_moods: Vec<MoodRecord> = vec![];
        assert!(mood_counts(no_moods.iter()).iter().all(|(_, n)| *n == 0));
    }
}
