//! Assembly of the section-keyed weekly report.
//!
//! One build walks every activity collection once: week-filter, then
//! aggregate and project for the chart sections, then sort for the
//! table views. A section whose underlying aggregate has no
//! contributing records is `None` and is not rendered at all.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::error::Result;
use crate::report::aggregate::{
    best_score_by_weekday, best_scores, duration_by_weekday, mood_counts, status_counts,
};
use crate::report::chart::{breakdown, week_series, PieSlice, WeekSeries};
use crate::report::filter::{select_week, WeekFilterMode};
use crate::report::sort::{sort_journals, sort_sessions, sort_tasks, SortOutcome};
use crate::store::RecordStore;
use crate::types::{
    ActivityKind, BreathingRecord, JournalRecord, MeditationRecord, PracticeRecord,
    RecordCollection, TaskRecord,
};
use crate::week::WeekWindow;

/// Point-in-time copies of every activity collection for one patient.
///
/// One snapshot backs one report build; replacing it between builds is
/// the collaborator's business and never tears a single build.
#[derive(Debug, Clone)]
pub struct WeeklySnapshot {
    pub mood: RecordCollection,
    pub tasks: RecordCollection,
    pub practice: RecordCollection,
    pub meditation: RecordCollection,
    pub breathing: RecordCollection,
    pub journal: RecordCollection,
}

impl WeeklySnapshot {
    /// Snapshot all six collections for `patient_id`.
    pub fn load(store: &dyn RecordStore, patient_id: &str) -> Result<Self> {
        Ok(Self {
            mood: store.snapshot(patient_id, ActivityKind::Mood)?,
            tasks: store.snapshot(patient_id, ActivityKind::Task)?,
            practice: store.snapshot(patient_id, ActivityKind::GamePractice)?,
            meditation: store.snapshot(patient_id, ActivityKind::Meditation)?,
            breathing: store.snapshot(patient_id, ActivityKind::DeepBreathing)?,
            journal: store.snapshot(patient_id, ActivityKind::Journal)?,
        })
    }
}

/// The chart series and sorted tables for one patient-week.
///
/// Chart sections are `None` when no record contributed to them; the
/// front end renders only the sections that are present.
#[derive(Debug)]
pub struct WeeklyReport {
    pub window: WeekWindow,
    pub mode: WeekFilterMode,

    // Chart sections
    pub mood_by_category: Option<Vec<PieSlice>>,
    pub tasks_by_status: Option<Vec<PieSlice>>,
    pub practice_duration_by_weekday: Option<WeekSeries>,
    pub practice_score_by_weekday: Option<HashMap<String, WeekSeries>>,
    pub meditation_duration_by_weekday: Option<WeekSeries>,
    pub breathing_duration_by_weekday: Option<WeekSeries>,

    /// Week-best score per game, re-derived on every build
    pub practice_best_scores: HashMap<String, u32>,

    // Table views
    pub tasks_by_deadline: SortOutcome<TaskRecord>,
    pub journal_entries: SortOutcome<JournalRecord>,
    pub practice_sessions: Vec<PracticeRecord>,
    pub meditation_sessions: Vec<MeditationRecord>,
    pub breathing_sessions: Vec<BreathingRecord>,
}

impl WeeklyReport {
    /// Build the report for the week containing `reference_date`.
    pub fn build(snapshot: &WeeklySnapshot, reference_date: NaiveDate, mode: WeekFilterMode) -> Self {
        let window = WeekWindow::containing(reference_date);

        let moods: Vec<_> = select_week(&snapshot.mood, &window, mode)
            .into_iter()
            .filter_map(|r| r.as_mood())
            .cloned()
            .collect();
        let tasks: Vec<_> = select_week(&snapshot.tasks, &window, mode)
            .into_iter()
            .filter_map(|r| r.as_task())
            .cloned()
            .collect();
        let practice: Vec<_> = select_week(&snapshot.practice, &window, mode)
            .into_iter()
            .filter_map(|r| r.as_practice())
            .cloned()
            .collect();
        let meditation: Vec<_> = select_week(&snapshot.meditation, &window, mode)
            .into_iter()
            .filter_map(|r| r.as_meditation())
            .cloned()
            .collect();
        let breathing: Vec<_> = select_week(&snapshot.breathing, &window, mode)
            .into_iter()
            .filter_map(|r| r.as_breathing())
            .cloned()
            .collect();
        let journal: Vec<_> = select_week(&snapshot.journal, &window, mode)
            .into_iter()
            .filter_map(|r| r.as_journal())
            .cloned()
            .collect();

        let mood_by_category = if moods.is_empty() {
            None
        } else {
            let counts: Vec<(&str, usize)> = mood_counts(moods.iter())
                .into_iter()
                .map(|(mood, n)| (mood.label(), n))
                .collect();
            Some(breakdown(&counts))
        };

        let tasks_by_status = if tasks.is_empty() {
            None
        } else {
            let counts: Vec<(&str, usize)> = status_counts(tasks.iter())
                .into_iter()
                .map(|(status, n)| (status.as_str(), n))
                .collect();
            Some(breakdown(&counts))
        };

        let practice_duration_by_weekday = if practice.is_empty() {
            None
        } else {
            Some(week_series(&duration_by_weekday(practice.iter())))
        };

        let score_maps = best_score_by_weekday(practice.iter());
        let practice_score_by_weekday = if score_maps.is_empty() {
            None
        } else {
            Some(
                score_maps
                    .into_iter()
                    .map(|(game, by_day)| (game, week_series(&by_day)))
                    .collect(),
            )
        };

        let meditation_duration_by_weekday = if meditation.is_empty() {
            None
        } else {
            Some(week_series(&duration_by_weekday(meditation.iter())))
        };

        let breathing_duration_by_weekday = if breathing.is_empty() {
            None
        } else {
            Some(week_series(&duration_by_weekday(breathing.iter())))
        };

        Self {
            window,
            mode,
            mood_by_category,
            tasks_by_status,
            practice_duration_by_weekday,
            practice_score_by_weekday,
            meditation_duration_by_weekday,
            breathing_duration_by_weekday,
            practice_best_scores: best_scores(practice.iter()),
            tasks_by_deadline: sort_tasks(tasks),
            journal_entries: sort_journals(journal),
            practice_sessions: sort_sessions(practice),
            meditation_sessions: sort_sessions(meditation),
            breathing_sessions: sort_sessions(breathing),
        }
    }

    /// Snapshot the store and build in one step.
    pub fn for_patient(
        store: &dyn RecordStore,
        patient_id: &str,
        reference_date: NaiveDate,
        mode: WeekFilterMode,
    ) -> Result<Self> {
        let snapshot = WeeklySnapshot::load(store, patient_id)?;
        Ok(Self::build(&snapshot, reference_date, mode))
    }

    /// Names of the chart sections that would render, in layout order.
    pub fn rendered_sections(&self) -> Vec<&'static str> {
        let mut sections = Vec::new();
        if self.mood_by_category.is_some() {
            sections.push("mood-by-category");
        }
        if self.tasks_by_status.is_some() {
            sections.push("tasks-by-status");
        }
        if self.practice_duration_by_weekday.is_some() {
            sections.push("practice-duration-by-weekday");
        }
        if self.practice_score_by_weekday.is_some() {
            sections.push("practice-score-by-weekday");
        }
        if self.meditation_duration_by_weekday.is_some() {
            sections.push("meditation-duration-by-weekday");
        }
        if self.breathing_duration_by_weekday.is_some() {
            sections.push("breathing-duration-by-weekday");
        }
        sections
    }
}
