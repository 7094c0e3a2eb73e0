//! Core domain types for wellward
//!
//! Activity records are written by the (out-of-scope) activity screens as
//! loosely-typed maps and validated into these tagged variants at the
//! store boundary. Once constructed a record is immutable; the reporting
//! pipeline only ever derives ephemeral views from it.
//!
//! ## Terminology
//!
//! | Term | Definition |
//! |------|------------|
//! | **Patient** | The owner of a record document; identified by an opaque id |
//! | **Activity kind** | One of the record categories (mood, task, game practice, meditation, deep breathing, journal) |
//! | **WeekCommencing** | The Monday stamped onto a record at creation time, naming its reporting week |
//! | **Discriminator** | A secondary key (the game name) used to sub-group practice records |

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{Error, Result};

// ============================================
// Activity Kinds
// ============================================

/// The record categories a patient document holds, one collection each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Mood,
    Task,
    GamePractice,
    Meditation,
    DeepBreathing,
    Journal,
}

impl ActivityKind {
    /// All kinds, in the order report sections are laid out.
    pub const ALL: [ActivityKind; 6] = [
        ActivityKind::Mood,
        ActivityKind::Task,
        ActivityKind::GamePractice,
        ActivityKind::Meditation,
        ActivityKind::DeepBreathing,
        ActivityKind::Journal,
    ];

    /// Returns the identifier used as the top-level document key.
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityKind::Mood => "mood",
            ActivityKind::Task => "task",
            ActivityKind::GamePractice => "game_practice",
            ActivityKind::Meditation => "meditation",
            ActivityKind::DeepBreathing => "deep_breathing",
            ActivityKind::Journal => "journal",
        }
    }

    /// Returns the display name for report headings.
    pub fn display_name(&self) -> &'static str {
        match self {
            ActivityKind::Mood => "Mood Tracker",
            ActivityKind::Task => "Tasks",
            ActivityKind::GamePractice => "Game Practice",
            ActivityKind::Meditation => "Meditation",
            ActivityKind::DeepBreathing => "Deep Breathing",
            ActivityKind::Journal => "Journal",
        }
    }
}

impl std::fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ActivityKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "mood" => Ok(ActivityKind::Mood),
            "task" => Ok(ActivityKind::Task),
            "game_practice" => Ok(ActivityKind::GamePractice),
            "meditation" => Ok(ActivityKind::Meditation),
            "deep_breathing" => Ok(ActivityKind::DeepBreathing),
            "journal" => Ok(ActivityKind::Journal),
            _ => Err(format!("unknown activity kind: {}", s)),
        }
    }
}

// ============================================
// Mood
// ============================================

/// The fixed five-step mood scale, indexed 0..4 from best to worst.
///
/// The landing view renders the emoji; chart legends render the label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    VeryHappy,
    Happy,
    Neutral,
    Sad,
    VerySad,
}

impl Mood {
    /// All moods in scale order (index 0..4).
    pub const ALL: [Mood; 5] = [
        Mood::VeryHappy,
        Mood::Happy,
        Mood::Neutral,
        Mood::Sad,
        Mood::VerySad,
    ];

    /// Build from the 0..4 scale index producers write.
    pub fn from_index(index: u8) -> Result<Self> {
        Self::ALL
            .get(index as usize)
            .copied()
            .ok_or_else(|| Error::decode("mood", format!("mood index out of range: {}", index)))
    }

    /// The 0..4 scale index.
    pub fn index(&self) -> u8 {
        match self {
            Mood::VeryHappy => 0,
            Mood::Happy => 1,
            Mood::Neutral => 2,
            Mood::Sad => 3,
            Mood::VerySad => 4,
        }
    }

    /// Chart legend label.
    pub fn label(&self) -> &'static str {
        match self {
            Mood::VeryHappy => "Very Happy",
            Mood::Happy => "Happy",
            Mood::Neutral => "Neutral",
            Mood::Sad => "Sad",
            Mood::VerySad => "Very Sad",
        }
    }

    /// Landing-view emoji.
    pub fn emoji(&self) -> &'static str {
        match self {
            Mood::VeryHappy => "😄",
            Mood::Happy => "🙂",
            Mood::Neutral => "😐",
            Mood::Sad => "🙁",
            Mood::VerySad => "😢",
        }
    }
}

impl std::fmt::Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ============================================
// Task Status
// ============================================

/// Lifecycle status of a task record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Created,
    Started,
    InProgress,
    Completed,
}

impl TaskStatus {
    /// All statuses, in lifecycle order. Counters are seeded over this
    /// set so an unseen status reads as zero.
    pub const ALL: [TaskStatus; 4] = [
        TaskStatus::Created,
        TaskStatus::Started,
        TaskStatus::InProgress,
        TaskStatus::Completed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Created => "Created",
            TaskStatus::Started => "Started",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Completed => "Completed",
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "Created" | "created" => Ok(TaskStatus::Created),
            "Started" | "started" => Ok(TaskStatus::Started),
            "In Progress" | "in_progress" => Ok(TaskStatus::InProgress),
            "Completed" | "completed" => Ok(TaskStatus::Completed),
            _ => Err(format!("unknown task status: {}", s)),
        }
    }
}

// ============================================
// Records
// ============================================

/// Fields shared by every activity record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordMeta {
    /// Opaque unique id, monotonically increasing with creation order
    /// (derived from the creation timestamp)
    pub id: String,
    /// Calendar date the activity pertains to
    pub date: NaiveDate,
    /// The Monday of the week containing `date`, stamped at write time
    pub week_commencing: NaiveDate,
}

/// A mood check-in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodRecord {
    pub meta: RecordMeta,
    pub mood: Mood,
}

/// A task with a textual deadline.
///
/// `deadline` keeps the producer's `DD/MM/YYYY, HH:MM am|pm` text; it is
/// parsed when the task table is sorted, so one malformed row cannot
/// poison a whole snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub meta: RecordMeta,
    pub name: String,
    pub details: Option<String>,
    pub status: TaskStatus,
    pub deadline: String,
}

/// A game-practice session. `game` is the discriminator report charts
/// sub-group by (e.g. "Secret Word", "Reaction Test").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PracticeRecord {
    pub meta: RecordMeta,
    pub game: String,
    pub duration_minutes: f64,
    pub score: Option<u32>,
}

/// A meditation session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeditationRecord {
    pub meta: RecordMeta,
    pub name: String,
    pub duration_minutes: f64,
}

/// A deep-breathing session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreathingRecord {
    pub meta: RecordMeta,
    pub name: String,
    pub duration_minutes: f64,
}

/// A journal entry. `time` keeps the producer's 24-hour `HH:MM` text and
/// is parsed at sort time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalRecord {
    pub meta: RecordMeta,
    pub title: Option<String>,
    pub entry: String,
    pub time: String,
}

/// An activity record of any kind.
///
/// Immutable once written; the reporting pipeline never mutates or
/// deletes one, it only derives views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActivityRecord {
    Mood(MoodRecord),
    Task(TaskRecord),
    GamePractice(PracticeRecord),
    Meditation(MeditationRecord),
    DeepBreathing(BreathingRecord),
    Journal(JournalRecord),
}

impl ActivityRecord {
    /// Which kind this record is.
    pub fn kind(&self) -> ActivityKind {
        match self {
            ActivityRecord::Mood(_) => ActivityKind::Mood,
            ActivityRecord::Task(_) => ActivityKind::Task,
            ActivityRecord::GamePractice(_) => ActivityKind::GamePractice,
            ActivityRecord::Meditation(_) => ActivityKind::Meditation,
            ActivityRecord::DeepBreathing(_) => ActivityKind::DeepBreathing,
            ActivityRecord::Journal(_) => ActivityKind::Journal,
        }
    }

    /// Shared metadata for any kind.
    pub fn meta(&self) -> &RecordMeta {
        match self {
            ActivityRecord::Mood(r) => &r.meta,
            ActivityRecord::Task(r) => &r.meta,
            ActivityRecord::GamePractice(r) => &r.meta,
            ActivityRecord::Meditation(r) => &r.meta,
            ActivityRecord::DeepBreathing(r) => &r.meta,
            ActivityRecord::Journal(r) => &r.meta,
        }
    }

    /// Mutable shared metadata, used only by the store boundary when
    /// stamping `week_commencing` at append time.
    pub(crate) fn meta_mut(&mut self) -> &mut RecordMeta {
        match self {
            ActivityRecord::Mood(r) => &mut r.meta,
            ActivityRecord::Task(r) => &mut r.meta,
            ActivityRecord::GamePractice(r) => &mut r.meta,
            ActivityRecord::Meditation(r) => &mut r.meta,
            ActivityRecord::DeepBreathing(r) => &mut r.meta,
            ActivityRecord::Journal(r) => &mut r.meta,
        }
    }

    pub fn id(&self) -> &str {
        &self.meta().id
    }

    pub fn date(&self) -> NaiveDate {
        self.meta().date
    }

    pub fn week_commencing(&self) -> NaiveDate {
        self.meta().week_commencing
    }

    pub fn as_task(&self) -> Option<&TaskRecord> {
        match self {
            ActivityRecord::Task(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_mood(&self) -> Option<&MoodRecord> {
        match self {
            ActivityRecord::Mood(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_practice(&self) -> Option<&PracticeRecord> {
        match self {
            ActivityRecord::GamePractice(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_meditation(&self) -> Option<&MeditationRecord> {
        match self {
            ActivityRecord::Meditation(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_breathing(&self) -> Option<&BreathingRecord> {
        match self {
            ActivityRecord::DeepBreathing(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_journal(&self) -> Option<&JournalRecord> {
        match self {
            ActivityRecord::Journal(r) => Some(r),
            _ => None,
        }
    }
}

/// Derive a record id from its creation instant.
///
/// Millisecond-precision timestamps keep ids unique per patient and
/// monotonically increasing with creation order.
pub fn record_id(created_at: DateTime<Utc>) -> String {
    created_at.timestamp_millis().to_string()
}

// ============================================
// Record Collections
// ============================================

/// All records of one activity kind for one patient: an id-to-record
/// map that only ever adds or overwrites by id.
///
/// An empty collection is a valid state, not an error; every consumer
/// treats zero records as a zero-result input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordCollection {
    kind: ActivityKind,
    records: HashMap<String, ActivityRecord>,
}

impl RecordCollection {
    /// Create an empty collection for `kind`.
    pub fn new(kind: ActivityKind) -> Self {
        Self {
            kind,
            records: HashMap::new(),
        }
    }

    pub fn kind(&self) -> ActivityKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Add or overwrite the record under its own id.
    ///
    /// Rejects records of a different kind; never removes anything.
    pub fn insert(&mut self, record: ActivityRecord) -> Result<()> {
        if record.kind() != self.kind {
            return Err(Error::KindMismatch {
                expected: self.kind.to_string(),
                actual: record.kind().to_string(),
            });
        }
        self.records.insert(record.id().to_string(), record);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&ActivityRecord> {
        self.records.get(id)
    }

    /// Iterate records in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &ActivityRecord> {
        self.records.values()
    }

    /// Records in creation order (ids are creation timestamps).
    pub fn in_creation_order(&self) -> Vec<&ActivityRecord> {
        let mut records: Vec<_> = self.records.values().collect();
        records.sort_by(|a, b| a.id().cmp(b.id()));
        records
    }
}
