//! Validation of loosely-typed record maps at the store boundary.
//!
//! Upstream producers write records as ad hoc JSON object literals whose
//! field names drift between activity screens (`meditationName` vs
//! `deepBreathingName`, task dates carrying a trailing time). Everything
//! is normalized into the typed [`ActivityRecord`] variants here, before
//! any reporting code sees it.
//!
//! # Error Handling
//!
//! A record that fails validation is rejected individually: it lands in
//! [`DecodedCollection::rejected`] with its id and error, a warning is
//! logged, and decoding continues. The whole-collection decode only
//! fails when the payload is not an id-to-record map at all.

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

use crate::datefmt::{parse_date, parse_date_time};
use crate::error::{Error, Result};
use crate::types::{
    ActivityKind, ActivityRecord, BreathingRecord, JournalRecord, MeditationRecord, Mood,
    MoodRecord, PracticeRecord, RecordCollection, RecordMeta, TaskRecord, TaskStatus,
};
use crate::week::monday_of;

/// One record that failed boundary validation.
#[derive(Debug)]
pub struct RejectedRecord {
    /// The id it was stored under
    pub id: String,
    /// Why it was rejected
    pub error: Error,
}

/// Result of decoding one kind's collection: the valid records plus the
/// per-record rejections.
#[derive(Debug)]
pub struct DecodedCollection {
    pub records: RecordCollection,
    pub rejected: Vec<RejectedRecord>,
}

/// Decode one activity-kind collection from its raw id-to-payload map.
///
/// `Value::Null` decodes as an empty collection: an absent kind is a
/// valid zero-entry state.
pub fn decode_collection(kind: ActivityKind, raw: &Value) -> Result<DecodedCollection> {
    let mut records = RecordCollection::new(kind);
    let mut rejected = Vec::new();

    let map = match raw {
        Value::Null => {
            return Ok(DecodedCollection { records, rejected });
        }
        Value::Object(map) => map,
        other => {
            return Err(Error::decode(
                kind.as_str(),
                format!("expected an id-to-record map, got {}", json_type(other)),
            ));
        }
    };

    for (id, payload) in map {
        match decode_record(kind, id, payload) {
            Ok(record) => {
                records.insert(record)?;
            }
            Err(error) => {
                tracing::warn!(kind = %kind, id = %id, %error, "rejecting malformed record");
                rejected.push(RejectedRecord {
                    id: id.clone(),
                    error,
                });
            }
        }
    }

    Ok(DecodedCollection { records, rejected })
}

/// Decode a whole patient document: top-level keys are activity-kind
/// names, values are id-to-record maps. Unknown top-level keys are
/// ignored (forward compatibility with new activity screens).
pub fn decode_patient_document(
    raw: &Value,
) -> Result<HashMap<ActivityKind, DecodedCollection>> {
    let map = match raw {
        Value::Null => return Ok(HashMap::new()),
        Value::Object(map) => map,
        other => {
            return Err(Error::decode(
                "document",
                format!("expected a kind-to-collection map, got {}", json_type(other)),
            ));
        }
    };

    let mut out = HashMap::new();
    for kind in ActivityKind::ALL {
        if let Some(collection) = map.get(kind.as_str()) {
            out.insert(kind, decode_collection(kind, collection)?);
        }
    }
    Ok(out)
}

/// Decode a single record payload for `kind`, stored under `id`.
pub fn decode_record(kind: ActivityKind, id: &str, payload: &Value) -> Result<ActivityRecord> {
    let err = |e: serde_json::Error| Error::decode(kind.as_str(), e.to_string());

    let record = match kind {
        ActivityKind::Mood => {
            let raw: RawMood = serde_json::from_value(payload.clone()).map_err(err)?;
            ActivityRecord::Mood(MoodRecord {
                meta: raw.base.into_meta(id)?,
                mood: Mood::from_index(raw.mood)?,
            })
        }
        ActivityKind::Task => {
            let raw: RawTask = serde_json::from_value(payload.clone()).map_err(err)?;
            let status = raw
                .status
                .parse::<TaskStatus>()
                .map_err(|e| Error::decode(kind.as_str(), e))?;
            ActivityRecord::Task(TaskRecord {
                meta: raw.base.into_meta(id)?,
                name: raw.name,
                details: raw.details,
                status,
                deadline: raw.deadline,
            })
        }
        ActivityKind::GamePractice => {
            let raw: RawPractice = serde_json::from_value(payload.clone()).map_err(err)?;
            ActivityRecord::GamePractice(PracticeRecord {
                meta: raw.base.into_meta(id)?,
                game: raw.game,
                duration_minutes: raw.duration,
                score: raw.score,
            })
        }
        ActivityKind::Meditation => {
            let raw: RawMeditation = serde_json::from_value(payload.clone()).map_err(err)?;
            ActivityRecord::Meditation(MeditationRecord {
                meta: raw.base.into_meta(id)?,
                name: raw.name,
                duration_minutes: raw.duration,
            })
        }
        ActivityKind::DeepBreathing => {
            let raw: RawBreathing = serde_json::from_value(payload.clone()).map_err(err)?;
            ActivityRecord::DeepBreathing(BreathingRecord {
                meta: raw.base.into_meta(id)?,
                name: raw.name,
                duration_minutes: raw.duration,
            })
        }
        ActivityKind::Journal => {
            let raw: RawJournal = serde_json::from_value(payload.clone()).map_err(err)?;
            ActivityRecord::Journal(JournalRecord {
                meta: raw.base.into_meta(id)?,
                title: raw.title,
                entry: raw.entry,
                time: raw.time,
            })
        }
    };

    Ok(record)
}

fn json_type(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a bool",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ============================================
// Raw payload shapes (serde deserialization)
// ============================================

/// Base fields every producer writes.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawBase {
    date: String,
    #[serde(default)]
    week_commencing: Option<String>,
}

impl RawBase {
    /// Validate the base fields into [`RecordMeta`].
    ///
    /// Task screens write `date` as a full date-time string; everyone
    /// else writes a plain date. A stamped `week_commencing` must be the
    /// Monday of the week containing `date`; when absent it is derived.
    fn into_meta(self, id: &str) -> Result<RecordMeta> {
        let date = parse_record_date(&self.date)?;
        let monday = monday_of(date);

        let week_commencing = match self.week_commencing.as_deref() {
            Some(s) => {
                let stamped = parse_date(s)?;
                if stamped != monday {
                    return Err(Error::decode(
                        "record",
                        format!(
                            "weekCommencing {} is not the Monday of the week containing {}",
                            s, self.date
                        ),
                    ));
                }
                stamped
            }
            None => monday,
        };

        Ok(RecordMeta {
            id: id.to_string(),
            date,
            week_commencing,
        })
    }
}

/// Parse a record date, accepting both the plain and date-time forms.
fn parse_record_date(s: &str) -> Result<NaiveDate> {
    parse_date(s).or_else(|_| parse_date_time(s).map(|dt| dt.date()))
}

#[derive(Debug, Deserialize)]
struct RawMood {
    #[serde(flatten)]
    base: RawBase,
    mood: u8,
}

#[derive(Debug, Deserialize)]
struct RawTask {
    #[serde(flatten)]
    base: RawBase,
    #[serde(alias = "taskName")]
    name: String,
    #[serde(default, alias = "taskDetails")]
    details: Option<String>,
    status: String,
    deadline: String,
}

#[derive(Debug, Deserialize)]
struct RawPractice {
    #[serde(flatten)]
    base: RawBase,
    #[serde(alias = "gameName")]
    game: String,
    duration: f64,
    #[serde(default)]
    score: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct RawMeditation {
    #[serde(flatten)]
    base: RawBase,
    #[serde(alias = "meditationName")]
    name: String,
    duration: f64,
}

/// Some breathing screens reused the meditation field name.
#[derive(Debug, Deserialize)]
struct RawBreathing {
    #[serde(flatten)]
    base: RawBase,
    #[serde(alias = "deepBreathingName", alias = "meditationName")]
    name: String,
    duration: f64,
}

#[derive(Debug, Deserialize)]
struct RawJournal {
    #[serde(flatten)]
    base: RawBase,
    #[serde(default)]
    title: Option<String>,
    #[serde(alias = "journalEntry")]
    entry: String,
    time: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_a_mood_collection() {
        let raw = json!({
            "1717200000000": { "date": "01/06/2024", "weekCommencing": "27/05/2024", "mood": 1 },
            "1717286400000": { "date": "02/06/2024", "mood": 4 },
        });

        let decoded = decode_collection(ActivityKind::Mood, &raw).unwrap();
        assert_eq!(decoded.records.len(), 2);
        assert!(decoded.rejected.is_empty());

        let first = decoded.records.get("1717200000000").unwrap();
        assert_eq!(first.as_mood().unwrap().mood, Mood::Happy);
        // Derived when absent: 02/06/2024 is a Sunday of the 27/05 week.
        let second = decoded.records.get("1717286400000").unwrap();
        assert_eq!(
            second.week_commencing(),
            NaiveDate::from_ymd_opt(2024, 5, 27).unwrap()
        );
    }

    #[test]
    fn absent_collection_is_empty_not_an_error() {
        let decoded = decode_collection(ActivityKind::Journal, &Value::Null).unwrap();
        assert!(decoded.records.is_empty());
        assert!(decoded.rejected.is_empty());
    }

    #[test]
    fn rejects_individual_bad_records_and_keeps_the_rest() {
        let raw = json!({
            "a": { "date": "01/06/2024", "mood": 2 },
            "b": { "date": "not a date", "mood": 0 },
            "c": { "date": "01/06/2024", "mood": 9 },
        });

        let decoded = decode_collection(ActivityKind::Mood, &raw).unwrap();
        assert_eq!(decoded.records.len(), 1);
        assert_eq!(decoded.rejected.len(), 2);
        assert!(decoded.records.get("a").is_some());
    }

    #[test]
    fn rejects_mismatched_week_commencing_stamp() {
        let raw = json!({
            "a": { "date": "01/06/2024", "weekCommencing": "28/05/2024", "mood": 2 },
        });
        let decoded = decode_collection(ActivityKind::Mood, &raw).unwrap();
        assert!(decoded.records.is_empty());
        assert_eq!(decoded.rejected.len(), 1);
    }

    #[test]
    fn task_dates_may_carry_a_time() {
        let raw = json!({
            "t1": {
                "date": "01/06/2024, 5:00 pm",
                "taskName": "Evening walk",
                "status": "Created",
                "deadline": "01/06/2024, 6:00 pm"
            }
        });

        let decoded = decode_collection(ActivityKind::Task, &raw).unwrap();
        let task = decoded.records.get("t1").unwrap().as_task().unwrap();
        assert_eq!(task.name, "Evening walk");
        assert_eq!(
            decoded.records.get("t1").unwrap().date(),
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
        );
    }

    #[test]
    fn breathing_accepts_drifted_field_names() {
        let raw = json!({
            "b1": { "date": "01/06/2024", "deepBreathingName": "Box breathing", "duration": 5.0 },
            "b2": { "date": "01/06/2024", "meditationName": "Slow exhale", "duration": 3.5 },
        });

        let decoded = decode_collection(ActivityKind::DeepBreathing, &raw).unwrap();
        assert_eq!(decoded.records.len(), 2);
        assert_eq!(
            decoded.records.get("b2").unwrap().as_breathing().unwrap().name,
            "Slow exhale"
        );
    }

    #[test]
    fn decodes_a_patient_document() {
        let raw = json!({
            "mood": { "a": { "date": "01/06/2024", "mood": 0 } },
            "journal": {
                "j": { "date": "01/06/2024", "journalEntry": "slept well", "time": "08:30" }
            },
            "unknown_future_kind": { "x": {} },
        });

        let decoded = decode_patient_document(&raw).unwrap();
        assert_eq!(decoded.len(), 2);
        assert_eq!(decoded[&ActivityKind::Mood].records.len(), 1);
        assert_eq!(
            decoded[&ActivityKind::Journal]
                .records
                .get("j")
                .unwrap()
                .as_journal()
                .unwrap()
                .entry,
            "slept well"
        );
    }

    #[test]
    fn non_map_collection_is_a_hard_error() {
        assert!(decode_collection(ActivityKind::Mood, &json!([1, 2, 3])).is_err());
        assert!(decode_collection(ActivityKind::Mood, &json!("nope")).is_err());
    }
}
