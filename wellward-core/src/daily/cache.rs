//! Compute-once-per-calendar-day cache.
//!
//! Each entry stores the value alongside the date it was produced on.
//! An entry is FRESH while `produced_on` equals today and STALE
//! otherwise; a stale entry reads as a miss and is overwritten by the
//! next `put`. Entries persist to a JSON file so freshness survives
//! process restarts within the same day.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;

/// A cached value plus the day it was produced on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub value: Value,
    pub produced_on: NaiveDate,
}

/// Key/value store where every value expires at day rollover.
#[derive(Debug)]
pub struct DailyCache {
    path: PathBuf,
    entries: HashMap<String, CacheEntry>,
}

impl DailyCache {
    /// Open the cache file at `path`, creating state from scratch when
    /// the file is missing. A corrupt file degrades to an empty cache
    /// rather than failing the landing view.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match Self::read_entries(&path) {
            Ok(entries) => entries,
            Err(error) => {
                tracing::warn!(path = %path.display(), %error, "resetting unreadable daily cache");
                HashMap::new()
            }
        };
        Self { path, entries }
    }

    fn read_entries(path: &Path) -> Result<HashMap<String, CacheEntry>> {
        if !path.exists() {
            return Ok(HashMap::new());
        }
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// The cached value for `key`, only while it is FRESH for `today`.
    pub fn get(&self, key: &str, today: NaiveDate) -> Option<&Value> {
        self.entries
            .get(key)
            .filter(|entry| entry.produced_on == today)
            .map(|entry| &entry.value)
    }

    /// Store `value` for `key`, produced on `today`, and persist.
    pub fn put(&mut self, key: impl Into<String>, value: Value, today: NaiveDate) -> Result<()> {
        self.entries.insert(
            key.into(),
            CacheEntry {
                value,
                produced_on: today,
            },
        );
        self.persist()
    }

    /// Drop `key` entirely and persist.
    pub fn remove(&mut self, key: &str) -> Result<()> {
        if self.entries.remove(key).is_some() {
            self.persist()?;
        }
        Ok(())
    }

    fn persist(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.entries)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn missing_file_opens_empty() {
        let dir = TempDir::new().unwrap();
        let cache = DailyCache::open(dir.path().join("daily_cache.json"));
        assert!(cache.get("quote", date(2024, 6, 1)).is_none());
    }

    #[test]
    fn fresh_entries_hit_stale_entries_miss() {
        let dir = TempDir::new().unwrap();
        let mut cache = DailyCache::open(dir.path().join("daily_cache.json"));
        let today = date(2024, 6, 1);

        cache.put("quote", json!("keep going"), today).unwrap();
        assert_eq!(cache.get("quote", today), Some(&json!("keep going")));

        // Same key the next day is a miss.
        assert!(cache.get("quote", date(2024, 6, 2)).is_none());
    }

    #[test]
    fn get_is_idempotent_within_a_day() {
        let dir = TempDir::new().unwrap();
        let mut cache = DailyCache::open(dir.path().join("daily_cache.json"));
        let today = date(2024, 6, 1);
        cache.put("quote", json!("one"), today).unwrap();

        let first = cache.get("quote", today).cloned();
        let second = cache.get("quote", today).cloned();
        assert_eq!(first, second);
    }

    #[test]
    fn freshness_survives_a_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("daily_cache.json");
        let today = date(2024, 6, 1);

        {
            let mut cache = DailyCache::open(&path);
            cache.put("mood_emoji", json!(2), today).unwrap();
        }

        let reopened = DailyCache::open(&path);
        assert_eq!(reopened.get("mood_emoji", today), Some(&json!(2)));
        assert!(reopened.get("mood_emoji", date(2024, 6, 2)).is_none());
    }

    #[test]
    fn corrupt_file_degrades_to_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("daily_cache.json");
        std::fs::write(&path, "{ not json").unwrap();

        let cache = DailyCache::open(&path);
        assert!(cache.get("quote", date(2024, 6, 1)).is_none());
    }

    #[test]
    fn put_overwrites_the_previous_day() {
        let dir = TempDir::new().unwrap();
        let mut cache = DailyCache::open(dir.path().join("daily_cache.json"));

        cache.put("quote", json!("yesterday"), date(2024, 6, 1)).unwrap();
        cache.put("quote", json!("today"), date(2024, 6, 2)).unwrap();

        assert_eq!(cache.get("quote", date(2024, 6, 2)), Some(&json!("today")));
        assert!(cache.get("quote", date(2024, 6, 1)).is_none());
    }
}
