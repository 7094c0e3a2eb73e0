//! Today's selected mood emoji.
//!
//! The landing view shows one highlighted emoji out of the fixed
//! five-step scale. The selection is a one-hot index stored through the
//! daily cache, so it resets to none-selected at day rollover.

use chrono::NaiveDate;
use serde_json::Value;

use crate::daily::cache::DailyCache;
use crate::error::Result;
use crate::types::Mood;

/// Cache key for the day's mood selection.
const MOOD_KEY: &str = "mood_emoji";

/// The mood selected today, or `None` when nothing was selected since
/// the last rollover.
pub fn today_mood(cache: &DailyCache, today: NaiveDate) -> Option<Mood> {
    let value = cache.get(MOOD_KEY, today)?;
    let index = value.as_u64()?;
    Mood::from_index(index as u8).ok()
}

/// Record `mood` as today's selection.
pub fn select_mood(cache: &mut DailyCache, mood: Mood, today: NaiveDate) -> Result<()> {
    cache.put(MOOD_KEY, Value::from(mood.index()), today)
}

/// Clear today's selection without waiting for rollover.
pub fn clear_today_mood(cache: &mut DailyCache) -> Result<()> {
    cache.remove(MOOD_KEY)
}
