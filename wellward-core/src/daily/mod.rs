//! Once-per-day content for the landing view.
//!
//! Independent of the weekly pipeline and keyed by calendar day: the
//! daily affirmation quote and the day's selected mood emoji are
//! computed once per day and reused until rollover.

pub mod cache;
pub mod mood;
pub mod quote;

pub use cache::{CacheEntry, DailyCache};
pub use mood::{clear_today_mood, select_mood, today_mood};
pub use quote::{daily_quote, HttpQuoteSource, Quote, QuoteSource};
