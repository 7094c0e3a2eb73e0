//! # wellward-core
//!
//! Core reporting library for wellward - a therapy companion's activity
//! tracker.
//!
//! This library provides:
//! - Domain types for per-patient activity records (mood check-ins,
//!   tasks, game practice, meditation, deep breathing, journal entries)
//! - Week-scoped filtering, sorting, and aggregation into chart-ready
//!   report sections
//! - A once-per-day content cache for the daily quote and mood emoji
//! - Configuration management and logging infrastructure
//!
//! ## Architecture
//!
//! The record store is an external collaborator; this crate reads
//! immutable snapshots through the [`store::RecordStore`] seam and
//! derives ephemeral views:
//!
//! - **Snapshot:** loosely-typed record maps validated into tagged
//!   variants at the boundary
//! - **Weekly pipeline:** filter by selected week, then sort for tables
//!   and aggregate/project for charts - recomputed on every view
//! - **Daily content:** quote and mood emoji computed once per calendar
//!   day and reused until rollover
//!
//! ## Example
//!
//! ```rust,no_run
//! use wellward_core::report::{WeekFilterMode, WeeklyReport};
//! use wellward_core::store::MemoryStore;
//!
//! let store = MemoryStore::new();
//! let today = chrono::Utc::now().date_naive();
//!
//! let report = WeeklyReport::for_patient(&store, "patient-1", today, WeekFilterMode::WithinWeek)
//!     .expect("failed to build report");
//! for section in report.rendered_sections() {
//!     println!("would render {}", section);
//! }
//! ```

// Re-export commonly used items at the crate root
pub use config::Config;
pub use error::{Error, Result};
pub use types::*;
pub use week::{monday_of, sunday_of, week_dates, WeekWindow};

// Public modules
pub mod config;
pub mod daily;
pub mod datefmt;
pub mod error;
pub mod format;
pub mod logging;
pub mod report;
pub mod store;
pub mod types;
pub mod week;
