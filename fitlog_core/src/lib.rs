#![forbid(unsafe_code)]

//! Core domain model and business logic for the fitlog journal.
//!
//! This crate provides:
//! - Domain types (daily logs, workouts, nutrition entries)
//! - Exercise catalog
//! - Journal repository and persistence
//! - Media attachment storage
//! - Time-window resolution and analytics

pub mod types;
pub mod error;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod repository;
pub mod media;
pub mod window;
pub mod analytics;
pub mod export;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use catalog::{exercises_for, CATCH_ALL};
pub use config::Config;
pub use repository::{JournalRepository, MemoryJournal, SortOrder};
pub use media::{AttachmentStore, DirAttachmentStore};
pub use window::{offset_range, relative_label, TimePeriod, TimeWindow, TrendBucket};
pub use analytics::{
    days_meeting_step_goal, health_summary, macro_totals, muscle_balance, pending_entries,
    total_calories, volume_trend, workout_summary, HealthMetric, HealthSummary, MacroTotal,
    MuscleBalance, MuscleMetric, VolumeTrendPoint, WorkoutSummary,
};
