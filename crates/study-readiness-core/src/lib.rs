//! # Study Readiness Core Library
//!
//! This library provides the core logic for Study Readiness: a log of short
//! cognitive test batteries with manual check-ins, and a readiness score that
//! compares the latest session against the user's own history. The CLI binary
//! is a thin layer over the same library.
//!
//! ## Architecture
//!
//! - **Session log**: append-only CSV table with a fixed header, behind the
//!   [`SessionStore`] trait so the path (or an in-memory fixture) is injected
//! - **Evaluation**: normalized subscores, a weighted composite, and
//!   time-of-day aware advisories per domain
//! - **Check-in**: parsing and clamping of self-reported values
//! - **Chart**: min-max normalized terminal chart of recent sessions
//!
//! ## Key Components
//!
//! - [`evaluate_history`] / [`evaluate_store`]: readiness evaluation
//! - [`CsvSessionLog`]: session persistence
//! - [`Config`]: application configuration management

pub mod chart;
pub mod checkin;
pub mod error;
pub mod evaluation;
pub mod session;
pub mod storage;

pub use chart::SessionChart;
pub use checkin::{parse_caffeine_minutes, Checkin, CheckinQuestion};
pub use error::{ConfigError, CoreError, EvaluationError, StorageError, ValidationError};
pub use evaluation::{
    evaluate_history, evaluate_store, Domain, DomainReport, EvaluationResult, TimeOfDay,
};
pub use session::{HistorySet, Metric, SessionRecord};
pub use storage::{Config, CsvSessionLog, MemorySessionLog, SessionStore};
