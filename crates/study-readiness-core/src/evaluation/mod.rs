//! Readiness scoring and advisories.
//!
//! The latest session is compared against the mean of every session before
//! it. Ten normalized subscores are combined into a weighted composite, three
//! domain subscores, and time-of-day aware advice for each domain.
//!
//! [`evaluate_history`] is a pure function of the records it is given;
//! [`evaluate_store`] loads the history through a [`SessionStore`] first.

mod advisory;
mod breakdown;
mod normalize;
mod report;

pub use advisory::{DomainRules, Rule, RuleContext, RuleGroup, TimeOfDay, LOW_ACCURACY, SLOWDOWN_FACTOR};
pub use breakdown::{Component, Domain, ScoreBreakdown, SubscoreTerm};
pub use normalize::{
    caffeine_score, clamp01, normalize, sleep_quality_score, sleepiness_score, stress_score,
    Direction, CAFFEINE_HORIZON_MINUTES,
};

use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{CoreError, EvaluationError, Result, StorageError};
use crate::session::{iso_timestamp, split_latest, Metric, SessionRecord};
use crate::storage::SessionStore;

/// Sessions preceding the one under evaluation.
#[derive(Debug, Clone, Copy)]
pub struct Baseline<'a> {
    sessions: &'a [SessionRecord],
}

impl<'a> Baseline<'a> {
    pub fn new(sessions: &'a [SessionRecord]) -> Self {
        Self { sessions }
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Unweighted mean of a metric. An empty baseline has mean 0, which
    /// normalizes to the neutral score.
    pub fn mean(&self, metric: Metric) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.sessions.iter().map(|s| s.value(metric)).sum();
        sum / self.sessions.len() as f64
    }
}

/// Score and advice for one domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainReport {
    pub domain: Domain,
    /// Domain subscore (0-100)
    pub score: f64,
    /// Never empty: holds the fallback message when no rule fired
    pub advisories: Vec<String>,
}

/// Outcome of a readiness evaluation. Not persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    /// Timestamp of the evaluated session
    #[serde(with = "iso_timestamp")]
    pub session_timestamp: NaiveDateTime,
    pub time_of_day: TimeOfDay,
    /// Number of sessions the baseline was computed from
    pub baseline_sessions: usize,
    /// Composite readiness (0-100)
    pub overall_score: f64,
    pub cognitive: DomainReport,
    pub memory_executive: DomainReport,
    pub well_being: DomainReport,
    pub subscores: Vec<SubscoreTerm>,
}

impl EvaluationResult {
    pub fn domains(&self) -> [&DomainReport; 3] {
        [&self.cognitive, &self.memory_executive, &self.well_being]
    }

    pub fn domain(&self, domain: Domain) -> &DomainReport {
        match domain {
            Domain::CognitiveProcessing => &self.cognitive,
            Domain::MemoryExecutive => &self.memory_executive,
            Domain::WellBeing => &self.well_being,
        }
    }
}

/// Evaluate the last record of `records` against the ones before it.
///
/// # Errors
/// Returns [`EvaluationError::InsufficientHistory`] with fewer than two
/// records. No score is computed in that case.
pub fn evaluate_history(records: &[SessionRecord]) -> Result<EvaluationResult, EvaluationError> {
    let (latest, history) = split_latest(records).inspect_err(|e| warn!("{e}"))?;
    let baseline = Baseline::new(history);
    let time_of_day = TimeOfDay::from_hour(latest.timestamp.hour());

    let breakdown = ScoreBreakdown::compute(latest, &baseline);
    let ctx = RuleContext {
        latest,
        baseline: &baseline,
        time_of_day,
    };

    let report = |domain: Domain| DomainReport {
        domain,
        score: breakdown.domain_score(domain) * 100.0,
        advisories: DomainRules::for_domain(domain).evaluate(&ctx),
    };

    let result = EvaluationResult {
        session_timestamp: latest.timestamp,
        time_of_day,
        baseline_sessions: baseline.len(),
        overall_score: breakdown.composite() * 100.0,
        cognitive: report(Domain::CognitiveProcessing),
        memory_executive: report(Domain::MemoryExecutive),
        well_being: report(Domain::WellBeing),
        subscores: breakdown.into_terms(),
    };

    debug!(
        overall = result.overall_score,
        baseline = result.baseline_sessions,
        time_of_day = time_of_day.label(),
        "readiness evaluated"
    );
    Ok(result)
}

/// Load the full history from `store` and evaluate it.
///
/// A missing or unreadable log yields [`EvaluationError::StorageUnavailable`];
/// a log that exists but cannot be parsed is reported as a storage error.
///
/// # Errors
/// Returns an error if the history is unavailable, too short, or malformed.
pub fn evaluate_store<S: SessionStore + ?Sized>(store: &S) -> Result<EvaluationResult> {
    let history = match store.load_all() {
        Ok(Some(history)) => history,
        Ok(None) => return Err(EvaluationError::StorageUnavailable.into()),
        Err(CoreError::Storage(err @ StorageError::OpenFailed { .. })) => {
            warn!("{err}");
            return Err(EvaluationError::StorageUnavailable.into());
        }
        Err(err) => return Err(err),
    };
    Ok(evaluate_history(history.records())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::fixtures::record_at;
    use crate::storage::MemorySessionLog;

    const EPS: f64 = 1e-9;

    fn baseline_history() -> Vec<SessionRecord> {
        (1..=5).map(|day| record_at(day, 9)).collect()
    }

    #[test]
    fn baseline_mean_is_unweighted() {
        let mut records = baseline_history();
        records[0].arithmetic_duration_seconds = 20.0;
        let baseline = Baseline::new(&records);
        assert!((baseline.mean(Metric::ArithmeticDuration) - 12.0).abs() < EPS);
        let empty = Baseline::new(&[]);
        assert!(empty.is_empty());
        assert_eq!(empty.mean(Metric::Stress), 0.0);
    }

    #[test]
    fn refuses_short_history() {
        assert_eq!(
            evaluate_history(&[]).unwrap_err(),
            EvaluationError::InsufficientHistory { records: 0 }
        );
        assert_eq!(
            evaluate_history(&[record_at(1, 9)]).unwrap_err(),
            EvaluationError::InsufficientHistory { records: 1 }
        );
    }

    #[test]
    fn slow_morning_arithmetic_end_to_end() {
        let mut steady = baseline_history();
        steady.push(record_at(6, 9));
        let steady_result = evaluate_history(&steady).unwrap();

        let mut slow = baseline_history();
        let mut latest = record_at(6, 9);
        latest.arithmetic_duration_seconds = 15.0;
        slow.push(latest);
        let slow_result = evaluate_history(&slow).unwrap();

        assert_eq!(slow_result.time_of_day, TimeOfDay::Morning);
        assert_eq!(slow_result.baseline_sessions, 5);
        assert_eq!(
            slow_result.cognitive.advisories,
            vec![
                "Arithmetic is slow this morning: wait 30-60 minutes for natural alertness to rise."
                    .to_string()
            ]
        );
        assert!(slow_result.overall_score < steady_result.overall_score);
        // Only arith_time moves: 0.12 * (1 - 0.5) of the composite
        assert!((steady_result.overall_score - slow_result.overall_score - 6.0).abs() < EPS);
        assert_eq!(slow_result.memory_executive, steady_result.memory_executive);
        assert_eq!(slow_result.well_being, steady_result.well_being);
    }

    #[test]
    fn steady_session_scores_by_direct_computation() {
        let mut records = baseline_history();
        records.push(record_at(6, 9));
        let result = evaluate_history(&records).unwrap();

        // Errors have a zero baseline, so they score a neutral 0.5.
        let cognitive = (0.12 * 1.0 + 0.10 * 0.5 + 0.13 * 1.0) / 0.35;
        let well_being = (0.06 * 0.75 + 0.10 * 0.8 + 0.09 * (1.0 - 2.0 / 9.0)
            + 0.07 * (1.0 - 120.0 / 360.0))
            / 0.32;
        let overall = 0.12 + 0.10 * 0.5 + 0.13 + 0.33 + 0.32 * well_being;

        assert!((result.cognitive.score - cognitive * 100.0).abs() < EPS);
        assert!((result.memory_executive.score - 100.0).abs() < EPS);
        assert!((result.well_being.score - well_being * 100.0).abs() < EPS);
        assert!((result.overall_score - overall * 100.0).abs() < EPS);
        assert_eq!(result.subscores.len(), 10);
    }

    #[test]
    fn every_domain_has_advice() {
        let mut records = baseline_history();
        let mut latest = record_at(6, 13);
        latest.stroop_score = 0.2;
        latest.kss = 9;
        records.push(latest);
        let result = evaluate_history(&records).unwrap();
        for domain in result.domains() {
            assert!(!domain.advisories.is_empty());
        }
        assert_eq!(result.domain(Domain::WellBeing).advisories.len(), 1);
    }

    #[test]
    fn store_without_log_is_unavailable() {
        let err = evaluate_store(&MemorySessionLog::new()).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Evaluation(EvaluationError::StorageUnavailable)
        ));
        assert!(err.is_notice());
    }

    #[test]
    fn store_with_one_session_is_insufficient() {
        let store = MemorySessionLog::with_records(vec![record_at(1, 9)]);
        let err = evaluate_store(&store).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Evaluation(EvaluationError::InsufficientHistory { records: 1 })
        ));
    }

    #[test]
    fn store_history_is_evaluated() {
        let mut records = baseline_history();
        records.push(record_at(6, 20));
        let store = MemorySessionLog::with_records(records);
        let result = evaluate_store(&store).unwrap();
        assert_eq!(result.time_of_day, TimeOfDay::Evening);
    }
}
