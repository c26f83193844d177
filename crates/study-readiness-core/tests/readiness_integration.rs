//! Integration tests for the log-then-evaluate workflow.

use chrono::NaiveDate;
use study_readiness_core::{
    evaluate_store, CoreError, CsvSessionLog, Domain, EvaluationError, SessionChart,
    SessionRecord, SessionStore, TimeOfDay,
};
use tempfile::TempDir;

fn session(day: u32, hour: u32) -> SessionRecord {
    SessionRecord {
        timestamp: NaiveDate::from_ymd_opt(2024, 6, day)
            .unwrap()
            .and_hms_opt(hour, 15, 0)
            .unwrap(),
        arithmetic_duration_seconds: 42.0,
        arithmetic_errors: 1,
        reaction_time_seconds: 0.38,
        stroop_score: 0.85,
        two_back_score: 0.8,
        word_pair_score: 0.9,
        kss: 4,
        caffeine_minutes: 90,
        sleep_quality: 4,
        stress: 4,
    }
}

#[test]
fn test_full_readiness_workflow() {
    let temp_dir = TempDir::new().unwrap();
    let mut log = CsvSessionLog::new(temp_dir.path().join("study_readiness_log.csv"));

    // Nothing logged yet
    let err = evaluate_store(&log).unwrap_err();
    assert!(matches!(
        err,
        CoreError::Evaluation(EvaluationError::StorageUnavailable)
    ));

    log.append(&session(1, 9)).unwrap();
    let err = evaluate_store(&log).unwrap_err();
    assert!(matches!(
        err,
        CoreError::Evaluation(EvaluationError::InsufficientHistory { records: 1 })
    ));
    assert!(err.is_notice());

    for day in 2..=4 {
        log.append(&session(day, 9)).unwrap();
    }

    // A sluggish, sleepy afternoon session
    let mut latest = session(5, 15);
    latest.arithmetic_duration_seconds = 60.0;
    latest.reaction_time_seconds = 0.55;
    latest.two_back_score = 0.5;
    latest.kss = 8;
    log.append(&latest).unwrap();

    let result = evaluate_store(&log).unwrap();
    assert_eq!(result.time_of_day, TimeOfDay::Afternoon);
    assert_eq!(result.baseline_sessions, 4);
    assert!(result.overall_score > 0.0 && result.overall_score < 100.0);

    let cognitive = &result.domain(Domain::CognitiveProcessing).advisories;
    assert!(cognitive
        .iter()
        .any(|a| a.starts_with("Afternoon slowdown in arithmetic")));
    assert!(cognitive.iter().any(|a| a.contains("reaction time")));

    let memory = &result.domain(Domain::MemoryExecutive).advisories;
    assert!(memory.iter().any(|a| a.starts_with("2-Back score")));

    let well_being = &result.domain(Domain::WellBeing).advisories;
    assert_eq!(well_being.len(), 1);

    let rendered = result.render();
    assert!(rendered.starts_with("Study Readiness Evaluation"));
    assert!(rendered.contains("Overall Score:"));
}

#[test]
fn test_steady_history_reports_fallbacks() {
    let temp_dir = TempDir::new().unwrap();
    let mut log = CsvSessionLog::new(temp_dir.path().join("log.csv"));
    for day in 1..=6 {
        log.append(&session(day, 10)).unwrap();
    }

    let result = evaluate_store(&log).unwrap();
    assert_eq!(result.time_of_day, TimeOfDay::Morning);
    for domain in result.domains() {
        assert_eq!(domain.advisories.len(), 1);
    }
    assert_eq!(result.subscores.len(), 10);
}

#[test]
fn test_chart_from_logged_sessions() {
    let temp_dir = TempDir::new().unwrap();
    let mut log = CsvSessionLog::new(temp_dir.path().join("log.csv"));
    for day in 1..=3 {
        let mut record = session(day, 9);
        record.stroop_score = 0.6 + 0.1 * f64::from(day);
        log.append(&record).unwrap();
    }

    let tail = log.tail(5).unwrap().unwrap();
    assert_eq!(tail.len(), 3);
    let chart = SessionChart::from_records(&tail, 5);
    assert!(!chart.is_empty());
    assert!(chart.render_ascii().contains("stroop"));
}

#[test]
fn test_log_survives_clear_and_restart() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("log.csv");
    let mut log = CsvSessionLog::new(&path);
    log.append(&session(1, 9)).unwrap();
    log.append(&session(2, 9)).unwrap();

    // A fresh handle on the same path sees the same history
    let reopened = CsvSessionLog::new(&path);
    assert_eq!(reopened.load_all().unwrap().unwrap().len(), 2);

    assert!(log.clear().unwrap());
    assert!(reopened.load_all().unwrap().is_none());

    // Earlier timestamps are accepted again once the log is gone
    log.append(&session(1, 9)).unwrap();
    assert_eq!(log.load_all().unwrap().unwrap().len(), 1);
}
