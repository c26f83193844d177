//! Session records and the ordered history they form.
//!
//! A [`SessionRecord`] is one completed test battery: the raw metrics from the
//! cognitive tests plus the manual check-in values. Field names on disk follow
//! the fixed log schema (`T_arith`, `E_arith`, `RT`, ...).

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{EvaluationError, ValidationError};

/// Reaction times faster than this are false starts and never stored.
pub const MIN_REACTION_TIME_SECS: f64 = 0.07;

/// Caffeine value recorded when the user reports no caffeine at all.
pub const NO_CAFFEINE_MINUTES: u32 = 36 * 60;

/// Column order of the persisted log.
pub const LOG_COLUMNS: [&str; 11] = [
    "timestamp",
    "T_arith",
    "E_arith",
    "RT",
    "stroop",
    "two_back",
    "word_pair",
    "KSS",
    "caffeine_min",
    "sleep_q",
    "stress",
];

/// One completed test battery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Session completion instant (local wall clock)
    #[serde(with = "iso_timestamp")]
    pub timestamp: NaiveDateTime,
    /// Time to complete the arithmetic block
    #[serde(rename = "T_arith")]
    pub arithmetic_duration_seconds: f64,
    /// Wrong answers in the arithmetic block
    #[serde(rename = "E_arith")]
    pub arithmetic_errors: u32,
    /// Mean reaction latency
    #[serde(rename = "RT")]
    pub reaction_time_seconds: f64,
    /// Stroop accuracy (0-1)
    #[serde(rename = "stroop")]
    pub stroop_score: f64,
    /// 2-back accuracy (0-1)
    #[serde(rename = "two_back")]
    pub two_back_score: f64,
    /// Word-pair recall accuracy (0-1)
    #[serde(rename = "word_pair")]
    pub word_pair_score: f64,
    /// Karolinska Sleepiness Scale (1-9)
    #[serde(rename = "KSS")]
    pub kss: u8,
    /// Minutes since last caffeine intake
    #[serde(rename = "caffeine_min")]
    pub caffeine_minutes: u32,
    /// Sleep quality (1-5)
    #[serde(rename = "sleep_q")]
    pub sleep_quality: u8,
    /// Stress level (1-10)
    pub stress: u8,
}

impl SessionRecord {
    /// Check every field against its declared bounds.
    ///
    /// # Errors
    /// Returns the first field that is out of range.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.arithmetic_duration_seconds.is_finite() || self.arithmetic_duration_seconds < 0.0 {
            return Err(ValidationError::invalid(
                "T_arith",
                format!("must be a non-negative number, got {}", self.arithmetic_duration_seconds),
            ));
        }
        if !self.reaction_time_seconds.is_finite()
            || self.reaction_time_seconds < MIN_REACTION_TIME_SECS
        {
            return Err(ValidationError::invalid(
                "RT",
                format!(
                    "must be at least {MIN_REACTION_TIME_SECS}s, got {}",
                    self.reaction_time_seconds
                ),
            ));
        }
        for (field, score) in [
            ("stroop", self.stroop_score),
            ("two_back", self.two_back_score),
            ("word_pair", self.word_pair_score),
        ] {
            if !(0.0..=1.0).contains(&score) {
                return Err(ValidationError::invalid(
                    field,
                    format!("must be in [0, 1], got {score}"),
                ));
            }
        }
        check_scale("KSS", self.kss, 1, 9)?;
        check_scale("sleep_q", self.sleep_quality, 1, 5)?;
        check_scale("stress", self.stress, 1, 10)?;
        Ok(())
    }

    /// Raw value of a metric as a float.
    pub fn value(&self, metric: Metric) -> f64 {
        match metric {
            Metric::ArithmeticDuration => self.arithmetic_duration_seconds,
            Metric::ArithmeticErrors => f64::from(self.arithmetic_errors),
            Metric::ReactionTime => self.reaction_time_seconds,
            Metric::Stroop => self.stroop_score,
            Metric::TwoBack => self.two_back_score,
            Metric::WordPair => self.word_pair_score,
            Metric::Sleepiness => f64::from(self.kss),
            Metric::Caffeine => f64::from(self.caffeine_minutes),
            Metric::SleepQuality => f64::from(self.sleep_quality),
            Metric::Stress => f64::from(self.stress),
        }
    }
}

fn check_scale(field: &str, value: u8, min: u8, max: u8) -> Result<(), ValidationError> {
    if value < min || value > max {
        return Err(ValidationError::invalid(
            field,
            format!("must be in [{min}, {max}], got {value}"),
        ));
    }
    Ok(())
}

/// Raw metrics carried by a session, keyed by their log column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    ArithmeticDuration,
    ArithmeticErrors,
    ReactionTime,
    Stroop,
    TwoBack,
    WordPair,
    Sleepiness,
    Caffeine,
    SleepQuality,
    Stress,
}

impl Metric {
    pub const ALL: [Metric; 10] = [
        Metric::ArithmeticDuration,
        Metric::ArithmeticErrors,
        Metric::ReactionTime,
        Metric::Stroop,
        Metric::TwoBack,
        Metric::WordPair,
        Metric::Sleepiness,
        Metric::Caffeine,
        Metric::SleepQuality,
        Metric::Stress,
    ];

    /// Column name in the persisted log.
    pub fn column(self) -> &'static str {
        match self {
            Metric::ArithmeticDuration => "T_arith",
            Metric::ArithmeticErrors => "E_arith",
            Metric::ReactionTime => "RT",
            Metric::Stroop => "stroop",
            Metric::TwoBack => "two_back",
            Metric::WordPair => "word_pair",
            Metric::Sleepiness => "KSS",
            Metric::Caffeine => "caffeine_min",
            Metric::SleepQuality => "sleep_q",
            Metric::Stress => "stress",
        }
    }
}

/// All stored sessions in append (chronological) order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistorySet {
    records: Vec<SessionRecord>,
}

impl HistorySet {
    pub fn new(records: Vec<SessionRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[SessionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The last `n` sessions (fewer if the history is shorter).
    pub fn tail(&self, n: usize) -> &[SessionRecord] {
        let start = self.records.len().saturating_sub(n);
        &self.records[start..]
    }
}

/// Split into the session under evaluation and the baseline before it.
///
/// # Errors
/// Returns [`EvaluationError::InsufficientHistory`] with fewer than two
/// sessions, since the baseline would be empty.
pub(crate) fn split_latest(
    records: &[SessionRecord],
) -> Result<(&SessionRecord, &[SessionRecord]), EvaluationError> {
    match records.split_last() {
        Some((latest, baseline)) if !baseline.is_empty() => Ok((latest, baseline)),
        _ => Err(EvaluationError::InsufficientHistory {
            records: records.len(),
        }),
    }
}

/// ISO-8601 timestamps without offset, as written by the log.
///
/// Reading also accepts RFC 3339 strings carrying an offset; the wall-clock
/// part is kept so the time-of-day bucket matches what the user saw.
pub mod iso_timestamp {
    use chrono::{DateTime, NaiveDateTime};
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

    pub fn serialize<S: Serializer>(ts: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&ts.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(serde::de::Error::custom)
    }

    /// Parse a timestamp in any of the accepted forms.
    pub fn parse(raw: &str) -> Result<NaiveDateTime, String> {
        let raw = raw.trim();
        if let Ok(ts) = NaiveDateTime::parse_from_str(raw, FORMAT) {
            return Ok(ts);
        }
        if let Ok(ts) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f") {
            return Ok(ts);
        }
        DateTime::parse_from_rfc3339(raw)
            .map(|ts| ts.naive_local())
            .map_err(|e| format!("invalid timestamp '{raw}': {e}"))
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use chrono::NaiveDate;

    /// A valid session at the given day/hour with typical values.
    pub fn record_at(day: u32, hour: u32) -> SessionRecord {
        SessionRecord {
            timestamp: NaiveDate::from_ymd_opt(2024, 5, day)
                .and_then(|d| d.and_hms_opt(hour, 0, 0))
                .unwrap(),
            arithmetic_duration_seconds: 10.0,
            arithmetic_errors: 0,
            reaction_time_seconds: 0.4,
            stroop_score: 0.9,
            two_back_score: 0.9,
            word_pair_score: 0.9,
            kss: 3,
            caffeine_minutes: 120,
            sleep_quality: 4,
            stress: 3,
        }
    }
}
