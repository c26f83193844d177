//! Manual check-in values recorded alongside the test battery.
//!
//! The check-in covers four self-reports: sleepiness (KSS), time since last
//! caffeine, sleep quality, and stress. Answers are parsed from free text and
//! clamped to their scales before they reach the session log.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::session::NO_CAFFEINE_MINUTES;

/// Answers that mean "no caffeine today".
const NO_CAFFEINE_ANSWERS: [&str; 3] = ["none", "n/a", "never"];

/// Clamped check-in answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkin {
    /// Karolinska Sleepiness Scale (1-9)
    pub kss: u8,
    /// Minutes since last caffeine intake
    pub caffeine_minutes: u32,
    /// Sleep quality (1-5)
    pub sleep_quality: u8,
    /// Stress level (1-10)
    pub stress: u8,
}

impl Checkin {
    /// Build a check-in, clamping each answer into its scale.
    pub fn clamped(kss: i64, caffeine_minutes: i64, sleep_quality: i64, stress: i64) -> Self {
        Self {
            kss: kss.clamp(1, 9) as u8,
            caffeine_minutes: caffeine_minutes.clamp(0, i64::from(u32::MAX)) as u32,
            sleep_quality: sleep_quality.clamp(1, 5) as u8,
            stress: stress.clamp(1, 10) as u8,
        }
    }
}

/// Which check-in question an answer belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckinQuestion {
    Sleepiness,
    Caffeine,
    SleepQuality,
    Stress,
}

impl CheckinQuestion {
    pub const ALL: [CheckinQuestion; 4] = [
        CheckinQuestion::Sleepiness,
        CheckinQuestion::Caffeine,
        CheckinQuestion::SleepQuality,
        CheckinQuestion::Stress,
    ];

    /// Prompt text shown to the user.
    pub fn prompt(self) -> &'static str {
        match self {
            CheckinQuestion::Sleepiness => {
                "Karolinska Sleepiness Scale (1=Very alert to 9=Very sleepy): "
            }
            CheckinQuestion::Caffeine => {
                "When was your last caffeine intake? (e.g., 45, 2h, none): "
            }
            CheckinQuestion::SleepQuality => {
                "How would you rate your sleep quality? (1=Terrible to 5=Excellent): "
            }
            CheckinQuestion::Stress => "Current stress level (1=Relaxed to 10=Very stressed): ",
        }
    }

    /// Hint shown after an answer that could not be parsed.
    pub fn retry_hint(self) -> &'static str {
        match self {
            CheckinQuestion::Caffeine => "Invalid input. Use '45', '2h', or 'none'.",
            _ => "Invalid input. Please enter a whole number.",
        }
    }

    fn field(self) -> &'static str {
        match self {
            CheckinQuestion::Sleepiness => "KSS",
            CheckinQuestion::Caffeine => "caffeine_min",
            CheckinQuestion::SleepQuality => "sleep_q",
            CheckinQuestion::Stress => "stress",
        }
    }

    /// Parse a raw answer. Scale answers are not clamped here.
    ///
    /// # Errors
    /// Returns [`ValidationError::InvalidValue`] when the text is not a
    /// recognised answer.
    pub fn parse_answer(self, input: &str) -> Result<i64, ValidationError> {
        match self {
            CheckinQuestion::Caffeine => parse_caffeine_minutes(input).map(i64::from),
            _ => parse_scale(input, self.field()),
        }
    }
}

/// Parse "time since last caffeine" into minutes.
///
/// Accepts plain minutes (`45`), hours with an `h` suffix (`2h`, `1.5h`), or
/// one of `none`, `n/a`, `never` which map to 36 hours.
///
/// # Errors
/// Returns [`ValidationError::InvalidValue`] for anything else, including
/// negative durations.
pub fn parse_caffeine_minutes(input: &str) -> Result<u32, ValidationError> {
    let s = input.trim().to_lowercase();
    if NO_CAFFEINE_ANSWERS.contains(&s.as_str()) {
        return Ok(NO_CAFFEINE_MINUTES);
    }

    let invalid = || {
        ValidationError::invalid(
            "caffeine_min",
            format!("'{}' is not minutes, hours (e.g. 2h), or 'none'", input.trim()),
        )
    };

    if let Some(hours) = s.strip_suffix('h') {
        let hours: f64 = hours.trim().parse().map_err(|_| invalid())?;
        if !hours.is_finite() || hours < 0.0 {
            return Err(invalid());
        }
        return Ok((hours * 60.0) as u32);
    }

    s.parse::<u32>().map_err(|_| invalid())
}

/// Parse an integer answer to a rating-scale question.
///
/// # Errors
/// Returns [`ValidationError::InvalidValue`] when the answer is not an integer.
pub fn parse_scale(input: &str, field: &str) -> Result<i64, ValidationError> {
    input
        .trim()
        .parse::<i64>()
        .map_err(|_| ValidationError::invalid(field, format!("'{}' is not a whole number", input.trim())))
}
