//! Interactive check-in prompts.
//!
//! Each question is asked until it gets a parseable answer or the attempt
//! limit runs out. Reader and writer are generic so tests can script input.

use std::io::{BufRead, Write};

use study_readiness_core::CheckinQuestion;

/// Ask `question` up to `max_attempts` times.
pub fn ask<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    question: CheckinQuestion,
    max_attempts: u32,
) -> Result<i64, Box<dyn std::error::Error>> {
    let attempts = max_attempts.max(1);
    for attempt in 1..=attempts {
        write!(output, "{}", question.prompt())?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Err("input closed before the check-in was complete".into());
        }

        match question.parse_answer(&line) {
            Ok(value) => return Ok(value),
            Err(e) => {
                tracing::debug!(attempt, error = %e, "check-in answer rejected");
                writeln!(output, "{}", question.retry_hint())?;
            }
        }
    }
    Err(format!("no valid answer after {attempts} attempt(s)").into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn accepts_first_valid_answer() {
        let mut input = Cursor::new("7\n");
        let mut output = Vec::new();
        let value = ask(&mut input, &mut output, CheckinQuestion::Stress, 3).unwrap();
        assert_eq!(value, 7);
        let shown = String::from_utf8(output).unwrap();
        assert!(shown.starts_with("Current stress level"));
    }

    #[test]
    fn retries_until_valid() {
        let mut input = Cursor::new("soon\nlater\n2h\n");
        let mut output = Vec::new();
        let value = ask(&mut input, &mut output, CheckinQuestion::Caffeine, 3).unwrap();
        assert_eq!(value, 120);
        let shown = String::from_utf8(output).unwrap();
        assert_eq!(shown.matches("Invalid input. Use '45', '2h', or 'none'.").count(), 2);
    }

    #[test]
    fn gives_up_after_attempt_limit() {
        let mut input = Cursor::new("a\nb\nc\n4\n");
        let mut output = Vec::new();
        let err = ask(&mut input, &mut output, CheckinQuestion::Sleepiness, 2).unwrap_err();
        assert!(err.to_string().contains("2 attempt(s)"));
    }

    #[test]
    fn closed_input_is_an_error() {
        let mut input = Cursor::new("");
        let mut output = Vec::new();
        assert!(ask(&mut input, &mut output, CheckinQuestion::SleepQuality, 3).is_err());
    }
}
