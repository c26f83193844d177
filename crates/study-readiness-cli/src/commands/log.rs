//! Record a completed test battery.

use std::io;

use chrono::Local;
use clap::Args;

use study_readiness_core::{Checkin, CheckinQuestion, SessionRecord, SessionStore};

use super::Context;
use crate::prompt;

#[derive(Args)]
pub struct LogArgs {
    /// Arithmetic block duration in seconds
    #[arg(long)]
    pub arith_time: f64,
    /// Arithmetic errors
    #[arg(long)]
    pub arith_errors: u32,
    /// Mean reaction time in seconds
    #[arg(long)]
    pub reaction_time: f64,
    /// Stroop accuracy (0-1)
    #[arg(long)]
    pub stroop: f64,
    /// 2-back accuracy (0-1)
    #[arg(long)]
    pub two_back: f64,
    /// Word-pair recall accuracy (0-1)
    #[arg(long)]
    pub word_pair: f64,
    /// Karolinska Sleepiness Scale (1-9); prompted if omitted
    #[arg(long, allow_hyphen_values = true)]
    pub kss: Option<i64>,
    /// Time since last caffeine (e.g. 45, 2h, none); prompted if omitted
    #[arg(long)]
    pub caffeine: Option<String>,
    /// Sleep quality (1-5); prompted if omitted
    #[arg(long, allow_hyphen_values = true)]
    pub sleep_quality: Option<i64>,
    /// Stress level (1-10); prompted if omitted
    #[arg(long, allow_hyphen_values = true)]
    pub stress: Option<i64>,
    /// Print the stored record as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(ctx: &Context, args: LogArgs) -> Result<(), Box<dyn std::error::Error>> {
    let checkin = collect_checkin(ctx, &args)?;

    let record = SessionRecord {
        timestamp: Local::now().naive_local(),
        arithmetic_duration_seconds: args.arith_time,
        arithmetic_errors: args.arith_errors,
        reaction_time_seconds: args.reaction_time,
        stroop_score: args.stroop,
        two_back_score: args.two_back,
        word_pair_score: args.word_pair,
        kss: checkin.kss,
        caffeine_minutes: checkin.caffeine_minutes,
        sleep_quality: checkin.sleep_quality,
        stress: checkin.stress,
    };

    let mut log = ctx.session_log()?;
    log.append(&record)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        println!("Results logged to {}", log.path().display());
    }
    Ok(())
}

/// Use answers given as flags, prompting for the rest.
fn collect_checkin(ctx: &Context, args: &LogArgs) -> Result<Checkin, Box<dyn std::error::Error>> {
    let caffeine = match &args.caffeine {
        Some(raw) => Some(CheckinQuestion::Caffeine.parse_answer(raw)?),
        None => None,
    };
    let given = [args.kss, caffeine, args.sleep_quality, args.stress];

    let mut answers = [0i64; 4];
    let mut prompted = false;
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    for ((slot, value), question) in answers.iter_mut().zip(given).zip(CheckinQuestion::ALL) {
        *slot = match value {
            Some(value) => value,
            None => {
                if !prompted {
                    println!("\nManual Check-ins:");
                    prompted = true;
                }
                prompt::ask(&mut input, &mut output, question, ctx.config.prompts.max_attempts)?
            }
        };
    }

    let [kss, caffeine, sleep_quality, stress] = answers;
    Ok(Checkin::clamped(kss, caffeine, sleep_quality, stress))
}
