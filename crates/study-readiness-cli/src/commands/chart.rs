use study_readiness_core::{SessionChart, SessionStore};

use super::Context;

pub fn run(ctx: &Context, sessions: Option<usize>) -> Result<(), Box<dyn std::error::Error>> {
    let log = ctx.session_log()?;
    let sessions = sessions.unwrap_or(ctx.config.display.chart_sessions);

    let Some(history) = log.load_all()? else {
        println!("Log file not found: {}", log.path().display());
        return Ok(());
    };

    let chart = SessionChart::from_records(history.records(), sessions);
    print!("{}", chart.render_ascii());
    Ok(())
}
