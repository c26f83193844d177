use study_readiness_core::session::LOG_COLUMNS;
use study_readiness_core::SessionRecord;

use super::Context;

pub fn run(ctx: &Context, count: Option<usize>, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let log = ctx.session_log()?;
    let count = count.unwrap_or(ctx.config.display.show_count);

    let Some(records) = log.tail(count)? else {
        println!("Log file not found: {}", log.path().display());
        return Ok(());
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
    } else if records.is_empty() {
        println!("No sessions logged yet.");
    } else {
        print!("{}", render_table(&records));
    }
    Ok(())
}

fn row(record: &SessionRecord) -> [String; 11] {
    [
        record.timestamp.format("%Y-%m-%dT%H:%M:%S").to_string(),
        format!("{:.3}", record.arithmetic_duration_seconds),
        record.arithmetic_errors.to_string(),
        format!("{:.3}", record.reaction_time_seconds),
        format!("{:.2}", record.stroop_score),
        format!("{:.2}", record.two_back_score),
        format!("{:.2}", record.word_pair_score),
        record.kss.to_string(),
        record.caffeine_minutes.to_string(),
        record.sleep_quality.to_string(),
        record.stress.to_string(),
    ]
}

/// Right-aligned table with the log's column names as header.
fn render_table(records: &[SessionRecord]) -> String {
    let rows: Vec<[String; 11]> = records.iter().map(row).collect();
    let widths: Vec<usize> = LOG_COLUMNS
        .iter()
        .enumerate()
        .map(|(i, name)| rows.iter().map(|r| r[i].len()).fold(name.len(), usize::max))
        .collect();

    let mut output = String::new();
    let header: Vec<String> = LOG_COLUMNS
        .iter()
        .zip(&widths)
        .map(|(name, width)| format!("{name:>width$}"))
        .collect();
    output.push_str(&header.join(" "));
    output.push('\n');

    for r in &rows {
        let cells: Vec<String> = r
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{cell:>width$}"))
            .collect();
        output.push_str(&cells.join(" "));
        output.push('\n');
    }
    output
}
