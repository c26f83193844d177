use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod prompt;

#[derive(Parser)]
#[command(name = "study-readiness", version, about = "Study Readiness CLI")]
struct Cli {
    /// Session log to use instead of the configured one
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Config file to use instead of ~/.config/study-readiness/config.toml
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Record a completed test battery
    Log(commands::log::LogArgs),
    /// Show the last N logged sessions
    Show {
        /// Number of sessions (defaults to display.show_count)
        count: Option<usize>,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Evaluate the latest session against your history
    Evaluate {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Chart recent sessions in the terminal
    Chart {
        /// Number of sessions (defaults to display.chart_sessions)
        #[arg(long)]
        sessions: Option<usize>,
    },
    /// Delete the session log
    Clear,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Generate shell completions
    Completions {
        shell: clap_complete::Shell,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();

    let Cli {
        log_file,
        config,
        command,
    } = Cli::parse();
    let ctx = || commands::Context::load(config.clone(), log_file.clone());

    let result = match command {
        Commands::Log(args) => ctx().and_then(|ctx| commands::log::run(&ctx, args)),
        Commands::Show { count, json } => ctx().and_then(|ctx| commands::show::run(&ctx, count, json)),
        Commands::Evaluate { json } => ctx().and_then(|ctx| commands::evaluate::run(&ctx, json)),
        Commands::Chart { sessions } => ctx().and_then(|ctx| commands::chart::run(&ctx, sessions)),
        Commands::Clear => ctx().and_then(|ctx| commands::clear::run(&ctx)),
        Commands::Config { action } => ctx().and_then(|ctx| commands::config::run(ctx, action)),
        Commands::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "study-readiness",
                &mut std::io::stdout(),
            );
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
