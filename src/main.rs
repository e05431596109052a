use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use omnicalc::ai::{LlmBackend, SolveClient};
use omnicalc::app::{AppState, Mode};
use omnicalc::config::Config;
use omnicalc::history::{HistoryStore, JsonFileBackend, MemoryBackend};
use omnicalc::shell::Shell;

#[derive(Parser)]
#[command(name = "omnicalc", version, about = "Keypad calculator with an AI assistant")]
struct Args {
    /// Path to config.toml
    #[arg(long)]
    config: Option<PathBuf>,

    /// History file to use instead of the configured one
    #[arg(long)]
    history_file: Option<PathBuf>,

    /// Mode to start in (standard, scientific, ai)
    #[arg(long)]
    mode: Option<Mode>,

    /// Keep history for this session only
    #[arg(long)]
    no_persist: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = Config::load(args.config.as_deref()).context("Failed to load configuration")?;

    let history = if args.no_persist || (!config.history.enabled && args.history_file.is_none()) {
        info!("History persistence disabled");
        HistoryStore::open(MemoryBackend::new())
    } else {
        let path = args
            .history_file
            .clone()
            .unwrap_or_else(|| config.history.resolved_path());
        info!(path = %path.display(), "Using history file");
        HistoryStore::open(JsonFileBackend::new(path))
    };

    let mode = args.mode.unwrap_or(config.default_mode);
    let state = AppState::new(history, mode);

    let backend = LlmBackend::from_config(&config.ai).context("Failed to set up AI backend")?;
    info!(model = backend.model(), "AI backend ready");

    let mut shell =
        Shell::new(state, SolveClient::new(backend)).context("Failed to start async runtime")?;
    shell
        .run(io::stdin().lock(), &mut io::stdout().lock())
        .context("Terminal I/O failed")?;

    Ok(())
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
