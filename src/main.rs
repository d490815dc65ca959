use std::fs::OpenOptions;
use std::io::{stdout, BufWriter};
use std::thread;

use anyhow::Context;
use log::info;

use pixel_jumper::config::{default_config_path, GameConfig};
use pixel_jumper::display::{TerminalDisplay, TerminalSession};
use pixel_jumper::game_loop::{play, EndReason};
use pixel_jumper::input::TerminalInput;

// ── Logging ───────────────────────────────────────────────────────────────────

/// The terminal is in raw mode on the alternate screen while playing, so
/// log lines go to a file instead of stderr.
fn init_logging(config: &GameConfig) -> anyhow::Result<()> {
    let log_file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&config.log_file)
        .with_context(|| format!("Failed to open log file {}", config.log_file.display()))?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();
    Ok(())
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    // The log file location lives in the config, so the outcome of loading
    // it is only reported once the logger exists.
    let config_path = default_config_path();
    let loaded = GameConfig::load(&config_path)
        .with_context(|| format!("Failed to load {}", config_path.display()))?;
    let from_file = loaded.is_some();
    let config = loaded.unwrap_or_default();
    init_logging(&config)?;
    if from_file {
        info!("Loaded config from {}", config_path.display());
    } else {
        info!("No config at {}, using defaults", config_path.display());
    }
    info!("Starting pixel_jumper with {:?}", config);

    // Setup failures after raw mode is on still restore via the session's Drop.
    let mut session =
        TerminalSession::start(BufWriter::new(stdout())).context("Failed to set up terminal")?;

    let result = play(
        TerminalInput::new(config.input_poll()),
        TerminalDisplay::new(session.writer(), (0, 0)),
        config.tick(),
    );

    // Leave the final "Hit" frame up for a moment before the alternate
    // screen disappears.
    if matches!(&result, Ok(summary) if summary.reason == EndReason::Hit) {
        thread::sleep(config.hit_hold());
    }
    drop(session);

    let summary = result.context("Game loop failed")?;
    info!("Run over: {:?}", summary);
    println!("Score: {}", summary.score);
    Ok(())
}
