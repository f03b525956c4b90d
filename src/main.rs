//! Flashdeck - French/Spanish vocabulary flashcards
//!
//! Main entry point for the terminal application.
//!
//! # Execution Flow
//!
//! 1. Parse command line flags
//! 2. Load settings from `<config-dir>/settings.yaml` and `FLASHDECK_*` variables; flags override both
//! 3. Initialize logging → `<log_dir>/flashdeck.<date>`
//! 4. Load preferences (theme, preferred voice) from `<config-dir>/preferences.yaml`
//! 5. Load the vocabulary dataset; a failure shows the load-error screen instead of aborting
//! 6. Create a single-threaded tokio runtime and run the session controller until `exit`
//! 7. Log the session summary and shut the runtime down

use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use clap::Parser;
use flashdeck::ui::terminal::{self, HELP};
use flashdeck::ui::{Command, SessionController, TerminalFrontend, TerminalSpeech};
use flashdeck::{
    APP_NAME, ConfigManager, PreferenceStore, Session, SessionMetrics, VERSION, VocabularyStore,
};
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "flashdeck", about = "French/Spanish vocabulary flashcards", version)]
struct Cli {
    /// Directory holding settings.yaml and preferences.yaml
    #[arg(long, default_value = "flashdeck-data")]
    config_dir: Utf8PathBuf,

    /// Vocabulary JSON file (overrides the settings file)
    #[arg(long)]
    dataset: Option<Utf8PathBuf>,

    /// Enable debug logging to the console
    #[arg(long)]
    debug: bool,

    /// Seed for quiz and random navigation draws
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_manager = ConfigManager::new(&cli.config_dir)?;
    let mut settings = config_manager.load_settings()?;
    if let Some(dataset) = cli.dataset {
        settings.dataset_path = dataset;
    }
    if cli.debug {
        settings.debug_mode = true;
        settings.console_log = true;
    }

    // Guard must outlive every log call
    let _log_guard = flashdeck::logging::setup_logging(
        &settings.log_dir,
        APP_NAME,
        settings.debug_mode,
        settings.console_log,
    )?;

    tracing::info!("Starting {} v{}", APP_NAME, VERSION);

    let preferences = config_manager.load_preferences().unwrap_or_else(|e| {
        tracing::warn!("Failed to load preferences, using defaults: {:#}", e);
        Default::default()
    });

    let vocabulary = VocabularyStore::load_file(&settings.dataset_path);
    let voices = settings.voices.clone();

    let session = match cli.seed {
        Some(seed) => Session::with_seed(vocabulary, preferences, settings, seed),
        None => Session::new(vocabulary, preferences, settings),
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to create tokio runtime")?;

    let metrics = Arc::new(SessionMetrics::new());

    println!("{} v{}", APP_NAME, VERSION);
    println!("{}", HELP);

    runtime.block_on(async {
        let (controller, command_tx) = SessionController::new(
            session,
            Box::new(TerminalFrontend::stdout()),
            Box::new(TerminalSpeech::stdout()),
            Box::new(config_manager),
            metrics.clone(),
            tokio::runtime::Handle::current(),
        );

        // The terminal has a fixed catalog, announced once like a platform would
        if command_tx.send(Command::VoicesChanged(voices)).await.is_err() {
            tracing::warn!("Controller closed before the voice catalog was sent");
        }

        let _input = terminal::spawn_input_reader(command_tx);
        controller.run().await;
    });

    metrics.log_summary();

    // The stdin reader may still be blocked on a read
    runtime.shutdown_timeout(Duration::from_millis(500));

    tracing::info!("Application shutdown complete");
    Ok(())
}
