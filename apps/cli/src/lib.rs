pub mod cli;
pub mod commands;
pub mod config;
pub mod date_utils;
pub mod db;
pub mod generator;
pub mod state;

use std::io;

use anyhow::Context;
use clap::Parser;
use microlearn_core::{ProgressError, ProgressStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Commands};
use crate::config::Config;
use crate::db::SqliteBlobStore;
use crate::generator::GeminiGenerator;
use crate::state::AppState;

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    tracing::info!(path = %config.db_path.display(), "opening progress database");
    let blob = SqliteBlobStore::open(&config.db_path)
        .with_context(|| format!("failed to open {}", config.db_path.display()))?;

    let store = if cli.recover_corrupt {
        ProgressStore::recover(blob, config.intervals.clone())?
    } else {
        ProgressStore::load(blob, config.intervals.clone()).map_err(|err| match err {
            ProgressError::CorruptState(_) => anyhow::anyhow!(
                "{err}. Re-run with --recover-corrupt to move it aside and start fresh."
            ),
            other => other.into(),
        })?
    };

    let generator = GeminiGenerator::new(config.gemini.clone())?;
    let mut state = AppState::new(store, generator);
    let today = date_utils::today(config.daily_reset_hour);

    let mut input = io::stdin().lock();
    let mut out = io::stdout().lock();

    match cli.command {
        Commands::New { topic } => {
            commands::topic::create_topic(&mut state, &topic, today, &mut out).await
        }
        Commands::Topics => commands::topic::list_topics(&state, &mut out),
        Commands::Dashboard { topic } => {
            commands::dashboard::show_dashboard(&mut state, &topic, today, &mut out)
        }
        Commands::Read { topic } => commands::dashboard::show_reading(&mut state, &topic, &mut out),
        Commands::Flashcards { topic } => {
            commands::study::review_flashcards(&mut state, &topic, today, &mut input, &mut out)
        }
        Commands::Quiz { topic } => {
            commands::study::take_quiz(&mut state, &topic, today, &mut input, &mut out)
        }
    }
}
