use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tokio::sync::mpsc;

use crate::config::Config;
use crate::llm::GeminiClient;
use crate::translation::Translator;
use crate::translation_service::TranslationService;
use crate::tui::TuiApp;
use crate::tui::events::spawn_key_reader;

mod config;
mod entities;
mod language;
mod llm;
mod translation;
mod translation_service;
mod tui;

/// Translate a sentence between two languages and explain it word by word.
#[derive(Debug, Parser)]
#[command(name = "sentence-lens", version, about)]
struct Cli {
    /// Config file to use instead of ~/.config/sentence-lens/config.toml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write debug logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Write the default config to the config path and exit
    #[arg(long)]
    init_config: bool,
}

/// The terminal belongs to the UI, so logs only go to a file when asked for.
fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file: {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let config_path = Config::resolve_path(cli.config);
    if cli.init_config {
        Config::default().save_to_path(&config_path)?;
        println!("Wrote default config to {}", config_path.display());
        return Ok(());
    }

    let config = Config::load_from_path(&config_path)?;
    let api_key = config.api_key()?;

    let llm = GeminiClient::new(config.endpoint.clone(), api_key, config.request_timeout())?;
    let translator = Translator::new(llm, &config);

    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let mut app = TuiApp::new(TranslationService::new(translator, event_tx.clone()));

    let mut terminal = ratatui::init();
    spawn_key_reader(event_tx);
    let result = app.run(&mut terminal, event_rx).await;
    ratatui::restore();

    tracing::info!("Session ended");
    result
}
