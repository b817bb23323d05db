//! Ontoedit TUI - terminal class-expression editor entry point

use anyhow::{Context, Result};
use clap::Parser;
use ontoedit_completion::{CompleterConfig, ConfigLoader, Vocabulary};
use ontoedit_tui::{sample_vocabulary, Editor, TuiApp};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Class-expression editor with context-sensitive completion
#[derive(Parser, Debug)]
#[command(name = "ontoedit-tui")]
#[command(version)]
#[command(about = "Class-expression editor with context-sensitive completion")]
struct Cli {
    /// Vocabulary file (YAML or JSON); defaults to a built-in pizza vocabulary
    #[arg(long, value_name = "PATH")]
    vocabulary: Option<PathBuf>,

    /// Completer configuration file (YAML or JSON)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write logs to this file; the terminal is busy drawing the editor
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Initial expression text
    #[arg(value_name = "EXPRESSION", default_value = "")]
    text: String,
}

fn load_vocabulary(path: &Path) -> Result<Vocabulary> {
    let vocabulary = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => Vocabulary::load_from_json(path),
        _ => Vocabulary::load_from_yaml(path),
    };
    vocabulary.with_context(|| format!("Failed to load vocabulary from {}", path.display()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        let file = File::create(path)
            .with_context(|| format!("Failed to create log file {}", path.display()))?;
        let level = if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        };
        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    }

    tracing::info!("Starting ontoedit TUI...");

    let config = match &cli.config {
        Some(path) => ConfigLoader::load_from_path(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => CompleterConfig::default(),
    };
    let vocabulary = match &cli.vocabulary {
        Some(path) => load_vocabulary(path)?,
        None => sample_vocabulary(),
    };

    let editor = Editor::new(&cli.text, vocabulary, &config);
    let mut app = TuiApp::new(editor)?;

    match app.run() {
        Ok(()) => {
            tracing::info!("TUI exited gracefully");
            Ok(())
        }
        Err(e) => {
            tracing::error!("TUI error: {}", e);
            Err(e.into())
        }
    }
}
