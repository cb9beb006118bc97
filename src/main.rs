//! # FLAC to MP3 - Main Entry Point
//!
//! Questo è il punto di ingresso principale dell'applicazione.
//!
//! ## Responsabilità:
//! - Parsing degli argomenti della command line con `clap`
//! - Inizializzazione del sistema di logging con `tracing` (su stderr)
//! - Caricamento della configurazione e override da CLI
//! - Controllo delle dipendenze e avvio del batch
//!
//! ## Flusso di esecuzione:
//! 1. Parsa gli argomenti CLI (directory, bitrate, mapping, etc.)
//! 2. Configura il logging (`RUST_LOG`, oppure WARN/DEBUG a seconda di --verbose)
//! 3. Carica il file di configurazione e applica gli override
//! 4. Verifica che ffmpeg sia disponibile e carica la tabella di mapping
//! 5. Consuma lo stream di eventi su un thread bloccante e li mostra
//! 6. Opzionalmente cancella i FLAC convertiti in questa esecuzione
//!
//! ## Esempio di utilizzo:
//! ```bash
//! flac2mp3 /path/to/album --bitrate 256k --verbose
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use flac2mp3::converter::TARGET_EXTENSION;
use flac2mp3::file_manager::FileManager;
use flac2mp3::json_output::JsonMessage;
use flac2mp3::progress::ProgressManager;
use flac2mp3::tool_resolver::ToolPathResolver;
use flac2mp3::{
    BatchOrchestrator, BatchSummary, Config, MappingTable, ProgressEvent, ReferenceVocabulary,
    TagTranslator,
};

#[derive(Parser)]
#[command(name = "flac2mp3")]
#[command(about = "Convert a directory of FLAC files to MP3, keeping their tags")]
struct Args {
    /// Directory containing the FLAC files to convert
    directory: PathBuf,

    /// MP3 bitrate
    #[arg(short, long)]
    bitrate: Option<String>,

    /// JSON mapping table from FLAC keys to ID3 frames
    #[arg(short, long)]
    mapping: Option<PathBuf>,

    /// Configuration file (default: <config dir>/flac2mp3/config.json)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Path to the ffmpeg executable
    #[arg(long)]
    ffmpeg: Option<PathBuf>,

    /// Delete each FLAC file once its MP3 has been produced
    #[arg(long)]
    delete_originals: bool,

    /// Output progress as JSON lines on stdout
    #[arg(long)]
    json: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let default_level = if args.verbose { "debug" } else { "warn" };
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let config = match load_config(&args).await {
        Ok(config) => config,
        Err(e) => return fail(args.json, e),
    };

    match run(&args.directory, &config).await {
        Ok(()) => Ok(()),
        Err(e) => fail(config.json_output, e),
    }
}

/// Report a fatal error; in JSON mode as an `error` message with exit code 1
fn fail(json_output: bool, error: anyhow::Error) -> Result<()> {
    if json_output {
        JsonMessage::error(error.to_string(), Some(format!("{:#}", error))).emit();
        std::process::exit(1);
    }
    Err(error)
}

/// Configuration file values, overridden by command line flags
async fn load_config(args: &Args) -> Result<Config> {
    let config_path = args.config.clone().or_else(Config::default_path);
    let mut config = match config_path {
        Some(ref path) => Config::from_file(path)
            .await
            .with_context(|| format!("Failed to load configuration {}", path.display()))?,
        None => Config::default(),
    };

    if let Some(ref bitrate) = args.bitrate {
        config.bitrate = bitrate.clone();
    }
    if args.mapping.is_some() {
        config.mapping_file = args.mapping.clone();
    }
    if args.ffmpeg.is_some() {
        config.ffmpeg_path = args.ffmpeg.clone();
    }
    config.delete_originals |= args.delete_originals;
    config.json_output |= args.json;

    config.validate()?;
    debug!("Effective configuration: {:?}", config);
    Ok(config)
}

async fn run(directory: &Path, config: &Config) -> Result<()> {
    let ffmpeg = ToolPathResolver::new()
        .with_ffmpeg(config.ffmpeg_path.clone())
        .dependency_check()?;
    info!("Using ffmpeg at {}", ffmpeg.display());

    let mapping = MappingTable::load_or_builtin(config.mapping_file.as_deref())?;
    info!("Loaded {} tag mappings", mapping.len());

    let translator = TagTranslator::new(Arc::new(mapping), ReferenceVocabulary::easy_id3());
    let orchestrator = BatchOrchestrator::with_ffmpeg(ffmpeg, translator);

    let started = Instant::now();
    let (tx, mut rx) = mpsc::channel::<ProgressEvent>(64);
    let batch_dir = directory.to_path_buf();
    let bitrate = config.bitrate.clone();

    // Each step of the run blocks on ffmpeg or file I/O
    let worker = tokio::task::spawn_blocking(
        move || -> flac2mp3::error::Result<(BatchSummary, Vec<PathBuf>)> {
            let mut batch = orchestrator.run_batch(&batch_dir, &bitrate)?;
            for event in batch.by_ref() {
                if tx.blocking_send(event).is_err() {
                    break;
                }
            }
            Ok((batch.summary().clone(), batch.converted_sources().to_vec()))
        },
    );

    let progress = (!config.json_output).then(ProgressManager::new);
    while let Some(event) = rx.recv().await {
        match progress {
            Some(ref progress) => progress.update(&event),
            None => JsonMessage::from(&event).emit(),
        }
    }

    let (summary, converted) = match worker.await? {
        Ok(outcome) => outcome,
        Err(e) => {
            if let Some(ref progress) = progress {
                progress.clear();
            }
            return Err(e.into());
        }
    };

    if config.delete_originals {
        for line in FileManager::delete_converted_sources(&converted, TARGET_EXTENSION) {
            match progress {
                Some(ref progress) => progress.println(&line),
                None => info!("{}", line),
            }
        }
    }

    match progress {
        Some(ref progress) => progress.finish(&summary.format_summary()),
        None => JsonMessage::complete(summary, started.elapsed().as_secs_f64()).emit(),
    }

    Ok(())
}
