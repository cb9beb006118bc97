//! # FLAC to MP3 Library
//!
//! Questo è il modulo principale della libreria che espone tutte le API pubbliche.
//!
//! ## Responsabilità:
//! - Definisce la struttura modulare dell'applicazione
//! - Espone i tipi e le funzioni principali tramite re-exports
//! - Fornisce un'interfaccia pulita per il main.rs e per altri consumatori
//!
//! ## Architettura dei moduli:
//! - `config`: Gestione configurazione e validazione parametri
//! - `error`: Tipi di errore custom per diverse operazioni
//! - `mapping`: Tabella chiave sorgente → frame ID3
//! - `vocabulary`: Vocabolario di riferimento delle chiavi traducibili
//! - `metadata`: Lettura dei Vorbis comment e delle immagini dai FLAC
//! - `translator`: Traduzione dei tag in frame ID3 e scrittura nel contenitore
//! - `converter`: Conversione FLAC → MP3 tramite ffmpeg
//! - `batch`: Orchestratore del batch e stream di eventi di progresso
//! - `file_manager`: Discovery dei file e cancellazione degli originali
//! - `tool_resolver`: Ricerca dell'eseguibile ffmpeg
//! - `progress`: Progress bar da terminale
//! - `json_output`: Output JSON per uso programmatico
//!
//! ## Utilizzo:
//! ```rust,no_run
//! use flac2mp3::{BatchOrchestrator, MappingTable, ReferenceVocabulary, TagTranslator};
//! use std::path::{Path, PathBuf};
//! use std::sync::Arc;
//!
//! let translator = TagTranslator::new(
//!     Arc::new(MappingTable::builtin()?),
//!     ReferenceVocabulary::easy_id3(),
//! );
//! let orchestrator = BatchOrchestrator::with_ffmpeg(PathBuf::from("ffmpeg"), translator);
//! for event in orchestrator.run_batch(Path::new("/music/album"), "192k")? {
//!     println!("{:>3}% {}", event.percent, event.message);
//! }
//! # Ok::<(), flac2mp3::ConvertError>(())
//! ```

pub mod batch;
pub mod config;
pub mod converter;
pub mod error;
pub mod file_manager;
pub mod json_output;
pub mod mapping;
pub mod metadata;
pub mod progress;
pub mod tool_resolver;
pub mod translator;
pub mod utils;
pub mod vocabulary;

pub use batch::{BatchOrchestrator, BatchRun, BatchSummary, ProgressEvent};
pub use config::Config;
pub use converter::{ConversionDriver, Transcoder};
pub use error::ConvertError;
pub use mapping::{MappingEntry, MappingTable};
pub use metadata::{CanonicalTagSet, EmbeddedImage, FlacMetadataReader, MetadataReader};
pub use translator::{TagTranslator, TargetFrame, TranslationIssue};
pub use vocabulary::ReferenceVocabulary;
