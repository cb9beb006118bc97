//! # JSON Output Module
//!
//! Questo modulo gestisce l'output strutturato in JSON per l'uso programmatico.
//!
//! ## Responsabilità:
//! - Emette un messaggio JSON per ogni `ProgressEvent` del batch
//! - Riporta il riepilogo finale e gli errori fatali
//! - Una riga JSON per messaggio su stdout; i log vanno su stderr
//!
//! ## Tipi di messaggi:
//! - `progress`: Evento di progresso (percentuale, messaggio)
//! - `complete`: Fine del batch con il riepilogo
//! - `error`: Errore fatale prima o durante il batch

use crate::batch::{BatchSummary, ProgressEvent};
use serde::Serialize;

/// Tipo di messaggio JSON
#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub enum JsonMessage {
    /// Evento di progresso
    #[serde(rename = "progress")]
    Progress { percent: u8, message: String },

    /// Batch completato
    #[serde(rename = "complete")]
    Complete {
        #[serde(flatten)]
        summary: BatchSummary,
        duration_seconds: f64,
    },

    /// Errore generale
    #[serde(rename = "error")]
    Error {
        message: String,
        details: Option<String>,
    },
}

impl JsonMessage {
    /// Emette il messaggio JSON su stdout
    pub fn emit(&self) {
        if let Ok(json) = serde_json::to_string(self) {
            println!("{}", json);
        }
    }

    pub fn complete(summary: BatchSummary, duration_seconds: f64) -> Self {
        Self::Complete {
            summary,
            duration_seconds,
        }
    }

    /// Crea un messaggio di errore
    pub fn error(message: String, details: Option<String>) -> Self {
        Self::Error { message, details }
    }
}

impl From<&ProgressEvent> for JsonMessage {
    fn from(event: &ProgressEvent) -> Self {
        Self::Progress {
            percent: event.percent,
            message: event.message.clone(),
        }
    }
}
