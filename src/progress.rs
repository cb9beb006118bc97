//! # Progress Reporting Module
//!
//! Questo modulo gestisce il feedback visuale del batch da terminale.
//!
//! ## Responsabilità:
//! - Progress bar con `indicatif`, posizionata sulla percentuale dell'evento
//! - Stampa di ogni riga di log sopra la barra
//! - Messaggio finale con il riepilogo del batch
//!
//! ## Visual feedback:
//! ```text
//! Adding TIT2 (Title) with value Song ...
//! ⠋ [00:00:12] [=====================>------------------]  50% Converting b.flac...
//! ```
//!
//! ## Esempio:
//! ```rust,no_run
//! use flac2mp3::progress::ProgressManager;
//! use flac2mp3::batch::ProgressEvent;
//!
//! let progress = ProgressManager::new();
//! progress.update(&ProgressEvent::new(50, "Converting a.flac..."));
//! progress.finish("Conversion complete.");
//! ```

use crate::batch::ProgressEvent;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Manages progress reporting for a conversion batch
#[derive(Clone)]
pub struct ProgressManager {
    bar: ProgressBar,
}

impl ProgressManager {
    /// Create a new progress manager, 0-100
    pub fn new() -> Self {
        let bar = ProgressBar::new(100);

        if let Ok(style) = ProgressStyle::default_bar().template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {percent:>3}% {msg}",
        ) {
            bar.set_style(style.progress_chars("=>-"));
        }

        bar.enable_steady_tick(Duration::from_millis(100));

        Self { bar }
    }

    /// Draws nothing
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }

    /// Move the bar to the event's percent and log its message above it
    pub fn update(&self, event: &ProgressEvent) {
        self.bar.set_position(u64::from(event.percent));
        if event.message.starts_with("Converting ") {
            self.bar.set_message(event.message.clone());
        }
        self.bar.println(&event.message);
    }

    /// Print a line above the bar without moving it
    pub fn println(&self, message: &str) {
        self.bar.println(message);
    }

    /// Finish with a final message
    pub fn finish(&self, message: &str) {
        self.bar.finish_with_message(message.to_string());
    }

    /// Remove the bar from the terminal
    pub fn clear(&self) {
        self.bar.finish_and_clear();
    }

    pub fn position(&self) -> u64 {
        self.bar.position()
    }
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_follows_event_percent() {
        let progress = ProgressManager::hidden();
        progress.update(&ProgressEvent::new(50, "Converting a.flac..."));
        assert_eq!(progress.position(), 50);

        progress.update(&ProgressEvent::new(100, "Conversion complete."));
        assert_eq!(progress.position(), 100);
    }
}
