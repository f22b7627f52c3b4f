//! Best score persistence
//!
//! A single integer, read at game-clear time and written only when the new
//! score beats it. There are no concurrent writers, so compare-then-set is
//! the whole discipline. Storage errors are logged and swallowed; a missing
//! file reads as zero.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
struct Stored {
    best: u64,
}

/// The stored best score for this installation
#[derive(Debug)]
pub struct BestScore {
    path: PathBuf,
    best: u64,
}

impl BestScore {
    /// Load the stored best score; absent or unreadable reads as 0
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let best = match fs::read_to_string(&path) {
            Ok(json) => match serde_json::from_str::<Stored>(&json) {
                Ok(stored) => stored.best,
                Err(err) => {
                    log::warn!("Ignoring corrupt best score file: {err}");
                    0
                }
            },
            Err(_) => 0,
        };
        Self { path, best }
    }

    pub fn best(&self) -> u64 {
        self.best
    }

    /// Record a finished run. Writes only when `score` exceeds the stored
    /// value; returns true when a new best was persisted.
    pub fn record(&mut self, score: u64) -> bool {
        if score <= self.best {
            return false;
        }
        self.best = score;
        match serde_json::to_string(&Stored { best: score }) {
            Ok(json) => {
                if let Err(err) = fs::write(&self.path, json) {
                    log::warn!("Failed to write best score: {err}");
                } else {
                    log::info!("New best score: {score}");
                }
            }
            Err(err) => log::warn!("Failed to encode best score: {err}"),
        }
        true
    }
}
