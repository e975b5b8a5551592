//! Best score tracking for the current process
//!
//! Kept in memory only: a reload starts from zero.

use serde::{Deserialize, Serialize};

/// Maximum number of finished runs remembered
pub const MAX_RECENT_RUNS: usize = 10;

/// Best score and a short history of finished runs
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HighScores {
    best: u32,
    runs_played: u32,
    /// Most recent first
    recent: Vec<u32>,
}

impl HighScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finished run. Returns true if it set a new best.
    pub fn record(&mut self, score: u32) -> bool {
        self.runs_played += 1;
        self.recent.insert(0, score);
        self.recent.truncate(MAX_RECENT_RUNS);

        if score > self.best {
            self.best = score;
            true
        } else {
            false
        }
    }

    /// Highest score so far (0 before any run)
    pub fn best(&self) -> u32 {
        self.best
    }

    pub fn runs_played(&self) -> u32 {
        self.runs_played
    }

    /// Scores of the last few runs, most recent first
    pub fn recent(&self) -> &[u32] {
        &self.recent
    }

    /// Recent scores as a single display line, e.g. `"12 · 40 · 7"`
    pub fn recent_line(&self) -> String {
        self.recent
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(" · ")
    }
}
