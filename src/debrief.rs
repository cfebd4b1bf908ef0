//! Mission debrief and best-runs board
//!
//! Kept in memory for the lifetime of the page; tracks the top 10 runs.

use serde::{Deserialize, Serialize};

use crate::format_time;
use crate::sim::FinalStats;

/// Maximum number of runs to keep
pub const MAX_BEST_RUNS: usize = 10;

/// Summary shown when a session ends
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Debrief {
    pub message: String,
    pub success: bool,
    pub score: u64,
    /// Whole seconds
    pub elapsed_secs: u64,
    /// `MM:SS`
    pub time: String,
    /// e.g. `2/3`
    pub samples: String,
    pub tools: String,
}

impl Debrief {
    pub fn new(stats: &FinalStats, total_samples: usize, total_tools: usize) -> Self {
        let elapsed_secs = stats.elapsed_secs.max(0.0).floor() as u64;
        Self {
            message: stats.outcome.message().to_string(),
            success: stats.outcome.is_success(),
            score: stats.score,
            elapsed_secs,
            time: format_time(elapsed_secs),
            samples: format!("{}/{}", stats.samples_collected, total_samples),
            tools: format!("{}/{}", stats.tools_used, total_tools),
        }
    }

    /// Multi-line text for the end-of-mission dialog
    pub fn summary(&self) -> String {
        format!(
            "{}\n\nFinal Score: {}\nTime: {}\nSamples: {}\nTools: {}",
            self.message, self.score, self.time, self.samples, self.tools
        )
    }
}

/// Best runs, sorted descending by score
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BestRuns {
    pub entries: Vec<Debrief>,
}

impl BestRuns {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score qualifies for the board
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_BEST_RUNS {
            return true;
        }
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Rank a score would achieve (1-indexed, None if it doesn't qualify)
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Record a run; returns the rank achieved (1-indexed)
    pub fn record(&mut self, debrief: Debrief) -> Option<usize> {
        if !self.qualifies(debrief.score) {
            return None;
        }

        let pos = self.entries.iter().position(|e| debrief.score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, debrief);
                i + 1
            }
            None => {
                self.entries.push(debrief);
                self.entries.len()
            }
        };

        self.entries.truncate(MAX_BEST_RUNS);
        log::info!("Run recorded at rank {rank}");

        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }
}
