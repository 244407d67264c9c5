//! High score leaderboard system
//!
//! Tracks the top 10 runs. The simulation only compares against the best
//! known score; writing the board to disk is up to the caller.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Player's score
    pub score: u64,
    /// Stage the run was on
    pub stage_id: String,
    /// Distance covered
    pub distance: f32,
    /// Unix timestamp (seconds) when achieved
    pub timestamp: u64,
}

/// High score leaderboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Check if score beats the lowest entry
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Get the rank a score would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Add a new score to the leaderboard (if it qualifies)
    /// Returns the rank achieved (1-indexed) or None if didn't qualify
    pub fn add_score(
        &mut self,
        score: u64,
        stage_id: &str,
        distance: f32,
        timestamp: u64,
    ) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let entry = HighScoreEntry {
            score,
            stage_id: stage_id.to_string(),
            distance,
            timestamp,
        };

        // Find insertion point (sorted descending by score)
        let pos = self.entries.iter().position(|e| score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        self.entries.truncate(MAX_HIGH_SCORES);

        Some(rank)
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Best score so far, zero when empty
    pub fn best(&self) -> u64 {
        self.top_score().unwrap_or(0)
    }

    /// Whether `score` beats every recorded run
    pub fn is_new_best(&self, score: u64) -> bool {
        score > self.best()
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load the leaderboard from a JSON file; missing or corrupt files start fresh
    pub fn load(path: &Path) -> Self {
        if let Ok(json) = std::fs::read_to_string(path) {
            match Self::from_json(&json) {
                Ok(scores) => {
                    log::info!("Loaded {} high scores", scores.entries.len());
                    return scores;
                }
                Err(err) => log::warn!("Discarding corrupt high scores: {}", err),
            }
        }

        log::info!("No high scores found, starting fresh");
        Self::new()
    }

    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string(self)?;
        std::fs::write(path, json)?;
        log::info!("High scores saved ({} entries)", self.entries.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_never_qualifies() {
        let scores = HighScores::new();
        assert!(!scores.qualifies(0));
        assert_eq!(scores.potential_rank(0), None);
        assert!(!scores.is_new_best(0));
    }

    #[test]
    fn test_sorted_insertion_and_rank() {
        let mut scores = HighScores::new();
        assert_eq!(scores.add_score(10, "stage_1_city", 900.0, 1), Some(1));
        assert_eq!(scores.add_score(30, "stage_1_city", 2500.0, 2), Some(1));
        assert_eq!(scores.add_score(20, "stage_2_beach", 1800.0, 3), Some(2));
        let order: Vec<u64> = scores.entries.iter().map(|e| e.score).collect();
        assert_eq!(order, vec![30, 20, 10]);
        assert_eq!(scores.top_score(), Some(30));
        assert_eq!(scores.potential_rank(15), Some(3));
    }

    #[test]
    fn test_board_is_capped() {
        let mut scores = HighScores::new();
        for s in 1..=MAX_HIGH_SCORES as u64 {
            scores.add_score(s * 10, "stage_1_city", 0.0, s);
        }
        assert!(!scores.qualifies(10));
        assert_eq!(scores.add_score(5, "stage_1_city", 0.0, 99), None);
        assert_eq!(scores.add_score(15, "stage_1_city", 0.0, 99), Some(10));
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(scores.entries.last().map(|e| e.score), Some(15));
    }

    #[test]
    fn test_new_best() {
        let mut scores = HighScores::new();
        assert!(scores.is_new_best(1));
        scores.add_score(12, "stage_1_city", 0.0, 0);
        assert!(!scores.is_new_best(12));
        assert!(scores.is_new_best(13));
    }

    #[test]
    fn test_corrupt_file_starts_fresh() {
        let path = std::env::temp_dir().join(format!("runner_scores_{}.json", std::process::id()));
        std::fs::write(&path, "not json").unwrap();
        assert!(HighScores::load(&path).is_empty());

        let mut scores = HighScores::new();
        scores.add_score(42, "stage_3_landscape", 4000.0, 7);
        scores.save(&path).unwrap();
        assert_eq!(HighScores::load(&path), scores);
        let _ = std::fs::remove_file(&path);
    }
}
