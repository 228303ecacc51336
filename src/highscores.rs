//! Best finished runs, kept across sessions in `highscores.json`
//!
//! The simulation itself only tracks a single highest score (see
//! [`crate::sim::Score`]). This board remembers which runs set it so the
//! next session can start from the best one.

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::error::ConfigResult;
use crate::persistence;
use crate::sim::FrameStats;

/// Runs kept on the board
pub const LEADERBOARD_SIZE: usize = 10;

/// One finished run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunRecord {
    pub score: u64,
    /// Asteroids shot down with the laser
    pub asteroids_destroyed: u32,
    /// Unix time in milliseconds
    pub timestamp: u64,
}

impl RunRecord {
    /// Record of a run from its last frame
    pub fn from_stats(stats: &FrameStats, timestamp: u64) -> Self {
        Self {
            score: stats.score,
            asteroids_destroyed: stats.asteroids_destroyed,
            timestamp,
        }
    }
}

/// Best runs, highest score first
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HighScores {
    runs: Vec<RunRecord>,
}

impl HighScores {
    pub fn runs(&self) -> &[RunRecord] {
        &self.runs
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Score to beat when a new session starts
    pub fn best(&self) -> Option<u64> {
        self.runs.first().map(|r| r.score)
    }

    /// 1-based place `score` would take, `None` if it stays off the board.
    /// Ties go below the runs that got there first.
    pub fn rank_for(&self, score: u64) -> Option<usize> {
        if score == 0 {
            return None;
        }
        let slot = self.runs.partition_point(|r| r.score >= score);
        (slot < LEADERBOARD_SIZE).then_some(slot + 1)
    }

    /// Put a finished run on the board; returns its place if it made it
    pub fn record(&mut self, run: RunRecord) -> Option<usize> {
        let rank = self.rank_for(run.score)?;
        self.runs.insert(rank - 1, run);
        self.runs.truncate(LEADERBOARD_SIZE);
        log::info!("Run scoring {} placed #{}", run.score, rank);
        Some(rank)
    }

    pub fn load(path: &Path) -> ConfigResult<Self> {
        let mut scores: HighScores = persistence::load_json(path)?;
        // Hand-edited files may be out of order
        scores.runs.sort_by(|a, b| b.score.cmp(&a.score));
        scores.runs.truncate(LEADERBOARD_SIZE);
        log::info!("Loaded {} high scores", scores.runs.len());
        Ok(scores)
    }

    /// Load the board, starting empty if the file is missing or unreadable
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(scores) => scores,
            Err(e) => {
                log::warn!("{e}; starting with an empty high score board");
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        persistence::save_json(path, self)
    }
}

/// Current Unix time in milliseconds
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

const AGE_UNITS: [(&str, u64); 4] = [
    ("week", 7 * 24 * 3600),
    ("day", 24 * 3600),
    ("hour", 3600),
    ("min", 60),
];

/// How long ago `timestamp` was, in the largest whole unit ("3 days ago")
pub fn format_age(now: u64, timestamp: u64) -> String {
    let secs = now.saturating_sub(timestamp) / 1000;
    for (unit, length) in AGE_UNITS {
        let count = secs / length;
        if count == 1 {
            return format!("1 {unit} ago");
        }
        if count > 1 {
            return format!("{count} {unit}s ago");
        }
    }
    "just now".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(score: u64) -> RunRecord {
        RunRecord {
            score,
            asteroids_destroyed: (score / 10_000) as u32,
            timestamp: 0,
        }
    }

    #[test]
    fn test_board_keeps_best_runs_in_order() {
        let mut scores = HighScores::default();
        for i in 1..=12u64 {
            scores.record(run(i * 10_000));
        }
        assert_eq!(scores.runs().len(), LEADERBOARD_SIZE);
        assert_eq!(scores.best(), Some(120_000));
        assert_eq!(scores.runs().last().map(|r| r.score), Some(30_000));
        assert!(scores.runs().windows(2).all(|w| w[0].score >= w[1].score));

        // 120k..60k hold places 1..7
        assert_eq!(scores.rank_for(55_000), Some(8));
        assert_eq!(scores.rank_for(30_000), None);
        assert_eq!(scores.rank_for(30_001), Some(10));
    }

    #[test]
    fn test_ties_rank_below_earlier_runs() {
        let mut scores = HighScores::default();
        scores.record(RunRecord {
            timestamp: 1,
            ..run(50_000)
        });
        assert_eq!(
            scores.record(RunRecord {
                timestamp: 2,
                ..run(50_000)
            }),
            Some(2)
        );
        assert_eq!(scores.runs()[0].timestamp, 1);
    }

    #[test]
    fn test_zero_score_is_not_recorded() {
        let mut scores = HighScores::default();
        assert_eq!(scores.record(run(0)), None);
        assert!(scores.is_empty());
        assert_eq!(scores.best(), None);
    }

    #[test]
    fn test_record_from_final_frame() {
        let stats = FrameStats {
            score: 90_000,
            asteroids_destroyed: 6,
            game_over: true,
            ..FrameStats::default()
        };
        let mut scores = HighScores::default();
        assert_eq!(scores.record(RunRecord::from_stats(&stats, 42)), Some(1));
        assert_eq!(scores.runs()[0].asteroids_destroyed, 6);
        assert_eq!(scores.runs()[0].timestamp, 42);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("highscores.json");
        let mut scores = HighScores::default();
        scores.record(RunRecord {
            timestamp: 1_700_000_000_000,
            ..run(40_000)
        });
        scores.save(&path).unwrap();

        assert_eq!(HighScores::load(&path).unwrap(), scores);
        assert!(HighScores::load_or_default(&dir.path().join("missing.json")).is_empty());
    }

    #[test]
    fn test_load_sorts_hand_edited_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("highscores.json");
        std::fs::write(
            &path,
            r#"{ "runs": [
                { "score": 10000, "asteroids_destroyed": 1, "timestamp": 0 },
                { "score": 80000, "asteroids_destroyed": 2, "timestamp": 0 }
            ] }"#,
        )
        .unwrap();

        let scores = HighScores::load(&path).unwrap();
        assert_eq!(scores.best(), Some(80_000));
    }

    #[test]
    fn test_format_age() {
        let now = 1_000_000_000_000;
        let minute = 60_000;
        let day = 1440 * minute;
        assert_eq!(format_age(now, now - 10_000), "just now");
        assert_eq!(format_age(now, now - minute), "1 min ago");
        assert_eq!(format_age(now, now - 5 * minute), "5 mins ago");
        assert_eq!(format_age(now, now - 60 * minute), "1 hour ago");
        assert_eq!(format_age(now, now - 26 * 60 * minute), "1 day ago");
        assert_eq!(format_age(now, now - 3 * day), "3 days ago");
        assert_eq!(format_age(now, now - 10 * day), "1 week ago");
        assert_eq!(format_age(now, now - 30 * day), "4 weeks ago");
        // Clock skew
        assert_eq!(format_age(now, now + minute), "just now");
    }
}
