/*
    spotpop | Web service for the Spotify popularity battle game.
    Copyright (C) 2025  Israel Alberto Roldan Vega

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.

    This program is distributed in the hope that it will be useful,
    but WITHOUT ANY WARRANTY; without even the implied warranty of
    MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
    GNU Affero General Public License for more details.

    You should have received a copy of the GNU Affero General Public License
    along with this program.  If not, see <https://www.gnu.org/licenses/>.
*/

use crate::models::RankingEntry;
use async_trait::async_trait;
use log::info;
use std::path::PathBuf;
use thiserror::Error;
use tokio::sync::{Mutex, RwLock};

/// Size of the public top list. Lower scores are better, so "top" means the
/// ten lowest scores.
pub const LEADERBOARD_CAPACITY: usize = 10;

#[derive(Error, Debug)]
pub enum LeaderboardError {
    #[error("A display name is required")]
    EmptyName,
    #[error("Score must be a finite, non-negative number")]
    InvalidScore,
    #[error("Failed to access leaderboard storage: {0}")]
    Io(#[from] std::io::Error),
    #[error("Leaderboard storage is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

fn validate(name: &str, score: f64) -> Result<(), LeaderboardError> {
    if name.trim().is_empty() {
        return Err(LeaderboardError::EmptyName);
    }
    if !score.is_finite() || score < 0.0 {
        return Err(LeaderboardError::InvalidScore);
    }
    Ok(())
}

fn sort_ascending(entries: &mut [RankingEntry]) {
    // Stable: equal scores keep submission order.
    entries.sort_by(|a, b| a.score.total_cmp(&b.score));
}

/// Append-only score collection with a top-N read path.
#[async_trait]
pub trait RankingStore: Send + Sync {
    /// Appends a record. The only validation is a non-empty name and a
    /// finite non-negative score; nothing checks that the score came from a
    /// real game.
    async fn submit(&self, name: &str, score: f64) -> Result<RankingEntry, LeaderboardError>;

    /// The `limit` lowest scores, ascending.
    async fn top(&self, limit: usize) -> Result<Vec<RankingEntry>, LeaderboardError>;

    /// Whether `score` would make the public top list: true when fewer than
    /// `LEADERBOARD_CAPACITY` entries exist, or when `score` is strictly
    /// better (lower) than the current worst of the top list.
    async fn is_high_score(&self, score: f64) -> Result<bool, LeaderboardError> {
        let top = self.top(LEADERBOARD_CAPACITY).await?;
        if top.len() < LEADERBOARD_CAPACITY {
            return Ok(true);
        }
        match top.last() {
            Some(worst) => Ok(score < worst.score),
            None => Ok(true),
        }
    }
}

/// In-memory store. Used by tests and as a fallback when no storage path is
/// configured.
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<Vec<RankingEntry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RankingStore for MemoryStore {
    async fn submit(&self, name: &str, score: f64) -> Result<RankingEntry, LeaderboardError> {
        validate(name, score)?;
        let entry = RankingEntry::new(name.trim(), score);
        self.entries.write().await.push(entry.clone());
        Ok(entry)
    }

    async fn top(&self, limit: usize) -> Result<Vec<RankingEntry>, LeaderboardError> {
        let mut entries = self.entries.read().await.clone();
        sort_ascending(&mut entries);
        entries.truncate(limit);
        Ok(entries)
    }
}

/// File-backed store: the whole collection lives in one JSON document.
///
/// Append-plus-read-all is the entire access pattern, so a single file
/// rewritten under a lock is enough; there is nothing to transact over.
pub struct JsonFileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    async fn read_all(&self) -> Result<Vec<RankingEntry>, LeaderboardError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            // A store that does not exist yet is just empty.
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_all(&self, entries: &[RankingEntry]) -> Result<(), LeaderboardError> {
        let json = serde_json::to_string_pretty(entries)?;
        tokio::fs::write(&self.path, json).await?;
        Ok(())
    }
}

#[async_trait]
impl RankingStore for JsonFileStore {
    async fn submit(&self, name: &str, score: f64) -> Result<RankingEntry, LeaderboardError> {
        validate(name, score)?;

        let _guard = self.lock.lock().await;
        let mut entries = self.read_all().await?;
        let entry = RankingEntry::new(name.trim(), score);
        entries.push(entry.clone());
        self.write_all(&entries).await?;

        info!(
            "Recorded score {} for '{}' ({} entries total)",
            score,
            entry.name,
            entries.len()
        );
        Ok(entry)
    }

    async fn top(&self, limit: usize) -> Result<Vec<RankingEntry>, LeaderboardError> {
        let _guard = self.lock.lock().await;
        let mut entries = self.read_all().await?;
        sort_ascending(&mut entries);
        entries.truncate(limit);
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn seed(store: &dyn RankingStore, scores: &[f64]) {
        for (i, score) in scores.iter().enumerate() {
            store.submit(&format!("player-{i}"), *score).await.unwrap();
        }
    }

    #[tokio::test]
    async fn test_any_score_is_high_on_a_sparse_board() {
        let store = MemoryStore::new();
        seed(&store, &[40.0, 12.0, 88.0]).await;

        assert!(store.is_high_score(999.0).await.unwrap());
        assert!(store.is_high_score(0.0).await.unwrap());
    }

    #[tokio::test]
    async fn test_full_board_compares_against_tenth_place() {
        let store = MemoryStore::new();
        // Ten entries: 5, 7, 9, ..., 23. Worst of the top ten is 23.
        let scores: Vec<f64> = (0..10).map(|i| 5.0 + 2.0 * i as f64).collect();
        seed(&store, &scores).await;

        assert!(store.is_high_score(4.0).await.unwrap());
        assert!(store.is_high_score(22.9).await.unwrap());
        // Equal or worse than tenth place does not qualify.
        assert!(!store.is_high_score(23.0).await.unwrap());
        assert!(!store.is_high_score(51.0).await.unwrap());
    }

    #[tokio::test]
    async fn test_top_is_ascending_and_capped() {
        let store = MemoryStore::new();
        let scores: Vec<f64> = (0..15).rev().map(|i| i as f64).collect();
        seed(&store, &scores).await;

        let top = store.top(LEADERBOARD_CAPACITY).await.unwrap();
        assert_eq!(top.len(), LEADERBOARD_CAPACITY);
        for pair in top.windows(2) {
            assert!(pair[0].score <= pair[1].score);
        }
        assert_eq!(top[0].score, 0.0);
        assert_eq!(top[9].score, 9.0);
    }

    #[tokio::test]
    async fn test_submit_rejects_bad_input() {
        let store = MemoryStore::new();

        assert!(matches!(
            store.submit("  ", 10.0).await,
            Err(LeaderboardError::EmptyName)
        ));
        assert!(matches!(
            store.submit("player", f64::NAN).await,
            Err(LeaderboardError::InvalidScore)
        ));
        assert!(matches!(
            store.submit("player", -1.0).await,
            Err(LeaderboardError::InvalidScore)
        ));

        assert!(store.top(10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_file_store_starts_empty_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("leaderboard.json");

        let store = JsonFileStore::new(&path);
        assert!(store.top(10).await.unwrap().is_empty());
        assert!(store.is_high_score(1000.0).await.unwrap());

        store.submit("alpha", 30.0).await.unwrap();
        store.submit("beta", 12.0).await.unwrap();

        // A second store over the same file sees the appended records.
        let reopened = JsonFileStore::new(&path);
        let top = reopened.top(10).await.unwrap();
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].name, "beta");
        assert_eq!(top[1].name, "alpha");
    }

    #[tokio::test]
    async fn test_file_store_rejects_corrupt_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("leaderboard.json");
        tokio::fs::write(&path, "not json").await.unwrap();

        let store = JsonFileStore::new(&path);
        assert!(matches!(
            store.top(10).await,
            Err(LeaderboardError::Corrupt(_))
        ));
    }
}
