//! Persistence: checksummed binary progress saves plus JSON settings.

pub mod memory;
pub mod save_file;
pub mod settings;

pub use memory::MemoryStore;
pub use save_file::SaveFile;
pub use settings::Settings;

use crate::core::constants::{MAX_SUM_GROUP, MIN_SUM_GROUP};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors surfaced by progress and settings storage.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("could not determine a data directory for this platform")]
    NoDataDir,
    #[error("save file is corrupt: {0}")]
    Corrupt(String),
    #[error("save codec error: {0}")]
    Encode(#[from] bincode::Error),
    #[error("settings encoding failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// The progress that outlives a run: where the player is in the curriculum
/// and what they have earned so far.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedProgress {
    /// Current digit-sum group.
    pub level: u8,
    /// Lifetime score.
    pub total_score: i64,
    /// Unix seconds of the last persisted round, 0 if never.
    pub last_played: i64,
}

impl SavedProgress {
    /// Clamps fields read from disk into their valid ranges. Disk contents
    /// are untrusted even after the checksum passes.
    pub fn sanitized(mut self) -> Self {
        self.level = self.level.clamp(MIN_SUM_GROUP, MAX_SUM_GROUP);
        self.total_score = self.total_score.max(0);
        self.last_played = self.last_played.max(0);
        self
    }
}

impl Default for SavedProgress {
    fn default() -> Self {
        Self {
            level: MIN_SUM_GROUP,
            total_score: 0,
            last_played: 0,
        }
    }
}

/// Storage seam for the engine: disk in production, memory in tests.
pub trait ProgressStore {
    /// Ok(None) means no progress has ever been saved.
    fn load(&mut self) -> Result<Option<SavedProgress>, StorageError>;
    fn save(&mut self, progress: &SavedProgress) -> Result<(), StorageError>;
    /// Removes any persisted progress.
    fn reset(&mut self) -> Result<(), StorageError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_progress_starts_at_the_base_group() {
        let p = SavedProgress::default();
        assert_eq!(p.level, MIN_SUM_GROUP);
        assert_eq!(p.total_score, 0);
        assert_eq!(p.last_played, 0);
    }

    #[test]
    fn sanitize_clamps_out_of_range_fields() {
        let p = SavedProgress {
            level: 0,
            total_score: -900,
            last_played: -1,
        }
        .sanitized();
        assert_eq!(p.level, MIN_SUM_GROUP);
        assert_eq!(p.total_score, 0);
        assert_eq!(p.last_played, 0);

        let q = SavedProgress {
            level: 200,
            total_score: 10,
            last_played: 1_700_000_000,
        }
        .sanitized();
        assert_eq!(q.level, MAX_SUM_GROUP);
        assert_eq!(q.total_score, 10);
        assert_eq!(q.last_played, 1_700_000_000);
    }

    #[test]
    fn in_range_progress_is_untouched() {
        let p = SavedProgress {
            level: 11,
            total_score: 4321,
            last_played: 5,
        };
        assert_eq!(p.clone().sanitized(), p);
    }
}
