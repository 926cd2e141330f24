//! In-memory progress store for exercising the engine without disk I/O.

use super::{ProgressStore, SavedProgress, StorageError};

/// Store that keeps progress in RAM and can simulate write failures.
#[derive(Debug, Default)]
pub struct MemoryStore {
    progress: Option<SavedProgress>,
    /// When set, every save returns an error.
    pub fail_writes: bool,
    pub save_count: u32,
    pub reset_count: u32,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with existing progress.
    pub fn with(progress: SavedProgress) -> Self {
        Self {
            progress: Some(progress),
            ..Self::default()
        }
    }

    pub fn stored(&self) -> Option<&SavedProgress> {
        self.progress.as_ref()
    }
}

impl ProgressStore for MemoryStore {
    fn load(&mut self) -> Result<Option<SavedProgress>, StorageError> {
        Ok(self.progress.clone().map(SavedProgress::sanitized))
    }

    fn save(&mut self, progress: &SavedProgress) -> Result<(), StorageError> {
        if self.fail_writes {
            return Err(StorageError::Corrupt("writes disabled".to_string()));
        }
        self.save_count += 1;
        self.progress = Some(progress.clone());
        Ok(())
    }

    fn reset(&mut self) -> Result<(), StorageError> {
        self.reset_count += 1;
        self.progress = None;
        Ok(())
    }
}
