//! Checksummed binary save file for curriculum progress.
//!
//! File format:
//! - Version magic (8 bytes, little endian)
//! - Payload length (4 bytes, little endian)
//! - Bincode-serialized progress (variable length)
//! - SHA256 checksum over the three sections above (32 bytes)

use super::{ProgressStore, SavedProgress, StorageError};
use directories::ProjectDirs;
use sha2::{Digest, Sha256};
use std::fs;
use std::io::{Read, Write};
use std::path::PathBuf;

/// Save format version. Bump when the payload layout changes.
const SAVE_VERSION_MAGIC: u64 = 0x4152_4954_4800_0001;

/// Progress payloads are tiny; anything bigger than this is a corrupt
/// length field, not data.
const MAX_PAYLOAD_BYTES: u32 = 64 * 1024;

const SAVE_FILE_NAME: &str = "progress.dat";

/// Progress persistence against a single on-disk file.
pub struct SaveFile {
    path: PathBuf,
}

impl SaveFile {
    /// Opens the platform-appropriate save location, creating the
    /// directory if needed.
    pub fn new() -> Result<Self, StorageError> {
        let project_dirs = ProjectDirs::from("", "", "arithmancer").ok_or(StorageError::NoDataDir)?;
        let config_dir = project_dirs.config_dir();
        fs::create_dir_all(config_dir)?;
        Ok(Self {
            path: config_dir.join(SAVE_FILE_NAME),
        })
    }

    /// Save file at an explicit path.
    pub fn at_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    pub fn save_exists(&self) -> bool {
        self.path.exists()
    }

    fn write_to_disk(&self, progress: &SavedProgress) -> Result<(), StorageError> {
        let data = bincode::serialize(progress)?;
        let data_len = data.len() as u32;

        let mut hasher = Sha256::new();
        hasher.update(SAVE_VERSION_MAGIC.to_le_bytes());
        hasher.update(data_len.to_le_bytes());
        hasher.update(&data);
        let checksum = hasher.finalize();

        let mut file = fs::File::create(&self.path)?;
        file.write_all(&SAVE_VERSION_MAGIC.to_le_bytes())?;
        file.write_all(&data_len.to_le_bytes())?;
        file.write_all(&data)?;
        file.write_all(&checksum)?;
        Ok(())
    }

    fn read_from_disk(&self) -> Result<SavedProgress, StorageError> {
        let mut file = fs::File::open(&self.path)?;

        let mut version_bytes = [0u8; 8];
        file.read_exact(&mut version_bytes)?;
        let version = u64::from_le_bytes(version_bytes);
        if version != SAVE_VERSION_MAGIC {
            return Err(StorageError::Corrupt(format!(
                "bad version: expected 0x{:016X}, got 0x{:016X}",
                SAVE_VERSION_MAGIC, version
            )));
        }

        let mut length_bytes = [0u8; 4];
        file.read_exact(&mut length_bytes)?;
        let data_len = u32::from_le_bytes(length_bytes);
        if data_len > MAX_PAYLOAD_BYTES {
            return Err(StorageError::Corrupt(format!(
                "payload length {} exceeds {} bytes",
                data_len, MAX_PAYLOAD_BYTES
            )));
        }

        let mut data = vec![0u8; data_len as usize];
        file.read_exact(&mut data)?;

        let mut stored_checksum = [0u8; 32];
        file.read_exact(&mut stored_checksum)?;

        let mut hasher = Sha256::new();
        hasher.update(version_bytes);
        hasher.update(length_bytes);
        hasher.update(&data);
        let computed_checksum = hasher.finalize();
        if stored_checksum != computed_checksum.as_slice() {
            return Err(StorageError::Corrupt("checksum mismatch".to_string()));
        }

        Ok(bincode::deserialize(&data)?)
    }
}

impl ProgressStore for SaveFile {
    fn load(&mut self) -> Result<Option<SavedProgress>, StorageError> {
        if !self.save_exists() {
            return Ok(None);
        }
        Ok(Some(self.read_from_disk()?.sanitized()))
    }

    fn save(&mut self, progress: &SavedProgress) -> Result<(), StorageError> {
        self.write_to_disk(progress)
    }

    fn reset(&mut self) -> Result<(), StorageError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_save(name: &str) -> SaveFile {
        let path = std::env::temp_dir().join(format!(
            "arithmancer-save-test-{}-{}.dat",
            std::process::id(),
            name
        ));
        let _ = fs::remove_file(&path);
        SaveFile::at_path(path)
    }

    fn cleanup(save: &SaveFile) {
        let _ = fs::remove_file(save.path());
    }

    #[test]
    fn round_trip_preserves_progress() {
        let mut save = temp_save("round-trip");
        let progress = SavedProgress {
            level: 12,
            total_score: 2480,
            last_played: 1_755_000_000,
        };
        save.save(&progress).expect("save failed");
        assert!(save.save_exists());
        let loaded = save.load().expect("load failed").expect("no progress");
        assert_eq!(loaded, progress);
        cleanup(&save);
    }

    #[test]
    fn missing_file_loads_as_none() {
        let mut save = temp_save("missing");
        assert!(!save.save_exists());
        assert!(save.load().expect("load failed").is_none());
    }

    #[test]
    fn flipped_byte_fails_the_checksum() {
        let mut save = temp_save("flipped");
        save.save(&SavedProgress::default()).expect("save failed");

        let mut bytes = fs::read(save.path()).expect("read failed");
        let mid = bytes.len() / 2;
        bytes[mid] ^= 0xFF;
        fs::write(save.path(), &bytes).expect("write failed");

        match save.load() {
            Err(StorageError::Corrupt(_)) => {}
            other => panic!("expected Corrupt, got {:?}", other),
        }
        cleanup(&save);
    }

    #[test]
    fn wrong_magic_is_rejected() {
        let mut save = temp_save("magic");
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&0xDEAD_BEEFu64.to_le_bytes());
        bytes.extend_from_slice(&4u32.to_le_bytes());
        bytes.extend_from_slice(&[0u8; 36]);
        fs::write(save.path(), &bytes).expect("write failed");

        match save.load() {
            Err(StorageError::Corrupt(msg)) => assert!(msg.contains("version")),
            other => panic!("expected Corrupt, got {:?}", other),
        }
        cleanup(&save);
    }

    #[test]
    fn absurd_length_field_is_rejected_before_allocation() {
        let mut save = temp_save("length");
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&SAVE_VERSION_MAGIC.to_le_bytes());
        bytes.extend_from_slice(&u32::MAX.to_le_bytes());
        fs::write(save.path(), &bytes).expect("write failed");

        match save.load() {
            Err(StorageError::Corrupt(msg)) => assert!(msg.contains("length")),
            other => panic!("expected Corrupt, got {:?}", other),
        }
        cleanup(&save);
    }

    #[test]
    fn truncated_file_is_an_error() {
        let mut save = temp_save("truncated");
        save.save(&SavedProgress::default()).expect("save failed");
        let bytes = fs::read(save.path()).expect("read failed");
        fs::write(save.path(), &bytes[..bytes.len() - 10]).expect("write failed");
        assert!(save.load().is_err());
        cleanup(&save);
    }

    #[test]
    fn reset_removes_the_file_and_tolerates_absence() {
        let mut save = temp_save("reset");
        save.save(&SavedProgress::default()).expect("save failed");
        assert!(save.save_exists());
        save.reset().expect("reset failed");
        assert!(!save.save_exists());
        save.reset().expect("second reset failed");
    }

    #[test]
    fn loaded_progress_is_sanitized() {
        let mut save = temp_save("sanitize");
        save.save(&SavedProgress {
            level: 0,
            total_score: -50,
            last_played: -3,
        })
        .expect("save failed");
        let loaded = save.load().expect("load failed").expect("no progress");
        assert_eq!(loaded.level, crate::core::constants::MIN_SUM_GROUP);
        assert_eq!(loaded.total_score, 0);
        assert_eq!(loaded.last_played, 0);
        cleanup(&save);
    }
}
