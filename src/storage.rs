//! Seed-log storage for experiment runs.
//!
//! A run directory holds one binary seed log written by the simulator,
//! containing every seed recorded over that run in birth order. Experiment
//! directories hold numbered run subdirectories (`run1`, `run2`, ...).

use crate::seed::SeedRecord;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

/// File name of the seed log inside a run directory
pub const SEED_LOG_FILE: &str = "seed_log.bin";

/// All seeds recorded over one simulation run
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SeedLog {
    /// Version for compatibility checking
    pub version: u32,
    /// Seed records in birth order
    pub records: Vec<SeedRecord>,
}

impl SeedLog {
    /// Current log format version
    pub const VERSION: u32 = 1;

    /// Wrap records into a log
    pub fn new(records: Vec<SeedRecord>) -> Self {
        Self {
            version: Self::VERSION,
            records,
        }
    }

    /// Save the log to a binary file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), StorageError> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);

        // Magic bytes for identification
        writer.write_all(b"SYMB")?;

        let encoded = bincode::serialize(self)?;
        writer.write_all(&encoded)?;

        Ok(())
    }

    /// Load a log from a binary file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);

        let mut magic = [0u8; 4];
        reader.read_exact(&mut magic)?;
        if &magic != b"SYMB" {
            return Err(StorageError::InvalidFormat("invalid magic bytes".to_string()));
        }

        let mut buffer = Vec::new();
        reader.read_to_end(&mut buffer)?;
        let log: SeedLog = bincode::deserialize(&buffer)?;

        if log.version != Self::VERSION {
            return Err(StorageError::VersionMismatch {
                expected: Self::VERSION,
                found: log.version,
            });
        }

        Ok(log)
    }
}

/// Path of the `run{n}` subdirectory (1-based, matching run numbering)
pub fn run_dir<P: AsRef<Path>>(base: P, run: usize) -> PathBuf {
    base.as_ref().join(format!("run{}", run))
}

/// Load the seed log of one numbered run
pub fn load_run<P: AsRef<Path>>(base: P, run: usize) -> Result<SeedLog, StorageError> {
    SeedLog::load(run_dir(base, run).join(SEED_LOG_FILE))
}

/// Errors that can occur reading or writing seed logs
#[derive(Debug)]
pub enum StorageError {
    Io(std::io::Error),
    Serialization(bincode::Error),
    InvalidFormat(String),
    VersionMismatch { expected: u32, found: u32 },
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::Io(e) => write!(f, "IO error: {}", e),
            StorageError::Serialization(e) => write!(f, "serialization error: {}", e),
            StorageError::InvalidFormat(msg) => write!(f, "invalid format: {}", msg),
            StorageError::VersionMismatch { expected, found } => {
                write!(f, "version mismatch: expected {}, found {}", expected, found)
            }
        }
    }
}

impl std::error::Error for StorageError {}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        StorageError::Io(e)
    }
}

impl From<bincode::Error> for StorageError {
    fn from(e: bincode::Error) -> Self {
        StorageError::Serialization(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::SeedRecord;
    use tempfile::tempdir;

    #[test]
    fn test_save_load_roundtrip() {
        let log = SeedLog::new(vec![
            SeedRecord::random(0),
            SeedRecord::random(1),
            SeedRecord::fusion(2, 0, 1),
        ]);

        let dir = tempdir().unwrap();
        let path = dir.path().join(SEED_LOG_FILE);
        log.save(&path).unwrap();

        let loaded = SeedLog::load(&path).unwrap();
        assert_eq!(loaded.version, SeedLog::VERSION);
        assert_eq!(loaded.records.len(), 3);
        assert_eq!(loaded.records[2].id, 2);
        assert_eq!(loaded.records[2].parent1, Some(0));
    }

    #[test]
    fn test_invalid_magic_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bogus.bin");
        std::fs::write(&path, b"NOPE someotherdata").unwrap();

        match SeedLog::load(&path) {
            Err(StorageError::InvalidFormat(_)) => {}
            other => panic!("expected InvalidFormat, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_run_dir_naming() {
        let dir = run_dir("experiments", 3);
        assert_eq!(dir, PathBuf::from("experiments/run3"));
    }

    #[test]
    fn test_load_run() {
        let dir = tempdir().unwrap();
        let run_path = run_dir(dir.path(), 1);
        std::fs::create_dir_all(&run_path).unwrap();

        let log = SeedLog::new(vec![SeedRecord::random(0)]);
        log.save(run_path.join(SEED_LOG_FILE)).unwrap();

        let loaded = load_run(dir.path(), 1).unwrap();
        assert_eq!(loaded.records.len(), 1);
    }
}
