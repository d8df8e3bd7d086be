use crate::Result;
use crate::Transaction;

use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;

use thiserror::Error;

/// Key the transaction list is persisted under
pub const TRANSACTIONS_KEY: &str = "transactions";

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to read key {0:?}: {1}")]
    Read(String, String),

    #[error("Failed to write key {0:?}: {1}")]
    Write(String, String),

    #[error("Stored value for key {0:?} is not a valid transaction list: {1}")]
    Corrupt(String, String),
}

/// Durable key-value storage holding string values
pub trait Storage {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&mut self, key: &str, value: &str) -> Result;
}

/// Stores each key as `<dir>/<key>.json`
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Opens the storage directory, creating it if missing
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();

        fs::create_dir_all(&dir).map_err(|e| {
            StorageError::Write(dir.display().to_string(), format!("cannot create directory: {e}"))
        })?;

        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);

        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Read(key.to_string(), format!("{path:?}: {e}")).into()),
        }
    }

    /// Holds an exclusive lock on `<key>.json.lock` while writing a shadow file and renaming it
    /// over the target
    fn set(&mut self, key: &str, value: &str) -> Result {
        let path = self.path_for(key);
        let tmp_path = path.with_extension("json.tmp");
        let lock_path = path.with_extension("json.lock");

        let lock_file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(|e| write_error(key, &lock_path, e))?;

        // Released when `lock_file` closes on any early return
        FileExt::lock_exclusive(&lock_file).map_err(|e| write_error(key, &lock_path, e))?;

        let mut tmp_file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&tmp_path)
            .map_err(|e| write_error(key, &tmp_path, e))?;

        tmp_file
            .write_all(value.as_bytes())
            .and_then(|_| tmp_file.sync_all())
            .map_err(|e| write_error(key, &tmp_path, e))?;
        drop(tmp_file);

        fs::rename(&tmp_path, &path).map_err(|e| write_error(key, &path, e))?;

        FileExt::unlock(&lock_file).map_err(|e| write_error(key, &lock_path, e))?;

        log::debug!("Wrote {} bytes to {path:?}", value.len());

        Ok(())
    }
}

fn write_error(key: &str, path: &Path, e: io::Error) -> StorageError {
    StorageError::Write(key.to_string(), format!("{path:?}: {e}"))
}

/// In-memory storage, for tests and throwaway sessions
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Reads the persisted transaction list, or an empty list if nothing was stored yet
pub fn load_transactions(storage: &dyn Storage) -> Result<Vec<Transaction>> {
    let value = match storage.get(TRANSACTIONS_KEY)? {
        Some(value) => value,
        None => {
            log::debug!("No stored transactions found, starting empty");
            return Ok(vec![]);
        }
    };

    let transactions: Vec<Transaction> = serde_json::from_str(&value)
        .map_err(|e| StorageError::Corrupt(TRANSACTIONS_KEY.to_string(), e.to_string()))?;

    log::debug!("Loaded {} transactions", transactions.len());

    Ok(transactions)
}

pub fn save_transactions(storage: &mut dyn Storage, transactions: &[Transaction]) -> Result {
    let value = serde_json::to_string(transactions)?;
    storage.set(TRANSACTIONS_KEY, &value)
}
