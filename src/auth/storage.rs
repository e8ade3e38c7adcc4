/// Durable key/value flag storage (the local-storage analogue)
use crate::errors::ApiResult;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use tracing::warn;

pub trait FlagStorage: Send + Sync {
    fn get(&self, key: &str) -> ApiResult<Option<String>>;

    fn set(&self, key: &str, value: &str) -> ApiResult<()>;

    fn remove(&self, key: &str) -> ApiResult<()>;
}

/// In-process storage, lost on restart
#[derive(Default)]
pub struct MemoryFlagStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryFlagStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FlagStorage for MemoryFlagStorage {
    fn get(&self, key: &str) -> ApiResult<Option<String>> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> ApiResult<()> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> ApiResult<()> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.remove(key);
        Ok(())
    }
}

/// JSON object file of string entries
pub struct FileFlagStorage {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileFlagStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> ApiResult<BTreeMap<String, String>> {
        match fs::read_to_string(&self.path) {
            Ok(raw) if raw.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn store(&self, entries: &BTreeMap<String, String>) -> ApiResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let raw = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, raw)?;
        Ok(())
    }

    /// Corrupt files are replaced rather than blocking writes
    fn load_for_update(&self) -> BTreeMap<String, String> {
        self.load().unwrap_or_else(|e| {
            warn!("Discarding unreadable storage file {:?}: {}", self.path, e);
            BTreeMap::new()
        })
    }
}

impl FlagStorage for FileFlagStorage {
    fn get(&self, key: &str) -> ApiResult<Option<String>> {
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> ApiResult<()> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut entries = self.load_for_update();
        entries.insert(key.to_string(), value.to_string());
        self.store(&entries)
    }

    fn remove(&self, key: &str) -> ApiResult<()> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut entries = self.load_for_update();
        if entries.remove(key).is_some() {
            self.store(&entries)?;
        }
        Ok(())
    }
}
