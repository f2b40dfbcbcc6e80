use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Context as _;

use crate::foundation::error::{VitaeError, VitaeResult};

/// Minimal string key-value store backing the local draft.
pub trait KeyValueStore: Send + Sync {
    /// `Ok(None)` when the key is absent.
    fn get(&self, key: &str) -> VitaeResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> VitaeResult<()>;
    /// Removing an absent key is not an error.
    fn remove(&self, key: &str) -> VitaeResult<()>;
}

/// One `<key>.json` file per key inside a directory.
///
/// Writes go to a sibling temp file first and are renamed into place, so a crash mid-write never
/// leaves a half-written value behind.
#[derive(Clone, Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> VitaeResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
            && !key.starts_with('.');
        if !valid {
            return Err(VitaeError::storage(format!("invalid key '{key}'")));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> VitaeResult<Option<String>> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(VitaeError::storage(format!("read '{}': {e}", path.display()))),
        }
    }

    fn set(&self, key: &str, value: &str) -> VitaeResult<()> {
        let path = self.path_for(key)?;
        write_atomic(&self.dir, &path, value)
            .map_err(|e| VitaeError::storage(format!("write '{}': {e:#}", path.display())))
    }

    fn remove(&self, key: &str) -> VitaeResult<()> {
        let path = self.path_for(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(VitaeError::storage(format!(
                "remove '{}': {e}",
                path.display()
            ))),
        }
    }
}

fn write_atomic(dir: &Path, path: &Path, value: &str) -> anyhow::Result<()> {
    std::fs::create_dir_all(dir).with_context(|| format!("create '{}'", dir.display()))?;
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, value).with_context(|| format!("write '{}'", tmp.display()))?;
    std::fs::rename(&tmp, path).with_context(|| format!("rename into '{}'", path.display()))?;
    Ok(())
}

/// In-process store for tests and embedders without a filesystem.
#[derive(Debug, Default)]
pub struct MemoryStore {
    map: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> VitaeResult<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.map
            .lock()
            .map_err(|_| VitaeError::storage("memory store lock poisoned"))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> VitaeResult<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> VitaeResult<()> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> VitaeResult<()> {
        self.lock()?.remove(key);
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/draft/kv.rs"]
mod tests;
