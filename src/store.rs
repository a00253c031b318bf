//! Local key/value store for persisted dashboard state.
//!
//! DESIGN
//! ======
//! A single JSON object on disk, keyed like browser local storage
//! (`teacherConfig`, `isAnalyticsActive`, ...). The whole document is kept
//! in memory and rewritten on every `set`/`remove` through a temp file and
//! rename, so a crash never leaves a half-written document behind.
//!
//! A missing file is an empty store. A corrupt file is logged and treated
//! as empty; the next write replaces it.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::warn;

pub const TEACHER_CONFIG_KEY: &str = "teacherConfig";
pub const ANALYTICS_ACTIVE_KEY: &str = "isAnalyticsActive";
pub const ANALYTICS_SESSION_KEY: &str = "analyticsSessionId";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store io failed at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("store encode failed: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Clone)]
pub struct LocalStore {
    inner: Arc<Mutex<StoreInner>>,
}

struct StoreInner {
    path: Option<PathBuf>,
    doc: Map<String, Value>,
}

impl LocalStore {
    /// Open (or lazily create) the store at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error only if the file exists but cannot be read.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let doc = match std::fs::read_to_string(&path) {
            Ok(text) => parse_document(&path, &text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Map::new(),
            Err(source) => return Err(StoreError::Io { path, source }),
        };
        Ok(Self { inner: Arc::new(Mutex::new(StoreInner { path: Some(path), doc })) })
    }

    /// Store with no backing file. Writes succeed and live until drop.
    #[must_use]
    pub fn in_memory() -> Self {
        Self { inner: Arc::new(Mutex::new(StoreInner { path: None, doc: Map::new() })) }
    }

    /// Read and decode `key`. Absent keys and values that no longer decode
    /// as `T` both yield `None`.
    #[must_use]
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.get_raw(key)?;
        match serde_json::from_value(value) {
            Ok(v) => Some(v),
            Err(e) => {
                warn!(key, error = %e, "stored value does not decode; ignoring");
                None
            }
        }
    }

    #[must_use]
    pub fn get_raw(&self, key: &str) -> Option<Value> {
        self.lock().doc.get(key).cloned()
    }

    /// Replace `key` and flush the document.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be encoded or the file write fails.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let value = serde_json::to_value(value)?;
        let mut inner = self.lock();
        inner.doc.insert(key.to_string(), value);
        inner.flush()
    }

    /// Remove `key` and flush the document. Removing an absent key is a no-op write.
    ///
    /// # Errors
    ///
    /// Returns an error if the file write fails.
    pub fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut inner = self.lock();
        inner.doc.remove(key);
        inner.flush()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, StoreInner> {
        self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl StoreInner {
    fn flush(&self) -> Result<(), StoreError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let bytes = serde_json::to_vec_pretty(&self.doc)?;
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, bytes).map_err(|source| StoreError::Io { path: tmp.clone(), source })?;
        std::fs::rename(&tmp, path).map_err(|source| StoreError::Io { path: path.clone(), source })
    }
}

fn parse_document(path: &Path, text: &str) -> Map<String, Value> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => map,
        Ok(_) => {
            warn!(path = %path.display(), "store file is not a JSON object; starting empty");
            Map::new()
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "store file is corrupt; starting empty");
            Map::new()
        }
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
