//! Persistence for [`PriceHistory`].

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::ledger::PriceHistory;
use crate::HistoryError;

/// Loads and saves the whole history once per run.
pub trait HistoryStore: Send + Sync {
    /// # Errors
    ///
    /// Returns [`HistoryError`] when stored history exists but cannot be read.
    fn load(&self) -> Result<PriceHistory, HistoryError>;

    /// # Errors
    ///
    /// Returns [`HistoryError`] when the history cannot be written.
    fn save(&self, history: &PriceHistory) -> Result<(), HistoryError>;
}

/// Pretty-printed JSON file. A missing file loads as empty history.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(std::ffi::OsStr::to_os_string)
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn write_error(&self, source: std::io::Error) -> HistoryError {
        HistoryError::Write {
            path: self.path.display().to_string(),
            source,
        }
    }
}

impl HistoryStore for JsonFileStore {
    fn load(&self) -> Result<PriceHistory, HistoryError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::info!(path = %self.path.display(), "no history file yet, starting empty");
                return Ok(PriceHistory::default());
            }
            Err(source) => {
                return Err(HistoryError::Read {
                    path: self.path.display().to_string(),
                    source,
                })
            }
        };

        serde_json::from_str(&raw).map_err(|source| HistoryError::Corrupt {
            path: self.path.display().to_string(),
            source,
        })
    }

    /// Writes to a sibling temp file, then renames it over the target.
    fn save(&self, history: &PriceHistory) -> Result<(), HistoryError> {
        let json = serde_json::to_string_pretty(history).map_err(HistoryError::Serialize)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.write_error(e))?;
        }

        let temp = self.temp_path();
        fs::write(&temp, json).map_err(|e| self.write_error(e))?;
        fs::rename(&temp, &self.path).map_err(|e| {
            let _ = fs::remove_file(&temp);
            self.write_error(e)
        })?;

        tracing::debug!(path = %self.path.display(), "history saved");
        Ok(())
    }
}

/// In-memory store for dry runs and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    history: Mutex<PriceHistory>,
}

impl MemoryStore {
    #[must_use]
    pub fn new(history: PriceHistory) -> Self {
        Self {
            history: Mutex::new(history),
        }
    }

    /// Current contents; a poisoned lock still yields the last saved value.
    #[must_use]
    pub fn snapshot(&self) -> PriceHistory {
        self.history
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

impl HistoryStore for MemoryStore {
    fn load(&self) -> Result<PriceHistory, HistoryError> {
        Ok(self.snapshot())
    }

    fn save(&self, history: &PriceHistory) -> Result<(), HistoryError> {
        *self
            .history
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = history.clone();
        Ok(())
    }
}
