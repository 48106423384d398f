//! JSON file store.
//!
//! # Responsibility
//! - Load/save the collection as a single flat JSON array.
//! - Emit `store_load`/`store_save` logging events with duration and status.
//!
//! # Invariants
//! - Output is compact JSON in field declaration order, so saving unchanged
//!   data produces identical bytes.
//! - Writes go to a sibling temp file that is renamed over the target; a failed
//!   save leaves the previous file intact.

use super::{BookStore, PersistenceError, StoreResult};
use crate::model::book::Book;
use log::{error, info, warn};
use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::{Instant, SystemTime};

/// File name used when no explicit library path is configured.
pub const DEFAULT_LIBRARY_FILE: &str = "library.json";

/// File-backed store for one library.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Modification time of the library file, if it exists.
    pub fn last_saved(&self) -> Option<SystemTime> {
        std::fs::metadata(&self.path)
            .and_then(|meta| meta.modified())
            .ok()
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from(DEFAULT_LIBRARY_FILE));
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn io_error(&self, source: std::io::Error) -> PersistenceError {
        PersistenceError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn write_atomically(&self, bytes: &[u8]) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|err| self.io_error(err))?;
            }
        }

        let temp_path = self.temp_path();
        std::fs::write(&temp_path, bytes).map_err(|err| self.io_error(err))?;
        if let Err(err) = std::fs::rename(&temp_path, &self.path) {
            let _ = std::fs::remove_file(&temp_path);
            return Err(self.io_error(err));
        }
        Ok(())
    }
}

impl BookStore for JsonFileStore {
    fn load(&self) -> StoreResult<Vec<Book>> {
        let started_at = Instant::now();
        info!("event=store_load module=store status=start");

        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    "event=store_load module=store status=ok count=0 missing_file=true duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                return Ok(Vec::new());
            }
            Err(err) => {
                error!(
                    "event=store_load module=store status=error duration_ms={} error_code=read_failed error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                return Err(self.io_error(err));
            }
        };

        match serde_json::from_slice::<Vec<Book>>(&bytes) {
            Ok(books) => {
                info!(
                    "event=store_load module=store status=ok count={} duration_ms={}",
                    books.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(books)
            }
            Err(err) => {
                warn!(
                    "event=store_load module=store status=error duration_ms={} error_code=malformed line={} column={}",
                    started_at.elapsed().as_millis(),
                    err.line(),
                    err.column()
                );
                Err(PersistenceError::Malformed {
                    path: self.path.clone(),
                    source: err,
                })
            }
        }
    }

    fn save(&self, books: &[Book]) -> StoreResult<()> {
        let started_at = Instant::now();
        let bytes = serde_json::to_vec(books).map_err(PersistenceError::Encode)?;

        match self.write_atomically(&bytes) {
            Ok(()) => {
                info!(
                    "event=store_save module=store status=ok count={} bytes={} duration_ms={}",
                    books.len(),
                    bytes.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=store_save module=store status=error duration_ms={} {}",
                    started_at.elapsed().as_millis(),
                    err.log_fields()
                );
                Err(err)
            }
        }
    }
}
