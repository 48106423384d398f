//! Persistence boundary for the book collection.
//!
//! # Responsibility
//! - Translate the in-memory collection to/from durable storage.
//! - Report unreadable, malformed or unwritable storage as `PersistenceError`.
//!
//! # Invariants
//! - A missing library file loads as an empty collection.
//! - `save` always replaces the whole collection; there are no partial writes.
//! - Only `save` touches durable storage.

use crate::model::book::Book;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

mod json_file;
mod memory;

pub use json_file::{JsonFileStore, DEFAULT_LIBRARY_FILE};
pub use memory::MemoryStore;

pub type StoreResult<T> = Result<T, PersistenceError>;

#[derive(Debug)]
pub enum PersistenceError {
    /// File exists but could not be read, or could not be written.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// File content is not a JSON array of book records.
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// Collection could not be encoded before writing.
    Encode(serde_json::Error),
}

impl PersistenceError {
    /// Metadata-only `key=value` fields for log lines.
    ///
    /// Never includes the path or the decoder message, which can quote
    /// titles and authors from the file.
    pub fn log_fields(&self) -> String {
        match self {
            Self::Io { source, .. } => format!("error_code=io io_kind={:?}", source.kind()),
            Self::Malformed { source, .. } => format!(
                "error_code=malformed line={} column={}",
                source.line(),
                source.column()
            ),
            Self::Encode(_) => "error_code=encode".to_string(),
        }
    }
}

impl Display for PersistenceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "library file `{}` i/o failure: {source}", path.display())
            }
            Self::Malformed { path, source } => {
                write!(f, "library file `{}` is malformed: {source}", path.display())
            }
            Self::Encode(err) => write!(f, "failed to encode library: {err}"),
        }
    }
}

impl Error for PersistenceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Malformed { source, .. } => Some(source),
            Self::Encode(err) => Some(err),
        }
    }
}

/// Storage contract used by the library service.
pub trait BookStore {
    /// Reads the persisted collection in stored order.
    fn load(&self) -> StoreResult<Vec<Book>>;
    /// Overwrites the persisted collection with `books`.
    fn save(&self, books: &[Book]) -> StoreResult<()>;
}

impl<S: BookStore + ?Sized> BookStore for &S {
    fn load(&self) -> StoreResult<Vec<Book>> {
        (**self).load()
    }

    fn save(&self, books: &[Book]) -> StoreResult<()> {
        (**self).save(books)
    }
}
