//! Library use-case service.
//!
//! # Responsibility
//! - Load the collection through a `BookStore`, degrading to empty on failure.
//! - Apply repository mutations and save the whole collection after each one.
//! - Enforce caller-side validation on the add path.
//!
//! # Invariants
//! - Every mutating call performs exactly one `save`, after the mutation.
//! - A failed save never rolls back in-memory state; `save` can be retried.
//! - Log lines carry counts and statuses only, never book contents.

use crate::model::book::{current_year, Book, BookId, BookValidationError};
use crate::repo::library::{Library, RepoError};
use crate::store::{BookStore, PersistenceError, StoreResult};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for positional, add and explicit save use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// Required field missing or year out of range.
    Validation(BookValidationError),
    /// Stale index or id; a caller bug.
    Repo(RepoError),
    /// Explicit save failed; the in-memory library is unchanged.
    Persistence(PersistenceError),
}

impl ServiceError {
    /// Returns whether the caller used a stale index or id.
    ///
    /// Validation and persistence failures come from user input or the
    /// environment and return `false`.
    pub fn is_caller_bug(&self) -> bool {
        matches!(self, Self::Repo(_))
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::Persistence(err) => write!(f, "failed to save library: {err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::Persistence(err) => Some(err),
        }
    }
}

impl From<BookValidationError> for ServiceError {
    fn from(value: BookValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<PersistenceError> for ServiceError {
    fn from(value: PersistenceError) -> Self {
        Self::Persistence(value)
    }
}

/// Result of a mutation that was applied in memory.
///
/// `saved` reports the follow-up save; the mutation stands either way.
#[derive(Debug)]
#[must_use = "the save result of a mutation should be surfaced to the user"]
pub struct Mutation<T> {
    pub value: T,
    pub saved: StoreResult<()>,
}

impl<T> Mutation<T> {
    pub fn is_saved(&self) -> bool {
        self.saved.is_ok()
    }
}

/// Criteria for bulk removal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BulkRemoval {
    /// Books whose `read` flag equals the value.
    ReadStatus(bool),
    /// Books whose stored genre equals the value exactly.
    Genre(String),
    /// Books published within the inclusive range.
    YearRange { min: i32, max: i32 },
}

impl BulkRemoval {
    pub fn matches(&self, book: &Book) -> bool {
        match self {
            Self::ReadStatus(read) => book.read == *read,
            Self::Genre(genre) => book.genre == *genre,
            Self::YearRange { min, max } => *min <= book.year && book.year <= *max,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::ReadStatus(_) => "read_status",
            Self::Genre(_) => "genre",
            Self::YearRange { .. } => "year_range",
        }
    }
}

/// Session facade owning the library and its store.
pub struct LibraryService<S: BookStore> {
    store: S,
    library: Library,
}

impl<S: BookStore> LibraryService<S> {
    /// Loads the library from `store`.
    ///
    /// A load failure yields an empty library plus the error, which the caller
    /// should show as a warning.
    pub fn open(store: S) -> (Self, Option<PersistenceError>) {
        match store.load() {
            Ok(books) => {
                info!(
                    "event=library_open module=service status=ok count={}",
                    books.len()
                );
                let service = Self {
                    store,
                    library: Library::from_books(books),
                };
                (service, None)
            }
            Err(err) => {
                warn!(
                    "event=library_open module=service status=degraded {}",
                    err.log_fields()
                );
                let service = Self {
                    store,
                    library: Library::new(),
                };
                (service, Some(err))
            }
        }
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    /// Full collection in stored order.
    pub fn books(&self) -> &[Book] {
        self.library.books()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Validates against the current year, appends and saves.
    pub fn add_book(&mut self, book: Book) -> Result<Mutation<BookId>, ServiceError> {
        self.add_book_as_of(book, current_year())
    }

    /// Same as [`Self::add_book`] with an explicit upper year bound.
    pub fn add_book_as_of(
        &mut self,
        book: Book,
        current_year: i32,
    ) -> Result<Mutation<BookId>, ServiceError> {
        if let Err(err) = book.validate(current_year) {
            info!("event=book_add module=service status=rejected reason={err}");
            return Err(err.into());
        }
        let id = self.library.add(book);
        info!(
            "event=book_add module=service status=ok count={}",
            self.library.len()
        );
        Ok(self.commit(id))
    }

    pub fn remove_at(&mut self, index: usize) -> Result<Mutation<Book>, ServiceError> {
        let removed = self.library.remove_at(index)?;
        info!(
            "event=book_remove module=service status=ok count={}",
            self.library.len()
        );
        Ok(self.commit(removed))
    }

    pub fn remove_by_id(&mut self, id: BookId) -> Result<Mutation<Book>, ServiceError> {
        let removed = self.library.remove_by_id(id)?;
        info!(
            "event=book_remove module=service status=ok count={}",
            self.library.len()
        );
        Ok(self.commit(removed))
    }

    /// Removes every book matching `predicate` and saves.
    pub fn remove_where<P>(&mut self, predicate: P) -> Mutation<usize>
    where
        P: FnMut(&Book) -> bool,
    {
        let removed = self.library.remove_where(predicate);
        info!(
            "event=book_bulk_remove module=service status=ok removed={} count={}",
            removed,
            self.library.len()
        );
        self.commit(removed)
    }

    /// Books that [`Self::remove_bulk`] would remove, in stored order.
    pub fn preview_bulk(&self, criteria: &BulkRemoval) -> Vec<&Book> {
        self.library
            .books()
            .iter()
            .filter(|book| criteria.matches(book))
            .collect()
    }

    pub fn remove_bulk(&mut self, criteria: &BulkRemoval) -> Mutation<usize> {
        info!(
            "event=book_bulk_remove module=service status=start criteria={}",
            criteria.kind()
        );
        self.remove_where(|book| criteria.matches(book))
    }

    /// Flips the read flag at `index`, saves, and returns the new flag.
    pub fn toggle_read(&mut self, index: usize) -> Result<Mutation<bool>, ServiceError> {
        let read = self.library.toggle_read(index)?;
        info!("event=book_toggle_read module=service status=ok read={read}");
        Ok(self.commit(read))
    }

    pub fn toggle_read_by_id(&mut self, id: BookId) -> Result<Mutation<bool>, ServiceError> {
        let read = self.library.toggle_read_by_id(id)?;
        info!("event=book_toggle_read module=service status=ok read={read}");
        Ok(self.commit(read))
    }

    /// Saves the current collection without mutating it.
    pub fn save(&self) -> StoreResult<()> {
        self.store.save(self.library.books())
    }

    fn commit<T>(&self, value: T) -> Mutation<T> {
        let saved = self.save();
        if let Err(err) = &saved {
            warn!(
                "event=library_autosave module=service status=error {}",
                err.log_fields()
            );
        }
        Mutation { value, saved }
    }
}
