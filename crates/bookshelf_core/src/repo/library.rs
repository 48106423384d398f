//! In-memory library repository.
//!
//! # Responsibility
//! - Own every `Book` of the current session in insertion order.
//! - Provide positional and id-keyed mutation APIs.
//!
//! # Invariants
//! - Insertion order is recency order; `add` always appends.
//! - Removals keep the relative order of remaining books.
//! - Any removal invalidates previously obtained positional indices.
//! - `books` and `ids` always have equal length and matching positions.

use crate::model::book::{Book, BookId};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Default entry count for [`Library::recent`] views.
pub const DEFAULT_RECENT: usize = 3;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository failures. Every variant means the caller held a stale handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoError {
    /// Positional index is stale or out of range.
    IndexOutOfBounds { index: usize, len: usize },
    /// Session id does not refer to a book in this library.
    NotFound(BookId),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IndexOutOfBounds { index, len } => {
                write!(f, "book index {index} out of range for library of {len}")
            }
            Self::NotFound(id) => write!(f, "book not found: {id}"),
        }
    }
}

impl Error for RepoError {}

/// Authoritative in-memory collection for one session.
#[derive(Debug, Clone, Default)]
pub struct Library {
    books: Vec<Book>,
    ids: Vec<BookId>,
}

impl Library {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps a loaded collection, assigning fresh session ids.
    pub fn from_books(books: Vec<Book>) -> Self {
        let ids = books.iter().map(|_| Uuid::new_v4()).collect();
        Self { books, ids }
    }

    /// Full collection in stored order.
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn into_books(self) -> Vec<Book> {
        self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Book> {
        self.books.get(index)
    }

    /// Session id of the book currently at `index`.
    pub fn id_at(&self, index: usize) -> RepoResult<BookId> {
        self.ids
            .get(index)
            .copied()
            .ok_or_else(|| self.out_of_bounds(index))
    }

    /// Current position of the book with session id `id`.
    pub fn position(&self, id: BookId) -> Option<usize> {
        self.ids.iter().position(|candidate| *candidate == id)
    }

    /// Appends `book` as the most recent entry and returns its session id.
    pub fn add(&mut self, book: Book) -> BookId {
        let id = Uuid::new_v4();
        self.books.push(book);
        self.ids.push(id);
        id
    }

    /// Removes and returns the book at `index`.
    pub fn remove_at(&mut self, index: usize) -> RepoResult<Book> {
        if index >= self.books.len() {
            return Err(self.out_of_bounds(index));
        }
        self.ids.remove(index);
        Ok(self.books.remove(index))
    }

    pub fn remove_by_id(&mut self, id: BookId) -> RepoResult<Book> {
        let index = self.position(id).ok_or(RepoError::NotFound(id))?;
        self.remove_at(index)
    }

    /// Removes every book matching `predicate` and returns how many went.
    ///
    /// Field-for-field duplicates are judged independently, so all copies
    /// matching the predicate are removed together.
    pub fn remove_where<P>(&mut self, mut predicate: P) -> usize
    where
        P: FnMut(&Book) -> bool,
    {
        let keep = self
            .books
            .iter()
            .map(|book| !predicate(book))
            .collect::<Vec<_>>();
        let removed = keep.iter().filter(|kept| !**kept).count();
        if removed == 0 {
            return 0;
        }

        let mut keep_ids = keep.iter();
        self.ids.retain(|_| keep_ids.next().copied().unwrap_or(true));
        let mut keep_books = keep.iter();
        self.books
            .retain(|_| keep_books.next().copied().unwrap_or(true));
        removed
    }

    /// Flips the `read` flag at `index` and returns the new value.
    pub fn toggle_read(&mut self, index: usize) -> RepoResult<bool> {
        let len = self.books.len();
        let book = self
            .books
            .get_mut(index)
            .ok_or(RepoError::IndexOutOfBounds { index, len })?;
        book.read = !book.read;
        Ok(book.read)
    }

    pub fn toggle_read_by_id(&mut self, id: BookId) -> RepoResult<bool> {
        let index = self.position(id).ok_or(RepoError::NotFound(id))?;
        self.toggle_read(index)
    }

    /// Last `n` entries, most recent first.
    pub fn recent(&self, n: usize) -> Vec<&Book> {
        self.books.iter().rev().take(n).collect()
    }

    fn out_of_bounds(&self, index: usize) -> RepoError {
        RepoError::IndexOutOfBounds {
            index,
            len: self.books.len(),
        }
    }
}
