//! In-process store with no durable backing.

use super::{BookStore, StoreResult};
use crate::model::book::Book;
use std::cell::RefCell;

/// Keeps the last saved collection in memory.
///
/// Useful for dry runs and for exercising the service without a filesystem.
#[derive(Debug, Default)]
pub struct MemoryStore {
    books: RefCell<Vec<Book>>,
    saves: RefCell<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that loads `books` as its persisted state.
    pub fn with_books(books: Vec<Book>) -> Self {
        Self {
            books: RefCell::new(books),
            saves: RefCell::new(0),
        }
    }

    /// Snapshot of the last saved collection.
    pub fn saved(&self) -> Vec<Book> {
        self.books.borrow().clone()
    }

    /// Number of successful `save` calls.
    pub fn save_count(&self) -> usize {
        *self.saves.borrow()
    }
}

impl BookStore for MemoryStore {
    fn load(&self) -> StoreResult<Vec<Book>> {
        Ok(self.books.borrow().clone())
    }

    fn save(&self, books: &[Book]) -> StoreResult<()> {
        *self.books.borrow_mut() = books.to_vec();
        *self.saves.borrow_mut() += 1;
        Ok(())
    }
}
