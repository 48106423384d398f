//! Book domain model.
//!
//! # Responsibility
//! - Define the single catalog record persisted in the library file.
//! - Provide caller-side validation for add flows.
//!
//! # Invariants
//! - Field order and names match the persisted JSON shape exactly.
//! - `title` and `author` are non-empty when created through validated paths.
//! - `genre` may be empty; aggregation treats it as [`UNCATEGORIZED`].

use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Lowest publication year accepted by [`Book::validate`].
pub const MIN_YEAR: i32 = 1000;

/// Display label used for books with an empty genre.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Session-scoped identity of one library entry.
///
/// Assigned when a book enters the in-memory library and never persisted,
/// so a reload hands out fresh ids.
pub type BookId = Uuid;

/// Canonical catalog record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Book {
    pub title: String,
    pub author: String,
    /// Publication year, expected within `[MIN_YEAR, current_year()]`.
    pub year: i32,
    /// Free-form genre label; empty means uncategorized.
    pub genre: String,
    pub read: bool,
}

/// Caller-side validation failure for a new book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookValidationError {
    EmptyTitle,
    EmptyAuthor,
    YearOutOfRange { year: i32, min: i32, max: i32 },
}

impl Display for BookValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "title is required"),
            Self::EmptyAuthor => write!(f, "author is required"),
            Self::YearOutOfRange { year, min, max } => {
                write!(f, "year {year} is outside the accepted range {min}..={max}")
            }
        }
    }
}

impl Error for BookValidationError {}

impl Book {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        year: i32,
        genre: impl Into<String>,
        read: bool,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            year,
            genre: genre.into(),
            read,
        }
    }

    /// Checks the invariants the add flow must enforce before storing.
    ///
    /// Whitespace-only title/author count as empty. `current_year` is passed
    /// in so tests stay independent of the wall clock.
    pub fn validate(&self, current_year: i32) -> Result<(), BookValidationError> {
        if self.title.trim().is_empty() {
            return Err(BookValidationError::EmptyTitle);
        }
        if self.author.trim().is_empty() {
            return Err(BookValidationError::EmptyAuthor);
        }
        if self.year < MIN_YEAR || self.year > current_year {
            return Err(BookValidationError::YearOutOfRange {
                year: self.year,
                min: MIN_YEAR,
                max: current_year,
            });
        }
        Ok(())
    }

    /// Genre label used by grouping views.
    pub fn genre_label(&self) -> &str {
        if self.genre.is_empty() {
            UNCATEGORIZED
        } else {
            self.genre.as_str()
        }
    }

    /// Start year of the decade bucket, e.g. `1965 -> 1960`.
    pub fn decade(&self) -> i32 {
        self.year.div_euclid(10) * 10
    }
}

/// Current local calendar year.
pub fn current_year() -> i32 {
    chrono::Local::now().year()
}
