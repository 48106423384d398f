//! Search, filter and sort over a library snapshot.
//!
//! # Responsibility
//! - Provide basic (single-field) and advanced (multi-predicate) search.
//! - Provide the list-view filter and stable sorting.
//!
//! # Invariants
//! - Every filter is stable: results keep snapshot order.
//! - Matching is case-insensitive; sorting compares stored strings as-is.
//! - An empty basic-search term means "no search", never "match all".
//! - `*_positioned` variants report indices into the snapshot they were given.

use crate::model::book::Book;
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Failure to parse a query option from user text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseQueryError {
    pub option: &'static str,
    pub value: String,
    pub expected: &'static str,
}

impl Display for ParseQueryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unsupported {} `{}`; expected {}",
            self.option, self.value, self.expected
        )
    }
}

impl Error for ParseQueryError {}

/// Field used by [`search_basic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    Title,
    Author,
}

impl SearchField {
    fn value<'a>(&self, book: &'a Book) -> &'a str {
        match self {
            Self::Title => book.title.as_str(),
            Self::Author => book.author.as_str(),
        }
    }
}

impl FromStr for SearchField {
    type Err = ParseQueryError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "title" => Ok(Self::Title),
            "author" => Ok(Self::Author),
            _ => Err(ParseQueryError {
                option: "search field",
                value: value.to_string(),
                expected: "title|author",
            }),
        }
    }
}

/// Read-flag filter shared by advanced search, list view and bulk removal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReadStatus {
    #[default]
    Any,
    Read,
    Unread,
}

impl ReadStatus {
    pub fn matches(&self, read: bool) -> bool {
        match self {
            Self::Any => true,
            Self::Read => read,
            Self::Unread => !read,
        }
    }
}

impl FromStr for ReadStatus {
    type Err = ParseQueryError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "any" | "all" => Ok(Self::Any),
            "read" => Ok(Self::Read),
            "unread" => Ok(Self::Unread),
            _ => Err(ParseQueryError {
                option: "read status",
                value: value.to_string(),
                expected: "any|read|unread",
            }),
        }
    }
}

/// Genre filter for advanced search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum GenreFilter {
    #[default]
    Any,
    /// Exact, case-sensitive match against the stored genre.
    Exact(String),
}

impl GenreFilter {
    pub fn matches(&self, genre: &str) -> bool {
        match self {
            Self::Any => true,
            Self::Exact(expected) => expected == genre,
        }
    }
}

/// Conjunctive predicate set for [`search_advanced`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdvancedFilters {
    /// Case-insensitive title substring; skipped when empty.
    pub title_contains: String,
    /// Case-insensitive author substring; skipped when empty.
    pub author_contains: String,
    pub genre: GenreFilter,
    pub read_status: ReadStatus,
    /// Inclusive `(min, max)` year bound. `None` covers the observed range.
    pub year_range: Option<(i32, i32)>,
}

impl AdvancedFilters {
    pub fn matches(&self, book: &Book) -> bool {
        if !self.title_contains.is_empty() && !contains_ci(&book.title, &self.title_contains) {
            return false;
        }
        if !self.author_contains.is_empty() && !contains_ci(&book.author, &self.author_contains)
        {
            return false;
        }
        if !self.genre.matches(&book.genre) {
            return false;
        }
        if !self.read_status.matches(book.read) {
            return false;
        }
        match self.year_range {
            Some((min, max)) => min <= book.year && book.year <= max,
            None => true,
        }
    }
}

/// Filter used by the collection list view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewFilter {
    /// Accepted genres; empty accepts every genre.
    pub genres: Vec<String>,
    pub read_status: ReadStatus,
}

impl ViewFilter {
    pub fn matches(&self, book: &Book) -> bool {
        (self.genres.is_empty() || self.genres.iter().any(|genre| *genre == book.genre))
            && self.read_status.matches(book.read)
    }
}

/// Sort key for [`sort_books`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    Title,
    Author,
    Year,
    Genre,
}

impl SortKey {
    /// Total order on `key`; strings compare byte-wise without case folding.
    pub fn compare(&self, a: &Book, b: &Book) -> Ordering {
        match self {
            Self::Title => a.title.cmp(&b.title),
            Self::Author => a.author.cmp(&b.author),
            Self::Year => a.year.cmp(&b.year),
            Self::Genre => a.genre.cmp(&b.genre),
        }
    }
}

impl FromStr for SortKey {
    type Err = ParseQueryError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "title" => Ok(Self::Title),
            "author" => Ok(Self::Author),
            "year" => Ok(Self::Year),
            "genre" => Ok(Self::Genre),
            _ => Err(ParseQueryError {
                option: "sort key",
                value: value.to_string(),
                expected: "title|author|year|genre",
            }),
        }
    }
}

/// A book paired with its stored position in the snapshot.
pub type Positioned<'a> = (usize, &'a Book);

/// Row shapes that [`sort_books`] can order.
pub trait BookRow {
    fn book(&self) -> &Book;
}

impl BookRow for &Book {
    fn book(&self) -> &Book {
        self
    }
}

impl BookRow for (usize, &Book) {
    fn book(&self) -> &Book {
        self.1
    }
}

/// Case-insensitive substring search on one field.
///
/// Returns an empty list for an empty `term`.
pub fn search_basic<'a>(books: &'a [Book], field: SearchField, term: &str) -> Vec<&'a Book> {
    strip_positions(search_basic_positioned(books, field, term))
}

/// [`search_basic`] keeping each hit's stored position.
pub fn search_basic_positioned<'a>(
    books: &'a [Book],
    field: SearchField,
    term: &str,
) -> Vec<Positioned<'a>> {
    if term.is_empty() {
        return Vec::new();
    }
    let needle = term.to_lowercase();
    positions_where(books, |book| {
        field.value(book).to_lowercase().contains(&needle)
    })
}

/// Applies every predicate in `filters` (AND), keeping snapshot order.
pub fn search_advanced<'a>(books: &'a [Book], filters: &AdvancedFilters) -> Vec<&'a Book> {
    strip_positions(search_advanced_positioned(books, filters))
}

/// [`search_advanced`] keeping each hit's stored position.
pub fn search_advanced_positioned<'a>(
    books: &'a [Book],
    filters: &AdvancedFilters,
) -> Vec<Positioned<'a>> {
    positions_where(books, |book| filters.matches(book))
}

/// Applies the list-view filter, keeping snapshot order.
pub fn filter_view<'a>(books: &'a [Book], filter: &ViewFilter) -> Vec<&'a Book> {
    strip_positions(filter_view_positioned(books, filter))
}

/// [`filter_view`] keeping each row's stored position.
pub fn filter_view_positioned<'a>(books: &'a [Book], filter: &ViewFilter) -> Vec<Positioned<'a>> {
    positions_where(books, |book| filter.matches(book))
}

/// Stable sort by `key`; descending order keeps ties in input order too.
pub fn sort_books<R, I>(rows: I, key: SortKey, ascending: bool) -> Vec<R>
where
    R: BookRow,
    I: IntoIterator<Item = R>,
{
    let mut sorted = rows.into_iter().collect::<Vec<_>>();
    if ascending {
        sorted.sort_by(|a, b| key.compare(a.book(), b.book()));
    } else {
        sorted.sort_by(|a, b| key.compare(b.book(), a.book()));
    }
    sorted
}

/// Observed `(min, max)` publication year, or `None` for an empty snapshot.
pub fn year_bounds(books: &[Book]) -> Option<(i32, i32)> {
    let min = books.iter().map(|book| book.year).min()?;
    let max = books.iter().map(|book| book.year).max()?;
    Some((min, max))
}

/// Sorted distinct non-empty genres.
pub fn distinct_genres(books: &[Book]) -> Vec<String> {
    books
        .iter()
        .filter(|book| !book.genre.is_empty())
        .map(|book| book.genre.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

fn positions_where<'a, P>(books: &'a [Book], mut predicate: P) -> Vec<Positioned<'a>>
where
    P: FnMut(&Book) -> bool,
{
    books
        .iter()
        .enumerate()
        .filter(|(_, book)| predicate(book))
        .collect()
}

fn strip_positions<'a>(rows: Vec<Positioned<'a>>) -> Vec<&'a Book> {
    rows.into_iter().map(|(_, book)| book).collect()
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
