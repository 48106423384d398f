//! Aggregate statistics over a library snapshot.
//!
//! # Responsibility
//! - Compute overview counts and per-genre/decade/author breakdowns.
//! - Select oldest/newest books.
//!
//! # Invariants
//! - Empty input yields empty breakdowns and a zeroed overview, never errors.
//! - Row counts of every breakdown sum to the snapshot size.
//! - Count-ordered breakdowns keep first-seen order among equal counts.
//! - Percentages are `0.0` when the denominator is zero.

use crate::model::book::Book;
use std::collections::{BTreeMap, HashMap};

/// Author rows shown with read details.
pub const AUTHOR_DETAIL_LIMIT: usize = 5;
/// Author rows shown in the author chart.
pub const AUTHOR_CHART_LIMIT: usize = 10;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Overview {
    pub total: usize,
    pub read_count: usize,
    pub unread_count: usize,
    /// `read_count / total * 100`, or `0.0` for an empty library.
    pub percent_read: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenreRow {
    /// Stored genre, or `Uncategorized` for empty genres.
    pub genre: String,
    pub count: usize,
    pub read_count: usize,
    pub unread_count: usize,
    pub percent_read: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecadeRow {
    /// Decade start year, e.g. `1960`.
    pub decade: i32,
    /// Display label, e.g. `1960s`.
    pub decade_label: String,
    pub count: usize,
    pub read_count: usize,
    pub unread_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorRow {
    pub author: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AuthorDetail {
    pub author: String,
    pub count: usize,
    pub read_count: usize,
    pub percent_read: f64,
}

/// Every statistics view computed from one snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct LibraryStats {
    pub overview: Overview,
    pub by_genre: Vec<GenreRow>,
    pub by_decade: Vec<DecadeRow>,
    pub by_author: Vec<AuthorRow>,
    pub top_authors: Vec<AuthorDetail>,
    pub oldest: Option<Book>,
    pub newest: Option<Book>,
}

impl LibraryStats {
    pub fn compute(books: &[Book]) -> Self {
        Self {
            overview: overview(books),
            by_genre: by_genre(books),
            by_decade: by_decade(books),
            by_author: by_author(books),
            top_authors: top_authors(books, AUTHOR_DETAIL_LIMIT),
            oldest: oldest(books).cloned(),
            newest: newest(books).cloned(),
        }
    }
}

pub fn overview(books: &[Book]) -> Overview {
    let total = books.len();
    let read_count = books.iter().filter(|book| book.read).count();
    Overview {
        total,
        read_count,
        unread_count: total - read_count,
        percent_read: percent(read_count, total),
    }
}

/// Per-genre rows sorted by count descending.
pub fn by_genre(books: &[Book]) -> Vec<GenreRow> {
    let mut rows: Vec<GenreRow> = Vec::new();
    let mut slots: HashMap<&str, usize> = HashMap::new();

    for book in books {
        let label = book.genre_label();
        let slot = *slots.entry(label).or_insert_with(|| {
            rows.push(GenreRow {
                genre: label.to_string(),
                count: 0,
                read_count: 0,
                unread_count: 0,
                percent_read: 0.0,
            });
            rows.len() - 1
        });
        let row = &mut rows[slot];
        row.count += 1;
        if book.read {
            row.read_count += 1;
        } else {
            row.unread_count += 1;
        }
    }

    for row in &mut rows {
        row.percent_read = percent(row.read_count, row.count);
    }
    rows.sort_by(|a, b| b.count.cmp(&a.count));
    rows
}

/// Per-decade rows sorted by decade ascending.
pub fn by_decade(books: &[Book]) -> Vec<DecadeRow> {
    let mut buckets: BTreeMap<i32, (usize, usize)> = BTreeMap::new();
    for book in books {
        let (count, read_count) = buckets.entry(book.decade()).or_default();
        *count += 1;
        if book.read {
            *read_count += 1;
        }
    }

    buckets
        .into_iter()
        .map(|(decade, (count, read_count))| DecadeRow {
            decade,
            decade_label: format!("{decade}s"),
            count,
            read_count,
            unread_count: count - read_count,
        })
        .collect()
}

/// Per-author counts sorted by count descending.
pub fn by_author(books: &[Book]) -> Vec<AuthorRow> {
    author_details(books)
        .into_iter()
        .map(|detail| AuthorRow {
            author: detail.author,
            count: detail.count,
        })
        .collect()
}

/// The first `k` rows of [`by_author`] with read details.
///
/// Use [`AUTHOR_DETAIL_LIMIT`] or [`AUTHOR_CHART_LIMIT`] for `k`.
pub fn top_authors(books: &[Book], k: usize) -> Vec<AuthorDetail> {
    let mut details = author_details(books);
    details.truncate(k);
    details
}

/// Book with the smallest year; the first one wins ties.
pub fn oldest(books: &[Book]) -> Option<&Book> {
    books
        .iter()
        .reduce(|best, book| if book.year < best.year { book } else { best })
}

/// Book with the largest year; the first one wins ties.
pub fn newest(books: &[Book]) -> Option<&Book> {
    books
        .iter()
        .reduce(|best, book| if book.year > best.year { book } else { best })
}

fn author_details(books: &[Book]) -> Vec<AuthorDetail> {
    let mut rows: Vec<AuthorDetail> = Vec::new();
    let mut slots: HashMap<&str, usize> = HashMap::new();

    for book in books {
        let slot = *slots.entry(book.author.as_str()).or_insert_with(|| {
            rows.push(AuthorDetail {
                author: book.author.clone(),
                count: 0,
                read_count: 0,
                percent_read: 0.0,
            });
            rows.len() - 1
        });
        let row = &mut rows[slot];
        row.count += 1;
        if book.read {
            row.read_count += 1;
        }
    }

    for row in &mut rows {
        row.percent_read = percent(row.read_count, row.count);
    }
    rows.sort_by(|a, b| b.count.cmp(&a.count));
    rows
}

fn percent(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    part as f64 / total as f64 * 100.0
}

#[cfg(test)]
mod tests {
    use super::percent;

    #[test]
    fn percent_guards_zero_denominator() {
        assert_eq!(percent(0, 0), 0.0);
        assert_eq!(percent(1, 4), 25.0);
    }
}
