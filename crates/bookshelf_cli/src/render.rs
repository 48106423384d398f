//! Plain-text rendering of core views.

use bookshelf_core::{
    top_authors, Book, DecadeRow, GenreRow, LibraryStats, AUTHOR_CHART_LIMIT,
    AUTHOR_DETAIL_LIMIT,
};
use chrono::{DateTime, Local};
use std::time::SystemTime;

pub fn book_line(book: &Book) -> String {
    let status = if book.read { "read" } else { "unread" };
    format!(
        "{} by {} ({}) - {} - {}",
        book.title,
        book.author,
        book.year,
        book.genre_label(),
        status
    )
}

/// Book line prefixed with its 1-based stored position.
pub fn indexed_line(position: usize, book: &Book) -> String {
    format!("{:>4}. {}", position + 1, book_line(book))
}

pub fn overview(stats: &LibraryStats) -> String {
    let overview = &stats.overview;
    let mut out = String::new();
    push_line(&mut out, format!("Total books:  {}", overview.total));
    push_line(&mut out, format!("Read:         {}", overview.read_count));
    push_line(&mut out, format!("Unread:       {}", overview.unread_count));
    push_line(&mut out, format!("Percent read: {:.1}%", overview.percent_read));
    if let Some(book) = &stats.oldest {
        push_line(&mut out, format!("Oldest: {}", book_line(book)));
    }
    if let Some(book) = &stats.newest {
        push_line(&mut out, format!("Newest: {}", book_line(book)));
    }
    out
}

pub fn genres(rows: &[GenreRow]) -> String {
    let mut out = String::new();
    push_line(
        &mut out,
        format!(
            "{:<24} {:>6} {:>6} {:>7} {:>8}",
            "Genre", "Count", "Read", "Unread", "% Read"
        ),
    );
    for row in rows {
        push_line(
            &mut out,
            format!(
                "{:<24} {:>6} {:>6} {:>7} {:>7.1}%",
                row.genre, row.count, row.read_count, row.unread_count, row.percent_read
            ),
        );
    }
    out
}

pub fn decades(rows: &[DecadeRow]) -> String {
    let mut out = String::new();
    push_line(
        &mut out,
        format!("{:<8} {:>6} {:>6} {:>7}", "Decade", "Count", "Read", "Unread"),
    );
    for row in rows {
        push_line(
            &mut out,
            format!(
                "{:<8} {:>6} {:>6} {:>7}",
                row.decade_label, row.count, row.read_count, row.unread_count
            ),
        );
    }
    out
}

pub fn authors(books: &[Book]) -> String {
    let mut out = String::new();
    push_line(&mut out, "Top authors:");
    for row in top_authors(books, AUTHOR_CHART_LIMIT) {
        push_line(&mut out, format!("{:<28} {}", row.author, "#".repeat(row.count)));
    }
    push_line(&mut out, "");
    push_line(
        &mut out,
        format!("Top {AUTHOR_DETAIL_LIMIT} authors in your library:"),
    );
    for row in top_authors(books, AUTHOR_DETAIL_LIMIT) {
        push_line(
            &mut out,
            format!(
                "{}: {} books ({} read, {:.1}%)",
                row.author, row.count, row.read_count, row.percent_read
            ),
        );
    }
    out
}

pub fn timestamp(at: SystemTime) -> String {
    DateTime::<Local>::from(at)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

fn push_line(out: &mut String, line: impl AsRef<str>) {
    out.push_str(line.as_ref());
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::{authors, book_line, decades, indexed_line, overview};
    use bookshelf_core::{by_decade, Book, LibraryStats};

    #[test]
    fn book_line_labels_missing_genre() {
        let book = Book::new("Dune", "Herbert", 1965, "", true);
        assert_eq!(book_line(&book), "Dune by Herbert (1965) - Uncategorized - read");
        assert!(indexed_line(0, &book).trim_start().starts_with("1. Dune"));
    }

    #[test]
    fn decades_table_lists_each_bucket() {
        let books = vec![
            Book::new("Dune", "Herbert", 1965, "Sci-Fi", true),
            Book::new("1984", "Orwell", 1949, "Dystopian", false),
        ];
        let table = decades(&by_decade(&books));
        assert!(table.contains("1940s"));
        assert!(table.contains("1960s"));
        assert_eq!(table.lines().count(), 3);
    }

    #[test]
    fn overview_and_author_views_end_every_line() {
        let books = vec![
            Book::new("Dune", "Herbert", 1965, "Sci-Fi", true),
            Book::new("Dune Messiah", "Herbert", 1969, "Sci-Fi", false),
        ];
        let text = overview(&LibraryStats::compute(&books));
        assert!(text.starts_with("Total books:  2\n"));
        assert!(text.contains("Percent read: 50.0%\n"));
        assert!(text.ends_with("Newest: Dune Messiah by Herbert (1969) - Sci-Fi - unread\n"));

        let text = authors(&books);
        assert!(text.contains(&format!("{:<28} ##\n", "Herbert")));
        assert!(text.contains("\n\nTop 5 authors in your library:\n"));
        assert!(text.ends_with("Herbert: 2 books (1 read, 50.0%)\n"));
    }
}
