//! Command-line front end for the Bookshelf core.
//!
//! # Responsibility
//! - Parse user input and map it onto core service/query/statistics calls.
//! - Render plain-text output; all collection logic stays in core.
//!
//! # Invariants
//! - Indices shown to and accepted from users are 1-based stored positions,
//!   in every listing including sorted and searched ones.
//! - A library that fails to load is reported and replaced by an empty one.

mod render;

use bookshelf_core::{
    default_log_level, distinct_genres, filter_view_positioned, init_logging,
    search_advanced_positioned, search_basic_positioned, sort_books, year_bounds, AdvancedFilters,
    Book, BulkRemoval, GenreFilter, JsonFileStore, LibraryService, LibraryStats,
    LogConfig, Mutation, Positioned, ReadStatus, SearchField, ServiceError, SortKey, ViewFilter,
    DEFAULT_LIBRARY_FILE, DEFAULT_RECENT,
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::info;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "bookshelf")]
#[command(about = "Track a personal book collection stored in a JSON file")]
struct Cli {
    /// Library file to read and write.
    #[arg(long, env = "BOOKSHELF_LIBRARY", default_value = DEFAULT_LIBRARY_FILE, global = true)]
    library: PathBuf,

    /// Log level: trace|debug|info|warn|error.
    #[arg(long, env = "BOOKSHELF_LOG_LEVEL", global = true)]
    log_level: Option<String>,

    /// Directory for rolling log files; logging is off when unset.
    #[arg(long, env = "BOOKSHELF_LOG_DIR", global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Add a book to the library.
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        author: String,
        #[arg(long)]
        year: i32,
        #[arg(long, default_value = "")]
        genre: String,
        /// Mark the book as already read.
        #[arg(long)]
        read: bool,
    },
    /// List the collection with optional filters and sorting.
    List {
        #[arg(long, value_enum, default_value_t = SortArg::Title)]
        sort: SortArg,
        #[arg(long)]
        desc: bool,
        /// Keep only these genres (repeatable).
        #[arg(long = "genre")]
        genres: Vec<String>,
        #[arg(long, value_enum, default_value_t = StatusArg::Any)]
        status: StatusArg,
    },
    /// Show the most recently added books.
    Recent {
        #[arg(short, default_value_t = DEFAULT_RECENT)]
        n: usize,
    },
    /// Search the collection.
    #[command(subcommand)]
    Search(SearchCommand),
    /// Flip the read flag of the book at INDEX.
    Toggle { index: usize },
    /// Remove the book at INDEX.
    Remove { index: usize },
    /// Remove every book matching one criterion.
    RemoveBulk(BulkArgs),
    /// Show collection statistics.
    Stats {
        #[arg(value_enum, default_value_t = StatsView::Overview)]
        view: StatsView,
    },
    /// Save the collection again and show the last-saved time.
    Save,
}

#[derive(Debug, Subcommand)]
enum SearchCommand {
    /// Substring search on title or author.
    Basic {
        #[arg(long, value_enum, default_value_t = FieldArg::Title)]
        field: FieldArg,
        term: String,
    },
    /// Combined filters; every given filter must match.
    Advanced {
        #[arg(long, default_value = "")]
        title: String,
        #[arg(long, default_value = "")]
        author: String,
        #[arg(long)]
        genre: Option<String>,
        #[arg(long, value_enum, default_value_t = StatusArg::Any)]
        status: StatusArg,
        #[arg(long)]
        min_year: Option<i32>,
        #[arg(long)]
        max_year: Option<i32>,
    },
}

#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
struct BulkArgs {
    #[arg(long, value_enum)]
    status: Option<BulkStatusArg>,
    #[arg(long)]
    genre: Option<String>,
    #[arg(long, num_args = 2, value_names = ["MIN", "MAX"])]
    years: Option<Vec<i32>>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SortArg {
    Title,
    Author,
    Year,
    Genre,
}

impl From<SortArg> for SortKey {
    fn from(value: SortArg) -> Self {
        match value {
            SortArg::Title => Self::Title,
            SortArg::Author => Self::Author,
            SortArg::Year => Self::Year,
            SortArg::Genre => Self::Genre,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StatusArg {
    Any,
    Read,
    Unread,
}

impl From<StatusArg> for ReadStatus {
    fn from(value: StatusArg) -> Self {
        match value {
            StatusArg::Any => Self::Any,
            StatusArg::Read => Self::Read,
            StatusArg::Unread => Self::Unread,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum BulkStatusArg {
    Read,
    Unread,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FieldArg {
    Title,
    Author,
}

impl From<FieldArg> for SearchField {
    fn from(value: FieldArg) -> Self {
        match value {
            FieldArg::Title => Self::Title,
            FieldArg::Author => Self::Author,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StatsView {
    Overview,
    Genre,
    Decade,
    Author,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(log_dir) = &cli.log_dir {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        let started = LogConfig::parse(level, log_dir).and_then(init_logging);
        if let Err(err) = started {
            eprintln!("warning: logging disabled: {err}");
        }
    }

    let store = JsonFileStore::new(&cli.library);
    let (mut service, load_error) = LibraryService::open(store);
    if let Some(err) = load_error {
        eprintln!("warning: {err}; starting with an empty library");
    }
    info!("event=cli_start module=cli status=ok books={}", service.books().len());

    match run(&mut service, cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(service: &mut LibraryService<JsonFileStore>, command: Command) -> Result<(), ServiceError> {
    match command {
        Command::Add {
            title,
            author,
            year,
            genre,
            read,
        } => {
            let book = Book::new(title, author, year, genre, read);
            let message = format!("'{}' by {} added", book.title, book.author);
            let mutation = service.add_book(book)?;
            report(&mutation, &message);
        }
        Command::List {
            sort,
            desc,
            genres,
            status,
        } => {
            for genre in &genres {
                warn_unknown_genre(service.books(), genre);
            }
            let filter = ViewFilter {
                genres,
                read_status: status.into(),
            };
            let rows = list_rows(service.books(), &filter, sort.into(), !desc);
            for (position, book) in &rows {
                println!("{}", render::indexed_line(*position, book));
            }
            println!(
                "Displaying {} of {} books",
                rows.len(),
                service.books().len()
            );
        }
        Command::Recent { n } => {
            let len = service.library().len();
            for (offset, book) in service.library().recent(n).into_iter().enumerate() {
                println!("{}", render::indexed_line(len - 1 - offset, book));
            }
        }
        Command::Search(SearchCommand::Basic { field, term }) => {
            print_results(&search_basic_positioned(service.books(), field.into(), &term));
        }
        Command::Search(SearchCommand::Advanced {
            title,
            author,
            genre,
            status,
            min_year,
            max_year,
        }) => {
            if let Some(genre) = &genre {
                warn_unknown_genre(service.books(), genre);
            }
            let filters = AdvancedFilters {
                title_contains: title,
                author_contains: author,
                genre: genre.map(GenreFilter::Exact).unwrap_or_default(),
                read_status: status.into(),
                year_range: year_range(service.books(), min_year, max_year),
            };
            print_results(&search_advanced_positioned(service.books(), &filters));
        }
        Command::Toggle { index } => {
            let mutation = service.toggle_read(to_position(index))?;
            let state = if mutation.value { "read" } else { "unread" };
            report(&mutation, &format!("book #{index} marked as {state}"));
        }
        Command::Remove { index } => {
            let mutation = service.remove_at(to_position(index))?;
            let message = format!("'{}' removed", mutation.value.title);
            report(&mutation, &message);
        }
        Command::RemoveBulk(args) => {
            let Some(criteria) = bulk_criteria(args) else {
                println!("No removal criterion given.");
                return Ok(());
            };
            if let BulkRemoval::Genre(genre) = &criteria {
                warn_unknown_genre(service.books(), genre);
            }
            let selected = service.preview_bulk(&criteria);
            if selected.is_empty() {
                println!("No books match; nothing removed.");
                return Ok(());
            }
            for book in &selected {
                println!("{}", render::book_line(book));
            }
            let mutation = service.remove_bulk(&criteria);
            report(&mutation, &format!("removed {} books", mutation.value));
        }
        Command::Stats { view } => {
            let stats = LibraryStats::compute(service.books());
            if stats.overview.total == 0 {
                println!("Your library is empty.");
                return Ok(());
            }
            let text = match view {
                StatsView::Overview => render::overview(&stats),
                StatsView::Genre => render::genres(&stats.by_genre),
                StatsView::Decade => render::decades(&stats.by_decade),
                StatsView::Author => render::authors(service.books()),
            };
            print!("{text}");
        }
        Command::Save => {
            service.save()?;
            println!("Library saved ({} books).", service.books().len());
            if let Some(saved_at) = service.store().last_saved() {
                println!("Last saved: {}", render::timestamp(saved_at));
            }
        }
    }
    Ok(())
}

/// List-view rows: filtered, then sorted, each with its stored position.
fn list_rows<'a>(
    books: &'a [Book],
    filter: &ViewFilter,
    key: SortKey,
    ascending: bool,
) -> Vec<Positioned<'a>> {
    sort_books(filter_view_positioned(books, filter), key, ascending)
}

/// Inclusive year range from optional bounds; a missing bound takes the
/// observed one.
fn year_range(books: &[Book], min: Option<i32>, max: Option<i32>) -> Option<(i32, i32)> {
    if min.is_none() && max.is_none() {
        return None;
    }
    let (observed_min, observed_max) = year_bounds(books).unwrap_or((i32::MIN, i32::MAX));
    Some((min.unwrap_or(observed_min), max.unwrap_or(observed_max)))
}

/// Hint for a genre no book carries; genre matching is exact.
fn unknown_genre_hint(books: &[Book], genre: &str) -> Option<String> {
    let known = distinct_genres(books);
    if known.iter().any(|candidate| candidate == genre) {
        return None;
    }
    if known.is_empty() {
        return Some(format!("no book has genre '{genre}'"));
    }
    Some(format!(
        "no book has genre '{genre}'; known genres: {}",
        known.join(", ")
    ))
}

fn warn_unknown_genre(books: &[Book], genre: &str) {
    if let Some(hint) = unknown_genre_hint(books, genre) {
        eprintln!("note: {hint}");
    }
}

fn bulk_criteria(args: BulkArgs) -> Option<BulkRemoval> {
    if let Some(status) = args.status {
        return Some(BulkRemoval::ReadStatus(matches!(status, BulkStatusArg::Read)));
    }
    if let Some(genre) = args.genre {
        return Some(BulkRemoval::Genre(genre));
    }
    match args.years.as_deref() {
        Some([min, max]) => Some(BulkRemoval::YearRange {
            min: *min,
            max: *max,
        }),
        _ => None,
    }
}

/// Converts a 1-based user index to a stored position.
///
/// `0` maps to `usize::MAX` so the repository reports it as out of range.
fn to_position(index: usize) -> usize {
    index.checked_sub(1).unwrap_or(usize::MAX)
}

fn report<T>(mutation: &Mutation<T>, message: &str) {
    println!("{message}");
    if let Err(err) = &mutation.saved {
        eprintln!("warning: change kept in memory but not saved: {err}");
    }
}

fn print_results(hits: &[Positioned<'_>]) {
    if hits.is_empty() {
        println!("No books found.");
        return;
    }
    println!("Found {} books:", hits.len());
    for (position, book) in hits {
        println!("{}", render::indexed_line(*position, book));
    }
}
