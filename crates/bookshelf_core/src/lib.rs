//! Core domain logic for the Bookshelf personal library tracker.
//! This crate is the single source of truth for collection invariants.

pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;
pub mod stats;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status, LogConfig, LoggingError};
pub use model::book::{current_year, Book, BookId, BookValidationError, MIN_YEAR, UNCATEGORIZED};
pub use repo::library::{Library, RepoError, RepoResult, DEFAULT_RECENT};
pub use search::query::{
    distinct_genres, filter_view, filter_view_positioned, search_advanced,
    search_advanced_positioned, search_basic, search_basic_positioned, sort_books, year_bounds,
    AdvancedFilters, BookRow, GenreFilter, ParseQueryError, Positioned, ReadStatus, SearchField,
    SortKey, ViewFilter,
};
pub use service::library_service::{BulkRemoval, LibraryService, Mutation, ServiceError};
pub use stats::aggregate::{
    by_author, by_decade, by_genre, newest, oldest, overview, top_authors, AuthorDetail,
    AuthorRow, DecadeRow, GenreRow, LibraryStats, Overview, AUTHOR_CHART_LIMIT,
    AUTHOR_DETAIL_LIMIT,
};
pub use store::{
    BookStore, JsonFileStore, MemoryStore, PersistenceError, StoreResult, DEFAULT_LIBRARY_FILE,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
