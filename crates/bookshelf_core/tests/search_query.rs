use bookshelf_core::{
    distinct_genres, filter_view, filter_view_positioned, search_advanced,
    search_advanced_positioned, search_basic, search_basic_positioned, sort_books, year_bounds,
    AdvancedFilters, Book, GenreFilter, Positioned, ReadStatus, SearchField, SortKey, ViewFilter,
};

fn library() -> Vec<Book> {
    vec![
        Book::new("Dune", "Frank Herbert", 1965, "Sci-Fi", true),
        Book::new("1984", "George Orwell", 1949, "Dystopian", false),
        Book::new("Animal Farm", "George Orwell", 1945, "Satire", true),
        Book::new("dune messiah", "Frank Herbert", 1969, "Sci-Fi", false),
        Book::new("Field Notes", "Anon", 2001, "", false),
    ]
}

fn titles(books: &[&Book]) -> Vec<String> {
    books.iter().map(|book| book.title.clone()).collect()
}

#[test]
fn basic_search_is_case_insensitive_substring() {
    let books = library();

    let hits = search_basic(&books, SearchField::Title, "DUNE");
    assert_eq!(titles(&hits), ["Dune", "dune messiah"]);

    let hits = search_basic(&books, SearchField::Author, "orwell");
    assert_eq!(titles(&hits), ["1984", "Animal Farm"]);

    assert!(search_basic(&books, SearchField::Title, "zzz").is_empty());
}

#[test]
fn basic_search_with_empty_term_returns_nothing() {
    let books = library();
    assert!(search_basic(&books, SearchField::Title, "").is_empty());
    assert!(search_basic(&books, SearchField::Author, "").is_empty());
}

#[test]
fn advanced_search_year_range_scenario() {
    let books = vec![
        Book::new("Dune", "Herbert", 1965, "Sci-Fi", true),
        Book::new("1984", "Orwell", 1949, "Dystopian", false),
    ];
    let filters = AdvancedFilters {
        year_range: Some((1950, 2000)),
        ..AdvancedFilters::default()
    };

    assert_eq!(titles(&search_advanced(&books, &filters)), ["Dune"]);
}

#[test]
fn advanced_search_default_filters_match_everything_in_order() {
    let books = library();
    let hits = search_advanced(&books, &AdvancedFilters::default());
    assert_eq!(hits.len(), books.len());
    assert_eq!(hits[0].title, "Dune");
    assert_eq!(hits[4].title, "Field Notes");

    let (min, max) = year_bounds(&books).unwrap();
    let observed = AdvancedFilters {
        year_range: Some((min, max)),
        ..AdvancedFilters::default()
    };
    assert_eq!(search_advanced(&books, &observed).len(), books.len());
}

#[test]
fn advanced_search_predicates_are_conjunctive() {
    let books = library();
    let filters = AdvancedFilters {
        title_contains: "dune".to_string(),
        author_contains: "HERBERT".to_string(),
        genre: GenreFilter::Exact("Sci-Fi".to_string()),
        read_status: ReadStatus::Unread,
        year_range: Some((1960, 1970)),
    };
    assert_eq!(titles(&search_advanced(&books, &filters)), ["dune messiah"]);

    let genre_is_exact = AdvancedFilters {
        genre: GenreFilter::Exact("sci-fi".to_string()),
        ..AdvancedFilters::default()
    };
    assert!(search_advanced(&books, &genre_is_exact).is_empty());

    let read_only = AdvancedFilters {
        read_status: ReadStatus::Read,
        ..AdvancedFilters::default()
    };
    assert_eq!(
        titles(&search_advanced(&books, &read_only)),
        ["Dune", "Animal Farm"]
    );
}

#[test]
fn inverted_year_range_matches_nothing() {
    let books = library();
    let filters = AdvancedFilters {
        year_range: Some((2000, 1900)),
        ..AdvancedFilters::default()
    };
    assert!(search_advanced(&books, &filters).is_empty());
}

#[test]
fn sort_uses_case_sensitive_order_and_is_stable() {
    let books = library();

    let ascending = sort_books(&books, SortKey::Title, true);
    assert_eq!(
        titles(&ascending),
        ["1984", "Animal Farm", "Dune", "Field Notes", "dune messiah"]
    );

    let by_author_desc = sort_books(&books, SortKey::Author, false);
    assert_eq!(
        titles(&by_author_desc),
        ["1984", "Animal Farm", "Dune", "dune messiah", "Field Notes"]
    );

    let by_year = sort_books(&books, SortKey::Year, true);
    assert_eq!(by_year.first().unwrap().year, 1945);
    assert_eq!(by_year.last().unwrap().year, 2001);

    let by_genre = sort_books(&books, SortKey::Genre, true);
    assert_eq!(by_genre[0].title, "Field Notes");
    assert_eq!(titles(&by_genre[3..]), ["Dune", "dune messiah"]);
}

#[test]
fn sort_composes_with_filtered_results() {
    let books = library();
    let orwell = search_basic(&books, SearchField::Author, "orwell");
    let sorted = sort_books(orwell, SortKey::Year, true);
    assert_eq!(titles(&sorted), ["Animal Farm", "1984"]);
}

#[test]
fn view_filter_uses_genre_membership_and_read_status() {
    let books = library();

    assert_eq!(filter_view(&books, &ViewFilter::default()).len(), books.len());

    let filter = ViewFilter {
        genres: vec!["Sci-Fi".to_string(), "Satire".to_string()],
        read_status: ReadStatus::Read,
    };
    assert_eq!(titles(&filter_view(&books, &filter)), ["Dune", "Animal Farm"]);
}

fn positions(rows: &[Positioned<'_>]) -> Vec<usize> {
    rows.iter().map(|(position, _)| *position).collect()
}

#[test]
fn positioned_search_reports_stored_positions() {
    let books = library();

    let hits = search_basic_positioned(&books, SearchField::Author, "HERBERT");
    assert_eq!(positions(&hits), [0, 3]);
    assert_eq!(hits[1].1.title, "dune messiah");
    assert!(search_basic_positioned(&books, SearchField::Title, "").is_empty());

    let unread = AdvancedFilters {
        read_status: ReadStatus::Unread,
        ..AdvancedFilters::default()
    };
    assert_eq!(positions(&search_advanced_positioned(&books, &unread)), [1, 3, 4]);
}

#[test]
fn sorting_positioned_rows_keeps_stored_positions() {
    let books = library();
    let read_only = ViewFilter {
        genres: Vec::new(),
        read_status: ReadStatus::Read,
    };

    let rows = sort_books(
        filter_view_positioned(&books, &read_only),
        SortKey::Year,
        false,
    );
    assert_eq!(positions(&rows), [0, 2]);
    assert_eq!(rows[0].1.title, "Dune");
    assert_eq!(rows[1].1.title, "Animal Farm");
}

#[test]
fn genre_listing_and_year_bounds() {
    let books = library();
    assert_eq!(distinct_genres(&books), ["Dystopian", "Satire", "Sci-Fi"]);
    assert_eq!(year_bounds(&books), Some((1945, 2001)));
    assert_eq!(year_bounds(&[]), None);
    assert!(distinct_genres(&[]).is_empty());
}
