use bookshelf_core::{
    Book, BookStore, BookValidationError, BulkRemoval, JsonFileStore, LibraryService, MemoryStore,
    PersistenceError, RepoError, ServiceError,
};
use std::fs;

fn seeded_store() -> MemoryStore {
    MemoryStore::with_books(vec![
        Book::new("Dune", "Frank Herbert", 1965, "Sci-Fi", true),
        Book::new("1984", "George Orwell", 1949, "Dystopian", false),
        Book::new("Hyperion", "Dan Simmons", 1989, "Sci-Fi", false),
    ])
}

#[test]
fn open_loads_existing_books() {
    let store = seeded_store();
    let (service, load_error) = LibraryService::open(&store);

    assert!(load_error.is_none());
    assert_eq!(service.books().len(), 3);
    assert_eq!(service.books()[0].title, "Dune");
}

#[test]
fn open_degrades_to_empty_library_on_malformed_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("library.json");
    fs::write(&path, "[{\"title\": 1}]").unwrap();

    let (service, load_error) = LibraryService::open(JsonFileStore::new(&path));

    assert!(service.books().is_empty());
    assert!(matches!(
        load_error,
        Some(PersistenceError::Malformed { .. })
    ));
}

#[test]
fn every_mutation_saves_the_whole_collection() {
    let store = seeded_store();
    let (mut service, _) = LibraryService::open(&store);

    let added = service
        .add_book(Book::new("Kindred", "Octavia E. Butler", 1979, "", false))
        .unwrap();
    assert!(added.is_saved());
    assert_eq!(store.save_count(), 1);
    assert_eq!(store.saved().len(), 4);

    let toggled = service.toggle_read(1).unwrap();
    assert!(toggled.value);
    assert!(store.saved()[1].read);

    let removed = service.remove_at(0).unwrap();
    assert_eq!(removed.value.title, "Dune");
    assert_eq!(store.saved().len(), 3);

    let bulk = service.remove_where(|book| book.genre == "Sci-Fi");
    assert_eq!(bulk.value, 1);
    assert_eq!(store.save_count(), 4);
    assert_eq!(store.saved(), service.books());
}

#[test]
fn add_book_rejects_invalid_input_without_saving() {
    let store = seeded_store();
    let (mut service, _) = LibraryService::open(&store);

    let err = service
        .add_book(Book::new("", "Author", 2000, "", false))
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(BookValidationError::EmptyTitle)
    ));

    let err = service
        .add_book_as_of(Book::new("Later", "Author", 2031, "", false), 2030)
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(BookValidationError::YearOutOfRange { .. })
    ));

    assert!(!err.is_caller_bug());

    assert_eq!(service.books().len(), 3);
    assert_eq!(store.save_count(), 0);
}

#[test]
fn stale_index_is_reported_as_repo_error() {
    let store = seeded_store();
    let (mut service, _) = LibraryService::open(&store);

    let err = service.remove_at(3).unwrap_err();
    assert!(err.is_caller_bug());
    match err {
        ServiceError::Repo(repo_err) => {
            assert_eq!(repo_err, RepoError::IndexOutOfBounds { index: 3, len: 3 });
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(matches!(
        service.toggle_read(usize::MAX),
        Err(ServiceError::Repo(_))
    ));
    assert_eq!(store.save_count(), 0);
}

#[test]
fn id_keyed_operations_follow_the_book() {
    let store = seeded_store();
    let (mut service, _) = LibraryService::open(&store);
    let hyperion = service.library().id_at(2).unwrap();

    let _dune = service.remove_at(0).unwrap();
    let toggled = service.toggle_read_by_id(hyperion).unwrap();
    assert!(toggled.value);
    assert!(service.books()[1].read);

    let removed = service.remove_by_id(hyperion).unwrap();
    assert_eq!(removed.value.title, "Hyperion");
    assert!(matches!(
        service.remove_by_id(hyperion),
        Err(ServiceError::Repo(RepoError::NotFound(_)))
    ));
}

#[test]
fn bulk_removal_preview_matches_removed_books() {
    let store = seeded_store();
    let (mut service, _) = LibraryService::open(&store);

    let unread = BulkRemoval::ReadStatus(false);
    let preview = service
        .preview_bulk(&unread)
        .into_iter()
        .map(|book| book.title.clone())
        .collect::<Vec<_>>();
    assert_eq!(preview, ["1984", "Hyperion"]);

    let removed = service.remove_bulk(&unread);
    assert_eq!(removed.value, 2);
    assert_eq!(service.books().len(), 1);

    let by_years = service.remove_bulk(&BulkRemoval::YearRange {
        min: 1900,
        max: 1960,
    });
    assert_eq!(by_years.value, 0);
    let by_genre = service.remove_bulk(&BulkRemoval::Genre("Sci-Fi".to_string()));
    assert_eq!(by_genre.value, 1);
    assert!(service.books().is_empty());
}

#[test]
fn failed_save_keeps_in_memory_change_and_can_be_retried() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, "file in the way").unwrap();
    let path = blocker.join("library.json");

    let (mut service, load_error) = LibraryService::open(JsonFileStore::new(&path));
    assert!(load_error.is_some());

    let added = service
        .add_book(Book::new("Dune", "Frank Herbert", 1965, "Sci-Fi", true))
        .unwrap();
    assert!(!added.is_saved());
    assert!(matches!(added.saved, Err(PersistenceError::Io { .. })));
    assert_eq!(service.books().len(), 1);

    let err = ServiceError::from(service.save().unwrap_err());
    assert!(matches!(err, ServiceError::Persistence(PersistenceError::Io { .. })));
    assert!(!err.is_caller_bug());
    assert!(err.to_string().starts_with("failed to save library"));

    fs::remove_file(&blocker).unwrap();
    service.save().unwrap();
    assert_eq!(JsonFileStore::new(&path).load().unwrap(), service.books());
}

#[test]
fn reopening_file_store_sees_saved_mutations() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("library.json");

    {
        let (mut service, load_error) = LibraryService::open(JsonFileStore::new(&path));
        assert!(load_error.is_none());
        service
            .add_book(Book::new("Dune", "Frank Herbert", 1965, "Sci-Fi", false))
            .unwrap()
            .saved
            .unwrap();
        service.toggle_read(0).unwrap().saved.unwrap();
    }

    let (service, _) = LibraryService::open(JsonFileStore::new(&path));
    assert_eq!(service.books().len(), 1);
    assert!(service.books()[0].read);
    assert!(service.store().last_saved().is_some());
}
