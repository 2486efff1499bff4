use catalog_framework::mock::MockStore;
use catalog_framework::StoreError;
use library_catalog::model::{Author, AuthorId, Book, BookId, Comment, CommentId, Genre, GenreId};
use library_catalog::{
    AggregateAssembler, BookExistenceValidator, BookService, CascadeDeletionCoordinator, CatalogError, CommentService,
    EntityKind,
};
use std::collections::BTreeSet;
use std::time::Duration;

struct Mocks {
    authors: MockStore<Author>,
    genres: MockStore<Genre>,
    books: MockStore<Book>,
    comments: MockStore<Comment>,
}

impl Mocks {
    fn new() -> Self {
        Self {
            authors: MockStore::new(),
            genres: MockStore::new(),
            books: MockStore::new(),
            comments: MockStore::new(),
        }
    }

    fn book_service(&self) -> BookService {
        BookService::new(
            self.authors.store(),
            self.genres.store(),
            self.books.store(),
            self.comments.store(),
        )
    }

    fn verify(&self) {
        self.authors.verify();
        self.genres.verify();
        self.books.verify();
        self.comments.verify();
    }
}

#[tokio::test]
async fn test_existence_check_never_fetches_the_book() {
    let mut books = MockStore::<Book>::new();
    books.expect_exists(BookId(13)).return_ok(false);

    let validator = BookExistenceValidator::new(books.store());
    let err = validator.ensure_exists(BookId(13)).await.unwrap_err();

    assert!(matches!(err, CatalogError::NotFound { entity: EntityKind::Book, ref id } if id == "book_13"));
    books.verify();
    assert_eq!(books.calls(), vec!["exists"]);
}

#[tokio::test]
async fn test_unresponsive_store_is_unavailable_not_missing() {
    let mut books = MockStore::<Book>::new();
    books.expect_exists(BookId(1)).never_respond();

    let validator = BookExistenceValidator::new(books.store().with_timeout(Duration::from_millis(25)));
    let err = validator.ensure_exists(BookId(1)).await.unwrap_err();

    assert!(matches!(err, CatalogError::StoreUnavailable { cause: StoreError::Timeout(_) }));
}

#[tokio::test]
async fn test_unresponsive_genre_store_fails_the_whole_assembly() {
    let mut mocks = Mocks::new();
    mocks.authors.expect_get(AuthorId(1)).return_ok(None);
    mocks.genres.expect_get_all().never_respond();

    let assembler = AggregateAssembler::new(
        mocks.authors.store(),
        mocks.genres.store().with_timeout(Duration::from_millis(25)),
    );
    let err = assembler
        .assemble("", AuthorId(1), &BTreeSet::from([GenreId(1)]))
        .await
        .unwrap_err();

    assert!(err.is_unavailable());
}

#[tokio::test]
async fn test_author_and_genre_lookups_run_concurrently() {
    let mut mocks = Mocks::new();
    let author = Author {
        id: AuthorId(1),
        full_name: "Iain M. Banks".into(),
    };
    let genre = Genre {
        id: GenreId(1),
        name: "Space Opera".into(),
    };
    mocks.authors.expect_get(AuthorId(1)).return_ok_after(Duration::from_millis(150), Some(author));
    mocks.genres.expect_get_all().return_ok_after(Duration::from_millis(150), vec![genre]);

    let assembler = AggregateAssembler::new(mocks.authors.store(), mocks.genres.store());
    let started = tokio::time::Instant::now();
    assembler
        .assemble("Excession", AuthorId(1), &BTreeSet::from([GenreId(1)]))
        .await
        .unwrap();

    assert!(started.elapsed() < Duration::from_millis(290));
    mocks.verify();
}

#[tokio::test]
async fn test_comment_store_failure_keeps_the_book() {
    let mut mocks = Mocks::new();
    mocks.books.expect_exists(BookId(5)).return_ok(true);
    mocks.comments.expect_delete_where().return_err(StoreError::Closed);

    let err = mocks.book_service().delete(BookId(5)).await.unwrap_err();

    assert!(matches!(
        err,
        CatalogError::CascadeFailure {
            dependents_deleted: false,
            ..
        }
    ));
    mocks.verify();
    assert_eq!(mocks.books.calls(), vec!["exists"]);
}

#[tokio::test]
async fn test_book_store_failure_after_purge_is_flagged() {
    let mut mocks = Mocks::new();
    mocks.books.expect_exists(BookId(5)).return_ok(true);
    mocks.comments.expect_delete_where().return_ok(3);
    mocks
        .books
        .expect_delete(BookId(5))
        .return_err(StoreError::Timeout(Duration::from_millis(10)));

    let err = mocks.book_service().delete(BookId(5)).await.unwrap_err();

    assert!(matches!(
        err,
        CatalogError::CascadeFailure {
            dependents_deleted: true,
            ..
        }
    ));
    mocks.verify();
}

#[tokio::test]
async fn test_update_of_unknown_book_resolves_nothing() {
    let mut mocks = Mocks::new();
    mocks.books.expect_exists(BookId(8)).return_ok(false);

    let err = mocks
        .book_service()
        .update(BookId(8), "Use of Weapons", AuthorId(1), &BTreeSet::from([GenreId(1)]))
        .await
        .unwrap_err();

    assert!(matches!(err, CatalogError::NotFound { entity: EntityKind::Book, .. }));
    mocks.verify();
    assert!(mocks.authors.calls().is_empty());
    assert!(mocks.genres.calls().is_empty());
}

#[tokio::test]
async fn test_dropped_caller_does_not_stop_the_cascade() {
    let mut mocks = Mocks::new();
    mocks.books.expect_exists(BookId(2)).return_ok(true);
    mocks
        .comments
        .expect_delete_where()
        .return_ok_after(Duration::from_millis(60), 4);
    mocks.books.expect_delete(BookId(2)).return_ok(());
    mocks.comments.expect_delete_where().return_ok(0);

    let coordinator = CascadeDeletionCoordinator::new(mocks.books.store(), mocks.comments.store());
    let gave_up = tokio::time::timeout(Duration::from_millis(20), coordinator.delete_book_cascading(BookId(2))).await;
    assert!(gave_up.is_err());

    tokio::time::sleep(Duration::from_millis(150)).await;
    mocks.verify();
    assert_eq!(mocks.books.calls(), vec!["exists", "delete"]);
}

#[tokio::test]
async fn test_invalid_comment_never_reaches_the_stores() {
    let mocks = Mocks::new();
    let service = CommentService::new(mocks.comments.store(), mocks.books.store());

    let err = service.create(BookId(1), "   ").await.unwrap_err();

    assert!(matches!(err, CatalogError::Validation(ref e) if e.field == "text"));
    assert!(mocks.books.calls().is_empty());
    assert!(mocks.comments.calls().is_empty());
}

#[tokio::test]
async fn test_comment_written_after_its_book_was_deleted_is_rolled_back() {
    let mut mocks = Mocks::new();
    mocks.books.expect_exists(BookId(3)).return_ok(true);
    mocks.comments.expect_create().return_ok(CommentId(9));
    mocks.books.expect_exists(BookId(3)).return_ok(false);
    mocks.comments.expect_delete(CommentId(9)).return_ok(());
    let service = CommentService::new(mocks.comments.store(), mocks.books.store());

    let err = service.create(BookId(3), "Too late for this one.").await.unwrap_err();

    assert!(matches!(err, CatalogError::NotFound { entity: EntityKind::Book, .. }));
    mocks.verify();
    assert_eq!(mocks.comments.calls(), vec!["create", "delete"]);
}

#[tokio::test]
async fn test_rollback_tolerates_a_comment_already_swept() {
    let mut mocks = Mocks::new();
    mocks.books.expect_exists(BookId(3)).return_ok(true);
    mocks.comments.expect_create().return_ok(CommentId(9));
    mocks.books.expect_exists(BookId(3)).return_ok(false);
    mocks
        .comments
        .expect_delete(CommentId(9))
        .return_err(StoreError::NotFound("comment_9".into()));
    let service = CommentService::new(mocks.comments.store(), mocks.books.store());

    let err = service.create(BookId(3), "Too late for this one.").await.unwrap_err();

    assert!(matches!(err, CatalogError::NotFound { entity: EntityKind::Book, .. }));
    mocks.verify();
}
