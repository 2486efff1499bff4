use crate::assembler::AggregateAssembler;
use crate::cascade::{CascadeDeletionCoordinator, CascadeOutcome};
use crate::error::{store_error, CatalogError, EntityKind};
use crate::model::{Author, AuthorId, Book, BookId, Comment, Genre, GenreId};
use crate::resolve::BookExistenceValidator;
use catalog_framework::StoreClient;
use std::collections::BTreeSet;
use tracing::{info, instrument};

/// Book operations with referential checks and cascading deletes.
#[derive(Clone)]
pub struct BookService {
    books: StoreClient<Book>,
    existence: BookExistenceValidator<StoreClient<Book>>,
    assembler: AggregateAssembler<StoreClient<Author>, StoreClient<Genre>>,
    cascade: CascadeDeletionCoordinator<StoreClient<Book>, StoreClient<Comment>>,
}

impl BookService {
    pub fn new(
        authors: StoreClient<Author>,
        genres: StoreClient<Genre>,
        books: StoreClient<Book>,
        comments: StoreClient<Comment>,
    ) -> Self {
        Self {
            existence: BookExistenceValidator::new(books.clone()),
            assembler: AggregateAssembler::new(authors, genres),
            cascade: CascadeDeletionCoordinator::new(books.clone(), comments),
            books,
        }
    }

    #[instrument(skip(self, genre_ids))]
    pub async fn create(
        &self,
        title: &str,
        author_id: AuthorId,
        genre_ids: &BTreeSet<GenreId>,
    ) -> Result<Book, CatalogError> {
        let aggregate = self.assembler.assemble(title, author_id, genre_ids).await?;
        let id = self
            .books
            .create(aggregate.into_create())
            .await
            .map_err(store_error(EntityKind::Book))?;
        info!(%id, "Book created");
        self.find_by_id(id).await
    }

    /// Replaces title, author and genres of an existing book.
    ///
    /// An unknown book fails with `NotFound` before any reference is resolved.
    #[instrument(skip(self, genre_ids))]
    pub async fn update(
        &self,
        id: BookId,
        title: &str,
        author_id: AuthorId,
        genre_ids: &BTreeSet<GenreId>,
    ) -> Result<Book, CatalogError> {
        self.existence.ensure_exists(id).await?;
        let aggregate = self.assembler.assemble(title, author_id, genre_ids).await?;
        let book = self
            .books
            .update(id, aggregate.into_update())
            .await
            .map_err(store_error(EntityKind::Book))?;
        info!(%id, "Book updated");
        Ok(book)
    }

    pub async fn delete(&self, id: BookId) -> Result<CascadeOutcome, CatalogError> {
        self.cascade.delete_book_cascading(id).await
    }

    pub async fn find_by_id(&self, id: BookId) -> Result<Book, CatalogError> {
        self.books
            .get(id)
            .await
            .map_err(store_error(EntityKind::Book))?
            .ok_or_else(|| CatalogError::not_found(EntityKind::Book, id))
    }

    pub async fn find_all(&self) -> Result<Vec<Book>, CatalogError> {
        self.books
            .list()
            .await
            .map_err(store_error(EntityKind::Book))
    }
}
