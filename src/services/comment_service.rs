use crate::cascade::comments_of;
use crate::error::{store_error, CatalogError, EntityKind};
use crate::model::{Book, BookId, Comment, CommentCreate, CommentId, CommentUpdate};
use crate::resolve::BookExistenceValidator;
use crate::validate::CommentFieldValidator;
use catalog_framework::{StoreClient, StoreError};
use tracing::{info, instrument, warn};

/// Comment operations. A comment is only accepted for a book that exists.
#[derive(Clone)]
pub struct CommentService {
    comments: StoreClient<Comment>,
    books: BookExistenceValidator<StoreClient<Book>>,
}

impl CommentService {
    pub fn new(comments: StoreClient<Comment>, books: StoreClient<Book>) -> Self {
        Self {
            comments,
            books: BookExistenceValidator::new(books),
        }
    }

    #[instrument(skip(self, text))]
    pub async fn create(&self, book_id: BookId, text: &str) -> Result<Comment, CatalogError> {
        CommentFieldValidator::validate_comment_text(Some(text))?;
        self.books.ensure_exists(book_id).await?;

        let id = self
            .comments
            .create(CommentCreate {
                book_id,
                text: text.to_string(),
            })
            .await
            .map_err(store_error(EntityKind::Comment))?;

        // A cascade on this book may have run between the check and the write.
        match self.books.ensure_exists(book_id).await {
            Ok(()) => {}
            Err(gone @ CatalogError::NotFound { .. }) => {
                warn!(%id, %book_id, "Book deleted while the comment was written; rolling back");
                match self.comments.delete(id).await {
                    Ok(()) | Err(StoreError::NotFound(_)) => {}
                    Err(e) => return Err(CatalogError::from_store(EntityKind::Comment, e)),
                }
                return Err(gone);
            }
            Err(e) => return Err(e),
        }

        info!(%id, %book_id, "Comment created");
        self.find_by_id(id).await
    }

    #[instrument(skip(self, text))]
    pub async fn update(&self, id: CommentId, text: &str) -> Result<Comment, CatalogError> {
        CommentFieldValidator::validate_comment_text(Some(text))?;
        self.comments
            .update(id, CommentUpdate { text: text.to_string() })
            .await
            .map_err(store_error(EntityKind::Comment))
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: CommentId) -> Result<(), CatalogError> {
        self.comments
            .delete(id)
            .await
            .map_err(store_error(EntityKind::Comment))
    }

    pub async fn find_by_id(&self, id: CommentId) -> Result<Comment, CatalogError> {
        self.comments
            .get(id)
            .await
            .map_err(store_error(EntityKind::Comment))?
            .ok_or_else(|| CatalogError::not_found(EntityKind::Comment, id))
    }

    /// Comments of one book, oldest first. An unknown book is `NotFound`, not an empty list.
    pub async fn find_by_book(&self, book_id: BookId) -> Result<Vec<Comment>, CatalogError> {
        self.books.ensure_exists(book_id).await?;
        self.comments
            .find_where(comments_of(book_id))
            .await
            .map_err(store_error(EntityKind::Comment))
    }
}
