use crate::error::{store_error, CatalogError, EntityKind};
use crate::model::{Book, BookId};
use catalog_framework::EntityStore;
use tracing::{debug, instrument};

/// Existence probe for books, for write paths that only need a yes/no answer.
///
/// Only ever calls `exists_by_id`; the book itself is never fetched.
#[derive(Clone)]
pub struct BookExistenceValidator<S> {
    store: S,
}

impl<S: EntityStore<Book>> BookExistenceValidator<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    #[instrument(skip(self))]
    pub async fn ensure_exists(&self, id: BookId) -> Result<(), CatalogError> {
        if self.store.exists_by_id(id).await.map_err(store_error(EntityKind::Book))? {
            Ok(())
        } else {
            debug!(%id, "Book not found");
            Err(CatalogError::not_found(EntityKind::Book, id))
        }
    }
}
