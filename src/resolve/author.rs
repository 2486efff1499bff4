use crate::error::{store_error, CatalogError, EntityKind};
use crate::model::{Author, AuthorId};
use catalog_framework::EntityStore;
use tracing::{debug, instrument};

/// Resolves a single author reference.
#[derive(Clone)]
pub struct AuthorResolver<S> {
    store: S,
}

impl<S: EntityStore<Author>> AuthorResolver<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    #[instrument(skip(self))]
    pub async fn resolve(&self, id: AuthorId) -> Result<Author, CatalogError> {
        match self.store.get(id).await.map_err(store_error(EntityKind::Author))? {
            Some(author) => Ok(author),
            None => {
                debug!(%id, "Author not found");
                Err(CatalogError::not_found(EntityKind::Author, id))
            }
        }
    }
}
