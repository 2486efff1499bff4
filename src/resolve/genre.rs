use crate::error::{store_error, CatalogError, EntityKind};
use crate::model::{Genre, GenreId};
use catalog_framework::EntityStore;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, instrument, warn};

/// Resolves a set of genre references with a single bulk lookup.
///
/// # Algorithm
///
/// 1. One `get_all` call for the whole requested set. Never one call per id.
/// 2. Keep exactly one genre per requested id; anything the store returned twice, or returned
///    without being asked for, is discarded.
/// 3. If any requested id is still unresolved, fail with
///    [`CatalogError::NotFoundSet`] carrying the **complete** set of missing ids.
///
/// The returned list is ordered by id, but callers should not rely on the order.
///
/// An empty request resolves to an empty list without touching the store. Whether an empty
/// genre set is acceptable is the caller's decision.
#[derive(Clone)]
pub struct GenreSetResolver<S> {
    store: S,
}

impl<S: EntityStore<Genre>> GenreSetResolver<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    #[instrument(skip(self), fields(requested = ids.len()))]
    pub async fn resolve_all(&self, ids: &BTreeSet<GenreId>) -> Result<Vec<Genre>, CatalogError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let returned = self.store.get_all(ids).await.map_err(store_error(EntityKind::Genre))?;

        let mut found: BTreeMap<GenreId, Genre> = BTreeMap::new();
        for genre in returned {
            if ids.contains(&genre.id) {
                found.entry(genre.id).or_insert(genre);
            }
        }

        let missing_ids: BTreeSet<String> = ids
            .iter()
            .filter(|id| !found.contains_key(id))
            .map(ToString::to_string)
            .collect();

        if !missing_ids.is_empty() {
            warn!(missing = missing_ids.len(), "Unresolved genre references");
            return Err(CatalogError::NotFoundSet {
                entity: EntityKind::Genre,
                missing_ids,
            });
        }

        debug!(resolved = found.len(), "Genres resolved");
        Ok(found.into_values().collect())
    }
}
