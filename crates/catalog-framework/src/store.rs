//! # EntityStore Capability
//!
//! `EntityStore<T>` is the storage contract that domain logic is written against. The
//! actor-backed [`StoreClient`] is one conforming backend; anything else that can answer these
//! calls (a SQL repository, a document collection, a test double) can stand in for it.
//!
//! Implementations must uphold two rules the domain layer depends on:
//! - `get_all` is a single round trip and silently omits ids it does not know.
//! - `delete_where` is idempotent: repeating it after success removes nothing and returns `0`.

use crate::client::StoreClient;
use crate::entity::StoredEntity;
use crate::error::StoreResult;
use crate::filter::Filter;
use async_trait::async_trait;
use std::collections::BTreeSet;

/// Key-based storage for one entity type.
#[async_trait]
pub trait EntityStore<T: StoredEntity>: Send + Sync {
    /// Fetch a record by id.
    async fn get(&self, id: T::Id) -> StoreResult<Option<T>>;

    /// Fetch every record whose id is in `ids`, in one round trip.
    async fn get_all(&self, ids: &BTreeSet<T::Id>) -> StoreResult<Vec<T>>;

    /// Existence probe that does not load the record.
    async fn exists_by_id(&self, id: T::Id) -> StoreResult<bool>;

    /// Every record in the store.
    async fn list(&self) -> StoreResult<Vec<T>>;

    /// Every record matching `filter`.
    async fn find_where(&self, filter: Filter<T>) -> StoreResult<Vec<T>>;

    /// Insert a new record and return its store-assigned id.
    async fn create(&self, params: T::Create) -> StoreResult<T::Id>;

    /// Change an existing record and return its new state.
    async fn update(&self, id: T::Id, update: T::Update) -> StoreResult<T>;

    /// Remove a record; [`StoreError::NotFound`](crate::StoreError::NotFound) if absent.
    async fn delete(&self, id: T::Id) -> StoreResult<()>;

    /// Remove every record matching `filter` and return how many were removed.
    async fn delete_where(&self, filter: Filter<T>) -> StoreResult<usize>;
}

#[async_trait]
impl<T: StoredEntity> EntityStore<T> for StoreClient<T> {
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> StoreResult<Option<T>> {
        StoreClient::get(self, id).await
    }

    #[tracing::instrument(skip(self))]
    async fn get_all(&self, ids: &BTreeSet<T::Id>) -> StoreResult<Vec<T>> {
        self.get_many(ids.clone()).await
    }

    #[tracing::instrument(skip(self))]
    async fn exists_by_id(&self, id: T::Id) -> StoreResult<bool> {
        self.exists(id).await
    }

    async fn list(&self) -> StoreResult<Vec<T>> {
        StoreClient::list(self).await
    }

    async fn find_where(&self, filter: Filter<T>) -> StoreResult<Vec<T>> {
        StoreClient::find_where(self, filter).await
    }

    async fn create(&self, params: T::Create) -> StoreResult<T::Id> {
        StoreClient::create(self, params).await
    }

    async fn update(&self, id: T::Id, update: T::Update) -> StoreResult<T> {
        StoreClient::update(self, id, update).await
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> StoreResult<()> {
        StoreClient::delete(self, id).await
    }

    #[tracing::instrument(skip(self))]
    async fn delete_where(&self, filter: Filter<T>) -> StoreResult<usize> {
        StoreClient::delete_where(self, filter).await
    }
}
