//! # Generic Store Client
//!
//! This module defines the client half of a store actor.

use crate::entity::StoredEntity;
use crate::error::{StoreError, StoreResult};
use crate::filter::Filter;
use crate::message::{Response, StoreRequest};
use std::collections::BTreeSet;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};

/// ## StoreClient
///
/// The `StoreClient<T>` provides a type-safe, async API for a `StoreActor<T>`. It forwards
/// requests over a Tokio mpsc channel and receives answers on oneshot channels.
///
/// * **Cloneable** - holds only a sender and a timeout, so cloning is inexpensive.
/// * **Bounded** - with [`with_timeout`](Self::with_timeout), every request either answers or
///   fails with [`StoreError::Timeout`] once the limit elapses.
#[derive(Clone)]
pub struct StoreClient<T: StoredEntity> {
    sender: mpsc::Sender<StoreRequest<T>>,
    timeout: Option<Duration>,
}

impl<T: StoredEntity> StoreClient<T> {
    pub fn new(sender: mpsc::Sender<StoreRequest<T>>) -> Self {
        Self { sender, timeout: None }
    }

    /// Returns a copy of this client whose requests fail after `limit`.
    pub fn with_timeout(mut self, limit: Duration) -> Self {
        self.timeout = Some(limit);
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    async fn request<R>(&self, build: impl FnOnce(Response<R>) -> StoreRequest<T>) -> StoreResult<R> {
        let (respond_to, response) = oneshot::channel();
        let exchange = async {
            self.sender
                .send(build(respond_to))
                .await
                .map_err(|_| StoreError::Closed)?;
            response.await.map_err(|_| StoreError::Dropped)?
        };
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, exchange)
                .await
                .map_err(|_| StoreError::Timeout(limit))?,
            None => exchange.await,
        }
    }

    pub async fn create(&self, params: T::Create) -> StoreResult<T::Id> {
        self.request(|respond_to| StoreRequest::Create { params, respond_to }).await
    }

    pub async fn get(&self, id: T::Id) -> StoreResult<Option<T>> {
        self.request(|respond_to| StoreRequest::Get { id, respond_to }).await
    }

    pub async fn get_many(&self, ids: BTreeSet<T::Id>) -> StoreResult<Vec<T>> {
        self.request(|respond_to| StoreRequest::GetMany { ids, respond_to }).await
    }

    pub async fn exists(&self, id: T::Id) -> StoreResult<bool> {
        self.request(|respond_to| StoreRequest::Exists { id, respond_to }).await
    }

    pub async fn list(&self) -> StoreResult<Vec<T>> {
        self.request(|respond_to| StoreRequest::List { respond_to }).await
    }

    pub async fn find_where(&self, filter: Filter<T>) -> StoreResult<Vec<T>> {
        self.request(|respond_to| StoreRequest::FindWhere { filter, respond_to }).await
    }

    pub async fn update(&self, id: T::Id, update: T::Update) -> StoreResult<T> {
        self.request(|respond_to| StoreRequest::Update { id, update, respond_to }).await
    }

    pub async fn delete(&self, id: T::Id) -> StoreResult<()> {
        self.request(|respond_to| StoreRequest::Delete { id, respond_to }).await
    }

    pub async fn delete_where(&self, filter: Filter<T>) -> StoreResult<usize> {
        self.request(|respond_to| StoreRequest::DeleteWhere { filter, respond_to }).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug)]
    struct Tag {
        id: u32,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("never")]
    struct Never;

    impl StoredEntity for Tag {
        type Id = u32;
        type Create = ();
        type Update = ();
        type Error = Never;

        fn id(&self) -> &u32 {
            &self.id
        }
        fn from_create_params(id: u32, _: ()) -> Result<Self, Never> {
            Ok(Self { id })
        }
        fn apply_update(&mut self, _: ()) -> Result<(), Never> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_silent_store_times_out() {
        // Keep the receiver alive but never answer.
        let (sender, _receiver) = mpsc::channel::<StoreRequest<Tag>>(4);
        let client = StoreClient::new(sender).with_timeout(Duration::from_millis(20));

        let result = client.exists(1).await;
        assert!(matches!(result, Err(StoreError::Timeout(d)) if d == Duration::from_millis(20)));
    }

    #[tokio::test]
    async fn test_closed_store_is_reported() {
        let (sender, receiver) = mpsc::channel::<StoreRequest<Tag>>(4);
        drop(receiver);
        let client = StoreClient::new(sender);

        let result = client.get(1).await;
        assert!(matches!(result, Err(StoreError::Closed)));
        assert!(result.unwrap_err().is_unavailable());
    }
}
