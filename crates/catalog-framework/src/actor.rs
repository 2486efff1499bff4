//! # Generic Store Actor
//!
//! This module defines the `StoreActor`, the in-memory backend behind every entity store.
//! It implements the "Server" side of the Actor Model: one Tokio task owns the records of one
//! entity type and serves requests one at a time.

use crate::client::StoreClient;
use crate::entity::StoredEntity;
use crate::error::StoreError;
use crate::message::StoreRequest;
use std::collections::BTreeMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that owns all records of one entity type.
///
/// # Architecture Note
/// This struct is the "Server" half of the store. It owns the state (`records`) and the
/// receiver end of the channel.
///
/// **Concurrency Model**:
/// Requests are processed *sequentially* in a loop, so the map needs no `Mutex`. This is also
/// what makes bulk operations atomic from the outside: a `DeleteWhere` is never interleaved
/// with a `Create` for the same store.
///
/// # Usage Pattern
///
/// 1.  **Create**: Call `StoreActor::new()` to get the `actor` (server) and `client` (interface).
/// 2.  **Run**: Spawn the actor's run loop in a background task.
/// 3.  **Use**: Clone the client wherever the store is needed.
///
/// ```rust,ignore
/// let (actor, client) = StoreActor::<Author>::new(32);
/// tokio::spawn(actor.run());
/// let id = client.create(AuthorCreate { full_name: "Ursula K. Le Guin".into() }).await?;
/// ```
///
/// # Implementation Details
///
/// Records live in a `BTreeMap` keyed by id, so `List` and `GetMany` answer in id order.
/// Ids come from a `u32` counter starting at 1 and are never reused.
pub struct StoreActor<T: StoredEntity> {
    receiver: mpsc::Receiver<StoreRequest<T>>,
    records: BTreeMap<T::Id, T>,
    next_id: u32,
}

impl<T: StoredEntity> StoreActor<T> {
    /// Creates a new `StoreActor` and its associated `StoreClient`.
    ///
    /// # Arguments
    ///
    /// * `buffer_size` - The capacity of the MPSC channel. If the channel is full,
    ///   calls to the client will wait until there is space.
    pub fn new(buffer_size: usize) -> (Self, StoreClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            records: BTreeMap::new(),
            next_id: 1,
        };
        let client = StoreClient::new(sender);
        (actor, client)
    }

    /// Runs the actor's event loop, processing requests until every client is dropped.
    pub async fn run(mut self) {
        // Extract just the type name (e.g., "Book" instead of "library_catalog::model::book::Book")
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Store started");

        while let Some(msg) = self.receiver.recv().await {
            self.handle(entity_type, msg);
        }

        info!(entity_type, size = self.records.len(), "Shutdown");
    }

    fn handle(&mut self, entity_type: &'static str, msg: StoreRequest<T>) {
        match msg {
            StoreRequest::Create { params, respond_to } => {
                debug!(entity_type, ?params, "Create");
                let id = T::Id::from(self.next_id);
                match T::from_create_params(id.clone(), params) {
                    Ok(item) => {
                        self.next_id += 1;
                        self.records.insert(id.clone(), item);
                        info!(entity_type, %id, size = self.records.len(), "Created");
                        let _ = respond_to.send(Ok(id));
                    }
                    Err(e) => {
                        warn!(entity_type, error = %e, "Create failed");
                        let _ = respond_to.send(Err(StoreError::Entity(Box::new(e))));
                    }
                }
            }
            StoreRequest::Get { id, respond_to } => {
                let item = self.records.get(&id).cloned();
                debug!(entity_type, %id, found = item.is_some(), "Get");
                let _ = respond_to.send(Ok(item));
            }
            StoreRequest::GetMany { ids, respond_to } => {
                let items: Vec<T> = ids.iter().filter_map(|id| self.records.get(id).cloned()).collect();
                debug!(entity_type, requested = ids.len(), found = items.len(), "GetMany");
                let _ = respond_to.send(Ok(items));
            }
            StoreRequest::Exists { id, respond_to } => {
                let exists = self.records.contains_key(&id);
                debug!(entity_type, %id, exists, "Exists");
                let _ = respond_to.send(Ok(exists));
            }
            StoreRequest::List { respond_to } => {
                debug!(entity_type, size = self.records.len(), "List");
                let _ = respond_to.send(Ok(self.records.values().cloned().collect()));
            }
            StoreRequest::FindWhere { filter, respond_to } => {
                let items: Vec<T> = self.records.values().filter(|item| filter.matches(item)).cloned().collect();
                debug!(entity_type, %filter, found = items.len(), "FindWhere");
                let _ = respond_to.send(Ok(items));
            }
            StoreRequest::Update { id, update, respond_to } => {
                debug!(entity_type, %id, ?update, "Update");
                let Some(item) = self.records.get_mut(&id) else {
                    warn!(entity_type, %id, "Not found");
                    let _ = respond_to.send(Err(StoreError::NotFound(id.to_string())));
                    return;
                };
                // Mutate a copy so a rejected update leaves the stored record untouched.
                let mut candidate = item.clone();
                match candidate.apply_update(update) {
                    Ok(()) => {
                        *item = candidate.clone();
                        info!(entity_type, %id, "Updated");
                        let _ = respond_to.send(Ok(candidate));
                    }
                    Err(e) => {
                        warn!(entity_type, %id, error = %e, "Update failed");
                        let _ = respond_to.send(Err(StoreError::Entity(Box::new(e))));
                    }
                }
            }
            StoreRequest::Delete { id, respond_to } => {
                debug!(entity_type, %id, "Delete");
                if self.records.remove(&id).is_some() {
                    info!(entity_type, %id, size = self.records.len(), "Deleted");
                    let _ = respond_to.send(Ok(()));
                } else {
                    warn!(entity_type, %id, "Not found");
                    let _ = respond_to.send(Err(StoreError::NotFound(id.to_string())));
                }
            }
            StoreRequest::DeleteWhere { filter, respond_to } => {
                let before = self.records.len();
                self.records.retain(|_, item| !filter.matches(item));
                let removed = before - self.records.len();
                info!(entity_type, %filter, removed, size = self.records.len(), "DeletedWhere");
                let _ = respond_to.send(Ok(removed));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Note {
        id: u32,
        owner: u32,
        body: String,
    }

    #[derive(Debug)]
    struct NoteCreate {
        owner: u32,
        body: String,
    }

    #[derive(Debug)]
    struct NoteUpdate {
        body: String,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("empty body")]
    struct EmptyBody;

    impl StoredEntity for Note {
        type Id = u32;
        type Create = NoteCreate;
        type Update = NoteUpdate;
        type Error = EmptyBody;

        fn id(&self) -> &u32 {
            &self.id
        }

        fn from_create_params(id: u32, params: NoteCreate) -> Result<Self, EmptyBody> {
            if params.body.is_empty() {
                return Err(EmptyBody);
            }
            Ok(Self { id, owner: params.owner, body: params.body })
        }

        fn apply_update(&mut self, update: NoteUpdate) -> Result<(), EmptyBody> {
            if update.body.is_empty() {
                return Err(EmptyBody);
            }
            self.body = update.body;
            Ok(())
        }
    }

    fn spawn_store() -> StoreClient<Note> {
        let (actor, client) = StoreActor::new(10);
        tokio::spawn(actor.run());
        client
    }

    async fn note(client: &StoreClient<Note>, owner: u32, body: &str) -> u32 {
        client
            .create(NoteCreate { owner, body: body.into() })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_ids_are_sequential_and_not_consumed_by_rejected_creates() {
        let client = spawn_store();
        assert_eq!(note(&client, 1, "a").await, 1);
        let rejected = client.create(NoteCreate { owner: 1, body: String::new() }).await;
        assert!(matches!(rejected, Err(StoreError::Entity(_))));
        assert_eq!(note(&client, 1, "b").await, 2);
    }

    #[tokio::test]
    async fn test_get_many_returns_only_known_ids() {
        let client = spawn_store();
        let a = note(&client, 1, "a").await;
        let b = note(&client, 1, "b").await;

        let found = client.get_many([a, 99, b].into_iter().collect()).await.unwrap();
        let ids: Vec<u32> = found.iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![a, b]);
    }

    #[tokio::test]
    async fn test_exists_and_delete() {
        let client = spawn_store();
        let a = note(&client, 1, "a").await;
        assert!(client.exists(a).await.unwrap());

        client.delete(a).await.unwrap();
        assert!(!client.exists(a).await.unwrap());
        assert!(matches!(client.delete(a).await, Err(StoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_where_is_idempotent() {
        let client = spawn_store();
        note(&client, 1, "a").await;
        note(&client, 1, "b").await;
        let keep = note(&client, 2, "c").await;

        let owned_by_one = crate::Filter::new("owner == 1", |n: &Note| n.owner == 1);
        assert_eq!(client.delete_where(owned_by_one.clone()).await.unwrap(), 2);
        assert_eq!(client.delete_where(owned_by_one).await.unwrap(), 0);

        let remaining = client.list().await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, keep);
    }

    #[tokio::test]
    async fn test_rejected_update_keeps_previous_state() {
        let client = spawn_store();
        let a = note(&client, 1, "original").await;

        let result = client.update(a, NoteUpdate { body: String::new() }).await;
        assert!(matches!(result, Err(StoreError::Entity(_))));
        assert_eq!(client.get(a).await.unwrap().unwrap().body, "original");

        let updated = client.update(a, NoteUpdate { body: "edited".into() }).await.unwrap();
        assert_eq!(updated.body, "edited");
    }
}
