//! # Catalog Framework
//!
//! Generic building blocks for keeping records of several entity types in isolated,
//! concurrently running stores. Each entity type gets its own Tokio task that owns the records
//! outright; everything else talks to it through a cheap, cloneable client.
//!
//! ## Architecture Overview
//!
//! The framework separates concerns into three layers:
//!
//! 1. **Entity Layer** ([`StoredEntity`]) - your record type, its id and its payloads
//! 2. **Runtime Layer** ([`StoreActor`]) - message processing and sequential state changes
//! 3. **Interface Layer** ([`StoreClient`], [`EntityStore`]) - type-safe, async access
//!
//! Domain code should depend on [`EntityStore<T>`] rather than on the client. The actor-backed
//! client is the default implementation, and [`mock::MockStore`] is a scripted one for tests.
//!
//! ## Example
//!
//! ```rust
//! use catalog_framework::{EntityStore, Filter, StoreActor, StoredEntity};
//!
//! #[derive(Clone, Debug)]
//! struct Shelf { id: u32, room: String }
//!
//! #[derive(Debug, thiserror::Error)]
//! #[error("room must not be empty")]
//! struct EmptyRoom;
//!
//! impl StoredEntity for Shelf {
//!     type Id = u32;
//!     type Create = String;
//!     type Update = String;
//!     type Error = EmptyRoom;
//!
//!     fn id(&self) -> &u32 { &self.id }
//!     fn from_create_params(id: u32, room: String) -> Result<Self, EmptyRoom> {
//!         if room.is_empty() { return Err(EmptyRoom); }
//!         Ok(Self { id, room })
//!     }
//!     fn apply_update(&mut self, room: String) -> Result<(), EmptyRoom> {
//!         self.room = room;
//!         Ok(())
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = StoreActor::<Shelf>::new(10);
//!     tokio::spawn(actor.run());
//!
//!     let id = client.create("attic".into()).await.unwrap();
//!     assert!(client.exists_by_id(id).await.unwrap());
//!
//!     let removed = client
//!         .delete_where(Filter::new("room == attic", |s: &Shelf| s.room == "attic"))
//!         .await
//!         .unwrap();
//!     assert_eq!(removed, 1);
//! }
//! ```
//!
//! ## Concurrency Model
//!
//! - Each store runs in its own Tokio task
//! - Requests are processed **sequentially** within a store (no locks needed)
//! - Different stores run in **parallel**
//! - A client built with [`StoreClient::with_timeout`] never waits longer than its limit
//!
//! ## Testing
//!
//! [`mock::MockStore`] answers requests from a queue of expectations and records every call it
//! receives, which makes it possible to assert not only *what* a component returned but also
//! *which* store operations it used to get there.

pub mod actor;
pub mod client;
pub mod entity;
pub mod error;
pub mod filter;
pub mod message;
pub mod mock;
pub mod store;
pub mod tracing;

// Re-export core types for convenience
pub use actor::StoreActor;
pub use client::StoreClient;
pub use entity::StoredEntity;
pub use error::{StoreError, StoreResult};
pub use filter::Filter;
pub use message::{Response, StoreRequest};
pub use store::EntityStore;
