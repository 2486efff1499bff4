//! # StoredEntity Trait
//!
//! The `StoredEntity` trait is the contract every record type (Author, Genre, Book, Comment, …)
//! implements to be kept by the generic [`StoreActor`](crate::StoreActor). It names the identifier
//! type and the create/update payloads, and tells the store how to build and mutate a record.
//!
//! # Architecture Note
//! The store actor, the client and the mock are written *once* against this trait.
//! Associated types keep every payload tied to its entity: a `Book` store only accepts
//! `BookCreate`, and the compiler rejects anything else.
//!
//! Referential checks (does this author exist? are these genres real?) are **not** done here.
//! A record only validates its own fields; cross-entity rules live in the layer that calls
//! the store.

use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any record type must implement to be kept by a [`StoreActor`](crate::StoreActor).
pub trait StoredEntity: Clone + Debug + Send + Sync + 'static {
    /// The unique identifier for this entity.
    ///
    /// Must be convertible from `u32` so the store can assign ids from its counter, and
    /// ordered so listings and bulk lookups are deterministic.
    type Id: Eq + Ord + Hash + Clone + Send + Sync + Display + Debug + From<u32> + 'static;

    /// The data required to create a new record.
    type Create: Send + Sync + Debug + 'static;

    /// The data required to change an existing record.
    type Update: Send + Sync + Debug + 'static;

    /// Error raised when a payload violates the record's own field rules.
    type Error: std::error::Error + Send + Sync + 'static;

    /// The identifier of this record.
    fn id(&self) -> &Self::Id;

    /// Construct the full record from the store-assigned id and the payload.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Apply an update payload in place.
    ///
    /// On error the store keeps the previous state of the record.
    fn apply_update(&mut self, update: Self::Update) -> Result<(), Self::Error>;
}
