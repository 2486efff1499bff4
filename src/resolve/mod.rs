//! # Reference Resolution
//!
//! Resolvers turn identity references into records, or into typed not-found failures. They are
//! written against [`EntityStore<T>`](catalog_framework::EntityStore) only, so any backend
//! (the in-memory actors, a mock, a database adapter) can sit underneath.
//!
//! - [`AuthorResolver`] - one author by id
//! - [`GenreSetResolver`] - a set of genres in one round trip, reporting *every* miss at once
//! - [`BookExistenceValidator`] - a yes/no probe that never loads the book
//!
//! All three only read, hold no state of their own, and may be called concurrently.

pub mod author;
pub mod book;
pub mod genre;

pub use author::AuthorResolver;
pub use book::BookExistenceValidator;
pub use genre::GenreSetResolver;
