//! # Library Catalog
//!
//! The referential-integrity and cascade-consistency layer of a library catalog. A Book
//! references one Author and a set of Genres, and owns its Comments. This crate makes sure
//! that:
//!
//! - no Book is written whose author or genres do not exist, and a rejected Book reports
//!   *every* problem at once instead of the first one found;
//! - no Comment is written for a Book that does not exist;
//! - no Comment survives the deletion of its Book, even on a backend without foreign keys.
//!
//! ## Core Components
//!
//! - **[resolve]**: [`AuthorResolver`], [`GenreSetResolver`] (bulk, reports all misses) and
//!   [`BookExistenceValidator`] (probe only)
//! - **[validate]**: stateless field rules ([`BookFieldValidator`], [`CommentFieldValidator`])
//! - **[assembler]**: [`AggregateAssembler`] merges every check into one pass
//! - **[cascade]**: [`CascadeDeletionCoordinator`] deletes comments first, then the book
//! - **[services]**: [`BookService`] and [`CommentService`], the write boundary
//! - **[lifecycle]**: [`CatalogSystem`] starts one store actor per entity type
//!
//! The core is written against [`EntityStore<T>`](catalog_framework::EntityStore) only. The
//! in-memory actors of `catalog-framework` are the default backend; `MockStore` stands in for
//! them in tests.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use library_catalog::model::{AuthorCreate, GenreCreate};
//! use library_catalog::CatalogSystem;
//! use std::collections::BTreeSet;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let system = CatalogSystem::new();
//!     let author = system.authors.create(AuthorCreate { full_name: "Ursula K. Le Guin".into() }).await?;
//!     let genre = system.genres.create(GenreCreate { name: "Science Fiction".into() }).await?;
//!
//!     let book = system
//!         .book_service
//!         .create("The Dispossessed", author, &BTreeSet::from([genre]))
//!         .await?;
//!     system.comment_service.create(book.id, "Anarres, at last.").await?;
//!
//!     let outcome = system.book_service.delete(book.id).await?;
//!     assert_eq!(outcome.comments_deleted, 1);
//!
//!     system.shutdown().await?;
//!     Ok(())
//! }
//! ```

pub mod assembler;
pub mod cascade;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod model;
pub mod resolve;
pub mod services;
pub mod validate;

pub use assembler::{AggregateAssembler, ValidBookAggregate};
pub use cascade::{CascadeDeletionCoordinator, CascadeOutcome, CascadeStage};
pub use config::{CatalogConfig, ConfigError};
pub use error::{CatalogError, EntityKind, ValidationError, Violation};
pub use lifecycle::CatalogSystem;
pub use resolve::{AuthorResolver, BookExistenceValidator, GenreSetResolver};
pub use services::{BookService, CommentService};
pub use validate::{BookFieldValidator, CommentFieldValidator};
