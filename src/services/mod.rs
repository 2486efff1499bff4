//! # Catalog Services
//!
//! The write boundary of the catalog. Every write goes through the integrity layer before it
//! reaches a store:
//!
//! | Operation | Guarded by |
//! |-----------|------------|
//! | Create / update book | [`AggregateAssembler`](crate::AggregateAssembler) |
//! | Delete book | [`CascadeDeletionCoordinator`](crate::CascadeDeletionCoordinator) |
//! | Create / update comment | [`CommentFieldValidator`](crate::CommentFieldValidator), [`BookExistenceValidator`](crate::BookExistenceValidator) |
//!
//! Reads go straight to the stores.

pub mod book_service;
pub mod comment_service;

pub use book_service::BookService;
pub use comment_service::CommentService;
