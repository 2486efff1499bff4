//! # System Lifecycle
//!
//! Starting, wiring and stopping the catalog's store actors.
//!
//! ## The CatalogSystem Pattern
//!
//! [`CatalogSystem`] is the conductor:
//!
//! 1. **Actor Creation** - one [`StoreActor`](catalog_framework::StoreActor) per entity type
//!    (Author, Genre, Book, Comment), each with the configured channel buffer
//! 2. **Bounded Clients** - every client gets the configured store timeout, so no call into the
//!    integrity layer can wait forever
//! 3. **Service Wiring** - [`BookService`](crate::BookService) and
//!    [`CommentService`](crate::CommentService) receive clones of the clients they need
//! 4. **Graceful Shutdown** - dropping every client closes the channels; each actor drains its
//!    queue, logs its final size and exits
//!
//! ```rust,ignore
//! let system = CatalogSystem::with_config(&CatalogConfig::load()?);
//! let author = system.authors.create(AuthorCreate { full_name: "N. K. Jemisin".into() }).await?;
//! // ...
//! system.shutdown().await?;
//! ```
//!
//! Shutdown waits for the actors, so clones of the clients held elsewhere must be dropped first.

pub mod catalog_system;

pub use catalog_system::*;
