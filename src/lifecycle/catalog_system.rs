use crate::config::CatalogConfig;
use crate::model::{Author, Book, Comment, Genre};
use crate::services::{BookService, CommentService};
use catalog_framework::{StoreActor, StoreClient, StoredEntity};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::info;

/// The running catalog: four stores and the services built on them.
pub struct CatalogSystem {
    pub authors: StoreClient<Author>,
    pub genres: StoreClient<Genre>,
    pub books: StoreClient<Book>,
    pub comments: StoreClient<Comment>,
    pub book_service: BookService,
    pub comment_service: CommentService,
    handles: Vec<JoinHandle<()>>,
}

fn spawn_store<T: StoredEntity>(
    buffer: usize,
    timeout: Duration,
    handles: &mut Vec<JoinHandle<()>>,
) -> StoreClient<T> {
    let (actor, client) = StoreActor::<T>::new(buffer);
    handles.push(tokio::spawn(actor.run()));
    client.with_timeout(timeout)
}

impl CatalogSystem {
    /// Starts the catalog with default settings. Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        Self::with_config(&CatalogConfig::default())
    }

    pub fn with_config(config: &CatalogConfig) -> Self {
        let timeout = config.store_timeout();
        let buffer = config.channel_buffer;
        let mut handles = Vec::with_capacity(4);

        let authors = spawn_store::<Author>(buffer, timeout, &mut handles);
        let genres = spawn_store::<Genre>(buffer, timeout, &mut handles);
        let books = spawn_store::<Book>(buffer, timeout, &mut handles);
        let comments = spawn_store::<Comment>(buffer, timeout, &mut handles);

        let book_service = BookService::new(authors.clone(), genres.clone(), books.clone(), comments.clone());
        let comment_service = CommentService::new(comments.clone(), books.clone());

        info!(timeout_ms = config.store_timeout_ms, buffer, "Catalog started");

        Self {
            authors,
            genres,
            books,
            comments,
            book_service,
            comment_service,
            handles,
        }
    }

    /// Drops every client and waits for the store actors to finish.
    pub async fn shutdown(self) -> Result<(), tokio::task::JoinError> {
        let Self {
            authors,
            genres,
            books,
            comments,
            book_service,
            comment_service,
            handles,
        } = self;
        drop((authors, genres, books, comments, book_service, comment_service));

        for handle in handles {
            handle.await?;
        }
        info!("Catalog stopped");
        Ok(())
    }
}

impl Default for CatalogSystem {
    fn default() -> Self {
        Self::new()
    }
}
