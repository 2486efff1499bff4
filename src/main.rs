use catalog_framework::tracing::setup_tracing;
use library_catalog::model::{AuthorCreate, GenreCreate, GenreId};
use library_catalog::{CatalogConfig, CatalogError, CatalogSystem};
use std::collections::BTreeSet;
use tracing::{error, info, warn, Instrument};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_tracing();

    let config = match CatalogConfig::load() {
        Ok(config) => config,
        Err(e) => {
            warn!(error = %e, "Falling back to default configuration");
            CatalogConfig::default()
        }
    };
    let system = CatalogSystem::with_config(&config);

    // Seed the reference data
    let author = system
        .authors
        .create(AuthorCreate {
            full_name: "Ursula K. Le Guin".to_string(),
        })
        .await?;
    let mut genres = BTreeSet::new();
    for name in ["Science Fiction", "Fantasy"] {
        genres.insert(system.genres.create(GenreCreate { name: name.to_string() }).await?);
    }
    info!(%author, genres = genres.len(), "Reference data seeded");

    // A valid book
    let book = system
        .book_service
        .create("The Left Hand of Darkness", author, &genres)
        .instrument(tracing::info_span!("book_creation"))
        .await?;
    info!(book_id = %book.id, title = %book.title, "Book created successfully");

    // An invalid book: blank title and two unknown genres, reported together
    let unknown = BTreeSet::from([GenreId(41), GenreId(42)]);
    match system.book_service.create("   ", author, &unknown).await {
        Err(CatalogError::Aggregate { violations }) => {
            for violation in &violations {
                warn!(%violation, "Rejected");
            }
        }
        Ok(book) => error!(book_id = %book.id, "Invalid book was accepted"),
        Err(e) => return Err(e.into()),
    }

    // Comments
    for text in ["A winter journey across Gethen.", "Estraven!"] {
        let comment = system.comment_service.create(book.id, text).await?;
        info!(comment_id = %comment.id, "Comment added");
    }
    if let Err(e) = system.comment_service.create(book.id, "meh").await {
        warn!(error = %e, "Comment rejected");
    }

    // Cascade delete
    let outcome = system
        .book_service
        .delete(book.id)
        .instrument(tracing::info_span!("book_deletion"))
        .await?;
    info!(
        book_id = %outcome.book_id,
        comments_deleted = outcome.comments_deleted,
        "Book deleted with its comments"
    );
    let remaining = system.comments.list().await?;
    info!(remaining = remaining.len(), "Comments left in the store");

    system.shutdown().await?;
    info!("Application completed successfully");
    Ok(())
}
