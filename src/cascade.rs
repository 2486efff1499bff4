//! # Cascade Deletion
//!
//! Deleting a book must take its comments with it, whether or not the backend knows anything
//! about foreign keys. [`CascadeDeletionCoordinator`] makes that an explicit state machine:
//!
//! ```text
//! Start -> ValidateExists -> DeleteDependents -> DeleteRoot -> SweepDependents -> Done
//!               |                  |                 |                |
//!           NotFound     CascadeFailure{false}  CascadeFailure{true}  CascadeFailure{true}
//! ```
//!
//! - **ValidateExists**: an unknown book ends the operation with `NotFound`. Nothing is written.
//! - **DeleteDependents**: `delete_where(book_id == id)` on the comment store. It must finish
//!   before the book is touched. Re-running it is harmless and returns `0`.
//! - **DeleteRoot**: removes the book. If the book vanished in the meantime (a concurrent delete
//!   won the race) the result is `NotFound`; the comments are gone either way.
//! - **SweepDependents**: the same `delete_where` once more, after the book is gone. A comment
//!   whose create passed its existence check before the book was deleted may land after the
//!   first pass; this pass removes it. Comments written later are rolled back by
//!   [`CommentService::create`](crate::CommentService::create) itself, which re-checks the
//!   book after writing.
//!
//! A book is never removed while it still owns comments. The reverse (comments gone, book
//! still there) is the one partial state that can be observed, and it is reported as
//! `CascadeFailure { dependents_deleted: true }` so the caller can simply retry. A failed
//! sweep also reports `true`; the book is already gone then, and
//! [`delete_dependents`](CascadeDeletionCoordinator::delete_dependents) finishes the job.
//!
//! `dependents_deleted: false` means the purge was not confirmed, not that it did not happen: a
//! `delete_where` that timed out on the client side may still be applied by the store later.
//! Retrying is safe in every case because `delete_where` is idempotent.
//!
//! ## Cancellation
//!
//! Once existence is confirmed, the delete phases run on a detached Tokio task. Dropping the
//! caller's future stops the caller from *waiting*, not the cascade: it still runs to a definite
//! outcome, which is logged. If the task itself dies, the reported flag reflects the last phase
//! it finished.

use crate::error::{store_error, CatalogError, EntityKind};
use crate::model::{Book, BookId, Comment};
use crate::resolve::BookExistenceValidator;
use catalog_framework::{EntityStore, Filter, StoreError};
use std::fmt::{self, Display};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn, Instrument};

/// Stages of a cascading delete, in the order they are entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CascadeStage {
    Start,
    ValidateExists,
    DeleteDependents,
    DeleteRoot,
    SweepDependents,
    Done,
}

impl Display for CascadeStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Start => "start",
            Self::ValidateExists => "validate_exists",
            Self::DeleteDependents => "delete_dependents",
            Self::DeleteRoot => "delete_root",
            Self::SweepDependents => "sweep_dependents",
            Self::Done => "done",
        };
        f.write_str(name)
    }
}

/// Result of a completed cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CascadeOutcome {
    pub book_id: BookId,
    pub comments_deleted: usize,
}

#[derive(Clone)]
pub struct CascadeDeletionCoordinator<B, C> {
    books: B,
    comments: C,
}

pub(crate) fn comments_of(book_id: BookId) -> Filter<Comment> {
    Filter::new(format!("book_id == {book_id}"), move |comment: &Comment| comment.book_id == book_id)
}

fn enter(stage: CascadeStage) -> CascadeStage {
    debug!(%stage, "Entering stage");
    stage
}

impl<B, C> CascadeDeletionCoordinator<B, C>
where
    B: EntityStore<Book> + Clone + 'static,
    C: EntityStore<Comment> + Clone + 'static,
{
    pub fn new(books: B, comments: C) -> Self {
        Self { books, comments }
    }

    /// Deletes a book and every comment that references it, comments first.
    #[instrument(skip(self))]
    pub async fn delete_book_cascading(&self, book_id: BookId) -> Result<CascadeOutcome, CatalogError> {
        enter(CascadeStage::Start);
        enter(CascadeStage::ValidateExists);
        BookExistenceValidator::new(self.books.clone()).ensure_exists(book_id).await?;

        let books = self.books.clone();
        let comments = self.comments.clone();
        let purged = Arc::new(AtomicBool::new(false));
        let progress = Arc::clone(&purged);
        let writes = tokio::spawn(
            async move {
                let outcome = run_delete_phases(&books, &comments, book_id, &progress).await;
                match &outcome {
                    Ok(done) => info!(comments_deleted = done.comments_deleted, "Cascade complete"),
                    Err(e) => error!(error = %e, "Cascade ended with an error"),
                }
                outcome
            }
            .in_current_span(),
        );

        match writes.await {
            Ok(outcome) => outcome,
            Err(join_error) => {
                let dependents_deleted = purged.load(Ordering::SeqCst);
                error!(dependents_deleted, error = %join_error, "Cascade task did not finish");
                Err(CatalogError::CascadeFailure {
                    dependents_deleted,
                    cause: Box::new(join_error),
                })
            }
        }
    }

    /// Deletes every comment of `book_id` and returns how many went away.
    ///
    /// Idempotent: on retry it finds nothing left and returns `0`.
    #[instrument(skip(self))]
    pub async fn delete_dependents(&self, book_id: BookId) -> Result<usize, CatalogError> {
        self.comments
            .delete_where(comments_of(book_id))
            .await
            .map_err(store_error(EntityKind::Comment))
    }
}

async fn run_delete_phases<B, C>(
    books: &B,
    comments: &C,
    book_id: BookId,
    purged: &AtomicBool,
) -> Result<CascadeOutcome, CatalogError>
where
    B: EntityStore<Book>,
    C: EntityStore<Comment>,
{
    let stage = enter(CascadeStage::DeleteDependents);
    let mut comments_deleted = match comments.delete_where(comments_of(book_id)).await {
        Ok(count) => count,
        Err(cause) => {
            warn!(%stage, error = %cause, "Comments could not be deleted; book left in place");
            return Err(CatalogError::CascadeFailure {
                dependents_deleted: false,
                cause: Box::new(cause),
            });
        }
    };
    purged.store(true, Ordering::SeqCst);

    let stage = enter(CascadeStage::DeleteRoot);
    match books.delete(book_id).await {
        Ok(()) => {}
        Err(StoreError::NotFound(_)) => {
            warn!(%stage, comments_deleted, "Book disappeared before it could be deleted");
            return Err(CatalogError::not_found(EntityKind::Book, book_id));
        }
        Err(cause) => {
            warn!(%stage, comments_deleted, error = %cause, "Book could not be deleted after its comments");
            return Err(CatalogError::CascadeFailure {
                dependents_deleted: true,
                cause: Box::new(cause),
            });
        }
    }

    // Catches comments written after the first pass but before the book was gone.
    let stage = enter(CascadeStage::SweepDependents);
    match comments.delete_where(comments_of(book_id)).await {
        Ok(late) => comments_deleted += late,
        Err(cause) => {
            error!(%stage, error = %cause, "Book deleted but the final comment sweep failed");
            return Err(CatalogError::CascadeFailure {
                dependents_deleted: true,
                cause: Box::new(cause),
            });
        }
    }

    enter(CascadeStage::Done);
    Ok(CascadeOutcome {
        book_id,
        comments_deleted,
    })
}
