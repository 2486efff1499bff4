//! # Aggregate Assembler
//!
//! One all-or-nothing validation pass for creating or updating a Book.
//!
//! ## The Four Checks
//!
//! | Check | Kind | Failure |
//! |-------|------|---------|
//! | Title is not blank | synchronous | `Violation::Invalid { field: "title" }` |
//! | Author exists | store read | `Violation::NotFound { Author }` |
//! | Every genre exists | one bulk store read | `Violation::NotFoundSet { Genre }` |
//! | At least one genre | synchronous, on the *resolved* list | `Violation::Invalid { field: "genres" }` |
//!
//! The two store reads run concurrently. Nothing returns early: a blank title together with two
//! unknown genres produces a single [`CatalogError::Aggregate`] listing both problems, in the
//! order title, author, genres.
//!
//! An infrastructure failure is different. If either read fails with
//! [`CatalogError::StoreUnavailable`], that failure is returned as is, because a partial
//! violation list would claim references are missing when they were never checked.

use crate::error::{CatalogError, Violation};
use crate::model::{Author, AuthorId, BookCreate, BookUpdate, Genre, GenreId};
use crate::resolve::{AuthorResolver, GenreSetResolver};
use crate::validate::BookFieldValidator;
use catalog_framework::EntityStore;
use std::collections::BTreeSet;
use tracing::{debug, instrument, warn};

/// A book whose title, author and genres all passed validation, ready to persist.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidBookAggregate {
    pub title: String,
    pub author: Author,
    pub genres: Vec<Genre>,
}

impl ValidBookAggregate {
    pub fn genre_ids(&self) -> BTreeSet<GenreId> {
        self.genres.iter().map(|genre| genre.id).collect()
    }

    pub fn into_create(self) -> BookCreate {
        BookCreate {
            genre_ids: self.genre_ids(),
            author_id: self.author.id,
            title: self.title,
        }
    }

    pub fn into_update(self) -> BookUpdate {
        BookUpdate {
            genre_ids: self.genre_ids(),
            author_id: self.author.id,
            title: self.title,
        }
    }
}

#[derive(Clone)]
pub struct AggregateAssembler<A, G> {
    authors: AuthorResolver<A>,
    genres: GenreSetResolver<G>,
}

impl<A, G> AggregateAssembler<A, G>
where
    A: EntityStore<Author>,
    G: EntityStore<Genre>,
{
    pub fn new(author_store: A, genre_store: G) -> Self {
        Self {
            authors: AuthorResolver::new(author_store),
            genres: GenreSetResolver::new(genre_store),
        }
    }

    #[instrument(skip(self, genre_ids), fields(genres = genre_ids.len()))]
    pub async fn assemble(
        &self,
        title: &str,
        author_id: AuthorId,
        genre_ids: &BTreeSet<GenreId>,
    ) -> Result<ValidBookAggregate, CatalogError> {
        let (author, genres) = tokio::join!(self.authors.resolve(author_id), self.genres.resolve_all(genre_ids));

        let mut violations = Vec::new();

        if let Err(e) = BookFieldValidator::validate_title(Some(title)) {
            violations.push(Violation::Invalid(e));
        }

        let author = match author {
            Ok(author) => Some(author),
            Err(e) => {
                violations.push(Violation::try_from(e)?);
                None
            }
        };

        let genres = match genres {
            Ok(genres) => match BookFieldValidator::validate_genres(Some(&genres)) {
                Ok(()) => Some(genres),
                Err(e) => {
                    violations.push(Violation::Invalid(e));
                    None
                }
            },
            Err(e) => {
                violations.push(Violation::try_from(e)?);
                None
            }
        };

        match (author, genres) {
            (Some(author), Some(genres)) if violations.is_empty() => {
                debug!(author = %author.id, genres = genres.len(), "Aggregate assembled");
                Ok(ValidBookAggregate {
                    title: title.to_string(),
                    author,
                    genres,
                })
            }
            _ => {
                warn!(violations = violations.len(), "Aggregate rejected");
                Err(CatalogError::Aggregate { violations })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EntityKind;
    use catalog_framework::mock::MockStore;
    use catalog_framework::StoreError;

    fn author() -> Author {
        Author {
            id: AuthorId(1),
            full_name: "Octavia E. Butler".into(),
        }
    }

    fn genre(id: u32) -> Genre {
        Genre {
            id: GenreId(id),
            name: format!("Genre {id}"),
        }
    }

    #[tokio::test]
    async fn test_valid_input_assembles() {
        let mut authors = MockStore::<Author>::new();
        let mut genres = MockStore::<Genre>::new();
        authors.expect_get(AuthorId(1)).return_ok(Some(author()));
        genres.expect_get_all().return_ok(vec![genre(2), genre(1)]);

        let assembler = AggregateAssembler::new(authors.store(), genres.store());
        let aggregate = assembler
            .assemble("Kindred", AuthorId(1), &BTreeSet::from([GenreId(1), GenreId(2)]))
            .await
            .unwrap();

        assert_eq!(aggregate.author, author());
        assert_eq!(aggregate.genre_ids(), BTreeSet::from([GenreId(1), GenreId(2)]));
        authors.verify();
        genres.verify();
    }

    #[tokio::test]
    async fn test_every_check_reports_in_order() {
        let mut authors = MockStore::<Author>::new();
        let mut genres = MockStore::<Genre>::new();
        authors.expect_get(AuthorId(7)).return_ok(None);
        genres.expect_get_all().return_ok(vec![]);

        let assembler = AggregateAssembler::new(authors.store(), genres.store());
        let err = assembler
            .assemble(" ", AuthorId(7), &BTreeSet::from([GenreId(3)]))
            .await
            .unwrap_err();

        let violations = match err {
            CatalogError::Aggregate { violations } => violations,
            other => panic!("Expected Aggregate, got {:?}", other),
        };
        assert_eq!(violations.len(), 3);
        assert!(matches!(violations[0], Violation::Invalid(ref v) if v.field == "title"));
        assert!(matches!(violations[1], Violation::NotFound { entity: EntityKind::Author, .. }));
        assert!(matches!(violations[2], Violation::NotFoundSet { entity: EntityKind::Genre, .. }));
    }

    #[tokio::test]
    async fn test_empty_genre_set_is_a_genres_violation() {
        let mut authors = MockStore::<Author>::new();
        let genres = MockStore::<Genre>::new();
        authors.expect_get(AuthorId(1)).return_ok(Some(author()));

        let assembler = AggregateAssembler::new(authors.store(), genres.store());
        let err = assembler.assemble("Kindred", AuthorId(1), &BTreeSet::new()).await.unwrap_err();

        let violations = match err {
            CatalogError::Aggregate { violations } => violations,
            other => panic!("Expected Aggregate, got {:?}", other),
        };
        assert_eq!(violations, vec![Violation::Invalid(crate::ValidationError::new(
            "genres",
            "at least one genre is required"
        ))]);
        assert!(genres.calls().is_empty());
    }

    #[tokio::test]
    async fn test_unavailable_store_wins_over_violations() {
        let mut authors = MockStore::<Author>::new();
        let mut genres = MockStore::<Genre>::new();
        authors.expect_get(AuthorId(1)).return_err(StoreError::Closed);
        genres.expect_get_all().return_ok(vec![]);

        let assembler = AggregateAssembler::new(authors.store(), genres.store());
        let err = assembler
            .assemble("", AuthorId(1), &BTreeSet::from([GenreId(1)]))
            .await
            .unwrap_err();
        assert!(err.is_unavailable());
    }
}
