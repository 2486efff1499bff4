//! # Book
//!
//! A catalogued book.
//!
//! A book references exactly one [`Author`](crate::model::Author) and a non-empty set of
//! [`Genre`](crate::model::Genre)s, and owns its [`Comment`](crate::model::Comment)s.
//!
//! The store only re-checks the book's own fields (title, genre cardinality). Whether the
//! referenced author and genres exist is decided beforehand by the
//! [`AggregateAssembler`](crate::AggregateAssembler); its
//! [`ValidBookAggregate`](crate::ValidBookAggregate) is the only way the services build a
//! [`BookCreate`] or [`BookUpdate`].

use crate::error::ValidationError;
use crate::model::{catalog_id, AuthorId, GenreId};
use crate::validate::BookFieldValidator;
use catalog_framework::StoredEntity;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

catalog_id!(
    /// Type-safe identifier for Books.
    BookId,
    "book"
);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author_id: AuthorId,
    pub genre_ids: BTreeSet<GenreId>,
}

/// Payload for creating a new book.
#[derive(Debug, Clone)]
pub struct BookCreate {
    pub title: String,
    pub author_id: AuthorId,
    pub genre_ids: BTreeSet<GenreId>,
}

/// Full replacement of a book's fields.
#[derive(Debug, Clone)]
pub struct BookUpdate {
    pub title: String,
    pub author_id: AuthorId,
    pub genre_ids: BTreeSet<GenreId>,
}

fn check_fields(title: &str, genre_ids: &BTreeSet<GenreId>) -> Result<(), ValidationError> {
    BookFieldValidator::validate_title(Some(title))?;
    if genre_ids.is_empty() {
        return Err(ValidationError::new("genres", "at least one genre is required"));
    }
    Ok(())
}

impl StoredEntity for Book {
    type Id = BookId;
    type Create = BookCreate;
    type Update = BookUpdate;
    type Error = ValidationError;

    fn id(&self) -> &BookId {
        &self.id
    }

    fn from_create_params(id: BookId, params: BookCreate) -> Result<Self, ValidationError> {
        check_fields(&params.title, &params.genre_ids)?;
        Ok(Self {
            id,
            title: params.title,
            author_id: params.author_id,
            genre_ids: params.genre_ids,
        })
    }

    fn apply_update(&mut self, update: BookUpdate) -> Result<(), ValidationError> {
        check_fields(&update.title, &update.genre_ids)?;
        self.title = update.title;
        self.author_id = update.author_id;
        self.genre_ids = update.genre_ids;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_book_without_genres_is_rejected() {
        let params = BookCreate {
            title: "Dune".into(),
            author_id: AuthorId(1),
            genre_ids: BTreeSet::new(),
        };
        let err = Book::from_create_params(BookId(1), params).unwrap_err();
        assert_eq!(err.field, "genres");
    }

    #[test]
    fn test_rejected_update_leaves_book_untouched() {
        let mut book = Book::from_create_params(
            BookId(1),
            BookCreate {
                title: "Dune".into(),
                author_id: AuthorId(1),
                genre_ids: BTreeSet::from([GenreId(1)]),
            },
        )
        .unwrap();

        let update = BookUpdate {
            title: "  ".into(),
            author_id: AuthorId(2),
            genre_ids: BTreeSet::from([GenreId(2)]),
        };
        assert!(book.apply_update(update).is_err());
        assert_eq!(book.title, "Dune");
        assert_eq!(book.author_id, AuthorId(1));
    }
}
