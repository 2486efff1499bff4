//! # Catalog Errors
//!
//! The failure taxonomy of the integrity layer. Every operation reports exactly one
//! [`CatalogError`]; only the [`AggregateAssembler`](crate::AggregateAssembler) merges several
//! failures, and it does so into [`CatalogError::Aggregate`].
//!
//! Store failures are translated with [`CatalogError::from_store`]: a store-level `NotFound`
//! keeps its domain meaning, a rejected payload becomes a [`ValidationError`], and everything
//! else (closed channel, dropped reply, timeout) becomes [`CatalogError::StoreUnavailable`].
//! A timeout is never reported as `NotFound`.

use catalog_framework::StoreError;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt::{self, Display};

/// The entity types the catalog knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum EntityKind {
    Author,
    Genre,
    Book,
    Comment,
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Author => "Author",
            Self::Genre => "Genre",
            Self::Book => "Book",
            Self::Comment => "Comment",
        };
        f.write_str(name)
    }
}

/// A content rule failure on a single field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid {field}: {reason}")]
pub struct ValidationError {
    pub field: &'static str,
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

/// One entry of an aggregated failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Violation {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("{entity} not found: {id}")]
    NotFound { entity: EntityKind, id: String },
    #[error("{entity} not found: {}", join(missing_ids))]
    NotFoundSet {
        entity: EntityKind,
        missing_ids: BTreeSet<String>,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: EntityKind, id: String },

    /// Bulk reference failure; always carries the complete set of unresolved ids.
    #[error("{entity} not found: {}", join(missing_ids))]
    NotFoundSet {
        entity: EntityKind,
        missing_ids: BTreeSet<String>,
    },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Aggregate rejected with {} violation(s): {}", violations.len(), join(violations))]
    Aggregate { violations: Vec<Violation> },

    #[error("Store unavailable: {cause}")]
    StoreUnavailable {
        #[source]
        cause: StoreError,
    },

    /// The cascade stopped part way. `dependents_deleted` tells whether the comment purge was
    /// confirmed, i.e. whether a retry only has the book left to remove.
    ///
    /// `false` is a lower bound: a purge that timed out on the client side may still be applied
    /// by the store afterwards. Retrying the cascade or `delete_dependents` is safe either way.
    #[error("Cascade deletion failed (dependents deleted: {dependents_deleted}): {cause}")]
    CascadeFailure {
        dependents_deleted: bool,
        #[source]
        cause: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl CatalogError {
    pub fn not_found(entity: EntityKind, id: impl Display) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Translates a store failure for the given entity type.
    pub fn from_store(entity: EntityKind, error: StoreError) -> Self {
        match error {
            StoreError::NotFound(id) => Self::NotFound { entity, id },
            StoreError::Entity(inner) => match inner.downcast::<ValidationError>() {
                Ok(validation) => Self::Validation(*validation),
                Err(other) => Self::StoreUnavailable {
                    cause: StoreError::Entity(other),
                },
            },
            cause => Self::StoreUnavailable { cause },
        }
    }

    /// `true` when the failure came from the infrastructure rather than from the data.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::StoreUnavailable { .. })
    }
}

/// Shorthand for `map_err` on store calls.
pub(crate) fn store_error(entity: EntityKind) -> impl Fn(StoreError) -> CatalogError {
    move |error| CatalogError::from_store(entity, error)
}

/// Reference and content failures become violations; infrastructure failures are handed back.
impl TryFrom<CatalogError> for Violation {
    type Error = CatalogError;

    fn try_from(error: CatalogError) -> Result<Self, Self::Error> {
        match error {
            CatalogError::NotFound { entity, id } => Ok(Self::NotFound { entity, id }),
            CatalogError::NotFoundSet { entity, missing_ids } => Ok(Self::NotFoundSet { entity, missing_ids }),
            CatalogError::Validation(validation) => Ok(Self::Invalid(validation)),
            other => Err(other),
        }
    }
}

fn join<I>(items: I) -> String
where
    I: IntoIterator,
    I::Item: Display,
{
    items.into_iter().map(|item| item.to_string()).collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_store_not_found_keeps_entity() {
        let err = CatalogError::from_store(EntityKind::Book, StoreError::NotFound("book_9".into()));
        assert!(matches!(err, CatalogError::NotFound { entity: EntityKind::Book, ref id } if id == "book_9"));
    }

    #[test]
    fn test_timeout_is_unavailable_not_not_found() {
        let err = CatalogError::from_store(EntityKind::Genre, StoreError::Timeout(Duration::from_millis(5)));
        assert!(err.is_unavailable());
    }

    #[test]
    fn test_rejected_payload_becomes_validation_error() {
        let rejected = StoreError::Entity(Box::new(ValidationError::new("title", "must not be blank")));
        let err = CatalogError::from_store(EntityKind::Book, rejected);
        assert!(matches!(err, CatalogError::Validation(ValidationError { field: "title", .. })));
    }

    #[test]
    fn test_violation_conversion_hands_back_infrastructure_errors() {
        let missing = CatalogError::not_found(EntityKind::Author, "author_4");
        assert!(matches!(Violation::try_from(missing), Ok(Violation::NotFound { .. })));

        let down = CatalogError::StoreUnavailable { cause: StoreError::Closed };
        assert!(matches!(Violation::try_from(down), Err(CatalogError::StoreUnavailable { .. })));
    }

    #[test]
    fn test_messages_list_every_missing_id() {
        let err = CatalogError::NotFoundSet {
            entity: EntityKind::Genre,
            missing_ids: BTreeSet::from(["genre_2".to_string(), "genre_5".to_string()]),
        };
        assert_eq!(err.to_string(), "Genre not found: genre_2, genre_5");
    }
}
