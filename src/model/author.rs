use crate::error::ValidationError;
use crate::model::catalog_id;
use catalog_framework::StoredEntity;
use serde::{Deserialize, Serialize};

catalog_id!(
    /// Type-safe identifier for Authors.
    AuthorId,
    "author"
);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: AuthorId,
    pub full_name: String,
}

/// Payload for creating a new author.
#[derive(Debug, Clone)]
pub struct AuthorCreate {
    pub full_name: String,
}

/// Payload for renaming an author.
#[derive(Debug, Clone)]
pub struct AuthorUpdate {
    pub full_name: String,
}

fn check_name(full_name: &str) -> Result<(), ValidationError> {
    if full_name.trim().is_empty() {
        return Err(ValidationError::new("full_name", "must not be blank"));
    }
    Ok(())
}

impl StoredEntity for Author {
    type Id = AuthorId;
    type Create = AuthorCreate;
    type Update = AuthorUpdate;
    type Error = ValidationError;

    fn id(&self) -> &AuthorId {
        &self.id
    }

    fn from_create_params(id: AuthorId, params: AuthorCreate) -> Result<Self, ValidationError> {
        check_name(&params.full_name)?;
        Ok(Self {
            id,
            full_name: params.full_name,
        })
    }

    fn apply_update(&mut self, update: AuthorUpdate) -> Result<(), ValidationError> {
        check_name(&update.full_name)?;
        self.full_name = update.full_name;
        Ok(())
    }
}
