use crate::error::ValidationError;
use crate::model::catalog_id;
use catalog_framework::StoredEntity;
use serde::{Deserialize, Serialize};

catalog_id!(
    /// Type-safe identifier for Genres.
    GenreId,
    "genre"
);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: GenreId,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct GenreCreate {
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct GenreUpdate {
    pub name: String,
}

impl StoredEntity for Genre {
    type Id = GenreId;
    type Create = GenreCreate;
    type Update = GenreUpdate;
    type Error = ValidationError;

    fn id(&self) -> &GenreId {
        &self.id
    }

    fn from_create_params(id: GenreId, params: GenreCreate) -> Result<Self, ValidationError> {
        if params.name.trim().is_empty() {
            return Err(ValidationError::new("name", "must not be blank"));
        }
        Ok(Self { id, name: params.name })
    }

    fn apply_update(&mut self, update: GenreUpdate) -> Result<(), ValidationError> {
        if update.name.trim().is_empty() {
            return Err(ValidationError::new("name", "must not be blank"));
        }
        self.name = update.name;
        Ok(())
    }
}
