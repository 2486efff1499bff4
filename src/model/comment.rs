use crate::error::ValidationError;
use crate::model::{catalog_id, BookId};
use crate::validate::CommentFieldValidator;
use catalog_framework::StoredEntity;
use serde::{Deserialize, Serialize};

catalog_id!(
    /// Type-safe identifier for Comments.
    CommentId,
    "comment"
);

/// A reader's comment. Owned by its book: it never outlives it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub book_id: BookId,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct CommentCreate {
    pub book_id: BookId,
    pub text: String,
}

/// Comments can be reworded but never moved to another book.
#[derive(Debug, Clone)]
pub struct CommentUpdate {
    pub text: String,
}

impl StoredEntity for Comment {
    type Id = CommentId;
    type Create = CommentCreate;
    type Update = CommentUpdate;
    type Error = ValidationError;

    fn id(&self) -> &CommentId {
        &self.id
    }

    fn from_create_params(id: CommentId, params: CommentCreate) -> Result<Self, ValidationError> {
        CommentFieldValidator::validate_comment_text(Some(&params.text))?;
        Ok(Self {
            id,
            book_id: params.book_id,
            text: params.text,
        })
    }

    fn apply_update(&mut self, update: CommentUpdate) -> Result<(), ValidationError> {
        CommentFieldValidator::validate_comment_text(Some(&update.text))?;
        self.text = update.text;
        Ok(())
    }
}
