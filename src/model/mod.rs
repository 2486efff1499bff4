//! # Catalog Model
//!
//! Plain records kept by the entity stores. Each type implements
//! [`StoredEntity`](catalog_framework::StoredEntity) and checks only its own fields;
//! references to other records are checked by the [`resolve`](crate::resolve) layer before a
//! write ever reaches a store.

/// Declares a typed `u32` identifier rendered as `<prefix>_<n>`.
macro_rules! catalog_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
        pub struct $name(pub u32);

        impl From<u32> for $name {
            fn from(id: u32) -> Self {
                Self(id)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($prefix, "_{}"), self.0)
            }
        }
    };
}

pub(crate) use catalog_id;

pub mod author;
pub mod book;
pub mod comment;
pub mod genre;

pub use author::*;
pub use book::*;
pub use comment::*;
pub use genre::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_render_with_their_prefix() {
        assert_eq!(AuthorId(1).to_string(), "author_1");
        assert_eq!(GenreId(2).to_string(), "genre_2");
        assert_eq!(BookId(3).to_string(), "book_3");
        assert_eq!(CommentId::from(4).to_string(), "comment_4");
    }
}
