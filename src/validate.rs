//! # Field Validators
//!
//! Stateless content rules. No I/O, no allocation on the success path, same answer for the same
//! input every time. Inputs are `Option`s because boundary layers may hand over missing fields;
//! a missing field fails the same way an empty one does.

use crate::error::ValidationError;
use crate::model::Genre;

/// Shortest accepted comment, in characters.
pub const COMMENT_TEXT_MIN_CHARS: usize = 5;
/// Longest accepted comment, in characters.
pub const COMMENT_TEXT_MAX_CHARS: usize = 500;

pub struct BookFieldValidator;

impl BookFieldValidator {
    /// Fails when the title is missing, empty or whitespace only.
    pub fn validate_title(title: Option<&str>) -> Result<(), ValidationError> {
        match title {
            Some(title) if !title.trim().is_empty() => Ok(()),
            _ => Err(ValidationError::new("title", "must not be blank")),
        }
    }

    /// Fails when the *resolved* genre list is missing or empty.
    ///
    /// Existence was already settled by the resolver; this only checks cardinality.
    pub fn validate_genres(genres: Option<&[Genre]>) -> Result<(), ValidationError> {
        match genres {
            Some(genres) if !genres.is_empty() => Ok(()),
            _ => Err(ValidationError::new("genres", "at least one genre is required")),
        }
    }
}

pub struct CommentFieldValidator;

impl CommentFieldValidator {
    /// Fails when the text is missing, blank after trimming, or outside
    /// [`COMMENT_TEXT_MIN_CHARS`]..=[`COMMENT_TEXT_MAX_CHARS`] characters.
    ///
    /// Length is counted in characters (not bytes) on the text as given.
    pub fn validate_comment_text(text: Option<&str>) -> Result<(), ValidationError> {
        let Some(text) = text else {
            return Err(ValidationError::new("text", "must not be blank"));
        };
        if text.trim().is_empty() {
            return Err(ValidationError::new("text", "must not be blank"));
        }
        let length = text.chars().count();
        if !(COMMENT_TEXT_MIN_CHARS..=COMMENT_TEXT_MAX_CHARS).contains(&length) {
            return Err(ValidationError::new(
                "text",
                format!(
                    "must be between {COMMENT_TEXT_MIN_CHARS} and {COMMENT_TEXT_MAX_CHARS} characters, got {length}"
                ),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::GenreId;
    use rstest::rstest;

    #[rstest]
    #[case(Some("A"))]
    #[case(Some("  The Left Hand of Darkness "))]
    fn test_title_accepted(#[case] title: Option<&str>) {
        assert!(BookFieldValidator::validate_title(title).is_ok());
    }

    #[rstest]
    #[case(None)]
    #[case(Some(""))]
    #[case(Some("   "))]
    #[case(Some("\t\n"))]
    fn test_title_rejected(#[case] title: Option<&str>) {
        let err = BookFieldValidator::validate_title(title).unwrap_err();
        assert_eq!(err.field, "title");
    }

    #[test]
    fn test_genres_cardinality() {
        let genres = vec![Genre { id: GenreId(1), name: "Fantasy".into() }];
        assert!(BookFieldValidator::validate_genres(Some(&genres)).is_ok());
        assert_eq!(BookFieldValidator::validate_genres(Some(&[])).unwrap_err().field, "genres");
        assert_eq!(BookFieldValidator::validate_genres(None).unwrap_err().field, "genres");
    }

    #[rstest]
    #[case("abcde")]
    #[case("  ok  ")]
    #[case("ééééé")]
    fn test_comment_text_accepted(#[case] text: &str) {
        assert!(CommentFieldValidator::validate_comment_text(Some(text)).is_ok());
    }

    #[rstest]
    #[case("abcd".to_string())]
    #[case("     ".to_string())]
    #[case("".to_string())]
    #[case("x".repeat(501))]
    fn test_comment_text_rejected(#[case] text: String) {
        let err = CommentFieldValidator::validate_comment_text(Some(&text)).unwrap_err();
        assert_eq!(err.field, "text");
    }

    #[test]
    fn test_comment_text_upper_bound_is_inclusive() {
        let text = "x".repeat(COMMENT_TEXT_MAX_CHARS);
        assert!(CommentFieldValidator::validate_comment_text(Some(&text)).is_ok());
        assert!(CommentFieldValidator::validate_comment_text(None).is_err());
    }
}
