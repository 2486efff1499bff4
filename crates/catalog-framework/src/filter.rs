//! # Record Filters
//!
//! A [`Filter`] is a labelled predicate that travels to the store actor inside a request.
//! The label is what shows up in logs, since closures have no useful `Debug` output.

use std::fmt;
use std::sync::Arc;

/// A shareable predicate over records of type `T`.
pub struct Filter<T> {
    label: String,
    predicate: Arc<dyn Fn(&T) -> bool + Send + Sync>,
}

impl<T> Filter<T> {
    /// Creates a filter with a human-readable label, e.g. `"book_id == book_3"`.
    pub fn new(label: impl Into<String>, predicate: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        Self {
            label: label.into(),
            predicate: Arc::new(predicate),
        }
    }

    /// Evaluates the predicate against a record.
    pub fn matches(&self, item: &T) -> bool {
        (self.predicate)(item)
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl<T> Clone for Filter<T> {
    fn clone(&self) -> Self {
        Self {
            label: self.label.clone(),
            predicate: Arc::clone(&self.predicate),
        }
    }
}

impl<T> fmt::Debug for Filter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Filter").field(&self.label).finish()
    }
}

impl<T> fmt::Display for Filter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_matches_and_labels() {
        let even = Filter::new("n % 2 == 0", |n: &u32| n % 2 == 0);
        assert!(even.matches(&4));
        assert!(!even.matches(&5));
        assert_eq!(even.label(), "n % 2 == 0");
        assert_eq!(format!("{:?}", even.clone()), "Filter(\"n % 2 == 0\")");
    }
}
