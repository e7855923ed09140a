use indexmap::IndexSet;
use serde::Serialize;

use crate::error::AssetLoadError;

/// Fixed, ordered set of terms the model can see.
/// The position of a term is its feature dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Vocabulary {
    terms: IndexSet<Box<str>>,
}

impl Vocabulary {
    /// Build from the trainer's term list.
    /// Rejects an empty list, empty terms and duplicates; a duplicate would
    /// leave one weight permanently unreachable.
    pub fn from_terms<T>(terms: Vec<T>) -> Result<Self, AssetLoadError>
    where
        T: Into<Box<str>>,
    {
        if terms.is_empty() {
            return Err(AssetLoadError::schema("vocabulary", "vocabulary is empty"));
        }
        let mut set = IndexSet::with_capacity(terms.len());
        for (idx, term) in terms.into_iter().enumerate() {
            let term: Box<str> = term.into();
            if term.is_empty() {
                return Err(AssetLoadError::schema(
                    "vocabulary",
                    format!("term at position {idx} is empty"),
                ));
            }
            if let Some(first) = set.get_index_of(&term) {
                return Err(AssetLoadError::schema(
                    "vocabulary",
                    format!("term {term:?} appears at positions {first} and {idx}"),
                ));
            }
            set.insert(term);
        }
        Ok(Self { terms: set })
    }

    /// Feature dimension of `term`, if the model knows it.
    #[inline]
    pub fn index_of(&self, term: &str) -> Option<usize> {
        self.terms.get_index_of(term)
    }

    /// V
    #[inline]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(|t| t.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_are_dimensions() {
        let vocab = Vocabulary::from_terms(vec!["fake", "new", "report"]).unwrap();
        assert_eq!(vocab.len(), 3);
        assert_eq!(vocab.index_of("new"), Some(1));
        assert_eq!(vocab.index_of("run"), None);
        assert_eq!(vocab.iter().collect::<Vec<_>>(), vec!["fake", "new", "report"]);
    }

    #[test]
    fn rejects_empty_vocabulary() {
        let err = Vocabulary::from_terms(Vec::<String>::new()).unwrap_err();
        assert!(matches!(err, AssetLoadError::Schema { kind: "vocabulary", .. }));
    }

    #[test]
    fn rejects_duplicates_and_blank_terms() {
        let err = Vocabulary::from_terms(vec!["fake", "new", "fake"]).unwrap_err();
        assert!(err.to_string().contains("positions 0 and 2"), "{err}");

        let err = Vocabulary::from_terms(vec!["fake", ""]).unwrap_err();
        assert!(err.to_string().contains("position 1 is empty"), "{err}");
    }
}
