use indexmap::IndexMap;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{
    error::AssetLoadError,
    vectorizer::serde::TermFrequencyRecord,
};

/// Document-frequency statistics of the training corpus.
///
/// Holds only:
/// - the number of training documents
/// - for each term, the number of documents it occurs in
///
/// It is the base data for IDF. Built once from the trainer's records and
/// never modified afterwards: there is no method that adds or removes a
/// document, so scoring a request cannot leak into the statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Corpus {
    /// document count
    doc_num: u64,
    /// term -> number of documents containing it
    term_counts: IndexMap<Box<str>, u64>,
}

impl Corpus {
    /// Rebuild document frequencies from training term-frequency records.
    /// Records are scanned in parallel; the result is sorted by term so it
    /// does not depend on scheduling.
    pub fn from_records(records: &[TermFrequencyRecord]) -> Result<Self, AssetLoadError> {
        if records.is_empty() {
            return Err(AssetLoadError::schema("corpus", "corpus has no documents"));
        }
        let mut term_counts = records
            .par_iter()
            .enumerate()
            .try_fold(IndexMap::new, |mut acc: IndexMap<Box<str>, u64>, (idx, record)| {
                for term in record.present_terms(idx)? {
                    *acc.entry(term.into()).or_insert(0) += 1;
                }
                Ok::<_, AssetLoadError>(acc)
            })
            .try_reduce(IndexMap::new, |a, b| Ok(merge_counts(a, b)))?;
        term_counts.sort_keys();
        Ok(Self {
            doc_num: records.len() as u64,
            term_counts,
        })
    }

    /// Get the number of documents in the corpus
    #[inline]
    pub fn get_doc_num(&self) -> u64 {
        self.doc_num
    }

    /// Get the document frequency of a term (0 if unseen)
    #[inline]
    pub fn get_term_count(&self, term: &str) -> u64 {
        self.term_counts.get(term).copied().unwrap_or(0)
    }

    /// Get the number of unique terms seen in training
    #[inline]
    pub fn vocab_size(&self) -> usize {
        self.term_counts.len()
    }
}

fn merge_counts(
    mut a: IndexMap<Box<str>, u64>,
    b: IndexMap<Box<str>, u64>,
) -> IndexMap<Box<str>, u64> {
    if a.len() < b.len() {
        return merge_counts(b, a);
    }
    for (term, count) in b {
        *a.entry(term).or_insert(0) += count;
    }
    a
}
