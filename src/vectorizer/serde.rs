//! Persisted artifact layouts written by the offline trainer.
//!
//! Every artifact is read once at startup. The byte format is picked from the
//! file extension: `.cbor` is CBOR, anything else is JSON. Each layout accepts
//! either a bare array or the same array wrapped in a named field, since the
//! trainer has emitted both over time.

use std::path::Path;

use indexmap::IndexMap;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

use crate::error::AssetLoadError;

/// 永続化フォーマット
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactFormat {
    Json,
    Cbor,
}

impl ArtifactFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("cbor") => ArtifactFormat::Cbor,
            _ => ArtifactFormat::Json,
        }
    }
}

/// ファイルを読み込み、拡張子に応じてデシリアライズする
///
/// # Arguments
/// * `kind` - エラーメッセージ用のartifact名
/// * `path` - artifactのパス
pub fn read_artifact<T>(kind: &'static str, path: &Path) -> Result<T, AssetLoadError>
where
    T: DeserializeOwned,
{
    let bytes = std::fs::read(path).map_err(|source| AssetLoadError::Io {
        kind,
        path: path.to_path_buf(),
        source,
    })?;
    let parse_err = |reason: String| AssetLoadError::Parse {
        kind,
        path: path.to_path_buf(),
        reason,
    };
    match ArtifactFormat::from_path(path) {
        ArtifactFormat::Json => serde_json::from_slice(&bytes).map_err(|e| parse_err(e.to_string())),
        ArtifactFormat::Cbor => serde_cbor::from_slice(&bytes).map_err(|e| parse_err(e.to_string())),
    }
}

/// Model weights: V feature weights followed by the bias.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WeightsArtifact {
    Bare(Vec<f64>),
    Wrapped { weights: Vec<f64> },
}

impl WeightsArtifact {
    pub fn into_vec(self) -> Vec<f64> {
        match self {
            WeightsArtifact::Bare(weights) | WeightsArtifact::Wrapped { weights } => weights,
        }
    }
}

/// Ordered vocabulary terms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VocabularyArtifact {
    Bare(Vec<String>),
    Wrapped { vocabulary: Vec<String> },
}

impl VocabularyArtifact {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            VocabularyArtifact::Bare(terms) | VocabularyArtifact::Wrapped { vocabulary: terms } => {
                terms
            }
        }
    }
}

/// Per-term IDF exported directly by the trainer, in vocabulary order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IdfArtifact {
    Bare(Vec<f64>),
    Wrapped { idf: Vec<f64> },
}

impl IdfArtifact {
    pub fn into_vec(self) -> Vec<f64> {
        match self {
            IdfArtifact::Bare(idf) | IdfArtifact::Wrapped { idf } => idf,
        }
    }
}

/// Training corpus state: one term-frequency record per training document.
/// Unknown top-level fields (cached IDF tables and the like) are ignored;
/// IDF is always recomputed from the records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CorpusArtifact {
    Wrapped { documents: Vec<TermFrequencyRecord> },
    Bare(Vec<TermFrequencyRecord>),
}

impl CorpusArtifact {
    pub fn documents(&self) -> &[TermFrequencyRecord] {
        match self {
            CorpusArtifact::Wrapped { documents } | CorpusArtifact::Bare(documents) => documents,
        }
    }
}

/// One training document as `term -> count`.
/// Keys starting with `__` carry record metadata (document keys) and are not terms.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TermFrequencyRecord(IndexMap<String, Value>);

impl TermFrequencyRecord {
    pub const METADATA_PREFIX: &'static str = "__";

    pub fn new() -> Self {
        Self::default()
    }

    /// Builder used by tooling and tests.
    pub fn with_count(mut self, term: &str, count: f64) -> Self {
        self.0.insert(term.to_string(), Value::from(count));
        self
    }

    pub fn with_metadata(mut self, key: &str, value: Value) -> Self {
        self.0
            .insert(format!("{}{}", Self::METADATA_PREFIX, key), value);
        self
    }

    /// Terms that occur in this document (count > 0), after validating every
    /// count is a finite non-negative number.
    ///
    /// # Arguments
    /// * `doc_idx` - position of the record, for error messages
    pub fn present_terms(&self, doc_idx: usize) -> Result<Vec<&str>, AssetLoadError> {
        let mut present = Vec::with_capacity(self.0.len());
        for (term, value) in &self.0 {
            if term.starts_with(Self::METADATA_PREFIX) {
                continue;
            }
            let count = value.as_f64().ok_or_else(|| {
                AssetLoadError::schema(
                    "corpus",
                    format!("document {doc_idx}: count for term {term:?} is not a number ({value})"),
                )
            })?;
            if !count.is_finite() || count < 0.0 {
                return Err(AssetLoadError::schema(
                    "corpus",
                    format!("document {doc_idx}: count for term {term:?} is {count}"),
                ));
            }
            if count > 0.0 {
                present.push(term.as_str());
            }
        }
        Ok(present)
    }
}
