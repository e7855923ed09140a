/// This crate is the request-time core of a fake-news classifier:
/// text preprocessing, TF-IDF vectorization and logistic-regression scoring
/// over model artifacts produced by an offline trainer.
pub mod asset_store;
pub mod classifier;
pub mod config;
pub mod error;
pub mod logging;
pub mod preprocess;
pub mod service;
pub mod utils;
pub mod vectorizer;

/// Inference Service
/// The top-level struct of this crate.
/// It owns one loaded `AssetStore` and turns raw text into a
/// `ClassificationResult`.
///
/// Lifecycle:
/// - `Loading`: created, assets not loaded yet
/// - `Ready`: all artifacts loaded and validated
/// - `Failed`: loading failed; terminal
///
/// Requests made while not `Ready` fail with `ClassifyError::NotReady`.
///
/// # Thread Safety
/// All methods take `&self`. Share it behind an `Arc`; after loading, every
/// read goes to immutable data without locking.
pub use service::InferenceService;

/// Readiness probe value of `InferenceService`
pub use service::Readiness;

/// Model context
/// Vocabulary, corpus statistics, model weights and the IDF cache,
/// loaded once and never mutated.
///
/// Loading reads all artifacts concurrently and checks:
/// - weight count == vocabulary size + 1
/// - vocabulary is non-empty, with unique non-empty terms
/// - corpus records have finite non-negative counts
pub use asset_store::AssetStore;

/// Asset paths and request limits
/// Usable as clap arguments (with `FAKENEWS_*` environment fallbacks) and as
/// a serde config section.
pub use config::AssetConfig;

/// Error types
pub use error::{AssetLoadError, ClassifyError};

/// Text preprocessor
/// lowercase -> non-letters to spaces -> split -> stopwords -> Porter stem -> join
pub use preprocess::TextPreprocessor;

/// Stemming seam and the Porter implementation
pub use preprocess::stemmer::{PorterStemmer, Stemmer};

/// Corpus for TF-IDF Vectorizer
/// It does not store document text or IDs; it only manages:
/// - The number of documents
/// - The number of documents in which each term appears across the corpus
///
/// It is used as the base data for IDF (Inverse Document Frequency) calculation.
/// There is no method that changes it after it is built.
pub use vectorizer::corpus::Corpus;

/// Token Frequency structure
/// A struct for managing token occurrence frequency within one document.
/// It manages:
/// - The count of occurrences of each token
/// - The total number of tokens in the document
pub use vectorizer::token::TokenFrequency;

/// Ordered vocabulary; a term's position is its feature dimension
pub use vectorizer::vocabulary::Vocabulary;

/// TF-IDF Vectorizer
/// Borrows the vocabulary and the IDF cache and produces one dense
/// `FeatureVector` per document.
///
/// `TFIDFVectorizer<'a, E>` has the following generic parameter:
/// - `E`: TF-IDF calculation engine type (e.g., DefaultTFIDFEngine)
pub use vectorizer::TFIDFVectorizer;

/// Dense TF-IDF vector and the IDF cache
pub use vectorizer::{FeatureVector, IDFVector, IdfSource};

/// TF-IDF Engine
/// Pluggable weighting formula.
/// The default engine uses raw counts for TF and `1 + ln(N / (1 + df))` for IDF.
pub use vectorizer::tfidf::{DefaultTFIDFEngine, TFIDFEngine};

/// Logistic-regression scorer, its weights and result
pub use classifier::{ClassificationResult, LogisticRegression, ModelWeights};
