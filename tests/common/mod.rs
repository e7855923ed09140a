#![allow(dead_code)]

use std::path::{Path, PathBuf};

use fake_news_tfidf::{vectorizer::serde::TermFrequencyRecord, AssetConfig};
use serde::Serialize;
use serde_json::{json, Value};
use tempfile::TempDir;

pub const GOLDEN_TEXT: &str = "Fake news!! The reports were running... FAKE";
pub const GOLDEN_PREPROCESSED: &str = "fake new report run fake";
pub const GOLDEN_PROBABILITY: f64 = 0.8400914593054886;
pub const GOLDEN_VECTOR: [f64; 5] = [
    2.5753641449035616,
    1.2876820724517808,
    1.2876820724517808,
    1.6931471805599454,
    0.0,
];
pub const BIAS_PROBABILITY: f64 = 0.2689414213699951;
pub const TOLERANCE: f64 = 1e-12;

pub fn golden_vocabulary() -> Vec<&'static str> {
    vec!["fake", "new", "report", "run", "truth"]
}

pub fn golden_weights() -> Vec<f64> {
    vec![0.5, 0.25, -0.5, 1.0, -2.0, -1.0]
}

pub fn golden_records() -> Vec<TermFrequencyRecord> {
    vec![
        TermFrequencyRecord::new()
            .with_metadata("key", json!(0))
            .with_count("fake", 2.0)
            .with_count("new", 1.0),
        TermFrequencyRecord::new()
            .with_metadata("key", json!(1))
            .with_count("new", 1.0)
            .with_count("report", 1.0),
        TermFrequencyRecord::new()
            .with_metadata("key", json!(2))
            .with_count("run", 1.0),
        TermFrequencyRecord::new()
            .with_metadata("key", json!(3))
            .with_count("report", 3.0)
            .with_count("fake", 1.0),
    ]
}

/// Temporary model directory
pub struct Fixture {
    pub dir: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn write_json<T: Serialize>(&self, name: &str, value: &T) -> PathBuf {
        let path = self.path(name);
        std::fs::write(&path, serde_json::to_vec(value).unwrap()).unwrap();
        path
    }

    pub fn write_cbor<T: Serialize>(&self, name: &str, value: &T) -> PathBuf {
        let path = self.path(name);
        std::fs::write(&path, serde_cbor::to_vec(value).unwrap()).unwrap();
        path
    }

    pub fn write_raw(&self, name: &str, bytes: &[u8]) -> PathBuf {
        let path = self.path(name);
        std::fs::write(&path, bytes).unwrap();
        path
    }

    /// The golden model as JSON in the wrapped layouts
    pub fn golden_json() -> (Self, AssetConfig) {
        let fx = Self::new();
        fx.write_json("weights.json", &json!({ "weights": golden_weights() }));
        fx.write_json(
            "corpus.json",
            &json!({ "documents": golden_records(), "_idfCache": {} }),
        );
        fx.write_json("vocabulary.json", &json!({ "vocabulary": golden_vocabulary() }));
        let config = AssetConfig::from_dir(fx.dir.path());
        (fx, config)
    }

    /// The golden model as CBOR in the bare layouts
    pub fn golden_cbor() -> (Self, AssetConfig) {
        let fx = Self::new();
        let weights = fx.write_cbor("weights.cbor", &golden_weights());
        let corpus = fx.write_cbor("corpus.cbor", &golden_records());
        let vocabulary = fx.write_cbor("vocabulary.cbor", &golden_vocabulary());
        let config = AssetConfig::new(weights, corpus, vocabulary);
        (fx, config)
    }

    pub fn dir_path(&self) -> &Path {
        self.dir.path()
    }
}

pub fn assert_close(got: f64, want: f64) {
    assert!((got - want).abs() < TOLERANCE, "{got} != {want}");
}

pub fn to_value<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap()
}
