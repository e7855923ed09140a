use std::path::{Path, PathBuf};

use clap::Args;
use serde::{Deserialize, Serialize};

/// Default cap on the size of one classification request (1 MiB).
pub const DEFAULT_MAX_INPUT_BYTES: usize = 1 << 20;

/// Where the model artifacts live, plus request limits.
///
/// Usable both as clap arguments (`#[command(flatten)]`) with environment
/// fallbacks and as a serde section of an embedding service's own config.
#[derive(Args, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetConfig {
    /// Logistic-regression weights (V feature weights followed by the bias)
    #[arg(long, env = "FAKENEWS_WEIGHTS")]
    pub weights: PathBuf,

    /// Training corpus term-frequency records
    #[arg(long, env = "FAKENEWS_CORPUS")]
    pub corpus: PathBuf,

    /// Ordered vocabulary terms
    #[arg(long, env = "FAKENEWS_VOCABULARY")]
    pub vocabulary: PathBuf,

    /// Exported per-term IDF; replaces the corpus-derived IDF when set
    #[arg(long, env = "FAKENEWS_IDF")]
    #[serde(default)]
    pub idf: Option<PathBuf>,

    /// Largest accepted request text, in bytes
    #[arg(long, env = "FAKENEWS_MAX_INPUT_BYTES", default_value_t = DEFAULT_MAX_INPUT_BYTES)]
    #[serde(default = "default_max_input_bytes")]
    pub max_input_bytes: usize,
}

fn default_max_input_bytes() -> usize {
    DEFAULT_MAX_INPUT_BYTES
}

impl AssetConfig {
    pub fn new(
        weights: impl Into<PathBuf>,
        corpus: impl Into<PathBuf>,
        vocabulary: impl Into<PathBuf>,
    ) -> Self {
        Self {
            weights: weights.into(),
            corpus: corpus.into(),
            vocabulary: vocabulary.into(),
            idf: None,
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
        }
    }

    /// `weights.json`, `corpus.json`, `vocabulary.json` in one directory
    pub fn from_dir(dir: &Path) -> Self {
        Self::new(
            dir.join("weights.json"),
            dir.join("corpus.json"),
            dir.join("vocabulary.json"),
        )
    }

    pub fn with_idf_path(mut self, idf: impl Into<PathBuf>) -> Self {
        self.idf = Some(idf.into());
        self
    }

    pub fn with_max_input_bytes(mut self, max_input_bytes: usize) -> Self {
        self.max_input_bytes = max_input_bytes;
        self
    }
}
