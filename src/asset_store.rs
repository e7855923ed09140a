//! Read-only model context: vocabulary, corpus statistics, weights and the
//! IDF cache derived from them.

use std::{marker::PhantomData, path::Path, time::Instant};

use tracing::{debug, info};

use crate::{
    classifier::{LogisticRegression, ModelWeights},
    config::AssetConfig,
    error::AssetLoadError,
    vectorizer::{
        corpus::Corpus,
        serde::{read_artifact, CorpusArtifact, IdfArtifact, VocabularyArtifact, WeightsArtifact},
        tfidf::{DefaultTFIDFEngine, TFIDFEngine},
        vocabulary::Vocabulary,
        IDFVector, TFIDFVectorizer,
    },
};

/// Everything a classification needs, loaded once and never mutated.
///
/// Cross-artifact invariants hold for every value of this type:
/// - `weights.len() == vocabulary.len() + 1`
/// - `idf.len() == vocabulary.len()`
///
/// `E` fixes the TF-IDF formula for both the IDF cache and the TF of every
/// request scored against this store.
#[derive(Debug, Clone)]
pub struct AssetStore<E = DefaultTFIDFEngine>
where
    E: TFIDFEngine,
{
    vocabulary: Vocabulary,
    corpus: Corpus,
    weights: ModelWeights,
    idf: IDFVector,
    _engine: PhantomData<fn() -> E>,
}

impl AssetStore {
    /// 設定されたパスから全artifactを読み込む
    /// (デフォルトのTF-IDFエンジン)
    pub fn load(config: &AssetConfig) -> Result<Self, AssetLoadError> {
        Self::load_with_engine(config)
    }

    /// 読み込み済みの部品から組み立てる (デフォルトのTF-IDFエンジン)
    pub fn from_parts(
        vocabulary: Vocabulary,
        corpus: Corpus,
        weights: ModelWeights,
        idf_override: Option<Vec<f64>>,
    ) -> Result<Self, AssetLoadError> {
        Self::from_parts_with_engine(vocabulary, corpus, weights, idf_override)
    }
}

impl<E> AssetStore<E>
where
    E: TFIDFEngine,
{
    /// 設定されたパスから全artifactを読み込む
    ///
    /// weights / corpus / vocabulary (と任意のidf) は並列に読み込まれ、
    /// すべて成功した場合のみ検証に進む。
    ///
    /// # Arguments
    /// * `config` - artifactのパス
    pub fn load_with_engine(config: &AssetConfig) -> Result<Self, AssetLoadError> {
        let started = Instant::now();
        let ((weights, corpus), (vocabulary, idf)) = rayon::join(
            || {
                rayon::join(
                    || load_weights(&config.weights),
                    || load_corpus(&config.corpus),
                )
            },
            || {
                rayon::join(
                    || load_vocabulary(&config.vocabulary),
                    || config.idf.as_deref().map(load_idf).transpose(),
                )
            },
        );
        let store = Self::from_parts_with_engine(vocabulary?, corpus?, weights?, idf?)?;
        info!(
            vocab_size = store.vocabulary.len(),
            doc_num = store.corpus.get_doc_num(),
            corpus_terms = store.corpus.vocab_size(),
            idf_source = ?store.idf.source,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "model assets loaded"
        );
        Ok(store)
    }

    /// 読み込み済みの部品から組み立てる (形状検証込み)
    ///
    /// # Arguments
    /// * `vocabulary` - 次元の並び
    /// * `corpus` - 学習コーパスの統計
    /// * `weights` - V + 1 個の重み
    /// * `idf_override` - エクスポート済みIDF。Noneならコーパスから `E` の式で計算
    pub fn from_parts_with_engine(
        vocabulary: Vocabulary,
        corpus: Corpus,
        weights: ModelWeights,
        idf_override: Option<Vec<f64>>,
    ) -> Result<Self, AssetLoadError> {
        if weights.len() != vocabulary.len() + 1 {
            return Err(AssetLoadError::shape(format!(
                "weights has {} values but vocabulary has {} terms (expected {})",
                weights.len(),
                vocabulary.len(),
                vocabulary.len() + 1
            )));
        }
        let idf = match idf_override {
            Some(values) => IDFVector::from_exported(values, &vocabulary, corpus.get_doc_num())?,
            None => IDFVector::from_corpus::<E>(&corpus, &vocabulary),
        };
        Ok(Self {
            vocabulary,
            corpus,
            weights,
            idf,
            _engine: PhantomData,
        })
    }

    #[inline]
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    #[inline]
    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    #[inline]
    pub fn weights(&self) -> &ModelWeights {
        &self.weights
    }

    #[inline]
    pub fn idf(&self) -> &IDFVector {
        &self.idf
    }

    /// 借用ベースのvectorizer (IDF cacheと同じエンジン)
    pub fn vectorizer(&self) -> TFIDFVectorizer<'_, E> {
        TFIDFVectorizer::new(&self.vocabulary, &self.idf)
    }

    pub fn classifier(&self) -> LogisticRegression<'_> {
        LogisticRegression::new(&self.weights)
    }
}

fn timed<T>(
    kind: &'static str,
    path: &Path,
    load: impl FnOnce() -> Result<T, AssetLoadError>,
) -> Result<T, AssetLoadError> {
    let started = Instant::now();
    let result = load();
    debug!(
        kind,
        path = %path.display(),
        ok = result.is_ok(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "artifact read"
    );
    result
}

fn load_weights(path: &Path) -> Result<ModelWeights, AssetLoadError> {
    timed("weights", path, || {
        let artifact: WeightsArtifact = read_artifact("weights", path)?;
        ModelWeights::from_vec(artifact.into_vec())
    })
}

fn load_corpus(path: &Path) -> Result<Corpus, AssetLoadError> {
    timed("corpus", path, || {
        let artifact: CorpusArtifact = read_artifact("corpus", path)?;
        Corpus::from_records(artifact.documents())
    })
}

fn load_vocabulary(path: &Path) -> Result<Vocabulary, AssetLoadError> {
    timed("vocabulary", path, || {
        let artifact: VocabularyArtifact = read_artifact("vocabulary", path)?;
        Vocabulary::from_terms(artifact.into_vec())
    })
}

fn load_idf(path: &Path) -> Result<Vec<f64>, AssetLoadError> {
    timed("idf", path, || {
        let artifact: IdfArtifact = read_artifact("idf", path)?;
        Ok(artifact.into_vec())
    })
}
