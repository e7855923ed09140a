//! Request-time entry point.
//!
//! Lifecycle: `Loading -> Ready` or `Loading -> Failed`. The transition
//! happens exactly once; after it every request reads shared immutable
//! assets without locking.

use std::{
    fmt,
    sync::{Arc, OnceLock},
};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::{
    asset_store::AssetStore,
    classifier::ClassificationResult,
    config::{AssetConfig, DEFAULT_MAX_INPUT_BYTES},
    error::{AssetLoadError, ClassifyError, Result},
    preprocess::TextPreprocessor,
    vectorizer::{
        tfidf::{DefaultTFIDFEngine, TFIDFEngine},
        token::TokenFrequency,
        FeatureVector,
    },
};

/// Health signal of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Readiness {
    /// assets not loaded yet
    Loading,
    /// assets loaded and validated; requests are served
    Ready,
    /// loading failed; terminal
    Failed,
}

impl fmt::Display for Readiness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Readiness::Loading => "loading",
            Readiness::Ready => "ready",
            Readiness::Failed => "failed",
        };
        f.write_str(s)
    }
}

type LoadState<E> = std::result::Result<Arc<AssetStore<E>>, Arc<AssetLoadError>>;

/// Fake-news classification service.
///
/// Holds one loaded [`AssetStore`] context (or the error that prevented
/// loading it). Share it between threads behind an `Arc`; every method takes
/// `&self`.
///
/// `E` is the TF-IDF engine of the assets; requests are scored with the same
/// formula the IDF cache was built with.
///
/// # Examples
/// ```no_run
/// use std::path::Path;
/// use fake_news_tfidf::{AssetConfig, InferenceService};
///
/// let service = InferenceService::from_config(&AssetConfig::from_dir(Path::new("models")));
/// let result = service.classify("Scientists confirm the moon is made of cheese").unwrap();
/// println!("{} {}", result.label, result.probability);
/// ```
#[derive(Debug)]
pub struct InferenceService<E = DefaultTFIDFEngine>
where
    E: TFIDFEngine,
{
    preprocessor: TextPreprocessor,
    max_input_bytes: usize,
    state: OnceLock<LoadState<E>>,
}

impl Default for InferenceService {
    fn default() -> Self {
        Self::new()
    }
}

impl InferenceService {
    /// 未ロード (Loading) のサービスを作る
    pub fn new() -> Self {
        Self::with_engine()
    }

    /// 設定から作成し、その場でassetを読み込む
    /// 読み込みに失敗しても返り値はFailed状態のサービス
    pub fn from_config(config: &AssetConfig) -> Self {
        Self::from_config_with_engine(config)
    }
}

impl<E> InferenceService<E>
where
    E: TFIDFEngine,
{
    /// 未ロード (Loading) のサービスを作る (エンジン指定)
    pub fn with_engine() -> Self {
        Self {
            preprocessor: TextPreprocessor::new(),
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
            state: OnceLock::new(),
        }
    }

    /// `from_config` のエンジン指定版
    pub fn from_config_with_engine(config: &AssetConfig) -> Self {
        let service = Self::with_engine().with_max_input_bytes(config.max_input_bytes);
        let _ = service.start(config);
        service
    }

    pub fn with_max_input_bytes(mut self, max_input_bytes: usize) -> Self {
        self.max_input_bytes = max_input_bytes;
        self
    }

    /// 読み込み済みのassetを注入する (Ready)
    pub fn with_assets(assets: Arc<AssetStore<E>>) -> Self {
        let service = Self::with_engine();
        let _ = service.state.set(Ok(assets));
        service
    }

    /// assetを読み込み、状態を一度だけ確定させる
    /// すでに確定している場合は何もせず、その結果を返す
    ///
    /// # Arguments
    /// * `config` - artifactのパス
    pub fn start(&self, config: &AssetConfig) -> std::result::Result<(), Arc<AssetLoadError>> {
        let state = self.state.get_or_init(|| match AssetStore::<E>::load_with_engine(config) {
            Ok(store) => {
                info!(readiness = %Readiness::Ready, "inference service ready");
                Ok(Arc::new(store))
            }
            Err(err) => {
                error!(readiness = %Readiness::Failed, error = %err, "failed to load model assets");
                Err(Arc::new(err))
            }
        });
        state.as_ref().map(|_| ()).map_err(Arc::clone)
    }

    /// readiness probe
    pub fn readiness(&self) -> Readiness {
        match self.state.get() {
            None => Readiness::Loading,
            Some(Ok(_)) => Readiness::Ready,
            Some(Err(_)) => Readiness::Failed,
        }
    }

    /// Failed状態の原因
    pub fn load_error(&self) -> Option<&AssetLoadError> {
        match self.state.get() {
            Some(Err(err)) => Some(&**err),
            _ => None,
        }
    }

    /// Ready状態のasset
    pub fn assets(&self) -> Option<&Arc<AssetStore<E>>> {
        self.state.get().and_then(|state| state.as_ref().ok())
    }

    #[inline]
    pub fn max_input_bytes(&self) -> usize {
        self.max_input_bytes
    }

    /// 前処理のみ (assetは不要)
    pub fn preprocess(&self, text: &str) -> String {
        self.preprocessor.preprocess(text)
    }

    /// `classify` が採点するのと同じTF-IDFベクトル
    pub fn vectorize(&self, text: &str) -> Result<FeatureVector> {
        self.check_input(text)?;
        let assets = self.ready_assets()?;
        Ok(self.vectorize_with(assets, text))
    }

    /// 1文書を分類する
    ///
    /// # Arguments
    /// * `text` - 生の記事テキスト (空文字は不可)
    ///
    /// # Returns
    /// * `ClassificationResult` - label と P(fake)
    pub fn classify(&self, text: &str) -> Result<ClassificationResult> {
        self.check_input(text)?;
        let assets = self.ready_assets()?;
        let vector = self.vectorize_with(assets, text);
        Ok(assets.classifier().classify(&vector))
    }

    /// 複数文書を並列に分類する
    /// 結果は入力と同じ順序で、1件ずつ独立に成功/失敗する
    pub fn classify_batch<T>(&self, texts: &[T]) -> Vec<Result<ClassificationResult>>
    where
        T: AsRef<str> + Sync,
    {
        texts
            .par_iter()
            .map(|text| self.classify(text.as_ref()))
            .collect()
    }

    fn vectorize_with(&self, assets: &AssetStore<E>, text: &str) -> FeatureVector {
        let freq = TokenFrequency::from_preprocessed(&self.preprocessor.preprocess(text));
        let vector = assets.vectorizer().vectorize(&freq);
        debug!(
            tokens = freq.token_sum(),
            distinct = freq.token_num(),
            nnz = vector.nnz(),
            "vectorized request"
        );
        vector
    }

    fn check_input(&self, text: &str) -> Result<()> {
        if text.is_empty() {
            debug!("rejected empty input");
            return Err(ClassifyError::invalid_input("text is empty"));
        }
        if text.len() > self.max_input_bytes {
            debug!(len = text.len(), max = self.max_input_bytes, "rejected oversized input");
            return Err(ClassifyError::invalid_input(format!(
                "text is {} bytes, limit is {}",
                text.len(),
                self.max_input_bytes
            )));
        }
        Ok(())
    }

    fn ready_assets(&self) -> Result<&AssetStore<E>> {
        match self.state.get() {
            Some(Ok(assets)) => Ok(&**assets),
            _ => {
                let readiness = self.readiness();
                debug!(%readiness, "rejected request while not ready");
                Err(ClassifyError::NotReady(readiness))
            }
        }
    }
}
