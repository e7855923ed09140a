pub mod corpus;
pub mod serde;
pub mod tfidf;
pub mod token;
pub mod vocabulary;

use std::marker::PhantomData;

use ::serde::{Deserialize, Serialize};

use crate::{
    error::AssetLoadError,
    vectorizer::{
        corpus::Corpus,
        tfidf::{DefaultTFIDFEngine, TFIDFEngine},
        token::TokenFrequency,
        vocabulary::Vocabulary,
    },
};

/// IDFの出どころ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdfSource {
    /// 学習コーパスからエンジンの式で計算した
    Corpus,
    /// 学習側がエクスポートした値をそのまま使う
    Exported,
}

/// IDF cache
/// 語彙順に並んだIDF値。ロード時に一度だけ作られる
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IDFVector {
    /// IDF Vector it is not sparse because it is mostly filled
    pub idf_vec: Vec<f64>,
    /// document count
    pub doc_num: u64,
    pub source: IdfSource,
}

impl IDFVector {
    /// エンジンの式でコーパスから計算する
    pub fn from_corpus<E>(corpus: &Corpus, vocabulary: &Vocabulary) -> Self
    where
        E: TFIDFEngine,
    {
        Self {
            idf_vec: E::idf_vec(corpus, vocabulary),
            doc_num: corpus.get_doc_num(),
            source: IdfSource::Corpus,
        }
    }

    /// エクスポート済みのIDFを採用する
    ///
    /// # Arguments
    /// * `idf_vec` - 語彙順のIDF値
    /// * `vocabulary` - 長さ検証用
    /// * `doc_num` - 参照用のコーパス文書数
    pub fn from_exported(
        idf_vec: Vec<f64>,
        vocabulary: &Vocabulary,
        doc_num: u64,
    ) -> Result<Self, AssetLoadError> {
        if idf_vec.len() != vocabulary.len() {
            return Err(AssetLoadError::shape(format!(
                "idf has {} values but vocabulary has {} terms",
                idf_vec.len(),
                vocabulary.len()
            )));
        }
        if let Some(idx) = idf_vec.iter().position(|v| !v.is_finite()) {
            return Err(AssetLoadError::schema(
                "idf",
                format!("value at position {idx} is not finite ({})", idf_vec[idx]),
            ));
        }
        Ok(Self {
            idf_vec,
            doc_num,
            source: IdfSource::Exported,
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.idf_vec.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.idf_vec.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.idf_vec
    }
}

/// Dense TF-IDF vector, one weight per vocabulary position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureVector {
    values: Vec<f64>,
}

impl FeatureVector {
    pub fn zeros(len: usize) -> Self {
        Self {
            values: vec![0.0; len],
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// 非ゼロ要素数
    pub fn nnz(&self) -> usize {
        self.values.iter().filter(|v| **v != 0.0).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().copied()
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.values
    }
}

/// TF-IDF Vectorizer
/// 読み取り専用の語彙とIDF cacheを借用し、1文書分のTF-IDFベクトルを作る
///
/// It never touches the corpus. The same input always produces the same
/// vector, and any number of threads may vectorize at once.
#[derive(Debug, Clone, Copy)]
pub struct TFIDFVectorizer<'a, E = DefaultTFIDFEngine>
where
    E: TFIDFEngine,
{
    vocabulary: &'a Vocabulary,
    idf: &'a IDFVector,
    _marker: PhantomData<E>,
}

impl<'a, E> TFIDFVectorizer<'a, E>
where
    E: TFIDFEngine,
{
    /// # Arguments
    /// * `vocabulary` - 次元の並び
    /// * `idf` - 同じ語彙で作ったIDF cache
    pub fn new(vocabulary: &'a Vocabulary, idf: &'a IDFVector) -> Self {
        debug_assert_eq!(vocabulary.len(), idf.len());
        Self {
            vocabulary,
            idf,
            _marker: PhantomData,
        }
    }

    /// 出力の次元数 (V)
    #[inline]
    pub fn dim(&self) -> usize {
        self.vocabulary.len()
    }

    /// TF-IDFベクトルを計算するメソッド
    /// 語彙外のtokenは無視される
    ///
    /// # Arguments
    /// * `freq` - 前処理済み文書のtoken頻度
    ///
    /// # Returns
    /// * `FeatureVector` - 長さVの密ベクトル
    pub fn vectorize(&self, freq: &TokenFrequency) -> FeatureVector {
        let idf = self.idf.as_slice();
        let mut vec = FeatureVector::zeros(self.dim());
        for (token, count) in freq.iter() {
            if let Some(idx) = self.vocabulary.index_of(token) {
                vec.values[idx] = E::tf(count, freq) * idf[idx];
            }
        }
        vec
    }

    /// 前処理済み文字列から直接計算する
    pub fn vectorize_preprocessed(&self, preprocessed: &str) -> FeatureVector {
        self.vectorize(&TokenFrequency::from_preprocessed(preprocessed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vectorizer::serde::TermFrequencyRecord;

    /// TF divided by document length; IDF from the default formula
    #[derive(Debug, Clone, Copy)]
    struct LengthNormalizedEngine;

    impl TFIDFEngine for LengthNormalizedEngine {
        fn idf_vec(corpus: &Corpus, vocabulary: &Vocabulary) -> Vec<f64> {
            DefaultTFIDFEngine::idf_vec(corpus, vocabulary)
        }

        fn tf(count: u32, freq: &TokenFrequency) -> f64 {
            count as f64 / freq.token_sum() as f64
        }
    }

    fn fixture() -> (Vocabulary, Corpus) {
        let vocab = Vocabulary::from_terms(vec!["fake", "new", "report", "run", "truth"]).unwrap();
        let corpus = Corpus::from_records(&[
            TermFrequencyRecord::new().with_count("fake", 2.0).with_count("new", 1.0),
            TermFrequencyRecord::new().with_count("new", 1.0).with_count("report", 1.0),
            TermFrequencyRecord::new().with_count("run", 1.0),
            TermFrequencyRecord::new().with_count("report", 3.0).with_count("fake", 1.0),
        ])
        .unwrap();
        (vocab, corpus)
    }

    #[test]
    fn vectorize_known_document() {
        let (vocab, corpus) = fixture();
        let idf = IDFVector::from_corpus::<DefaultTFIDFEngine>(&corpus, &vocab);
        let vectorizer: TFIDFVectorizer = TFIDFVectorizer::new(&vocab, &idf);
        let vec = vectorizer.vectorize_preprocessed("fake new report run fake");
        let expected = [
            2.5753641449035616,
            1.2876820724517808,
            1.2876820724517808,
            1.6931471805599454,
            0.0,
        ];
        assert_eq!(vec.len(), 5);
        for (got, want) in vec.iter().zip(expected) {
            assert!((got - want).abs() < 1e-12, "{got} != {want}");
        }
        assert_eq!(vec.nnz(), 4);
    }

    #[test]
    fn out_of_vocabulary_tokens_give_zero_vector() {
        let (vocab, corpus) = fixture();
        let idf = IDFVector::from_corpus::<DefaultTFIDFEngine>(&corpus, &vocab);
        let vectorizer: TFIDFVectorizer = TFIDFVectorizer::new(&vocab, &idf);
        let vec = vectorizer.vectorize_preprocessed("elect senat");
        assert_eq!(vec.into_vec(), vec![0.0; 5]);
    }

    #[test]
    fn vectorizing_does_not_touch_the_corpus() {
        let (vocab, corpus) = fixture();
        let before = corpus.clone();
        let idf = IDFVector::from_corpus::<DefaultTFIDFEngine>(&corpus, &vocab);
        let vectorizer: TFIDFVectorizer = TFIDFVectorizer::new(&vocab, &idf);
        let a = vectorizer.vectorize_preprocessed("truth truth run");
        let b = vectorizer.vectorize_preprocessed("truth truth run");
        assert_eq!(a, b);
        assert_eq!(corpus, before);
    }

    #[test]
    fn engine_is_pluggable() {
        let (vocab, corpus) = fixture();
        let idf = IDFVector::from_corpus::<LengthNormalizedEngine>(&corpus, &vocab);
        let vectorizer = TFIDFVectorizer::<LengthNormalizedEngine>::new(&vocab, &idf);
        let vec = vectorizer.vectorize_preprocessed("run run truth zzz");
        assert!((vec.as_slice()[3] - 0.5 * 1.6931471805599454).abs() < 1e-12);
        assert!((vec.as_slice()[4] - 0.25 * 2.386294361119891).abs() < 1e-12);
    }

    #[test]
    fn exported_idf_is_length_checked() {
        let (vocab, _) = fixture();
        let err = IDFVector::from_exported(vec![1.0; 4], &vocab, 4).unwrap_err();
        assert!(matches!(err, AssetLoadError::Shape(_)));

        let err = IDFVector::from_exported(vec![1.0, 1.0, f64::NAN, 1.0, 1.0], &vocab, 4).unwrap_err();
        assert!(matches!(err, AssetLoadError::Schema { kind: "idf", .. }));

        let idf = IDFVector::from_exported(vec![2.0; 5], &vocab, 4).unwrap();
        assert_eq!(idf.source, IdfSource::Exported);
    }
}
