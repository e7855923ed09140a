use crate::vectorizer::{corpus::Corpus, token::TokenFrequency, vocabulary::Vocabulary};

/// TF-IDFの重み付け方式
/// 学習時と推論時で同じ式を使う必要があるため、差し替えは型パラメータで行う
pub trait TFIDFEngine {
    /// IDFベクトルを生成するメソッド
    /// # Arguments
    /// * `corpus` - 学習時のコーパス (N >= 1)
    /// * `vocabulary` - 次元の並び
    /// # Returns
    /// * `Vec<f64>` - 語彙順のIDFベクトル
    fn idf_vec(corpus: &Corpus, vocabulary: &Vocabulary) -> Vec<f64>;

    /// 1 tokenのTF値
    /// # Arguments
    /// * `count` - 文書内の出現回数
    /// * `freq` - 文書全体の出現頻度
    fn tf(count: u32, freq: &TokenFrequency) -> f64;
}

/// デフォルトのTF-IDFエンジン
///
/// - TF: raw count
/// - IDF: `1 + ln(N / (1 + df))`
///
/// The IDF of a term seen in every document is below 1, and may drop under
/// zero once `df + 1 > N * e`; it is used as is.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTFIDFEngine;

impl DefaultTFIDFEngine {
    /// 1 termのIDF
    #[inline]
    pub fn idf(doc_num: u64, doc_freq: u64) -> f64 {
        1.0 + (doc_num as f64 / (doc_freq as f64 + 1.0)).ln()
    }
}

impl TFIDFEngine for DefaultTFIDFEngine {
    fn idf_vec(corpus: &Corpus, vocabulary: &Vocabulary) -> Vec<f64> {
        let doc_num = corpus.get_doc_num();
        vocabulary
            .iter()
            .map(|term| Self::idf(doc_num, corpus.get_term_count(term)))
            .collect()
    }

    #[inline]
    fn tf(count: u32, _freq: &TokenFrequency) -> f64 {
        count as f64
    }
}
