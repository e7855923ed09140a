use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

///  TokenFrequency 構造体
/// tokenの出現頻度を管理するための構造体です
/// 1文書分のトークン出現回数と総トークン数を保持し、TF計算の元データになります
///
/// # Examples
/// ```
/// use fake_news_tfidf::TokenFrequency;
/// let mut token_freq = TokenFrequency::new();
/// token_freq.add_token("fake");
/// token_freq.add_token("new");
/// token_freq.add_token("fake");
///
/// assert_eq!(token_freq.token_count("fake"), 2);
/// assert_eq!(token_freq.token_sum(), 3);
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenFrequency {
    #[serde(with = "indexmap::map::serde_seq")]
    token_count: IndexMap<String, u32>,
    total_token_count: u64,
}

/// Tokenの追加の実装
impl TokenFrequency {
    /// 新しいTokenFrequencyを作成するメソッド
    pub fn new() -> Self {
        TokenFrequency {
            token_count: IndexMap::new(),
            total_token_count: 0,
        }
    }

    /// 前処理済みの文字列 (空白区切りのstem列) から作成する
    ///
    /// # Arguments
    /// * `preprocessed` - `TextPreprocessor::preprocess` の出力
    pub fn from_preprocessed(preprocessed: &str) -> Self {
        let mut freq = Self::new();
        for token in preprocessed.split_whitespace() {
            freq.add_token(token);
        }
        freq
    }

    /// tokenを追加する
    ///
    /// # Arguments
    /// * `token` - 追加するトークン
    #[inline]
    pub fn add_token(&mut self, token: &str) -> &mut Self {
        let count = self.token_count.entry(token.to_string()).or_insert(0);
        *count += 1;
        self.total_token_count += 1;
        self
    }
}

/// TokenFrequencyの情報を取得するための実装
impl TokenFrequency {
    /// あるtokenの出現回数を取得します
    ///
    /// # Arguments
    /// * `token` - トークン
    ///
    /// # Returns
    /// * `u32` - トークンの出現回数 (存在しなければ0)
    #[inline]
    pub fn token_count(&self, token: &str) -> u32 {
        *self.token_count.get(token).unwrap_or(&0)
    }

    /// 全tokenのカウントの合計を取得します
    #[inline]
    pub fn token_sum(&self) -> u64 {
        self.total_token_count
    }

    /// 出現した単語数 (ユニーク数) を取得します
    #[inline]
    pub fn token_num(&self) -> usize {
        self.token_count.len()
    }

    /// (token, count) を初出順に走査します
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.token_count
            .iter()
            .map(|(token, &count)| (token.as_str(), count))
    }
}
