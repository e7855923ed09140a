pub mod stemmer;
pub mod stopwords;

use crate::preprocess::{
    stemmer::{PorterStemmer, Stemmer},
    stopwords::StopWords,
};

/// Text preprocessor
/// Turns raw article text into the token stream the model was trained on.
///
/// Steps, in this order:
/// 1. lowercase (Unicode, locale independent)
/// 2. every character outside ASCII `a-z` becomes a space
/// 3. split on whitespace
/// 4. drop stopwords
/// 5. stem each surviving token
/// 6. join with single spaces
///
/// The transform is pure; identical input always yields identical output.
///
/// # Examples
/// ```
/// use fake_news_tfidf::TextPreprocessor;
///
/// let pre = TextPreprocessor::new();
/// assert_eq!(pre.preprocess("The Reports were RUNNING!"), "report run");
/// ```
#[derive(Debug, Clone)]
pub struct TextPreprocessor<S = PorterStemmer>
where
    S: Stemmer,
{
    stop_words: StopWords,
    stemmer: S,
}

impl TextPreprocessor {
    /// English stopwords + Porter stemmer
    pub fn new() -> Self {
        Self::with_stemmer(PorterStemmer::new())
    }
}

impl Default for TextPreprocessor {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> TextPreprocessor<S>
where
    S: Stemmer,
{
    pub fn with_stemmer(stemmer: S) -> Self {
        Self {
            stop_words: StopWords::english(),
            stemmer,
        }
    }

    /// 前処理済みのトークン列
    ///
    /// # Arguments
    /// * `text` - raw text
    ///
    /// # Returns
    /// * `Vec<String>` - stems in document order, repeats kept
    pub fn tokens(&self, text: &str) -> Vec<String> {
        let normalized: String = text
            .chars()
            .flat_map(char::to_lowercase)
            .map(|c| if c.is_ascii_alphabetic() { c } else { ' ' })
            .collect();

        normalized
            .split_whitespace()
            .filter(|token| !self.stop_words.contains(token))
            .map(|token| self.stemmer.stem(token))
            .collect()
    }

    /// 前処理済みの文字列
    /// Tokens joined by single spaces; empty when nothing survives.
    pub fn preprocess(&self, text: &str) -> String {
        self.tokens(text).join(" ")
    }
}
