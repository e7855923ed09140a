use serde::{Deserialize, Serialize};

use crate::{
    error::AssetLoadError,
    utils::math::{dot, sigmoid},
    vectorizer::FeatureVector,
};

/// probability >= this is labelled fake (1)
pub const DECISION_THRESHOLD: f64 = 0.5;

/// Logistic-regression parameters: V feature weights, then the bias.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ModelWeights {
    values: Vec<f64>,
}

impl ModelWeights {
    /// 学習済みの重み列から作成する
    /// 空、または有限でない値を含む場合はエラー
    pub fn from_vec(values: Vec<f64>) -> Result<Self, AssetLoadError> {
        if values.is_empty() {
            return Err(AssetLoadError::schema("weights", "weights are empty"));
        }
        if let Some(idx) = values.iter().position(|w| !w.is_finite()) {
            return Err(AssetLoadError::schema(
                "weights",
                format!("weight at position {idx} is not finite ({})", values[idx]),
            ));
        }
        Ok(Self { values })
    }

    /// 特徴量の重み (bias抜き)
    #[inline]
    pub fn feature_weights(&self) -> &[f64] {
        &self.values[..self.values.len() - 1]
    }

    #[inline]
    pub fn bias(&self) -> f64 {
        self.values[self.values.len() - 1]
    }

    /// V + 1
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Result of one classification.
/// JSON shape is exactly `{"label": 0|1, "probability": p}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// 1 = fake, 0 = real
    pub label: u8,
    /// P(fake), in [0, 1]
    pub probability: f64,
}

impl ClassificationResult {
    /// 確率からラベルを決める
    #[inline]
    pub fn from_probability(probability: f64) -> Self {
        Self {
            label: u8::from(probability >= DECISION_THRESHOLD),
            probability,
        }
    }

    #[inline]
    pub fn is_fake(&self) -> bool {
        self.label == 1
    }
}

/// Binary logistic-regression scorer over borrowed weights.
#[derive(Debug, Clone, Copy)]
pub struct LogisticRegression<'a> {
    weights: &'a ModelWeights,
}

impl<'a> LogisticRegression<'a> {
    pub fn new(weights: &'a ModelWeights) -> Self {
        Self { weights }
    }

    /// z = Σ vᵢ·wᵢ + bias
    ///
    /// # Arguments
    /// * `vector` - 長さVのTF-IDFベクトル
    #[inline]
    pub fn decision_function(&self, vector: &FeatureVector) -> f64 {
        dot(vector.as_slice(), self.weights.feature_weights()) + self.weights.bias()
    }

    /// σ(z)
    #[inline]
    pub fn predict(&self, vector: &FeatureVector) -> f64 {
        sigmoid(self.decision_function(vector))
    }

    pub fn classify(&self, vector: &FeatureVector) -> ClassificationResult {
        ClassificationResult::from_probability(self.predict(vector))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weights() -> ModelWeights {
        ModelWeights::from_vec(vec![0.5, 0.25, -0.5, 1.0, -2.0, -1.0]).unwrap()
    }

    fn golden_vector() -> FeatureVector {
        serde_json::from_str(
            "[2.5753641449035616, 1.2876820724517808, 1.2876820724517808, 1.6931471805599454, 0.0]",
        )
        .unwrap()
    }

    #[test]
    fn bias_is_the_last_weight() {
        let w = weights();
        assert_eq!(w.len(), 6);
        assert_eq!(w.feature_weights(), &[0.5, 0.25, -0.5, 1.0, -2.0]);
        assert_eq!(w.bias(), -1.0);
    }

    #[test]
    fn known_vector_scores_as_fake() {
        let w = weights();
        let model = LogisticRegression::new(&w);
        let v = golden_vector();
        assert!((model.decision_function(&v) - 1.6589087348987812).abs() < 1e-12);
        let result = model.classify(&v);
        assert!((result.probability - 0.8400914593054886).abs() < 1e-12);
        assert_eq!(result.label, 1);
        assert!(result.is_fake());
    }

    #[test]
    fn zero_vector_scores_the_bias() {
        let w = weights();
        let model = LogisticRegression::new(&w);
        let p = model.predict(&FeatureVector::zeros(5));
        assert_eq!(p, sigmoid(-1.0));
        assert!((p - 0.2689414213699951).abs() < 1e-15);
    }

    #[test]
    fn threshold_is_inclusive() {
        assert_eq!(ClassificationResult::from_probability(0.5).label, 1);
        assert_eq!(ClassificationResult::from_probability(0.4999999).label, 0);
    }

    #[test]
    fn result_json_shape() {
        let json = serde_json::to_string(&ClassificationResult::from_probability(0.25)).unwrap();
        assert_eq!(json, r#"{"label":0,"probability":0.25}"#);
    }

    #[test]
    fn rejects_bad_weights() {
        assert!(ModelWeights::from_vec(vec![]).is_err());
        let err = ModelWeights::from_vec(vec![1.0, f64::INFINITY]).unwrap_err();
        assert!(err.to_string().contains("position 1"), "{err}");
    }
}
