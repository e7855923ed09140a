mod common;

use std::sync::{Arc, OnceLock};

use common::*;
use fake_news_tfidf::{
    utils::math::sigmoid, AssetStore, ClassificationResult, InferenceService, TextPreprocessor,
};
use proptest::prelude::*;

fn service() -> &'static InferenceService {
    static SERVICE: OnceLock<InferenceService> = OnceLock::new();
    SERVICE.get_or_init(|| {
        let (_fx, config) = Fixture::golden_json();
        let store = AssetStore::load(&config).unwrap();
        InferenceService::with_assets(Arc::new(store))
    })
}

fn article() -> impl Strategy<Value = String> {
    let word = prop_oneof![
        Just("fake".to_string()),
        Just("News".to_string()),
        Just("REPORTS".to_string()),
        Just("running".to_string()),
        Just("truth".to_string()),
        Just("the".to_string()),
        "[a-zA-Z]{1,12}",
        "[0-9!?.,'-]{1,4}",
        "\\PC{1,6}",
    ];
    prop::collection::vec(word, 1..40).prop_map(|words| words.join(" "))
}

proptest! {
    #[test]
    fn probability_is_in_unit_interval(text in article()) {
        let result = service().classify(&text).unwrap();
        prop_assert!((0.0..=1.0).contains(&result.probability));
    }

    #[test]
    fn label_follows_threshold(text in article()) {
        let result = service().classify(&text).unwrap();
        prop_assert_eq!(result.label == 1, result.probability >= 0.5);
        prop_assert_eq!(result, ClassificationResult::from_probability(result.probability));
    }

    #[test]
    fn vector_has_vocabulary_length(text in article()) {
        let vector = service().vectorize(&text).unwrap();
        prop_assert_eq!(vector.len(), golden_vocabulary().len());
        prop_assert!(vector.iter().all(f64::is_finite));
    }

    #[test]
    fn preprocessing_is_deterministic(text in "\\PC{0,200}") {
        let a = TextPreprocessor::new();
        let b = TextPreprocessor::new();
        prop_assert_eq!(a.preprocess(&text), b.preprocess(&text));
        prop_assert_eq!(a.preprocess(&text), a.preprocess(&text));
    }

    #[test]
    fn preprocessed_output_is_lowercase_ascii_words(text in "\\PC{0,200}") {
        let out = TextPreprocessor::new().preprocess(&text);
        prop_assert!(out.chars().all(|c| c.is_ascii_lowercase() || c == ' '));
        prop_assert!(!out.starts_with(' ') && !out.ends_with(' ') && !out.contains("  "));
    }

    #[test]
    fn saturating_sigmoid_stays_finite(z in prop::num::f64::ANY) {
        let p = sigmoid(z);
        if !z.is_nan() {
            prop_assert!(p.is_finite() && (0.0..=1.0).contains(&p));
        }
    }
}
