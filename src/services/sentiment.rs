//! Review sentiment from a fitted text vectorizer and binary classifier.
//!
//! Both artifacts are JSON documents produced offline. They are loaded once
//! at startup; if either one is missing or invalid the classifier runs in
//! degraded mode and labels every review `Unknown`.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;

use regex::Regex;
use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    models::SentimentLabel,
};

/// Runs of two or more word characters
const TOKEN_PATTERN: &str = r"\b\w\w+\b";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    L2,
}

#[derive(Debug, Deserialize)]
struct VectorizerArtifact {
    vocabulary: HashMap<String, usize>,
    #[serde(default)]
    idf: Option<Vec<f64>>,
    #[serde(default = "default_lowercase")]
    lowercase: bool,
    #[serde(default)]
    stop_words: Vec<String>,
    #[serde(default = "default_norm")]
    norm: Option<Norm>,
}

fn default_lowercase() -> bool {
    true
}

fn default_norm() -> Option<Norm> {
    Some(Norm::L2)
}

/// Maps text onto the vocabulary learned at training time
#[derive(Debug, Clone)]
pub struct TextVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Option<Vec<f64>>,
    lowercase: bool,
    stop_words: HashSet<String>,
    norm: Option<Norm>,
    token_pattern: Regex,
}

impl TextVectorizer {
    pub fn from_json(json: &str) -> AppResult<Self> {
        let artifact: VectorizerArtifact = serde_json::from_str(json)?;
        Self::try_from(artifact)
    }

    /// Number of features produced by `transform`
    pub fn n_features(&self) -> usize {
        self.vocabulary.len()
    }

    /// Sparse feature vector for `text`, sorted by column.
    /// Tokens outside the vocabulary are ignored.
    pub fn transform(&self, text: &str) -> Vec<(usize, f64)> {
        let text = if self.lowercase {
            text.to_lowercase()
        } else {
            text.to_string()
        };

        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for token in self.token_pattern.find_iter(&text).map(|m| m.as_str()) {
            if self.stop_words.contains(token) {
                continue;
            }
            if let Some(&column) = self.vocabulary.get(token) {
                *counts.entry(column).or_insert(0.0) += 1.0;
            }
        }

        let mut features: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(column, count)| match &self.idf {
                Some(idf) => (column, count * idf[column]),
                None => (column, count),
            })
            .collect();

        if self.norm == Some(Norm::L2) {
            let norm = features.iter().map(|(_, v)| v * v).sum::<f64>().sqrt();
            if norm > 0.0 {
                features.iter_mut().for_each(|(_, v)| *v /= norm);
            }
        }

        features
    }
}

impl TryFrom<VectorizerArtifact> for TextVectorizer {
    type Error = AppError;

    fn try_from(artifact: VectorizerArtifact) -> AppResult<Self> {
        let size = artifact.vocabulary.len();

        if let Some((term, column)) = artifact.vocabulary.iter().find(|&(_, &c)| c >= size) {
            return Err(AppError::ModelLoad(format!(
                "Vocabulary term '{}' has column {} outside 0..{}",
                term, column, size
            )));
        }
        if let Some(idf) = &artifact.idf {
            if idf.len() != size {
                return Err(AppError::ModelLoad(format!(
                    "idf has {} weights for a vocabulary of {}",
                    idf.len(),
                    size
                )));
            }
        }

        let token_pattern =
            Regex::new(TOKEN_PATTERN).map_err(|e| AppError::Internal(e.to_string()))?;

        Ok(Self {
            vocabulary: artifact.vocabulary,
            idf: artifact.idf,
            lowercase: artifact.lowercase,
            stop_words: artifact.stop_words.into_iter().collect(),
            norm: artifact.norm,
            token_pattern,
        })
    }
}

/// Fitted binary classifier. Class 1 is a good review, class 0 a bad one.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BinaryClassifier {
    /// Logistic regression or linear SVM: class 1 when `coef·x + intercept > 0`
    Linear { coef: Vec<f64>, intercept: f64 },
    /// Multinomial naive Bayes over two classes
    MultinomialNb {
        class_log_prior: [f64; 2],
        feature_log_prob: [Vec<f64>; 2],
    },
}

impl BinaryClassifier {
    pub fn from_json(json: &str) -> AppResult<Self> {
        let classifier: BinaryClassifier = serde_json::from_str(json)?;
        if let BinaryClassifier::MultinomialNb { feature_log_prob, .. } = &classifier {
            if feature_log_prob[0].len() != feature_log_prob[1].len() {
                return Err(AppError::ModelLoad(
                    "Naive Bayes classes have different feature counts".to_string(),
                ));
            }
        }
        Ok(classifier)
    }

    pub fn n_features(&self) -> usize {
        match self {
            BinaryClassifier::Linear { coef, .. } => coef.len(),
            BinaryClassifier::MultinomialNb { feature_log_prob, .. } => feature_log_prob[0].len(),
        }
    }

    pub fn predict(&self, features: &[(usize, f64)]) -> u8 {
        match self {
            BinaryClassifier::Linear { coef, intercept } => {
                let score = features
                    .iter()
                    .map(|&(column, value)| coef[column] * value)
                    .sum::<f64>()
                    + intercept;
                u8::from(score > 0.0)
            }
            BinaryClassifier::MultinomialNb {
                class_log_prior,
                feature_log_prob,
            } => {
                let joint = |class: usize| {
                    class_log_prior[class]
                        + features
                            .iter()
                            .map(|&(column, value)| feature_log_prob[class][column] * value)
                            .sum::<f64>()
                };
                u8::from(joint(1) > joint(0))
            }
        }
    }
}

/// A vectorizer and classifier that agree on the feature space
#[derive(Debug, Clone)]
pub struct SentimentModel {
    vectorizer: TextVectorizer,
    classifier: BinaryClassifier,
}

impl SentimentModel {
    pub fn new(vectorizer: TextVectorizer, classifier: BinaryClassifier) -> AppResult<Self> {
        if vectorizer.n_features() != classifier.n_features() {
            return Err(AppError::ModelLoad(format!(
                "Vectorizer produces {} features but classifier expects {}",
                vectorizer.n_features(),
                classifier.n_features()
            )));
        }
        Ok(Self {
            vectorizer,
            classifier,
        })
    }

    pub fn load(vectorizer_path: &Path, classifier_path: &Path) -> AppResult<Self> {
        let vectorizer = TextVectorizer::from_json(&read_artifact(vectorizer_path)?)?;
        let classifier = BinaryClassifier::from_json(&read_artifact(classifier_path)?)?;
        Self::new(vectorizer, classifier)
    }

    pub fn predict(&self, text: &str) -> SentimentLabel {
        let features = self.vectorizer.transform(text);
        SentimentLabel::from_class(self.classifier.predict(&features))
    }
}

fn read_artifact(path: &Path) -> AppResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| AppError::ModelLoad(format!("{}: {}", path.display(), e)))
}

#[derive(Debug)]
pub enum ModelState {
    Ready(SentimentModel),
    /// Artifacts could not be loaded; every review is labelled `Unknown`
    Degraded { reason: String },
}

/// Immutable, shareable handle to the sentiment model
#[derive(Debug, Clone)]
pub struct SentimentClassifier {
    state: Arc<ModelState>,
}

impl SentimentClassifier {
    /// Loads both artifacts, falling back to degraded mode on any failure
    pub fn load(vectorizer_path: &Path, classifier_path: &Path) -> Self {
        match SentimentModel::load(vectorizer_path, classifier_path) {
            Ok(model) => {
                tracing::info!(
                    vectorizer = %vectorizer_path.display(),
                    classifier = %classifier_path.display(),
                    features = model.vectorizer.n_features(),
                    "Sentiment model loaded"
                );
                Self::from_model(model)
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "Sentiment model unavailable, reviews will be labelled Unknown"
                );
                Self::degraded(e.to_string())
            }
        }
    }

    pub fn from_model(model: SentimentModel) -> Self {
        Self {
            state: Arc::new(ModelState::Ready(model)),
        }
    }

    pub fn degraded(reason: impl Into<String>) -> Self {
        Self {
            state: Arc::new(ModelState::Degraded {
                reason: reason.into(),
            }),
        }
    }

    pub fn state(&self) -> &ModelState {
        &self.state
    }

    pub fn is_degraded(&self) -> bool {
        matches!(*self.state, ModelState::Degraded { .. })
    }

    pub fn classify(&self, text: &str) -> SentimentLabel {
        match &*self.state {
            ModelState::Ready(model) => model.predict(text),
            ModelState::Degraded { .. } => SentimentLabel::Unknown,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    pub(crate) fn count_vectorizer_json() -> String {
        json!({
            "vocabulary": {"great": 0, "terrible": 1, "movie": 2, "boring": 3},
            "norm": null
        })
        .to_string()
    }

    pub(crate) fn linear_classifier_json() -> String {
        json!({
            "kind": "linear",
            "coef": [2.0, -2.0, 0.0, -1.0],
            "intercept": 0.0
        })
        .to_string()
    }

    pub(crate) fn linear_model() -> SentimentModel {
        SentimentModel::new(
            TextVectorizer::from_json(&count_vectorizer_json()).unwrap(),
            BinaryClassifier::from_json(&linear_classifier_json()).unwrap(),
        )
        .unwrap()
    }

    fn naive_bayes_model() -> SentimentModel {
        let ln = f64::ln;
        let vectorizer = TextVectorizer::from_json(
            &json!({
                "vocabulary": {"great": 0, "terrible": 1, "movie": 2},
                "idf": [1.5, 1.5, 1.0],
                "stop_words": ["the"]
            })
            .to_string(),
        )
        .unwrap();
        let classifier = BinaryClassifier::from_json(
            &json!({
                "kind": "multinomial_nb",
                "class_log_prior": [ln(0.5), ln(0.5)],
                "feature_log_prob": [
                    [ln(0.1), ln(0.8), ln(0.1)],
                    [ln(0.8), ln(0.1), ln(0.1)]
                ]
            })
            .to_string(),
        )
        .unwrap();
        SentimentModel::new(vectorizer, classifier).unwrap()
    }

    #[test]
    fn test_transform_ignores_unknown_and_short_tokens() {
        let vectorizer = TextVectorizer::from_json(&count_vectorizer_json()).unwrap();
        let features = vectorizer.transform("A GREAT movie, a great cast... I loved it!");
        assert_eq!(features, vec![(0, 2.0), (2, 1.0)]);
    }

    #[test]
    fn test_transform_applies_idf_and_l2_norm() {
        let vectorizer = TextVectorizer::from_json(
            &json!({"vocabulary": {"good": 0, "plot": 1}, "idf": [3.0, 4.0]}).to_string(),
        )
        .unwrap();
        let features = vectorizer.transform("good plot");
        assert_eq!(features.len(), 2);
        assert!((features[0].1 - 0.6).abs() < 1e-12);
        assert!((features[1].1 - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_stop_words_are_dropped() {
        let vectorizer = TextVectorizer::from_json(
            &json!({"vocabulary": {"the": 0, "film": 1}, "stop_words": ["the"], "norm": null})
                .to_string(),
        )
        .unwrap();
        assert_eq!(vectorizer.transform("the film the end"), vec![(1, 1.0)]);
    }

    #[test]
    fn test_vocabulary_column_out_of_range() {
        let result = TextVectorizer::from_json(&json!({"vocabulary": {"a": 0, "b": 5}}).to_string());
        assert!(matches!(result, Err(AppError::ModelLoad(_))));
    }

    #[test]
    fn test_idf_length_mismatch() {
        let result = TextVectorizer::from_json(
            &json!({"vocabulary": {"aa": 0, "bb": 1}, "idf": [1.0]}).to_string(),
        );
        assert!(matches!(result, Err(AppError::ModelLoad(_))));
    }

    #[test]
    fn test_feature_count_mismatch_is_rejected() {
        let vectorizer = TextVectorizer::from_json(&count_vectorizer_json()).unwrap();
        let classifier = BinaryClassifier::from_json(
            &json!({"kind": "linear", "coef": [1.0], "intercept": 0.0}).to_string(),
        )
        .unwrap();
        assert!(SentimentModel::new(vectorizer, classifier).is_err());
    }

    #[test]
    fn test_unknown_classifier_kind() {
        let result = BinaryClassifier::from_json(r#"{"kind": "random_forest"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_linear_model_labels() {
        let model = linear_model();
        assert_eq!(model.predict("What a great movie"), SentimentLabel::Good);
        assert_eq!(model.predict("Terrible and boring"), SentimentLabel::Bad);
        // Zero score is not positive
        assert_eq!(model.predict("just a movie"), SentimentLabel::Bad);
        assert_eq!(model.predict(""), SentimentLabel::Bad);
    }

    #[test]
    fn test_naive_bayes_model_labels() {
        let model = naive_bayes_model();
        assert_eq!(model.predict("The movie was great"), SentimentLabel::Good);
        assert_eq!(model.predict("the movie was terrible"), SentimentLabel::Bad);
        // Equal likelihoods resolve to class 0
        assert_eq!(model.predict("nothing known here"), SentimentLabel::Bad);
    }

    #[test]
    fn test_classify_is_deterministic() {
        let classifier = SentimentClassifier::from_model(linear_model());
        let text = "A great movie with a boring middle act";
        let first = classifier.classify(text);
        for _ in 0..10 {
            assert_eq!(classifier.classify(text), first);
        }
        assert!(!classifier.is_degraded());
    }

    #[test]
    fn test_degraded_classifier_is_always_unknown() {
        let classifier = SentimentClassifier::degraded("artifacts missing");
        assert!(classifier.is_degraded());
        assert_eq!(classifier.classify("great movie"), SentimentLabel::Unknown);
        assert_eq!(classifier.classify("terrible movie"), SentimentLabel::Unknown);
        assert_eq!(classifier.classify(""), SentimentLabel::Unknown);
    }

    #[test]
    fn test_load_missing_artifacts_degrades() {
        let classifier = SentimentClassifier::load(
            Path::new("/nonexistent/transform.json"),
            Path::new("/nonexistent/nlp_model.json"),
        );
        assert!(classifier.is_degraded());
        assert!(matches!(
            classifier.state(),
            ModelState::Degraded { reason } if reason.contains("transform.json")
        ));
    }

    #[test]
    fn test_load_corrupt_classifier_degrades() {
        let mut vectorizer = tempfile::NamedTempFile::new().unwrap();
        vectorizer.write_all(count_vectorizer_json().as_bytes()).unwrap();
        let mut classifier = tempfile::NamedTempFile::new().unwrap();
        classifier.write_all(b"\x80\x04\x95 not json").unwrap();

        let loaded = SentimentClassifier::load(vectorizer.path(), classifier.path());
        assert!(loaded.is_degraded());
    }

    #[test]
    fn test_load_valid_artifacts() {
        let mut vectorizer = tempfile::NamedTempFile::new().unwrap();
        vectorizer.write_all(count_vectorizer_json().as_bytes()).unwrap();
        let mut classifier = tempfile::NamedTempFile::new().unwrap();
        classifier.write_all(linear_classifier_json().as_bytes()).unwrap();

        let loaded = SentimentClassifier::load(vectorizer.path(), classifier.path());
        assert!(!loaded.is_degraded());
        assert_eq!(loaded.classify("great"), SentimentLabel::Good);
    }
}
