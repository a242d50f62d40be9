use std::sync::Arc;

use crate::models::{upsert_by_key, ReviewFetch, ReviewRecord, ReviewSet, ReviewStatus};

use super::providers::ReviewSource;
use super::sentiment::SentimentClassifier;

/// Fetches reviews from a provider and labels them with the sentiment model
#[derive(Clone)]
pub struct ReviewService {
    source: Arc<dyn ReviewSource>,
    classifier: SentimentClassifier,
}

impl ReviewService {
    pub fn new(source: Arc<dyn ReviewSource>, classifier: SentimentClassifier) -> Self {
        Self { source, classifier }
    }

    pub fn classifier(&self) -> &SentimentClassifier {
        &self.classifier
    }

    /// Labelled reviews for `imdb_id`. A failed fetch yields an empty,
    /// `Unavailable` set rather than an error.
    pub async fn fetch_reviews(&self, imdb_id: &str) -> ReviewSet {
        match self.source.fetch(imdb_id).await {
            ReviewFetch::Success(texts) => {
                let reviews = label_reviews(texts, &self.classifier);
                tracing::debug!(
                    imdb_id = %imdb_id,
                    reviews = reviews.len(),
                    degraded = self.classifier.is_degraded(),
                    "Reviews labelled"
                );
                ReviewSet {
                    status: ReviewStatus::Fetched,
                    reviews,
                }
            }
            ReviewFetch::Unavailable(_) => ReviewSet::unavailable(),
        }
    }
}

/// Pairs every text with its label. Identical texts collapse into one entry.
pub fn label_reviews(texts: Vec<String>, classifier: &SentimentClassifier) -> Vec<ReviewRecord> {
    let records = texts.into_iter().map(|text| {
        let label = classifier.classify(&text);
        ReviewRecord { text, label }
    });

    upsert_by_key(records, |record| record.text.clone())
}
