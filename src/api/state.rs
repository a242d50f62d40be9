use std::sync::Arc;

use crate::{
    config::Config,
    error::AppResult,
    services::{
        providers::ImdbReviewProvider, RecommendationEngine, ReviewService, SentimentClassifier,
    },
};

/// Shared application state. Everything in it is read-only.
#[derive(Clone)]
pub struct AppState {
    pub engine: RecommendationEngine,
    pub reviews: ReviewService,
}

impl AppState {
    pub fn new(engine: RecommendationEngine, reviews: ReviewService) -> Self {
        Self { engine, reviews }
    }

    /// Builds the state from configuration, loading the sentiment model once
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let classifier =
            SentimentClassifier::load(&config.vectorizer_path, &config.classifier_path);
        let provider =
            ImdbReviewProvider::new(config.review_api_url.clone(), config.review_timeout())?;

        Ok(Self::new(
            RecommendationEngine::new(config.catalog_path.clone()),
            ReviewService::new(Arc::new(provider), classifier),
        ))
    }
}
