use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Sentiment attached to a review
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum SentimentLabel {
    Good,
    Bad,
    /// The sentiment model is not loaded
    Unknown,
}

impl SentimentLabel {
    /// Maps the classifier's binary output: 1 is Good, anything else Bad.
    pub fn from_class(class: u8) -> Self {
        if class == 1 {
            SentimentLabel::Good
        } else {
            SentimentLabel::Bad
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Good => "Good",
            SentimentLabel::Bad => "Bad",
            SentimentLabel::Unknown => "Unknown",
        }
    }
}

impl Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReviewRecord {
    pub text: String,
    pub label: SentimentLabel,
}

/// Outcome of a call to the remote review service
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewFetch {
    Success(Vec<String>),
    Unavailable(String),
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
    Fetched,
    Unavailable,
}

/// Labelled reviews for one movie
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ReviewSet {
    pub status: ReviewStatus,
    pub reviews: Vec<ReviewRecord>,
}

impl ReviewSet {
    pub fn unavailable() -> Self {
        Self {
            status: ReviewStatus::Unavailable,
            reviews: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.reviews.is_empty()
    }
}

// ============================================================================
// Review Service API Types
// ============================================================================

/// Body of `GET /reviews/{imdb_id}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiReviewsResponse {
    #[serde(default)]
    pub reviews: Vec<ApiReview>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiReview {
    #[serde(default)]
    pub full_review: Option<String>,
    #[serde(default)]
    pub short_review: Option<String>,
}

impl ApiReview {
    /// Full text when present, else the short one. Empty strings count as absent.
    pub fn text(self) -> Option<String> {
        self.full_review
            .filter(|text| !text.is_empty())
            .or(self.short_review.filter(|text| !text.is_empty()))
    }
}

impl ApiReviewsResponse {
    pub fn into_texts(self) -> Vec<String> {
        self.reviews.into_iter().filter_map(ApiReview::text).collect()
    }
}
