pub mod catalog;
pub mod providers;
pub mod recommender;
pub mod reviews;
pub mod sentiment;
pub mod similarity;

pub use catalog::Catalog;
pub use recommender::{recommend, Recommendation, RecommendationEngine, NOT_FOUND_MESSAGE};
pub use reviews::ReviewService;
pub use sentiment::{SentimentClassifier, SentimentModel};
pub use similarity::SimilarityMatrix;
