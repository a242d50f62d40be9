//! Review data provider abstraction
//!
//! A provider fetches raw review texts for a movie from some remote source.
//! Failures never escape as errors: a provider reports them as
//! `ReviewFetch::Unavailable` so callers can tell "the fetch failed" apart
//! from "there are no reviews".
use crate::models::ReviewFetch;

pub mod imdb;

pub use imdb::ImdbReviewProvider;

/// Trait for review providers
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ReviewSource: Send + Sync {
    /// Fetch review texts for an IMDb id (e.g. "tt1375666")
    async fn fetch(&self, imdb_id: &str) -> ReviewFetch;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
