//! IMDb review scraper provider
//!
//! Talks to a live-scraper REST service that returns the user reviews of a
//! title as JSON:
//!
//! `GET {api_url}/reviews/{imdb_id}` → `{ "reviews": [ { "full_review", "short_review", ... } ] }`
use std::time::Duration;

use reqwest::Client as HttpClient;

use crate::{
    error::{AppError, AppResult},
    models::{review::ApiReviewsResponse, ReviewFetch},
    services::providers::ReviewSource,
};

#[derive(Clone)]
pub struct ImdbReviewProvider {
    http_client: HttpClient,
    api_url: String,
}

impl ImdbReviewProvider {
    /// Creates a provider. Without `timeout` a hanging service blocks the
    /// request indefinitely.
    pub fn new(api_url: impl Into<String>, timeout: Option<Duration>) -> AppResult<Self> {
        let mut builder = HttpClient::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http_client: builder.build()?,
            api_url: api_url.into(),
        })
    }

    fn reviews_url(&self, imdb_id: &str) -> String {
        format!("{}/reviews/{}", self.api_url.trim_end_matches('/'), imdb_id)
    }

    async fn request_reviews(&self, imdb_id: &str) -> AppResult<Vec<String>> {
        let url = self.reviews_url(imdb_id);
        tracing::debug!(url = %url, "Fetching reviews");

        let response = self.http_client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(AppError::ExternalApi(format!(
                "Review API returned status {}",
                status
            )));
        }

        let body = response.text().await?;
        if body.is_empty() {
            return Ok(Vec::new());
        }

        let payload: ApiReviewsResponse = serde_json::from_str(&body).map_err(|e| {
            tracing::debug!(error = %e, response = %body, "Undecodable review response");
            AppError::ExternalApi(format!("Failed to parse review response: {}", e))
        })?;

        Ok(payload.into_texts())
    }
}

#[async_trait::async_trait]
impl ReviewSource for ImdbReviewProvider {
    async fn fetch(&self, imdb_id: &str) -> ReviewFetch {
        match self.request_reviews(imdb_id).await {
            Ok(texts) => {
                tracing::info!(
                    imdb_id = %imdb_id,
                    reviews = texts.len(),
                    provider = self.name(),
                    "Reviews fetched"
                );
                ReviewFetch::Success(texts)
            }
            Err(e) => {
                tracing::warn!(
                    imdb_id = %imdb_id,
                    error = %e,
                    provider = self.name(),
                    "Review fetch failed"
                );
                ReviewFetch::Unavailable(e.to_string())
            }
        }
    }

    fn name(&self) -> &'static str {
        "imdb"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::get, Router};

    async fn spawn_server(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn provider(api_url: String) -> ImdbReviewProvider {
        ImdbReviewProvider::new(api_url, Some(Duration::from_secs(5))).unwrap()
    }

    #[test]
    fn test_reviews_url() {
        let provider = ImdbReviewProvider::new("http://test.local/api/", None).unwrap();
        assert_eq!(
            provider.reviews_url("tt1375666"),
            "http://test.local/api/reviews/tt1375666"
        );
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let router = Router::new().route(
            "/reviews/:imdb_id",
            get(|| async {
                r#"{"reviews": [
                    {"full_review": "Mind-bending and brilliant", "short_review": "Brilliant"},
                    {"short_review": "Too long"},
                    {"rating": 3}
                ]}"#
            }),
        );
        let url = spawn_server(router).await;

        let result = provider(url).fetch("tt1375666").await;
        assert_eq!(
            result,
            ReviewFetch::Success(vec![
                "Mind-bending and brilliant".to_string(),
                "Too long".to_string()
            ])
        );
    }

    #[tokio::test]
    async fn test_fetch_empty_body_has_no_reviews() {
        let router = Router::new().route("/reviews/:imdb_id", get(|| async { "" }));
        let url = spawn_server(router).await;

        assert_eq!(provider(url).fetch("tt0").await, ReviewFetch::Success(vec![]));
    }

    #[tokio::test]
    async fn test_fetch_non_success_status() {
        let router = Router::new().route(
            "/reviews/:imdb_id",
            get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "down for maintenance") }),
        );
        let url = spawn_server(router).await;

        let result = provider(url).fetch("tt1375666").await;
        assert!(matches!(result, ReviewFetch::Unavailable(reason) if reason.contains("503")));
    }

    #[tokio::test]
    async fn test_fetch_invalid_json() {
        let router = Router::new().route(
            "/reviews/:imdb_id",
            get(|| async { "<html>Application Error</html>" }),
        );
        let url = spawn_server(router).await;

        let result = provider(url).fetch("tt1375666").await;
        assert!(matches!(result, ReviewFetch::Unavailable(_)));
    }

    #[tokio::test]
    async fn test_fetch_network_error() {
        // Bind then drop to get a port nothing listens on
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let result = provider(format!("http://{}", addr)).fetch("tt1375666").await;
        assert!(matches!(result, ReviewFetch::Unavailable(_)));
    }

    #[tokio::test]
    async fn test_fetch_timeout() {
        let router = Router::new().route(
            "/reviews/:imdb_id",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                r#"{"reviews": []}"#
            }),
        );
        let url = spawn_server(router).await;

        let provider = ImdbReviewProvider::new(url, Some(Duration::from_millis(100))).unwrap();
        let result = provider.fetch("tt1375666").await;
        assert!(matches!(result, ReviewFetch::Unavailable(_)));
    }
}
