use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// CSV file with `movie_title` and `comb` columns
    #[serde(default = "default_catalog_path")]
    pub catalog_path: PathBuf,

    /// Fitted text vectorizer artifact (JSON)
    #[serde(default = "default_vectorizer_path")]
    pub vectorizer_path: PathBuf,

    /// Fitted sentiment classifier artifact (JSON)
    #[serde(default = "default_classifier_path")]
    pub classifier_path: PathBuf,

    /// Review service base URL; reviews are fetched from `{url}/reviews/{imdb_id}`
    #[serde(default = "default_review_api_url")]
    pub review_api_url: String,

    /// Timeout for the review service call. Unset means no timeout.
    #[serde(default)]
    pub review_timeout_secs: Option<u64>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from("main_data.csv")
}

fn default_vectorizer_path() -> PathBuf {
    PathBuf::from("transform.json")
}

fn default_classifier_path() -> PathBuf {
    PathBuf::from("nlp_model.json")
}

fn default_review_api_url() -> String {
    "https://imdb-rest-api.herokuapp.com/api/livescraper".to_string()
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    pub fn review_timeout(&self) -> Option<Duration> {
        self.review_timeout_secs.map(Duration::from_secs)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
