use std::fmt::Display;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use crate::error::{AppError, AppResult};

use super::catalog::Catalog;
use super::similarity::SimilarityMatrix;

/// Text returned to the user when a title is not in the catalog
pub const NOT_FOUND_MESSAGE: &str = "Sorry! Try another movie name.";

/// Maximum number of recommended titles
pub const MAX_RECOMMENDATIONS: usize = 10;

/// Separator used by the plain-text similarity endpoint
pub const TITLE_SEPARATOR: &str = "---";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recommendation {
    /// Titles ranked by similarity, best first
    Found(Vec<String>),
    NotFound,
}

impl Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Recommendation::Found(titles) => f.write_str(&titles.join(TITLE_SEPARATOR)),
            Recommendation::NotFound => f.write_str(NOT_FOUND_MESSAGE),
        }
    }
}

/// Ranks every other movie by similarity to `title` and keeps the top ten.
///
/// Ties keep catalog order. Rows carrying the queried title are never
/// returned. A title whose row lies outside `matrix` is not found.
pub fn recommend(title: &str, catalog: &Catalog, matrix: &SimilarityMatrix) -> Recommendation {
    let Some(index) = catalog
        .position(title)
        .filter(|&index| index < matrix.dim())
    else {
        return Recommendation::NotFound;
    };
    let needle = title.to_lowercase();

    let mut ranked: Vec<(usize, f64)> = matrix.row(index).iter().copied().enumerate().collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

    let titles = ranked
        .into_iter()
        .filter_map(|(i, _)| catalog.title(i))
        .filter(|candidate| candidate.to_lowercase() != needle)
        .take(MAX_RECOMMENDATIONS)
        .map(str::to_string)
        .collect();

    Recommendation::Found(titles)
}

/// Loads the catalog and rebuilds the similarity matrix on every lookup
#[derive(Debug, Clone)]
pub struct RecommendationEngine {
    catalog_path: Arc<PathBuf>,
}

impl RecommendationEngine {
    pub fn new(catalog_path: impl Into<PathBuf>) -> Self {
        Self {
            catalog_path: Arc::new(catalog_path.into()),
        }
    }

    pub async fn recommend(&self, title: &str) -> AppResult<Recommendation> {
        let path = self.catalog_path.clone();
        let query = title.to_string();

        let recommendation = tokio::task::spawn_blocking(move || -> AppResult<Recommendation> {
            let start = Instant::now();
            let catalog = Catalog::load(path.as_path())?;
            let matrix = SimilarityMatrix::build(&catalog);
            let recommendation = recommend(&query, &catalog, &matrix);

            tracing::info!(
                title = %query,
                movies = catalog.len(),
                found = matches!(recommendation, Recommendation::Found(_)),
                elapsed_ms = start.elapsed().as_millis() as u64,
                "Recommendation lookup completed"
            );

            Ok(recommendation)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

        Ok(recommendation)
    }

    pub async fn suggestions(&self) -> AppResult<Vec<String>> {
        let path = self.catalog_path.clone();
        tokio::task::spawn_blocking(move || Catalog::load(path.as_path()).map(|c| c.suggestions()))
            .await
            .map_err(|e| AppError::Internal(e.to_string()))?
    }
}
