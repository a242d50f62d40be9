use axum::{
    extract::{Path, Query, State},
    response::Html,
    Extension, Form, Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    middleware::RequestId,
    models::{
        details::DETAILS_VERSION, LegacyDetailsForm, MovieDetails, ReviewRecord, ReviewSet,
        ReviewStatus,
    },
    services::{Recommendation, NOT_FOUND_MESSAGE},
    views,
};

use super::AppState;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct SimilarityForm {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    pub title: String,
}

#[derive(Debug, Serialize)]
pub struct RecommendationsResponse {
    pub title: String,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ReviewsResponse {
    pub imdb_id: String,
    pub status: ReviewStatus,
    pub reviews: Vec<ReviewRecord>,
    pub fetched_at: DateTime<Utc>,
}

// Handlers

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let model = if state.reviews.classifier().is_degraded() {
        "degraded"
    } else {
        "ready"
    };
    Json(json!({ "status": "healthy", "sentiment_model": model }))
}

/// Search page with autocomplete suggestions
pub async fn home(State(state): State<AppState>) -> AppResult<Html<String>> {
    let suggestions = state.engine.suggestions().await?;
    Ok(Html(views::render_home(&suggestions)))
}

/// Plain-text recommendations: titles joined by `---`, or the not-found message
pub async fn similarity(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Form(form): Form<SimilarityForm>,
) -> AppResult<String> {
    tracing::info!(
        request_id = %request_id,
        title = %form.name,
        "Processing similarity request"
    );

    let recommendation = state.engine.recommend(&form.name).await?;
    Ok(recommendation.to_string())
}

/// Detail page from the search page's form post
pub async fn recommend_form(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Form(form): Form<LegacyDetailsForm>,
) -> Html<String> {
    let details = MovieDetails::from(form);

    tracing::info!(
        request_id = %request_id,
        title = %details.title,
        imdb_id = %details.imdb_id,
        cast = details.cast.len(),
        recommendations = details.recommendations.len(),
        "Rendering movie details"
    );

    render_movie_page(&state, details).await
}

/// Detail page from a structured JSON payload
pub async fn recommend_json(
    State(state): State<AppState>,
    Json(details): Json<MovieDetails>,
) -> AppResult<Html<String>> {
    if details.version != DETAILS_VERSION {
        return Err(AppError::InvalidInput(format!(
            "Unsupported payload version {}, expected {}",
            details.version, DETAILS_VERSION
        )));
    }

    Ok(render_movie_page(&state, details.normalized()).await)
}

/// JSON recommendations for a title
pub async fn recommendations(
    State(state): State<AppState>,
    Query(query): Query<RecommendationQuery>,
) -> AppResult<Json<RecommendationsResponse>> {
    match state.engine.recommend(&query.title).await? {
        Recommendation::Found(recommendations) => Ok(Json(RecommendationsResponse {
            title: query.title,
            recommendations,
        })),
        Recommendation::NotFound => Err(AppError::NotFound(NOT_FOUND_MESSAGE.to_string())),
    }
}

/// JSON labelled reviews for an IMDb id
pub async fn reviews(
    State(state): State<AppState>,
    Path(imdb_id): Path<String>,
) -> Json<ReviewsResponse> {
    let set = state.reviews.fetch_reviews(&imdb_id).await;
    Json(ReviewsResponse {
        imdb_id,
        status: set.status,
        reviews: set.reviews,
        fetched_at: Utc::now(),
    })
}

async fn render_movie_page(state: &AppState, details: MovieDetails) -> Html<String> {
    let reviews = if details.imdb_id.trim().is_empty() {
        tracing::debug!(title = %details.title, "No IMDb id, skipping reviews");
        ReviewSet::unavailable()
    } else {
        state.reviews.fetch_reviews(&details.imdb_id).await
    };

    Html(views::render_detail(&details, &reviews))
}
