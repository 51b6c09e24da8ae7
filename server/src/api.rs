use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use log::error;
use serde::{Deserialize, Serialize};
use serde_json::json;
use spotpop_core::leaderboard::{LeaderboardError, RankingStore, LEADERBOARD_CAPACITY};
use spotpop_core::lookup::{LookupError, PopularitySource};
use spotpop_core::models::{ArtistPopularity, RankingEntry};
use spotpop_core::roster::Roster;
use std::sync::Arc;

pub struct AppState {
    pub lookup: Arc<dyn PopularitySource>,
    pub roster: Roster,
    pub store: Arc<dyn RankingStore>,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/popularity", get(popularity))
        .route("/api/ranking", get(top_rankings).post(submit_ranking))
        .route("/api/ranking/check", post(check_high_score))
        .route("/api/ranking/random-artist", get(random_artists))
        .with_state(state)
}

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    Internal,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, message),
            ApiError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<LookupError> for ApiError {
    fn from(e: LookupError) -> Self {
        match e {
            LookupError::EmptyName => ApiError::BadRequest("Artist name is required".to_string()),
            LookupError::NotFound(_) => ApiError::NotFound("Artist not found".to_string()),
            other => {
                error!("Artist lookup failed: {}", other);
                ApiError::Internal
            }
        }
    }
}

impl From<LeaderboardError> for ApiError {
    fn from(e: LeaderboardError) -> Self {
        match e {
            LeaderboardError::EmptyName => ApiError::BadRequest("Name is required".to_string()),
            LeaderboardError::InvalidScore => {
                ApiError::BadRequest("Score must be a non-negative number".to_string())
            }
            other => {
                error!("Leaderboard access failed: {}", other);
                ApiError::Internal
            }
        }
    }
}

#[derive(Deserialize)]
pub struct PopularityParams {
    pub artist: Option<String>,
}

/// `GET /api/popularity?artist=...` -> `{id, name, popularity}`.
async fn popularity(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PopularityParams>,
) -> Result<Json<ArtistPopularity>, ApiError> {
    let name = params.artist.unwrap_or_default();
    if name.trim().is_empty() {
        return Err(ApiError::BadRequest("Artist name is required".to_string()));
    }

    let artist = state.lookup.artist_popularity(&name).await?;
    Ok(Json(artist))
}

#[derive(Deserialize)]
pub struct RandomParams {
    pub count: Option<usize>,
}

#[derive(Serialize)]
pub struct ArtistsResponse {
    pub artists: Vec<ArtistPopularity>,
}

/// `GET /api/ranking/random-artist?count=N` -> `{artists: [...]}`.
/// Defaults to one artist; the roster caps the count at 20.
async fn random_artists(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RandomParams>,
) -> Json<ArtistsResponse> {
    let count = params.count.unwrap_or(1);
    Json(ArtistsResponse {
        artists: state.roster.pick(count),
    })
}

#[derive(Deserialize)]
pub struct CheckRequest {
    pub score: f64,
}

#[derive(Serialize)]
pub struct CheckResponse {
    #[serde(rename = "isHighScore")]
    pub is_high_score: bool,
}

/// `POST /api/ranking/check` with `{score}` -> `{isHighScore}`.
async fn check_high_score(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CheckRequest>,
) -> Result<Json<CheckResponse>, ApiError> {
    let is_high_score = state.store.is_high_score(body.score).await?;
    Ok(Json(CheckResponse { is_high_score }))
}

/// `GET /api/ranking` -> the ten lowest scores, ascending.
async fn top_rankings(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<RankingEntry>>, ApiError> {
    let top = state.store.top(LEADERBOARD_CAPACITY).await?;
    Ok(Json(top))
}

#[derive(Deserialize)]
pub struct SubmitRequest {
    pub name: String,
    pub score: f64,
}

/// `POST /api/ranking` with `{name, score}` -> 201 and the stored record.
async fn submit_ranking(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SubmitRequest>,
) -> Result<(StatusCode, Json<RankingEntry>), ApiError> {
    let entry = state.store.submit(&body.name, body.score).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}
