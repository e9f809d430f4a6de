use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use super::validation::{validate_movie, validate_partial_movie};
use super::{ApiError, AppState};
use crate::models::Movie;
use crate::store::MovieFilter;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub genre: Option<String>,
    pub rate: Option<f64>,
}

pub async fn list_movies(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Json<Vec<Movie>> {
    // `?genre=` with an empty value means no genre filter, not "match the
    // empty genre".
    let filter = MovieFilter {
        genre: query.genre.filter(|g| !g.is_empty()),
        min_rate: query.rate,
    };
    Json(state.store.find_all(&filter).await)
}

pub async fn get_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Movie>, ApiError> {
    state
        .store
        .find_by_id(&id)
        .await
        .map(Json)
        .ok_or_else(ApiError::movie_not_found)
}

pub async fn create_movie(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Movie>), ApiError> {
    let new_movie = validate_movie(&body).map_err(ApiError::Validation)?;

    let movie = new_movie.into_movie(Uuid::new_v4());
    let stored = state.store.insert(movie).await;
    debug!(id = %stored.id, title = %stored.title, "created movie");

    Ok((StatusCode::CREATED, Json(stored)))
}

pub async fn update_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<Movie>, ApiError> {
    // Existence before body validity: an unknown id is a single 404 even
    // when the body is also invalid.
    let Some(mut movie) = state.store.find_by_id(&id).await else {
        return Err(ApiError::movie_not_found());
    };

    let patch = validate_partial_movie(&body).map_err(ApiError::Validation)?;
    patch.apply_to(&mut movie);

    state
        .store
        .replace(&id, movie)
        .await
        .map(Json)
        .ok_or_else(ApiError::movie_not_found)
}

pub async fn delete_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    if state.store.remove(&id).await {
        debug!(id = %id, "deleted movie");
        Ok(Json(json!({ "message": "Movie deleted" })))
    } else {
        Err(ApiError::movie_not_found())
    }
}

/// Plain OPTIONS requests get an empty 200; the CORS layer decorates the
/// response and answers real preflights itself.
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}
