use axum::{
    Router,
    http::{HeaderValue, Method},
    routing::{delete, get, options, patch, post},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::store::MovieStore;

mod error;
mod movies;
pub mod validation;

pub use error::ApiError;
pub use validation::{ErrorKind, FieldError};

#[derive(Clone)]
pub struct AppState {
    pub store: MovieStore,
}

impl AppState {
    #[must_use]
    pub fn new(store: MovieStore) -> Arc<Self> {
        Arc::new(Self { store })
    }
}

/// Builds the application router. The CORS layer echoes the request origin
/// only when it is on the configured allow-list; preflights advertise the
/// four mutating-safe methods of the API.
pub fn router(state: Arc<AppState>, cors_origins: &[String]) -> Router {
    let cors_layer = if cors_origins.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    let cors_layer = cors_layer
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers(Any);

    Router::new()
        .route("/movies", get(movies::list_movies))
        .route("/movies", post(movies::create_movie))
        .route("/movies/{id}", get(movies::get_movie))
        .route("/movies/{id}", patch(movies::update_movie))
        .route("/movies/{id}", delete(movies::delete_movie))
        .route("/movies/{id}", options(movies::preflight))
        .layer(cors_layer)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
