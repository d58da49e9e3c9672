//! API handlers for the book catalog REST endpoints

pub mod books;
pub mod health;
pub mod openapi;

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::{error::AppError, models::BookId, AppState};

/// Book identifier taken from the `{id}` path segment.
///
/// A segment that is not an integer is rejected as a client error, before any
/// store lookup.
pub struct BookIdParam(pub BookId);

#[async_trait]
impl<S> FromRequestParts<S> for BookIdParam
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::BadRequest("Invalid book ID".to_string()))?;

        raw.parse::<BookId>()
            .map(BookIdParam)
            .map_err(|_| AppError::BadRequest("Invalid book ID".to_string()))
    }
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .route("/books", get(books::list_books).post(books::create_book))
        .route(
            "/books/:id",
            get(books::get_book)
                .put(books::update_book)
                .delete(books::delete_book),
        )
        .with_state(state.clone());

    let static_dir = &state.config.server.static_dir;

    Router::new()
        .nest("/api", api)
        .merge(openapi::create_openapi_router())
        .nest_service("/static", ServeDir::new(static_dir))
        .route_service("/", ServeFile::new(static_dir.join("index.html")))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
