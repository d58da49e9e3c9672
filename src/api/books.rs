//! Book endpoints

use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::WithRejection;

use crate::{
    error::{AppError, AppResult},
    models::Book,
    AppState,
};

use super::BookIdParam;

const NOT_FOUND: &str = "Book not found";

/// Reject invalid input before it reaches the store
fn ensure_valid(book: &Book) -> AppResult<()> {
    let errors = book.validation_errors();
    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(errors))
    }
}

/// List all books, oldest first
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    responses(
        (status = 200, description = "All books ordered by id", body = Vec<Book>),
        (status = 500, description = "Store failure", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_books(State(state): State<AppState>) -> AppResult<Json<Vec<Book>>> {
    let books = state.books.get_all().await?;
    Ok(Json(books))
}

/// Get a book by ID
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 400, description = "Invalid book ID", body = crate::error::ErrorResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    BookIdParam(id): BookIdParam,
) -> AppResult<Json<Book>> {
    let book = state.books.get_by_id(id).await?.or_not_found(NOT_FOUND)?;
    Ok(Json(book))
}

/// Create a book
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = Book,
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    WithRejection(Json(book), _): WithRejection<Json<Book>, AppError>,
) -> AppResult<(StatusCode, Json<Book>)> {
    ensure_valid(&book)?;
    let created = state.books.create(book.with_id(0)).await?;
    tracing::info!("Book {} created", created.id);
    Ok((StatusCode::CREATED, Json(created)))
}

/// Replace a book's fields
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    request_body = Book,
    responses(
        (status = 200, description = "Book updated", body = Book),
        (status = 400, description = "Invalid book ID or input", body = crate::error::ErrorResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    BookIdParam(id): BookIdParam,
    WithRejection(Json(book), _): WithRejection<Json<Book>, AppError>,
) -> AppResult<Json<Book>> {
    ensure_valid(&book)?;
    let updated = state.books.update(id, book).await?.or_not_found(NOT_FOUND)?;
    Ok(Json(updated))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 204, description = "Book deleted"),
        (status = 400, description = "Invalid book ID", body = crate::error::ErrorResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    BookIdParam(id): BookIdParam,
) -> AppResult<StatusCode> {
    if !state.books.delete(id).await? {
        tracing::debug!("Delete of missing book {}", id);
        return Err(AppError::NotFound(NOT_FOUND.to_string()));
    }
    tracing::info!("Book {} deleted", id);
    Ok(StatusCode::NO_CONTENT)
}
