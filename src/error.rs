//! Error types for the book catalog server

use std::collections::BTreeMap;
use std::fmt;

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Repository operation, carried by [`StoreError`] for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    GetAll,
    GetById,
    Update,
    Delete,
    Ping,
}

impl Operation {
    /// Message returned to clients when this operation fails
    pub fn failure_message(self) -> &'static str {
        match self {
            Operation::Create => "Failed to create book",
            Operation::GetAll => "Failed to retrieve books",
            Operation::GetById => "Failed to retrieve book",
            Operation::Update => "Failed to update book",
            Operation::Delete => "Failed to delete book",
            Operation::Ping => "Database unavailable",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Create => "create",
            Operation::GetAll => "get all",
            Operation::GetById => "get by id",
            Operation::Update => "update",
            Operation::Delete => "delete",
            Operation::Ping => "ping",
        };
        f.write_str(name)
    }
}

/// Failure of the backing store while serving a single request
#[derive(Error, Debug)]
#[error("failed to {operation}: {source}")]
pub struct StoreError {
    pub operation: Operation,
    #[source]
    pub source: sqlx::Error,
}

impl StoreError {
    pub fn new(operation: Operation, source: sqlx::Error) -> Self {
        Self { operation, source }
    }
}

/// Fatal failure while preparing the schema at startup
#[derive(Error, Debug)]
pub enum BootstrapError {
    #[error("failed to connect to MySQL server: {0}")]
    Connect(#[source] sqlx::Error),

    #[error("failed to create database {database}: {source}")]
    CreateDatabase {
        database: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("failed to use database {database}: {source}")]
    SelectDatabase {
        database: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("failed to create table: {0}")]
    CreateTable(#[source] sqlx::Error),
}

/// Errors surfaced to HTTP clients
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation failed: {0:?}")]
    Validation(BTreeMap<String, String>),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    /// Field-level messages, present for validation failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<BTreeMap<String, String>>,
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!("Rejected request body: {}", rejection.body_text());
        AppError::BadRequest("Invalid request body".to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, errors) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, None),
            AppError::Validation(fields) => (
                StatusCode::BAD_REQUEST,
                "Validation failed".to_string(),
                Some(fields),
            ),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, None),
            AppError::Store(e) => {
                tracing::error!("Store error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    e.operation.failure_message().to_string(),
                    None,
                )
            }
        };

        (status, Json(ErrorResponse { error, errors })).into_response()
    }
}

/// Result type alias for handler operations
pub type AppResult<T> = Result<T, AppError>;
