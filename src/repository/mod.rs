//! Repository layer for database operations

pub mod books;

use async_trait::async_trait;

use crate::{
    error::{AppError, AppResult, StoreError},
    models::{Book, BookId},
};

pub use books::BooksRepository;

/// Outcome of a lookup that succeeded at the store level.
///
/// Wrapped in `Result<Lookup<T>, StoreError>`, this gives the three cases a
/// caller has to tell apart: the record, no such record, or a store failure.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T> {
    Found(T),
    NotFound,
}

impl<T> Lookup<T> {
    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }

    pub fn found(self) -> Option<T> {
        match self {
            Lookup::Found(value) => Some(value),
            Lookup::NotFound => None,
        }
    }

    /// Convert the absent case into an HTTP not-found error
    pub fn or_not_found(self, message: &str) -> AppResult<T> {
        self.found()
            .ok_or_else(|| AppError::NotFound(message.to_string()))
    }
}

impl<T> From<Option<T>> for Lookup<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Lookup::NotFound, Lookup::Found)
    }
}

/// Reads and writes of book records.
///
/// Every operation is a single statement against the store. Callers validate
/// books before passing them to `create` or `update`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookStore: Send + Sync {
    /// Insert a book, returning it with its assigned id
    async fn create(&self, book: Book) -> Result<Book, StoreError>;

    /// All books, oldest first
    async fn get_all(&self) -> Result<Vec<Book>, StoreError>;

    async fn get_by_id(&self, id: BookId) -> Result<Lookup<Book>, StoreError>;

    /// Replace every field but the id
    async fn update(&self, id: BookId, book: Book) -> Result<Lookup<Book>, StoreError>;

    /// `true` when a row was removed, `false` when none matched
    async fn delete(&self, id: BookId) -> Result<bool, StoreError>;

    /// Check that the store is reachable
    async fn ping(&self) -> Result<(), StoreError>;
}
