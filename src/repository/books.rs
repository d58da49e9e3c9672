//! Books repository backed by MySQL

use async_trait::async_trait;
use sqlx::{Connection, MySqlPool};

use super::{BookStore, Lookup};
use crate::{
    error::{Operation, StoreError},
    models::{Book, BookId},
};

#[derive(Clone)]
pub struct BooksRepository {
    pool: MySqlPool,
}

impl BooksRepository {
    /// Create a repository owning the given connection pool
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }
}

/// Row selection shared by the read paths. `rating` is cast so tables created
/// with a `DECIMAL` rating column decode as `f64` too.
const SELECT_BOOKS: &str =
    "SELECT id, title, num_pages, author, CAST(rating AS DOUBLE) AS rating FROM books";

fn failed(operation: Operation) -> impl FnOnce(sqlx::Error) -> StoreError {
    move |source| StoreError::new(operation, source)
}

#[async_trait]
impl BookStore for BooksRepository {
    async fn create(&self, book: Book) -> Result<Book, StoreError> {
        let result = sqlx::query(
            "INSERT INTO books (title, num_pages, author, rating) VALUES (?, ?, ?, ?)",
        )
        .bind(&book.title)
        .bind(book.num_pages)
        .bind(&book.author)
        .bind(book.rating)
        .execute(&self.pool)
        .await
        .map_err(failed(Operation::Create))?;

        let id = BookId::try_from(result.last_insert_id())
            .map_err(|e| StoreError::new(Operation::Create, sqlx::Error::Decode(Box::new(e))))?;

        tracing::debug!("Created book {}", id);
        Ok(book.with_id(id))
    }

    async fn get_all(&self) -> Result<Vec<Book>, StoreError> {
        let query = format!("{} ORDER BY id", SELECT_BOOKS);
        sqlx::query_as::<_, Book>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(failed(Operation::GetAll))
    }

    async fn get_by_id(&self, id: BookId) -> Result<Lookup<Book>, StoreError> {
        let query = format!("{} WHERE id = ?", SELECT_BOOKS);
        let row = sqlx::query_as::<_, Book>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(failed(Operation::GetById))?;

        Ok(row.into())
    }

    async fn update(&self, id: BookId, book: Book) -> Result<Lookup<Book>, StoreError> {
        let result = sqlx::query(
            "UPDATE books SET title = ?, num_pages = ?, author = ?, rating = ? WHERE id = ?",
        )
        .bind(&book.title)
        .bind(book.num_pages)
        .bind(&book.author)
        .bind(book.rating)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(failed(Operation::Update))?;

        // The driver reports matched rows, so an unchanged record still counts.
        if result.rows_affected() == 0 {
            return Ok(Lookup::NotFound);
        }
        Ok(Lookup::Found(book.with_id(id)))
    }

    async fn delete(&self, id: BookId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM books WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(failed(Operation::Delete))?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        let mut conn = self.pool.acquire().await.map_err(failed(Operation::Ping))?;
        conn.ping().await.map_err(failed(Operation::Ping))
    }
}
