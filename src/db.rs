//! Schema bootstrap and connection pool setup

use sqlx::{
    mysql::{MySqlConnectOptions, MySqlPoolOptions},
    Connection, Executor, MySqlConnection, MySqlPool,
};

use crate::{config::DatabaseConfig, error::BootstrapError};

/// Book table, with lookup indexes on title and author. The timestamps are
/// maintained by MySQL and never read back into the model.
pub const CREATE_BOOKS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS books (
    id INT AUTO_INCREMENT PRIMARY KEY,
    title VARCHAR(255) NOT NULL,
    num_pages INT NOT NULL DEFAULT 0,
    author VARCHAR(255) NOT NULL,
    rating DOUBLE NOT NULL DEFAULT 0,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
    updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP ON UPDATE CURRENT_TIMESTAMP,
    INDEX idx_title (title),
    INDEX idx_author (author)
) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4 COLLATE=utf8mb4_unicode_ci
"#;

/// Quote a MySQL identifier with backticks
pub fn quote_identifier(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

/// Options for the server itself, with no database selected
pub fn server_options(config: &DatabaseConfig) -> MySqlConnectOptions {
    MySqlConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .username(&config.user)
        .password(&config.password)
}

/// Options for the configured database
pub fn database_options(config: &DatabaseConfig) -> MySqlConnectOptions {
    server_options(config).database(&config.name)
}

/// Create the database and book table if they are missing.
///
/// Statements go over the text protocol since `USE` cannot be prepared.
pub async fn bootstrap(conn: &mut MySqlConnection, database: &str) -> Result<(), BootstrapError> {
    let ident = quote_identifier(database);

    let create_database = format!("CREATE DATABASE IF NOT EXISTS {}", ident);
    conn.execute(create_database.as_str())
        .await
        .map_err(|source| BootstrapError::CreateDatabase {
            database: database.to_string(),
            source,
        })?;

    let use_database = format!("USE {}", ident);
    conn.execute(use_database.as_str())
        .await
        .map_err(|source| BootstrapError::SelectDatabase {
            database: database.to_string(),
            source,
        })?;

    conn.execute(CREATE_BOOKS_TABLE)
        .await
        .map_err(BootstrapError::CreateTable)?;

    Ok(())
}

/// Bootstrap over a short-lived admin connection, closed before returning
pub async fn bootstrap_server(config: &DatabaseConfig) -> Result<(), BootstrapError> {
    let mut conn = MySqlConnection::connect_with(&server_options(config))
        .await
        .map_err(BootstrapError::Connect)?;

    let result = bootstrap(&mut conn, &config.name).await;

    if let Err(e) = conn.close().await {
        tracing::warn!("Failed to close bootstrap connection: {}", e);
    }
    result
}

/// Open the shared pool against the configured database.
///
/// Fails if the database cannot be reached.
pub async fn connect_pool(config: &DatabaseConfig) -> Result<MySqlPool, sqlx::Error> {
    MySqlPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_with(database_options(config))
        .await
}
