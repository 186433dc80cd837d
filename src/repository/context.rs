//! Database context for managing connections and repository access.
//!
//! The DbContext is the primary entry point for all database operations.
//! It holds the connection pool and hands out repositories that share it.

use std::path::Path;

use diesel_async::SimpleAsyncConnection;

use super::catalog::CatalogRepository;
use super::pool::{DbError, DbPool, SqliteConn};
use crate::with_conn_split;

/// SQLite catalog schema.
const SQLITE_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS categories (
    slug TEXT PRIMARY KEY NOT NULL,
    name TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS subcollections (
    id INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
    name TEXT NOT NULL,
    category_slug TEXT NOT NULL REFERENCES categories(slug) ON DELETE CASCADE
);

CREATE TABLE IF NOT EXISTS subcategories (
    slug TEXT PRIMARY KEY NOT NULL,
    name TEXT NOT NULL,
    subcollection_id INTEGER NOT NULL REFERENCES subcollections(id) ON DELETE CASCADE,
    image_url TEXT
);

CREATE TABLE IF NOT EXISTS products (
    slug TEXT PRIMARY KEY NOT NULL,
    name TEXT NOT NULL,
    subcategory_slug TEXT NOT NULL REFERENCES subcategories(slug) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS subcollections_category_slug_idx ON subcollections(category_slug);
CREATE INDEX IF NOT EXISTS subcategories_subcollection_idx ON subcategories(subcollection_id);
CREATE INDEX IF NOT EXISTS products_subcategory_slug_idx ON products(subcategory_slug);
"#;

/// PostgreSQL catalog schema.
#[cfg(feature = "postgres")]
const POSTGRES_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS categories (
    slug TEXT PRIMARY KEY NOT NULL,
    name TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS subcollections (
    id SERIAL PRIMARY KEY NOT NULL,
    name TEXT NOT NULL,
    category_slug TEXT NOT NULL REFERENCES categories(slug) ON DELETE CASCADE
);

CREATE TABLE IF NOT EXISTS subcategories (
    slug TEXT PRIMARY KEY NOT NULL,
    name TEXT NOT NULL,
    subcollection_id INTEGER NOT NULL REFERENCES subcollections(id) ON DELETE CASCADE,
    image_url TEXT
);

CREATE TABLE IF NOT EXISTS products (
    slug TEXT PRIMARY KEY NOT NULL,
    name TEXT NOT NULL,
    subcategory_slug TEXT NOT NULL REFERENCES subcategories(slug) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS subcollections_category_slug_idx ON subcollections(category_slug);
CREATE INDEX IF NOT EXISTS subcategories_subcollection_idx ON subcategories(subcollection_id);
CREATE INDEX IF NOT EXISTS products_subcategory_slug_idx ON products(subcategory_slug);
"#;

/// Database context that manages the connection pool and provides repository access.
///
/// # Example
/// ```ignore
/// let ctx = DbContext::from_url("postgres://localhost/storefront", 10)?;
/// let overview = ctx.catalog().find_category_with_subcollections("electronics").await?;
/// ```
#[derive(Clone)]
pub struct DbContext {
    pool: DbPool,
}

impl DbContext {
    /// Create a context from a database file path (SQLite only).
    pub fn new(db_path: &Path) -> Self {
        Self {
            pool: DbPool::sqlite_from_path(db_path),
        }
    }

    /// Create a context from a database URL.
    ///
    /// Supports:
    /// - SQLite: file paths or `sqlite:` URLs
    /// - PostgreSQL: `postgres://` or `postgresql://` URLs
    pub fn from_url(url: &str, max_connections: usize) -> Result<Self, DbError> {
        Ok(Self {
            pool: DbPool::from_url(url, max_connections)?,
        })
    }

    /// Get the underlying connection pool.
    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    /// Get a catalog repository.
    pub fn catalog(&self) -> CatalogRepository {
        CatalogRepository::new(self.pool.clone())
    }

    /// Create the catalog tables if they don't exist.
    pub async fn init_schema(&self) -> Result<(), DbError> {
        with_conn_split!(self.pool,
            sqlite: conn => {
                init_sqlite_schema(&mut conn).await
            },
            postgres: conn => {
                init_postgres_schema(&mut conn).await
            }
        )
    }
}

async fn init_sqlite_schema(conn: &mut SqliteConn) -> Result<(), DbError> {
    conn.batch_execute(SQLITE_SCHEMA).await
}

#[cfg(feature = "postgres")]
async fn init_postgres_schema(conn: &mut diesel_async::AsyncPgConnection) -> Result<(), DbError> {
    use diesel_async::RunQueryDsl;

    // One statement per round trip
    for stmt in POSTGRES_SCHEMA.split(';') {
        let stmt = stmt.trim();
        if !stmt.is_empty() {
            diesel::sql_query(stmt).execute(conn).await?;
        }
    }
    Ok(())
}
