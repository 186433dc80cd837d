//! Repository layer for database persistence.
//!
//! All database access uses Diesel ORM with compile-time query checking.
//! Supports both SQLite and PostgreSQL backends.

pub mod catalog;
pub mod context;
pub mod models;
pub mod pool;
pub mod seed;
pub mod store;
pub mod util;

pub use catalog::CatalogRepository;
pub use context::DbContext;
pub use pool::{DbError, DbPool};
pub use seed::{CatalogSeed, SeedError, SeedSummary};
pub use store::CatalogStore;
