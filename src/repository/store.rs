//! Read-side store trait for catalog pages.
//!
//! The page handler only talks to this trait, so it can run against the
//! Diesel repository in production and an in-memory store in tests.

use async_trait::async_trait;

use super::pool::DbError;
use crate::models::{CategoryOverview, CategoryTree};

/// Typed fetch functions, one per join shape the catalog pages need.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Category with its subcollections (no subcategories).
    async fn find_category_with_subcollections(
        &self,
        slug: &str,
    ) -> Result<Option<CategoryOverview>, DbError>;

    /// Category with subcollections and their subcategories.
    async fn find_category_tree(&self, slug: &str) -> Result<Option<CategoryTree>, DbError>;

    /// Number of products reachable from the category through
    /// subcollection -> subcategory -> product. Zero for unknown slugs.
    async fn count_products(&self, category_slug: &str) -> Result<i64, DbError>;
}
