//! Diesel-backed catalog repository.
//!
//! Read queries back the category pages through [`CatalogStore`]; the insert
//! helpers exist for catalog seeding.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use super::models::{
    CategoryRecord, NewCategory, NewProduct, NewSubcategory, NewSubcollection, SubcategoryRecord,
    SubcollectionRecord,
};
use super::pool::{DbError, DbPool};
use super::store::CatalogStore;
use crate::models::{CategoryOverview, CategoryTree, SubcollectionWithSubcategories};
use crate::schema::{categories, products, subcategories, subcollections};
use crate::with_conn;

/// Catalog repository over the shared connection pool.
#[derive(Clone)]
pub struct CatalogRepository {
    pool: DbPool,
}

impl CatalogRepository {
    /// Create a new catalog repository with an existing pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Insert a category.
    pub async fn insert_category(&self, slug: &str, name: &str) -> Result<(), DbError> {
        with_conn!(self.pool, conn => {
            diesel::insert_into(categories::table)
                .values(&NewCategory { slug, name })
                .execute(&mut conn)
                .await?;
            Ok(())
        })
    }

    /// Insert a subcollection and return its generated id.
    pub async fn insert_subcollection(
        &self,
        category_slug: &str,
        name: &str,
    ) -> Result<i32, DbError> {
        with_conn!(self.pool, conn => {
            diesel::insert_into(subcollections::table)
                .values(&NewSubcollection { name, category_slug })
                .execute(&mut conn)
                .await?;

            // Newest matching row carries the generated id
            subcollections::table
                .filter(subcollections::category_slug.eq(category_slug))
                .filter(subcollections::name.eq(name))
                .order(subcollections::id.desc())
                .select(subcollections::id)
                .first::<i32>(&mut conn)
                .await
        })
    }

    /// Insert a subcategory under a subcollection.
    pub async fn insert_subcategory(
        &self,
        subcollection_id: i32,
        slug: &str,
        name: &str,
        image_url: Option<&str>,
    ) -> Result<(), DbError> {
        with_conn!(self.pool, conn => {
            diesel::insert_into(subcategories::table)
                .values(&NewSubcategory {
                    slug,
                    name,
                    subcollection_id,
                    image_url,
                })
                .execute(&mut conn)
                .await?;
            Ok(())
        })
    }

    /// Insert a product under a subcategory.
    pub async fn insert_product(
        &self,
        subcategory_slug: &str,
        slug: &str,
        name: &str,
    ) -> Result<(), DbError> {
        with_conn!(self.pool, conn => {
            diesel::insert_into(products::table)
                .values(&NewProduct {
                    slug,
                    name,
                    subcategory_slug,
                })
                .execute(&mut conn)
                .await?;
            Ok(())
        })
    }

    /// Count all categories.
    pub async fn category_count(&self) -> Result<u64, DbError> {
        use diesel::dsl::count_star;
        with_conn!(self.pool, conn => {
            let count: i64 = categories::table
                .select(count_star())
                .get_result(&mut conn)
                .await?;
            Ok(count as u64)
        })
    }
}

#[async_trait]
impl CatalogStore for CatalogRepository {
    async fn find_category_with_subcollections(
        &self,
        slug: &str,
    ) -> Result<Option<CategoryOverview>, DbError> {
        with_conn!(self.pool, conn => {
            let Some(category) = categories::table
                .filter(categories::slug.eq(slug))
                .order(categories::name.asc())
                .select(CategoryRecord::as_select())
                .first::<CategoryRecord>(&mut conn)
                .await
                .optional()?
            else {
                return Ok(None);
            };

            let subcollections = subcollections::table
                .filter(subcollections::category_slug.eq(&category.slug))
                .order(subcollections::id.asc())
                .select(SubcollectionRecord::as_select())
                .load::<SubcollectionRecord>(&mut conn)
                .await?;

            Ok(Some(CategoryOverview {
                category: category.into(),
                subcollections: subcollections.into_iter().map(Into::into).collect(),
            }))
        })
    }

    async fn find_category_tree(&self, slug: &str) -> Result<Option<CategoryTree>, DbError> {
        with_conn!(self.pool, conn => {
            let Some(category) = categories::table
                .filter(categories::slug.eq(slug))
                .order(categories::name.asc())
                .select(CategoryRecord::as_select())
                .first::<CategoryRecord>(&mut conn)
                .await
                .optional()?
            else {
                return Ok(None);
            };

            let subcollections = subcollections::table
                .filter(subcollections::category_slug.eq(&category.slug))
                .order(subcollections::id.asc())
                .select(SubcollectionRecord::as_select())
                .load::<SubcollectionRecord>(&mut conn)
                .await?;

            // Storage order within each subcollection
            let subcategories = SubcategoryRecord::belonging_to(&subcollections)
                .select(SubcategoryRecord::as_select())
                .load::<SubcategoryRecord>(&mut conn)
                .await?;

            let grouped = subcategories.grouped_by(&subcollections);

            Ok(Some(CategoryTree {
                category: category.into(),
                subcollections: subcollections
                    .into_iter()
                    .zip(grouped)
                    .map(|(subcollection, subcategories)| SubcollectionWithSubcategories {
                        subcollection: subcollection.into(),
                        subcategories: subcategories.into_iter().map(Into::into).collect(),
                    })
                    .collect(),
            }))
        })
    }

    async fn count_products(&self, category_slug: &str) -> Result<i64, DbError> {
        use diesel::dsl::count_star;
        with_conn!(self.pool, conn => {
            products::table
                .inner_join(subcategories::table.inner_join(subcollections::table))
                .filter(subcollections::category_slug.eq(category_slug))
                .select(count_star())
                .get_result::<i64>(&mut conn)
                .await
        })
    }
}
