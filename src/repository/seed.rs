//! Catalog seeding from a description file.
//!
//! The file nests categories -> subcollections -> subcategories -> products
//! and may be JSON, TOML or YAML (picked by extension, JSON otherwise).

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use super::catalog::CatalogRepository;
use super::pool::DbError;

/// Errors while loading or applying a seed file.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Failed to read seed file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse seed file: {0}")]
    Parse(String),
    #[error("Database error: {0}")]
    Database(#[from] DbError),
}

/// Root of a seed file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogSeed {
    #[serde(default)]
    pub categories: Vec<CategorySeed>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CategorySeed {
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub subcollections: Vec<SubcollectionSeed>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubcollectionSeed {
    pub name: String,
    #[serde(default)]
    pub subcategories: Vec<SubcategorySeed>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubcategorySeed {
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub products: Vec<ProductSeed>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProductSeed {
    pub slug: String,
    pub name: String,
}

/// Row counts written by [`CatalogSeed::apply`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub categories: usize,
    pub subcollections: usize,
    pub subcategories: usize,
    pub products: usize,
}

impl CatalogSeed {
    /// Parse seed contents; `ext` selects the format.
    pub fn parse(contents: &str, ext: &str) -> Result<Self, SeedError> {
        match ext {
            "toml" => toml::from_str(contents).map_err(|e| SeedError::Parse(e.to_string())),
            "yaml" | "yml" => {
                serde_yaml::from_str(contents).map_err(|e| SeedError::Parse(e.to_string()))
            }
            _ => serde_json::from_str(contents).map_err(|e| SeedError::Parse(e.to_string())),
        }
    }

    /// Load a seed file from disk.
    pub async fn load_from_path(path: &Path) -> Result<Self, SeedError> {
        let contents = tokio::fs::read_to_string(path).await?;
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");
        Self::parse(&contents, ext)
    }

    /// Write the whole catalog. Stops at the first database error.
    pub async fn apply(&self, repo: &CatalogRepository) -> Result<SeedSummary, SeedError> {
        let mut summary = SeedSummary::default();

        for category in &self.categories {
            repo.insert_category(&category.slug, &category.name).await?;
            summary.categories += 1;

            for subcollection in &category.subcollections {
                let subcollection_id = repo
                    .insert_subcollection(&category.slug, &subcollection.name)
                    .await?;
                summary.subcollections += 1;

                for subcategory in &subcollection.subcategories {
                    repo.insert_subcategory(
                        subcollection_id,
                        &subcategory.slug,
                        &subcategory.name,
                        subcategory.image_url.as_deref(),
                    )
                    .await?;
                    summary.subcategories += 1;

                    for product in &subcategory.products {
                        repo.insert_product(&subcategory.slug, &product.slug, &product.name)
                            .await?;
                        summary.products += 1;
                    }
                }
            }

            tracing::debug!("Seeded category {}", category.slug);
        }

        Ok(summary)
    }
}
