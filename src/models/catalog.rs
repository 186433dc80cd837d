//! Catalog domain models: categories, subcollections and subcategories.

use serde::{Deserialize, Serialize};

/// Top-level storefront grouping, identified by a unique slug.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub slug: String,
    pub name: String,
}

/// Named grouping of subcategories within a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subcollection {
    pub id: i32,
    pub name: String,
    pub category_slug: String,
}

/// Leaf navigational unit linking to a product listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subcategory {
    pub slug: String,
    pub name: String,
    pub image_url: Option<String>,
    pub subcollection_id: i32,
}

/// A category with its subcollections (no subcategories loaded).
///
/// This is the shape needed for page metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryOverview {
    pub category: Category,
    pub subcollections: Vec<Subcollection>,
}

impl CategoryOverview {
    /// Names of the subcollections, in query order.
    pub fn subcollection_names(&self) -> impl Iterator<Item = &str> {
        self.subcollections.iter().map(|s| s.name.as_str())
    }
}

/// A subcollection together with its subcategories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubcollectionWithSubcategories {
    pub subcollection: Subcollection,
    pub subcategories: Vec<Subcategory>,
}

/// Full category -> subcollection -> subcategory tree used to render a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTree {
    pub category: Category,
    pub subcollections: Vec<SubcollectionWithSubcategories>,
}

impl CategoryTree {
    /// Total number of subcategories across all subcollections.
    pub fn subcategory_count(&self) -> usize {
        self.subcollections
            .iter()
            .map(|s| s.subcategories.len())
            .sum()
    }
}
