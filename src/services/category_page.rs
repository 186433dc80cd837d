//! Category page handler.
//!
//! Turns a category path parameter into the two outputs of a category page:
//! SEO metadata and the subcategory navigation grid. Each entry point runs
//! its own queries against the injected [`CatalogStore`]; nothing is shared
//! between them.

use std::borrow::Cow;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use crate::models::{CategoryTree, Subcategory};
use crate::repository::{CatalogStore, DbError};

/// Brand appended to page titles.
pub const DEFAULT_SITE_NAME: &str = "NextMaster";

/// Image shown on tiles whose subcategory has no picture.
pub const PLACEHOLDER_IMAGE: &str = "/placeholder.svg";

/// Tile image width and height in CSS pixels.
pub const TILE_IMAGE_SIZE: u32 = 48;

/// How many subcollection names go into the metadata description.
const EXCERPT_LEN: usize = 2;

/// Errors from the category page handler.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Category not found: {0}")]
    NotFound(String),
    #[error("Database error: {0}")]
    Database(#[from] DbError),
}

/// Open Graph fields of the page metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpenGraph {
    pub title: String,
    pub description: String,
}

/// SEO metadata for a category page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageMetadata {
    pub title: String,
    #[serde(rename = "openGraph")]
    pub open_graph: OpenGraph,
}

/// One subcategory tile in the navigation grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tile {
    pub image_url: String,
    pub alt_text: String,
    pub href: String,
    pub label: String,
}

/// A subcollection heading with its tiles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub name: String,
    pub tiles: Vec<Tile>,
}

/// Rendered content of a category page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryPage {
    pub category_slug: String,
    pub category_name: String,
    pub product_count: i64,
    pub sections: Vec<Section>,
}

impl CategoryPage {
    /// "{count} Products", or None when there are no products.
    pub fn count_heading(&self) -> Option<String> {
        (self.product_count > 0).then(|| format!("{} Products", self.product_count))
    }
}

/// Percent-decode a path parameter. A malformed escape leaves the raw value.
pub fn decode_slug(param: &str) -> String {
    urlencoding::decode(param)
        .unwrap_or(Cow::Borrowed(param))
        .into_owned()
}

/// Join the first two subcollection names with ", ".
///
/// A trailing comma is added whenever the category has more than one
/// subcollection in total, including when exactly two are listed.
pub fn subcollection_excerpt<'a>(names: impl IntoIterator<Item = &'a str>, total: usize) -> String {
    let mut excerpt = names
        .into_iter()
        .take(EXCERPT_LEN)
        .collect::<Vec<_>>()
        .join(", ");
    if total > 1 {
        excerpt.push(',');
    }
    excerpt
}

/// Serves both outputs of a category page from an injected store.
#[derive(Clone)]
pub struct CategoryPageHandler {
    store: Arc<dyn CatalogStore>,
    site_name: String,
    placeholder_image: String,
}

impl CategoryPageHandler {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self {
            store,
            site_name: DEFAULT_SITE_NAME.to_string(),
            placeholder_image: PLACEHOLDER_IMAGE.to_string(),
        }
    }

    /// Override the brand used in page titles.
    pub fn with_site_name(mut self, site_name: impl Into<String>) -> Self {
        self.site_name = site_name.into();
        self
    }

    /// Override the tile fallback image.
    pub fn with_placeholder_image(mut self, placeholder_image: impl Into<String>) -> Self {
        self.placeholder_image = placeholder_image.into();
        self
    }

    pub fn site_name(&self) -> &str {
        &self.site_name
    }

    /// Build the title and Open Graph description for a category.
    pub async fn generate_metadata(
        &self,
        category_param: &str,
    ) -> Result<PageMetadata, CatalogError> {
        let slug = decode_slug(category_param);
        tracing::debug!("Generating metadata for category {}", slug);

        let overview = self
            .store
            .find_category_with_subcollections(&slug)
            .await?
            .ok_or(CatalogError::NotFound(slug))?;

        let name = &overview.category.name;
        let excerpt =
            subcollection_excerpt(overview.subcollection_names(), overview.subcollections.len());
        let title = format!("{} | {}", name, self.site_name);

        Ok(PageMetadata {
            title: title.clone(),
            open_graph: OpenGraph {
                title,
                description: format!(
                    "Choose from our selection of {}, including {} and more. In stock and ready to ship.",
                    name, excerpt
                ),
            },
        })
    }

    /// Fetch the category tree and product count, and lay out the page.
    ///
    /// Tile links embed `category_param` exactly as received (still
    /// percent-encoded), not the decoded slug.
    pub async fn render_page(&self, category_param: &str) -> Result<CategoryPage, CatalogError> {
        let slug = decode_slug(category_param);
        tracing::debug!("Rendering page for category {}", slug);

        let (tree, count) = tokio::join!(
            self.store.find_category_tree(&slug),
            self.store.count_products(&slug),
        );

        let tree = tree?.ok_or_else(|| CatalogError::NotFound(slug.clone()))?;
        let product_count = count?;
        tracing::debug!(
            "Category {} has {} subcategories and {} products",
            slug,
            tree.subcategory_count(),
            product_count
        );

        Ok(self.layout(category_param, tree, product_count))
    }

    fn layout(&self, category_param: &str, tree: CategoryTree, product_count: i64) -> CategoryPage {
        let sections = tree
            .subcollections
            .into_iter()
            .map(|entry| Section {
                name: entry.subcollection.name,
                tiles: entry
                    .subcategories
                    .iter()
                    .map(|subcategory| self.tile(category_param, subcategory))
                    .collect(),
            })
            .collect();

        CategoryPage {
            category_slug: tree.category.slug,
            category_name: tree.category.name,
            product_count,
            sections,
        }
    }

    fn tile(&self, category_param: &str, subcategory: &Subcategory) -> Tile {
        Tile {
            image_url: subcategory
                .image_url
                .clone()
                .unwrap_or_else(|| self.placeholder_image.clone()),
            alt_text: format!("A small picture of {}", subcategory.name),
            href: format!("/products/{}/{}", category_param, subcategory.slug),
            label: subcategory.name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Category, CategoryOverview, Subcollection, SubcollectionWithSubcategories,
    };
    use crate::repository::util::to_diesel_error;
    use async_trait::async_trait;
    use std::collections::HashMap;

    /// In-memory store keyed by category slug.
    #[derive(Default)]
    struct MemoryStore {
        trees: HashMap<String, CategoryTree>,
        product_counts: HashMap<String, i64>,
        broken: bool,
    }

    impl MemoryStore {
        fn with_category(
            mut self,
            slug: &str,
            name: &str,
            subcollections: Vec<(&str, Vec<&str>)>,
        ) -> Self {
            let subcollections = subcollections
                .into_iter()
                .enumerate()
                .map(|(i, (name, subcategories))| SubcollectionWithSubcategories {
                    subcollection: Subcollection {
                        id: i as i32 + 1,
                        name: name.to_string(),
                        category_slug: slug.to_string(),
                    },
                    subcategories: subcategories
                        .iter()
                        .map(|sub| Subcategory {
                            slug: sub.to_string(),
                            name: sub.replace('-', " "),
                            image_url: None,
                            subcollection_id: i as i32 + 1,
                        })
                        .collect(),
                })
                .collect();

            self.trees.insert(
                slug.to_string(),
                CategoryTree {
                    category: Category {
                        slug: slug.to_string(),
                        name: name.to_string(),
                    },
                    subcollections,
                },
            );
            self
        }

        fn with_products(mut self, slug: &str, count: i64) -> Self {
            self.product_counts.insert(slug.to_string(), count);
            self
        }

        fn check(&self) -> Result<(), DbError> {
            if self.broken {
                Err(to_diesel_error("database is locked"))
            } else {
                Ok(())
            }
        }
    }

    #[async_trait]
    impl CatalogStore for MemoryStore {
        async fn find_category_with_subcollections(
            &self,
            slug: &str,
        ) -> Result<Option<CategoryOverview>, DbError> {
            self.check()?;
            Ok(self.trees.get(slug).map(|tree| CategoryOverview {
                category: tree.category.clone(),
                subcollections: tree
                    .subcollections
                    .iter()
                    .map(|s| s.subcollection.clone())
                    .collect(),
            }))
        }

        async fn find_category_tree(&self, slug: &str) -> Result<Option<CategoryTree>, DbError> {
            self.check()?;
            Ok(self.trees.get(slug).cloned())
        }

        async fn count_products(&self, category_slug: &str) -> Result<i64, DbError> {
            self.check()?;
            Ok(self.product_counts.get(category_slug).copied().unwrap_or(0))
        }
    }

    fn handler(store: MemoryStore) -> CategoryPageHandler {
        CategoryPageHandler::new(Arc::new(store))
    }

    fn electronics() -> MemoryStore {
        MemoryStore::default().with_category(
            "electronics",
            "Electronics",
            vec![
                ("Phones", vec!["smartphones", "flip-phones"]),
                ("Laptops", vec!["ultrabooks"]),
                ("Audio", vec![]),
            ],
        )
    }

    #[test]
    fn test_decode_slug() {
        assert_eq!(decode_slug("electronics"), "electronics");
        assert_eq!(decode_slug("Electronics%20"), "Electronics ");
        assert_eq!(decode_slug("caf%C3%A9"), "café");
        // Invalid UTF-8 after decoding falls back to the raw value
        assert_eq!(decode_slug("bad%FF"), "bad%FF");
    }

    #[test]
    fn test_excerpt_rules() {
        assert_eq!(subcollection_excerpt(["Phones"], 1), "Phones");
        assert_eq!(subcollection_excerpt(["Phones", "Laptops"], 2), "Phones, Laptops,");
        assert_eq!(
            subcollection_excerpt(["Phones", "Laptops", "Audio"], 3),
            "Phones, Laptops,"
        );
        assert_eq!(subcollection_excerpt(Vec::<&str>::new(), 0), "");
    }

    #[tokio::test]
    async fn test_metadata_for_known_category() {
        let metadata = handler(electronics())
            .generate_metadata("electronics")
            .await
            .unwrap();

        assert_eq!(metadata.title, "Electronics | NextMaster");
        assert_eq!(metadata.open_graph.title, metadata.title);
        assert!(metadata.title.contains("Electronics"));
    }

    #[tokio::test]
    async fn test_metadata_description_with_many_subcollections() {
        let metadata = handler(electronics())
            .generate_metadata("electronics")
            .await
            .unwrap();

        assert_eq!(
            metadata.open_graph.description,
            "Choose from our selection of Electronics, including Phones, Laptops, and more. In stock and ready to ship."
        );
        assert!(metadata
            .open_graph
            .description
            .contains("Phones, Laptops, and more. In stock and ready to ship."));
    }

    #[tokio::test]
    async fn test_metadata_description_with_single_subcollection() {
        let store = MemoryStore::default().with_category(
            "electronics",
            "Electronics",
            vec![("Phones", vec!["smartphones"])],
        );

        let metadata = handler(store)
            .generate_metadata("electronics")
            .await
            .unwrap();

        assert!(metadata
            .open_graph
            .description
            .contains("including Phones and more."));
    }

    #[tokio::test]
    async fn test_metadata_uses_custom_site_name() {
        let metadata = handler(electronics())
            .with_site_name("Shop")
            .generate_metadata("electronics")
            .await
            .unwrap();

        assert_eq!(metadata.title, "Electronics | Shop");
    }

    #[tokio::test]
    async fn test_metadata_decodes_param() {
        let store = MemoryStore::default().with_category("home garden", "Home & Garden", vec![]);

        let metadata = handler(store)
            .generate_metadata("home%20garden")
            .await
            .unwrap();

        assert_eq!(metadata.title, "Home & Garden | NextMaster");
    }

    #[tokio::test]
    async fn test_unknown_category_is_not_found() {
        let handler = handler(electronics());

        let err = handler.generate_metadata("garden").await.unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(ref slug) if slug == "garden"));

        let err = handler.render_page("garden").await.unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let store = MemoryStore {
            broken: true,
            ..electronics()
        };
        let handler = handler(store);

        assert!(matches!(
            handler.generate_metadata("electronics").await,
            Err(CatalogError::Database(_))
        ));
        assert!(matches!(
            handler.render_page("electronics").await,
            Err(CatalogError::Database(_))
        ));
    }

    #[tokio::test]
    async fn test_zero_products_omits_heading() {
        let page = handler(electronics())
            .render_page("electronics")
            .await
            .unwrap();

        assert_eq!(page.product_count, 0);
        assert_eq!(page.count_heading(), None);
    }

    #[tokio::test]
    async fn test_product_count_heading() {
        let page = handler(electronics().with_products("electronics", 42))
            .render_page("electronics")
            .await
            .unwrap();

        assert_eq!(page.count_heading().as_deref(), Some("42 Products"));
    }

    #[tokio::test]
    async fn test_sections_mirror_tree() {
        let page = handler(electronics())
            .render_page("electronics")
            .await
            .unwrap();

        assert_eq!(page.category_name, "Electronics");
        let names: Vec<_> = page.sections.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Phones", "Laptops", "Audio"]);

        let tile_counts: Vec<_> = page.sections.iter().map(|s| s.tiles.len()).collect();
        assert_eq!(tile_counts, vec![2, 1, 0]);

        let labels: Vec<_> = page.sections[0]
            .tiles
            .iter()
            .map(|t| t.label.as_str())
            .collect();
        assert_eq!(labels, vec!["smartphones", "flip phones"]);
    }

    #[tokio::test]
    async fn test_tile_fields() {
        let page = handler(electronics())
            .render_page("electronics")
            .await
            .unwrap();

        let tile = &page.sections[0].tiles[1];
        assert_eq!(tile.image_url, PLACEHOLDER_IMAGE);
        assert_eq!(tile.alt_text, "A small picture of flip phones");
        assert_eq!(tile.href, "/products/electronics/flip-phones");
        assert_eq!(tile.label, "flip phones");
    }

    #[tokio::test]
    async fn test_tile_image_url_and_custom_placeholder() {
        let mut store = electronics();
        if let Some(tree) = store.trees.get_mut("electronics") {
            tree.subcollections[0].subcategories[0].image_url =
                Some("https://cdn.example.com/smartphones.png".to_string());
        }

        let page = handler(store)
            .with_placeholder_image("/static/blank.png")
            .render_page("electronics")
            .await
            .unwrap();

        let tiles = &page.sections[0].tiles;
        assert_eq!(tiles[0].image_url, "https://cdn.example.com/smartphones.png");
        assert_eq!(tiles[1].image_url, "/static/blank.png");
    }

    #[tokio::test]
    async fn test_tile_link_keeps_encoded_param() {
        let store = MemoryStore::default()
            .with_category("Electronics ", "Electronics", vec![("Phones", vec!["smartphones"])]);

        let page = handler(store)
            .render_page("Electronics%20")
            .await
            .unwrap();

        assert_eq!(page.category_slug, "Electronics ");
        assert_eq!(
            page.sections[0].tiles[0].href,
            "/products/Electronics%20/smartphones"
        );
    }

    #[test]
    fn test_metadata_serializes_open_graph_key() {
        let metadata = PageMetadata {
            title: "Electronics | NextMaster".to_string(),
            open_graph: OpenGraph {
                title: "Electronics | NextMaster".to_string(),
                description: "Choose".to_string(),
            },
        };

        let json = serde_json::to_value(&metadata).unwrap();
        assert_eq!(json["openGraph"]["description"], "Choose");
    }
}
