//! Data models for the storefront catalog.

mod catalog;

pub use catalog::{
    Category, CategoryOverview, CategoryTree, Subcategory, Subcollection,
    SubcollectionWithSubcategories,
};
