//! Diesel ORM records for the catalog tables.
//!
//! Records mirror table rows one-to-one; conversion to the domain types in
//! `crate::models` happens here so the rest of the crate never sees them.

use diesel::prelude::*;

use crate::models::{Category, Subcategory, Subcollection};
use crate::schema;

/// Category record from the database.
#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = schema::categories)]
#[diesel(primary_key(slug))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CategoryRecord {
    pub slug: String,
    pub name: String,
}

/// New category for insertion.
#[derive(Insertable, Debug)]
#[diesel(table_name = schema::categories)]
pub struct NewCategory<'a> {
    pub slug: &'a str,
    pub name: &'a str,
}

/// Subcollection record from the database.
#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = schema::subcollections)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SubcollectionRecord {
    pub id: i32,
    pub name: String,
    pub category_slug: String,
}

/// New subcollection for insertion. The id is assigned by the database.
#[derive(Insertable, Debug)]
#[diesel(table_name = schema::subcollections)]
pub struct NewSubcollection<'a> {
    pub name: &'a str,
    pub category_slug: &'a str,
}

/// Subcategory record from the database.
#[derive(Queryable, Selectable, Identifiable, Associations, Debug, Clone)]
#[diesel(table_name = schema::subcategories)]
#[diesel(primary_key(slug))]
#[diesel(belongs_to(SubcollectionRecord, foreign_key = subcollection_id))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SubcategoryRecord {
    pub slug: String,
    pub name: String,
    pub subcollection_id: i32,
    pub image_url: Option<String>,
}

/// New subcategory for insertion.
#[derive(Insertable, Debug)]
#[diesel(table_name = schema::subcategories)]
pub struct NewSubcategory<'a> {
    pub slug: &'a str,
    pub name: &'a str,
    pub subcollection_id: i32,
    pub image_url: Option<&'a str>,
}

/// New product for insertion. Products are only ever counted, so there is
/// no read-side record.
#[derive(Insertable, Debug)]
#[diesel(table_name = schema::products)]
pub struct NewProduct<'a> {
    pub slug: &'a str,
    pub name: &'a str,
    pub subcategory_slug: &'a str,
}

impl From<CategoryRecord> for Category {
    fn from(record: CategoryRecord) -> Self {
        Category {
            slug: record.slug,
            name: record.name,
        }
    }
}

impl From<SubcollectionRecord> for Subcollection {
    fn from(record: SubcollectionRecord) -> Self {
        Subcollection {
            id: record.id,
            name: record.name,
            category_slug: record.category_slug,
        }
    }
}

impl From<SubcategoryRecord> for Subcategory {
    fn from(record: SubcategoryRecord) -> Self {
        Subcategory {
            slug: record.slug,
            name: record.name,
            image_url: record.image_url,
            subcollection_id: record.subcollection_id,
        }
    }
}
