use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::catalog::{Category, DraftField, Filter, taxonomy::TaxonomyEntry};

/// One form edit: `{"field": "category", "value": "Potions"}`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SetFieldRequest {
    pub field: DraftField,
    #[serde(default)]
    pub value: String,
}

/// Listing criteria as typed into the search box and select boxes.
#[derive(Debug, Deserialize, ToSchema)]
pub struct QueryRequest {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub filter: Option<Filter>,
}

/// Multipart body of a product form. Documentation only; the handlers
/// read the fields one by one.
#[allow(dead_code)]
#[derive(ToSchema)]
pub struct ProductForm {
    pub name: String,
    pub category: Category,
    pub filter: Filter,
    pub description: Option<String>,
    pub price: Option<String>,
    pub stock: Option<String>,
    #[schema(value_type = Option<String>, format = Binary)]
    pub image: Option<Vec<u8>>,
}

#[allow(dead_code)]
#[derive(ToSchema)]
pub struct ImageForm {
    #[schema(value_type = String, format = Binary)]
    pub image: Vec<u8>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct Taxonomy {
    pub categories: Vec<TaxonomyEntry>,
}
