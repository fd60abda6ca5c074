use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::taxonomy::{Category, Filter};
use crate::models::{Product, ProductId};

/// Items shown before the first "load more".
pub const INITIAL_WINDOW: usize = 6;
/// Items added by each "load more".
pub const WINDOW_STEP: usize = 6;

/// Client-side snapshot of every product the backend returned.
#[derive(Debug, Clone, Default)]
pub struct Listing {
    products: Vec<Product>,
}

impl Listing {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    pub fn set_all(&mut self, products: Vec<Product>) {
        self.products = products;
    }

    /// Swaps the record with `id` in place. Returns false when it is absent.
    pub fn replace_one(&mut self, id: &ProductId, product: Product) -> bool {
        match self.products.iter_mut().find(|p| &p.id == id) {
            Some(slot) => {
                *slot = product;
                true
            }
            None => false,
        }
    }

    pub fn remove_one(&mut self, id: &ProductId) -> Option<Product> {
        let idx = self.products.iter().position(|p| &p.id == id)?;
        Some(self.products.remove(idx))
    }

    /// Adds a freshly created record at the end of the snapshot.
    pub fn insert(&mut self, product: Product) {
        match self.products.iter_mut().find(|p| p.id == product.id) {
            Some(slot) => *slot = product,
            None => self.products.push(product),
        }
    }

    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn all(&self) -> &[Product] {
        &self.products
    }

    /// Filters the snapshot without touching it; order is preserved.
    pub fn query(&self, query: &ProductQuery) -> Vec<&Product> {
        self.products.iter().filter(|p| query.matches(p)).collect()
    }
}

/// Search and classification criteria. Unset criteria match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProductQuery {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub filter: Option<Filter>,
}

impl ProductQuery {
    pub fn new(search: impl Into<String>, category: Option<Category>, filter: Option<Filter>) -> Self {
        Self {
            search: search.into(),
            category,
            filter,
        }
    }

    pub fn matches(&self, product: &Product) -> bool {
        let name_matches = self.search.is_empty()
            || product
                .name
                .to_lowercase()
                .contains(&self.search.to_lowercase());
        let category_matches = self
            .category
            .is_none_or(|c| product.category == c.as_str());
        let filter_matches = self.filter.is_none_or(|f| product.filter == f.as_str());
        name_matches && category_matches && filter_matches
    }

    /// Selecting a category resets the filter criterion, as on the listing page.
    pub fn set_category(&mut self, category: Option<Category>) {
        self.category = category;
        self.filter = None;
    }
}

/// Prefix of `results` holding at most `revealed` items.
pub fn visible_page<T>(results: &[T], revealed: usize) -> &[T] {
    &results[..revealed.min(results.len())]
}

/// Grow-only "load more" window over a result list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealWindow {
    page_size: usize,
    revealed: usize,
}

impl Default for RevealWindow {
    fn default() -> Self {
        Self::new(INITIAL_WINDOW, WINDOW_STEP)
    }
}

impl RevealWindow {
    pub fn new(initial: usize, page_size: usize) -> Self {
        Self {
            page_size,
            revealed: initial,
        }
    }

    pub fn revealed(&self) -> usize {
        self.revealed
    }

    pub fn load_more(&mut self) {
        self.revealed = self.revealed.saturating_add(self.page_size);
    }

    pub fn visible<'a, T>(&self, results: &'a [T]) -> &'a [T] {
        visible_page(results, self.revealed)
    }

    pub fn has_more(&self, total: usize) -> bool {
        self.revealed < total
    }
}
