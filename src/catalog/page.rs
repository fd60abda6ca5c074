use serde::Serialize;
use utoipa::ToSchema;

use super::{
    draft::DraftView,
    editor::EditSession,
    listing::{Listing, ProductQuery, RevealWindow},
    taxonomy::{Filter, filters_for},
};
use crate::{
    models::{Product, ProductId},
    response::Meta,
};

/// State behind the "All Products" page of one dashboard session.
#[derive(Debug, Clone, Default)]
pub struct ProductsPage {
    pub listing: Listing,
    pub query: ProductQuery,
    pub reveal: RevealWindow,
    pub editor: EditSession,
    loaded: bool,
}

impl ProductsPage {
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Replaces the snapshot with a fresh backend load.
    pub fn load(&mut self, products: Vec<Product>) {
        self.listing.set_all(products);
        self.loaded = true;
    }

    pub fn view(&self) -> (ProductsView, Meta) {
        let results = self.listing.query(&self.query);
        let items: Vec<ProductCard> = self
            .reveal
            .visible(&results)
            .iter()
            .map(|p| ProductCard::from((*p).clone()))
            .collect();
        let meta = Meta::window(
            items.len(),
            results.len(),
            self.reveal.has_more(results.len()),
        );
        let view = ProductsView {
            items,
            query: self.query.clone(),
            filter_options: filters_for(self.query.category).to_vec(),
            editing: self.editor.target().cloned(),
        };
        (view, meta)
    }

    pub fn editor_view(&self) -> Option<EditorView> {
        match &self.editor {
            EditSession::Editing { original, draft } => Some(EditorView {
                product_id: original.id.clone(),
                draft: draft.view(),
            }),
            EditSession::Closed => None,
        }
    }
}

/// A listing row: the record plus what the product card displays.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductCard {
    #[serde(flatten)]
    pub product: Product,
    pub stock_label: String,
}

impl From<Product> for ProductCard {
    fn from(product: Product) -> Self {
        let stock_label = product.stock_label().to_string();
        Self {
            product,
            stock_label,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProductsView {
    pub items: Vec<ProductCard>,
    pub query: ProductQuery,
    pub filter_options: Vec<Filter>,
    /// Product whose edit modal is open, if any.
    pub editing: Option<ProductId>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EditorView {
    pub product_id: ProductId,
    pub draft: DraftView,
}
