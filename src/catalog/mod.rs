//! Catalog form and listing model: taxonomy, drafts, validation, the
//! client-side product snapshot and the edit modal lifecycle.

pub mod draft;
pub mod editor;
pub mod listing;
pub mod page;
pub mod taxonomy;
pub mod validate;

pub use draft::{DraftError, DraftField, FormDraft, ImageUpload, ProductPayload};
pub use editor::EditSession;
pub use listing::{Listing, ProductQuery, RevealWindow, visible_page};
pub use page::ProductsPage;
pub use taxonomy::{Category, Filter, filters_for};
pub use validate::{RequiredField, Validation, validate};
