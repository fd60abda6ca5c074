use super::draft::FormDraft;
use crate::models::{Product, ProductId};

/// Edit modal lifecycle. A draft only exists while a product is being edited.
#[derive(Debug, Clone, Default)]
pub enum EditSession {
    #[default]
    Closed,
    Editing { original: Product, draft: FormDraft },
}

impl EditSession {
    /// Starts editing `product`, replacing any edit already in progress.
    pub fn open(&mut self, product: Product) {
        let draft = FormDraft::from_product(&product);
        *self = EditSession::Editing {
            original: product,
            draft,
        };
    }

    /// Discards the draft. Returns the product that was being edited.
    pub fn cancel(&mut self) -> Option<Product> {
        match std::mem::take(self) {
            EditSession::Editing { original, .. } => Some(original),
            EditSession::Closed => None,
        }
    }

    /// Closes the modal after a successful save.
    pub fn finish(&mut self) {
        *self = EditSession::Closed;
    }

    pub fn is_open(&self) -> bool {
        matches!(self, EditSession::Editing { .. })
    }

    pub fn target(&self) -> Option<&ProductId> {
        match self {
            EditSession::Editing { original, .. } => Some(&original.id),
            EditSession::Closed => None,
        }
    }

    pub fn draft(&self) -> Option<&FormDraft> {
        match self {
            EditSession::Editing { draft, .. } => Some(draft),
            EditSession::Closed => None,
        }
    }

    pub fn draft_mut(&mut self) -> Option<&mut FormDraft> {
        match self {
            EditSession::Editing { draft, .. } => Some(draft),
            EditSession::Closed => None,
        }
    }
}
