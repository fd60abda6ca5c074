use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use super::{
    taxonomy::{Category, Filter, filters_for},
    validate::{RequiredField, coerce_price, coerce_stock, validate},
};
use crate::models::Product;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DraftError {
    #[error("Unknown field {0}")]
    UnknownField(String),

    #[error("Unknown category {0}")]
    UnknownCategory(String),

    #[error("Filter {filter} is not available for the selected category")]
    FilterOutsideCategory { filter: String },
}

/// Form fields a draft accepts from the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DraftField {
    Name,
    Category,
    Filter,
    Description,
    Price,
    Stock,
}

impl FromStr for DraftField {
    type Err = DraftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(DraftField::Name),
            "category" => Ok(DraftField::Category),
            "filter" => Ok(DraftField::Filter),
            "description" => Ok(DraftField::Description),
            "price" => Ok(DraftField::Price),
            "stock" => Ok(DraftField::Stock),
            other => Err(DraftError::UnknownField(other.to_string())),
        }
    }
}

/// A locally selected image that has not been sent yet.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageUpload")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Staging copy of a product while a create or edit form is open.
///
/// `image` is the persisted reference the product already has; a newly
/// chosen file lives in `pending_image` until the draft is submitted.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FormDraft {
    pub name: String,
    pub category: Option<Category>,
    pub filter: Option<Filter>,
    pub description: String,
    pub price: f64,
    pub stock: u32,
    pub image: Option<String>,
    pub pending_image: Option<ImageUpload>,
}

impl FormDraft {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_product(product: &Product) -> Self {
        let category = Category::parse(&product.category);
        let filter = Filter::parse(&product.filter)
            .filter(|f| category.is_some_and(|c| c.allows(*f)));
        Self {
            name: product.name.clone(),
            category,
            filter,
            description: product.description.clone(),
            price: product.price,
            stock: product.stock,
            image: product.image.clone(),
            pending_image: None,
        }
    }

    /// Replaces one field from form text. Changing the category always
    /// clears the filter.
    pub fn set_field(&mut self, field: DraftField, value: &str) -> Result<(), DraftError> {
        match field {
            DraftField::Name => self.name = value.to_string(),
            DraftField::Description => self.description = value.to_string(),
            DraftField::Price => self.price = coerce_price(value),
            DraftField::Stock => self.stock = coerce_stock(value),
            DraftField::Category => {
                let category = if value.is_empty() {
                    None
                } else {
                    Some(
                        Category::parse(value)
                            .ok_or_else(|| DraftError::UnknownCategory(value.to_string()))?,
                    )
                };
                self.set_category(category);
            }
            DraftField::Filter => {
                let filter = if value.is_empty() {
                    None
                } else {
                    Some(Filter::parse(value).ok_or_else(|| {
                        DraftError::FilterOutsideCategory {
                            filter: value.to_string(),
                        }
                    })?)
                };
                self.set_filter(filter)?;
            }
        }
        Ok(())
    }

    pub fn set_category(&mut self, category: Option<Category>) {
        self.category = category;
        self.filter = None;
    }

    pub fn set_filter(&mut self, filter: Option<Filter>) -> Result<(), DraftError> {
        match filter {
            Some(f) if !filters_for(self.category).contains(&f) => {
                return Err(DraftError::FilterOutsideCategory {
                    filter: f.as_str().to_string(),
                });
            }
            _ => {}
        }
        self.filter = filter;
        Ok(())
    }

    pub fn set_image(&mut self, upload: ImageUpload) {
        self.pending_image = Some(upload);
    }

    pub fn filter_options(&self) -> &'static [Filter] {
        filters_for(self.category)
    }

    /// Packages the draft as a full-replace request payload.
    pub fn to_payload(&self) -> Result<ProductPayload, Vec<RequiredField>> {
        let validation = validate(self);
        match (self.category, self.filter) {
            (Some(category), Some(filter)) if validation.is_valid() => Ok(ProductPayload {
                name: self.name.clone(),
                category,
                filter,
                description: self.description.clone(),
                price: self.price,
                stock: self.stock,
                image: self.pending_image.clone(),
            }),
            _ => Err(validation.missing),
        }
    }

    pub fn view(&self) -> DraftView {
        DraftView {
            name: self.name.clone(),
            category: self.category,
            filter: self.filter,
            description: self.description.clone(),
            price: self.price,
            stock: self.stock,
            image: self.image.clone(),
            pending_image: self.pending_image.as_ref().map(|i| i.file_name.clone()),
            filter_options: self.filter_options().to_vec(),
        }
    }
}

/// Every product field, sent together on create and update.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductPayload {
    pub name: String,
    pub category: Category,
    pub filter: Filter,
    pub description: String,
    pub price: f64,
    pub stock: u32,
    pub image: Option<ImageUpload>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DraftView {
    pub name: String,
    pub category: Option<Category>,
    pub filter: Option<Filter>,
    pub description: String,
    pub price: f64,
    pub stock: u32,
    pub image: Option<String>,
    /// File name of the image chosen but not yet uploaded.
    pub pending_image: Option<String>,
    pub filter_options: Vec<Filter>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProductId;

    fn wand() -> Product {
        Product {
            id: ProductId::from("1"),
            name: "Wand".into(),
            category: "Artifacts".into(),
            filter: "Common".into(),
            description: "Holly, phoenix feather".into(),
            price: 20.0,
            stock: 3,
            image: Some("https://cdn.example/wand.png".into()),
            created_at: None,
        }
    }

    fn upload(name: &str) -> ImageUpload {
        ImageUpload {
            file_name: name.into(),
            content_type: Some("image/png".into()),
            bytes: vec![1, 2, 3],
        }
    }

    #[test]
    fn seeding_from_product_copies_fields_without_pending_image() {
        let draft = FormDraft::from_product(&wand());
        assert_eq!(draft.category, Some(Category::Artifacts));
        assert_eq!(draft.filter, Some(Filter::Common));
        assert_eq!(draft.image.as_deref(), Some("https://cdn.example/wand.png"));
        assert!(draft.pending_image.is_none());
    }

    #[test]
    fn seeding_drops_filter_that_does_not_fit_category() {
        let mut product = wand();
        product.filter = "Healing".into();
        assert_eq!(FormDraft::from_product(&product).filter, None);

        product.category = "Charms".into();
        let draft = FormDraft::from_product(&product);
        assert_eq!(draft.category, None);
        assert!(draft.filter_options().is_empty());
    }

    #[test]
    fn setting_category_always_clears_filter() {
        for category in Category::ALL {
            for filter in category.filters() {
                let mut draft = FormDraft::empty();
                draft.set_category(Some(category));
                draft.set_filter(Some(*filter)).unwrap();
                draft.set_field(DraftField::Category, category.as_str()).unwrap();
                assert_eq!(draft.filter, None);
            }
        }
    }

    #[test]
    fn filter_must_belong_to_category() {
        let mut draft = FormDraft::empty();
        assert!(draft.set_field(DraftField::Filter, "Brooms").is_err());

        draft.set_field(DraftField::Category, "Potions").unwrap();
        let err = draft.set_field(DraftField::Filter, "Brooms").unwrap_err();
        assert_eq!(
            err,
            DraftError::FilterOutsideCategory {
                filter: "Brooms".into()
            }
        );
        assert_eq!(draft.filter, None);

        draft.set_field(DraftField::Filter, "Advanced").unwrap();
        assert_eq!(draft.filter, Some(Filter::Advanced));
        draft.set_field(DraftField::Filter, "").unwrap();
        assert_eq!(draft.filter, None);
    }

    #[test]
    fn unknown_category_leaves_draft_untouched() {
        let mut draft = FormDraft::from_product(&wand());
        let before = draft.clone();
        assert!(draft.set_field(DraftField::Category, "Charms").is_err());
        assert_eq!(draft, before);
    }

    #[test]
    fn numeric_fields_are_coerced() {
        let mut draft = FormDraft::empty();
        draft.set_field(DraftField::Price, "abc").unwrap();
        draft.set_field(DraftField::Stock, "12").unwrap();
        assert_eq!(draft.price, 0.0);
        assert_eq!(draft.stock, 12);
    }

    #[test]
    fn pending_image_is_separate_from_persisted_image() {
        let mut draft = FormDraft::from_product(&wand());
        draft.set_image(upload("new.png"));
        assert_eq!(draft.image.as_deref(), Some("https://cdn.example/wand.png"));
        assert_eq!(draft.view().pending_image.as_deref(), Some("new.png"));

        let payload = draft.to_payload().unwrap();
        assert_eq!(payload.image.map(|i| i.file_name), Some("new.png".to_string()));
    }

    #[test]
    fn payload_requires_name_category_and_filter() {
        let missing = FormDraft::empty().to_payload().unwrap_err();
        assert_eq!(
            missing,
            vec![RequiredField::Name, RequiredField::Category, RequiredField::Filter]
        );
    }

    #[test]
    fn field_names_parse() {
        assert_eq!("stock".parse::<DraftField>(), Ok(DraftField::Stock));
        assert!("colour".parse::<DraftField>().is_err());
    }

    #[test]
    fn image_debug_hides_bytes() {
        let rendered = format!("{:?}", upload("a.png"));
        assert!(rendered.contains("len: 3"));
        assert!(!rendered.contains("[1, 2, 3]"));
    }
}
