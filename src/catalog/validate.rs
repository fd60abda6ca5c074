use serde::Serialize;
use utoipa::ToSchema;

use super::draft::FormDraft;

/// Fields a product cannot be submitted without.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RequiredField {
    Name,
    Category,
    Filter,
}

impl RequiredField {
    pub fn as_str(self) -> &'static str {
        match self {
            RequiredField::Name => "name",
            RequiredField::Category => "category",
            RequiredField::Filter => "filter",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Validation {
    pub missing: Vec<RequiredField>,
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Presence checks only. Numbers were already coerced when they were set.
pub fn validate(draft: &FormDraft) -> Validation {
    let mut missing = Vec::new();
    if draft.name.trim().is_empty() {
        missing.push(RequiredField::Name);
    }
    if draft.category.is_none() {
        missing.push(RequiredField::Category);
    }
    if draft.filter.is_none() {
        missing.push(RequiredField::Filter);
    }
    Validation { missing }
}

/// Lenient price parsing: anything unusable becomes 0.
pub fn coerce_price(raw: &str) -> f64 {
    raw.trim().parse::<f64>().map_or(0.0, clamp_price)
}

/// Negative and non-finite prices become 0.
pub fn clamp_price(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 { value } else { 0.0 }
}

/// Lenient stock parsing: anything unusable becomes 0, fractions truncate.
pub fn coerce_stock(raw: &str) -> u32 {
    let raw = raw.trim();
    if let Ok(value) = raw.parse::<u32>() {
        return value;
    }
    raw.parse::<f64>().map_or(0, clamp_stock)
}

/// Truncates a numeric stock value into range; negative and non-finite
/// values become 0.
pub fn clamp_stock(value: f64) -> u32 {
    if value.is_finite() && value > 0.0 {
        value.min(f64::from(u32::MAX)) as u32
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::taxonomy::{Category, Filter};

    fn complete() -> FormDraft {
        FormDraft {
            name: "Mandrake".into(),
            category: Some(Category::Herbology),
            filter: Some(Filter::Dangerous),
            ..FormDraft::empty()
        }
    }

    #[test]
    fn complete_draft_is_valid() {
        assert!(validate(&complete()).is_valid());
    }

    #[test]
    fn each_missing_field_is_reported() {
        let mut draft = complete();
        draft.name = "   ".into();
        assert_eq!(validate(&draft).missing, vec![RequiredField::Name]);

        let mut draft = complete();
        draft.filter = None;
        assert_eq!(validate(&draft).missing, vec![RequiredField::Filter]);

        let draft = FormDraft::empty();
        assert_eq!(
            validate(&draft).missing,
            vec![RequiredField::Name, RequiredField::Category, RequiredField::Filter]
        );
    }

    #[test]
    fn numbers_never_fail_validation() {
        let mut draft = complete();
        draft.price = coerce_price("not a number");
        draft.stock = coerce_stock("-4");
        assert!(validate(&draft).is_valid());
        assert_eq!(draft.price, 0.0);
        assert_eq!(draft.stock, 0);
    }

    #[test]
    fn coercion_is_lenient() {
        assert_eq!(coerce_price(" 12.5 "), 12.5);
        assert_eq!(coerce_price(""), 0.0);
        assert_eq!(coerce_price("NaN"), 0.0);
        assert_eq!(coerce_price("-3"), 0.0);
        assert_eq!(coerce_stock("7"), 7);
        assert_eq!(coerce_stock("7.9"), 7);
        assert_eq!(coerce_stock("seven"), 0);
    }
}
