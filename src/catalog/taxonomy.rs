use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Top-level product classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Category {
    Herbology,
    Potions,
    Artifacts,
    #[serde(rename = "Quidditch & House Gear")]
    QuidditchHouseGear,
}

/// Secondary classification. Valid values depend on the [`Category`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Filter {
    Healing,
    Dangerous,
    Rare,
    Beginner,
    Advanced,
    Restricted,
    Common,
    Legendary,
    Brooms,
    #[serde(rename = "House Clothing")]
    HouseClothing,
    Accessories,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Herbology,
        Category::Potions,
        Category::Artifacts,
        Category::QuidditchHouseGear,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Herbology => "Herbology",
            Category::Potions => "Potions",
            Category::Artifacts => "Artifacts",
            Category::QuidditchHouseGear => "Quidditch & House Gear",
        }
    }

    /// Maps display text back to a category. Unknown text is `None`.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == value)
    }

    /// Ordered filter values allowed for this category.
    pub fn filters(self) -> &'static [Filter] {
        match self {
            Category::Herbology => &[Filter::Healing, Filter::Dangerous, Filter::Rare],
            Category::Potions => &[Filter::Beginner, Filter::Advanced, Filter::Restricted],
            Category::Artifacts => &[Filter::Common, Filter::Rare, Filter::Legendary],
            Category::QuidditchHouseGear => {
                &[Filter::Brooms, Filter::HouseClothing, Filter::Accessories]
            }
        }
    }

    pub fn allows(self, filter: Filter) -> bool {
        self.filters().contains(&filter)
    }
}

impl Filter {
    pub const ALL: [Filter; 11] = [
        Filter::Healing,
        Filter::Dangerous,
        Filter::Rare,
        Filter::Beginner,
        Filter::Advanced,
        Filter::Restricted,
        Filter::Common,
        Filter::Legendary,
        Filter::Brooms,
        Filter::HouseClothing,
        Filter::Accessories,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Filter::Healing => "Healing",
            Filter::Dangerous => "Dangerous",
            Filter::Rare => "Rare",
            Filter::Beginner => "Beginner",
            Filter::Advanced => "Advanced",
            Filter::Restricted => "Restricted",
            Filter::Common => "Common",
            Filter::Legendary => "Legendary",
            Filter::Brooms => "Brooms",
            Filter::HouseClothing => "House Clothing",
            Filter::Accessories => "Accessories",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == value)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Filter values valid for `category`; an unset category has none.
pub fn filters_for(category: Option<Category>) -> &'static [Filter] {
    match category {
        Some(category) => category.filters(),
        None => &[],
    }
}

/// One row of the taxonomy table, as the dashboard's select boxes need it.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TaxonomyEntry {
    pub category: Category,
    pub filters: Vec<Filter>,
}

pub fn taxonomy() -> Vec<TaxonomyEntry> {
    Category::ALL
        .into_iter()
        .map(|category| TaxonomyEntry {
            category,
            filters: category.filters().to_vec(),
        })
        .collect()
}
