use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::catalog::validate::{clamp_price, clamp_stock, coerce_price, coerce_stock};

/// Server-assigned product identity. Opaque to the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct ProductId(pub String);

/// Server-assigned order identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct OrderId(pub String);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<&str> for OrderId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

// Records written through the storefront forms may hold numbers as text or
// as fractions; one such record must not fail a whole listing load.
fn lenient_price<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64().map_or(0.0, clamp_price),
        Value::String(s) => coerce_price(&s),
        _ => 0.0,
    })
}

fn lenient_stock<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64().map_or(0, clamp_stock),
        Value::String(s) => coerce_stock(&s),
        _ => 0,
    })
}

/// Canonical product record as the backend returns it.
///
/// Category and filter stay as the server's text so a value the dashboard
/// does not know about never breaks a listing load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename(serialize = "id", deserialize = "_id"), alias = "id")]
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub filter: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "lenient_price")]
    pub price: f64,
    #[serde(default, deserialize_with = "lenient_stock")]
    pub stock: u32,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Product {
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }

    pub fn stock_label(&self) -> &'static str {
        if self.in_stock() { "In Stock" } else { "Out of Stock" }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    #[serde(
        rename(serialize = "id", deserialize = "_id"),
        alias = "id",
        default
    )]
    pub id: Option<String>,
    pub name: String,
    #[serde(default, deserialize_with = "lenient_stock")]
    pub qty: u32,
    #[serde(default, deserialize_with = "lenient_price")]
    pub price: f64,
    #[serde(default)]
    pub image: Option<String>,
}

impl OrderItem {
    pub fn line_total(&self) -> f64 {
        f64::from(self.qty) * self.price
    }
}

/// Order record. Items and totals are computed by the backend and read-only
/// here; only the two status flags change from the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename(serialize = "id", deserialize = "_id"), alias = "id")]
    pub id: OrderId,
    #[serde(default)]
    pub order_items: Vec<OrderItem>,
    #[serde(default)]
    pub items_price: f64,
    #[serde(default)]
    pub shipping_price: f64,
    #[serde(default)]
    pub total_price: f64,
    #[serde(default)]
    pub is_paid: bool,
    #[serde(default)]
    pub is_delivered: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Order {
    /// Short reference shown in order headers, e.g. `#A1B2C3`.
    pub fn short_ref(&self) -> String {
        let id = self.id.0.as_str();
        let start = id
            .char_indices()
            .rev()
            .nth(5)
            .map(|(idx, _)| idx)
            .unwrap_or(0);
        format!("#{}", id[start..].to_uppercase())
    }

    pub fn delivery_label(&self) -> &'static str {
        if self.is_delivered { "Delivered" } else { "Processing" }
    }

    pub fn payment_label(&self) -> &'static str {
        if self.is_paid { "Paid" } else { "Not Paid" }
    }
}

/// Current user as reported by the backend's profile endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Profile {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    pub role: String,
}

impl Profile {
    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_reads_backend_shape() {
        let product: Product = serde_json::from_value(serde_json::json!({
            "_id": "665f1c",
            "name": "Wand",
            "category": "Artifacts",
            "filter": "Common",
            "price": 12.5,
            "stock": 0,
            "image": "https://cdn.example/wand.png",
            "createdAt": "2024-05-01T10:00:00Z"
        }))
        .unwrap();

        assert_eq!(product.id, ProductId::from("665f1c"));
        assert_eq!(product.description, "");
        assert!(!product.in_stock());
        assert_eq!(product.stock_label(), "Out of Stock");

        let out = serde_json::to_value(&product).unwrap();
        assert_eq!(out["id"], "665f1c");
    }

    #[test]
    fn order_short_ref_uses_last_six_characters() {
        let order: Order = serde_json::from_value(serde_json::json!({
            "_id": "64b7f0e2c9a1d2",
            "orderItems": [{ "_id": "i1", "name": "Broom", "qty": 2, "price": 3.5 }],
            "itemsPrice": 7.0,
            "shippingPrice": 1.0,
            "totalPrice": 8.0,
            "isPaid": false,
            "isDelivered": true
        }))
        .unwrap();

        assert_eq!(order.short_ref(), "#C9A1D2");
        assert_eq!(order.order_items[0].line_total(), 7.0);
        assert_eq!(order.delivery_label(), "Delivered");
        assert_eq!(order.payment_label(), "Not Paid");
    }

    #[test]
    fn odd_numbers_do_not_break_a_listing() {
        let products: Vec<Product> = serde_json::from_value(serde_json::json!([
            { "_id": "1", "name": "Wand", "price": 12.5, "stock": 3 },
            { "_id": "2", "name": "Cloak", "price": "40", "stock": 2.5 },
            { "_id": "3", "name": "Stone", "price": -1, "stock": "lots" },
            { "_id": "4", "name": "Map", "price": null, "stock": null }
        ]))
        .unwrap();

        let numbers: Vec<_> = products.iter().map(|p| (p.price, p.stock)).collect();
        assert_eq!(numbers, vec![(12.5, 3), (40.0, 2), (0.0, 0), (0.0, 0)]);
    }

    #[test]
    fn short_ref_of_short_id_is_whole_id() {
        let order: Order = serde_json::from_value(serde_json::json!({ "_id": "ab" })).unwrap();
        assert_eq!(order.short_ref(), "#AB");
    }
}
