use serde::Serialize;
use utoipa::ToSchema;

use crate::models::Order;

/// An order as the orders page shows it: the record plus its header
/// reference, status labels and per-line totals.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderView {
    #[serde(flatten)]
    pub order: Order,
    pub reference: String,
    pub payment_label: String,
    pub delivery_label: String,
    /// `qty * price` for each entry of `orderItems`, in the same order.
    pub line_totals: Vec<f64>,
}

impl From<Order> for OrderView {
    fn from(order: Order) -> Self {
        Self {
            reference: order.short_ref(),
            payment_label: order.payment_label().to_string(),
            delivery_label: order.delivery_label().to_string(),
            line_totals: order.order_items.iter().map(|item| item.line_total()).collect(),
            order,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderList {
    pub items: Vec<OrderView>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_adds_reference_labels_and_line_totals() {
        let order: Order = serde_json::from_value(serde_json::json!({
            "_id": "64b7f0e2c9a1d2",
            "orderItems": [
                { "name": "Broom", "qty": 2, "price": 3.5 },
                { "name": "Scarf", "qty": 1, "price": 10.0 }
            ],
            "isPaid": true
        }))
        .unwrap();

        let view = serde_json::to_value(OrderView::from(order)).unwrap();
        assert_eq!(view["id"], "64b7f0e2c9a1d2");
        assert_eq!(view["isPaid"], true);
        assert_eq!(view["reference"], "#C9A1D2");
        assert_eq!(view["paymentLabel"], "Paid");
        assert_eq!(view["deliveryLabel"], "Processing");
        assert_eq!(view["lineTotals"], serde_json::json!([7.0, 10.0]));
    }
}
