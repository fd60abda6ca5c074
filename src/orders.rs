use crate::models::{Order, OrderId};

/// Which of the two independent order flags an action touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderFlag {
    Paid,
    Delivered,
}

impl OrderFlag {
    pub fn read(self, order: &Order) -> bool {
        match self {
            OrderFlag::Paid => order.is_paid,
            OrderFlag::Delivered => order.is_delivered,
        }
    }

    fn write(self, order: &mut Order, value: bool) {
        match self {
            OrderFlag::Paid => order.is_paid = value,
            OrderFlag::Delivered => order.is_delivered = value,
        }
    }

    /// Notification shown once the backend accepted `value`.
    pub fn marked_message(self, value: bool) -> &'static str {
        match (self, value) {
            (OrderFlag::Paid, true) => "Order marked as Paid",
            (OrderFlag::Paid, false) => "Order marked as Not Paid",
            (OrderFlag::Delivered, true) => "Order marked as Delivered",
            (OrderFlag::Delivered, false) => "Order marked as Not Delivered",
        }
    }

    pub fn failure_message(self) -> &'static str {
        match self {
            OrderFlag::Paid => "Failed to update payment status",
            OrderFlag::Delivered => "Failed to update delivery status",
        }
    }
}

/// Snapshot behind the "All Orders" page of one dashboard session.
#[derive(Debug, Clone, Default)]
pub struct OrderBoard {
    orders: Vec<Order>,
    loaded: bool,
}

impl OrderBoard {
    pub fn set_all(&mut self, orders: Vec<Order>) {
        self.orders = orders;
        self.loaded = true;
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn all(&self) -> &[Order] {
        &self.orders
    }

    pub fn get(&self, id: &OrderId) -> Option<&Order> {
        self.orders.iter().find(|o| &o.id == id)
    }

    /// Applies a server-confirmed flag value. Only `flag` changes.
    pub fn apply(&mut self, id: &OrderId, flag: OrderFlag, value: bool) -> Option<&Order> {
        let order = self.orders.iter_mut().find(|o| &o.id == id)?;
        flag.write(order, value);
        Some(&*order)
    }

    pub fn set_paid(&mut self, id: &OrderId, paid: bool) -> Option<&Order> {
        self.apply(id, OrderFlag::Paid, paid)
    }

    pub fn set_delivered(&mut self, id: &OrderId, delivered: bool) -> Option<&Order> {
        self.apply(id, OrderFlag::Delivered, delivered)
    }
}
