#![allow(dead_code)]

use std::{
    collections::HashSet,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use wizard_admin::{
    backend::{Backend, BackendError, BackendResult, Credentials},
    catalog::ProductPayload,
    models::{Order, OrderId, Product, ProductId, Profile},
    session::DashboardSession,
    state::AppState,
};

/// In-memory stand-in for the marketplace backend. Records every call and
/// fails the operations named in `failing`; those also in `silent` fail
/// without a message of their own.
#[derive(Default)]
pub struct FakeBackend {
    pub products: Mutex<Vec<Product>>,
    pub orders: Mutex<Vec<Order>>,
    pub calls: Mutex<Vec<String>>,
    pub failing: Mutex<HashSet<&'static str>>,
    pub silent: Mutex<HashSet<&'static str>>,
    pub role: Mutex<String>,
    next_id: Mutex<u32>,
}

impl FakeBackend {
    pub fn new(products: Vec<Product>, orders: Vec<Order>) -> Arc<Self> {
        Arc::new(Self {
            products: Mutex::new(products),
            orders: Mutex::new(orders),
            role: Mutex::new("admin".into()),
            next_id: Mutex::new(100),
            ..Default::default()
        })
    }

    pub fn fail(&self, op: &'static str) {
        self.failing.lock().unwrap().insert(op);
    }

    pub fn fail_without_message(&self, op: &'static str) {
        self.fail(op);
        self.silent.lock().unwrap().insert(op);
    }

    pub fn recover(&self, op: &'static str) {
        self.failing.lock().unwrap().remove(op);
        self.silent.lock().unwrap().remove(op);
    }

    pub fn set_role(&self, role: &str) {
        *self.role.lock().unwrap() = role.to_string();
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn record(&self, call: String, op: &'static str) -> BackendResult<()> {
        self.calls.lock().unwrap().push(call);
        if self.failing.lock().unwrap().contains(op) {
            let message = if self.silent.lock().unwrap().contains(op) {
                None
            } else {
                Some(format!("{op} exploded"))
            };
            return Err(BackendError::Status {
                status: 500,
                message,
            });
        }
        Ok(())
    }

    fn product_from(&self, id: ProductId, payload: &ProductPayload) -> Product {
        Product {
            id,
            name: payload.name.clone(),
            category: payload.category.as_str().to_string(),
            filter: payload.filter.as_str().to_string(),
            description: payload.description.clone(),
            price: payload.price,
            stock: payload.stock,
            image: payload
                .image
                .as_ref()
                .map(|upload| format!("https://cdn.example/{}", upload.file_name)),
            created_at: None,
        }
    }
}

#[async_trait]
impl Backend for FakeBackend {
    async fn login(&self, email: &str, _password: &str) -> BackendResult<Credentials> {
        self.record(format!("login {email}"), "login")?;
        Ok(Credentials {
            cookie: Some("jwt=abc".into()),
            token: None,
        })
    }

    async fn logout(&self, _credentials: &Credentials) -> BackendResult<()> {
        self.record("logout".into(), "logout")
    }

    async fn profile(&self, _credentials: &Credentials) -> BackendResult<Profile> {
        self.record("profile".into(), "profile")?;
        Ok(Profile {
            email: Some("dumbledore@hogwarts.edu".into()),
            name: Some("Albus".into()),
            role: self.role.lock().unwrap().clone(),
        })
    }

    async fn list_products(&self, _credentials: &Credentials) -> BackendResult<Vec<Product>> {
        self.record("list_products".into(), "list_products")?;
        Ok(self.products.lock().unwrap().clone())
    }

    async fn create_product(
        &self,
        _credentials: &Credentials,
        payload: &ProductPayload,
    ) -> BackendResult<Product> {
        self.record(format!("create_product {}", payload.name), "create_product")?;
        let id = {
            let mut next = self.next_id.lock().unwrap();
            *next += 1;
            ProductId(format!("p{next}"))
        };
        let product = self.product_from(id, payload);
        self.products.lock().unwrap().push(product.clone());
        Ok(product)
    }

    async fn update_product(
        &self,
        _credentials: &Credentials,
        id: &ProductId,
        payload: &ProductPayload,
    ) -> BackendResult<Product> {
        self.record(format!("update_product {id}"), "update_product")?;
        let product = self.product_from(id.clone(), payload);
        let mut products = self.products.lock().unwrap();
        match products.iter_mut().find(|p| &p.id == id) {
            Some(slot) => *slot = product.clone(),
            None => {
                return Err(BackendError::Status {
                    status: 404,
                    message: Some("Product not found".into()),
                });
            }
        }
        Ok(product)
    }

    async fn delete_product(&self, _credentials: &Credentials, id: &ProductId) -> BackendResult<()> {
        self.record(format!("delete_product {id}"), "delete_product")?;
        self.products.lock().unwrap().retain(|p| &p.id != id);
        Ok(())
    }

    async fn list_orders(&self, _credentials: &Credentials) -> BackendResult<Vec<Order>> {
        self.record("list_orders".into(), "list_orders")?;
        Ok(self.orders.lock().unwrap().clone())
    }

    async fn set_order_paid(
        &self,
        _credentials: &Credentials,
        id: &OrderId,
        paid: bool,
    ) -> BackendResult<()> {
        self.record(format!("set_order_paid {id} {paid}"), "set_order_paid")?;
        if let Some(order) = self.orders.lock().unwrap().iter_mut().find(|o| &o.id == id) {
            order.is_paid = paid;
        }
        Ok(())
    }

    async fn set_order_delivered(
        &self,
        _credentials: &Credentials,
        id: &OrderId,
        delivered: bool,
    ) -> BackendResult<()> {
        self.record(
            format!("set_order_delivered {id} {delivered}"),
            "set_order_delivered",
        )?;
        if let Some(order) = self.orders.lock().unwrap().iter_mut().find(|o| &o.id == id) {
            order.is_delivered = delivered;
        }
        Ok(())
    }
}

pub fn product(id: &str, name: &str, category: &str, filter: &str) -> Product {
    Product {
        id: ProductId(id.into()),
        name: name.into(),
        category: category.into(),
        filter: filter.into(),
        description: format!("{name} from Diagon Alley"),
        price: 10.0,
        stock: 5,
        image: None,
        created_at: None,
    }
}

pub fn catalog() -> Vec<Product> {
    vec![
        product("1", "Mandrake Root", "Herbology", "Healing"),
        product("2", "Devil's Snare", "Herbology", "Dangerous"),
        product("3", "Felix Felicis", "Potions", "Restricted"),
        product("4", "Pepperup Potion", "Potions", "Beginner"),
        product("5", "Time-Turner", "Artifacts", "Legendary"),
        product("6", "Remembrall", "Artifacts", "Common"),
        product("7", "Nimbus 2000", "Quidditch & House Gear", "Brooms"),
        product("8", "Gryffindor Scarf", "Quidditch & House Gear", "House Clothing"),
    ]
}

pub fn order(id: &str, paid: bool, delivered: bool) -> Order {
    Order {
        id: OrderId(id.into()),
        order_items: Vec::new(),
        items_price: 20.0,
        shipping_price: 5.0,
        total_price: 25.0,
        is_paid: paid,
        is_delivered: delivered,
        created_at: None,
    }
}

pub fn admin_session() -> DashboardSession {
    DashboardSession::new(
        Credentials {
            cookie: Some("jwt=abc".into()),
            token: None,
        },
        Profile {
            email: Some("dumbledore@hogwarts.edu".into()),
            name: Some("Albus".into()),
            role: "admin".into(),
        },
    )
}

pub fn state(backend: Arc<FakeBackend>) -> AppState {
    AppState::new(backend)
}
