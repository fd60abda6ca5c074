use std::time::Duration;

use async_trait::async_trait;
use reqwest::{
    Client, RequestBuilder, Response,
    header::{AUTHORIZATION, COOKIE, SET_COOKIE},
    multipart::{Form, Part},
};
use serde::de::DeserializeOwned;
use serde_json::json;

use super::{Backend, BackendError, BackendResult, Credentials};
use crate::{
    catalog::ProductPayload,
    models::{Order, OrderId, Product, ProductId, Profile},
};

/// reqwest client for the marketplace REST API.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn authorize(request: RequestBuilder, credentials: &Credentials) -> RequestBuilder {
        let mut request = request;
        if let Some(cookie) = &credentials.cookie {
            request = request.header(COOKIE, cookie);
        }
        if let Some(token) = &credentials.token {
            request = request.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        request
    }

    async fn handle_response<T: DeserializeOwned>(response: Response) -> BackendResult<T> {
        let response = Self::ensure_success(response).await?;
        response.json().await.map_err(Into::into)
    }

    async fn ensure_success(response: Response) -> BackendResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        // The backend reports failures as `{ "message": ... }`; anything else
        // (HTML error pages, empty bodies) is not shown to the user.
        let message = response
            .json::<serde_json::Value>()
            .await
            .ok()
            .and_then(|body| body.get("message").and_then(|m| m.as_str()).map(str::to_owned));
        Err(BackendError::Status {
            status: status.as_u16(),
            message,
        })
    }

    fn product_form(payload: &ProductPayload) -> BackendResult<Form> {
        let mut form = Form::new()
            .text("name", payload.name.clone())
            .text("category", payload.category.as_str())
            .text("filter", payload.filter.as_str())
            .text("description", payload.description.clone())
            .text("price", payload.price.to_string())
            .text("stock", payload.stock.to_string());

        if let Some(image) = &payload.image {
            let mut part = Part::bytes(image.bytes.clone()).file_name(image.file_name.clone());
            if let Some(content_type) = &image.content_type {
                part = part.mime_str(content_type)?;
            }
            form = form.part("image", part);
        }
        Ok(form)
    }

    fn session_cookie(response: &Response) -> Option<String> {
        let pairs: Vec<&str> = response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .filter_map(|value| value.split(';').next())
            .map(str::trim)
            .filter(|pair| !pair.is_empty())
            .collect();
        if pairs.is_empty() {
            None
        } else {
            Some(pairs.join("; "))
        }
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn login(&self, email: &str, password: &str) -> BackendResult<Credentials> {
        let response = self
            .client
            .post(self.url("auth/login"))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;
        let response = Self::ensure_success(response).await?;

        let cookie = Self::session_cookie(&response);
        let token = response
            .json::<serde_json::Value>()
            .await
            .ok()
            .and_then(|body| body.get("token").and_then(|t| t.as_str()).map(str::to_owned));

        if cookie.is_none() && token.is_none() {
            tracing::warn!("backend login returned neither a session cookie nor a token");
        }
        Ok(Credentials { cookie, token })
    }

    async fn logout(&self, credentials: &Credentials) -> BackendResult<()> {
        let request = Self::authorize(self.client.post(self.url("auth/logout")), credentials);
        Self::ensure_success(request.send().await?).await?;
        Ok(())
    }

    async fn profile(&self, credentials: &Credentials) -> BackendResult<Profile> {
        let request = Self::authorize(self.client.get(self.url("auth/profile")), credentials);
        Self::handle_response(request.send().await?).await
    }

    async fn list_products(&self, credentials: &Credentials) -> BackendResult<Vec<Product>> {
        let request = Self::authorize(self.client.get(self.url("products")), credentials);
        Self::handle_response(request.send().await?).await
    }

    async fn create_product(
        &self,
        credentials: &Credentials,
        payload: &ProductPayload,
    ) -> BackendResult<Product> {
        let form = Self::product_form(payload)?;
        let request = Self::authorize(self.client.post(self.url("products")), credentials);
        Self::handle_response(request.multipart(form).send().await?).await
    }

    async fn update_product(
        &self,
        credentials: &Credentials,
        id: &ProductId,
        payload: &ProductPayload,
    ) -> BackendResult<Product> {
        let form = Self::product_form(payload)?;
        let request = Self::authorize(
            self.client.put(self.url(&format!("products/{id}"))),
            credentials,
        );
        Self::handle_response(request.multipart(form).send().await?).await
    }

    async fn delete_product(&self, credentials: &Credentials, id: &ProductId) -> BackendResult<()> {
        let request = Self::authorize(
            self.client.delete(self.url(&format!("products/{id}"))),
            credentials,
        );
        Self::ensure_success(request.send().await?).await?;
        Ok(())
    }

    async fn list_orders(&self, credentials: &Credentials) -> BackendResult<Vec<Order>> {
        let request = Self::authorize(self.client.get(self.url("orders")), credentials);
        Self::handle_response(request.send().await?).await
    }

    async fn set_order_paid(
        &self,
        credentials: &Credentials,
        id: &OrderId,
        paid: bool,
    ) -> BackendResult<()> {
        let request = Self::authorize(
            self.client.put(self.url(&format!("orders/{id}/pay"))),
            credentials,
        );
        Self::ensure_success(request.json(&json!({ "isPaid": paid })).send().await?).await?;
        Ok(())
    }

    async fn set_order_delivered(
        &self,
        credentials: &Credentials,
        id: &OrderId,
        delivered: bool,
    ) -> BackendResult<()> {
        let request = Self::authorize(
            self.client.put(self.url(&format!("orders/{id}/deliver"))),
            credentials,
        );
        Self::ensure_success(
            request
                .json(&json!({ "isDelivered": delivered }))
                .send()
                .await?,
        )
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, headers: &[(&str, &str)], body: &'static str) -> Response {
        let mut builder = axum::http::Response::builder().status(status);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        Response::from(builder.body(body).unwrap())
    }

    #[test]
    fn session_cookie_keeps_only_name_value_pairs() {
        let resp = response(
            200,
            &[
                ("set-cookie", "jwt=abc; Path=/; HttpOnly"),
                ("set-cookie", "theme=dark; Max-Age=3600"),
            ],
            "",
        );
        assert_eq!(HttpBackend::session_cookie(&resp).as_deref(), Some("jwt=abc; theme=dark"));
        assert_eq!(HttpBackend::session_cookie(&response(200, &[], "")), None);
    }

    #[tokio::test]
    async fn failure_message_comes_from_json_body() {
        let resp = response(
            400,
            &[("content-type", "application/json")],
            r#"{"message":"Product not found"}"#,
        );
        match HttpBackend::ensure_success(resp).await {
            Err(BackendError::Status { status, message }) => {
                assert_eq!(status, 400);
                assert_eq!(message.as_deref(), Some("Product not found"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn html_error_page_has_no_message() {
        let resp = response(502, &[("content-type", "text/html")], "<h1>Bad Gateway</h1>");
        match HttpBackend::ensure_success(resp).await {
            Err(BackendError::Status { status, message }) => {
                assert_eq!(status, 502);
                assert_eq!(message, None);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn success_passes_through() {
        let resp = response(201, &[], "{}");
        assert!(HttpBackend::ensure_success(resp).await.is_ok());
    }

    #[test]
    fn url_joins_without_double_slashes() {
        let backend = HttpBackend::new("http://localhost:5000/api/", Duration::from_secs(1)).unwrap();
        assert_eq!(backend.url("/products"), "http://localhost:5000/api/products");
        assert_eq!(backend.url("orders/1/pay"), "http://localhost:5000/api/orders/1/pay");
    }
}
