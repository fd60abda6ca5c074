use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};

use crate::{
    dto::orders::{OrderList, OrderView},
    error::AppResult,
    middleware::auth::AdminSession,
    models::OrderId,
    response::ApiResponse,
    services::order_service,
    state::AppState,
};

pub fn route() -> Router<AppState> {
    Router::new()
        .route("/", get(list_orders))
        .route("/refresh", post(refresh_orders))
        .route("/{id}/toggle-paid", post(toggle_paid))
        .route("/{id}/toggle-delivered", post(toggle_delivered))
}

#[utoipa::path(
    get,
    path = "/api/orders",
    responses(
        (status = 200, description = "All orders", body = ApiResponse<OrderList>),
        (status = 502, description = "Orders could not be loaded")
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn list_orders(
    State(state): State<AppState>,
    admin: AdminSession,
) -> AppResult<Json<ApiResponse<OrderList>>> {
    let mut session = admin.session.lock().await;
    let resp = order_service::view_orders(state.backend.as_ref(), &mut session).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/orders/refresh",
    responses((status = 200, description = "Orders reloaded", body = ApiResponse<OrderList>)),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn refresh_orders(
    State(state): State<AppState>,
    admin: AdminSession,
) -> AppResult<Json<ApiResponse<OrderList>>> {
    let mut session = admin.session.lock().await;
    let resp = order_service::refresh_orders(state.backend.as_ref(), &mut session).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/orders/{id}/toggle-paid",
    params(("id" = String, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Payment status flipped", body = ApiResponse<OrderView>),
        (status = 404, description = "Order not loaded")
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn toggle_paid(
    State(state): State<AppState>,
    admin: AdminSession,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<OrderView>>> {
    let mut session = admin.session.lock().await;
    let resp =
        order_service::toggle_paid(state.backend.as_ref(), &mut session, &OrderId(id)).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/orders/{id}/toggle-delivered",
    params(("id" = String, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Delivery status flipped", body = ApiResponse<OrderView>),
        (status = 404, description = "Order not loaded")
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn toggle_delivered(
    State(state): State<AppState>,
    admin: AdminSession,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<OrderView>>> {
    let mut session = admin.session.lock().await;
    let resp =
        order_service::toggle_delivered(state.backend.as_ref(), &mut session, &OrderId(id)).await?;
    Ok(Json(resp))
}
