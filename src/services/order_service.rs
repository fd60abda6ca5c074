use crate::{
    backend::Backend,
    dto::orders::{OrderList, OrderView},
    error::{AppError, AppResult},
    models::OrderId,
    orders::OrderFlag,
    response::{ApiResponse, Meta},
    session::DashboardSession,
};

/// Orders page, loading the snapshot on first view.
pub async fn view_orders(
    backend: &dyn Backend,
    session: &mut DashboardSession,
) -> AppResult<ApiResponse<OrderList>> {
    if !session.orders.is_loaded() {
        load_orders(backend, session).await?;
    }
    Ok(orders_response(session))
}

pub async fn refresh_orders(
    backend: &dyn Backend,
    session: &mut DashboardSession,
) -> AppResult<ApiResponse<OrderList>> {
    load_orders(backend, session).await?;
    Ok(orders_response(session))
}

pub async fn load_orders(backend: &dyn Backend, session: &mut DashboardSession) -> AppResult<usize> {
    let orders = backend
        .list_orders(&session.credentials)
        .await
        .map_err(|err| {
            tracing::warn!(error = %err, "order load failed");
            AppError::backend("Failed to load orders", err)
        })?;
    let count = orders.len();
    session.orders.set_all(orders);
    Ok(count)
}

fn orders_response(session: &DashboardSession) -> ApiResponse<OrderList> {
    let items: Vec<OrderView> = session
        .orders
        .all()
        .iter()
        .cloned()
        .map(OrderView::from)
        .collect();
    let meta = Meta::total(items.len());
    ApiResponse::success("Orders", OrderList { items }, Some(meta))
}

pub async fn toggle_paid(
    backend: &dyn Backend,
    session: &mut DashboardSession,
    id: &OrderId,
) -> AppResult<ApiResponse<OrderView>> {
    toggle(backend, session, id, OrderFlag::Paid).await
}

pub async fn toggle_delivered(
    backend: &dyn Backend,
    session: &mut DashboardSession,
    id: &OrderId,
) -> AppResult<ApiResponse<OrderView>> {
    toggle(backend, session, id, OrderFlag::Delivered).await
}

/// Sends the negation of the displayed flag and mirrors it locally once the
/// backend accepted it.
async fn toggle(
    backend: &dyn Backend,
    session: &mut DashboardSession,
    id: &OrderId,
    flag: OrderFlag,
) -> AppResult<ApiResponse<OrderView>> {
    let current = session
        .orders
        .get(id)
        .map(|order| flag.read(order))
        .ok_or(AppError::NotFound)?;
    let next = !current;

    let sent = match flag {
        OrderFlag::Paid => backend.set_order_paid(&session.credentials, id, next).await,
        OrderFlag::Delivered => {
            backend
                .set_order_delivered(&session.credentials, id, next)
                .await
        }
    };
    sent.map_err(|err| {
        tracing::warn!(error = %err, order_id = %id, ?flag, "order status update failed");
        AppError::backend(flag.failure_message(), err)
    })?;

    let order = session
        .orders
        .apply(id, flag, next)
        .cloned()
        .ok_or(AppError::NotFound)?;
    tracing::info!(order_id = %id, ?flag, value = next, "order status updated");

    Ok(ApiResponse::success(
        flag.marked_message(next),
        OrderView::from(order),
        Some(Meta::empty()),
    ))
}
