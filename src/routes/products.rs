use axum::{
    Json, Router,
    extract::{Multipart, Path, Query, State},
    routing::{delete, get, post, put},
};

use crate::{
    catalog::{page::EditorView, page::ProductsView, taxonomy},
    dto::products::{ProductForm, QueryRequest, Taxonomy},
    error::AppResult,
    middleware::auth::AdminSession,
    models::{Product, ProductId},
    response::{ApiResponse, Meta},
    routes::{forms::read_product_form, params::DeleteParams},
    services::product_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(view_products).post(create_product))
        .route("/query", put(set_query))
        .route("/load-more", post(load_more))
        .route("/refresh", post(refresh_products))
        .route("/{id}", delete(delete_product))
        .route("/{id}/edit", post(open_edit))
}

#[utoipa::path(
    get,
    path = "/api/products",
    responses(
        (status = 200, description = "Visible window of the filtered listing", body = ApiResponse<ProductsView>),
        (status = 502, description = "Products could not be loaded")
    ),
    security(("bearer_auth" = [])),
    tag = "Products"
)]
pub async fn view_products(
    State(state): State<AppState>,
    admin: AdminSession,
) -> AppResult<Json<ApiResponse<ProductsView>>> {
    let mut session = admin.session.lock().await;
    let resp = product_service::view_products(state.backend.as_ref(), &mut session).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/products/refresh",
    responses(
        (status = 200, description = "Listing reloaded", body = ApiResponse<ProductsView>),
        (status = 502, description = "Products could not be loaded")
    ),
    security(("bearer_auth" = [])),
    tag = "Products"
)]
pub async fn refresh_products(
    State(state): State<AppState>,
    admin: AdminSession,
) -> AppResult<Json<ApiResponse<ProductsView>>> {
    let mut session = admin.session.lock().await;
    let resp = product_service::refresh_products(state.backend.as_ref(), &mut session).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/products/query",
    request_body = QueryRequest,
    responses(
        (status = 200, description = "Listing filtered", body = ApiResponse<ProductsView>),
        (status = 400, description = "Filter does not belong to the category")
    ),
    security(("bearer_auth" = [])),
    tag = "Products"
)]
pub async fn set_query(
    admin: AdminSession,
    Json(payload): Json<QueryRequest>,
) -> AppResult<Json<ApiResponse<ProductsView>>> {
    let mut session = admin.session.lock().await;
    Ok(Json(product_service::set_query(&mut session, payload)?))
}

#[utoipa::path(
    post,
    path = "/api/products/load-more",
    responses((status = 200, description = "Window widened", body = ApiResponse<ProductsView>)),
    security(("bearer_auth" = [])),
    tag = "Products"
)]
pub async fn load_more(admin: AdminSession) -> AppResult<Json<ApiResponse<ProductsView>>> {
    let mut session = admin.session.lock().await;
    Ok(Json(product_service::load_more(&mut session)?))
}

#[utoipa::path(
    post,
    path = "/api/products",
    request_body(content = ProductForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Product created", body = ApiResponse<Product>),
        (status = 400, description = "Required fields missing"),
        (status = 413, description = "Image is too large")
    ),
    security(("bearer_auth" = [])),
    tag = "Products"
)]
/// Creates a product from one multipart form. The staged create form is left untouched.
pub async fn create_product(
    State(state): State<AppState>,
    admin: AdminSession,
    multipart: Multipart,
) -> AppResult<Json<ApiResponse<Product>>> {
    let (fields, image) = read_product_form(multipart).await?;
    let mut session = admin.session.lock().await;
    let resp =
        product_service::create_product(state.backend.as_ref(), &mut session, fields, image).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/products/{id}/edit",
    params(("id" = String, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Edit modal opened", body = ApiResponse<EditorView>),
        (status = 404, description = "Product not in listing")
    ),
    security(("bearer_auth" = [])),
    tag = "Products"
)]
pub async fn open_edit(
    admin: AdminSession,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<EditorView>>> {
    let mut session = admin.session.lock().await;
    Ok(Json(product_service::open_edit(
        &mut session,
        &ProductId(id),
    )?))
}

#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    params(
        ("id" = String, Path, description = "Product ID"),
        DeleteParams
    ),
    responses(
        (status = 200, description = "Product deleted"),
        (status = 404, description = "Product not in listing"),
        (status = 428, description = "Deletion not confirmed")
    ),
    security(("bearer_auth" = [])),
    tag = "Products"
)]
pub async fn delete_product(
    State(state): State<AppState>,
    admin: AdminSession,
    Path(id): Path<String>,
    Query(params): Query<DeleteParams>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let mut session = admin.session.lock().await;
    let resp = product_service::delete_product(
        state.backend.as_ref(),
        &mut session,
        &ProductId(id),
        params.confirm,
    )
    .await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/taxonomy",
    responses((status = 200, description = "Categories and their filters", body = ApiResponse<Taxonomy>)),
    tag = "Products"
)]
pub async fn list_taxonomy() -> Json<ApiResponse<Taxonomy>> {
    let categories = taxonomy::taxonomy();
    let meta = Meta::total(categories.len());
    Json(ApiResponse::success(
        "Taxonomy",
        Taxonomy { categories },
        Some(meta),
    ))
}
