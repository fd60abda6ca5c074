//! Create-product form and edit-product modal, one draft each per session.

use axum::{
    Json, Router,
    extract::{
        Multipart, State,
        multipart::{Field, MultipartError},
    },
    http::StatusCode,
    routing::{get, post, put},
};

use crate::{
    catalog::{
        DraftField, ImageUpload,
        draft::DraftView,
        page::{EditorView, ProductsView},
    },
    dto::products::{ImageForm, SetFieldRequest},
    error::{AppError, AppResult},
    middleware::auth::AdminSession,
    models::Product,
    response::ApiResponse,
    services::product_service,
    state::AppState,
};

pub fn create_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(create_form).patch(set_create_field).delete(reset_create_form),
        )
        .route("/image", put(stage_create_image))
        .route("/submit", post(submit_create))
}

pub fn edit_router() -> Router<AppState> {
    Router::new()
        .route("/", get(edit_form).patch(set_edit_field).delete(cancel_edit))
        .route("/image", put(stage_edit_image))
        .route("/save", post(save_edit))
}

/// Reads the text fields and optional `image` file of a product form.
pub async fn read_product_form(
    mut multipart: Multipart,
) -> AppResult<(Vec<(DraftField, String)>, Option<ImageUpload>)> {
    let mut fields = Vec::new();
    let mut image = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(multipart_error)?
    {
        let name = field.name().unwrap_or_default().to_string();
        if name == "image" {
            image = read_upload(field).await?;
            continue;
        }
        let field_name: DraftField = name.parse()?;
        let value = field
            .text()
            .await
            .map_err(multipart_error)?;
        fields.push((field_name, value));
    }

    Ok((fields, image))
}

/// Reads the single `image` file of an image form.
pub async fn read_image(mut multipart: Multipart) -> AppResult<ImageUpload> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(multipart_error)?
    {
        if field.name() == Some("image") {
            if let Some(upload) = read_upload(field).await? {
                return Ok(upload);
            }
        }
    }
    Err(AppError::BadRequest("No image provided".into()))
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        tracing::warn!(error = %err, "upload over the body limit");
        return AppError::PayloadTooLarge;
    }
    AppError::BadRequest(format!("Multipart error: {}", err.body_text()))
}

async fn read_upload(field: Field<'_>) -> AppResult<Option<ImageUpload>> {
    let file_name = field.file_name().unwrap_or("image").to_string();
    let content_type = field.content_type().map(str::to_owned);
    let bytes = field
        .bytes()
        .await
        .map_err(multipart_error)?;
    // Browsers send an empty part when no file was chosen.
    if bytes.is_empty() {
        return Ok(None);
    }
    Ok(Some(ImageUpload {
        file_name,
        content_type,
        bytes: bytes.to_vec(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/create-product",
    responses((status = 200, description = "Create form draft", body = ApiResponse<DraftView>)),
    security(("bearer_auth" = [])),
    tag = "Create Product"
)]
pub async fn create_form(admin: AdminSession) -> Json<ApiResponse<DraftView>> {
    let session = admin.session.lock().await;
    Json(product_service::create_form(&session))
}

#[utoipa::path(
    patch,
    path = "/api/create-product",
    request_body = SetFieldRequest,
    responses(
        (status = 200, description = "Field set", body = ApiResponse<DraftView>),
        (status = 400, description = "Value not allowed")
    ),
    security(("bearer_auth" = [])),
    tag = "Create Product"
)]
pub async fn set_create_field(
    admin: AdminSession,
    Json(payload): Json<SetFieldRequest>,
) -> AppResult<Json<ApiResponse<DraftView>>> {
    let mut session = admin.session.lock().await;
    let resp = product_service::set_create_field(&mut session, payload.field, &payload.value)?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/create-product",
    responses((status = 200, description = "Form cleared", body = ApiResponse<DraftView>)),
    security(("bearer_auth" = [])),
    tag = "Create Product"
)]
pub async fn reset_create_form(admin: AdminSession) -> Json<ApiResponse<DraftView>> {
    let mut session = admin.session.lock().await;
    Json(product_service::reset_create_form(&mut session))
}

#[utoipa::path(
    put,
    path = "/api/create-product/image",
    request_body(content = ImageForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Image staged", body = ApiResponse<DraftView>),
        (status = 413, description = "Image is too large")
    ),
    security(("bearer_auth" = [])),
    tag = "Create Product"
)]
pub async fn stage_create_image(
    admin: AdminSession,
    multipart: Multipart,
) -> AppResult<Json<ApiResponse<DraftView>>> {
    let upload = read_image(multipart).await?;
    let mut session = admin.session.lock().await;
    Ok(Json(product_service::stage_create_image(&mut session, upload)))
}

#[utoipa::path(
    post,
    path = "/api/create-product/submit",
    responses(
        (status = 200, description = "Product created", body = ApiResponse<Product>),
        (status = 400, description = "Required fields missing")
    ),
    security(("bearer_auth" = [])),
    tag = "Create Product"
)]
pub async fn submit_create(
    State(state): State<AppState>,
    admin: AdminSession,
) -> AppResult<Json<ApiResponse<Product>>> {
    let mut session = admin.session.lock().await;
    let resp = product_service::submit_create(state.backend.as_ref(), &mut session).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/edit-product",
    responses(
        (status = 200, description = "Open edit draft", body = ApiResponse<EditorView>),
        (status = 409, description = "No product is being edited")
    ),
    security(("bearer_auth" = [])),
    tag = "Edit Product"
)]
pub async fn edit_form(admin: AdminSession) -> AppResult<Json<ApiResponse<EditorView>>> {
    let session = admin.session.lock().await;
    Ok(Json(product_service::edit_form(&session)?))
}

#[utoipa::path(
    patch,
    path = "/api/edit-product",
    request_body = SetFieldRequest,
    responses(
        (status = 200, description = "Field set", body = ApiResponse<EditorView>),
        (status = 400, description = "Value not allowed"),
        (status = 409, description = "No product is being edited")
    ),
    security(("bearer_auth" = [])),
    tag = "Edit Product"
)]
pub async fn set_edit_field(
    admin: AdminSession,
    Json(payload): Json<SetFieldRequest>,
) -> AppResult<Json<ApiResponse<EditorView>>> {
    let mut session = admin.session.lock().await;
    let resp = product_service::set_edit_field(&mut session, payload.field, &payload.value)?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/edit-product/image",
    request_body(content = ImageForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Image staged", body = ApiResponse<EditorView>),
        (status = 409, description = "No product is being edited"),
        (status = 413, description = "Image is too large")
    ),
    security(("bearer_auth" = [])),
    tag = "Edit Product"
)]
pub async fn stage_edit_image(
    admin: AdminSession,
    multipart: Multipart,
) -> AppResult<Json<ApiResponse<EditorView>>> {
    let upload = read_image(multipart).await?;
    let mut session = admin.session.lock().await;
    Ok(Json(product_service::stage_edit_image(&mut session, upload)?))
}

#[utoipa::path(
    delete,
    path = "/api/edit-product",
    responses(
        (status = 200, description = "Edit discarded", body = ApiResponse<ProductsView>),
        (status = 409, description = "No product is being edited")
    ),
    security(("bearer_auth" = [])),
    tag = "Edit Product"
)]
pub async fn cancel_edit(admin: AdminSession) -> AppResult<Json<ApiResponse<ProductsView>>> {
    let mut session = admin.session.lock().await;
    Ok(Json(product_service::cancel_edit(&mut session)?))
}

#[utoipa::path(
    post,
    path = "/api/edit-product/save",
    responses(
        (status = 200, description = "Product updated", body = ApiResponse<Product>),
        (status = 400, description = "Required fields missing"),
        (status = 409, description = "No product is being edited")
    ),
    security(("bearer_auth" = [])),
    tag = "Edit Product"
)]
pub async fn save_edit(
    State(state): State<AppState>,
    admin: AdminSession,
) -> AppResult<Json<ApiResponse<Product>>> {
    let mut session = admin.session.lock().await;
    let resp = product_service::save_edit(state.backend.as_ref(), &mut session).await?;
    Ok(Json(resp))
}
