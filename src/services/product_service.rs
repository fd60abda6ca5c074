use crate::{
    backend::Backend,
    catalog::{
        DraftError, DraftField, FormDraft, ImageUpload, ProductQuery,
        draft::DraftView,
        page::{EditorView, ProductsView},
    },
    dto::products::QueryRequest,
    error::{AppError, AppResult},
    models::{Product, ProductId},
    response::{ApiResponse, Meta},
    session::DashboardSession,
};

/// Products page, loading the snapshot on first view.
pub async fn view_products(
    backend: &dyn Backend,
    session: &mut DashboardSession,
) -> AppResult<ApiResponse<ProductsView>> {
    if !session.products.is_loaded() {
        load_products(backend, session).await?;
    }
    Ok(products_response("Products", session))
}

pub async fn refresh_products(
    backend: &dyn Backend,
    session: &mut DashboardSession,
) -> AppResult<ApiResponse<ProductsView>> {
    load_products(backend, session).await?;
    Ok(products_response("Products", session))
}

/// Replaces the snapshot with the backend's full product list. On failure
/// the page keeps whatever it showed before.
pub async fn load_products(backend: &dyn Backend, session: &mut DashboardSession) -> AppResult<usize> {
    let products = backend
        .list_products(&session.credentials)
        .await
        .map_err(|err| {
            tracing::warn!(error = %err, "product load failed");
            AppError::backend("Failed to load products", err)
        })?;
    let count = products.len();
    session.products.load(products);
    tracing::debug!(count, "products loaded");
    Ok(count)
}

pub fn set_query(
    session: &mut DashboardSession,
    payload: QueryRequest,
) -> AppResult<ApiResponse<ProductsView>> {
    let mut query = ProductQuery::new(payload.search, None, None);
    query.set_category(payload.category);
    if let Some(filter) = payload.filter {
        if !query.category.is_some_and(|c| c.allows(filter)) {
            return Err(DraftError::FilterOutsideCategory {
                filter: filter.as_str().to_string(),
            }
            .into());
        }
        query.filter = Some(filter);
    }
    session.products.query = query;
    Ok(products_response("Products", session))
}

pub fn load_more(session: &mut DashboardSession) -> AppResult<ApiResponse<ProductsView>> {
    session.products.reveal.load_more();
    Ok(products_response("Products", session))
}

fn products_response(message: &str, session: &DashboardSession) -> ApiResponse<ProductsView> {
    let (view, meta) = session.products.view();
    ApiResponse::success(message, view, Some(meta))
}

// ----- create form -----

pub fn create_form(session: &DashboardSession) -> ApiResponse<DraftView> {
    ApiResponse::success("Create product", session.create_form.view(), None)
}

pub fn set_create_field(
    session: &mut DashboardSession,
    field: DraftField,
    value: &str,
) -> AppResult<ApiResponse<DraftView>> {
    session.create_form.set_field(field, value)?;
    Ok(create_form(session))
}

pub fn stage_create_image(
    session: &mut DashboardSession,
    upload: ImageUpload,
) -> ApiResponse<DraftView> {
    session.create_form.set_image(upload);
    create_form(session)
}

pub fn reset_create_form(session: &mut DashboardSession) -> ApiResponse<DraftView> {
    session.create_form = FormDraft::empty();
    create_form(session)
}

/// Builds a draft from submitted fields and submits it in one go. The staged
/// create form is left as it was, whatever the outcome.
pub async fn create_product(
    backend: &dyn Backend,
    session: &mut DashboardSession,
    fields: Vec<(DraftField, String)>,
    image: Option<ImageUpload>,
) -> AppResult<ApiResponse<Product>> {
    let mut draft = FormDraft::empty();
    // Category first so a filter sent before it is not wiped afterwards.
    let (categories, others): (Vec<_>, Vec<_>) = fields
        .into_iter()
        .partition(|(field, _)| *field == DraftField::Category);
    for (field, value) in categories.into_iter().chain(others) {
        draft.set_field(field, &value)?;
    }
    if let Some(upload) = image {
        draft.set_image(upload);
    }

    let product = send_create(backend, session, &draft).await?;
    Ok(created_response(product))
}

/// Submits the staged create form, clearing it on success. On failure the
/// form keeps its values.
pub async fn submit_create(
    backend: &dyn Backend,
    session: &mut DashboardSession,
) -> AppResult<ApiResponse<Product>> {
    let draft = session.create_form.clone();
    let product = send_create(backend, session, &draft).await?;
    session.create_form = FormDraft::empty();
    Ok(created_response(product))
}

async fn send_create(
    backend: &dyn Backend,
    session: &mut DashboardSession,
    draft: &FormDraft,
) -> AppResult<Product> {
    let payload = draft.to_payload().map_err(AppError::MissingFields)?;

    let product = backend
        .create_product(&session.credentials, &payload)
        .await
        .map_err(|err| {
            tracing::warn!(error = %err, "product create failed");
            AppError::backend("Creation failed", err)
        })?;

    if session.products.is_loaded() {
        session.products.listing.insert(product.clone());
    }
    tracing::info!(product_id = %product.id, "product created");
    Ok(product)
}

fn created_response(product: Product) -> ApiResponse<Product> {
    ApiResponse::success("Product created successfully!", product, Some(Meta::empty()))
}

// ----- edit modal -----

pub fn open_edit(session: &mut DashboardSession, id: &ProductId) -> AppResult<ApiResponse<EditorView>> {
    let product = session
        .products
        .listing
        .get(id)
        .cloned()
        .ok_or(AppError::NotFound)?;
    session.products.editor.open(product);
    edit_form(session)
}

pub fn edit_form(session: &DashboardSession) -> AppResult<ApiResponse<EditorView>> {
    let view = session.products.editor_view().ok_or(AppError::NotEditing)?;
    Ok(ApiResponse::success("Edit product", view, None))
}

pub fn set_edit_field(
    session: &mut DashboardSession,
    field: DraftField,
    value: &str,
) -> AppResult<ApiResponse<EditorView>> {
    session
        .products
        .editor
        .draft_mut()
        .ok_or(AppError::NotEditing)?
        .set_field(field, value)?;
    edit_form(session)
}

pub fn stage_edit_image(
    session: &mut DashboardSession,
    upload: ImageUpload,
) -> AppResult<ApiResponse<EditorView>> {
    session
        .products
        .editor
        .draft_mut()
        .ok_or(AppError::NotEditing)?
        .set_image(upload);
    edit_form(session)
}

/// Closes the modal without sending anything.
pub fn cancel_edit(session: &mut DashboardSession) -> AppResult<ApiResponse<ProductsView>> {
    session.products.editor.cancel().ok_or(AppError::NotEditing)?;
    Ok(products_response("Edit cancelled", session))
}

/// Sends the edit draft as a full replace. The listing takes the server's
/// record before the modal closes; on failure the modal stays open with the
/// draft intact.
pub async fn save_edit(
    backend: &dyn Backend,
    session: &mut DashboardSession,
) -> AppResult<ApiResponse<Product>> {
    let id = session
        .products
        .editor
        .target()
        .cloned()
        .ok_or(AppError::NotEditing)?;
    let payload = session
        .products
        .editor
        .draft()
        .ok_or(AppError::NotEditing)?
        .to_payload()
        .map_err(AppError::MissingFields)?;

    let product = backend
        .update_product(&session.credentials, &id, &payload)
        .await
        .map_err(|err| {
            tracing::warn!(error = %err, product_id = %id, "product update failed");
            AppError::backend("Update failed", err)
        })?;

    if !session.products.listing.replace_one(&id, product.clone()) {
        tracing::debug!(product_id = %id, "updated product no longer in snapshot");
    }
    session.products.editor.finish();
    tracing::info!(product_id = %id, "product updated");

    Ok(ApiResponse::success(
        "Product updated successfully!",
        product,
        Some(Meta::empty()),
    ))
}

// ----- delete -----

pub async fn delete_product(
    backend: &dyn Backend,
    session: &mut DashboardSession,
    id: &ProductId,
    confirmed: bool,
) -> AppResult<ApiResponse<serde_json::Value>> {
    if !confirmed {
        return Err(AppError::ConfirmationRequired);
    }
    if session.products.listing.get(id).is_none() {
        return Err(AppError::NotFound);
    }

    backend
        .delete_product(&session.credentials, id)
        .await
        .map_err(|err| {
            tracing::warn!(error = %err, product_id = %id, "product delete failed");
            AppError::backend("Failed to delete product", err)
        })?;

    session.products.listing.remove_one(id);
    if session.products.editor.target() == Some(id) {
        session.products.editor.finish();
    }
    tracing::info!(product_id = %id, "product deleted");

    Ok(ApiResponse::success(
        "Product deleted successfully!",
        serde_json::json!({ "id": id }),
        Some(Meta::empty()),
    ))
}
