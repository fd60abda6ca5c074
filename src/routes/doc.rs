use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    catalog::{
        Category, DraftField, Filter,
        draft::DraftView,
        page::{EditorView, ProductCard, ProductsView},
        taxonomy::TaxonomyEntry,
    },
    dto::{
        auth::{LoginRequest, LoginResponse},
        orders::{OrderList, OrderView},
        products::{ImageForm, ProductForm, QueryRequest, SetFieldRequest, Taxonomy},
    },
    error::ErrorData,
    models::{Order, OrderItem, Product, ProductId, Profile},
    response::{ApiResponse, Meta},
    routes::{auth, forms, health, orders, params, products},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("UUID")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::login,
        auth::profile,
        auth::logout,
        products::view_products,
        products::refresh_products,
        products::set_query,
        products::load_more,
        products::create_product,
        products::open_edit,
        products::delete_product,
        products::list_taxonomy,
        forms::create_form,
        forms::set_create_field,
        forms::reset_create_form,
        forms::stage_create_image,
        forms::submit_create,
        forms::edit_form,
        forms::set_edit_field,
        forms::stage_edit_image,
        forms::cancel_edit,
        forms::save_edit,
        orders::list_orders,
        orders::refresh_orders,
        orders::toggle_paid,
        orders::toggle_delivered
    ),
    components(
        schemas(
            Product,
            ProductId,
            Order,
            OrderItem,
            Profile,
            Category,
            Filter,
            DraftField,
            DraftView,
            EditorView,
            ProductsView,
            ProductCard,
            OrderView,
            TaxonomyEntry,
            Taxonomy,
            LoginRequest,
            LoginResponse,
            SetFieldRequest,
            QueryRequest,
            ProductForm,
            ImageForm,
            OrderList,
            params::DeleteParams,
            health::HealthData,
            ErrorData,
            Meta,
            ApiResponse<Product>,
            ApiResponse<ProductsView>,
            ApiResponse<DraftView>,
            ApiResponse<EditorView>,
            ApiResponse<OrderList>,
            ApiResponse<OrderView>
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Admin login and dashboard sessions"),
        (name = "Products", description = "Product listing, search and delete"),
        (name = "Create Product", description = "Create product form"),
        (name = "Edit Product", description = "Edit product modal"),
        (name = "Orders", description = "Order status management"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
