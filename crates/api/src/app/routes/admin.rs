//! Admin routes: catalog editing, packages, share links.
//!
//! Every route here sits behind the Basic-auth gate.

use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, patch, post},
    Json, Router,
};
use serde_json::Value;

use fimenu_catalog::{
    share, AddProduct, Catalog, CatalogCommand, DeleteProduct, EditProduct, ProductEdit,
    ReplaceProducts, SelectionSet, packages_from_json,
};
use fimenu_core::ProductId;

use crate::app::{dto, errors, services::AppServices};
use crate::context::AdminContext;

pub fn router() -> Router {
    Router::new()
        .route(
            "/products",
            get(list_products).post(add_product).put(import_products),
        )
        .route("/products/export", get(export_products))
        .route("/products/reset", post(reset_products))
        .route(
            "/products/:id",
            patch(edit_product).delete(delete_product),
        )
        .route("/packages", get(list_packages).put(replace_packages))
        .route("/share", get(share_links))
}

fn parse_product_id(raw: &str) -> Result<ProductId, axum::response::Response> {
    raw.parse().map_err(errors::domain_error_to_response)
}

/// GET /admin/products
pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.catalog() {
        Ok(catalog) => (StatusCode::OK, Json(catalog.products().to_vec())).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

/// POST /admin/products  (optional body `{"id": "..."}`)
pub async fn add_product(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(admin): Extension<AdminContext>,
    body: Option<Json<dto::AddProductRequest>>,
) -> axum::response::Response {
    let requested = body.and_then(|Json(b)| b.id);
    let product_id = match requested {
        Some(raw) => match parse_product_id(&raw) {
            Ok(id) => id,
            Err(res) => return res,
        },
        None => ProductId::generate(),
    };

    let cmd = CatalogCommand::AddProduct(AddProduct {
        product_id: product_id.clone(),
    });
    match services.dispatch(cmd) {
        Ok(catalog) => {
            tracing::info!(admin = admin.user(), product_id = %product_id, "product added");
            match catalog.get(&product_id) {
                Some(p) => (StatusCode::CREATED, Json(p.clone())).into_response(),
                None => errors::json_error(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "missing_product",
                    "added product not found",
                ),
            }
        }
        Err(e) => errors::service_error_to_response(e),
    }
}

/// PUT /admin/products  (JSON array; each record normalized)
pub async fn import_products(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(admin): Extension<AdminContext>,
    Json(body): Json<Value>,
) -> axum::response::Response {
    let Some(imported) = Catalog::from_json(&body) else {
        return errors::json_error(
            StatusCode::BAD_REQUEST,
            "validation_error",
            "expected a JSON array of products",
        );
    };

    let cmd = CatalogCommand::ReplaceProducts(ReplaceProducts {
        products: imported.into_products(),
    });
    match services.dispatch(cmd) {
        Ok(catalog) => {
            tracing::info!(admin = admin.user(), products = catalog.len(), "catalog imported");
            (StatusCode::OK, Json(catalog.products().to_vec())).into_response()
        }
        Err(e) => errors::service_error_to_response(e),
    }
}

/// GET /admin/products/export  (pretty JSON download)
pub async fn export_products(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let catalog = match services.catalog() {
        Ok(c) => c,
        Err(e) => return errors::service_error_to_response(e),
    };
    let body = match serde_json::to_string_pretty(catalog.products()) {
        Ok(b) => b,
        Err(e) => {
            return errors::json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "serialize_error",
                e.to_string(),
            );
        }
    };
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/json"),
            (header::CONTENT_DISPOSITION, "attachment; filename=\"fi_products.json\""),
        ],
        body,
    )
        .into_response()
}

/// POST /admin/products/reset
pub async fn reset_products(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(admin): Extension<AdminContext>,
) -> axum::response::Response {
    match services.dispatch(CatalogCommand::ResetToDefaults) {
        Ok(catalog) => {
            tracing::info!(admin = admin.user(), "catalog reset to defaults");
            (StatusCode::OK, Json(catalog.products().to_vec())).into_response()
        }
        Err(e) => errors::service_error_to_response(e),
    }
}

/// PATCH /admin/products/:id  `{"field": "price", "value": 1999}`
pub async fn edit_product(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(admin): Extension<AdminContext>,
    Path(id): Path<String>,
    Json(body): Json<dto::EditFieldRequest>,
) -> axum::response::Response {
    let product_id = match parse_product_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };
    let edit = match ProductEdit::from_field(&body.field, &body.value) {
        Ok(e) => e,
        Err(e) => return errors::domain_error_to_response(e),
    };

    let current_id = match &edit {
        ProductEdit::Id(new_id) => new_id.clone(),
        _ => product_id.clone(),
    };

    let cmd = CatalogCommand::EditProduct(EditProduct { product_id, edit });
    match services.dispatch(cmd) {
        Ok(catalog) => {
            tracing::info!(admin = admin.user(), product_id = %current_id, field = %body.field, "product edited");
            match catalog.get(&current_id) {
                Some(p) => (StatusCode::OK, Json(p.clone())).into_response(),
                None => errors::json_error(StatusCode::NOT_FOUND, "not_found", "product not found"),
            }
        }
        Err(e) => errors::service_error_to_response(e),
    }
}

/// DELETE /admin/products/:id
pub async fn delete_product(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(admin): Extension<AdminContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let product_id = match parse_product_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };

    let cmd = CatalogCommand::DeleteProduct(DeleteProduct {
        product_id: product_id.clone(),
    });
    match services.dispatch(cmd) {
        Ok(_) => {
            tracing::info!(admin = admin.user(), product_id = %product_id, "product deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => errors::service_error_to_response(e),
    }
}

/// GET /admin/packages
pub async fn list_packages(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.packages() {
        Ok(packages) => (StatusCode::OK, Json(packages)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

/// PUT /admin/packages  (JSON array; each record normalized)
pub async fn replace_packages(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(admin): Extension<AdminContext>,
    Json(body): Json<Value>,
) -> axum::response::Response {
    let Some(packages) = packages_from_json(&body) else {
        return errors::json_error(
            StatusCode::BAD_REQUEST,
            "validation_error",
            "expected a JSON array of packages",
        );
    };
    match services.replace_packages(packages) {
        Ok(saved) => {
            tracing::info!(admin = admin.user(), packages = saved.len(), "packages saved");
            (StatusCode::OK, Json(saved)).into_response()
        }
        Err(e) => errors::service_error_to_response(e),
    }
}

/// GET /admin/share  (current catalog, nothing selected)
pub async fn share_links(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let catalog = match services.catalog() {
        Ok(c) => c,
        Err(e) => return errors::service_error_to_response(e),
    };
    let view = dto::ShareView {
        products_token: catalog.to_token(),
        selections_token: SelectionSet::new().to_token(),
        admin_share_url: share::admin_share_url(services.public_url(), &catalog).to_string(),
    };
    (StatusCode::OK, Json(view)).into_response()
}
