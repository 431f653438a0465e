use serde::{Deserialize, Serialize};
use serde_json::Value;

use fimenu_catalog::{Catalog, CatalogSource, MenuState, Package, Product, SelectionSet, share};
use fimenu_core::Money;
use url::Url;

// -------------------------
// Request DTOs
// -------------------------

/// Share-link query parameters (`?products=<token>&selections=<token>`).
#[derive(Debug, Default, Deserialize)]
pub struct MenuQuery {
    pub products: Option<String>,
    pub selections: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ToggleRequest {
    pub id: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct AddProductRequest {
    pub id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct EditFieldRequest {
    pub field: String,
    #[serde(default)]
    pub value: Value,
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct ProductView {
    #[serde(flatten)]
    pub product: Product,
    pub price_display: String,
    /// Sanitized link; `null` when the stored link is unsafe or absent.
    pub safe_link: Option<String>,
    pub selected: bool,
}

impl ProductView {
    pub fn new(product: &Product, selection: &SelectionSet) -> Self {
        Self {
            price_display: product.price.to_string(),
            safe_link: product.safe_link().map(|u| u.to_string()),
            selected: selection.contains(&product.id),
            product: product.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PackageView {
    #[serde(flatten)]
    pub package: Package,
    pub list_price: Money,
    pub price: Money,
    pub price_display: String,
    pub savings: Money,
}

impl PackageView {
    pub fn new(package: &Package, catalog: &Catalog) -> Self {
        let price = package.price(catalog);
        let mut package = package.clone();
        package.product_ids = package.unique_product_ids().into_iter().cloned().collect();
        Self {
            list_price: package.list_price(catalog),
            price,
            price_display: price.to_string(),
            savings: package.savings(catalog),
            package,
        }
    }
}

/// Everything the customer view renders, plus the links to share it.
#[derive(Debug, Serialize)]
pub struct MenuView {
    pub source: CatalogSource,
    pub products: Vec<ProductView>,
    pub packages: Vec<PackageView>,
    pub selections: Vec<String>,
    pub total: Money,
    pub total_display: String,
    pub products_token: String,
    pub selections_token: String,
    pub customer_url: String,
    pub email_link: String,
}

impl MenuView {
    pub fn new(state: &MenuState, public_url: &Url) -> Self {
        let customer_url = share::customer_menu_url(public_url, &state.catalog, &state.selection);
        let total = state.total();
        Self {
            source: state.source,
            products: state
                .catalog
                .products()
                .iter()
                .map(|p| ProductView::new(p, &state.selection))
                .collect(),
            packages: state
                .packages
                .iter()
                .map(|p| PackageView::new(p, &state.catalog))
                .collect(),
            selections: selection_ids(&state.selection),
            total,
            total_display: total.to_string(),
            products_token: state.catalog.to_token(),
            selections_token: state.selection.to_token(),
            email_link: share::email_link(&customer_url),
            customer_url: customer_url.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ToggleView {
    pub id: String,
    pub selected: bool,
    pub selections: Vec<String>,
    pub selections_token: String,
    pub total: Money,
    pub total_display: String,
    pub customer_url: String,
}

#[derive(Debug, Serialize)]
pub struct ShareView {
    pub products_token: String,
    pub selections_token: String,
    pub admin_share_url: String,
}

pub fn selection_ids(selection: &SelectionSet) -> Vec<String> {
    selection.iter().map(|id| id.as_str().to_string()).collect()
}
