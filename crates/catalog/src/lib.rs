//! F&I product catalog domain.
//!
//! Products, packages and the customer's selection, implemented purely as
//! deterministic domain logic (no IO, no HTTP, no storage). Share tokens are
//! produced through `fimenu-codec`.

pub mod catalog;
mod coerce;
pub mod defaults;
pub mod link;
pub mod menu;
pub mod package;
pub mod product;
pub mod selection;
pub mod share;

pub use catalog::{
    AddProduct, Catalog, CatalogCommand, CatalogEvent, DeleteProduct, EditProduct, ReplaceProducts,
};
pub use defaults::default_products;
pub use link::safe_link;
pub use menu::{CatalogSource, LoadSources, MenuState};
pub use package::{Package, packages_from_json};
pub use product::{Product, ProductEdit};
pub use selection::SelectionSet;
pub use share::{admin_share_url, customer_menu_url, email_link};
