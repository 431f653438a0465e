//! Infrastructure layer: the local persistence shim.
//!
//! The admin's last-saved catalog and package list live in a small key/value
//! store as plain JSON text (never as share tokens).

pub mod repository;
pub mod store;

pub use repository::MenuRepository;
pub use store::{InMemoryLocalStore, JsonFileStore, LocalStore, StoreError, PACKAGES_KEY, PRODUCTS_KEY};
