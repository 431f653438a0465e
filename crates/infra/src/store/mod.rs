use std::sync::Arc;

use thiserror::Error;

mod in_memory;
mod json_file;

pub use in_memory::InMemoryLocalStore;
pub use json_file::JsonFileStore;

/// Entry holding the last-saved catalog.
pub const PRODUCTS_KEY: &str = "fi_products_v1";
/// Entry holding the last-saved package list.
pub const PACKAGES_KEY: &str = "fi_packages_v1";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store io: {0}")]
    Io(#[from] std::io::Error),

    #[error("store json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("store lock poisoned")]
    Poisoned,
}

/// String key/value store (the server-side stand-in for browser local storage).
///
/// Single writer: a `set` simply overwrites the previous value.
pub trait LocalStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: String) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

impl<S> LocalStore for Arc<S>
where
    S: LocalStore + ?Sized,
{
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }
}
