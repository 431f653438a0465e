//! Typed access to the saved catalog and package list.

use fimenu_catalog::{Catalog, Package};

use crate::store::{LocalStore, StoreError, PACKAGES_KEY, PRODUCTS_KEY};

/// Saved admin state on top of a [`LocalStore`].
///
/// Values are written as plain JSON text. Reads hand back the raw text so the
/// domain's load precedence chain decides what is usable.
#[derive(Debug, Clone)]
pub struct MenuRepository<S> {
    store: S,
}

impl<S: LocalStore> MenuRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Raw saved catalog JSON, if any. Read failures count as "nothing saved".
    pub fn saved_products(&self) -> Option<String> {
        self.read(PRODUCTS_KEY)
    }

    /// Raw saved package JSON, if any.
    pub fn saved_packages(&self) -> Option<String> {
        self.read(PACKAGES_KEY)
    }

    pub fn save_products(&self, catalog: &Catalog) -> Result<(), StoreError> {
        self.write(PRODUCTS_KEY, catalog.products())
    }

    pub fn save_packages(&self, packages: &[Package]) -> Result<(), StoreError> {
        self.write(PACKAGES_KEY, packages)
    }

    /// Forget the saved catalog (used by "reset to defaults").
    pub fn clear_products(&self) -> Result<(), StoreError> {
        self.store.remove(PRODUCTS_KEY)
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(v) => v,
            Err(e) => {
                tracing::error!(key, error = %e, "failed to read local store");
                None
            }
        }
    }

    fn write<T: serde::Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let text = serde_json::to_string(value)?;
        self.store.set(key, text).inspect_err(|e| {
            tracing::error!(key, error = %e, "failed to write local store");
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryLocalStore;
    use fimenu_catalog::{CatalogSource, LoadSources, MenuState, Product};
    use std::sync::Arc;

    #[test]
    fn saved_catalog_feeds_the_precedence_chain() {
        let repo = MenuRepository::new(Arc::new(InMemoryLocalStore::new()));
        let catalog = Catalog::from_products(vec![Product::template("only".into())]);
        repo.save_products(&catalog).unwrap();

        let saved = repo.saved_products();
        let state = MenuState::load(LoadSources {
            saved_products: saved.as_deref(),
            ..LoadSources::default()
        });
        assert_eq!(state.source, CatalogSource::Saved);
        assert_eq!(state.catalog.products(), catalog.products());
    }

    #[test]
    fn saved_value_is_plain_json_not_a_token() {
        let store = Arc::new(InMemoryLocalStore::new());
        let repo = MenuRepository::new(store.clone());
        repo.save_products(&Catalog::default()).unwrap();
        let raw = store.get(PRODUCTS_KEY).unwrap().unwrap();
        assert!(raw.starts_with('['));
        assert!(raw.contains("\"description\""));
        let products: Vec<Product> = serde_json::from_str(&raw).unwrap();
        assert_eq!(products.len(), 8);
    }

    #[test]
    fn clear_products_removes_saved_catalog() {
        let repo = MenuRepository::new(Arc::new(InMemoryLocalStore::new()));
        repo.save_products(&Catalog::default()).unwrap();
        repo.clear_products().unwrap();
        assert!(repo.saved_products().is_none());
    }

    #[test]
    fn packages_round_trip_through_store() {
        let repo = MenuRepository::new(Arc::new(InMemoryLocalStore::new()));
        let pkg = Package::from_json(&serde_json::json!({"id": "gold", "productIds": ["dent"]}));
        repo.save_packages(&[pkg.clone()]).unwrap();
        let text = repo.saved_packages().unwrap();
        let back: Vec<Package> = serde_json::from_str(&text).unwrap();
        assert_eq!(back, vec![pkg]);
    }
}
