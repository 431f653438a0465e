//! Shared application state: the admin's working catalog and the local store.

use std::sync::{Arc, RwLock};

use thiserror::Error;
use url::Url;

use fimenu_catalog::{Catalog, CatalogCommand, LoadSources, MenuState, Package};
use fimenu_core::{Aggregate, DomainError};
use fimenu_infra::{LocalStore, MenuRepository, StoreError};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("in-memory state lock poisoned")]
    StatePoisoned,
}

pub struct AppServices {
    repo: MenuRepository<Arc<dyn LocalStore>>,
    catalog: RwLock<Catalog>,
    packages: RwLock<Vec<Package>>,
    public_url: Url,
}

impl AppServices {
    /// Load the admin's working state from the store (saved, else defaults).
    pub fn new(store: Arc<dyn LocalStore>, public_url: Url) -> Self {
        let repo = MenuRepository::new(store);
        let saved_products = repo.saved_products();
        let saved_packages = repo.saved_packages();
        let state = MenuState::load(LoadSources {
            saved_products: saved_products.as_deref(),
            saved_packages: saved_packages.as_deref(),
            ..LoadSources::default()
        });
        tracing::info!(
            source = ?state.source,
            products = state.catalog.len(),
            packages = state.packages.len(),
            "admin catalog loaded"
        );

        Self {
            repo,
            catalog: RwLock::new(state.catalog),
            packages: RwLock::new(state.packages),
            public_url,
        }
    }

    pub fn public_url(&self) -> &Url {
        &self.public_url
    }

    /// Resolve a customer view: URL tokens first, then saved state, then defaults.
    pub fn resolve_menu(&self, products_token: Option<&str>, selections_token: Option<&str>) -> MenuState {
        let saved_products = self.repo.saved_products();
        let saved_packages = self.repo.saved_packages();
        MenuState::load(LoadSources {
            products_token,
            selections_token,
            saved_products: saved_products.as_deref(),
            saved_packages: saved_packages.as_deref(),
        })
    }

    pub fn catalog(&self) -> Result<Catalog, ServiceError> {
        let guard = self.catalog.read().map_err(|_| ServiceError::StatePoisoned)?;
        Ok(guard.clone())
    }

    pub fn packages(&self) -> Result<Vec<Package>, ServiceError> {
        let guard = self.packages.read().map_err(|_| ServiceError::StatePoisoned)?;
        Ok(guard.clone())
    }

    /// Run an admin command and persist the result.
    ///
    /// The command runs against a copy; the working catalog only moves forward
    /// once the store write succeeded.
    pub fn dispatch(&self, command: CatalogCommand) -> Result<Catalog, ServiceError> {
        let mut guard = self.catalog.write().map_err(|_| ServiceError::StatePoisoned)?;

        let mut next = guard.clone();
        let events = next.execute(&command)?;

        if matches!(command, CatalogCommand::ResetToDefaults) {
            self.repo.clear_products()?;
        } else {
            self.repo.save_products(&next)?;
        }

        for event in &events {
            tracing::info!(event_type = event.event_type(), version = next.version(), "catalog updated");
        }

        *guard = next.clone();
        Ok(next)
    }

    pub fn replace_packages(&self, packages: Vec<Package>) -> Result<Vec<Package>, ServiceError> {
        let mut guard = self.packages.write().map_err(|_| ServiceError::StatePoisoned)?;
        self.repo.save_packages(&packages)?;
        tracing::info!(packages = packages.len(), "packages replaced");
        *guard = packages.clone();
        Ok(packages)
    }
}
