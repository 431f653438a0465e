//! Session state and the load precedence chain.
//!
//! The menu state is a plain value: callers resolve it once from their inputs
//! (share-link tokens, saved JSON) and thread it through explicitly.

use serde::Serialize;
use serde_json::Value;

use fimenu_core::Money;

use crate::catalog::Catalog;
use crate::package::{Package, packages_from_json};
use crate::selection::SelectionSet;

/// Where the catalog of a resolved [`MenuState`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogSource {
    /// `products` token in the current URL.
    Url,
    /// Last catalog saved by the admin.
    Saved,
    /// Built-in default line-up.
    Defaults,
}

/// Raw inputs of the load precedence chain. Every input is optional.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoadSources<'a> {
    /// `products` query parameter.
    pub products_token: Option<&'a str>,
    /// `selections` query parameter.
    pub selections_token: Option<&'a str>,
    /// Saved catalog, plain JSON text.
    pub saved_products: Option<&'a str>,
    /// Saved package list, plain JSON text.
    pub saved_packages: Option<&'a str>,
}

/// One session's catalog, packages and customer selection.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuState {
    pub catalog: Catalog,
    pub packages: Vec<Package>,
    pub selection: SelectionSet,
    pub source: CatalogSource,
}

impl Default for MenuState {
    fn default() -> Self {
        Self {
            catalog: Catalog::default(),
            packages: Vec::new(),
            selection: SelectionSet::new(),
            source: CatalogSource::Defaults,
        }
    }
}

impl MenuState {
    /// Resolve state from the precedence chain: URL token, then saved state,
    /// then defaults.
    ///
    /// A source that fails to decode, is not a list, or holds an empty list is
    /// skipped as if absent. Never fails.
    pub fn load(sources: LoadSources<'_>) -> Self {
        let from_url = sources
            .products_token
            .filter(|t| !t.is_empty())
            .and_then(Catalog::from_token)
            .filter(|c| !c.is_empty());

        let (catalog, source) = match from_url {
            Some(c) => (c, CatalogSource::Url),
            None => match sources.saved_products.and_then(parse_saved_catalog) {
                Some(c) => (c, CatalogSource::Saved),
                None => (Catalog::default(), CatalogSource::Defaults),
            },
        };

        let packages = sources
            .saved_packages
            .and_then(|text| serde_json::from_str::<Value>(text).ok())
            .and_then(|v| packages_from_json(&v))
            .unwrap_or_default();

        let selection = sources
            .selections_token
            .filter(|t| !t.is_empty())
            .and_then(SelectionSet::from_token)
            .unwrap_or_default();

        tracing::debug!(
            ?source,
            products = catalog.len(),
            packages = packages.len(),
            selected = selection.len(),
            "menu state resolved"
        );

        Self {
            catalog,
            packages,
            selection,
            source,
        }
    }

    /// Running total of the current selection.
    pub fn total(&self) -> Money {
        self.catalog.total(&self.selection)
    }
}

fn parse_saved_catalog(text: &str) -> Option<Catalog> {
    match serde_json::from_str::<Value>(text) {
        Ok(v) => Catalog::from_json(&v).filter(|c| !c.is_empty()),
        Err(e) => {
            tracing::warn!(error = %e, "ignoring unreadable saved catalog");
            None
        }
    }
}
