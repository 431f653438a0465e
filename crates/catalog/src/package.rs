use std::collections::HashSet;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use fimenu_core::{Entity, Money, PackageId, Percent, ProductId};

use crate::catalog::Catalog;
use crate::coerce;

/// A named bundle of products, optionally discounted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    pub id: PackageId,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub product_ids: Vec<ProductId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount: Option<Percent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Entity for Package {
    type Id = PackageId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Package {
    /// Build a package from untrusted JSON, defaulting each field independently.
    pub fn from_json(value: &Value) -> Self {
        let field = |name: &str| value.get(name);

        let product_ids = match field("productIds") {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|v| coerce::text(Some(v)))
                .map(ProductId::new)
                .collect(),
            _ => Vec::new(),
        };

        Self {
            id: coerce::text(field("id"))
                .map(PackageId::new)
                .unwrap_or_else(PackageId::generate),
            name: coerce::text_or(field("name"), "Package"),
            description: coerce::text_or(field("description"), ""),
            icon: coerce::text_or(field("icon"), "📦"),
            product_ids,
            discount: field("discount").and_then(Percent::coerce),
            color: coerce::string_only(field("color")),
        }
    }

    /// Constituent ids in order, first occurrence wins.
    pub fn unique_product_ids(&self) -> Vec<&ProductId> {
        let mut seen = HashSet::new();
        self.product_ids
            .iter()
            .filter(|id| seen.insert(*id))
            .collect()
    }

    /// Sum of constituent prices before any discount.
    ///
    /// Ids absent from the catalog contribute nothing.
    pub fn list_price(&self, catalog: &Catalog) -> Money {
        self.unique_product_ids()
            .into_iter()
            .filter_map(|id| catalog.get(id))
            .map(|p| p.price)
            .sum()
    }

    /// Bundle price: list price less the discount, rounded to a whole unit.
    pub fn price(&self, catalog: &Catalog) -> Money {
        let list = self.list_price(catalog);
        match self.discount {
            Some(discount) => list.discounted(discount).round_whole(),
            None => list.round_whole(),
        }
    }

    /// How much the discount saves versus buying the products one by one.
    pub fn savings(&self, catalog: &Catalog) -> Money {
        let list = self.list_price(catalog).amount();
        Money::new(list - self.price(catalog).amount())
    }
}

impl<'de> Deserialize<'de> for Package {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Package::from_json(&value))
    }
}

/// Normalize a decoded package list; a non-array yields `None`.
pub fn packages_from_json(value: &Value) -> Option<Vec<Package>> {
    match value {
        Value::Array(items) => Some(items.iter().map(Package::from_json).collect()),
        _ => None,
    }
}
