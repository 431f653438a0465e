use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use fimenu_core::{find_by_id, find_by_id_mut, Aggregate, DomainError, Entity, Money, ProductId};

use crate::defaults::default_products;
use crate::product::{Product, ProductEdit};
use crate::selection::SelectionSet;

/// Aggregate: the ordered product catalog an admin edits.
///
/// Invariant: product ids are unique. Ids removed during this session are
/// retired and cannot be handed out again until the catalog is reset.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    products: Vec<Product>,
    retired: HashSet<ProductId>,
    version: u64,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::from_products(default_products())
    }
}

impl Catalog {
    /// Build a catalog from already-typed products.
    ///
    /// Duplicate ids are resolved by giving every later duplicate a fresh id;
    /// no record is dropped.
    pub fn from_products(products: Vec<Product>) -> Self {
        Self {
            products: dedupe_ids(products),
            retired: HashSet::new(),
            version: 0,
        }
    }

    /// Normalize a decoded catalog; `None` when the value is not a list.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Array(items) => Some(Self::from_products(
                items.iter().map(Product::from_json).collect(),
            )),
            _ => None,
        }
    }

    /// Decode a share token; `None` when the token is malformed or not a list.
    pub fn from_token(token: &str) -> Option<Self> {
        fimenu_codec::decode_value(token).and_then(|v| Self::from_json(&v))
    }

    /// Encode as a share token.
    pub fn to_token(&self) -> String {
        let value = Value::Array(self.products.iter().map(product_value).collect());
        fimenu_codec::encode_value(&value)
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn into_products(self) -> Vec<Product> {
        self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        find_by_id(&self.products, id)
    }

    pub fn contains(&self, id: &ProductId) -> bool {
        self.get(id).is_some()
    }

    /// Running total of the selected products.
    ///
    /// Selected ids missing from the catalog are skipped.
    pub fn total(&self, selection: &SelectionSet) -> Money {
        self.products
            .iter()
            .filter(|p| selection.contains(&p.id))
            .map(|p| p.price)
            .sum()
    }

    /// Products in catalog order that are part of the selection.
    pub fn selected<'a>(&'a self, selection: &'a SelectionSet) -> impl Iterator<Item = &'a Product> + 'a {
        self.products.iter().filter(move |p| selection.contains(&p.id))
    }

    fn is_taken(&self, id: &ProductId) -> bool {
        self.contains(id) || self.retired.contains(id)
    }
}

fn product_value(p: &Product) -> Value {
    // Product serialization is infallible: only strings and finite numbers.
    serde_json::to_value(p).unwrap_or(Value::Null)
}

fn dedupe_ids(mut products: Vec<Product>) -> Vec<Product> {
    let mut seen = HashSet::new();
    for p in &mut products {
        if !seen.insert(p.id.clone()) {
            let fresh = ProductId::generate();
            tracing::debug!(duplicate = %p.id, replacement = %fresh, "reassigning duplicate product id");
            p.id = fresh.clone();
            seen.insert(fresh);
        }
    }
    products
}

/// Command: AddProduct (the caller supplies the new id).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddProduct {
    pub product_id: ProductId,
}

/// Command: EditProduct (one field of one product).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditProduct {
    pub product_id: ProductId,
    pub edit: ProductEdit,
}

/// Command: DeleteProduct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteProduct {
    pub product_id: ProductId,
}

/// Command: ReplaceProducts (JSON import).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplaceProducts {
    pub products: Vec<Product>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CatalogCommand {
    AddProduct(AddProduct),
    EditProduct(EditProduct),
    DeleteProduct(DeleteProduct),
    ReplaceProducts(ReplaceProducts),
    ResetToDefaults,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CatalogEvent {
    ProductAdded(Product),
    ProductEdited(EditProduct),
    ProductDeleted(DeleteProduct),
    ProductsReplaced(ReplaceProducts),
    CatalogReset,
}

impl CatalogEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            CatalogEvent::ProductAdded(_) => "catalog.product.added",
            CatalogEvent::ProductEdited(_) => "catalog.product.edited",
            CatalogEvent::ProductDeleted(_) => "catalog.product.deleted",
            CatalogEvent::ProductsReplaced(_) => "catalog.products.replaced",
            CatalogEvent::CatalogReset => "catalog.reset",
        }
    }
}

impl Aggregate for Catalog {
    type Command = CatalogCommand;
    type Event = CatalogEvent;
    type Error = DomainError;

    fn version(&self) -> u64 {
        self.version
    }

    fn apply(&mut self, event: &Self::Event) {
        match event {
            CatalogEvent::ProductAdded(p) => {
                self.products.push(p.clone());
            }
            CatalogEvent::ProductEdited(e) => {
                if let ProductEdit::Id(new_id) = &e.edit {
                    self.retired.insert(e.product_id.clone());
                    self.retired.remove(new_id);
                }
                if let Some(p) = find_by_id_mut(&mut self.products, &e.product_id) {
                    p.apply_edit(&e.edit);
                }
            }
            CatalogEvent::ProductDeleted(e) => {
                self.products.retain(|p| !p.has_id(&e.product_id));
                self.retired.insert(e.product_id.clone());
            }
            CatalogEvent::ProductsReplaced(e) => {
                for old in &self.products {
                    self.retired.insert(old.id.clone());
                }
                self.products = e.products.clone();
                for p in &self.products {
                    self.retired.remove(&p.id);
                }
            }
            CatalogEvent::CatalogReset => {
                self.products = default_products();
                self.retired.clear();
            }
        }

        // Deterministic version tracking: +1 per applied event.
        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            CatalogCommand::AddProduct(cmd) => self.handle_add(cmd),
            CatalogCommand::EditProduct(cmd) => self.handle_edit(cmd),
            CatalogCommand::DeleteProduct(cmd) => self.handle_delete(cmd),
            CatalogCommand::ReplaceProducts(cmd) => self.handle_replace(cmd),
            CatalogCommand::ResetToDefaults => Ok(vec![CatalogEvent::CatalogReset]),
        }
    }
}

impl Catalog {
    fn handle_add(&self, cmd: &AddProduct) -> Result<Vec<CatalogEvent>, DomainError> {
        if cmd.product_id.as_str().trim().is_empty() {
            return Err(DomainError::invalid_id("product id must not be empty"));
        }
        if self.is_taken(&cmd.product_id) {
            return Err(DomainError::conflict(format!(
                "product id '{}' is already in use",
                cmd.product_id
            )));
        }
        Ok(vec![CatalogEvent::ProductAdded(Product::template(
            cmd.product_id.clone(),
        ))])
    }

    fn handle_edit(&self, cmd: &EditProduct) -> Result<Vec<CatalogEvent>, DomainError> {
        if !self.contains(&cmd.product_id) {
            return Err(DomainError::not_found(format!("product '{}'", cmd.product_id)));
        }
        if let ProductEdit::Id(new_id) = &cmd.edit {
            if new_id != &cmd.product_id && self.is_taken(new_id) {
                return Err(DomainError::conflict(format!(
                    "product id '{new_id}' is already in use"
                )));
            }
        }
        Ok(vec![CatalogEvent::ProductEdited(cmd.clone())])
    }

    fn handle_delete(&self, cmd: &DeleteProduct) -> Result<Vec<CatalogEvent>, DomainError> {
        if !self.contains(&cmd.product_id) {
            return Err(DomainError::not_found(format!("product '{}'", cmd.product_id)));
        }
        Ok(vec![CatalogEvent::ProductDeleted(cmd.clone())])
    }

    fn handle_replace(&self, cmd: &ReplaceProducts) -> Result<Vec<CatalogEvent>, DomainError> {
        let mut seen = HashSet::new();
        for p in &cmd.products {
            if !seen.insert(&p.id) {
                return Err(DomainError::invariant(format!("duplicate product id '{}'", p.id)));
            }
        }
        Ok(vec![CatalogEvent::ProductsReplaced(cmd.clone())])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn pid(s: &str) -> ProductId {
        ProductId::new(s)
    }

    fn small_catalog() -> Catalog {
        Catalog::from_json(&json!([
            {"id": "a", "price": 100},
            {"id": "b", "price": 250}
        ]))
        .unwrap()
    }

    #[test]
    fn total_skips_dangling_selection() {
        let catalog = small_catalog();
        let sel: SelectionSet = ["a", "b", "c"].into_iter().map(pid).collect();
        assert_eq!(catalog.total(&sel), Money::from(350));
        assert_eq!(catalog.selected(&sel).count(), 2);
    }

    #[test]
    fn empty_selection_totals_zero() {
        assert_eq!(small_catalog().total(&SelectionSet::new()), Money::ZERO);
    }

    #[test]
    fn default_catalog_is_the_builtin_lineup() {
        let catalog = Catalog::default();
        assert_eq!(catalog.len(), 8);
        assert!(catalog.contains(&pid("xpel")));
    }

    #[test]
    fn duplicate_ids_are_reassigned_not_dropped() {
        let catalog = Catalog::from_json(&json!([
            {"id": "a", "title": "first"},
            {"id": "a", "title": "second"}
        ]))
        .unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(&pid("a")).unwrap().title, "first");
        assert_ne!(catalog.products()[1].id, pid("a"));
    }

    #[test]
    fn non_list_catalog_is_rejected() {
        assert!(Catalog::from_json(&json!({"id": "a"})).is_none());
    }

    #[test]
    fn token_round_trip_preserves_products() {
        let catalog = Catalog::default();
        let back = Catalog::from_token(&catalog.to_token()).unwrap();
        assert_eq!(back.products(), catalog.products());
    }

    #[test]
    fn add_product_emits_template() {
        let catalog = small_catalog();
        let events = catalog
            .handle(&CatalogCommand::AddProduct(AddProduct { product_id: pid("new") }))
            .unwrap();
        match &events[0] {
            CatalogEvent::ProductAdded(p) => {
                assert_eq!(p.id, pid("new"));
                assert_eq!(p.title, "New Product");
                assert_eq!(p.price, Money::ZERO);
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn add_product_rejects_existing_id() {
        let err = small_catalog()
            .handle(&CatalogCommand::AddProduct(AddProduct { product_id: pid("a") }))
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[test]
    fn deleted_ids_are_not_reused() {
        let mut catalog = small_catalog();
        catalog
            .execute(&CatalogCommand::DeleteProduct(DeleteProduct { product_id: pid("a") }))
            .unwrap();
        assert!(!catalog.contains(&pid("a")));

        let err = catalog
            .handle(&CatalogCommand::AddProduct(AddProduct { product_id: pid("a") }))
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[test]
    fn edit_updates_single_field() {
        let mut catalog = small_catalog();
        catalog
            .execute(&CatalogCommand::EditProduct(EditProduct {
                product_id: pid("b"),
                edit: ProductEdit::Price(Money::from(300)),
            }))
            .unwrap();
        assert_eq!(catalog.get(&pid("b")).unwrap().price, Money::from(300));
        assert_eq!(catalog.get(&pid("a")).unwrap().price, Money::from(100));
    }

    #[test]
    fn edit_rejects_missing_product_and_id_collision() {
        let catalog = small_catalog();
        let missing = catalog
            .handle(&CatalogCommand::EditProduct(EditProduct {
                product_id: pid("zzz"),
                edit: ProductEdit::Title("x".into()),
            }))
            .unwrap_err();
        assert!(matches!(missing, DomainError::NotFound(_)));

        let collision = catalog
            .handle(&CatalogCommand::EditProduct(EditProduct {
                product_id: pid("a"),
                edit: ProductEdit::Id(pid("b")),
            }))
            .unwrap_err();
        assert!(matches!(collision, DomainError::Conflict(_)));
    }

    #[test]
    fn renaming_an_id_retires_the_old_one() {
        let mut catalog = small_catalog();
        catalog
            .execute(&CatalogCommand::EditProduct(EditProduct {
                product_id: pid("a"),
                edit: ProductEdit::Id(pid("alpha")),
            }))
            .unwrap();
        assert!(catalog.contains(&pid("alpha")));
        assert!(catalog
            .handle(&CatalogCommand::AddProduct(AddProduct { product_id: pid("a") }))
            .is_err());
    }

    #[test]
    fn delete_missing_product_is_not_found() {
        let err = small_catalog()
            .handle(&CatalogCommand::DeleteProduct(DeleteProduct { product_id: pid("nope") }))
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[test]
    fn reset_restores_defaults() {
        let mut catalog = small_catalog();
        catalog.execute(&CatalogCommand::ResetToDefaults).unwrap();
        assert_eq!(catalog.products(), Catalog::default().products());
    }

    #[test]
    fn replace_rejects_duplicate_ids() {
        let dup = vec![
            Product::template(pid("x")),
            Product::template(pid("x")),
        ];
        let err = small_catalog()
            .handle(&CatalogCommand::ReplaceProducts(ReplaceProducts { products: dup }))
            .unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
    }

    #[test]
    fn handle_does_not_mutate_state() {
        let catalog = small_catalog();
        let before = catalog.clone();
        let _ = catalog.handle(&CatalogCommand::ResetToDefaults);
        assert_eq!(catalog, before);
    }

    #[test]
    fn version_increments_on_apply() {
        let mut catalog = small_catalog();
        assert_eq!(catalog.version(), 0);
        catalog
            .execute(&CatalogCommand::AddProduct(AddProduct { product_id: pid("n1") }))
            .unwrap();
        catalog.execute(&CatalogCommand::ResetToDefaults).unwrap();
        assert_eq!(catalog.version(), 2);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: the total never exceeds the sum of all prices and ignores unknown ids.
            #[test]
            fn total_is_bounded_by_catalog_sum(
                prices in prop::collection::vec(0u64..100_000, 0..12),
                picks in prop::collection::vec(0usize..16, 0..16)
            ) {
                let products: Vec<Product> = prices
                    .iter()
                    .enumerate()
                    .map(|(i, p)| Product::from_json(&json!({"id": format!("p{i}"), "price": p})))
                    .collect();
                let catalog = Catalog::from_products(products);
                let selection: SelectionSet = picks.iter().map(|i| pid(&format!("p{i}"))).collect();

                let expected: u64 = prices
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| selection.contains(&pid(&format!("p{i}"))))
                    .map(|(_, p)| *p)
                    .sum();
                prop_assert_eq!(catalog.total(&selection), Money::from(expected));
            }
        }
    }
}
