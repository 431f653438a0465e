use std::collections::BTreeSet;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use fimenu_core::ProductId;

use crate::coerce;

/// The customer's chosen product ids.
///
/// A set: order is irrelevant and duplicates collapse. Ids that no longer exist
/// in the catalog are kept but inert.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SelectionSet(BTreeSet<ProductId>);

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Coerce a decoded selection list element-wise to ids.
    ///
    /// Returns `None` when the value is not a list at all.
    pub fn from_json(value: &Value) -> Option<Self> {
        let Value::Array(items) = value else {
            return None;
        };
        Some(
            items
                .iter()
                .map(|v| ProductId::new(coerce::text(Some(v)).unwrap_or_else(|| "null".to_string())))
                .collect(),
        )
    }

    /// Add the id if absent, remove it if present. Returns whether it is now selected.
    pub fn toggle(&mut self, id: ProductId) -> bool {
        if self.0.remove(&id) {
            false
        } else {
            self.0.insert(id);
            true
        }
    }

    pub fn contains(&self, id: &ProductId) -> bool {
        self.0.contains(id)
    }

    pub fn insert(&mut self, id: ProductId) -> bool {
        self.0.insert(id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProductId> {
        self.0.iter()
    }

    /// Encode as a share token (a JSON list of ids).
    pub fn to_token(&self) -> String {
        let ids: Vec<Value> = self
            .0
            .iter()
            .map(|id| Value::String(id.as_str().to_string()))
            .collect();
        fimenu_codec::encode_value(&Value::Array(ids))
    }

    /// Decode a share token; `None` when the token is malformed or not a list.
    pub fn from_token(token: &str) -> Option<Self> {
        fimenu_codec::decode_value(token).and_then(|v| Self::from_json(&v))
    }
}

impl FromIterator<ProductId> for SelectionSet {
    fn from_iter<I: IntoIterator<Item = ProductId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'de> Deserialize<'de> for SelectionSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(SelectionSet::from_json(&value).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn toggle_adds_then_removes() {
        let mut sel = SelectionSet::new();
        assert!(sel.toggle(ProductId::new("xpel")));
        assert!(sel.contains(&ProductId::new("xpel")));
        assert!(!sel.toggle(ProductId::new("xpel")));
        assert!(sel.is_empty());
    }

    #[test]
    fn decoded_list_is_coerced_and_deduplicated() {
        let sel = SelectionSet::from_json(&json!(["a", "a", 7, true, null])).unwrap();
        let ids: Vec<&str> = sel.iter().map(|i| i.as_str()).collect();
        assert_eq!(ids, vec!["7", "a", "null", "true"]);
    }

    #[test]
    fn non_list_is_rejected() {
        assert!(SelectionSet::from_json(&json!({"a": 1})).is_none());
        assert!(SelectionSet::from_json(&json!("a")).is_none());
    }

    #[test]
    fn token_round_trip() {
        let sel: SelectionSet = ["dent", "xpel"].into_iter().map(ProductId::from).collect();
        assert_eq!(SelectionSet::from_token(&sel.to_token()), Some(sel));
        assert!(SelectionSet::from_token("%%%").is_none());
    }

    #[test]
    fn empty_selection_token_decodes_to_empty_set() {
        let token = SelectionSet::new().to_token();
        assert_eq!(SelectionSet::from_token(&token), Some(SelectionSet::new()));
    }
}
