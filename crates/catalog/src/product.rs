use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use url::Url;

use fimenu_core::{DomainError, DomainResult, Entity, Money, ProductId};

use crate::coerce;
use crate::link::safe_link;

pub const FALLBACK_ICON: &str = "🧩";
pub const FALLBACK_TITLE: &str = "Product";

/// A sellable protection product.
///
/// Deserialization never fails on a JSON object: missing or wrong-typed fields
/// are replaced per field (see [`Product::from_json`]).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    pub id: ProductId,
    pub icon: String,
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub price: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Product {
    /// Template used by the admin "add product" action.
    pub fn template(id: ProductId) -> Self {
        Self {
            id,
            icon: "🆕".to_string(),
            title: "New Product".to_string(),
            subtitle: "Category".to_string(),
            description: "Enter description...".to_string(),
            price: Money::ZERO,
            link: None,
        }
    }

    /// Build a product from untrusted JSON, defaulting each field independently.
    ///
    /// - missing `id` → freshly generated id
    /// - missing `icon` / `title` → fixed fallbacks; `subtitle` / `description` → empty
    /// - non-numeric `price` → 0
    /// - `link` kept only when it is a string
    ///
    /// A non-object input yields an all-default record rather than an error.
    pub fn from_json(value: &Value) -> Self {
        let field = |name: &str| value.get(name);

        Self {
            id: coerce::text(field("id"))
                .map(ProductId::new)
                .unwrap_or_else(ProductId::generate),
            icon: coerce::text_or(field("icon"), FALLBACK_ICON),
            title: coerce::text_or(field("title"), FALLBACK_TITLE),
            subtitle: coerce::text_or(field("subtitle"), ""),
            description: coerce::text_or(field("description"), ""),
            price: field("price").map(Money::coerce).unwrap_or_default(),
            link: coerce::string_only(field("link")),
        }
    }

    /// The link, if it is a well-formed `http`/`https` URL.
    pub fn safe_link(&self) -> Option<Url> {
        self.link.as_deref().and_then(safe_link)
    }

    /// Apply a single-field edit.
    pub fn apply_edit(&mut self, edit: &ProductEdit) {
        match edit {
            ProductEdit::Id(id) => self.id = id.clone(),
            ProductEdit::Icon(v) => self.icon = v.clone(),
            ProductEdit::Title(v) => self.title = v.clone(),
            ProductEdit::Subtitle(v) => self.subtitle = v.clone(),
            ProductEdit::Description(v) => self.description = v.clone(),
            ProductEdit::Price(v) => self.price = *v,
            ProductEdit::Link(v) => self.link = v.clone(),
        }
    }
}

impl<'de> Deserialize<'de> for Product {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Product::from_json(&value))
    }
}

/// One admin edit of one product field, already coerced to the field's type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "lowercase")]
pub enum ProductEdit {
    Id(ProductId),
    Icon(String),
    Title(String),
    Subtitle(String),
    Description(String),
    Price(Money),
    Link(Option<String>),
}

impl ProductEdit {
    /// Coerce a raw `(field, value)` pair coming from an edit form.
    pub fn from_field(field: &str, value: &Value) -> DomainResult<Self> {
        let text = || coerce::text_or(Some(value), "");
        Ok(match field {
            "id" => {
                let id: ProductId = text().parse()?;
                ProductEdit::Id(id)
            }
            "icon" => ProductEdit::Icon(text()),
            "title" => ProductEdit::Title(text()),
            "subtitle" => ProductEdit::Subtitle(text()),
            "description" => ProductEdit::Description(text()),
            "price" => ProductEdit::Price(Money::coerce(value)),
            "link" => ProductEdit::Link(coerce::string_only(Some(value)).filter(|s| !s.trim().is_empty())),
            other => return Err(DomainError::validation(format!("unknown product field '{other}'"))),
        })
    }
}
