//! Share links and the "email my selections" link.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use url::Url;

use crate::catalog::Catalog;
use crate::selection::SelectionSet;

/// Characters left as-is inside a mailto component (the URI "unreserved" marks).
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub const CUSTOMER_PATH: &str = "customer";
pub const EMAIL_SUBJECT: &str = "My F&I Product Selections";

/// Customer menu URL carrying both tokens.
pub fn customer_menu_url(public_base: &Url, catalog: &Catalog, selection: &SelectionSet) -> Url {
    menu_url(public_base, &catalog.to_token(), &selection.to_token())
}

/// Link an admin hands out: the configured catalog with nothing selected yet.
pub fn admin_share_url(public_base: &Url, catalog: &Catalog) -> Url {
    customer_menu_url(public_base, catalog, &SelectionSet::new())
}

fn menu_url(public_base: &Url, products_token: &str, selections_token: &str) -> Url {
    let mut url = public_base.clone();
    let path = format!("{}/{}", public_base.path().trim_end_matches('/'), CUSTOMER_PATH);
    url.set_path(&path);
    url.set_fragment(None);
    url.query_pairs_mut()
        .clear()
        .append_pair("products", products_token)
        .append_pair("selections", selections_token);
    url
}

/// `mailto:` link with a prefilled subject and a body pointing at the menu.
pub fn email_link(menu_url: &Url) -> String {
    let body = format!(
        "Here are my selections:\n\n{menu_url}\n\nPlease review and contact me to finalize."
    );
    format!(
        "mailto:?subject={}&body={}",
        utf8_percent_encode(EMAIL_SUBJECT, COMPONENT),
        utf8_percent_encode(&body, COMPONENT)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use fimenu_core::ProductId;

    fn base() -> Url {
        Url::parse("https://menu.example.com").unwrap()
    }

    #[test]
    fn customer_url_carries_both_tokens() {
        let catalog = Catalog::default();
        let sel: SelectionSet = [ProductId::new("dent")].into_iter().collect();
        let url = customer_menu_url(&base(), &catalog, &sel);

        assert_eq!(url.path(), "/customer");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs[0].0, "products");
        assert_eq!(pairs[1].0, "selections");
        assert_eq!(Catalog::from_token(&pairs[0].1).unwrap().products(), catalog.products());
        assert_eq!(SelectionSet::from_token(&pairs[1].1), Some(sel));
    }

    #[test]
    fn tokens_need_no_escaping_in_query() {
        let url = admin_share_url(&base(), &Catalog::default());
        let query = url.query().unwrap();
        assert!(!query.contains('%'));
    }

    #[test]
    fn base_path_is_respected() {
        let base = Url::parse("https://example.com/fi/").unwrap();
        let url = admin_share_url(&base, &Catalog::default());
        assert_eq!(url.path(), "/fi/customer");
    }

    #[test]
    fn admin_share_url_has_empty_selection() {
        let url = admin_share_url(&base(), &Catalog::default());
        let sel = url
            .query_pairs()
            .find(|(k, _)| k == "selections")
            .map(|(_, v)| v.into_owned())
            .unwrap();
        assert_eq!(SelectionSet::from_token(&sel), Some(SelectionSet::new()));
    }

    #[test]
    fn email_link_is_percent_encoded() {
        let url = Url::parse("https://menu.example.com/customer?products=abc&selections=def").unwrap();
        let link = email_link(&url);
        assert!(link.starts_with("mailto:?subject=My%20F%26I%20Product%20Selections&body="));
        assert!(link.contains("https%3A%2F%2Fmenu.example.com%2Fcustomer%3Fproducts%3Dabc%26selections%3Ddef"));
        assert!(!link.contains(' '));
        assert!(!link.contains('\n'));
    }
}
