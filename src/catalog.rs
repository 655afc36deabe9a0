//! Product catalog: the names a product field may hold.

use crate::error::StockError;
use crate::input::{normalize_product, PLACEHOLDER};

/// Shown when neither the config nor the database knows any product.
pub const DEFAULT_PRODUCTS: [&str; 3] = ["Product A", "Product B", "Product C"];

/// Banner reference list used on the shop floor ledger.
const BANNER_REFERENCES: [&str; 21] = [
    "11 10.5-19",
    "11 10.5-21",
    "11 10.5K-25",
    "11 10.5E-16",
    "11 10.5E-18",
    "5S 8-16.5",
    "5S 8A -19",
    "5S 8A-16.5",
    "5S 8E-18",
    "5S 8K-17.5",
    "5S 8M -16",
    "5S 8N-13",
    "6174 N (LTS)",
    "9 10-16",
    "9 10-18-5",
    "9 10-19",
    "9 10-21",
    "9 95SP-14-4",
    "9 9KS-17.5",
    "9 9LS-13.5",
    "9 9S - 12",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<String>,
}

impl Catalog {
    /// Merge configured names with names already stored in a book.
    /// Order is configured first, then stored; duplicates and placeholders
    /// are dropped.
    pub fn merged<I, J>(configured: I, stored: J) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
        J: IntoIterator,
        J::Item: AsRef<str>,
    {
        let mut products: Vec<String> = Vec::new();
        let names = configured
            .into_iter()
            .map(|s| s.as_ref().to_string())
            .chain(stored.into_iter().map(|s| s.as_ref().to_string()));
        for name in names {
            if let Ok(name) = normalize_product(&name) {
                if !products.contains(&name) {
                    products.push(name);
                }
            }
        }
        if products.is_empty() {
            products = DEFAULT_PRODUCTS.iter().map(|s| s.to_string()).collect();
        }
        Self { products }
    }

    pub fn banner_references() -> Vec<String> {
        BANNER_REFERENCES.iter().map(|s| s.to_string()).collect()
    }

    pub fn products(&self) -> &[String] {
        &self.products
    }

    /// Normalise a user-supplied name and check it is listed.
    pub fn resolve(&self, raw: &str) -> Result<String, StockError> {
        let name = normalize_product(raw)?;
        if self.products.contains(&name) {
            Ok(name)
        } else {
            Err(StockError::UnknownProduct(name))
        }
    }
}

/// Add a name to a configured product list. Returns false if it was present.
pub fn add_product(list: &mut Vec<String>, raw: &str) -> Result<bool, StockError> {
    let name = normalize_product(raw)?;
    if list.iter().any(|p| p == &name) {
        return Ok(false);
    }
    list.push(name);
    Ok(true)
}

/// Remove a name from a configured product list. Returns false if absent.
pub fn remove_product(list: &mut Vec<String>, raw: &str) -> bool {
    let name = raw.trim();
    if name == PLACEHOLDER {
        return false;
    }
    let before = list.len();
    list.retain(|p| p != name);
    list.len() != before
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_sources_fall_back_to_defaults() {
        let c = Catalog::merged(Vec::<String>::new(), Vec::<String>::new());
        assert_eq!(c.products(), &DEFAULT_PRODUCTS.map(String::from));
    }

    #[test]
    fn merges_without_duplicates_or_placeholder() {
        let c = Catalog::merged(["-", "Widget", "Gear"], ["Gear", " Bolt "]);
        assert_eq!(c.products(), &["Widget", "Gear", "Bolt"].map(String::from));
    }

    #[test]
    fn stored_products_alone_replace_defaults() {
        let c = Catalog::merged(Vec::<&str>::new(), ["Widget"]);
        assert_eq!(c.products(), &["Widget".to_string()]);
    }

    #[test]
    fn resolve_checks_membership() {
        let c = Catalog::merged(Catalog::banner_references(), Vec::<String>::new());
        assert_eq!(c.resolve(" 9 10-16 ").unwrap(), "9 10-16");
        assert_eq!(
            c.resolve("9 10-17"),
            Err(StockError::UnknownProduct("9 10-17".into()))
        );
        assert_eq!(c.resolve("-"), Err(StockError::NoProductSelected));
    }

    #[test]
    fn add_and_remove_configured_names() {
        let mut list = vec!["Widget".to_string()];
        assert!(add_product(&mut list, "Gear").unwrap());
        assert!(!add_product(&mut list, " Gear ").unwrap());
        assert!(add_product(&mut list, "-").is_err());
        assert!(remove_product(&mut list, "Widget"));
        assert!(!remove_product(&mut list, "Widget"));
        assert_eq!(list, vec!["Gear".to_string()]);
    }
}
