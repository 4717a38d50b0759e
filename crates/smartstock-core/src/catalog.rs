//! # Catalog Lookup
//!
//! Resolves what the operator scanned or typed to a product of the loaded
//! catalog.
//!
//! ```text
//! "7790001"  ──► barcode equal (trimmed, case-insensitive)  ──► Product
//!      │
//!      └─ no barcode hit ──► name contains term (lowercased) ──► first match
//!                                     │
//!                                     └─ nothing ──► ProductNotFound
//! ```

use crate::error::{CoreError, CoreResult};
use crate::types::Product;

/// The product list as last fetched from the backend.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Catalog { products }
    }

    /// Replaces the whole list after a refresh.
    pub fn replace(&mut self, products: Vec<Product>) {
        self.products = products;
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn find_by_id(&self, id: i64) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Finds a product by barcode first, then by name substring.
    ///
    /// ## Example
    /// ```rust
    /// use smartstock_core::{Catalog, Money, Product};
    ///
    /// let catalog = Catalog::new(vec![
    ///     Product::new(1, "Coca Cola 500ml", "7790895000997", Money::from_cents(1500), 10),
    /// ]);
    /// assert_eq!(catalog.find("7790895000997").unwrap().id, 1);
    /// assert_eq!(catalog.find("cola").unwrap().id, 1);
    /// assert!(catalog.find("pepsi").is_err());
    /// ```
    pub fn find(&self, term: &str) -> CoreResult<&Product> {
        let term = term.trim();
        if term.is_empty() {
            return Err(CoreError::ProductNotFound(String::new()));
        }

        if let Some(product) = self
            .products
            .iter()
            .find(|p| !p.barcode.is_empty() && p.barcode.trim().eq_ignore_ascii_case(term))
        {
            return Ok(product);
        }

        let needle = term.to_lowercase();
        self.products
            .iter()
            .find(|p| p.name.to_lowercase().contains(&needle))
            .ok_or_else(|| CoreError::ProductNotFound(term.to_string()))
    }

    /// All products whose name or barcode contains `term`, for search lists.
    pub fn search(&self, term: &str) -> Vec<&Product> {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return self.products.iter().collect();
        }
        self.products
            .iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&needle) || p.barcode.to_lowercase().contains(&needle)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    fn catalog() -> Catalog {
        Catalog::new(vec![
            Product::new(1, "Agua Mineral 1L", "7791234", Money::from_cents(800), 20),
            Product::new(2, "Agua Saborizada", "7795678", Money::from_cents(900), 0),
            Product::new(3, "Galletitas 123", "123", Money::from_cents(1200), 4),
        ])
    }

    #[test]
    fn test_find_by_barcode_wins_over_name() {
        // "123" is both a barcode and part of a name
        assert_eq!(catalog().find("123").unwrap().id, 3);
        assert_eq!(catalog().find(" 7795678 ").unwrap().id, 2);
    }

    #[test]
    fn test_find_by_name_substring_case_insensitive() {
        assert_eq!(catalog().find("MINERAL").unwrap().id, 1);
        // first match in catalog order
        assert_eq!(catalog().find("agua").unwrap().id, 1);
    }

    #[test]
    fn test_find_unknown() {
        assert_eq!(
            catalog().find("yerba"),
            Err(CoreError::ProductNotFound("yerba".to_string()))
        );
        assert!(catalog().find("   ").is_err());
    }

    #[test]
    fn test_search() {
        let catalog = catalog();
        assert_eq!(catalog.search("agua").len(), 2);
        assert_eq!(catalog.search("").len(), 3);
        assert_eq!(catalog.search("779").len(), 2);
    }

    #[test]
    fn test_find_by_id() {
        assert!(catalog().find_by_id(2).is_some());
        assert!(catalog().find_by_id(42).is_none());
    }
}
