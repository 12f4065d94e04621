use edible_shared::Product;
use serde::{Deserialize, Serialize};

/// Read-only copy of the sellable products as of the last fetch.
///
/// Replaced wholesale on every fetch; never patched in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    products: Vec<Product>,
}

impl CatalogSnapshot {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn find(&self, name: &str) -> Option<&Product> {
        if name.is_empty() {
            return None;
        }
        self.products.iter().find(|p| p.name == name)
    }

    /// Price to snapshot onto a line item. Unknown names, including the
    /// empty selection, resolve to `None`.
    pub fn price_of(&self, name: &str) -> Option<i64> {
        self.find(name).and_then(|p| p.price)
    }

    /// Advisory availability check against this snapshot.
    pub fn check_stock(&self, name: &str, quantity: u32) -> Result<(), InventoryError> {
        let product = self
            .find(name)
            .ok_or_else(|| InventoryError::NotFound(name.to_string()))?;

        if !product.has_stock_for(quantity) {
            return Err(InventoryError::InsufficientInventory {
                product: name.to_string(),
                requested: quantity,
                available: product.effective_quantity_available,
            });
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InventoryError {
    #[error("Product not in catalog: {0}")]
    NotFound(String),

    #[error("Insufficient stock for {product}: requested {requested}, available {available}")]
    InsufficientInventory {
        product: String,
        requested: u32,
        available: i64,
    },
}

impl InventoryError {
    pub fn product(&self) -> &str {
        match self {
            InventoryError::NotFound(name) => name,
            InventoryError::InsufficientInventory { product, .. } => product,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> CatalogSnapshot {
        CatalogSnapshot::new(vec![
            Product::new("1 slot Beef", Some(7500), 0),
            Product::new("Cow Leg", None, 4),
            Product::new("Half slot Ige", Some(3750), 10),
        ])
    }

    #[test]
    fn test_price_lookup() {
        let catalog = snapshot();
        assert_eq!(catalog.price_of("Half slot Ige"), Some(3750));
        assert_eq!(catalog.price_of("Cow Leg"), None);
        assert_eq!(catalog.price_of(""), None);
        assert_eq!(catalog.price_of("Goat Head"), None);
    }

    #[test]
    fn test_stock_check() {
        let catalog = snapshot();
        assert!(catalog.check_stock("Cow Leg", 4).is_ok());
        assert_eq!(
            catalog.check_stock("1 slot Beef", 1),
            Err(InventoryError::InsufficientInventory {
                product: "1 slot Beef".to_string(),
                requested: 1,
                available: 0,
            })
        );
        assert_eq!(
            catalog.check_stock("Goat Head", 1).unwrap_err().product(),
            "Goat Head"
        );
    }
}
