use serde::{Deserialize, Serialize};

/// A sellable product as reported by the backend catalog.
///
/// `name` is the unique key. A `None` price means the product is priced at
/// the venue and is never part of an online total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    pub price: Option<i64>,
    pub effective_quantity_available: i64,
}

impl Product {
    pub fn new(name: impl Into<String>, price: Option<i64>, available: i64) -> Self {
        Self {
            name: name.into(),
            price,
            effective_quantity_available: available,
        }
    }

    /// Sold out products are shown disabled in selection lists.
    pub fn is_sold_out(&self) -> bool {
        self.effective_quantity_available < 1
    }

    pub fn has_stock_for(&self, quantity: u32) -> bool {
        self.effective_quantity_available >= i64::from(quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sold_out_threshold() {
        assert!(Product::new("1 slot Beef", Some(7500), 0).is_sold_out());
        assert!(!Product::new("Cow Leg", None, 1).is_sold_out());
    }

    #[test]
    fn test_stock_check() {
        let leg = Product::new("Cow Leg", None, 4);
        assert!(leg.has_stock_for(4));
        assert!(!leg.has_stock_for(5));
    }
}
