use serde::Serialize;

use crate::inventory::CatalogSnapshot;
use crate::pricing::naira;

/// One entry of a product selection list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductOption {
    pub name: String,
    pub price: Option<i64>,
    pub price_label: String,
    pub available: i64,
    pub disabled: bool,
}

/// Selection list for one line. Sold out products are disabled unless they
/// are the line's current selection, so an earlier valid choice does not
/// vanish mid-edit.
pub fn selection_options(snapshot: &CatalogSnapshot, current: &str) -> Vec<ProductOption> {
    snapshot
        .products()
        .iter()
        .map(|product| ProductOption {
            name: product.name.clone(),
            price: product.price,
            price_label: product
                .price
                .map(naira)
                .unwrap_or_else(|| "Price at venue".to_string()),
            available: product.effective_quantity_available.max(0),
            disabled: product.is_sold_out() && product.name != current,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use edible_shared::Product;

    #[test]
    fn test_sold_out_disabled_unless_selected() {
        let snapshot = CatalogSnapshot::new(vec![
            Product::new("1 slot Beef", Some(7500), 0),
            Product::new("Cow Leg", None, 4),
        ]);

        let fresh = selection_options(&snapshot, "");
        assert!(fresh[0].disabled);
        assert!(!fresh[1].disabled);
        assert_eq!(fresh[1].price_label, "Price at venue");

        let held = selection_options(&snapshot, "1 slot Beef");
        assert!(!held[0].disabled);
    }
}
