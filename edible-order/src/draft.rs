use edible_catalog::CatalogSnapshot;
use edible_shared::{OrderLineItem, UnknownDeliveryMethod};

use crate::models::{DraftField, ItemField, OrderDraft};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DraftError {
    #[error(transparent)]
    DeliveryMethod(#[from] UnknownDeliveryMethod),
}

impl OrderDraft {
    /// Generic customer field update. Nothing is validated here; that waits
    /// for submission.
    pub fn set_field(&mut self, field: DraftField, value: &str) -> Result<(), DraftError> {
        match field {
            DraftField::Name => self.name = value.to_string(),
            DraftField::Phone => self.phone = value.to_string(),
            DraftField::DeliveryMethod => self.delivery_method = value.parse()?,
            DraftField::Address => self.address = value.to_string(),
            DraftField::Notes => self.notes = value.to_string(),
        }
        Ok(())
    }

    /// Updates one line item.
    ///
    /// Changing the product re-derives the price from `catalog`; changing
    /// the quantity leaves the price alone.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn set_item_field(
        &mut self,
        index: usize,
        field: ItemField,
        value: &str,
        catalog: &CatalogSnapshot,
    ) {
        let len = self.items.len();
        let item = self
            .items
            .get_mut(index)
            .unwrap_or_else(|| panic!("line item {index} out of range (len {len})"));

        match field {
            ItemField::Type => {
                item.product = value.to_string();
                item.price = catalog.price_of(value);
            }
            ItemField::Quantity => {
                if let Some(quantity) = coerce_quantity(value) {
                    item.quantity = quantity;
                }
            }
        }
    }

    /// Appends a blank row. There is no upper bound.
    pub fn add_item(&mut self) {
        self.items.push(OrderLineItem::default());
    }

    /// Removes a row, except the last remaining one.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn remove_item(&mut self, index: usize) {
        if self.items.len() == 1 {
            return;
        }
        self.items.remove(index);
    }

    /// Online total. Venue-priced rows contribute nothing.
    pub fn compute_total(&self) -> i64 {
        self.items.iter().map(OrderLineItem::line_total).sum()
    }
}

/// Integer coercion for quantity input: leading digits are used, anything
/// after them ignored. Values below one become one; unparseable input
/// yields `None` and the quantity stays as it was.
fn coerce_quantity(raw: &str) -> Option<u32> {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    if negative {
        return Some(1);
    }
    let value = digits[..end].parse::<u64>().unwrap_or(u64::from(u32::MAX));
    Some(value.clamp(1, u64::from(u32::MAX)) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use edible_shared::{DeliveryMethod, Product};

    fn catalog() -> CatalogSnapshot {
        CatalogSnapshot::new(vec![
            Product::new("1 slot Beef", Some(7500), 3),
            Product::new("Half slot Abonu", Some(3750), 8),
            Product::new("Cow Leg", None, 4),
        ])
    }

    #[test]
    fn test_new_draft_has_one_blank_row() {
        let draft = OrderDraft::new();
        assert_eq!(draft.items(), &[OrderLineItem::new("", 1, None)]);
        assert_eq!(draft.delivery_method, DeliveryMethod::Pickup);
    }

    #[test]
    fn test_type_change_rederives_price() {
        let catalog = catalog();
        let mut draft = OrderDraft::new();

        draft.set_item_field(0, ItemField::Type, "1 slot Beef", &catalog);
        assert_eq!(draft.items()[0].price, Some(7500));

        draft.set_item_field(0, ItemField::Type, "", &catalog);
        assert_eq!(draft.items()[0].price, None);

        draft.set_item_field(0, ItemField::Type, "Half slot Abonu", &catalog);
        draft.set_item_field(0, ItemField::Type, "Discontinued Cut", &catalog);
        assert_eq!(draft.items()[0].price, None);
    }

    #[test]
    fn test_quantity_change_keeps_price() {
        let catalog = catalog();
        let mut draft = OrderDraft::new();
        draft.set_item_field(0, ItemField::Type, "Half slot Abonu", &catalog);

        draft.set_item_field(0, ItemField::Quantity, "3", &catalog);
        assert_eq!(draft.items()[0].quantity, 3);
        assert_eq!(draft.items()[0].price, Some(3750));

        // Price stays the one snapshotted at selection even if the catalog moved.
        let repriced = CatalogSnapshot::new(vec![Product::new("Half slot Abonu", Some(4000), 8)]);
        draft.set_item_field(0, ItemField::Quantity, "4", &repriced);
        assert_eq!(draft.items()[0].price, Some(3750));
    }

    #[test]
    fn test_quantity_coercion() {
        assert_eq!(coerce_quantity("2"), Some(2));
        assert_eq!(coerce_quantity(" 7kg"), Some(7));
        assert_eq!(coerce_quantity("0"), Some(1));
        assert_eq!(coerce_quantity("-3"), Some(1));
        assert_eq!(coerce_quantity(""), None);
        assert_eq!(coerce_quantity("two"), None);
    }

    #[test]
    fn test_remove_never_drops_last_row() {
        let mut draft = OrderDraft::new();
        draft.remove_item(0);
        assert_eq!(draft.items().len(), 1);

        draft.add_item();
        draft.add_item();
        draft.remove_item(1);
        assert_eq!(draft.items().len(), 2);
        draft.remove_item(0);
        draft.remove_item(0);
        assert_eq!(draft.items().len(), 1);
    }

    #[test]
    #[should_panic]
    fn test_out_of_range_index_panics() {
        let mut draft = OrderDraft::new();
        draft.set_item_field(3, ItemField::Quantity, "2", &catalog());
    }

    #[test]
    fn test_total_skips_venue_priced_rows() {
        let catalog = catalog();
        let mut draft = OrderDraft::new();
        draft.set_item_field(0, ItemField::Type, "1 slot Beef", &catalog);
        draft.set_item_field(0, ItemField::Quantity, "2", &catalog);
        draft.add_item();
        draft.set_item_field(1, ItemField::Type, "Cow Leg", &catalog);
        draft.set_item_field(1, ItemField::Quantity, "5", &catalog);
        draft.add_item();
        draft.set_item_field(2, ItemField::Type, "Half slot Abonu", &catalog);

        assert_eq!(draft.compute_total(), 15000 + 3750);
    }

    #[test]
    fn test_set_field() {
        let mut draft = OrderDraft::new();
        draft.set_field(DraftField::Name, "Ada").unwrap();
        draft.set_field(DraftField::DeliveryMethod, "delivery").unwrap();
        draft.set_field(DraftField::Address, "12 Ade St").unwrap();
        assert!(draft.requires_address());
        assert_eq!(draft.address, "12 Ade St");
        assert!(draft.set_field(DraftField::DeliveryMethod, "drone").is_err());
    }
}
