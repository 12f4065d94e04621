use edible_shared::{DeliveryMethod, OrderLineItem};
use serde::{Deserialize, Serialize};

/// The in-progress order held by one form session.
///
/// `items` is never empty: it starts with one blank row and the last row
/// cannot be removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderDraft {
    pub name: String,
    pub phone: String,
    #[serde(rename = "deliveryMethod")]
    pub delivery_method: DeliveryMethod,
    pub address: String,
    pub notes: String,
    pub(crate) items: Vec<OrderLineItem>,
}

impl Default for OrderDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            phone: String::new(),
            delivery_method: DeliveryMethod::Pickup,
            address: String::new(),
            notes: String::new(),
            items: vec![OrderLineItem::default()],
        }
    }
}

impl OrderDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[OrderLineItem] {
        &self.items
    }

    /// Address only matters for home delivery.
    pub fn requires_address(&self) -> bool {
        self.delivery_method == DeliveryMethod::Delivery
    }
}

/// Customer-level fields editable through `OrderDraft::set_field`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DraftField {
    Name,
    Phone,
    DeliveryMethod,
    Address,
    Notes,
}

/// Line-item fields editable through `OrderDraft::set_item_field`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemField {
    Type,
    Quantity,
}
