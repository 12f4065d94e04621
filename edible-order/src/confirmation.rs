use edible_catalog::price_label;
use edible_shared::{DeliveryMethod, OrderLineItem};
use serde::{Deserialize, Serialize};

use crate::models::OrderDraft;

/// Vendor-side constants printed on every confirmation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VendorDetails {
    pub payment_account: String,
    pub whatsapp_number: String,
    pub order_prefix: String,
}

impl Default for VendorDetails {
    fn default() -> Self {
        Self {
            payment_account: "0043750696 (Access Bank) - TMC".to_string(),
            whatsapp_number: "2348039436510".to_string(),
            order_prefix: "EDM".to_string(),
        }
    }
}

impl VendorDetails {
    /// `#EDM007` style display reference for a store id
    pub fn reference(&self, order_id: i64) -> String {
        format!("#{}{:03}", self.order_prefix, order_id)
    }

    /// Deep link into a chat with the vendor, message prefilled with the order id.
    pub fn messaging_link(&self, order_id: i64) -> String {
        let message = format!(
            "Hello Edible,\nI just made an order.\n• Order ID: {} ({})\n• Here's my payment receipt.",
            order_id,
            self.reference(order_id)
        );
        format!(
            "https://wa.me/{}?text={}",
            self.whatsapp_number,
            urlencoding::encode(&message)
        )
    }
}

/// A confirmed line with the price text shown next to it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfirmationLine {
    #[serde(flatten)]
    pub item: OrderLineItem,
    pub price_label: String,
}

impl From<&OrderLineItem> for ConfirmationLine {
    fn from(item: &OrderLineItem) -> Self {
        Self {
            item: item.clone(),
            price_label: price_label(item),
        }
    }
}

/// What the customer sees once an order is saved
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Confirmation {
    pub order_id: i64,
    pub reference: String,
    pub name: String,
    pub phone: String,
    pub delivery_method: DeliveryMethod,
    pub address: Option<String>,
    pub items: Vec<ConfirmationLine>,
    pub total_price: i64,
    pub payment_account: String,
    pub messaging_link: String,
    pub summary: String,
}

impl Confirmation {
    pub fn new(order_id: i64, draft: &OrderDraft, total_price: i64, vendor: &VendorDetails) -> Self {
        let address = draft.requires_address().then(|| draft.address.clone());
        let mut confirmation = Self {
            order_id,
            reference: vendor.reference(order_id),
            name: draft.name.clone(),
            phone: draft.phone.clone(),
            delivery_method: draft.delivery_method,
            address,
            items: draft.items().iter().map(ConfirmationLine::from).collect(),
            total_price,
            payment_account: vendor.payment_account.clone(),
            messaging_link: vendor.messaging_link(order_id),
            summary: String::new(),
        };
        confirmation.summary = confirmation.render_summary();
        confirmation
    }

    /// Plain text for copy and share
    fn render_summary(&self) -> String {
        let mut lines = vec![
            format!("Order ID: {}", self.order_id),
            format!("Name: {}", self.name),
            format!("Phone: {}", self.phone),
            format!("Mode of Collection: {}", self.delivery_method),
        ];
        if let Some(address) = &self.address {
            lines.push(format!("Delivery Address: {}", address));
        }
        lines.push("Items:".to_string());
        lines.extend(self.items.iter().map(|line| format!("- {}", line.item.label())));
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DraftField;

    #[test]
    fn test_reference_padding() {
        let vendor = VendorDetails::default();
        assert_eq!(vendor.reference(7), "#EDM007");
        assert_eq!(vendor.reference(1234), "#EDM1234");
    }

    #[test]
    fn test_messaging_link_carries_order_id() {
        let link = VendorDetails::default().messaging_link(42);
        assert!(link.starts_with("https://wa.me/2348039436510?text=Hello%20Edible%2C"));
        assert!(link.contains("Order%20ID%3A%2042"));
    }

    #[test]
    fn test_summary_shows_address_only_for_delivery() {
        let vendor = VendorDetails::default();
        let mut draft = OrderDraft::new();
        draft.set_field(DraftField::Name, "Ada").unwrap();
        draft.set_field(DraftField::Phone, "0801").unwrap();
        draft.set_field(DraftField::Address, "12 Ade St").unwrap();
        draft.items[0] = OrderLineItem::new("Cow Leg", 2, None);

        let pickup = Confirmation::new(5, &draft, 0, &vendor);
        assert_eq!(pickup.address, None);
        assert_eq!(pickup.items[0].price_label, "Price at venue");
        assert_eq!(
            pickup.summary,
            "Order ID: 5\nName: Ada\nPhone: 0801\nMode of Collection: pickup\nItems:\n- Cow Leg x2"
        );

        draft.set_field(DraftField::DeliveryMethod, "delivery").unwrap();
        let delivered = Confirmation::new(6, &draft, 0, &vendor);
        assert!(delivered.summary.contains("Delivery Address: 12 Ade St"));
        assert_eq!(delivered.payment_account, "0043750696 (Access Bank) - TMC");
    }

    #[test]
    fn test_lines_serialize_with_price_label() {
        let mut draft = OrderDraft::new();
        draft.items[0] = OrderLineItem::new("1 slot Beef", 2, Some(7500));

        let confirmation = Confirmation::new(1, &draft, 15000, &VendorDetails::default());
        let json = serde_json::to_value(&confirmation.items[0]).unwrap();
        assert_eq!(json["type"], "1 slot Beef");
        assert_eq!(json["quantity"], 2);
        assert_eq!(json["price_label"], "₦7500");
    }
}
