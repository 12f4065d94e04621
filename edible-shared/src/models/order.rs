use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the customer collects the order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryMethod {
    #[default]
    Pickup,
    Delivery,
}

impl DeliveryMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryMethod::Pickup => "pickup",
            DeliveryMethod::Delivery => "delivery",
        }
    }
}

impl fmt::Display for DeliveryMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown delivery method: {0}")]
pub struct UnknownDeliveryMethod(pub String);

impl FromStr for DeliveryMethod {
    type Err = UnknownDeliveryMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pickup" => Ok(DeliveryMethod::Pickup),
            "delivery" => Ok(DeliveryMethod::Delivery),
            _ => Err(UnknownDeliveryMethod(s.to_string())),
        }
    }
}

/// One row of an order. `product` is the product name, empty while unselected.
///
/// `price` is a snapshot of the catalog price taken when the product was
/// chosen, not when the quantity changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLineItem {
    #[serde(rename = "type")]
    pub product: String,
    pub quantity: u32,
    #[serde(default)]
    pub price: Option<i64>,
}

impl Default for OrderLineItem {
    fn default() -> Self {
        Self {
            product: String::new(),
            quantity: 1,
            price: None,
        }
    }
}

impl OrderLineItem {
    pub fn new(product: impl Into<String>, quantity: u32, price: Option<i64>) -> Self {
        Self {
            product: product.into(),
            quantity,
            price,
        }
    }

    pub fn is_selected(&self) -> bool {
        !self.product.is_empty()
    }

    /// Venue-priced items contribute nothing.
    pub fn line_total(&self) -> i64 {
        self.price.unwrap_or(0) * i64::from(self.quantity)
    }

    /// `"<type> x<quantity>"`, the form used in summaries and reports
    pub fn label(&self) -> String {
        format!("{} x{}", self.product, self.quantity)
    }
}

/// The row written to the backend's `orders` table on submission.
/// Line items travel as an encoded JSON string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOrderRecord {
    pub name: String,
    pub phone: String,
    #[serde(rename = "deliveryMethod")]
    pub delivery_method: DeliveryMethod,
    pub address: String,
    pub notes: String,
    pub items: String,
    pub total_price: i64,
}

impl NewOrderRecord {
    pub fn encode_items(items: &[OrderLineItem]) -> Result<String, serde_json::Error> {
        serde_json::to_string(items)
    }
}

/// An order as stored by the backend. Never mutated after insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedOrder {
    pub id: i64,
    pub name: String,
    pub phone: String,
    #[serde(rename = "deliveryMethod")]
    pub delivery_method: DeliveryMethod,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(deserialize_with = "items_from_any")]
    pub items: Vec<OrderLineItem>,
    #[serde(default)]
    pub total_price: Option<i64>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl PersistedOrder {
    /// Missing totals count as zero.
    pub fn total(&self) -> i64 {
        self.total_price.unwrap_or(0)
    }

    pub fn address_or_placeholder(&self) -> &str {
        match self.address.as_deref() {
            Some(address) if !address.trim().is_empty() => address,
            _ => "-",
        }
    }

    pub fn items_summary(&self) -> String {
        self.items
            .iter()
            .map(OrderLineItem::label)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Items column as it may arrive from the store: either structured or still
/// encoded as a JSON string.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredItems {
    Encoded(String),
    Structured(Vec<OrderLineItem>),
}

fn items_from_any<'de, D>(deserializer: D) -> Result<Vec<OrderLineItem>, D::Error>
where
    D: Deserializer<'de>,
{
    match StoredItems::deserialize(deserializer)? {
        StoredItems::Structured(items) => Ok(items),
        StoredItems::Encoded(text) => serde_json::from_str(&text).map_err(serde::de::Error::custom),
    }
}

/// Decodes an `items` column value, accepting both the encoded string form
/// and a structured array.
pub fn decode_items(value: serde_json::Value) -> Result<Vec<OrderLineItem>, serde_json::Error> {
    match value {
        serde_json::Value::String(text) => serde_json::from_str(&text),
        other => serde_json::from_value(other),
    }
}
