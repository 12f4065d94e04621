pub mod models;
pub mod pii;

pub use models::{
    decode_items, DeliveryMethod, NewOrderRecord, OrderLineItem, PersistedOrder, Product,
    SubmissionSetting, UnknownDeliveryMethod,
};
pub use pii::Masked;
