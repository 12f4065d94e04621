pub mod order;
pub mod product;
pub mod settings;

pub use order::{
    decode_items, DeliveryMethod, NewOrderRecord, OrderLineItem, PersistedOrder,
    UnknownDeliveryMethod,
};
pub use product::Product;
pub use settings::SubmissionSetting;
