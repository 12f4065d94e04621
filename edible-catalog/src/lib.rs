pub mod accessor;
pub mod inventory;
pub mod pricing;
pub mod product;

pub use accessor::{FetchError, ProductCatalog};
pub use inventory::{CatalogSnapshot, InventoryError};
pub use pricing::price_label;
pub use product::{selection_options, ProductOption};
