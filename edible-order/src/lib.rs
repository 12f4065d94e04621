pub mod confirmation;
pub mod draft;
pub mod form;
pub mod models;
pub mod notice;
pub mod report;
pub mod review;
pub mod submission;

pub use confirmation::{Confirmation, ConfirmationLine, VendorDetails};
pub use draft::DraftError;
pub use form::{OrderForm, SubmitControl};
pub use models::{DraftField, ItemField, OrderDraft};
pub use notice::{Notice, NoticeLevel};
pub use report::{compute_grand_total, export_report, OrderReport};
pub use review::{AdminDashboard, ReviewError};
pub use submission::{
    GateRejection, InventoryDecrementError, PersistenceError, StockError, SubmissionError,
    SubmissionOutcome, SubmissionState, SubmissionWorkflow, ValidationError,
};
