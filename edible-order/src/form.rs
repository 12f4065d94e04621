use std::sync::Arc;

use edible_catalog::{
    price_label, selection_options, CatalogSnapshot, ProductCatalog, ProductOption,
};
use edible_core::SettingsRepository;
use serde::Serialize;
use tracing::warn;

use crate::draft::DraftError;
use crate::models::{DraftField, ItemField, OrderDraft};
use crate::notice::Notice;
use crate::submission::{
    GateRejection, SubmissionError, SubmissionOutcome, SubmissionState, SubmissionWorkflow,
};

/// How the submit button should render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmitControl {
    Enabled,
    Disabled,
}

/// One customer's order form session: the draft, the catalog snapshot it
/// prices against, and the cached submission switch.
///
/// `submit` borrows the form mutably for its whole run, so the same form
/// cannot be submitted twice concurrently.
pub struct OrderForm {
    draft: OrderDraft,
    catalog: ProductCatalog,
    settings: Arc<dyn SettingsRepository>,
    workflow: Arc<SubmissionWorkflow>,
    submit_enabled: bool,
    state: SubmissionState,
    notices: Vec<Notice>,
}

impl OrderForm {
    pub fn new(
        catalog: ProductCatalog,
        settings: Arc<dyn SettingsRepository>,
        workflow: Arc<SubmissionWorkflow>,
    ) -> Self {
        Self {
            draft: OrderDraft::new(),
            catalog,
            settings,
            workflow,
            submit_enabled: true,
            state: SubmissionState::Idle,
            notices: Vec::new(),
        }
    }

    /// Loads the submission switch and the product list. Neither failure
    /// blocks the form: the switch keeps its last value and the catalog
    /// falls back to empty.
    pub async fn mount(&mut self) {
        self.load_submit_setting().await;
        if let Err(e) = self.catalog.refresh().await {
            self.notices.push(Notice::warning(e.to_string()));
        }
    }

    pub async fn load_submit_setting(&mut self) {
        match self.settings.get_submission_setting().await {
            Ok(setting) => self.submit_enabled = setting.submit_enabled,
            Err(e) => {
                warn!("Could not read submission setting: {}", e);
                self.notices.push(Notice::warning("Could not check whether orders are open"));
            }
        }
    }

    pub fn draft(&self) -> &OrderDraft {
        &self.draft
    }

    pub fn catalog(&self) -> &CatalogSnapshot {
        self.catalog.snapshot()
    }

    pub fn set_field(&mut self, field: DraftField, value: &str) -> Result<(), DraftError> {
        self.draft.set_field(field, value)
    }

    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn set_item_field(&mut self, index: usize, field: ItemField, value: &str) {
        self.draft
            .set_item_field(index, field, value, self.catalog.snapshot());
    }

    pub fn add_item(&mut self) {
        self.draft.add_item();
    }

    pub fn remove_item(&mut self, index: usize) {
        self.draft.remove_item(index);
    }

    pub fn total(&self) -> i64 {
        self.draft.compute_total()
    }

    /// Price text shown beside line `index`; `-` for a missing line.
    pub fn line_price_label(&self, index: usize) -> String {
        self.draft
            .items()
            .get(index)
            .map(price_label)
            .unwrap_or_else(|| "-".to_string())
    }

    /// Options for the product picker on line `index`
    pub fn options_for(&self, index: usize) -> Vec<ProductOption> {
        let current = self
            .draft
            .items()
            .get(index)
            .map(|item| item.product.as_str())
            .unwrap_or("");
        selection_options(self.catalog.snapshot(), current)
    }

    pub fn submit_control(&self) -> SubmitControl {
        if self.submit_enabled {
            SubmitControl::Enabled
        } else {
            SubmitControl::Disabled
        }
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    /// Submits the draft. Failures are also recorded as notices and leave
    /// the form usable.
    pub async fn submit(&mut self) -> Result<SubmissionOutcome, SubmissionError> {
        if !self.submit_enabled {
            let rejection = GateRejection::SubmissionsDisabled;
            self.notices.push(Notice::error(rejection.to_string()));
            return Err(rejection.into());
        }

        match self.workflow.submit(&mut self.draft, &mut self.catalog).await {
            Ok(outcome) => {
                self.state = outcome.state;
                self.notices.extend(outcome.notices.iter().cloned());
                Ok(outcome)
            }
            Err(e) => {
                self.state = e.state();
                self.notices.push(Notice::error(e.to_string()));
                Err(e)
            }
        }
    }

    /// Drains pending notifications.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::confirmation::VendorDetails;
    use crate::notice::NoticeLevel;
    use edible_shared::Product;
    use edible_store::MemoryBackend;

    fn form(backend: &Arc<MemoryBackend>) -> OrderForm {
        let workflow = Arc::new(SubmissionWorkflow::new(
            backend.clone(),
            backend.clone(),
            VendorDetails::default(),
        ));
        OrderForm::new(ProductCatalog::new(backend.clone()), backend.clone(), workflow)
    }

    #[tokio::test]
    async fn test_disabled_switch_rejects_before_workflow() {
        let backend = Arc::new(MemoryBackend::with_products(vec![Product::new("Cow Leg", None, 4)]));
        backend.set_submit_enabled(false);

        let mut form = form(&backend);
        form.mount().await;
        assert_eq!(form.submit_control(), SubmitControl::Disabled);

        form.set_field(DraftField::Name, "Ada").unwrap();
        form.set_field(DraftField::Phone, "0801").unwrap();
        form.set_item_field(0, ItemField::Type, "Cow Leg");

        let err = form.submit().await.unwrap_err();
        assert!(matches!(err, SubmissionError::Rejected(GateRejection::SubmissionsDisabled)));
        assert_eq!(form.state(), SubmissionState::Idle);
        assert!(backend.inserted_orders().is_empty());
    }

    #[tokio::test]
    async fn test_catalog_failure_on_mount_keeps_form_usable() {
        let backend = Arc::new(MemoryBackend::with_products(vec![Product::new("Cow Leg", None, 4)]));
        backend.fail_catalog_reads(true);

        let mut form = form(&backend);
        form.mount().await;

        assert!(form.catalog().is_empty());
        assert!(form.options_for(0).is_empty());
        let notices = form.take_notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].level, NoticeLevel::Warning);

        form.set_field(DraftField::Name, "Ada").unwrap();
        form.add_item();
        assert_eq!(form.draft().items().len(), 2);
        assert_eq!(form.line_price_label(1), "-");
    }

    #[tokio::test]
    async fn test_line_price_labels_follow_selection() {
        let backend = Arc::new(MemoryBackend::with_products(vec![
            Product::new("Cow Leg", None, 4),
            Product::new("1 slot Beef", Some(7500), 4),
        ]));
        let mut form = form(&backend);
        form.mount().await;

        assert_eq!(form.line_price_label(0), "-");
        form.set_item_field(0, ItemField::Type, "Cow Leg");
        assert_eq!(form.line_price_label(0), "Price at venue");
        form.set_item_field(0, ItemField::Type, "1 slot Beef");
        assert_eq!(form.line_price_label(0), "₦7500");
    }

    #[tokio::test]
    async fn test_successful_submit_resets_draft() {
        let backend = Arc::new(MemoryBackend::with_products(vec![
            Product::new("Half slot Ike", Some(3750), 6),
        ]));
        let mut form = form(&backend);
        form.mount().await;

        form.set_field(DraftField::Name, "Ada").unwrap();
        form.set_field(DraftField::Phone, "0801").unwrap();
        form.set_item_field(0, ItemField::Type, "Half slot Ike");
        form.set_item_field(0, ItemField::Quantity, "2");
        assert_eq!(form.total(), 7500);
        assert_eq!(form.line_price_label(0), "₦3750");

        let outcome = form.submit().await.unwrap();
        assert_eq!(outcome.confirmation.total_price, 7500);
        assert_eq!(form.state(), SubmissionState::Done);
        assert_eq!(form.draft(), &OrderDraft::new());
        assert_eq!(form.options_for(0)[0].available, 4);
    }
}
