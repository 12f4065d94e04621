use std::sync::Arc;

use edible_catalog::ProductCatalog;
use edible_core::{AdminCredentials, CatalogBackend, OrderRepository, SettingsRepository};
use edible_order::{AdminDashboard, OrderForm, SubmissionWorkflow, VendorDetails};

#[derive(Clone)]
pub struct AuthConfig {
    pub secret: String,
    pub expiration: u64,
}

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn CatalogBackend>,
    pub orders: Arc<dyn OrderRepository>,
    pub settings: Arc<dyn SettingsRepository>,
    pub workflow: Arc<SubmissionWorkflow>,
    pub admin: AdminCredentials,
    pub auth: AuthConfig,
}

impl AppState {
    pub fn new(
        catalog: Arc<dyn CatalogBackend>,
        orders: Arc<dyn OrderRepository>,
        settings: Arc<dyn SettingsRepository>,
        vendor: VendorDetails,
        admin: AdminCredentials,
        auth: AuthConfig,
    ) -> Self {
        let workflow = Arc::new(SubmissionWorkflow::new(
            catalog.clone(),
            orders.clone(),
            vendor,
        ));
        Self {
            catalog,
            orders,
            settings,
            workflow,
            admin,
            auth,
        }
    }

    /// State over a single backend that serves all three roles.
    pub fn from_backend<B>(
        backend: Arc<B>,
        vendor: VendorDetails,
        admin: AdminCredentials,
        auth: AuthConfig,
    ) -> Self
    where
        B: CatalogBackend + OrderRepository + SettingsRepository + 'static,
    {
        Self::new(
            backend.clone(),
            backend.clone(),
            backend,
            vendor,
            admin,
            auth,
        )
    }

    /// A fresh form session for one request
    pub fn order_form(&self) -> OrderForm {
        OrderForm::new(
            ProductCatalog::new(self.catalog.clone()),
            self.settings.clone(),
            self.workflow.clone(),
        )
    }

    pub fn dashboard(&self) -> AdminDashboard {
        AdminDashboard::new(self.orders.clone(), self.settings.clone())
    }
}
