use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use edible_api::{app, AppState, AuthConfig};
use edible_core::AdminCredentials;
use edible_order::VendorDetails;
use edible_store::app_config::{BackendKind, Config};
use edible_store::{
    DbClient, MemoryBackend, StoreCatalogRepository, StoreOrderRepository,
    StoreSettingsRepository,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "edible_api=debug,edible_order=debug,tower_http=debug,axum::rejection=trace".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("Failed to load config")?;
    tracing::info!("Starting Edible API on port {}", config.server.port);

    let vendor = VendorDetails {
        payment_account: config.vendor.payment_account.clone(),
        whatsapp_number: config.vendor.whatsapp_number.clone(),
        order_prefix: config.vendor.order_prefix.clone(),
    };
    let admin = AdminCredentials::new(&config.admin.username, &config.admin.password);
    let auth = AuthConfig {
        secret: config.admin.jwt_secret.clone(),
        expiration: config.admin.token_ttl_seconds,
    };

    let app_state = match config.database.backend {
        BackendKind::Postgres => {
            let db = DbClient::new(&config.database.url, config.database.max_connections)
                .await
                .context("Failed to connect to database")?;
            AppState::new(
                Arc::new(StoreCatalogRepository::new(db.pool.clone())),
                Arc::new(StoreOrderRepository::new(db.pool.clone())),
                Arc::new(StoreSettingsRepository::new(db.pool)),
                vendor,
                admin,
                auth,
            )
        }
        BackendKind::Memory => {
            tracing::warn!("Using in-memory backend; orders are lost on restart");
            AppState::from_backend(Arc::new(MemoryBackend::default()), vendor, admin, auth)
        }
    };

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
