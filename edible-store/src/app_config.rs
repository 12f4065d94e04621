use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub vendor: VendorConfig,
    pub admin: AdminConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    #[default]
    Postgres,
    Memory,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default)]
    pub backend: BackendKind,
}

fn default_max_connections() -> u32 {
    5
}

/// Vendor details shown to customers after an order is placed.
#[derive(Debug, Deserialize, Clone)]
pub struct VendorConfig {
    #[serde(default = "default_payment_account")]
    pub payment_account: String,
    #[serde(default = "default_whatsapp_number")]
    pub whatsapp_number: String,
    #[serde(default = "default_order_prefix")]
    pub order_prefix: String,
}

fn default_payment_account() -> String {
    "0043750696 (Access Bank) - TMC".to_string()
}

fn default_whatsapp_number() -> String {
    "2348039436510".to_string()
}

fn default_order_prefix() -> String {
    "EDM".to_string()
}

impl Default for VendorConfig {
    fn default() -> Self {
        Self {
            payment_account: default_payment_account(),
            whatsapp_number: default_whatsapp_number(),
            order_prefix: default_order_prefix(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AdminConfig {
    pub username: String,
    pub password: String,
    pub jwt_secret: String,
    #[serde(default = "default_token_ttl")]
    pub token_ttl_seconds: u64,
}

fn default_token_ttl() -> u64 {
    3600
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            // Optional per-environment overrides
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // e.g. EDIBLE__DATABASE__URL
            .add_source(config::Environment::with_prefix("EDIBLE").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vendor_section_is_optional() {
        let cfg: Config = config::Config::builder()
            .set_override("server.port", 3000)
            .unwrap()
            .set_override("database.backend", "memory")
            .unwrap()
            .set_override("admin.username", "admin")
            .unwrap()
            .set_override("admin.password", "admin123")
            .unwrap()
            .set_override("admin.jwt_secret", "secret")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(cfg.database.backend, BackendKind::Memory);
        assert_eq!(cfg.database.max_connections, 5);
        assert_eq!(cfg.vendor.order_prefix, "EDM");
        assert_eq!(cfg.admin.token_ttl_seconds, 3600);
    }
}
