//! Configuration management for the Food Distribution Inventory Platform
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with INV_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Alert sweep thresholds
    pub alerts: AlertConfig,

    /// Figures served by the stubbed external collaborators
    pub collaborators: CollaboratorConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AlertConfig {
    /// Default look-ahead window for lot expiry alerts, in days
    pub expiry_days_ahead: i64,

    /// Default look-ahead window for certification alerts, in days
    pub certification_days_ahead: i64,

    /// Age after which a pending order raises an approval alert, in days
    pub pending_approval_days: i64,

    /// Overdue days after which a delivery delay is ALTA instead of MEDIA
    pub delivery_delay_high_days: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CollaboratorConfig {
    /// Stock figure returned by the fixed stock lookup
    pub stock_on_hand: i64,

    /// Order count returned by the fixed purchase history
    pub supplier_total_orders: u64,

    /// Pending order count returned by the fixed purchase history
    pub supplier_pending_orders: u64,

    /// Purchase amount returned by the fixed purchase history, in whole
    /// currency units
    pub supplier_purchase_amount: i64,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("INV_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("alerts.expiry_days_ahead", 30)?
            .set_default("alerts.certification_days_ahead", 30)?
            .set_default("alerts.pending_approval_days", 3)?
            .set_default("alerts.delivery_delay_high_days", 7)?
            .set_default("collaborators.stock_on_hand", 1000)?
            .set_default("collaborators.supplier_total_orders", 12)?
            .set_default("collaborators.supplier_pending_orders", 2)?
            .set_default("collaborators.supplier_purchase_amount", 50000)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (INV_ prefix)
            .add_source(
                Environment::with_prefix("INV")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            server: ServerConfig {
                port: 3000,
                host: "0.0.0.0".to_string(),
            },
            alerts: AlertConfig {
                expiry_days_ahead: 30,
                certification_days_ahead: 30,
                pending_approval_days: 3,
                delivery_delay_high_days: 7,
            },
            collaborators: CollaboratorConfig {
                stock_on_hand: 1000,
                supplier_total_orders: 12,
                supplier_pending_orders: 2,
                supplier_purchase_amount: 50000,
            },
        }
    }
}
