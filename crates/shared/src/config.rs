//! Ledger configuration management.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Ledger configuration.
///
/// Decided once at startup; the engine never re-probes configuration
/// per call.
#[derive(Debug, Clone, Deserialize)]
pub struct LedgerConfig {
    /// Entries flagged as requiring approval must be approved before
    /// posting when their total exceeds this threshold. `None` disables
    /// the approval gate entirely.
    #[serde(default)]
    pub approval_threshold: Option<Decimal>,

    /// Prefix for generated entry numbers (e.g. "JE" -> "JE-000001").
    #[serde(default = "default_entry_number_prefix")]
    pub entry_number_prefix: String,
}

fn default_entry_number_prefix() -> String {
    "JE".to_string()
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            approval_threshold: None,
            entry_number_prefix: default_entry_number_prefix(),
        }
    }
}

impl LedgerConfig {
    /// Loads configuration from config files and environment.
    ///
    /// Reads `config/default.toml`, then `config/{RUN_MODE}.toml`, then
    /// environment variables prefixed `TOKO__` (e.g.
    /// `TOKO__APPROVAL_THRESHOLD=10000`).
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or deserialized.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("TOKO").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
