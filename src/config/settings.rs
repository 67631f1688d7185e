//! User settings for the expense ledger
//!
//! Stored as pretty-printed JSON in `config.json`. Every field has a serde
//! default so older or hand-edited files keep loading.

use serde::{Deserialize, Serialize};

use super::paths::LedgerPaths;
use crate::error::{LedgerError, LedgerResult};
use crate::models::BudgetTable;
use crate::services::import::ImportOptions;

/// Import behaviour
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSettings {
    /// Skip imported rows whose amount is zero or negative
    #[serde(default)]
    pub reject_non_positive_amounts: bool,
}

impl ImportSettings {
    pub fn options(&self) -> ImportOptions {
        ImportOptions {
            reject_non_positive_amounts: self.reject_non_positive_amounts,
        }
    }
}

/// User settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Symbol printed in front of amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Monthly limit per category, used for budget alerts
    #[serde(default)]
    pub budgets: BudgetTable,

    #[serde(default)]
    pub import: ImportSettings,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "€".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            budgets: BudgetTable::default(),
            import: ImportSettings::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or defaults if the file doesn't exist yet
    pub fn load_or_create(paths: &LedgerPaths) -> LedgerResult<Self> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| LedgerError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| LedgerError::Config(format!("Failed to parse settings file: {}", e)))?;

        let negative = settings.budgets.negative_limits();
        if !negative.is_empty() {
            let names: Vec<&str> = negative.iter().map(|c| c.name()).collect();
            return Err(LedgerError::Config(format!(
                "Budgets must not be negative: {}",
                names.join(", ")
            )));
        }

        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &LedgerPaths) -> LedgerResult<()> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| LedgerError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| LedgerError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}
