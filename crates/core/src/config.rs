//! Engine configuration
//!
//! Constructed once at process start and handed to the normalizer, the
//! decorator factory and the facade. Every field has a serde default so a
//! partial TOML file only overrides what it names.

use chrono::format::{Item, StrftimeItems};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{CoreError, CoreResult};

/// Company-wide presentation defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyDefaults {
    #[serde(default = "default_company_name")]
    pub company_name: String,

    /// Authority used when a signature recipe does not name one
    #[serde(default = "default_signing_authority")]
    pub default_signing_authority: String,

    /// chrono strftime pattern for dates shown in security blocks
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

/// Configuration for the report engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Currency every amount is normalized to
    #[serde(default = "default_base_currency")]
    pub base_currency: String,

    /// 1 unit of `code` = `rate` units of the base currency
    #[serde(default = "default_rates")]
    pub rates: BTreeMap<String, Decimal>,

    #[serde(default)]
    pub company: CompanyDefaults,

    /// Regions covered by the consolidated report
    #[serde(default = "default_subsidiaries")]
    pub subsidiaries: Vec<String>,

    #[serde(default = "default_report_author")]
    pub report_author: String,
}

fn default_company_name() -> String {
    "FinanCorp S.A.".to_string()
}

fn default_signing_authority() -> String {
    "Gerencia General".to_string()
}

fn default_date_format() -> String {
    "%d/%m/%Y".to_string()
}

fn default_base_currency() -> String {
    "EUR".to_string()
}

fn default_rates() -> BTreeMap<String, Decimal> {
    [
        ("PEN", Decimal::new(24, 2)),
        ("CNY", Decimal::new(13, 2)),
        ("USD", Decimal::new(92, 2)),
        ("MXN", Decimal::new(50, 3)),
        ("COP", Decimal::new(21, 5)),
    ]
    .into_iter()
    .map(|(code, rate)| (code.to_string(), rate))
    .collect()
}

fn default_subsidiaries() -> Vec<String> {
    vec!["PERU".to_string(), "MEXICO".to_string(), "SPAIN".to_string()]
}

fn default_report_author() -> String {
    "SERF System".to_string()
}

impl Default for CompanyDefaults {
    fn default() -> Self {
        Self {
            company_name: default_company_name(),
            default_signing_authority: default_signing_authority(),
            date_format: default_date_format(),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            base_currency: default_base_currency(),
            rates: default_rates(),
            company: CompanyDefaults::default(),
            subsidiaries: default_subsidiaries(),
            report_author: default_report_author(),
        }
    }
}

impl EngineConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> CoreResult<Self> {
        let mut config: EngineConfig = toml::from_str(content)
            .map_err(|e| CoreError::config(format!("parse error: {}", e)))?;
        config.drop_base_rate();
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file
    pub fn load_file<P: AsRef<Path>>(path: P) -> CoreResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(CoreError::config(format!(
                "config file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| CoreError::config(format!("cannot read {}: {}", path.display(), e)))?;
        let config = Self::from_toml_str(&content)?;

        tracing::info!(path = %path.display(), "Engine configuration loaded");
        Ok(config)
    }

    /// Remove the rate entry for the base currency, if the table carries one.
    ///
    /// A partial file that only changes `base_currency` keeps the default
    /// table, which may list the new base.
    fn drop_base_rate(&mut self) {
        let base = self.base_currency.trim().to_uppercase();
        let before = self.rates.len();
        self.rates.retain(|code, _| code.trim().to_uppercase() != base);
        if self.rates.len() != before {
            tracing::debug!(currency = %base, "Dropped rate entry for base currency");
        }
    }

    /// Check invariants that serde cannot express
    pub fn validate(&self) -> CoreResult<()> {
        if self.base_currency.trim().is_empty() {
            return Err(CoreError::config("base_currency cannot be empty"));
        }

        let base = self.base_currency.trim().to_uppercase();
        for (code, rate) in &self.rates {
            if code.trim().to_uppercase() == base {
                return Err(CoreError::BaseCurrencyRate(base));
            }
            if *rate <= Decimal::ZERO {
                return Err(CoreError::InvalidRate {
                    code: code.clone(),
                    rate: *rate,
                });
            }
        }

        let pattern = &self.company.date_format;
        if pattern.is_empty() || StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error))
        {
            return Err(CoreError::config(format!(
                "invalid date_format pattern: '{}'",
                pattern
            )));
        }

        Ok(())
    }
}
