use std::collections::BTreeMap;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use super::config::ConfigError;
use super::time::{default_timezone_name, parse_timezone};

/// What the driver does when a country fails.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Log the error and stop the whole invocation.
    #[default]
    #[serde(rename = "fail_fast")]
    FailFast,
    /// Log the error and carry on with the next country.
    #[serde(rename = "continue_on_error")]
    ContinueOnError,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StorageConfig {
    #[serde(default = "default_table")]
    pub table: String,
    #[serde(default = "default_measurement")]
    pub measurement: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            table: default_table(),
            measurement: default_measurement(),
        }
    }
}

impl StorageConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        // The table name ends up in SQL as is.
        if !is_identifier(&self.table) {
            return Err(ConfigError::Invalid("storage.table must be a plain SQL identifier"));
        }

        if self.measurement.trim().is_empty() {
            return Err(ConfigError::Invalid("storage.measurement can't be empty"));
        }

        Ok(())
    }
}

fn default_table() -> String {
    "electricity_monthly_pricing".to_string()
}

fn default_measurement() -> String {
    "monthlyPricing".to_string()
}

fn is_identifier(value: &str) -> bool {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SettingsConfig {
    timezone: Option<String>,
    #[serde(default)]
    pub error_policy: ErrorPolicy,
    /// Country name to market area (EIC code).
    pub countries: BTreeMap<String, String>,
    #[serde(default)]
    pub storage: StorageConfig,
}

impl SettingsConfig {
    #[cfg(test)]
    pub fn new(countries: BTreeMap<String, String>, error_policy: ErrorPolicy) -> Self {
        Self {
            timezone: None,
            error_policy,
            countries,
            storage: StorageConfig::default(),
        }
    }

    #[cfg(test)]
    pub fn with_timezone(mut self, timezone: &str) -> Self {
        self.timezone = Some(timezone.to_string());
        self
    }

    /// Zone the reference month and the storage date are evaluated in.
    /// Falls back to `CHRONO_TIMEZONE` when the file doesn't set one.
    pub fn timezone(&self) -> Result<Tz, ConfigError> {
        match &self.timezone {
            Some(name) => parse_timezone(name),
            None => parse_timezone(&default_timezone_name()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.timezone()?;

        if self.countries.is_empty() {
            return Err(ConfigError::Invalid("At least one country is required"));
        }

        if self.countries.values().any(|area| area.trim().is_empty()) {
            return Err(ConfigError::Invalid("Every country needs a market area"));
        }

        self.storage.validate()
    }
}
