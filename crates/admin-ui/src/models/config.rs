//! Console configuration
//!
//! Loaded from the embedded `console.toml`; the settings page edits a copy
//! in memory and can export or import it as TOML or JSON.

use std::str::FromStr;
use std::sync::LazyLock;

use hotelier_data::{FieldError, FieldWarning, ValidationResult};
use regex::Regex;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use super::error::{ConsoleError, ConsoleResult};

const EMBEDDED_CONFIG: &str = include_str!("../../console.toml");

static CURRENCY_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{3}$").expect("valid currency pattern"));

pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct ConsoleConfig {
    pub console: ConsoleSection,
    pub notifications: NotificationSection,
    pub billing: BillingSection,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ConsoleSection {
    pub title: String,
    /// Name recorded as the actor of activity entries
    pub operator: String,
    pub page_size: usize,
    pub log_level: String,
    /// Ask before deletes and cancellations
    pub confirm_destructive: bool,
}

impl Default for ConsoleSection {
    fn default() -> Self {
        Self {
            title: "Hotelier 管理后台".to_owned(),
            operator: "admin".to_owned(),
            page_size: 10,
            log_level: "info".to_owned(),
            confirm_destructive: true,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct NotificationSection {
    pub timeout_secs: u64,
    pub max_visible: usize,
}

impl Default for NotificationSection {
    fn default() -> Self {
        Self {
            timeout_secs: 4,
            max_visible: 5,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct BillingSection {
    pub currency: String,
    pub currency_symbol: String,
    pub default_tax_rate_bps: u32,
}

impl Default for BillingSection {
    fn default() -> Self {
        Self {
            currency: "CNY".to_owned(),
            currency_symbol: "¥".to_owned(),
            default_tax_rate_bps: 600,
        }
    }
}

/// Export/import text format
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Display, EnumString, EnumIter, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum ConfigFormat {
    #[default]
    Toml,
    Json,
}

impl ConsoleConfig {
    /// The shipped defaults. Falls back to [`Default`] if the embedded file is broken.
    pub fn embedded() -> Self {
        match Self::from_toml_str(EMBEDDED_CONFIG) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(error = %err, "embedded console.toml is invalid, using defaults");
                Self::default()
            }
        }
    }

    pub fn from_toml_str(text: &str) -> ConsoleResult<Self> {
        toml::from_str(text).map_err(|e| ConsoleError::config(format!("TOML 解析失败: {}", e.message())))
    }

    pub fn to_toml_string(&self) -> ConsoleResult<String> {
        toml::to_string_pretty(self).map_err(|e| ConsoleError::config(format!("TOML 序列化失败: {e}")))
    }

    pub fn export(&self, format: ConfigFormat) -> ConsoleResult<String> {
        match format {
            ConfigFormat::Toml => self.to_toml_string(),
            ConfigFormat::Json => serde_json::to_string_pretty(self)
                .map_err(|e| ConsoleError::config(format!("JSON 序列化失败: {e}"))),
        }
    }

    /// Parses and validates text produced by [`ConsoleConfig::export`] or edited by hand.
    pub fn import(text: &str, format: ConfigFormat) -> ConsoleResult<Self> {
        let config = match format {
            ConfigFormat::Toml => Self::from_toml_str(text)?,
            ConfigFormat::Json => {
                serde_json::from_str(text).map_err(|e| ConsoleError::config(format!("JSON 解析失败: {e}")))?
            }
        };
        config.validate().into_result()?;
        Ok(config)
    }

    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::success();
        let console = &self.console;
        result.check(!console.title.trim().is_empty(), || FieldError::required("console.title"));
        result.check(!console.operator.trim().is_empty(), || FieldError::required("console.operator"));
        result.check((1..=100).contains(&console.page_size), || {
            FieldError::out_of_range("console.page_size", 1, 100)
        });
        result.check(LOG_LEVELS.contains(&console.log_level.as_str()), || {
            FieldError::invalid_value("console.log_level", "expected one of trace, debug, info, warn, error")
        });
        if console.page_size > 50 {
            result.add_warning(FieldWarning::new(
                "console.page_size",
                "每页超过 50 条时表格渲染可能变慢",
                "PERFORMANCE",
            ));
        }

        let notifications = &self.notifications;
        result.check((1..=60).contains(&notifications.timeout_secs), || {
            FieldError::out_of_range("notifications.timeout_secs", 1, 60)
        });
        result.check((1..=20).contains(&notifications.max_visible), || {
            FieldError::out_of_range("notifications.max_visible", 1, 20)
        });

        let billing = &self.billing;
        result.check(CURRENCY_CODE.is_match(&billing.currency), || {
            FieldError::invalid_format("billing.currency", "ISO 4217 code such as CNY")
        });
        result.check(!billing.currency_symbol.is_empty(), || {
            FieldError::required("billing.currency_symbol")
        });
        result.check(billing.default_tax_rate_bps <= 10_000, || {
            FieldError::out_of_range("billing.default_tax_rate_bps", 0, 10_000)
        });
        result
    }

    /// Level for the tracing subscriber; `info` when the setting is unrecognised.
    pub fn log_level(&self) -> tracing::Level {
        tracing::Level::from_str(&self.console.log_level).unwrap_or(tracing::Level::INFO)
    }

    pub fn money(&self, amount: hotelier_data::Money) -> String {
        amount.with_symbol(&self.billing.currency_symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_matches_defaults() {
        let config = ConsoleConfig::embedded();
        assert_eq!(config, ConsoleConfig::default());
        assert!(config.validate().is_valid());
        assert_eq!(config.log_level(), tracing::Level::INFO);
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config = ConsoleConfig::from_toml_str("[console]\npage_size = 25\n").unwrap();
        assert_eq!(config.console.page_size, 25);
        assert_eq!(config.console.operator, "admin");
        assert_eq!(config.billing, BillingSection::default());
    }

    #[test]
    fn test_toml_round_trip_keeps_edits() {
        let mut config = ConsoleConfig::default();
        config.console.title = "测试".to_owned();
        config.billing.default_tax_rate_bps = 900;
        let text = config.to_toml_string().unwrap();
        assert_eq!(ConsoleConfig::import(&text, ConfigFormat::Toml).unwrap(), config);

        let json = config.export(ConfigFormat::Json).unwrap();
        assert_eq!(ConsoleConfig::import(&json, ConfigFormat::Json).unwrap(), config);
    }

    #[test]
    fn test_validation_ranges() {
        let mut config = ConsoleConfig::default();
        config.console.page_size = 0;
        config.console.log_level = "loud".to_owned();
        config.notifications.timeout_secs = 120;
        config.notifications.max_visible = 0;
        config.billing.currency = "rmb".to_owned();
        config.billing.default_tax_rate_bps = 10_001;

        let result = config.validate();
        for field in [
            "console.page_size",
            "console.log_level",
            "notifications.timeout_secs",
            "notifications.max_visible",
            "billing.currency",
            "billing.default_tax_rate_bps",
        ] {
            assert!(result.error_for(field).is_some(), "{field}");
        }
        assert_eq!(config.log_level(), tracing::Level::INFO);
    }

    #[test]
    fn test_large_page_size_only_warns() {
        let mut config = ConsoleConfig::default();
        config.console.page_size = 80;
        let result = config.validate();
        assert!(result.is_valid());
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_import_rejects_bad_text() {
        let err = ConsoleConfig::import("[console\n", ConfigFormat::Toml).unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_ERROR");

        let err = ConsoleConfig::import("[console]\npage_size = 0\n", ConfigFormat::Toml).unwrap_err();
        assert_eq!(err.field_messages()[0].0, "console.page_size");
    }

    #[test]
    fn test_format_names() {
        assert_eq!(ConfigFormat::Json.to_string(), "json");
        assert_eq!("toml".parse::<ConfigFormat>().unwrap(), ConfigFormat::Toml);
    }
}
