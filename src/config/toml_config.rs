use crate::domain::ports::SettingsProvider;
use crate::utils::error::{CalcError, Result};
use crate::utils::validation::{validate_non_empty_string, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

pub const DEFAULT_PRECISION: usize = 2;
pub const DEFAULT_CURRENCY_SYMBOL: &str = "$";
pub const MAX_PRECISION: usize = 10;

static ENV_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"));

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub grades: GradesConfig,
    #[serde(default)]
    pub coin: CoinConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub precision: Option<usize>,
    pub currency_symbol: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GradesConfig {
    /// Score unrecognized letters as F instead of rejecting them.
    pub lenient: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CoinConfig {
    pub seed: Option<u64>,
}

impl TomlConfig {
    /// Loads settings from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| CalcError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as-is.
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn validate_config(&self) -> Result<()> {
        if let Some(precision) = self.display.precision {
            if precision > MAX_PRECISION {
                return Err(CalcError::ConfigError {
                    message: format!(
                        "display.precision must be at most {}, got {}",
                        MAX_PRECISION, precision
                    ),
                });
            }
        }
        if let Some(symbol) = &self.display.currency_symbol {
            validate_non_empty_string("display.currency_symbol", symbol)?;
        }
        Ok(())
    }
}

impl SettingsProvider for TomlConfig {
    fn precision(&self) -> usize {
        self.display.precision.unwrap_or(DEFAULT_PRECISION)
    }

    fn currency_symbol(&self) -> &str {
        self.display
            .currency_symbol
            .as_deref()
            .unwrap_or(DEFAULT_CURRENCY_SYMBOL)
    }

    fn lenient_grades(&self) -> bool {
        self.grades.lenient.unwrap_or(false)
    }

    fn coin_seed(&self) -> Option<u64> {
        self.coin.seed
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[display]
precision = 3
currency_symbol = "€"

[grades]
lenient = true

[coin]
seed = 99
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.precision(), 3);
        assert_eq!(config.currency_symbol(), "€");
        assert!(config.lenient_grades());
        assert_eq!(config.coin_seed(), Some(99));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert_eq!(config.precision(), DEFAULT_PRECISION);
        assert_eq!(config.currency_symbol(), "$");
        assert!(!config.lenient_grades());
        assert_eq!(config.coin_seed(), None);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("MULTI_CALC_TEST_SYMBOL", "£");

        let toml_content = r#"
[display]
currency_symbol = "${MULTI_CALC_TEST_SYMBOL}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.currency_symbol(), "£");

        std::env::remove_var("MULTI_CALC_TEST_SYMBOL");
    }

    #[test]
    fn test_config_validation() {
        let config = TomlConfig::from_toml_str("[display]\nprecision = 42\n").unwrap();
        assert!(config.validate().is_err());

        let config = TomlConfig::from_toml_str("[display]\ncurrency_symbol = \"  \"\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        assert!(matches!(
            TomlConfig::from_toml_str("[display\nprecision = 2"),
            Err(CalcError::ConfigError { .. })
        ));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"[display]\nprecision = 4\n").unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.precision(), 4);
    }
}
