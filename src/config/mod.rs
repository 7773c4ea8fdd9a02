pub mod toml_config;

use crate::domain::ports::SettingsProvider;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use toml_config::TomlConfig;

#[cfg(feature = "cli")]
use crate::domain::model::GpaMode;
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "multi-calc")]
#[command(about = "Loan, percentage, GPA and statistics calculators with a coin toss")]
pub struct CliConfig {
    /// Optional TOML settings file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Decimal places for printed results (overrides the config file)
    #[arg(long, global = true)]
    pub precision: Option<usize>,

    /// Currency symbol for loan results (overrides the config file)
    #[arg(long, global = true)]
    pub currency: Option<String>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Monthly payment and interest for a fixed-rate loan
    Loan {
        #[arg(long, default_value = "10000")]
        principal: String,
        /// Annual interest rate in percent
        #[arg(long, default_value = "5")]
        rate: String,
        /// Term in months
        #[arg(long, default_value = "36")]
        months: u32,
    },
    /// Percentage and grade from obtained and total marks
    Percent { obtained: String, total: String },
    /// Percentage over several subjects given as obtained/total
    Aggregate {
        subjects: Vec<String>,
        /// CSV file with an obtained,total header
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Grade-point average from credits:grade entries
    Gpa {
        #[arg(long, value_enum, default_value = "cgpa")]
        mode: GpaMode,
        courses: Vec<String>,
        /// CSV file with a name,credits,grade header
        #[arg(long)]
        file: Option<PathBuf>,
        /// Score unrecognized letters as F instead of failing
        #[arg(long)]
        lenient_grades: bool,
    },
    /// Descriptive statistics over numbers separated by commas or whitespace
    Stats {
        values: Vec<String>,
        /// Read the numbers from a text file
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Toss a fair coin
    Toss {
        #[arg(short = 'n', long, default_value = "1")]
        count: u64,
        #[arg(long)]
        seed: Option<u64>,
    },
}

/// Effective settings after layering CLI overrides on the config file.
#[derive(Debug, Clone)]
pub struct Settings {
    file: TomlConfig,
    precision: Option<usize>,
    currency_symbol: Option<String>,
    lenient_grades: bool,
    coin_seed: Option<u64>,
}

impl Settings {
    pub fn from_file_config(file: TomlConfig) -> Self {
        Self {
            file,
            precision: None,
            currency_symbol: None,
            lenient_grades: false,
            coin_seed: None,
        }
    }

    pub fn with_precision(mut self, precision: Option<usize>) -> Self {
        self.precision = precision.or(self.precision);
        self
    }

    pub fn with_currency_symbol(mut self, symbol: Option<String>) -> Self {
        self.currency_symbol = symbol.or(self.currency_symbol);
        self
    }

    pub fn with_lenient_grades(mut self, lenient: bool) -> Self {
        self.lenient_grades |= lenient;
        self
    }

    pub fn with_coin_seed(mut self, seed: Option<u64>) -> Self {
        self.coin_seed = seed.or(self.coin_seed);
        self
    }
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Loads the config file if one was given and applies the global overrides.
    pub fn settings(&self) -> Result<Settings> {
        let file = match &self.config {
            Some(path) => {
                tracing::debug!(path = %path.display(), "Loading config file");
                TomlConfig::from_file(path)?
            }
            None => TomlConfig::default(),
        };

        let settings = Settings::from_file_config(file)
            .with_precision(self.precision)
            .with_currency_symbol(self.currency.clone());
        settings.validate()?;
        Ok(settings)
    }
}

impl SettingsProvider for Settings {
    fn precision(&self) -> usize {
        self.precision.unwrap_or_else(|| self.file.precision())
    }

    fn currency_symbol(&self) -> &str {
        self.currency_symbol
            .as_deref()
            .unwrap_or_else(|| self.file.currency_symbol())
    }

    fn lenient_grades(&self) -> bool {
        self.lenient_grades || self.file.lenient_grades()
    }

    fn coin_seed(&self) -> Option<u64> {
        self.coin_seed.or_else(|| self.file.coin_seed())
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        let mut effective = self.file.clone();
        effective.display.precision = Some(self.precision());
        effective.display.currency_symbol = Some(self.currency_symbol().to_string());
        effective.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_win_over_file() {
        let file = TomlConfig::from_toml_str(
            "[display]\nprecision = 4\ncurrency_symbol = \"€\"\n[coin]\nseed = 5\n",
        )
        .unwrap();
        let settings = Settings::from_file_config(file)
            .with_precision(Some(1))
            .with_currency_symbol(None)
            .with_coin_seed(Some(9));

        assert_eq!(settings.precision(), 1);
        assert_eq!(settings.currency_symbol(), "€");
        assert_eq!(settings.coin_seed(), Some(9));
        assert!(!settings.lenient_grades());
    }

    #[test]
    fn test_lenient_from_either_source() {
        let file = TomlConfig::from_toml_str("[grades]\nlenient = true\n").unwrap();
        assert!(Settings::from_file_config(file).lenient_grades());

        let settings = Settings::from_file_config(TomlConfig::default()).with_lenient_grades(true);
        assert!(settings.lenient_grades());
    }

    #[test]
    fn test_override_is_validated() {
        let settings = Settings::from_file_config(TomlConfig::default()).with_precision(Some(50));
        assert!(settings.validate().is_err());
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_cli_parses_subcommands() {
        let cli = CliConfig::parse_from([
            "multi-calc",
            "--precision",
            "3",
            "gpa",
            "--mode",
            "custom",
            "3:3.7",
            "4:2.0",
        ]);
        assert_eq!(cli.precision, Some(3));
        match cli.command {
            Command::Gpa { mode, courses, .. } => {
                assert_eq!(mode, GpaMode::Custom);
                assert_eq!(courses, vec!["3:3.7", "4:2.0"]);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
