pub mod adapters;
#[cfg(feature = "cli")]
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};
pub use config::{toml_config::TomlConfig, Settings};

pub use crate::core::coin::CoinTosser;
pub use crate::core::gpa::compute_gpa;
pub use crate::core::loan::compute_loan;
pub use crate::core::percentage::{
    compute_aggregate_percentage, compute_simple_percentage, grade_from_percentage,
};
pub use crate::core::statistics::compute_statistics;
pub use domain::model::*;
pub use utils::error::{CalcError, Result};
