pub mod coin;
pub mod gpa;
pub mod loan;
pub mod percentage;
pub mod statistics;

pub use crate::domain::model::*;
pub use crate::domain::ports::SettingsProvider;
pub use crate::utils::error::Result;
