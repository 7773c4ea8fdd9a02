use thiserror::Error;

#[derive(Error, Debug)]
pub enum CalcError {
    #[error("Invalid number for {field}: '{value}' ({reason})")]
    InvalidNumber {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Value out of range for {field}: {value} ({reason})")]
    OutOfRange {
        field: String,
        value: String,
        reason: String,
    },

    #[error("No values provided for {field}")]
    EmptyInput { field: String },

    #[error("Aggregate denominator for {field} sums to zero")]
    DegenerateAggregate { field: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl CalcError {
    pub fn invalid_number(field: &str, value: impl ToString, reason: &str) -> Self {
        Self::InvalidNumber {
            field: field.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn out_of_range(field: &str, value: impl ToString, reason: &str) -> Self {
        Self::OutOfRange {
            field: field.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn empty_input(field: &str) -> Self {
        Self::EmptyInput {
            field: field.to_string(),
        }
    }

    pub fn degenerate(field: &str) -> Self {
        Self::DegenerateAggregate {
            field: field.to_string(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidNumber { .. }
            | Self::OutOfRange { .. }
            | Self::EmptyInput { .. }
            | Self::DegenerateAggregate { .. } => ErrorCategory::Input,
            Self::ConfigError { .. } => ErrorCategory::Configuration,
            Self::IoError(_) | Self::CsvError(_) | Self::SerializationError(_) => {
                ErrorCategory::System
            }
        }
    }

    /// Input errors are correctable by the user; system errors are not.
    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            Self::InvalidNumber { field, .. } => {
                format!("Enter a plain numeric value for {}", field)
            }
            Self::OutOfRange { field, reason, .. } => {
                format!("Adjust {} so that it satisfies: {}", field, reason)
            }
            Self::EmptyInput { field } => format!("Provide at least one value for {}", field),
            Self::DegenerateAggregate { field } => {
                format!("Make sure the {} add up to more than zero", field)
            }
            Self::ConfigError { .. } => "Check the configuration file syntax and values".to_string(),
            Self::IoError(_) => "Check that the file exists and is readable".to_string(),
            Self::CsvError(_) => "Check the CSV header and column values".to_string(),
            Self::SerializationError(_) => "Retry without --json".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::InvalidNumber { field, value, .. } => {
                format!("'{}' is not a valid number for {}", value, field)
            }
            Self::OutOfRange { field, reason, .. } => format!("{}: {}", field, reason),
            Self::EmptyInput { field } => format!("Please enter at least one value for {}", field),
            Self::DegenerateAggregate { field } => format!("Total {} cannot be zero", field),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CalcError>;
