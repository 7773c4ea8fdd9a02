use crate::utils::error::{CalcError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_finite(field_name: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(CalcError::invalid_number(
            field_name,
            value,
            "value must be a finite number",
        ));
    }
    Ok(())
}

pub fn validate_positive(field_name: &str, value: f64) -> Result<()> {
    validate_finite(field_name, value)?;
    if value <= 0.0 {
        return Err(CalcError::out_of_range(
            field_name,
            value,
            "value must be greater than zero",
        ));
    }
    Ok(())
}

pub fn validate_non_negative(field_name: &str, value: f64) -> Result<()> {
    validate_finite(field_name, value)?;
    if value < 0.0 {
        return Err(CalcError::out_of_range(
            field_name,
            value,
            "value cannot be negative",
        ));
    }
    Ok(())
}

/// Fails closed when an intermediate or final figure overflowed.
pub fn ensure_representable(field_name: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(CalcError::out_of_range(
            field_name,
            value,
            "result is too large to represent",
        ));
    }
    Ok(())
}

pub fn validate_non_empty<T>(field_name: &str, values: &[T]) -> Result<()> {
    if values.is_empty() {
        return Err(CalcError::empty_input(field_name));
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(CalcError::ConfigError {
            message: format!("{} cannot be empty or whitespace-only", field_name),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if !(value >= min && value <= max) {
        return Err(CalcError::out_of_range(
            field_name,
            value,
            &format!("value must be between {} and {}", min, max),
        ));
    }
    Ok(())
}
