//! Validation utilities for numeric request parameters
//!
//! All checks run before any scoring work so that invalid input is rejected
//! deterministically with the name of the offending field.

use crate::error::RecError;

/// Validate that a result or neighbour count is positive
///
/// # Examples
///
/// ```
/// use novelrec_core::validation::validate_count;
///
/// assert!(validate_count(10, "n").is_ok());
/// assert!(validate_count(0, "n").is_err());
/// ```
pub fn validate_count(value: usize, field: &str) -> Result<(), RecError> {
    if value > 0 {
        Ok(())
    } else {
        Err(RecError::validation_field(
            format!("{} must be greater than 0", field),
            field,
        ))
    }
}

/// Validate that a blending weight is finite and non-negative
///
/// # Examples
///
/// ```
/// use novelrec_core::validation::validate_weight;
///
/// assert!(validate_weight(0.6, "cf_weight").is_ok());
/// assert!(validate_weight(0.0, "cf_weight").is_ok());
/// assert!(validate_weight(-0.1, "cf_weight").is_err());
/// assert!(validate_weight(f64::NAN, "cf_weight").is_err());
/// ```
pub fn validate_weight(value: f64, field: &str) -> Result<(), RecError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(RecError::validation_field(
            format!("{} must be a finite non-negative number, got {}", field, value),
            field,
        ))
    }
}

/// Validate that a metric value is finite and non-negative
pub fn validate_metric(value: f64, field: &str) -> Result<(), RecError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(RecError::validation_field(
            format!("metric {} must be finite and non-negative, got {}", field, value),
            field,
        ))
    }
}

/// Validate that a metric value is finite (growth may be negative)
pub fn validate_finite(value: f64, field: &str) -> Result<(), RecError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(RecError::validation_field(
            format!("metric {} must be finite, got {}", field, value),
            field,
        ))
    }
}

/// Validate that a value lies within an inclusive range
///
/// # Examples
///
/// ```
/// use novelrec_core::validation::validate_range;
///
/// assert!(validate_range(4.5, 0.0, 5.0, "rating").is_ok());
/// assert!(validate_range(5.5, 0.0, 5.0, "rating").is_err());
/// ```
pub fn validate_range(value: f64, min: f64, max: f64, field: &str) -> Result<(), RecError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(RecError::validation_field(
            format!("{} must be between {} and {}, got {}", field, min, max, value),
            field,
        ))
    }
}
