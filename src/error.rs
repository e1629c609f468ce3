//! Error types for the metrics engine.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MetricsError {
    #[error("Division by zero in {operation}")]
    DivisionByZero { operation: String },

    #[error("Shape mismatch in {operation}: expected {expected} values, found {found}")]
    ShapeMismatch {
        operation: String,
        expected: usize,
        found: usize,
    },

    #[error("Duplicate entity identifier: {0}")]
    DuplicateEntity(String),

    #[error("Duplicate column name: {0}")]
    DuplicateColumn(String),

    #[error("Invalid parameter {name}: {reason}")]
    InvalidParameter { name: String, reason: String },
}

pub type Result<T> = std::result::Result<T, MetricsError>;

/// Fails with `ShapeMismatch` unless both lengths agree.
pub(crate) fn ensure_same_len(operation: &str, expected: usize, found: usize) -> Result<()> {
    if expected != found {
        tracing::warn!(operation, expected, found, "rejecting mismatched input lengths");
        return Err(MetricsError::ShapeMismatch {
            operation: operation.to_string(),
            expected,
            found,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_mismatch_message() {
        let err = ensure_same_len("time_saved_series", 3, 2).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Shape mismatch in time_saved_series: expected 3 values, found 2"
        );
    }

    #[test]
    fn test_same_len_ok() {
        assert!(ensure_same_len("roi_series", 4, 4).is_ok());
    }

    #[test]
    fn test_division_by_zero_message() {
        let err = MetricsError::DivisionByZero {
            operation: "roi".to_string(),
        };
        assert_eq!(err.to_string(), "Division by zero in roi");
    }
}
