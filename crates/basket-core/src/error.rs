//! # Error Types
//!
//! Domain-specific error types for basket-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  basket-core errors (this file)                                        │
//! │  ├── CoreError        - Domain rule violations                         │
//! │  └── ValidationError  - Field-level input contracts                    │
//! │                                                                         │
//! │  basket-cli errors (app)                                               │
//! │  └── CliError         - What the terminal user sees (code + message)   │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CliError → stderr                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every error is raised before any state changes. A caller that gets an
//! `Err` back can keep using the item or cart exactly as it was.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Domain rule violations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    /// Decreasing would leave the item with zero or negative quantity.
    ///
    /// ## User Workflow
    /// ```text
    /// Item qty: 2
    ///      │
    ///      ▼
    /// decrease_qty(2)
    ///      │
    ///      ▼
    /// QuantityUnderflow { current: 2, requested: 2 }
    ///      │
    ///      ▼
    /// Item still has qty 2
    /// ```
    #[error("cannot decrease qty, result would be <= 0")]
    QuantityUnderflow { current: u64, requested: u64 },

    /// Validation error (wraps ValidationError).
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Field-level input contract failures.
///
/// The display text of each variant is the exact message surfaced to users,
/// so it stays stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid Id")]
    InvalidId,

    #[error("Invalid Name")]
    InvalidName,

    #[error("Invalid Qty")]
    InvalidQty,

    #[error("Invalid Price")]
    InvalidPrice,

    #[error("Invalid Tax Rate")]
    InvalidTaxRate,

    #[error("Invalid Discount Rate")]
    InvalidDiscountRate,

    #[error("Invalid Discount Amount")]
    InvalidDiscountAmount,
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        assert_eq!(ValidationError::InvalidId.to_string(), "Invalid Id");
        assert_eq!(ValidationError::InvalidTaxRate.to_string(), "Invalid Tax Rate");
        assert_eq!(
            ValidationError::InvalidDiscountAmount.to_string(),
            "Invalid Discount Amount"
        );
    }

    #[test]
    fn test_underflow_message() {
        let err = CoreError::QuantityUnderflow {
            current: 2,
            requested: 3,
        };
        assert_eq!(err.to_string(), "cannot decrease qty, result would be <= 0");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::InvalidQty.into();
        assert!(matches!(core_err, CoreError::Validation(ValidationError::InvalidQty)));
        assert_eq!(core_err.to_string(), "Invalid Qty");
    }
}
