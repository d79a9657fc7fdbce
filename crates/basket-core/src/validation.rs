//! # Validation Module
//!
//! Numeric predicates and the single gate every constructor and mutation
//! argument passes through.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Flow                                    │
//! │                                                                         │
//! │  raw value ──► validate(predicate, value, error)                       │
//! │                     │                                                   │
//! │                     ├── predicate(value) holds? → Ok(value)            │
//! │                     │                                                   │
//! │                     └── otherwise            → Err(error)              │
//! │                                                                         │
//! │  Nothing is mutated until every gate for an operation has passed.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use basket_core::validation::{by_value, is_positive_finite, validate};
//! use basket_core::ValidationError;
//!
//! let price = validate(by_value(is_positive_finite), 9.99, ValidationError::InvalidPrice).unwrap();
//! assert_eq!(price, 9.99);
//!
//! let err = validate(by_value(is_positive_finite), -1.0, ValidationError::InvalidPrice).unwrap_err();
//! assert_eq!(err.to_string(), "Invalid Price");
//! ```

use crate::error::{ValidationError, ValidationResult};

// =============================================================================
// Numeric Input
// =============================================================================

/// Anything the predicates below can inspect.
///
/// Money fields and non-integral JSON numbers are checked as `f64`, exact
/// ids and quantities as `u64`. Both go through the same predicates.
pub trait Number: Copy {
    fn to_f64(self) -> f64;
}

macro_rules! impl_number {
    ($($ty:ty),*) => {
        $(
            impl Number for $ty {
                #[inline]
                fn to_f64(self) -> f64 {
                    self as f64
                }
            }
        )*
    };
}

impl_number!(f64, u64);

// =============================================================================
// Predicates
// =============================================================================

/// True iff `n` is a whole number greater than zero.
///
/// ## Example
/// ```rust
/// use basket_core::validation::is_positive_integer;
///
/// assert!(is_positive_integer(3.0));
/// assert!(is_positive_integer(3_u64));
/// assert!(!is_positive_integer(1.5));
/// assert!(!is_positive_integer(0_u64));
/// assert!(!is_positive_integer(f64::NAN));
/// ```
pub fn is_positive_integer<N: Number>(n: N) -> bool {
    let n = n.to_f64();
    n.is_finite() && n.fract() == 0.0 && n > 0.0
}

/// True iff `n` is finite and `>= 0`.
pub fn is_non_negative_finite<N: Number>(n: N) -> bool {
    let n = n.to_f64();
    n.is_finite() && n >= 0.0
}

/// True iff `n` is finite and `> 0`.
pub fn is_positive_finite<N: Number>(n: N) -> bool {
    let n = n.to_f64();
    n.is_finite() && n > 0.0
}

// =============================================================================
// Gate
// =============================================================================

/// Returns `value` unchanged if `predicate` accepts it, otherwise `error`.
pub fn validate<T, F>(predicate: F, value: T, error: ValidationError) -> ValidationResult<T>
where
    F: FnOnce(&T) -> bool,
{
    if predicate(&value) {
        Ok(value)
    } else {
        Err(error)
    }
}

/// Adapts a by-value numeric predicate for [`validate`].
///
/// ```rust
/// use basket_core::validation::{by_value, is_positive_integer, validate};
/// use basket_core::ValidationError;
///
/// assert!(validate(by_value(is_positive_integer), 2.0, ValidationError::InvalidQty).is_ok());
/// ```
pub fn by_value<N: Number>(predicate: fn(N) -> bool) -> impl Fn(&N) -> bool {
    move |n| predicate(*n)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_positive_integer() {
        assert!(is_positive_integer(1.0));
        assert!(is_positive_integer(42_u64));

        assert!(!is_positive_integer(0.0));
        assert!(!is_positive_integer(-3.0));
        assert!(!is_positive_integer(1.5));
        assert!(!is_positive_integer(f64::INFINITY));
        assert!(!is_positive_integer(f64::NAN));
        assert!(!is_positive_integer(0_u64));
    }

    #[test]
    fn test_is_non_negative_finite() {
        assert!(is_non_negative_finite(0.0));
        assert!(is_non_negative_finite(12.5));

        assert!(!is_non_negative_finite(-0.01));
        assert!(!is_non_negative_finite(f64::INFINITY));
        assert!(!is_non_negative_finite(f64::NAN));
    }

    #[test]
    fn test_is_positive_finite() {
        assert!(is_positive_finite(0.01));
        assert!(is_positive_finite(100.0));

        assert!(!is_positive_finite(0.0));
        assert!(!is_positive_finite(-5.0));
        assert!(!is_positive_finite(f64::NEG_INFINITY));
        assert!(!is_positive_finite(f64::NAN));
    }

    #[test]
    fn test_validate_passes_value_through() {
        let qty = validate(by_value(is_positive_integer), 4.0, ValidationError::InvalidQty);
        assert_eq!(qty, Ok(4.0));
    }

    #[test]
    fn test_validate_returns_given_error() {
        let result = validate(by_value(is_positive_finite), -1.0, ValidationError::InvalidPrice);
        assert_eq!(result, Err(ValidationError::InvalidPrice));
    }

    #[test]
    fn test_validate_with_closure() {
        let name = validate(|s: &&str| !s.is_empty(), "", ValidationError::InvalidName);
        assert_eq!(name, Err(ValidationError::InvalidName));
    }
}
