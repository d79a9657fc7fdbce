//! # Line Items
//!
//! One product entry in a cart: what was asked for (`LineItemSpec`) and the
//! validated, fully derived result (`LineItem`).
//!
//! ## Derived Fields
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  price × qty ──────────────────────────────► total                     │
//! │                                                │                        │
//! │  total × tax_rate / 100 ───────────────────► tax_amt                   │
//! │                                                │                        │
//! │  (total + tax_amt) × discount_rate / 100                                │
//! │              + discount_amt ───────────────► final_discount            │
//! │                                                │                        │
//! │  total + tax_amt − final_discount ─────────► final_price               │
//! │                                                                         │
//! │  Recomputed on every quantity change. Nothing else can set them.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use basket_core::{LineItem, LineItemSpec};
//!
//! let mut item = LineItem::new(LineItemSpec::new(1, "Coffee Beans", 10.0, 2, 10.0)).unwrap();
//! assert_eq!(item.total(), 20.0);
//! assert_eq!(item.final_price(), 22.0);
//!
//! item.increase_qty(1).unwrap();
//! assert_eq!(item.qty(), 3);
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Number, Value};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError, ValidationResult};
use crate::validation::{
    by_value, is_non_negative_finite, is_positive_finite, is_positive_integer, validate,
};

// =============================================================================
// Line Item Spec
// =============================================================================

/// Raw, unvalidated input for a line item.
///
/// Holds whatever a JSON document or form supplied. A field that is absent,
/// `null` or of the wrong JSON type still deserializes; [`LineItem::new`]
/// then rejects it with that field's error. Ids and quantities keep the exact
/// JSON number so large integers are not rounded through `f64`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemSpec {
    #[serde(default, deserialize_with = "lenient_integer")]
    pub id: Option<Number>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "lenient_float")]
    pub price: Option<f64>,

    #[serde(default, deserialize_with = "lenient_integer")]
    pub qty: Option<Number>,

    #[serde(default, deserialize_with = "lenient_float")]
    pub tax_rate: Option<f64>,

    /// Percentage off subtotal plus tax. Defaults to 0 when absent.
    #[serde(default, deserialize_with = "float_or_nan")]
    pub discount_rate: f64,

    /// Flat amount off. Defaults to 0 when absent.
    #[serde(default, deserialize_with = "float_or_nan")]
    pub discount_amt: f64,

    /// Opaque payload carried through untouched.
    #[serde(default)]
    pub additional_stuff: Option<Value>,
}

impl LineItemSpec {
    /// Creates a spec with every required field set and no discounts.
    pub fn new(id: u64, name: impl Into<String>, price: f64, qty: u64, tax_rate: f64) -> Self {
        LineItemSpec {
            id: Some(id.into()),
            name: Some(name.into()),
            price: Some(price),
            qty: Some(qty.into()),
            tax_rate: Some(tax_rate),
            ..Default::default()
        }
    }

    pub fn discount_rate(mut self, rate: f64) -> Self {
        self.discount_rate = rate;
        self
    }

    pub fn discount_amt(mut self, amount: f64) -> Self {
        self.discount_amt = amount;
        self
    }

    pub fn additional_stuff(mut self, payload: Value) -> Self {
        self.additional_stuff = Some(payload);
        self
    }

    /// The id, checked and narrowed.
    pub fn checked_id(&self) -> ValidationResult<u64> {
        positive_integer(self.id.as_ref(), ValidationError::InvalidId)
    }

    /// The requested quantity, checked and narrowed.
    ///
    /// Used when merging into an existing item, where nothing else about the
    /// spec is looked at.
    pub fn checked_qty(&self) -> ValidationResult<u64> {
        positive_integer(self.qty.as_ref(), ValidationError::InvalidQty)
    }
}

/// Narrows a JSON number to a positive `u64`.
///
/// Integers are taken exactly; whole floats such as `3.0` are accepted below
/// 2^64. Missing values fail like any other non-integer.
fn positive_integer(value: Option<&Number>, error: ValidationError) -> ValidationResult<u64> {
    let Some(number) = value else {
        return Err(error);
    };
    if let Some(exact) = number.as_u64() {
        return validate(by_value(is_positive_integer), exact, error);
    }
    let float = validate(
        by_value(is_positive_integer),
        number.as_f64().unwrap_or(f64::NAN),
        error,
    )?;
    if float >= u64::MAX as f64 {
        return Err(error);
    }
    Ok(float as u64)
}

// -----------------------------------------------------------------------------
// Lenient field readers
// -----------------------------------------------------------------------------
// Wrong JSON types are a validation concern, not a parse failure.

fn lenient_integer<'de, D: Deserializer<'de>>(de: D) -> Result<Option<Number>, D::Error> {
    Ok(match Value::deserialize(de)? {
        Value::Number(n) => Some(n),
        _ => None,
    })
}

fn lenient_float<'de, D: Deserializer<'de>>(de: D) -> Result<Option<f64>, D::Error> {
    Ok(Value::deserialize(de)?.as_f64())
}

/// Present but not a number (`null` included) becomes NaN, which fails
/// `is_non_negative_finite`. Absent fields never get here and stay 0.
fn float_or_nan<'de, D: Deserializer<'de>>(de: D) -> Result<f64, D::Error> {
    Ok(Value::deserialize(de)?.as_f64().unwrap_or(f64::NAN))
}

fn lenient_string<'de, D: Deserializer<'de>>(de: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(de)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

// =============================================================================
// Line Item
// =============================================================================

/// A validated line item with its derived money fields.
///
/// ## Design Notes
/// - Fields are private: derived values must never drift from their inputs.
/// - Only `qty` can change after construction.
/// - `Serialize` for output; deliberately not `Deserialize`, which would
///   bypass validation. Build from a [`LineItemSpec`] instead.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LineItem {
    id: u64,
    name: String,
    price: f64,
    qty: u64,
    tax_rate: f64,
    discount_rate: f64,
    discount_amt: f64,
    #[ts(type = "unknown")]
    additional_stuff: Option<Value>,

    total: f64,
    tax_amt: f64,
    final_discount: f64,
    final_price: f64,
}

impl LineItem {
    /// Validates `spec` and builds a fully derived item.
    ///
    /// ## Validation Order
    /// The first failing field wins:
    /// ```text
    /// id → name → qty → price → tax_rate → discount_rate → discount_amt
    /// ```
    ///
    /// ## Example
    /// ```rust
    /// use basket_core::{LineItem, LineItemSpec, ValidationError};
    ///
    /// let bad = LineItemSpec::new(1, "Tea", -1.0, 1, 5.0);
    /// assert_eq!(LineItem::new(bad).unwrap_err(), ValidationError::InvalidPrice);
    /// ```
    pub fn new(mut spec: LineItemSpec) -> ValidationResult<Self> {
        let id = spec.checked_id()?;
        let name = validate(
            |n: &Option<String>| n.as_deref().is_some_and(|n| !n.is_empty()),
            spec.name.take(),
            ValidationError::InvalidName,
        )?
        .unwrap_or_default()
        .trim()
        .to_string();
        let qty = spec.checked_qty()?;
        let price = validate(
            by_value(is_positive_finite),
            spec.price.unwrap_or(f64::NAN),
            ValidationError::InvalidPrice,
        )?;
        let tax_rate = validate(
            by_value(is_positive_finite),
            spec.tax_rate.unwrap_or(f64::NAN),
            ValidationError::InvalidTaxRate,
        )?;
        let discount_rate = validate(
            by_value(is_non_negative_finite),
            spec.discount_rate,
            ValidationError::InvalidDiscountRate,
        )?;
        let discount_amt = validate(
            by_value(is_non_negative_finite),
            spec.discount_amt,
            ValidationError::InvalidDiscountAmount,
        )?;

        let mut item = LineItem {
            id,
            name,
            price,
            qty,
            tax_rate,
            discount_rate,
            discount_amt,
            additional_stuff: spec.additional_stuff,
            total: 0.0,
            tax_amt: 0.0,
            final_discount: 0.0,
            final_price: 0.0,
        };
        item.recalculate();
        Ok(item)
    }

    /// Adds `qty` units and recomputes every derived field.
    pub fn increase_qty(&mut self, qty: u64) -> CoreResult<()> {
        let qty = validate(by_value(is_positive_integer), qty, ValidationError::InvalidQty)?;
        self.qty = self
            .qty
            .checked_add(qty)
            .ok_or(ValidationError::InvalidQty)?;
        self.recalculate();
        Ok(())
    }

    /// Removes `qty` units and recomputes every derived field.
    ///
    /// ## Rules
    /// - Result must stay above zero, otherwise `QuantityUnderflow`
    /// - `qty` itself must be a positive integer, otherwise `InvalidQty`
    ///
    /// The item is untouched on either failure.
    pub fn decrease_qty(&mut self, qty: u64) -> CoreResult<()> {
        if self.qty <= qty {
            return Err(CoreError::QuantityUnderflow {
                current: self.qty,
                requested: qty,
            });
        }
        let qty = validate(by_value(is_positive_integer), qty, ValidationError::InvalidQty)?;
        self.qty -= qty;
        self.recalculate();
        Ok(())
    }

    fn recalculate(&mut self) {
        self.total = self.price * self.qty as f64;
        self.tax_amt = self.total * self.tax_rate / 100.0;
        self.final_discount =
            (self.total + self.tax_amt) * self.discount_rate / 100.0 + self.discount_amt;
        self.final_price = self.total + self.tax_amt - self.final_discount;
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    #[inline]
    pub fn id(&self) -> u64 {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn price(&self) -> f64 {
        self.price
    }

    #[inline]
    pub fn qty(&self) -> u64 {
        self.qty
    }

    /// Tax rate as a percentage (8.25 = 8.25%).
    #[inline]
    pub fn tax_rate(&self) -> f64 {
        self.tax_rate
    }

    #[inline]
    pub fn discount_rate(&self) -> f64 {
        self.discount_rate
    }

    /// The flat discount component only.
    #[inline]
    pub fn discount_amt(&self) -> f64 {
        self.discount_amt
    }

    #[inline]
    pub fn additional_stuff(&self) -> Option<&Value> {
        self.additional_stuff.as_ref()
    }

    /// `price × qty`
    #[inline]
    pub fn total(&self) -> f64 {
        self.total
    }

    #[inline]
    pub fn tax_amt(&self) -> f64 {
        self.tax_amt
    }

    /// Percentage discount plus flat discount.
    #[inline]
    pub fn final_discount(&self) -> f64 {
        self.final_discount
    }

    #[inline]
    pub fn final_price(&self) -> f64 {
        self.final_price
    }
}

impl TryFrom<LineItemSpec> for LineItem {
    type Error = ValidationError;

    fn try_from(spec: LineItemSpec) -> ValidationResult<Self> {
        LineItem::new(spec)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
