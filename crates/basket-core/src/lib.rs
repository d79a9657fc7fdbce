//! # basket-core: Pure Cart Calculations
//!
//! Line item math and cart aggregation as pure functions with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Basket Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    basket-cli (or any front end)                │   │
//! │  │    JSON specs ──► Cart ──► totals / items ──► stdout           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ basket-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌────────────┐  ┌────────────┐  ┌────────────┐              │   │
//! │  │   │    item    │  │    cart    │  │ validation │              │   │
//! │  │   │  LineItem  │  │    Cart    │  │ predicates │              │   │
//! │  │   │    Spec    │  │   Totals   │  │    gate    │              │   │
//! │  │   └────────────┘  └────────────┘  └────────────┘              │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO FILES • NO NETWORK • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`item`] - `LineItemSpec` input and the validated `LineItem`
//! - [`cart`] - `Cart`, merge-by-id, `CartTotals`
//! - [`validation`] - Numeric predicates and the `validate` gate
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use basket_core::{Cart, LineItemSpec, RemoveOutcome};
//!
//! let mut cart = Cart::new("front-counter");
//! cart.add([
//!     LineItemSpec::new(1, "Bagel", 2.0, 3, 5.0),
//!     LineItemSpec::new(2, "Coffee", 4.0, 1, 5.0).discount_amt(0.5),
//! ])
//! .unwrap();
//!
//! assert_eq!(cart.totals().total_qty, 4);
//! assert_eq!(cart.remove(99), RemoveOutcome::NotFound);
//! ```

pub mod cart;
pub mod error;
pub mod item;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartEntry, CartTotals, RemoveOutcome};
pub use error::{CoreError, CoreResult, ValidationError, ValidationResult};
pub use item::{LineItem, LineItemSpec};
