//! # Cart
//!
//! An ordered collection of line items, unique by id.
//!
//! ## Cart Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Operation            Cart Change                                       │
//! │  ─────────            ───────────                                       │
//! │                                                                         │
//! │  add(entries) ──────► id present?  items[i].increase_qty(qty)          │
//! │                       id absent?   items.push(item)                    │
//! │                                                                         │
//! │  remove(id) ────────► items.remove(i)   (miss → NotFound, no error)    │
//! │                                                                         │
//! │  clear() ───────────► items.clear()                                    │
//! │                                                                         │
//! │  totals() / grand_total() / items() ──► read only                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - At most one item per id
//! - Items stay in insertion order; removal shifts later items left
//! - A failed `add` leaves the cart exactly as it was
//!
//! ## Usage
//! ```rust
//! use basket_core::{Cart, LineItemSpec};
//!
//! let mut cart = Cart::new("checkout");
//! cart.add([
//!     LineItemSpec::new(1, "Apple", 0.5, 4, 10.0),
//!     LineItemSpec::new(1, "Apple", 0.5, 2, 10.0),
//! ])
//! .unwrap();
//!
//! assert_eq!(cart.len(), 1);
//! assert_eq!(cart.totals().total_qty, 6);
//! ```

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;
use ts_rs::TS;

use crate::error::CoreResult;
use crate::item::{LineItem, LineItemSpec};

// =============================================================================
// Cart Entry
// =============================================================================

/// Something that can be added to a cart.
///
/// Specs are validated on insert. Items were validated when they were built
/// and go in as they are.
#[derive(Debug, Clone, PartialEq)]
pub enum CartEntry {
    Spec(LineItemSpec),
    Item(LineItem),
}

impl From<LineItemSpec> for CartEntry {
    fn from(spec: LineItemSpec) -> Self {
        CartEntry::Spec(spec)
    }
}

impl From<LineItem> for CartEntry {
    fn from(item: LineItem) -> Self {
        CartEntry::Item(item)
    }
}

// =============================================================================
// Remove Outcome
// =============================================================================

/// What `remove` did. A miss is not an error; the caller decides how to
/// surface it.
#[derive(Debug, Clone, PartialEq)]
pub enum RemoveOutcome {
    Removed(LineItem),
    NotFound,
}

impl RemoveOutcome {
    pub fn is_removed(&self) -> bool {
        matches!(self, RemoveOutcome::Removed(_))
    }
}

// =============================================================================
// Cart Totals
// =============================================================================

/// Aggregate over every item in the cart.
///
/// `total_discount_amt` sums the flat discount component only, not the
/// combined final discount.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartTotals {
    pub total_qty: u64,
    pub total_price: f64,
    pub total_tax_amt: f64,
    pub total_discount_amt: f64,
    pub total_final_price: f64,
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// Storage is private. Reads go through accessors, writes through
/// `add` / `remove` / `clear`.
#[derive(Debug, Clone)]
pub struct Cart {
    name: String,
    items: Vec<LineItem>,
    created_at: DateTime<Utc>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new(name: impl Into<String>) -> Self {
        Cart {
            name: name.into(),
            items: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Informational only.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// When the cart was created or last cleared.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Adds entries in order, merging by id.
    ///
    /// ## Behavior
    /// - Id already in cart: increases that item's quantity by the entry's qty
    /// - Id not in cart, entry is a `LineItem`: appended as is
    /// - Id not in cart, entry is a spec: validated, built, appended
    ///
    /// Entries later in the same call see the effect of earlier ones, so two
    /// specs with the same id produce one item.
    ///
    /// ## Errors
    /// The first validation failure aborts the whole call and the cart keeps
    /// its previous contents.
    pub fn add<I>(&mut self, entries: I) -> CoreResult<()>
    where
        I: IntoIterator,
        I::Item: Into<CartEntry>,
    {
        let mut staged = self.items.clone();

        for entry in entries {
            match entry.into() {
                CartEntry::Item(item) => {
                    match staged.iter().position(|i| i.id() == item.id()) {
                        Some(index) => {
                            staged[index].increase_qty(item.qty())?;
                            debug!(id = item.id(), qty = staged[index].qty(), "merged item into cart");
                        }
                        None => {
                            debug!(id = item.id(), "added item to cart");
                            staged.push(item);
                        }
                    }
                }
                CartEntry::Spec(spec) => {
                    let index = spec
                        .checked_id()
                        .ok()
                        .and_then(|id| staged.iter().position(|i| i.id() == id));

                    match index {
                        Some(index) => {
                            staged[index].increase_qty(spec.checked_qty()?)?;
                            debug!(
                                id = staged[index].id(),
                                qty = staged[index].qty(),
                                "merged spec into cart"
                            );
                        }
                        None => {
                            let item = LineItem::new(spec)?;
                            debug!(id = item.id(), "added spec to cart");
                            staged.push(item);
                        }
                    }
                }
            }
        }

        self.items = staged;
        Ok(())
    }

    /// Adds a single entry. See [`Cart::add`].
    pub fn add_one(&mut self, entry: impl Into<CartEntry>) -> CoreResult<()> {
        self.add([entry.into()])
    }

    /// Removes the item with `id`, keeping the rest in order.
    ///
    /// ## Returns
    /// - `Removed(item)` with the item that was taken out
    /// - `NotFound` if no item has that id; the cart is unchanged
    pub fn remove(&mut self, id: u64) -> RemoveOutcome {
        match self.items.iter().position(|i| i.id() == id) {
            Some(index) => {
                debug!(id, "removed item from cart");
                RemoveOutcome::Removed(self.items.remove(index))
            }
            None => {
                debug!(id, cart = %self.name, "no item with this id in cart");
                RemoveOutcome::NotFound
            }
        }
    }

    /// Clears all items from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
        self.created_at = Utc::now();
    }

    /// Folds every item into one aggregate. All zero for an empty cart.
    pub fn totals(&self) -> CartTotals {
        self.items.iter().fold(CartTotals::default(), |mut acc, item| {
            acc.total_qty += item.qty();
            acc.total_price += item.total();
            acc.total_tax_amt += item.tax_amt();
            acc.total_discount_amt += item.discount_amt();
            acc.total_final_price += item.final_price();
            acc
        })
    }

    /// Sum of every item's final price.
    pub fn grand_total(&self) -> f64 {
        self.items.iter().map(LineItem::final_price).sum()
    }

    /// A snapshot of the current items in cart order.
    ///
    /// The returned `Vec` is owned by the caller; changing it does not touch
    /// the cart.
    pub fn items(&self) -> Vec<LineItem> {
        self.items.clone()
    }

    /// Borrowing iterator over the items in cart order.
    pub fn iter(&self) -> impl Iterator<Item = &LineItem> {
        self.items.iter()
    }

    pub fn get(&self, id: u64) -> Option<&LineItem> {
        self.items.iter().find(|i| i.id() == id)
    }

    /// Returns the number of unique items in the cart.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for Cart {
    fn default() -> Self {
        Cart::new("")
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
