//! # Cart State
//!
//! Shares one cart between callers.
//!
//! ## Thread Safety
//! The cart is wrapped in `Arc<RwLock<T>>` because:
//! 1. `add`, `remove` and `clear` mutate the item list and must not interleave
//! 2. `totals`, `grand_total` and `items` only read and may run side by side
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  with_cart(|c| c.totals())        ──► read lock  (shared)              │
//! │  with_cart_mut(|c| c.add(specs))  ──► write lock (exclusive)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, RwLock};

use basket_core::Cart;

use crate::error::CliError;

/// A cart behind a read/write lock.
#[derive(Debug, Clone)]
pub struct CartState {
    cart: Arc<RwLock<Cart>>,
}

impl CartState {
    /// Creates a new empty cart state.
    pub fn new(name: impl Into<String>) -> Self {
        CartState {
            cart: Arc::new(RwLock::new(Cart::new(name))),
        }
    }

    /// Executes a function with read access to the cart.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let totals = cart_state.with_cart(|cart| cart.totals())?;
    /// ```
    pub fn with_cart<F, R>(&self, f: F) -> Result<R, CliError>
    where
        F: FnOnce(&Cart) -> R,
    {
        let cart = self.cart.read().map_err(|_| CliError::LockPoisoned)?;
        Ok(f(&cart))
    }

    /// Executes a function with write access to the cart.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// cart_state.with_cart_mut(|cart| cart.add(specs))??;
    /// ```
    pub fn with_cart_mut<F, R>(&self, f: F) -> Result<R, CliError>
    where
        F: FnOnce(&mut Cart) -> R,
    {
        let mut cart = self.cart.write().map_err(|_| CliError::LockPoisoned)?;
        Ok(f(&mut cart))
    }
}

impl Default for CartState {
    fn default() -> Self {
        Self::new("default")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use basket_core::LineItemSpec;
    use std::thread;

    #[test]
    fn test_writes_are_visible_to_readers() {
        let state = CartState::new("shared");
        state
            .with_cart_mut(|cart| cart.add_one(LineItemSpec::new(1, "Tea", 3.0, 2, 10.0)))
            .unwrap()
            .unwrap();

        let qty = state.with_cart(|cart| cart.totals().total_qty).unwrap();
        assert_eq!(qty, 2);
    }

    #[test]
    fn test_concurrent_adds_merge() {
        let state = CartState::new("shared");
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let state = state.clone();
                thread::spawn(move || {
                    state
                        .with_cart_mut(|cart| cart.add_one(LineItemSpec::new(1, "Tea", 3.0, 1, 10.0)))
                        .unwrap()
                        .unwrap();
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let (len, qty) = state
            .with_cart(|cart| (cart.len(), cart.totals().total_qty))
            .unwrap();
        assert_eq!(len, 1);
        assert_eq!(qty, 8);
    }
}
