//! # Shared Store
//!
//! Thread-safe handle around a [`Store`].
//!
//! ## Thread Safety
//! The store is wrapped in `Arc<Mutex<T>>` because:
//! 1. Several callers (request handlers, worker threads) may place orders
//! 2. An order is a multi-step debit and must not interleave with another
//! 3. Clones of the handle must see the same stock
//!
//! Each call holds the lock for its whole duration. That serializes orders
//! but does not make them atomic: in sequential mode a failed order still
//! leaves its earlier lines debited.

use std::sync::{Arc, Mutex};

use crate::error::{StoreError, StoreResult};
use crate::money::Money;
use crate::order::{OrderLine, Receipt};
use crate::product::Product;
use crate::store::Store;

/// Cloneable, lock-protected store.
#[derive(Debug, Clone)]
pub struct SharedStore {
    store: Arc<Mutex<Store>>,
}

impl SharedStore {
    pub fn new(store: Store) -> Self {
        SharedStore {
            store: Arc::new(Mutex::new(store)),
        }
    }

    /// Executes a function with read access to the store.
    ///
    /// ## Usage
    /// ```rust
    /// use stockroom_core::{SharedStore, Store};
    ///
    /// let shared = SharedStore::new(Store::default());
    /// let count = shared.with_store(|store| store.len()).unwrap();
    /// assert_eq!(count, 0);
    /// ```
    pub fn with_store<F, R>(&self, f: F) -> StoreResult<R>
    where
        F: FnOnce(&Store) -> R,
    {
        let store = self.store.lock().map_err(|_| StoreError::LockPoisoned)?;
        Ok(f(&store))
    }

    /// Executes a function with write access to the store.
    pub fn with_store_mut<F, R>(&self, f: F) -> StoreResult<R>
    where
        F: FnOnce(&mut Store) -> R,
    {
        let mut store = self.store.lock().map_err(|_| StoreError::LockPoisoned)?;
        Ok(f(&mut store))
    }

    pub fn order(&self, lines: &[OrderLine]) -> StoreResult<Money> {
        self.with_store_mut(|store| store.order(lines))?
    }

    pub fn place_order(&self, lines: &[OrderLine]) -> StoreResult<Receipt> {
        self.with_store_mut(|store| store.place_order(lines))?
    }

    pub fn total_quantity(&self) -> StoreResult<i64> {
        self.with_store(Store::total_quantity)
    }

    /// Copies of all products as they are right now.
    pub fn snapshot(&self) -> StoreResult<Vec<Product>> {
        self.with_store(|store| store.products().to_vec())
    }
}

impl From<Store> for SharedStore {
    fn from(store: Store) -> Self {
        SharedStore::new(store)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_clones_share_stock() {
        let widget = Product::new("Widget", Money::from_major(10), 5).unwrap();
        let id = widget.id();
        let shared = SharedStore::new(Store::new(vec![widget]).unwrap());
        let other = shared.clone();

        assert_eq!(other.order(&[OrderLine::new(id, 3)]).unwrap(), Money::from_major(30));
        assert_eq!(shared.total_quantity().unwrap(), 2);
    }

    #[test]
    fn test_concurrent_orders_never_oversell() {
        let widget = Product::new("Widget", Money::from_major(1), 100).unwrap();
        let id = widget.id();
        let shared = SharedStore::new(Store::new(vec![widget]).unwrap());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let shared = shared.clone();
                thread::spawn(move || {
                    let mut sold = 0;
                    for _ in 0..20 {
                        if shared.order(&[OrderLine::new(id, 1)]).is_ok() {
                            sold += 1;
                        }
                    }
                    sold
                })
            })
            .collect();

        let sold: i64 = handles.into_iter().map(|h| h.join().unwrap()).sum();

        assert_eq!(sold, 100);
        let snapshot = shared.snapshot().unwrap();
        assert_eq!(snapshot[0].quantity(), 0);
        assert!(!snapshot[0].is_active());
    }

    #[test]
    fn test_poisoned_lock_is_reported() {
        let shared = SharedStore::new(Store::default());
        let poisoner = shared.clone();

        let _ = thread::spawn(move || {
            poisoner
                .with_store_mut(|_| panic!("poison the lock"))
                .unwrap();
        })
        .join();

        assert!(matches!(
            shared.total_quantity(),
            Err(StoreError::LockPoisoned)
        ));
    }
}
