//! # Product
//!
//! A named, priced, countable stock item.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Product::new(name, price, qty) ──► active = true                      │
//! │        │                                                                │
//! │        ├── buy(q) ──► quantity -= q ──┐                                 │
//! │        │                              ├── quantity == 0 ──► inactive   │
//! │        ├── set_quantity(q) ───────────┘                                 │
//! │        │                                                                │
//! │        └── activate() / deactivate() ──► flag only, quantity untouched │
//! │                                                                         │
//! │  Reaching a positive quantity again never reactivates on its own.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - `0 < price <= MAX_PRICE_CENTS` for the lifetime of the product
//! - `0 <= quantity <= MAX_STOCK_LEVEL` for the lifetime of the product
//! - so `price * quantity` always fits in `i64`
//! - `name` and `price` never change after construction

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::error::{StoreError, StoreResult, ValidationError};
use crate::money::Money;
use crate::validation::{
    validate_price, validate_product_name, validate_purchase_quantity, validate_stock_level,
};

// =============================================================================
// Product Id
// =============================================================================

/// Identity of a product.
///
/// Generated at construction, so two products with identical fields are
/// still distinct. The store matches products by this id only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(Uuid);

impl ProductId {
    /// Generates a fresh random id.
    pub fn new() -> Self {
        ProductId(Uuid::new_v4())
    }

    #[inline]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ProductId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// =============================================================================
// Product
// =============================================================================

/// A stock item held by a [`Store`](crate::Store).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    id: ProductId,
    name: String,
    price: Money,
    quantity: i64,
    active: bool,
}

impl Product {
    /// Creates an active product.
    ///
    /// ## Errors
    /// `InvalidArgument` if the name is blank or too long, or the price or
    /// quantity falls outside its bounds (see [`MAX_PRICE_CENTS`](crate::MAX_PRICE_CENTS)
    /// and [`MAX_STOCK_LEVEL`](crate::MAX_STOCK_LEVEL)).
    ///
    /// ```rust
    /// use stockroom_core::{Money, Product};
    ///
    /// let pixel = Product::new("Google Pixel 7", Money::from_major(500), 500).unwrap();
    /// assert!(pixel.is_active());
    ///
    /// assert!(Product::new("", Money::from_major(500), 1).is_err());
    /// assert!(Product::new("Free", Money::zero(), 1).is_err());
    /// ```
    pub fn new(name: impl Into<String>, price: Money, quantity: i64) -> StoreResult<Self> {
        let name = name.into();
        validate_product_name(&name)?;
        validate_price(price)?;
        validate_stock_level(quantity)?;

        Ok(Product {
            id: ProductId::new(),
            name,
            price,
            quantity,
            active: true,
        })
    }

    #[inline]
    pub fn id(&self) -> ProductId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unit price.
    #[inline]
    pub fn price(&self) -> Money {
        self.price
    }

    /// Current stock level.
    #[inline]
    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Replaces the stock level.
    ///
    /// Setting the quantity to zero deactivates the product. A positive
    /// quantity leaves the flag alone, so a sold-out product stays inactive
    /// until [`activate`](Self::activate) is called.
    pub fn set_quantity(&mut self, quantity: i64) -> StoreResult<()> {
        validate_stock_level(quantity)?;

        self.quantity = quantity;
        if quantity == 0 {
            self.deactivate();
        }
        Ok(())
    }

    pub fn activate(&mut self) {
        self.active = true;
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Buys `quantity` units and returns the charge (`price * quantity`).
    ///
    /// Does not look at the active flag.
    ///
    /// ## Errors
    /// - `InvalidArgument` if `quantity <= 0`
    /// - `InsufficientStock` if `quantity` exceeds the stock level
    /// - `InvalidArgument` if the charge does not fit in `i64`
    ///
    /// All are detected before the stock level changes.
    ///
    /// ```rust
    /// use stockroom_core::{Money, Product};
    ///
    /// let mut widget = Product::new("Widget", Money::from_major(10), 5).unwrap();
    /// assert_eq!(widget.buy(5).unwrap(), Money::from_major(50));
    /// assert_eq!(widget.quantity(), 0);
    /// assert!(!widget.is_active());
    /// ```
    pub fn buy(&mut self, quantity: i64) -> StoreResult<Money> {
        validate_purchase_quantity(quantity)?;

        if quantity > self.quantity {
            return Err(StoreError::InsufficientStock {
                product: self.name.clone(),
                available: self.quantity,
                requested: quantity,
            });
        }

        let charge = self
            .price
            .checked_multiply_quantity(quantity)
            .ok_or_else(|| ValidationError::Overflow {
                field: "charge".to_string(),
            })?;

        self.set_quantity(self.quantity - quantity)?;
        Ok(charge)
    }

    /// Value of the units on hand (`price * quantity`).
    ///
    /// Cannot overflow: price and quantity bounds cap it at 10^18 cents.
    pub fn value(&self) -> Money {
        self.price.multiply_quantity(self.quantity)
    }

    /// One-line summary for listings.
    pub fn describe(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, Price: {}, Quantity: {} (Active: {})",
            self.name, self.price, self.quantity, self.active
        )
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MAX_PRICE_CENTS, MAX_STOCK_LEVEL};
    use proptest::prelude::*;

    fn widget(quantity: i64) -> Product {
        Product::new("Widget", Money::from_major(10), quantity).unwrap()
    }

    #[test]
    fn test_new_product_is_active() {
        let product = Product::new("MacBook Air M2", Money::from_major(1450), 100).unwrap();
        assert!(product.is_active());
        assert_eq!(product.name(), "MacBook Air M2");
        assert_eq!(product.price(), Money::from_major(1450));
        assert_eq!(product.quantity(), 100);
    }

    #[test]
    fn test_sold_out_product_can_be_constructed() {
        let product = widget(0);
        assert_eq!(product.quantity(), 0);
        assert!(product.is_active());
    }

    #[test]
    fn test_new_rejects_invalid_fields() {
        assert!(matches!(
            Product::new("", Money::from_major(10), 1),
            Err(StoreError::InvalidArgument(ValidationError::Required { .. }))
        ));
        assert!(matches!(
            Product::new("  ", Money::from_major(10), 1),
            Err(StoreError::InvalidArgument(_))
        ));
        assert!(matches!(
            Product::new("Widget", Money::zero(), 1),
            Err(StoreError::InvalidArgument(ValidationError::MustBePositive { .. }))
        ));
        assert!(matches!(
            Product::new("Widget", Money::from_cents(-1), 1),
            Err(StoreError::InvalidArgument(_))
        ));
        assert!(matches!(
            Product::new("Widget", Money::from_major(10), -1),
            Err(StoreError::InvalidArgument(ValidationError::MustBeNonNegative { .. }))
        ));
    }

    #[test]
    fn test_new_rejects_amounts_that_could_overflow() {
        assert!(matches!(
            Product::new("Big", Money::from_cents(i64::MAX / 2), 10),
            Err(StoreError::InvalidArgument(ValidationError::OutOfRange { .. }))
        ));
        assert!(matches!(
            Product::new("Widget", Money::from_major(10), i64::MAX),
            Err(StoreError::InvalidArgument(ValidationError::OutOfRange { .. }))
        ));
        assert!(Product::new("Widget", Money::from_cents(MAX_PRICE_CENTS + 1), 1).is_err());
        assert!(Product::new("Widget", Money::from_major(10), MAX_STOCK_LEVEL + 1).is_err());
    }

    #[test]
    fn test_buy_at_upper_bounds_charges_exactly() {
        let mut product =
            Product::new("Big", Money::from_cents(MAX_PRICE_CENTS), MAX_STOCK_LEVEL).unwrap();
        assert_eq!(product.value(), Money::from_cents(1_000_000_000_000_000_000));

        let charge = product.buy(MAX_STOCK_LEVEL).unwrap();

        assert_eq!(charge, Money::from_cents(1_000_000_000_000_000_000));
        assert_eq!(product.quantity(), 0);
        assert!(!product.is_active());
    }

    #[test]
    fn test_buy_with_huge_quantity_is_a_shortage_not_a_panic() {
        let mut product = Product::new("Big", Money::from_cents(MAX_PRICE_CENTS), 10).unwrap();
        assert!(matches!(
            product.buy(i64::MAX),
            Err(StoreError::InsufficientStock {
                available: 10,
                requested: i64::MAX,
                ..
            })
        ));
        assert_eq!(product.quantity(), 10);
    }

    #[test]
    fn test_set_quantity_rejects_above_stock_limit() {
        let mut product = widget(5);
        assert!(matches!(
            product.set_quantity(MAX_STOCK_LEVEL + 1),
            Err(StoreError::InvalidArgument(ValidationError::OutOfRange { .. }))
        ));
        assert_eq!(product.quantity(), 5);
        product.set_quantity(MAX_STOCK_LEVEL).unwrap();
        assert_eq!(product.quantity(), MAX_STOCK_LEVEL);
    }

    #[test]
    fn test_identical_fields_get_distinct_ids() {
        assert_ne!(widget(5).id(), widget(5).id());
    }

    #[test]
    fn test_set_quantity_zero_deactivates_without_reactivating() {
        let mut product = widget(5);

        product.set_quantity(0).unwrap();
        assert!(!product.is_active());

        product.set_quantity(5).unwrap();
        assert_eq!(product.quantity(), 5);
        assert!(!product.is_active());

        product.activate();
        assert!(product.is_active());
    }

    #[test]
    fn test_set_quantity_rejects_negative() {
        let mut product = widget(5);
        assert!(matches!(
            product.set_quantity(-1),
            Err(StoreError::InvalidArgument(_))
        ));
        assert_eq!(product.quantity(), 5);
        assert!(product.is_active());
    }

    #[test]
    fn test_activate_and_deactivate_leave_quantity_alone() {
        let mut product = widget(5);
        product.deactivate();
        assert!(!product.is_active());
        assert_eq!(product.quantity(), 5);
        product.activate();
        assert!(product.is_active());
        assert_eq!(product.quantity(), 5);
    }

    #[test]
    fn test_buy_more_than_stock_leaves_quantity_unchanged() {
        let mut product = widget(5);
        let err = product.buy(6).unwrap_err();
        assert!(matches!(
            err,
            StoreError::InsufficientStock {
                available: 5,
                requested: 6,
                ..
            }
        ));
        assert_eq!(product.quantity(), 5);
        assert!(product.is_active());
    }

    #[test]
    fn test_buy_rejects_non_positive_quantity() {
        let mut product = widget(5);
        assert!(matches!(product.buy(0), Err(StoreError::InvalidArgument(_))));
        assert!(matches!(product.buy(-2), Err(StoreError::InvalidArgument(_))));
        assert_eq!(product.quantity(), 5);
    }

    #[test]
    fn test_buy_debits_and_charges() {
        let mut product = widget(5);
        assert_eq!(product.buy(3).unwrap(), Money::from_major(30));
        assert_eq!(product.quantity(), 2);
        assert!(product.is_active());

        assert_eq!(product.buy(2).unwrap(), Money::from_major(20));
        assert_eq!(product.quantity(), 0);
        assert!(!product.is_active());
    }

    #[test]
    fn test_buy_ignores_active_flag() {
        let mut product = widget(5);
        product.deactivate();
        assert_eq!(product.buy(1).unwrap(), Money::from_major(10));
        assert_eq!(product.quantity(), 4);
    }

    #[test]
    fn test_describe() {
        let product = Product::new("Bose QuietComfort Earbuds", Money::from_major(250), 500)
            .unwrap();
        assert_eq!(
            product.describe(),
            "Bose QuietComfort Earbuds, Price: 250.00, Quantity: 500 (Active: true)"
        );
    }

    #[test]
    fn test_value() {
        assert_eq!(widget(5).value(), Money::from_major(50));
        assert_eq!(widget(0).value(), Money::zero());
    }

    proptest! {
        /// Successful buys that stay below the initial stock leave exactly
        /// `initial - sum` and charge `price * sum` in total.
        #[test]
        fn buys_debit_and_charge_exactly(
            initial in 1i64..10_000,
            price_cents in 1i64..100_000,
            buys in proptest::collection::vec(1i64..50, 0..20),
        ) {
            let mut product = Product::new("Widget", Money::from_cents(price_cents), initial)
                .unwrap();

            let mut bought = 0;
            let mut charged = Money::zero();
            for q in buys {
                if bought + q >= initial {
                    break;
                }
                charged += product.buy(q).unwrap();
                bought += q;
            }

            prop_assert_eq!(product.quantity(), initial - bought);
            prop_assert_eq!(charged, Money::from_cents(price_cents).multiply_quantity(bought));
            prop_assert!(product.is_active());
        }
    }
}
