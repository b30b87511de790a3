//! # Validation Module
//!
//! Field-level checks shared by [`Product`](crate::Product) and
//! [`Store`](crate::Store).
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Where Each Check Runs                              │
//! │                                                                         │
//! │  Product::new ─────────► name, price, stock level                      │
//! │  Store::new / add ─────► product id not already held                   │
//! │  Product::set_quantity ► stock level                                   │
//! │  Product::buy ─────────► purchase quantity (then stock sufficiency)    │
//! │  Store::plan ──────────► order size, every line's purchase quantity    │
//! │                                                                         │
//! │  All checks run before any mutation.                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use stockroom_core::validation::{validate_product_name, validate_purchase_quantity};
//!
//! assert!(validate_product_name("Google Pixel 7").is_ok());
//! assert!(validate_purchase_quantity(0).is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::{MAX_NAME_LENGTH, MAX_PRICE_CENTS, MAX_STOCK_LEVEL};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty or whitespace only
/// - At most [`MAX_NAME_LENGTH`] characters
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LENGTH,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a unit price.
///
/// ## Rules
/// - Must be positive (free items are not allowed)
/// - Must not exceed [`MAX_PRICE_CENTS`]
///
/// ```rust
/// use stockroom_core::money::Money;
/// use stockroom_core::validation::validate_price;
///
/// assert!(validate_price(Money::from_cents(1)).is_ok());
/// assert!(validate_price(Money::zero()).is_err());
/// ```
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if !price.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }

    if price.cents() > MAX_PRICE_CENTS {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 1,
            max: MAX_PRICE_CENTS,
        });
    }

    Ok(())
}

/// Validates a stock level.
///
/// ## Rules
/// - Zero is allowed (sold out)
/// - Must not exceed [`MAX_STOCK_LEVEL`]
pub fn validate_stock_level(quantity: i64) -> ValidationResult<()> {
    if quantity < 0 {
        return Err(ValidationError::MustBeNonNegative {
            field: "quantity".to_string(),
        });
    }

    if quantity > MAX_STOCK_LEVEL {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 0,
            max: MAX_STOCK_LEVEL,
        });
    }

    Ok(())
}

/// Validates the quantity of a single purchase or order line.
///
/// No upper bound: asking for more than is in stock is a stock shortage,
/// reported by the purchase itself.
pub fn validate_purchase_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity to buy".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Validates the number of lines in an order.
///
/// An empty order is valid and costs nothing.
pub fn validate_order_size(lines: usize, max_lines: usize) -> ValidationResult<()> {
    if lines > max_lines {
        return Err(ValidationError::OutOfRange {
            field: "order lines".to_string(),
            min: 0,
            max: max_lines as i64,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("MacBook Air M2").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name("   ").is_err());
        assert!(validate_product_name(&"A".repeat(MAX_NAME_LENGTH)).is_ok());
        assert!(validate_product_name(&"A".repeat(MAX_NAME_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(Money::from_major(1450)).is_ok());
        assert!(validate_price(Money::zero()).is_err());
        assert!(validate_price(Money::from_cents(-100)).is_err());
        assert!(validate_price(Money::from_cents(MAX_PRICE_CENTS)).is_ok());
        assert!(matches!(
            validate_price(Money::from_cents(MAX_PRICE_CENTS + 1)),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert!(validate_price(Money::from_cents(i64::MAX / 2)).is_err());
    }

    #[test]
    fn test_validate_stock_level() {
        assert!(validate_stock_level(0).is_ok());
        assert!(validate_stock_level(500).is_ok());
        assert!(validate_stock_level(MAX_STOCK_LEVEL).is_ok());
        assert!(validate_stock_level(MAX_STOCK_LEVEL + 1).is_err());
        assert!(validate_stock_level(i64::MAX).is_err());
        assert_eq!(
            validate_stock_level(-1),
            Err(ValidationError::MustBeNonNegative {
                field: "quantity".to_string()
            })
        );
    }

    #[test]
    fn test_validate_purchase_quantity() {
        assert!(validate_purchase_quantity(1).is_ok());
        assert!(validate_purchase_quantity(0).is_err());
        assert!(validate_purchase_quantity(-3).is_err());
        assert!(validate_purchase_quantity(i64::MAX).is_ok());
    }

    #[test]
    fn test_validate_order_size() {
        assert!(validate_order_size(1, 100).is_ok());
        assert!(validate_order_size(100, 100).is_ok());
        assert!(validate_order_size(0, 100).is_ok());
        assert!(validate_order_size(101, 100).is_err());
    }
}
