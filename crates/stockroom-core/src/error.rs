//! # Error Types
//!
//! Domain-specific error types for stockroom-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  StoreError                                                            │
//! │  ├── InvalidArgument(ValidationError)  - bad constructor/mutator input │
//! │  ├── InsufficientStock                 - buy exceeds quantity          │
//! │  ├── NotFound(ProductId)               - product id not in the store   │
//! │  ├── OrderFailed { source }            - a line failed mid-order       │
//! │  ├── InvalidConfig / ConfigLoadFailed  - configuration problems        │
//! │  ├── LockPoisoned                      - SharedStore mutex poisoned    │
//! │  └── Serialization                     - receipt export failed         │
//! │                                                                         │
//! │  Flow: ValidationError → StoreError → presentation layer               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every error is detected before the entity it concerns is mutated, with one
//! documented exception: in sequential order mode an `OrderFailed` leaves the
//! lines that ran before the failing one debited.

use thiserror::Error;

use crate::product::ProductId;

// =============================================================================
// Store Error
// =============================================================================

/// Errors raised by products, the store, and order processing.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Malformed input to a constructor or mutator.
    #[error("Invalid argument: {0}")]
    InvalidArgument(#[from] ValidationError),

    /// A purchase asks for more units than are in stock.
    ///
    /// ## User Workflow
    /// ```text
    /// buy(10) on "Widget" (quantity: 3)
    ///      │
    ///      ▼
    /// InsufficientStock { product: "Widget", available: 3, requested: 10 }
    ///      │
    ///      ▼
    /// Quantity stays 3
    /// ```
    #[error("Insufficient stock for {product}: available {available}, requested {requested}")]
    InsufficientStock {
        product: String,
        available: i64,
        requested: i64,
    },

    /// Product id is not held by the store.
    #[error("Product not found: {0}")]
    NotFound(ProductId),

    /// A line of an order failed partway through.
    ///
    /// In sequential mode the lines before the failing one stay debited.
    #[error("Error ordering product {product}: {source}")]
    OrderFailed {
        product: String,
        #[source]
        source: Box<StoreError>,
    },

    /// Configuration values are out of range or unparsable.
    #[error("Invalid store configuration: {0}")]
    InvalidConfig(String),

    /// The configuration file could not be read or decoded.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// A thread panicked while holding the shared store lock.
    #[error("Store lock poisoned")]
    LockPoisoned,

    /// Receipt could not be serialized.
    #[error("Serialization failed: {0}")]
    Serialization(String),
}

impl StoreError {
    /// Wraps a per-line failure for the named product.
    pub fn order_failed(product: impl Into<String>, source: StoreError) -> Self {
        StoreError::OrderFailed {
            product: product.into(),
            source: Box::new(source),
        }
    }

    /// Returns the innermost error, unwrapping any `OrderFailed` layers.
    pub fn root_cause(&self) -> &StoreError {
        match self {
            StoreError::OrderFailed { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// True when the failure comes down to a stock shortage.
    pub fn is_stock_shortage(&self) -> bool {
        matches!(self.root_cause(), StoreError::InsufficientStock { .. })
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Field-level validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be strictly greater than zero.
    #[error("{field} must be greater than 0")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must be a non-negative number")]
    MustBeNonNegative { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// A computed amount does not fit in 64 bits.
    #[error("{field} is too large")]
    Overflow { field: String },

    /// Value already present where it must be unique (e.g. a product id).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for StoreError {
    fn from(err: toml::de::Error) -> Self {
        StoreError::ConfigLoadFailed(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with StoreError.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = StoreError::InsufficientStock {
            product: "Widget".to_string(),
            available: 3,
            requested: 5,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for Widget: available 3, requested 5"
        );
    }

    #[test]
    fn test_order_failed_names_product_and_cause() {
        let cause = StoreError::InsufficientStock {
            product: "Widget".to_string(),
            available: 0,
            requested: 10,
        };
        let err = StoreError::order_failed("Widget", cause);

        let message = err.to_string();
        assert!(message.starts_with("Error ordering product Widget:"));
        assert!(message.contains("available 0, requested 10"));
        assert!(err.is_stock_shortage());
    }

    #[test]
    fn test_root_cause_unwraps_nested_failures() {
        let missing = ProductId::new();
        let err = StoreError::order_failed(
            "Outer",
            StoreError::order_failed("Inner", StoreError::NotFound(missing)),
        );
        assert!(matches!(err.root_cause(), StoreError::NotFound(id) if *id == missing));
        assert!(!err.is_stock_shortage());
    }

    #[test]
    fn test_not_found_carries_product_id() {
        let missing = ProductId::new();
        let err = StoreError::NotFound(missing);
        assert_eq!(err.to_string(), format!("Product not found: {}", missing));
    }

    #[test]
    fn test_validation_converts_to_store_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let store_err: StoreError = validation_err.into();
        assert!(matches!(store_err, StoreError::InvalidArgument(_)));
        assert_eq!(store_err.to_string(), "Invalid argument: name is required");
    }

    #[test]
    fn test_toml_error_becomes_config_load_failure() {
        let err: StoreError = toml::from_str::<toml::Value>("not = [valid")
            .unwrap_err()
            .into();
        assert!(matches!(err, StoreError::ConfigLoadFailed(_)));
    }
}
