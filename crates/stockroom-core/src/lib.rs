//! # stockroom-core: Inventory and Ordering Model
//!
//! Products with validated stock levels, a store that lists them, and
//! multi-line orders that debit stock and return a total.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │        Presentation layer (console, HTTP handler, ...)          │   │
//! │  │        lists products, collects order lines, shows totals       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ stockroom-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  product  │  │   store   │  │   order   │  │   money   │  │   │
//! │  │   │  Product  │  │   Store   │  │ OrderLine │  │   Money   │  │   │
//! │  │   │ ProductId │  │SharedStore│  │  Receipt  │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   config • error • validation                                   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`product`] - `Product` and its identity
//! - [`store`] - `Store`, the product collection and order processing
//! - [`order`] - order lines, plans, and receipts
//! - [`shared`] - `SharedStore` for concurrent callers
//! - [`money`] - integer money
//! - [`config`] - order mode and limits
//! - [`error`] - `StoreError` / `ValidationError`
//! - [`validation`] - field rules
//!
//! ## Example Usage
//!
//! ```rust
//! use stockroom_core::{Money, OrderLine, Product, Store, StoreError};
//!
//! let widget = Product::new("Widget", Money::from_major(10), 5).unwrap();
//! let id = widget.id();
//! let mut store = Store::new(vec![widget]).unwrap();
//!
//! // Second line fails; the first one stays debited.
//! let err = store
//!     .order(&[OrderLine::new(id, 2), OrderLine::new(id, 10)])
//!     .unwrap_err();
//! assert!(matches!(err, StoreError::OrderFailed { .. }));
//! assert_eq!(store.product(id).unwrap().quantity(), 3);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod money;
pub mod order;
pub mod product;
pub mod shared;
pub mod store;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use config::{OrderMode, OrderSettings, StoreConfig};
pub use error::{StoreError, StoreResult, ValidationError};
pub use money::Money;
pub use order::{OrderLine, OrderPlan, PlannedProduct, Receipt, ReceiptLine};
pub use product::{Product, ProductId};
pub use shared::SharedStore;
pub use store::Store;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default maximum number of lines in one order.
pub const DEFAULT_MAX_ORDER_LINES: usize = 100;

/// Maximum length of a product name, in characters.
pub const MAX_NAME_LENGTH: usize = 200;

/// Maximum stock level of a single product.
///
/// ## Business Reason
/// Together with [`MAX_PRICE_CENTS`] this keeps `price * quantity` for any
/// one product at or below 10^18 cents, inside `i64`.
pub const MAX_STOCK_LEVEL: i64 = 1_000_000_000;

/// Maximum unit price, in cents (10,000,000.00).
pub const MAX_PRICE_CENTS: i64 = 1_000_000_000;
