//! # Store
//!
//! An ordered product collection plus order processing.
//!
//! ## Order Processing
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Store::order(lines)                                  │
//! │                                                                         │
//! │  1. plan(lines)                                                        │
//! │     ├── too many lines?        → InvalidArgument   (nothing debited)   │
//! │     ├── quantity <= 0?         → InvalidArgument   (nothing debited)   │
//! │     ├── unknown product id?    → NotFound          (nothing debited)   │
//! │     └── total could overflow?  → InvalidArgument   (nothing debited)   │
//! │                                                                         │
//! │  2. Atomic mode only: any product short on aggregated demand?          │
//! │     └── yes                    → OrderFailed       (nothing debited)   │
//! │                                                                         │
//! │  3. For each line, in order: product.buy(quantity)                     │
//! │     └── fails on line k        → OrderFailed                           │
//! │                                  lines 1..k-1 STAY DEBITED             │
//! │                                                                         │
//! │  4. Return the sum of the line charges                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Step 3 never rolls back. In sequential mode (the default) a later line can
//! fail after earlier lines were debited; callers that need all-or-nothing
//! behavior select [`OrderMode::Atomic`].

use tracing::{debug, warn};

use crate::config::{OrderMode, StoreConfig};
use crate::error::{StoreError, StoreResult, ValidationError};
use crate::money::Money;
use crate::order::{OrderLine, OrderPlan, Receipt, ReceiptLine};
use crate::product::{Product, ProductId};
use crate::validation::{validate_order_size, validate_purchase_quantity};

/// A store holding products in insertion order.
///
/// ```rust
/// use stockroom_core::{Money, OrderLine, Product, Store};
///
/// let widget = Product::new("Widget", Money::from_major(10), 5).unwrap();
/// let widget_id = widget.id();
/// let mut store = Store::new(vec![widget]).unwrap();
///
/// let total = store.order(&[OrderLine::new(widget_id, 3)]).unwrap();
/// assert_eq!(total, Money::from_major(30));
/// assert_eq!(store.total_quantity(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Store {
    products: Vec<Product>,
    config: StoreConfig,
}

impl Store {
    /// Creates a store with the default configuration.
    ///
    /// ## Errors
    /// `InvalidArgument` if two products share an id (e.g. a product and its
    /// clone).
    pub fn new(products: Vec<Product>) -> StoreResult<Self> {
        Self::with_config(products, StoreConfig::default())
    }

    pub fn with_config(products: Vec<Product>, config: StoreConfig) -> StoreResult<Self> {
        let mut store = Store {
            products: Vec::with_capacity(products.len()),
            config,
        };
        for product in products {
            store.ensure_unique(product.id())?;
            store.products.push(product);
        }
        Ok(store)
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// Appends a product and returns its id.
    ///
    /// ## Errors
    /// `InvalidArgument` if the store already holds a product with this id;
    /// the collection is unchanged.
    pub fn add_product(&mut self, product: Product) -> StoreResult<ProductId> {
        let id = product.id();
        self.ensure_unique(id)?;

        debug!(product_id = %id, name = product.name(), "Adding product");
        self.products.push(product);
        Ok(id)
    }

    /// Removes a product by id and hands it back.
    ///
    /// ## Errors
    /// `NotFound` if the store does not hold `id`; the collection is unchanged.
    pub fn remove_product(&mut self, id: ProductId) -> StoreResult<Product> {
        let index = self
            .products
            .iter()
            .position(|p| p.id() == id)
            .ok_or(StoreError::NotFound(id))?;

        let product = self.products.remove(index);
        debug!(product_id = %id, name = product.name(), "Removed product");
        Ok(product)
    }

    /// All products, active or not, in insertion order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id() == id)
    }

    /// Mutable access for stock adjustments and activation.
    pub fn product_mut(&mut self, id: ProductId) -> Option<&mut Product> {
        self.products.iter_mut().find(|p| p.id() == id)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    // =========================================================================
    // Aggregates
    // =========================================================================

    /// Sum of every product's quantity, inactive products included.
    ///
    /// Each quantity is at most [`MAX_STOCK_LEVEL`](crate::MAX_STOCK_LEVEL),
    /// so the sum fits in `i64` for any store that fits in memory.
    pub fn total_quantity(&self) -> i64 {
        self.products.iter().map(Product::quantity).sum()
    }

    /// Active products, in insertion order.
    pub fn active_products(&self) -> Vec<&Product> {
        self.products.iter().filter(|p| p.is_active()).collect()
    }

    /// Value of all stock on hand.
    ///
    /// ## Errors
    /// `InvalidArgument` if the total does not fit in `i64`.
    pub fn total_value(&self) -> StoreResult<Money> {
        let total = self
            .products
            .iter()
            .try_fold(Money::zero(), |total, product| total.checked_add(product.value()))
            .ok_or_else(|| ValidationError::Overflow {
                field: "total value".to_string(),
            })?;
        Ok(total)
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// Validates an order and aggregates it per product without debiting.
    ///
    /// ## Errors
    /// - `InvalidArgument` if the order exceeds the configured line limit or a
    ///   line quantity is not positive
    /// - `NotFound` if a line names a product this store does not hold
    /// - `InvalidArgument` if the aggregated demand or the largest possible
    ///   total does not fit in `i64`
    pub fn plan(&self, lines: &[OrderLine]) -> StoreResult<OrderPlan> {
        validate_order_size(lines.len(), self.config.order.max_lines)?;

        let mut plan = OrderPlan::new();
        for line in lines {
            validate_purchase_quantity(line.quantity)?;
            let product = self.find(line.product_id)?;
            plan.add(product, line.quantity)?;
        }
        plan.max_charge()?;
        Ok(plan)
    }

    /// Places an order and returns the total charge.
    ///
    /// See the module docs for the exact failure semantics.
    pub fn order(&mut self, lines: &[OrderLine]) -> StoreResult<Money> {
        self.place_order(lines).map(|receipt| receipt.total)
    }

    /// Places an order and returns a receipt with one line per order line.
    pub fn place_order(&mut self, lines: &[OrderLine]) -> StoreResult<Receipt> {
        let plan = self.plan(lines)?;
        let mode = self.config.order.mode;
        debug!(lines = lines.len(), %mode, "Processing order");

        if mode == OrderMode::Atomic {
            if let Some(short) = plan.shortfalls().next() {
                warn!(
                    product = %short.name,
                    available = short.available,
                    requested = short.requested,
                    "Order rejected before debiting"
                );
                return Err(StoreError::order_failed(
                    short.name.clone(),
                    StoreError::InsufficientStock {
                        product: short.name.clone(),
                        available: short.available,
                        requested: short.requested,
                    },
                ));
            }
        }

        let mut receipt_lines = Vec::with_capacity(lines.len());
        for (index, line) in lines.iter().enumerate() {
            let product = self.find_mut(line.product_id)?;

            match product.buy(line.quantity) {
                Ok(subtotal) => {
                    debug!(
                        product = product.name(),
                        quantity = line.quantity,
                        remaining = product.quantity(),
                        "Debited order line"
                    );
                    receipt_lines.push(ReceiptLine {
                        product_id: product.id(),
                        name: product.name().to_string(),
                        unit_price: product.price(),
                        quantity: line.quantity,
                        subtotal,
                    });
                }
                Err(err) => {
                    warn!(
                        product = product.name(),
                        line = index + 1,
                        already_debited = index,
                        error = %err,
                        "Order failed partway"
                    );
                    return Err(StoreError::order_failed(product.name(), err));
                }
            }
        }

        Ok(Receipt::new(receipt_lines)?)
    }

    fn find(&self, id: ProductId) -> StoreResult<&Product> {
        self.product(id).ok_or(StoreError::NotFound(id))
    }

    fn find_mut(&mut self, id: ProductId) -> StoreResult<&mut Product> {
        self.product_mut(id).ok_or(StoreError::NotFound(id))
    }

    fn ensure_unique(&self, id: ProductId) -> StoreResult<()> {
        if self.product(id).is_some() {
            return Err(ValidationError::Duplicate {
                field: "product id".to_string(),
                value: id.to_string(),
            }
            .into());
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
