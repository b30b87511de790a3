//! # Order Types
//!
//! Request and result types for [`Store::order`](crate::Store::order).
//!
//! ## Order Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  [OrderLine, OrderLine, ...]                                           │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  Store::plan ──► OrderPlan  (per product: requested vs. available)     │
//! │        │          max_charge must fit in i64                            │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  Store::place_order ──► Receipt  (one ReceiptLine per OrderLine)       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{StoreResult, ValidationError};
use crate::money::Money;
use crate::product::{Product, ProductId};
use crate::validation::ValidationResult;

// =============================================================================
// Order Line
// =============================================================================

/// One requested (product, quantity) pair.
///
/// Lines are not merged: the same product may appear in several lines of an
/// order and each is processed on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub quantity: i64,
}

impl OrderLine {
    pub fn new(product_id: ProductId, quantity: i64) -> Self {
        OrderLine {
            product_id,
            quantity,
        }
    }
}

impl From<(ProductId, i64)> for OrderLine {
    fn from((product_id, quantity): (ProductId, i64)) -> Self {
        OrderLine::new(product_id, quantity)
    }
}

// =============================================================================
// Order Plan
// =============================================================================

/// Aggregated demand for one product within an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedProduct {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Money,
    /// Sum of the quantities of every line naming this product.
    pub requested: i64,
    /// Stock on hand when the plan was made.
    pub available: i64,
}

impl PlannedProduct {
    /// Stock left after the order, negative when it cannot be met.
    pub fn remaining(&self) -> i64 {
        self.available - self.requested
    }

    pub fn is_satisfiable(&self) -> bool {
        self.requested <= self.available
    }

    /// Most this product can add to the order total: stock can never be
    /// debited past `available`, whatever the mode.
    pub fn max_charge(&self) -> Option<Money> {
        self.unit_price
            .checked_multiply_quantity(self.requested.min(self.available))
    }
}

/// Per-product view of an order, computed without touching stock.
///
/// Products appear in the order of their first line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OrderPlan {
    products: Vec<PlannedProduct>,
}

impl OrderPlan {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Adds `quantity` to the demand for a product, registering it on first use.
    ///
    /// ## Errors
    /// `Overflow` if the aggregated demand no longer fits in `i64`.
    pub(crate) fn add(&mut self, product: &Product, quantity: i64) -> ValidationResult<()> {
        match self.products.iter_mut().find(|p| p.product_id == product.id()) {
            Some(planned) => {
                planned.requested = planned.requested.checked_add(quantity).ok_or_else(|| {
                    ValidationError::Overflow {
                        field: "requested quantity".to_string(),
                    }
                })?;
            }
            None => self.products.push(PlannedProduct {
                product_id: product.id(),
                name: product.name().to_string(),
                unit_price: product.price(),
                requested: quantity,
                available: product.quantity(),
            }),
        }
        Ok(())
    }

    pub fn products(&self) -> &[PlannedProduct] {
        &self.products
    }

    pub fn get(&self, product_id: ProductId) -> Option<&PlannedProduct> {
        self.products.iter().find(|p| p.product_id == product_id)
    }

    /// Stock that would remain for `product_id`, or `None` if the order does
    /// not mention it.
    pub fn remaining(&self, product_id: ProductId) -> Option<i64> {
        self.get(product_id).map(PlannedProduct::remaining)
    }

    /// Products whose demand exceeds their stock.
    pub fn shortfalls(&self) -> impl Iterator<Item = &PlannedProduct> {
        self.products.iter().filter(|p| !p.is_satisfiable())
    }

    pub fn is_satisfiable(&self) -> bool {
        self.shortfalls().next().is_none()
    }

    /// Upper bound on the order total.
    ///
    /// Every receipt this plan can produce, in either mode, totals at most
    /// this amount.
    ///
    /// ## Errors
    /// `Overflow` if the bound does not fit in `i64`.
    pub fn max_charge(&self) -> ValidationResult<Money> {
        self.products.iter().try_fold(Money::zero(), |total, planned| {
            planned
                .max_charge()
                .and_then(|charge| total.checked_add(charge))
                .ok_or_else(|| ValidationError::Overflow {
                    field: "order total".to_string(),
                })
        })
    }

    /// True when every planned product would be sold out afterwards.
    pub fn exhausts_stock(&self) -> bool {
        !self.products.is_empty() && self.products.iter().all(|p| p.remaining() <= 0)
    }
}

// =============================================================================
// Receipt
// =============================================================================

/// A debited order line, with product data frozen at the time of sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptLine {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Money,
    pub quantity: i64,
    pub subtotal: Money,
}

/// Result of a successful order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub order_id: Uuid,
    pub placed_at: DateTime<Utc>,
    pub lines: Vec<ReceiptLine>,
    pub total: Money,
}

impl Receipt {
    pub(crate) fn new(lines: Vec<ReceiptLine>) -> ValidationResult<Self> {
        let total = lines
            .iter()
            .try_fold(Money::zero(), |total, line| total.checked_add(line.subtotal))
            .ok_or_else(|| ValidationError::Overflow {
                field: "order total".to_string(),
            })?;

        Ok(Receipt {
            order_id: Uuid::new_v4(),
            placed_at: Utc::now(),
            lines,
            total,
        })
    }

    /// Total number of units across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    /// JSON view for presentation layers.
    pub fn to_json(&self) -> StoreResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
