//! # Cart Engine
//!
//! The in-progress sale owned by one checkout session.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Cart Operations                                  │
//! │                                                                         │
//! │  Operator Action         Cart Method              Effect                │
//! │  ───────────────         ───────────              ──────                │
//! │                                                                         │
//! │  Scan / click product ──► add(&product) ────────► new line qty 1, or   │
//! │                                                    qty + 1 (refused at  │
//! │                                                    product.stock)       │
//! │                                                                         │
//! │  Type a quantity ───────► update_quantity(id, q) ► qty = clamp(q, 1,    │
//! │                                                    stock_ceiling)       │
//! │                                                                         │
//! │  Click remove ──────────► remove(id) ───────────► line dropped          │
//! │                                                                         │
//! │  Sale registered ───────► clear() ──────────────► empty cart            │
//! │                                                                         │
//! │  NOTE: totals are never stored. total() and total_items() scan the     │
//! │        lines on every read, so they cannot drift from the lines.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - At most one line per `product_id`
//! - `1 ≤ quantity ≤ stock_ceiling` on every line
//! - `subtotal == unit_price × quantity` (derived, never stored)
//!
//! ## Add vs Update
//! Adding past the stock is **refused** (the cart does not change), while
//! typing a quantity is **clamped** into range. The clamp is reported back as a
//! [`QuantityChange`] so the caller can tell the operator what was applied.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Product, SaleLine};

// =============================================================================
// Cart Line
// =============================================================================

/// One product in the cart.
///
/// ## Snapshot Pattern
/// `name`, `barcode`, `unit_price` and `stock_ceiling` are frozen when the
/// product first enters the cart. A catalog refresh does not reprice a line
/// that is already being sold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartLine {
    pub product_id: i64,

    /// Product name at time of adding (frozen).
    pub name: String,

    /// Barcode at time of adding (frozen).
    pub barcode: String,

    /// Price at time of adding (frozen).
    pub unit_price: Money,

    /// Units in the cart.
    pub quantity: i64,

    /// Product stock seen when the line was last added to.
    pub stock_ceiling: i64,
}

impl CartLine {
    fn from_product(product: &Product) -> Self {
        CartLine {
            product_id: product.id,
            name: product.name.clone(),
            barcode: product.barcode.clone(),
            unit_price: product.price,
            quantity: 1,
            stock_ceiling: product.stock,
        }
    }

    /// Line subtotal (unit price × quantity).
    #[inline]
    pub fn subtotal(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }

    /// The request line sent to the backend.
    pub fn to_sale_line(&self) -> SaleLine {
        SaleLine {
            product_id: self.product_id,
            quantity: self.quantity,
            unit_price: self.unit_price,
        }
    }
}

// =============================================================================
// Outcomes
// =============================================================================

/// What a successful [`Cart::add`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// The product was not in the cart; a line with quantity 1 was created.
    Added,
    /// The existing line now holds `quantity` units.
    Incremented { quantity: i64 },
}

/// What [`Cart::update_quantity`] applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct QuantityChange {
    pub product_id: i64,
    pub previous: i64,
    pub requested: i64,
    pub applied: i64,
}

impl QuantityChange {
    /// True when the requested quantity was out of `[1, stock_ceiling]`.
    #[inline]
    pub fn was_clamped(&self) -> bool {
        self.requested != self.applied
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart of one checkout session. Never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,

    /// When the cart was created or last cleared.
    started_at: DateTime<Utc>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart {
            lines: Vec::new(),
            started_at: Utc::now(),
        }
    }

    /// Adds one unit of `product`.
    ///
    /// ## Behavior
    /// - Product with no stock: refused with [`CoreError::NoStock`]
    /// - Product already in cart: quantity + 1, refused with
    ///   [`CoreError::InsufficientStock`] when that exceeds `product.stock`
    /// - Otherwise: new line with quantity 1
    ///
    /// A refusal leaves the cart unchanged.
    pub fn add(&mut self, product: &Product) -> CoreResult<AddOutcome> {
        if !product.in_stock() {
            return Err(CoreError::NoStock {
                product: product.name.clone(),
            });
        }

        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product.id) {
            let requested = line.quantity + 1;
            if requested > product.stock {
                return Err(CoreError::InsufficientStock {
                    product: product.name.clone(),
                    available: product.stock,
                    requested,
                });
            }
            line.quantity = requested;
            line.stock_ceiling = product.stock;
            return Ok(AddOutcome::Incremented {
                quantity: requested,
            });
        }

        self.lines.push(CartLine::from_product(product));
        Ok(AddOutcome::Added)
    }

    /// Removes the line for `product_id`, returning it. Absent ids are a no-op.
    pub fn remove(&mut self, product_id: i64) -> Option<CartLine> {
        let index = self.lines.iter().position(|l| l.product_id == product_id)?;
        Some(self.lines.remove(index))
    }

    /// Sets the quantity of a line, clamped into `[1, stock_ceiling]`.
    ///
    /// Returns `None` when the product is not in the cart.
    ///
    /// ## Example
    /// ```rust
    /// use smartstock_core::{Cart, Money, Product};
    ///
    /// let product = Product::new(1, "Soda", "7790001", Money::from_cents(1000), 3);
    /// let mut cart = Cart::new();
    /// cart.add(&product).unwrap();
    ///
    /// let change = cart.update_quantity(1, 10_000).unwrap();
    /// assert_eq!(change.applied, 3);
    /// assert!(change.was_clamped());
    /// ```
    pub fn update_quantity(&mut self, product_id: i64, quantity: i64) -> Option<QuantityChange> {
        let line = self.lines.iter_mut().find(|l| l.product_id == product_id)?;
        let applied = quantity.min(line.stock_ceiling).max(1);
        let previous = line.quantity;
        line.quantity = applied;

        Some(QuantityChange {
            product_id,
            previous,
            requested: quantity,
            applied,
        })
    }

    /// Empties the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.started_at = Utc::now();
    }

    /// Sum of line subtotals.
    pub fn total(&self) -> Money {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    /// Sum of quantities.
    pub fn total_items(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn line(&self, product_id: i64) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product_id == product_id)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// The `products` array of a sale request, in cart order.
    pub fn to_sale_lines(&self) -> Vec<SaleLine> {
        self.lines.iter().map(CartLine::to_sale_line).collect()
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

/// Cart summary for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartTotals {
    pub line_count: usize,
    pub total_items: i64,
    pub total: Money,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            line_count: cart.lines.len(),
            total_items: cart.total_items(),
            total: cart.total(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
