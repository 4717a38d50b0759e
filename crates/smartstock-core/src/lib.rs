//! # smartstock-core: Pure Business Logic for SmartStock POS
//!
//! This crate is the **heart** of SmartStock. It holds the checkout and
//! cash-closure rules as plain data and pure functions with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      SmartStock Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 smartstock-cli / front-end                      │   │
//! │  │    Scanner ──► Cart ──► Payment step ──► Ticket                 │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              smartstock-pos (session workflows)                 │   │
//! │  └──────────────┬──────────────────────────────┬───────────────────┘   │
//! │                 │                              │                        │
//! │  ┌──────────────▼──────────────┐  ┌────────────▼───────────────────┐   │
//! │  │  ★ smartstock-core ★        │  │  smartstock-client (REST)      │   │
//! │  │  money  cart  payment       │  │  products, sales, closures,    │   │
//! │  │  closure  catalog  types    │  │  reports, expenses             │   │
//! │  │  NO I/O • PURE FUNCTIONS    │  └────────────────────────────────┘   │
//! │  └─────────────────────────────┘                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Integer-cent money type and wire decimal normalization
//! - [`types`] - Catalog, sale, closure and report types shared with the backend
//! - [`cart`] - The in-progress sale (stock ceilings, derived totals)
//! - [`payment`] - Payment method selection, change and the confirmation gate
//! - [`closure`] - Daily cash-closure state machine
//! - [`catalog`] - Scanner lookup over the loaded product list
//! - [`validation`] - Form validation before anything is sent
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use smartstock_core::{Cart, Money, PaymentIntent, PaymentMethod, Product};
//!
//! let soda = Product::new(1, "Soda", "7790001", Money::from_cents(1000), 5);
//! let mut cart = Cart::new();
//! cart.add(&soda).unwrap();
//! cart.add(&soda).unwrap();
//! assert_eq!(cart.total().cents(), 2000);
//!
//! let mut payment = PaymentIntent::new();
//! payment.set_tendered("50");
//! let quote = payment.quote(cart.total());
//! assert!(quote.can_confirm);
//! assert_eq!(quote.change.cents(), 3000);
//! assert_eq!(payment.confirm(cart.total()).unwrap(), PaymentMethod::Cash);
//! ```

pub mod cart;
pub mod catalog;
pub mod closure;
pub mod error;
pub mod money;
pub mod payment;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{AddOutcome, Cart, CartLine, CartTotals, QuantityChange};
pub use catalog::Catalog;
pub use closure::{ClosureMachine, ClosureState, ClosureStatus};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use payment::{PaymentIntent, PaymentQuote};
pub use types::*;
