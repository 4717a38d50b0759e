//! # Error Types
//!
//! Domain-specific error types for smartstock-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  smartstock-core errors (this file)                                    │
//! │  ├── CoreError        - Business rule refusals (stock, tender, closure) │
//! │  └── ValidationError  - Form input failures                            │
//! │                                                                         │
//! │  smartstock-client errors (separate crate)                             │
//! │  └── ClientError      - Transport and HTTP failures                    │
//! │                                                                         │
//! │  smartstock-pos errors                                                 │
//! │  └── PosError         - What a workflow caller sees                    │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError ─┐                                  │
//! │                        ClientError ─┴─► PosError → operator message    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every refusal here is non-fatal: the operation is a no-op and the caller
//! shows the message inline.

use thiserror::Error;

use crate::closure::ClosureStatus;
use crate::money::Money;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Nothing in the catalog matches a scanned code or typed name.
    #[error("Product not found: \"{0}\"")]
    ProductNotFound(String),

    /// The product has no stock at all and cannot enter the cart.
    #[error("{product} is out of stock")]
    NoStock { product: String },

    /// Adding one more unit would exceed the product's stock.
    ///
    /// ## User Workflow
    /// ```text
    /// Scan "Soda" (stock 3, already 3 in cart)
    ///      │
    ///      ▼
    /// InsufficientStock { product: "Soda", available: 3, requested: 4 }
    ///      │
    ///      ▼
    /// Cart unchanged, message shown next to the scanner
    /// ```
    #[error("Insufficient stock for {product}: available {available}, requested {requested}")]
    InsufficientStock {
        product: String,
        available: i64,
        requested: i64,
    },

    /// Checkout was attempted with nothing in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// Cash handed over does not cover the sale total.
    #[error("Insufficient amount tendered: short by {short_by}")]
    InsufficientTender { short_by: Money },

    /// The cash-closure workflow is not in a state that allows closing.
    #[error("Cannot close the day while {status:?}: {reason}")]
    ClosureNotAllowed {
        status: ClosureStatus,
        reason: String,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors raised before a request is built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g. malformed e-mail, bad date).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    pub fn required(field: &str) -> Self {
        ValidationError::Required {
            field: field.to_string(),
        }
    }
}

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
