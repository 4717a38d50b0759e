//! # Payment Resolution
//!
//! The payment step between "cart ready" and "sale submitted".
//!
//! ## Confirmation Gate
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Payment Step                                    │
//! │                                                                         │
//! │  method = cash (default)      tendered = raw operator text              │
//! │                                                                         │
//! │   tendered           parsed        change           confirm             │
//! │   ────────────       ──────────    ─────────────    ─────────────       │
//! │   ""                 not given     shown as $0.00   allowed             │
//! │   "abc"              not given     shown as $0.00   allowed             │
//! │   "100" (total 150)  $100.00       shown as $0.00   BLOCKED (short $50) │
//! │   "200" (total 150)  $200.00       $50.00           allowed             │
//! │                                                                         │
//! │  card / qr / transfer: no amount, always allowed                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Changing the method or reopening the step clears the tendered text.
//! Nothing here touches the network; [`PaymentIntent::confirm`] only hands the
//! chosen method to the checkout.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::PaymentMethod;

/// The operator's choices on the payment step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentIntent {
    method: PaymentMethod,
    tendered_input: String,
}

impl PaymentIntent {
    /// Cash, nothing tendered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears the tendered text. Called whenever the payment step is shown.
    pub fn reset(&mut self) {
        self.tendered_input.clear();
    }

    /// Switches method and clears the tendered text.
    pub fn select_method(&mut self, method: PaymentMethod) {
        self.method = method;
        self.tendered_input.clear();
    }

    /// Stores the raw text the operator typed as tendered cash.
    pub fn set_tendered(&mut self, input: impl Into<String>) {
        self.tendered_input = input.into();
    }

    pub fn method(&self) -> PaymentMethod {
        self.method
    }

    pub fn tendered_input(&self) -> &str {
        &self.tendered_input
    }

    /// The tendered amount, when one was given and is numeric.
    pub fn tendered(&self) -> Option<Money> {
        if !self.method.takes_tender() {
            return None;
        }
        Money::parse_decimal(&self.tendered_input)
    }

    /// Computes change and the confirmation gate for `total`.
    pub fn quote(&self, total: Money) -> PaymentQuote {
        let tendered = self.tendered();
        let raw_change = tendered.and_then(|paid| paid.checked_sub(total));
        let shortfall = raw_change.filter(Money::is_negative).map(|c| c.abs());

        PaymentQuote {
            method: self.method,
            total,
            tendered,
            change: raw_change.filter(|c| !c.is_negative()).unwrap_or_default(),
            shortfall,
            can_confirm: shortfall.is_none(),
        }
    }

    /// Passes the gate and returns the method for the sale request.
    pub fn confirm(&self, total: Money) -> CoreResult<PaymentMethod> {
        match self.quote(total).shortfall {
            Some(short_by) => Err(CoreError::InsufficientTender { short_by }),
            None => Ok(self.method),
        }
    }
}

/// What the payment step shows for the current input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PaymentQuote {
    pub method: PaymentMethod,
    pub total: Money,
    /// `None` until a numeric cash amount is typed.
    pub tendered: Option<Money>,
    /// Change to hand back. Never negative.
    pub change: Money,
    /// How much cash is missing, when the tendered amount is too low.
    pub shortfall: Option<Money>,
    pub can_confirm: bool,
}

impl PaymentQuote {
    /// `"Short by $50.00"` when cash is missing.
    pub fn shortfall_label(&self) -> Option<String> {
        self.shortfall.map(|short| format!("Short by {}", short))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
