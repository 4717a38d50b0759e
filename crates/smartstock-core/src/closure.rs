//! # Cash Closure State Machine
//!
//! Tracks the daily cash closure screen from first load to the closed day.
//! The machine holds no I/O; the workflow in `smartstock-pos` performs the
//! requests and feeds their outcomes in.
//!
//! ## States
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Cash Closure Lifecycle                              │
//! │                                                                         │
//! │   ┌──────┐ begin_load ┌─────────┐ preview_loaded  ┌─────────┐          │
//! │   │ IDLE │───────────►│ LOADING │────────────────►│ PREVIEW │◄──┐      │
//! │   └──────┘            └────┬────┘                 └────┬────┘   │      │
//! │                            │                           │        │      │
//! │          preview_failed    │         begin_close       │        │      │
//! │       ┌────────────────────┤        (can_close only)   │        │      │
//! │       │                    │                           ▼        │      │
//! │       ▼                    ▼                      ┌─────────┐   │      │
//! │  ┌────────┐          ┌────────┐   close_succeeded │ LOADING │───┘      │
//! │  │ ERROR  │          │ CLOSED │◄──────────────────│(retains │ close_   │
//! │  └────────┘          └────────┘   or "already     │ preview)│ failed   │
//! │   other failure       "already     closed"        └─────────┘          │
//! │                        closed"                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The "Already Closed" Marker
//! The backend refuses a second closure for the same date with
//! `{"error": "Ya existe un cierre para esta fecha"}`, on both the preview and
//! the close endpoints. Seeing that text is not an error for this screen: the
//! day is simply closed.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::types::{ClosureResult, DailyClosurePreview};

/// Substring the backend uses when a closure already exists for the date.
pub const ALREADY_CLOSED_MARKER: &str = "Ya existe un cierre";

/// Checks a server error message for the "already closed" marker.
pub fn is_already_closed_message(message: &str) -> bool {
    message.contains(ALREADY_CLOSED_MARKER)
}

// =============================================================================
// Status & State
// =============================================================================

/// Coarse status, for display and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClosureStatus {
    Idle,
    Loading,
    Preview,
    Closed,
    Error,
}

/// Full state with the data each status carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClosureState {
    Idle,
    /// A request is in flight. While closing, the preview is kept so a
    /// failure can return to it untouched.
    Loading {
        retained: Option<DailyClosurePreview>,
    },
    Preview {
        preview: DailyClosurePreview,
        /// Message of the last failed close attempt.
        last_error: Option<String>,
    },
    /// Terminal. `summary` is the closed day's totals when known.
    Closed {
        summary: Option<DailyClosurePreview>,
    },
    Error {
        message: String,
    },
}

impl ClosureState {
    pub fn status(&self) -> ClosureStatus {
        match self {
            ClosureState::Idle => ClosureStatus::Idle,
            ClosureState::Loading { .. } => ClosureStatus::Loading,
            ClosureState::Preview { .. } => ClosureStatus::Preview,
            ClosureState::Closed { .. } => ClosureStatus::Closed,
            ClosureState::Error { .. } => ClosureStatus::Error,
        }
    }
}

impl Default for ClosureState {
    fn default() -> Self {
        ClosureState::Idle
    }
}

// =============================================================================
// Machine
// =============================================================================

/// Owns a [`ClosureState`] and applies the allowed transitions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClosureMachine {
    state: ClosureState,
}

impl ClosureMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ClosureState {
        &self.state
    }

    pub fn status(&self) -> ClosureStatus {
        self.state.status()
    }

    /// The totals currently on screen, if any.
    pub fn preview(&self) -> Option<&DailyClosurePreview> {
        match &self.state {
            ClosureState::Preview { preview, .. } => Some(preview),
            ClosureState::Loading { retained } => retained.as_ref(),
            ClosureState::Closed { summary } => summary.as_ref(),
            ClosureState::Idle | ClosureState::Error { .. } => None,
        }
    }

    /// The message to show, from a failed load or a failed close.
    pub fn error(&self) -> Option<&str> {
        match &self.state {
            ClosureState::Error { message } => Some(message),
            ClosureState::Preview { last_error, .. } => last_error.as_deref(),
            _ => None,
        }
    }

    /// True while in `PREVIEW` with a preview the server allows closing.
    pub fn can_close(&self) -> bool {
        matches!(&self.state, ClosureState::Preview { preview, .. } if preview.can_close)
    }

    // -------------------------------------------------------------------------
    // Initial load
    // -------------------------------------------------------------------------

    /// Enters `LOADING` for the preview request.
    pub fn begin_load(&mut self) {
        self.state = ClosureState::Loading { retained: None };
    }

    /// `LOADING → PREVIEW`.
    pub fn preview_loaded(&mut self, preview: DailyClosurePreview) {
        self.state = ClosureState::Preview {
            preview,
            last_error: None,
        };
    }

    /// `LOADING → CLOSED` for the "already closed" marker, `→ ERROR` otherwise.
    pub fn preview_failed(&mut self, message: impl Into<String>) -> ClosureStatus {
        let message = message.into();
        self.state = if is_already_closed_message(&message) {
            ClosureState::Closed { summary: None }
        } else {
            ClosureState::Error { message }
        };
        self.status()
    }

    // -------------------------------------------------------------------------
    // Close
    // -------------------------------------------------------------------------

    /// `PREVIEW(can_close) → LOADING`, keeping the preview.
    ///
    /// Refused in any other state, including `LOADING` (a close in flight).
    pub fn begin_close(&mut self) -> CoreResult<()> {
        let reason = match &self.state {
            ClosureState::Preview { preview, .. } if preview.can_close => None,
            ClosureState::Preview { .. } => Some("the server does not allow closing this day"),
            ClosureState::Loading { .. } => Some("a request is already in progress"),
            ClosureState::Closed { .. } => Some("the day is already closed"),
            ClosureState::Idle | ClosureState::Error { .. } => Some("no preview is loaded"),
        };
        if let Some(reason) = reason {
            return Err(CoreError::ClosureNotAllowed {
                status: self.status(),
                reason: reason.to_string(),
            });
        }

        if let ClosureState::Preview { preview, .. } = std::mem::take(&mut self.state) {
            self.state = ClosureState::Loading {
                retained: Some(preview),
            };
        }
        Ok(())
    }

    /// `LOADING → CLOSED` with the server's totals (`can_close = false`).
    pub fn close_succeeded(&mut self, result: ClosureResult) {
        self.state = ClosureState::Closed {
            summary: Some(result.into_closed_view()),
        };
    }

    /// `LOADING → PREVIEW` with the message and the preview unchanged, or
    /// `→ CLOSED` when the server says the day was already closed.
    pub fn close_failed(&mut self, message: impl Into<String>) -> ClosureStatus {
        let message = message.into();
        let retained = match std::mem::take(&mut self.state) {
            ClosureState::Loading { retained } => retained,
            ClosureState::Preview { preview, .. } => Some(preview),
            _ => None,
        };

        self.state = if is_already_closed_message(&message) {
            ClosureState::Closed { summary: None }
        } else {
            match retained {
                Some(preview) => ClosureState::Preview {
                    preview,
                    last_error: Some(message),
                },
                None => ClosureState::Error { message },
            }
        };
        self.status()
    }

    /// Fills in the totals of a day found closed without them.
    ///
    /// Ignored unless the state is `CLOSED`.
    pub fn attach_closed_summary(&mut self, summary: DailyClosurePreview) {
        if let ClosureState::Closed { summary: slot } = &mut self.state {
            *slot = Some(summary);
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use std::collections::BTreeMap;

    const ALREADY_CLOSED: &str = "Ya existe un cierre para esta fecha";

    fn preview(can_close: bool) -> DailyClosurePreview {
        DailyClosurePreview {
            closure_date: "2025-10-17".to_string(),
            can_close,
            total_sales: Money::from_cents(150000),
            cash_expenses: Money::from_cents(20000),
            final_balance: Money::from_cents(130000),
            sales_breakdown: BTreeMap::from([("efectivo".to_string(), Money::from_cents(150000))]),
            expenses_breakdown: BTreeMap::new(),
            other_expenses: Money::zero(),
            pending_invoices: 0,
            low_stock_products: 1,
        }
    }

    fn closure_result(final_balance_cents: i64) -> ClosureResult {
        ClosureResult {
            id: 10,
            closure_date: "2025-10-17".to_string(),
            user_id: 1,
            total_sales: Money::from_cents(150000),
            total_expenses: Money::from_cents(20000),
            final_balance: Money::from_cents(final_balance_cents),
            sales_breakdown: BTreeMap::new(),
            expenses_breakdown: BTreeMap::new(),
            cash_expenses: Money::from_cents(20000),
            other_expenses: Money::zero(),
            pending_invoices: 0,
            low_stock_products: 1,
        }
    }

    fn machine_in_preview(can_close: bool) -> ClosureMachine {
        let mut machine = ClosureMachine::new();
        machine.begin_load();
        machine.preview_loaded(preview(can_close));
        machine
    }

    #[test]
    fn test_load_success() {
        let mut machine = ClosureMachine::new();
        assert_eq!(machine.status(), ClosureStatus::Idle);

        machine.begin_load();
        assert_eq!(machine.status(), ClosureStatus::Loading);

        machine.preview_loaded(preview(true));
        assert_eq!(machine.status(), ClosureStatus::Preview);
        assert!(machine.can_close());
        assert_eq!(machine.error(), None);
    }

    #[test]
    fn test_load_already_closed_is_closed() {
        let mut machine = ClosureMachine::new();
        machine.begin_load();

        assert_eq!(machine.preview_failed(ALREADY_CLOSED), ClosureStatus::Closed);
        assert_eq!(machine.preview(), None);
    }

    #[test]
    fn test_load_other_failure_is_error() {
        let mut machine = ClosureMachine::new();
        machine.begin_load();

        assert_eq!(machine.preview_failed("HTTP error 500"), ClosureStatus::Error);
        assert_eq!(machine.error(), Some("HTTP error 500"));
    }

    #[test]
    fn test_close_success_keeps_server_balance() {
        let mut machine = machine_in_preview(true);

        machine.begin_close().unwrap();
        assert_eq!(machine.status(), ClosureStatus::Loading);
        assert!(machine.preview().is_some());

        machine.close_succeeded(closure_result(129_999));
        assert_eq!(machine.status(), ClosureStatus::Closed);

        let summary = machine.preview().unwrap();
        assert!(!summary.can_close);
        assert_eq!(summary.final_balance, Money::from_cents(129_999));
    }

    #[test]
    fn test_second_close_refused_client_side() {
        let mut machine = machine_in_preview(true);
        machine.begin_close().unwrap();
        machine.close_succeeded(closure_result(130000));

        let err = machine.begin_close().unwrap_err();
        assert!(matches!(
            err,
            CoreError::ClosureNotAllowed {
                status: ClosureStatus::Closed,
                ..
            }
        ));
    }

    #[test]
    fn test_close_refused_while_in_flight() {
        let mut machine = machine_in_preview(true);
        machine.begin_close().unwrap();

        assert!(matches!(
            machine.begin_close(),
            Err(CoreError::ClosureNotAllowed {
                status: ClosureStatus::Loading,
                ..
            })
        ));
    }

    #[test]
    fn test_close_refused_when_server_disallows() {
        let mut machine = machine_in_preview(false);
        assert!(machine.begin_close().is_err());
        assert_eq!(machine.status(), ClosureStatus::Preview);
    }

    #[test]
    fn test_close_failure_returns_to_preview() {
        let mut machine = machine_in_preview(true);
        machine.begin_close().unwrap();

        let status = machine.close_failed("No tienes permisos para cerrar caja");
        assert_eq!(status, ClosureStatus::Preview);
        assert_eq!(machine.error(), Some("No tienes permisos para cerrar caja"));
        assert!(machine.can_close());
        assert_eq!(machine.preview(), Some(&preview(true)));
    }

    #[test]
    fn test_close_failure_already_closed_is_terminal() {
        let mut machine = machine_in_preview(true);
        machine.begin_close().unwrap();

        assert_eq!(machine.close_failed(ALREADY_CLOSED), ClosureStatus::Closed);
        assert!(machine.begin_close().is_err());
    }

    #[test]
    fn test_attach_closed_summary_only_when_closed() {
        let mut machine = machine_in_preview(true);
        machine.attach_closed_summary(closure_result(1).into_closed_view());
        assert_eq!(machine.preview(), Some(&preview(true)));

        let mut machine = ClosureMachine::new();
        machine.begin_load();
        machine.preview_failed(ALREADY_CLOSED);
        machine.attach_closed_summary(closure_result(130000).into_closed_view());
        assert_eq!(
            machine.preview().map(|p| p.final_balance),
            Some(Money::from_cents(130000))
        );
    }

    #[test]
    fn test_status_wire_names() {
        assert_eq!(
            serde_json::to_value(ClosureStatus::Preview).unwrap(),
            serde_json::json!("PREVIEW")
        );
    }
}
