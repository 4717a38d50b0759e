//! # Workflow Error Type
//!
//! What a caller of `Checkout`, `CashClosureWorkflow` or `Dashboard` sees when
//! an operation is refused or a request fails.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Error Propagation                                 │
//! │                                                                         │
//! │  CoreError (cart, payment gate, closure state)                          │
//! │       │  From                                                           │
//! │       ▼                                                                 │
//! │  PosError ◄── ClientError (network, HTTP status, validation)            │
//! │       │                                                                 │
//! │       ├──► code()          ErrorCode for the front-end (switch on it)   │
//! │       └──► user_message()  text shown inline to the operator            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use smartstock_client::ClientError;
use smartstock_core::CoreError;
use thiserror::Error;

/// Result type alias for workflow operations.
pub type PosResult<T> = Result<T, PosError>;

/// Fallback shown when the backend rejects a sale without saying why.
pub const SALE_FAILED_FALLBACK: &str = "Could not register the sale";

#[derive(Debug, Error)]
pub enum PosError {
    /// A business rule refused the operation; state is unchanged.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The backend could not be reached or answered with an error.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// The backend answered 2xx but reported `success: false`.
    #[error("{0}")]
    Rejected(String),

    /// The same operation is already in flight.
    #[error("{operation} is already in progress")]
    Busy { operation: &'static str },
}

/// Error codes for front-end error handling.
///
/// ```typescript
/// switch (e.code) {
///   case 'INSUFFICIENT_STOCK': flashScanner(e.message); break;
///   case 'NETWORK_ERROR':      showOffline(); break;
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Unknown barcode or missing resource (404)
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Refused by a business rule (closure state, server refusal)
    BusinessLogic,

    /// Cart operation failed
    CartError,

    /// Insufficient or no stock
    InsufficientStock,

    /// Payment gate refused (cash short)
    PaymentError,

    /// Server unreachable or timed out
    NetworkError,

    /// Server answered with an error status or rejected the request
    ServerError,

    /// Operation already in flight
    Busy,

    /// Unexpected response or misconfiguration
    Internal,
}

impl PosError {
    pub fn code(&self) -> ErrorCode {
        match self {
            PosError::Core(err) => match err {
                CoreError::ProductNotFound(_) => ErrorCode::NotFound,
                CoreError::NoStock { .. } | CoreError::InsufficientStock { .. } => {
                    ErrorCode::InsufficientStock
                }
                CoreError::EmptyCart => ErrorCode::CartError,
                CoreError::InsufficientTender { .. } => ErrorCode::PaymentError,
                CoreError::ClosureNotAllowed { .. } => ErrorCode::BusinessLogic,
                CoreError::Validation(_) => ErrorCode::ValidationError,
            },
            PosError::Client(err) => match err {
                ClientError::Http(_) => ErrorCode::NetworkError,
                ClientError::Api { status: 404, .. } => ErrorCode::NotFound,
                ClientError::Api { .. } => ErrorCode::ServerError,
                ClientError::Validation(_) => ErrorCode::ValidationError,
                ClientError::InvalidResponse(_) | ClientError::InvalidUrl(_) => {
                    ErrorCode::Internal
                }
            },
            PosError::Rejected(_) => ErrorCode::ServerError,
            PosError::Busy { .. } => ErrorCode::Busy,
        }
    }

    /// The text shown to the operator.
    pub fn user_message(&self) -> String {
        match self {
            PosError::Client(err) => err.user_message(),
            other => other.to_string(),
        }
    }

    /// True when the backend says today's closure already exists.
    pub fn is_already_closed(&self) -> bool {
        matches!(self, PosError::Client(err) if err.is_already_closed())
    }
}

/// Serializable form handed to a front-end.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorPayload {
    pub code: ErrorCode,
    pub message: String,
}

impl From<&PosError> for ErrorPayload {
    fn from(err: &PosError) -> Self {
        ErrorPayload {
            code: err.code(),
            message: err.user_message(),
        }
    }
}
