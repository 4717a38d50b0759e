//! # smartstock-pos: Operator Session Workflows
//!
//! The stateful half of the register. Each workflow owns its session state,
//! talks to the backend through the `smartstock-client` API traits and turns
//! every failure into a stored message instead of a panic.
//!
//! ## Workflows
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        smartstock-pos                                   │
//! │                                                                         │
//! │  ┌──────────────────┐  ┌──────────────────────┐  ┌──────────────────┐  │
//! │  │    Checkout      │  │ CashClosureWorkflow  │  │    Dashboard     │  │
//! │  │                  │  │                      │  │                  │  │
//! │  │  Catalog         │  │  ClosureMachine      │  │  stats panel     │  │
//! │  │  Cart            │  │  OperatorSession     │  │  sales charts    │  │
//! │  │  PaymentIntent   │  │                      │  │                  │  │
//! │  └────────┬─────────┘  └──────────┬───────────┘  └────────┬─────────┘  │
//! │           │ CatalogApi, SalesApi  │ ClosureApi            │ ReportsApi │
//! │           └───────────────────────┴───────────────────────┘            │
//! │                                   │                                     │
//! │                   SmartStockClient (or a fake in tests)                 │
//! │                                                                         │
//! │  LoadingFlag: one per operation, lowered by a drop guard.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use smartstock_client::{ClientConfig, SmartStockClient};
//! use smartstock_pos::Checkout;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Arc::new(SmartStockClient::new(&ClientConfig::load(None)?)?);
//! let checkout = Checkout::new(client.clone(), client);
//!
//! checkout.load_catalog().await?;
//! checkout.scan("7790895000997").await?;
//! let sale = checkout.submit().await?;
//! println!("{}", sale.message);
//! # Ok(())
//! # }
//! ```

pub mod checkout;
pub mod closure;
pub mod dashboard;
pub mod error;
pub mod loading;
pub mod session;

pub use checkout::{Checkout, CheckoutView, SaleOutcome, SALE_REGISTERED};
pub use closure::CashClosureWorkflow;
pub use dashboard::{Chart, Dashboard, DashboardStats, DashboardView, SalesCharts};
pub use error::{ErrorCode, ErrorPayload, PosError, PosResult};
pub use loading::{LoadingFlag, LoadingGuard};
pub use session::OperatorSession;
