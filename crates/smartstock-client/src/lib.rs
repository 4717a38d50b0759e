//! # smartstock-client: REST Client for the SmartStock Backend
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  smartstock-pos workflows                                               │
//! │        │ CatalogApi / SalesApi / ClosureApi / ReportsApi                │
//! │        ▼                                                                │
//! │  ★ smartstock-client ★                                                  │
//! │    SmartStockClient ──► HttpClient (reqwest) ──► http://…/api/…         │
//! │        │                                                                │
//! │        └── wire types + validation from smartstock-core                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`config`] - `smartstock.toml` + `SMARTSTOCK_*` environment
//! - [`http`] - Typed JSON requests and error body extraction
//! - [`endpoints`] - One module per backend resource
//! - [`api`] - Traits the workflows depend on
//! - [`error`] - `ClientError`, `ConfigError`
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use smartstock_client::{ClientConfig, SmartStockClient};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ClientConfig::load(None)?;
//! let client = SmartStockClient::new(&config)?;
//!
//! let products = client.list_products().await?;
//! println!("{} products", products.len());
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod http;

pub use api::{CatalogApi, ClosureApi, ReportsApi, SalesApi};
pub use client::SmartStockClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult, ConfigError};
pub use http::HttpClient;
