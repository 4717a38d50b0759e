//! Backend resources, one module each.
//!
//! ```text
//! products   ──► productos/
//! providers  ──► proveedores/
//! sales      ──► sales/
//! closures   ──► contabilidad/cash_closures/
//! reports    ──► contabilidad/reports/, contabilidad/expenses/summary/
//! expenses   ──► contabilidad/expenses/
//! ```

pub mod closures;
pub mod expenses;
pub mod products;
pub mod providers;
pub mod reports;
pub mod sales;
