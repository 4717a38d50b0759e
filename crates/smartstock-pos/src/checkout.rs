//! # Checkout Session
//!
//! Scanner, cart, payment step and sale submission for one register.
//!
//! ## Sale Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Checkout Flow                                   │
//! │                                                                         │
//! │  load_catalog() ──► GET productos/                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  scan("7790...") ──► Catalog::find ──► Cart::add                        │
//! │       │                                  (NoStock / InsufficientStock)  │
//! │       ▼                                                                 │
//! │  open_payment() ──► select_method / set_tendered ──► quote()            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  submit()                                                               │
//! │    ├── empty cart / cash short ──► refused, nothing sent                │
//! │    ├── flag raised ──► POST sales/                                      │
//! │    │     ├── success: true  ──► cart cleared, payment reset, notice     │
//! │    │     └── failure        ──► cart kept, message stored, retry ok     │
//! │    └── flag lowered (guard)                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Locking
//! Session state sits behind a `tokio::sync::Mutex`. The lock is never held
//! across the sale request; instead the cart is frozen while the submission
//! flag is raised, so a result is always applied to the cart it was built
//! from.

use std::sync::Arc;

use serde::Serialize;
use smartstock_client::{CatalogApi, SalesApi};
use smartstock_core::{
    AddOutcome, Cart, CartLine, CartTotals, Catalog, CoreError, CreateSalePayload, Money,
    PaymentIntent, PaymentMethod, PaymentQuote, Product, QuantityChange,
};
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{PosError, PosResult, SALE_FAILED_FALLBACK};
use crate::loading::LoadingFlag;

/// Transient notice after a registered sale.
pub const SALE_REGISTERED: &str = "Sale registered successfully.";

/// What a registered sale hands back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaleOutcome {
    pub sale_id: Option<i64>,
    pub total: Money,
    pub payment_method: PaymentMethod,
    pub ticket_url: Option<String>,
    pub message: String,
}

/// Snapshot of the session for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutView {
    pub session_id: Uuid,
    pub lines: Vec<CartLine>,
    pub totals: CartTotals,
    pub payment: PaymentQuote,
    pub tendered_input: String,
    pub submitting: bool,
    pub notice: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Default)]
struct CheckoutState {
    catalog: Catalog,
    cart: Cart,
    payment: PaymentIntent,
    notice: Option<String>,
    error: Option<String>,
}

pub struct Checkout {
    id: Uuid,
    catalog_api: Arc<dyn CatalogApi>,
    sales_api: Arc<dyn SalesApi>,
    state: Mutex<CheckoutState>,
    submitting: LoadingFlag,
}

impl Checkout {
    pub fn new(catalog_api: Arc<dyn CatalogApi>, sales_api: Arc<dyn SalesApi>) -> Self {
        let id = Uuid::new_v4();
        debug!(session_id = %id, "Checkout session started");
        Checkout {
            id,
            catalog_api,
            sales_api,
            state: Mutex::new(CheckoutState::default()),
            submitting: LoadingFlag::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Shared handle to the submission flag.
    pub fn submitting(&self) -> LoadingFlag {
        self.submitting.clone()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.is_loading()
    }

    /// Locks the session for a cart or payment change.
    ///
    /// The flag is read under the lock: `submit` raises it before locking,
    /// so no change can slip in after the sale payload is built.
    async fn lock_idle(&self) -> PosResult<MutexGuard<'_, CheckoutState>> {
        let state = self.state.lock().await;
        if self.submitting.is_loading() {
            warn!(session_id = %self.id, "Cart change refused during submission");
            return Err(PosError::Busy {
                operation: "Sale submission",
            });
        }
        Ok(state)
    }

    // =========================================================================
    // Catalog & Scanner
    // =========================================================================

    /// Replaces the catalog with the backend's product list.
    pub async fn load_catalog(&self) -> PosResult<usize> {
        let products = self.catalog_api.list_products().await?;
        let count = products.len();
        self.state.lock().await.catalog.replace(products);
        info!(session_id = %self.id, count, "Catalog loaded");
        Ok(count)
    }

    /// Looks up a barcode or name and adds one unit.
    pub async fn scan(&self, term: &str) -> PosResult<AddOutcome> {
        let mut state = self.lock_idle().await?;
        let product = match state.catalog.find(term) {
            Ok(product) => product.clone(),
            Err(err) => {
                warn!(session_id = %self.id, term, "Scan did not match");
                return Err(err.into());
            }
        };
        Self::add_locked(&mut state, &product, self.id)
    }

    /// Matches for the name search box.
    pub async fn search(&self, term: &str) -> Vec<Product> {
        let state = self.state.lock().await;
        state.catalog.search(term).into_iter().cloned().collect()
    }

    // =========================================================================
    // Cart
    // =========================================================================

    pub async fn add(&self, product: &Product) -> PosResult<AddOutcome> {
        let mut state = self.lock_idle().await?;
        Self::add_locked(&mut state, product, self.id)
    }

    fn add_locked(
        state: &mut CheckoutState,
        product: &Product,
        session_id: Uuid,
    ) -> PosResult<AddOutcome> {
        match state.cart.add(product) {
            Ok(outcome) => {
                debug!(%session_id, product_id = product.id, ?outcome, "Added to cart");
                state.error = None;
                Ok(outcome)
            }
            Err(err) => {
                warn!(%session_id, product_id = product.id, error = %err, "Add refused");
                Err(err.into())
            }
        }
    }

    pub async fn remove(&self, product_id: i64) -> PosResult<Option<CartLine>> {
        let removed = self.lock_idle().await?.cart.remove(product_id);
        debug!(session_id = %self.id, product_id, removed = removed.is_some(), "Removed from cart");
        Ok(removed)
    }

    /// Sets a line's quantity, clamped to `[1, stock]`.
    pub async fn update_quantity(
        &self,
        product_id: i64,
        quantity: i64,
    ) -> PosResult<Option<QuantityChange>> {
        let change = self.lock_idle().await?.cart.update_quantity(product_id, quantity);
        if let Some(change) = change.filter(QuantityChange::was_clamped) {
            warn!(
                session_id = %self.id,
                product_id,
                requested = change.requested,
                applied = change.applied,
                "Quantity clamped"
            );
        }
        Ok(change)
    }

    pub async fn clear(&self) -> PosResult<()> {
        self.lock_idle().await?.cart.clear();
        debug!(session_id = %self.id, "Cart cleared");
        Ok(())
    }

    pub async fn totals(&self) -> CartTotals {
        CartTotals::from(&self.state.lock().await.cart)
    }

    pub async fn lines(&self) -> Vec<CartLine> {
        self.state.lock().await.cart.lines().to_vec()
    }

    // =========================================================================
    // Payment Step
    // =========================================================================

    /// Shows the payment step with the tendered amount cleared.
    pub async fn open_payment(&self) -> PosResult<PaymentQuote> {
        let mut state = self.lock_idle().await?;
        state.payment.reset();
        Ok(state.payment.quote(state.cart.total()))
    }

    pub async fn select_method(&self, method: PaymentMethod) -> PosResult<PaymentQuote> {
        let mut state = self.lock_idle().await?;
        state.payment.select_method(method);
        Ok(state.payment.quote(state.cart.total()))
    }

    pub async fn set_tendered(&self, input: &str) -> PosResult<PaymentQuote> {
        let mut state = self.lock_idle().await?;
        state.payment.set_tendered(input);
        Ok(state.payment.quote(state.cart.total()))
    }

    pub async fn quote(&self) -> PaymentQuote {
        let state = self.state.lock().await;
        state.payment.quote(state.cart.total())
    }

    // =========================================================================
    // Submission
    // =========================================================================

    /// Registers the cart as a sale.
    ///
    /// Refused with [`PosError::Busy`] while another submission is in flight.
    /// On any failure the cart and payment step are left as they were.
    pub async fn submit(&self) -> PosResult<SaleOutcome> {
        let _guard = self.submitting.try_begin().ok_or(PosError::Busy {
            operation: "Sale submission",
        })?;

        let (payload, total) = {
            let mut state = self.state.lock().await;
            if state.cart.is_empty() {
                warn!(session_id = %self.id, "Submit refused: cart is empty");
                return Err(CoreError::EmptyCart.into());
            }
            let total = state.cart.total();
            let method = match state.payment.confirm(total) {
                Ok(method) => method,
                Err(err) => {
                    warn!(session_id = %self.id, error = %err, "Submit refused by payment gate");
                    return Err(err.into());
                }
            };
            state.notice = None;
            state.error = None;

            let payload = CreateSalePayload {
                payment_method: method,
                products: state.cart.to_sale_lines(),
                ticket_url: None,
                invoice_state: None,
            };
            (payload, total)
        };

        debug!(
            session_id = %self.id,
            lines = payload.products.len(),
            total = %total,
            method = %payload.payment_method,
            "Submitting sale"
        );

        let result = self.sales_api.create_sale(&payload).await;
        let mut state = self.state.lock().await;

        match result {
            Ok(response) if response.success => {
                state.cart.clear();
                state.payment.reset();
                state.notice = Some(SALE_REGISTERED.to_string());

                let sale = response.sale;
                let outcome = SaleOutcome {
                    sale_id: sale.as_ref().map(|s| s.id),
                    total,
                    payment_method: payload.payment_method,
                    ticket_url: sale.and_then(|s| s.ticket_url),
                    message: SALE_REGISTERED.to_string(),
                };
                info!(
                    session_id = %self.id,
                    sale_id = ?outcome.sale_id,
                    total = %total,
                    "Sale registered"
                );
                Ok(outcome)
            }
            Ok(response) => {
                let message = if response.message.trim().is_empty() {
                    SALE_FAILED_FALLBACK.to_string()
                } else {
                    response.message
                };
                warn!(session_id = %self.id, %message, "Sale rejected");
                state.error = Some(message.clone());
                Err(PosError::Rejected(message))
            }
            Err(err) => {
                let err = PosError::from(err);
                warn!(session_id = %self.id, error = %err, "Sale submission failed");
                state.error = Some(err.user_message());
                Err(err)
            }
        }
    }

    /// Returns and clears the success notice.
    pub async fn take_notice(&self) -> Option<String> {
        self.state.lock().await.notice.take()
    }

    pub async fn view(&self) -> CheckoutView {
        let state = self.state.lock().await;
        CheckoutView {
            session_id: self.id,
            lines: state.cart.lines().to_vec(),
            totals: CartTotals::from(&state.cart),
            payment: state.payment.quote(state.cart.total()),
            tendered_input: state.payment.tendered_input().to_string(),
            submitting: self.submitting.is_loading(),
            notice: state.notice.clone(),
            error: state.error.clone(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
