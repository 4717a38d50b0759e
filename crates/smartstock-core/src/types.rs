//! # Domain Types
//!
//! Catalog, sale, closure and report types shared with the SmartStock backend.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  Catalog                 Checkout                  Accounting           │
//! │  ─────────────────       ─────────────────         ──────────────────   │
//! │  Product                 PaymentMethod             DailyClosurePreview  │
//! │  CreateProduct           SaleLine                  ClosureResult        │
//! │  Provider                CreateSalePayload         CloseDayRequest      │
//! │  CreateProvider          SaleResponse              Expense (+Create/    │
//! │                          SaleSummary                Update)             │
//! │                                                                         │
//! │  Reports: DailyReport • MonthlyComparison • WeeklySales •               │
//! │           CustomerInsights • ExpenseCategoryTotal                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Conventions
//! - Identifiers are the backend's integer ids
//! - Every amount is [`Money`] and goes through [`crate::money::wire`]
//! - Dates stay strings: the backend mixes `YYYY-MM-DD` and RFC 1123 forms
//!   and this crate never does date arithmetic on them

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::money::{wire, Money};

// =============================================================================
// Product
// =============================================================================

/// A product as listed by the backend catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    pub id: i64,

    /// Display name shown to the cashier and on the ticket.
    pub name: String,

    /// Barcode read by the scanner.
    #[serde(default)]
    pub barcode: String,

    /// Current unit price.
    #[serde(with = "wire")]
    #[ts(type = "number")]
    pub price: Money,

    /// Units on hand. The cart never lets a line exceed this.
    #[serde(default)]
    pub stock: i64,

    #[serde(default)]
    pub category: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url_image: Option<String>,
}

impl Product {
    /// Creates a product with an empty category and no image.
    pub fn new(
        id: i64,
        name: impl Into<String>,
        barcode: impl Into<String>,
        price: Money,
        stock: i64,
    ) -> Self {
        Product {
            id,
            name: name.into(),
            barcode: barcode.into(),
            price,
            stock,
            category: String::new(),
            url_image: None,
        }
    }

    /// Checks if at least one unit can be sold.
    #[inline]
    pub fn in_stock(&self) -> bool {
        self.stock >= 1
    }
}

/// Body for creating or replacing a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CreateProduct {
    pub name: String,
    pub barcode: String,
    #[serde(with = "wire")]
    #[ts(type = "number")]
    pub price: Money,
    pub stock: i64,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url_image: Option<String>,
}

impl From<&Product> for CreateProduct {
    fn from(product: &Product) -> Self {
        CreateProduct {
            name: product.name.clone(),
            barcode: product.barcode.clone(),
            price: product.price,
            stock: product.stock,
            category: product.category.clone(),
            url_image: product.url_image.clone(),
        }
    }
}

// =============================================================================
// Provider
// =============================================================================

/// A supplier of the business.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Provider {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub contact_email: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub description: String,
}

/// Body for creating or replacing a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CreateProvider {
    pub name: String,
    pub contact_email: String,
    pub phone_number: String,
    pub address: String,
    pub description: String,
}

// =============================================================================
// Payment Method
// =============================================================================

/// How the customer pays.
///
/// Wire labels are the backend's Spanish identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum PaymentMethod {
    /// Physical cash. The only method with a tendered amount and change.
    #[serde(rename = "efectivo")]
    Cash,
    #[serde(rename = "tarjeta")]
    Card,
    #[serde(rename = "qr")]
    Qr,
    #[serde(rename = "transferencia")]
    Transfer,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::Cash,
        PaymentMethod::Card,
        PaymentMethod::Qr,
        PaymentMethod::Transfer,
    ];

    /// Returns the backend label (`efectivo`, `tarjeta`, ...).
    pub const fn wire_label(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "efectivo",
            PaymentMethod::Card => "tarjeta",
            PaymentMethod::Qr => "qr",
            PaymentMethod::Transfer => "transferencia",
        }
    }

    /// Whether the payment step asks for a tendered amount.
    #[inline]
    pub const fn takes_tender(&self) -> bool {
        matches!(self, PaymentMethod::Cash)
    }
}

impl Default for PaymentMethod {
    fn default() -> Self {
        PaymentMethod::Cash
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_label())
    }
}

/// Accepts the wire label or the English name, case-insensitively.
impl FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "efectivo" | "cash" => Ok(PaymentMethod::Cash),
            "tarjeta" | "card" => Ok(PaymentMethod::Card),
            "qr" => Ok(PaymentMethod::Qr),
            "transferencia" | "transfer" => Ok(PaymentMethod::Transfer),
            other => Err(format!("unknown payment method '{}'", other)),
        }
    }
}

// =============================================================================
// Sale
// =============================================================================

/// One product line of a sale request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SaleLine {
    pub product_id: i64,
    pub quantity: i64,
    /// Price snapshotted when the product entered the cart.
    #[serde(with = "wire")]
    #[ts(type = "number")]
    pub unit_price: Money,
}

/// Body of `POST sales/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CreateSalePayload {
    pub payment_method: PaymentMethod,
    pub products: Vec<SaleLine>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticket_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_state: Option<String>,
}

/// The sale as recorded by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SaleSummary {
    pub id: i64,
    #[serde(with = "wire")]
    #[ts(type = "number")]
    pub total_amount: Money,
    #[serde(default)]
    pub sale_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticket_url: Option<String>,
}

/// Response of `POST sales/`.
///
/// A 2xx with `success == false` is still a failed sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SaleResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub sale: Option<SaleSummary>,
}

// =============================================================================
// Cash Closure
// =============================================================================

/// Today's totals as computed by the backend, before the day is closed.
///
/// ```text
/// final_balance = total_sales - cash_expenses
/// ```
/// The server computes it; this side never recomputes or edits it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DailyClosurePreview {
    pub closure_date: String,
    #[serde(default)]
    pub can_close: bool,
    #[serde(with = "wire")]
    #[ts(type = "number")]
    pub total_sales: Money,
    #[serde(with = "wire")]
    #[ts(type = "number")]
    pub cash_expenses: Money,
    #[serde(with = "wire")]
    #[ts(type = "number")]
    pub final_balance: Money,
    /// Sales per payment method label.
    #[serde(default, with = "wire::breakdown")]
    #[ts(type = "Record<string, number>")]
    pub sales_breakdown: BTreeMap<String, Money>,
    /// Expenses per category.
    #[serde(default, with = "wire::breakdown")]
    #[ts(type = "Record<string, number>")]
    pub expenses_breakdown: BTreeMap<String, Money>,
    #[serde(default, with = "wire")]
    #[ts(type = "number")]
    pub other_expenses: Money,
    #[serde(default)]
    pub pending_invoices: i64,
    #[serde(default)]
    pub low_stock_products: i64,
}

impl DailyClosurePreview {
    /// Sales breakdown with display labels, in label order.
    pub fn sales_rows(&self) -> Vec<(String, Money)> {
        display_rows(&self.sales_breakdown)
    }

    /// Expenses breakdown with display labels, in label order.
    pub fn expense_rows(&self) -> Vec<(String, Money)> {
        display_rows(&self.expenses_breakdown)
    }
}

/// What the backend returns after closing a day (and for a closure by date).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ClosureResult {
    pub id: i64,
    pub closure_date: String,
    pub user_id: i64,
    #[serde(with = "wire")]
    #[ts(type = "number")]
    pub total_sales: Money,
    #[serde(with = "wire")]
    #[ts(type = "number")]
    pub total_expenses: Money,
    #[serde(with = "wire")]
    #[ts(type = "number")]
    pub final_balance: Money,
    #[serde(default, with = "wire::breakdown")]
    #[ts(type = "Record<string, number>")]
    pub sales_breakdown: BTreeMap<String, Money>,
    #[serde(default, with = "wire::breakdown")]
    #[ts(type = "Record<string, number>")]
    pub expenses_breakdown: BTreeMap<String, Money>,
    #[serde(default, with = "wire")]
    #[ts(type = "number")]
    pub cash_expenses: Money,
    #[serde(default, with = "wire")]
    #[ts(type = "number")]
    pub other_expenses: Money,
    #[serde(default)]
    pub pending_invoices: i64,
    #[serde(default)]
    pub low_stock_products: i64,
}

impl ClosureResult {
    /// Maps the stored closure into the terminal view shown after closing.
    ///
    /// `can_close` is forced to `false` and `final_balance` is the server's.
    pub fn into_closed_view(self) -> DailyClosurePreview {
        DailyClosurePreview {
            closure_date: self.closure_date,
            can_close: false,
            total_sales: self.total_sales,
            cash_expenses: self.cash_expenses,
            final_balance: self.final_balance,
            sales_breakdown: self.sales_breakdown,
            expenses_breakdown: self.expenses_breakdown,
            other_expenses: self.other_expenses,
            pending_invoices: self.pending_invoices,
            low_stock_products: self.low_stock_products,
        }
    }
}

/// Body of `POST cash_closures/close-today`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloseDayRequest {
    pub user_id: i64,
}

// =============================================================================
// Expenses
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Expense {
    pub id: i64,
    pub description: String,
    pub category: String,
    #[serde(with = "wire")]
    #[ts(type = "number")]
    pub amount: Money,
    pub expense_date: String,
    pub user_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CreateExpense {
    pub description: String,
    pub category: String,
    #[serde(with = "wire")]
    #[ts(type = "number")]
    pub amount: Money,
    /// `YYYY-MM-DD`.
    pub expense_date: String,
    pub user_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Partial update; only the fields that are `Some` are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct UpdateExpense {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, with = "wire::option", skip_serializing_if = "Option::is_none")]
    #[ts(type = "number | null")]
    pub amount: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expense_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl UpdateExpense {
    pub fn is_empty(&self) -> bool {
        *self == UpdateExpense::default()
    }
}

// =============================================================================
// Reports
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DailySales {
    #[serde(default)]
    pub total_count: i64,
    #[serde(with = "wire")]
    #[ts(type = "number")]
    pub total_amount: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DailyExpenses {
    #[serde(with = "wire")]
    #[ts(type = "number")]
    pub cash_expenses: Money,
    #[serde(default, with = "wire")]
    #[ts(type = "number")]
    pub other_expenses: Money,
}

/// `GET contabilidad/reports/daily`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DailyReport {
    pub date: String,
    pub sales: DailySales,
    pub expenses: DailyExpenses,
    #[serde(with = "wire")]
    #[ts(type = "number")]
    pub cash_balance: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RevenueData {
    #[serde(with = "wire")]
    #[ts(type = "number")]
    pub total_revenue: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PeriodRevenue {
    pub period: String,
    pub data: RevenueData,
}

/// `GET contabilidad/reports/comparison?type=monthly`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MonthlyComparison {
    #[serde(rename = "type", default)]
    pub comparison_type: String,
    pub current: PeriodRevenue,
    pub previous: PeriodRevenue,
}

impl MonthlyComparison {
    /// Month-over-month revenue growth in percent.
    ///
    /// ## Rules
    /// ```text
    /// previous > 0              →  (current - previous) / previous × 100
    /// previous = 0, current > 0 →  100
    /// both 0                    →  0
    /// ```
    pub fn growth_percent(&self) -> f64 {
        let current = self.current.data.total_revenue.cents();
        let previous = self.previous.data.total_revenue.cents();

        if previous > 0 {
            (current - previous) as f64 / previous as f64 * 100.0
        } else if current > 0 {
            100.0
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DayTotal {
    pub date: String,
    #[serde(default)]
    pub count: i64,
    #[serde(with = "wire")]
    #[ts(type = "number")]
    pub total: Money,
}

/// `GET contabilidad/reports/quick-stats/week`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct WeeklySales {
    pub week_start: String,
    pub week_end: String,
    #[serde(default)]
    pub total_sales: i64,
    #[serde(with = "wire")]
    #[ts(type = "number")]
    pub total_amount: Money,
    #[serde(default)]
    pub daily_breakdown: Vec<DayTotal>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PaymentPreference {
    /// Raw label; older sales may carry labels outside [`PaymentMethod`].
    pub payment_method: String,
    #[serde(default)]
    pub count: i64,
    #[serde(with = "wire")]
    #[ts(type = "number")]
    pub total: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct HourlyActivity {
    pub hour: i64,
    #[serde(default)]
    pub sales_count: i64,
    #[serde(with = "wire")]
    #[ts(type = "number")]
    pub avg_amount: Money,
}

/// `GET contabilidad/reports/customers/insights`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CustomerInsights {
    #[serde(default)]
    pub payment_preferences: Vec<PaymentPreference>,
    #[serde(default)]
    pub hourly_activity: Vec<HourlyActivity>,
}

/// One row of `GET contabilidad/expenses/summary/category`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ExpenseCategoryTotal {
    pub category: String,
    #[serde(with = "wire")]
    #[ts(type = "number")]
    pub total_amount: Money,
}

// =============================================================================
// Display Helpers
// =============================================================================

/// Turns a backend label into a display label: `"efectivo"` → `"Efectivo"`,
/// `"gastos_varios"` → `"Gastos varios"`.
pub fn display_label(raw: &str) -> String {
    let spaced = raw.trim().replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn display_rows(breakdown: &BTreeMap<String, Money>) -> Vec<(String, Money)> {
    breakdown
        .iter()
        .map(|(label, amount)| (display_label(label), *amount))
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
