//! # API Traits
//!
//! The seam between workflows and HTTP.
//!
//! ```text
//! ┌──────────────────────┐          ┌──────────────────────────────┐
//! │  smartstock-pos      │  uses    │  CatalogApi  SalesApi        │
//! │  Checkout            │─────────►│  ClosureApi  ReportsApi      │
//! │  CashClosureWorkflow │          └──────────────┬───────────────┘
//! │  Dashboard           │                         │ implemented by
//! └──────────────────────┘            ┌────────────┴─────────────┐
//!                                     │                          │
//!                              SmartStockClient          in-memory fakes
//!                              (production)              (workflow tests)
//! ```

use async_trait::async_trait;
use smartstock_core::{
    ClosureResult, CreateSalePayload, CustomerInsights, DailyClosurePreview, DailyReport,
    ExpenseCategoryTotal, MonthlyComparison, Product, SaleResponse, WeeklySales,
};

use crate::client::SmartStockClient;
use crate::error::ClientResult;

/// Product list for the scanner.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn list_products(&self) -> ClientResult<Vec<Product>>;
}

/// Sale registration.
#[async_trait]
pub trait SalesApi: Send + Sync {
    async fn create_sale(&self, payload: &CreateSalePayload) -> ClientResult<SaleResponse>;
}

/// Daily cash closure.
#[async_trait]
pub trait ClosureApi: Send + Sync {
    async fn today_preview(&self) -> ClientResult<DailyClosurePreview>;
    async fn close_today(&self, user_id: i64) -> ClientResult<ClosureResult>;
    async fn closure_by_date(&self, date: &str) -> ClientResult<ClosureResult>;
}

/// Dashboard reports.
#[async_trait]
pub trait ReportsApi: Send + Sync {
    async fn daily_report(&self) -> ClientResult<DailyReport>;
    async fn monthly_comparison(&self) -> ClientResult<MonthlyComparison>;
    async fn weekly_sales(&self) -> ClientResult<WeeklySales>;
    async fn customer_insights(&self) -> ClientResult<CustomerInsights>;
    async fn expense_summary(&self) -> ClientResult<Vec<ExpenseCategoryTotal>>;
}

// =============================================================================
// SmartStockClient implementations
// =============================================================================

#[async_trait]
impl CatalogApi for SmartStockClient {
    async fn list_products(&self) -> ClientResult<Vec<Product>> {
        SmartStockClient::list_products(self).await
    }
}

#[async_trait]
impl SalesApi for SmartStockClient {
    async fn create_sale(&self, payload: &CreateSalePayload) -> ClientResult<SaleResponse> {
        SmartStockClient::create_sale(self, payload).await
    }
}

#[async_trait]
impl ClosureApi for SmartStockClient {
    async fn today_preview(&self) -> ClientResult<DailyClosurePreview> {
        SmartStockClient::today_preview(self).await
    }

    async fn close_today(&self, user_id: i64) -> ClientResult<ClosureResult> {
        SmartStockClient::close_today(self, user_id).await
    }

    async fn closure_by_date(&self, date: &str) -> ClientResult<ClosureResult> {
        SmartStockClient::closure_by_date(self, date).await
    }
}

#[async_trait]
impl ReportsApi for SmartStockClient {
    async fn daily_report(&self) -> ClientResult<DailyReport> {
        SmartStockClient::daily_report(self).await
    }

    async fn monthly_comparison(&self) -> ClientResult<MonthlyComparison> {
        SmartStockClient::monthly_comparison(self).await
    }

    async fn weekly_sales(&self) -> ClientResult<WeeklySales> {
        SmartStockClient::weekly_sales(self).await
    }

    async fn customer_insights(&self) -> ClientResult<CustomerInsights> {
        SmartStockClient::customer_insights(self).await
    }

    async fn expense_summary(&self) -> ClientResult<Vec<ExpenseCategoryTotal>> {
        SmartStockClient::expense_summary(self).await
    }
}
