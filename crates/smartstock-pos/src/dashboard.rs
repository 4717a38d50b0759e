//! # Dashboard
//!
//! Two independent panels:
//!
//! ```text
//! ┌──────────────────────────────┐   ┌──────────────────────────────────────┐
//! │ Stats (serial, all-or-none)  │   │ Sales charts (concurrent, settled)   │
//! │  1. daily report             │   │  weekly ─┐                           │
//! │  2. monthly comparison       │   │  insights├─ tokio::join!             │
//! │  one failure fails the panel │   │  expenses┘  each keeps its own error │
//! └──────────────────────────────┘   └──────────────────────────────────────┘
//! ```

use std::sync::Arc;

use serde::Serialize;
use smartstock_client::{ClientResult, ReportsApi};
use smartstock_core::{
    CustomerInsights, DailyReport, ExpenseCategoryTotal, MonthlyComparison, WeeklySales,
};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::error::PosResult;
use crate::loading::LoadingFlag;

/// Top stats panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats {
    pub daily: DailyReport,
    pub monthly: MonthlyComparison,
    pub growth_percent: f64,
}

/// One chart's data, or the message it failed with.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "lowercase")]
pub enum Chart<T> {
    Ready(T),
    Failed(String),
}

impl<T> Chart<T> {
    fn settle(result: ClientResult<T>, chart: &'static str) -> Self {
        match result {
            Ok(data) => Chart::Ready(data),
            Err(err) => {
                warn!(chart, error = %err, "Chart failed to load");
                Chart::Failed(err.user_message())
            }
        }
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Chart::Ready(data) => Some(data),
            Chart::Failed(_) => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Chart::Ready(_) => None,
            Chart::Failed(message) => Some(message),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesCharts {
    pub weekly: Chart<WeeklySales>,
    pub insights: Chart<CustomerInsights>,
    pub expenses: Chart<Vec<ExpenseCategoryTotal>>,
}

/// Everything the dashboard screen renders.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardView {
    pub stats: Option<DashboardStats>,
    pub stats_error: Option<String>,
    pub charts: Option<SalesCharts>,
    pub stats_loading: bool,
    pub charts_loading: bool,
}

#[derive(Debug, Default)]
struct Panels {
    stats: Option<DashboardStats>,
    stats_error: Option<String>,
    charts: Option<SalesCharts>,
}

pub struct Dashboard {
    api: Arc<dyn ReportsApi>,
    panels: Mutex<Panels>,
    stats_loading: LoadingFlag,
    charts_loading: LoadingFlag,
}

impl Dashboard {
    pub fn new(api: Arc<dyn ReportsApi>) -> Self {
        Dashboard {
            api,
            panels: Mutex::new(Panels::default()),
            stats_loading: LoadingFlag::new(),
            charts_loading: LoadingFlag::new(),
        }
    }

    /// Loads both panels. Called once when the screen opens.
    ///
    /// Each panel records its own outcome, failures included, in the view.
    pub async fn load(&self) -> DashboardView {
        let (_stats, _charts) = tokio::join!(self.load_stats(), self.load_charts());
        self.view().await
    }

    /// Daily report, then monthly comparison.
    pub async fn load_stats(&self) -> PosResult<DashboardStats> {
        let _guard = self.stats_loading.begin();
        debug!("Loading dashboard stats");

        let result = self.fetch_stats().await;
        let mut panels = self.panels.lock().await;
        match &result {
            Ok(stats) => {
                panels.stats = Some(stats.clone());
                panels.stats_error = None;
            }
            Err(err) => {
                warn!(error = %err, "Dashboard stats failed");
                panels.stats_error = Some(err.user_message());
            }
        }
        result
    }

    async fn fetch_stats(&self) -> PosResult<DashboardStats> {
        let daily = self.api.daily_report().await?;
        let monthly = self.api.monthly_comparison().await?;
        let growth_percent = monthly.growth_percent();
        debug!(
            date = %daily.date,
            sales = %daily.sales.total_amount,
            growth_percent,
            "Dashboard stats ready"
        );
        Ok(DashboardStats {
            daily,
            monthly,
            growth_percent,
        })
    }

    /// Weekly sales, customer insights and expense summary, concurrently.
    pub async fn load_charts(&self) -> SalesCharts {
        let _guard = self.charts_loading.begin();
        debug!("Loading sales charts");

        let (weekly, insights, expenses) = tokio::join!(
            self.api.weekly_sales(),
            self.api.customer_insights(),
            self.api.expense_summary(),
        );
        let charts = SalesCharts {
            weekly: Chart::settle(weekly, "weekly"),
            insights: Chart::settle(insights, "insights"),
            expenses: Chart::settle(expenses, "expenses"),
        };

        self.panels.lock().await.charts = Some(charts.clone());
        charts
    }

    pub async fn view(&self) -> DashboardView {
        let panels = self.panels.lock().await;
        DashboardView {
            stats: panels.stats.clone(),
            stats_error: panels.stats_error.clone(),
            charts: panels.charts.clone(),
            stats_loading: self.stats_loading.is_loading(),
            charts_loading: self.charts_loading.is_loading(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
