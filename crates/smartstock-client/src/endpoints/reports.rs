use smartstock_core::{
    CustomerInsights, DailyReport, ExpenseCategoryTotal, MonthlyComparison, WeeklySales,
};
use tracing::debug;

use crate::client::SmartStockClient;
use crate::error::ClientResult;

const DAILY: &str = "contabilidad/reports/daily";
const MONTHLY_COMPARISON: &str = "contabilidad/reports/comparison?type=monthly";
const WEEK_QUICK_STATS: &str = "contabilidad/reports/quick-stats/week";
const CUSTOMER_INSIGHTS: &str = "contabilidad/reports/customers/insights";
const EXPENSES_BY_CATEGORY: &str = "contabilidad/expenses/summary/category";

impl SmartStockClient {
    /// `GET contabilidad/reports/daily`
    pub async fn daily_report(&self) -> ClientResult<DailyReport> {
        let report: DailyReport = self.http.get(DAILY).await?;
        debug!(date = %report.date, sales = %report.sales.total_amount, "Daily report loaded");
        Ok(report)
    }

    /// `GET contabilidad/reports/comparison?type=monthly`
    pub async fn monthly_comparison(&self) -> ClientResult<MonthlyComparison> {
        self.http.get(MONTHLY_COMPARISON).await
    }

    /// `GET contabilidad/reports/quick-stats/week`
    pub async fn weekly_sales(&self) -> ClientResult<WeeklySales> {
        self.http.get(WEEK_QUICK_STATS).await
    }

    /// `GET contabilidad/reports/customers/insights`
    pub async fn customer_insights(&self) -> ClientResult<CustomerInsights> {
        self.http.get(CUSTOMER_INSIGHTS).await
    }

    /// `GET contabilidad/expenses/summary/category`
    pub async fn expense_summary(&self) -> ClientResult<Vec<ExpenseCategoryTotal>> {
        let rows: Option<Vec<ExpenseCategoryTotal>> = self.http.get(EXPENSES_BY_CATEGORY).await?;
        Ok(rows.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use crate::client::test_support::client_for;
    use serde_json::json;
    use smartstock_core::Money;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_daily_report() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/contabilidad/reports/daily"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "date": "2025-10-17",
                "sales": {"total_count": 14, "total_amount": "3250.75"},
                "expenses": {"cash_expenses": "300.00", "other_expenses": 120},
                "cash_balance": 2950.75
            })))
            .mount(&server)
            .await;

        let report = client_for(&server).daily_report().await.unwrap();
        assert_eq!(report.sales.total_count, 14);
        assert_eq!(report.sales.total_amount, Money::from_cents(325075));
        assert_eq!(report.expenses.other_expenses, Money::from_cents(12000));
        assert_eq!(report.cash_balance, Money::from_cents(295075));
    }

    #[tokio::test]
    async fn test_monthly_comparison_sends_type() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/contabilidad/reports/comparison"))
            .and(query_param("type", "monthly"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "type": "monthly",
                "current": {"period": "2025-10", "data": {"total_revenue": "15000.00"}},
                "previous": {"period": "2025-09", "data": {"total_revenue": 10000}}
            })))
            .mount(&server)
            .await;

        let comparison = client_for(&server).monthly_comparison().await.unwrap();
        assert_eq!(comparison.comparison_type, "monthly");
        assert_eq!(comparison.growth_percent(), 50.0);
    }

    #[tokio::test]
    async fn test_weekly_and_insights_and_summary() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/contabilidad/reports/quick-stats/week"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "week_start": "2025-10-13",
                "week_end": "2025-10-19",
                "total_sales": 40,
                "total_amount": "9100.00",
                "daily_breakdown": [
                    {"date": "2025-10-13", "count": 5, "total": "1100.00"},
                    {"date": "2025-10-14", "count": 7, "total": 1500}
                ]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/contabilidad/reports/customers/insights"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "payment_preferences": [{"payment_method": "efectivo", "count": 30, "total": "6000.00"}],
                "hourly_activity": [{"hour": 10, "sales_count": 6, "avg_amount": 215.5}]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/contabilidad/expenses/summary/category"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"category": "limpieza", "total_amount": "450.00"}
            ])))
            .mount(&server)
            .await;

        let client = client_for(&server);

        let weekly = client.weekly_sales().await.unwrap();
        assert_eq!(weekly.daily_breakdown.len(), 2);
        assert_eq!(weekly.daily_breakdown[1].total, Money::from_cents(150000));

        let insights = client.customer_insights().await.unwrap();
        assert_eq!(insights.hourly_activity[0].avg_amount, Money::from_cents(21550));

        let summary = client.expense_summary().await.unwrap();
        assert_eq!(summary[0].total_amount, Money::from_cents(45000));
    }
}
