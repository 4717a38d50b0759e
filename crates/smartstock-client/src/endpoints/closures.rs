use smartstock_core::validation::{validate_date, validate_user_id};
use smartstock_core::{CloseDayRequest, ClosureResult, DailyClosurePreview};
use tracing::{debug, info};

use crate::client::SmartStockClient;
use crate::error::ClientResult;

const TODAY_PREVIEW: &str = "contabilidad/cash_closures/today-preview";
const CLOSE_TODAY: &str = "contabilidad/cash_closures/close-today";
const BY_DATE: &str = "contabilidad/cash_closures/date/";

impl SmartStockClient {
    /// `GET contabilidad/cash_closures/today-preview`
    ///
    /// Fails with the "already closed" message when today has a closure.
    pub async fn today_preview(&self) -> ClientResult<DailyClosurePreview> {
        let preview: DailyClosurePreview = self.http.get(TODAY_PREVIEW).await?;
        debug!(
            closure_date = %preview.closure_date,
            can_close = preview.can_close,
            final_balance = %preview.final_balance,
            "Closure preview loaded"
        );
        Ok(preview)
    }

    /// `POST contabilidad/cash_closures/close-today` with `{user_id}`.
    pub async fn close_today(&self, user_id: i64) -> ClientResult<ClosureResult> {
        validate_user_id(user_id)?;
        let result: ClosureResult = self
            .http
            .post(CLOSE_TODAY, &CloseDayRequest { user_id })
            .await?;
        info!(
            closure_id = result.id,
            user_id,
            final_balance = %result.final_balance,
            "Day closed"
        );
        Ok(result)
    }

    /// `GET contabilidad/cash_closures/date/{YYYY-MM-DD}`
    pub async fn closure_by_date(&self, date: &str) -> ClientResult<ClosureResult> {
        validate_date("date", date)?;
        self.http.get(&format!("{}{}", BY_DATE, date)).await
    }
}
