//! # Cash Closure Workflow
//!
//! Drives [`ClosureMachine`] with the backend's closure endpoints.
//!
//! ```text
//! load()                     (flag not raised)
//!   │  GET cash_closures/today-preview
//!   ├── ok ─────────────────────────────► PREVIEW
//!   ├── "Ya existe un cierre..." ───────► CLOSED
//!   │       └── GET cash_closures/date/{today} ──► totals attached (best effort)
//!   └── other failure ──────────────────► ERROR
//!
//! execute_close()            (PREVIEW with can_close, flag not raised)
//!   │  POST cash_closures/close-today {user_id}
//!   ├── ok ─────────────────────────────► CLOSED with the server's totals
//!   ├── "Ya existe un cierre..." ───────► CLOSED
//!   └── other failure ──────────────────► PREVIEW + message
//! ```

use std::sync::Arc;

use chrono::Local;
use smartstock_client::ClosureApi;
use smartstock_core::{ClosureMachine, ClosureState, ClosureStatus, DailyClosurePreview};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::error::{PosError, PosResult};
use crate::loading::LoadingFlag;
use crate::session::OperatorSession;

pub struct CashClosureWorkflow {
    api: Arc<dyn ClosureApi>,
    operator: OperatorSession,
    machine: Mutex<ClosureMachine>,
    loading: LoadingFlag,
}

impl CashClosureWorkflow {
    pub fn new(api: Arc<dyn ClosureApi>, operator: OperatorSession) -> Self {
        CashClosureWorkflow {
            api,
            operator,
            machine: Mutex::new(ClosureMachine::new()),
            loading: LoadingFlag::new(),
        }
    }

    pub fn operator(&self) -> &OperatorSession {
        &self.operator
    }

    /// Shared handle to the request flag.
    pub fn loading(&self) -> LoadingFlag {
        self.loading.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_loading()
    }

    pub async fn status(&self) -> ClosureStatus {
        self.machine.lock().await.status()
    }

    pub async fn state(&self) -> ClosureState {
        self.machine.lock().await.state().clone()
    }

    pub async fn preview(&self) -> Option<DailyClosurePreview> {
        self.machine.lock().await.preview().cloned()
    }

    pub async fn error(&self) -> Option<String> {
        self.machine.lock().await.error().map(str::to_string)
    }

    pub async fn can_close(&self) -> bool {
        self.machine.lock().await.can_close() && !self.loading.is_loading()
    }

    /// Fetches today's preview. Called once when the screen opens.
    ///
    /// Refused with [`PosError::Busy`] while any closure request is in
    /// flight, so a pending close is never reset to an open preview.
    pub async fn load(&self) -> PosResult<ClosureStatus> {
        let _guard = self.loading.try_begin().ok_or(PosError::Busy {
            operation: "Closure preview",
        })?;
        self.machine.lock().await.begin_load();
        debug!("Loading closure preview");

        let result = self.api.today_preview().await;
        let status = {
            let mut machine = self.machine.lock().await;
            match result {
                Ok(preview) => {
                    debug!(can_close = preview.can_close, "Closure preview ready");
                    machine.preview_loaded(preview);
                    machine.status()
                }
                Err(err) => {
                    let status = machine.preview_failed(err.user_message());
                    if status == ClosureStatus::Error {
                        warn!(error = %err, "Closure preview failed");
                    }
                    status
                }
            }
        };

        if status == ClosureStatus::Closed {
            info!("Day already closed");
            self.attach_existing_closure().await;
        }
        Ok(status)
    }

    /// Looks up today's stored closure. A failed lookup leaves the day
    /// closed without totals.
    async fn attach_existing_closure(&self) {
        let today = Local::now().date_naive().format("%Y-%m-%d").to_string();
        match self.api.closure_by_date(&today).await {
            Ok(result) => {
                debug!(closure_id = result.id, date = %today, "Existing closure found");
                self.machine
                    .lock()
                    .await
                    .attach_closed_summary(result.into_closed_view());
            }
            Err(err) => {
                warn!(date = %today, error = %err, "Existing closure lookup failed");
            }
        }
    }

    /// Closes the day on behalf of the session operator.
    pub async fn execute_close(&self) -> PosResult<ClosureStatus> {
        let _guard = self.loading.try_begin().ok_or(PosError::Busy {
            operation: "Cash closure",
        })?;

        {
            let mut machine = self.machine.lock().await;
            if let Err(err) = machine.begin_close() {
                warn!(error = %err, "Close refused");
                return Err(err.into());
            }
        }
        debug!(user_id = self.operator.user_id, "Closing day");

        let result = self.api.close_today(self.operator.user_id).await;
        let mut machine = self.machine.lock().await;
        match result {
            Ok(result) => {
                info!(
                    closure_id = result.id,
                    user_id = self.operator.user_id,
                    final_balance = %result.final_balance,
                    "Day closed"
                );
                machine.close_succeeded(result);
                Ok(machine.status())
            }
            Err(err) if err.is_already_closed() => {
                info!("Day was already closed");
                Ok(machine.close_failed(err.user_message()))
            }
            Err(err) => {
                warn!(error = %err, "Close failed");
                machine.close_failed(err.user_message());
                Err(err.into())
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use smartstock_client::{ClientError, ClientResult};
    use smartstock_core::{ClosureResult, Money};
    use std::collections::BTreeMap;
    use std::sync::Mutex as StdMutex;
    use tokio::sync::Notify;

    const ALREADY_CLOSED: &str = "Ya existe un cierre para esta fecha";

    fn preview(can_close: bool) -> DailyClosurePreview {
        DailyClosurePreview {
            closure_date: "2025-10-17".to_string(),
            can_close,
            total_sales: Money::from_cents(150000),
            cash_expenses: Money::from_cents(20000),
            final_balance: Money::from_cents(130000),
            sales_breakdown: BTreeMap::from([("efectivo".to_string(), Money::from_cents(150000))]),
            expenses_breakdown: BTreeMap::new(),
            other_expenses: Money::zero(),
            pending_invoices: 0,
            low_stock_products: 2,
        }
    }

    fn result(final_cents: i64) -> ClosureResult {
        ClosureResult {
            id: 12,
            closure_date: "2025-10-17".to_string(),
            user_id: 3,
            total_sales: Money::from_cents(150000),
            total_expenses: Money::from_cents(20000),
            final_balance: Money::from_cents(final_cents),
            sales_breakdown: BTreeMap::new(),
            expenses_breakdown: BTreeMap::new(),
            cash_expenses: Money::from_cents(20000),
            other_expenses: Money::zero(),
            pending_invoices: 0,
            low_stock_products: 2,
        }
    }

    fn refusal(status: u16, message: &str) -> ClientError {
        ClientError::Api {
            status,
            message: message.to_string(),
        }
    }

    #[derive(Default)]
    struct FakeClosures {
        preview: StdMutex<Option<ClientResult<DailyClosurePreview>>>,
        closes: StdMutex<Vec<ClientResult<ClosureResult>>>,
        by_date: StdMutex<Option<ClientResult<ClosureResult>>>,
        close_calls: StdMutex<Vec<i64>>,
    }

    impl FakeClosures {
        fn with_preview(preview: ClientResult<DailyClosurePreview>) -> Self {
            FakeClosures {
                preview: StdMutex::new(Some(preview)),
                ..Default::default()
            }
        }

        fn then_close(self, result: ClientResult<ClosureResult>) -> Self {
            self.closes.lock().unwrap().push(result);
            self
        }

        fn then_by_date(self, result: ClientResult<ClosureResult>) -> Self {
            *self.by_date.lock().unwrap() = Some(result);
            self
        }
    }

    #[async_trait]
    impl ClosureApi for FakeClosures {
        async fn today_preview(&self) -> ClientResult<DailyClosurePreview> {
            self.preview
                .lock()
                .unwrap()
                .take()
                .unwrap_or_else(|| Err(refusal(500, "no preview scripted")))
        }

        async fn close_today(&self, user_id: i64) -> ClientResult<ClosureResult> {
            self.close_calls.lock().unwrap().push(user_id);
            let mut closes = self.closes.lock().unwrap();
            if closes.is_empty() {
                Err(refusal(500, "no close scripted"))
            } else {
                closes.remove(0)
            }
        }

        async fn closure_by_date(&self, _date: &str) -> ClientResult<ClosureResult> {
            self.by_date
                .lock()
                .unwrap()
                .take()
                .unwrap_or_else(|| Err(refusal(404, "Cierre no encontrado")))
        }
    }

    /// Holds `close_today` open until released.
    struct BlockingClosures {
        entered: Notify,
        release: Notify,
        close_calls: StdMutex<usize>,
    }

    #[async_trait]
    impl ClosureApi for BlockingClosures {
        async fn today_preview(&self) -> ClientResult<DailyClosurePreview> {
            Ok(preview(true))
        }

        async fn close_today(&self, _user_id: i64) -> ClientResult<ClosureResult> {
            *self.close_calls.lock().unwrap() += 1;
            self.entered.notify_one();
            self.release.notified().await;
            Ok(result(130000))
        }

        async fn closure_by_date(&self, _date: &str) -> ClientResult<ClosureResult> {
            Err(refusal(404, "Cierre no encontrado"))
        }
    }

    fn workflow(api: FakeClosures) -> (Arc<FakeClosures>, CashClosureWorkflow) {
        let api = Arc::new(api);
        let flow = CashClosureWorkflow::new(api.clone(), OperatorSession::new(3, "Caja 1"));
        (api, flow)
    }

    #[tokio::test]
    async fn test_load_shows_preview() {
        let (_, flow) = workflow(FakeClosures::with_preview(Ok(preview(true))));
        assert_eq!(flow.load().await.unwrap(), ClosureStatus::Preview);
        assert!(flow.can_close().await);
        assert!(!flow.is_loading());
    }

    #[tokio::test]
    async fn test_load_error() {
        let (_, flow) = workflow(FakeClosures::with_preview(Err(refusal(500, "HTTP error 500"))));
        assert_eq!(flow.load().await.unwrap(), ClosureStatus::Error);
        assert_eq!(flow.error().await.as_deref(), Some("HTTP error 500"));
    }

    #[tokio::test]
    async fn test_load_already_closed_attaches_stored_totals() {
        let api = FakeClosures::with_preview(Err(refusal(400, ALREADY_CLOSED)))
            .then_by_date(Ok(result(130000)));
        let (_, flow) = workflow(api);

        assert_eq!(flow.load().await.unwrap(), ClosureStatus::Closed);
        let summary = flow.preview().await.unwrap();
        assert_eq!(summary.final_balance, Money::from_cents(130000));
        assert!(!summary.can_close);
    }

    #[tokio::test]
    async fn test_load_already_closed_without_stored_totals() {
        let (_, flow) = workflow(FakeClosures::with_preview(Err(refusal(400, ALREADY_CLOSED))));
        assert_eq!(flow.load().await.unwrap(), ClosureStatus::Closed);
        assert!(flow.preview().await.is_none());
        assert!(flow.error().await.is_none());
    }

    #[tokio::test]
    async fn test_close_uses_operator_and_server_totals() {
        let api = FakeClosures::with_preview(Ok(preview(true))).then_close(Ok(result(129950)));
        let (api, flow) = workflow(api);
        flow.load().await.unwrap();

        assert_eq!(flow.execute_close().await.unwrap(), ClosureStatus::Closed);
        assert_eq!(*api.close_calls.lock().unwrap(), vec![3]);

        let summary = flow.preview().await.unwrap();
        assert_eq!(summary.final_balance, Money::from_cents(129950));
        assert!(!summary.can_close);

        let err = flow.execute_close().await.unwrap_err();
        assert!(matches!(err, PosError::Core(_)));
        assert_eq!(api.close_calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_close_refused_when_server_disallows() {
        let (api, flow) = workflow(FakeClosures::with_preview(Ok(preview(false))));
        flow.load().await.unwrap();

        assert!(flow.execute_close().await.is_err());
        assert!(api.close_calls.lock().unwrap().is_empty());
        assert_eq!(flow.status().await, ClosureStatus::Preview);
    }

    #[tokio::test]
    async fn test_close_failure_returns_to_preview() {
        let api = FakeClosures::with_preview(Ok(preview(true)))
            .then_close(Err(refusal(403, "No tienes permisos para cerrar caja")))
            .then_close(Ok(result(130000)));
        let (_, flow) = workflow(api);
        flow.load().await.unwrap();

        let err = flow.execute_close().await.unwrap_err();
        assert_eq!(err.user_message(), "No tienes permisos para cerrar caja");
        assert_eq!(flow.status().await, ClosureStatus::Preview);
        assert!(flow.can_close().await);
        assert_eq!(
            flow.error().await.as_deref(),
            Some("No tienes permisos para cerrar caja")
        );

        assert_eq!(flow.execute_close().await.unwrap(), ClosureStatus::Closed);
    }

    #[tokio::test]
    async fn test_close_already_closed_is_terminal() {
        let api = FakeClosures::with_preview(Ok(preview(true)))
            .then_close(Err(refusal(400, ALREADY_CLOSED)));
        let (_, flow) = workflow(api);
        flow.load().await.unwrap();

        assert_eq!(flow.execute_close().await.unwrap(), ClosureStatus::Closed);
        assert!(!flow.can_close().await);
    }

    #[tokio::test]
    async fn test_close_refused_while_loading() {
        let (api, flow) = workflow(FakeClosures::with_preview(Ok(preview(true))));
        flow.load().await.unwrap();

        let _held = flow.loading().begin();
        let err = flow.execute_close().await.unwrap_err();
        assert!(matches!(err, PosError::Busy { .. }));
        assert!(api.close_calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_load_refused_while_close_in_flight() {
        let api = Arc::new(BlockingClosures {
            entered: Notify::new(),
            release: Notify::new(),
            close_calls: StdMutex::new(0),
        });
        let flow = Arc::new(CashClosureWorkflow::new(
            api.clone(),
            OperatorSession::new(3, "Caja 1"),
        ));
        assert_eq!(flow.load().await.unwrap(), ClosureStatus::Preview);

        let first = tokio::spawn({
            let flow = Arc::clone(&flow);
            async move { flow.execute_close().await }
        });
        api.entered.notified().await;

        let err = flow.load().await.unwrap_err();
        assert!(matches!(err, PosError::Busy { .. }));
        assert!(flow.is_loading());
        assert_eq!(flow.status().await, ClosureStatus::Loading);
        assert!(matches!(
            flow.execute_close().await.unwrap_err(),
            PosError::Busy { .. }
        ));

        api.release.notify_one();
        assert_eq!(first.await.unwrap().unwrap(), ClosureStatus::Closed);
        assert_eq!(*api.close_calls.lock().unwrap(), 1);
        assert!(!flow.is_loading());
    }
}
