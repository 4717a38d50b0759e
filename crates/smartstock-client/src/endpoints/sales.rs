use smartstock_core::{CreateSalePayload, SaleResponse};
use tracing::{debug, info, warn};

use crate::client::SmartStockClient;
use crate::error::ClientResult;

const SALES: &str = "sales/";

impl SmartStockClient {
    /// `POST sales/`
    ///
    /// Returns the response as sent, including `success == false`; deciding
    /// what that means for the cart is the checkout's job.
    pub async fn create_sale(&self, payload: &CreateSalePayload) -> ClientResult<SaleResponse> {
        debug!(
            payment_method = %payload.payment_method,
            lines = payload.products.len(),
            "Submitting sale"
        );

        let response: SaleResponse = self.http.post(SALES, payload).await?;

        match (&response.sale, response.success) {
            (Some(sale), true) => {
                info!(sale_id = sale.id, total = %sale.total_amount, "Sale registered")
            }
            (None, true) => info!("Sale registered"),
            (_, false) => warn!(message = %response.message, "Sale not registered"),
        }
        Ok(response)
    }
}
