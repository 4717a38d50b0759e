use smartstock_core::validation::validate_provider;
use smartstock_core::{CreateProvider, Provider};
use tracing::{debug, info};

use crate::client::SmartStockClient;
use crate::error::ClientResult;

const PROVIDERS: &str = "proveedores/";

impl SmartStockClient {
    /// `GET proveedores/`
    pub async fn list_providers(&self) -> ClientResult<Vec<Provider>> {
        let providers: Option<Vec<Provider>> = self.http.get(PROVIDERS).await?;
        let providers = providers.unwrap_or_default();
        debug!(count = providers.len(), "Providers loaded");
        Ok(providers)
    }

    /// `POST proveedores/`
    pub async fn create_provider(&self, provider: &CreateProvider) -> ClientResult<Provider> {
        validate_provider(provider)?;
        let created: Provider = self.http.post(PROVIDERS, provider).await?;
        info!(provider_id = created.id, name = %created.name, "Provider created");
        Ok(created)
    }

    /// `PUT proveedores/{id}`
    pub async fn update_provider(
        &self,
        id: i64,
        provider: &CreateProvider,
    ) -> ClientResult<Provider> {
        validate_provider(provider)?;
        let updated = self
            .http
            .put(&format!("{}{}", PROVIDERS, id), provider)
            .await?;
        info!(provider_id = id, "Provider updated");
        Ok(updated)
    }

    /// `DELETE proveedores/{id}`
    pub async fn delete_provider(&self, id: i64) -> ClientResult<()> {
        self.http.delete(&format!("{}{}", PROVIDERS, id)).await?;
        info!(provider_id = id, "Provider deleted");
        Ok(())
    }
}
