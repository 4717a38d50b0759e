//! The backend client handed to workflows.
//!
//! Endpoint methods live in [`crate::endpoints`], one module per backend
//! resource, each adding an `impl SmartStockClient` block.

use crate::config::ClientConfig;
use crate::error::ClientResult;
use crate::http::HttpClient;

/// Client for the SmartStock REST API. Cheap to clone.
#[derive(Debug, Clone)]
pub struct SmartStockClient {
    pub(crate) http: HttpClient,
}

impl SmartStockClient {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        Ok(Self {
            http: HttpClient::new(config)?,
        })
    }

    pub fn base_url(&self) -> &str {
        self.http.base_url()
    }

    /// The underlying JSON helper, for endpoints not wrapped here.
    pub fn http(&self) -> &HttpClient {
        &self.http
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use wiremock::MockServer;

    /// Client pointed at `{mock}/api`, mirroring the real base URL shape.
    pub fn client_for(server: &MockServer) -> SmartStockClient {
        SmartStockClient::new(&ClientConfig::with_base_url(format!("{}/api", server.uri())))
            .expect("client builds")
    }
}
