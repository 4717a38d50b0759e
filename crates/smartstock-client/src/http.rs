//! Typed JSON helper shared by every endpoint module.
//!
//! ## Error Body Convention
//! The backend is not consistent about where it puts a refusal message:
//! ```text
//! {"error": "Ya existe un cierre para esta fecha"}   cash closures, sales
//! {"message": "Producto no encontrado"}              products, providers
//! <html>...</html> / empty                           proxies, crashes
//! ```
//! [`HttpClient`] reads `error` first, then `message`, and falls back to
//! `HTTP error {status}`.

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};
use url::Url;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// HTTP client bound to one backend base URL.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
}

impl HttpClient {
    /// Builds a client with the configured timeout.
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder().timeout(config.timeout()).build()?;

        Ok(Self {
            client,
            base_url: config.base_url().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL for an endpoint path such as `productos/` or `sales/`.
    pub fn url(&self, path: &str) -> ClientResult<Url> {
        Ok(Url::parse(&format!(
            "{}/{}",
            self.base_url,
            path.trim_start_matches('/')
        ))?)
    }

    fn request(&self, method: Method, path: &str) -> ClientResult<RequestBuilder> {
        let url = self.url(path)?;
        debug!(%method, %url, "Sending request");
        Ok(self
            .client
            .request(method, url)
            .header(reqwest::header::ACCEPT, "application/json"))
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let response = self.request(Method::GET, path)?.send().await?;
        Self::handle_response(response).await
    }

    /// Make a POST request with JSON body
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let response = self.request(Method::POST, path)?.json(body).send().await?;
        Self::handle_response(response).await
    }

    /// Make a PUT request with JSON body
    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let response = self.request(Method::PUT, path)?.json(body).send().await?;
        Self::handle_response(response).await
    }

    /// Make a DELETE request. Any 2xx counts as done; the body is ignored.
    pub async fn delete(&self, path: &str) -> ClientResult<()> {
        let response = self.request(Method::DELETE, path)?.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(Self::refusal(status, &body));
        }
        Ok(())
    }

    /// Handle the HTTP response
    async fn handle_response<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(Self::refusal(status, &body));
        }

        serde_json::from_str(&body).map_err(|e| {
            warn!(status = status.as_u16(), error = %e, "Response body did not match");
            ClientError::InvalidResponse(e.to_string())
        })
    }

    fn refusal(status: StatusCode, body: &str) -> ClientError {
        let message = error_message(status, body);
        warn!(status = status.as_u16(), message = %message, "Request refused by server");
        ClientError::Api {
            status: status.as_u16(),
            message,
        }
    }
}

/// Picks the operator-facing message out of an error body.
fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            ["error", "message"].iter().find_map(|key| {
                value
                    .get(*key)
                    .and_then(|m| m.as_str())
                    .filter(|m| !m.trim().is_empty())
                    .map(str::to_string)
            })
        })
        .unwrap_or_else(|| format!("HTTP error {}", status.as_u16()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn client_for(server: &MockServer) -> HttpClient {
        HttpClient::new(&ClientConfig::with_base_url(format!("{}/api", server.uri()))).unwrap()
    }

    #[test]
    fn test_error_message_precedence() {
        let status = StatusCode::BAD_REQUEST;
        assert_eq!(
            error_message(status, r#"{"error": "boom", "message": "ignored"}"#),
            "boom"
        );
        assert_eq!(error_message(status, r#"{"message": "nope"}"#), "nope");
        assert_eq!(
            error_message(status, r#"{"error": "", "message": "fallback"}"#),
            "fallback"
        );
        assert_eq!(error_message(status, "<html>"), "HTTP error 400");
        assert_eq!(error_message(StatusCode::BAD_GATEWAY, ""), "HTTP error 502");
    }

    #[test]
    fn test_url_joining() {
        let client =
            HttpClient::new(&ClientConfig::with_base_url("http://localhost:5000/api/")).unwrap();
        assert_eq!(
            client.url("productos/").unwrap().as_str(),
            "http://localhost:5000/api/productos/"
        );
        assert_eq!(
            client
                .url("/contabilidad/reports/comparison?type=monthly")
                .unwrap()
                .as_str(),
            "http://localhost:5000/api/contabilidad/reports/comparison?type=monthly"
        );
    }

    #[tokio::test]
    async fn test_get_decodes_json() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/ping"))
            .and(header("accept", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let body: serde_json::Value = client.get("ping").await.unwrap();
        assert_eq!(body["ok"], json!(true));
    }

    #[tokio::test]
    async fn test_non_success_becomes_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/things"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({"error": "forbidden"})))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client
            .post::<serde_json::Value, _>("things", &json!({}))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ClientError::Api { status: 403, ref message } if message == "forbidden"
        ));
    }

    #[tokio::test]
    async fn test_unexpected_body_is_invalid_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/list"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.get::<Vec<i64>>("list").await.unwrap_err();
        assert!(matches!(err, ClientError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_http_error() {
        let client =
            HttpClient::new(&ClientConfig::with_base_url("http://127.0.0.1:9/api")).unwrap();
        let err = client.get::<serde_json::Value>("ping").await.unwrap_err();
        assert!(matches!(err, ClientError::Http(_)));
        assert_eq!(err.user_message(), "Could not reach the SmartStock server");
    }
}
