//! Catalog API client.
//!
//! A thin wrapper over [`reqwest`] used by the `catalog-client` binary and
//! the end-to-end tests. Every call returns the status and the decoded body
//! whatever the status is; interpreting `4xx` answers is left to the caller.

use reqwest::{Client, Method, RequestBuilder};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur when talking to the catalog API.
#[derive(Debug, Error)]
pub enum ClientError {
    /// An HTTP transport error occurred.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Status and body of one API call.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    /// `Null` for an empty body, a string for a body that is not JSON.
    pub body: Value,
}

/// HTTP client for the catalog API.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    base: String,
    http: Client,
}

impl CatalogClient {
    /// Create a client for the API rooted at `endpoint`, e.g.
    /// `"http://localhost:8000/api/"`.
    #[must_use]
    pub fn new(endpoint: &str) -> Self {
        Self {
            base: endpoint.trim_end_matches('/').to_owned(),
            http: Client::new(),
        }
    }

    /// `GET /api/`
    ///
    /// # Errors
    ///
    /// Returns an error on HTTP failure.
    pub async fn list(&self) -> Result<ApiResponse, ClientError> {
        self.send(self.request(Method::GET, "/")).await
    }

    /// `GET /api/{id}/`
    ///
    /// # Errors
    ///
    /// Returns an error on HTTP failure.
    pub async fn get(&self, id: u64) -> Result<ApiResponse, ClientError> {
        self.send(self.request(Method::GET, &format!("/{id}/"))).await
    }

    /// `POST /api/`
    ///
    /// # Errors
    ///
    /// Returns an error on HTTP failure.
    pub async fn create(&self, product: &Value) -> Result<ApiResponse, ClientError> {
        self.send(self.request(Method::POST, "/").json(product)).await
    }

    /// `PUT /api/{id}/update/` when `full`, `PATCH` otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error on HTTP failure.
    pub async fn update(
        &self,
        id: u64,
        changes: &Value,
        full: bool,
    ) -> Result<ApiResponse, ClientError> {
        let method = if full { Method::PUT } else { Method::PATCH };

        self.send(self.request(method, &format!("/{id}/update/")).json(changes))
            .await
    }

    /// `DELETE /api/{id}/delete/`
    ///
    /// # Errors
    ///
    /// Returns an error on HTTP failure.
    pub async fn delete(&self, id: u64) -> Result<ApiResponse, ClientError> {
        self.send(self.request(Method::DELETE, &format!("/{id}/delete/")))
            .await
    }

    /// `GET /api/echo/` with query `params` and an optional JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error on HTTP failure.
    pub async fn echo(
        &self,
        params: &[(String, String)],
        body: Option<&Value>,
    ) -> Result<ApiResponse, ClientError> {
        let mut request = self.request(Method::GET, "/echo/").query(params);
        if let Some(body) = body {
            request = request.json(body);
        }

        self.send(request).await
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, format!("{}{path}", self.base))
    }

    async fn send(&self, request: RequestBuilder) -> Result<ApiResponse, ClientError> {
        let response = request.send().await?;
        let status = response.status().as_u16();
        let text = response.text().await?;

        debug!(status, bytes = text.len(), "catalog response");

        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).unwrap_or(Value::String(text))
        };

        Ok(ApiResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_trailing_slashes_are_trimmed() {
        assert_eq!(CatalogClient::new("http://localhost:8000/api/").base, "http://localhost:8000/api");
        assert_eq!(CatalogClient::new("http://localhost:8000/api").base, "http://localhost:8000/api");
    }
}
