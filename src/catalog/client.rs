//! HTTP access to the product backend.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use tracing::debug;

use crate::catalog::model::{Product, ProductPayload};

const PRODUCTS_PATH: &str = "/api/products";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The backend answered with a non-success status.
    #[error("{status} {status_text}{}", body_suffix(.body))]
    RequestFailed {
        status: u16,
        status_text: String,
        body: Option<String>,
    },
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

fn body_suffix(body: &Option<String>) -> String {
    body.as_deref()
        .map(|body| format!(" - {body}"))
        .unwrap_or_default()
}

/// The four product operations the catalog needs.
#[async_trait]
pub trait ProductApi: Send + Sync {
    async fn list(&self) -> Result<Vec<Product>, ApiError>;

    async fn create(&self, payload: &ProductPayload) -> Result<(), ApiError>;

    async fn update(&self, id: i64, payload: &ProductPayload) -> Result<(), ApiError>;

    async fn delete(&self, id: i64) -> Result<(), ApiError>;
}

/// `ProductApi` over REST with JSON bodies.
///
/// Cloning shares the underlying connection pool.
#[derive(Clone)]
pub struct HttpProductApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpProductApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}{path}", self.base_url))
            .header(CONTENT_TYPE, "application/json")
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        debug!("{} {}", status.as_u16(), response.url());

        if status.is_success() {
            return Ok(response);
        }

        // Any body is accepted here: empty, plain text or JSON.
        let body = response.text().await.ok().filter(|text| !text.is_empty());
        Err(ApiError::RequestFailed {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            body,
        })
    }
}

#[async_trait]
impl ProductApi for HttpProductApi {
    async fn list(&self) -> Result<Vec<Product>, ApiError> {
        let response = self.send(self.request(Method::GET, PRODUCTS_PATH)).await?;
        if response.status() == StatusCode::NO_CONTENT {
            return Ok(Vec::new());
        }

        let bytes = response.bytes().await?;
        let value: serde_json::Value = serde_json::from_slice(&bytes)?;
        if value.is_array() {
            Ok(serde_json::from_value(value)?)
        } else {
            debug!("List response is not an array, treating as empty");
            Ok(Vec::new())
        }
    }

    async fn create(&self, payload: &ProductPayload) -> Result<(), ApiError> {
        self.send(self.request(Method::POST, PRODUCTS_PATH).json(payload))
            .await?;
        Ok(())
    }

    async fn update(&self, id: i64, payload: &ProductPayload) -> Result<(), ApiError> {
        let path = format!("{PRODUCTS_PATH}/{id}");
        self.send(self.request(Method::PUT, &path).json(payload))
            .await?;
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), ApiError> {
        let path = format!("{PRODUCTS_PATH}/{id}");
        self.send(self.request(Method::DELETE, &path)).await?;
        Ok(())
    }
}
