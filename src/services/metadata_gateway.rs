//! src/services/metadata_gateway.rs
//!
//! MetadataGateway: the only place that talks to the `/metadata` resource.
//! Every operation is one HTTP round trip with no retry. Failures are logged
//! with full detail here and leave this module as a single [`GatewayError`].

use crate::models::metadata::{CreateMetadataRequest, MetadataRecord, MetadataUpdate};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde_json::json;
use std::{future::Future, time::Duration};
use thiserror::Error;
use tracing::{debug, error};

/// Text shown to users for any backend failure.
pub const GENERIC_FAILURE_MESSAGE: &str = "An error occurred. Please try again.";

/// Collapsed failure of a gateway call. Only the operation name survives.
#[derive(Debug, Error)]
#[error("An error occurred. Please try again.")]
pub struct GatewayError {
    pub operation: &'static str,
}

pub type GatewayResult<T> = Result<T, GatewayError>;

/// Detailed failure, kept inside this module for logging.
#[derive(Debug, Error)]
enum TransportError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("{url} returned {status}: {body}")]
    Status {
        url: String,
        status: StatusCode,
        body: String,
    },
}

/// Logical operations on the metadata resource.
pub trait MetadataApi: Send + Sync {
    /// `GET /active`
    fn list_active(&self) -> impl Future<Output = GatewayResult<Vec<MetadataRecord>>> + Send;

    /// `GET /inactive`
    fn list_inactive(&self) -> impl Future<Output = GatewayResult<Vec<MetadataRecord>>> + Send;

    /// `POST /analyze`. Any 2xx counts as accepted; the body is not read.
    fn create(
        &self,
        request: &CreateMetadataRequest,
    ) -> impl Future<Output = GatewayResult<()>> + Send;

    /// `PUT /{id}` with the full record.
    fn update(
        &self,
        update: &MetadataUpdate,
    ) -> impl Future<Output = GatewayResult<MetadataRecord>> + Send;

    /// `PUT /active/{id}` with an empty body. `None` when the response body is
    /// empty or not a record.
    fn activate(
        &self,
        id: i64,
    ) -> impl Future<Output = GatewayResult<Option<MetadataRecord>>> + Send;

    /// `DELETE /inactive/{id}`. Same body handling as `activate`.
    fn deactivate(
        &self,
        id: i64,
    ) -> impl Future<Output = GatewayResult<Option<MetadataRecord>>> + Send;
}

/// [`MetadataApi`] over HTTP.
#[derive(Clone, Debug)]
pub struct HttpMetadataGateway {
    client: Client,

    /// Resource root without a trailing slash, e.g. `http://localhost:8080/metadata`.
    base_url: String,
}

impl HttpMetadataGateway {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Send `request` and decode a JSON body, collapsing any failure.
    async fn execute<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        request: RequestBuilder,
    ) -> GatewayResult<T> {
        match send_json(request).await {
            Ok(body) => Ok(body),
            Err(err) => {
                error!(operation, "metadata request failed: {}", err);
                Err(GatewayError { operation })
            }
        }
    }

    /// [`Self::execute`] for calls whose response body is informational.
    async fn execute_optional<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        request: RequestBuilder,
    ) -> GatewayResult<Option<T>> {
        match send_optional(request).await {
            Ok(body) => Ok(body),
            Err(err) => {
                error!(operation, "metadata request failed: {}", err);
                Err(GatewayError { operation })
            }
        }
    }
}

async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, TransportError> {
    let response = request.send().await?;
    let status = response.status();
    if !status.is_success() {
        let url = response.url().to_string();
        let body = response.text().await.unwrap_or_default();
        return Err(TransportError::Status { url, status, body });
    }
    Ok(response.json().await?)
}

/// Like [`send_json`], but only the status decides success. An empty or
/// undecodable body yields `None`.
async fn send_optional<T: DeserializeOwned>(
    request: RequestBuilder,
) -> Result<Option<T>, TransportError> {
    let response = request.send().await?;
    let status = response.status();
    let url = response.url().to_string();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(TransportError::Status { url, status, body });
    }
    if body.trim().is_empty() {
        return Ok(None);
    }
    match serde_json::from_str(&body) {
        Ok(value) => Ok(Some(value)),
        Err(err) => {
            debug!("ignoring {} response body from {}: {}", status, url, err);
            Ok(None)
        }
    }
}

impl MetadataApi for HttpMetadataGateway {
    async fn list_active(&self) -> GatewayResult<Vec<MetadataRecord>> {
        let url = self.url("active");
        debug!("GET {}", url);
        self.execute("list_active", self.client.get(&url)).await
    }

    async fn list_inactive(&self) -> GatewayResult<Vec<MetadataRecord>> {
        let url = self.url("inactive");
        debug!("GET {}", url);
        self.execute("list_inactive", self.client.get(&url)).await
    }

    async fn create(&self, request: &CreateMetadataRequest) -> GatewayResult<()> {
        let url = self.url("analyze");
        debug!("POST {} url={}", url, request.url);
        self.execute_optional::<IgnoredAny>("create", self.client.post(&url).json(request))
            .await
            .map(|_| ())
    }

    async fn update(&self, update: &MetadataUpdate) -> GatewayResult<MetadataRecord> {
        let url = self.url(&update.id.to_string());
        debug!("PUT {}", url);
        self.execute("update", self.client.put(&url).json(update))
            .await
    }

    async fn activate(&self, id: i64) -> GatewayResult<Option<MetadataRecord>> {
        let url = self.url(&format!("active/{}", id));
        debug!("PUT {}", url);
        self.execute_optional("activate", self.client.put(&url).json(&json!({})))
            .await
    }

    async fn deactivate(&self, id: i64) -> GatewayResult<Option<MetadataRecord>> {
        let url = self.url(&format!("inactive/{}", id));
        debug!("DELETE {}", url);
        self.execute_optional("deactivate", self.client.delete(&url))
            .await
    }
}
