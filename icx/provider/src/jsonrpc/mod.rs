// Copyright 2024 ICX Tools Developers
// SPDX-License-Identifier: MIT

mod endpoint;
mod types;

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use thiserror::Error;
use url::Url;

pub use endpoint::Endpoint;
pub use types::{JsonRpcError, JsonRpcRequest, JsonRpcResponse, JSON_RPC_VERSION};


/// Failures of a JSON-RPC exchange. Errors reported by the server inside a well formed
/// JSON-RPC response are not failures of [`JsonRpcClient::send`]; only
/// [`JsonRpcClient::request`] turns them into [`ClientError::Rpc`].
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid endpoint {endpoint}: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },
    #[error("cannot reach {endpoint}: {source}")]
    Connection {
        endpoint: Url,
        #[source]
        source: reqwest::Error,
    },
    #[error("bad endpoint {endpoint}: server responded with {status}")]
    BadEndpoint { endpoint: Url, status: StatusCode },
    #[error("cannot decode response from {endpoint}: {source}")]
    Decode {
        endpoint: Url,
        #[source]
        source: serde_json::Error,
    },
    #[error("json rpc error {code}: {message}")]
    Rpc { code: i64, message: String },
    #[error("invalid json rpc response: {0}")]
    InvalidResponse(String),
    #[error("cannot build http client: {0}")]
    HttpClient(#[source] reqwest::Error),
}

impl ClientError {
    /// Whether the node could not be reached at all, as opposed to the node answering with
    /// something unexpected.
    pub fn is_connection(&self) -> bool {
        matches!(
            self,
            ClientError::InvalidEndpoint { .. } | ClientError::Connection { .. }
        )
    }
}

/// A simple async JSON-RPC client that sends one-shot requests via HTTP/HTTPS. The returned
/// results are of type [`Value`] from the [`serde_json`] crate.
#[async_trait]
pub trait JsonRpcClient {
    /// Posts `payload` as is and returns the parsed response body. The payload is not validated;
    /// a JSON-RPC `error` in the response is returned like any other response.
    async fn send(&self, payload: Value) -> Result<Value, ClientError>;

    /// Sends a JSON-RPC request with `method` and optional `params` and returns its `result`.
    async fn request(&self, method: &str, params: Option<Value>) -> Result<Value, ClientError>;
}

/// The implementation of [`JsonRpcClient`]. Every call opens its own connection, no idle
/// connections are kept around between calls.
///
/// # Examples
/// ```no_run
/// use icx_provider::jsonrpc::{JsonRpcClient, JsonRpcClientImpl};
/// use serde_json::json;
///
/// #[tokio::main]
/// async fn main() {
///     let endpoint = "http://127.0.0.1:9000/api/v3".parse().unwrap();
///     let client = JsonRpcClientImpl::new(endpoint, None).unwrap();
///     let payload = json!({"jsonrpc": "2.0", "method": "icx_getTotalSupply", "id": 111});
///     println!("{}", client.send(payload).await.unwrap());
/// }
/// ```
pub struct JsonRpcClientImpl {
    http_client: Client,
    endpoint: Endpoint,
    bearer_token: Option<String>,
    next_id: AtomicU64,
}

impl JsonRpcClientImpl {
    /// Creates a client that sends all requests to `endpoint`.
    pub fn new(endpoint: Endpoint, bearer_token: Option<&str>) -> Result<Self, ClientError> {
        let http_client = Client::builder()
            .pool_max_idle_per_host(0)
            .build()
            .map_err(ClientError::HttpClient)?;

        Ok(Self {
            http_client,
            endpoint,
            bearer_token: bearer_token.map(String::from),
            next_id: AtomicU64::new(1),
        })
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub fn bearer_token(&self) -> Option<&str> {
        self.bearer_token.as_deref()
    }
}

#[async_trait]
impl JsonRpcClient for JsonRpcClientImpl {
    async fn send(&self, payload: Value) -> Result<Value, ClientError> {
        let url = self.endpoint.url();
        log::debug!("sending json rpc request to {url}: {payload}");

        let mut builder = self
            .http_client
            .post(url.as_str())
            .headers(HeaderMap::from_iter([(
                CONTENT_TYPE,
                HeaderValue::from_static("application/json"),
            )]))
            .body(payload.to_string());
        if let Some(token) = &self.bearer_token {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await.map_err(|source| {
            log::error!("cannot reach json rpc endpoint {url}: {source}");
            ClientError::Connection {
                endpoint: url.clone(),
                source,
            }
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| ClientError::Connection {
                endpoint: url.clone(),
                source,
            })?;
        log::debug!("received status {status} from {url}: {body}");

        if !status.is_success() {
            // some nodes answer unknown methods with a 4xx status and a regular error envelope
            return match serde_json::from_str::<Value>(&body) {
                Ok(value) if types::is_error_envelope(&value) => Ok(value),
                _ => Err(ClientError::BadEndpoint {
                    endpoint: url.clone(),
                    status,
                }),
            };
        }

        serde_json::from_str(&body).map_err(|source| ClientError::Decode {
            endpoint: url.clone(),
            source,
        })
    }

    async fn request(&self, method: &str, params: Option<Value>) -> Result<Value, ClientError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let mut request = JsonRpcRequest::new(id, method);
        if let Some(params) = params {
            request = request.with_params(params);
        }

        let response = self.send(Value::from(request)).await?;
        JsonRpcResponse::from_value(response)?.into_result()
    }
}
