//! Base JSON-RPC 2.0 HTTP client.
//!
//! Provides `call()` for enveloped JSON-RPC methods and `post_raw()` for
//! bodies that must reach the server untouched. Every request is a single
//! blocking attempt; nothing is retried since wallet transfers are not
//! idempotent.

use crate::error::{RpcError, METHOD_NOT_FOUND_MESSAGE};
use log::{debug, warn};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

/// JSON-RPC 2.0 request envelope.
///
/// The wallet server never pipelines, so `id` is the constant `"0"` and is
/// not checked on the way back.
#[derive(Debug, Serialize)]
pub struct JsonRpcRequest<'a> {
    jsonrpc: &'static str,
    id: &'static str,
    method: &'a str,
    params: Value,
}

impl<'a> JsonRpcRequest<'a> {
    pub fn new(method: &'a str, params: Value) -> Self {
        Self {
            jsonrpc: "2.0",
            id: "0",
            method,
            params,
        }
    }
}

/// Endpoint configuration for an RPC client.
///
/// The request URL is `{scheme}://{host}:{port}{path}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RpcConfig {
    /// `http` or `https`.
    pub scheme: String,
    pub host: String,
    pub port: u16,
    /// JSON-RPC path, including the leading slash.
    pub path: String,
    /// Request timeout. `None` keeps the HTTP stack's default.
    pub timeout: Option<Duration>,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            scheme: "http".to_string(),
            host: "127.0.0.1".to_string(),
            port: crate::ports::WALLET_MAINNET,
            path: "/json_rpc".to_string(),
            timeout: None,
        }
    }
}

impl RpcConfig {
    /// Default local endpoint on another port (e.g. a testnet wallet).
    pub fn for_port(port: u16) -> Self {
        Self {
            port,
            ..Default::default()
        }
    }

    pub fn with_scheme(mut self, scheme: &str) -> Self {
        self.scheme = scheme.to_string();
        self
    }

    pub fn with_host(mut self, host: &str) -> Self {
        self.host = host.to_string();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_path(mut self, path: &str) -> Self {
        self.path = path.to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Full request URL.
    pub fn url(&self) -> String {
        format!("{}://{}:{}{}", self.scheme, self.host, self.port, self.path)
    }
}

/// Blocking RPC client for the wallet JSON-RPC endpoint.
pub struct RpcClient {
    client: Client,
    config: RpcConfig,
    url: String,
}

impl RpcClient {
    /// Client for the default endpoint, `http://127.0.0.1:18082/json_rpc`.
    pub fn new() -> Result<Self, RpcError> {
        Self::with_config(RpcConfig::default())
    }

    /// Create a new client with full configuration.
    pub fn with_config(config: RpcConfig) -> Result<Self, RpcError> {
        let mut builder = Client::builder().default_headers(build_headers());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| RpcError::InvalidRequest(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: config.url(),
            config,
        })
    }

    /// Get the configured request URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn config(&self) -> &RpcConfig {
        &self.config
    }

    /// Call a JSON-RPC method and return its `result`.
    ///
    /// A reply carrying neither `result` nor `error` is returned whole.
    pub fn call(&self, method: &str, params: Value) -> Result<Value, RpcError> {
        if method.is_empty() {
            return Err(RpcError::InvalidRequest("method name is empty".to_string()));
        }

        let request = serde_json::to_value(JsonRpcRequest::new(method, params))?;
        let reply = self.post(method, &request)?;
        interpret_reply(method, &request, reply)
    }

    /// POST `body` as-is, without the JSON-RPC envelope.
    ///
    /// The reply is classified exactly like [`RpcClient::call`]; `label` only
    /// names the request in logs and errors.
    pub fn post_raw(&self, label: &str, body: &Value) -> Result<Value, RpcError> {
        let reply = self.post(label, body)?;
        interpret_reply(label, body, reply)
    }

    fn post(&self, method: &str, body: &Value) -> Result<Value, RpcError> {
        debug!("-> {} {}", method, self.url);

        let resp = self
            .client
            .post(&self.url)
            .json(body)
            .send()
            .map_err(|e| self.transport_error(method, e))?;

        let status = resp.status();
        debug!("<- {} HTTP {}", method, status.as_u16());

        if status != StatusCode::OK {
            return Err(RpcError::StatusCode {
                method: method.to_string(),
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        let text = resp.text().map_err(|e| self.transport_error(method, e))?;
        Ok(serde_json::from_str(&text)?)
    }

    fn transport_error(&self, method: &str, source: reqwest::Error) -> RpcError {
        RpcError::Transport {
            method: method.to_string(),
            url: self.url.clone(),
            source,
        }
    }
}

fn build_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers
}

/// Split a decoded 200 reply into the success payload or a server error.
fn interpret_reply(method: &str, request: &Value, reply: Value) -> Result<Value, RpcError> {
    let mut reply = match reply {
        Value::Object(map) => map,
        other => return Ok(other),
    };

    if let Some(error) = reply.remove("error") {
        let message = error
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        if message == METHOD_NOT_FOUND_MESSAGE {
            warn!("server does not know method {}", method);
            return Err(RpcError::MethodNotFound {
                method: method.to_string(),
                request: request.clone(),
            });
        }

        warn!("{} failed: {}", method, message);
        return Err(RpcError::Protocol {
            method: method.to_string(),
            code: error.get("code").and_then(Value::as_i64),
            message,
            error,
        });
    }

    match reply.remove("result") {
        Some(result) => Ok(result),
        None => Ok(Value::Object(reply)),
    }
}
