//! HTTP transport to the real backend.
//!
//! `POST {base}/api{endpoint}` with a JSON body. Connection failures,
//! timeouts, `404` and `5xx` answers are reported as
//! [`AppError::Unreachable`] so a [`Failover`](super::Failover) can switch
//! to the local store. So is a success status whose body is not JSON,
//! e.g. a static host serving its HTML index for every path. Other
//! non-success statuses are API errors.

use crate::errors::{AppError, AppResult};
use crate::gateway::Transport;
use crate::gateway::endpoint::Endpoint;
use reqwest::StatusCode;
use reqwest::blocking::Client;
use serde_json::Value;

pub struct RemoteTransport {
    client: Client,
    base_url: String,
}

impl RemoteTransport {
    pub fn new(base_url: &str) -> AppResult<Self> {
        let client = Client::builder()
            .user_agent(concat!("truckhisab/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn url(&self, endpoint: Endpoint) -> String {
        format!("{}/api{}", self.base_url, endpoint.path())
    }
}

/// Best-effort error text from a JSON error body.
fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| {
            v.get("message")
                .or_else(|| v.get("error"))
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string())
}

impl Transport for RemoteTransport {
    fn post(&self, endpoint: Endpoint, payload: Value) -> AppResult<Value> {
        let url = self.url(endpoint);
        let resp = self
            .client
            .post(&url)
            .json(&payload)
            .send()
            .map_err(|e| {
                if e.is_connect() || e.is_timeout() {
                    AppError::Unreachable(e.to_string())
                } else {
                    AppError::Http(e)
                }
            })?;

        let status = resp.status();
        if status.is_server_error() || status == StatusCode::NOT_FOUND {
            return Err(AppError::Unreachable(format!("HTTP {status} from {url}")));
        }
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            return Err(AppError::Api {
                status: status.as_u16(),
                message: error_message(status, &body),
            });
        }

        resp.json::<Value>()
            .map_err(|e| AppError::Unreachable(format!("non-JSON answer from {url}: {e}")))
    }
}
