//! Shared HTTP transport for the scoring backend.
//!
//! ARCHITECTURAL RULE: no other module constructs a `reqwest::Client`. Every
//! backend call goes through [`Backend`] so the cookie store (the ambient
//! session credential), the request timeout, and the error-mapping convention
//! are applied uniformly.

use std::time::Duration;

use anyhow::Result;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::config::Config;
use crate::errors::ClientError;

/// Non-2xx payload shape used by every backend endpoint.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Clone)]
pub struct Backend {
    http: Client,
    base_url: String,
}

impl Backend {
    pub fn new(config: &Config) -> Result<Self> {
        let http = Client::builder()
            .cookie_store(true)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Backend {
            http,
            base_url: config.backend_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn http(&self) -> &Client {
        &self.http
    }

    /// Joins `path` (leading slash expected) onto the configured base URL.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Decodes a backend response into `T`, applying the shared convention:
    /// 2xx with an undecodable body is a transport error; non-2xx with a
    /// parseable `{error}` payload surfaces the server's message; non-2xx
    /// without one degrades to the generic transport error.
    pub async fn read_json<T: DeserializeOwned>(&self, response: Response) -> Result<T, ClientError> {
        let status = response.status();
        if status.is_success() {
            return response.json::<T>().await.map_err(|err| {
                debug!("undecodable 2xx body: {err}");
                ClientError::Transport(err.to_string())
            });
        }
        match response.json::<ErrorBody>().await {
            Ok(body) => Err(ClientError::Server(body.error)),
            Err(err) => {
                debug!("non-2xx ({status}) with unparseable body: {err}");
                Err(ClientError::Transport(format!("status {status}")))
            }
        }
    }
}
