//! HTTP client for the TimeTagger records API.
//!
//! Wraps the three endpoints the CLI needs:
//! - `GET records?timerange=<t1>-<t2>` for records overlapping a window
//! - `GET updates?since=<t>` for the full record set
//! - `PUT records` to create or update records by key

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tg_core::{Record, TimeWindow};

/// Default request timeout for API calls.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const AUTH_HEADER: &str = "authtoken";

/// Client errors.
#[derive(Debug, Error)]
pub enum ClientError {
    /// No token was configured.
    #[error("api_token not set, run 'timetagger setup' first.")]
    MissingToken,
    /// The configured certificate could not be read.
    #[error("failed to read certificate {}: {source}", .path.display())]
    Certificate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Failed to build HTTP client.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
    /// HTTP request failed.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// Server answered with something other than 200.
    #[error("{status} - {body}")]
    Status { status: u16, body: String },
    /// Failed to parse response.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    /// The server refused some of the submitted records.
    #[error("server rejected records {}: {}", .failed.join(", "), .errors.join("; "))]
    Rejected {
        failed: Vec<String>,
        errors: Vec<String>,
    },
}

/// TLS certificate verification setting.
///
/// Either a plain toggle or the path of a PEM certificate to trust, which
/// is how self-hosted servers with self-signed certificates are reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SslVerify {
    Enabled(bool),
    Certificate(PathBuf),
}

impl Default for SslVerify {
    fn default() -> Self {
        Self::Enabled(true)
    }
}

/// Outcome of a `PUT records` call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PutOutcome {
    /// Keys the server stored.
    #[serde(default)]
    pub accepted: Vec<String>,
    /// Keys the server refused.
    #[serde(default)]
    pub failed: Vec<String>,
    /// Messages explaining refusals.
    #[serde(default)]
    pub errors: Vec<String>,
}

impl PutOutcome {
    /// Fails with [`ClientError::Rejected`] if any key was refused.
    pub fn into_result(self) -> Result<Self, ClientError> {
        if self.failed.is_empty() {
            return Ok(self);
        }
        Err(ClientError::Rejected {
            failed: self.failed,
            errors: self.errors,
        })
    }
}

#[derive(Debug, Deserialize)]
struct RecordsResponse {
    records: Vec<Record>,
}

/// TimeTagger API client.
pub struct Client {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url)
            .field("token", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Creates a client for the API rooted at `api_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is blank, the certificate file cannot
    /// be read, or the HTTP client fails to build.
    pub fn new(api_url: &str, token: &str, ssl_verify: &SslVerify) -> Result<Self, ClientError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(ClientError::MissingToken);
        }

        let mut builder = reqwest::Client::builder().timeout(DEFAULT_TIMEOUT);
        match ssl_verify {
            SslVerify::Enabled(true) => {}
            SslVerify::Enabled(false) => {
                tracing::warn!("TLS certificate verification is disabled");
                builder = builder.danger_accept_invalid_certs(true);
            }
            SslVerify::Certificate(path) => {
                let pem = std::fs::read(path).map_err(|source| ClientError::Certificate {
                    path: path.clone(),
                    source,
                })?;
                let certificate =
                    reqwest::Certificate::from_pem(&pem).map_err(ClientError::ClientBuild)?;
                builder = builder.add_root_certificate(certificate);
            }
        }
        let http = builder.build().map_err(ClientError::ClientBuild)?;

        Ok(Self {
            http,
            base_url: api_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    /// Fetches all records overlapping `window`.
    pub async fn get_records(&self, window: TimeWindow) -> Result<Vec<Record>, ClientError> {
        let path = format!("records?timerange={}", window.as_timerange());
        let response: RecordsResponse = self.request(Method::GET, &path, None).await?;
        tracing::debug!(count = response.records.len(), "fetched records");
        Ok(response.records)
    }

    /// Fetches every record modified since `since`.
    pub async fn get_updates(&self, since: i64) -> Result<Vec<Record>, ClientError> {
        let path = format!("updates?since={since}");
        let response: RecordsResponse = self.request(Method::GET, &path, None).await?;
        tracing::debug!(count = response.records.len(), "fetched updates");
        Ok(response.records)
    }

    /// Creates or updates `records`, matched by key.
    ///
    /// Any key the server refuses turns the whole call into an error.
    pub async fn put_records(&self, records: &[Record]) -> Result<PutOutcome, ClientError> {
        let outcome: PutOutcome = self.request(Method::PUT, "records", Some(records)).await?;
        if !outcome.failed.is_empty() {
            tracing::warn!(
                failed = ?outcome.failed,
                errors = ?outcome.errors,
                "server rejected some records"
            );
        }
        outcome.into_result()
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&[Record]>,
    ) -> Result<T, ClientError> {
        let url = join_url(&self.base_url, path);
        tracing::debug!(%method, %url, "sending request");

        let mut request = self
            .http
            .request(method, &url)
            .header(AUTH_HEADER, &self.token);
        if let Some(records) = body {
            request = request.json(records);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        if status != StatusCode::OK {
            return Err(ClientError::Status {
                status: status.as_u16(),
                body: text,
            });
        }
        parse_body(&text)
    }
}

fn join_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

fn parse_body<T: DeserializeOwned>(text: &str) -> Result<T, ClientError> {
    serde_json::from_str(text).map_err(|err| ClientError::InvalidResponse(err.to_string()))
}
