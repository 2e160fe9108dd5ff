//! Client for the remote quarter-sales metrics service.
//!
//! A request signs in with username/password to obtain an API key, then
//! queries quarter-bucketed sales for the fixed reporting window. Both calls
//! share one `reqwest` client. TLS certificate validation is disabled for the
//! metrics host; the transport is not authenticated.

use std::collections::HashSet;
use std::fmt;
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::{header, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};
use url::Url;

use crate::config::SalesConfig;
use crate::constants::{Q_SALES_PATH, SALES_END_DATE, SALES_START_DATE, SIGNIN_PATH};
use crate::error::{PipelineError, Result};
use crate::models::SalesBucketSet;

/// Source of quarter-bucket sales membership.
#[async_trait]
pub trait SalesSource: Send + Sync {
    /// Authenticates and fetches the current sales buckets.
    async fn sales_buckets(&self) -> Result<SalesBucketSet>;
}

/// API key issued by the metrics service.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Returns the raw key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(..)")
    }
}

#[derive(Serialize)]
struct SigninRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct SigninResponse {
    api_key: Option<String>,
}

#[derive(Deserialize)]
struct QSalesResponse {
    q1: Vec<SalesRecord>,
    q2: Vec<SalesRecord>,
    q3: Vec<SalesRecord>,
    q4: Vec<SalesRecord>,
}

#[derive(Deserialize)]
struct SalesRecord {
    pucp_id: SalesId,
}

/// Record identifier, sent either as a number or as a numeric string.
#[derive(Deserialize)]
#[serde(untagged)]
enum SalesId {
    Number(i64),
    Text(String),
}

impl SalesId {
    fn to_code(&self) -> Option<i64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

fn to_code_set(bucket: &'static str, records: &[SalesRecord]) -> Result<HashSet<i64>> {
    records
        .iter()
        .map(|record| {
            record.pucp_id.to_code().ok_or_else(|| PipelineError::RemoteFetch {
                status: None,
                message: format!("non-numeric identifier in bucket {bucket}"),
            })
        })
        .collect()
}

/// Parses a quarter-sales response body.
///
/// Every bucket `q1`..`q4` must be present; a missing bucket is an error
/// rather than an empty set.
pub fn parse_sales_buckets(body: &[u8]) -> Result<SalesBucketSet> {
    let response: QSalesResponse =
        serde_json::from_slice(body).map_err(|e| PipelineError::RemoteFetch {
            status: None,
            message: format!("malformed quarter sales response: {e}"),
        })?;

    Ok(SalesBucketSet {
        q1: to_code_set("q1", &response.q1)?,
        q2: to_code_set("q2", &response.q2)?,
        q3: to_code_set("q3", &response.q3)?,
        q4: to_code_set("q4", &response.q4)?,
    })
}

/// Resolves `path` against `host`, treating the host as a directory.
fn endpoint(host: &Url, path: &str) -> Result<Url> {
    host.join(path).map_err(|e| PipelineError::RemoteFetch {
        status: None,
        message: format!("invalid endpoint {path}: {e}"),
    })
}

/// Normalizes a configured host so relative endpoints append to its path.
pub fn parse_host(host: &str) -> anyhow::Result<Url> {
    let mut url = Url::parse(host.trim()).context(format!("Invalid metrics host: {host}"))?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// HTTP client for the metrics service.
#[derive(Clone)]
pub struct SalesClient {
    http: reqwest::Client,
    host: Url,
    username: String,
    password: String,
}

impl SalesClient {
    /// Creates a client from the sales section of the configuration.
    pub fn from_config(config: &SalesConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .danger_accept_invalid_certs(true)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build metrics HTTP client")?;

        Ok(Self {
            http,
            host: parse_host(&config.host)?,
            username: config.username.clone(),
            password: config.password.clone(),
        })
    }

    /// Signs in and returns the issued API key.
    ///
    /// A success response without a non-empty `api_key` is treated the same
    /// as a rejection.
    pub async fn authenticate(&self) -> Result<ApiKey> {
        let url = endpoint(&self.host, SIGNIN_PATH).map_err(|e| PipelineError::Authentication {
            status: None,
            message: e.to_string(),
        })?;

        let response = self
            .http
            .post(url)
            .json(&SigninRequest {
                username: &self.username,
                password: &self.password,
            })
            .send()
            .await
            .map_err(|e| PipelineError::Authentication {
                status: None,
                message: e.to_string(),
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PipelineError::Authentication {
                status: Some(status),
                message: e.to_string(),
            })?;

        if !status.is_success() {
            error!("Failed to authenticate: {} - {}", status.as_u16(), body);
            return Err(PipelineError::Authentication {
                status: Some(status),
                message: body,
            });
        }

        match serde_json::from_str::<SigninResponse>(&body) {
            Ok(SigninResponse {
                api_key: Some(key),
            }) if !key.is_empty() => Ok(ApiKey(key)),
            _ => {
                error!("Failed to fetch API key: {} - {}", status.as_u16(), body);
                Err(PipelineError::Authentication {
                    status: Some(status),
                    message: "response carries no api_key".to_string(),
                })
            }
        }
    }

    /// Fetches quarter-bucketed sales for the fixed reporting window.
    pub async fn fetch_sales_buckets(&self, api_key: &ApiKey) -> Result<SalesBucketSet> {
        let url = endpoint(&self.host, Q_SALES_PATH)?;

        let response = self
            .http
            .get(url)
            .query(&[("start_date", SALES_START_DATE), ("end_date", SALES_END_DATE)])
            .header(header::AUTHORIZATION, format!("Api-Key {}", api_key.as_str()))
            .header(header::CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|e| PipelineError::RemoteFetch {
                status: None,
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.map_err(|e| PipelineError::RemoteFetch {
                status: Some(status),
                message: e.to_string(),
            })?;
            error!("Failed to fetch QSale data: {} - {}", status.as_u16(), body);
            return Err(PipelineError::RemoteFetch {
                status: Some(status),
                message: body,
            });
        }

        let body = response.bytes().await.map_err(|e| PipelineError::RemoteFetch {
            status: Some(status),
            message: e.to_string(),
        })?;

        parse_sales_buckets(&body).map_err(|e| with_status(e, status))
    }
}

fn with_status(err: PipelineError, status: StatusCode) -> PipelineError {
    match err {
        PipelineError::RemoteFetch { message, .. } => PipelineError::RemoteFetch {
            status: Some(status),
            message,
        },
        other => other,
    }
}

#[async_trait]
impl SalesSource for SalesClient {
    async fn sales_buckets(&self) -> Result<SalesBucketSet> {
        let api_key = self.authenticate().await?;
        let buckets = self.fetch_sales_buckets(&api_key).await?;
        debug!(
            q1 = buckets.q1.len(),
            q2 = buckets.q2.len(),
            q3 = buckets.q3.len(),
            q4 = buckets.q4.len(),
            "Fetched quarter sales"
        );
        Ok(buckets)
    }
}
