//! OpenSearch API client.
//!
//! [`Client::call`] is the single authenticated primitive every façade goes
//! through: rate-limit gate, parameter assembly, signing, transport, JSON
//! decoding.

use crate::credential::Credentials;
use crate::doc::DocClient;
use crate::error::{OpenSearchError, Result};
use crate::index::IndexClient;
use crate::rate_limit::{RateLimiter, DEFAULT_QPS_LIMIT};
use crate::sign::{Signer, Stamp};
use crate::types::{HttpMethod, Params};
use reqwest::{Client as HttpClient, StatusCode};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

const DEFAULT_BASE_URL: &str = "http://opensearch.aliyuncs.com";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// OpenSearch API client.
///
/// Cheap to clone: clones share the HTTP connection pool and the rate
/// limiter.
///
/// # Example
///
/// ```rust,no_run
/// use aliyun_opensearch::{Client, SearchQuery};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = Client::new("LTAIxxxx", "secret")?;
///
///     let indexes = client.list_indexes().await?;
///     println!("indexes: {}", indexes);
///
///     let hits = client
///         .docs("products")
///         .search(SearchQuery::new("query=default:'phone'"))
///         .await?;
///     println!("hits: {}", hits);
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct Client {
    pub(crate) http: HttpClient,
    pub(crate) base_url: String,
    pub(crate) signer: Signer,
    pub(crate) limiter: Arc<RateLimiter>,
}

/// Configuration options for the client.
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    /// Base URL for the API (default: http://opensearch.aliyuncs.com).
    pub base_url: Option<String>,
    /// Request timeout (default: 30 seconds).
    pub timeout: Option<Duration>,
    /// User-Agent header value.
    pub user_agent: Option<String>,
    /// Calls per second for this client's own limiter (default: 200, 0 = off).
    /// Ignored when `rate_limiter` is set.
    pub qps_limit: Option<u32>,
    /// Limiter to share with other clients.
    pub rate_limiter: Option<Arc<RateLimiter>>,
}

impl Client {
    /// Create a client with default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`OpenSearchError::Config`] if the key id or secret is empty.
    ///
    /// # Example
    ///
    /// ```rust
    /// use aliyun_opensearch::Client;
    ///
    /// let client = Client::new("LTAIxxxx", "secret").unwrap();
    /// ```
    pub fn new(
        access_key_id: impl Into<String>,
        access_key_secret: impl Into<String>,
    ) -> Result<Self> {
        let credentials = Credentials::new(access_key_id, access_key_secret)?;
        Self::with_config(credentials, ClientConfig::default())
    }

    /// Create a client from `OPENSEARCH_ACCESS_KEY_ID` /
    /// `OPENSEARCH_ACCESS_KEY_SECRET`.
    pub fn from_env(config: ClientConfig) -> Result<Self> {
        Self::with_config(Credentials::from_env()?, config)
    }

    /// Create a client with custom configuration.
    ///
    /// # Example
    ///
    /// ```rust
    /// use aliyun_opensearch::{Client, ClientConfig, Credentials};
    /// use std::time::Duration;
    ///
    /// let client = Client::with_config(
    ///     Credentials::new("LTAIxxxx", "secret").unwrap(),
    ///     ClientConfig {
    ///         base_url: Some("http://opensearch-cn-hangzhou.aliyuncs.com".to_string()),
    ///         timeout: Some(Duration::from_secs(10)),
    ///         qps_limit: Some(50),
    ///         ..Default::default()
    ///     },
    /// ).unwrap();
    /// assert_eq!(client.rate_limiter().limit(), 50);
    /// ```
    pub fn with_config(credentials: Credentials, config: ClientConfig) -> Result<Self> {
        let timeout = config
            .timeout
            .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        let user_agent = config
            .user_agent
            .unwrap_or_else(|| format!("aliyun-opensearch-rust/{}", env!("CARGO_PKG_VERSION")));

        let http = HttpClient::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| OpenSearchError::Config(format!("failed to create HTTP client: {}", e)))?;

        let limiter = config.rate_limiter.unwrap_or_else(|| {
            Arc::new(RateLimiter::new(
                config.qps_limit.unwrap_or(DEFAULT_QPS_LIMIT),
            ))
        });

        let base_url = config
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            http,
            base_url,
            signer: Signer::new(credentials),
            limiter,
        })
    }

    /// Get the base URL for the API.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The limiter gating this client's calls.
    pub fn rate_limiter(&self) -> &Arc<RateLimiter> {
        &self.limiter
    }

    /// The signer holding this client's credentials.
    pub fn signer(&self) -> &Signer {
        &self.signer
    }

    /// Index lifecycle operations for `index_name`.
    pub fn index(&self, index_name: impl Into<String>) -> IndexClient {
        IndexClient::new(self.clone(), index_name.into())
    }

    /// Document and search operations for `index_name`.
    pub fn docs(&self, index_name: impl Into<String>) -> DocClient {
        DocClient::new(self.clone(), index_name.into())
    }

    /// List every index of the account.
    pub async fn list_indexes(&self) -> Result<Value> {
        self.call("/index/", Params::new(), HttpMethod::Get).await
    }

    /// Make a signed, rate-limited call and return the decoded JSON body.
    ///
    /// For `GET` the parameters go into the query string, for `POST` into a
    /// form-encoded body. Any status other than 200 is an error; nothing is
    /// retried.
    pub async fn call(&self, path: &str, params: Params, method: HttpMethod) -> Result<Value> {
        validate_path(path)?;

        let window = self.limiter.acquire().await;
        let params = self.signer.signed_params(method, params, &Stamp::now());
        let url = format!("{}{}", self.base_url, path);

        debug!(%method, path, window, params = params.len(), "calling OpenSearch");

        let request = match method {
            HttpMethod::Get => self.http.get(&url).query(&params),
            HttpMethod::Post => self.http.post(&url).form(&params),
        };
        let response = request.send().await?;

        let status = response.status();
        let body = response.text().await?;
        if status != StatusCode::OK {
            warn!(%method, path, status = status.as_u16(), "OpenSearch call failed");
            return Err(OpenSearchError::Status {
                status_code: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }

    /// The exact parameter set `call` would send with `stamp`, without
    /// touching the network or the rate limiter.
    pub fn prepare(
        &self,
        path: &str,
        params: Params,
        method: HttpMethod,
        stamp: &Stamp,
    ) -> Result<Params> {
        validate_path(path)?;
        Ok(self.signer.signed_params(method, params, stamp))
    }
}

fn validate_path(path: &str) -> Result<()> {
    if !path.starts_with('/') {
        return Err(OpenSearchError::InvalidRequest(format!(
            "path must start with '/', got {:?}",
            path
        )));
    }
    Ok(())
}

pub(crate) fn require_non_empty(what: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(OpenSearchError::InvalidRequest(format!(
            "{} must not be empty",
            what
        )));
    }
    Ok(())
}

/// Index names end up verbatim in the URL path.
pub(crate) fn validate_index_name(index_name: &str) -> Result<()> {
    require_non_empty("index name", index_name)?;
    if let Some(c) = index_name.chars().find(|c| matches!(c, '/' | '?' | '#')) {
        return Err(OpenSearchError::InvalidRequest(format!(
            "index name {:?} must not contain {:?}",
            index_name, c
        )));
    }
    Ok(())
}
