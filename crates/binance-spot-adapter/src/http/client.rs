/*
[INPUT]:  HTTP configuration (base URL, timeouts, credentials)
[OUTPUT]: Raw response bytes or a classified error per API call
[POS]:    HTTP layer - core transport implementation
[UPDATE]: When adding connection options or changing client behavior
*/

use std::fmt;
use std::time::{Duration, Instant};

use bytes::Bytes;
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, StatusCode, Url};
use serde::Serialize;
use serde::de::{DeserializeOwned, IgnoredAny};
use tracing::{debug, warn};

use super::error::{BinanceError, Result};
use super::params::QueryParams;
use super::signature::RequestSigner;

/// Base URLs for the Binance spot API
pub const DEFAULT_BASE_URL: &str = "https://api.binance.com";
pub const TESTNET_BASE_URL: &str = "https://testnet.binance.vision";

const ENV_API_KEY: &str = "BINANCE_API_KEY";
const ENV_SECRET_KEY: &str = "BINANCE_SECRET_KEY";
const ENV_BASE_URL: &str = "BINANCE_BASE_URL";
const ENV_TIMEOUT_SECS: &str = "BINANCE_TIMEOUT_SECS";

/// HTTP client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

impl ClientConfig {
    /// Configuration pointing at the spot testnet
    pub fn testnet() -> Self {
        Self::default().with_base_url(TESTNET_BASE_URL)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.connect_timeout = connect_timeout;
        self
    }

    /// Defaults overlaid with `BINANCE_BASE_URL` and `BINANCE_TIMEOUT_SECS`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();
        if let Some(base_url) = lookup(ENV_BASE_URL) {
            config.base_url = base_url;
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            let secs = raw.trim().parse::<u64>().map_err(|e| {
                BinanceError::Config(format!("{ENV_TIMEOUT_SECS}={raw:?} is not a number: {e}"))
            })?;
            config.timeout = Duration::from_secs(secs);
        }
        Ok(config)
    }
}

/// Credentials for authenticated requests
///
/// The API key travels in a header; the secret only ever feeds the signer.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    api_key: String,
    secret_key: String,
}

impl Credentials {
    pub fn new(api_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            secret_key: secret_key.into(),
        }
    }

    /// Empty credentials, enough for public market data endpoints
    pub fn anonymous() -> Self {
        Self::new("", "")
    }

    /// Load from `BINANCE_API_KEY` / `BINANCE_SECRET_KEY`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let read = |key: &str| {
            lookup(key)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| BinanceError::Config(format!("missing environment variable {key}")))
        };
        Ok(Self::new(read(ENV_API_KEY)?, read(ENV_SECRET_KEY)?))
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Only for computing signatures; never log the returned value.
    pub(crate) fn expose_secret(&self) -> &str {
        &self.secret_key
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("secret_key", &"[REDACTED]")
            .finish()
    }
}

/// Main HTTP client for the Binance spot API
///
/// Calls block the current thread until the response arrives or the timeout
/// elapses. The client is `Sync`; share it by reference across threads once
/// configured.
#[derive(Debug)]
pub struct BinanceClient {
    http_client: Client,
    base_url: String,
    timeout: Duration,
    signer: RequestSigner,
}

impl BinanceClient {
    /// Create a new client with default configuration
    pub fn new(credentials: Credentials) -> Result<Self> {
        Self::with_config(credentials, ClientConfig::default())
    }

    /// Client without credentials, for public endpoints only
    pub fn public() -> Result<Self> {
        Self::new(Credentials::anonymous())
    }

    /// Create a new client with custom configuration
    pub fn with_config(credentials: Credentials, config: ClientConfig) -> Result<Self> {
        Url::parse(&config.base_url).map_err(|e| {
            BinanceError::Config(format!("invalid base url {:?}: {e}", config.base_url))
        })?;

        let http_client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| BinanceError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http_client,
            base_url: trim_base_url(config.base_url),
            timeout: config.timeout,
            signer: RequestSigner::new(credentials),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn signer(&self) -> &RequestSigner {
        &self.signer
    }

    /// Redirect subsequent calls, e.g. to a sandbox environment.
    ///
    /// Takes `&mut self`: reconfigure before the client is shared.
    pub fn set_base_url(&mut self, base_url: impl Into<String>) {
        self.base_url = trim_base_url(base_url.into());
    }

    /// Change the per-request deadline for subsequent calls
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    /// Execute one HTTP call and return the raw body of a 200 response.
    ///
    /// When `need_sign` is set a fresh `timestamp` and the `signature` are added
    /// to the query string. Parameters always travel in the query string, also
    /// for POST and DELETE; `body`, when present, is sent as JSON.
    pub fn request<B>(
        &self,
        method: Method,
        endpoint: &str,
        params: &QueryParams,
        body: Option<&B>,
        need_sign: bool,
    ) -> Result<Bytes>
    where
        B: Serialize + ?Sized,
    {
        let operation = format!("{method} {endpoint}");

        let query = if need_sign {
            self.signer.sign(params)
        } else if !params.is_empty() {
            self.signer.build_query_string(params)
        } else {
            String::new()
        };

        let mut url = format!("{}{}", self.base_url, endpoint);
        if !query.is_empty() {
            url.push('?');
            url.push_str(&query);
        }

        let payload = body
            .map(serde_json::to_vec)
            .transpose()
            .map_err(|source| BinanceError::RequestBody {
                endpoint: operation.clone(),
                source,
            })?;

        let mut builder = self
            .http_client
            .request(method, url.as_str())
            .timeout(self.timeout);
        for (name, value) in self.signer.headers() {
            builder = builder.header(name, value);
        }
        if let Some(payload) = payload {
            builder = builder.header(CONTENT_TYPE, "application/json").body(payload);
        }

        debug!(endpoint = %operation, signed = need_sign, "sending request");
        let started = Instant::now();

        let transport_error = |source: reqwest::Error| {
            warn!(endpoint = %operation, error = %source, "request failed");
            BinanceError::Transport {
                endpoint: operation.clone(),
                source,
            }
        };

        let response = builder.send().map_err(transport_error)?;
        let status = response.status();
        let payload = response.bytes().map_err(transport_error)?;

        debug!(
            endpoint = %operation,
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "response received"
        );

        if status != StatusCode::OK {
            let body = String::from_utf8_lossy(&payload).into_owned();
            warn!(endpoint = %operation, status = status.as_u16(), body = %body, "API error response");
            return Err(BinanceError::api_error(operation, status, body));
        }

        Ok(payload)
    }

    /// GET with query parameters only
    pub fn get(&self, endpoint: &str, params: &QueryParams, need_sign: bool) -> Result<Bytes> {
        self.request::<()>(Method::GET, endpoint, params, None, need_sign)
    }

    /// POST with query parameters and an optional JSON body
    pub fn post<B>(
        &self,
        endpoint: &str,
        params: &QueryParams,
        body: Option<&B>,
        need_sign: bool,
    ) -> Result<Bytes>
    where
        B: Serialize + ?Sized,
    {
        self.request(Method::POST, endpoint, params, body, need_sign)
    }

    /// DELETE with query parameters only
    pub fn delete(&self, endpoint: &str, params: &QueryParams, need_sign: bool) -> Result<Bytes> {
        self.request::<()>(Method::DELETE, endpoint, params, None, need_sign)
    }

    pub(crate) fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &QueryParams,
        need_sign: bool,
    ) -> Result<T> {
        let payload = self.get(endpoint, params, need_sign)?;
        decode(Method::GET, endpoint, &payload)
    }

    pub(crate) fn post_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &QueryParams,
        need_sign: bool,
    ) -> Result<T> {
        let payload = self.post::<()>(endpoint, params, None, need_sign)?;
        decode(Method::POST, endpoint, &payload)
    }

    /// POST whose response body carries nothing of interest, e.g. `{}`
    pub(crate) fn post_ack(&self, endpoint: &str, params: &QueryParams, need_sign: bool) -> Result<()> {
        self.post_json::<IgnoredAny>(endpoint, params, need_sign)?;
        Ok(())
    }

    pub(crate) fn delete_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &QueryParams,
        need_sign: bool,
    ) -> Result<T> {
        let payload = self.delete(endpoint, params, need_sign)?;
        decode(Method::DELETE, endpoint, &payload)
    }
}

fn decode<T: DeserializeOwned>(method: Method, endpoint: &str, payload: &[u8]) -> Result<T> {
    serde_json::from_slice(payload).map_err(|source| BinanceError::Decode {
        endpoint: format!("{method} {endpoint}"),
        source,
    })
}

fn trim_base_url(base_url: String) -> String {
    base_url.trim_end_matches('/').to_string()
}
