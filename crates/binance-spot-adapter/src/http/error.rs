/*
[INPUT]:  Error sources (request encoding, transport, API status, decoding, config)
[OUTPUT]: Structured error types carrying the endpoint that failed
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Main error type for the Binance spot adapter
///
/// `endpoint` is the logical call, e.g. `GET /api/v3/order`.
#[derive(Error, Debug)]
pub enum BinanceError {
    /// Request body could not be serialized; raised before any network I/O
    #[error("{endpoint}: failed to encode request body: {source}")]
    RequestBody {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    /// Network level failure (DNS, connect, timeout, body read)
    #[error("{endpoint}: request failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// API returned a status other than 200; body kept verbatim
    #[error("{endpoint}: API error (status {status}): {body}")]
    Api {
        endpoint: String,
        status: u16,
        body: String,
    },

    /// Response body did not match the expected schema
    #[error("{endpoint}: failed to decode response: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    /// Request rejected locally before being sent
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Error envelope returned by the exchange, e.g. `{"code":-1121,"msg":"Invalid symbol."}`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiErrorPayload {
    pub code: i64,
    pub msg: String,
}

impl BinanceError {
    /// Create an API error from status code and raw body
    pub fn api_error(endpoint: impl Into<String>, status: StatusCode, body: impl Into<String>) -> Self {
        BinanceError::Api {
            endpoint: endpoint.into(),
            status: status.as_u16(),
            body: body.into(),
        }
    }

    /// HTTP status for API errors, or the status attached to a transport error
    pub fn status(&self) -> Option<u16> {
        match self {
            BinanceError::Api { status, .. } => Some(*status),
            BinanceError::Transport { source, .. } => source.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_api_error(&self) -> bool {
        matches!(self, BinanceError::Api { .. })
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, BinanceError::Transport { source, .. } if source.is_timeout())
    }

    /// Endpoint of the call that failed, if the error came from one
    pub fn endpoint(&self) -> Option<&str> {
        match self {
            BinanceError::RequestBody { endpoint, .. }
            | BinanceError::Transport { endpoint, .. }
            | BinanceError::Api { endpoint, .. }
            | BinanceError::Decode { endpoint, .. } => Some(endpoint.as_str()),
            BinanceError::InvalidRequest(_) | BinanceError::Config(_) => None,
        }
    }

    /// Parse the exchange's `{"code","msg"}` envelope out of an API error body
    pub fn api_error_payload(&self) -> Option<ApiErrorPayload> {
        match self {
            BinanceError::Api { body, .. } => serde_json::from_str(body).ok(),
            _ => None,
        }
    }
}

/// Result type alias for Binance operations
pub type Result<T> = std::result::Result<T, BinanceError>;
