/*
[INPUT]:  HTTP client configuration and API endpoints
[OUTPUT]: HTTP responses and typed API results
[POS]:    HTTP layer - REST API communication
[UPDATE]: When adding new endpoints or changing client behavior
*/

pub mod account;
pub mod client;
pub mod deposit;
pub mod error;
pub mod market;
pub mod params;
pub mod signature;
pub mod trading;
pub mod withdrawal;

pub use error::{ApiErrorPayload, BinanceError, Result};
pub use params::QueryParams;
pub use signature::{API_KEY_HEADER, RequestSigner};

pub use client::{BinanceClient, ClientConfig, Credentials, DEFAULT_BASE_URL, TESTNET_BASE_URL};

pub use account::AccountService;
pub use deposit::DepositService;
pub use market::MarketService;
pub use trading::TradingService;
pub use withdrawal::WithdrawalService;
