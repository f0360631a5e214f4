/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public Binance spot adapter crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod http;
pub mod types;

// Re-export commonly used types from http
pub use http::{
    AccountService,
    ApiErrorPayload,
    BinanceClient,
    BinanceError,
    ClientConfig,
    Credentials,
    DepositService,
    MarketService,
    QueryParams,
    RequestSigner,
    Result,
    TradingService,
    WithdrawalService,
};

// Re-export all types
pub use types::*;
