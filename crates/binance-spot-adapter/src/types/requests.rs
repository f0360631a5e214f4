/*
[INPUT]:  Caller intent for each endpoint
[OUTPUT]: Typed request structs consumed by the service facades
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::enums::{
    DepositStatus, KlineInterval, OrderResponseType, OrderSide, OrderType, TimeInForce,
    WalletType, WithdrawStatus,
};

// ### Account

/// Universal transfer between wallets, e.g. `MAIN_UMFUTURE`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AssetTransferRequest {
    pub transfer_type: String,
    pub asset: String,
    pub amount: Decimal,
    pub from_symbol: Option<String>,
    pub to_symbol: Option<String>,
    pub recv_window: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct UserAssetRequest {
    pub asset: Option<String>,
    pub need_btc_valuation: bool,
    pub recv_window: Option<u64>,
}

// ### Deposit

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DepositAddressRequest {
    pub coin: String,
    pub network: Option<String>,
    pub recv_window: Option<u64>,
}

impl DepositAddressRequest {
    pub fn new(coin: impl Into<String>) -> Self {
        Self {
            coin: coin.into(),
            ..Default::default()
        }
    }

    pub fn network(mut self, network: impl Into<String>) -> Self {
        self.network = Some(network.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DepositHistoryRequest {
    pub coin: Option<String>,
    pub status: Option<DepositStatus>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub offset: Option<u32>,
    pub limit: Option<u32>,
    pub recv_window: Option<u64>,
    pub tx_id: Option<String>,
}

// ### Withdrawal

#[derive(Debug, Clone, PartialEq, Default)]
pub struct WithdrawalRequest {
    pub coin: String,
    pub network: Option<String>,
    pub address: String,
    pub address_tag: Option<String>,
    pub amount: Decimal,
    /// Client side id for the withdrawal
    pub withdraw_order_id: Option<String>,
    /// When set, the fee is taken from `amount` instead of on top of it
    pub transaction_fee_flag: bool,
    /// Description of the address in the address book
    pub name: Option<String>,
    pub wallet_type: Option<WalletType>,
    pub recv_window: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct WithdrawalHistoryRequest {
    pub coin: Option<String>,
    pub withdraw_order_id: Option<String>,
    pub status: Option<WithdrawStatus>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub offset: Option<u32>,
    pub limit: Option<u32>,
    /// Withdrawal ids, sent comma separated (max 45)
    pub id_list: Vec<String>,
    pub recv_window: Option<u64>,
}

// ### Market data

/// `symbol` takes precedence over `symbols` when both are set
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExchangeInfoRequest {
    pub symbol: Option<String>,
    pub symbols: Vec<String>,
    /// e.g. `SPOT`, `MARGIN`
    pub permissions: Vec<String>,
}

impl ExchangeInfoRequest {
    pub fn for_symbol(symbol: impl Into<String>) -> Self {
        Self {
            symbol: Some(symbol.into()),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct KlineRequest {
    pub symbol: String,
    pub interval: KlineInterval,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    /// Offset such as `+08:00`; the exchange defaults to UTC
    pub time_zone: Option<String>,
    /// Default 500, max 1000
    pub limit: Option<u32>,
}

impl KlineRequest {
    pub fn new(symbol: impl Into<String>, interval: KlineInterval) -> Self {
        Self {
            symbol: symbol.into(),
            interval,
            start_time: None,
            end_time: None,
            time_zone: None,
            limit: None,
        }
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn range(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.start_time = Some(start);
        self.end_time = Some(end);
        self
    }
}

// ### Trading

#[derive(Debug, Clone, PartialEq)]
pub struct NewOrderRequest {
    pub symbol: String,
    pub side: OrderSide,
    pub order_type: OrderType,
    pub time_in_force: Option<TimeInForce>,
    pub quantity: Option<Decimal>,
    pub quote_order_qty: Option<Decimal>,
    pub price: Option<Decimal>,
    pub new_client_order_id: Option<String>,
    pub stop_price: Option<Decimal>,
    pub iceberg_qty: Option<Decimal>,
    pub new_order_resp_type: Option<OrderResponseType>,
    pub recv_window: Option<u64>,
}

impl NewOrderRequest {
    pub fn new(symbol: impl Into<String>, side: OrderSide, order_type: OrderType) -> Self {
        Self {
            symbol: symbol.into(),
            side,
            order_type,
            time_in_force: None,
            quantity: None,
            quote_order_qty: None,
            price: None,
            new_client_order_id: None,
            stop_price: None,
            iceberg_qty: None,
            new_order_resp_type: None,
            recv_window: None,
        }
    }

    /// GTC limit order
    pub fn limit(symbol: impl Into<String>, side: OrderSide, quantity: Decimal, price: Decimal) -> Self {
        Self {
            time_in_force: Some(TimeInForce::Gtc),
            quantity: Some(quantity),
            price: Some(price),
            ..Self::new(symbol, side, OrderType::Limit)
        }
    }

    /// Market order sized in base asset
    pub fn market(symbol: impl Into<String>, side: OrderSide, quantity: Decimal) -> Self {
        Self {
            quantity: Some(quantity),
            ..Self::new(symbol, side, OrderType::Market)
        }
    }

    /// Market order sized in quote asset, e.g. "spend 100 USDT"
    pub fn market_quote(symbol: impl Into<String>, side: OrderSide, quote_qty: Decimal) -> Self {
        Self {
            quote_order_qty: Some(quote_qty),
            ..Self::new(symbol, side, OrderType::Market)
        }
    }

    pub fn time_in_force(mut self, time_in_force: TimeInForce) -> Self {
        self.time_in_force = Some(time_in_force);
        self
    }

    pub fn client_order_id(mut self, id: impl Into<String>) -> Self {
        self.new_client_order_id = Some(id.into());
        self
    }

    pub fn response_type(mut self, resp_type: OrderResponseType) -> Self {
        self.new_order_resp_type = Some(resp_type);
        self
    }
}

/// Either `order_id` or `orig_client_order_id` must be set
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QueryOrderRequest {
    pub symbol: String,
    pub order_id: Option<u64>,
    pub orig_client_order_id: Option<String>,
    pub recv_window: Option<u64>,
}

impl QueryOrderRequest {
    pub fn by_id(symbol: impl Into<String>, order_id: u64) -> Self {
        Self {
            symbol: symbol.into(),
            order_id: Some(order_id),
            ..Default::default()
        }
    }

    pub fn by_client_id(symbol: impl Into<String>, client_order_id: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            orig_client_order_id: Some(client_order_id.into()),
            ..Default::default()
        }
    }
}

/// Either `order_id` or `orig_client_order_id` must be set
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CancelOrderRequest {
    pub symbol: String,
    pub order_id: Option<u64>,
    pub orig_client_order_id: Option<String>,
    /// New id for the cancel itself
    pub new_client_order_id: Option<String>,
    pub recv_window: Option<u64>,
}

impl CancelOrderRequest {
    pub fn by_id(symbol: impl Into<String>, order_id: u64) -> Self {
        Self {
            symbol: symbol.into(),
            order_id: Some(order_id),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct OpenOrdersRequest {
    /// All symbols when `None`
    pub symbol: Option<String>,
    pub recv_window: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AllOrdersRequest {
    pub symbol: String,
    pub order_id: Option<u64>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    /// Default 500, max 1000
    pub limit: Option<u32>,
    pub recv_window: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MyTradesRequest {
    pub symbol: String,
    pub order_id: Option<u64>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub from_id: Option<u64>,
    /// Default 500, max 1000
    pub limit: Option<u32>,
    pub recv_window: Option<u64>,
}
