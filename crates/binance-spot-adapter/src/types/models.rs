/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust structs for every response payload
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::enums::{
    DepositStatus, KlineInterval, OrderSide, OrderStatus, OrderType, TimeInForce, WalletType,
    WithdrawStatus,
};
use super::filters::{LotSizeFilter, PriceFilter, SymbolFilter};

// ### Account / wallet

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoinInfo {
    pub coin: String,
    pub name: String,
    pub deposit_all_enable: bool,
    pub withdraw_all_enable: bool,
    #[serde(with = "rust_decimal::serde::str")]
    pub free: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub locked: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub freeze: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub withdrawing: Decimal,
    #[serde(default, with = "serde_helpers::decimal_or_zero")]
    pub ipoable: Decimal,
    #[serde(default, with = "serde_helpers::decimal_or_zero")]
    pub ipoing: Decimal,
    #[serde(default, with = "serde_helpers::decimal_or_zero")]
    pub storage: Decimal,
    pub is_legal_money: bool,
    pub trading: bool,
    #[serde(default)]
    pub network_list: Vec<NetworkInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkInfo {
    pub network: String,
    pub coin: String,
    pub name: String,
    #[serde(default)]
    pub address_regex: String,
    #[serde(default)]
    pub memo_regex: String,
    #[serde(default)]
    pub is_default: bool,
    pub deposit_enable: bool,
    pub withdraw_enable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deposit_desc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub withdraw_desc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_tips: Option<String>,
    #[serde(default)]
    pub min_confirm: u32,
    #[serde(default)]
    pub un_lock_confirm: u32,
    #[serde(default)]
    pub reset_address_status: bool,
    #[serde(default, with = "serde_helpers::decimal_or_zero")]
    pub withdraw_fee: Decimal,
    #[serde(default, with = "serde_helpers::decimal_or_zero")]
    pub withdraw_min: Decimal,
    #[serde(default, with = "serde_helpers::decimal_or_zero")]
    pub withdraw_max: Decimal,
    #[serde(default, with = "serde_helpers::decimal_or_zero")]
    pub withdraw_integer_multiple: Decimal,
    #[serde(default)]
    pub same_address: bool,
    /// Minutes
    #[serde(default)]
    pub estimated_arrival_time: u64,
    #[serde(default)]
    pub busy: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountInfo {
    pub vip_level: u32,
    #[serde(alias = "isMarginEnable")]
    pub is_margin_enabled: bool,
    #[serde(alias = "isFutureEnable")]
    pub is_future_enabled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetTransferResponse {
    pub tran_id: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAsset {
    pub asset: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub free: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub locked: Decimal,
    #[serde(default, with = "serde_helpers::decimal_or_zero")]
    pub freeze: Decimal,
    #[serde(default, with = "serde_helpers::decimal_or_zero")]
    pub withdrawing: Decimal,
    #[serde(default, with = "serde_helpers::decimal_or_zero")]
    pub btc_valuation: Decimal,
}

// ### Deposit

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositAddress {
    pub address: String,
    pub coin: String,
    /// Memo / tag; empty when the network has none
    #[serde(default)]
    pub tag: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositRecord {
    pub id: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    pub coin: String,
    pub network: String,
    pub status: DepositStatus,
    pub address: String,
    #[serde(default)]
    pub address_tag: String,
    pub tx_id: String,
    /// Epoch milliseconds
    pub insert_time: i64,
    #[serde(default)]
    pub transfer_type: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unlock_confirm: Option<u32>,
    /// e.g. "12/12"
    #[serde(default)]
    pub confirm_times: String,
    #[serde(default = "serde_helpers::spot_wallet")]
    pub wallet_type: WalletType,
}

// ### Withdrawal

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawalResponse {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawalRecord {
    pub id: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    #[serde(default, with = "serde_helpers::decimal_or_zero")]
    pub transaction_fee: Decimal,
    pub coin: String,
    pub status: WithdrawStatus,
    pub address: String,
    #[serde(default)]
    pub tx_id: String,
    /// "YYYY-MM-DD HH:MM:SS" (UTC)
    pub apply_time: String,
    pub network: String,
    #[serde(default)]
    pub transfer_type: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub withdraw_order_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
    #[serde(default)]
    pub confirm_no: u32,
    #[serde(default = "serde_helpers::spot_wallet")]
    pub wallet_type: WalletType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tx_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complete_time: Option<String>,
}

/// 24h withdrawal quota, in USD
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawalQuota {
    #[serde(with = "rust_decimal::serde::str")]
    pub wd_quota: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub used_wd_quota: Decimal,
}

impl WithdrawalQuota {
    pub fn remaining(&self) -> Decimal {
        self.wd_quota - self.used_wd_quota
    }
}

/// Address book entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawalAddress {
    pub address: String,
    #[serde(default)]
    pub address_tag: String,
    pub coin: String,
    pub name: String,
    pub network: String,
    pub origin_type: String,
    pub white_status: bool,
}

// ### Market data

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeInfo {
    pub timezone: String,
    pub server_time: i64,
    #[serde(default)]
    pub rate_limits: Vec<RateLimit>,
    #[serde(default)]
    pub symbols: Vec<SymbolInfo>,
}

impl ExchangeInfo {
    pub fn symbol(&self, symbol: &str) -> Option<&SymbolInfo> {
        self.symbols.iter().find(|info| info.symbol == symbol)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimit {
    /// REQUEST_WEIGHT, ORDERS or RAW_REQUESTS
    pub rate_limit_type: String,
    pub interval: String,
    pub interval_num: u32,
    pub limit: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolInfo {
    pub symbol: String,
    /// TRADING, BREAK, ...
    pub status: String,
    pub base_asset: String,
    pub base_asset_precision: u32,
    pub quote_asset: String,
    #[serde(default)]
    pub quote_asset_precision: u32,
    #[serde(default)]
    pub order_types: Vec<OrderType>,
    #[serde(default)]
    pub iceberg_allowed: bool,
    #[serde(default)]
    pub oco_allowed: bool,
    #[serde(default)]
    pub quote_order_qty_market_allowed: bool,
    #[serde(default)]
    pub is_spot_trading_allowed: bool,
    #[serde(default)]
    pub is_margin_trading_allowed: bool,
    #[serde(default)]
    pub filters: Vec<SymbolFilter>,
    #[serde(default)]
    pub permissions: Vec<String>,
}

impl SymbolInfo {
    pub fn price_filter(&self) -> Option<&PriceFilter> {
        self.filters.iter().find_map(|filter| match filter {
            SymbolFilter::PriceFilter(price) => Some(price),
            _ => None,
        })
    }

    pub fn lot_size(&self) -> Option<&LotSizeFilter> {
        self.filters.iter().find_map(|filter| match filter {
            SymbolFilter::LotSize(lot) => Some(lot),
            _ => None,
        })
    }

    pub fn min_notional(&self) -> Option<Decimal> {
        self.filters.iter().find_map(SymbolFilter::min_notional)
    }

    pub fn supports(&self, order_type: OrderType) -> bool {
        self.order_types.contains(&order_type)
    }
}

/// One candlestick
///
/// The exchange sends each kline as a 12 element array; this decodes it into
/// named fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawKline", rename_all = "camelCase")]
pub struct Kline {
    pub open_time: i64,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub volume: Decimal,
    pub close_time: i64,
    pub quote_asset_volume: Decimal,
    pub number_of_trades: u64,
    pub taker_buy_base_asset_volume: Decimal,
    pub taker_buy_quote_asset_volume: Decimal,
}

#[derive(Deserialize)]
struct RawKline(
    i64,
    Decimal,
    Decimal,
    Decimal,
    Decimal,
    Decimal,
    i64,
    Decimal,
    u64,
    Decimal,
    Decimal,
    serde::de::IgnoredAny,
);

impl From<RawKline> for Kline {
    fn from(raw: RawKline) -> Self {
        let RawKline(
            open_time,
            open,
            high,
            low,
            close,
            volume,
            close_time,
            quote_asset_volume,
            number_of_trades,
            taker_buy_base_asset_volume,
            taker_buy_quote_asset_volume,
            _,
        ) = raw;

        Self {
            open_time,
            open,
            high,
            low,
            close,
            volume,
            close_time,
            quote_asset_volume,
            number_of_trades,
            taker_buy_base_asset_volume,
            taker_buy_quote_asset_volume,
        }
    }
}

impl Kline {
    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    /// Duration covered by this kline, given the interval it was requested with
    pub fn interval_ms(interval: KlineInterval) -> Option<i64> {
        let secs = match interval {
            KlineInterval::OneSecond => 1,
            KlineInterval::OneMinute => 60,
            KlineInterval::ThreeMinutes => 3 * 60,
            KlineInterval::FiveMinutes => 5 * 60,
            KlineInterval::FifteenMinutes => 15 * 60,
            KlineInterval::ThirtyMinutes => 30 * 60,
            KlineInterval::OneHour => 3600,
            KlineInterval::TwoHours => 2 * 3600,
            KlineInterval::FourHours => 4 * 3600,
            KlineInterval::SixHours => 6 * 3600,
            KlineInterval::EightHours => 8 * 3600,
            KlineInterval::TwelveHours => 12 * 3600,
            KlineInterval::OneDay => 86_400,
            KlineInterval::ThreeDays => 3 * 86_400,
            KlineInterval::OneWeek => 7 * 86_400,
            // calendar month, not a fixed span
            KlineInterval::OneMonth => return None,
        };
        Some(secs * 1000)
    }
}

// ### Trading

/// Response to a new order; `ACK` responses only carry the identifiers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub symbol: String,
    pub order_id: u64,
    #[serde(default = "serde_helpers::no_order_list")]
    pub order_list_id: i64,
    pub client_order_id: String,
    pub transact_time: i64,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub price: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub orig_qty: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub executed_qty: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub cummulative_quote_qty: Option<Decimal>,
    #[serde(default)]
    pub status: Option<OrderStatus>,
    #[serde(default)]
    pub time_in_force: Option<TimeInForce>,
    #[serde(rename = "type", default)]
    pub order_type: Option<OrderType>,
    #[serde(default)]
    pub side: Option<OrderSide>,
    #[serde(default)]
    pub working_time: Option<i64>,
    #[serde(default)]
    pub fills: Vec<OrderFill>,
}

impl OrderResponse {
    /// Quantity weighted fill price, if anything filled
    pub fn average_fill_price(&self) -> Option<Decimal> {
        let qty: Decimal = self.fills.iter().map(|fill| fill.qty).sum();
        if qty.is_zero() {
            return None;
        }
        let notional: Decimal = self.fills.iter().map(|fill| fill.price * fill.qty).sum();
        Some(notional / qty)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderFill {
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub qty: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub commission: Decimal,
    pub commission_asset: String,
    pub trade_id: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub symbol: String,
    pub order_id: u64,
    #[serde(default = "serde_helpers::no_order_list")]
    pub order_list_id: i64,
    pub client_order_id: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub orig_qty: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub executed_qty: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub cummulative_quote_qty: Decimal,
    pub status: OrderStatus,
    pub time_in_force: TimeInForce,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    pub side: OrderSide,
    #[serde(default, with = "serde_helpers::decimal_or_zero")]
    pub stop_price: Decimal,
    #[serde(default, with = "serde_helpers::decimal_or_zero")]
    pub iceberg_qty: Decimal,
    pub time: i64,
    pub update_time: i64,
    pub is_working: bool,
    #[serde(default)]
    pub working_time: Option<i64>,
    #[serde(default, with = "serde_helpers::decimal_or_zero")]
    pub orig_quote_order_qty: Decimal,
}

impl Order {
    pub fn remaining_qty(&self) -> Decimal {
        self.orig_qty - self.executed_qty
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelOrderResponse {
    pub symbol: String,
    pub orig_client_order_id: String,
    pub order_id: u64,
    #[serde(default = "serde_helpers::no_order_list")]
    pub order_list_id: i64,
    pub client_order_id: String,
    #[serde(default)]
    pub transact_time: Option<i64>,
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub orig_qty: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub executed_qty: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub cummulative_quote_qty: Decimal,
    pub status: OrderStatus,
    pub time_in_force: TimeInForce,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    pub side: OrderSide,
}

/// Identifiers of one leg in an order list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderListLeg {
    pub symbol: String,
    pub order_id: u64,
    pub client_order_id: String,
}

/// Cancelled order list (OCO and friends)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelOrderListResponse {
    pub order_list_id: i64,
    /// e.g. "OCO"
    pub contingency_type: String,
    pub list_status_type: String,
    pub list_order_status: String,
    pub list_client_order_id: String,
    pub transaction_time: i64,
    pub symbol: String,
    #[serde(default)]
    pub orders: Vec<OrderListLeg>,
    #[serde(default)]
    pub order_reports: Vec<CancelOrderResponse>,
}

/// One entry of a cancel-all response: a plain order or a whole order list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CancelReport {
    Order(CancelOrderResponse),
    OrderList(CancelOrderListResponse),
}

impl CancelReport {
    /// Every cancelled order carried by this entry
    pub fn order_reports(&self) -> &[CancelOrderResponse] {
        match self {
            CancelReport::Order(order) => std::slice::from_ref(order),
            CancelReport::OrderList(list) => &list.order_reports,
        }
    }
}

/// Spot account snapshot from `/api/v3/account`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradingAccountInfo {
    /// Basis points
    pub maker_commission: u32,
    pub taker_commission: u32,
    pub buyer_commission: u32,
    pub seller_commission: u32,
    pub can_trade: bool,
    pub can_withdraw: bool,
    pub can_deposit: bool,
    pub update_time: i64,
    pub account_type: String,
    #[serde(default)]
    pub balances: Vec<Balance>,
    #[serde(default)]
    pub permissions: Vec<String>,
}

impl TradingAccountInfo {
    pub fn balance(&self, asset: &str) -> Option<&Balance> {
        self.balances.iter().find(|balance| balance.asset == asset)
    }

    /// Balances with a non-zero free or locked amount
    pub fn non_zero_balances(&self) -> impl Iterator<Item = &Balance> {
        self.balances.iter().filter(|balance| !balance.total().is_zero())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Balance {
    pub asset: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub free: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub locked: Decimal,
}

impl Balance {
    pub fn total(&self) -> Decimal {
        self.free + self.locked
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    pub symbol: String,
    pub id: u64,
    pub order_id: u64,
    #[serde(default = "serde_helpers::no_order_list")]
    pub order_list_id: i64,
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub qty: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub quote_qty: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub commission: Decimal,
    pub commission_asset: String,
    pub time: i64,
    pub is_buyer: bool,
    pub is_maker: bool,
    pub is_best_match: bool,
}

mod serde_helpers {
    use super::{Decimal, WalletType};
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value;
    use std::str::FromStr;

    pub fn no_order_list() -> i64 {
        -1
    }

    pub fn spot_wallet() -> WalletType {
        WalletType::Spot
    }

    /// Amount fields the exchange sometimes sends as "" or omits
    pub mod decimal_or_zero {
        use super::*;

        pub fn deserialize<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
        where
            D: Deserializer<'de>,
        {
            let value = Value::deserialize(deserializer)?;
            if value.is_null() {
                return Ok(Decimal::ZERO);
            }

            if let Some(raw) = value.as_str() {
                if raw.trim().is_empty() {
                    return Ok(Decimal::ZERO);
                }
                return Decimal::from_str(raw).map_err(serde::de::Error::custom);
            }

            if value.is_number() {
                return Decimal::from_str(&value.to_string()).map_err(serde::de::Error::custom);
            }

            Err(serde::de::Error::custom("invalid decimal value"))
        }

        pub fn serialize<S>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            serializer.serialize_str(&value.to_string())
        }
    }
}
