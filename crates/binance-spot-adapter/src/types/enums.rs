/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust enums with explicit wire strings / codes
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use std::fmt;

use serde::{Deserialize, Serialize};

/// Implements `as_str` and `Display` from a variant => wire string table.
macro_rules! wire_str {
    ($ty:ident { $($variant:ident => $wire:literal),+ $(,)? }) => {
        impl $ty {
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $($ty::$variant => $wire,)+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderSide {
    Buy,
    Sell,
}

wire_str!(OrderSide { Buy => "BUY", Sell => "SELL" });

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    Limit,
    Market,
    StopLoss,
    StopLossLimit,
    TakeProfit,
    TakeProfitLimit,
    LimitMaker,
}

wire_str!(OrderType {
    Limit => "LIMIT",
    Market => "MARKET",
    StopLoss => "STOP_LOSS",
    StopLossLimit => "STOP_LOSS_LIMIT",
    TakeProfit => "TAKE_PROFIT",
    TakeProfitLimit => "TAKE_PROFIT_LIMIT",
    LimitMaker => "LIMIT_MAKER",
});

/*
GTC: good till cancelled, stays on the book until cancelled
IOC: immediate or cancel, fills what it can then expires
FOK: fill or kill, expires unless fully filled on arrival
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TimeInForce {
    Gtc,
    Ioc,
    Fok,
}

wire_str!(TimeInForce { Gtc => "GTC", Ioc => "IOC", Fok => "FOK" });

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    New,
    PendingNew,
    PartiallyFilled,
    Filled,
    Canceled,
    PendingCancel,
    Rejected,
    Expired,
    ExpiredInMatch,
}

wire_str!(OrderStatus {
    New => "NEW",
    PendingNew => "PENDING_NEW",
    PartiallyFilled => "PARTIALLY_FILLED",
    Filled => "FILLED",
    Canceled => "CANCELED",
    PendingCancel => "PENDING_CANCEL",
    Rejected => "REJECTED",
    Expired => "EXPIRED",
    ExpiredInMatch => "EXPIRED_IN_MATCH",
});

impl OrderStatus {
    /// No further fills can happen
    pub fn is_final(&self) -> bool {
        matches!(
            self,
            OrderStatus::Filled
                | OrderStatus::Canceled
                | OrderStatus::Rejected
                | OrderStatus::Expired
                | OrderStatus::ExpiredInMatch
        )
    }
}

/// Level of detail returned when placing an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderResponseType {
    Ack,
    Result,
    Full,
}

wire_str!(OrderResponseType { Ack => "ACK", Result => "RESULT", Full => "FULL" });

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KlineInterval {
    #[serde(rename = "1s")]
    OneSecond,
    #[serde(rename = "1m")]
    OneMinute,
    #[serde(rename = "3m")]
    ThreeMinutes,
    #[serde(rename = "5m")]
    FiveMinutes,
    #[serde(rename = "15m")]
    FifteenMinutes,
    #[serde(rename = "30m")]
    ThirtyMinutes,
    #[serde(rename = "1h")]
    OneHour,
    #[serde(rename = "2h")]
    TwoHours,
    #[serde(rename = "4h")]
    FourHours,
    #[serde(rename = "6h")]
    SixHours,
    #[serde(rename = "8h")]
    EightHours,
    #[serde(rename = "12h")]
    TwelveHours,
    #[serde(rename = "1d")]
    OneDay,
    #[serde(rename = "3d")]
    ThreeDays,
    #[serde(rename = "1w")]
    OneWeek,
    #[serde(rename = "1M")]
    OneMonth,
}

wire_str!(KlineInterval {
    OneSecond => "1s",
    OneMinute => "1m",
    ThreeMinutes => "3m",
    FiveMinutes => "5m",
    FifteenMinutes => "15m",
    ThirtyMinutes => "30m",
    OneHour => "1h",
    TwoHours => "2h",
    FourHours => "4h",
    SixHours => "6h",
    EightHours => "8h",
    TwelveHours => "12h",
    OneDay => "1d",
    ThreeDays => "3d",
    OneWeek => "1w",
    OneMonth => "1M",
});

/// Implements lossless conversion from/to the numeric wire code, keeping
/// unrecognised codes in `Other`.
macro_rules! wire_code {
    ($ty:ident { $($variant:ident => $code:literal),+ $(,)? }) => {
        impl From<u8> for $ty {
            fn from(code: u8) -> Self {
                match code {
                    $($code => $ty::$variant,)+
                    other => $ty::Other(other),
                }
            }
        }

        impl From<$ty> for u8 {
            fn from(value: $ty) -> u8 {
                match value {
                    $($ty::$variant => $code,)+
                    $ty::Other(code) => code,
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", u8::from(*self))
            }
        }
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum DepositStatus {
    Pending,
    Success,
    Rejected,
    CreditedCannotWithdraw,
    WrongDeposit,
    WaitingUserConfirm,
    Other(u8),
}

wire_code!(DepositStatus {
    Pending => 0,
    Success => 1,
    Rejected => 2,
    CreditedCannotWithdraw => 6,
    WrongDeposit => 7,
    WaitingUserConfirm => 8,
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum WithdrawStatus {
    EmailSent,
    Cancelled,
    AwaitingApproval,
    Rejected,
    Processing,
    Failure,
    Completed,
    Other(u8),
}

wire_code!(WithdrawStatus {
    EmailSent => 0,
    Cancelled => 1,
    AwaitingApproval => 2,
    Rejected => 3,
    Processing => 4,
    Failure => 5,
    Completed => 6,
});

/// Wallet a withdrawal is funded from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum WalletType {
    Spot,
    Funding,
    Other(u8),
}

wire_code!(WalletType { Spot => 0, Funding => 1 });
