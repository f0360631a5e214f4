/*
[INPUT]:  `filters` arrays of exchangeInfo symbols
[OUTPUT]: SymbolFilter tagged union keyed by `filterType`
[POS]:    Data layer - trading rule definitions
[UPDATE]: When the exchange adds a filter type worth modelling
*/

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Price bounds and tick size for limit prices
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceFilter {
    #[serde(with = "rust_decimal::serde::str")]
    pub min_price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub max_price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub tick_size: Decimal,
}

/// Quantity bounds and step size, used by both `LOT_SIZE` and `MARKET_LOT_SIZE`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LotSizeFilter {
    #[serde(with = "rust_decimal::serde::str")]
    pub min_qty: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub max_qty: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub step_size: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "filterType", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SymbolFilter {
    PriceFilter(PriceFilter),
    LotSize(LotSizeFilter),
    MarketLotSize(LotSizeFilter),
    #[serde(rename_all = "camelCase")]
    MinNotional {
        #[serde(with = "rust_decimal::serde::str")]
        min_notional: Decimal,
        #[serde(default)]
        apply_to_market: bool,
        #[serde(default)]
        avg_price_mins: u32,
    },
    #[serde(rename_all = "camelCase")]
    Notional {
        #[serde(with = "rust_decimal::serde::str")]
        min_notional: Decimal,
        #[serde(default)]
        apply_min_to_market: bool,
        #[serde(default, with = "rust_decimal::serde::str_option")]
        max_notional: Option<Decimal>,
        #[serde(default)]
        apply_max_to_market: bool,
        #[serde(default)]
        avg_price_mins: u32,
    },
    IcebergParts {
        limit: u32,
    },
    #[serde(rename_all = "camelCase")]
    MaxNumOrders {
        #[serde(alias = "limit")]
        max_num_orders: u32,
    },
    #[serde(rename_all = "camelCase")]
    MaxNumAlgoOrders {
        #[serde(alias = "limit")]
        max_num_algo_orders: u32,
    },
    #[serde(rename_all = "camelCase")]
    MaxNumIcebergOrders {
        max_num_iceberg_orders: u32,
    },
    #[serde(rename_all = "camelCase")]
    MaxPosition {
        #[serde(with = "rust_decimal::serde::str")]
        max_position: Decimal,
    },
    #[serde(rename_all = "camelCase")]
    PercentPrice {
        #[serde(with = "rust_decimal::serde::str")]
        multiplier_up: Decimal,
        #[serde(with = "rust_decimal::serde::str")]
        multiplier_down: Decimal,
        #[serde(default)]
        avg_price_mins: u32,
    },
    #[serde(rename_all = "camelCase")]
    PercentPriceBySide {
        #[serde(with = "rust_decimal::serde::str")]
        bid_multiplier_up: Decimal,
        #[serde(with = "rust_decimal::serde::str")]
        bid_multiplier_down: Decimal,
        #[serde(with = "rust_decimal::serde::str")]
        ask_multiplier_up: Decimal,
        #[serde(with = "rust_decimal::serde::str")]
        ask_multiplier_down: Decimal,
        #[serde(default)]
        avg_price_mins: u32,
    },
    /// Deltas in basis points
    #[serde(rename_all = "camelCase")]
    TrailingDelta {
        min_trailing_above_delta: u32,
        max_trailing_above_delta: u32,
        min_trailing_below_delta: u32,
        max_trailing_below_delta: u32,
    },
    /// Filter types this crate does not model yet
    #[serde(other)]
    Unknown,
}

impl SymbolFilter {
    /// Minimum order value, from either `MIN_NOTIONAL` or `NOTIONAL`
    pub fn min_notional(&self) -> Option<Decimal> {
        match self {
            SymbolFilter::MinNotional { min_notional, .. }
            | SymbolFilter::Notional { min_notional, .. } => Some(*min_notional),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn dec(value: &str) -> Decimal {
        value.parse().unwrap()
    }

    #[test]
    fn test_price_filter() {
        let filter: SymbolFilter = serde_json::from_value(json!({
            "filterType": "PRICE_FILTER",
            "minPrice": "0.01000000",
            "maxPrice": "1000000.00000000",
            "tickSize": "0.01000000"
        }))
        .unwrap();

        assert_eq!(
            filter,
            SymbolFilter::PriceFilter(PriceFilter {
                min_price: dec("0.01"),
                max_price: dec("1000000"),
                tick_size: dec("0.01"),
            })
        );
    }

    #[test]
    fn test_lot_size_and_market_lot_size_share_shape() {
        let lot: SymbolFilter = serde_json::from_value(json!({
            "filterType": "LOT_SIZE",
            "minQty": "0.00001000",
            "maxQty": "9000.00000000",
            "stepSize": "0.00001000"
        }))
        .unwrap();
        let market: SymbolFilter = serde_json::from_value(json!({
            "filterType": "MARKET_LOT_SIZE",
            "minQty": "0.00000000",
            "maxQty": "85.43",
            "stepSize": "0.00000000"
        }))
        .unwrap();

        match (lot, market) {
            (SymbolFilter::LotSize(lot), SymbolFilter::MarketLotSize(market)) => {
                assert_eq!(lot.step_size, dec("0.00001"));
                assert_eq!(market.max_qty, dec("85.43"));
            }
            other => panic!("unexpected filters: {other:?}"),
        }
    }

    #[test]
    fn test_notional_variants_expose_min_notional() {
        let notional: SymbolFilter = serde_json::from_value(json!({
            "filterType": "NOTIONAL",
            "minNotional": "5.00000000",
            "applyMinToMarket": true,
            "maxNotional": "9000000.00000000",
            "applyMaxToMarket": false,
            "avgPriceMins": 5
        }))
        .unwrap();
        let legacy: SymbolFilter = serde_json::from_value(json!({
            "filterType": "MIN_NOTIONAL",
            "minNotional": "10.00000000",
            "applyToMarket": true,
            "avgPriceMins": 5
        }))
        .unwrap();

        assert_eq!(notional.min_notional(), Some(dec("5")));
        assert_eq!(legacy.min_notional(), Some(dec("10")));
    }

    #[test]
    fn test_count_filters() {
        let orders: SymbolFilter =
            serde_json::from_value(json!({"filterType": "MAX_NUM_ORDERS", "maxNumOrders": 200}))
                .unwrap();
        let iceberg: SymbolFilter =
            serde_json::from_value(json!({"filterType": "ICEBERG_PARTS", "limit": 10})).unwrap();

        assert_eq!(orders, SymbolFilter::MaxNumOrders { max_num_orders: 200 });
        assert_eq!(iceberg, SymbolFilter::IcebergParts { limit: 10 });
        assert_eq!(orders.min_notional(), None);
    }

    #[test]
    fn test_trailing_delta() {
        let filter: SymbolFilter = serde_json::from_value(json!({
            "filterType": "TRAILING_DELTA",
            "minTrailingAboveDelta": 10,
            "maxTrailingAboveDelta": 2000,
            "minTrailingBelowDelta": 10,
            "maxTrailingBelowDelta": 2000
        }))
        .unwrap();

        assert!(matches!(
            filter,
            SymbolFilter::TrailingDelta {
                max_trailing_above_delta: 2000,
                ..
            }
        ));
    }

    #[test]
    fn test_unknown_filter_type_still_decodes() {
        let filter: SymbolFilter = serde_json::from_value(json!({
            "filterType": "EXCHANGE_MAX_NUM_ORDERS",
            "maxNumOrders": 1000
        }))
        .unwrap();

        assert_eq!(filter, SymbolFilter::Unknown);
    }
}
