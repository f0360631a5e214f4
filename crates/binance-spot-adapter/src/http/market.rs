/*
[INPUT]:  Symbol identifiers and query parameters
[OUTPUT]: Market data (exchange info, klines)
[POS]:    HTTP layer - public market data endpoints (no auth required)
[UPDATE]: When adding new public endpoints or changing response format
*/

use crate::http::params::QueryParams;
use crate::http::{BinanceClient, BinanceError, Result};
use crate::types::{ExchangeInfo, ExchangeInfoRequest, Kline, KlineRequest};

#[derive(Debug, Clone, Copy)]
pub struct MarketService<'a> {
    client: &'a BinanceClient,
}

impl BinanceClient {
    pub fn market(&self) -> MarketService<'_> {
        MarketService { client: self }
    }
}

impl MarketService<'_> {
    /// Trading rules and symbol information
    ///
    /// GET /api/v3/exchangeInfo
    pub fn get_exchange_info(&self, req: &ExchangeInfoRequest) -> Result<ExchangeInfo> {
        let params = exchange_info_params(req)?;
        self.client.get_json("/api/v3/exchangeInfo", &params, false)
    }

    /// GET /api/v3/klines
    pub fn get_klines(&self, req: &KlineRequest) -> Result<Vec<Kline>> {
        self.client
            .get_json("/api/v3/klines", &kline_params(req), false)
    }

    /// Klines tuned for chart display
    ///
    /// GET /api/v3/uiKlines
    pub fn get_ui_klines(&self, req: &KlineRequest) -> Result<Vec<Kline>> {
        self.client
            .get_json("/api/v3/uiKlines", &kline_params(req), false)
    }
}

fn exchange_info_params(req: &ExchangeInfoRequest) -> Result<QueryParams> {
    let mut params = QueryParams::new();

    // A non-empty `symbol` wins over `symbols`; the exchange rejects both together
    if let Some(symbol) = req.symbol.as_deref().filter(|symbol| !symbol.is_empty()) {
        params.insert("symbol", symbol);
    } else if !req.symbols.is_empty() {
        params.insert("symbols", json_array(&req.symbols)?);
    }

    if !req.permissions.is_empty() {
        params.insert("permissions", json_array(&req.permissions)?);
    }

    Ok(params)
}

fn json_array(values: &[String]) -> Result<String> {
    serde_json::to_string(values).map_err(|source| BinanceError::RequestBody {
        endpoint: "GET /api/v3/exchangeInfo".into(),
        source,
    })
}

fn kline_params(req: &KlineRequest) -> QueryParams {
    QueryParams::new()
        .with("symbol", &req.symbol)
        .with("interval", req.interval)
        .with_time("startTime", req.start_time)
        .with_time("endTime", req.end_time)
        .with_opt("timeZone", req.time_zone.as_deref())
        .with_opt("limit", req.limit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::KlineInterval;

    #[test]
    fn test_exchange_info_symbols_encoded_as_json_array() {
        let req = ExchangeInfoRequest {
            symbols: vec!["BTCUSDT".into(), "BNBUSDT".into()],
            ..Default::default()
        };
        let params = exchange_info_params(&req).unwrap();

        assert_eq!(params.get("symbols"), Some(r#"["BTCUSDT","BNBUSDT"]"#));
        assert_eq!(
            params.to_query_string(),
            "symbols=%5B%22BTCUSDT%22%2C%22BNBUSDT%22%5D"
        );
    }

    #[test]
    fn test_exchange_info_symbol_takes_precedence() {
        let req = ExchangeInfoRequest {
            symbol: Some("ETHBTC".into()),
            symbols: vec!["BTCUSDT".into()],
            permissions: vec!["SPOT".into()],
        };
        let params = exchange_info_params(&req).unwrap();

        assert_eq!(params.get("symbol"), Some("ETHBTC"));
        assert_eq!(params.get("symbols"), None);
        assert_eq!(params.get("permissions"), Some(r#"["SPOT"]"#));
    }

    #[test]
    fn test_exchange_info_empty_symbol_falls_through_to_symbols() {
        let req = ExchangeInfoRequest {
            symbol: Some(String::new()),
            symbols: vec!["BTCUSDT".into(), "ETHUSDT".into()],
            ..Default::default()
        };
        let params = exchange_info_params(&req).unwrap();

        assert_eq!(params.get("symbol"), None);
        assert_eq!(params.get("symbols"), Some(r#"["BTCUSDT","ETHUSDT"]"#));
    }

    #[test]
    fn test_exchange_info_default_has_no_params() {
        let params = exchange_info_params(&ExchangeInfoRequest::default()).unwrap();
        assert!(params.is_empty());
    }

    #[test]
    fn test_kline_params() {
        let req = KlineRequest::new("BTCUSDT", KlineInterval::FifteenMinutes).limit(3);

        assert_eq!(
            kline_params(&req).to_query_string(),
            "interval=15m&limit=3&symbol=BTCUSDT"
        );
    }
}
