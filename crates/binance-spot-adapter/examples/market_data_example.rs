/*
[INPUT]:  Symbol identifier (e.g., "BTCUSDT")
[OUTPUT]: Market data (trading rules, klines)
[POS]:    Examples - public market data queries
[UPDATE]: When adding new market data endpoints
*/

use binance_spot_adapter::*;
use tracing_subscriber::EnvFilter;

/// Example: Query market data (no API key required)
///
/// Set `BINANCE_BASE_URL=https://testnet.binance.vision` to run against the testnet.
fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("=== Binance Market Data Example ===\n");

    let client = BinanceClient::with_config(Credentials::anonymous(), ClientConfig::from_env()?)?;
    println!("✓ HTTP client created against {}\n", client.base_url());

    let symbol = "BTCUSDT";

    println!("Querying trading rules for {symbol}...");
    let info = client
        .market()
        .get_exchange_info(&ExchangeInfoRequest::for_symbol(symbol))?;
    if let Some(rules) = info.symbol(symbol) {
        println!("✓ {} status={} base={} quote={}", rules.symbol, rules.status, rules.base_asset, rules.quote_asset);
        if let Some(price) = rules.price_filter() {
            println!("  tick size:    {}", price.tick_size);
        }
        if let Some(lot) = rules.lot_size() {
            println!("  step size:    {} (min {})", lot.step_size, lot.min_qty);
        }
        if let Some(min_notional) = rules.min_notional() {
            println!("  min notional: {min_notional}");
        }
    }

    println!("\nQuerying last 5 hourly klines for {symbol}...");
    let klines = client
        .market()
        .get_klines(&KlineRequest::new(symbol, KlineInterval::OneHour).limit(5))?;
    for kline in &klines {
        println!(
            "  {} O={} H={} L={} C={} V={}",
            kline.open_time, kline.open, kline.high, kline.low, kline.close, kline.volume
        );
    }

    println!("\n✓ Market data example complete");
    Ok(())
}
