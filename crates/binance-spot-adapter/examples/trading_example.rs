/*
[INPUT]:  API credentials and order parameters
[OUTPUT]: Order validation result and open orders
[POS]:    Examples - order flow against the test endpoint
[UPDATE]: When adding new trading endpoints or changing order flow
*/

use binance_spot_adapter::*;
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

/// Example: validate a limit order without placing it
///
/// Uses `POST /api/v3/order/test`, so nothing reaches the matching engine.
fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("=== Binance Trading Example ===\n");

    let client = BinanceClient::with_config(Credentials::from_env()?, ClientConfig::from_env()?)?;
    let symbol = "BTCUSDT";

    // Snap the order onto the symbol's price and quantity grid
    let info = client
        .market()
        .get_exchange_info(&ExchangeInfoRequest::for_symbol(symbol))?;
    let rules = info
        .symbol(symbol)
        .ok_or_else(|| format!("{symbol} not listed"))?;
    let tick = rules.price_filter().map(|f| f.tick_size).unwrap_or(Decimal::new(1, 2));
    let step = rules.lot_size().map(|f| f.step_size).unwrap_or(Decimal::new(1, 5));

    let price = (Decimal::new(20_000, 0) / tick).floor() * tick;
    let quantity = (Decimal::new(1, 3) / step).ceil() * step;

    let order = NewOrderRequest::limit(symbol, OrderSide::Buy, quantity, price)
        .client_order_id("example-order-1");
    println!("Validating {} {} {} @ {}...", order.side, quantity, symbol, price);

    match client.trading().test_new_order(&order) {
        Ok(()) => println!("✓ Order accepted by the test endpoint"),
        Err(e) => match e.api_error_payload() {
            Some(payload) => println!("✗ Rejected: [{}] {}", payload.code, payload.msg),
            None => println!("✗ Error: {e}"),
        },
    }

    let open = client.trading().get_open_orders(&OpenOrdersRequest {
        symbol: Some(symbol.to_string()),
        recv_window: Some(5000),
    })?;
    println!("\nOpen orders on {symbol}: {}", open.len());
    for order in &open {
        println!(
            "  #{} {} {} {}/{} @ {} ({})",
            order.order_id, order.side, order.order_type, order.executed_qty, order.orig_qty, order.price, order.status
        );
    }

    println!("\n✓ Trading example complete");
    Ok(())
}
