/*
[INPUT]:  API key and secret from BINANCE_API_KEY / BINANCE_SECRET_KEY
[OUTPUT]: Wallet overview (account flags, balances, deposit address, quota)
[POS]:    Examples - read-only SIGNED wallet queries
[UPDATE]: When adding new wallet endpoints
*/

use binance_spot_adapter::*;
use tracing_subscriber::EnvFilter;

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("=== Binance Account Example ===\n");

    let client = BinanceClient::with_config(Credentials::from_env()?, ClientConfig::from_env()?)?;

    let account = client.account().get_account_info()?;
    println!(
        "✓ VIP level {} (margin: {}, futures: {})",
        account.vip_level, account.is_margin_enabled, account.is_future_enabled
    );

    let spot = client.trading().get_account_info(None)?;
    println!("\nSpot balances:");
    for balance in spot.non_zero_balances() {
        println!("  {:<8} free={} locked={}", balance.asset, balance.free, balance.locked);
    }

    match client
        .deposit()
        .get_deposit_address(&DepositAddressRequest::new("USDT").network("TRX"))
    {
        Ok(address) => println!("\n✓ USDT (TRX) deposit address: {}", address.address),
        Err(e) => println!("\n✗ Deposit address unavailable: {e}"),
    }

    let quota = client.withdrawal().get_withdrawal_quota()?;
    println!("✓ Withdrawal quota remaining today: {} USD", quota.remaining());

    println!("\n✓ Account example complete");
    Ok(())
}
