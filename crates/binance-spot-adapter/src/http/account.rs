/*
[INPUT]:  Account/wallet requests (transfers, asset queries)
[OUTPUT]: Coin, account and asset information
[POS]:    HTTP layer - wallet endpoints (SIGNED)
[UPDATE]: When adding new wallet endpoints
*/

use crate::http::params::QueryParams;
use crate::http::{BinanceClient, Result};
use crate::types::{
    AccountInfo, AssetTransferRequest, AssetTransferResponse, CoinInfo, UserAsset,
    UserAssetRequest,
};

/// Wallet endpoints under `/sapi`
#[derive(Debug, Clone, Copy)]
pub struct AccountService<'a> {
    client: &'a BinanceClient,
}

impl BinanceClient {
    pub fn account(&self) -> AccountService<'_> {
        AccountService { client: self }
    }
}

impl AccountService<'_> {
    /// All coins with their balances and network configuration
    ///
    /// GET /sapi/v1/capital/config/getall
    pub fn get_all_coins(&self) -> Result<Vec<CoinInfo>> {
        self.client
            .get_json("/sapi/v1/capital/config/getall", &QueryParams::new(), true)
    }

    /// VIP level and margin/futures flags
    ///
    /// GET /sapi/v1/account/info
    pub fn get_account_info(&self) -> Result<AccountInfo> {
        self.client
            .get_json("/sapi/v1/account/info", &QueryParams::new(), true)
    }

    /// Move funds between wallets
    ///
    /// POST /sapi/v1/asset/transfer
    pub fn universal_transfer(&self, req: &AssetTransferRequest) -> Result<AssetTransferResponse> {
        self.client
            .post_json("/sapi/v1/asset/transfer", &transfer_params(req), true)
    }

    /// Funding assets with non-zero balance
    ///
    /// POST /sapi/v3/asset/getUserAsset
    pub fn get_user_asset(&self, req: &UserAssetRequest) -> Result<Vec<UserAsset>> {
        self.client
            .post_json("/sapi/v3/asset/getUserAsset", &user_asset_params(req), true)
    }

    /// POST /sapi/v1/account/enableFastWithdrawSwitch
    pub fn enable_fast_withdraw_switch(&self, recv_window: Option<u64>) -> Result<()> {
        let params = QueryParams::new().with_opt("recvWindow", recv_window);
        self.client
            .post_ack("/sapi/v1/account/enableFastWithdrawSwitch", &params, true)
    }
}

fn transfer_params(req: &AssetTransferRequest) -> QueryParams {
    QueryParams::new()
        .with("type", &req.transfer_type)
        .with("asset", &req.asset)
        .with("amount", req.amount)
        .with_opt("fromSymbol", req.from_symbol.as_deref())
        .with_opt("toSymbol", req.to_symbol.as_deref())
        .with_opt("recvWindow", req.recv_window)
}

fn user_asset_params(req: &UserAssetRequest) -> QueryParams {
    QueryParams::new()
        .with_opt("asset", req.asset.as_deref())
        .with_opt("needBtcValuation", req.need_btc_valuation.then_some(true))
        .with_opt("recvWindow", req.recv_window)
}
