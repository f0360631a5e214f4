/*
[INPUT]:  Deposit address / history requests
[OUTPUT]: Deposit addresses and deposit records
[POS]:    HTTP layer - deposit endpoints (SIGNED)
[UPDATE]: When adding new deposit endpoints
*/

use crate::http::params::QueryParams;
use crate::http::{BinanceClient, Result};
use crate::types::{DepositAddress, DepositAddressRequest, DepositHistoryRequest, DepositRecord};

#[derive(Debug, Clone, Copy)]
pub struct DepositService<'a> {
    client: &'a BinanceClient,
}

impl BinanceClient {
    pub fn deposit(&self) -> DepositService<'_> {
        DepositService { client: self }
    }
}

impl DepositService<'_> {
    /// GET /sapi/v1/capital/deposit/address
    pub fn get_deposit_address(&self, req: &DepositAddressRequest) -> Result<DepositAddress> {
        let params = QueryParams::new()
            .with("coin", &req.coin)
            .with_opt("network", req.network.as_deref())
            .with_opt("recvWindow", req.recv_window);

        self.client
            .get_json("/sapi/v1/capital/deposit/address", &params, true)
    }

    /// GET /sapi/v1/capital/deposit/hisrec
    pub fn get_deposit_history(&self, req: &DepositHistoryRequest) -> Result<Vec<DepositRecord>> {
        self.client
            .get_json("/sapi/v1/capital/deposit/hisrec", &history_params(req), true)
    }
}

fn history_params(req: &DepositHistoryRequest) -> QueryParams {
    QueryParams::new()
        .with_opt("coin", req.coin.as_deref())
        .with_opt("status", req.status)
        .with_time("startTime", req.start_time)
        .with_time("endTime", req.end_time)
        .with_opt("offset", req.offset)
        .with_opt("limit", req.limit)
        .with_opt("recvWindow", req.recv_window)
        .with_opt("txId", req.tx_id.as_deref())
}
