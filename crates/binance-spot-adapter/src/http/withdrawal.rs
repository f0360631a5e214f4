/*
[INPUT]:  Withdrawal requests and history filters
[OUTPUT]: Withdrawal ids, records, quota and address book
[POS]:    HTTP layer - withdrawal endpoints (SIGNED)
[UPDATE]: When adding new withdrawal endpoints
*/

use crate::http::params::QueryParams;
use crate::http::{BinanceClient, BinanceError, Result};
use crate::types::{
    WithdrawalAddress, WithdrawalHistoryRequest, WithdrawalQuota, WithdrawalRecord,
    WithdrawalRequest, WithdrawalResponse,
};

/// Most ids accepted by `idList` in one call
const MAX_ID_LIST: usize = 45;

#[derive(Debug, Clone, Copy)]
pub struct WithdrawalService<'a> {
    client: &'a BinanceClient,
}

impl BinanceClient {
    pub fn withdrawal(&self) -> WithdrawalService<'_> {
        WithdrawalService { client: self }
    }
}

impl WithdrawalService<'_> {
    /// Submit a withdrawal
    ///
    /// POST /sapi/v1/capital/withdraw/apply
    pub fn withdraw(&self, req: &WithdrawalRequest) -> Result<WithdrawalResponse> {
        self.client
            .post_json("/sapi/v1/capital/withdraw/apply", &withdraw_params(req), true)
    }

    /// GET /sapi/v1/capital/withdraw/history
    pub fn get_withdrawal_history(
        &self,
        req: &WithdrawalHistoryRequest,
    ) -> Result<Vec<WithdrawalRecord>> {
        let params = history_params(req)?;
        self.client
            .get_json("/sapi/v1/capital/withdraw/history", &params, true)
    }

    /// Remaining 24h withdrawal quota
    ///
    /// GET /sapi/v1/capital/withdraw/quota
    pub fn get_withdrawal_quota(&self) -> Result<WithdrawalQuota> {
        self.client
            .get_json("/sapi/v1/capital/withdraw/quota", &QueryParams::new(), true)
    }

    /// GET /sapi/v1/capital/withdraw/address/list
    pub fn get_withdrawal_address_list(&self) -> Result<Vec<WithdrawalAddress>> {
        self.client
            .get_json("/sapi/v1/capital/withdraw/address/list", &QueryParams::new(), true)
    }
}

fn withdraw_params(req: &WithdrawalRequest) -> QueryParams {
    QueryParams::new()
        .with("coin", &req.coin)
        .with("address", &req.address)
        .with("amount", req.amount)
        .with_opt("network", req.network.as_deref())
        .with_opt("addressTag", req.address_tag.as_deref())
        .with_opt("withdrawOrderId", req.withdraw_order_id.as_deref())
        .with_opt("transactionFeeFlag", req.transaction_fee_flag.then_some(true))
        .with_opt("name", req.name.as_deref())
        .with_opt("walletType", req.wallet_type)
        .with_opt("recvWindow", req.recv_window)
}

fn history_params(req: &WithdrawalHistoryRequest) -> Result<QueryParams> {
    if req.id_list.len() > MAX_ID_LIST {
        return Err(BinanceError::InvalidRequest(format!(
            "idList accepts at most {MAX_ID_LIST} ids, got {}",
            req.id_list.len()
        )));
    }

    let id_list = (!req.id_list.is_empty()).then(|| req.id_list.join(","));

    Ok(QueryParams::new()
        .with_opt("coin", req.coin.as_deref())
        .with_opt("withdrawOrderId", req.withdraw_order_id.as_deref())
        .with_opt("status", req.status)
        .with_time("startTime", req.start_time)
        .with_time("endTime", req.end_time)
        .with_opt("offset", req.offset)
        .with_opt("limit", req.limit)
        .with_opt("idList", id_list)
        .with_opt("recvWindow", req.recv_window))
}
