/*
[INPUT]:  Order requests and account/trade queries
[OUTPUT]: Order responses, open/historical orders, fills, spot balances
[POS]:    HTTP layer - spot trading endpoints (SIGNED)
[UPDATE]: When adding new trading endpoints or changing order flow
*/

use crate::http::params::QueryParams;
use crate::http::{BinanceClient, BinanceError, Result};
use crate::types::{
    AllOrdersRequest, CancelOrderRequest, CancelOrderResponse, CancelReport, MyTradesRequest,
    NewOrderRequest, OpenOrdersRequest, Order, OrderResponse, QueryOrderRequest, Trade,
    TradingAccountInfo,
};

#[derive(Debug, Clone, Copy)]
pub struct TradingService<'a> {
    client: &'a BinanceClient,
}

impl BinanceClient {
    pub fn trading(&self) -> TradingService<'_> {
        TradingService { client: self }
    }
}

impl TradingService<'_> {
    /// Validate an order without sending it to the matching engine
    ///
    /// POST /api/v3/order/test
    pub fn test_new_order(&self, req: &NewOrderRequest) -> Result<()> {
        self.client
            .post_ack("/api/v3/order/test", &new_order_params(req), true)
    }

    /// POST /api/v3/order
    pub fn new_order(&self, req: &NewOrderRequest) -> Result<OrderResponse> {
        self.client
            .post_json("/api/v3/order", &new_order_params(req), true)
    }

    /// GET /api/v3/order
    pub fn query_order(&self, req: &QueryOrderRequest) -> Result<Order> {
        let params = order_ref_params(
            &req.symbol,
            req.order_id,
            req.orig_client_order_id.as_deref(),
        )?
        .with_opt("recvWindow", req.recv_window);

        self.client.get_json("/api/v3/order", &params, true)
    }

    /// DELETE /api/v3/order
    pub fn cancel_order(&self, req: &CancelOrderRequest) -> Result<CancelOrderResponse> {
        let params = order_ref_params(
            &req.symbol,
            req.order_id,
            req.orig_client_order_id.as_deref(),
        )?
        .with_opt("newClientOrderId", req.new_client_order_id.as_deref())
        .with_opt("recvWindow", req.recv_window);

        self.client.delete_json("/api/v3/order", &params, true)
    }

    /// Cancel every open order on a symbol, order lists included
    ///
    /// DELETE /api/v3/openOrders
    pub fn cancel_all_open_orders(
        &self,
        symbol: &str,
        recv_window: Option<u64>,
    ) -> Result<Vec<CancelReport>> {
        let params = QueryParams::new()
            .with("symbol", require_symbol(symbol)?)
            .with_opt("recvWindow", recv_window);

        self.client.delete_json("/api/v3/openOrders", &params, true)
    }

    /// GET /api/v3/openOrders
    pub fn get_open_orders(&self, req: &OpenOrdersRequest) -> Result<Vec<Order>> {
        let params = QueryParams::new()
            .with_opt("symbol", req.symbol.as_deref())
            .with_opt("recvWindow", req.recv_window);

        self.client.get_json("/api/v3/openOrders", &params, true)
    }

    /// GET /api/v3/allOrders
    pub fn get_all_orders(&self, req: &AllOrdersRequest) -> Result<Vec<Order>> {
        let params = QueryParams::new()
            .with("symbol", require_symbol(&req.symbol)?)
            .with_opt("orderId", req.order_id)
            .with_time("startTime", req.start_time)
            .with_time("endTime", req.end_time)
            .with_opt("limit", req.limit)
            .with_opt("recvWindow", req.recv_window);

        self.client.get_json("/api/v3/allOrders", &params, true)
    }

    /// Spot balances and commission rates
    ///
    /// GET /api/v3/account
    pub fn get_account_info(&self, recv_window: Option<u64>) -> Result<TradingAccountInfo> {
        let params = QueryParams::new().with_opt("recvWindow", recv_window);
        self.client.get_json("/api/v3/account", &params, true)
    }

    /// GET /api/v3/myTrades
    pub fn get_my_trades(&self, req: &MyTradesRequest) -> Result<Vec<Trade>> {
        let params = QueryParams::new()
            .with("symbol", require_symbol(&req.symbol)?)
            .with_opt("orderId", req.order_id)
            .with_time("startTime", req.start_time)
            .with_time("endTime", req.end_time)
            .with_opt("fromId", req.from_id)
            .with_opt("limit", req.limit)
            .with_opt("recvWindow", req.recv_window);

        self.client.get_json("/api/v3/myTrades", &params, true)
    }
}

fn new_order_params(req: &NewOrderRequest) -> QueryParams {
    QueryParams::new()
        .with("symbol", &req.symbol)
        .with("side", req.side)
        .with("type", req.order_type)
        .with_opt("timeInForce", req.time_in_force)
        .with_opt("quantity", req.quantity)
        .with_opt("quoteOrderQty", req.quote_order_qty)
        .with_opt("price", req.price)
        .with_opt("newClientOrderId", req.new_client_order_id.as_deref())
        .with_opt("stopPrice", req.stop_price)
        .with_opt("icebergQty", req.iceberg_qty)
        .with_opt("newOrderRespType", req.new_order_resp_type)
        .with_opt("recvWindow", req.recv_window)
}

/// `symbol` plus whichever order identifier is set; one of them is required
fn order_ref_params(
    symbol: &str,
    order_id: Option<u64>,
    orig_client_order_id: Option<&str>,
) -> Result<QueryParams> {
    let orig_client_order_id = orig_client_order_id.filter(|id| !id.is_empty());
    if order_id.is_none() && orig_client_order_id.is_none() {
        return Err(BinanceError::InvalidRequest(
            "either orderId or origClientOrderId must be set".into(),
        ));
    }

    Ok(QueryParams::new()
        .with("symbol", require_symbol(symbol)?)
        .with_opt("orderId", order_id)
        .with_opt("origClientOrderId", orig_client_order_id))
}

fn require_symbol(symbol: &str) -> Result<&str> {
    if symbol.is_empty() {
        return Err(BinanceError::InvalidRequest("symbol is required".into()));
    }
    Ok(symbol)
}
