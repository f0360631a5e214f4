/*
[INPUT]:  Mock HTTP responses
[OUTPUT]: Test results for the signing transport
[POS]:    Integration tests - HTTP transport
[UPDATE]: When transport behavior changes
*/

mod common;

use std::time::Duration;

use binance_spot_adapter::http::API_KEY_HEADER;
use binance_spot_adapter::{BinanceClient, BinanceError, ClientConfig, QueryParams, RequestSigner};
use common::{TEST_API_KEY, blocking, query_pairs, setup_mock_server, test_client, test_credentials};
use serde_json::json;
use tokio_test::{assert_err, assert_ok};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, ResponseTemplate};

#[test]
fn test_client_creation() {
    let _client = assert_ok!(BinanceClient::new(test_credentials()));
    let _public = assert_ok!(BinanceClient::public());
}

#[test]
fn test_client_rejects_malformed_base_url() {
    let config = ClientConfig::default().with_base_url("not a url");
    let err = assert_err!(BinanceClient::with_config(test_credentials(), config));
    assert!(matches!(err, BinanceError::Config(_)));
}

#[tokio::test]
async fn test_unsigned_get_without_params_has_no_query() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/api/v3/ping"))
        .and(header(API_KEY_HEADER, TEST_API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .mount(&server)
        .await;

    let uri = server.uri();
    let body = blocking(move || {
        test_client(&uri).get("/api/v3/ping", &QueryParams::new(), false)
    })
    .await;
    assert_eq!(assert_ok!(body).as_ref(), b"{}");

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url.query(), None);
    assert!(!requests[0].url.as_str().contains('?'));
    assert!(requests[0].headers.get("content-type").is_none());
}

#[tokio::test]
async fn test_unsigned_get_sends_canonical_query_without_timestamp() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/api/v3/klines"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .mount(&server)
        .await;

    let uri = server.uri();
    let result = blocking(move || {
        let params = QueryParams::new().with("symbol", "BTCUSDT").with("limit", 10);
        test_client(&uri).get("/api/v3/klines", &params, false)
    })
    .await;
    assert_ok!(result);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.query(), Some("limit=10&symbol=BTCUSDT"));
}

#[tokio::test]
async fn test_signed_get_carries_timestamp_signature_and_api_key() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/api/v3/account"))
        .and(header(API_KEY_HEADER, TEST_API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .mount(&server)
        .await;

    let uri = server.uri();
    let result = blocking(move || {
        let params = QueryParams::new().with("symbol", "BTCUSDT").with("recvWindow", 5000);
        test_client(&uri).get("/api/v3/account", &params, true)
    })
    .await;
    assert_ok!(result);

    let requests = server.received_requests().await.unwrap();
    let query = requests[0].url.query().expect("signed request has a query");
    let (signed_part, signature) = query
        .rsplit_once("&signature=")
        .expect("signature is the last parameter");

    let keys: Vec<String> = query_pairs(signed_part).into_iter().map(|(k, _)| k).collect();
    assert_eq!(keys, ["recvWindow", "symbol", "timestamp"]);

    // The server can reproduce the signature over exactly what was sent
    let signer = RequestSigner::new(test_credentials());
    assert_eq!(signer.generate_signature(signed_part), signature);
}

#[tokio::test]
async fn test_signed_get_with_empty_params_sends_only_timestamp_and_signature() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/sapi/v1/capital/withdraw/quota"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .mount(&server)
        .await;

    let uri = server.uri();
    let result = blocking(move || {
        test_client(&uri).get("/sapi/v1/capital/withdraw/quota", &QueryParams::new(), true)
    })
    .await;
    assert_ok!(result);

    let requests = server.received_requests().await.unwrap();
    let pairs = query_pairs(requests[0].url.query().unwrap());
    assert_eq!(pairs.len(), 2);
    assert_eq!(pairs[0].0, "timestamp");
    assert!(pairs[0].1.parse::<i64>().is_ok());
    assert_eq!(pairs[1].0, "signature");
    assert_eq!(pairs[1].1.len(), 64);
}

#[tokio::test]
async fn test_api_error_keeps_status_and_raw_body() {
    let server = setup_mock_server().await;
    let error_body = r#"{"code":-1121,"msg":"Invalid symbol."}"#;
    Mock::given(method("GET"))
        .and(path("/api/v3/exchangeInfo"))
        .respond_with(ResponseTemplate::new(400).set_body_string(error_body))
        .mount(&server)
        .await;

    let uri = server.uri();
    let result = blocking(move || {
        let params = QueryParams::new().with("symbol", "NOPE");
        test_client(&uri).get("/api/v3/exchangeInfo", &params, false)
    })
    .await;
    let err = assert_err!(result);

    assert!(err.is_api_error());
    assert_eq!(err.status(), Some(400));
    let message = err.to_string();
    assert!(message.contains("400"));
    assert!(message.contains("Invalid symbol."));
    assert_eq!(err.endpoint(), Some("GET /api/v3/exchangeInfo"));
    assert_eq!(err.api_error_payload().map(|p| p.code), Some(-1121));
}

#[tokio::test]
async fn test_non_200_success_status_is_still_an_error() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/api/v3/order"))
        .respond_with(ResponseTemplate::new(202).set_body_string("accepted"))
        .mount(&server)
        .await;

    let uri = server.uri();
    let result = blocking(move || {
        test_client(&uri).post::<()>("/api/v3/order", &QueryParams::new(), None, true)
    })
    .await;
    let err = assert_err!(result);

    match err {
        BinanceError::Api { status, body, .. } => {
            assert_eq!(status, 202);
            assert_eq!(body, "accepted");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_post_with_body_sets_json_content_type() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/sapi/v1/echo"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .mount(&server)
        .await;

    let uri = server.uri();
    let result = blocking(move || {
        let body = json!({"note": "hello"});
        let params = QueryParams::new().with("asset", "BTC");
        test_client(&uri).post("/sapi/v1/echo", &params, Some(&body), true)
    })
    .await;
    assert_ok!(result);

    let requests = server.received_requests().await.unwrap();
    let sent: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(sent, json!({"note": "hello"}));
    // Parameters still travel in the query string
    assert!(requests[0].url.query().unwrap().starts_with("asset=BTC&timestamp="));
}

#[tokio::test]
async fn test_post_without_body_sends_params_in_query_only() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/api/v3/order/test"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .mount(&server)
        .await;

    let uri = server.uri();
    let result = blocking(move || {
        let params = QueryParams::new().with("symbol", "BTCUSDT").with("side", "BUY");
        test_client(&uri).post::<()>("/api/v3/order/test", &params, None, true)
    })
    .await;
    assert_ok!(result);

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].body.is_empty());
    assert!(requests[0].headers.get("content-type").is_none());
    assert!(requests[0].url.query().unwrap().starts_with("side=BUY&symbol=BTCUSDT&timestamp="));
}

#[tokio::test]
async fn test_delete_request() {
    let server = setup_mock_server().await;
    Mock::given(method("DELETE"))
        .and(path("/api/v3/openOrders"))
        .and(header(API_KEY_HEADER, TEST_API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .mount(&server)
        .await;

    let uri = server.uri();
    let result = blocking(move || {
        let params = QueryParams::new().with("symbol", "BTCUSDT");
        test_client(&uri).delete("/api/v3/openOrders", &params, true)
    })
    .await;
    assert_eq!(assert_ok!(result).as_ref(), b"[]");
}

#[tokio::test]
async fn test_set_base_url_redirects_subsequent_calls() {
    let primary = setup_mock_server().await;
    let sandbox = setup_mock_server().await;
    for server in [&primary, &sandbox] {
        Mock::given(method("GET"))
            .and(path("/api/v3/ping"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
            .mount(server)
            .await;
    }

    let primary_uri = primary.uri();
    let sandbox_uri = sandbox.uri();
    let result = blocking(move || {
        let mut client = test_client(&primary_uri);
        client.get("/api/v3/ping", &QueryParams::new(), false)?;
        client.set_base_url(format!("{sandbox_uri}/"));
        assert_eq!(client.base_url(), sandbox_uri);
        client.get("/api/v3/ping", &QueryParams::new(), false)
    })
    .await;
    assert_ok!(result);

    assert_eq!(primary.received_requests().await.unwrap().len(), 1);
    assert_eq!(sandbox.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_timeout_is_a_transport_error() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/api/v3/ping"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("{}")
                .set_delay(Duration::from_millis(1500)),
        )
        .mount(&server)
        .await;

    let uri = server.uri();
    let result = blocking(move || {
        let mut client = test_client(&uri);
        client.set_timeout(Duration::from_millis(100));
        client.get("/api/v3/ping", &QueryParams::new(), false)
    })
    .await;
    let err = assert_err!(result);

    assert!(matches!(err, BinanceError::Transport { .. }));
    assert!(err.is_timeout());
    assert!(!err.is_api_error());
}

#[tokio::test]
async fn test_connection_refused_is_a_transport_error() {
    let result = blocking(|| {
        let client = test_client("http://127.0.0.1:1");
        client.get("/api/v3/ping", &QueryParams::new(), false)
    })
    .await;
    let err = assert_err!(result);

    match &err {
        BinanceError::Transport { endpoint, .. } => assert_eq!(endpoint, "GET /api/v3/ping"),
        other => panic!("expected Transport error, got {other:?}"),
    }
    assert_eq!(err.status(), None);
}
