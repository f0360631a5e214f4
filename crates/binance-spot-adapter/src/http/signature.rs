/*
[INPUT]:  Request parameters and API credentials
[OUTPUT]: Signed query strings (timestamp + HMAC-SHA256 signature) and API key header
[POS]:    HTTP layer - request signing for SIGNED endpoints
[UPDATE]: When changing signing algorithm, canonicalization or header format
*/

use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use super::client::Credentials;
use super::params::QueryParams;

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the API key on every request
pub const API_KEY_HEADER: &str = "X-MBX-APIKEY";

/// Signs query strings for authenticated endpoints
///
/// Stateless apart from the credentials it was built with, so a single signer
/// can be shared across threads.
#[derive(Debug, Clone)]
pub struct RequestSigner {
    credentials: Credentials,
}

impl RequestSigner {
    /// Create a new request signer bound to the given credentials
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }

    pub fn api_key(&self) -> &str {
        self.credentials.api_key()
    }

    /// Sign a parameter set using the current time
    ///
    /// Format: "{canonical query incl. timestamp}&signature={hex hmac}"
    pub fn sign(&self, params: &QueryParams) -> String {
        self.sign_at(params, Utc::now().timestamp_millis())
    }

    /// Sign a parameter set with an explicit `timestamp` in epoch milliseconds
    pub fn sign_at(&self, params: &QueryParams, timestamp_ms: i64) -> String {
        let params = params.clone().with("timestamp", timestamp_ms);
        let query_string = self.build_query_string(&params);
        let signature = self.generate_signature(&query_string);
        format!("{query_string}&signature={signature}")
    }

    /// Canonical query string: sorted by key, empty values dropped, values escaped
    pub fn build_query_string(&self, params: &QueryParams) -> String {
        params.to_query_string()
    }

    /// Lower-case hex HMAC-SHA256 of `query_string`, keyed by the secret key
    pub fn generate_signature(&self, query_string: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(self.credentials.expose_secret().as_bytes())
            .expect("HMAC accepts keys of any length");
        mac.update(query_string.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    /// Headers attached to every request, signed or not
    pub fn headers(&self) -> [(&'static str, &str); 1] {
        [(API_KEY_HEADER, self.credentials.api_key())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_signer() -> RequestSigner {
        RequestSigner::new(Credentials::new("test-key", "testsecret"))
    }

    fn split_signature(signed: &str) -> (&str, &str) {
        signed
            .rsplit_once("&signature=")
            .expect("signed query must carry a signature")
    }

    #[test]
    fn test_generate_signature_pinned() {
        let signature = test_signer().generate_signature("symbol=BTCUSDT&timestamp=1000000000000");
        assert_eq!(
            signature,
            "d99f12aee610d9e64b54bcca49cf27d3dd4de16bc5cee104b9af4cc398763ade"
        );
    }

    #[test]
    fn test_generate_signature_known_vector() {
        // Example from the exchange's SIGNED endpoint documentation
        let signer = RequestSigner::new(Credentials::new(
            "vmPUZE6mv9SD5VNHk4HlWFsOr6aKE2zvsw0MuIgwCIPy6utIco14y7Ju91duEh8A",
            "NhqPtmdSJYdKjVHjA7PZj4Mge3R5YNiP1e3UZjInClVN65XAbvqqM6A7H5fATj0j",
        ));
        let query = "symbol=LTCBTC&side=BUY&type=LIMIT&timeInForce=GTC&quantity=1&price=0.1&recvWindow=5000&timestamp=1499827319559";

        assert_eq!(
            signer.generate_signature(query),
            "c8db56825ae71d6d79447849e617115f4a920fa2acdcab2b053c4b2838bd6b71"
        );
    }

    #[test]
    fn test_generate_signature_deterministic() {
        let signer = test_signer();
        for query in ["", "a=1", "symbol=ETHUSDT&limit=5&timestamp=1"] {
            assert_eq!(signer.generate_signature(query), signer.generate_signature(query));
        }
    }

    #[test]
    fn test_sign_at_empty_params() {
        let signed = test_signer().sign_at(&QueryParams::new(), 1_000_000_000_000);
        assert_eq!(
            signed,
            "timestamp=1000000000000&signature=de23a2994db5a729575f0898b539094e9d865c8f3562a5a6b1be8d189d245812"
        );
    }

    #[test]
    fn test_sign_at_matches_pinned_signature() {
        let params = QueryParams::new().with("symbol", "BTCUSDT");
        let signed = test_signer().sign_at(&params, 1_000_000_000_000);

        let (query, signature) = split_signature(&signed);
        assert_eq!(query, "symbol=BTCUSDT&timestamp=1000000000000");
        assert_eq!(
            signature,
            "d99f12aee610d9e64b54bcca49cf27d3dd4de16bc5cee104b9af4cc398763ade"
        );
    }

    #[test]
    fn test_sign_at_same_millisecond_is_identical() {
        let signer = test_signer();
        let params = QueryParams::new().with("symbol", "BTCUSDT").with("limit", 10);

        assert_eq!(signer.sign_at(&params, 42), signer.sign_at(&params, 42));
    }

    #[test]
    fn test_sign_timestamp_sorted_in_place() {
        let params = QueryParams::new()
            .with("zebra", "1")
            .with("alpha", "2")
            .with("middle", "3");
        let signed = test_signer().sign_at(&params, 1000);

        let (query, _) = split_signature(&signed);
        assert_eq!(query, "alpha=2&middle=3&timestamp=1000&zebra=1");
    }

    #[test]
    fn test_sign_drops_empty_values_but_keeps_timestamp() {
        let params = QueryParams::new().with("network", "").with("coin", "");
        let signed = test_signer().sign_at(&params, 7);

        let (query, _) = split_signature(&signed);
        assert_eq!(query, "timestamp=7");
    }

    #[test]
    fn test_sign_ends_with_hex_signature() {
        let signed = test_signer().sign(&QueryParams::new().with("symbol", "BTCUSDT"));

        let (query, signature) = split_signature(&signed);
        assert!(query.contains("timestamp="));
        assert_eq!(signature.len(), 64);
        assert!(
            signature
                .chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
        );
    }

    #[test]
    fn test_sign_does_not_mutate_caller_params() {
        let params = QueryParams::new().with("symbol", "BTCUSDT");
        let _ = test_signer().sign(&params);
        assert_eq!(params.get("timestamp"), None);
    }

    #[test]
    fn test_headers_carry_api_key() {
        let signer = test_signer();
        assert_eq!(signer.headers(), [("X-MBX-APIKEY", "test-key")]);
    }
}
