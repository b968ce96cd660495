//! Shared helpers for the integration tests.

#![allow(dead_code)]

use aliyun_opensearch::{Client, ClientConfig, Credentials, HttpMethod, Params, Signer};
use wiremock::{Match, MockServer, Request};

pub const KEY: &str = "K";
pub const SECRET: &str = "S";

/// Client pointed at a mock server, with rate limiting off.
pub fn client_for(server: &MockServer) -> Client {
    Client::with_config(
        Credentials::new(KEY, SECRET).unwrap(),
        ClientConfig {
            base_url: Some(server.uri()),
            qps_limit: Some(0),
            ..Default::default()
        },
    )
    .unwrap()
}

/// Parameters of a request: the query string for GET, the form body for POST.
pub fn request_params(request: &Request) -> Params {
    let url = if request.body.is_empty() {
        request.url.clone()
    } else {
        let body = String::from_utf8_lossy(&request.body);
        match request.url.join(&format!("?{}", body)) {
            Ok(url) => url,
            Err(_) => return Params::new(),
        }
    };
    url.query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

/// Matches requests whose `Signature` is valid for the test credentials.
pub struct ValidSignature(pub HttpMethod);

impl Match for ValidSignature {
    fn matches(&self, request: &Request) -> bool {
        let mut params = request_params(request);
        let Some(signature) = params.remove("Signature") else {
            return false;
        };
        let signer = Signer::new(Credentials::new(KEY, SECRET).unwrap());
        signer.signature(self.0, &params) == signature
    }
}

/// Matches requests carrying every protocol constant.
pub struct ProtocolParams;

impl Match for ProtocolParams {
    fn matches(&self, request: &Request) -> bool {
        let params = request_params(request);
        params.get("Version").map(String::as_str) == Some("v2")
            && params.get("AccessKeyId").map(String::as_str) == Some(KEY)
            && params.get("SignatureMethod").map(String::as_str) == Some("HMAC-SHA1")
            && params.get("SignatureVersion").map(String::as_str) == Some("1.0")
            && params.contains_key("Timestamp")
            && params.contains_key("SignatureNonce")
    }
}

/// Matches requests where `key` is absent.
pub struct NoParam(pub &'static str);

impl Match for NoParam {
    fn matches(&self, request: &Request) -> bool {
        !request_params(request).contains_key(self.0)
    }
}
