//! Request signing.
//!
//! Every call carries the protocol constants, a timestamp, a nonce and a
//! `Signature` computed as:
//!
//! 1. Sort the parameters by key and percent-encode each key and value
//!    (only `A-Z a-z 0-9 - _ . ~` stay literal, so space is `%20` and `*` is
//!    `%2A`).
//! 2. Join them as `k1=v1&k2=v2` (the canonical query string).
//! 3. Build `METHOD&%2F&` + percent-encoded canonical query string.
//! 4. HMAC-SHA1 it with `secret + "&"` and base64-encode the digest.
//!
//! When `sign_mode=1` is present the bulk `items` payload is left out of
//! step 1 but still sent.

use crate::credential::Credentials;
use crate::types::{HttpMethod, Params};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use sha1::Sha1;

type HmacSha1 = Hmac<Sha1>;

/// API version sent as `Version`.
pub const API_VERSION: &str = "v2";
/// Value of `SignatureMethod`.
pub const SIGNATURE_METHOD: &str = "HMAC-SHA1";
/// Value of `SignatureVersion`.
pub const SIGNATURE_VERSION: &str = "1.0";
/// `strftime` format of the `Timestamp` parameter.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Parameter that switches on payload exclusion.
pub const SIGN_MODE_PARAM: &str = "sign_mode";
/// Parameter excluded from signing when `sign_mode=1`.
pub const ITEMS_PARAM: &str = "items";

const UNRESERVED: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Percent-encode `input` the way the service canonicalizes it.
///
/// ```rust
/// use aliyun_opensearch::sign::percent_encode;
///
/// assert_eq!(percent_encode("a b*c~"), "a%20b%2Ac~");
/// ```
pub fn percent_encode(input: &str) -> String {
    utf8_percent_encode(input, UNRESERVED).to_string()
}

/// Build the canonical query string that gets signed.
pub fn canonical_query(params: &Params) -> String {
    let exclude_items = params
        .get(SIGN_MODE_PARAM)
        .is_some_and(|mode| mode == "1");

    params
        .iter()
        .filter(|(k, _)| !(exclude_items && k.as_str() == ITEMS_PARAM))
        .map(|(k, v)| format!("{}={}", percent_encode(k), percent_encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Build the string to sign from a method and a canonical query string.
///
/// Every request signs against the root path, hence the fixed `%2F`.
pub fn string_to_sign(method: HttpMethod, canonical_query: &str) -> String {
    format!(
        "{}&%2F&{}",
        method.as_str(),
        percent_encode(canonical_query)
    )
}

/// Per-call freshness values: `Timestamp` and `SignatureNonce`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stamp {
    /// UTC time formatted as `YYYY-MM-DDTHH:MM:SSZ`.
    pub timestamp: String,
    /// Unique per call.
    pub nonce: String,
}

impl Stamp {
    /// Current UTC time and a fresh UUID v4 nonce.
    pub fn now() -> Self {
        Self::at(Utc::now(), uuid::Uuid::new_v4().to_string())
    }

    /// Stamp for a given instant and nonce.
    pub fn at(time: DateTime<Utc>, nonce: impl Into<String>) -> Self {
        Self {
            timestamp: time.format(TIMESTAMP_FORMAT).to_string(),
            nonce: nonce.into(),
        }
    }

    /// Stamp from an already formatted timestamp.
    pub fn new(timestamp: impl Into<String>, nonce: impl Into<String>) -> Self {
        Self {
            timestamp: timestamp.into(),
            nonce: nonce.into(),
        }
    }
}

/// Signs parameter sets with one pair of credentials.
#[derive(Debug, Clone)]
pub struct Signer {
    credentials: Credentials,
}

impl Signer {
    /// Create a signer for `credentials`.
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }

    /// The credentials this signer uses.
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Base64 HMAC-SHA1 signature of `params` for `method`.
    ///
    /// A pure function of its inputs: the same params (including
    /// `Timestamp` and `SignatureNonce`) always give the same signature.
    pub fn signature(&self, method: HttpMethod, params: &Params) -> String {
        let to_sign = string_to_sign(method, &canonical_query(params));
        let key = format!("{}&", self.credentials.access_key_secret());

        let mut mac =
            HmacSha1::new_from_slice(key.as_bytes()).expect("HMAC can take key of any size");
        mac.update(to_sign.as_bytes());
        BASE64.encode(mac.finalize().into_bytes())
    }

    /// Merge the protocol constants and `stamp` into `params` and attach the
    /// `Signature`. Protocol constants win over caller-supplied keys.
    pub fn signed_params(&self, method: HttpMethod, mut params: Params, stamp: &Stamp) -> Params {
        params.insert("Version".to_string(), API_VERSION.to_string());
        params.insert(
            "AccessKeyId".to_string(),
            self.credentials.access_key_id().to_string(),
        );
        params.insert("SignatureMethod".to_string(), SIGNATURE_METHOD.to_string());
        params.insert(
            "SignatureVersion".to_string(),
            SIGNATURE_VERSION.to_string(),
        );
        params.insert("Timestamp".to_string(), stamp.timestamp.clone());
        params.insert("SignatureNonce".to_string(), stamp.nonce.clone());
        // A stale signature must never take part in its own computation.
        params.remove("Signature");

        let signature = self.signature(method, &params);
        params.insert("Signature".to_string(), signature);
        params
    }
}
