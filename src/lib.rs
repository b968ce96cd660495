//! # Aliyun OpenSearch Rust SDK
//!
//! Unofficial Rust SDK for the Aliyun OpenSearch API (version `v2`).
//!
//! Every request is signed with HMAC-SHA1 over a canonical query string and
//! goes through a client-side calls-per-second limiter before it hits the
//! wire. Index, document and search operations are thin wrappers around the
//! one signed primitive, [`Client::call`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use aliyun_opensearch::{Client, Document, SearchQuery};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::new("LTAIxxxx", "secret")?;
//!
//!     // List indexes
//!     println!("indexes: {}", client.index("products").list().await?);
//!
//!     // Push a document
//!     let docs = client.docs("products");
//!     let doc: Document = serde_json::from_value(json!({
//!         "id": "12113313177",
//!         "title": "A test title",
//!         "content": "搜索，内容",
//!     }))?;
//!     docs.add(doc, "main").await?;
//!
//!     // Search
//!     let result = docs
//!         .search(SearchQuery::new("query=default:'搜索'").with_fetch_fields("id;title"))
//!         .await?;
//!     println!("search result: {}", result);
//!     Ok(())
//! }
//! ```
//!
//! ## Rate Limiting
//!
//! Each client allows 200 calls per second by default. Clients created with
//! the same [`RateLimiter`](rate_limit::RateLimiter) share one budget:
//!
//! ```rust
//! use aliyun_opensearch::{Client, ClientConfig, Credentials};
//! use aliyun_opensearch::rate_limit::RateLimiter;
//!
//! let config = ClientConfig {
//!     rate_limiter: Some(RateLimiter::process_wide()),
//!     ..Default::default()
//! };
//! let a = Client::with_config(Credentials::new("K1", "S1").unwrap(), config.clone()).unwrap();
//! let b = Client::with_config(Credentials::new("K2", "S2").unwrap(), config).unwrap();
//! assert!(std::sync::Arc::ptr_eq(a.rate_limiter(), b.rate_limiter()));
//! ```
//!
//! ## Error Handling
//!
//! All operations return `Result<T, OpenSearchError>`:
//!
//! ```rust,no_run
//! use aliyun_opensearch::{Client, OpenSearchError};
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = Client::new("LTAIxxxx", "secret").unwrap();
//!
//!     match client.index("products").status().await {
//!         Ok(status) => println!("status: {}", status),
//!         Err(e) if e.is_auth_error() => println!("Bad credentials"),
//!         Err(OpenSearchError::Status { status_code, body }) => {
//!             println!("HTTP {}: {}", status_code, body)
//!         }
//!         Err(e) => println!("Error: {}", e),
//!     }
//! }
//! ```

pub mod client;
pub mod credential;
pub mod doc;
pub mod error;
pub mod index;
pub mod rate_limit;
pub mod search;
pub mod sign;
pub mod types;

// Re-export main types at the crate root
pub use client::{Client, ClientConfig};
pub use credential::Credentials;
pub use error::{OpenSearchError, Result};
pub use search::SearchQuery;
pub use sign::{Signer, Stamp};

// Re-export types module for easy access
pub use types::{DocCommand, DocEnvelope, DocIds, Document, Documents, HttpMethod, Params};

// Compile-time assertions: key types must be Send + Sync for use across tasks.
const _: () = {
    const fn assert_send_sync<T: Send + Sync>() {}
    let _ = assert_send_sync::<Client>;
    let _ = assert_send_sync::<OpenSearchError>;
    let _ = assert_send_sync::<rate_limit::RateLimiter>;
};
