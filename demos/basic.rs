//! Basic usage example for the OpenSearch SDK.
//!
//! This example demonstrates:
//! - Creating a client from the environment
//! - Listing indexes
//! - Adding, fetching and deleting documents
//! - Searching
//!
//! Run with:
//! ```bash
//! OPENSEARCH_ACCESS_KEY_ID=... OPENSEARCH_ACCESS_KEY_SECRET=... \
//!     INDEX_NAME=... TABLE_NAME=... RUST_LOG=aliyun_opensearch=debug \
//!     cargo run --example basic
//! ```

use aliyun_opensearch::{Client, ClientConfig, Document, SearchQuery};
use serde_json::json;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let index_name = std::env::var("INDEX_NAME").expect("INDEX_NAME environment variable required");
    let table_name = std::env::var("TABLE_NAME").expect("TABLE_NAME environment variable required");

    // Create client
    let client = Client::from_env(ClientConfig::default())?;

    println!("app list: {}", client.index(&index_name).list().await?);

    let docs = client.docs(&index_name);
    let items: Vec<Document> = serde_json::from_value(json!([
        {
            "id": "12113313177",
            "title": "A test title 1",
            "content": "搜索， 内容",
        },
        {
            "id": "12113933131",
            "title": "A test Title 2",
            "content": "搜索， 内容2",
        }
    ]))?;

    // One document, then the whole batch
    docs.add(items[0].clone(), &table_name).await?;
    docs.add(items.clone(), &table_name).await?;

    println!("doc detail: {}", docs.detail("12113313177", &table_name).await?);

    let result = docs
        .search(SearchQuery::new("query=搜索").with_fetch_fields("id;title"))
        .await?;
    println!("search result: {}", result);

    docs.delete("12113933131", &table_name).await?;
    docs.delete(vec!["12113933131", "12113313177"], &table_name)
        .await?;

    println!("\nDone!");
    Ok(())
}
