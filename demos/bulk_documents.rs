//! Pushing many documents from several clients under one rate budget.
//!
//! Every client built with `RateLimiter::process_wide()` draws from the same
//! calls-per-second budget, so the tasks below never exceed it together.
//!
//! Run with:
//! ```bash
//! OPENSEARCH_ACCESS_KEY_ID=... OPENSEARCH_ACCESS_KEY_SECRET=... \
//!     INDEX_NAME=... TABLE_NAME=... cargo run --example bulk_documents
//! ```

use aliyun_opensearch::rate_limit::RateLimiter;
use aliyun_opensearch::{Client, ClientConfig, Document};
use serde_json::json;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

const WORKERS: usize = 4;
const BATCHES_PER_WORKER: usize = 25;
const BATCH_SIZE: usize = 20;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let index_name = std::env::var("INDEX_NAME").expect("INDEX_NAME environment variable required");
    let table_name = std::env::var("TABLE_NAME").expect("TABLE_NAME environment variable required");

    let config = ClientConfig {
        rate_limiter: Some(RateLimiter::process_wide()),
        ..Default::default()
    };

    let start = Instant::now();
    let mut handles = Vec::new();
    for worker in 0..WORKERS {
        let client = Client::from_env(config.clone())?;
        let index_name = index_name.clone();
        let table_name = table_name.clone();

        handles.push(tokio::spawn(async move {
            let docs = client.docs(index_name);
            for batch in 0..BATCHES_PER_WORKER {
                let items: Vec<Document> = (0..BATCH_SIZE)
                    .map(|i| {
                        let id = format!("{}-{}-{}", worker, batch, i);
                        let mut doc = Document::new();
                        doc.insert("id".to_string(), json!(id));
                        doc.insert("title".to_string(), json!(format!("bulk document {}", id)));
                        doc
                    })
                    .collect();
                docs.add(items, &table_name).await?;
            }
            Ok::<_, aliyun_opensearch::OpenSearchError>(())
        }));
    }

    for handle in handles {
        handle.await??;
    }

    println!(
        "Pushed {} documents in {:?}",
        WORKERS * BATCHES_PER_WORKER * BATCH_SIZE,
        start.elapsed()
    );
    Ok(())
}
