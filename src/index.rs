//! Index lifecycle operations.
//!
//! This module provides the IndexClient for creating, deleting and
//! inspecting an index (an "app" in the OpenSearch console).

use crate::client::{require_non_empty, validate_index_name, Client};
use crate::error::Result;
use crate::types::{HttpMethod, Params};
use serde_json::Value;

/// Client for index lifecycle operations.
///
/// Access via `client.index(name)`.
pub struct IndexClient {
    client: Client,
    index_name: String,
}

impl IndexClient {
    pub(crate) fn new(client: Client, index_name: String) -> Self {
        Self { client, index_name }
    }

    /// Name of the index this client operates on.
    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    /// Create the index from a schema template.
    ///
    /// # Arguments
    ///
    /// * `template` - Name of the schema template to build the index from
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use aliyun_opensearch::Client;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = Client::new("LTAIxxxx", "secret")?;
    ///     let result = client.index("products").create("builtin_news").await?;
    ///     println!("{}", result);
    ///     Ok(())
    /// }
    /// ```
    pub async fn create(&self, template: &str) -> Result<Value> {
        require_non_empty("template", template)?;
        let mut params = self.action("create");
        params.insert("template".to_string(), template.to_string());
        self.send(params).await
    }

    /// Delete the index.
    ///
    /// **Warning:** every document in the index goes with it.
    pub async fn delete(&self) -> Result<Value> {
        self.send(self.action("delete")).await
    }

    /// Query the index status.
    pub async fn status(&self) -> Result<Value> {
        self.send(self.action("status")).await
    }

    /// List every index of the account.
    pub async fn list(&self) -> Result<Value> {
        self.client.list_indexes().await
    }

    fn action(&self, action: &str) -> Params {
        let mut params = Params::new();
        params.insert("action".to_string(), action.to_string());
        params
    }

    async fn send(&self, params: Params) -> Result<Value> {
        validate_index_name(&self.index_name)?;
        self.client
            .call(&format!("/index/{}", self.index_name), params, HttpMethod::Get)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OpenSearchError;

    #[test]
    fn test_index_client_creation() {
        let client = Client::new("K", "S").unwrap();
        let index = client.index("products");
        assert_eq!(index.index_name(), "products");
        assert_eq!(index.action("status")["action"], "status");
    }

    #[tokio::test]
    async fn test_empty_index_name_is_rejected() {
        let client = Client::new("K", "S").unwrap();
        let err = client.index("").status().await.unwrap_err();
        assert!(matches!(err, OpenSearchError::InvalidRequest(_)));
    }
}
