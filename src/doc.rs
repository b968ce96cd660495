//! Document operations.
//!
//! This module provides the DocClient for pushing, deleting, fetching and
//! searching documents of one index. Mutations are sent as a JSON array of
//! [`DocEnvelope`]s in the `items` parameter with `sign_mode=1`, which keeps
//! the payload out of the signature.

use crate::client::{require_non_empty, validate_index_name, Client};
use crate::error::{OpenSearchError, Result};
use crate::search::SearchQuery;
use crate::sign::{ITEMS_PARAM, SIGN_MODE_PARAM};
use crate::types::{DocEnvelope, DocIds, Documents, HttpMethod, Params};
use serde_json::Value;

const SEARCH_PATH: &str = "/search";

/// Client for document operations.
///
/// Access via `client.docs(index_name)`.
pub struct DocClient {
    client: Client,
    index_name: String,
}

impl DocClient {
    pub(crate) fn new(client: Client, index_name: String) -> Self {
        Self { client, index_name }
    }

    /// Name of the index this client operates on.
    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    /// Add one document or a batch of documents to `table_name`.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use aliyun_opensearch::{Client, Document};
    /// use serde_json::json;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = Client::new("LTAIxxxx", "secret")?;
    ///     let docs = client.docs("products");
    ///
    ///     let doc: Document = serde_json::from_value(json!({
    ///         "id": "12113313177",
    ///         "title": "A test title",
    ///     }))?;
    ///     docs.add(doc.clone(), "main").await?;
    ///     docs.add(vec![doc], "main").await?;
    ///     Ok(())
    /// }
    /// ```
    pub async fn add(&self, docs: impl Into<Documents>, table_name: &str) -> Result<Value> {
        self.push(envelopes_for_add(docs.into()), table_name).await
    }

    /// Update documents. The service overwrites on `add`, so this pushes
    /// the same command as [`add`](Self::add).
    pub async fn update(&self, docs: impl Into<Documents>, table_name: &str) -> Result<Value> {
        self.push(envelopes_for_add(docs.into()), table_name).await
    }

    /// Delete one document or a batch of documents by id.
    ///
    /// ```rust,no_run
    /// # use aliyun_opensearch::Client;
    /// # async fn run(client: Client) -> aliyun_opensearch::Result<()> {
    /// let docs = client.docs("products");
    /// docs.delete("12113933131", "main").await?;
    /// docs.delete(vec!["12113933131", "12113313177"], "main").await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn delete(&self, ids: impl Into<DocIds>, table_name: &str) -> Result<Value> {
        self.push(envelopes_for_delete(ids.into()), table_name).await
    }

    /// Push prebuilt envelopes to `table_name`, in order.
    pub async fn push(&self, envelopes: Vec<DocEnvelope>, table_name: &str) -> Result<Value> {
        let params = push_params(&envelopes, table_name)?;
        self.client
            .call(&self.doc_path()?, params, HttpMethod::Post)
            .await
    }

    /// Fetch one document by id.
    pub async fn detail(&self, id: &str, table_name: &str) -> Result<Value> {
        require_non_empty("document id", id)?;
        require_non_empty("table name", table_name)?;

        let mut params = Params::new();
        params.insert("id".to_string(), id.to_string());
        params.insert("table_name".to_string(), table_name.to_string());
        self.client
            .call(&self.doc_path()?, params, HttpMethod::Post)
            .await
    }

    /// Run a search. Accepts a [`SearchQuery`] or a bare query string.
    ///
    /// ```rust,no_run
    /// # use aliyun_opensearch::{Client, SearchQuery};
    /// # async fn run(client: Client) -> aliyun_opensearch::Result<()> {
    /// let docs = client.docs("products");
    /// let plain = docs.search("query=default:'phone'").await?;
    /// let ranked = docs
    ///     .search(SearchQuery::new("query=default:'phone'").with_formula_name("hot"))
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn search(&self, query: impl Into<SearchQuery>) -> Result<Value> {
        let query = query.into();
        let params = query.to_params(&self.index_name);
        validate_index_name(&params["index_name"])?;
        self.client.call(SEARCH_PATH, params, HttpMethod::Get).await
    }

    fn doc_path(&self) -> Result<String> {
        validate_index_name(&self.index_name)?;
        Ok(format!("/index/doc/{}", self.index_name))
    }
}

fn envelopes_for_add(docs: Documents) -> Vec<DocEnvelope> {
    docs.into_vec().into_iter().map(DocEnvelope::add).collect()
}

fn envelopes_for_delete(ids: DocIds) -> Vec<DocEnvelope> {
    ids.into_vec().into_iter().map(DocEnvelope::delete).collect()
}

fn push_params(envelopes: &[DocEnvelope], table_name: &str) -> Result<Params> {
    if envelopes.is_empty() {
        return Err(OpenSearchError::InvalidRequest(
            "at least one document is required".to_string(),
        ));
    }
    require_non_empty("table name", table_name)?;

    let mut params = Params::new();
    params.insert("action".to_string(), "push".to_string());
    params.insert(ITEMS_PARAM.to_string(), serde_json::to_string(envelopes)?);
    params.insert("table_name".to_string(), table_name.to_string());
    params.insert(SIGN_MODE_PARAM.to_string(), "1".to_string());
    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DocCommand, Document};
    use serde_json::json;

    fn doc(value: Value) -> Document {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_single_and_batch_payloads_match() {
        let d = doc(json!({"id": "1", "title": "搜索"}));
        let single = push_params(&envelopes_for_add(d.clone().into()), "main").unwrap();
        let batch = push_params(&envelopes_for_add(vec![d].into()), "main").unwrap();

        assert_eq!(single[ITEMS_PARAM], batch[ITEMS_PARAM]);
        assert_eq!(
            single[ITEMS_PARAM],
            r#"[{"cmd":"add","fields":{"id":"1","title":"搜索"}}]"#
        );
    }

    #[test]
    fn test_push_params_shape() {
        let params = push_params(&envelopes_for_add(doc(json!({"id": "1"})).into()), "main").unwrap();
        assert_eq!(params["action"], "push");
        assert_eq!(params["table_name"], "main");
        assert_eq!(params["sign_mode"], "1");
        assert_eq!(params.len(), 4);
    }

    #[test]
    fn test_delete_envelopes_keep_order() {
        let envelopes = envelopes_for_delete(vec!["b", "a"].into());
        assert_eq!(envelopes.len(), 2);
        assert!(envelopes.iter().all(|e| e.cmd == DocCommand::Delete));
        assert_eq!(envelopes[0].fields["id"], "b");
        assert_eq!(envelopes[1].fields["id"], "a");
    }

    #[test]
    fn test_empty_batch_is_rejected() {
        let err = push_params(&envelopes_for_add(Vec::<Document>::new().into()), "main").unwrap_err();
        assert!(matches!(err, OpenSearchError::InvalidRequest(_)));
    }

    #[test]
    fn test_empty_table_is_rejected() {
        let err = push_params(&envelopes_for_delete("1".into()), "").unwrap_err();
        assert!(matches!(err, OpenSearchError::InvalidRequest(_)));
    }
}
