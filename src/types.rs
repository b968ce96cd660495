//! Type definitions for the OpenSearch SDK.
//!
//! Request parameters, documents and the push envelopes the service expects.

use crate::error::{OpenSearchError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// Request parameters, kept in byte-wise key order.
pub type Params = BTreeMap<String, String>;

/// A document: field name to value. The `id` field is the document key.
pub type Document = Map<String, Value>;

/// HTTP method for a call. The service only speaks GET and POST.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// Parameters travel in the query string.
    Get,
    /// Parameters travel in a form-encoded body.
    Post,
}

impl HttpMethod {
    /// Upper-case method name as used in the string to sign.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Push command carried in a [`DocEnvelope`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocCommand {
    /// Insert or overwrite a document.
    Add,
    /// Remove a document by id.
    Delete,
}

/// One entry of the `items` payload of a push.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocEnvelope {
    /// What to do with the document.
    pub cmd: DocCommand,
    /// Document fields (for deletes, just the id).
    pub fields: Document,
}

impl DocEnvelope {
    /// Envelope adding `fields`.
    pub fn add(fields: Document) -> Self {
        Self {
            cmd: DocCommand::Add,
            fields,
        }
    }

    /// Envelope deleting the document with `id`.
    pub fn delete(id: impl Into<String>) -> Self {
        let mut fields = Map::new();
        fields.insert("id".to_string(), Value::String(id.into()));
        Self {
            cmd: DocCommand::Delete,
            fields,
        }
    }
}

/// One document or an ordered batch of them.
#[derive(Debug, Clone, PartialEq)]
pub enum Documents {
    /// A single document.
    Single(Document),
    /// Several documents, pushed in order.
    Batch(Vec<Document>),
}

impl Documents {
    /// Flatten into an ordered list.
    pub fn into_vec(self) -> Vec<Document> {
        match self {
            Documents::Single(doc) => vec![doc],
            Documents::Batch(docs) => docs,
        }
    }
}

impl From<Document> for Documents {
    fn from(doc: Document) -> Self {
        Documents::Single(doc)
    }
}

impl From<Vec<Document>> for Documents {
    fn from(docs: Vec<Document>) -> Self {
        Documents::Batch(docs)
    }
}

impl TryFrom<Value> for Documents {
    type Error = OpenSearchError;

    /// Accepts a JSON object or an array of objects.
    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Object(doc) => Ok(Documents::Single(doc)),
            Value::Array(items) => items
                .into_iter()
                .enumerate()
                .map(|(i, item)| match item {
                    Value::Object(doc) => Ok(doc),
                    other => Err(OpenSearchError::InvalidRequest(format!(
                        "document #{} must be a JSON object, got {}",
                        i,
                        json_kind(&other)
                    ))),
                })
                .collect::<Result<Vec<_>>>()
                .map(Documents::Batch),
            other => Err(OpenSearchError::InvalidRequest(format!(
                "documents must be a JSON object or an array of objects, got {}",
                json_kind(&other)
            ))),
        }
    }
}

/// One document id or an ordered batch of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocIds {
    /// A single id.
    Single(String),
    /// Several ids, deleted in order.
    Batch(Vec<String>),
}

impl DocIds {
    /// Flatten into an ordered list.
    pub fn into_vec(self) -> Vec<String> {
        match self {
            DocIds::Single(id) => vec![id],
            DocIds::Batch(ids) => ids,
        }
    }
}

impl From<&str> for DocIds {
    fn from(id: &str) -> Self {
        DocIds::Single(id.to_string())
    }
}

impl From<String> for DocIds {
    fn from(id: String) -> Self {
        DocIds::Single(id)
    }
}

impl From<Vec<String>> for DocIds {
    fn from(ids: Vec<String>) -> Self {
        DocIds::Batch(ids)
    }
}

impl From<Vec<&str>> for DocIds {
    fn from(ids: Vec<&str>) -> Self {
        DocIds::Batch(ids.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for DocIds {
    fn from(ids: &[&str]) -> Self {
        DocIds::Batch(ids.iter().map(|id| id.to_string()).collect())
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
