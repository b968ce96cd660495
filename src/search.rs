//! Search query construction.

use crate::types::Params;

/// A search request against `/search`.
///
/// The query string is passed through untouched. Optional fields are only
/// sent when set.
///
/// # Example
///
/// ```rust
/// use aliyun_opensearch::SearchQuery;
///
/// let query = SearchQuery::new("query=default:'phone'&&config=start:0,hit:10")
///     .with_fetch_fields("id;title")
///     .with_formula_name("hot");
/// assert_eq!(query.fetch_fields.as_deref(), Some("id;title"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    /// Raw query clause string.
    pub query: String,
    /// Index to search instead of the façade's own.
    pub index_name: Option<String>,
    /// Fields to return, `;`-separated.
    pub fetch_fields: Option<String>,
    /// Fine-ranking formula name.
    pub formula_name: Option<String>,
    /// Rough-ranking (first pass) formula name.
    pub first_formula_name: Option<String>,
    /// Summary (snippet) specification.
    pub summary: Option<String>,
}

impl SearchQuery {
    /// Query with no optional fields set.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    /// Search another index.
    pub fn with_index_name(mut self, index_name: impl Into<String>) -> Self {
        self.index_name = Some(index_name.into());
        self
    }

    /// Set `fetch_fields`.
    pub fn with_fetch_fields(mut self, fetch_fields: impl Into<String>) -> Self {
        self.fetch_fields = Some(fetch_fields.into());
        self
    }

    /// Set `formula_name`.
    pub fn with_formula_name(mut self, formula_name: impl Into<String>) -> Self {
        self.formula_name = Some(formula_name.into());
        self
    }

    /// Set `first_formula_name`.
    pub fn with_first_formula_name(mut self, first_formula_name: impl Into<String>) -> Self {
        self.first_formula_name = Some(first_formula_name.into());
        self
    }

    /// Set `summary`.
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Wire parameters, with `default_index` used when no override is set.
    pub fn to_params(&self, default_index: &str) -> Params {
        let mut params = Params::new();
        params.insert(
            "index_name".to_string(),
            self.index_name
                .clone()
                .unwrap_or_else(|| default_index.to_string()),
        );
        params.insert("query".to_string(), self.query.clone());

        let optional = [
            ("fetch_fields", &self.fetch_fields),
            ("formula_name", &self.formula_name),
            ("first_formula_name", &self.first_formula_name),
            ("summary", &self.summary),
        ];
        for (key, value) in optional {
            if let Some(value) = value {
                params.insert(key.to_string(), value.clone());
            }
        }
        params
    }
}

impl From<&str> for SearchQuery {
    fn from(query: &str) -> Self {
        Self::new(query)
    }
}

impl From<String> for SearchQuery {
    fn from(query: String) -> Self {
        Self::new(query)
    }
}
