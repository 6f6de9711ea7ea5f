//! Envelopes of the REST API: `{success, data, pagination}` for lists and
//! `{success, data?, error?}` for mutations.

use crate::shared::record::Record;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `pagination` sub-object of a list response. Every field is optional on the
/// wire; consumers substitute defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaginationMeta {
    #[serde(default)]
    pub current_page: Option<u64>,
    #[serde(default)]
    pub total_pages: Option<u64>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub per_page: Option<u64>,
}

/// Query parameters accepted by every list endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    /// 1-based page number
    pub page: usize,
    pub limit: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl ListQuery {
    pub fn new(page: usize, limit: usize, search: &str) -> Self {
        let search = search.trim();
        Self {
            page: page.max(1),
            limit: limit.max(1),
            search: (!search.is_empty()).then(|| search.to_string()),
        }
    }
}

/// Response of `POST`/`PUT`/`DELETE` endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MutationResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub error: Option<String>,
    /// Some create endpoints return only the new id instead of the full row.
    #[serde(default)]
    pub id: Option<Value>,
}

impl MutationResponse {
    /// Reads a mutation response leniently: anything unparseable counts as a failure.
    pub fn from_json(value: Value) -> Self {
        serde_json::from_value(value).unwrap_or_default()
    }

    /// Server-confirmed row, if the endpoint echoed one back.
    pub fn record(&self) -> Option<Record> {
        self.data.clone().and_then(Record::from_value)
    }

    pub fn error_message(&self) -> String {
        self.error
            .clone()
            .filter(|e| !e.trim().is_empty())
            .unwrap_or_else(|| "Unknown error".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_list_query_trims_search() {
        let q = ListQuery::new(0, 0, "  ");
        assert_eq!(q.page, 1);
        assert_eq!(q.limit, 1);
        assert_eq!(q.search, None);

        let q = ListQuery::new(3, 25, " acme ");
        assert_eq!(q.search.as_deref(), Some("acme"));
    }

    #[test]
    fn test_mutation_response_defaults() {
        let resp = MutationResponse::from_json(json!({"success": false}));
        assert!(!resp.success);
        assert_eq!(resp.error_message(), "Unknown error");

        let resp = MutationResponse::from_json(json!("garbage"));
        assert!(!resp.success);
    }

    #[test]
    fn test_mutation_response_record() {
        let resp = MutationResponse::from_json(json!({
            "success": true,
            "data": {"id": 9, "value": "acme"}
        }));
        assert!(resp.success);
        assert_eq!(resp.record().and_then(|r| r.id()).unwrap().as_str(), "9");
    }
}
