//! API utilities for frontend-backend communication
//!
//! Provides helper functions for constructing API URLs.

use crate::shared::config::config;
use contracts::shared::ListQuery;

/// Get the base URL for API requests
///
/// Uses `[api] base` from the configuration. When it is empty the requests go
/// to the origin that served the page, so relative `/api/...` paths are returned.
///
/// # Example
/// ```rust,ignore
/// let url = format!("{}/api/deeper/rdap/{}/{}", api_base(), kind, id);
/// ```
pub fn api_base() -> String {
    config().api.base.clone()
}

/// Build a full API URL from a path
///
/// # Arguments
/// * `path` - The API path (should start with "/api/")
pub fn api_url(path: &str) -> String {
    join_url(&api_base(), path)
}

/// Build a list endpoint URL with `page`, `limit` and optional `search`.
pub fn list_url(path: &str, query: &ListQuery) -> String {
    with_query(&api_url(path), query)
}

/// Appends a serialized query to `url`, keeping any query string already present.
pub fn with_query<T: serde::Serialize>(url: &str, query: &T) -> String {
    let qs = serde_qs::to_string(query).unwrap_or_default();
    if qs.is_empty() {
        return url.to_string();
    }
    let sep = if url.contains('?') { '&' } else { '?' };
    format!("{}{}{}", url, sep, qs)
}

/// Encodes a single path segment (ids, type keys).
pub fn segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

fn join_url(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_url() {
        assert_eq!(join_url("", "/api/x"), "/api/x");
        assert_eq!(join_url("http://h:5000/", "/api/x"), "http://h:5000/api/x");
    }

    #[test]
    fn test_with_query_omits_empty_search() {
        let q = ListQuery::new(2, 25, "");
        assert_eq!(with_query("/api/deeper/rdap", &q), "/api/deeper/rdap?page=2&limit=25");
    }

    #[test]
    fn test_with_query_encodes_search() {
        let q = ListQuery::new(1, 10, "acme corp");
        let url = with_query("/api/shared/programs", &q);
        assert!(url.starts_with("/api/shared/programs?page=1&limit=10&search="));
        assert!(!url.contains(' '));
    }

    #[test]
    fn test_with_query_appends_to_existing() {
        let q = ListQuery::new(1, 10, "");
        assert_eq!(with_query("/x?programId=3", &q), "/x?programId=3&page=1&limit=10");
    }

    #[test]
    fn test_segment() {
        assert_eq!(segment("a b/c"), "a%20b%2Fc");
    }
}
