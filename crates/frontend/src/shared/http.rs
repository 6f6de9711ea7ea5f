//! Fetch gateway: the one place that talks HTTP to the REST API.
//!
//! Every request carries JSON and no-cache headers. A status outside
//! `200..300` becomes [`FetchError::Http`]; transport failures become
//! [`FetchError::Network`]. Nothing is retried.

use gloo_net::http::{Request, RequestBuilder};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP error! Status: {status}")]
    Http { status: u16 },
    #[error("Network error: {0}")]
    Network(String),
    #[error("Invalid response: {0}")]
    Decode(String),
}

impl FetchError {
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Http { status } => Some(*status),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// Headers attached to every request
pub const STANDARD_HEADERS: [(&str, &str); 3] = [
    ("Content-Type", "application/json"),
    ("Cache-Control", "no-cache, no-store, must-revalidate"),
    ("Pragma", "no-cache"),
];

/// Maps a response status onto the gateway contract.
pub fn ensure_success(status: u16) -> Result<(), FetchError> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(FetchError::Http { status })
    }
}

/// Parses a response body. An empty body is `null`, not an error.
pub fn parse_body(text: &str) -> Result<Value, FetchError> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(text).map_err(|e| FetchError::Decode(e.to_string()))
}

fn builder(method: HttpMethod, url: &str) -> RequestBuilder {
    let builder = match method {
        HttpMethod::Get => Request::get(url),
        HttpMethod::Post => Request::post(url),
        HttpMethod::Put => Request::put(url),
        HttpMethod::Delete => Request::delete(url),
    };
    STANDARD_HEADERS
        .iter()
        .fold(builder, |b, (name, value)| b.header(name, value))
}

/// Sends a request and returns the parsed JSON body.
pub async fn request_json(
    method: HttpMethod,
    url: &str,
    body: Option<&Value>,
) -> Result<Value, FetchError> {
    let result = send(method, url, body).await;
    if let Err(e) = &result {
        log::warn!("{} {} failed: {}", method.as_str(), url, e);
    }
    result
}

async fn send(method: HttpMethod, url: &str, body: Option<&Value>) -> Result<Value, FetchError> {
    let builder = builder(method, url);
    let response = match body {
        Some(body) => builder
            .body(body.to_string())
            .map_err(|e| FetchError::Network(e.to_string()))?
            .send()
            .await,
        None => builder.send().await,
    }
    .map_err(|e| FetchError::Network(e.to_string()))?;

    ensure_success(response.status())?;

    let text = response
        .text()
        .await
        .map_err(|e| FetchError::Decode(e.to_string()))?;
    parse_body(&text)
}

pub async fn get_json(url: &str) -> Result<Value, FetchError> {
    request_json(HttpMethod::Get, url, None).await
}

pub async fn post_json(url: &str, body: &Value) -> Result<Value, FetchError> {
    request_json(HttpMethod::Post, url, Some(body)).await
}

pub async fn put_json(url: &str, body: &Value) -> Result<Value, FetchError> {
    request_json(HttpMethod::Put, url, Some(body)).await
}

pub async fn delete_json(url: &str) -> Result<Value, FetchError> {
    request_json(HttpMethod::Delete, url, None).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ensure_success_bounds() {
        assert!(ensure_success(200).is_ok());
        assert!(ensure_success(204).is_ok());
        assert!(ensure_success(299).is_ok());
        assert_eq!(ensure_success(199), Err(FetchError::Http { status: 199 }));
        assert_eq!(ensure_success(300), Err(FetchError::Http { status: 300 }));
        assert_eq!(ensure_success(500).unwrap_err().status(), Some(500));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            FetchError::Http { status: 404 }.to_string(),
            "HTTP error! Status: 404"
        );
        assert_eq!(FetchError::Network("refused".into()).status(), None);
    }

    #[test]
    fn test_parse_body() {
        assert_eq!(parse_body("").unwrap(), Value::Null);
        assert_eq!(parse_body(r#"{"success":true}"#).unwrap(), json!({"success": true}));
        assert!(matches!(parse_body("<html>"), Err(FetchError::Decode(_))));
    }

    #[test]
    fn test_standard_headers() {
        assert!(STANDARD_HEADERS.contains(&("Content-Type", "application/json")));
        assert!(STANDARD_HEADERS.iter().any(|(name, _)| *name == "Cache-Control"));
    }
}
