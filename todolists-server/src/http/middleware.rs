//! Content-type gate
//!
//! Every request must declare a JSON body type, whatever its method or
//! path. Anything else is rejected with 400 before routing.

use axum::extract::Request;
use axum::http::header::CONTENT_TYPE;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;

use super::error::ApiError;

/// `axum::middleware::from_fn` handler
pub async fn require_json(request: Request, next: Next) -> Result<Response, ApiError> {
    if !is_json(request.headers()) {
        tracing::debug!(
            method = %request.method(),
            uri = %request.uri(),
            "rejecting non-JSON request"
        );
        return Err(ApiError::NotJson);
    }
    Ok(next.run(request).await)
}

/// `application/json` or any `application/*+json`, parameters ignored.
pub fn is_json(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
        return false;
    };
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(content_type: Option<&'static str>) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Some(ct) = content_type {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(ct));
        }
        headers
    }

    #[test]
    fn accepts_json_types() {
        assert!(is_json(&headers(Some("application/json"))));
        assert!(is_json(&headers(Some("application/json; charset=utf-8"))));
        assert!(is_json(&headers(Some("Application/JSON"))));
        assert!(is_json(&headers(Some("application/merge-patch+json"))));
    }

    #[test]
    fn rejects_everything_else() {
        assert!(!is_json(&headers(None)));
        assert!(!is_json(&headers(Some("text/plain"))));
        assert!(!is_json(&headers(Some("application/x-www-form-urlencoded"))));
        assert!(!is_json(&headers(Some("text/json"))));
    }
}
