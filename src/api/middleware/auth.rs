use axum::http::HeaderMap;

/// Session id carried as `Authorization: Bearer <session>`.
///
/// Anything else, including a malformed header, counts as no session.
pub fn bearer_session(headers: &HeaderMap) -> Option<String> {
    let auth_header = headers
        .get("authorization")
        .and_then(|h| h.to_str().ok())?;

    let parts: Vec<&str> = auth_header.split_whitespace().collect();
    match parts.as_slice() {
        ["Bearer", token] => Some(token.to_string()),
        _ => {
            tracing::debug!("Invalid authorization header format. Expected: Bearer <token>");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_bearer_session() {
        assert_eq!(bearer_session(&headers("Bearer user_2abc")), Some("user_2abc".to_string()));
    }

    #[test]
    fn test_missing_or_malformed_header() {
        assert_eq!(bearer_session(&HeaderMap::new()), None);
        assert_eq!(bearer_session(&headers("Basic dXNlcjpwYXNz")), None);
        assert_eq!(bearer_session(&headers("Bearer")), None);
        assert_eq!(bearer_session(&headers("Bearer a b")), None);
    }
}
