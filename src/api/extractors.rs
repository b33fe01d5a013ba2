use std::convert::Infallible;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
};

use crate::api::middleware::auth::bearer_session;

/// Session of the current request, `None` when the caller sent none.
///
/// Never rejects: each operation decides what a missing session means.
pub struct SessionToken(pub Option<String>);

#[async_trait]
impl<S> FromRequestParts<S> for SessionToken
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(SessionToken(bearer_session(&parts.headers)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::Request, routing::get};
    use tower::ServiceExt;

    async fn echo(SessionToken(session): SessionToken) -> String {
        session.unwrap_or_else(|| "anonymous".to_string())
    }

    async fn call(request: Request<Body>) -> String {
        let response = Router::<()>::new()
            .route("/", get(echo))
            .oneshot(request)
            .await
            .unwrap();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_extracts_bearer_session() {
        let request = Request::builder()
            .uri("/")
            .header("authorization", "Bearer user_42")
            .body(Body::empty())
            .unwrap();

        assert_eq!(call(request).await, "user_42");
    }

    #[tokio::test]
    async fn test_missing_session_is_not_rejected() {
        let request = Request::builder().uri("/").body(Body::empty()).unwrap();

        assert_eq!(call(request).await, "anonymous");
    }
}
