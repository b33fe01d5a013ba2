use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;

use crate::{
    api::{
        error::ApiError, extractors::SessionToken, response::ApiResponse,
        validation::validate_uuid,
    },
    budgets::{
        processor::{get_current_budget, update_budget},
        processor_enums::{BudgetInput, CurrentBudget, UpdateBudgetResult},
    },
    sockets::SocketInvalidator,
    store::PgStore,
    utils::{
        app_config::AppConfig,
        traits::{BudgetStore, IdentityResolver, ViewInvalidator},
    },
};

/// GET /budget/{account_id} - Caller's budget and this month's expenses on the account
pub async fn get_budget(
    State(app_config): State<AppConfig>,
    SessionToken(session): SessionToken,
    Path(account_id): Path<String>,
) -> Result<(StatusCode, Json<ApiResponse<CurrentBudget>>), ApiError> {
    let store = PgStore::new(app_config.pool.clone());
    let identity = store.identity(session);

    read_budget(&identity, &store, &account_id).await
}

pub async fn read_budget<I, S>(
    identity: &I,
    store: &S,
    account_id: &str,
) -> Result<(StatusCode, Json<ApiResponse<CurrentBudget>>), ApiError>
where
    I: IdentityResolver,
    S: BudgetStore,
{
    let account_id = validate_uuid(account_id)?;

    let current = get_current_budget(identity, store, account_id).await?;

    Ok((StatusCode::OK, Json(ApiResponse::success(current))))
}

/// POST /budget - Create or replace the caller's budget
///
/// Body is either a bare amount (`500`) or `{ "amount": 500 }`. Always answers
/// 200; failures are reported as `{ "success": false, "error": ... }`.
pub async fn post_budget(
    State(app_config): State<AppConfig>,
    SessionToken(session): SessionToken,
    body: Option<Json<Value>>,
) -> Json<UpdateBudgetResult> {
    let store = PgStore::new(app_config.pool.clone());
    let identity = store.identity(session);
    let invalidator = SocketInvalidator::new(app_config.io.clone());

    save_budget(&identity, &store, &invalidator, body).await
}

/// A missing or unparsable body is passed on as absent input.
pub async fn save_budget<I, S, V>(
    identity: &I,
    store: &S,
    invalidator: &V,
    body: Option<Json<Value>>,
) -> Json<UpdateBudgetResult>
where
    I: IdentityResolver,
    S: BudgetStore,
    V: ViewInvalidator,
{
    let data = body.and_then(|Json(value)| BudgetInput::from_json(value));

    Json(update_budget(identity, store, invalidator, data).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, RecordingInvalidator};
    use anyhow::Result;
    use axum::{
        Router,
        body::Body,
        http::Request,
        routing::{get, post},
    };
    use serde_json::json;
    use tower::ServiceExt;

    fn budget_router(store: MemoryStore, invalidator: RecordingInvalidator) -> Router {
        let read_store = store.clone();

        Router::new()
            .route(
                "/budget",
                post(
                    move |SessionToken(session): SessionToken, body: Option<Json<Value>>| async move {
                        let identity = store.identity(session.as_deref());
                        save_budget(&identity, &store, &invalidator, body).await
                    },
                ),
            )
            .route(
                "/budget/:account_id",
                get(
                    move |SessionToken(session): SessionToken, Path(account_id): Path<String>| async move {
                        let identity = read_store.identity(session.as_deref());
                        read_budget(&identity, &read_store, &account_id).await
                    },
                ),
            )
    }

    fn post_request(body: Option<&'static str>) -> Request<Body> {
        let builder = Request::builder()
            .method("POST")
            .uri("/budget")
            .header("authorization", "Bearer user_1");

        match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_post_without_usable_body_is_absent_input() -> Result<()> {
        let store = MemoryStore::new();
        store.add_user("user_1", "one@example.com")?;
        let invalidator = RecordingInvalidator::new();

        for request in [post_request(None), post_request(Some("not json"))] {
            let (status, body) = send(budget_router(store.clone(), invalidator.clone()), request).await;

            assert_eq!(status, StatusCode::OK);
            assert_eq!(body, json!({ "success": false, "error": "No budget data provided" }));
        }

        assert_eq!(store.budget_count()?, 0);
        assert!(invalidator.paths().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_post_bare_and_wrapped_amounts() -> Result<()> {
        let store = MemoryStore::new();
        store.add_user("user_1", "one@example.com")?;
        let invalidator = RecordingInvalidator::new();

        for payload in ["500", r#"{"amount":500}"#] {
            let router = budget_router(store.clone(), invalidator.clone());
            let (status, body) = send(router, post_request(Some(payload))).await;

            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["success"], json!(true));
            assert_eq!(body["data"]["amount"], json!(500.0));
        }

        assert_eq!(store.budget_count()?, 1);
        assert_eq!(invalidator.paths().len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_post_failure_still_answers_ok() {
        let router = budget_router(MemoryStore::new(), RecordingInvalidator::new());

        let (status, body) = send(router, post_request(Some("500"))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "success": false, "error": "User not found" }));
    }

    #[tokio::test]
    async fn test_get_budget_status_codes() -> Result<()> {
        let store = MemoryStore::new();
        store.add_user("user_1", "one@example.com")?;
        let account = uuid::Uuid::new_v4();

        let request = Request::builder()
            .uri(format!("/budget/{}", account))
            .header("authorization", "Bearer user_1")
            .body(Body::empty())?;
        let (status, body) = send(budget_router(store.clone(), RecordingInvalidator::new()), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"], json!({ "budget": null, "currentExpenses": 0.0 }));

        let request = Request::builder()
            .uri("/budget/not-a-uuid")
            .header("authorization", "Bearer user_1")
            .body(Body::empty())?;
        let (status, _) = send(budget_router(store.clone(), RecordingInvalidator::new()), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let request = Request::builder()
            .uri(format!("/budget/{}", account))
            .body(Body::empty())?;
        let (status, body) = send(budget_router(store, RecordingInvalidator::new()), request).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, json!({ "success": false, "error": "Unauthorized" }));
        Ok(())
    }
}
