pub mod health;
pub mod settings;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::colleges::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Colleges API
        .route("/api/v1/colleges", get(handlers::handle_list_colleges))
        .route("/api/v1/colleges/fetch", post(handlers::handle_fetch))
        .route("/api/v1/colleges/filter", post(handlers::handle_filter))
        .route("/api/v1/colleges/compare", post(handlers::handle_compare))
        .route(
            "/api/v1/colleges/recommend",
            post(handlers::handle_recommend),
        )
        // Session settings
        .route(
            "/api/v1/settings/api-key",
            put(settings::handle_set_api_key),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::colleges::gateway::CollegeGateway;
    use crate::colleges::sanitize::sanitize;
    use crate::colleges::store::RecordStore;
    use crate::config::Config;
    use crate::llm_client::testing::ScriptedCompletion;

    async fn test_state(dir: &tempfile::TempDir, fake: ScriptedCompletion) -> AppState {
        let path = dir.path().join("database").join("colleges.json");
        let store = RecordStore::open(&path).await.unwrap();
        AppState::new(
            Config::for_tests(path),
            store,
            CollegeGateway::new(Arc::new(fake)),
        )
    }

    async fn send(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let req = match body {
            Some(b) => builder
                .header("content-type", "application/json")
                .body(Body::from(b.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let resp = app.oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_router(test_state(&dir, ScriptedCompletion::new()).await);
        let (status, body) = send(app, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_fetch_then_list_and_filter() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(
            &dir,
            ScriptedCompletion::new().reply(
                r#"Sure! [{"name":"A","city":"Pune","fees":"50000","rating":"4.1"},
                          {"name":"B","city":"Pune","fees":"2,00,000"},
                          {"name":"C","city":"Pune","fees":75000,"rating":3.9}]"#,
            ),
        )
        .await;

        let (status, body) = send(
            build_router(state.clone()),
            "POST",
            "/api/v1/colleges/fetch",
            Some(json!({"course": "B.Tech", "city": "Pune"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["stored"], 3);
        assert_eq!(body["collection"]["count"], 3);
        assert_eq!(body["collection"]["table"][1]["fees"], "2");

        let (status, body) = send(build_router(state.clone()), "GET", "/api/v1/colleges", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["colleges"][0]["fees"], 50000);
        assert_eq!(body["table"][2]["name"], "C");

        let (status, body) = send(
            build_router(state),
            "POST",
            "/api/v1/colleges/filter",
            Some(json!({"budget": "60000"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 2);
        assert_eq!(body["colleges"][0]["name"], "A");
        assert_eq!(body["colleges"][1]["name"], "B");
    }

    #[tokio::test]
    async fn test_filter_invalid_budget_is_bad_request() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_router(test_state(&dir, ScriptedCompletion::new()).await);
        let (status, body) = send(
            app,
            "POST",
            "/api/v1/colleges/filter",
            Some(json!({"budget": "one lakh"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "Enter numeric budget.");
    }

    #[tokio::test]
    async fn test_compare_on_empty_store_reports_no_result() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_router(test_state(&dir, ScriptedCompletion::new()).await);
        let (status, body) = send(app, "POST", "/api/v1/colleges/compare", Some(json!({}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["best"], Value::Null);
        assert_eq!(body["output"], "No result.");
    }

    #[tokio::test]
    async fn test_recommend_without_selection() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_router(test_state(&dir, ScriptedCompletion::new()).await);
        let (status, body) =
            send(app, "POST", "/api/v1/colleges/recommend", Some(json!({}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["recommendation"], Value::Null);
        assert_eq!(body["output"], "Select a college first.");
    }

    #[tokio::test]
    async fn test_recommend_unknown_index_is_404() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_router(test_state(&dir, ScriptedCompletion::new()).await);
        let (status, _) = send(
            app,
            "POST",
            "/api/v1/colleges/recommend",
            Some(json!({"selection": 0})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_set_api_key() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir, ScriptedCompletion::new()).await;

        let (status, _) = send(
            build_router(state.clone()),
            "PUT",
            "/api/v1/settings/api-key",
            Some(json!({"api_key": "   "})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = send(
            build_router(state),
            "PUT",
            "/api/v1/settings/api-key",
            Some(json!({"api_key": "test-key"})),
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(body, Value::Null);
    }

    #[tokio::test]
    async fn test_replaced_gateway_serves_later_requests() {
        let dir = tempfile::tempdir().unwrap();
        let original = Arc::new(ScriptedCompletion::new());
        let path = dir.path().join("colleges.json");
        let store = RecordStore::open(&path).await.unwrap();
        store
            .append(sanitize(
                json!({"name": "COEP", "fees": 90000})
                    .as_object()
                    .cloned()
                    .unwrap(),
            ))
            .await
            .unwrap();
        let state = AppState::new(
            Config::for_tests(path),
            store,
            CollegeGateway::new(original.clone()),
        );

        let replacement = Arc::new(
            ScriptedCompletion::new().reply(r#"{"name": "COEP", "reason": "Only candidate"}"#),
        );
        state
            .replace_gateway(CollegeGateway::new(replacement.clone()))
            .unwrap();

        let (status, body) = send(
            build_router(state),
            "POST",
            "/api/v1/colleges/compare",
            Some(json!({})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["output"], "Best: COEP\nReason: Only candidate");
        assert_eq!(replacement.prompts().len(), 1);
        assert!(original.prompts().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_store_write_failure_is_500() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(
            &dir,
            ScriptedCompletion::new().reply(r#"[{"name": "A", "fees": 1}]"#),
        )
        .await;
        // A directory where the file should be makes every overwrite fail.
        let path = state.store.path().to_path_buf();
        std::fs::remove_file(&path).unwrap();
        std::fs::create_dir(&path).unwrap();

        let (status, body) = send(
            build_router(state),
            "POST",
            "/api/v1/colleges/fetch",
            Some(json!({"course": "MBA", "city": "Pune"})),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "STORE_ERROR");
    }
}
