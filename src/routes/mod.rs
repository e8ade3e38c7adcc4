/// Application routes configuration
use crate::handlers::{
    clear_list_view, drain_notices, health, landing, launch_detail, list_launches, login, logout,
    not_found, refresh_launches, require_auth, update_list_view, AppState,
};
use axum::{
    middleware,
    routing::{get, patch, post},
    Router,
};

/// Build the application router with all routes
pub fn build_router(state: AppState) -> Router {
    // Routes behind the auth guard
    let protected = Router::new()
        .route("/launches", get(list_launches))
        .route("/launches/refresh", post(refresh_launches))
        .route("/launches/view", patch(update_list_view))
        .route("/launches/view/clear", post(clear_list_view))
        .route("/launches/:id", get(launch_detail))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .route("/health", get(health))
        .route("/", get(landing))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/notices", get(drain_notices))
        .merge(protected)
        .fallback(not_found)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{AuthStore, FlagStorage, MemoryFlagStorage, AUTH_FLAG_KEY};
    use crate::detail::DetailComposer;
    use crate::guard::RouteGuard;
    use crate::listing::ListStore;
    use crate::notices::NoticeBoard;
    use crate::services::LaunchService;
    use crate::testing::{sample_launch, StubGateway};
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use std::time::Duration;
    use tower::ServiceExt;

    fn app_state(gateway: Arc<StubGateway>, storage: Arc<MemoryFlagStorage>) -> AppState {
        let launches = Arc::new(LaunchService::new(gateway, Arc::new(ListStore::new())));
        AppState {
            auth: Arc::new(AuthStore::new(storage)),
            notices: Arc::new(NoticeBoard::new()),
            composer: Arc::new(DetailComposer::new(
                launches.clone(),
                Duration::from_secs(5),
            )),
            launches,
            guard: RouteGuard::new(),
        }
    }

    fn fleet() -> Arc<StubGateway> {
        Arc::new(StubGateway::with_launches(vec![
            sample_launch("l1", "Falcon 1", "2020-01-01T00:00:00Z", Some(true), Some("r1")),
            sample_launch("l2", "Falcon 9", "2021-01-01T00:00:00Z", Some(false), Some("r2")),
            sample_launch("l3", "Starlink 1", "2019-05-24T02:30:00Z", None, None),
        ]))
    }

    async fn send(
        state: &AppState,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        let response = build_router(state.clone())
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let payload = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, payload)
    }

    async fn log_in(state: &AppState) {
        let (status, body) = send(
            state,
            Method::POST,
            "/login",
            Some(json!({"username": "ada", "password": "lovelace"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["redirect"], "/launches");
    }

    #[tokio::test]
    async fn test_health() {
        let state = app_state(fleet(), Arc::new(MemoryFlagStorage::new()));
        let (status, body) = send(&state, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_anonymous_navigation_redirects_to_login() {
        let state = app_state(fleet(), Arc::new(MemoryFlagStorage::new()));

        let response = build_router(state.clone())
            .oneshot(
                Request::builder()
                    .uri("/launches/l2")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/login");

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["state"]["from"], "/launches/l2");

        let (_, notices) = send(&state, Method::GET, "/notices", None).await;
        let notices = notices["notices"].as_array().unwrap();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0]["title"], "Access Denied");
    }

    #[tokio::test]
    async fn test_login_rejects_blank_credentials() {
        let state = app_state(fleet(), Arc::new(MemoryFlagStorage::new()));
        let (status, body) = send(
            &state,
            Method::POST,
            "/login",
            Some(json!({"username": "", "password": "x"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["ok"], false);
        assert_eq!(body["error"]["code"], "INVALID_INPUT");
        assert!(!state.auth.is_authenticated());
    }

    #[tokio::test]
    async fn test_login_persists_flag_and_opens_list() {
        let storage = Arc::new(MemoryFlagStorage::new());
        let state = app_state(fleet(), storage.clone());
        log_in(&state).await;
        assert_eq!(storage.get(AUTH_FLAG_KEY).unwrap().as_deref(), Some("true"));

        let (status, body) = send(&state, Method::GET, "/launches", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_launches"], 3);
        assert_eq!(body["items"][0]["name"], "Starlink 1");
        assert_eq!(body["status"]["state"], "success");
    }

    #[tokio::test]
    async fn test_logout_suppresses_access_denied() {
        let state = app_state(fleet(), Arc::new(MemoryFlagStorage::new()));
        log_in(&state).await;

        let (status, body) = send(&state, Method::POST, "/logout", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["redirect"], "/login");

        let (status, _) = send(&state, Method::GET, "/launches", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (_, notices) = send(&state, Method::GET, "/notices", None).await;
        let titles: Vec<&str> = notices["notices"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|n| n["title"].as_str())
            .collect();
        assert_eq!(titles, vec!["Logout Successful"]);
    }

    #[tokio::test]
    async fn test_view_update_filters_and_resets_page() {
        let state = app_state(fleet(), Arc::new(MemoryFlagStorage::new()));
        log_in(&state).await;
        send(&state, Method::GET, "/launches", None).await;
        state.launches.list().set_page(2);

        let (status, body) = send(
            &state,
            Method::PATCH,
            "/launches/view",
            Some(json!({"search_term": "Falcon", "filter_success": "successful"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["page"], 1);
        let names: Vec<&str> = body["items"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|i| i["name"].as_str())
            .collect();
        assert_eq!(names, vec!["Falcon 1"]);

        let (_, body) = send(&state, Method::POST, "/launches/view/clear", None).await;
        assert_eq!(body["search_term"], "");
        assert_eq!(body["filter_success"], "all");
        assert_eq!(body["sort_criteria"], "asc");
        assert_eq!(body["items"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_refresh_reports_upstream_failure() {
        let state = app_state(
            Arc::new(StubGateway::default().failing_list()),
            Arc::new(MemoryFlagStorage::new()),
        );
        log_in(&state).await;

        let (status, body) = send(&state, Method::POST, "/launches/refresh", None).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["ok"], false);
        assert_eq!(body["error"]["code"], "UPSTREAM_5XX");

        let (_, view) = send(&state, Method::GET, "/launches", None).await;
        assert_eq!(view["status"]["state"], "error");
    }

    #[tokio::test]
    async fn test_launch_detail_composes_rocket() {
        let gateway = fleet();
        let state = app_state(gateway.clone(), Arc::new(MemoryFlagStorage::new()));
        log_in(&state).await;

        let (status, body) = send(&state, Method::GET, "/launches/l1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "success");
        assert_eq!(body["launch"]["state"], "ready");
        assert_eq!(body["launch"]["value"]["name"], "Falcon 1");
        assert_eq!(body["rocket"]["value"]["id"], "r1");

        let (_, body) = send(&state, Method::GET, "/launches/l3", None).await;
        assert_eq!(body["rocket"]["state"], "not_applicable");
        assert_eq!(gateway.rocket_calls(), 1);
    }

    #[tokio::test]
    async fn test_unknown_path_is_not_found() {
        let state = app_state(fleet(), Arc::new(MemoryFlagStorage::new()));
        let (status, body) = send(&state, Method::GET, "/rockets", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }
}
