/// HTTP request handlers
use crate::auth::{AuthPhase, AuthStore, LoginForm};
use crate::detail::{DetailComposer, LaunchDetailView, ResourceStatus};
use crate::domain::Health;
use crate::errors::ApiError;
use crate::guard::{GuardDecision, RouteGuard, HOME_PATH, LOGIN_PATH};
use crate::listing::{ListView, ListViewUpdate};
use crate::notices::{Notice, NoticeBoard};
use crate::services::LaunchService;
use axum::{
    extract::{Path, Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthStore>,
    pub notices: Arc<NoticeBoard>,
    pub launches: Arc<LaunchService>,
    pub composer: Arc<DetailComposer>,
    pub guard: RouteGuard,
}

/// Successful response wrapper
#[derive(Serialize)]
pub struct SuccessResponse<T: Serialize> {
    pub ok: bool,
    #[serde(flatten)]
    pub data: T,
}

impl<T: Serialize> SuccessResponse<T> {
    pub fn new(data: T) -> Self {
        Self { ok: true, data }
    }
}

#[derive(Serialize)]
pub struct Landing {
    pub app: &'static str,
    pub authenticated: bool,
    pub phase: AuthPhase,
}

#[derive(Serialize)]
pub struct Navigation {
    pub redirect: &'static str,
}

#[derive(Serialize)]
pub struct Notices {
    pub notices: Vec<Notice>,
}

#[derive(Serialize)]
pub struct LaunchDetail {
    pub status: ResourceStatus,
    #[serde(flatten)]
    pub view: LaunchDetailView,
}

/// Gate the protected routes on the auth state
pub async fn require_auth(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();

    match state.guard.check(&state.auth, &state.notices, &path) {
        GuardDecision::Allow => next.run(request).await,
        GuardDecision::Redirect {
            to,
            state: redirect,
        } => (
            StatusCode::SEE_OTHER,
            [(header::LOCATION, to)],
            Json(serde_json::json!({
                "ok": false,
                "redirect": to,
                "state": redirect,
            })),
        )
            .into_response(),
        GuardDecision::Suppress => StatusCode::NO_CONTENT.into_response(),
    }
}

/// Health check handler
pub async fn health() -> Json<Health> {
    Json(Health {
        status: "ok",
        now: Utc::now(),
    })
}

/// Landing page
pub async fn landing(State(state): State<AppState>) -> Json<SuccessResponse<Landing>> {
    let auth = state.auth.snapshot();
    Json(SuccessResponse::new(Landing {
        app: "SpaceX Launch Explorer",
        authenticated: auth.is_authenticated,
        phase: auth.phase(),
    }))
}

/// Accept any non-empty credentials; always land on the launch list
pub async fn login(
    State(state): State<AppState>,
    Json(form): Json<LoginForm>,
) -> Result<Json<SuccessResponse<Navigation>>, ApiError> {
    state.auth.authenticate(&form)?;
    Ok(Json(SuccessResponse::new(Navigation {
        redirect: HOME_PATH,
    })))
}

pub async fn logout(
    State(state): State<AppState>,
) -> Result<Json<SuccessResponse<Navigation>>, ApiError> {
    state.auth.logout()?;
    state.notices.push(Notice::logged_out());
    Ok(Json(SuccessResponse::new(Navigation {
        redirect: LOGIN_PATH,
    })))
}

/// Drain pending notices
pub async fn drain_notices(State(state): State<AppState>) -> Json<SuccessResponse<Notices>> {
    Json(SuccessResponse::new(Notices {
        notices: state.notices.drain(),
    }))
}

/// Visible page of the launch list
pub async fn list_launches(State(state): State<AppState>) -> Json<SuccessResponse<ListView>> {
    let view = state.launches.list_view().await;
    Json(SuccessResponse::new(view))
}

/// Refetch the launch collection
pub async fn refresh_launches(
    State(state): State<AppState>,
) -> Result<Json<SuccessResponse<ListView>>, ApiError> {
    state.launches.refresh_launches().await?;
    Ok(Json(SuccessResponse::new(state.launches.list().view())))
}

/// Change search / sort / filter / page
pub async fn update_list_view(
    State(state): State<AppState>,
    Json(update): Json<ListViewUpdate>,
) -> Json<SuccessResponse<ListView>> {
    state.launches.list().apply(update);
    Json(SuccessResponse::new(state.launches.list().view()))
}

pub async fn clear_list_view(State(state): State<AppState>) -> Json<SuccessResponse<ListView>> {
    state.launches.list().clear_filters();
    Json(SuccessResponse::new(state.launches.list().view()))
}

/// Launch detail with its rocket
pub async fn launch_detail(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Json<SuccessResponse<LaunchDetail>> {
    let view = state.composer.compose(Some(id.as_str())).await;
    Json(SuccessResponse::new(LaunchDetail {
        status: view.status(),
        view,
    }))
}

/// Fallback for unknown paths
pub async fn not_found() -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({
            "ok": false,
            "error": {"code": "NOT_FOUND", "message": "no such page"}
        })),
    )
}
