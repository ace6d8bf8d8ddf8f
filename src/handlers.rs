use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::{
    error::{PolicyError, StoreError},
    model::{ActionResponse, AdminAction, MapMarker, Report, ReportKpis, ViewerRole},
    policy::{self, UpdateMode},
    reports_memory::{InMemoryReports, ReportStore},
};

#[derive(Clone)]
pub struct AppState {
    pub reports: Arc<InMemoryReports>,
    pub update_mode: UpdateMode,
    pub service_name: String,
}

#[derive(Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RoleParams {
    /// `admin` or `community`; anything else is treated as `community`.
    role: Option<String>,
}

impl RoleParams {
    fn viewer(&self) -> ViewerRole {
        ViewerRole::from_tag(self.role.as_deref())
    }
}

#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub time: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/version", get(crate::version::version))
        .route("/api/v1/openapi.json", get(crate::openapi::openapi_json))
        .route("/api/v1/reports", get(get_reports))
        .route("/api/v1/reports/markers", get(get_markers))
        .route("/api/v1/reports/{id}", get(get_report))
        .route("/api/v1/reports/{id}/{action}", post(post_action))
        .route("/api/v1/kpis", get(get_kpis))
        .with_state(state)
}

/// GET /health
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up", body = HealthResponse))
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: state.service_name.clone(),
        time: chrono::Utc::now().to_rfc3339(),
    })
}

/// GET /api/v1/reports
#[utoipa::path(
    get,
    path = "/api/v1/reports",
    params(RoleParams),
    responses((status = 200, description = "Reports visible to the viewer", body = [Report]))
)]
pub async fn get_reports(
    State(state): State<AppState>,
    Query(params): Query<RoleParams>,
) -> Result<Json<Vec<Report>>, (StatusCode, String)> {
    let items = state.reports.visible(params.viewer()).map_err(store_error)?;
    Ok(Json(items))
}

/// GET /api/v1/reports/{id}
#[utoipa::path(
    get,
    path = "/api/v1/reports/{id}",
    params(("id" = String, Path, description = "Report id"), RoleParams),
    responses(
        (status = 200, description = "Report detail", body = Report),
        (status = 404, description = "Unknown or hidden report")
    )
)]
pub async fn get_report(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<RoleParams>,
) -> Result<Json<Report>, (StatusCode, String)> {
    // Hidden reports answer 404 so their existence is not leaked.
    state
        .reports
        .visible(params.viewer())
        .map_err(store_error)?
        .into_iter()
        .find(|r| r.id == id)
        .map(Json)
        .ok_or_else(|| (StatusCode::NOT_FOUND, format!("Report not found: {}", id)))
}

/// GET /api/v1/reports/markers
#[utoipa::path(
    get,
    path = "/api/v1/reports/markers",
    params(RoleParams),
    responses((status = 200, description = "Map markers for visible reports", body = [MapMarker]))
)]
pub async fn get_markers(
    State(state): State<AppState>,
    Query(params): Query<RoleParams>,
) -> Result<Json<Vec<MapMarker>>, (StatusCode, String)> {
    let visible = state.reports.visible(params.viewer()).map_err(store_error)?;
    Ok(Json(policy::map_markers(&visible)))
}

/// GET /api/v1/kpis
#[utoipa::path(
    get,
    path = "/api/v1/kpis",
    responses((status = 200, description = "Active and resolved counts", body = ReportKpis))
)]
pub async fn get_kpis(State(state): State<AppState>) -> Result<Json<ReportKpis>, (StatusCode, String)> {
    let all = state.reports.fetch_reports().map_err(store_error)?;
    Ok(Json(policy::kpis(&all)))
}

/// POST /api/v1/reports/{id}/{action}
#[utoipa::path(
    post,
    path = "/api/v1/reports/{id}/{action}",
    params(
        ("id" = String, Path, description = "Report id"),
        ("action" = String, Path, description = "approve, reject or resolve"),
        RoleParams
    ),
    responses(
        (status = 200, description = "Action applied", body = ActionResponse),
        (status = 400, description = "Unknown action"),
        (status = 403, description = "Viewer is not an admin"),
        (status = 404, description = "Unknown report"),
        (status = 409, description = "Transition not allowed")
    )
)]
pub async fn post_action(
    State(state): State<AppState>,
    Path((id, action)): Path<(String, String)>,
    Query(params): Query<RoleParams>,
) -> Result<Json<ActionResponse>, (StatusCode, String)> {
    let action: AdminAction = action
        .parse()
        .map_err(|e: crate::model::UnknownVariant| (StatusCode::BAD_REQUEST, e.to_string()))?;

    let report = state
        .reports
        .apply_action(params.viewer(), &id, action, state.update_mode)
        .map_err(store_error)?;

    Ok(Json(ActionResponse {
        updated: report.is_some(),
        report,
    }))
}

fn store_error(e: StoreError) -> (StatusCode, String) {
    let status = match &e {
        StoreError::Policy(PolicyError::NotFound(_)) => StatusCode::NOT_FOUND,
        StoreError::Policy(PolicyError::Forbidden(_)) => StatusCode::FORBIDDEN,
        StoreError::Policy(PolicyError::InvalidTransition { .. }) => StatusCode::CONFLICT,
        StoreError::Policy(PolicyError::DuplicateId(_)) => StatusCode::CONFLICT,
        StoreError::LockPoisoned => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status.is_server_error() {
        tracing::error!("internal error: {}", e);
    } else {
        tracing::warn!("request rejected: {}", e);
    }
    (status, e.to_string())
}
