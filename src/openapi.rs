use axum::Json;
use utoipa::OpenApi;

use crate::{
    handlers::HealthResponse,
    model::{
        ActionResponse, AdminAction, Location, MapMarker, Report, ReportKpis, ReportStatus, Reporter,
        ViewerRole,
    },
    version::VersionResponse,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health_check,
        crate::version::version,
        crate::handlers::get_reports,
        crate::handlers::get_report,
        crate::handlers::get_markers,
        crate::handlers::get_kpis,
        crate::handlers::post_action,
    ),
    components(
        schemas(
            Report,
            ReportStatus,
            Location,
            Reporter,
            ViewerRole,
            AdminAction,
            MapMarker,
            ReportKpis,
            ActionResponse,
            HealthResponse,
            VersionResponse
        )
    ),
    tags(
        (name = "report-moderation", description = "Report visibility and moderation actions")
    )
)]
pub struct ApiDoc;

/// GET /api/v1/openapi.json
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
