use axum::{extract::State, http::StatusCode, response::Json};
use serde::{Deserialize, Serialize};

use crate::handlers::AppState;

fn build_version() -> &'static str {
    option_env!("CLEANAPP_BUILD_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
}

fn git_sha() -> &'static str {
    option_env!("CLEANAPP_GIT_SHA").unwrap_or("")
}

fn build_time() -> &'static str {
    option_env!("CLEANAPP_BUILD_TIME").unwrap_or("")
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct VersionResponse {
    pub service: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub git_sha: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub build_time: String,
}

/// GET /version
#[utoipa::path(
    get,
    path = "/version",
    responses((status = 200, description = "Build information", body = VersionResponse))
)]
pub async fn version(State(state): State<AppState>) -> (StatusCode, Json<VersionResponse>) {
    let response = VersionResponse {
        service: state.service_name.clone(),
        version: build_version().to_string(),
        git_sha: git_sha().to_string(),
        build_time: build_time().to_string(),
    };

    (StatusCode::OK, Json(response))
}
