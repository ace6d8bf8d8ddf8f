use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle tag of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Pending,
    Approved,
    Resolved,
    Rejected,
}

impl ReportStatus {
    pub const ALL: [ReportStatus; 4] = [
        ReportStatus::Pending,
        ReportStatus::Approved,
        ReportStatus::Resolved,
        ReportStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Pending => "pending",
            ReportStatus::Approved => "approved",
            ReportStatus::Resolved => "resolved",
            ReportStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ReportStatus::Pending),
            "approved" => Ok(ReportStatus::Approved),
            "resolved" => Ok(ReportStatus::Resolved),
            "rejected" => Ok(ReportStatus::Rejected),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

/// Who is looking at the reports. Supplied per request, never stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ViewerRole {
    #[default]
    Community,
    Admin,
}

impl ViewerRole {
    /// Anything that is not exactly "admin" gets community visibility.
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag {
            Some(t) if t.eq_ignore_ascii_case("admin") => ViewerRole::Admin,
            _ => ViewerRole::Community,
        }
    }
}

impl fmt::Display for ViewerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewerRole::Community => f.write_str("community"),
            ViewerRole::Admin => f.write_str("admin"),
        }
    }
}

/// Moderation gestures exposed to admins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AdminAction {
    Approve,
    Reject,
    Resolve,
}

impl AdminAction {
    pub fn target_status(&self) -> ReportStatus {
        match self {
            AdminAction::Approve => ReportStatus::Approved,
            AdminAction::Reject => ReportStatus::Rejected,
            AdminAction::Resolve => ReportStatus::Resolved,
        }
    }
}

impl FromStr for AdminAction {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approve" => Ok(AdminAction::Approve),
            "reject" => Ok(AdminAction::Reject),
            "resolve" => Ok(AdminAction::Resolve),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown value: {0}")]
pub struct UnknownVariant(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Reporter {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// A community-submitted waste-location record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Report {
    pub id: String,
    pub title: String,
    pub description: String,
    pub location: Location,
    pub status: ReportStatus,
    pub created_at: DateTime<Utc>,
    pub reporter: Reporter,
}

/// Marker tuple handed to the map widget.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct MapMarker {
    pub id: String,
    pub lat: f64,
    pub lng: f64,
    pub label: String,
    pub status: ReportStatus,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ReportKpis {
    pub active_count: usize,
    pub resolved_count: usize,
    pub total: usize,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ActionResponse {
    pub updated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<Report>,
}
