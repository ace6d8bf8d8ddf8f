//! Report visibility and status-transition rules.
//!
//! Everything here is pure: functions take the collection by reference and
//! hand back a fresh one. Holding the collection and swapping it in is the
//! caller's job (see `reports_memory`).

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{
    error::PolicyError,
    model::{AdminAction, MapMarker, Report, ReportKpis, ReportStatus, ViewerRole},
};

/// How a status write treats unknown ids and illegal moves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateMode {
    /// Unknown id is a silent no-op; any status may move to any other.
    #[default]
    Lenient,
    /// Unknown id fails with `NotFound`; any move allowed.
    Strict,
    /// Unknown id fails with `NotFound`; moves must follow the transition table.
    Checked,
}

impl std::str::FromStr for UpdateMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lenient" => Ok(UpdateMode::Lenient),
            "strict" => Ok(UpdateMode::Strict),
            "checked" => Ok(UpdateMode::Checked),
            other => Err(format!("unknown update mode '{}'", other)),
        }
    }
}

pub fn is_visible(status: ReportStatus, role: ViewerRole) -> bool {
    match role {
        ViewerRole::Admin => true,
        ViewerRole::Community => matches!(status, ReportStatus::Approved | ReportStatus::Resolved),
    }
}

/// Reports the given role may see, in input order.
pub fn visible_reports(all: &[Report], role: ViewerRole) -> Vec<Report> {
    all.iter()
        .filter(|r| is_visible(r.status, role))
        .cloned()
        .collect()
}

/// Overwrites the status of the report matching `id`. An unknown id returns
/// the collection unchanged.
pub fn set_status(reports: &[Report], id: &str, new_status: ReportStatus) -> Vec<Report> {
    reports
        .iter()
        .map(|r| {
            if r.id == id {
                Report {
                    status: new_status,
                    ..r.clone()
                }
            } else {
                r.clone()
            }
        })
        .collect()
}

pub fn set_status_strict(
    reports: &[Report],
    id: &str,
    new_status: ReportStatus,
) -> Result<Vec<Report>, PolicyError> {
    if !reports.iter().any(|r| r.id == id) {
        return Err(PolicyError::NotFound(id.to_string()));
    }
    Ok(set_status(reports, id, new_status))
}

/// Legal edges: identity, pending -> approved, pending -> rejected,
/// approved -> resolved.
pub fn can_transition(from: ReportStatus, to: ReportStatus) -> bool {
    use ReportStatus::*;
    from == to
        || matches!(
            (from, to),
            (Pending, Approved) | (Pending, Rejected) | (Approved, Resolved)
        )
}

pub fn set_status_checked(
    reports: &[Report],
    id: &str,
    new_status: ReportStatus,
) -> Result<Vec<Report>, PolicyError> {
    let current = reports
        .iter()
        .find(|r| r.id == id)
        .ok_or_else(|| PolicyError::NotFound(id.to_string()))?;
    if !can_transition(current.status, new_status) {
        return Err(PolicyError::InvalidTransition {
            id: id.to_string(),
            from: current.status,
            to: new_status,
        });
    }
    Ok(set_status(reports, id, new_status))
}

pub fn update_status(
    reports: &[Report],
    id: &str,
    new_status: ReportStatus,
    mode: UpdateMode,
) -> Result<Vec<Report>, PolicyError> {
    match mode {
        UpdateMode::Lenient => Ok(set_status(reports, id, new_status)),
        UpdateMode::Strict => set_status_strict(reports, id, new_status),
        UpdateMode::Checked => set_status_checked(reports, id, new_status),
    }
}

/// Admin gesture with the role check done here rather than trusted to the UI.
pub fn apply_action(
    reports: &[Report],
    role: ViewerRole,
    id: &str,
    action: AdminAction,
    mode: UpdateMode,
) -> Result<Vec<Report>, PolicyError> {
    match role {
        ViewerRole::Admin => update_status(reports, id, action.target_status(), mode),
        ViewerRole::Community => Err(PolicyError::Forbidden(role)),
    }
}

pub fn active_count(reports: &[Report]) -> usize {
    reports
        .iter()
        .filter(|r| matches!(r.status, ReportStatus::Approved | ReportStatus::Pending))
        .count()
}

pub fn resolved_count(reports: &[Report]) -> usize {
    reports
        .iter()
        .filter(|r| r.status == ReportStatus::Resolved)
        .count()
}

pub fn kpis(reports: &[Report]) -> ReportKpis {
    ReportKpis {
        active_count: active_count(reports),
        resolved_count: resolved_count(reports),
        total: reports.len(),
    }
}

pub fn map_markers(reports: &[Report]) -> Vec<MapMarker> {
    reports
        .iter()
        .map(|r| MapMarker {
            id: r.id.clone(),
            lat: r.location.lat,
            lng: r.location.lng,
            label: r.title.clone(),
            status: r.status,
        })
        .collect()
}

pub fn ensure_unique_ids(reports: &[Report]) -> Result<(), PolicyError> {
    let mut seen = HashSet::with_capacity(reports.len());
    for r in reports {
        if !seen.insert(r.id.as_str()) {
            return Err(PolicyError::DuplicateId(r.id.clone()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Location, Reporter};
    use chrono::{TimeZone, Utc};

    fn report(id: &str, status: ReportStatus) -> Report {
        Report {
            id: id.to_string(),
            title: format!("Report {}", id),
            description: "Bags of rubbish left by the curb".to_string(),
            location: Location { lat: 6.5244, lng: 3.3792 },
            status,
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap(),
            reporter: Reporter {
                name: "Ada".to_string(),
                phone: None,
            },
        }
    }

    fn mixed() -> Vec<Report> {
        vec![
            report("r_01", ReportStatus::Pending),
            report("r_02", ReportStatus::Approved),
            report("r_03", ReportStatus::Resolved),
            report("r_04", ReportStatus::Rejected),
            report("r_05", ReportStatus::Approved),
        ]
    }

    #[test]
    fn test_admin_sees_everything() {
        let all = mixed();
        assert_eq!(visible_reports(&all, ViewerRole::Admin), all);
    }

    #[test]
    fn test_community_sees_approved_and_resolved_once() {
        let all = mixed();
        let visible = visible_reports(&all, ViewerRole::Community);

        assert!(visible
            .iter()
            .all(|r| matches!(r.status, ReportStatus::Approved | ReportStatus::Resolved)));
        let ids: Vec<&str> = visible.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["r_02", "r_03", "r_05"]);
    }

    #[test]
    fn test_community_scenario() {
        let all = vec![
            report("r_01", ReportStatus::Pending),
            report("r_02", ReportStatus::Approved),
        ];
        let visible = visible_reports(&all, ViewerRole::Community);
        assert_eq!(visible, vec![report("r_02", ReportStatus::Approved)]);
    }

    #[test]
    fn test_empty_input() {
        assert!(visible_reports(&[], ViewerRole::Community).is_empty());
        assert!(visible_reports(&[], ViewerRole::Admin).is_empty());
        assert_eq!(kpis(&[]), ReportKpis::default());
    }

    #[test]
    fn test_set_status_touches_only_target() {
        let all = vec![
            report("r_01", ReportStatus::Pending),
            report("r_02", ReportStatus::Approved),
        ];
        let updated = set_status(&all, "r_01", ReportStatus::Approved);

        assert_eq!(updated.len(), all.len());
        assert_eq!(updated[0].status, ReportStatus::Approved);
        assert_eq!(
            Report {
                status: ReportStatus::Pending,
                ..updated[0].clone()
            },
            all[0]
        );
        assert_eq!(updated[1], all[1]);
    }

    #[test]
    fn test_set_status_missing_id_is_noop() {
        let all = mixed();
        assert_eq!(set_status(&all, "missing_id", ReportStatus::Approved), all);
    }

    #[test]
    fn test_set_status_is_idempotent() {
        let all = mixed();
        let once = set_status(&all, "r_04", ReportStatus::Pending);
        let twice = set_status(&once, "r_04", ReportStatus::Pending);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_lenient_allows_any_move() {
        let all = mixed();
        let updated = set_status(&all, "r_03", ReportStatus::Pending);
        assert_eq!(updated[2].status, ReportStatus::Pending);
    }

    #[test]
    fn test_strict_reports_missing_id() {
        let all = mixed();
        assert_eq!(
            set_status_strict(&all, "missing_id", ReportStatus::Approved),
            Err(PolicyError::NotFound("missing_id".to_string()))
        );
        let updated = set_status_strict(&all, "r_01", ReportStatus::Approved).unwrap();
        assert_eq!(updated, set_status(&all, "r_01", ReportStatus::Approved));
    }

    #[test]
    fn test_transition_table() {
        use ReportStatus::*;
        let allowed = [(Pending, Approved), (Pending, Rejected), (Approved, Resolved)];
        for from in ReportStatus::ALL {
            for to in ReportStatus::ALL {
                let expected = from == to || allowed.contains(&(from, to));
                assert_eq!(can_transition(from, to), expected, "{} -> {}", from, to);
            }
        }
    }

    #[test]
    fn test_checked_rejects_illegal_move() {
        let all = mixed();
        assert_eq!(
            set_status_checked(&all, "r_03", ReportStatus::Pending),
            Err(PolicyError::InvalidTransition {
                id: "r_03".to_string(),
                from: ReportStatus::Resolved,
                to: ReportStatus::Pending,
            })
        );
        assert!(set_status_checked(&all, "r_02", ReportStatus::Resolved).is_ok());
        assert!(set_status_checked(&all, "r_04", ReportStatus::Rejected).is_ok());
        assert!(matches!(
            set_status_checked(&all, "nope", ReportStatus::Approved),
            Err(PolicyError::NotFound(_))
        ));
    }

    #[test]
    fn test_apply_action_requires_admin() {
        let all = mixed();
        assert_eq!(
            apply_action(&all, ViewerRole::Community, "r_01", AdminAction::Approve, UpdateMode::Lenient),
            Err(PolicyError::Forbidden(ViewerRole::Community))
        );

        let updated =
            apply_action(&all, ViewerRole::Admin, "r_01", AdminAction::Reject, UpdateMode::Checked).unwrap();
        assert_eq!(updated[0].status, ReportStatus::Rejected);
    }

    #[test]
    fn test_kpis() {
        let all = vec![
            report("a", ReportStatus::Pending),
            report("b", ReportStatus::Approved),
            report("c", ReportStatus::Resolved),
            report("d", ReportStatus::Resolved),
        ];
        assert_eq!(active_count(&all), 2);
        assert_eq!(resolved_count(&all), 2);
        assert_eq!(kpis(&all).total, 4);
    }

    #[test]
    fn test_map_markers_follow_input_order() {
        let all = mixed();
        let markers = map_markers(&all);
        assert_eq!(markers.len(), all.len());
        assert_eq!(markers[1].id, "r_02");
        assert_eq!(markers[1].label, "Report r_02");
        assert_eq!(markers[1].lat, 6.5244);
    }

    #[test]
    fn test_unique_ids() {
        assert!(ensure_unique_ids(&mixed()).is_ok());
        let dup = vec![report("x", ReportStatus::Pending), report("x", ReportStatus::Approved)];
        assert_eq!(ensure_unique_ids(&dup), Err(PolicyError::DuplicateId("x".to_string())));
    }

    #[test]
    fn test_update_mode_parse() {
        assert_eq!("Checked".parse::<UpdateMode>().unwrap(), UpdateMode::Checked);
        assert_eq!(" lenient ".parse::<UpdateMode>().unwrap(), UpdateMode::Lenient);
        assert!("loose".parse::<UpdateMode>().is_err());
    }
}
