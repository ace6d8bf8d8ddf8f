use chrono::{TimeZone, Utc};

use crate::model::{Location, Report, ReportStatus, Reporter};

#[allow(clippy::too_many_arguments)]
fn mock(
    id: &str,
    title: &str,
    description: &str,
    (lat, lng): (f64, f64),
    status: ReportStatus,
    (day, hour): (u32, u32),
    reporter: &str,
    phone: Option<&str>,
) -> Report {
    Report {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        location: Location { lat, lng },
        status,
        created_at: Utc
            .with_ymd_and_hms(2024, 6, day, hour, 0, 0)
            .single()
            .unwrap_or_else(Utc::now),
        reporter: Reporter {
            name: reporter.to_string(),
            phone: phone.map(str::to_string),
        },
    }
}

/// Stand-in collection used until a remote store exists.
pub fn mock_reports() -> Vec<Report> {
    vec![
        mock(
            "r_01",
            "Overflowing bins at market entrance",
            "Three public bins have been overflowing since the weekend.",
            (6.4541, 3.3947),
            ReportStatus::Pending,
            (3, 8),
            "Chidi Okafor",
            Some("+234 801 234 5678"),
        ),
        mock(
            "r_02",
            "Plastic waste along the canal",
            "Plastic bottles and bags are blocking the drainage canal.",
            (6.4654, 3.4064),
            ReportStatus::Approved,
            (4, 10),
            "Amaka Eze",
            None,
        ),
        mock(
            "r_03",
            "Dumped construction debris",
            "A pile of rubble was dumped on the footpath overnight.",
            (6.4433, 3.4202),
            ReportStatus::Resolved,
            (5, 14),
            "Tunde Bakare",
            Some("+234 802 555 0101"),
        ),
        mock(
            "r_04",
            "Duplicate of canal report",
            "Same location as the canal report submitted earlier.",
            (6.4655, 3.4066),
            ReportStatus::Rejected,
            (6, 9),
            "Ngozi Adeyemi",
            None,
        ),
        mock(
            "r_05",
            "Burning refuse near school",
            "Residents are burning household refuse next to the school fence.",
            (6.5005, 3.3581),
            ReportStatus::Pending,
            (7, 16),
            "Ibrahim Musa",
            None,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::ensure_unique_ids;

    #[test]
    fn test_mock_reports_cover_every_status() {
        let reports = mock_reports();
        assert!(ensure_unique_ids(&reports).is_ok());
        for status in ReportStatus::ALL {
            assert!(reports.iter().any(|r| r.status == status), "missing {}", status);
        }
    }
}
