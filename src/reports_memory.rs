use std::sync::{Arc, RwLock};

use crate::{
    error::{PolicyError, StoreError},
    model::{AdminAction, Report, ReportStatus, ViewerRole},
    policy::{self, UpdateMode},
};

/// Access to the report collection. The in-memory container is the only
/// implementation until a remote store is wired in.
pub trait ReportStore {
    fn fetch_reports(&self) -> Result<Vec<Report>, StoreError>;

    /// `Ok(None)` means the id was unknown and the mode treats that as a no-op.
    fn update_status(
        &self,
        id: &str,
        status: ReportStatus,
        mode: UpdateMode,
    ) -> Result<Option<Report>, StoreError>;
}

pub struct InMemoryReports {
    content: Arc<RwLock<Vec<Report>>>,
}

impl InMemoryReports {
    pub fn new() -> Self {
        Self {
            content: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub fn with_reports(reports: Vec<Report>) -> Result<Self, PolicyError> {
        policy::ensure_unique_ids(&reports)?;
        Ok(Self {
            content: Arc::new(RwLock::new(reports)),
        })
    }

    pub fn seeded() -> Result<Self, PolicyError> {
        Self::with_reports(crate::mock::mock_reports())
    }

    pub fn len(&self) -> usize {
        self.content.read().map(|g| g.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn snapshot(&self) -> Result<Vec<Report>, StoreError> {
        let guard = self.content.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(guard.clone())
    }

    /// Runs `apply` against the current collection and swaps in its result
    /// under a single write lock.
    fn replace_with<F>(&self, id: &str, apply: F) -> Result<Option<Report>, StoreError>
    where
        F: FnOnce(&[Report]) -> Result<Vec<Report>, PolicyError>,
    {
        let mut guard = self.content.write().map_err(|_| StoreError::LockPoisoned)?;
        let before = guard.iter().find(|r| r.id == id).map(|r| r.status);
        let next = apply(guard.as_slice())?;
        *guard = next;

        let updated = guard.iter().find(|r| r.id == id).cloned();
        match (&before, &updated) {
            (Some(from), Some(report)) => {
                tracing::info!("Report {} status {} -> {}", id, from, report.status)
            }
            _ => tracing::debug!("No report with id {}, collection unchanged", id),
        }
        Ok(updated)
    }

    pub fn visible(&self, role: ViewerRole) -> Result<Vec<Report>, StoreError> {
        Ok(policy::visible_reports(&self.snapshot()?, role))
    }

    pub fn apply_action(
        &self,
        role: ViewerRole,
        id: &str,
        action: AdminAction,
        mode: UpdateMode,
    ) -> Result<Option<Report>, StoreError> {
        self.replace_with(id, |reports| policy::apply_action(reports, role, id, action, mode))
    }
}

impl Default for InMemoryReports {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportStore for InMemoryReports {
    fn fetch_reports(&self) -> Result<Vec<Report>, StoreError> {
        self.snapshot()
    }

    fn update_status(
        &self,
        id: &str,
        status: ReportStatus,
        mode: UpdateMode,
    ) -> Result<Option<Report>, StoreError> {
        self.replace_with(id, |reports| policy::update_status(reports, id, status, mode))
    }
}
