use crate::model::{ReportStatus, ViewerRole};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PolicyError {
    #[error("Report not found: {0}")]
    NotFound(String),

    #[error("Invalid transition for report {id}: {from} -> {to}")]
    InvalidTransition {
        id: String,
        from: ReportStatus,
        to: ReportStatus,
    },

    #[error("Role {0} may not change report status")]
    Forbidden(ViewerRole),

    #[error("Duplicate report id: {0}")]
    DuplicateId(String),
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Policy(#[from] PolicyError),

    #[error("Failed to access reports memory")]
    LockPoisoned,
}
