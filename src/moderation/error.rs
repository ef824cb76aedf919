use super::EntityRef;
use crate::orm::ApprovalStatus;
use sea_orm::DbErr;

/// Why a requested status change was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionRejection {
    /// Not a member of `ApprovalStatus`
    UnknownStatus(String),
    /// Requested status equals the current one
    Unchanged(ApprovalStatus),
    /// Account lifecycle status requested for a content entity
    NotApplicable {
        kind: String,
        status: ApprovalStatus,
    },
    /// Request failed field validation
    Malformed(String),
}

impl std::fmt::Display for TransitionRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransitionRejection::UnknownStatus(s) => write!(f, "unknown approval status {:?}", s),
            TransitionRejection::Unchanged(s) => write!(f, "status is already {}", s),
            TransitionRejection::NotApplicable { kind, status } => {
                write!(f, "status {} does not apply to {} entities", status, kind)
            }
            TransitionRejection::Malformed(msg) => write!(f, "malformed request: {}", msg),
        }
    }
}

/// Moderation ledger errors.
#[derive(Debug)]
pub enum ModerationError {
    /// Entity kind is not registered, or no live row has that id
    EntityNotFound(EntityRef),
    /// Malformed or no-op status change
    InvalidTransition(TransitionRejection),
    /// Another writer kept changing the status between our read and write
    Contended(EntityRef),
    /// Persistence failure; the transaction was rolled back
    Database(DbErr),
}

impl std::fmt::Display for ModerationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModerationError::EntityNotFound(entity) => write!(f, "Entity not found: {}", entity),
            ModerationError::InvalidTransition(reason) => {
                write!(f, "Invalid transition: {}", reason)
            }
            ModerationError::Contended(entity) => {
                write!(f, "Gave up on contended status change for {}", entity)
            }
            ModerationError::Database(e) => write!(f, "Database error: {}", e),
        }
    }
}

impl std::error::Error for ModerationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ModerationError::Database(e) => Some(e),
            _ => None,
        }
    }
}

impl From<DbErr> for ModerationError {
    fn from(e: DbErr) -> Self {
        ModerationError::Database(e)
    }
}

impl From<TransitionRejection> for ModerationError {
    fn from(reason: TransitionRejection) -> Self {
        ModerationError::InvalidTransition(reason)
    }
}

impl ModerationError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ModerationError::EntityNotFound(_))
    }

    pub fn is_invalid_transition(&self) -> bool {
        matches!(self, ModerationError::InvalidTransition(_))
    }
}
