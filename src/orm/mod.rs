//! SeaORM entities for the book catalog.

pub mod approval_changes;
pub mod authors;
pub mod books;
pub mod genre_exemplars;
pub mod genres;
pub mod link_sources;
pub mod links;
pub mod users;

pub use approval_changes::ApprovalStatus;

use crate::moderation::Moderatable;
use sea_orm::{ActiveValue, DbErr};

/// Shared `before_save` rule for moderated entities.
///
/// Inserts without a status start as `new`, and an explicit initial status
/// must be one the entity kind accepts. Updates may not touch the status;
/// that goes through the moderation ledger so the history stays complete.
pub(crate) fn guard_approval_status<E: Moderatable>(
    status: &mut ActiveValue<ApprovalStatus>,
    insert: bool,
) -> Result<(), DbErr> {
    if insert {
        match status {
            ActiveValue::Set(initial) | ActiveValue::Unchanged(initial)
                if initial.is_account_status() && !E::ACCOUNT_LIFECYCLE =>
            {
                Err(DbErr::Custom(format!(
                    "{} does not apply to {} entities",
                    initial,
                    E::KIND
                )))
            }
            ActiveValue::NotSet => {
                *status = ActiveValue::Set(ApprovalStatus::New);
                Ok(())
            }
            _ => Ok(()),
        }
    } else if matches!(status, ActiveValue::Set(_)) {
        Err(DbErr::Custom(
            "approval_status must be changed through the moderation ledger".to_owned(),
        ))
    } else {
        Ok(())
    }
}
