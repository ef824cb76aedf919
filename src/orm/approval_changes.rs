//! SeaORM Entity for the approval_changes ledger table

use crate::moderation::{EntityRef, TransitionRejection};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Moderation trust level of an entity.
///
/// `New` through `Verified` are ordered by increasing trust. The remaining
/// variants describe account lifecycle and only apply to users.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(Some(16))")]
#[serde(rename_all = "snake_case")]
pub enum ApprovalStatus {
    #[sea_orm(string_value = "new")]
    #[default]
    New,
    #[sea_orm(string_value = "questionable")]
    Questionable,
    #[sea_orm(string_value = "accurate")]
    Accurate,
    #[sea_orm(string_value = "verified")]
    Verified,
    #[sea_orm(string_value = "deactivated")]
    Deactivated,
    #[sea_orm(string_value = "activated")]
    Activated,
    #[sea_orm(string_value = "staff")]
    Staff,
}

impl ApprovalStatus {
    /// Trust statuses in increasing order.
    pub const TRUST_LEVELS: [ApprovalStatus; 4] = [
        ApprovalStatus::New,
        ApprovalStatus::Questionable,
        ApprovalStatus::Accurate,
        ApprovalStatus::Verified,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ApprovalStatus::New => "new",
            ApprovalStatus::Questionable => "questionable",
            ApprovalStatus::Accurate => "accurate",
            ApprovalStatus::Verified => "verified",
            ApprovalStatus::Deactivated => "deactivated",
            ApprovalStatus::Activated => "activated",
            ApprovalStatus::Staff => "staff",
        }
    }

    /// Position on the trust scale, `None` for account lifecycle statuses.
    pub fn trust_level(&self) -> Option<u8> {
        match self {
            ApprovalStatus::New => Some(0),
            ApprovalStatus::Questionable => Some(1),
            ApprovalStatus::Accurate => Some(2),
            ApprovalStatus::Verified => Some(3),
            _ => None,
        }
    }

    pub fn is_account_status(&self) -> bool {
        self.trust_level().is_none()
    }
}

impl fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApprovalStatus {
    type Err = TransitionRejection;

    /// Accepts the full lowercase name or the one-letter trust code, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "new" | "n" => Ok(ApprovalStatus::New),
            "questionable" | "q" => Ok(ApprovalStatus::Questionable),
            "accurate" | "a" => Ok(ApprovalStatus::Accurate),
            "verified" | "v" => Ok(ApprovalStatus::Verified),
            "deactivated" => Ok(ApprovalStatus::Deactivated),
            "activated" => Ok(ApprovalStatus::Activated),
            "staff" => Ok(ApprovalStatus::Staff),
            _ => Err(TransitionRejection::UnknownStatus(s.to_owned())),
        }
    }
}

/// One recorded status transition. Rows are never updated or deleted.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "approval_changes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Status before the change. Always set by the ledger; nullable for
    /// imported history.
    pub change_from: Option<ApprovalStatus>,
    pub change_to: ApprovalStatus,
    pub changed_at: chrono::NaiveDateTime,
    #[sea_orm(column_type = "Text")]
    pub reasoning: String,
    pub changed_by: Option<i32>,
    #[sea_orm(column_type = "String(Some(50))")]
    pub entity_kind: String,
    pub entity_id: i32,
}

impl Model {
    pub fn entity_ref(&self) -> EntityRef {
        EntityRef::new(self.entity_kind.clone(), self.entity_id)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::ChangedBy",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    ChangedBy,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ChangedBy.def()
    }
}

impl ActiveModelBehavior for ActiveModel {
    fn before_save(self, insert: bool) -> Result<Self, DbErr> {
        if insert {
            Ok(self)
        } else {
            Err(DbErr::Custom(
                "approval changes are append-only and cannot be updated".to_owned(),
            ))
        }
    }
}
