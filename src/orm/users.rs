//! User accounts. The only entity kind that takes account lifecycle statuses.

use super::ApprovalStatus;
use crate::moderation::Moderatable;
use sea_orm::entity::prelude::*;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub approval_status: ApprovalStatus,
    #[sea_orm(column_type = "String(Some(500))")]
    pub email: String,
    /// Password hash
    #[serde(skip_serializing)]
    #[sea_orm(column_type = "String(Some(1000))")]
    pub password: String,
    #[sea_orm(column_type = "String(Some(500))")]
    pub display_name: String,
    /// pronoun.is path, e.g. "she/her"
    #[sea_orm(column_type = "String(Some(100))", nullable)]
    pub pronouns: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub bio: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::approval_changes::Entity")]
    ApprovalChanges,
    #[sea_orm(has_many = "super::authors::Entity")]
    Authors,
}

impl Related<super::approval_changes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ApprovalChanges.def()
    }
}

impl Related<super::authors::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Authors.def()
    }
}

impl ActiveModelBehavior for ActiveModel {
    fn before_save(mut self, insert: bool) -> Result<Self, DbErr> {
        super::guard_approval_status::<Entity>(&mut self.approval_status, insert)?;
        Ok(self)
    }
}

impl Moderatable for Entity {
    const KIND: &'static str = "user";
    const ACCOUNT_LIFECYCLE: bool = true;

    fn id_column() -> Column {
        Column::Id
    }

    fn status_column() -> Column {
        Column::ApprovalStatus
    }
}
