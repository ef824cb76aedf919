//! SeaORM Entity for authors table

use super::ApprovalStatus;
use crate::moderation::Moderatable;
use sea_orm::entity::prelude::*;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "authors")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub approval_status: ApprovalStatus,
    #[sea_orm(column_type = "String(Some(1000))")]
    pub name: String,
    #[sea_orm(column_type = "String(Some(500))")]
    pub slug: String,
    #[sea_orm(column_type = "Text")]
    pub bio: String,
    #[sea_orm(column_type = "String(Some(4500))", nullable)]
    pub webpage: Option<String>,
    /// Account of the author, when they have claimed this record
    pub user_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    User,
    #[sea_orm(has_many = "super::books::Entity")]
    Books,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::books::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Books.def()
    }
}

impl ActiveModelBehavior for ActiveModel {
    fn before_save(mut self, insert: bool) -> Result<Self, DbErr> {
        super::guard_approval_status::<Entity>(&mut self.approval_status, insert)?;
        Ok(self)
    }
}

impl Moderatable for Entity {
    const KIND: &'static str = "author";

    fn id_column() -> Column {
        Column::Id
    }

    fn status_column() -> Column {
        Column::ApprovalStatus
    }
}
