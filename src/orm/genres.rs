//! SeaORM Entity for genres table

use super::ApprovalStatus;
use crate::moderation::Moderatable;
use sea_orm::entity::prelude::*;
use sea_orm::QueryOrder;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "genres")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub approval_status: ApprovalStatus,
    #[sea_orm(column_type = "String(Some(50))")]
    pub name: String,
    #[sea_orm(column_type = "String(Some(50))")]
    pub slug: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    /// Broader genre, `None` at the top level
    pub parent_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "Entity",
        from = "Column::ParentId",
        to = "Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Parent,
}

/// Exemplar books
impl Related<super::books::Entity> for Entity {
    fn to() -> RelationDef {
        super::genre_exemplars::Relation::Book.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::genre_exemplars::Relation::Genre.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {
    fn before_save(mut self, insert: bool) -> Result<Self, DbErr> {
        super::guard_approval_status::<Entity>(&mut self.approval_status, insert)?;
        Ok(self)
    }
}

impl Moderatable for Entity {
    const KIND: &'static str = "genre";

    fn id_column() -> Column {
        Column::Id
    }

    fn status_column() -> Column {
        Column::ApprovalStatus
    }
}

/// Child genres of a genre
pub fn children(parent_id: i32) -> Select<Entity> {
    Entity::find()
        .filter(Column::ParentId.eq(parent_id))
        .order_by_asc(Column::Name)
}
