//! SeaORM Entity for books table

use super::ApprovalStatus;
use crate::moderation::Moderatable;
use sea_orm::entity::prelude::*;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "books")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub approval_status: ApprovalStatus,
    #[sea_orm(column_type = "String(Some(13))", nullable, unique)]
    pub isbn: Option<String>,
    #[sea_orm(column_type = "String(Some(5000))")]
    pub title: String,
    #[sea_orm(column_type = "String(Some(500))")]
    pub slug: String,
    pub author_id: i32,
    #[sea_orm(column_type = "Text")]
    pub blurb: String,
    #[sea_orm(column_type = "Text")]
    pub reviews: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::authors::Entity",
        from = "Column::AuthorId",
        to = "super::authors::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Author,
    #[sea_orm(has_many = "super::links::Entity")]
    Links,
}

impl Related<super::authors::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl Related<super::links::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Links.def()
    }
}

/// Genres this book is an exemplar of
impl Related<super::genres::Entity> for Entity {
    fn to() -> RelationDef {
        super::genre_exemplars::Relation::Genre.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::genre_exemplars::Relation::Book.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {
    fn before_save(mut self, insert: bool) -> Result<Self, DbErr> {
        super::guard_approval_status::<Entity>(&mut self.approval_status, insert)?;
        Ok(self)
    }
}

impl Moderatable for Entity {
    const KIND: &'static str = "book";

    fn id_column() -> Column {
        Column::Id
    }

    fn status_column() -> Column {
        Column::ApprovalStatus
    }
}
