//! SeaORM Entity for links table

use super::ApprovalStatus;
use crate::moderation::Moderatable;
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::Expr;
use sea_orm::ConnectionTrait;
use serde::Serialize;

/// A purchase, download or review link for a book
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "links")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub approval_status: ApprovalStatus,
    /// e.g. "ebook", "paperback", "download"
    #[sea_orm(column_type = "Text")]
    pub text: String,
    pub book_id: i32,
    pub source_id: i32,
    #[sea_orm(column_type = "String(Some(4500))")]
    pub url: String,
    pub clicks: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::books::Entity",
        from = "Column::BookId",
        to = "super::books::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Book,
    #[sea_orm(
        belongs_to = "super::link_sources::Entity",
        from = "Column::SourceId",
        to = "super::link_sources::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Source,
}

impl Related<super::books::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Book.def()
    }
}

impl Related<super::link_sources::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Source.def()
    }
}

impl ActiveModelBehavior for ActiveModel {
    fn before_save(mut self, insert: bool) -> Result<Self, DbErr> {
        super::guard_approval_status::<Entity>(&mut self.approval_status, insert)?;
        if insert && matches!(self.clicks, sea_orm::ActiveValue::NotSet) {
            self.clicks = sea_orm::ActiveValue::Set(0);
        }
        Ok(self)
    }
}

impl Moderatable for Entity {
    const KIND: &'static str = "link";

    fn id_column() -> Column {
        Column::Id
    }

    fn status_column() -> Column {
        Column::ApprovalStatus
    }
}

/// Count a click-through without a read-modify-write round trip
pub async fn record_click<C: ConnectionTrait>(db: &C, link_id: i32) -> Result<bool, DbErr> {
    let result = Entity::update_many()
        .col_expr(Column::Clicks, Expr::col(Column::Clicks).add(1))
        .filter(Column::Id.eq(link_id))
        .exec(db)
        .await?;

    Ok(result.rows_affected > 0)
}
