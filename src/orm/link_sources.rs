//! SeaORM Entity for link_sources table

use super::ApprovalStatus;
use crate::moderation::Moderatable;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Kind of site a link source is
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(Some(1))")]
#[serde(rename_all = "snake_case")]
pub enum LinkType {
    /// Direct-from-creator store
    #[sea_orm(string_value = "d")]
    Direct,
    #[sea_orm(string_value = "i")]
    Indie,
    #[sea_orm(string_value = "s")]
    Store,
    #[sea_orm(string_value = "h")]
    Homepage,
    #[sea_orm(string_value = "r")]
    Review,
    #[sea_orm(string_value = "p")]
    Publisher,
    #[sea_orm(string_value = "o")]
    #[default]
    Other,
}

impl LinkType {
    pub fn label(&self) -> &'static str {
        match self {
            LinkType::Direct => "Direct-from-creator store",
            LinkType::Indie => "Indie store",
            LinkType::Store => "Store",
            LinkType::Homepage => "Homepage",
            LinkType::Review => "Review",
            LinkType::Publisher => "Publisher",
            LinkType::Other => "Other",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "link_sources")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub approval_status: ApprovalStatus,
    #[sea_orm(column_type = "String(Some(100))")]
    pub name: String,
    #[sea_orm(column_type = "String(Some(100))")]
    pub slug: String,
    #[sea_orm(column_type = "String(Some(4500))", nullable)]
    pub homepage: Option<String>,
    pub link_type: LinkType,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::links::Entity")]
    Links,
}

impl Related<super::links::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Links.def()
    }
}

impl ActiveModelBehavior for ActiveModel {
    fn before_save(mut self, insert: bool) -> Result<Self, DbErr> {
        super::guard_approval_status::<Entity>(&mut self.approval_status, insert)?;
        Ok(self)
    }
}

impl Moderatable for Entity {
    const KIND: &'static str = "link_source";

    fn id_column() -> Column {
        Column::Id
    }

    fn status_column() -> Column {
        Column::ApprovalStatus
    }
}
