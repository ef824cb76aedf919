//! Join table marking books as exemplars of a genre

use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, QueryTrait};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "genre_exemplars")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub genre_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub book_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::genres::Entity",
        from = "Column::GenreId",
        to = "super::genres::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Genre,
    #[sea_orm(
        belongs_to = "super::books::Entity",
        from = "Column::BookId",
        to = "super::books::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Book,
}

impl ActiveModelBehavior for ActiveModel {}

/// Mark a book as an exemplar of a genre
pub async fn add_exemplar<C: ConnectionTrait>(
    db: &C,
    genre_id: i32,
    book_id: i32,
) -> Result<(), DbErr> {
    let insert = Entity::insert(ActiveModel {
        genre_id: sea_orm::ActiveValue::Set(genre_id),
        book_id: sea_orm::ActiveValue::Set(book_id),
    })
    .into_query();
    let backend = db.get_database_backend();
    db.execute(backend.build(&insert)).await?;
    Ok(())
}
