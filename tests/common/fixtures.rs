//! Test fixtures for creating catalog entities
#![allow(dead_code)]

use bumble::app_config::ModerationConfig;
use bumble::moderation::{EntityRegistry, ModerationLedger};
use bumble::orm::link_sources::LinkType;
use bumble::orm::{authors, books, genres, link_sources, links, users};
use sea_orm::{entity::*, ActiveValue::Set, DatabaseConnection, DbErr};

/// Ledger over the catalog with default settings
pub fn test_ledger() -> ModerationLedger {
    ModerationLedger::new(EntityRegistry::catalog(), ModerationConfig::default())
}

pub async fn create_test_user(
    db: &DatabaseConnection,
    display_name: &str,
) -> Result<users::Model, DbErr> {
    users::ActiveModel {
        email: Set(format!("{}@test.com", display_name.to_lowercase())),
        password: Set("not-a-real-hash".to_string()),
        display_name: Set(display_name.to_string()),
        pronouns: Set(Some("they/them".to_string())),
        bio: Set(None),
        ..Default::default()
    }
    .insert(db)
    .await
}

pub async fn create_test_author(
    db: &DatabaseConnection,
    name: &str,
) -> Result<authors::Model, DbErr> {
    authors::ActiveModel {
        name: Set(name.to_string()),
        slug: Set(name.to_lowercase().replace(' ', "-")),
        bio: Set(String::new()),
        webpage: Set(None),
        user_id: Set(None),
        ..Default::default()
    }
    .insert(db)
    .await
}

pub async fn create_test_book(
    db: &DatabaseConnection,
    author_id: i32,
    title: &str,
) -> Result<books::Model, DbErr> {
    books::ActiveModel {
        isbn: Set(None),
        title: Set(title.to_string()),
        slug: Set(title.to_lowercase().replace(' ', "-")),
        author_id: Set(author_id),
        blurb: Set(format!("A book called {}", title)),
        reviews: Set(String::new()),
        ..Default::default()
    }
    .insert(db)
    .await
}

/// Author plus one book, the most common setup
pub async fn create_author_with_book(
    db: &DatabaseConnection,
    title: &str,
) -> Result<books::Model, DbErr> {
    let author = create_test_author(db, "Test Author").await?;
    create_test_book(db, author.id, title).await
}

pub async fn create_test_genre(
    db: &DatabaseConnection,
    name: &str,
    parent_id: Option<i32>,
) -> Result<genres::Model, DbErr> {
    genres::ActiveModel {
        name: Set(name.to_string()),
        slug: Set(name.to_lowercase()),
        description: Set(String::new()),
        parent_id: Set(parent_id),
        ..Default::default()
    }
    .insert(db)
    .await
}

pub async fn create_test_link_source(
    db: &DatabaseConnection,
    name: &str,
    link_type: LinkType,
) -> Result<link_sources::Model, DbErr> {
    link_sources::ActiveModel {
        name: Set(name.to_string()),
        slug: Set(name.to_lowercase()),
        homepage: Set(None),
        link_type: Set(link_type),
        ..Default::default()
    }
    .insert(db)
    .await
}

pub async fn create_test_link(
    db: &DatabaseConnection,
    book_id: i32,
    source_id: i32,
) -> Result<links::Model, DbErr> {
    links::ActiveModel {
        text: Set("ebook".to_string()),
        book_id: Set(book_id),
        source_id: Set(source_id),
        url: Set(format!("https://example.com/books/{}", book_id)),
        ..Default::default()
    }
    .insert(db)
    .await
}
