//! Test database setup
#![allow(dead_code)]

use bumble::app_config::DatabaseConfig;
use sea_orm::{DatabaseConnection, DbErr};
use std::env;

/// Connect to the test database.
/// Uses TEST_DATABASE_URL if set, otherwise a private in-memory SQLite database.
pub async fn get_test_db() -> Result<DatabaseConnection, DbErr> {
    let url = env::var("TEST_DATABASE_URL").unwrap_or_else(|_| "sqlite::memory:".to_string());
    // An in-memory SQLite database lives and dies with its single connection
    let max_connections = if url.starts_with("sqlite::memory:") { 1 } else { 5 };

    bumble::db::connect(&DatabaseConfig {
        url,
        max_connections,
    })
    .await
}

/// Setup test database - initialize logging, connect and create the catalog tables
pub async fn setup_test_database() -> Result<DatabaseConnection, DbErr> {
    bumble::init_logging();

    let db = get_test_db().await?;
    bumble::db::create_tables(&db).await?;

    Ok(db)
}
