//! Database connection and table bootstrap.
//!
//! Connections are handed to callers explicitly; nothing here keeps a global
//! pool. [`create_tables`] builds the catalog schema straight from the entity
//! definitions, which is enough for tests and a first run against an empty
//! database.

use crate::app_config::DatabaseConfig;
use crate::orm::{
    approval_changes, authors, books, genre_exemplars, genres, link_sources, links, users,
};
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, EntityName, EntityTrait,
    Schema,
};

/// Open a connection pool from configuration.
pub async fn connect(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(config.url.clone());
    options.max_connections(config.max_connections);

    let db = Database::connect(options).await?;
    log::info!(
        "Connected to {:?} database (max {} connections)",
        db.get_database_backend(),
        config.max_connections
    );
    Ok(db)
}

/// Open a connection using the global application configuration.
pub async fn connect_from_app_config() -> Result<DatabaseConnection, DbErr> {
    connect(&crate::app_config::database()).await
}

async fn create_table<E: EntityTrait>(db: &DatabaseConnection, entity: E) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let name = entity.table_name().to_owned();
    let stmt = Schema::new(backend).create_table_from_entity(entity);
    db.execute(backend.build(&stmt)).await?;
    log::debug!("Created table {}", name);
    Ok(())
}

/// Create every catalog table, parents before children.
pub async fn create_tables(db: &DatabaseConnection) -> Result<(), DbErr> {
    create_table(db, users::Entity).await?;
    create_table(db, authors::Entity).await?;
    create_table(db, books::Entity).await?;
    create_table(db, genres::Entity).await?;
    create_table(db, genre_exemplars::Entity).await?;
    create_table(db, link_sources::Entity).await?;
    create_table(db, links::Entity).await?;
    create_table(db, approval_changes::Entity).await?;
    Ok(())
}
