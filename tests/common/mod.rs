#![allow(dead_code)]

use billing_api::{config::AppConfig, migrator::Migrator, AppState};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use std::sync::Arc;

/// Fresh in-memory SQLite database with the schema applied. A single pooled
/// connection keeps every query on the same in-memory instance.
pub async fn test_db() -> Arc<DatabaseConnection> {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1).sqlx_logging(false);
    let db = Database::connect(opt).await.expect("sqlite connect");
    Migrator::up(&db, None).await.expect("schema creation");
    Arc::new(db)
}

pub async fn test_state() -> AppState {
    AppState::new(test_db().await, AppConfig::default())
}
