use crate::domain::error::{AppError, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool};
use std::str::FromStr;

/// Connects to the application database, creating the file and schema on
/// first run.
pub async fn init_db(database_url: &str) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| AppError::DatabaseError(format!("Failed to parse connection string: {}", e)))?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePool::connect_with(options)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to connect: {}", e)))?;

    create_schema(&pool).await?;
    Ok(pool)
}

async fn create_schema(pool: &SqlitePool) -> Result<()> {
    let statements = [
        "CREATE TABLE IF NOT EXISTS users (
            id TEXT PRIMARY KEY,
            email TEXT NOT NULL UNIQUE,
            display_name TEXT NOT NULL,
            token_hash TEXT NOT NULL UNIQUE,
            created_at DATETIME NOT NULL
        )",
        "CREATE TABLE IF NOT EXISTS friends (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            name TEXT NOT NULL,
            email TEXT,
            friend_group TEXT,
            notes TEXT,
            source TEXT NOT NULL DEFAULT 'manual',
            created_at DATETIME NOT NULL
        )",
        "CREATE TABLE IF NOT EXISTS core_values (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            name TEXT NOT NULL,
            description TEXT,
            position INTEGER NOT NULL DEFAULT 0
        )",
        "CREATE TABLE IF NOT EXISTS activities (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            title TEXT NOT NULL,
            description TEXT,
            core_value_id TEXT REFERENCES core_values(id) ON DELETE SET NULL,
            duration_minutes INTEGER,
            created_at DATETIME NOT NULL
        )",
        "CREATE TABLE IF NOT EXISTS locations (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            name TEXT NOT NULL,
            address TEXT
        )",
        "CREATE TABLE IF NOT EXISTS activity_instances (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            activity_id TEXT NOT NULL REFERENCES activities(id) ON DELETE CASCADE,
            starts_at DATETIME NOT NULL,
            ends_at DATETIME,
            location_id TEXT REFERENCES locations(id) ON DELETE SET NULL,
            status TEXT NOT NULL DEFAULT 'planned',
            notes TEXT
        )",
        "CREATE TABLE IF NOT EXISTS participations (
            id TEXT PRIMARY KEY,
            instance_id TEXT NOT NULL REFERENCES activity_instances(id) ON DELETE CASCADE,
            friend_id TEXT NOT NULL REFERENCES friends(id) ON DELETE CASCADE,
            status TEXT NOT NULL DEFAULT 'invited',
            invited_at DATETIME NOT NULL,
            UNIQUE(instance_id, friend_id)
        )",
        "CREATE TABLE IF NOT EXISTS public_rsvps (
            id TEXT PRIMARY KEY,
            instance_id TEXT NOT NULL REFERENCES activity_instances(id) ON DELETE CASCADE,
            guest_name TEXT NOT NULL,
            attending INTEGER NOT NULL,
            created_at DATETIME NOT NULL
        )",
        "CREATE INDEX IF NOT EXISTS idx_friends_user ON friends(user_id)",
        "CREATE INDEX IF NOT EXISTS idx_instances_user_start
            ON activity_instances(user_id, starts_at)",
    ];

    for statement in statements {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to create schema: {}", e)))?;
    }

    Ok(())
}
