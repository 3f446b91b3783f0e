use crate::application::use_cases::contact_import::FriendStore;
use crate::domain::error::{AppError, Result};
use crate::domain::friend::{Friend, FriendSource, NewFriend};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use uuid::Uuid;

pub struct FriendRepository {
    pool: SqlitePool,
}

impl FriendRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, user_id: &str) -> Result<Vec<Friend>> {
        let friends = sqlx::query_as::<_, FriendEntity>(
            "SELECT id, user_id, name, email, friend_group, notes, source, created_at
             FROM friends WHERE user_id = ? ORDER BY name COLLATE NOCASE",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to list friends: {}", e)))?;

        Ok(friends.into_iter().map(Into::into).collect())
    }

    pub async fn get(&self, user_id: &str, id: &str) -> Result<Friend> {
        let friend = sqlx::query_as::<_, FriendEntity>(
            "SELECT id, user_id, name, email, friend_group, notes, source, created_at
             FROM friends WHERE user_id = ? AND id = ?",
        )
        .bind(user_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to fetch friend: {}", e)))?;

        friend
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound(format!("Friend not found: {}", id)))
    }

    pub async fn create(&self, user_id: &str, new: NewFriend) -> Result<Friend> {
        let friend = Friend {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            name: new.name,
            email: new.email,
            group: new.group,
            notes: new.notes,
            source: new.source,
            created_at: Utc::now(),
        };

        sqlx::query(
            "INSERT INTO friends (id, user_id, name, email, friend_group, notes, source, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&friend.id)
        .bind(&friend.user_id)
        .bind(&friend.name)
        .bind(&friend.email)
        .bind(&friend.group)
        .bind(&friend.notes)
        .bind(friend.source.as_str())
        .bind(friend.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to create friend: {}", e)))?;

        Ok(friend)
    }

    pub async fn update(
        &self,
        user_id: &str,
        id: &str,
        name: &str,
        email: Option<&str>,
        group: Option<&str>,
        notes: Option<&str>,
    ) -> Result<Friend> {
        let result = sqlx::query(
            "UPDATE friends SET name = ?, email = ?, friend_group = ?, notes = ?
             WHERE user_id = ? AND id = ?",
        )
        .bind(name)
        .bind(email)
        .bind(group)
        .bind(notes)
        .bind(user_id)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to update friend: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Friend not found: {}", id)));
        }
        self.get(user_id, id).await
    }

    pub async fn delete(&self, user_id: &str, id: &str) -> Result<()> {
        let result = sqlx::query("DELETE FROM friends WHERE user_id = ? AND id = ?")
            .bind(user_id)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to delete friend: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Friend not found: {}", id)));
        }
        Ok(())
    }
}

#[async_trait]
impl FriendStore for FriendRepository {
    async fn list_names(&self, user_id: &str) -> Result<Vec<String>> {
        sqlx::query_scalar::<_, String>("SELECT name FROM friends WHERE user_id = ?")
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to list friend names: {}", e)))
    }

    async fn bulk_insert(&self, user_id: &str, friends: &[NewFriend]) -> Result<u64> {
        if friends.is_empty() {
            return Ok(0);
        }

        let created_at = Utc::now();
        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(
            "INSERT INTO friends (id, user_id, name, email, friend_group, notes, source, created_at) ",
        );

        // Single multi-row statement; sqlite applies it atomically.
        builder.push_values(friends, |mut row, friend| {
            row.push_bind(Uuid::new_v4().to_string())
                .push_bind(user_id)
                .push_bind(&friend.name)
                .push_bind(&friend.email)
                .push_bind(&friend.group)
                .push_bind(&friend.notes)
                .push_bind(friend.source.as_str())
                .push_bind(created_at);
        });

        let result = builder
            .build()
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to bulk insert friends: {}", e)))?;

        Ok(result.rows_affected())
    }
}

#[derive(sqlx::FromRow)]
struct FriendEntity {
    id: String,
    user_id: String,
    name: String,
    email: Option<String>,
    friend_group: Option<String>,
    notes: Option<String>,
    source: String,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl From<FriendEntity> for Friend {
    fn from(entity: FriendEntity) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            name: entity.name,
            email: entity.email,
            group: entity.friend_group,
            notes: entity.notes,
            source: FriendSource::parse(&entity.source),
            created_at: entity.created_at,
        }
    }
}
