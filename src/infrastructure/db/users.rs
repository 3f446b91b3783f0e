use crate::domain::error::{AppError, Result};
use crate::domain::user::User;
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_by_token_hash(&self, token_hash: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, UserEntity>(
            "SELECT id, email, display_name, token_hash, created_at
             FROM users WHERE token_hash = ?",
        )
        .bind(token_hash)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to look up user: {}", e)))?;

        Ok(user.map(Into::into))
    }

    /// Inserts the user unless one already owns this token hash. Used at
    /// startup to make a fresh deployment reachable.
    pub async fn ensure_user(
        &self,
        email: &str,
        display_name: &str,
        token_hash: &str,
    ) -> Result<User> {
        if let Some(existing) = self.find_by_token_hash(token_hash).await? {
            return Ok(existing);
        }

        let user = User {
            id: Uuid::new_v4().to_string(),
            email: email.to_string(),
            display_name: display_name.to_string(),
            token_hash: token_hash.to_string(),
            created_at: Utc::now(),
        };

        sqlx::query(
            "INSERT INTO users (id, email, display_name, token_hash, created_at)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&user.id)
        .bind(&user.email)
        .bind(&user.display_name)
        .bind(&user.token_hash)
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to create user: {}", e)))?;

        Ok(user)
    }
}

#[derive(sqlx::FromRow)]
struct UserEntity {
    id: String,
    email: String,
    display_name: String,
    token_hash: String,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl From<UserEntity> for User {
    fn from(entity: UserEntity) -> Self {
        Self {
            id: entity.id,
            email: entity.email,
            display_name: entity.display_name,
            token_hash: entity.token_hash,
            created_at: entity.created_at,
        }
    }
}
