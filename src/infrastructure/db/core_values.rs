use crate::domain::core_value::CoreValue;
use crate::domain::error::{AppError, Result};
use sqlx::SqlitePool;
use uuid::Uuid;

pub struct CoreValueRepository {
    pool: SqlitePool,
}

impl CoreValueRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, user_id: &str) -> Result<Vec<CoreValue>> {
        let values = sqlx::query_as::<_, CoreValueEntity>(
            "SELECT id, user_id, name, description, position
             FROM core_values WHERE user_id = ? ORDER BY position, name",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to list core values: {}", e)))?;

        Ok(values.into_iter().map(Into::into).collect())
    }

    pub async fn get(&self, user_id: &str, id: &str) -> Result<CoreValue> {
        let value = sqlx::query_as::<_, CoreValueEntity>(
            "SELECT id, user_id, name, description, position
             FROM core_values WHERE user_id = ? AND id = ?",
        )
        .bind(user_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to fetch core value: {}", e)))?;

        value
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound(format!("Core value not found: {}", id)))
    }

    pub async fn create(
        &self,
        user_id: &str,
        name: &str,
        description: Option<&str>,
        position: i64,
    ) -> Result<CoreValue> {
        let value = CoreValue {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            name: name.to_string(),
            description: description.map(str::to_string),
            position,
        };

        sqlx::query(
            "INSERT INTO core_values (id, user_id, name, description, position)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&value.id)
        .bind(&value.user_id)
        .bind(&value.name)
        .bind(&value.description)
        .bind(value.position)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to create core value: {}", e)))?;

        Ok(value)
    }

    pub async fn update(
        &self,
        user_id: &str,
        id: &str,
        name: &str,
        description: Option<&str>,
        position: i64,
    ) -> Result<CoreValue> {
        let result = sqlx::query(
            "UPDATE core_values SET name = ?, description = ?, position = ?
             WHERE user_id = ? AND id = ?",
        )
        .bind(name)
        .bind(description)
        .bind(position)
        .bind(user_id)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to update core value: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Core value not found: {}", id)));
        }
        self.get(user_id, id).await
    }

    pub async fn delete(&self, user_id: &str, id: &str) -> Result<()> {
        let result = sqlx::query("DELETE FROM core_values WHERE user_id = ? AND id = ?")
            .bind(user_id)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to delete core value: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Core value not found: {}", id)));
        }
        Ok(())
    }
}

#[derive(sqlx::FromRow)]
struct CoreValueEntity {
    id: String,
    user_id: String,
    name: String,
    description: Option<String>,
    position: i64,
}

impl From<CoreValueEntity> for CoreValue {
    fn from(entity: CoreValueEntity) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            name: entity.name,
            description: entity.description,
            position: entity.position,
        }
    }
}
