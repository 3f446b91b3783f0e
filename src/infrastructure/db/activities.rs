use crate::domain::activity::Activity;
use crate::domain::error::{AppError, Result};
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

pub struct ActivityRepository {
    pool: SqlitePool,
}

impl ActivityRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, user_id: &str, core_value_id: Option<&str>) -> Result<Vec<Activity>> {
        let activities = match core_value_id {
            Some(value_id) => {
                sqlx::query_as::<_, ActivityEntity>(
                    "SELECT id, user_id, title, description, core_value_id, duration_minutes, created_at
                     FROM activities WHERE user_id = ? AND core_value_id = ?
                     ORDER BY title COLLATE NOCASE",
                )
                .bind(user_id)
                .bind(value_id)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as::<_, ActivityEntity>(
                    "SELECT id, user_id, title, description, core_value_id, duration_minutes, created_at
                     FROM activities WHERE user_id = ? ORDER BY title COLLATE NOCASE",
                )
                .bind(user_id)
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(|e| AppError::DatabaseError(format!("Failed to list activities: {}", e)))?;

        Ok(activities.into_iter().map(Into::into).collect())
    }

    pub async fn get(&self, user_id: &str, id: &str) -> Result<Activity> {
        let activity = sqlx::query_as::<_, ActivityEntity>(
            "SELECT id, user_id, title, description, core_value_id, duration_minutes, created_at
             FROM activities WHERE user_id = ? AND id = ?",
        )
        .bind(user_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to fetch activity: {}", e)))?;

        activity
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound(format!("Activity not found: {}", id)))
    }

    pub async fn create(
        &self,
        user_id: &str,
        title: &str,
        description: Option<&str>,
        core_value_id: Option<&str>,
        duration_minutes: Option<i64>,
    ) -> Result<Activity> {
        let activity = Activity {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            title: title.to_string(),
            description: description.map(str::to_string),
            core_value_id: core_value_id.map(str::to_string),
            duration_minutes,
            created_at: Utc::now(),
        };

        sqlx::query(
            "INSERT INTO activities (id, user_id, title, description, core_value_id, duration_minutes, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&activity.id)
        .bind(&activity.user_id)
        .bind(&activity.title)
        .bind(&activity.description)
        .bind(&activity.core_value_id)
        .bind(activity.duration_minutes)
        .bind(activity.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to create activity: {}", e)))?;

        Ok(activity)
    }

    pub async fn update(
        &self,
        user_id: &str,
        id: &str,
        title: &str,
        description: Option<&str>,
        core_value_id: Option<&str>,
        duration_minutes: Option<i64>,
    ) -> Result<Activity> {
        let result = sqlx::query(
            "UPDATE activities SET title = ?, description = ?, core_value_id = ?, duration_minutes = ?
             WHERE user_id = ? AND id = ?",
        )
        .bind(title)
        .bind(description)
        .bind(core_value_id)
        .bind(duration_minutes)
        .bind(user_id)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to update activity: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Activity not found: {}", id)));
        }
        self.get(user_id, id).await
    }

    pub async fn delete(&self, user_id: &str, id: &str) -> Result<()> {
        let result = sqlx::query("DELETE FROM activities WHERE user_id = ? AND id = ?")
            .bind(user_id)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to delete activity: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Activity not found: {}", id)));
        }
        Ok(())
    }
}

#[derive(sqlx::FromRow)]
struct ActivityEntity {
    id: String,
    user_id: String,
    title: String,
    description: Option<String>,
    core_value_id: Option<String>,
    duration_minutes: Option<i64>,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl From<ActivityEntity> for Activity {
    fn from(entity: ActivityEntity) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            title: entity.title,
            description: entity.description,
            core_value_id: entity.core_value_id,
            duration_minutes: entity.duration_minutes,
            created_at: entity.created_at,
        }
    }
}
