use crate::domain::error::{AppError, Result};
use crate::domain::instance::{ActivityInstance, InstanceStatus};
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct NewInstance {
    pub activity_id: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: Option<DateTime<Utc>>,
    pub location_id: Option<String>,
    pub notes: Option<String>,
}

pub struct InstanceRepository {
    pool: SqlitePool,
}

impl InstanceRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list_upcoming(
        &self,
        user_id: &str,
        from: DateTime<Utc>,
    ) -> Result<Vec<ActivityInstance>> {
        let instances = sqlx::query_as::<_, InstanceEntity>(
            "SELECT id, user_id, activity_id, starts_at, ends_at, location_id, status, notes
             FROM activity_instances WHERE user_id = ? AND starts_at >= ?
             ORDER BY starts_at",
        )
        .bind(user_id)
        .bind(from)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to list instances: {}", e)))?;

        Ok(instances.into_iter().map(Into::into).collect())
    }

    pub async fn get(&self, user_id: &str, id: &str) -> Result<ActivityInstance> {
        let instance = sqlx::query_as::<_, InstanceEntity>(
            "SELECT id, user_id, activity_id, starts_at, ends_at, location_id, status, notes
             FROM activity_instances WHERE user_id = ? AND id = ?",
        )
        .bind(user_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to fetch instance: {}", e)))?;

        instance
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound(format!("Activity instance not found: {}", id)))
    }

    pub async fn create(&self, user_id: &str, new: NewInstance) -> Result<ActivityInstance> {
        let instance = ActivityInstance {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            activity_id: new.activity_id,
            starts_at: new.starts_at,
            ends_at: new.ends_at,
            location_id: new.location_id,
            status: InstanceStatus::Planned,
            notes: new.notes,
        };

        sqlx::query(
            "INSERT INTO activity_instances (id, user_id, activity_id, starts_at, ends_at, location_id, status, notes)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&instance.id)
        .bind(&instance.user_id)
        .bind(&instance.activity_id)
        .bind(instance.starts_at)
        .bind(instance.ends_at)
        .bind(&instance.location_id)
        .bind(instance.status.as_str())
        .bind(&instance.notes)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to create instance: {}", e)))?;

        Ok(instance)
    }

    pub async fn update(
        &self,
        user_id: &str,
        id: &str,
        starts_at: DateTime<Utc>,
        ends_at: Option<DateTime<Utc>>,
        location_id: Option<&str>,
        status: InstanceStatus,
        notes: Option<&str>,
    ) -> Result<ActivityInstance> {
        let result = sqlx::query(
            "UPDATE activity_instances
             SET starts_at = ?, ends_at = ?, location_id = ?, status = ?, notes = ?
             WHERE user_id = ? AND id = ?",
        )
        .bind(starts_at)
        .bind(ends_at)
        .bind(location_id)
        .bind(status.as_str())
        .bind(notes)
        .bind(user_id)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to update instance: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Activity instance not found: {}",
                id
            )));
        }
        self.get(user_id, id).await
    }

    pub async fn delete(&self, user_id: &str, id: &str) -> Result<()> {
        let result = sqlx::query("DELETE FROM activity_instances WHERE user_id = ? AND id = ?")
            .bind(user_id)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to delete instance: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Activity instance not found: {}",
                id
            )));
        }
        Ok(())
    }
}

#[derive(sqlx::FromRow)]
struct InstanceEntity {
    id: String,
    user_id: String,
    activity_id: String,
    starts_at: chrono::DateTime<chrono::Utc>,
    ends_at: Option<chrono::DateTime<chrono::Utc>>,
    location_id: Option<String>,
    status: String,
    notes: Option<String>,
}

impl From<InstanceEntity> for ActivityInstance {
    fn from(entity: InstanceEntity) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            activity_id: entity.activity_id,
            starts_at: entity.starts_at,
            ends_at: entity.ends_at,
            location_id: entity.location_id,
            status: InstanceStatus::parse(&entity.status),
            notes: entity.notes,
        }
    }
}
