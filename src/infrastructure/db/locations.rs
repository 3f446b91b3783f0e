use crate::domain::error::{AppError, Result};
use crate::domain::location::Location;
use sqlx::SqlitePool;
use uuid::Uuid;

pub struct LocationRepository {
    pool: SqlitePool,
}

impl LocationRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, user_id: &str) -> Result<Vec<Location>> {
        let locations = sqlx::query_as::<_, LocationEntity>(
            "SELECT id, user_id, name, address
             FROM locations WHERE user_id = ? ORDER BY name COLLATE NOCASE",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to list locations: {}", e)))?;

        Ok(locations.into_iter().map(Into::into).collect())
    }

    pub async fn get(&self, user_id: &str, id: &str) -> Result<Location> {
        let location = sqlx::query_as::<_, LocationEntity>(
            "SELECT id, user_id, name, address FROM locations WHERE user_id = ? AND id = ?",
        )
        .bind(user_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to fetch location: {}", e)))?;

        location
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound(format!("Location not found: {}", id)))
    }

    pub async fn create(&self, user_id: &str, name: &str, address: Option<&str>) -> Result<Location> {
        let location = Location {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            name: name.to_string(),
            address: address.map(str::to_string),
        };

        sqlx::query("INSERT INTO locations (id, user_id, name, address) VALUES (?, ?, ?, ?)")
            .bind(&location.id)
            .bind(&location.user_id)
            .bind(&location.name)
            .bind(&location.address)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to create location: {}", e)))?;

        Ok(location)
    }

    pub async fn delete(&self, user_id: &str, id: &str) -> Result<()> {
        let result = sqlx::query("DELETE FROM locations WHERE user_id = ? AND id = ?")
            .bind(user_id)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to delete location: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Location not found: {}", id)));
        }
        Ok(())
    }
}

#[derive(sqlx::FromRow)]
struct LocationEntity {
    id: String,
    user_id: String,
    name: String,
    address: Option<String>,
}

impl From<LocationEntity> for Location {
    fn from(entity: LocationEntity) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            name: entity.name,
            address: entity.address,
        }
    }
}
