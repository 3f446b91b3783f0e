use crate::domain::error::{AppError, Result};
use crate::domain::participation::{Participation, ParticipationStatus, PublicRsvp};
use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use uuid::Uuid;

pub struct ParticipationRepository {
    pool: SqlitePool,
}

impl ParticipationRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list_for_instance(&self, instance_id: &str) -> Result<Vec<Participation>> {
        let participations = sqlx::query_as::<_, ParticipationEntity>(
            "SELECT id, instance_id, friend_id, status, invited_at
             FROM participations WHERE instance_id = ? ORDER BY invited_at",
        )
        .bind(instance_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to list participations: {}", e)))?;

        Ok(participations.into_iter().map(Into::into).collect())
    }

    /// Replaces the invited set for an instance: clears the old set, then
    /// inserts one `invited` row per friend. Prior responses are dropped
    /// by design; re-inviting resets the slate.
    pub async fn replace_for_instance(
        &self,
        instance_id: &str,
        friend_ids: &[String],
    ) -> Result<Vec<Participation>> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to open transaction: {}", e)))?;

        sqlx::query("DELETE FROM participations WHERE instance_id = ?")
            .bind(instance_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to clear participations: {}", e)))?;

        if !friend_ids.is_empty() {
            let invited_at = Utc::now();
            let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(
                "INSERT INTO participations (id, instance_id, friend_id, status, invited_at) ",
            );
            builder.push_values(friend_ids, |mut row, friend_id| {
                row.push_bind(Uuid::new_v4().to_string())
                    .push_bind(instance_id)
                    .push_bind(friend_id)
                    .push_bind(ParticipationStatus::Invited.as_str())
                    .push_bind(invited_at);
            });
            builder
                .build()
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    AppError::DatabaseError(format!("Failed to insert participations: {}", e))
                })?;
        }

        tx.commit()
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to commit participations: {}", e)))?;

        self.list_for_instance(instance_id).await
    }

    pub async fn set_status(
        &self,
        instance_id: &str,
        friend_id: &str,
        status: ParticipationStatus,
    ) -> Result<()> {
        let result = sqlx::query(
            "UPDATE participations SET status = ? WHERE instance_id = ? AND friend_id = ?",
        )
        .bind(status.as_str())
        .bind(instance_id)
        .bind(friend_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to update participation: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Friend {} is not invited to instance {}",
                friend_id, instance_id
            )));
        }
        Ok(())
    }

    pub async fn count_confirmed(&self, instance_id: &str) -> Result<usize> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM participations WHERE instance_id = ? AND status = 'confirmed'",
        )
        .bind(instance_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to count confirmations: {}", e)))?;

        Ok(count as usize)
    }

    pub async fn add_public_rsvp(
        &self,
        instance_id: &str,
        guest_name: &str,
        attending: bool,
    ) -> Result<PublicRsvp> {
        let rsvp = PublicRsvp {
            id: Uuid::new_v4().to_string(),
            instance_id: instance_id.to_string(),
            guest_name: guest_name.to_string(),
            attending,
            created_at: Utc::now(),
        };

        sqlx::query(
            "INSERT INTO public_rsvps (id, instance_id, guest_name, attending, created_at)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&rsvp.id)
        .bind(&rsvp.instance_id)
        .bind(&rsvp.guest_name)
        .bind(if rsvp.attending { 1 } else { 0 })
        .bind(rsvp.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to record RSVP: {}", e)))?;

        Ok(rsvp)
    }

    pub async fn list_public_rsvps(&self, instance_id: &str) -> Result<Vec<PublicRsvp>> {
        let rsvps = sqlx::query_as::<_, PublicRsvpEntity>(
            "SELECT id, instance_id, guest_name, attending, created_at
             FROM public_rsvps WHERE instance_id = ? ORDER BY created_at",
        )
        .bind(instance_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to list RSVPs: {}", e)))?;

        Ok(rsvps.into_iter().map(Into::into).collect())
    }
}

#[derive(sqlx::FromRow)]
struct ParticipationEntity {
    id: String,
    instance_id: String,
    friend_id: String,
    status: String,
    invited_at: chrono::DateTime<chrono::Utc>,
}

impl From<ParticipationEntity> for Participation {
    fn from(entity: ParticipationEntity) -> Self {
        Self {
            id: entity.id,
            instance_id: entity.instance_id,
            friend_id: entity.friend_id,
            status: ParticipationStatus::parse(&entity.status),
            invited_at: entity.invited_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct PublicRsvpEntity {
    id: String,
    instance_id: String,
    guest_name: String,
    attending: i64,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl From<PublicRsvpEntity> for PublicRsvp {
    fn from(entity: PublicRsvpEntity) -> Self {
        Self {
            id: entity.id,
            instance_id: entity.instance_id,
            guest_name: entity.guest_name,
            attending: entity.attending != 0,
            created_at: entity.created_at,
        }
    }
}
