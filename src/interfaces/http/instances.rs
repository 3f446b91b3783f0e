use crate::domain::error::{AppError, Result};
use crate::domain::instance::InstanceStatus;
use crate::domain::participation::ParticipationStatus;
use crate::infrastructure::db::instances::NewInstance;
use crate::interfaces::http::auth::AuthenticatedUser;
use crate::interfaces::http::AppState;
use actix_web::{delete, get, post, put, web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::Validate;

#[derive(Deserialize, Validate)]
pub struct CreateInstancePayload {
    #[validate(length(min = 1))]
    pub activity_id: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: Option<DateTime<Utc>>,
    pub location_id: Option<String>,
    pub notes: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateInstancePayload {
    pub starts_at: DateTime<Utc>,
    pub ends_at: Option<DateTime<Utc>>,
    pub location_id: Option<String>,
    pub status: InstanceStatus,
    pub notes: Option<String>,
}

#[derive(Deserialize)]
pub struct ParticipantsPayload {
    pub friend_ids: Vec<String>,
}

#[derive(Deserialize)]
pub struct RespondPayload {
    pub friend_id: String,
    pub status: ParticipationStatus,
}

#[derive(Deserialize, Validate)]
pub struct RsvpPayload {
    #[validate(length(min = 1, message = "guest name must not be empty"))]
    pub guest_name: String,
    pub attending: bool,
}

#[get("/instances")]
pub async fn list_instances(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<HttpResponse> {
    let instances = state.instances.list_upcoming(&user.0.id, Utc::now()).await?;
    Ok(HttpResponse::Ok().json(instances))
}

#[post("/instances")]
pub async fn create_instance(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    payload: web::Json<CreateInstancePayload>,
) -> Result<HttpResponse> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    // Referenced rows must belong to the caller.
    state.activities.get(&user.0.id, &payload.activity_id).await?;
    if let Some(location_id) = &payload.location_id {
        state.locations.get(&user.0.id, location_id).await?;
    }

    if let Some(ends_at) = payload.ends_at {
        if ends_at <= payload.starts_at {
            return Err(AppError::ValidationError(
                "ends_at must be after starts_at".to_string(),
            ));
        }
    }

    let instance = state
        .instances
        .create(
            &user.0.id,
            NewInstance {
                activity_id: payload.activity_id.clone(),
                starts_at: payload.starts_at,
                ends_at: payload.ends_at,
                location_id: payload.location_id.clone(),
                notes: payload.notes.clone(),
            },
        )
        .await?;

    Ok(HttpResponse::Created().json(instance))
}

#[put("/instances/{id}")]
pub async fn update_instance(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
    payload: web::Json<UpdateInstancePayload>,
) -> Result<HttpResponse> {
    if let Some(location_id) = &payload.location_id {
        state.locations.get(&user.0.id, location_id).await?;
    }
    if let Some(ends_at) = payload.ends_at {
        if ends_at <= payload.starts_at {
            return Err(AppError::ValidationError(
                "ends_at must be after starts_at".to_string(),
            ));
        }
    }

    let instance = state
        .instances
        .update(
            &user.0.id,
            &path,
            payload.starts_at,
            payload.ends_at,
            payload.location_id.as_deref(),
            payload.status,
            payload.notes.as_deref(),
        )
        .await?;

    Ok(HttpResponse::Ok().json(instance))
}

#[delete("/instances/{id}")]
pub async fn delete_instance(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    state.instances.delete(&user.0.id, &path).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[get("/instances/{id}/participants")]
pub async fn list_participants(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    state.instances.get(&user.0.id, &path).await?;
    let participants = state.participations.list_for_instance(&path).await?;
    Ok(HttpResponse::Ok().json(participants))
}

#[put("/instances/{id}/participants")]
pub async fn set_participants(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
    payload: web::Json<ParticipantsPayload>,
) -> Result<HttpResponse> {
    state.instances.get(&user.0.id, &path).await?;
    for friend_id in &payload.friend_ids {
        state.friends.get(&user.0.id, friend_id).await?;
    }

    let participants = state
        .participations
        .replace_for_instance(&path, &payload.friend_ids)
        .await?;

    Ok(HttpResponse::Ok().json(participants))
}

#[post("/instances/{id}/respond")]
pub async fn respond_participation(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
    payload: web::Json<RespondPayload>,
) -> Result<HttpResponse> {
    state.instances.get(&user.0.id, &path).await?;
    state
        .participations
        .set_status(&path, &payload.friend_id, payload.status)
        .await?;

    Ok(HttpResponse::NoContent().finish())
}

#[get("/instances/{id}/rsvps")]
pub async fn list_rsvps(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    state.instances.get(&user.0.id, &path).await?;
    let rsvps = state.participations.list_public_rsvps(&path).await?;
    Ok(HttpResponse::Ok().json(rsvps))
}

#[post("/instances/{id}/rsvps")]
pub async fn add_rsvp(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
    payload: web::Json<RsvpPayload>,
) -> Result<HttpResponse> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    state.instances.get(&user.0.id, &path).await?;
    let rsvp = state
        .participations
        .add_public_rsvp(&path, payload.guest_name.trim(), payload.attending)
        .await?;

    Ok(HttpResponse::Created().json(rsvp))
}
