use crate::domain::error::{AppError, Result};
use crate::interfaces::http::auth::AuthenticatedUser;
use crate::interfaces::http::AppState;
use actix_web::{delete, get, post, put, web, HttpResponse};
use serde::Deserialize;
use validator::Validate;

#[derive(Deserialize, Validate)]
pub struct ActivityPayload {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
    pub description: Option<String>,
    pub core_value_id: Option<String>,
    #[validate(range(min = 1, max = 1440))]
    pub duration_minutes: Option<i64>,
}

#[derive(Deserialize)]
pub struct ActivityFilter {
    pub core_value_id: Option<String>,
}

#[get("/activities")]
pub async fn list_activities(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    filter: web::Query<ActivityFilter>,
) -> Result<HttpResponse> {
    let activities = state
        .activities
        .list(&user.0.id, filter.core_value_id.as_deref())
        .await?;
    Ok(HttpResponse::Ok().json(activities))
}

#[post("/activities")]
pub async fn create_activity(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    payload: web::Json<ActivityPayload>,
) -> Result<HttpResponse> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    // A tagged core value must exist and belong to the caller.
    if let Some(value_id) = &payload.core_value_id {
        state.core_values.get(&user.0.id, value_id).await?;
    }

    let activity = state
        .activities
        .create(
            &user.0.id,
            payload.title.trim(),
            payload.description.as_deref(),
            payload.core_value_id.as_deref(),
            payload.duration_minutes,
        )
        .await?;

    Ok(HttpResponse::Created().json(activity))
}

#[put("/activities/{id}")]
pub async fn update_activity(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
    payload: web::Json<ActivityPayload>,
) -> Result<HttpResponse> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    if let Some(value_id) = &payload.core_value_id {
        state.core_values.get(&user.0.id, value_id).await?;
    }

    let activity = state
        .activities
        .update(
            &user.0.id,
            &path,
            payload.title.trim(),
            payload.description.as_deref(),
            payload.core_value_id.as_deref(),
            payload.duration_minutes,
        )
        .await?;

    Ok(HttpResponse::Ok().json(activity))
}

#[delete("/activities/{id}")]
pub async fn delete_activity(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    state.activities.delete(&user.0.id, &path).await?;
    Ok(HttpResponse::NoContent().finish())
}
