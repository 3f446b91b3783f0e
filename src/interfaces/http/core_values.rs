use crate::domain::error::{AppError, Result};
use crate::interfaces::http::auth::AuthenticatedUser;
use crate::interfaces::http::AppState;
use actix_web::{delete, get, post, put, web, HttpResponse};
use serde::Deserialize;
use validator::Validate;

#[derive(Deserialize, Validate)]
pub struct CoreValuePayload {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub position: i64,
}

#[get("/core-values")]
pub async fn list_core_values(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<HttpResponse> {
    let values = state.core_values.list(&user.0.id).await?;
    Ok(HttpResponse::Ok().json(values))
}

#[post("/core-values")]
pub async fn create_core_value(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    payload: web::Json<CoreValuePayload>,
) -> Result<HttpResponse> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let value = state
        .core_values
        .create(
            &user.0.id,
            payload.name.trim(),
            payload.description.as_deref(),
            payload.position,
        )
        .await?;

    Ok(HttpResponse::Created().json(value))
}

#[put("/core-values/{id}")]
pub async fn update_core_value(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
    payload: web::Json<CoreValuePayload>,
) -> Result<HttpResponse> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let value = state
        .core_values
        .update(
            &user.0.id,
            &path,
            payload.name.trim(),
            payload.description.as_deref(),
            payload.position,
        )
        .await?;

    Ok(HttpResponse::Ok().json(value))
}

#[delete("/core-values/{id}")]
pub async fn delete_core_value(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    state.core_values.delete(&user.0.id, &path).await?;
    Ok(HttpResponse::NoContent().finish())
}
