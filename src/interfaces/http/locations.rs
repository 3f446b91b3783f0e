use crate::domain::error::{AppError, Result};
use crate::interfaces::http::auth::AuthenticatedUser;
use crate::interfaces::http::AppState;
use actix_web::{delete, get, post, web, HttpResponse};
use serde::Deserialize;
use validator::Validate;

#[derive(Deserialize, Validate)]
pub struct LocationPayload {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    pub address: Option<String>,
}

#[get("/locations")]
pub async fn list_locations(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<HttpResponse> {
    let locations = state.locations.list(&user.0.id).await?;
    Ok(HttpResponse::Ok().json(locations))
}

#[post("/locations")]
pub async fn create_location(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    payload: web::Json<LocationPayload>,
) -> Result<HttpResponse> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let location = state
        .locations
        .create(&user.0.id, payload.name.trim(), payload.address.as_deref())
        .await?;

    Ok(HttpResponse::Created().json(location))
}

#[delete("/locations/{id}")]
pub async fn delete_location(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    state.locations.delete(&user.0.id, &path).await?;
    Ok(HttpResponse::NoContent().finish())
}
