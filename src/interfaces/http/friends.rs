use crate::domain::error::{AppError, Result};
use crate::domain::friend::{FriendSource, NewFriend};
use crate::infrastructure::csv::{decode_upload, parse_import_rows};
use crate::interfaces::http::auth::AuthenticatedUser;
use crate::interfaces::http::AppState;
use actix_web::{delete, get, post, put, web, HttpRequest, HttpResponse};
use serde::Deserialize;
use tracing::{info, warn};
use validator::Validate;

#[derive(Deserialize, Validate)]
pub struct FriendPayload {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[validate(email)]
    pub email: Option<String>,
    pub group: Option<String>,
    pub notes: Option<String>,
}

#[get("/friends")]
pub async fn list_friends(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<HttpResponse> {
    let friends = state.friends.list(&user.0.id).await?;
    Ok(HttpResponse::Ok().json(friends))
}

#[post("/friends")]
pub async fn create_friend(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    payload: web::Json<FriendPayload>,
) -> Result<HttpResponse> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let friend = state
        .friends
        .create(
            &user.0.id,
            NewFriend {
                name: payload.name.trim().to_string(),
                email: payload.email.clone(),
                group: payload.group.clone(),
                notes: payload.notes.clone(),
                source: FriendSource::Manual,
            },
        )
        .await?;

    Ok(HttpResponse::Created().json(friend))
}

#[put("/friends/{id}")]
pub async fn update_friend(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
    payload: web::Json<FriendPayload>,
) -> Result<HttpResponse> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let friend = state
        .friends
        .update(
            &user.0.id,
            &path,
            payload.name.trim(),
            payload.email.as_deref(),
            payload.group.as_deref(),
            payload.notes.as_deref(),
        )
        .await?;

    Ok(HttpResponse::Ok().json(friend))
}

#[delete("/friends/{id}")]
pub async fn delete_friend(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    state.friends.delete(&user.0.id, &path).await?;
    Ok(HttpResponse::NoContent().finish())
}

fn is_tabular_upload(req: &HttpRequest) -> bool {
    match req.headers().get("Content-Type").and_then(|v| v.to_str().ok()) {
        None => true,
        Some(value) => {
            let value = value.to_ascii_lowercase();
            value.contains("csv")
                || value.contains("text/plain")
                || value.contains("application/octet-stream")
                || value.contains("vnd.ms-excel")
        }
    }
}

/// Bulk contact import. Per-row problems land in the outcome body; only
/// empty input, undecodable payloads and store failures become HTTP
/// errors.
#[post("/friends/import")]
pub async fn import_friends(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    req: HttpRequest,
    body: web::Bytes,
) -> Result<HttpResponse> {
    if !is_tabular_upload(&req) {
        return Err(AppError::ValidationError(
            "Upload must be a CSV file".to_string(),
        ));
    }

    let content = decode_upload(&body)?;
    let rows = parse_import_rows(&content)?;

    let outcome = match state.contact_import.execute(&user.0.id, rows).await {
        Ok(outcome) => outcome,
        Err(err) => {
            warn!(user_id = %user.0.id, error = %err, "Friend import failed");
            return Err(err);
        }
    };

    info!(
        user_id = %user.0.id,
        total_rows = outcome.total_rows,
        imported = outcome.successful_imports,
        duplicates = outcome.duplicates.len(),
        errors = outcome.errors.len(),
        "Friend import finished"
    );

    Ok(HttpResponse::Ok().json(outcome))
}
