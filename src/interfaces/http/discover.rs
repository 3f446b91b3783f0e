use crate::application::use_cases::activity_discovery::DiscoveryRequest;
use crate::domain::error::Result;
use crate::interfaces::http::auth::AuthenticatedUser;
use crate::interfaces::http::AppState;
use actix_web::{post, web, HttpResponse};
use tracing::info;

#[post("/discover")]
pub async fn discover_activities(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    payload: web::Json<DiscoveryRequest>,
) -> Result<HttpResponse> {
    let outcome = state.discovery.execute(&payload).await?;

    info!(
        user_id = %user.0.id,
        suggestions = outcome.suggestions.len(),
        source = ?outcome.source,
        "Activity discovery finished"
    );

    Ok(HttpResponse::Ok().json(outcome))
}
