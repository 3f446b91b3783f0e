use crate::application::use_cases::calendar_export::{google_calendar_url, to_ics, EventDetails};
use crate::application::use_cases::share_text::{whatsapp_link, whatsapp_message, ShareDetails};
use crate::domain::error::Result;
use crate::interfaces::http::auth::AuthenticatedUser;
use crate::interfaces::http::AppState;
use actix_web::{get, web, HttpResponse};
use chrono::{DateTime, Duration, Utc};

const DEFAULT_EVENT_MINUTES: i64 = 60;

/// Gathers the instance, its activity and its location into one event
/// description. An open-ended instance gets an end derived from the
/// activity's usual duration, or an hour when none is set.
async fn load_event(
    state: &AppState,
    user_id: &str,
    instance_id: &str,
) -> Result<EventDetails> {
    let instance = state.instances.get(user_id, instance_id).await?;
    let activity = state.activities.get(user_id, &instance.activity_id).await?;

    let location = match &instance.location_id {
        Some(location_id) => {
            let location = state.locations.get(user_id, location_id).await?;
            Some(match &location.address {
                Some(address) => format!("{}, {}", location.name, address),
                None => location.name,
            })
        }
        None => None,
    };

    let ends_at: DateTime<Utc> = instance.ends_at.unwrap_or_else(|| {
        let minutes = activity.duration_minutes.unwrap_or(DEFAULT_EVENT_MINUTES);
        instance.starts_at + Duration::minutes(minutes)
    });

    Ok(EventDetails {
        uid: instance.id,
        title: activity.title,
        description: activity.description,
        location,
        starts_at: instance.starts_at,
        ends_at,
    })
}

#[get("/instances/{id}/export/ics")]
pub async fn export_ics(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let event = load_event(&state, &user.0.id, &path).await?;
    let body = to_ics(&event, Utc::now());

    Ok(HttpResponse::Ok()
        .content_type("text/calendar; charset=utf-8")
        .insert_header((
            "Content-Disposition",
            "attachment; filename=\"event.ics\"",
        ))
        .body(body))
}

#[get("/instances/{id}/export/google")]
pub async fn export_google(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let event = load_event(&state, &user.0.id, &path).await?;
    let url = google_calendar_url(&event);

    Ok(HttpResponse::Ok().json(serde_json::json!({ "url": url })))
}

#[get("/instances/{id}/share/whatsapp")]
pub async fn share_whatsapp(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let event = load_event(&state, &user.0.id, &path).await?;
    let confirmed_count = state.participations.count_confirmed(&path).await?;

    let message = whatsapp_message(&ShareDetails {
        title: event.title,
        starts_at: event.starts_at,
        location: event.location,
        confirmed_count,
    });
    let link = whatsapp_link(&message);

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": message,
        "link": link,
    })))
}
