pub mod activities;
pub mod auth;
pub mod core_values;
pub mod discover;
pub mod export;
pub mod friends;
pub mod instances;
pub mod locations;

use crate::application::{ActivityDiscoveryUseCase, ContactImportUseCase};
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::csv::MAX_UPLOAD_BYTES;
use crate::infrastructure::db::activities::ActivityRepository;
use crate::infrastructure::db::core_values::CoreValueRepository;
use crate::infrastructure::db::friends::FriendRepository;
use crate::infrastructure::db::instances::InstanceRepository;
use crate::infrastructure::db::locations::LocationRepository;
use crate::infrastructure::db::participations::ParticipationRepository;
use crate::infrastructure::db::users::UserRepository;
use crate::infrastructure::llm::{GeminiClient, LlmClient};
use actix_cors::Cors;
use actix_web::{dev::Server, get, web, App, HttpResponse, HttpServer, Responder};
use sqlx::SqlitePool;
use std::sync::Arc;

pub struct AppState {
    pub users: UserRepository,
    pub friends: Arc<FriendRepository>,
    pub core_values: CoreValueRepository,
    pub activities: ActivityRepository,
    pub instances: InstanceRepository,
    pub participations: ParticipationRepository,
    pub locations: LocationRepository,
    pub contact_import: ContactImportUseCase,
    pub discovery: ActivityDiscoveryUseCase,
}

impl AppState {
    pub fn new(pool: SqlitePool, config: &AppConfig) -> Self {
        let friends = Arc::new(FriendRepository::new(pool.clone()));
        let contact_import = ContactImportUseCase::new(friends.clone());

        let llm: Arc<dyn LlmClient + Send + Sync> =
            Arc::new(GeminiClient::new(config.gemini.clone()));
        let discovery = ActivityDiscoveryUseCase::new(llm);

        Self {
            users: UserRepository::new(pool.clone()),
            friends,
            core_values: CoreValueRepository::new(pool.clone()),
            activities: ActivityRepository::new(pool.clone()),
            instances: InstanceRepository::new(pool.clone()),
            participations: ParticipationRepository::new(pool.clone()),
            locations: LocationRepository::new(pool),
            contact_import,
            discovery,
        }
    }
}

#[get("/health")]
async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

pub fn start_server(config: &AppConfig, state: web::Data<AppState>) -> std::io::Result<Server> {
    let server = HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .app_data(state.clone())
            .app_data(web::PayloadConfig::new(MAX_UPLOAD_BYTES))
            .service(
                web::scope("/api")
                    .service(health)
                    .service(friends::list_friends)
                    .service(friends::create_friend)
                    .service(friends::update_friend)
                    .service(friends::delete_friend)
                    .service(friends::import_friends)
                    .service(core_values::list_core_values)
                    .service(core_values::create_core_value)
                    .service(core_values::update_core_value)
                    .service(core_values::delete_core_value)
                    .service(activities::list_activities)
                    .service(activities::create_activity)
                    .service(activities::update_activity)
                    .service(activities::delete_activity)
                    .service(locations::list_locations)
                    .service(locations::create_location)
                    .service(locations::delete_location)
                    .service(instances::list_instances)
                    .service(instances::create_instance)
                    .service(instances::update_instance)
                    .service(instances::delete_instance)
                    .service(instances::list_participants)
                    .service(instances::set_participants)
                    .service(instances::respond_participation)
                    .service(instances::list_rsvps)
                    .service(instances::add_rsvp)
                    .service(export::export_ics)
                    .service(export::export_google)
                    .service(export::share_whatsapp)
                    .service(discover::discover_activities),
            )
    })
    .bind((config.host.as_str(), config.port))?
    .run();

    Ok(server)
}
