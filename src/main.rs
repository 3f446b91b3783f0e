use actix_web::web;
use gatherly::infrastructure::config::AppConfig;
use gatherly::infrastructure::db::connection::init_db;
use gatherly::interfaces::http::auth::hash_token;
use gatherly::interfaces::http::{start_server, AppState};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::load().map_err(|e| {
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    let pool = init_db(&config.database_url)
        .await
        .map_err(|e| std::io::Error::other(e.to_string()))?;

    let state = web::Data::new(AppState::new(pool, &config));

    if let Some(token) = &config.bootstrap_token {
        let user = state
            .users
            .ensure_user("owner@localhost", "Owner", &hash_token(token))
            .await
            .map_err(|e| std::io::Error::other(e.to_string()))?;
        info!(user_id = %user.id, "Bootstrap user ready");
    }

    info!(host = %config.host, port = config.port, "Starting server");
    start_server(&config, state)?.await
}
