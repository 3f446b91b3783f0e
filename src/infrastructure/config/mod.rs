use crate::domain::error::{AppError, Result};
use figment::providers::{Env, Format, Toml};
use figment::Figment;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_database_url")]
    pub database_url: String,
    /// When set, a user owning this bearer token is ensured at startup so
    /// a fresh deployment is reachable without manual row surgery.
    #[serde(default)]
    pub bootstrap_token: Option<String>,
    #[serde(default)]
    pub gemini: GeminiSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeminiSettings {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_gemini_base_url")]
    pub base_url: String,
    #[serde(default = "default_gemini_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default)]
    pub max_output_tokens: Option<u32>,
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_gemini_base_url(),
            model: default_gemini_model(),
            temperature: default_temperature(),
            max_output_tokens: None,
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_database_url() -> String {
    "sqlite://gatherly.db".to_string()
}

fn default_gemini_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta/models".to_string()
}

fn default_gemini_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_temperature() -> f64 {
    0.7
}

impl AppConfig {
    /// Merges `gatherly.toml` with `GATHERLY_*` environment variables;
    /// the environment wins. Nested keys use `__`, e.g.
    /// `GATHERLY_GEMINI__API_KEY`.
    pub fn load() -> Result<Self> {
        Figment::new()
            .merge(Toml::file("gatherly.toml"))
            .merge(Env::prefixed("GATHERLY_").split("__"))
            .extract()
            .map_err(|e| AppError::Internal(format!("Failed to load configuration: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_sources_yield_defaults() {
        let config: AppConfig = Figment::new().extract().unwrap();

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.database_url, "sqlite://gatherly.db");
        assert!(config.bootstrap_token.is_none());
        assert!(config.gemini.api_key.is_none());
        assert_eq!(config.gemini.model, "gemini-1.5-flash");
    }

    #[test]
    fn environment_overrides_nested_settings() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("GATHERLY_PORT", "9000");
            jail.set_env("GATHERLY_GEMINI__MODEL", "gemini-1.5-pro");

            let config = AppConfig::load().unwrap();
            assert_eq!(config.port, 9000);
            assert_eq!(config.gemini.model, "gemini-1.5-pro");
            Ok(())
        });
    }
}
