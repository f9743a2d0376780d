use secrecy::Secret;
use serde::Deserialize;
use service_core::config::{configuration_directory, load_settings};
use service_core::error::AppError;
use std::path::PathBuf;
use std::time::Duration;

/// Directory name of this crate inside the workspace.
pub const SERVICE_DIR: &str = "tutor-service";

/// Environment variable holding the model-provider credential.
pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";

#[derive(Deserialize, Clone, Default)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub tutor: TutorSettings,
    #[serde(default)]
    pub observability: ObservabilitySettings,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    /// Port 0 binds an ephemeral port (used by tests).
    #[serde(default = "default_port")]
    pub port: u16,
    /// Upper bound for a question submission body, image included.
    #[serde(default = "default_max_request_bytes")]
    pub max_request_bytes: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_request_bytes: default_max_request_bytes(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5001
}

fn default_max_request_bytes() -> usize {
    32 * 1024 * 1024
}

/// Presentation settings for the chat page.
#[derive(Deserialize, Clone, Debug)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    /// Relative paths are resolved against the service directory.
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
    #[serde(default = "default_input_placeholder")]
    pub input_placeholder: String,
    #[serde(default = "default_welcome_message")]
    pub welcome_message: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            static_dir: default_static_dir(),
            input_placeholder: default_input_placeholder(),
            welcome_message: default_welcome_message(),
        }
    }
}

fn default_app_name() -> String {
    "Concept Tutor".to_string()
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("static")
}

fn default_input_placeholder() -> String {
    "Ask about Rotational Motion, P-Block Elements...".to_string()
}

fn default_welcome_message() -> String {
    "Gearing up for JEE or NEET? I'm here to help. Ask a tough concept from Physics, \
     Chemistry, Maths, or Biology to get started!"
        .to_string()
}

/// Settings for the answer pipeline.
#[derive(Deserialize, Clone)]
pub struct TutorSettings {
    /// Simulated vector-store lookup latency.
    #[serde(default = "default_retrieval_delay_ms")]
    pub retrieval_delay_ms: u64,
    /// Simulated model inference latency.
    #[serde(default = "default_generation_delay_ms")]
    pub generation_delay_ms: u64,
    /// Credential for a real model provider. Loaded but not used by the mock
    /// pipeline.
    #[serde(default)]
    pub openai_api_key: Option<Secret<String>>,
}

impl Default for TutorSettings {
    fn default() -> Self {
        Self {
            retrieval_delay_ms: default_retrieval_delay_ms(),
            generation_delay_ms: default_generation_delay_ms(),
            openai_api_key: None,
        }
    }
}

impl TutorSettings {
    pub fn retrieval_delay(&self) -> Duration {
        Duration::from_millis(self.retrieval_delay_ms)
    }

    pub fn generation_delay(&self) -> Duration {
        Duration::from_millis(self.generation_delay_ms)
    }

    /// Settings with both delays disabled.
    pub fn without_delays() -> Self {
        Self {
            retrieval_delay_ms: 0,
            generation_delay_ms: 0,
            openai_api_key: None,
        }
    }
}

fn default_retrieval_delay_ms() -> u64 {
    500
}

fn default_generation_delay_ms() -> u64 {
    1500
}

#[derive(Deserialize, Clone, Debug)]
pub struct ObservabilitySettings {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// OTLP/gRPC collector; span export is disabled when unset.
    #[serde(default)]
    pub otlp_endpoint: Option<String>,
}

impl Default for ObservabilitySettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            otlp_endpoint: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

pub fn get_configuration() -> Result<Settings, AppError> {
    let configuration_directory = configuration_directory(SERVICE_DIR)?;
    let mut settings: Settings = load_settings(&configuration_directory)?;

    if settings.app.static_dir.is_relative() {
        if let Some(service_root) = configuration_directory.parent() {
            settings.app.static_dir = service_root.join(&settings.app.static_dir);
        }
    }

    if settings.tutor.openai_api_key.is_none() {
        settings.tutor.openai_api_key = std::env::var(OPENAI_API_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .map(Secret::new);
    }

    Ok(settings)
}
