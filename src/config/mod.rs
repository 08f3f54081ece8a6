mod duration;
mod parser;

use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use crate::constants::{DEFAULT_API_KEY_ENV, DEFAULT_MODEL};
use crate::core::{Client, Project, Template};

pub use parser::load_config;

/// Top-level application configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct AppConfig {
    /// HTTP API settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Generation provider settings
    #[serde(default)]
    pub generation: GenerationConfig,
    /// Defaults applied when projects are created from templates
    #[serde(default)]
    pub projects: ProjectsConfig,
    /// Data loaded on start; the built-in mock data when absent
    #[serde(default)]
    pub seed: Option<SeedConfig>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServerConfig {
    /// Port the API listens on
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            port: default_port(),
        }
    }
}

/// Configuration of the generative model provider
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GenerationConfig {
    /// Provider name ("gemini" or "openai")
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Model identifier passed to the provider
    #[serde(default = "default_model")]
    pub model: String,
    /// Name of the environment variable holding the API key.
    /// A missing key switches the client to canned responses.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    /// Overrides the provider endpoint
    #[serde(default)]
    pub base_url: Option<Url>,
    /// Simulated latency of canned responses
    #[serde(default = "default_mock_delay", with = "duration::required")]
    pub mock_delay: Duration,
    /// Upper bound on a provider call; unbounded when absent
    #[serde(default, with = "duration::optional")]
    pub request_timeout: Option<Duration>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        GenerationConfig {
            provider: default_provider(),
            model: default_model(),
            api_key_env: default_api_key_env(),
            base_url: None,
            mock_delay: default_mock_delay(),
            request_timeout: None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProjectsConfig {
    /// Client a project is assigned to when the caller names none
    #[serde(default = "default_client_id")]
    pub default_client_id: String,
    /// Placeholder deadline distance from the creation date
    #[serde(default = "default_lead_time", with = "duration::required")]
    pub deadline_lead_time: Duration,
}

impl Default for ProjectsConfig {
    fn default() -> Self {
        ProjectsConfig {
            default_client_id: default_client_id(),
            deadline_lead_time: default_lead_time(),
        }
    }
}

/// Records loaded into memory on start
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct SeedConfig {
    #[serde(default)]
    pub clients: Vec<Client>,
    #[serde(default)]
    pub templates: Vec<Template>,
    #[serde(default)]
    pub projects: Vec<Project>,
}

fn default_port() -> u16 {
    3000
}

fn default_provider() -> String {
    "gemini".to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_api_key_env() -> String {
    DEFAULT_API_KEY_ENV.to_string()
}

fn default_mock_delay() -> Duration {
    Duration::from_millis(1500)
}

fn default_client_id() -> String {
    "1".to_string()
}

fn default_lead_time() -> Duration {
    Duration::from_secs(30 * 24 * 60 * 60)
}
