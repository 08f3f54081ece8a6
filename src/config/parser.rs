use super::{AppConfig, SeedConfig};
use crate::errors::Error;
use std::fs;
use std::path::Path;

use tracing::info;

/// Config file picked up from the working directory when no path is given
const DEFAULT_CONFIG_FILE: &str = "agencyos.yaml";

/// Mock records used when the configuration has no `seed` section
static DEFAULT_SEED: &str = include_str!("../../data/seed.yaml");

/// Loads the application configuration.
///
/// # Arguments
///
/// * `file_path` - Explicit YAML file; when `None`, `agencyos.yaml` in the
///   working directory is used if present, otherwise built-in defaults
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not parse.
pub fn load_config(file_path: Option<&str>) -> Result<AppConfig, Error> {
    let path = match file_path {
        Some(p) => p,
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => DEFAULT_CONFIG_FILE,
        None => {
            info!("No configuration file, using defaults");
            return Ok(AppConfig::default());
        }
    };
    let yaml_str = fs::read_to_string(path)?;
    let config = parse_config(&yaml_str)?;
    info!("Loaded configuration from {}", path);
    Ok(config)
}

pub fn parse_config(yaml_str: &str) -> Result<AppConfig, Error> {
    Ok(serde_yaml::from_str(yaml_str)?)
}

/// Parses the built-in mock data
pub fn default_seed() -> Result<SeedConfig, Error> {
    Ok(serde_yaml::from_str(DEFAULT_SEED)?)
}

impl AppConfig {
    /// The configured seed, or the built-in mock data
    pub fn seed(&self) -> Result<SeedConfig, Error> {
        match &self.seed {
            Some(seed) => Ok(seed.clone()),
            None => default_seed(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Category, ClientStatus, ProjectStatus};
    use std::time::Duration;

    #[test]
    fn empty_document_yields_defaults() {
        let config = parse_config("{}").unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.generation.provider, "gemini");
        assert_eq!(config.generation.model, "gemini-2.5-flash");
        assert_eq!(config.generation.api_key_env, "API_KEY");
        assert_eq!(config.generation.mock_delay, Duration::from_millis(1500));
        assert!(config.generation.request_timeout.is_none());
        assert_eq!(config.projects.default_client_id, "1");
        assert!(config.seed.is_none());
    }

    #[test]
    fn durations_parse_from_human_text() {
        let config = parse_config(
            "generation:\n  mock_delay: 0s\n  request_timeout: 20s\nprojects:\n  deadline_lead_time: 2weeks\n",
        )
        .unwrap();
        assert_eq!(config.generation.mock_delay, Duration::ZERO);
        assert_eq!(config.generation.request_timeout, Some(Duration::from_secs(20)));
        assert_eq!(
            config.projects.deadline_lead_time,
            Duration::from_secs(14 * 24 * 60 * 60)
        );
    }

    #[test]
    fn bad_duration_is_an_error() {
        assert!(parse_config("generation:\n  mock_delay: soon\n").is_err());
    }

    #[test]
    fn built_in_seed_matches_mock_data() {
        let seed = default_seed().unwrap();
        assert_eq!(seed.clients.len(), 4);
        assert_eq!(seed.clients[3].status, ClientStatus::Churned);
        assert_eq!(seed.templates.len(), 2);
        assert_eq!(seed.templates[0].category, Category::Development);
        assert_eq!(seed.templates[1].tasks.len(), 7);
        assert_eq!(seed.projects[0].status, ProjectStatus::InProgress);
        assert_eq!(seed.projects[1].deadline, "2024-01-20");
    }

    #[test]
    fn explicit_seed_replaces_built_in_data() {
        let config = parse_config("seed:\n  clients: []\n").unwrap();
        let seed = config.seed().unwrap();
        assert!(seed.clients.is_empty());
        assert!(seed.templates.is_empty());
    }
}
