use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::models::{
    KeyTolerances, KeyWeights, LocationWeights, ScoringConfig, SecondaryTolerances,
    SecondaryWeights,
};

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 8080 }

/// Tolerance and weight tables; any table left out falls back to its default
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub key_tolerances: KeyTolerances,
    #[serde(default)]
    pub secondary_tolerances: SecondaryTolerances,
    #[serde(default)]
    pub key_weights: KeyWeights,
    #[serde(default)]
    pub secondary_weights: SecondaryWeights,
    #[serde(default)]
    pub location_weights: LocationWeights,
}

impl From<ScoringSettings> for ScoringConfig {
    fn from(settings: ScoringSettings) -> Self {
        Self {
            key_tolerances: settings.key_tolerances,
            secondary_tolerances: settings.secondary_tolerances,
            key_weights: settings.key_weights,
            secondary_weights: settings.secondary_weights,
            location_weights: settings.location_weights,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with COMPS)
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., COMPS__SCORING__KEY_WEIGHTS__SIZE -> scoring.key_weights.size
            .add_source(environment())
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?
            .try_deserialize()
    }

    /// Scoring tables for the matcher, validated by `Matcher::new`
    pub fn scoring_config(&self) -> ScoringConfig {
        self.scoring.clone().into()
    }
}

fn environment() -> Environment {
    Environment::with_prefix("COMPS")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    fn from_toml(source: &str) -> Settings {
        Config::builder()
            .add_source(File::from_str(source, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_empty_source_uses_defaults() {
        let settings = from_toml("");

        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.scoring_config(), ScoringConfig::default());
        assert_eq!(settings.logging.level, "info");
        assert_eq!(settings.logging.format, "json");
    }

    #[test]
    fn test_partial_scoring_override() {
        let settings = from_toml(
            r#"
            [scoring.key_weights]
            size = 0.5

            [scoring.secondary_tolerances.age]
            tolerance_percentage = 0.2
            max_diff_percentage = 0.8
            "#,
        );

        let config = settings.scoring_config();
        assert_eq!(config.key_weights.bedrooms, 1.0);
        assert_eq!(config.key_weights.size, 0.5);
        assert_eq!(config.secondary_tolerances.age.tolerance_percentage, 0.2);
        assert_eq!(config.secondary_tolerances.bathrooms, SecondaryTolerances::default().bathrooms);
        assert!(config.validate().is_ok());
    }
}
