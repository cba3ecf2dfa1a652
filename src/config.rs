use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::models::TierPolicy;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    #[serde(default)]
    pub database: DatabaseSettings,
    #[serde(default)]
    pub data: DataSettings,
    #[serde(default)]
    pub recommender: RecommenderSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    #[serde(default = "default_database_url")]
    pub url: String,
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            max_connections: None,
            min_connections: None,
        }
    }
}

fn default_database_url() -> String { "sqlite://db/career_compass.db".to_string() }

/// Where reference data is read from at startup
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    #[default]
    Csv,
    Sqlite,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataSettings {
    #[serde(default)]
    pub source: DataSource,
    #[serde(default = "default_data_dir")]
    pub dir: PathBuf,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            source: DataSource::default(),
            dir: default_data_dir(),
        }
    }
}

fn default_data_dir() -> PathBuf { PathBuf::from("db_data") }

#[derive(Debug, Clone, Deserialize)]
pub struct RecommenderSettings {
    #[serde(default = "default_tier_threshold")]
    pub tier_threshold: usize,
    #[serde(default = "default_max_tiers")]
    pub max_tiers: usize,
    #[serde(default = "default_dedupe_tag_jobs")]
    pub dedupe_tag_jobs: bool,
}

impl Default for RecommenderSettings {
    fn default() -> Self {
        Self {
            tier_threshold: default_tier_threshold(),
            max_tiers: default_max_tiers(),
            dedupe_tag_jobs: default_dedupe_tag_jobs(),
        }
    }
}

impl RecommenderSettings {
    pub fn policy(&self) -> TierPolicy {
        TierPolicy {
            threshold: self.tier_threshold,
            max_tiers: self.max_tiers,
        }
    }
}

fn default_tier_threshold() -> usize { 3 }
fn default_max_tiers() -> usize { 3 }
fn default_dedupe_tag_jobs() -> bool { true }

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
    /// 4. Environment variables (prefixed with CAREER_)
    /// 5. DATABASE_URL
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., CAREER__SERVER__PORT -> server.port
            .add_source(environment())
            .build()?;

        with_database_url(settings)?.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?;

        with_database_url(settings)?.try_deserialize()
    }
}

fn environment() -> Environment {
    Environment::with_prefix("CAREER")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

/// `DATABASE_URL` wins over every other source for `database.url`
fn with_database_url(settings: Config) -> Result<Config, ConfigError> {
    match std::env::var("DATABASE_URL") {
        Ok(url) => Config::builder()
            .add_source(settings)
            .set_override("database.url", url)?
            .build(),
        Err(_) => Ok(settings),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_recommender() {
        let recommender = RecommenderSettings::default();
        assert_eq!(recommender.tier_threshold, 3);
        assert_eq!(recommender.max_tiers, 3);
        assert!(recommender.dedupe_tag_jobs);
        assert_eq!(recommender.policy(), TierPolicy::default());
    }

    #[test]
    fn test_default_logging() {
        let level = default_log_level();
        let format = default_log_format();
        assert_eq!(level, "info");
        assert_eq!(format, "json");
    }

    #[test]
    fn test_load_from_file_fills_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[server]\nhost = \"127.0.0.1\"\nport = 9090\n\n[data]\nsource = \"sqlite\"\n\n[recommender]\ntier_threshold = 5"
        )
        .unwrap();

        let settings = Settings::load_from(file.path()).unwrap();
        assert_eq!(settings.server.port, 9090);
        assert_eq!(settings.data.source, DataSource::Sqlite);
        assert_eq!(settings.data.dir, PathBuf::from("db_data"));
        assert_eq!(settings.recommender.tier_threshold, 5);
        assert_eq!(settings.recommender.max_tiers, 3);
        assert_eq!(settings.logging.format, "json");
    }
}
