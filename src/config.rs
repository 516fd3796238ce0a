use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::core::MatchingError;
use crate::models::{BandDefinition, CrossBandRule, LevelBand, LevelBounds, MatchConfig};

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub roster: RosterSettings,
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

/// Default match generation options, overridable per request
#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_strategy")]
    pub strategy: String,
    #[serde(default = "default_tolerance_max")]
    pub tolerance_max: i32,
    #[serde(default = "default_coarse_split_level")]
    pub coarse_split_level: i32,
    #[serde(default = "default_min_level")]
    pub min_level: i32,
    #[serde(default = "default_max_level")]
    pub max_level: i32,
    /// Fixed-band layout, lowest band first; built-in bands when absent
    #[serde(default)]
    pub bands: Option<Vec<LevelBand>>,
    #[serde(default = "default_cross_band_rule")]
    pub cross_band_rule: bool,
    #[serde(default = "default_partner_band_count")]
    pub partner_band_count: usize,
    pub random_seed: Option<u64>,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            strategy: default_strategy(),
            tolerance_max: default_tolerance_max(),
            coarse_split_level: default_coarse_split_level(),
            min_level: default_min_level(),
            max_level: default_max_level(),
            bands: None,
            cross_band_rule: default_cross_band_rule(),
            partner_band_count: default_partner_band_count(),
            random_seed: None,
        }
    }
}

fn default_strategy() -> String { "adaptive_tolerance".to_string() }
fn default_tolerance_max() -> i32 { 5 }
fn default_coarse_split_level() -> i32 { 2 }
fn default_min_level() -> i32 { 1 }
fn default_max_level() -> i32 { 10 }
fn default_cross_band_rule() -> bool { true }
fn default_partner_band_count() -> usize { 2 }

impl MatchingSettings {
    /// Convert to a validated core configuration
    pub fn to_match_config(&self) -> Result<MatchConfig, MatchingError> {
        let config = MatchConfig {
            strategy: self.strategy.parse()?,
            tolerance_max: self.tolerance_max,
            band_definition: self
                .bands
                .clone()
                .map(BandDefinition::new)
                .unwrap_or_default(),
            cross_band_rule: CrossBandRule {
                enabled: self.cross_band_rule,
                partner_band_count: self.partner_band_count,
            },
            coarse_split_level: self.coarse_split_level,
            level_bounds: LevelBounds {
                min: self.min_level,
                max: self.max_level,
            },
            random_seed: self.random_seed,
        };

        config.validate()?;
        Ok(config)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RosterSettings {
    /// JSON array of players loaded at startup
    pub seed_file: Option<String>,
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
    /// 4. Environment variables (prefixed with MATCHER__)
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(env_source())
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a single file, still honouring MATCHER__ variables
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(env_source())
            .build()?
            .try_deserialize()
    }
}

// e.g., MATCHER__SERVER__PORT -> server.port
fn env_source() -> Environment {
    Environment::with_prefix("MATCHER")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Strategy;
    use config::FileFormat;

    #[test]
    fn test_default_matching() {
        let config = MatchingSettings::default().to_match_config().unwrap();
        assert_eq!(config, MatchConfig::default());
    }

    #[test]
    fn test_default_logging() {
        let level = default_log_level();
        let format = default_log_format();
        assert_eq!(level, "info");
        assert_eq!(format, "json");
    }

    #[test]
    fn test_matching_from_toml() {
        let settings: Settings = Config::builder()
            .add_source(config::File::from_str(
                r#"
                [matching]
                strategy = "fixed_band"
                tolerance_max = 3
                cross_band_rule = false

                [[matching.bands]]
                label = "beginner"
                min_level = 1
                max_level = 4

                [[matching.bands]]
                label = "advanced"
                min_level = 5
                max_level = 10
                "#,
                FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        let config = settings.matching.to_match_config().unwrap();
        assert_eq!(config.strategy, Strategy::FixedBand);
        assert_eq!(config.tolerance_max, 3);
        assert_eq!(config.band_definition.len(), 2);
        assert!(!config.cross_band_rule.enabled);
        assert_eq!(settings.server.port, 8080);
    }

    #[test]
    fn test_load_from_path() {
        let path = std::env::temp_dir().join(format!("doubles-matcher-{}.toml", std::process::id()));
        std::fs::write(
            &path,
            "[server]\nport = 9191\n\n[matching]\nstrategy = \"simple_random\"\ncoarse_split_level = 3\n",
        )
        .unwrap();

        let settings = Settings::load_from(&path);
        std::fs::remove_file(&path).ok();
        let settings = settings.unwrap();

        assert_eq!(settings.server.port, 9191);
        let config = settings.matching.to_match_config().unwrap();
        assert_eq!(config.strategy, Strategy::SimpleRandom);
        assert_eq!(config.coarse_split_level, 3);
    }

    #[test]
    fn test_load_from_missing_file() {
        assert!(Settings::load_from("config/does-not-exist.toml").is_err());
    }

    #[test]
    fn test_unknown_strategy_rejected() {
        let settings = MatchingSettings {
            strategy: "knockout".to_string(),
            ..MatchingSettings::default()
        };
        assert!(matches!(
            settings.to_match_config(),
            Err(MatchingError::Configuration(_))
        ));
    }
}
