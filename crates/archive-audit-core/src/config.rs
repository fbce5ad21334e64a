use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File as ConfigFile};
use serde::Deserialize;

pub const DEFAULT_DATABASE_PATH: &str = "archive_store.db";
pub const DEFAULT_EXCLUDED_EMAIL_DOMAIN: &str = "@permanent.org";
pub const DEFAULT_CREATED_AFTER: &str = "2017-01-01 12:00:00";
pub const DEFAULT_MAX_WALK_DEPTH: usize = 4096;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_path: String,
    /// Accounts whose primary email ends with this suffix are internal and never audited.
    pub excluded_email_domain: String,
    /// Only accounts created strictly after this timestamp are selected.
    pub created_after: String,
    pub archive_limit: Option<i64>,
    pub max_walk_depth: usize,
    pub report_path: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_path: DEFAULT_DATABASE_PATH.to_string(),
            excluded_email_domain: DEFAULT_EXCLUDED_EMAIL_DOMAIN.to_string(),
            created_after: DEFAULT_CREATED_AFTER.to_string(),
            archive_limit: None,
            max_walk_depth: DEFAULT_MAX_WALK_DEPTH,
            report_path: None,
        }
    }
}

fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("database_path", DEFAULT_DATABASE_PATH)?
        .set_default("excluded_email_domain", DEFAULT_EXCLUDED_EMAIL_DOMAIN)?
        .set_default("created_after", DEFAULT_CREATED_AFTER)?
        .set_default("max_walk_depth", DEFAULT_MAX_WALK_DEPTH as i64)
}

fn validate(config: AppConfig) -> Result<AppConfig, ConfigError> {
    if config.max_walk_depth < 1 {
        return Err(ConfigError::Message(format!(
            "max_walk_depth must be at least 1, got {}",
            config.max_walk_depth
        )));
    }
    Ok(config)
}

/// Load configuration from an optional `Config` file, overridden by
/// `AUDIT_`-prefixed environment variables (e.g. `AUDIT_DATABASE_PATH`).
pub fn load_configuration() -> Result<AppConfig, ConfigError> {
    let builder = defaults()?
        .add_source(ConfigFile::with_name("Config").required(false))
        .add_source(Environment::with_prefix("AUDIT").try_parsing(true))
        .build()?;
    validate(builder.try_deserialize::<AppConfig>()?)
}
