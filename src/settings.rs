use config::{Config, ConfigError, Environment};
use serde::Deserialize;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_UPSTREAM_BASE_URL: &str = "https://backend.saweria.co";
pub const DEFAULT_UPSTREAM_SITE_URL: &str = "https://saweria.co";

/// Process configuration, read from the environment (`HOST`, `PORT`,
/// `UPSTREAM_BASE_URL`, `UPSTREAM_SITE_URL`).
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub upstream_base_url: String,
    pub upstream_site_url: String,
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_environment(Environment::default())
    }

    fn from_environment(environment: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("host", DEFAULT_HOST)?
            .set_default("port", i64::from(DEFAULT_PORT))?
            .set_default("upstream_base_url", DEFAULT_UPSTREAM_BASE_URL)?
            .set_default("upstream_site_url", DEFAULT_UPSTREAM_SITE_URL)?
            .add_source(environment.try_parsing(true))
            .build()?
            .try_deserialize()
    }
}
