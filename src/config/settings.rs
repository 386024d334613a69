use anyhow::Result;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Settings {
    #[serde(default)]
    pub menu: MenuConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct MenuConfig {
    /// How long a resolved menu tree stays cached, in seconds.
    pub cache_ttl_seconds: u64,
    /// Safety cap on tree depth.
    pub max_depth: usize,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            cache_ttl_seconds: 60 * 60,
            max_depth: 64,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info,storefront_cms=debug".to_string(),
        }
    }
}

impl Settings {
    /// Load `config/settings.toml` (if present) layered with `APP__` prefixed
    /// environment overrides, e.g. `APP__MENU__MAX_DEPTH=32`.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let config = Config::builder()
            .add_source(File::with_name("config/settings").required(false))
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings: Settings = config.try_deserialize()?;
        Ok(settings)
    }
}
