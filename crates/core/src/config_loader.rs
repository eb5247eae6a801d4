use crate::config::EngineConfig;
use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Json, Toml},
    Figment,
};
use std::path::Path;

/// Default configuration file, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config/Engine.toml";

/// Prefix for environment overrides, e.g. `SMART_MONEY_PATTERN__WINDOW_SIZE=10`.
pub const ENV_PREFIX: &str = "SMART_MONEY_";

pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads engine configuration by layering TOML, JSON, and environment
    /// variables over the serde defaults, then validates the result.
    ///
    /// Missing files are skipped. Tables given in a file replace the default
    /// table wholesale rather than merging entry by entry.
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be parsed or the merged config is invalid.
    pub fn load() -> Result<EngineConfig> {
        Self::load_from(DEFAULT_CONFIG_PATH)
    }

    /// Loads engine configuration from an explicit TOML path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be parsed or the merged config is invalid.
    pub fn load_from(path: impl AsRef<Path>) -> Result<EngineConfig> {
        let path = path.as_ref();
        let config: EngineConfig = Self::base(path)
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .with_context(|| format!("failed to load config from {}", path.display()))?;

        Self::finish(config)
    }

    /// Loads engine configuration with a profile overlay
    /// (`config/Engine.{profile}.toml`).
    ///
    /// # Errors
    ///
    /// Returns an error if configuration files cannot be read or parsed.
    pub fn load_with_profile(profile: &str) -> Result<EngineConfig> {
        let config: EngineConfig = Self::base(Path::new(DEFAULT_CONFIG_PATH))
            .merge(Toml::file(format!("config/Engine.{profile}.toml")))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .with_context(|| format!("failed to load config profile '{profile}'"))?;

        Self::finish(config)
    }

    fn base(path: &Path) -> Figment {
        Figment::new()
            .merge(Toml::file(path))
            .join(Json::file(path.with_extension("json")))
    }

    fn finish(config: EngineConfig) -> Result<EngineConfig> {
        config.validate()?;
        tracing::debug!(
            window = config.pattern.window_size,
            horizon = config.outcomes.horizon_days,
            tolerance = config.outcomes.tolerance,
            "engine config loaded"
        );
        Ok(config)
    }
}
