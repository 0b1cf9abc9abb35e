use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use std::path::Path;

use super::{types::Config, ConfigError};

/// Prefix for environment overrides, e.g. `ODFMIGRATE_CONVERTER__TIMEOUT_SECS=60`
const ENV_PREFIX: &str = "ODFMIGRATE_";

fn base() -> Figment {
    Figment::from(Serialized::defaults(Config::default()))
}

fn env() -> Env {
    Env::prefixed(ENV_PREFIX).split("__")
}

/// Load configuration from file with environment variable overrides
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }

    let config: Config = base()
        .merge(Toml::file(path))
        .merge(env())
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))?;

    Ok(config)
}

/// Load defaults with environment variable overrides, no file
pub fn load_config_from_env() -> Result<Config, ConfigError> {
    base()
        .merge(env())
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))
}

/// Load configuration from TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}
