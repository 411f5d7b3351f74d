use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Shortest description bound accepted from `TPOI_DESCRIPTION_MAX_CHARS`.
///
/// Below this the sentence-boundary rule has no room to find a period.
const MIN_DESCRIPTION_CHARS: usize = 100;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is present but its value is invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is present but its value is invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let env = parse_environment(&or_default("TPOI_ENV", "development"))?;
    let log_level = or_default("TPOI_LOG_LEVEL", "info");
    let sources_path = PathBuf::from(or_default("TPOI_SOURCES_PATH", "./config/sources.yaml"));
    let output_dir = PathBuf::from(or_default("TPOI_OUTPUT_DIR", "./output/processed"));

    let max_concurrent_pages = parse_usize("TPOI_MAX_CONCURRENT_PAGES", "4")?;
    if max_concurrent_pages == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "TPOI_MAX_CONCURRENT_PAGES".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    let description_max_chars = parse_usize("TPOI_DESCRIPTION_MAX_CHARS", "300")?;
    if description_max_chars < MIN_DESCRIPTION_CHARS {
        return Err(ConfigError::InvalidEnvVar {
            var: "TPOI_DESCRIPTION_MAX_CHARS".to_string(),
            reason: format!("must be at least {MIN_DESCRIPTION_CHARS}"),
        });
    }

    Ok(AppConfig {
        env,
        log_level,
        sources_path,
        output_dir,
        max_concurrent_pages,
        description_max_chars,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "TPOI_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
