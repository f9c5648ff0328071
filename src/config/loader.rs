//! Configuration loading from disk and the environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::ToadConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value '{value}' for environment variable {var}")]
    Env { var: &'static str, value: String },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load configuration: optional TOML file, then environment overrides, then
/// validation.
///
/// `env` looks up a variable by name; pass `|k| std::env::var(k).ok()` in
/// production.
pub fn load_config<F>(path: Option<&Path>, env: F) -> Result<ToadConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            toml::from_str(&content)?
        }
        None => ToadConfig::default(),
    };

    apply_env_overrides(&mut config, env)?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Overlay the store and host settings taken from the environment.
///
/// Empty variables are treated as unset.
pub fn apply_env_overrides<F>(config: &mut ToadConfig, env: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let lookup = |var: &str| env(var).filter(|value| !value.is_empty());

    if let Some(host) = lookup("REDIS_HOST") {
        config.store.host = host;
    }
    if let Some(port) = lookup("REDIS_PORT") {
        config.store.port = port.parse().map_err(|_| ConfigError::Env {
            var: "REDIS_PORT",
            value: port.clone(),
        })?;
    }
    if let Some(password) = lookup("REDIS_PASSWORD") {
        config.store.password = Some(password);
    }
    if let Some(db) = lookup("REDIS_DB") {
        config.store.db = db.parse().map_err(|_| ConfigError::Env {
            var: "REDIS_DB",
            value: db.clone(),
        })?;
    }
    if let Some(name) = lookup("TOAD_HOSTNAME") {
        config.host.name = Some(name);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    fn temp_config(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("toad-{}-{}.toml", name, std::process::id()));
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_defaults_without_file() {
        let config = load_config(None, env_from(&[])).unwrap();
        assert_eq!(config.store.host, "127.0.0.1");
        assert_eq!(config.store.password, None);
    }

    #[test]
    fn test_env_overrides_store() {
        let config = load_config(
            None,
            env_from(&[
                ("REDIS_HOST", "redis.internal"),
                ("REDIS_PORT", "6380"),
                ("REDIS_PASSWORD", "secret"),
                ("REDIS_DB", "2"),
                ("TOAD_HOSTNAME", "web-7"),
            ]),
        )
        .unwrap();

        assert_eq!(config.store.host, "redis.internal");
        assert_eq!(config.store.port, 6380);
        assert_eq!(config.store.password.as_deref(), Some("secret"));
        assert_eq!(config.store.db, 2);
        assert_eq!(config.host.resolve(), "web-7");
    }

    #[test]
    fn test_empty_env_values_ignored() {
        let config = load_config(None, env_from(&[("REDIS_HOST", ""), ("REDIS_PASSWORD", "")])).unwrap();
        assert_eq!(config.store.host, "127.0.0.1");
        assert_eq!(config.store.password, None);
    }

    #[test]
    fn test_bad_env_port() {
        let err = load_config(None, env_from(&[("REDIS_PORT", "http")])).unwrap_err();
        assert!(matches!(err, ConfigError::Env { var: "REDIS_PORT", .. }));
    }

    #[test]
    fn test_file_then_env() {
        let path = temp_config(
            "file-then-env",
            r#"
            [store]
            host = "from-file"
            port = 7000

            [keys]
            prefix = "canary"
            "#,
        );

        let config = load_config(Some(path.as_path()), env_from(&[("REDIS_HOST", "from-env")])).unwrap();
        fs::remove_file(&path).unwrap_or_default();

        assert_eq!(config.store.host, "from-env");
        assert_eq!(config.store.port, 7000);
        assert_eq!(config.keys.prefix, "canary");
    }

    #[test]
    fn test_invalid_file_reports_validation() {
        let path = temp_config("invalid", "[timeouts]\nrequest_secs = 0\n");

        let err = load_config(Some(path.as_path()), env_from(&[])).unwrap_err();
        fs::remove_file(&path).unwrap_or_default();

        match err {
            ConfigError::Validation(errors) => assert_eq!(errors[0].field, "timeouts.request_secs"),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Some(Path::new("/nonexistent/toad.toml")), env_from(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
