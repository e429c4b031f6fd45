//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::ClientConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<ClientConfig, ConfigError> {
    let config: ClientConfig = toml::from_str(content).map_err(ConfigError::Parse)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<ClientConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config = parse_config(&content)?;

    tracing::info!(
        path = %path.display(),
        rpc_url = %config.rpc.url,
        chain_id = config.chain.chain_id,
        "Configuration loaded"
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("appchain-client-{}.toml", std::process::id()));
        fs::write(
            &path,
            "[chain]\nchain_id = 7\n\n[confirmation]\nmax_attempts = 3\npoll_interval_ms = 10\n",
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(config.chain.chain_id, 7);
        assert_eq!(config.confirmation.max_attempts, 3);
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Path::new("/nonexistent/appchain.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(parse_config("[rpc"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_validation_error_display() {
        let err = parse_config("[confirmation]\nmax_attempts = 0\n").unwrap_err();
        assert!(err
            .to_string()
            .contains("confirmation.max_attempts: must be greater than 0"));
    }
}
