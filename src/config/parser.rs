//! Configuration file parsing (HOCON format).

use std::path::Path;

use hocon::HoconLoader;

use crate::common::error::ConfigError;
use crate::config::types::Config;

/// Load configuration from a HOCON file.
pub fn load_config(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let path = path.as_ref();

    HoconLoader::new()
        .load_file(path)
        .map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            source: std::io::Error::new(std::io::ErrorKind::Other, e.to_string()),
        })?
        .resolve()
        .map_err(|e| ConfigError::ParseError {
            message: e.to_string(),
        })
}

/// Load configuration from a HOCON string.
pub fn load_config_str(content: &str) -> Result<Config, ConfigError> {
    HoconLoader::new()
        .load_str(content)
        .map_err(|e| ConfigError::ParseError {
            message: e.to_string(),
        })?
        .resolve()
        .map_err(|e| ConfigError::ParseError {
            message: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_minimal_config() {
        let config = load_config_str(
            r#"
            discord {
                token = "abc123"
                owner = 42
            }
            "#,
        )
        .unwrap();

        assert_eq!(config.discord.token, "abc123");
        assert_eq!(config.discord.owner, 42);
        assert!(config.announce.is_none());
        assert_eq!(config.footer(), "Herald Announcement");
    }

    #[test]
    fn test_load_full_config() {
        let config = load_config_str(
            r#"
            discord {
                token = "abc123"
                owner = 42
            }
            announce {
                footer = "Server News"
                send_usage_guide = false
            }
            "#,
        )
        .unwrap();

        assert_eq!(config.footer(), "Server News");
        assert!(!config.send_usage_guide());
    }

    #[test]
    fn test_garbage_fails() {
        assert!(load_config_str("discord { token").is_err());
    }
}
