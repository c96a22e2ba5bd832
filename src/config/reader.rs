/*!
 * TOML config reader
 *
 * Reads `InvocationConfig` from a file. A missing file means defaults; a
 * file that exists but does not parse is an error.
 */

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::types::InvocationConfig;
use crate::command::{CommandError, CommandResult};

pub struct ConfigReader {
    config_path: PathBuf,
}

impl ConfigReader {
    pub fn new(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
        }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn load_config(&self) -> CommandResult<InvocationConfig> {
        debug!("loading invocation config: {:?}", self.config_path);

        if !self.config_path.exists() {
            info!(
                "config file {} not found, using defaults",
                self.config_path.display()
            );
            return Ok(InvocationConfig::default());
        }

        let content = fs::read_to_string(&self.config_path).map_err(|e| {
            CommandError::ConfigLoad(format!(
                "{}: {}",
                self.config_path.display(),
                e
            ))
        })?;

        match parse_toml_content(&content) {
            Ok(config) => {
                info!(
                    "loaded invocation config (unknown_arguments={})",
                    config.unknown_arguments.as_str()
                );
                Ok(config)
            }
            Err(e) => {
                warn!(
                    "failed to parse {}: {}",
                    self.config_path.display(),
                    e
                );
                Err(e)
            }
        }
    }
}

pub fn parse_toml_content(content: &str) -> CommandResult<InvocationConfig> {
    Ok(toml::from_str::<InvocationConfig>(content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::UnknownArgumentPolicy;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let reader = ConfigReader::new(temp_dir.path().join("absent.toml"));

        let config = reader.load_config().unwrap();
        assert_eq!(config, InvocationConfig::default());
        assert_eq!(config.unknown_arguments, UnknownArgumentPolicy::PassThrough);
    }

    #[test]
    fn test_load_config_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("declcmd.toml");
        fs::write(&path, "unknown_arguments = \"warn\"\nlog_invocations = true\n").unwrap();

        let config = ConfigReader::new(&path).load_config().unwrap();
        assert_eq!(config.unknown_arguments, UnknownArgumentPolicy::Warn);
        assert!(config.log_invocations);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let config = parse_toml_content("unknown_arguments = \"reject\"").unwrap();
        assert_eq!(config.unknown_arguments, UnknownArgumentPolicy::Reject);
        assert!(!config.log_invocations);
    }

    #[test]
    fn test_malformed_file_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("declcmd.toml");
        fs::write(&path, "unknown_arguments = \"sometimes\"").unwrap();

        let err = ConfigReader::new(&path).load_config().unwrap_err();
        assert!(matches!(err, CommandError::Toml(_)));
    }

    #[test]
    fn test_unreadable_path_is_config_load_error() {
        let temp_dir = TempDir::new().unwrap();

        let err = ConfigReader::new(temp_dir.path()).load_config().unwrap_err();
        assert!(matches!(err, CommandError::ConfigLoad(_)));
    }
}
