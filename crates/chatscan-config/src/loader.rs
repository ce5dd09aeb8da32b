//! Configuration loader.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::schema::Config;

/// Configuration loader with environment variable substitution.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        let content = fs::read_to_string(path)?;
        Self::load_str(&content)
    }

    /// Load configuration from a file, or use defaults if it does not exist.
    pub fn load_or_default(path: &Path) -> Result<Config, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Config::default())
        }
    }

    /// Load configuration from a string.
    pub fn load_str(content: &str) -> Result<Config, ConfigError> {
        let expanded = Self::expand_env_vars(content)?;
        let mut config: Config = toml::from_str(&expanded)?;
        if let Some(dir) = &config.logging.log_dir {
            let expanded = Self::expand_path(&dir.to_string_lossy());
            config.logging.log_dir = Some(PathBuf::from(expanded));
        }
        Ok(config)
    }

    /// Expand environment variables in the format `${VAR}`.
    fn expand_env_vars(content: &str) -> Result<String, ConfigError> {
        let mut result = content.to_string();
        let re = regex::Regex::new(r"\$\{([^}]+)\}")
            .map_err(|e| ConfigError::InvalidFormat(e.to_string()))?;

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let var_value = std::env::var(var_name)
                .map_err(|_| ConfigError::EnvVarNotSet(var_name.to_string()))?;
            result = result.replace(&cap[0], &var_value);
        }

        Ok(result)
    }

    /// Expand shell-style paths (e.g., `~/.chatscan`).
    pub fn expand_path(path: &str) -> String {
        shellexpand::tilde(path).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_empty_config() {
        let config = ConfigLoader::load_str("").unwrap();
        assert_eq!(config.scan.target, 50);
    }

    #[test]
    fn test_load_full_config() {
        let content = r#"
            [scan]
            limit = false
            target = 120
            stabilization_ratio = 0.95
            max_iterations = 500
            call_timeout_secs = 15

            [logging]
            level = "debug"
            log_dir = "/tmp/chatscan-logs"
            json = true
        "#;
        let config = ConfigLoader::load_str(content).unwrap();
        assert!(!config.scan.limit);
        assert_eq!(config.scan.target, 120);
        assert_eq!(config.scan.stabilization_ratio, 0.95);
        assert_eq!(config.scan.max_iterations, 500);
        assert_eq!(config.scan.call_timeout_secs, Some(15));
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.log_dir, Some(PathBuf::from("/tmp/chatscan-logs")));
        assert!(config.logging.json);
    }

    #[test]
    fn test_log_dir_tilde_is_expanded() {
        let config = ConfigLoader::load_str("[logging]\nlog_dir = \"~/logs\"\n").unwrap();
        let dir = config.logging.log_dir.unwrap();
        assert!(!dir.to_string_lossy().starts_with('~'));
        assert!(dir.ends_with("logs"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[scan]").unwrap();
        writeln!(file, "target = 5").unwrap();

        let config = ConfigLoader::load(file.path()).unwrap();
        assert_eq!(config.scan.target, 5);
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = ConfigLoader::load(Path::new("/nonexistent/path/chatscan.toml"));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config =
            ConfigLoader::load_or_default(Path::new("/nonexistent/path/chatscan.toml")).unwrap();
        assert_eq!(config.scan.max_iterations, 200);
    }

    #[test]
    fn test_load_invalid_toml() {
        let result = ConfigLoader::load_str("target = [unclosed");
        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn test_wrong_value_type() {
        let result = ConfigLoader::load_str("[scan]\ntarget = \"many\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_expand_env_vars() {
        // SAFETY: This test runs in isolation and sets a unique test-only env var
        unsafe {
            std::env::set_var("CHATSCAN_TEST_TARGET", "7");
        }
        let config = ConfigLoader::load_str("[scan]\ntarget = ${CHATSCAN_TEST_TARGET}\n").unwrap();
        assert_eq!(config.scan.target, 7);
        unsafe {
            std::env::remove_var("CHATSCAN_TEST_TARGET");
        }
    }

    #[test]
    fn test_expand_env_vars_not_set() {
        let content = "value = \"${NONEXISTENT_TEST_VAR_12345}\"";
        let result = ConfigLoader::expand_env_vars(content);
        assert!(matches!(result, Err(ConfigError::EnvVarNotSet(_))));
    }

    #[test]
    fn test_expand_env_vars_no_vars() {
        let content = "value = \"no variables here\"";
        let expanded = ConfigLoader::expand_env_vars(content).unwrap();
        assert_eq!(expanded, content);
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let expanded = ConfigLoader::expand_path("~/test");
        assert!(!expanded.starts_with('~'));
        assert!(expanded.ends_with("/test"));
    }

    #[test]
    fn test_expand_path_no_tilde() {
        let path = "/usr/local/bin";
        assert_eq!(ConfigLoader::expand_path(path), path);
    }
}
