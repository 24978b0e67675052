//! Configuration file discovery and loading.

use crate::config::schema::Config;
use crate::error::Result;
use crate::store::resolve_data_dir;
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the user configuration inside the data directory.
pub const CONFIG_FILE: &str = "config.yaml";

/// A parsed configuration file together with where it came from.
#[derive(Debug, Clone)]
pub struct ConfigSource {
    /// Path to the configuration file.
    pub path: PathBuf,
    /// Parsed configuration.
    pub config: Config,
}

/// Loads configuration files.
///
/// # Examples
///
/// ```no_run
/// use groundbook::config::ConfigLoader;
/// use std::path::Path;
///
/// if let Some(source) = ConfigLoader::load_user_config(Some(Path::new("/srv/gb"))).unwrap() {
///     println!("loaded {}", source.path.display());
/// }
/// ```
pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads `<data_dir>/config.yaml` if it exists.
    ///
    /// Without `data_dir` the directory is resolved from
    /// `GROUNDBOOK_DATA_DIR` or the home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_user_config(data_dir: Option<&Path>) -> Result<Option<ConfigSource>> {
        let config_path = match data_dir {
            Some(dir) => dir.join(CONFIG_FILE),
            None => resolve_data_dir()?.join(CONFIG_FILE),
        };

        if !config_path.exists() {
            log::debug!("No configuration file at {}", config_path.display());
            return Ok(None);
        }

        let config = Self::load_file(&config_path)?;
        log::debug!("Loaded configuration from {}", config_path.display());
        Ok(Some(ConfigSource {
            path: config_path,
            config,
        }))
    }

    /// Load and parse a YAML configuration file.
    ///
    /// An empty file yields the default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the YAML is invalid.
    pub fn load_file(path: &Path) -> Result<Config> {
        let contents = fs::read_to_string(path)?;
        if contents.trim().is_empty() {
            return Ok(Config::default());
        }
        Ok(serde_yaml::from_str(&contents)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use crate::ErrorKind;
    use tempfile::TempDir;

    #[test]
    fn test_load_nonexistent_file() {
        let err = ConfigLoader::load_file(Path::new("/nonexistent/path/config.yaml")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::StoreFailure);
    }

    #[test]
    fn test_load_invalid_yaml() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("bad.yaml");
        fs::write(&config_path, "invalid: yaml: syntax:").unwrap();

        let err = ConfigLoader::load_file(&config_path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_load_empty_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join(CONFIG_FILE);
        fs::write(&config_path, "\n").unwrap();
        assert_eq!(ConfigLoader::load_file(&config_path).unwrap(), Config::default());
    }

    #[test]
    fn test_load_user_config() {
        let temp_dir = TempDir::new().unwrap();
        assert!(ConfigLoader::load_user_config(Some(temp_dir.path()))
            .unwrap()
            .is_none());

        fs::write(temp_dir.path().join(CONFIG_FILE), "output_format: json\n").unwrap();
        let source = ConfigLoader::load_user_config(Some(temp_dir.path()))
            .unwrap()
            .unwrap();
        assert_eq!(source.path, temp_dir.path().join(CONFIG_FILE));
        assert_eq!(source.config.output_format, Some(OutputFormat::Json));
    }
}
