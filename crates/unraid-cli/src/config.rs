//! CLI configuration stored at `~/.unraidcli/config.yaml`.
//!
//! The file holds named server entries (URL plus API key), the name of the
//! default server, and an optional default output format. A missing file is
//! not an error; it reads as an empty configuration.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::CliError;

const CONFIG_DIR: &str = ".unraidcli";
const CONFIG_FILE: &str = "config.yaml";

/// Connection details for one server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerConfig {
    /// Base URL of the server, e.g. `http://tower.local`.
    pub url: String,
    /// API key sent with every request.
    pub api_key: String,
}

/// The full configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Name of the server used when `--server` is not given.
    #[serde(default)]
    pub default_server: String,
    /// Default output format (`table`, `json`, or `yaml`).
    #[serde(default)]
    pub output_format: String,
    /// Named servers, sorted by name.
    #[serde(default)]
    pub servers: BTreeMap<String, ServerConfig>,
}

impl Config {
    /// Load the configuration from the default path.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Config`] when the home directory cannot be
    /// determined or the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self, CliError> {
        Self::load_from(&config_path()?)
    }

    /// Load the configuration from `path`; a missing file yields defaults.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Config`] when the file cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self, CliError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .map_err(|e| CliError::Config(format!("failed to read {}: {e}", path.display())))?;
        let config: Self = serde_yaml::from_str(&text)
            .map_err(|e| CliError::Config(format!("failed to parse {}: {e}", path.display())))?;
        debug!(path = %path.display(), servers = config.servers.len(), "Loaded configuration");
        Ok(config)
    }

    /// Save the configuration to the default path.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Config`] when the home directory cannot be
    /// determined or the file cannot be written.
    pub fn save(&self) -> Result<(), CliError> {
        self.save_to(&config_path()?)
    }

    /// Save the configuration to `path`, creating parent directories.
    ///
    /// The file is written with mode 0600 on Unix since it holds API keys.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Config`] when the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<(), CliError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                CliError::Config(format!("failed to create {}: {e}", parent.display()))
            })?;
        }
        let text =
            serde_yaml::to_string(self).map_err(|e| CliError::Config(e.to_string()))?;
        std::fs::write(path, text)
            .map_err(|e| CliError::Config(format!("failed to write {}: {e}", path.display())))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
                .map_err(|e| CliError::Config(e.to_string()))?;
        }

        Ok(())
    }

    /// Look up a server by name, falling back to the default server.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Config`] when no server matches, with a hint to
    /// run `unraidcli config set`.
    pub fn server(&self, name: Option<&str>) -> Result<(&str, &ServerConfig), CliError> {
        let name = match name {
            Some(n) => n,
            None if !self.default_server.is_empty() => self.default_server.as_str(),
            None => {
                return Err(CliError::Config(
                    "no default server configured. Run 'unraidcli config set' to add one".into(),
                ))
            }
        };

        self.servers
            .get_key_value(name)
            .map(|(k, v)| (k.as_str(), v))
            .ok_or_else(|| {
                CliError::Config(format!(
                    "server '{name}' not found. Run 'unraidcli config set' to add it"
                ))
            })
    }

    /// Add or update a server entry.
    ///
    /// The first server ever added becomes the default.
    pub fn set_server(&mut self, name: &str, url: String, api_key: String) {
        self.servers
            .insert(name.to_string(), ServerConfig { url, api_key });
        if self.default_server.is_empty() {
            self.default_server = name.to_string();
        }
    }

    /// Remove a server entry.
    ///
    /// When the removed server was the default, the first remaining server
    /// takes over as default.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Config`] when the server does not exist.
    pub fn remove_server(&mut self, name: &str) -> Result<(), CliError> {
        if self.servers.remove(name).is_none() {
            return Err(CliError::Config(format!("server '{name}' not found")));
        }
        if self.default_server == name {
            self.default_server = self
                .servers
                .keys()
                .next()
                .cloned()
                .unwrap_or_default();
        }
        Ok(())
    }

    /// Make an existing server the default.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Config`] when the server does not exist.
    pub fn set_default(&mut self, name: &str) -> Result<(), CliError> {
        if !self.servers.contains_key(name) {
            return Err(CliError::Config(format!("server '{name}' not found")));
        }
        self.default_server = name.to_string();
        Ok(())
    }
}

fn config_path() -> Result<PathBuf, CliError> {
    let home = dirs::home_dir()
        .ok_or_else(|| CliError::Config("could not determine home directory".into()))?;
    Ok(home.join(CONFIG_DIR).join(CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.yaml")).unwrap();
        assert!(config.servers.is_empty());
        assert!(config.default_server.is_empty());
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.yaml");

        let mut config = Config::default();
        config.set_server("tower", "http://tower.local".into(), "key-1".into());
        config.output_format = "json".into();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.default_server, "tower");
        assert_eq!(loaded.output_format, "json");
        assert_eq!(loaded.servers["tower"].url, "http://tower.local");
        assert_eq!(loaded.servers["tower"].api_key, "key-1");
    }

    #[cfg(unix)]
    #[test]
    fn saved_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        Config::default().save_to(&path).unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn first_server_becomes_default() {
        let mut config = Config::default();
        config.set_server("tower", "http://tower".into(), "k1".into());
        config.set_server("backup", "http://backup".into(), "k2".into());
        assert_eq!(config.default_server, "tower");
    }

    #[test]
    fn removing_default_reassigns_it() {
        let mut config = Config::default();
        config.set_server("tower", "http://tower".into(), "k1".into());
        config.set_server("backup", "http://backup".into(), "k2".into());

        config.remove_server("tower").unwrap();
        assert_eq!(config.default_server, "backup");

        config.remove_server("backup").unwrap();
        assert!(config.default_server.is_empty());
    }

    #[test]
    fn missing_server_lookup_hints_at_config_set() {
        let config = Config::default();
        let err = config.server(None).unwrap_err();
        assert!(err.to_string().contains("unraidcli config set"));

        let err = config.server(Some("nope")).unwrap_err();
        assert!(err.to_string().contains("'nope' not found"));
    }

    #[test]
    fn explicit_server_overrides_default() {
        let mut config = Config::default();
        config.set_server("tower", "http://tower".into(), "k1".into());
        config.set_server("backup", "http://backup".into(), "k2".into());

        let (name, server) = config.server(Some("backup")).unwrap();
        assert_eq!(name, "backup");
        assert_eq!(server.url, "http://backup");

        let (name, _) = config.server(None).unwrap();
        assert_eq!(name, "tower");
    }

    #[test]
    fn set_default_requires_existing_server() {
        let mut config = Config::default();
        config.set_server("tower", "http://tower".into(), "k1".into());

        assert!(config.set_default("nope").is_err());
        config.set_default("tower").unwrap();
        assert_eq!(config.default_server, "tower");
    }
}
