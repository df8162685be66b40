use crate::config::constants::{env as env_keys, paths};
use crate::config::{AgentConfig, FileSearchConfig};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Main configuration structure for riskscope
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct RiskscopeConfig {
    /// Agent server endpoint and identity
    #[serde(default)]
    pub agent: AgentConfig,

    /// File Search service endpoint
    #[serde(default)]
    pub file_search: FileSearchConfig,
}

impl RiskscopeConfig {
    /// Write the default configuration to `workspace/riskscope.toml`.
    ///
    /// Returns the written path, or `None` when the file already exists and
    /// `force` is not set.
    pub fn bootstrap<P: AsRef<Path>>(workspace: P, force: bool) -> Result<Option<PathBuf>> {
        let config_path = workspace.as_ref().join(paths::CONFIG_FILE_NAME);
        if config_path.exists() && !force {
            return Ok(None);
        }
        Self::create_sample_config(&config_path)?;
        Ok(Some(config_path))
    }

    /// Create sample configuration file
    pub fn create_sample_config<P: AsRef<Path>>(output: P) -> Result<()> {
        let output = output.as_ref();
        let config_content = toml::to_string_pretty(&RiskscopeConfig::default())
            .context("Failed to serialize default configuration")?;

        fs::write(output, config_content)
            .with_context(|| format!("Failed to write config file: {}", output.display()))?;

        Ok(())
    }

    /// Apply overrides from a variable lookup (normally the process environment)
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(url) = non_empty(env_keys::API_URL) {
            debug!(%url, "agent base URL overridden from environment");
            self.agent.base_url = url;
        }
        if let Some(url) = non_empty(env_keys::FILE_SEARCH_URL) {
            debug!(%url, "file search URL overridden from environment");
            self.file_search.base_url = url;
        }
        if let Some(corpus) = non_empty(env_keys::DEFAULT_CORPUS) {
            self.agent.default_corpus = corpus;
        }
    }
}

/// Configuration manager for locating and loading `riskscope.toml`
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config: RiskscopeConfig,
    config_path: Option<PathBuf>,
}

impl ConfigManager {
    /// Load configuration from the default locations
    pub fn load() -> Result<Self> {
        Self::load_from_workspace(std::env::current_dir()?)
    }

    /// Load configuration for a workspace, then apply environment overrides
    pub fn load_from_workspace(workspace: impl AsRef<Path>) -> Result<Self> {
        let mut manager = Self::discover(workspace.as_ref())?;
        manager
            .config
            .apply_overrides(|key| std::env::var(key).ok());
        Ok(manager)
    }

    fn discover(workspace: &Path) -> Result<Self> {
        // Workspace root first, then the workspace dot-directory
        let candidates = [
            workspace.join(paths::CONFIG_FILE_NAME),
            workspace
                .join(paths::CONFIG_DIR_NAME)
                .join(paths::CONFIG_FILE_NAME),
        ];
        for candidate in candidates {
            if candidate.exists() {
                return Self::load_from_file(&candidate);
            }
        }

        if let Some(home_dir) = dirs::home_dir() {
            let home_config_path = home_dir
                .join(paths::CONFIG_DIR_NAME)
                .join(paths::CONFIG_FILE_NAME);
            if home_config_path.exists() {
                return Self::load_from_file(&home_config_path);
            }
        }

        debug!("no riskscope.toml found, using defaults");
        Ok(Self {
            config: RiskscopeConfig::default(),
            config_path: None,
        })
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: RiskscopeConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        debug!(path = %path.display(), "loaded configuration");
        Ok(Self {
            config,
            config_path: Some(path.to_path_buf()),
        })
    }

    /// Get the loaded configuration
    pub fn config(&self) -> &RiskscopeConfig {
        &self.config
    }

    /// Take ownership of the loaded configuration
    pub fn into_config(self) -> RiskscopeConfig {
        self.config
    }

    /// Get the configuration file path (if loaded from file)
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_workspace_file_takes_precedence() {
        let workspace = TempDir::new().unwrap();
        fs::write(
            workspace.path().join("riskscope.toml"),
            "[agent]\nbase_url = \"http://root:1\"\n",
        )
        .unwrap();
        fs::create_dir_all(workspace.path().join(".riskscope")).unwrap();
        fs::write(
            workspace.path().join(".riskscope").join("riskscope.toml"),
            "[agent]\nbase_url = \"http://dotdir:2\"\n",
        )
        .unwrap();

        let manager = ConfigManager::discover(workspace.path()).unwrap();
        assert_eq!(manager.config().agent.base_url, "http://root:1");
        assert_eq!(
            manager.config_path(),
            Some(workspace.path().join("riskscope.toml").as_path())
        );
    }

    #[test]
    fn test_dot_directory_fallback() {
        let workspace = TempDir::new().unwrap();
        fs::create_dir_all(workspace.path().join(".riskscope")).unwrap();
        fs::write(
            workspace.path().join(".riskscope").join("riskscope.toml"),
            "[file_search]\nbase_url = \"http://files:8081\"\n",
        )
        .unwrap();

        let manager = ConfigManager::discover(workspace.path()).unwrap();
        assert_eq!(manager.config().file_search.base_url, "http://files:8081");
        assert_eq!(manager.config().agent, AgentConfig::default());
    }

    #[test]
    fn test_invalid_toml_reports_path() {
        let workspace = TempDir::new().unwrap();
        let path = workspace.path().join("riskscope.toml");
        fs::write(&path, "[agent\nbase_url = 1").unwrap();

        let err = ConfigManager::load_from_file(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_overrides_ignore_blank_values() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("RISKSCOPE_API_URL", "http://override:8000"),
            ("RISKSCOPE_FILE_SEARCH_URL", "   "),
            ("RISKSCOPE_DEFAULT_CORPUS", "regulations"),
        ]);

        let mut config = RiskscopeConfig::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.agent.base_url, "http://override:8000");
        assert_eq!(config.file_search.base_url, "http://localhost:8080");
        assert_eq!(config.agent.default_corpus, "regulations");
    }

    #[test]
    fn test_bootstrap_respects_existing_file() {
        let workspace = TempDir::new().unwrap();
        let written = RiskscopeConfig::bootstrap(workspace.path(), false).unwrap();
        assert!(written.is_some());

        let again = RiskscopeConfig::bootstrap(workspace.path(), false).unwrap();
        assert!(again.is_none());

        let reloaded = ConfigManager::load_from_file(workspace.path().join("riskscope.toml"))
            .unwrap()
            .into_config();
        assert_eq!(reloaded, RiskscopeConfig::default());
    }
}
