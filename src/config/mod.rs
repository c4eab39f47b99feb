use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::api::ClientConfig;
use crate::error::{GaejeongError, Result};

const CONFIG_DIR_NAME: &str = ".gaejeong";
const CONFIG_FILE_NAME: &str = "config.yaml";

/// Environment variable that overrides `law.key`
pub const API_KEY_ENV: &str = "OC";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub law: LawConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LawConfig {
    /// OC credential issued by open.law.go.kr
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    /// Scheme and host of the DRF endpoints
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Per-request timeout in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,

    /// Statutes fetched at once while generating amendments
    #[serde(skip_serializing_if = "Option::is_none")]
    pub concurrency: Option<usize>,

    /// Statute kind filter for searches
    #[serde(skip_serializing_if = "Option::is_none")]
    pub knd: Option<String>,
}

impl Config {
    /// Get the configuration directory path
    pub fn config_path() -> Result<PathBuf> {
        let home_dir = dirs::home_dir()
            .ok_or_else(|| GaejeongError::Config("Could not determine home directory".to_string()))?;

        Ok(home_dir.join(CONFIG_DIR_NAME))
    }

    /// Get the configuration file full path
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_path()?.join(CONFIG_FILE_NAME))
    }

    /// Initialize configuration directory and file
    pub fn initialize() -> Result<()> {
        let config_dir = Self::config_path()?;

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)
                .map_err(|e| GaejeongError::Config(format!("Failed to create config directory: {}", e)))?;

            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                let permissions = fs::Permissions::from_mode(0o700);
                fs::set_permissions(&config_dir, permissions).map_err(|e| {
                    GaejeongError::Config(format!("Failed to set directory permissions: {}", e))
                })?;
            }
        }

        let config_file = Self::config_file_path()?;
        if !config_file.exists() {
            Self::default().write_to(&config_file)?;
        }

        Ok(())
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        Self::initialize()?;

        let config_file = Self::config_file_path()?;
        debug!("Loading configuration from {}", config_file.display());
        let contents = fs::read_to_string(&config_file)
            .map_err(|e| GaejeongError::Config(format!("Failed to read config file: {}", e)))?;

        Self::from_yaml(&contents)
    }

    /// Parse configuration from YAML text; an empty document is the default
    pub fn from_yaml(contents: &str) -> Result<Self> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(contents)
            .map_err(|e| GaejeongError::Config(format!("Failed to parse config file: {}", e)))
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        Self::initialize()?;
        self.write_to(&Self::config_file_path()?)
    }

    fn write_to(&self, config_file: &PathBuf) -> Result<()> {
        let yaml = serde_yaml::to_string(self)
            .map_err(|e| GaejeongError::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(config_file, yaml)
            .map_err(|e| GaejeongError::Config(format!("Failed to write config file: {}", e)))?;

        // Set file permissions to 0600 on Unix
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = fs::Permissions::from_mode(0o600);
            fs::set_permissions(config_file, permissions)
                .map_err(|e| GaejeongError::Config(format!("Failed to set file permissions: {}", e)))?;
        }

        Ok(())
    }

    /// API key, with the `OC` environment variable taking precedence
    pub fn api_key(&self) -> Option<String> {
        std::env::var(API_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| self.law.key.clone())
    }

    /// Statutes fetched at once while generating amendments
    pub fn concurrency(&self) -> usize {
        self.law.concurrency.unwrap_or(1).max(1)
    }

    /// Client configuration for the repository client; fails without an API key
    pub fn client_config(&self) -> Result<ClientConfig> {
        let api_key = self.api_key().ok_or(GaejeongError::NoApiKey)?;
        let defaults = ClientConfig::default();

        Ok(ClientConfig {
            api_key,
            base_url: self.law.base_url.clone().unwrap_or(defaults.base_url),
            timeout: self.law.timeout.unwrap_or(defaults.timeout),
            knd: self.law.knd.clone().unwrap_or(defaults.knd),
            user_agent: defaults.user_agent,
        })
    }

    /// Set a configuration value by key path (in memory)
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        let parse_number = |value: &str| {
            value
                .trim()
                .parse::<u64>()
                .map_err(|_| GaejeongError::Config(format!("{} must be a positive number", key)))
        };

        match key {
            "law.key" => self.law.key = Some(value.to_string()),
            "law.base_url" => self.law.base_url = Some(value.to_string()),
            "law.timeout" => self.law.timeout = Some(parse_number(value)?),
            "law.concurrency" => self.law.concurrency = Some(parse_number(value)? as usize),
            "law.knd" => self.law.knd = Some(value.to_string()),
            _ => {
                return Err(GaejeongError::Config(format!("Unknown configuration key: {}", key)));
            }
        }
        Ok(())
    }

    /// Set a configuration value by key path and persist it
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.set_value(key, value)?;
        self.save()
    }

    /// Get a configuration value by key path
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "law.key" => self.law.key.clone(),
            "law.base_url" => self.law.base_url.clone(),
            "law.timeout" => self.law.timeout.map(|v| v.to_string()),
            "law.concurrency" => self.law.concurrency.map(|v| v.to_string()),
            "law.knd" => self.law.knd.clone(),
            _ => None,
        }
    }
}
