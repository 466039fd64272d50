//! CLI configuration management.
//!
//! Defaults for algorithm selection, the BIP-44 coin type, address prefix and
//! logging. Stored as TOML under `~/.keyforge/config.toml`.

use keyforge_crypto::hd::COSMOS_COIN_TYPE;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Registry name used when `--algo` is not given
    pub default_algo: String,
    /// BIP-44 coin type used when neither `--path` nor `--coin-type` is given
    pub coin_type: u32,
    /// Human-readable prefix for bech32 addresses
    pub bech32_hrp: String,
    /// `EnvFilter` directive
    pub log_level: String,
    pub json_logs: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            default_algo: "secp256k1".to_string(),
            coin_type: COSMOS_COIN_TYPE,
            bech32_hrp: "cosmos".to_string(),
            log_level: "warn".to_string(),
            json_logs: false,
        }
    }
}

impl CliConfig {
    /// Load configuration from the default location, writing defaults on first use.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from `path`, writing defaults there if it does not exist.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            let config: CliConfig = toml::from_str(&contents)?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Get configuration file path.
    pub fn config_path() -> anyhow::Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find home directory"))?;
        Ok(home.join(".keyforge").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = CliConfig::default();
        assert_eq!(config.default_algo, "secp256k1");
        assert_eq!(config.coin_type, 118);
        assert_eq!(config.bech32_hrp, "cosmos");
        assert!(!config.json_logs);
    }

    #[test]
    fn test_missing_file_writes_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let config = CliConfig::load_from(&path).unwrap();
        assert_eq!(config, CliConfig::default());
        assert!(path.exists());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");

        let config = CliConfig {
            default_algo: "dilithium2".to_string(),
            coin_type: 529,
            bech32_hrp: "secret".to_string(),
            log_level: "debug".to_string(),
            json_logs: true,
        };
        config.save_to(&path).unwrap();

        let toml_str = std::fs::read_to_string(&path).unwrap();
        assert!(toml_str.contains("dilithium2"));
        assert!(toml_str.contains("529"));

        assert_eq!(CliConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "bech32_hrp = \"osmo\"\n").unwrap();

        let config = CliConfig::load_from(&path).unwrap();
        assert_eq!(config.bech32_hrp, "osmo");
        assert_eq!(config.default_algo, "secp256k1");
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "coin_type = \"not a number\"\n").unwrap();
        assert!(CliConfig::load_from(&path).is_err());
    }
}
