//! Configuration management for the defikit toolkit
//!
//! Config is stored at ~/.config/defikit/config.toml

use crate::error::{DefikitError, DefikitResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Default RPC URL (devnet)
pub const DEFAULT_RPC_URL: &str = "https://api.devnet.solana.com";

/// Default cache freshness window for toolkit results
pub const DEFAULT_CACHE_TTL_SECS: u64 = 60;

/// Config directory name
const CONFIG_DIR: &str = "defikit";

/// Config file name
const CONFIG_FILE: &str = "config.toml";

/// defikit configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// RPC URL for balance/TPS queries
    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,

    /// Path to the wallet key file (Solana CLI JSON byte array)
    #[serde(default = "default_wallet_path")]
    pub wallet_path: PathBuf,

    /// CoinGecko API key (empty = use the keyless public tier)
    #[serde(default)]
    pub coingecko_api_key: String,

    /// Freshness window for cached toolkit results, in seconds
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_secs: u64,

    /// Per-tool capability flags
    #[serde(default)]
    pub tools: ToolCapabilities,
}

fn default_rpc_url() -> String {
    DEFAULT_RPC_URL.to_string()
}

fn default_wallet_path() -> PathBuf {
    PathBuf::from("wallet.json")
}

fn default_cache_ttl() -> u64 {
    DEFAULT_CACHE_TTL_SECS
}

fn default_true() -> bool {
    true
}

/// Which toolkit capabilities are enabled.
///
/// Built once at startup from config rather than detected at call time, so a
/// disabled capability fails fast with a "capability unavailable" result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCapabilities {
    #[serde(default = "default_true")]
    pub balance: bool,

    #[serde(default = "default_true")]
    pub tps: bool,

    /// CoinGecko trending-token discovery
    #[serde(default = "default_true")]
    pub coingecko: bool,

    /// CoinGecko price lookups
    #[serde(default = "default_true")]
    pub price: bool,

    /// RugCheck token safety reports
    #[serde(default = "default_true")]
    pub rugcheck: bool,

    /// DEX swap execution (no operation wired up yet; counted for parity)
    #[serde(default)]
    pub trade: bool,
}

impl Default for ToolCapabilities {
    fn default() -> Self {
        Self {
            balance: true,
            tps: true,
            coingecko: true,
            price: true,
            rugcheck: true,
            trade: false,
        }
    }
}

impl ToolCapabilities {
    /// Number of enabled capabilities
    pub fn enabled_count(&self) -> usize {
        [
            self.balance,
            self.tps,
            self.coingecko,
            self.price,
            self.rugcheck,
            self.trade,
        ]
        .iter()
        .filter(|&&enabled| enabled)
        .count()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rpc_url: default_rpc_url(),
            wallet_path: default_wallet_path(),
            coingecko_api_key: String::new(),
            cache_ttl_secs: default_cache_ttl(),
            tools: ToolCapabilities::default(),
        }
    }
}

impl Config {
    /// Get the config directory path (~/.config/defikit/)
    pub fn dir_path() -> DefikitResult<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join(CONFIG_DIR))
            .ok_or_else(|| {
                DefikitError::ConfigError("Could not determine config directory".into())
            })
    }

    /// Get the config file path (~/.config/defikit/config.toml)
    pub fn file_path() -> DefikitResult<PathBuf> {
        Self::dir_path().map(|p| p.join(CONFIG_FILE))
    }

    /// Check if config file exists
    pub fn exists() -> bool {
        Self::file_path().map(|p| p.exists()).unwrap_or(false)
    }

    /// Load config from file, returning defaults if file doesn't exist
    pub fn load() -> DefikitResult<Self> {
        let path = Self::file_path()?;

        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path).map_err(DefikitError::IoError)?;

        if contents.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = toml::from_str(&contents)
            .map_err(|e| DefikitError::ConfigError(format!("Failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Save config to file, creating directories if needed
    pub fn save(&self) -> DefikitResult<()> {
        let dir = Self::dir_path()?;
        let path = Self::file_path()?;

        if !dir.exists() {
            fs::create_dir_all(&dir).map_err(DefikitError::IoError)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| DefikitError::ConfigError(format!("Failed to serialize config: {}", e)))?;

        fs::write(&path, contents).map_err(DefikitError::IoError)?;

        Ok(())
    }

    /// Validate the config values
    pub fn validate(&self) -> DefikitResult<()> {
        if !self.rpc_url.starts_with("http://") && !self.rpc_url.starts_with("https://") {
            return Err(DefikitError::ConfigError(
                "RPC URL must start with http:// or https://".into(),
            ));
        }

        if self.wallet_path.as_os_str().is_empty() {
            return Err(DefikitError::ConfigError(
                "Wallet path must not be empty".into(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_capabilities_exclude_trade() {
        let caps = ToolCapabilities::default();
        assert!(caps.balance && caps.tps && caps.coingecko && caps.price && caps.rugcheck);
        assert!(!caps.trade);
        assert_eq!(caps.enabled_count(), 5);
    }

    #[test]
    fn config_parses_with_partial_tools_table() {
        let config: Config = toml::from_str(
            r#"
            rpc_url = "https://api.mainnet-beta.solana.com"

            [tools]
            rugcheck = false
            "#,
        )
        .unwrap();

        assert_eq!(config.rpc_url, "https://api.mainnet-beta.solana.com");
        assert_eq!(config.cache_ttl_secs, DEFAULT_CACHE_TTL_SECS);
        assert!(!config.tools.rugcheck);
        assert!(config.tools.balance);
    }

    #[test]
    fn validate_rejects_bad_rpc_url() {
        let config = Config {
            rpc_url: "ws://nope".into(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}
