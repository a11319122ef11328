use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::{fmt, fs, path::Path, str::FromStr, time::Duration};

use crate::{
    constant::{
        DEFAULT_APP_ICON, DEFAULT_APP_NAME, DEFAULT_APP_URI, DEFAULT_MAX_RPC_RETRIES,
        DEFAULT_POLL_INTERVAL_MS, DEFAULT_POST_SIGN_QUIESCENCE_MS, DEFAULT_RETRY_BACKOFF_MS,
        DEFAULT_RPC_TIMEOUT_SECS, DEVNET_RPC_URL, MAINNET_RPC_URL,
    },
    error::SolsendError,
    sanitize_error,
};

/// Cluster the session talks to. Devnet is the test network, mainnet the
/// production one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    #[default]
    Devnet,
    Mainnet,
}

impl Network {
    /// Cluster name as wallets expect it in an authorization request.
    pub fn cluster(&self) -> &'static str {
        match self {
            Network::Devnet => "devnet",
            Network::Mainnet => "mainnet-beta",
        }
    }

    pub fn is_test(&self) -> bool {
        matches!(self, Network::Devnet)
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Network::Devnet => write!(f, "devnet"),
            Network::Mainnet => write!(f, "mainnet"),
        }
    }
}

impl FromStr for Network {
    type Err = SolsendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "devnet" | "test" => Ok(Network::Devnet),
            "mainnet" | "mainnet-beta" | "production" => Ok(Network::Mainnet),
            other => Err(SolsendError::ConfigError(format!("Unknown network: {other}"))),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub network: NetworkConfig,
    #[serde(default)]
    pub app_identity: AppIdentity,
    #[serde(default)]
    pub submission: SubmissionConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    pub default: Network,
    pub devnet_rpc_url: String,
    pub mainnet_rpc_url: String,
    pub rpc_timeout_secs: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            default: Network::default(),
            devnet_rpc_url: DEVNET_RPC_URL.to_string(),
            mainnet_rpc_url: MAINNET_RPC_URL.to_string(),
            rpc_timeout_secs: DEFAULT_RPC_TIMEOUT_SECS,
        }
    }
}

impl NetworkConfig {
    pub fn rpc_url(&self, network: Network) -> &str {
        match network {
            Network::Devnet => &self.devnet_rpc_url,
            Network::Mainnet => &self.mainnet_rpc_url,
        }
    }

    pub fn rpc_timeout(&self) -> Duration {
        Duration::from_secs(self.rpc_timeout_secs)
    }
}

/// Identity the wallet shows the user when asked to authorize this app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppIdentity {
    pub name: String,
    pub uri: String,
    pub icon: String,
}

impl Default for AppIdentity {
    fn default() -> Self {
        Self {
            name: DEFAULT_APP_NAME.to_string(),
            uri: DEFAULT_APP_URI.to_string(),
            icon: DEFAULT_APP_ICON.to_string(),
        }
    }
}

/// Timing knobs for the broadcast engine. The defaults were tuned against
/// Phantom; other wallets may settle faster or slower after the hand-off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmissionConfig {
    pub post_sign_quiescence_ms: u64,
    pub retry_backoff_ms: u64,
    pub max_rpc_retries: usize,
    pub poll_interval_ms: u64,
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            post_sign_quiescence_ms: DEFAULT_POST_SIGN_QUIESCENCE_MS,
            retry_backoff_ms: DEFAULT_RETRY_BACKOFF_MS,
            max_rpc_retries: DEFAULT_MAX_RPC_RETRIES,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl Config {
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, SolsendError> {
        let contents = fs::read_to_string(path).map_err(|e| {
            SolsendError::ConfigError(format!("Failed to read config file: {}", sanitize_error!(e)))
        })?;

        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Config, SolsendError> {
        let config: Config = toml::from_str(contents).map_err(|e| {
            SolsendError::ConfigError(format!(
                "Failed to parse config file: {}",
                sanitize_error!(e)
            ))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Loads `path` when it exists, otherwise falls back to the defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Config, SolsendError> {
        if path.as_ref().exists() {
            Self::load_config(path)
        } else {
            log::debug!("No config file at {}, using defaults", path.as_ref().display());
            Ok(Config::default())
        }
    }

    pub fn validate(&self) -> Result<(), SolsendError> {
        if self.app_identity.name.trim().is_empty() {
            return Err(SolsendError::ConfigError("app_identity.name cannot be empty".to_string()));
        }

        for (name, url) in [
            ("devnet_rpc_url", &self.network.devnet_rpc_url),
            ("mainnet_rpc_url", &self.network.mainnet_rpc_url),
        ] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(SolsendError::ConfigError(format!(
                    "network.{name} must be an http(s) url, got {}",
                    sanitize_error!(url)
                )));
            }
        }

        if self.network.rpc_timeout_secs == 0 {
            return Err(SolsendError::ConfigError(
                "network.rpc_timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.submission.poll_interval_ms == 0 {
            return Err(SolsendError::ConfigError(
                "submission.poll_interval_ms must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
