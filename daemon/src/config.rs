//! Ledger configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use cbc_ledger::genesis::{DEFAULT_GENESIS_ACCOUNT, DEFAULT_SUPPLY_TOKENS};
use cbc_ledger::GenesisConfig;
use cbc_store_lmdb::DEFAULT_MAP_SIZE;
use cbc_types::{Account, TokenMetadata};
use cbc_utils::LogFormat;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(String),

    #[error("invalid token settings: {0}")]
    Token(String),
}

/// Configuration for the `cbc` tool.
///
/// Loaded from a TOML file via [`LedgerConfig::from_toml_file`]; every field
/// has a default so an empty file is valid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Directory holding the LMDB environment.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Maximum size of the LMDB map in bytes.
    #[serde(default = "default_map_size")]
    pub map_size: usize,

    #[serde(default)]
    pub log_format: LogFormat,

    /// Filter directive, e.g. "info" or "warn,cbc_ledger=debug".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub token: TokenConfig,
}

/// The `[token]` table: metadata and genesis allocation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenConfig {
    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default = "default_symbol")]
    pub symbol: String,

    #[serde(default = "default_decimals")]
    pub decimals: u8,

    /// Hex account id credited with the whole supply.
    #[serde(default = "default_owner")]
    pub owner: String,

    /// Supply in whole tokens.
    #[serde(default = "default_supply")]
    pub supply: u64,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./cbc_data")
}

fn default_map_size() -> usize {
    DEFAULT_MAP_SIZE
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_name() -> String {
    TokenMetadata::default().name
}

fn default_symbol() -> String {
    TokenMetadata::default().symbol
}

fn default_decimals() -> u8 {
    TokenMetadata::default().decimals
}

fn default_owner() -> String {
    Account::from(DEFAULT_GENESIS_ACCOUNT).to_hex()
}

fn default_supply() -> u64 {
    DEFAULT_SUPPLY_TOKENS
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            map_size: default_map_size(),
            log_format: LogFormat::default(),
            log_level: default_log_level(),
            token: TokenConfig::default(),
        }
    }
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            symbol: default_symbol(),
            decimals: default_decimals(),
            owner: default_owner(),
            supply: default_supply(),
        }
    }
}

impl LedgerConfig {
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

impl TokenConfig {
    /// Resolve the owner and scale the supply into a ledger genesis.
    pub fn genesis(&self) -> Result<GenesisConfig, ConfigError> {
        let owner = Account::from_hex(&self.owner)
            .map_err(|e| ConfigError::Token(format!("owner: {e}")))?;
        let metadata = TokenMetadata {
            name: self.name.clone(),
            symbol: self.symbol.clone(),
            decimals: self.decimals,
        };
        GenesisConfig::new(metadata, owner, self.supply)
            .map_err(|e| ConfigError::Token(e.to_string()))
    }
}
