//! Configuration types for papr-lens

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_CLIENT_FEE_BIPS, PAPR_DECIMALS};
use crate::Error;

/// API server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Bind address (e.g., "127.0.0.1")
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// API server port
    #[serde(default = "default_api_port")]
    pub port: u16,
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_api_port() -> u16 {
    19054
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_api_port(),
        }
    }
}

/// Protocol-wide parameters used by the calculators
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaprConfig {
    /// Client fee applied to swaps when a loan carries no override
    #[serde(default = "default_client_fee_bips")]
    pub default_client_fee_bips: u32,

    /// Decimals of the debt token
    #[serde(default = "default_debt_token_decimals")]
    pub debt_token_decimals: u8,
}

fn default_client_fee_bips() -> u32 {
    DEFAULT_CLIENT_FEE_BIPS
}

fn default_debt_token_decimals() -> u8 {
    PAPR_DECIMALS
}

impl Default for PaprConfig {
    fn default() -> Self {
        Self {
            default_client_fee_bips: default_client_fee_bips(),
            debt_token_decimals: default_debt_token_decimals(),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub papr: PaprConfig,
}

impl AppConfig {
    /// Parse a JSON config document; missing sections fall back to defaults.
    pub fn from_json_str(raw: &str) -> Result<Self, Error> {
        serde_json::from_str(raw).map_err(|e| Error::Config(e.to_string()))
    }
}
