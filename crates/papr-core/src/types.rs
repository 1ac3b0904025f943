//! Core type definitions for papr-lens

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ProtocolError;

/// Fixed-point token amount in the smallest unit (wei-style)
pub type Amount = u128;

/// Unix timestamp in seconds
pub type Timestamp = u64;

/// EVM contract or account address (0x-prefixed, 20 bytes hex-encoded)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(pub String);

impl Address {
    pub fn new(addr: impl Into<String>) -> Self {
        Self(addr.into())
    }

    /// Parse and normalize an address to lowercase hex.
    pub fn parse(addr: &str) -> Result<Self, ProtocolError> {
        let invalid = || ProtocolError::InvalidAddress {
            address: addr.to_string(),
        };
        let body = addr.strip_prefix("0x").ok_or_else(invalid)?;
        let bytes = hex::decode(body).map_err(|_| invalid())?;
        if bytes.len() != 20 {
            return Err(invalid());
        }
        Ok(Self(format!("0x{}", hex::encode(bytes))))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parse a decimal string (subgraph BigInt encoding) into an amount.
pub fn parse_amount(value: &str) -> Result<Amount, ProtocolError> {
    let trimmed = value.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ProtocolError::InvalidAmount {
            message: format!("'{}' is not a non-negative integer", value),
        });
    }
    trimmed
        .parse::<Amount>()
        .map_err(|e| ProtocolError::InvalidAmount {
            message: format!("'{}': {}", value, e),
        })
}

/// Current wall-clock time as a unix timestamp.
pub fn unix_now() -> Timestamp {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Constants
pub mod constants {
    /// Decimals of the papr debt token
    pub const PAPR_DECIMALS: u8 = 18;

    /// Basis points in 100%
    pub const BIPS_DENOMINATOR: u128 = 10_000;

    /// Client fee on swaps when a loan carries no override (0.3%)
    pub const DEFAULT_CLIENT_FEE_BIPS: u32 = 30;

    /// Seconds in a day
    pub const SECONDS_PER_DAY: u64 = 86_400;

    /// Largest decimal scale whose power of ten fits in a u128
    pub const MAX_DECIMALS: u8 = 38;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_parse_normalizes() {
        let addr = Address::parse("0xB7C5B0B5A3D1F9AE3D2C0F7D1A0E6B6C7F8E9D0A").unwrap();
        assert_eq!(addr.as_str(), "0xb7c5b0b5a3d1f9ae3d2c0f7d1a0e6b6c7f8e9d0a");
    }

    #[test]
    fn test_address_parse_rejects_bad_input() {
        assert!(Address::parse("b7c5b0b5a3d1f9ae3d2c0f7d1a0e6b6c7f8e9d0a").is_err());
        assert!(Address::parse("0x1234").is_err());
        assert!(Address::parse("0xzz c5b0b5a3d1f9ae3d2c0f7d1a0e6b6c7f8e9d0").is_err());
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("0").unwrap(), 0);
        assert_eq!(
            parse_amount("1000000000000000000000").unwrap(),
            1_000_000_000_000_000_000_000
        );
        assert!(parse_amount("-5").is_err());
        assert!(parse_amount("1.5").is_err());
        assert!(parse_amount("").is_err());
    }
}
