//! Error types for papr-lens

use thiserror::Error;

/// Core errors that can occur in papr-lens
#[derive(Debug, Error)]
pub enum Error {
    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Protocol-level errors surfaced by the decision core.
///
/// Input validation failures map to 400, data-integrity faults in indexer
/// snapshots map to 422, and missing upstream data maps to 503.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("Invalid amount: {message}")]
    InvalidAmount { message: String },

    #[error("Invalid address: {address}")]
    InvalidAddress { address: String },

    #[error("Max debt must be positive")]
    NonPositiveMaxDebt,

    #[error("Unsupported decimals: {decimals} (max {max})")]
    UnsupportedDecimals { decimals: u8, max: u8 },

    #[error("Client fee {bips} bips exceeds {max} bips")]
    FeeBipsOutOfRange { bips: u32, max: u32 },

    #[error("Data integrity fault: {reason}")]
    DataIntegrity { reason: String },

    #[error("Upstream data unavailable: {reason}")]
    StateUnavailable { reason: String },
}

/// Result type alias for papr-lens operations
pub type Result<T> = std::result::Result<T, Error>;

impl ProtocolError {
    /// Get an HTTP-friendly error code
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidAmount { .. } => "invalid_amount",
            Self::InvalidAddress { .. } => "invalid_address",
            Self::NonPositiveMaxDebt => "non_positive_max_debt",
            Self::UnsupportedDecimals { .. } => "unsupported_decimals",
            Self::FeeBipsOutOfRange { .. } => "fee_bips_out_of_range",
            Self::DataIntegrity { .. } => "data_integrity",
            Self::StateUnavailable { .. } => "state_unavailable",
        }
    }

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidAmount { .. }
            | Self::InvalidAddress { .. }
            | Self::NonPositiveMaxDebt
            | Self::UnsupportedDecimals { .. }
            | Self::FeeBipsOutOfRange { .. } => 400,
            Self::DataIntegrity { .. } => 422,
            Self::StateUnavailable { .. } => 503,
        }
    }

    /// Whether this error means "not loaded yet" rather than "bug"
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::StateUnavailable { .. })
    }
}
