//! Data Transfer Objects for API requests and responses
//!
//! Amounts cross the wire as decimal strings; they routinely exceed what a
//! JSON number can carry without loss.

use axum::{http::StatusCode, Json};
use papr::{
    subgraph::SubgraphVault, LoanEconomics, LoanViewState, RiskAssessment, RiskLevel,
    VaultAffordances, VaultState,
};
use papr_core::ProtocolError;
use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
}

impl HealthResponse {
    pub fn ok(uptime_secs: u64) -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_secs,
        }
    }
}

/// Generic API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new("internal_error", message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("bad_request", message)
    }
}

/// Error half of every handler's return type
pub type Rejection = (StatusCode, Json<ApiError>);

/// Map a protocol error to its HTTP status and JSON body
pub fn reject(err: ProtocolError) -> Rejection {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    if status == StatusCode::UNPROCESSABLE_ENTITY {
        tracing::warn!(error = %err, "Rejected inconsistent indexer data");
    }
    (status, Json(ApiError::new(err.error_code(), err.to_string())))
}

/// POST /vaults/state request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaultStateRequest {
    pub vault: SubgraphVault,
    /// Caller's balance of the protocol token, if loaded
    #[serde(default)]
    pub surplus_token_balance: Option<String>,
}

/// POST /vaults/state response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaultStateResponse {
    pub vault_id: String,
    pub state: VaultState,
    pub affordances: VaultAffordances,
    pub is_current: bool,
}

/// POST /risk request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskRequest {
    pub debt: String,
    pub max_debt: String,
    /// Defaults to the configured debt token decimals
    #[serde(default)]
    pub decimals: Option<u8>,
}

/// POST /risk response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskResponse {
    pub tier: RiskLevel,
    pub ratio_percent: f64,
    pub percentage_within_tier: f64,
    pub tier_start: u8,
    pub tier_border: u8,
}

impl From<RiskAssessment> for RiskResponse {
    fn from(risk: RiskAssessment) -> Self {
        let range = risk.level.range();
        Self {
            tier: risk.level,
            ratio_percent: risk.ratio_percent,
            percentage_within_tier: risk.percentage_within_tier,
            tier_start: range.start,
            tier_border: range.border,
        }
    }
}

/// POST /loans/economics request. Absent fields mean "not loaded yet".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoanEconomicsRequest {
    #[serde(default)]
    pub amount_out_from_borrow_swap: Option<String>,
    #[serde(default)]
    pub repayment_quote: Option<String>,
    #[serde(default)]
    pub client_fee_bips: Option<u32>,
    #[serde(default)]
    pub borrowed_at: Option<u64>,
    /// Override for the current time, in unix seconds
    #[serde(default)]
    pub now: Option<u64>,
}

/// POST /loans/economics response. `null` fields render as a loading placeholder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanEconomicsResponse {
    pub principal: Option<String>,
    pub interest: Option<String>,
    pub total_repayment: Option<String>,
    pub cost_percentage: Option<f64>,
    pub num_days: Option<u64>,
    pub annualized_cost_percentage: Option<f64>,
}

impl From<LoanEconomics> for LoanEconomicsResponse {
    fn from(econ: LoanEconomics) -> Self {
        Self {
            principal: econ.principal.map(|v| v.to_string()),
            interest: econ.interest.map(|v| v.to_string()),
            total_repayment: econ.total_repayment.map(|v| v.to_string()),
            cost_percentage: econ.cost_percentage,
            num_days: econ.num_days,
            annualized_cost_percentage: econ.annualized_cost_percentage,
        }
    }
}

/// POST /vaults/overview response: the folded loan view
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaultOverviewResponse {
    pub vault_state: Option<VaultState>,
    pub affordances: VaultAffordances,
    /// `null` while the oracle price is loading
    pub risk: Option<RiskResponse>,
    pub economics: LoanEconomicsResponse,
    pub client_fee_bips: Option<u32>,
}

impl From<LoanViewState> for VaultOverviewResponse {
    fn from(view: LoanViewState) -> Self {
        Self {
            vault_state: view.vault_state,
            affordances: view.affordances,
            risk: view.risk.map(RiskResponse::from),
            economics: view.economics.into(),
            client_fee_bips: view.client_fee_bips,
        }
    }
}
