//! Vault API Routes
//!
//! - POST /vaults/state - Classify one indexer vault snapshot
//! - POST /vaults/classify - Classify every current vault in a raw `vaults` query response
//! - POST /vaults/overview - Classifier, risk and economics folded into one loan view

use axum::{extract::State, routing::post, Json, Router};
use papr::{
    classify_vault, evaluate_vault, parse_vaults_response, reduce, vault_affordances,
    LoanViewAction, LoanViewState, Vault,
};
use papr_core::{parse_amount, unix_now, Amount, ProtocolError};
use serde::{Deserialize, Serialize};

use crate::dto::{
    reject, LoanEconomicsRequest, Rejection, VaultOverviewResponse, VaultStateRequest,
    VaultStateResponse,
};
use crate::routes::loans::loan_inputs;
use crate::AppState;

/// Raw subgraph response plus the caller's surplus balance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifyVaultsRequest {
    pub response: serde_json::Value,
    #[serde(default)]
    pub surplus_token_balance: Option<String>,
}

/// Overview request: everything the loan view needs for one vault
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaultOverviewRequest {
    #[serde(flatten)]
    pub vault: VaultStateRequest,
    /// Debt ceiling from oracle prices; absent while the price is loading
    #[serde(default)]
    pub max_debt: Option<String>,
    #[serde(default)]
    pub loan: LoanEconomicsRequest,
}

/// Create vaults router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/state", post(vault_state))
        .route("/classify", post(classify_vaults))
        .route("/overview", post(vault_overview))
}

fn surplus_balance(raw: Option<&str>) -> Result<Option<Amount>, ProtocolError> {
    raw.map(parse_amount).transpose()
}

fn classify(
    vault: &Vault,
    surplus: Option<Amount>,
) -> Result<VaultStateResponse, ProtocolError> {
    let state = classify_vault(vault, surplus)?;
    Ok(VaultStateResponse {
        vault_id: vault.id.clone(),
        state,
        affordances: vault_affordances(vault, state),
        is_current: vault.is_current(),
    })
}

/// POST /vaults/state
async fn vault_state(
    Json(req): Json<VaultStateRequest>,
) -> Result<Json<VaultStateResponse>, Rejection> {
    let surplus = surplus_balance(req.surplus_token_balance.as_deref()).map_err(reject)?;
    let vault = Vault::try_from(req.vault).map_err(|e| reject(e.into()))?;
    classify(&vault, surplus).map(Json).map_err(reject)
}

/// POST /vaults/classify
async fn classify_vaults(
    Json(req): Json<ClassifyVaultsRequest>,
) -> Result<Json<Vec<VaultStateResponse>>, Rejection> {
    let surplus = surplus_balance(req.surplus_token_balance.as_deref()).map_err(reject)?;
    let vaults =
        parse_vaults_response(&req.response.to_string()).map_err(|e| reject(e.into()))?;

    let states = vaults
        .iter()
        .map(|vault| classify(vault, surplus))
        .collect::<Result<Vec<_>, _>>()
        .map_err(reject)?;

    tracing::debug!(count = states.len(), "Classified vaults");
    Ok(Json(states))
}

/// POST /vaults/overview
async fn vault_overview(
    State(state): State<AppState>,
    Json(req): Json<VaultOverviewRequest>,
) -> Result<Json<VaultOverviewResponse>, Rejection> {
    let papr = state.papr_config().await;
    let surplus = surplus_balance(req.vault.surplus_token_balance.as_deref()).map_err(reject)?;
    let max_debt = req
        .max_debt
        .as_deref()
        .map(parse_amount)
        .transpose()
        .map_err(reject)?;
    let loan = loan_inputs(&req.loan, papr.default_client_fee_bips).map_err(reject)?;
    let now = req.loan.now.unwrap_or_else(unix_now);

    let vault = Vault::try_from(req.vault.vault).map_err(|e| reject(e.into()))?;
    let initial = reduce(
        &LoanViewState::default(),
        LoanViewAction::SetClientFeeBips(loan.client_fee_bips),
    );
    let actions = evaluate_vault(
        &initial,
        &vault,
        surplus,
        max_debt,
        papr.debt_token_decimals,
        &loan,
        now,
    )
    .map_err(reject)?;

    let view = actions
        .into_iter()
        .fold(initial, |view, action| reduce(&view, action));

    Ok(Json(view.into()))
}
