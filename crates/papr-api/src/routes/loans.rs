//! Loan economics endpoint

use axum::{extract::State, routing::post, Json, Router};
use papr::{loan_economics, LoanInputs};
use papr_core::{parse_amount, unix_now, Amount, ProtocolError};

use crate::dto::{reject, LoanEconomicsRequest, LoanEconomicsResponse, Rejection};
use crate::AppState;

/// Create loans router
pub fn router() -> Router<AppState> {
    Router::new().route("/economics", post(economics))
}

fn optional_amount(value: Option<&str>) -> Result<Option<Amount>, ProtocolError> {
    value.map(parse_amount).transpose()
}

/// Convert a request into calculator inputs, filling the fee from config
pub(crate) fn loan_inputs(
    req: &LoanEconomicsRequest,
    default_client_fee_bips: u32,
) -> Result<LoanInputs, ProtocolError> {
    Ok(LoanInputs {
        amount_out_from_borrow_swap: optional_amount(req.amount_out_from_borrow_swap.as_deref())?,
        repayment_quote: optional_amount(req.repayment_quote.as_deref())?,
        client_fee_bips: Some(req.client_fee_bips.unwrap_or(default_client_fee_bips)),
        borrowed_at: req.borrowed_at,
    })
}

/// POST /loans/economics - Principal, interest and repayment figures
async fn economics(
    State(state): State<AppState>,
    Json(req): Json<LoanEconomicsRequest>,
) -> Result<Json<LoanEconomicsResponse>, Rejection> {
    let papr = state.papr_config().await;
    let inputs = loan_inputs(&req, papr.default_client_fee_bips).map_err(reject)?;
    let now = req.now.unwrap_or_else(unix_now);

    let econ = loan_economics(&inputs, now).map_err(|e| reject(ProtocolError::from(e)))?;

    if econ.principal.is_none() || econ.total_repayment.is_none() {
        tracing::debug!(
            has_borrow = econ.principal.is_some(),
            has_quote = econ.total_repayment.is_some(),
            "Loan economics partially unknown"
        );
    }

    Ok(Json(econ.into()))
}
