//! Risk tier endpoint

use axum::{extract::State, Json};
use papr::assess_risk;
use papr_core::{parse_amount, ProtocolError};

use crate::dto::{reject, Rejection, RiskRequest, RiskResponse};
use crate::AppState;

/// POST /risk - Tier and gauge position for a debt against its ceiling
pub async fn assess(
    State(state): State<AppState>,
    Json(req): Json<RiskRequest>,
) -> Result<Json<RiskResponse>, Rejection> {
    let debt = parse_amount(&req.debt).map_err(reject)?;
    let max_debt = parse_amount(&req.max_debt).map_err(reject)?;
    let decimals = match req.decimals {
        Some(decimals) => decimals,
        None => state.papr_config().await.debt_token_decimals,
    };

    let risk = assess_risk(debt, max_debt, decimals)
        .map_err(|e| reject(ProtocolError::from(e)))?;

    Ok(Json(risk.into()))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::routes::{create_router, test_support::send};
    use crate::AppState;

    #[tokio::test]
    async fn test_risk_boundary_with_default_decimals() {
        let body = json!({
            "debt": "60000000000000000000",
            "max_debt": "100000000000000000000"
        });
        let (status, resp) =
            send(create_router(AppState::new()), "POST", "/risk", Some(body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(resp["tier"], "risky");
        assert_eq!(resp["ratio_percent"], 60.0);
        assert_eq!(resp["percentage_within_tier"], 0.0);
        assert_eq!(resp["tier_border"], 90);
    }

    #[tokio::test]
    async fn test_zero_max_debt_is_bad_request() {
        let body = json!({ "debt": "1", "max_debt": "0", "decimals": 0 });
        let (status, resp) =
            send(create_router(AppState::new()), "POST", "/risk", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(resp["code"], "non_positive_max_debt");
    }

    #[tokio::test]
    async fn test_malformed_amount_is_bad_request() {
        let body = json!({ "debt": "1e18", "max_debt": "5" });
        let (status, resp) =
            send(create_router(AppState::new()), "POST", "/risk", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(resp["code"], "invalid_amount");
    }
}
