//! Risk Level Calculator
//!
//! Buckets a vault's debt against its debt ceiling into fine/risky/yikes and
//! positions it inside the tier for the UI gauge.

use papr_core::constants::MAX_DECIMALS;
use papr_core::{Amount, ProtocolError};
use thiserror::Error;

use crate::constants::tiers;
use crate::state::{RiskAssessment, RiskLevel};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RiskError {
    #[error("Max debt must be positive")]
    NonPositiveMaxDebt,

    #[error("Unsupported decimals: {0}")]
    UnsupportedDecimals(u8),
}

impl From<RiskError> for ProtocolError {
    fn from(e: RiskError) -> Self {
        match e {
            RiskError::NonPositiveMaxDebt => ProtocolError::NonPositiveMaxDebt,
            RiskError::UnsupportedDecimals(decimals) => ProtocolError::UnsupportedDecimals {
                decimals,
                max: MAX_DECIMALS,
            },
        }
    }
}

/// Convert a fixed-point amount to a real number.
pub fn to_real(amount: Amount, decimals: u8) -> f64 {
    amount as f64 / 10f64.powi(decimals as i32)
}

/// Whether `debt / max_debt >= percent / 100`, decided in integer math.
///
/// Compares `debt` against `ceil(max_debt * percent / 100)`, split so no
/// intermediate exceeds `max_debt` for `percent <= 100`.
fn ratio_at_least(debt: Amount, max_debt: Amount, percent: u8) -> bool {
    let percent = percent as u128;
    let threshold = (max_debt / 100) * percent + ((max_debt % 100) * percent).div_ceil(100);
    debt >= threshold
}

/// Risk tier for a debt against its ceiling.
pub fn risk_level(debt: Amount, max_debt: Amount) -> Result<RiskLevel, RiskError> {
    if max_debt == 0 {
        return Err(RiskError::NonPositiveMaxDebt);
    }

    let level = if ratio_at_least(debt, max_debt, tiers::YIKES.start) {
        RiskLevel::Yikes
    } else if ratio_at_least(debt, max_debt, tiers::RISKY.start) {
        RiskLevel::Risky
    } else {
        RiskLevel::Fine
    };
    Ok(level)
}

/// Assess a vault's risk.
///
/// `max_debt` is collateral value x max LTV / target, computed upstream from
/// oracle prices. It must be positive. Both amounts share `decimals`.
pub fn assess_risk(
    debt: Amount,
    max_debt: Amount,
    decimals: u8,
) -> Result<RiskAssessment, RiskError> {
    if decimals > MAX_DECIMALS {
        return Err(RiskError::UnsupportedDecimals(decimals));
    }
    let level = risk_level(debt, max_debt)?;

    let ratio_percent = to_real(debt, decimals) * 100.0 / to_real(max_debt, decimals);
    let range = level.range();
    let percentage_within_tier =
        (ratio_percent - range.start as f64) / (range.border as f64 - range.start as f64);

    Ok(RiskAssessment {
        level,
        ratio_percent,
        percentage_within_tier,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const WAD: u128 = 1_000_000_000_000_000_000;

    #[test]
    fn test_exactly_sixty_is_risky() {
        let risk = assess_risk(60 * WAD, 100 * WAD, 18).unwrap();
        assert_eq!(risk.level, RiskLevel::Risky);
        assert_eq!(risk.ratio_percent, 60.0);
        assert_eq!(risk.percentage_within_tier, 0.0);
    }

    #[test]
    fn test_just_below_sixty_is_fine() {
        // 59.999%
        let risk = assess_risk(59_999, 100_000, 0).unwrap();
        assert_eq!(risk.level, RiskLevel::Fine);
        assert!(risk.percentage_within_tier < 1.0);
        assert!(risk.percentage_within_tier > 0.99);

        // 1 wei under the boundary
        let risk = assess_risk(60 * WAD - 1, 100 * WAD, 18).unwrap();
        assert_eq!(risk.level, RiskLevel::Fine);
    }

    #[test]
    fn test_no_integer_truncation_at_boundary() {
        // 3/5 truncates to 0 in integer division; the ratio is exactly 60%
        assert_eq!(risk_level(3, 5).unwrap(), RiskLevel::Risky);
        // 2/3 = 66.6%
        assert_eq!(risk_level(2, 3).unwrap(), RiskLevel::Risky);
    }

    #[test]
    fn test_exactly_ninety_is_yikes() {
        let risk = assess_risk(90 * WAD, 100 * WAD, 18).unwrap();
        assert_eq!(risk.level, RiskLevel::Yikes);
        assert_eq!(risk.percentage_within_tier, 0.0);
    }

    #[test]
    fn test_full_ltv_is_yikes_at_one() {
        let risk = assess_risk(100 * WAD, 100 * WAD, 18).unwrap();
        assert_eq!(risk.level, RiskLevel::Yikes);
        assert_eq!(risk.percentage_within_tier, 1.0);
    }

    #[test]
    fn test_mid_tier_position() {
        // 75% sits halfway through risky
        let risk = assess_risk(75, 100, 0).unwrap();
        assert_eq!(risk.level, RiskLevel::Risky);
        assert!((risk.percentage_within_tier - 0.5).abs() < 1e-12);

        // 30% sits halfway through fine
        let risk = assess_risk(30, 100, 0).unwrap();
        assert_eq!(risk.level, RiskLevel::Fine);
        assert!((risk.percentage_within_tier - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_over_max_is_unclamped() {
        let risk = assess_risk(110, 100, 0).unwrap();
        assert_eq!(risk.level, RiskLevel::Yikes);
        assert!((risk.percentage_within_tier - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_debt_is_fine() {
        let risk = assess_risk(0, 100 * WAD, 18).unwrap();
        assert_eq!(risk.level, RiskLevel::Fine);
        assert_eq!(risk.percentage_within_tier, 0.0);
    }

    #[test]
    fn test_zero_max_debt_rejected() {
        assert_eq!(assess_risk(1, 0, 18), Err(RiskError::NonPositiveMaxDebt));
        assert_eq!(assess_risk(0, 0, 18), Err(RiskError::NonPositiveMaxDebt));
    }

    #[test]
    fn test_unsupported_decimals_rejected() {
        assert_eq!(
            assess_risk(1, 2, 39),
            Err(RiskError::UnsupportedDecimals(39))
        );
    }

    #[test]
    fn test_huge_amounts_do_not_overflow() {
        let level = risk_level(u128::MAX, u128::MAX).unwrap();
        assert_eq!(level, RiskLevel::Yikes);
    }

    #[test]
    fn test_boundaries_exact_near_u128_max() {
        let unit = u128::MAX / 100;
        let max_debt = unit * 100;
        assert_eq!(risk_level(90 * unit, max_debt), Ok(RiskLevel::Yikes));
        assert_eq!(risk_level(90 * unit - 1, max_debt), Ok(RiskLevel::Risky));
        assert_eq!(risk_level(60 * unit, max_debt), Ok(RiskLevel::Risky));
        assert_eq!(risk_level(60 * unit - 1, max_debt), Ok(RiskLevel::Fine));

        // max_debt not a multiple of 100: 90% of 1001 is 900.9
        assert_eq!(risk_level(901, 1_001), Ok(RiskLevel::Yikes));
        assert_eq!(risk_level(900, 1_001), Ok(RiskLevel::Risky));
    }

    #[test]
    fn test_idempotent() {
        let a = assess_risk(61 * WAD, 100 * WAD, 18).unwrap();
        let b = assess_risk(61 * WAD, 100 * WAD, 18).unwrap();
        assert_eq!(a, b);
    }
}
