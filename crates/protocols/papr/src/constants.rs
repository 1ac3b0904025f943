//! papr Protocol Constants

use crate::state::{RiskLevel, TierRange};

pub use papr_core::constants::DEFAULT_CLIENT_FEE_BIPS;

/// Upper bound for a client fee (100%)
pub const MAX_CLIENT_FEE_BIPS: u32 = 10_000;

/// Risk tier ranges as percent of max LTV
///
/// Ranges are contiguous: each tier's border is the next tier's start.
pub mod tiers {
    use super::TierRange;

    pub const FINE: TierRange = TierRange {
        start: 0,
        default: 30,
        border: 60,
    };

    pub const RISKY: TierRange = TierRange {
        start: 60,
        default: 75,
        border: 90,
    };

    pub const YIKES: TierRange = TierRange {
        start: 90,
        default: 95,
        border: 100,
    };
}

/// Tier range for a risk level
pub fn tier_range(level: RiskLevel) -> TierRange {
    match level {
        RiskLevel::Fine => tiers::FINE,
        RiskLevel::Risky => tiers::RISKY,
        RiskLevel::Yikes => tiers::YIKES,
    }
}

/// Days in a year for annualizing loan cost
pub const DAYS_PER_YEAR: f64 = 365.0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tiers_are_contiguous() {
        assert_eq!(tiers::FINE.start, 0);
        assert_eq!(tiers::FINE.border, tiers::RISKY.start);
        assert_eq!(tiers::RISKY.border, tiers::YIKES.start);
        assert_eq!(tiers::YIKES.border, 100);
    }

    #[test]
    fn test_defaults_inside_range() {
        for level in [RiskLevel::Fine, RiskLevel::Risky, RiskLevel::Yikes] {
            let range = tier_range(level);
            assert!(range.start <= range.default && range.default < range.border);
        }
    }
}
