//! papr State Types
//!
//! Narrow snapshots of vaults and auctions, plus the result types of the
//! classifier and calculators.

use std::fmt;

use papr_core::{Address, Amount, Timestamp};
use serde::{Deserialize, Serialize};

/// An NFT locked as collateral
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CollateralAsset {
    /// NFT collection contract
    pub contract: Address,
    /// Token id within the collection (decimal string)
    pub token_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuctionStart {
    pub timestamp: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuctionEnd {
    pub timestamp: Timestamp,
    /// Id of the event that ended the auction
    pub id: String,
}

/// Price decay parameters, carried for display only
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuctionPriceParams {
    pub start_price: Amount,
    pub end_price: Amount,
    pub per_period_decay_percent_wad: Amount,
    pub seconds_in_period: u64,
}

/// A liquidation sale of one collateral NFT
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Auction {
    /// Token id being sold
    pub auction_asset_id: String,
    pub start: AuctionStart,
    /// None while the auction is still selling
    pub end: Option<AuctionEnd>,
    pub price: Option<AuctionPriceParams>,
}

/// A borrower's position against one NFT collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vault {
    pub id: String,
    /// Outstanding debt in debt-token base units
    pub debt: Amount,
    pub collateral: Vec<CollateralAsset>,
    /// Timestamp of the most recent borrow against this vault
    pub latest_increase_debt: Timestamp,
    pub ongoing_auctions: Vec<Auction>,
    /// Completed auctions; an entry without `end` fails classification
    pub past_auctions: Vec<Auction>,
}

impl Vault {
    pub fn has_debt(&self) -> bool {
        self.debt != 0
    }

    /// Whether the vault belongs in active lists.
    ///
    /// A vault with no debt, no collateral and no auction history is spent.
    pub fn is_current(&self) -> bool {
        self.has_debt() || !self.collateral.is_empty() || !self.past_auctions.is_empty()
    }
}

/// Lifecycle state of a vault, in classification priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VaultState {
    /// An auction is selling collateral and debt remains
    CurrentlyAuctioning,
    /// The last liquidation happened after the latest borrow and debt remains
    PastAuctionRepayOwed,
    /// Liquidation covered the debt and left surplus to claim
    PastAuctionClaimable,
    /// Ordinary repay-or-hold state
    Healthy,
}

impl VaultState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CurrentlyAuctioning => "currently_auctioning",
            Self::PastAuctionRepayOwed => "past_auction_repay_owed",
            Self::PastAuctionClaimable => "past_auction_claimable",
            Self::Healthy => "healthy",
        }
    }
}

impl fmt::Display for VaultState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which actions the loan view offers for a classified vault
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VaultAffordances {
    pub can_repay: bool,
    pub can_claim: bool,
    /// Repaying now stops an ongoing liquidation (collateral still remains)
    pub repay_halts_liquidation: bool,
}

/// Risk tier, ordered from safest to most alarming
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Fine,
    Risky,
    Yikes,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fine => "fine",
            Self::Risky => "risky",
            Self::Yikes => "yikes",
        }
    }

    pub fn range(&self) -> TierRange {
        crate::constants::tier_range(*self)
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Percent-of-max-LTV span of a tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierRange {
    pub start: u8,
    /// Gauge position used before a real ratio is known
    pub default: u8,
    pub border: u8,
}

/// Risk tier plus the gauge position inside it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub level: RiskLevel,
    /// debt / max_debt * 100
    pub ratio_percent: f64,
    /// (ratio - start) / (border - start), unclamped
    pub percentage_within_tier: f64,
}

/// Inputs to the loan economics calculator. `None` means not yet known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LoanInputs {
    /// Underlying received when the borrowed debt token was swapped
    pub amount_out_from_borrow_swap: Option<Amount>,
    /// Debt tokens needed right now to extinguish the debt via swap
    pub repayment_quote: Option<Amount>,
    /// Per-loan fee override; the protocol default applies when absent
    pub client_fee_bips: Option<u32>,
    /// Timestamp of the borrow event
    pub borrowed_at: Option<Timestamp>,
}

/// Loan figures for display. Every field is independently unknown (`None`).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LoanEconomics {
    pub principal: Option<Amount>,
    /// Signed: negative when repaying now costs less than was received
    pub interest: Option<i128>,
    pub total_repayment: Option<Amount>,
    /// Interest as a fraction of principal (0.05 means 5%)
    pub cost_percentage: Option<f64>,
    pub num_days: Option<u64>,
    /// Cost fraction scaled to a 365-day year
    pub annualized_cost_percentage: Option<f64>,
}
