//! Vault State Classifier
//!
//! Decides which loan view a vault gets. Rules are evaluated in priority
//! order and the first match wins:
//!
//! 1. ongoing auction and debt remaining -> `CurrentlyAuctioning`
//! 2. latest past auction ended after the latest borrow, debt remaining -> `PastAuctionRepayOwed`
//! 3. past auctions, no debt, positive surplus balance -> `PastAuctionClaimable`
//! 4. otherwise -> `Healthy`
//!
//! A past auction without an `end` is a data-integrity fault and fails the
//! classification once rule 1 has not matched.

use papr_core::{Amount, ProtocolError};
use thiserror::Error;

use crate::state::{Auction, AuctionEnd, Vault, VaultAffordances, VaultState};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifyError {
    #[error("Past auction for asset {auction_asset_id} has no end record")]
    PastAuctionWithoutEnd { auction_asset_id: String },
}

impl From<ClassifyError> for ProtocolError {
    fn from(e: ClassifyError) -> Self {
        ProtocolError::DataIntegrity {
            reason: e.to_string(),
        }
    }
}

/// Select the past auction with the greatest `end.timestamp`.
///
/// Among equal timestamps the earliest entry in input order wins. Returns
/// `Ok(None)` for an empty slice.
pub fn most_recent_past_auction(
    past_auctions: &[Auction],
) -> Result<Option<(&Auction, &AuctionEnd)>, ClassifyError> {
    let mut latest: Option<(&Auction, &AuctionEnd)> = None;

    for auction in past_auctions {
        let end = auction
            .end
            .as_ref()
            .ok_or_else(|| ClassifyError::PastAuctionWithoutEnd {
                auction_asset_id: auction.auction_asset_id.clone(),
            })?;

        match latest {
            Some((_, best)) if end.timestamp <= best.timestamp => {}
            _ => latest = Some((auction, end)),
        }
    }

    Ok(latest)
}

/// Classify a vault snapshot.
///
/// `surplus_token_balance` is the caller's balance of the protocol token;
/// `None` (not loaded yet) is treated as zero so the claim view never shows
/// before the balance is known.
pub fn classify_vault(
    vault: &Vault,
    surplus_token_balance: Option<Amount>,
) -> Result<VaultState, ClassifyError> {
    if !vault.ongoing_auctions.is_empty() && vault.has_debt() {
        return Ok(VaultState::CurrentlyAuctioning);
    }

    let latest = most_recent_past_auction(&vault.past_auctions).map_err(|e| {
        tracing::warn!(vault = %vault.id, error = %e, "Rejecting vault snapshot");
        e
    })?;

    if let Some((_, end)) = latest {
        if vault.has_debt() && end.timestamp > vault.latest_increase_debt {
            return Ok(VaultState::PastAuctionRepayOwed);
        }
        if !vault.has_debt() && surplus_token_balance.unwrap_or(0) > 0 {
            return Ok(VaultState::PastAuctionClaimable);
        }
        if vault.has_debt() {
            tracing::debug!(
                vault = %vault.id,
                auction_end = end.timestamp,
                latest_increase_debt = vault.latest_increase_debt,
                "Ignoring auction from a previous loan cycle"
            );
        }
    }

    Ok(VaultState::Healthy)
}

/// Actions the loan view offers for a vault in `state`.
pub fn vault_affordances(vault: &Vault, state: VaultState) -> VaultAffordances {
    match state {
        VaultState::CurrentlyAuctioning => VaultAffordances {
            can_repay: true,
            can_claim: false,
            repay_halts_liquidation: !vault.collateral.is_empty(),
        },
        VaultState::PastAuctionRepayOwed => VaultAffordances {
            can_repay: true,
            ..Default::default()
        },
        VaultState::PastAuctionClaimable => VaultAffordances {
            can_claim: true,
            ..Default::default()
        },
        VaultState::Healthy => VaultAffordances {
            can_repay: vault.has_debt(),
            ..Default::default()
        },
    }
}
