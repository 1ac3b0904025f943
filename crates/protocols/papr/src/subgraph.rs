//! papr subgraph adapter
//!
//! Narrow DTOs for the subset of the indexer schema the core consumes, and
//! their conversion into [`Vault`] snapshots. BigInt fields arrive as decimal
//! strings; timestamps may arrive as either numbers or strings.

use papr_core::{parse_amount, Address, Amount, ProtocolError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::state::{
    Auction, AuctionEnd, AuctionPriceParams, AuctionStart, CollateralAsset, Vault,
};

#[derive(Debug, Error)]
pub enum SubgraphError {
    #[error("Malformed subgraph response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Subgraph query failed: {0}")]
    Query(String),

    #[error("Subgraph response has no data")]
    MissingData,

    #[error("Invalid {field} '{value}'")]
    InvalidNumber { field: &'static str, value: String },

    #[error("Invalid collection address '{0}'")]
    InvalidAddress(String),
}

impl From<SubgraphError> for ProtocolError {
    fn from(e: SubgraphError) -> Self {
        match e {
            SubgraphError::InvalidNumber { .. } => ProtocolError::InvalidAmount {
                message: e.to_string(),
            },
            SubgraphError::InvalidAddress(address) => ProtocolError::InvalidAddress { address },
            SubgraphError::MissingData => ProtocolError::StateUnavailable {
                reason: e.to_string(),
            },
            _ => ProtocolError::DataIntegrity {
                reason: e.to_string(),
            },
        }
    }
}

/// Integer field that the indexer encodes either as a JSON number or a string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumberOrString {
    Number(u64),
    String(String),
}

impl NumberOrString {
    fn to_u64(&self, field: &'static str) -> Result<u64, SubgraphError> {
        match self {
            Self::Number(n) => Ok(*n),
            Self::String(s) => s.trim().parse().map_err(|_| SubgraphError::InvalidNumber {
                field,
                value: s.clone(),
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubgraphToken {
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubgraphCollateral {
    #[serde(default)]
    pub id: Option<String>,
    pub token_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubgraphAuctionStart {
    pub timestamp: NumberOrString,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubgraphAuctionEnd {
    pub timestamp: NumberOrString,
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubgraphAuction {
    #[serde(rename = "auctionAssetID")]
    pub auction_asset_id: String,
    pub start: SubgraphAuctionStart,
    #[serde(default)]
    pub end: Option<SubgraphAuctionEnd>,
    #[serde(default)]
    pub start_price: Option<String>,
    #[serde(default)]
    pub end_price: Option<String>,
    #[serde(default)]
    pub per_period_decay_percent_wad: Option<String>,
    #[serde(default)]
    pub seconds_in_period: Option<NumberOrString>,
}

/// Vault as returned by the indexer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubgraphVault {
    pub id: String,
    /// NFT collection the vault borrows against
    pub token: SubgraphToken,
    pub debt: String,
    #[serde(default)]
    pub collateral: Vec<SubgraphCollateral>,
    pub latest_increase_debt: NumberOrString,
    #[serde(default)]
    pub ongoing_auctions: Vec<SubgraphAuction>,
    #[serde(default)]
    pub past_auctions: Vec<SubgraphAuction>,
}

fn big_int(field: &'static str, value: &str) -> Result<Amount, SubgraphError> {
    parse_amount(value).map_err(|_| SubgraphError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

impl SubgraphAuction {
    fn price_params(&self) -> Result<Option<AuctionPriceParams>, SubgraphError> {
        let (Some(start), Some(end), Some(decay), Some(period)) = (
            self.start_price.as_deref(),
            self.end_price.as_deref(),
            self.per_period_decay_percent_wad.as_deref(),
            self.seconds_in_period.as_ref(),
        ) else {
            return Ok(None);
        };

        Ok(Some(AuctionPriceParams {
            start_price: big_int("startPrice", start)?,
            end_price: big_int("endPrice", end)?,
            per_period_decay_percent_wad: big_int("perPeriodDecayPercentWad", decay)?,
            seconds_in_period: period.to_u64("secondsInPeriod")?,
        }))
    }

    fn into_auction(self) -> Result<Auction, SubgraphError> {
        let price = self.price_params()?;
        let start = AuctionStart {
            timestamp: self.start.timestamp.to_u64("start.timestamp")?,
        };
        let end = match self.end {
            Some(end) => Some(AuctionEnd {
                timestamp: end.timestamp.to_u64("end.timestamp")?,
                id: end.id,
            }),
            None => None,
        };

        Ok(Auction {
            auction_asset_id: self.auction_asset_id,
            start,
            end,
            price,
        })
    }
}

impl TryFrom<SubgraphVault> for Vault {
    type Error = SubgraphError;

    fn try_from(raw: SubgraphVault) -> Result<Self, Self::Error> {
        let contract = Address::parse(&raw.token.id)
            .map_err(|_| SubgraphError::InvalidAddress(raw.token.id.clone()))?;

        let collateral = raw
            .collateral
            .into_iter()
            .map(|c| CollateralAsset {
                contract: contract.clone(),
                token_id: c.token_id,
            })
            .collect();

        let ongoing_auctions = raw
            .ongoing_auctions
            .into_iter()
            .map(SubgraphAuction::into_auction)
            .collect::<Result<Vec<_>, _>>()?;

        // An end-less past auction is carried as-is; the classifier decides
        // whether it matters for this vault.
        let past_auctions = raw
            .past_auctions
            .into_iter()
            .map(SubgraphAuction::into_auction)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Vault {
            debt: big_int("debt", &raw.debt)?,
            latest_increase_debt: raw.latest_increase_debt.to_u64("latestIncreaseDebt")?,
            id: raw.id,
            collateral,
            ongoing_auctions,
            past_auctions,
        })
    }
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

impl<T> GraphQlResponse<T> {
    fn into_data(self) -> Result<T, SubgraphError> {
        if !self.errors.is_empty() {
            let messages: Vec<String> = self.errors.into_iter().map(|e| e.message).collect();
            return Err(SubgraphError::Query(messages.join("; ")));
        }
        self.data.ok_or(SubgraphError::MissingData)
    }
}

#[derive(Debug, Deserialize)]
struct VaultsData {
    vaults: Vec<SubgraphVault>,
}

#[derive(Debug, Deserialize)]
struct VaultData {
    vault: Option<SubgraphVault>,
}

/// Parse a `vaults` query response, keeping only current vaults.
pub fn parse_vaults_response(raw: &str) -> Result<Vec<Vault>, SubgraphError> {
    let data: VaultsData = serde_json::from_str::<GraphQlResponse<VaultsData>>(raw)?.into_data()?;
    let total = data.vaults.len();

    let vaults = data
        .vaults
        .into_iter()
        .map(Vault::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    let current: Vec<Vault> = vaults.into_iter().filter(Vault::is_current).collect();

    if current.len() < total {
        tracing::debug!(
            total,
            dropped = total - current.len(),
            "Dropped spent vaults from subgraph response"
        );
    }

    Ok(current)
}

/// Parse a single `vault` query response. `Ok(None)` when the vault does not exist.
pub fn parse_vault_response(raw: &str) -> Result<Option<Vault>, SubgraphError> {
    let data: VaultData = serde_json::from_str::<GraphQlResponse<VaultData>>(raw)?.into_data()?;
    data.vault.map(Vault::try_from).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLLECTION: &str = "0xb7f7f6c52f2e2fdb1963eab30438024864c313f6";

    fn vaults_json(vaults: &str) -> String {
        format!(r#"{{"data":{{"vaults":[{}]}}}}"#, vaults)
    }

    fn vault_json(id: &str, debt: &str, collateral: &str, past: &str) -> String {
        format!(
            r#"{{
                "id": "{id}",
                "token": {{ "id": "{COLLECTION}" }},
                "debt": "{debt}",
                "collateral": [{collateral}],
                "latestIncreaseDebt": "1700000000",
                "ongoingAuctions": [],
                "pastAuctions": [{past}]
            }}"#
        )
    }

    #[test]
    fn test_parse_full_vault() {
        let past = r#"{
            "auctionAssetID": "12",
            "start": { "timestamp": 1700000100 },
            "end": { "timestamp": "1700003700", "id": "0xabc-1" },
            "startPrice": "3000000000000000000",
            "endPrice": "1000000000000000000",
            "perPeriodDecayPercentWad": "700000000000000000",
            "secondsInPeriod": "86400"
        }"#;
        let raw = vaults_json(&vault_json(
            "v1",
            "2500000000000000000",
            r#"{"id":"c1","tokenId":"7"}"#,
            past,
        ));

        let vaults = parse_vaults_response(&raw).unwrap();
        assert_eq!(vaults.len(), 1);
        let vault = &vaults[0];
        assert_eq!(vault.debt, 2_500_000_000_000_000_000);
        assert_eq!(vault.latest_increase_debt, 1_700_000_000);
        assert_eq!(vault.collateral[0].token_id, "7");
        assert_eq!(vault.collateral[0].contract.as_str(), COLLECTION);

        let auction = &vault.past_auctions[0];
        assert_eq!(auction.start.timestamp, 1_700_000_100);
        assert_eq!(auction.end.as_ref().unwrap().timestamp, 1_700_003_700);
        assert_eq!(auction.price.as_ref().unwrap().seconds_in_period, 86_400);
    }

    #[test]
    fn test_spent_vaults_are_dropped() {
        let raw = vaults_json(&format!(
            "{},{}",
            vault_json("spent", "0", "", ""),
            vault_json("live", "10", "", "")
        ));
        let vaults = parse_vaults_response(&raw).unwrap();
        assert_eq!(vaults.len(), 1);
        assert_eq!(vaults[0].id, "live");
    }

    #[test]
    fn test_past_auction_without_end_is_carried() {
        let past = r#"{ "auctionAssetID": "5", "start": { "timestamp": 1 }, "end": null }"#;
        let raw = vaults_json(&vault_json("v1", "10", "", past));
        let vaults = parse_vaults_response(&raw).unwrap();
        assert_eq!(vaults[0].past_auctions[0].auction_asset_id, "5");
        assert!(vaults[0].past_auctions[0].end.is_none());
    }

    #[test]
    fn test_ongoing_auction_wins_over_broken_history() {
        let raw = r#"{"data":{"vault":{
            "id": "v1",
            "token": { "id": "0xb7f7f6c52f2e2fdb1963eab30438024864c313f6" },
            "debt": "10",
            "collateral": [],
            "latestIncreaseDebt": 1700000000,
            "ongoingAuctions": [{ "auctionAssetID": "4", "start": { "timestamp": 1700000100 } }],
            "pastAuctions": [{ "auctionAssetID": "3", "start": { "timestamp": 1 }, "end": null }]
        }}}"#;
        let vault = parse_vault_response(raw).unwrap().unwrap();
        assert_eq!(
            crate::classify_vault(&vault, None),
            Ok(crate::VaultState::CurrentlyAuctioning)
        );
    }

    #[test]
    fn test_invalid_debt_rejected() {
        let raw = vaults_json(&vault_json("v1", "-3", "", ""));
        let err = parse_vaults_response(&raw).unwrap_err();
        assert!(matches!(err, SubgraphError::InvalidNumber { field: "debt", .. }));
    }

    #[test]
    fn test_graphql_errors_surface() {
        let raw = r#"{"data":null,"errors":[{"message":"indexer down"}]}"#;
        let err = parse_vaults_response(raw).unwrap_err();
        assert!(matches!(err, SubgraphError::Query(ref m) if m == "indexer down"));
    }

    #[test]
    fn test_single_vault_response() {
        let raw = format!(r#"{{"data":{{"vault":{}}}}}"#, vault_json("v9", "1", "", ""));
        let vault = parse_vault_response(&raw).unwrap().unwrap();
        assert_eq!(vault.id, "v9");

        let missing = parse_vault_response(r#"{"data":{"vault":null}}"#).unwrap();
        assert!(missing.is_none());
    }
}
