//! Loan view state
//!
//! The snapshot the loan views share (collateral selection plus the latest
//! classifier and calculator outputs) and the reducers that produce a new
//! snapshot per action. Reducers never mutate their input.

use papr_core::{Amount, ProtocolError, Timestamp};
use serde::{Deserialize, Serialize};

use crate::classifier::{classify_vault, vault_affordances};
use crate::constants::DEFAULT_CLIENT_FEE_BIPS;
use crate::economics::loan_economics;
use crate::risk::assess_risk;
use crate::state::{
    CollateralAsset, LoanEconomics, LoanInputs, RiskAssessment, Vault, VaultAffordances,
    VaultState,
};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LoanViewState {
    /// NFTs picked for a new borrow, in selection order
    pub selected_collateral: Vec<CollateralAsset>,
    pub vault_state: Option<VaultState>,
    pub affordances: VaultAffordances,
    pub risk: Option<RiskAssessment>,
    pub economics: LoanEconomics,
    /// Per-loan fee override; takes precedence over the fee in `LoanInputs`
    pub client_fee_bips: Option<u32>,
}

impl LoanViewState {
    /// Fee the economics are computed with: this view's override, then the
    /// loan's own fee, then the protocol default.
    pub fn effective_client_fee_bips(&self, loan: &LoanInputs) -> u32 {
        self.client_fee_bips
            .or(loan.client_fee_bips)
            .unwrap_or(DEFAULT_CLIENT_FEE_BIPS)
    }

    pub fn is_selected(&self, asset: &CollateralAsset) -> bool {
        self.selected_collateral.contains(asset)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LoanViewAction {
    SelectCollateral(CollateralAsset),
    DeselectCollateral(CollateralAsset),
    ClearSelection,
    VaultClassified {
        state: VaultState,
        affordances: VaultAffordances,
    },
    RiskAssessed(RiskAssessment),
    EconomicsComputed(LoanEconomics),
    /// Changing the fee invalidates previously computed economics
    SetClientFeeBips(Option<u32>),
}

/// Apply one action to a snapshot.
pub fn reduce(state: &LoanViewState, action: LoanViewAction) -> LoanViewState {
    let mut next = state.clone();
    match action {
        LoanViewAction::SelectCollateral(asset) => {
            if !next.is_selected(&asset) {
                next.selected_collateral.push(asset);
            }
        }
        LoanViewAction::DeselectCollateral(asset) => {
            next.selected_collateral.retain(|a| a != &asset);
        }
        LoanViewAction::ClearSelection => next.selected_collateral.clear(),
        LoanViewAction::VaultClassified { state, affordances } => {
            next.vault_state = Some(state);
            next.affordances = affordances;
        }
        LoanViewAction::RiskAssessed(risk) => next.risk = Some(risk),
        LoanViewAction::EconomicsComputed(economics) => next.economics = economics,
        LoanViewAction::SetClientFeeBips(bips) => {
            if next.client_fee_bips != bips {
                next.client_fee_bips = bips;
                next.economics = LoanEconomics::default();
            }
        }
    }
    next
}

/// Run the classifier and calculators for a vault and return the actions
/// that publish their results into `view`.
///
/// `max_debt` of `None` (oracle price pending) skips the risk assessment.
pub fn evaluate_vault(
    view: &LoanViewState,
    vault: &Vault,
    surplus_token_balance: Option<Amount>,
    max_debt: Option<Amount>,
    decimals: u8,
    loan: &LoanInputs,
    now: Timestamp,
) -> Result<Vec<LoanViewAction>, ProtocolError> {
    let state = classify_vault(vault, surplus_token_balance)?;
    let mut actions = vec![LoanViewAction::VaultClassified {
        state,
        affordances: vault_affordances(vault, state),
    }];

    if let Some(max_debt) = max_debt {
        actions.push(LoanViewAction::RiskAssessed(assess_risk(
            vault.debt, max_debt, decimals,
        )?));
    }

    let inputs = LoanInputs {
        client_fee_bips: Some(view.effective_client_fee_bips(loan)),
        ..*loan
    };
    actions.push(LoanViewAction::EconomicsComputed(loan_economics(&inputs, now)?));
    Ok(actions)
}
