//! papr Lending Protocol Decision Core
//!
//! Pure functions that turn indexer snapshots and swap quotes into the
//! figures a papr loan view displays.
//!
//! # Components
//!
//! - [`classifier`]: which lifecycle state a vault is in
//! - [`risk`]: how close a vault's debt is to its ceiling
//! - [`economics`]: principal, interest and total repayment of a loan
//! - [`subgraph`]: narrow DTOs for the indexer schema and their mapping into [`state`]
//! - [`store`]: loan view state and the reducers that update it
//!
//! Nothing here performs I/O. Every function is safe to call repeatedly and
//! concurrently with the same inputs.

pub mod classifier;
pub mod constants;
pub mod economics;
pub mod risk;
pub mod state;
pub mod store;
pub mod subgraph;

// Re-exports
pub use classifier::{classify_vault, most_recent_past_auction, vault_affordances, ClassifyError};
pub use economics::{loan_economics, swap_fee, EconomicsError};
pub use risk::{assess_risk, RiskError};
pub use state::*;
pub use store::{evaluate_vault, reduce, LoanViewAction, LoanViewState};
pub use subgraph::{parse_vault_response, parse_vaults_response, SubgraphError, SubgraphVault};
