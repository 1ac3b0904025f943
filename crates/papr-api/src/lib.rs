//! papr-api: HTTP API layer for papr-lens
//!
//! Exposes the vault classifier and the risk and loan economics calculators
//! as JSON endpoints for the front end.

pub mod dto;
pub mod routes;
pub mod server;
pub mod state;

pub use server::*;
pub use state::AppState;
