//! Loan Economics Calculator
//!
//! Principal, interest and total repayment for a papr loan, derived from the
//! borrow swap and a live repayment quote. Fees use the same truncating
//! basis-point math as the swap router so displayed amounts match what is
//! actually charged. Missing inputs yield `None` fields, never zero.

use papr_core::constants::{BIPS_DENOMINATOR, SECONDS_PER_DAY};
use papr_core::{Amount, ProtocolError, Timestamp};
use thiserror::Error;

use crate::constants::{DAYS_PER_YEAR, DEFAULT_CLIENT_FEE_BIPS, MAX_CLIENT_FEE_BIPS};
use crate::state::{LoanEconomics, LoanInputs};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EconomicsError {
    #[error("Client fee {0} bips exceeds 10000")]
    FeeBipsOutOfRange(u32),
}

impl From<EconomicsError> for ProtocolError {
    fn from(e: EconomicsError) -> Self {
        match e {
            EconomicsError::FeeBipsOutOfRange(bips) => ProtocolError::FeeBipsOutOfRange {
                bips,
                max: MAX_CLIENT_FEE_BIPS,
            },
        }
    }
}

fn check_fee_bips(bips: u32) -> Result<u128, EconomicsError> {
    if bips > MAX_CLIENT_FEE_BIPS {
        return Err(EconomicsError::FeeBipsOutOfRange(bips));
    }
    Ok(bips as u128)
}

/// floor(amount * bips / 10000), exact for every u128 amount.
///
/// The fee never exceeds `amount` since `bips` is capped at 10000.
pub fn swap_fee(amount: Amount, bips: u32) -> Result<Amount, EconomicsError> {
    let bips = check_fee_bips(bips)?;
    let whole = (amount / BIPS_DENOMINATOR) * bips;
    let rest = (amount % BIPS_DENOMINATOR) * bips / BIPS_DENOMINATOR;
    Ok(whole + rest)
}

/// Principal received: borrow swap output minus the client fee.
pub fn principal(amount_out: Amount, bips: u32) -> Result<Amount, EconomicsError> {
    Ok(amount_out - swap_fee(amount_out, bips)?)
}

/// Debt tokens needed to repay: quote plus the client fee.
pub fn total_repayment(repayment_quote: Amount, bips: u32) -> Result<Amount, EconomicsError> {
    Ok(repayment_quote.saturating_add(swap_fee(repayment_quote, bips)?))
}

/// `a - b` as a signed value, `None` if it does not fit in an i128.
fn signed_difference(a: Amount, b: Amount) -> Option<i128> {
    if a >= b {
        i128::try_from(a - b).ok()
    } else {
        i128::try_from(b - a).ok().map(|d| -d)
    }
}

/// Whole days elapsed since `borrowed_at`. A future timestamp counts as 0.
pub fn days_since(borrowed_at: Timestamp, now: Timestamp) -> u64 {
    now.saturating_sub(borrowed_at) / SECONDS_PER_DAY
}

/// Compute all loan figures that the available inputs allow.
pub fn loan_economics(
    inputs: &LoanInputs,
    now: Timestamp,
) -> Result<LoanEconomics, EconomicsError> {
    let bips = inputs.client_fee_bips.unwrap_or(DEFAULT_CLIENT_FEE_BIPS);
    // Rejected even when no amount is known yet
    check_fee_bips(bips)?;

    let principal = inputs
        .amount_out_from_borrow_swap
        .map(|amount| principal(amount, bips))
        .transpose()?;
    let total_repayment = inputs
        .repayment_quote
        .map(|quote| total_repayment(quote, bips))
        .transpose()?;

    let interest = match (total_repayment, principal) {
        (Some(total), Some(principal)) => signed_difference(total, principal),
        _ => None,
    };

    let cost_percentage = match (interest, principal) {
        (Some(interest), Some(principal)) if principal > 0 => {
            Some(interest as f64 / principal as f64)
        }
        _ => None,
    };

    let num_days = inputs.borrowed_at.map(|at| days_since(at, now));

    let annualized_cost_percentage = match (cost_percentage, num_days) {
        (Some(cost), Some(days)) if days > 0 => Some(cost * DAYS_PER_YEAR / days as f64),
        _ => None,
    };

    Ok(LoanEconomics {
        principal,
        interest,
        total_repayment,
        cost_percentage,
        num_days,
        annualized_cost_percentage,
    })
}
