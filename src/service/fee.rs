use alloy::primitives::U256;

use crate::service::QuoteResult;
use crate::service::chain_registry::ChainConfig;
use crate::service::units::{TokenAmount, biguint_to_u256, u256_to_biguint};

/// Fee rates are expressed in parts per thousand
pub const FEE_RATE_DENOMINATOR: u64 = 1000;

/// Quoted input plus the chain surcharge and a one-unit rounding guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeAdjustedAmount {
    pub amount_in: TokenAmount,
    pub fee: U256,
    /// `amount_in + fee + 1`, always strictly greater than `amount_in`
    pub total: U256,
}

/// `fee = floor(amount_in * rate / 1000)`, `total = amount_in + fee + 1`
pub fn apply_fee_rate(amount_in: &TokenAmount, fee_rate_bps: u64) -> QuoteResult<FeeAdjustedAmount> {
    let amount = u256_to_biguint(amount_in.raw);
    let fee = &amount * fee_rate_bps / FEE_RATE_DENOMINATOR;
    let total = amount + &fee + 1u32;

    Ok(FeeAdjustedAmount {
        amount_in: *amount_in,
        fee: biguint_to_u256(&fee)?,
        total: biguint_to_u256(&total)?,
    })
}

/// Applies the chain's configured fee rate.
pub fn apply_fee(amount_in: &TokenAmount, chain: &ChainConfig) -> QuoteResult<FeeAdjustedAmount> {
    let adjusted = apply_fee_rate(amount_in, chain.fee_rate_bps)?;
    tracing::debug!(
        "Fee on {}: rate={}/{}, fee={}, total={}",
        chain.chain,
        chain.fee_rate_bps,
        FEE_RATE_DENOMINATOR,
        adjusted.fee,
        adjusted.total
    );
    Ok(adjusted)
}
