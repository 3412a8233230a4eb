use std::sync::Arc;

use alloy::primitives::{Address, U256};
use tracing::instrument;

use crate::repository::{ChainReader, RepositoryError};
use crate::service::chain_registry::ChainConfig;
use crate::service::units::{TokenAmount, biguint_to_u256, u256_to_biguint};
use crate::service::{QuoteError, QuoteResult};

/// Input side of the router's 0.3% trading fee (997 / 1000)
pub const TRADING_FEE_NUMERATOR: u32 = 997;
pub const TRADING_FEE_DENOMINATOR: u32 = 1000;

/// Two-hop route: `[wrappedNative, token]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapPath {
    hops: [Address; 2],
}

impl SwapPath {
    pub fn new(tokens: &[Address]) -> QuoteResult<Self> {
        let hops: [Address; 2] = tokens.try_into().map_err(|_| {
            QuoteError::InvalidPath(format!("expected 2 tokens, got {}", tokens.len()))
        })?;

        if hops[0] == hops[1] {
            return Err(QuoteError::InvalidPath(format!(
                "token {} cannot be swapped for itself",
                hops[0]
            )));
        }

        Ok(Self { hops })
    }

    pub fn token_in(&self) -> Address {
        self.hops[0]
    }

    pub fn token_out(&self) -> Address {
        self.hops[1]
    }

    pub fn to_vec(&self) -> Vec<Address> {
        self.hops.to_vec()
    }
}

/// Required input for a desired output of a constant-product pool, rounded up.
///
/// `amount_in = reserve_in * amount_out * 1000 / ((reserve_out - amount_out) * 997) + 1`
///
/// Intermediates are unbounded; only the result must fit in 256 bits.
pub fn get_amount_in(amount_out: U256, reserve_in: U256, reserve_out: U256) -> QuoteResult<U256> {
    if amount_out.is_zero() {
        return Err(QuoteError::InvalidAmount(
            "amount out must be greater than zero".to_string(),
        ));
    }
    if reserve_in.is_zero() || amount_out >= reserve_out {
        return Err(QuoteError::InsufficientLiquidity(format!(
            "cannot take {amount_out} out of reserves ({reserve_in}, {reserve_out})"
        )));
    }

    let numerator = u256_to_biguint(reserve_in)
        * u256_to_biguint(amount_out)
        * TRADING_FEE_DENOMINATOR;
    let denominator =
        (u256_to_biguint(reserve_out) - u256_to_biguint(amount_out)) * TRADING_FEE_NUMERATOR;

    biguint_to_u256(&(numerator / denominator + 1u32))
}

/// Reverse quotes swaps against the router's pools.
#[derive(Clone)]
pub struct AmmQuoter {
    reader: Arc<dyn ChainReader>,
}

impl AmmQuoter {
    pub fn new(reader: Arc<dyn ChainReader>) -> Self {
        Self { reader }
    }

    /// Native input needed to receive `desired_out` of the path's last token.
    #[instrument(skip(self, chain), fields(chain = %chain.chain), err)]
    pub async fn amounts_in(
        &self,
        path: &SwapPath,
        chain: &ChainConfig,
        desired_out: &TokenAmount,
    ) -> QuoteResult<TokenAmount> {
        let (reserve_in, reserve_out) = self
            .reader
            .get_reserves(
                chain.chain,
                chain.router_address,
                path.token_in(),
                path.token_out(),
            )
            .await
            .map_err(|e| match e {
                RepositoryError::PairNotFound { .. } => {
                    QuoteError::InsufficientLiquidity(e.to_string())
                }
                other => QuoteError::ReservesUnavailable(other.to_string()),
            })?;

        let amount_in = get_amount_in(desired_out.raw, reserve_in, reserve_out)?;
        tracing::info!(
            "Quoted {amount_in} wei in for {} out (reserves in={reserve_in}, out={reserve_out})",
            desired_out.raw
        );

        Ok(TokenAmount::native(amount_in))
    }
}
