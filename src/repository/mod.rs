pub mod alloy;
pub mod contract;
pub mod error;

use ::alloy::primitives::{Address, U256};
pub use alloy::{AlloyChainReader, connect_http_chains};
use async_trait::async_trait;
pub use error::RepositoryError;

use crate::chain::Chain;

pub(crate) type RepoResult<T> = std::result::Result<T, RepositoryError>;

/// Read-only access to the layer-2 chains a swap is prepared for.
///
/// Both reads are idempotent and side-effect free. Implementations perform a
/// single attempt per call; retrying is left to the caller of the whole quote.
#[async_trait]
pub trait ChainReader: Send + Sync {
    /// Retrieves the decimal precision of an ERC20 token.
    ///
    /// # Arguments
    ///
    /// * `chain` - The chain the token lives on
    /// * `token` - The ERC20 token contract address
    ///
    /// # Returns
    ///
    /// * `Ok(u8)` - The token's decimals (e.g. 18, or 6 for USDC)
    /// * `Err(RepositoryError)` - If the call fails or the address is not an ERC20 contract
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let decimals = reader.get_decimals(Chain::Base, usdc_address).await?;
    /// ```
    async fn get_decimals(&self, chain: Chain, token: Address) -> RepoResult<u8>;

    /// Retrieves the pool reserves for a token pair, oriented to the swap direction.
    ///
    /// The pool is located through the factory of `router`.
    ///
    /// # Arguments
    ///
    /// * `chain` - The chain the pool lives on
    /// * `router` - The Uniswap V2 style router whose factory owns the pool
    /// * `token_in` - The token paid into the pool
    /// * `token_out` - The token taken out of the pool
    ///
    /// # Returns
    ///
    /// * `Ok((U256, U256))` - `(reserve_in, reserve_out)`
    /// * `Err(RepositoryError::PairNotFound)` - If the factory has no pool for the pair
    /// * `Err(RepositoryError)` - If any contract call fails
    async fn get_reserves(
        &self,
        chain: Chain,
        router: Address,
        token_in: Address,
        token_out: Address,
    ) -> RepoResult<(U256, U256)>;
}
