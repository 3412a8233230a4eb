use std::collections::HashMap;
use std::sync::Arc;

use alloy::contract::Error as ContractCallError;
use alloy::primitives::{Address, U256};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::transports::RpcError;
use async_trait::async_trait;
use tracing::instrument;

use super::error::RepositoryError;
use crate::chain::Chain;
use crate::config::ChainSettings;
use crate::repository::contract::{IERC20, IUniswapV2Factory, IUniswapV2Pair, IUniswapV2Router02};
use crate::repository::{ChainReader, RepoResult};

/// Chain reader backed by one alloy provider per chain.
pub struct AlloyChainReader<P> {
    providers: HashMap<Chain, Arc<P>>,
}

impl<P: Provider + Clone + 'static> AlloyChainReader<P> {
    pub fn new(providers: HashMap<Chain, Arc<P>>) -> Self {
        Self { providers }
    }

    pub fn chains(&self) -> Vec<Chain> {
        let mut chains: Vec<Chain> = self.providers.keys().copied().collect();
        chains.sort();
        chains
    }

    fn provider(&self, chain: Chain) -> RepoResult<Arc<P>> {
        self.providers
            .get(&chain)
            .cloned()
            .ok_or_else(|| RepositoryError::UnsupportedChain(chain.to_string()))
    }
}

/// Connects an HTTP provider for every configured chain.
pub fn connect_http_chains(
    chains: &HashMap<Chain, ChainSettings>,
) -> RepoResult<AlloyChainReader<impl Provider + Clone + 'static + use<>>> {
    let mut providers = HashMap::with_capacity(chains.len());

    for (chain, settings) in chains {
        let url = settings.rpc_url.parse().map_err(|e| {
            RepositoryError::ParseError(format!("Invalid RPC URL for {chain}: {e}"))
        })?;
        let provider = ProviderBuilder::new().connect_http(url);
        tracing::info!("Connected {chain} reader to {}", settings.rpc_url);
        providers.insert(*chain, Arc::new(provider));
    }

    Ok(AlloyChainReader::new(providers))
}

/// Sorts a failed `eth_call` by where it failed.
///
/// Transport failures (connection, HTTP status) are `NetworkError`, other
/// JSON-RPC failures are `RpcError`; a JSON-RPC error response (revert) or
/// undecodable return data means the contract itself answered badly.
fn classify_call_error(context: &str, err: ContractCallError) -> RepositoryError {
    let message = format!("{context}: {err}");
    if message.contains("429") {
        tracing::warn!("Rate limited: {message}");
    }

    match err {
        ContractCallError::TransportError(RpcError::Transport(_)) => {
            RepositoryError::NetworkError(message)
        }
        ContractCallError::TransportError(RpcError::ErrorResp(_)) => {
            RepositoryError::ContractError(message)
        }
        ContractCallError::TransportError(_) => RepositoryError::RpcError(message),
        _ => RepositoryError::ContractError(message),
    }
}

#[async_trait]
impl<P: Provider + Clone + Send + Sync + 'static> ChainReader for AlloyChainReader<P> {
    #[instrument(skip(self), err)]
    async fn get_decimals(&self, chain: Chain, token: Address) -> RepoResult<u8> {
        let provider = self.provider(chain)?;
        let contract = IERC20::new(token, provider);

        contract
            .decimals()
            .call()
            .await
            .map_err(|e| classify_call_error(&format!("Failed to get decimals of {token}"), e))
    }

    #[instrument(skip(self), err)]
    async fn get_reserves(
        &self,
        chain: Chain,
        router: Address,
        token_in: Address,
        token_out: Address,
    ) -> RepoResult<(U256, U256)> {
        let provider = self.provider(chain)?;

        // 1. Resolve the factory behind the router
        let router = IUniswapV2Router02::new(router, provider.clone());
        let factory_address = router
            .factory()
            .call()
            .await
            .map_err(|e| classify_call_error("Failed to get factory", e))?;
        let factory = IUniswapV2Factory::new(factory_address, provider.clone());

        // 2. Locate the pair
        let pair_address = factory
            .getPair(token_in, token_out)
            .call()
            .await
            .map_err(|e| classify_call_error("Failed to get pair", e))?;

        if pair_address == Address::ZERO {
            return Err(RepositoryError::PairNotFound {
                token_a: token_in.to_string(),
                token_b: token_out.to_string(),
            });
        }

        // 3. Read reserves and orient them by token0
        let pair = IUniswapV2Pair::new(pair_address, provider);

        let reserves = pair
            .getReserves()
            .call()
            .await
            .map_err(|e| classify_call_error("Failed to get reserves", e))?;

        let token0 = pair
            .token0()
            .call()
            .await
            .map_err(|e| classify_call_error("Failed to get token0", e))?;

        let reserve0 = U256::from(reserves.reserve0);
        let reserve1 = U256::from(reserves.reserve1);

        tracing::debug!(
            "Pair {pair_address} on {chain}: reserve0={reserve0}, reserve1={reserve1}, token0={token0}"
        );

        if token0 == token_in {
            Ok((reserve0, reserve1))
        } else {
            Ok((reserve1, reserve0))
        }
    }
}
