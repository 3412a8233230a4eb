use std::sync::Arc;

use alloy::primitives::U256;
use tracing::instrument;

use crate::config::Config;
use crate::repository::{ChainReader, connect_http_chains};
use crate::service::calldata::{AbiValue, SWAP_EXACT_ETH_FOR_TOKENS_SIGNATURE, encode};
use crate::service::chain_registry::{ChainRegistry, parse_address};
use crate::service::fee::apply_fee;
use crate::service::metadata::TokenMetadataResolver;
use crate::service::quoter::{AmmQuoter, SwapPath};
use crate::service::types::{Quote, SwapTransactionParams};
use crate::service::units::TokenAmount;
use crate::service::{QuoteResult, ServiceError};

/// Gas limit forwarded with the enforcement transaction
pub const GAS_LIMIT: u64 = 500_000;

/// Swaps stay valid for 48 hours after preparation
pub const DEADLINE_OFFSET_SECS: i64 = 48 * 60 * 60;

/// `now + 48h` in whole seconds.
pub fn deadline_after(now_secs: i64) -> u64 {
    now_secs.saturating_add(DEADLINE_OFFSET_SECS).max(0) as u64
}

/// Turns a swap request into enforcement transaction parameters.
///
/// Holds no per-request state; one instance serves concurrent requests.
pub struct SwapQuoteBuilder {
    registry: Arc<ChainRegistry>,
    metadata: TokenMetadataResolver,
    quoter: AmmQuoter,
}

impl SwapQuoteBuilder {
    pub fn new(registry: Arc<ChainRegistry>, reader: Arc<dyn ChainReader>) -> Self {
        Self {
            registry,
            metadata: TokenMetadataResolver::new(reader.clone()),
            quoter: AmmQuoter::new(reader),
        }
    }

    /// Builds the registry and one RPC reader per configured chain.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let registry = ChainRegistry::with_overrides(&config.chains)?;
        let reader = connect_http_chains(&config.chains)?;

        tracing::info!(
            "Swap builder ready for chains: {}",
            registry.supported_chains().join(", ")
        );

        Ok(Self::new(Arc::new(registry), Arc::new(reader)))
    }

    pub fn registry(&self) -> &ChainRegistry {
        &self.registry
    }

    /// Prepares the swap, hiding the failure cause from the caller.
    ///
    /// The cause is logged; callers see only
    /// [`ServiceError::SwapPreparationFailed`].
    pub async fn prepare_swap(
        &self,
        chain_name: &str,
        token_address: &str,
        token_amount: &str,
        user_address: &str,
    ) -> Result<SwapTransactionParams, ServiceError> {
        self.try_prepare_swap(chain_name, token_address, token_amount, user_address)
            .await
            .map_err(|e| {
                tracing::error!("Swap preparation on {chain_name} failed: {e}");
                ServiceError::from(e)
            })
    }

    /// Prepares the swap, keeping the precise failure cause.
    #[instrument(skip(self), err)]
    pub async fn try_prepare_swap(
        &self,
        chain_name: &str,
        token_address: &str,
        token_amount: &str,
        user_address: &str,
    ) -> QuoteResult<SwapTransactionParams> {
        let chain = self.registry.resolve(chain_name)?;
        let token = parse_address(token_address)?;
        let recipient = parse_address(user_address)?;

        let decimals = self.metadata.decimals_of(token, chain.chain).await?;

        let path = SwapPath::new(&[chain.wrapped_native_address, token])?;

        let amount_out_min = TokenAmount::parse(token_amount, decimals)?;
        tracing::info!(
            "Amount out (parsed): {} ({amount_out_min})",
            amount_out_min.raw
        );

        let amount_in = self.quoter.amounts_in(&path, chain, &amount_out_min).await?;
        let adjusted = apply_fee(&amount_in, chain)?;

        let deadline = deadline_after(chrono::Utc::now().timestamp());

        let call = encode(
            SWAP_EXACT_ETH_FOR_TOKENS_SIGNATURE,
            &[
                AbiValue::Uint(amount_out_min.raw),
                AbiValue::AddressArray(path.to_vec()),
                AbiValue::Address(recipient),
                AbiValue::Uint(U256::from(deadline)),
            ],
        )?;

        let params = SwapTransactionParams {
            proxy_address: chain.proxy_address,
            router_address: chain.router_address,
            amount_in_with_fee: adjusted.total,
            gas_limit: GAS_LIMIT,
            is_contract_creation: false,
            calldata: call.to_bytes(),
            quote: Quote {
                amount_in,
                amount_out_min,
                deadline,
            },
        };

        tracing::info!(
            "Swap prepared on {}: value={} wei (quote={}, fee={}), deadline={deadline}",
            chain.chain,
            adjusted.total,
            amount_in.raw,
            adjusted.fee
        );

        Ok(params)
    }
}
