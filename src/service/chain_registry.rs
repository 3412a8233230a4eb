use std::collections::HashMap;
use std::str::FromStr;

use alloy::primitives::{Address, address};

use crate::chain::Chain;
use crate::config::ChainSettings;
use crate::service::{QuoteError, QuoteResult};

/// Wrapped ETH predeploy, identical on every OP Stack chain
pub const WRAPPED_NATIVE_ADDRESS: Address = address!("0x4200000000000000000000000000000000000006");

/// Default enforcement surcharge in parts per thousand
pub const DEFAULT_FEE_RATE_BPS: u64 = 3;

// Uniswap V2 style routers on the layer-2 networks
const OPTIMISM_ROUTER: Address = address!("0x4A7b5Da61326A6379179b40d00F57E5bbDC962c2");
const BASE_ROUTER: Address = address!("0x4752ba5DBc23f44D87826276BF6Fd6b1C372aD24");
const SONEIUM_ROUTER: Address = address!("0x273F68c234fA55b550b40E563c4a488e0d334320");
const MODE_ROUTER: Address = address!("0x5D61c537393cf21893BE619E36fC94cd73C77DD3");
const INK_ROUTER: Address = address!("0x458C5d5B75ccBA22651D2C5b61cB1EA1e0b0f95D");

// OptimismPortal proxies on L1 that accept forced deposit transactions
const OPTIMISM_PORTAL: Address = address!("0xbEb5Fc579115071764c7423A4f12eDde41f106Ed");
const BASE_PORTAL: Address = address!("0x49048044D57e1C92A77f79988d21Fa8fAF74E97e");
const SONEIUM_PORTAL: Address = address!("0x88e529A6ccd302c948689Cd5156C83D4614FAE92");
const MODE_PORTAL: Address = address!("0x8B34b14c7c7123459Cf3076b8Cb929BE097d0C07");
const INK_PORTAL: Address = address!("0x5d66C1782664115999C47c9fA5cd031f495D3e4F");

/// Contracts and fee rate for one chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainConfig {
    pub chain: Chain,
    /// Router the swap calldata is addressed to
    pub router_address: Address,
    /// L1 contract the enforcement transaction is submitted through
    pub proxy_address: Address,
    pub wrapped_native_address: Address,
    /// Surcharge in parts per thousand (3 = 0.3%)
    pub fee_rate_bps: u64,
}

/// Immutable chain-name → contracts mapping, built once at startup.
#[derive(Debug, Clone)]
pub struct ChainRegistry {
    chains: HashMap<Chain, ChainConfig>,
}

impl ChainRegistry {
    /// Create a registry holding the built-in deployment of every supported chain
    pub fn new() -> Self {
        Self {
            chains: Self::init_registry(),
        }
    }

    fn init_registry() -> HashMap<Chain, ChainConfig> {
        let entries = [
            (Chain::Optimism, OPTIMISM_ROUTER, OPTIMISM_PORTAL),
            (Chain::Base, BASE_ROUTER, BASE_PORTAL),
            (Chain::Soneium, SONEIUM_ROUTER, SONEIUM_PORTAL),
            (Chain::ModeNetwork, MODE_ROUTER, MODE_PORTAL),
            (Chain::Ink, INK_ROUTER, INK_PORTAL),
        ];

        entries
            .into_iter()
            .map(|(chain, router_address, proxy_address)| {
                let config = ChainConfig {
                    chain,
                    router_address,
                    proxy_address,
                    wrapped_native_address: WRAPPED_NATIVE_ADDRESS,
                    fee_rate_bps: DEFAULT_FEE_RATE_BPS,
                };
                (chain, config)
            })
            .collect()
    }

    /// Create a registry from the built-in deployment with per-chain config overrides applied
    pub fn with_overrides(settings: &HashMap<Chain, ChainSettings>) -> QuoteResult<Self> {
        let mut registry = Self::new();

        for (chain, settings) in settings {
            let Some(entry) = registry.chains.get_mut(chain) else {
                continue;
            };

            if let Some(rate) = settings.fee_rate_bps {
                entry.fee_rate_bps = rate;
            }
            if let Some(router) = &settings.router_address {
                entry.router_address = parse_address(router)?;
            }
            if let Some(proxy) = &settings.proxy_address {
                entry.proxy_address = parse_address(proxy)?;
            }

            tracing::debug!("Chain {chain} configured: {entry:?}");
        }

        Ok(registry)
    }

    /// Lookup chain config by its caller-facing name (case-sensitive)
    pub fn resolve(&self, chain_name: &str) -> QuoteResult<&ChainConfig> {
        let chain = Chain::from_str(chain_name)?;
        self.get(chain)
    }

    pub fn get(&self, chain: Chain) -> QuoteResult<&ChainConfig> {
        self.chains
            .get(&chain)
            .ok_or_else(|| QuoteError::UnsupportedChain(chain.to_string()))
    }

    /// Get list of supported chain names in declaration order
    pub fn supported_chains(&self) -> Vec<&'static str> {
        let mut chains: Vec<Chain> = self.chains.keys().copied().collect();
        chains.sort();
        chains.into_iter().map(|chain| chain.as_str()).collect()
    }
}

impl Default for ChainRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses a 20-byte hex address, with or without `0x`.
pub fn parse_address(value: &str) -> QuoteResult<Address> {
    Address::from_str(value.trim()).map_err(|e| QuoteError::InvalidAddress(format!("{value}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> ChainSettings {
        ChainSettings {
            rpc_url: "https://mainnet.base.org".to_string(),
            fee_rate_bps: None,
            router_address: None,
            proxy_address: None,
        }
    }

    #[test]
    fn test_resolve_every_supported_chain() {
        let registry = ChainRegistry::new();

        for name in ["optimism", "base", "soneium", "modeNetwork", "ink"] {
            let config = registry.resolve(name).unwrap();
            assert_eq!(config.chain.as_str(), name);
            assert_ne!(config.router_address, Address::ZERO);
            assert_ne!(config.proxy_address, Address::ZERO);
            assert_eq!(config.wrapped_native_address, WRAPPED_NATIVE_ADDRESS);
            assert_eq!(config.fee_rate_bps, DEFAULT_FEE_RATE_BPS);
        }
    }

    #[test]
    fn test_resolve_unknown_chain_should_fail() {
        let registry = ChainRegistry::new();

        for name in ["arbitrum", "", "Optimism", "mode"] {
            assert_eq!(
                registry.resolve(name),
                Err(QuoteError::UnsupportedChain(name.to_string()))
            );
        }
    }

    #[test]
    fn test_supported_chains() {
        let registry = ChainRegistry::new();
        assert_eq!(
            registry.supported_chains(),
            vec!["optimism", "base", "soneium", "modeNetwork", "ink"]
        );
    }

    #[test]
    fn test_with_overrides_should_work() {
        let router = "0x1111111111111111111111111111111111111111";
        let overrides = HashMap::from([(
            Chain::Base,
            ChainSettings {
                fee_rate_bps: Some(7),
                router_address: Some(router.to_string()),
                ..settings()
            },
        )]);

        let registry = ChainRegistry::with_overrides(&overrides).unwrap();
        let base = registry.get(Chain::Base).unwrap();
        assert_eq!(base.fee_rate_bps, 7);
        assert_eq!(base.router_address, parse_address(router).unwrap());
        assert_eq!(base.proxy_address, BASE_PORTAL);

        // Untouched chains keep their defaults
        let optimism = registry.get(Chain::Optimism).unwrap();
        assert_eq!(optimism.fee_rate_bps, DEFAULT_FEE_RATE_BPS);
        assert_eq!(optimism.router_address, OPTIMISM_ROUTER);
    }

    #[test]
    fn test_with_overrides_invalid_address_should_fail() {
        let overrides = HashMap::from([(
            Chain::Ink,
            ChainSettings {
                proxy_address: Some("0x1234".to_string()),
                ..settings()
            },
        )]);

        let result = ChainRegistry::with_overrides(&overrides);
        assert!(matches!(result, Err(QuoteError::InvalidAddress(_))));
    }

    #[test]
    fn test_parse_address() {
        let parsed = parse_address("0x4200000000000000000000000000000000000006").unwrap();
        assert_eq!(parsed, WRAPPED_NATIVE_ADDRESS);

        assert!(parse_address("4200000000000000000000000000000000000006").is_ok());
        assert!(parse_address("0x42").is_err());
        assert!(parse_address("not an address").is_err());
    }
}
