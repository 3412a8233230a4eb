use alloy::primitives::{Address, Bytes, U256, hex};
use rmcp::schemars::{self, JsonSchema};
use serde::{Deserialize, Serialize};

use crate::service::ServiceError;
use crate::service::units::TokenAmount;

#[derive(Debug, JsonSchema, Serialize)]
#[serde(untagged)]
pub enum SwapEthL2Result {
    Success(SwapEthL2Response),
    Error { error: ServiceError },
}

#[derive(Debug, Clone, JsonSchema, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapEthL2Request {
    /// Chain to swap on: one of "optimism", "base", "soneium", "modeNetwork", "ink"
    pub chain_name: String,
    /// ERC20 token contract to buy (e.g. "0x4200000000000000000000000000000000000042")
    pub token_address: String,
    /// Amount of tokens to buy in human-readable format (e.g. "10" or "0.5")
    pub token_amount: String,
    /// Address that receives the purchased tokens
    pub user_address: String,
}

/// Arguments of the L1 enforcement transaction, in submission order:
/// `[proxyAddress, routerAddress, value (wei), gasLimit, isContractCreation, data]`
#[derive(Debug, Clone, PartialEq, Eq, JsonSchema, Serialize, Deserialize)]
pub struct EnforcementTransaction(
    pub String,
    pub String,
    pub String,
    pub u64,
    pub bool,
    pub String,
);

#[derive(Debug, Clone, JsonSchema, Serialize, Deserialize)]
pub struct SwapEthL2Response {
    pub transaction: EnforcementTransaction,
}

/// Reverse quote for one swap, before the fee surcharge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quote {
    /// Native input required by the pool
    pub amount_in: TokenAmount,
    /// Requested token output in its smallest unit
    pub amount_out_min: TokenAmount,
    /// Unix timestamp (seconds) after which the router rejects the swap
    pub deadline: u64,
}

/// Everything needed to submit the enforcement transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapTransactionParams {
    pub proxy_address: Address,
    pub router_address: Address,
    pub amount_in_with_fee: U256,
    pub gas_limit: u64,
    pub is_contract_creation: bool,
    pub calldata: Bytes,
    pub quote: Quote,
}

impl From<&SwapTransactionParams> for EnforcementTransaction {
    /// Addresses are EIP-55 checksummed, calldata is lowercase `0x` hex.
    fn from(params: &SwapTransactionParams) -> Self {
        EnforcementTransaction(
            params.proxy_address.to_checksum(None),
            params.router_address.to_checksum(None),
            params.amount_in_with_fee.to_string(),
            params.gas_limit,
            params.is_contract_creation,
            hex::encode_prefixed(&params.calldata),
        )
    }
}

impl From<SwapTransactionParams> for SwapEthL2Response {
    fn from(params: SwapTransactionParams) -> Self {
        Self {
            transaction: EnforcementTransaction::from(&params),
        }
    }
}
