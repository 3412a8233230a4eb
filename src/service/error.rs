use rmcp::schemars::{self, JsonSchema};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::chain::UnknownChain;

/// Message shown to callers for every failed swap preparation.
pub const SWAP_PREPARATION_FAILED: &str =
    "Failed to prepare enforcement transaction parameters for the swap.";

/// Distinct causes of a failed quote.
///
/// These never cross the tool boundary; they are logged and asserted on in
/// tests, then collapsed into [`ServiceError::SwapPreparationFailed`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuoteError {
    /// The chain name is not one of the supported networks.
    #[error("Unsupported chain: {0}")]
    UnsupportedChain(String),

    /// The token's decimals could not be read.
    #[error("Token metadata unavailable: {0}")]
    MetadataUnavailable(String),

    /// The pool reserves could not be read.
    #[error("Pool reserves unavailable: {0}")]
    ReservesUnavailable(String),

    /// A hex address is malformed.
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// The swap path is not exactly `[wrappedNative, token]` with distinct hops.
    #[error("Invalid swap path: {0}")]
    InvalidPath(String),

    /// The pool cannot deliver the requested output.
    #[error("Insufficient liquidity: {0}")]
    InsufficientLiquidity(String),

    /// The requested token amount is not a non-negative decimal number.
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// A computed value does not fit in 256 bits.
    #[error("Arithmetic overflow: {0}")]
    Overflow(String),

    /// The function call could not be ABI-encoded.
    #[error("Encoding error: {0}")]
    EncodingError(String),
}

impl From<UnknownChain> for QuoteError {
    fn from(err: UnknownChain) -> Self {
        QuoteError::UnsupportedChain(err.0)
    }
}

/// Error surfaced to tool callers.
#[derive(Debug, Clone, PartialEq, Eq, Error, JsonSchema, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum ServiceError {
    /// Any failure while preparing the swap; the cause is only logged.
    #[error("{0}")]
    SwapPreparationFailed(String),
}

impl ServiceError {
    pub fn swap_preparation_failed() -> Self {
        ServiceError::SwapPreparationFailed(SWAP_PREPARATION_FAILED.to_string())
    }
}

impl From<QuoteError> for ServiceError {
    fn from(_: QuoteError) -> Self {
        ServiceError::swap_preparation_failed()
    }
}
