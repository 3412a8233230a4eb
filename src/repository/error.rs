use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("RPC error: {0}")]
    RpcError(String),

    #[error("Contract call error: {0}")]
    ContractError(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("No pair found for tokens {token_a} and {token_b}")]
    PairNotFound { token_a: String, token_b: String },

    #[error("No provider configured for chain {0}")]
    UnsupportedChain(String),
}
