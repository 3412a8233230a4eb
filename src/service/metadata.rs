use std::sync::Arc;

use alloy::primitives::Address;
use tracing::instrument;

use crate::chain::Chain;
use crate::repository::ChainReader;
use crate::service::{QuoteError, QuoteResult};

/// Reads token precision from the chain. A failed read is not retried.
#[derive(Clone)]
pub struct TokenMetadataResolver {
    reader: Arc<dyn ChainReader>,
}

impl TokenMetadataResolver {
    pub fn new(reader: Arc<dyn ChainReader>) -> Self {
        Self { reader }
    }

    #[instrument(skip(self), err)]
    pub async fn decimals_of(&self, token: Address, chain: Chain) -> QuoteResult<u8> {
        self.reader
            .get_decimals(chain, token)
            .await
            .map_err(|e| QuoteError::MetadataUnavailable(format!("{token} on {chain}: {e}")))
    }
}
