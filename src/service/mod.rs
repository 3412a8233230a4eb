pub mod builder;
pub mod calldata;
pub mod chain_registry;
pub mod error;
pub mod fee;
pub mod metadata;
pub mod quoter;
pub mod swap;
pub mod types;
pub mod units;


pub use builder::SwapQuoteBuilder;
pub use chain_registry::{ChainConfig, ChainRegistry};
pub use error::{QuoteError, ServiceError};
pub use swap::SwapL2Service;
pub use types::*;

pub(crate) type QuoteResult<T> = std::result::Result<T, QuoteError>;
pub(crate) type ServiceResult<T> = std::result::Result<T, ServiceError>;
