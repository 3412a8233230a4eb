pub mod app;
pub mod chain;
pub mod config;
pub mod middleware;
pub mod repository;
pub mod service;

pub use app::build_app;
pub use chain::Chain;

// Re-export commonly used types for tests and clients
pub use service::{
    EnforcementTransaction, ServiceError, SwapEthL2Request, SwapEthL2Response, SwapEthL2Result,
    SwapL2Service, SwapQuoteBuilder,
};
