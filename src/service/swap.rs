use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::{Json, ServerHandler, tool, tool_handler, tool_router};
use tracing::instrument;

use crate::service::builder::SwapQuoteBuilder;
use crate::service::ServiceResult;
use crate::service::types::{SwapEthL2Request, SwapEthL2Response, SwapEthL2Result};

/// MCP server exposing swap preparation for the supported layer-2 chains.
///
/// A new instance is created per SSE session; all of them share one builder.
pub struct SwapL2Service {
    tool_router: ToolRouter<Self>,
    builder: Arc<SwapQuoteBuilder>,
}

// MCP Tool Layer
#[tool_router]
impl SwapL2Service {
    pub fn new(builder: Arc<SwapQuoteBuilder>) -> Self {
        Self {
            tool_router: Self::tool_router(),
            builder,
        }
    }

    #[instrument(skip(self))]
    #[tool(
        description = "Prepare enforcement transaction parameters for the swap. Returns [proxyAddress, routerAddress, value (wei), gasLimit, isContractCreation, calldata] for buying `tokenAmount` of `tokenAddress` with native ETH on an OP Stack layer-2 chain."
    )]
    pub async fn swap_eth_l2(
        &self,
        Parameters(req): Parameters<SwapEthL2Request>,
    ) -> Json<SwapEthL2Result> {
        match self.swap_eth_l2_impl(req).await {
            Ok(response) => Json(SwapEthL2Result::Success(response)),
            Err(error) => Json(SwapEthL2Result::Error { error }),
        }
    }
}

// Business Logic - Core implementation
impl SwapL2Service {
    async fn swap_eth_l2_impl(&self, req: SwapEthL2Request) -> ServiceResult<SwapEthL2Response> {
        let params = self
            .builder
            .prepare_swap(
                &req.chain_name,
                &req.token_address,
                &req.token_amount,
                &req.user_address,
            )
            .await?;

        Ok(SwapEthL2Response::from(params))
    }
}

#[tool_handler]
impl ServerHandler for SwapL2Service {}
