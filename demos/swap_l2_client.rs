use l2_swap_mcp::SwapEthL2Request;
use l2_swap_mcp::config::Config;
use rmcp::ServiceExt;
use rmcp::model::{CallToolRequestParam, ClientCapabilities, ClientInfo, Implementation};
use rmcp::transport::SseClientTransport;

/// Recipient of the purchased tokens
const USER_ADDRESS: &str = "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045";

/// USDC on Base
const BASE_USDC_ADDRESS: &str = "0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913";

/// USDC on OP Mainnet
const OPTIMISM_USDC_ADDRESS: &str = "0x0b2C639c533813f4Aa9D7837CAf62653d097Ff85";

/// Calls the `swap_eth_l2` tool of a running server over SSE.
///
/// 1. Lists the available tools
/// 2. Prepares a swap of ETH for 10 USDC on Base
/// 3. Prepares a swap on OP Mainnet
/// 4. Sends an unsupported chain and prints the generic error
#[tokio::main]
async fn main() {
    let config = Config::from_yaml("config/default.yaml").await;
    let uri = format!("http://localhost:{}/swap/sse", config.server.port);

    let transport = SseClientTransport::start(uri.as_str())
        .await
        .expect("Failed to start SSE client transport");

    let client_info = ClientInfo {
        protocol_version: Default::default(),
        capabilities: ClientCapabilities::default(),
        client_info: Implementation {
            name: "l2-swap-client".to_string(),
            version: "0.1.0".to_string(),
            ..Default::default()
        },
    };

    let client = client_info
        .serve(transport)
        .await
        .inspect_err(|e| {
            eprintln!("client error: {e:?}");
        })
        .expect("Failed to serve client");

    println!("✓ Connected to MCP server at {}\n", uri);

    println!("=== Listing available tools ===");
    let tools_response = client.list_tools(None).await.expect("failed to list tools");

    for tool in &tools_response.tools {
        let desc = tool
            .description
            .as_ref()
            .map(|s| s.as_ref())
            .unwrap_or("No description");

        println!("  - {}: {}", tool.name, desc);
    }
    println!();

    let requests = [
        ("Base: buy 10 USDC", "base", BASE_USDC_ADDRESS, "10"),
        ("OP Mainnet: buy 2.5 USDC", "optimism", OPTIMISM_USDC_ADDRESS, "2.5"),
        ("Unsupported chain", "arbitrum", BASE_USDC_ADDRESS, "10"),
    ];

    for (title, chain_name, token_address, token_amount) in requests {
        println!("=== {title} ===");

        let request = SwapEthL2Request {
            chain_name: chain_name.to_string(),
            token_address: token_address.to_string(),
            token_amount: token_amount.to_string(),
            user_address: USER_ADDRESS.to_string(),
        };

        let arguments = serde_json::to_value(&request)
            .expect("failed to serialize swap request")
            .as_object()
            .cloned();

        let result = client
            .call_tool(CallToolRequestParam {
                name: "swap_eth_l2".into(),
                arguments,
            })
            .await
            .expect("failed to call `swap_eth_l2`");

        println!("{}\n", serde_json::to_string_pretty(&result).unwrap());
    }

    client.cancel().await.expect("failed to close client");
}
