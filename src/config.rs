use std::collections::HashMap;
use std::{fs, path::Path};

use dotenv::dotenv;
use envsubst::substitute;
use serde::Deserialize;

use crate::chain::Chain;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub chains: HashMap<Chain, ChainSettings>,
}

impl Config {
    pub async fn from_yaml(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let file_content = fs::read_to_string(path)
            .unwrap_or_else(|e| panic!("failed to read config file from path {path:?}: {e}"));

        Self::from_yaml_str(&file_content)
    }

    /// Parses YAML after substituting `${SERVER_*}` and `${RPC_*}` environment variables.
    pub fn from_yaml_str(content: &str) -> Self {
        dotenv().ok();

        let env_vars: HashMap<String, String> = std::env::vars()
            .filter(|(key, _)| key.starts_with("SERVER_") || key.starts_with("RPC_"))
            .collect();

        let interpolated = substitute(content, &env_vars)
            .expect("Failed to substitute environment variables in YAML");

        serde_yaml::from_str(&interpolated).expect("Failed to parse YAML configuration")
    }

    pub fn server_uri(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Per-chain deployment settings. Unset optional fields fall back to the
/// built-in chain registry values.
#[derive(Debug, Clone, Deserialize)]
pub struct ChainSettings {
    pub rpc_url: String,
    #[serde(default)]
    pub fee_rate_bps: Option<u64>,
    #[serde(default)]
    pub router_address: Option<String>,
    #[serde(default)]
    pub proxy_address: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[serial_test::serial]
    async fn test_load_config_from_yaml() {
        let config = Config::from_yaml("config/test.yaml").await;

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8000);

        assert_eq!(config.chains.len(), Chain::ALL.len());
        let optimism = &config.chains[&Chain::Optimism];
        assert_eq!(optimism.rpc_url, "https://mainnet.optimism.io");
        assert_eq!(optimism.fee_rate_bps, None);

        let base = &config.chains[&Chain::Base];
        assert_eq!(base.fee_rate_bps, Some(5));
        assert!(base.router_address.is_none());
    }

    #[tokio::test]
    #[serial_test::serial]
    async fn test_config_with_env_vars() {
        unsafe {
            std::env::set_var("SERVER_PORT", "9100");
            std::env::set_var("RPC_INK_URL", "https://ink.example.org");
        }

        let yaml = r#"
server:
  host: 127.0.0.1
  port: ${SERVER_PORT}
chains:
  ink:
    rpc_url: ${RPC_INK_URL}
"#;
        let config = Config::from_yaml_str(yaml);

        assert_eq!(config.server.port, 9100);
        assert_eq!(config.server_uri(), "127.0.0.1:9100");
        assert_eq!(config.chains[&Chain::Ink].rpc_url, "https://ink.example.org");

        unsafe {
            std::env::remove_var("SERVER_PORT");
            std::env::remove_var("RPC_INK_URL");
        }
    }

    #[test]
    #[should_panic(expected = "Failed to parse YAML configuration")]
    fn test_unknown_chain_key_is_rejected() {
        let yaml = r#"
server:
  host: 0.0.0.0
  port: 8000
chains:
  arbitrum:
    rpc_url: https://arb1.arbitrum.io/rpc
"#;
        Config::from_yaml_str(yaml);
    }
}
