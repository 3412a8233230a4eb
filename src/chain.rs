use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Layer-2 networks an enforcement swap can target.
///
/// The textual names are the ones callers send (`modeNetwork` is camelCase).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Chain {
    Optimism,
    Base,
    Soneium,
    ModeNetwork,
    Ink,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported chain: {0}")]
pub struct UnknownChain(pub String);

impl Chain {
    pub const ALL: [Chain; 5] = [
        Chain::Optimism,
        Chain::Base,
        Chain::Soneium,
        Chain::ModeNetwork,
        Chain::Ink,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Chain::Optimism => "optimism",
            Chain::Base => "base",
            Chain::Soneium => "soneium",
            Chain::ModeNetwork => "modeNetwork",
            Chain::Ink => "ink",
        }
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Chain {
    type Err = UnknownChain;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Chain::ALL
            .into_iter()
            .find(|chain| chain.as_str() == s)
            .ok_or_else(|| UnknownChain(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_chain_names_should_work() {
        for chain in Chain::ALL {
            assert_eq!(Chain::from_str(chain.as_str()), Ok(chain));
        }
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert!(Chain::from_str("Optimism").is_err());
        assert!(Chain::from_str("modenetwork").is_err());
        assert!(Chain::from_str("mode").is_err());
    }

    #[test]
    fn test_serde_names_match_display() {
        let json = serde_json::to_string(&Chain::ModeNetwork).unwrap();
        assert_eq!(json, "\"modeNetwork\"");

        let chain: Chain = serde_json::from_str("\"ink\"").unwrap();
        assert_eq!(chain, Chain::Ink);
        assert_eq!(chain.to_string(), "ink");
    }
}
