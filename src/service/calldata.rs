//! ABI encoding of router calls.
//!
//! Supports the argument types a native-for-token router swap needs:
//! `uint256`, `address` and the dynamic `address[]`. Static arguments occupy
//! one 32-byte head word each; a dynamic argument's head word is the byte
//! offset (from the start of the arguments) of its tail, which holds the
//! element count followed by one word per element.

use std::fmt;

use alloy::primitives::{Address, Bytes, U256, hex, keccak256};

use crate::service::{QuoteError, QuoteResult};

/// Canonical signature of the fee-on-transfer tolerant native-for-token swap
pub const SWAP_EXACT_ETH_FOR_TOKENS_SIGNATURE: &str =
    "swapExactETHForTokensSupportingFeeOnTransferTokens(uint256,address[],address,uint256)";

const WORD_SIZE: usize = 32;
const ADDRESS_SIZE: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbiType {
    Uint256,
    Address,
    AddressArray,
}

impl AbiType {
    fn parse(name: &str) -> QuoteResult<Self> {
        match name {
            "uint" | "uint256" => Ok(AbiType::Uint256),
            "address" => Ok(AbiType::Address),
            "address[]" => Ok(AbiType::AddressArray),
            other => Err(QuoteError::EncodingError(format!(
                "unsupported parameter type '{other}'"
            ))),
        }
    }

    fn is_dynamic(&self) -> bool {
        matches!(self, AbiType::AddressArray)
    }
}

impl fmt::Display for AbiType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AbiType::Uint256 => "uint256",
            AbiType::Address => "address",
            AbiType::AddressArray => "address[]",
        })
    }
}

/// A typed call argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbiValue {
    Uint(U256),
    Address(Address),
    AddressArray(Vec<Address>),
}

impl AbiValue {
    /// Builds an address argument from raw bytes, which must be exactly 20 long.
    pub fn address_from_slice(bytes: &[u8]) -> QuoteResult<Self> {
        if bytes.len() != ADDRESS_SIZE {
            return Err(QuoteError::EncodingError(format!(
                "address must be 20 bytes, got {}",
                bytes.len()
            )));
        }
        Ok(AbiValue::Address(Address::from_slice(bytes)))
    }

    pub fn abi_type(&self) -> AbiType {
        match self {
            AbiValue::Uint(_) => AbiType::Uint256,
            AbiValue::Address(_) => AbiType::Address,
            AbiValue::AddressArray(_) => AbiType::AddressArray,
        }
    }
}

/// A parsed function signature.
///
/// Accepts the canonical form as well as Solidity-style declarations, e.g.
/// `swap(uint amountOutMin, address[] calldata path, address to,uint deadline)`:
/// parameter names and data locations are dropped and `uint` is widened to
/// `uint256`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionSignature {
    name: String,
    params: Vec<AbiType>,
}

impl FunctionSignature {
    pub fn parse(signature: &str) -> QuoteResult<Self> {
        let signature = signature.trim();
        let malformed =
            || QuoteError::EncodingError(format!("malformed function signature '{signature}'"));

        let (name, rest) = signature.split_once('(').ok_or_else(malformed)?;
        let params = rest.strip_suffix(')').ok_or_else(malformed)?;

        let name = name.trim();
        let valid_name = name
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
            && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !valid_name || params.contains(['(', ')']) {
            return Err(malformed());
        }

        let params = if params.trim().is_empty() {
            Vec::new()
        } else {
            params
                .split(',')
                .map(|param| {
                    let type_name = param.split_whitespace().next().ok_or_else(malformed)?;
                    AbiType::parse(type_name)
                })
                .collect::<QuoteResult<Vec<_>>>()?
        };

        Ok(Self {
            name: name.to_string(),
            params,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &[AbiType] {
        &self.params
    }

    /// `name(type1,type2,...)`, the preimage of the selector.
    pub fn canonical(&self) -> String {
        let params: Vec<String> = self.params.iter().map(ToString::to_string).collect();
        format!("{}({})", self.name, params.join(","))
    }

    /// First four bytes of the keccak-256 hash of the canonical signature.
    pub fn selector(&self) -> [u8; 4] {
        let hash = keccak256(self.canonical().as_bytes());
        let mut selector = [0u8; 4];
        selector.copy_from_slice(&hash[..4]);
        selector
    }
}

/// Function selector plus ABI-encoded arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedCall {
    pub selector: [u8; 4],
    pub arguments: Vec<u8>,
}

impl EncodedCall {
    pub fn to_bytes(&self) -> Bytes {
        let mut data = Vec::with_capacity(4 + self.arguments.len());
        data.extend_from_slice(&self.selector);
        data.extend_from_slice(&self.arguments);
        Bytes::from(data)
    }

    /// Lowercase hex with `0x` prefix.
    pub fn to_hex(&self) -> String {
        hex::encode_prefixed(self.to_bytes())
    }
}

/// Encodes a call to `signature` with `args`, in declaration order.
pub fn encode(signature: &str, args: &[AbiValue]) -> QuoteResult<EncodedCall> {
    let function = FunctionSignature::parse(signature)?;
    encode_call(&function, args)
}

pub fn encode_call(function: &FunctionSignature, args: &[AbiValue]) -> QuoteResult<EncodedCall> {
    if function.params().len() != args.len() {
        return Err(QuoteError::EncodingError(format!(
            "{} expects {} arguments, got {}",
            function.canonical(),
            function.params().len(),
            args.len()
        )));
    }

    let head_size = args.len() * WORD_SIZE;
    let mut head = Vec::with_capacity(head_size);
    let mut tail = Vec::new();

    for (index, (expected, arg)) in function.params().iter().zip(args).enumerate() {
        if *expected != arg.abi_type() {
            return Err(QuoteError::EncodingError(format!(
                "argument {index} of {} must be {expected}, got {}",
                function.name(),
                arg.abi_type()
            )));
        }

        if expected.is_dynamic() {
            head.extend_from_slice(&usize_word(head_size + tail.len()));
        }

        match arg {
            AbiValue::Uint(value) => head.extend_from_slice(&uint_word(*value)),
            AbiValue::Address(address) => head.extend_from_slice(&address_word(address)),
            AbiValue::AddressArray(addresses) => {
                tail.extend_from_slice(&usize_word(addresses.len()));
                for address in addresses {
                    tail.extend_from_slice(&address_word(address));
                }
            }
        }
    }

    head.extend_from_slice(&tail);

    Ok(EncodedCall {
        selector: function.selector(),
        arguments: head,
    })
}

fn uint_word(value: U256) -> [u8; WORD_SIZE] {
    value.to_be_bytes::<WORD_SIZE>()
}

fn usize_word(value: usize) -> [u8; WORD_SIZE] {
    uint_word(U256::from(value))
}

/// Address right-aligned in a zeroed word.
fn address_word(address: &Address) -> [u8; WORD_SIZE] {
    let mut word = [0u8; WORD_SIZE];
    word[WORD_SIZE - ADDRESS_SIZE..].copy_from_slice(address.as_slice());
    word
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::contract::IUniswapV2Router02;
    use alloy::primitives::address;
    use alloy::sol_types::SolCall;

    const WETH: Address = address!("0x4200000000000000000000000000000000000006");
    const TOKEN: Address = address!("0x1111111111111111111111111111111111111111");
    const RECIPIENT: Address = address!("0x2222222222222222222222222222222222222222");

    fn swap_args() -> Vec<AbiValue> {
        vec![
            AbiValue::Uint(U256::from(10_000_000_000_000_000_000u128)),
            AbiValue::AddressArray(vec![WETH, TOKEN]),
            AbiValue::Address(RECIPIENT),
            AbiValue::Uint(U256::from(1_700_000_000u64)),
        ]
    }

    #[test]
    fn test_swap_selector_should_match() {
        let function = FunctionSignature::parse(SWAP_EXACT_ETH_FOR_TOKENS_SIGNATURE).unwrap();
        assert_eq!(function.selector(), [0xb6, 0xf9, 0xde, 0x95]);

        let transfer = FunctionSignature::parse("transfer(address,uint256)").unwrap();
        assert_eq!(transfer.selector(), [0xa9, 0x05, 0x9c, 0xbb]);
    }

    #[test]
    fn test_encode_swap_golden_calldata() {
        let call = encode(SWAP_EXACT_ETH_FOR_TOKENS_SIGNATURE, &swap_args()).unwrap();

        let expected = concat!(
            "0xb6f9de95",
            // amountOutMin = 10 * 10^18
            "0000000000000000000000000000000000000000000000008ac7230489e80000",
            // offset of path = 4 head words
            "0000000000000000000000000000000000000000000000000000000000000080",
            // to
            "0000000000000000000000002222222222222222222222222222222222222222",
            // deadline
            "000000000000000000000000000000000000000000000000000000006553f100",
            // path length
            "0000000000000000000000000000000000000000000000000000000000000002",
            "0000000000000000000000004200000000000000000000000000000000000006",
            "0000000000000000000000001111111111111111111111111111111111111111",
        );
        assert_eq!(call.to_hex(), expected);
        assert_eq!(call.arguments.len(), 7 * WORD_SIZE);
    }

    #[test]
    fn test_encode_swap_matches_sol_call() {
        let call = encode(SWAP_EXACT_ETH_FOR_TOKENS_SIGNATURE, &swap_args()).unwrap();

        let sol_call = IUniswapV2Router02::swapExactETHForTokensSupportingFeeOnTransferTokensCall {
            amountOutMin: U256::from(10_000_000_000_000_000_000u128),
            path: vec![WETH, TOKEN],
            to: RECIPIENT,
            deadline: U256::from(1_700_000_000u64),
        };
        assert_eq!(call.to_bytes().to_vec(), sol_call.abi_encode());
    }

    #[test]
    fn test_parse_solidity_style_signature() {
        let function = FunctionSignature::parse(
            "swapExactETHForTokensSupportingFeeOnTransferTokens(uint amountOutMin, address[] calldata path, address to,uint deadline)",
        )
        .unwrap();

        assert_eq!(function.canonical(), SWAP_EXACT_ETH_FOR_TOKENS_SIGNATURE);
        assert_eq!(
            function.params(),
            &[
                AbiType::Uint256,
                AbiType::AddressArray,
                AbiType::Address,
                AbiType::Uint256
            ]
        );
    }

    #[test]
    fn test_parse_malformed_signature_should_fail() {
        for signature in [
            "",
            "noParens",
            "(uint256)",
            "1swap(uint256)",
            "swap(uint256",
            "swap(uint256,)",
            "swap((uint256,address))",
            "swap(bytes)",
            "swap(uint128)",
        ] {
            assert!(
                matches!(
                    FunctionSignature::parse(signature),
                    Err(QuoteError::EncodingError(_))
                ),
                "'{signature}' should be rejected"
            );
        }
    }

    #[test]
    fn test_encode_no_arguments() {
        let call = encode("sync()", &[]).unwrap();
        assert!(call.arguments.is_empty());
        assert_eq!(call.to_bytes().len(), 4);
    }

    #[test]
    fn test_encode_empty_array() {
        let call = encode("f(address[],uint256)", &[
            AbiValue::AddressArray(vec![]),
            AbiValue::Uint(U256::from(7u64)),
        ])
        .unwrap();

        let words: Vec<&[u8]> = call.arguments.chunks(WORD_SIZE).collect();
        assert_eq!(words.len(), 3);
        assert_eq!(words[0], usize_word(64));
        assert_eq!(words[1], uint_word(U256::from(7u64)));
        assert_eq!(words[2], usize_word(0));
    }

    #[test]
    fn test_encode_argument_mismatch_should_fail() {
        let mut args = swap_args();
        args.swap(2, 3);
        let result = encode(SWAP_EXACT_ETH_FOR_TOKENS_SIGNATURE, &args);
        assert!(matches!(result, Err(QuoteError::EncodingError(_))));

        let result = encode(SWAP_EXACT_ETH_FOR_TOKENS_SIGNATURE, &swap_args()[..3]);
        assert!(matches!(result, Err(QuoteError::EncodingError(_))));
    }

    #[test]
    fn test_address_from_slice() {
        let value = AbiValue::address_from_slice(WETH.as_slice()).unwrap();
        assert_eq!(value, AbiValue::Address(WETH));

        for len in [0usize, 19, 21, 32] {
            let result = AbiValue::address_from_slice(&vec![0x11; len]);
            assert!(matches!(result, Err(QuoteError::EncodingError(_))));
        }
    }
}
