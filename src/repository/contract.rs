use alloy::sol;

// Contract ABIs read on the layer-2 side of an enforcement swap
sol! {
    /// Minimal ERC20 interface, only the precision getter is needed.
    #[sol(rpc)]
    interface IERC20 {
        /// Returns the number of decimals used by the token (e.g. 18, or 6 for USDC).
        function decimals() external view returns (uint8);
    }

    /// Uniswap V2 style pair.
    #[sol(rpc)]
    interface IUniswapV2Pair {
        /// Returns both reserves and the timestamp of the last update.
        function getReserves() external view returns (uint112 reserve0, uint112 reserve1, uint32 blockTimestampLast);

        /// The lower-sorted token of the pair; `reserve0` belongs to it.
        function token0() external view returns (address);
    }

    /// Uniswap V2 style factory, used to locate the pair for two tokens.
    #[sol(rpc)]
    interface IUniswapV2Factory {
        /// Returns the pair address, or the zero address if no pair exists.
        function getPair(address tokenA, address tokenB) external view returns (address pair);
    }

    /// Uniswap V2 style router deployed on each supported chain.
    #[sol(rpc)]
    interface IUniswapV2Router02 {
        /// Returns the factory the router resolves pairs through.
        function factory() external view returns (address);

        /// Swaps the attached native value for as many `path[1]` tokens as
        /// possible, tolerating tokens that take a fee on transfer.
        ///
        /// # Arguments
        /// * `amountOutMin` - Minimum output tokens, otherwise the call reverts
        /// * `path` - `[wrappedNative, token]`
        /// * `to` - Recipient of the output tokens
        /// * `deadline` - Unix timestamp after which the call reverts
        function swapExactETHForTokensSupportingFeeOnTransferTokens(
            uint256 amountOutMin,
            address[] calldata path,
            address to,
            uint256 deadline
        ) external payable;
    }
}
