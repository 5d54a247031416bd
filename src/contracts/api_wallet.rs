use ethers::prelude::*;

// Only the entry point the scripts call; deployment uses the full artifact ABI.
abigen!(
    APIWallet,
    r#"[
        function pay(address provider, uint256 amount, bytes32 invoiceId) external
    ]"#
);

/// USDC uses 6 decimals.
pub const USDC_DECIMALS: u32 = 6;
