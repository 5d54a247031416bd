use crate::{
    config::ChainConfig,
    contracts::{api_wallet::USDC_DECIMALS, APIWallet, ContractArtifact},
};
use anyhow::{bail, Context, Result};
use ethers::{
    prelude::*,
    providers::{Http, Provider},
    types::{Address, H256, U256},
    utils::{keccak256, parse_units},
};
use std::sync::Arc;

pub type SignerClient = SignerMiddleware<Provider<Http>, LocalWallet>;

/// Signer-backed RPC client used by the deploy and pay scripts.
pub struct ChainClient {
    provider: Arc<SignerClient>,
}

impl ChainClient {
    pub fn new(rpc_url: &str, private_key: &str, chain_id: u64) -> Result<Self> {
        let provider = Provider::<Http>::try_from(rpc_url)
            .with_context(|| format!("Invalid RPC URL: {}", rpc_url))?;

        let wallet = private_key
            .parse::<LocalWallet>()
            .context("Invalid DEPLOYER_PRIVATE_KEY")?
            .with_chain_id(chain_id);

        let provider = Arc::new(SignerMiddleware::new(provider, wallet));

        Ok(Self { provider })
    }

    pub fn from_config(config: &ChainConfig) -> Result<Self> {
        Self::new(&config.rpc_url, config.signer_key()?, config.chain_id)
    }

    pub fn signer_address(&self) -> Address {
        self.provider.address()
    }

    /// Deploys `APIWallet` with the USDC token as its only constructor
    /// argument and waits for the deployment to be mined.
    pub async fn deploy_api_wallet(
        &self,
        artifact: &ContractArtifact,
        usdc_address: Address,
    ) -> Result<Address> {
        if !artifact.has_constructor() {
            bail!(
                "{} has no constructor; expected one taking the USDC address",
                artifact.contract_name
            );
        }

        let factory = ContractFactory::new(
            artifact.abi.clone(),
            artifact.bytecode.clone(),
            self.provider.clone(),
        );

        tracing::info!(
            "Deploying {} from {:?}",
            artifact.contract_name,
            self.signer_address()
        );

        let (contract, receipt) = factory
            .deploy(usdc_address)
            .context("Failed to encode constructor arguments")?
            .send_with_receipt()
            .await
            .context("Deployment failed")?;

        tracing::info!(
            "Deployment mined in tx {:?} (block {:?})",
            receipt.transaction_hash,
            receipt.block_number
        );

        Ok(contract.address())
    }

    /// Calls `pay` and blocks until one confirmation.
    pub async fn pay(
        &self,
        wallet_address: Address,
        provider: Address,
        amount: U256,
        invoice_id: [u8; 32],
    ) -> Result<H256> {
        let wallet = APIWallet::new(wallet_address, self.provider.clone());

        tracing::info!(
            "Paying {} USDC units to {:?} (invoice 0x{})",
            amount,
            provider,
            hex::encode(invoice_id)
        );

        let call = wallet.pay(provider, amount, invoice_id);
        let pending_tx = call.send().await.context("Failed to send pay transaction")?;

        tracing::info!("Transaction {:?} sent, waiting for confirmation...", *pending_tx);

        let receipt = pending_tx
            .await
            .context("Failed to get transaction receipt")?
            .ok_or_else(|| anyhow::anyhow!("Transaction dropped"))?;

        if receipt.status != Some(1.into()) {
            bail!("Transaction {:?} reverted", receipt.transaction_hash);
        }

        tracing::info!("Payment confirmed: {:?}", receipt.transaction_hash);

        Ok(receipt.transaction_hash)
    }
}

/// Converts a decimal USDC amount such as `"0.01"` to base units.
pub fn usdc_units(amount: &str) -> Result<U256> {
    let units = parse_units(amount.trim(), USDC_DECIMALS)
        .with_context(|| format!("Invalid USDC amount: {}", amount))?;
    Ok(units.into())
}

/// `keccak256` of the UTF-8 label, as used for invoice ids.
pub fn invoice_id(label: &str) -> [u8; 32] {
    keccak256(label.as_bytes())
}

pub fn format_tx_hash(hash: &H256) -> String {
    format!("{:?}", hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_usdc_amounts() {
        assert_eq!(usdc_units("0.01").unwrap(), U256::from(10_000u64));
        assert_eq!(usdc_units("1").unwrap(), U256::from(1_000_000u64));
        assert!(usdc_units("ten").is_err());
    }

    #[test]
    fn invoice_id_is_keccak_of_label() {
        let id = invoice_id("test_invoice_001");
        assert_eq!(id, keccak256(b"test_invoice_001"));
        assert_ne!(id, invoice_id("test_invoice_002"));
    }

    #[test]
    fn tx_hash_formats_as_full_hex() {
        let formatted = format_tx_hash(&H256::repeat_byte(0xab));
        assert_eq!(formatted.len(), 66);
        assert!(formatted.starts_with("0x"));
        assert!(formatted[2..].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[tokio::test]
    async fn deploy_requires_a_constructor() {
        let client = ChainClient::new(
            "http://127.0.0.1:1",
            "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80",
            31337,
        )
        .unwrap();
        let artifact = ContractArtifact::from_json(
            r#"{"contractName": "NoCtor", "abi": [], "bytecode": "0x6080604052"}"#,
        )
        .unwrap();

        let err = client
            .deploy_api_wallet(&artifact, Address::repeat_byte(0x01))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("no constructor"));
    }

    #[test]
    fn client_rejects_bad_key() {
        let result = ChainClient::new("http://localhost:8545", "0xnot-a-key", 5042002);
        assert!(result.is_err());
    }

    #[test]
    fn client_derives_signer_address() {
        // Well-known first Hardhat account.
        let client = ChainClient::new(
            "http://localhost:8545",
            "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80",
            31337,
        )
        .unwrap();

        let expected: Address = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266".parse().unwrap();
        assert_eq!(client.signer_address(), expected);
    }
}
