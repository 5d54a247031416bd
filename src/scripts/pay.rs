use anyhow::Result;
use api_wallet::{
    client::{format_tx_hash, invoice_id, usdc_units, ChainClient},
    config::PayConfig,
};
use ethers::types::Address;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// Fixed demo arguments.
const PROVIDER_ADDRESS: &str = "0x0000000000000000000000000000000000000402";
const AMOUNT_USDC: &str = "0.01";
const INVOICE_LABEL: &str = "test_invoice_001";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = PayConfig::from_env()?;
    let client = ChainClient::from_config(&config.chain)?;

    let provider: Address = PROVIDER_ADDRESS.parse()?;
    let amount = usdc_units(AMOUNT_USDC)?;
    let invoice = invoice_id(INVOICE_LABEL);

    println!("Sending payment...");
    let tx_hash = client
        .pay(config.contract_address, provider, amount, invoice)
        .await?;

    println!("Payment sent!");
    println!("Tx hash: {}", format_tx_hash(&tx_hash));

    Ok(())
}
