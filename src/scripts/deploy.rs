use anyhow::Result;
use api_wallet::{client::ChainClient, config::DeployConfig, contracts::ContractArtifact};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Fails before any RPC client exists when USDC_ADDRESS is missing.
    let config = DeployConfig::from_env()?;

    println!("Deploying APIWallet contract...");
    println!("USDC Address: {:?}", config.usdc_address);

    let artifact = ContractArtifact::load(&config.artifact_path)?;
    let client = ChainClient::from_config(&config.chain)?;

    let address = client
        .deploy_api_wallet(&artifact, config.usdc_address)
        .await?;

    println!("APIWallet deployed to: {:?}", address);
    println!();
    println!("Add this to your backend .env:");
    println!("APIWALLET_CONTRACT={:?}", address);

    Ok(())
}
