use crate::{error::WalletError, models::X402Metadata};
use reqwest::Client;
use std::time::Duration;

const METADATA_TIMEOUT: Duration = Duration::from_secs(10);

/// Reads a provider's advertised price from `/.well-known/x402`.
pub async fn fetch_x402_metadata(
    client: &Client,
    provider_base_url: &str,
) -> Result<X402Metadata, WalletError> {
    let url = format!("{}/.well-known/x402", provider_base_url.trim_end_matches('/'));

    let response = client
        .get(&url)
        .timeout(METADATA_TIMEOUT)
        .send()
        .await?
        .error_for_status()?;

    let metadata: X402Metadata = response.json().await?;

    tracing::info!(
        "Provider {} charges {} {} per unit on {}",
        metadata.name,
        metadata.price_usd,
        metadata.currency,
        metadata.chain
    );

    Ok(metadata)
}
