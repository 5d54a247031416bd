use anyhow::{bail, Context, Result};
use ethers::types::Address;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_ARC_RPC_URL: &str = "https://rpc.arc.xyz";
pub const DEFAULT_ARC_CHAIN_ID: u64 = 5042002;
pub const DEFAULT_ARTIFACT_PATH: &str = "artifacts/contracts/APIWallet.sol/APIWallet.json";
pub const DEFAULT_STARTING_BALANCE_USD: f64 = 1.0;

/// Console client settings. The `NEXT_PUBLIC_*` names are shared with the
/// web build so one `.env` drives both.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub backend_url: String,
    pub provider_url: String,
    pub poll_interval: Duration,
    pub refresh_delay: Duration,
    pub starting_balance_usd: f64,
}

impl ClientConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Self {
            backend_url: required(&lookup, "NEXT_PUBLIC_BACKEND_URL")?,
            provider_url: required(&lookup, "NEXT_PUBLIC_PROVIDER_URL")?,
            poll_interval: Duration::from_secs(
                parse_or(&lookup, "POLL_INTERVAL_SECS", 5)?,
            ),
            refresh_delay: Duration::from_millis(
                parse_or(&lookup, "REFRESH_DELAY_MS", 1000)?,
            ),
            starting_balance_usd: parse_or(
                &lookup,
                "STARTING_BALANCE_USD",
                DEFAULT_STARTING_BALANCE_USD,
            )?,
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !self.backend_url.starts_with("http") {
            bail!("NEXT_PUBLIC_BACKEND_URL must be HTTP(S) URL");
        }
        if !self.provider_url.starts_with("http") {
            bail!("NEXT_PUBLIC_PROVIDER_URL must be HTTP(S) URL");
        }
        if self.poll_interval.is_zero() {
            bail!("POLL_INTERVAL_SECS must be greater than zero");
        }

        tracing::debug!(backend = %self.backend_url, "Client configuration validated");
        Ok(())
    }
}

/// Network settings shared by the contract scripts (the `arc` network).
#[derive(Debug, Clone)]
pub struct ChainConfig {
    pub rpc_url: String,
    pub chain_id: u64,
    pub private_key: Option<String>,
}

impl ChainConfig {
    pub fn from_lookup<F>(lookup: &F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Self {
            rpc_url: lookup("ARC_RPC_URL").unwrap_or_else(|| DEFAULT_ARC_RPC_URL.to_string()),
            chain_id: parse_or(lookup, "ARC_CHAIN_ID", DEFAULT_ARC_CHAIN_ID)?,
            private_key: lookup("DEPLOYER_PRIVATE_KEY").filter(|key| !key.is_empty()),
        };

        config.validate()?;
        Ok(config)
    }

    /// The signing key. Without one the network has no accounts to send from.
    pub fn signer_key(&self) -> Result<&str> {
        self.private_key
            .as_deref()
            .context("DEPLOYER_PRIVATE_KEY not set in .env")
    }

    fn validate(&self) -> Result<()> {
        if !self.rpc_url.starts_with("http") {
            bail!("ARC_RPC_URL must be HTTP(S) URL");
        }
        if let Some(key) = &self.private_key {
            if !key.starts_with("0x") {
                bail!("DEPLOYER_PRIVATE_KEY must start with 0x");
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct DeployConfig {
    pub usdc_address: Address,
    pub artifact_path: PathBuf,
    pub chain: ChainConfig,
}

impl DeployConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // The token address is checked before anything else is read.
        let usdc_address = parse_address(&lookup, "USDC_ADDRESS")?;

        Ok(Self {
            usdc_address,
            artifact_path: lookup("APIWALLET_ARTIFACT")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_ARTIFACT_PATH)),
            chain: ChainConfig::from_lookup(&lookup)?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct PayConfig {
    pub contract_address: Address,
    pub chain: ChainConfig,
}

impl PayConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let contract_address = parse_address(&lookup, "APIWALLET_CONTRACT")?;

        Ok(Self {
            contract_address,
            chain: ChainConfig::from_lookup(&lookup)?,
        })
    }
}

/// Settings for the mock x402 provider service.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub host: String,
    pub port: u16,
    pub name: String,
    pub price_usd: f64,
    pub provider_wallet: String,
}

impl ProviderConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(&lookup, "PORT", 8001)?,
            name: lookup("PROVIDER_NAME").unwrap_or_else(|| "Image API Provider".to_string()),
            price_usd: parse_or(&lookup, "PROVIDER_PRICE_USD", 0.01)?,
            provider_wallet: lookup("PROVIDER_WALLET")
                .unwrap_or_else(|| "0xPROVIDER_WALLET_ON_ARC".to_string()),
        };

        if !config.price_usd.is_finite() || config.price_usd < 0.0 {
            bail!("PROVIDER_PRICE_USD must be a non-negative number");
        }

        Ok(config)
    }
}

fn required<F>(lookup: &F, var: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(var)
        .filter(|value| !value.is_empty())
        .with_context(|| format!("{} not set in .env", var))
}

fn parse_or<F, T>(lookup: &F, var: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(var) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("Invalid {}: {}", var, raw)),
        None => Ok(default),
    }
}

fn parse_address<F>(lookup: &F, var: &str) -> Result<Address>
where
    F: Fn(&str) -> Option<String>,
{
    let addr_str = required(lookup, var)?;
    Address::from_str(addr_str.trim()).with_context(|| format!("Invalid address for {}", var))
}
