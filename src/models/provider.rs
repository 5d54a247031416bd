use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Pricing advertised by a provider under `/.well-known/x402`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct X402Metadata {
    pub name: String,
    pub price_usd: f64,
    pub provider_wallet: String,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default = "default_chain")]
    pub chain: String,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
}

fn default_currency() -> String {
    "USDC".to_string()
}

fn default_chain() -> String {
    "Arc".to_string()
}

fn default_endpoint() -> String {
    "/generate".to_string()
}

impl X402Metadata {
    pub fn new(name: impl Into<String>, price_usd: f64, provider_wallet: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            price_usd,
            provider_wallet: provider_wallet.into(),
            currency: default_currency(),
            chain: default_chain(),
            endpoint: default_endpoint(),
        }
    }

    /// Units affordable within `max_usd` at this price.
    pub fn affordable_units(&self, max_usd: f64) -> u64 {
        if self.price_usd <= 0.0 || !max_usd.is_finite() || max_usd <= 0.0 {
            return 0;
        }
        (max_usd / self.price_usd + 1e-9).floor() as u64
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub prompt: String,
    pub quantity: u32,
    pub receipt_tx: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub ok: bool,
    pub images: Vec<String>,
    pub receipt_tx: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub service: String,
    pub version: String,
    pub endpoints: BTreeMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_fills_optional_fields() {
        let json = r#"{"name": "Image API Provider", "price_usd": 0.01, "provider_wallet": "0xabc"}"#;
        let meta: X402Metadata = serde_json::from_str(json).unwrap();
        assert_eq!(meta.currency, "USDC");
        assert_eq!(meta.chain, "Arc");
        assert_eq!(meta.endpoint, "/generate");
    }

    #[test]
    fn affordable_units_rounds_down() {
        let meta = X402Metadata::new("p", 0.01, "0xabc");
        assert_eq!(meta.affordable_units(0.05), 5);
        assert_eq!(meta.affordable_units(0.055), 5);
        assert_eq!(meta.affordable_units(f64::NAN), 0);
        assert_eq!(X402Metadata::new("free", 0.0, "0x").affordable_units(1.0), 0);
    }
}
