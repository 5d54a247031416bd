use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Reads an absent or `null` field as the type's default.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One entry of the backend's payment history.
///
/// Every field is optional on the wire; numeric fields fall back to zero the
/// same way the web page read them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecord {
    #[serde(default, deserialize_with = "null_as_default")]
    pub provider: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub total_cost_usd: f64,

    #[serde(default, deserialize_with = "null_as_default")]
    pub quantity: u64,

    #[serde(default, deserialize_with = "null_as_default")]
    pub price_usd_per_unit: f64,

    #[serde(rename = "invoiceId", default, skip_serializing_if = "Option::is_none")]
    pub invoice_id: Option<String>,

    #[serde(rename = "txHash", default, skip_serializing_if = "Option::is_none")]
    pub tx_hash: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<PaymentStatus>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_wallet: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PaymentStatus {
    Simulated,
    Other(String),
}

impl PaymentStatus {
    pub fn is_simulated(&self) -> bool {
        matches!(self, PaymentStatus::Simulated)
    }

    pub fn as_str(&self) -> &str {
        match self {
            PaymentStatus::Simulated => "simulated",
            PaymentStatus::Other(s) => s,
        }
    }
}

impl From<String> for PaymentStatus {
    fn from(s: String) -> Self {
        if s == "simulated" {
            PaymentStatus::Simulated
        } else {
            PaymentStatus::Other(s)
        }
    }
}

impl From<PaymentStatus> for String {
    fn from(status: PaymentStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
