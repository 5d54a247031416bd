use super::payment::null_as_default;
use serde::{Deserialize, Serialize};

/// Body of `POST /pay-api`. `max_usd` is passed through unvalidated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayRequest {
    pub task: String,
    pub max_usd: f64,
    pub provider_url: String,
}

/// The backend's confirmation of a completed payment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    #[serde(default, deserialize_with = "null_as_default")]
    pub provider: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub total_cost_usd: f64,

    #[serde(default, deserialize_with = "null_as_default")]
    pub quantity: u64,

    #[serde(rename = "txHash", default, skip_serializing_if = "Option::is_none")]
    pub tx_hash: Option<String>,

    #[serde(rename = "invoiceId", default, skip_serializing_if = "Option::is_none")]
    pub invoice_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayMessage {
    pub message: String,
}

/// Response of `POST /pay-api`, or the local stand-in when the call itself
/// failed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PayResponse {
    #[serde(default)]
    pub ok: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt: Option<Receipt>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<PayMessage>,
}

impl PayResponse {
    pub fn failure(error: impl ToString) -> Self {
        Self {
            ok: false,
            error: Some(error.to_string()),
            ..Default::default()
        }
    }
}
