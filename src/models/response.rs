use super::PaymentRecord;
use serde::{Deserialize, Serialize};

/// Body of `GET /payments`. A missing list reads as empty.
#[derive(Serialize, Deserialize, Debug, Default)]
pub struct PaymentsResponse {
    #[serde(default)]
    pub payments: Vec<PaymentRecord>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct HealthStatus {
    pub ok: bool,
}
