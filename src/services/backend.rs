use crate::{
    error::WalletError,
    models::{PayRequest, PayResponse, PaymentRecord, PaymentsResponse},
};
use async_trait::async_trait;
use reqwest::Client;

/// The two backend calls the dashboard depends on.
#[async_trait]
pub trait PaymentBackend: Send + Sync {
    async fn pay_api(&self, request: &PayRequest) -> Result<PayResponse, WalletError>;

    async fn list_payments(&self) -> Result<Vec<PaymentRecord>, WalletError>;
}

pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }
}

#[async_trait]
impl PaymentBackend for HttpBackend {
    async fn pay_api(&self, request: &PayRequest) -> Result<PayResponse, WalletError> {
        let url = format!("{}/pay-api", self.base_url);

        tracing::info!(
            task = %request.task,
            max_usd = request.max_usd,
            "Submitting pay request"
        );

        let response = self.client.post(&url).json(request).send().await?;
        let status = response.status();

        // Rejections (budget exceeded, provider down) still carry a JSON body
        // with `ok: false`, so the status code is only logged.
        let body = response.bytes().await?;
        let parsed: PayResponse = serde_json::from_slice(&body)?;

        if !status.is_success() {
            tracing::warn!(%status, error = ?parsed.error, "Backend rejected pay request");
        }

        Ok(parsed)
    }

    async fn list_payments(&self) -> Result<Vec<PaymentRecord>, WalletError> {
        let url = format!("{}/payments", self.base_url);
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(WalletError::BackendError {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.bytes().await?;
        let parsed: PaymentsResponse = serde_json::from_slice(&body)?;

        tracing::debug!("Fetched {} payments", parsed.payments.len());
        Ok(parsed.payments)
    }
}
