use crate::{
    config::ClientConfig,
    error::WalletError,
    models::{PayRequest, PayResponse, PaymentRecord},
    services::{backend::PaymentBackend, ledger::derive_balance},
};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::{
    sync::{watch, RwLock},
    task::JoinHandle,
};

/// Everything the console view renders.
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    pub payments: Vec<PaymentRecord>,
    /// `None` until the first successful fetch.
    pub balance: Option<f64>,
    pub last_result: Option<PayResponse>,
    pub loading: bool,
    pub last_refreshed: Option<DateTime<Utc>>,
}

/// Outcome of one submit.
#[derive(Debug)]
pub struct Submission {
    pub result: PayResponse,
    /// The follow-up refresh, absent when the request itself failed.
    pub refresh: Option<JoinHandle<()>>,
}

/// Shared handle over the payment view. Clones share the same state.
#[derive(Clone)]
pub struct Dashboard {
    backend: Arc<dyn PaymentBackend>,
    state: Arc<RwLock<DashboardState>>,
    revision: Arc<watch::Sender<u64>>,
    provider_url: String,
    starting_balance_usd: f64,
    refresh_delay: Duration,
}

impl Dashboard {
    pub fn new(
        backend: Arc<dyn PaymentBackend>,
        provider_url: impl Into<String>,
        starting_balance_usd: f64,
        refresh_delay: Duration,
    ) -> Self {
        Self {
            backend,
            state: Arc::new(RwLock::new(DashboardState::default())),
            revision: Arc::new(watch::channel(0).0),
            provider_url: provider_url.into(),
            starting_balance_usd,
            refresh_delay,
        }
    }

    pub fn from_config(backend: Arc<dyn PaymentBackend>, config: &ClientConfig) -> Self {
        Self::new(
            backend,
            config.provider_url.clone(),
            config.starting_balance_usd,
            config.refresh_delay,
        )
    }

    pub fn starting_balance_usd(&self) -> f64 {
        self.starting_balance_usd
    }

    pub async fn snapshot(&self) -> DashboardState {
        self.state.read().await.clone()
    }

    /// Signals every time the rendered state changes.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    fn bump_revision(&self) {
        self.revision.send_modify(|rev| *rev += 1);
    }

    /// Replaces the payment list and balance with a fresh fetch.
    ///
    /// Failures are logged and swallowed; the previous list stays on screen.
    pub async fn refresh(&self) -> bool {
        match self.backend.list_payments().await {
            Ok(payments) => {
                let balance = derive_balance(self.starting_balance_usd, &payments);

                let count = payments.len();
                {
                    let mut state = self.state.write().await;
                    state.payments = payments;
                    state.balance = Some(balance);
                    state.last_refreshed = Some(Utc::now());
                }
                self.bump_revision();

                tracing::debug!(count, balance, "Payment list refreshed");
                true
            }
            Err(e) => {
                tracing::error!("Failed to fetch payments: {}", e);
                false
            }
        }
    }

    /// Sends one pay request and records the outcome as the last result.
    ///
    /// A transport or decode failure becomes `{ok: false, error}` rather than
    /// an `Err`; only a second submit while one is in flight is rejected.
    pub async fn submit(&self, task: &str, max_usd: f64) -> Result<Submission, WalletError> {
        {
            let mut state = self.state.write().await;
            if state.loading {
                return Err(WalletError::Busy);
            }
            state.loading = true;
            state.last_result = None;
        }

        let request = PayRequest {
            task: task.to_string(),
            max_usd,
            provider_url: self.provider_url.clone(),
        };

        let (result, refresh) = match self.backend.pay_api(&request).await {
            Ok(response) => (response, true),
            Err(e) => {
                tracing::warn!("Pay request failed: {}", e);
                (PayResponse::failure(e), false)
            }
        };

        {
            let mut state = self.state.write().await;
            state.last_result = Some(result.clone());
            state.loading = false;
        }
        self.bump_revision();

        let refresh = refresh.then(|| self.schedule_refresh());

        Ok(Submission { result, refresh })
    }

    /// One deferred refresh, giving the backend time to record the payment.
    pub fn schedule_refresh(&self) -> JoinHandle<()> {
        let dashboard = self.clone();
        let delay = self.refresh_delay;

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            dashboard.refresh().await;
        })
    }
}
