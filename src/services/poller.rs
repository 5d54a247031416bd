use crate::services::dashboard::Dashboard;
use std::time::Duration;
use tokio::{
    task::JoinHandle,
    time::{interval, MissedTickBehavior},
};

pub struct PaymentPoller;

impl PaymentPoller {
    /// Fetches immediately, then once per `period` until the handle is
    /// stopped or dropped.
    pub fn spawn(dashboard: Dashboard, period: Duration) -> PollerHandle {
        let task = tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                ticker.tick().await;
                dashboard.refresh().await;
            }
        });

        tracing::debug!("Payment poller started ({:?} interval)", period);
        PollerHandle { task: Some(task) }
    }
}

/// Owns the polling task; dropping it cancels polling.
pub struct PollerHandle {
    task: Option<JoinHandle<()>>,
}

impl PollerHandle {
    /// Cancels the task and waits until it has fully wound down.
    pub async fn stop(mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            let _ = task.await;
            tracing::debug!("Payment poller stopped");
        }
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
