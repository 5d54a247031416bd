pub mod backend;
pub mod dashboard;
pub mod ledger;
pub mod poller;
pub mod provider;

pub use backend::{HttpBackend, PaymentBackend};
pub use dashboard::{Dashboard, DashboardState, Submission};
pub use ledger::{derive_balance, total_spent};
pub use poller::{PaymentPoller, PollerHandle};
pub use provider::fetch_x402_metadata;
