pub mod chain;

pub use chain::{format_tx_hash, invoice_id, usdc_units, ChainClient};
