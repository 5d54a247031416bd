pub mod api_wallet;
pub mod artifact;

pub use api_wallet::APIWallet;
pub use artifact::ContractArtifact;
