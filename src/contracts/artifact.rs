use crate::error::WalletError;
use ethers::{abi::Abi, types::Bytes};
use serde::Deserialize;
use std::path::Path;

/// The parts of a Hardhat compilation artifact needed to deploy a contract.
#[derive(Debug, Clone, Deserialize)]
pub struct ContractArtifact {
    #[serde(rename = "contractName", default)]
    pub contract_name: String,
    pub abi: Abi,
    pub bytecode: Bytes,
}

impl ContractArtifact {
    pub fn from_json(json: &str) -> Result<Self, WalletError> {
        let artifact: Self = serde_json::from_str(json)
            .map_err(|e| WalletError::ArtifactError(format!("Malformed artifact: {}", e)))?;

        if artifact.bytecode.is_empty() {
            return Err(WalletError::ArtifactError(format!(
                "Artifact for {} has no bytecode (abstract contract or interface?)",
                artifact.contract_name
            )));
        }

        Ok(artifact)
    }

    pub fn load(path: &Path) -> Result<Self, WalletError> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            WalletError::ArtifactError(format!("Cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json(&json)
    }

    pub fn has_constructor(&self) -> bool {
        self.abi.constructor.is_some()
    }
}
