use crate::{
    error::WalletError,
    models::{GenerateRequest, GenerateResponse, ServiceInfo, X402Metadata},
};
use axum::{extract::State, Json};
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Clone)]
pub struct ProviderState {
    pub metadata: Arc<X402Metadata>,
}

pub async fn service_info() -> Json<ServiceInfo> {
    let endpoints = BTreeMap::from([
        ("x402_metadata".to_string(), "GET /.well-known/x402".to_string()),
        ("generate".to_string(), "POST /generate".to_string()),
        ("health".to_string(), "GET /health".to_string()),
    ]);

    Json(ServiceInfo {
        service: "Mock Provider".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        endpoints,
    })
}

pub async fn x402_metadata(State(state): State<ProviderState>) -> Json<X402Metadata> {
    Json(state.metadata.as_ref().clone())
}

/// Returns one placeholder image per paid unit.
pub async fn generate(
    State(state): State<ProviderState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, WalletError> {
    if request.receipt_tx.trim().is_empty() {
        return Err(WalletError::PaymentRequired);
    }

    let images: Vec<String> = (0..request.quantity)
        .map(|i| format!("https://dummy.image/{}?prompt={}", i, request.prompt))
        .collect();

    tracing::info!(
        provider = %state.metadata.name,
        quantity = request.quantity,
        receipt_tx = %request.receipt_tx,
        "Generated {} images",
        images.len()
    );

    Ok(Json(GenerateResponse {
        ok: true,
        images,
        receipt_tx: request.receipt_tx,
    }))
}
