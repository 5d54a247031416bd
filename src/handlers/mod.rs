pub mod health;
pub mod provider;

pub use health::*;
pub use provider::*;

use crate::models::X402Metadata;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

/// Routes of the mock x402 provider.
pub fn provider_router(metadata: X402Metadata) -> Router {
    let state = ProviderState {
        metadata: Arc::new(metadata),
    };

    Router::new()
        .route("/", get(service_info))
        .route("/health", get(health_check))
        .route("/.well-known/x402", get(x402_metadata))
        .route("/generate", post(generate))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::default().include_headers(true)),
                )
                .layer(CorsLayer::permissive()),
        )
}
