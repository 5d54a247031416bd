//! Mock x402 provider routes and the metadata client that reads them.
use api_wallet::{
    handlers::provider_router,
    models::{GenerateResponse, X402Metadata},
    services::fetch_x402_metadata,
};
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
};
use serde_json::{json, Value};
use tower::ServiceExt;

fn metadata() -> X402Metadata {
    X402Metadata::new("Image API Provider", 0.01, "0xPROVIDER_WALLET_ON_ARC")
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn well_known_returns_metadata() {
    let response = provider_router(metadata())
        .oneshot(
            Request::builder()
                .uri("/.well-known/x402")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["name"], "Image API Provider");
    assert_eq!(body["price_usd"], 0.01);
    assert_eq!(body["currency"], "USDC");
    assert_eq!(body["chain"], "Arc");
    assert_eq!(body["endpoint"], "/generate");
}

#[tokio::test]
async fn generate_returns_one_image_per_unit() {
    let request = Request::builder()
        .method("POST")
        .uri("/generate")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({"prompt": "skyline", "quantity": 3, "receipt_tx": "0xSIMULATED_1"}).to_string(),
        ))
        .unwrap();

    let response = provider_router(metadata()).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: GenerateResponse = serde_json::from_value(body_json(response).await).unwrap();
    assert!(body.ok);
    assert_eq!(
        body.images,
        vec![
            "https://dummy.image/0?prompt=skyline",
            "https://dummy.image/1?prompt=skyline",
            "https://dummy.image/2?prompt=skyline",
        ]
    );
    assert_eq!(body.receipt_tx, "0xSIMULATED_1");
}

#[tokio::test]
async fn generate_without_receipt_requires_payment() {
    let request = Request::builder()
        .method("POST")
        .uri("/generate")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({"prompt": "skyline", "quantity": 1, "receipt_tx": ""}).to_string(),
        ))
        .unwrap();

    let response = provider_router(metadata()).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::PAYMENT_REQUIRED);

    let body = body_json(response).await;
    assert_eq!(body["ok"], false);
    assert_eq!(body["error_code"], "PAYMENT_REQUIRED");
    assert!(body["request_id"].as_str().is_some());
}

#[tokio::test]
async fn root_lists_endpoints() {
    let response = provider_router(metadata())
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let body = body_json(response).await;
    assert_eq!(body["service"], "Mock Provider");
    assert_eq!(body["endpoints"]["generate"], "POST /generate");
}

#[tokio::test]
async fn metadata_client_reads_live_provider() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = tokio::spawn(async move {
        axum::serve(listener, provider_router(metadata())).await.unwrap();
    });

    let client = reqwest::Client::new();
    let fetched = fetch_x402_metadata(&client, &format!("http://{}/", addr))
        .await
        .unwrap();

    assert_eq!(fetched, metadata());
    assert_eq!(fetched.affordable_units(0.05), 5);
    server.abort();
}

#[tokio::test]
async fn metadata_client_fails_on_error_status() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/.well-known/x402")
        .with_status(404)
        .create_async()
        .await;

    let client = reqwest::Client::new();
    assert!(fetch_x402_metadata(&client, &server.url()).await.is_err());
}
