//! Tests for the quote endpoint and the static surface.

use serde_json::json;

use ventanas_perfectas_integration_tests::{TestClient, default_config_json};

#[tokio::test]
async fn test_quote_reference_window() {
    let mut client = TestClient::new();

    let quote = client
        .post_json("/api/quote", json!({ "config": default_config_json() }))
        .await;
    assert_eq!(quote.status, 200);
    assert_eq!(quote.body["display"], "596.12 €");

    let price = quote.body["price"].as_f64().expect("price");
    assert!((price - 596.122_956).abs() < 1e-9);
}

#[tokio::test]
async fn test_quote_with_grilles() {
    let mut client = TestClient::new();

    let mut config = default_config_json();
    config["hasGrilles"] = json!(true);
    let quote = client.post_json("/api/quote", json!({ "config": config })).await;
    assert_eq!(quote.body["display"], "759.47 €");
}

#[tokio::test]
async fn test_quote_does_not_touch_cart() {
    let mut client = TestClient::new();
    client
        .post_json("/api/quote", json!({ "config": default_config_json() }))
        .await;

    let session = client.get("/api/session").await;
    assert_eq!(session.body["cart"]["itemCount"], 0);
}

#[tokio::test]
async fn test_quote_rejects_unknown_enum_value() {
    let mut client = TestClient::new();

    // A full config (unlike an AI extraction) must use the catalog
    // vocabulary; axum's Json extractor rejects the document.
    let mut config = default_config_json();
    config["material"] = json!("titanio");
    let quote = client.post_json("/api/quote", json!({ "config": config })).await;
    assert_eq!(quote.status, 422);
}

#[tokio::test]
async fn test_faq_content() {
    let mut client = TestClient::new();

    let faq = client.get("/api/content/faq").await;
    assert_eq!(faq.status, 200);
    let entries = faq.body.as_array().expect("array");
    assert_eq!(entries.len(), 5);
    assert_eq!(entries[0]["question"], "¿Las ventanas se entregan montadas?");
}

#[tokio::test]
async fn test_session_carries_chat_greeting() {
    let mut client = TestClient::new();

    let session = client.get("/api/session").await;
    assert_eq!(
        session.body["chatGreeting"],
        "¡Hola! Soy tu asistente de IA. ¿En qué puedo ayudarte con tu pedido de ventanas?"
    );
}

#[tokio::test]
async fn test_assistant_rejects_unknown_envelope_type() {
    let mut client = TestClient::new();

    let rejected = client
        .post_json("/api/assistant", json!({ "type": "image", "payload": {} }))
        .await;
    assert_eq!(rejected.status, 422);
}

#[tokio::test]
async fn test_health() {
    let mut client = TestClient::new();
    let health = client.get("/health").await;
    assert_eq!(health.status, 200);
}
