//! End-to-end tests for the order lifecycle over the HTTP surface.

use serde_json::json;

use ventanas_perfectas_integration_tests::{TestClient, contact_json, default_config_json};

#[tokio::test]
async fn test_full_order_lifecycle() {
    let mut client = TestClient::new();

    // Fresh session starts configuring with an empty cart.
    let session = client.get("/api/session").await;
    assert_eq!(session.status, 200);
    assert_eq!(session.body["step"], "configure");
    assert_eq!(session.body["cart"]["itemCount"], 0);
    assert!(session.body.get("invoice").is_none());

    // Add the reference window.
    let cart = client
        .post_json("/api/cart/add", json!({ "config": default_config_json() }))
        .await;
    assert_eq!(cart.status, 200);
    assert_eq!(cart.body["itemCount"], 1);
    assert_eq!(cart.body["lines"][0]["summary"], "Corredera de PVC");
    assert_eq!(cart.body["lines"][0]["displayPrice"], "596.12 €");
    assert_eq!(cart.body["displayTotal"], "596.12 €");

    // Proceed to checkout.
    let step = client.post_empty("/api/checkout").await;
    assert_eq!(step.status, 200);
    assert_eq!(step.body["step"], "checkout");

    // Place the order.
    let invoice = client.post_json("/api/order", contact_json()).await;
    assert_eq!(invoice.status, 200);
    let order_number = invoice.body["order"]["orderNumber"]
        .as_str()
        .expect("order number")
        .to_string();
    assert!(order_number.starts_with("VP-"));
    assert_eq!(invoice.body["displayTotal"], "596.12 €");
    assert_eq!(invoice.body["company"]["name"], "Ventanas Perfectas S.L.");
    assert_eq!(
        invoice.body["payment"]["reference"],
        format!("Pedido {order_number}")
    );

    // The session now shows the invoice step.
    let session = client.get("/api/session").await;
    assert_eq!(session.body["step"], "invoice");
    assert_eq!(session.body["invoice"]["order"]["orderNumber"], order_number);

    // Upload the proof of payment.
    let confirmation = client
        .post_multipart(
            "/api/payment/proof",
            Some(("transferencia.pdf", b"fake pdf bytes".as_slice())),
        )
        .await;
    assert_eq!(confirmation.status, 200);
    assert_eq!(confirmation.body["step"], "confirmation");
    assert_eq!(confirmation.body["orderNumber"], order_number);
    assert_eq!(confirmation.body["proof"]["fileName"], "transferencia.pdf");

    // Start over.
    let reset = client.post_empty("/api/session/reset").await;
    assert_eq!(reset.status, 200);
    assert_eq!(reset.body["step"], "configure");
    assert_eq!(reset.body["cart"]["itemCount"], 0);
    assert!(reset.body.get("invoice").is_none());
}

#[tokio::test]
async fn test_checkout_guard_on_empty_cart() {
    let mut client = TestClient::new();

    let rejected = client.post_empty("/api/checkout").await;
    assert_eq!(rejected.status, 422);
    assert_eq!(
        rejected.error_message(),
        "Añade al menos una ventana a tu pedido para continuar."
    );

    // State is unchanged and no order exists.
    let session = client.get("/api/session").await;
    assert_eq!(session.body["step"], "configure");
    assert!(session.body.get("invoice").is_none());
}

#[tokio::test]
async fn test_place_order_guard_on_blank_field() {
    let mut client = TestClient::new();
    client
        .post_json("/api/cart/add", json!({ "config": default_config_json() }))
        .await;
    client.post_empty("/api/checkout").await;

    let mut incomplete = contact_json();
    incomplete["phone"] = json!("   ");
    let rejected = client.post_json("/api/order", incomplete).await;
    assert_eq!(rejected.status, 422);
    assert_eq!(rejected.error_message(), "Por favor, rellena todos los campos.");

    // Still checking out, still no order.
    let session = client.get("/api/session").await;
    assert_eq!(session.body["step"], "checkout");
    assert!(session.body.get("invoice").is_none());
}

#[tokio::test]
async fn test_payment_guard_without_file() {
    let mut client = TestClient::new();
    client
        .post_json("/api/cart/add", json!({ "config": default_config_json() }))
        .await;
    client.post_empty("/api/checkout").await;
    client.post_json("/api/order", contact_json()).await;

    let rejected = client.post_multipart("/api/payment/proof", None).await;
    assert_eq!(rejected.status, 422);
    assert_eq!(
        rejected.error_message(),
        "Selecciona el comprobante de la transferencia para continuar."
    );

    let session = client.get("/api/session").await;
    assert_eq!(session.body["step"], "invoice");
}

#[tokio::test]
async fn test_cart_remove_is_idempotent() {
    let mut client = TestClient::new();
    let cart = client
        .post_json("/api/cart/add", json!({ "config": default_config_json() }))
        .await;
    let line_id = cart.body["lines"][0]["id"].clone();

    // Removing an unknown id changes nothing.
    let unchanged = client
        .post_json("/api/cart/remove", json!({ "lineId": 9999 }))
        .await;
    assert_eq!(unchanged.status, 200);
    assert_eq!(unchanged.body["itemCount"], 1);

    // Removing the real line empties the cart.
    let emptied = client
        .post_json("/api/cart/remove", json!({ "lineId": line_id }))
        .await;
    assert_eq!(emptied.status, 200);
    assert_eq!(emptied.body["itemCount"], 0);
}

#[tokio::test]
async fn test_back_returns_to_configurator_keeping_cart() {
    let mut client = TestClient::new();
    client
        .post_json("/api/cart/add", json!({ "config": default_config_json() }))
        .await;
    client.post_empty("/api/checkout").await;

    let step = client.post_empty("/api/checkout/back").await;
    assert_eq!(step.status, 200);
    assert_eq!(step.body["step"], "configure");

    let session = client.get("/api/session").await;
    assert_eq!(session.body["cart"]["itemCount"], 1);
}

#[tokio::test]
async fn test_cart_is_frozen_after_checkout() {
    let mut client = TestClient::new();
    client
        .post_json("/api/cart/add", json!({ "config": default_config_json() }))
        .await;
    client.post_empty("/api/checkout").await;

    let rejected = client
        .post_json("/api/cart/add", json!({ "config": default_config_json() }))
        .await;
    assert_eq!(rejected.status, 422);

    let session = client.get("/api/session").await;
    assert_eq!(session.body["cart"]["itemCount"], 1);
}

#[tokio::test]
async fn test_sessions_are_isolated() {
    let mut first = TestClient::new();
    let mut second = TestClient::with_app(first.app());

    first
        .post_json("/api/cart/add", json!({ "config": default_config_json() }))
        .await;

    let session = second.get("/api/session").await;
    assert_eq!(session.body["cart"]["itemCount"], 0);
}

#[tokio::test]
async fn test_invoice_totals_reconcile() {
    let mut client = TestClient::new();
    client
        .post_json("/api/cart/add", json!({ "config": default_config_json() }))
        .await;

    let mut with_grilles = default_config_json();
    with_grilles["hasGrilles"] = json!(true);
    let cart = client
        .post_json("/api/cart/add", json!({ "config": with_grilles }))
        .await;
    assert_eq!(cart.body["lines"][1]["displayPrice"], "759.47 €");

    client.post_empty("/api/checkout").await;
    let invoice = client.post_json("/api/order", contact_json()).await;

    let order = &invoice.body["order"];
    let subtotal = order["subtotal"].as_f64().expect("subtotal");
    let vat = order["vatAmount"].as_f64().expect("vat");
    let total = order["totalCost"].as_f64().expect("total");
    assert!((subtotal + vat - total).abs() < 1e-9);
    assert!((total - total / 1.21 - vat).abs() < 1e-9);
    assert_eq!(invoice.body["displayTotal"], "1355.60 €");
}
