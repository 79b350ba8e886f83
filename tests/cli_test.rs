use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use mockito::Matcher;
use predicates::prelude::*;
use std::path::Path;
use std::process::Command;

const FIXTURES: &str = r#"{
    "stores": [
        {
            "id": "store-1",
            "url": "https://shop.example.com",
            "settings": [
                { "name": "Paypal.Mode", "value": "sandbox" },
                { "name": "Paypal.APIUsername", "value": "user" },
                { "name": "Paypal.APIPassword", "value": "pwd" },
                { "name": "Paypal.APISignature", "value": "sig" }
            ]
        }
    ],
    "orders": [
        {
            "id": "order-1",
            "store_id": "store-1",
            "currency": "USD",
            "addresses": [{ "address_type": "Billing", "email": "buyer@example.com" }],
            "in_payments": [{ "id": "pay-1", "sum": "19.5" }]
        }
    ]
}"#;

fn read_json(path: &Path) -> serde_json::Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_create_then_confirm_payment() {
    let mut server = mockito::Server::new();
    let _set = server
        .mock("POST", "/nvp")
        .match_body(Matcher::UrlEncoded(
            "METHOD".to_string(),
            "SetExpressCheckout".to_string(),
        ))
        .with_body("TOKEN=EC-777&ACK=Success")
        .create();
    let _details = server
        .mock("POST", "/nvp")
        .match_body(Matcher::UrlEncoded(
            "METHOD".to_string(),
            "GetExpressCheckoutDetails".to_string(),
        ))
        .with_body(
            "TOKEN=EC-777&CHECKOUTSTATUS=PaymentActionCompleted&PAYERID=P1\
             &PAYMENTREQUEST_0_AMT=19.50&PAYMENTREQUEST_0_CURRENCYCODE=USD&ACK=Success",
        )
        .create();
    let _capture = server
        .mock("POST", "/nvp")
        .match_body(Matcher::UrlEncoded(
            "METHOD".to_string(),
            "DoExpressCheckoutPayment".to_string(),
        ))
        .with_body("TOKEN=EC-777&ACK=Success")
        .create();

    let dir = tempfile::tempdir().unwrap();
    let fixtures = dir.path().join("fixtures.json");
    std::fs::write(&fixtures, FIXTURES).unwrap();
    let endpoint = format!("{}/nvp", server.url());

    let mut cmd = Command::new(cargo_bin!("paypal-gateway"));
    cmd.arg("--fixtures")
        .arg(&fixtures)
        .arg("--nvp-endpoint")
        .arg(&endpoint)
        .args(["create-payment", "--order-id", "order-1", "--payment-id", "pay-1"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("token: EC-777"))
        .stdout(predicate::str::contains(
            "redirect: https://www.sandbox.paypal.com/cgi-bin/webscr?cmd=_express-checkout&useraction=commit&token=EC-777",
        ));

    let saved = read_json(&fixtures);
    assert_eq!(saved["orders"][0]["in_payments"][0]["outer_id"], "EC-777");
    assert_eq!(saved["orders"][0]["in_payments"][0]["is_approved"], false);

    let mut cmd = Command::new(cargo_bin!("paypal-gateway"));
    cmd.arg("--fixtures")
        .arg(&fixtures)
        .arg("--nvp-endpoint")
        .arg(&endpoint)
        .args(["get-payment", "--order-id", "order-1", "--token", "EC-777"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("approved: true"))
        .stdout(predicate::str::contains(
            "redirect: https://shop.example.com/checkout/thanks?orderId=order-1&isSuccess=true",
        ));

    let saved = read_json(&fixtures);
    assert_eq!(saved["orders"][0]["in_payments"][0]["is_approved"], true);
}

#[test]
fn test_missing_setting_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let fixtures = dir.path().join("fixtures.json");
    std::fs::write(
        &fixtures,
        FIXTURES.replace(r#""value": "sig""#, r#""value": """#),
    )
    .unwrap();

    let mut cmd = Command::new(cargo_bin!("paypal-gateway"));
    cmd.arg("--fixtures")
        .arg(&fixtures)
        .arg("--nvp-endpoint")
        .arg("http://127.0.0.1:9/nvp")
        .args(["create-payment", "--order-id", "order-1", "--payment-id", "pay-1"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Paypal.APISignature"));
}

#[test]
fn test_unknown_order_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let fixtures = dir.path().join("fixtures.json");
    std::fs::write(&fixtures, FIXTURES).unwrap();

    let mut cmd = Command::new(cargo_bin!("paypal-gateway"));
    cmd.arg("--fixtures")
        .arg(&fixtures)
        .args(["get-payment", "--order-id", "nope", "--token", "EC-1"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("no order with id 'nope'"));
}

#[test]
fn test_zero_timeout_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let fixtures = dir.path().join("fixtures.json");
    std::fs::write(&fixtures, FIXTURES).unwrap();

    let mut cmd = Command::new(cargo_bin!("paypal-gateway"));
    cmd.arg("--fixtures")
        .arg(&fixtures)
        .args(["--timeout-secs", "0"])
        .args(["get-payment", "--order-id", "order-1", "--token", "EC-1"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("--timeout-secs"));

    // Rejected during argument parsing, so the fixtures are left alone.
    assert_eq!(std::fs::read_to_string(&fixtures).unwrap(), FIXTURES);
}
