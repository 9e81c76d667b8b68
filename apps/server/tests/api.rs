//! Drives the full router against an in-memory database.

use std::collections::HashMap;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use crewbook_db::{Database, DbConfig};
use crewbook_server::{build_router, AppState, ServerConfig};

async fn test_app() -> Router {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    let vars: HashMap<String, String> = [
        ("CREWBOOK_DB_PATH", ":memory:"),
        ("CREWBOOK_CURRENCY_SYMBOL", "MAD"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();
    let config = ServerConfig::from_vars(vars).unwrap();

    build_router(AppState::new(db, config))
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
    headers: &[(&str, &str)],
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, json)
}

fn invoice_body(party: &str, date: &str) -> Value {
    json!({
        "kind": "invoice",
        "partyName": party,
        "date": date,
        "items": [
            { "description": "Tiles", "quantity": "2", "unitPrice": "50" },
            { "description": "Labour", "quantity": "1", "unitPrice": "30" }
        ]
    })
}

#[tokio::test]
async fn test_health() {
    let app = test_app().await;
    let (status, body) = send(&app, "GET", "/health", None, &[]).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], true);
}

#[tokio::test]
async fn test_preview_computes_totals() {
    let app = test_app().await;
    let (status, body) = send(
        &app,
        "POST",
        "/documents/preview",
        Some(invoice_body("", "")),
        &[],
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"][0]["total"], 10000);
    assert_eq!(body["totals"]["subtotal"], 13000);
    assert_eq!(body["totals"]["tax"], 2600);
    assert_eq!(body["totals"]["grandTotal"], 15600);
}

#[tokio::test]
async fn test_preview_of_empty_form_has_one_blank_row() {
    let app = test_app().await;
    let (status, body) = send(
        &app,
        "POST",
        "/documents/preview",
        Some(json!({ "kind": "quote" })),
        &[],
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"].as_array().unwrap().len(), 1);
    assert_eq!(body["totals"]["grandTotal"], 0);
}

#[tokio::test]
async fn test_generate_lists_missing_fields() {
    let app = test_app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/documents/generate",
        Some(invoice_body("  ", "")),
        &[],
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(body["message"], "Please fill in: client name, date");

    let (_, body) = send(
        &app,
        "POST",
        "/documents/generate",
        Some(invoice_body("", "2026-10-15")),
        &[("accept-language", "fr-FR")],
    )
    .await;
    assert_eq!(body["message"], "Veuillez renseigner : nom du client");
}

#[tokio::test]
async fn test_generate_rejects_non_numeric_rows() {
    let app = test_app().await;
    let body = json!({
        "kind": "order_bond",
        "partyName": "Cement Co",
        "date": "2026-10-15",
        "items": [
            { "description": "Cement", "quantity": "10", "unitPrice": "55" },
            { "description": "Sand", "quantity": "abc", "unitPrice": "12" }
        ]
    });

    let (status, body) = send(&app, "POST", "/documents/generate", Some(body), &[]).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Check quantity and unit price on rows: 2");
}

#[tokio::test]
async fn test_oversized_rows_neither_panic_nor_generate() {
    let app = test_app().await;
    let body = json!({
        "kind": "invoice",
        "partyName": "ACME",
        "date": "2026-10-15",
        "items": [
            { "description": "A", "quantity": "90000000000000000", "unitPrice": "1" },
            { "description": "B", "quantity": "90000000000000000", "unitPrice": "1" }
        ]
    });

    let (status, preview) = send(&app, "POST", "/documents/preview", Some(body.clone()), &[]).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(preview["items"][0]["total"], 0);
    assert_eq!(preview["totals"]["grandTotal"], 0);
    assert_eq!(preview["notes"], Value::Null);

    let (status, generated) = send(&app, "POST", "/documents/generate", Some(body), &[]).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(generated["message"], "Check quantity and unit price on rows: 1, 2");

    let (_, list) = send(&app, "GET", "/receipts", None, &[]).await;
    assert!(list.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_generate_keeps_notes_and_literal_braces() {
    let app = test_app().await;
    let mut body = invoice_body("Atelier {total}", "2026-10-15");
    body["notes"] = json!("Payment within 30 days");

    let (_, preview) = send(&app, "POST", "/documents/preview", Some(body.clone()), &[]).await;
    assert_eq!(preview["notes"], "Payment within 30 days");

    let (status, body) = send(&app, "POST", "/documents/generate", Some(body), &[]).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["document"]["notes"], "Payment within 30 days");
    assert_eq!(body["receipt"]["notes"], "Payment within 30 days");
    assert_eq!(
        body["message"],
        "Invoice INV-20261015-0001 generated for Atelier {total}. Total: 156.00 MAD"
    );

    let id = body["receipt"]["id"].as_str().unwrap();
    let (_, fetched) = send(&app, "GET", &format!("/receipts/{id}"), None, &[]).await;
    assert_eq!(fetched["notes"], "Payment within 30 days");
}

#[tokio::test]
async fn test_generate_in_arabic_reports_bad_rows() {
    let app = test_app().await;
    let mut body = invoice_body("ACME", "2026-10-15");
    body["items"][1]["unitPrice"] = json!("x");

    let (status, body) = send(
        &app,
        "POST",
        "/documents/generate",
        Some(body),
        &[("accept-language", "ar-MA")],
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "تحقق من الكمية وسعر الوحدة في الأسطر: 2");
}

#[tokio::test]
async fn test_generate_numbers_and_stores_receipts() {
    let app = test_app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/documents/generate",
        Some(invoice_body("ACME Travaux", "2026-10-15")),
        &[("x-admin-id", "admin-1")],
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["document"]["number"], "INV-20261015-0001");
    assert_eq!(body["confirmation"]["grandTotal"], 15600);
    assert_eq!(
        body["message"],
        "Invoice INV-20261015-0001 generated for ACME Travaux. Total: 156.00 MAD"
    );
    assert_eq!(body["receipt"]["createdBy"], "admin-1");
    assert_eq!(body["receipt"]["itemCount"], 2);

    let (_, second) = send(
        &app,
        "POST",
        "/documents/generate",
        Some(invoice_body("Riad Build", "2026-10-15")),
        &[],
    )
    .await;
    assert_eq!(second["document"]["number"], "INV-20261015-0002");

    let (status, list) = send(&app, "GET", "/receipts?kind=invoice", None, &[]).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 2);

    let (_, quotes) = send(&app, "GET", "/receipts?kind=quote", None, &[]).await;
    assert!(quotes.as_array().unwrap().is_empty());

    let (status, _) = send(&app, "GET", "/receipts?kind=memo", None, &[]).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let id = body["receipt"]["id"].as_str().unwrap();
    let (status, fetched) = send(&app, "GET", &format!("/receipts/{id}"), None, &[]).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["documentNumber"], "INV-20261015-0001");

    let (status, _) = send(&app, "DELETE", &format!("/receipts/{id}"), None, &[]).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, "GET", &format!("/receipts/{id}"), None, &[]).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // A gap left by a deleted receipt is not refilled.
    let (_, third) = send(
        &app,
        "POST",
        "/documents/generate",
        Some(invoice_body("Dar Lmaalem", "2026-10-15")),
        &[],
    )
    .await;
    assert_eq!(third["document"]["number"], "INV-20261015-0003");
}

#[tokio::test]
async fn test_worker_lifecycle() {
    let app = test_app().await;

    let (status, created) = send(
        &app,
        "POST",
        "/workers",
        Some(json!({ "fullName": "Youssef Amrani", "phone": "+212 600 111222", "dailyRate": "150" })),
        &[],
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["dailyRateCents"], 15000);
    let id = created["id"].as_str().unwrap().to_string();

    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/workers/{id}"),
        Some(json!({ "fullName": "Youssef Amrani", "role": "Mason", "dailyRate": "175,50" })),
        &[],
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["dailyRateCents"], 17550);
    assert_eq!(updated["role"], "Mason");
    assert!(updated["phone"].is_null());

    let (_, list) = send(&app, "GET", "/workers", None, &[]).await;
    assert_eq!(list.as_array().unwrap().len(), 1);

    let (status, _) = send(&app, "DELETE", &format!("/workers/{id}"), None, &[]).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, "GET", &format!("/workers/{id}"), None, &[]).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");

    let (_, list) = send(&app, "GET", "/workers", None, &[]).await;
    assert!(list.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_worker_validation() {
    let app = test_app().await;

    let (status, _) = send(
        &app,
        "POST",
        "/workers",
        Some(json!({ "fullName": " ", "dailyRate": "150" })),
        &[],
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "POST",
        "/workers",
        Some(json!({ "fullName": "Hamid", "dailyRate": "-10" })),
        &[],
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "POST",
        "/workers",
        Some(json!({ "fullName": "Hamid", "dailyRate": "lots" })),
        &[],
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_period_dates_are_required() {
    let app = test_app().await;
    let (_, worker) = send(
        &app,
        "POST",
        "/workers",
        Some(json!({ "fullName": "Karim", "dailyRate": "100" })),
        &[],
    )
    .await;
    let id = worker["id"].as_str().unwrap().to_string();

    let (status, body) = send(&app, "GET", &format!("/workers/{id}/pay?end=2026-10-18"), None, &[]).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("start"));

    let (status, body) = send(
        &app,
        "GET",
        &format!("/workers/{id}/pay?start=2026-10-12&end=18/10/2026"),
        None,
        &[],
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("end"));

    let (status, _) = send(
        &app,
        "POST",
        &format!("/workers/{id}/attendance"),
        Some(json!({ "date": "" })),
        &[],
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_attendance_and_pay() {
    let app = test_app().await;
    let (_, worker) = send(
        &app,
        "POST",
        "/workers",
        Some(json!({ "fullName": "Karim", "dailyRate": "100" })),
        &[],
    )
    .await;
    let id = worker["id"].as_str().unwrap().to_string();
    let attendance = format!("/workers/{id}/attendance");

    for (date, status) in [
        ("2026-10-12", "present"),
        ("2026-10-13", "half_day"),
        ("2026-10-14", "absent"),
        ("2026-10-15", "absent"),
    ] {
        let (code, _) = send(
            &app,
            "POST",
            &attendance,
            Some(json!({ "date": date, "status": status })),
            &[("x-admin-id", "admin-1")],
        )
        .await;
        assert_eq!(code, StatusCode::OK);
    }

    // Second mark for the same day replaces the first.
    let (_, record) = send(
        &app,
        "POST",
        &attendance,
        Some(json!({ "date": "2026-10-15", "status": "present" })),
        &[],
    )
    .await;
    assert_eq!(record["status"], "present");

    let (status, records) = send(
        &app,
        "GET",
        &format!("{attendance}?start=2026-10-12&end=2026-10-18"),
        None,
        &[],
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(records.as_array().unwrap().len(), 4);

    let (status, pay) = send(
        &app,
        "GET",
        &format!("/workers/{id}/pay?start=2026-10-12&end=2026-10-18"),
        None,
        &[],
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(pay["daysPresent"], 2);
    assert_eq!(pay["daysHalf"], 1);
    assert_eq!(pay["daysAbsent"], 1);
    assert_eq!(pay["daysWorked"], "2.5");
    assert_eq!(pay["amount"], 25000);

    let (status, _) = send(
        &app,
        "GET",
        &format!("/workers/{id}/pay?start=2026-10-18&end=2026-10-12"),
        None,
        &[],
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, "GET", &format!("/workers/{id}/pay"), None, &[]).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // History stays readable after deactivation, new marks do not.
    send(&app, "DELETE", &format!("/workers/{id}"), None, &[]).await;
    let (status, pay) = send(
        &app,
        "GET",
        &format!("/workers/{id}/pay?start=2026-10-12&end=2026-10-18"),
        None,
        &[],
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(pay["amount"], 25000);

    let (status, _) = send(
        &app,
        "POST",
        &attendance,
        Some(json!({ "date": "2026-10-16", "status": "present" })),
        &[],
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_admin_create_and_login() {
    let app = test_app().await;
    let new_admin = json!({
        "username": "owner",
        "displayName": "Site Owner",
        "password": "correct-horse",
        "language": "fr"
    });

    let (status, admin) = send(&app, "POST", "/admins", Some(new_admin.clone()), &[]).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(admin["username"], "owner");
    assert_eq!(admin["language"], "fr");
    assert!(admin.get("passwordHash").is_none());

    let (status, body) = send(&app, "POST", "/admins", Some(new_admin), &[]).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "CONFLICT");

    let (status, logged_in) = send(
        &app,
        "POST",
        "/admins/login",
        Some(json!({ "username": "owner", "password": "correct-horse" })),
        &[],
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(logged_in["id"], admin["id"]);

    let (status, body) = send(
        &app,
        "POST",
        "/admins/login",
        Some(json!({ "username": "owner", "password": "wrong-password" })),
        &[],
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid username or password");

    let (status, _) = send(
        &app,
        "POST",
        "/admins",
        Some(json!({ "username": "ab", "displayName": "X", "password": "correct-horse" })),
        &[],
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
