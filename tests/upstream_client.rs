use actix_web::{App, HttpRequest, HttpResponse, HttpServer, http::header, web};
use qris_relay::{
    models::donation::DonationStatus,
    services::upstream::{DonationGateway, UpstreamClient, UpstreamError},
};
use serde_json::{Value, json};

const CHALLENGE_PAGE: &str = "<!DOCTYPE html><html><head><title>Just a moment...</title></head><body><div id=\"challenge-platform\"></div></body></html>";
const NOT_FOUND_PAGE: &str = "<!DOCTYPE html><html><body><h1>Page not found</h1></body></html>";

async fn create(
    req: HttpRequest,
    path: web::Path<String>,
    body: web::Json<Value>,
) -> HttpResponse {
    let from_browser = req
        .headers()
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ua| ua.starts_with("Mozilla/5.0"));
    if !from_browser || body["payment_type"] != "qris" || body["currency"] != "IDR" {
        return HttpResponse::UnprocessableEntity().json(json!({"message": "Bad payload"}));
    }

    match path.as_str() {
        "blocked" => HttpResponse::Forbidden()
            .content_type("text/html; charset=UTF-8")
            .body(CHALLENGE_PAGE),
        "ghost" => HttpResponse::NotFound()
            .content_type("text/html; charset=UTF-8")
            .body(NOT_FOUND_PAGE),
        "noqr" => HttpResponse::Ok().json(json!({"data": {"id": "d0", "amount": body["amount"]}})),
        _ => HttpResponse::Ok().json(json!({
            "data": {
                "id": "d1",
                "amount": body["amount"],
                "currency": "IDR",
                "qr_string": "00020101021126570011ID.DANA.WWW",
                "created_at": "2025-01-15T10:30:00Z"
            }
        })),
    }
}

async fn status(path: web::Path<String>) -> HttpResponse {
    match path.as_str() {
        "d1" => HttpResponse::Ok().json(json!({
            "data": {"id": "d1", "qr_string": "00020101021126570011ID.DANA.WWW", "paid_at": null}
        })),
        "d2" => HttpResponse::Ok().json(json!({
            "data": {"id": "d2", "qr_string": null, "paid_at": "2025-01-15T10:40:00Z"}
        })),
        "42" => HttpResponse::Ok().json(json!({
            "data": {"id": 42, "amount": "10000", "qr_string": null, "paid_at": 1736937600}
        })),
        _ => HttpResponse::Ok().json(json!({})),
    }
}

async fn balance(req: HttpRequest) -> HttpResponse {
    let auth = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    match auth {
        "Bearer good" => HttpResponse::Ok().json(json!({
            "data": {"available": 150000, "pending": 0, "currency": "IDR", "last_updated": "2025-01-15T10:00:00Z"}
        })),
        "Bearer loose" => HttpResponse::Ok().json(json!({
            "data": {"available": "150000", "pending": "0", "last_updated": 1736935200}
        })),
        "Bearer maintenance" => HttpResponse::ServiceUnavailable()
            .content_type("text/plain")
            .body("down for maintenance"),
        _ => HttpResponse::Unauthorized().json(json!({"message": "Unauthorized"})),
    }
}

fn spawn_upstream() -> UpstreamClient {
    let server = HttpServer::new(|| {
        App::new()
            .route("/donations/balance", web::get().to(balance))
            .route("/donations/qris/{id}", web::get().to(status))
            .route("/donations/{user_id}", web::post().to(create))
    })
    .workers(1)
    .disable_signals()
    .bind(("127.0.0.1", 0))
    .unwrap();

    let addr = server.addrs()[0];
    actix_web::rt::spawn(server.run());

    UpstreamClient::new(&format!("http://{}", addr), "https://donate.example.com").unwrap()
}

#[actix_web::test]
async fn create_donation_returns_record() {
    let client = spawn_upstream();
    let record = client.create_donation(10000, "abc").await.unwrap();

    assert_eq!(record.id(), &json!("d1"));
    assert_eq!(record.qr_string.as_deref(), Some("00020101021126570011ID.DANA.WWW"));
    assert_eq!(record.get("currency"), Some(&json!("IDR")));
    assert_eq!(record.status(), DonationStatus::Pending);
}

#[actix_web::test]
async fn create_donation_detects_challenge_page() {
    let client = spawn_upstream();
    assert_eq!(
        client.create_donation(10000, "blocked").await,
        Err(UpstreamError::Blocked)
    );
}

#[actix_web::test]
async fn create_donation_detects_unknown_user() {
    let client = spawn_upstream();
    assert_eq!(
        client.create_donation(10000, "ghost").await,
        Err(UpstreamError::InvalidUser)
    );
}

#[actix_web::test]
async fn create_donation_requires_qr_string() {
    let client = spawn_upstream();
    assert_eq!(
        client.create_donation(10000, "noqr").await,
        Err(UpstreamError::UnexpectedShape)
    );
}

#[actix_web::test]
async fn donation_status_follows_qr_string() {
    let client = spawn_upstream();

    let pending = client.fetch_donation_status("d1").await.unwrap();
    assert_eq!(pending.status(), DonationStatus::Pending);

    let paid = client.fetch_donation_status("d2").await.unwrap();
    assert_eq!(paid.status(), DonationStatus::Paid);
    assert_eq!(paid.get("paid_at"), Some(&json!("2025-01-15T10:40:00Z")));

    assert_eq!(
        client.fetch_donation_status("unknown").await,
        Err(UpstreamError::InvalidResponse)
    );
}

#[actix_web::test]
async fn balance_sends_bearer_token() {
    let client = spawn_upstream();

    let balance = client.fetch_balance("good").await.unwrap();
    assert_eq!(balance.get("currency"), Some(&json!("IDR")));
    assert_eq!(balance.get("available"), Some(&json!(150000)));

    assert_eq!(
        client.fetch_balance("expired").await,
        Err(UpstreamError::Rejected {
            status: 401,
            message: "Unauthorized".to_string()
        })
    );
}

#[actix_web::test]
async fn loosely_typed_snapshots_are_relayed() {
    let client = spawn_upstream();

    let paid = client.fetch_donation_status("42").await.unwrap();
    assert_eq!(paid.status(), DonationStatus::Paid);
    assert_eq!(paid.id(), &json!(42));
    assert_eq!(paid.get("amount"), Some(&json!("10000")));
    assert_eq!(paid.get("paid_at"), Some(&json!(1736937600)));

    let balance = client.fetch_balance("loose").await.unwrap();
    assert_eq!(balance.get("available"), Some(&json!("150000")));
    assert_eq!(balance.get("last_updated"), Some(&json!(1736935200)));
}

#[actix_web::test]
async fn balance_reports_non_json_status() {
    let client = spawn_upstream();
    let err = client.fetch_balance("maintenance").await.unwrap_err();

    assert_eq!(err, UpstreamError::NonJson(503));
    assert_eq!(err.to_string(), "API returned non-JSON response: 503");
}

#[actix_web::test]
async fn unreachable_upstream_is_transport_error() {
    let client = UpstreamClient::new("http://127.0.0.1:1", "https://donate.example.com").unwrap();
    assert!(matches!(
        client.fetch_balance("good").await,
        Err(UpstreamError::Transport(_))
    ));
}
