use actix_web::{HttpResponse, Result};
use chrono::Utc;
use serde_json::json;

pub async fn index() -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "description": "QRIS payment relay",
        "endpoints": {
            "createQris": "POST /qris",
            "checkStatus": "GET /status/{donationId}",
            "checkBalance": "GET /balance?token=..."
        },
        "timestamp": Utc::now().to_rfc3339(),
    })))
}
