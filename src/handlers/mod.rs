pub mod balance;
pub mod donations;
pub mod index;

use actix_web::{
    HttpRequest, HttpResponse,
    http::{Method, StatusCode, header},
};

use crate::utils::helpers::ApiResponse;

/// Answers any OPTIONS request the CORS middleware did not already treat as a
/// preflight.
pub fn preflight() -> HttpResponse {
    HttpResponse::Ok()
        .insert_header((header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"))
        .insert_header((
            header::ACCESS_CONTROL_ALLOW_METHODS,
            "GET, POST, PUT, DELETE, OPTIONS",
        ))
        .insert_header((header::ACCESS_CONTROL_ALLOW_HEADERS, "*"))
        .finish()
}

pub async fn not_found(req: HttpRequest) -> HttpResponse {
    if req.method() == Method::OPTIONS {
        return preflight();
    }
    ApiResponse::<()>::error("Not found".to_string()).to_response(StatusCode::NOT_FOUND)
}

pub async fn method_not_allowed(req: HttpRequest) -> HttpResponse {
    if req.method() == Method::OPTIONS {
        return preflight();
    }
    ApiResponse::<()>::error("Method not allowed".to_string())
        .to_response(StatusCode::METHOD_NOT_ALLOWED)
}
