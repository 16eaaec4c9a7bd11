use actix_web::{HttpResponse, http::StatusCode};
use serde::Serialize;

use crate::models::{balance::BalanceSnapshot, donation::DonationStatus};

#[derive(Serialize, Debug)]
pub struct ApiResponse<T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<DonationStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            status: None,
            data: Some(data),
            error: None,
        }
    }

    pub fn success_with_status(data: T, status: DonationStatus) -> Self {
        Self {
            success: true,
            status: Some(status),
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: String) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            status: None,
            data: None,
            error: Some(message),
        }
    }
}

impl ApiResponse<()> {
    pub fn to_response(&self, status: StatusCode) -> HttpResponse {
        HttpResponse::build(status).json(self)
    }
}

#[derive(Serialize, Debug)]
pub struct BalanceResponse {
    success: bool,
    balance: BalanceSnapshot,
}

impl BalanceResponse {
    pub fn new(balance: BalanceSnapshot) -> Self {
        Self {
            success: true,
            balance,
        }
    }
}

/// Every failure the relay reports, whatever its cause, is a 400 with the
/// message in `error`.
pub fn bad_request(error: impl ToString) -> HttpResponse {
    ApiResponse::<()>::error(error.to_string()).to_response(StatusCode::BAD_REQUEST)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn error_envelope_has_only_success_and_error() {
        let body = serde_json::to_value(ApiResponse::<()>::error("Token is required".into())).unwrap();
        assert_eq!(body, json!({"success": false, "error": "Token is required"}));
    }

    #[test]
    fn status_envelope_includes_status() {
        let body = serde_json::to_value(ApiResponse::success_with_status(
            json!({"id": "d1"}),
            DonationStatus::Pending,
        ))
        .unwrap();
        assert_eq!(
            body,
            json!({"success": true, "status": "PENDING", "data": {"id": "d1"}})
        );
    }
}
