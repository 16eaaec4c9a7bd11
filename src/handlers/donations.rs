use actix_web::{HttpResponse, Result, web};
use tracing::{error, info, warn};

use crate::models::donation::QrisDonation;
use crate::requests::donation::QrisRequest;
use crate::services::{qr, upstream::DonationGateway};
use crate::utils::helpers::{ApiResponse, bad_request};

pub async fn create_qris(
    gateway: web::Data<dyn DonationGateway>,
    request: web::Json<QrisRequest>,
) -> Result<HttpResponse> {
    let donation = match request.validate() {
        Ok(donation) => donation,
        Err(e) => {
            warn!("Rejected QRIS request: {}", e);
            return Ok(bad_request(e));
        }
    };

    info!(
        "Creating QRIS donation of {} IDR for user: {}",
        donation.amount, donation.user_id
    );

    let record = match gateway
        .create_donation(donation.amount, &donation.user_id)
        .await
    {
        Ok(record) => record,
        Err(e) => {
            error!("Error creating donation for {}: {}", donation.user_id, e);
            return Ok(bad_request(e));
        }
    };

    let payload = record.qr_string.clone().unwrap_or_default();
    match web::block(move || qr::encode_data_url(&payload)).await {
        Ok(Ok(qr_image)) => {
            info!("Successfully created donation with ID: {}", record.id());
            Ok(HttpResponse::Ok().json(ApiResponse::success(QrisDonation { record, qr_image })))
        }
        Ok(Err(e)) => {
            error!("Error rendering QR for donation {}: {}", record.id(), e);
            Ok(bad_request(e))
        }
        Err(e) => {
            error!("QR rendering task failed for donation {}: {}", record.id(), e);
            Ok(bad_request(e))
        }
    }
}

pub async fn check_status(
    gateway: web::Data<dyn DonationGateway>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let donation_id = path.into_inner();
    info!("Checking status of donation {}", donation_id);

    match gateway.fetch_donation_status(&donation_id).await {
        Ok(record) => {
            let status = record.status();
            info!("Donation {} is {:?}", donation_id, status);
            Ok(HttpResponse::Ok().json(ApiResponse::success_with_status(record, status)))
        }
        Err(e) => {
            error!("Error checking donation {}: {}", donation_id, e);
            Ok(bad_request(e))
        }
    }
}
