use actix_web::{HttpResponse, Result, web};
use tracing::{error, info, warn};

use crate::requests::balance::BalanceQuery;
use crate::services::upstream::DonationGateway;
use crate::utils::helpers::{BalanceResponse, bad_request};

pub async fn check_balance(
    gateway: web::Data<dyn DonationGateway>,
    query: web::Query<BalanceQuery>,
) -> Result<HttpResponse> {
    let token = match query.token() {
        Ok(token) => token,
        Err(e) => {
            warn!("Rejected balance request: {}", e);
            return Ok(bad_request(e));
        }
    };

    info!("Fetching account balance");

    match gateway.fetch_balance(token).await {
        Ok(balance) => Ok(HttpResponse::Ok().json(BalanceResponse::new(balance))),
        Err(e) => {
            error!("Error fetching balance: {}", e);
            Ok(bad_request(e))
        }
    }
}
