use serde::Deserialize;

use crate::requests::ValidationError;

#[derive(Debug, Deserialize)]
pub struct QrisRequest {
    pub amount: Option<i64>,
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
}

/// Validated input for a QRIS donation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DonationRequest {
    pub amount: u64,
    pub user_id: String,
}

impl QrisRequest {
    pub fn validate(&self) -> Result<DonationRequest, ValidationError> {
        let (amount, user_id) = match (self.amount, self.user_id.as_deref()) {
            (Some(amount), Some(user_id)) if amount != 0 && !user_id.is_empty() => {
                (amount, user_id)
            }
            _ => return Err(ValidationError::MissingDonationFields),
        };

        let amount = u64::try_from(amount).map_err(|_| ValidationError::NonPositiveAmount)?;

        Ok(DonationRequest {
            amount,
            user_id: user_id.to_string(),
        })
    }
}
