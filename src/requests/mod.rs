pub mod balance;
pub mod donation;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Amount and userId are required")]
    MissingDonationFields,
    #[error("Amount must be a positive integer")]
    NonPositiveAmount,
    #[error("Token is required")]
    MissingToken,
}
