use serde::Deserialize;

use crate::requests::ValidationError;

#[derive(Debug, Deserialize)]
pub struct BalanceQuery {
    pub token: Option<String>,
}

impl BalanceQuery {
    pub fn token(&self) -> Result<&str, ValidationError> {
        match self.token.as_deref() {
            Some(token) if !token.is_empty() => Ok(token),
            _ => Err(ValidationError::MissingToken),
        }
    }
}
