use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum DonationStatus {
    Pending,
    Paid,
}

/// Snapshot of a donation as the upstream platform reports it.
///
/// Only `qr_string` is typed: it drives status derivation and QR rendering.
/// Every other field is owned by upstream and relayed as-is.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DonationRecord {
    #[serde(default)]
    pub qr_string: Option<String>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl DonationRecord {
    /// A donation is pending for as long as upstream still hands out a QR payload.
    pub fn status(&self) -> DonationStatus {
        match self.qr_string.as_deref() {
            Some(qr) if !qr.is_empty() => DonationStatus::Pending,
            _ => DonationStatus::Paid,
        }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Upstream id for log lines, whatever JSON type upstream chose for it.
    pub fn id(&self) -> &Value {
        self.get("id").unwrap_or(&Value::Null)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct QrisDonation {
    #[serde(flatten)]
    pub record: DonationRecord,
    pub qr_image: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CustomerInfo {
    pub first_name: String,
    pub email: String,
    pub phone: String,
}

impl CustomerInfo {
    pub fn anonymous() -> Self {
        Self {
            first_name: "Anonymous".to_string(),
            email: "anonymous@example.com".to_string(),
            phone: String::new(),
        }
    }
}

/// Body posted to the platform's donation endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDonation {
    pub agree: bool,
    pub not_underage: bool,
    pub message: String,
    pub amount: u64,
    #[serde(rename = "payment_type")]
    pub payment_type: String,
    pub vote: String,
    pub currency: String,
    #[serde(rename = "customer_info")]
    pub customer_info: CustomerInfo,
}

impl CreateDonation {
    pub fn qris(amount: u64) -> Self {
        Self {
            agree: true,
            not_underage: true,
            message: String::new(),
            amount,
            payment_type: "qris".to_string(),
            vote: String::new(),
            currency: "IDR".to_string(),
            customer_info: CustomerInfo::anonymous(),
        }
    }
}
