use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{
    Client, RequestBuilder, StatusCode, Url,
    header::{
        ACCEPT, ACCEPT_LANGUAGE, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue, ORIGIN,
        REFERER, USER_AGENT,
    },
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

use crate::models::{
    balance::BalanceSnapshot,
    donation::{CreateDonation, DonationRecord},
};

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

const CHALLENGE_MARKERS: [&str; 5] = [
    "just a moment",
    "cf-browser-verification",
    "challenge-platform",
    "cf_chl",
    "attention required! | cloudflare",
];

const HTML_MARKERS: [&str; 2] = ["<!doctype html", "<html"];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UpstreamError {
    #[error("Upstream client configuration error: {0}")]
    Config(String),
    #[error("Request to upstream failed: {0}")]
    Transport(String),
    #[error(
        "Request was blocked by Cloudflare protection. Please try again later or from a different network"
    )]
    Blocked,
    #[error("Invalid userId or donation page not found")]
    InvalidUser,
    #[error("API returned non-JSON response: {0}")]
    NonJson(u16),
    #[error("Failed to parse upstream response: {0}")]
    Decode(String),
    #[error("Upstream error ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("Unexpected response from upstream: missing qr_string")]
    UnexpectedShape,
    #[error("Invalid response from upstream")]
    InvalidResponse,
    #[error("Balance data is unavailable")]
    Unavailable,
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        UpstreamError::Transport(err.to_string())
    }
}

/// The three upstream calls the relay makes. Each is a single round trip,
/// never retried.
#[async_trait]
pub trait DonationGateway: Send + Sync {
    async fn create_donation(
        &self,
        amount: u64,
        user_id: &str,
    ) -> Result<DonationRecord, UpstreamError>;

    async fn fetch_donation_status(
        &self,
        donation_id: &str,
    ) -> Result<DonationRecord, UpstreamError>;

    async fn fetch_balance(&self, token: &str) -> Result<BalanceSnapshot, UpstreamError>;
}

pub type DynDonationGateway = Arc<dyn DonationGateway>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    CreateDonation,
    DonationStatus,
    Balance,
}

impl Endpoint {
    fn missing_data(self) -> UpstreamError {
        match self {
            Endpoint::CreateDonation => UpstreamError::UnexpectedShape,
            Endpoint::DonationStatus => UpstreamError::InvalidResponse,
            Endpoint::Balance => UpstreamError::Unavailable,
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Endpoint::CreateDonation => "create donation",
            Endpoint::DonationStatus => "donation status",
            Endpoint::Balance => "balance",
        };
        f.write_str(name)
    }
}

fn is_json(content_type: Option<&str>) -> bool {
    content_type.is_some_and(|ct| {
        let ct = ct.to_ascii_lowercase();
        ct.contains("application/json") || ct.contains("+json")
    })
}

fn sniff_non_json(endpoint: Endpoint, status: StatusCode, body: &str) -> UpstreamError {
    let lowered = body.to_ascii_lowercase();

    if CHALLENGE_MARKERS.iter().any(|marker| lowered.contains(marker)) {
        UpstreamError::Blocked
    } else if endpoint == Endpoint::CreateDonation
        && HTML_MARKERS.iter().any(|marker| lowered.contains(marker))
    {
        UpstreamError::InvalidUser
    } else {
        UpstreamError::NonJson(status.as_u16())
    }
}

/// Turns a raw upstream response into the `data` payload the endpoint
/// requires, or the error describing why it cannot be used.
///
/// A JSON body without `data` normally maps to the endpoint's shape error
/// (`UnexpectedShape`, `InvalidResponse`, `Unavailable`). When that body
/// carries a `message` string it becomes `Rejected` instead, so upstream's
/// own explanation reaches the caller. Both end up as the same 400 envelope.
pub fn classify(
    endpoint: Endpoint,
    status: StatusCode,
    content_type: Option<&str>,
    body: &str,
) -> Result<Value, UpstreamError> {
    if !is_json(content_type) {
        return Err(sniff_non_json(endpoint, status, body));
    }

    let mut payload: Value =
        serde_json::from_str(body).map_err(|e| UpstreamError::Decode(e.to_string()))?;

    let data = match payload.get_mut("data").map(Value::take) {
        Some(data) if !data.is_null() => data,
        _ => {
            return Err(match payload.get("message").and_then(Value::as_str) {
                Some(message) => UpstreamError::Rejected {
                    status: status.as_u16(),
                    message: message.to_string(),
                },
                None => endpoint.missing_data(),
            });
        }
    };

    if endpoint == Endpoint::CreateDonation {
        let has_qr = data
            .get("qr_string")
            .and_then(Value::as_str)
            .is_some_and(|qr| !qr.is_empty());
        if !has_qr {
            return Err(UpstreamError::UnexpectedShape);
        }
    }

    Ok(data)
}

fn browser_headers(site_url: &str) -> Result<HeaderMap, UpstreamError> {
    let site = site_url.trim_end_matches('/');
    let origin = HeaderValue::from_str(site)
        .map_err(|e| UpstreamError::Config(format!("Invalid site URL {}: {}", site_url, e)))?;
    let referer = HeaderValue::from_str(&format!("{}/", site))
        .map_err(|e| UpstreamError::Config(format!("Invalid site URL {}: {}", site_url, e)))?;

    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("application/json, text/plain, */*"),
    );
    headers.insert(
        ACCEPT_LANGUAGE,
        HeaderValue::from_static("id-ID,id;q=0.9,en-US;q=0.8,en;q=0.7"),
    );
    headers.insert(ORIGIN, origin);
    headers.insert(REFERER, referer);
    Ok(headers)
}

/// HTTP client for the donation platform's public API.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    client: Client,
    base_url: Url,
}

impl UpstreamClient {
    pub fn new(base_url: &str, site_url: &str) -> Result<Self, UpstreamError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| UpstreamError::Config(format!("Invalid base URL {}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(UpstreamError::Config(format!(
                "{} cannot be used as a base URL",
                base_url
            )));
        }

        let client = Client::builder()
            .default_headers(browser_headers(site_url)?)
            .build()?;

        Ok(Self { client, base_url })
    }

    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        request: RequestBuilder,
    ) -> Result<T, UpstreamError> {
        let response = request.send().await?;
        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let body = response.text().await?;

        let data = classify(endpoint, status, content_type.as_deref(), &body).inspect_err(|e| {
            warn!("Upstream {} call returned {}: {}", endpoint, status, e);
        })?;

        serde_json::from_value(data).map_err(|e| UpstreamError::Decode(e.to_string()))
    }
}

#[async_trait]
impl DonationGateway for UpstreamClient {
    async fn create_donation(
        &self,
        amount: u64,
        user_id: &str,
    ) -> Result<DonationRecord, UpstreamError> {
        let url = self.url(&["donations", user_id]);
        info!("Posting QRIS donation of {} IDR to {}", amount, url);

        let request = self.client.post(url).json(&CreateDonation::qris(amount));
        self.execute(Endpoint::CreateDonation, request).await
    }

    async fn fetch_donation_status(
        &self,
        donation_id: &str,
    ) -> Result<DonationRecord, UpstreamError> {
        let url = self.url(&["donations", "qris", donation_id]);
        info!("Fetching donation status from {}", url);

        self.execute(Endpoint::DonationStatus, self.client.get(url))
            .await
    }

    async fn fetch_balance(&self, token: &str) -> Result<BalanceSnapshot, UpstreamError> {
        let url = self.url(&["donations", "balance"]);
        info!("Fetching balance from {}", url);

        let request = self
            .client
            .get(url)
            .header(AUTHORIZATION, format!("Bearer {}", token));
        self.execute(Endpoint::Balance, request).await
    }
}
