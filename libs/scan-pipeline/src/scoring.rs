//! Contract with the remote scoring service.

use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};

use crate::errors::ScanError;
use crate::profile::UserProfileFlags;

/// Fallback shown when the service supplies no detail message.
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to analyze product. Please try again.";

const PERSONALIZED_SCAN_PATH: &str = "/scan/barcode/personalized";

/// Wire-level transaction input: the barcode plus the flattened profile.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ScanRequest {
    pub barcode: String,
    pub user_profile: UserProfileFlags,
}

/// Per-100g nutrition facts; every field is optional on the wire.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct NutritionInfo {
    #[serde(default)]
    pub energy_kcal_100g: Option<f64>,
    #[serde(default)]
    pub fat_100g: Option<f64>,
    #[serde(default)]
    pub saturated_fat_100g: Option<f64>,
    #[serde(default)]
    pub carbohydrates_100g: Option<f64>,
    #[serde(default)]
    pub sugars_100g: Option<f64>,
    #[serde(default)]
    pub proteins_100g: Option<f64>,
    #[serde(default)]
    pub sodium_100g: Option<f64>,
    #[serde(default)]
    pub fiber_100g: Option<f64>,
}

/// The scored product as returned by the service. Immutable once received;
/// presentation tiers are derived from it, never written back.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ScanResult {
    #[serde(default)]
    pub product_id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub nutrition: Option<NutritionInfo>,
    #[serde(default)]
    pub additives: Vec<String>,
    #[serde(default)]
    pub data_sources: Vec<String>,
    #[serde(default)]
    pub image_url: Option<String>,

    /// 0-100 fit of the product against the submitted profile.
    pub suitability_score: f64,
    #[serde(default)]
    pub reasons: Vec<String>,
    #[serde(default)]
    pub warnings: Vec<String>,
}

/// The scoring capability as the orchestrator sees it.
pub trait ScoreService {
    async fn score(&self, request: &ScanRequest) -> Result<ScanResult, ScanError>;
}

/// HTTP adapter for the scoring endpoint. One attempt per call, no retries.
pub struct HttpScoreService {
    client: reqwest::Client,
    base_url: String,
}

impl HttpScoreService {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        HttpScoreService { client, base_url }
    }

    fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, PERSONALIZED_SCAN_PATH)
    }
}

impl ScoreService for HttpScoreService {
    #[instrument(skip(self, request), fields(barcode = %request.barcode))]
    async fn score(&self, request: &ScanRequest) -> Result<ScanResult, ScanError> {
        let endpoint = self.endpoint();
        debug!("Posting scan request to {}", endpoint);

        let response = self.client.post(&endpoint).json(request).send().await?;
        let status = response.status();
        if status.is_success() {
            let result = response.json::<ScanResult>().await?;
            debug!(
                "Scored '{}' at {:.1}",
                result.name, result.suitability_score
            );
            Ok(result)
        } else {
            let body = response.text().await.unwrap_or_default();
            error!("Scoring service failed with status {}: {}", status, body);
            Err(ScanError::Service {
                status: status.as_u16(),
                message: extract_detail(&body),
            })
        }
    }
}

/// Pull a `detail` string out of an error body, falling back to the generic
/// message when the body is not JSON or carries none.
pub fn extract_detail(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .as_ref()
        .and_then(|value| value.get("detail"))
        .and_then(|detail| detail.as_str())
        .map(str::to_owned)
        .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string())
}
