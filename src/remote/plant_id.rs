use super::{DiseaseDetector, PlantIdentifier, http_client};
use crate::config::PlantIdConfig;
use crate::errors::{AppError, AppResult};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

const MODIFIERS: &[&str] = &["crops_fast", "similar_images", "health_all"];
const PLANT_DETAILS: &[&str] = &[
    "common_names",
    "url",
    "name_authority",
    "wiki_description",
    "taxonomy",
];
const DISEASE_DETAILS: &[&str] = &[
    "common_names",
    "url",
    "description",
    "treatment",
    "classification",
    "cause",
];

#[derive(Debug, Serialize)]
struct AnalysisRequest<'a> {
    images: Vec<String>,
    modifiers: &'a [&'a str],
    plant_details: &'a [&'a str],
    #[serde(skip_serializing_if = "Option::is_none")]
    disease_details: Option<&'a [&'a str]>,
}

// ---------------------------------------------------------------------------
// Identification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IdentifyResponse {
    #[serde(default)]
    pub suggestions: Vec<Suggestion>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Suggestion {
    #[serde(default)]
    pub plant_name: String,
    #[serde(default)]
    pub probability: f64,
    #[serde(default)]
    pub plant_details: Option<PlantDetails>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlantDetails {
    #[serde(default)]
    pub common_names: Option<Vec<String>>,
    #[serde(default)]
    pub name_authority: Option<String>,
}

impl Suggestion {
    /// First common name, else the scientific name.
    pub fn display_name(&self) -> String {
        self.plant_details
            .as_ref()
            .and_then(|d| d.common_names.as_ref())
            .and_then(|names| names.first())
            .cloned()
            .unwrap_or_else(|| self.plant_name.clone())
    }

    /// Name with authority, else the scientific name.
    pub fn species(&self) -> String {
        self.plant_details
            .as_ref()
            .and_then(|d| d.name_authority.clone())
            .unwrap_or_else(|| self.plant_name.clone())
    }

    pub fn confidence_pct(&self) -> i64 {
        (self.probability * 100.0).round() as i64
    }
}

// ---------------------------------------------------------------------------
// Health assessment
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HealthResponse {
    #[serde(default)]
    pub health_assessment: Option<HealthAssessment>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HealthAssessment {
    #[serde(default)]
    pub diseases: Vec<Disease>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Disease {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub probability: f64,
    #[serde(default)]
    pub disease_details: Option<DiseaseDetails>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DiseaseDetails {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub treatment: Option<Treatment>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Treatment {
    #[serde(default)]
    pub biological: Option<Vec<String>>,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

pub struct PlantIdClient {
    base_url: String,
    api_key: String,
    http: reqwest::blocking::Client,
}

impl PlantIdClient {
    pub fn new(cfg: &PlantIdConfig) -> AppResult<Self> {
        Ok(Self {
            base_url: cfg.endpoint.trim_end_matches('/').to_string(),
            api_key: cfg.api_key.clone(),
            http: http_client()?,
        })
    }

    fn post<T: DeserializeOwned>(&self, path: &str, body: &AnalysisRequest<'_>) -> AppResult<T> {
        if self.api_key.trim().is_empty() {
            return Err(AppError::Remote("plant.id API key is not configured".into()));
        }

        let url = format!("{}/{}", self.base_url, path);
        let resp = self
            .http
            .post(url)
            .header("Api-Key", &self.api_key)
            .json(body)
            .send()?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().unwrap_or_default();
            return Err(AppError::Remote(format!("plant.id {}: {}", status, text)));
        }

        Ok(resp.json::<T>()?)
    }
}

impl PlantIdentifier for PlantIdClient {
    fn identify(&self, image: &[u8]) -> AppResult<IdentifyResponse> {
        let req = AnalysisRequest {
            images: vec![STANDARD.encode(image)],
            modifiers: MODIFIERS,
            plant_details: PLANT_DETAILS,
            disease_details: None,
        };
        self.post("identify", &req)
    }
}

impl DiseaseDetector for PlantIdClient {
    fn assess_health(&self, image: &[u8]) -> AppResult<HealthResponse> {
        let req = AnalysisRequest {
            images: vec![STANDARD.encode(image)],
            modifiers: MODIFIERS,
            plant_details: PLANT_DETAILS,
            disease_details: Some(DISEASE_DETAILS),
        };
        self.post("health_assessment", &req)
    }
}
