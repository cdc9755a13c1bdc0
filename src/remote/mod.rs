//! Third-party HTTP collaborators: plant.id (identification and health
//! assessment) and an OpenAI-compatible chat completion endpoint.
//!
//! Plain request/response, no retry. Each client sits behind a trait so the
//! disease finder can be driven without the network.

pub mod chat;
pub mod plant_id;

use crate::errors::AppResult;
use plant_id::{HealthResponse, IdentifyResponse};

pub trait PlantIdentifier {
    fn identify(&self, image: &[u8]) -> AppResult<IdentifyResponse>;
}

pub trait DiseaseDetector {
    fn assess_health(&self, image: &[u8]) -> AppResult<HealthResponse>;
}

pub trait ChatCompleter {
    fn complete(&self, user_message: &str) -> AppResult<String>;
}

const HTTP_TIMEOUT_SECS: u64 = 30;

fn http_client() -> AppResult<reqwest::blocking::Client> {
    Ok(reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(HTTP_TIMEOUT_SECS))
        .build()?)
}
