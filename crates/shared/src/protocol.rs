use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{domain::ImageRecord, error::ApiException};

pub const SEARCH_IMAGES_PATH: &str = "/api/search_images";
pub const GENERATE_PATH: &str = "/api/generate";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchImagesQuery {
    pub input: String,
}

pub type SearchImagesResponse = Vec<ImageRecord>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub input: String,
}

/// Body of a `POST /api/generate` answer.
///
/// The server signals failure by including an `error` field, whatever its
/// value. Every other field is informational and left unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerateResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "present")]
    pub error: Option<Value>,
}

/// Keeps `"error": null` distinguishable from a missing key.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateAccepted {
    pub image_url: Option<String>,
}

impl GenerateResponse {
    pub fn into_result(self) -> Result<GenerateAccepted, ApiException> {
        if let Some(value) = self.error {
            return Err(ApiException::from_error_value(&value));
        }
        let image_url = match self.image_url {
            Some(Value::String(url)) => Some(url),
            _ => None,
        };
        Ok(GenerateAccepted { image_url })
    }
}
