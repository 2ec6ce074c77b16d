use async_trait::async_trait;
use reqwest::Client;
use shared::{
    domain::ImageRecord,
    protocol::{
        GenerateRequest, GenerateResponse, SearchImagesQuery, SearchImagesResponse, GENERATE_PATH,
        SEARCH_IMAGES_PATH,
    },
};
use tracing::{debug, info};
use url::Url;

pub mod config;
pub mod controller;
pub mod error;
pub mod view;
pub mod workflow;

pub use config::{load_settings, ClientSettings};
pub use controller::{ActionFailure, ActionKind, Command, Completion, RequestToken, UiState};
pub use error::GalleryError;
pub use view::{GalleryTile, GalleryView};
pub use workflow::{execute, generate_and_refresh, Finished, GenerateStep};

/// The two server capabilities the gallery needs.
#[async_trait]
pub trait GalleryApi: Send + Sync {
    async fn search_images(&self, input: &str) -> Result<Vec<ImageRecord>, GalleryError>;

    /// Submits a generation request. A readable body is returned as-is even
    /// when it carries an `error` field; interpreting it is the caller's job.
    async fn generate(&self, input: &str) -> Result<GenerateResponse, GalleryError>;
}

#[derive(Clone)]
pub struct HttpGalleryClient {
    http: Client,
    server_url: String,
}

impl HttpGalleryClient {
    pub fn new(server_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            server_url: server_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_settings(settings: &ClientSettings) -> Self {
        Self::new(settings.server_url.clone())
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    /// Resolves an `image_path` the way a page served from the server root
    /// would: relative paths hang off the server URL, absolute URLs pass through.
    pub fn resolve_image_url(&self, image_path: &str) -> Result<Url, GalleryError> {
        let base = Url::parse(&format!("{}/", self.server_url)).map_err(|err| {
            GalleryError::InvalidLocation {
                location: self.server_url.clone(),
                message: err.to_string(),
            }
        })?;
        base.join(image_path)
            .map_err(|err| GalleryError::InvalidLocation {
                location: image_path.to_string(),
                message: err.to_string(),
            })
    }

    pub async fn fetch_image_bytes(&self, image_path: &str) -> Result<Vec<u8>, GalleryError> {
        let url = self.resolve_image_url(image_path)?;
        debug!(%url, "fetching gallery image");
        let res = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|err| GalleryError::transport(url.as_str(), err))?
            .error_for_status()
            .map_err(|err| GalleryError::transport(url.as_str(), err))?;
        let bytes = res
            .bytes()
            .await
            .map_err(|err| GalleryError::transport(url.as_str(), err))?;
        Ok(bytes.to_vec())
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.server_url, path)
    }
}

#[async_trait]
impl GalleryApi for HttpGalleryClient {
    async fn search_images(&self, input: &str) -> Result<Vec<ImageRecord>, GalleryError> {
        debug!(input, "searching images");
        let res = self
            .http
            .get(self.endpoint(SEARCH_IMAGES_PATH))
            .query(&SearchImagesQuery {
                input: input.to_string(),
            })
            .send()
            .await
            .map_err(|err| GalleryError::transport(SEARCH_IMAGES_PATH, err))?;
        let status = res.status().as_u16();
        let body = res
            .bytes()
            .await
            .map_err(|err| GalleryError::transport(SEARCH_IMAGES_PATH, err))?;
        let records: SearchImagesResponse = serde_json::from_slice(&body)
            .map_err(|err| GalleryError::decode(SEARCH_IMAGES_PATH, status, err))?;
        info!(input, count = records.len(), "image search returned");
        Ok(records)
    }

    async fn generate(&self, input: &str) -> Result<GenerateResponse, GalleryError> {
        debug!(input, "requesting image generation");
        // Failures come back as 500 with an `error` body, so the status is not checked.
        let res = self
            .http
            .post(self.endpoint(GENERATE_PATH))
            .json(&GenerateRequest {
                input: input.to_string(),
            })
            .send()
            .await
            .map_err(|err| GalleryError::transport(GENERATE_PATH, err))?;
        let status = res.status().as_u16();
        let body = res
            .bytes()
            .await
            .map_err(|err| GalleryError::transport(GENERATE_PATH, err))?;
        serde_json::from_slice(&body).map_err(|err| GalleryError::decode(GENERATE_PATH, status, err))
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
