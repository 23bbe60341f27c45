//! Image loading for logos, product photos and brand icons.
//!
//! A source string is one of:
//!
//! | Form | Example |
//! |------|---------|
//! | data URL | `data:image/png;base64,iVBOR...` |
//! | http(s) URL | `https://cdn.example.com/logo.png` |
//! | file path | `assets/logo.png` |

use ::image::DynamicImage;
use async_trait::async_trait;
use tracing::debug;

use super::decode_data_url;
use crate::error::CardError;

/// Turns an image source string into decoded pixels.
#[async_trait]
pub trait ImageLoader: Send + Sync {
    async fn load(&self, src: &str) -> Result<DynamicImage, CardError>;
}

/// Loader for data URLs, local files and http(s) URLs.
#[derive(Clone)]
pub struct DefaultImageLoader {
    http_client: reqwest::Client,
}

impl DefaultImageLoader {
    pub fn new() -> Result<Self, CardError> {
        let http_client = reqwest::Client::builder()
            .user_agent(concat!("speccard/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CardError::Image(format!("HTTP client error: {}", e)))?;
        Ok(Self { http_client })
    }

    pub fn with_client(http_client: reqwest::Client) -> Self {
        Self { http_client }
    }

    async fn fetch(&self, url: &str) -> Result<Vec<u8>, CardError> {
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| CardError::Image(format!("Failed to download {}: {}", url, e)))?;
        if !response.status().is_success() {
            return Err(CardError::Image(format!(
                "Failed to download {}: HTTP {}",
                url,
                response.status()
            )));
        }
        let bytes = response
            .bytes()
            .await
            .map_err(|e| CardError::Image(format!("Failed to read image data: {}", e)))?;
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl ImageLoader for DefaultImageLoader {
    async fn load(&self, src: &str) -> Result<DynamicImage, CardError> {
        let src = src.trim();
        if src.is_empty() {
            return Err(CardError::Image("empty image source".to_string()));
        }

        let bytes = if src.starts_with("data:") {
            decode_data_url(src)?
        } else if src.starts_with("http://") || src.starts_with("https://") {
            self.fetch(src).await?
        } else {
            tokio::fs::read(src)
                .await
                .map_err(|e| CardError::Image(format!("Failed to read {}: {}", src, e)))?
        };
        debug!(bytes = bytes.len(), "loaded image source");

        ::image::load_from_memory(&bytes)
            .map_err(|e| CardError::Image(format!("Failed to decode image: {}", e)))
    }
}
