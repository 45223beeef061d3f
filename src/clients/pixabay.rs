use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::{debug, error, warn};
use url::Url;

use super::{ImageProvider, ProviderError};
use crate::config::ProviderConfig;
use crate::models::ImageResult;

#[derive(Debug, Deserialize)]
struct PixabayResponse {
    #[serde(default)]
    hits: Vec<PixabayHit>,
}

/// Only the projected fields are read. Each keeps whatever JSON value the
/// provider sent, including an explicit `null`; `None` means the key was absent.
#[derive(Debug, Deserialize)]
pub struct PixabayHit {
    #[serde(rename = "webformatURL", default, deserialize_with = "present")]
    pub webformat_url: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub tags: Option<Value>,
    #[serde(rename = "pageURL", default, deserialize_with = "present")]
    pub page_url: Option<Value>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl From<PixabayHit> for ImageResult {
    fn from(hit: PixabayHit) -> Self {
        Self {
            url: hit.webformat_url,
            description: hit.tags,
            page_url: hit.page_url,
        }
    }
}

#[derive(Clone)]
pub struct PixabayClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    image_type: String,
}

impl PixabayClient {
    #[must_use]
    pub fn with_shared_client(client: Client, config: &ProviderConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.clone(),
            api_key: config
                .api_key
                .clone()
                .filter(|key| !key.trim().is_empty()),
            image_type: config.image_type.clone(),
        }
    }

    fn search_url(
        &self,
        api_key: &str,
        term: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Url, ProviderError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ProviderError::Request(format!("Invalid provider URL: {e}")))?;

        url.query_pairs_mut()
            .append_pair("key", api_key)
            .append_pair("q", term)
            .append_pair("image_type", &self.image_type)
            .append_pair("page", &page.to_string())
            .append_pair("per_page", &per_page.to_string());

        Ok(url)
    }
}

/// Error payloads are passed through as JSON when possible, raw text otherwise.
fn error_details(body: &str) -> Value {
    if body.trim().is_empty() {
        return Value::Null;
    }

    serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_string()))
}

fn parse_hits(body: &[u8]) -> Vec<ImageResult> {
    match serde_json::from_slice::<PixabayResponse>(body) {
        Ok(response) => response.hits.into_iter().map(ImageResult::from).collect(),
        Err(e) => {
            warn!("Unexpected Pixabay response shape, returning no results: {}", e);
            Vec::new()
        }
    }
}

#[async_trait]
impl ImageProvider for PixabayClient {
    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn search_images(
        &self,
        term: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<ImageResult>, ProviderError> {
        let api_key = self.api_key.as_deref().ok_or(ProviderError::MissingApiKey)?;
        let url = self.search_url(api_key, term, page, per_page)?;

        debug!(term = %term, page, per_page, "Querying Pixabay");

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_builder() {
                ProviderError::Request(e.to_string())
            } else {
                ProviderError::Unreachable(e.without_url().to_string())
            }
        })?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = status.as_u16(), body = %body, "Pixabay API error");
            return Err(ProviderError::Status {
                status: status.as_u16(),
                details: error_details(&body),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ProviderError::Unreachable(e.without_url().to_string()))?;

        Ok(parse_hits(&body))
    }
}
