use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::config::PostfulConfig;
use crate::error::{SourceError, SourceResult};
use crate::pipeline::request::{Palette, PaletteRequest, PaletteResponse};

use super::PaletteSource;

/// Client for the Colormind palette generator.
#[derive(Clone)]
pub struct ColormindClient {
    client: Client,
    url: Arc<str>,
}

impl ColormindClient {
    pub fn new(config: &PostfulConfig) -> SourceResult<Self> {
        let client = Client::builder()
            .timeout(config.http_timeout)
            .build()
            .map_err(|source| SourceError::ClientBuilder { source })?;
        Ok(Self {
            client,
            url: Arc::from(config.colormind_url.as_str()),
        })
    }
}

#[async_trait]
impl PaletteSource for ColormindClient {
    fn name(&self) -> &str {
        "Colormind"
    }

    async fn suggest(&self, request: &PaletteRequest) -> SourceResult<Palette> {
        let url = self.url.to_string();
        let response = self
            .client
            .post(url.as_str())
            .json(request)
            .send()
            .await
            .map_err(|source| SourceError::RequestSend {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::RequestStatus { url, status });
        }

        // The service labels its JSON as text/html, so decode the raw body.
        let body = response
            .bytes()
            .await
            .map_err(|source| SourceError::ReadBody {
                url: url.clone(),
                source,
            })?;
        let decoded: PaletteResponse = serde_json::from_slice(&body)
            .map_err(|source| SourceError::DecodeResponse { url, source })?;
        debug!(palette = ?decoded.result, "received palette");
        Ok(decoded.result)
    }
}
