use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::artwork::{ArtworkDetail, ArtworkSummary};
use crate::config::PostfulConfig;
use crate::error::{SourceError, SourceResult};

use super::ArtworkSource;

/// Number of result pages the landscape search spans.
pub const PAGE_COUNT: u8 = 4;
/// Results per page.
const PAGE_SIZE: &str = "100";
const SEARCH_TERM: &str = "landscape";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListResponse {
    #[serde(default)]
    art_objects: Vec<ArtworkSummary>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DetailResponse {
    art_object: ArtworkDetail,
}

/// Client for the Rijksmuseum collection API.
#[derive(Clone)]
pub struct RijksClient {
    client: Client,
    base_url: Arc<str>,
    api_key: Arc<str>,
}

impl RijksClient {
    pub fn new(config: &PostfulConfig) -> SourceResult<Self> {
        let client = Client::builder()
            .timeout(config.http_timeout)
            .build()
            .map_err(|source| SourceError::ClientBuilder { source })?;
        Ok(Self {
            client,
            base_url: Arc::from(config.rijks_url.trim_end_matches('/')),
            api_key: Arc::from(config.rijks_key.as_str()),
        })
    }

    /// Query parameters shared by the search and detail calls.
    fn query(&self, page: u8) -> Vec<(&'static str, String)> {
        vec![
            ("key", self.api_key.to_string()),
            ("format", "json".into()),
            ("culture", "en".into()),
            ("imgonly", "true".into()),
            ("toppieces", "true".into()),
            ("type", "painting".into()),
            ("ps", PAGE_SIZE.into()),
            ("p", page.to_string()),
            ("q", SEARCH_TERM.into()),
        ]
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, page: u8) -> SourceResult<T> {
        let response = self
            .client
            .get(url)
            .query(&self.query(page))
            .send()
            .await
            .map_err(|source| SourceError::RequestSend {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::RequestStatus {
                url: url.to_string(),
                status,
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| SourceError::ReadBody {
                url: url.to_string(),
                source,
            })?;
        serde_json::from_slice(&body).map_err(|source| SourceError::DecodeResponse {
            url: url.to_string(),
            source,
        })
    }
}

#[async_trait]
impl ArtworkSource for RijksClient {
    fn name(&self) -> &str {
        "Rijksmuseum"
    }

    async fn list(&self, page: u8) -> SourceResult<Vec<ArtworkSummary>> {
        let url = self.base_url.to_string();
        let response: ListResponse = self.get_json(&url, page).await?;
        debug!(page, count = response.art_objects.len(), "fetched collection page");
        Ok(response.art_objects)
    }

    async fn detail(&self, object_number: &str) -> SourceResult<ArtworkDetail> {
        let url = format!("{}/{}", self.base_url, object_number);
        let response: DetailResponse = self.get_json(&url, 1).await?;
        debug!(
            object_number,
            swatches = response.art_object.colors.len(),
            "fetched artwork detail"
        );
        Ok(response.art_object)
    }
}
