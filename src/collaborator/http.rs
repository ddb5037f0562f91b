use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::{
    collaborator::ArtistSource,
    config,
    error::FetchError,
    session::{SESSION_PARAM, Session},
    types::{Artist, HealthResponse, LoginResponse, TimeRange, TopArtistsResponse},
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// reqwest-backed client for the analysis service.
///
/// Every non-2xx answer is turned into [`FetchError::Status`]; there is no
/// retry here, callers decide what a failure means.
#[derive(Debug, Clone)]
pub struct HttpCollaborator {
    base_url: String,
    client: Client,
}

impl HttpCollaborator {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        }
    }

    pub fn from_env() -> Self {
        Self::new(config::api_url())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Asks the service where to send the browser for the Spotify login.
    pub async fn login_url(&self) -> Result<String, FetchError> {
        let res = self
            .client
            .get(format!("{}/login", self.base_url))
            .send()
            .await?
            .error_for_status()?;

        let body = res.json::<LoginResponse>().await?;
        Ok(body.auth_url)
    }

    pub async fn health(&self) -> Result<HealthResponse, FetchError> {
        let res = self
            .client
            .get(format!("{}/health", self.base_url))
            .send()
            .await?
            .error_for_status()?;

        Ok(res.json::<HealthResponse>().await?)
    }
}

#[async_trait]
impl ArtistSource for HttpCollaborator {
    async fn top_artists(
        &self,
        session: &Session,
        range: TimeRange,
    ) -> Result<Vec<Artist>, FetchError> {
        tracing::debug!(range = %range, "requesting top artists");

        let res = self
            .client
            .get(format!("{}/top-artists-gender", self.base_url))
            .query(&[(SESSION_PARAM, session.id()), ("time_range", range.as_str())])
            .send()
            .await?
            .error_for_status()?;

        let body = res.json::<TopArtistsResponse>().await?;
        Ok(body.artists)
    }
}
