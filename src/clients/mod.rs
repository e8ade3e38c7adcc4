/// External API clients module
use crate::domain::{Launch, Rocket};
use crate::errors::{ApiError, ApiResult};
use crate::utils::non_empty;
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

/// Read-only access to launch data
#[async_trait]
pub trait LaunchGateway: Send + Sync {
    async fn fetch_launches(&self) -> ApiResult<Vec<Launch>>;

    async fn fetch_launch_by_id(&self, id: &str) -> ApiResult<Launch>;

    async fn fetch_rocket_by_id(&self, rocket_id: &str) -> ApiResult<Rocket>;
}

/// HTTP client wrapper with common configuration
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new() -> ApiResult<Self> {
        let client = Client::builder()
            .user_agent("spacex-explorer/1.0")
            .build()?;
        Ok(Self { client })
    }

    /// GET a URL and decode a JSON body, failing on any non-2xx status
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
        let resp = self.client.get(url).send().await?;

        if !resp.status().is_success() {
            return Err(ApiError::UpstreamStatus {
                status: resp.status(),
                url: url.to_string(),
            });
        }

        let json = resp.json().await?;
        Ok(json)
    }
}

/// SpaceX API client
pub struct SpaceXClient {
    http_client: HttpClient,
    base_url: String,
}

impl SpaceXClient {
    pub fn new(base_url: String) -> ApiResult<Self> {
        Ok(Self {
            http_client: HttpClient::new()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Get base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl LaunchGateway for SpaceXClient {
    /// Fetch the full launch collection
    async fn fetch_launches(&self) -> ApiResult<Vec<Launch>> {
        let url = format!("{}/launches", self.base_url);
        let launches: Vec<Launch> = self.http_client.get_json(&url).await?;
        debug!("Fetched {} launches", launches.len());
        Ok(launches)
    }

    /// Fetch one launch
    async fn fetch_launch_by_id(&self, id: &str) -> ApiResult<Launch> {
        let id = non_empty(Some(id)).ok_or(ApiError::MissingParameter("Launch ID"))?;
        let url = format!("{}/launches/{}", self.base_url, id);
        self.http_client.get_json(&url).await
    }

    /// Fetch one rocket
    async fn fetch_rocket_by_id(&self, rocket_id: &str) -> ApiResult<Rocket> {
        let rocket_id =
            non_empty(Some(rocket_id)).ok_or(ApiError::MissingParameter("Rocket ID"))?;
        let url = format!("{}/rockets/{}", self.base_url, rocket_id);
        self.http_client.get_json(&url).await
    }
}
