use std::time::Duration;

use reqwest::{Client, StatusCode, Url};
use tracing::{debug, info};

use super::error::LoadError;
use super::types::{Dataset, ValueRange};
use crate::config::DashboardConfig;
use crate::error::DashboardError;

/// Anything that can produce a fresh [`Dataset`] on demand.
#[allow(async_fn_in_trait)]
pub trait RowSource {
    async fn load(&self) -> Result<Dataset, LoadError>;
}

/// Reads one fixed range of one spreadsheet with an API key.
pub struct SheetsClient {
    client: Client,
    values_url: Url,
    discovery_url: String,
}

impl SheetsClient {
    /// Builds the client and its request target. The target is fixed for the
    /// lifetime of the client.
    pub fn new(config: &DashboardConfig) -> Result<Self, DashboardError> {
        // No overall request timeout: the transport defaults apply.
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            client,
            values_url: values_url(config)?,
            discovery_url: config.discovery_url.clone(),
        })
    }

    pub fn values_url(&self) -> &Url {
        &self.values_url
    }

    /// Fetches the API discovery document once. Any failure here is fatal to
    /// the dashboard.
    pub async fn init(&self) -> Result<(), DashboardError> {
        debug!(url = %self.discovery_url, "loading discovery document");
        let response = self
            .client
            .get(&self.discovery_url)
            .send()
            .await
            .map_err(|e| DashboardError::ClientInit(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DashboardError::ClientInit(format!(
                "discovery document returned status {}",
                status.as_u16()
            )));
        }

        let document: serde_json::Value = response
            .json()
            .await
            .map_err(|e| DashboardError::ClientInit(format!("invalid discovery document: {e}")))?;
        if !document.is_object() {
            return Err(DashboardError::ClientInit(
                "discovery document is not a JSON object".to_string(),
            ));
        }

        info!("sheets client initialized");
        Ok(())
    }
}

impl RowSource for SheetsClient {
    async fn load(&self) -> Result<Dataset, LoadError> {
        debug!(url = %self.values_url.path(), "fetching sheet values");
        let response = self.client.get(self.values_url.clone()).send().await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(LoadError::Unauthorized);
        }
        if !status.is_success() {
            return Err(LoadError::Http {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        let range: ValueRange = serde_json::from_slice(&body)?;
        let values = range
            .values
            .filter(|values| !values.is_empty())
            .ok_or(LoadError::MalformedResponse)?;

        let dataset = Dataset::from_values(&values);
        info!(rows = dataset.len(), "sheet values loaded");
        Ok(dataset)
    }
}

// {base}/{spreadsheet_id}/values/{range}?key={api_key}
fn values_url(config: &DashboardConfig) -> Result<Url, DashboardError> {
    let mut url = Url::parse(&config.sheets_base_url)
        .map_err(|e| DashboardError::Config(format!("invalid sheets_base_url: {e}")))?;
    url.path_segments_mut()
        .map_err(|_| DashboardError::Config("sheets_base_url cannot be a base URL".into()))?
        .pop_if_empty()
        .extend([config.spreadsheet_id.as_str(), "values", config.range.as_str()]);
    url.query_pairs_mut().append_pair("key", &config.api_key);
    Ok(url)
}
