// REST backend adapter for dashboard data and saved layouts
use crate::application::services::{DashboardDataService, LayoutStore};
use crate::domain::card::SavedCard;
use crate::domain::snapshot::DashboardSnapshot;
use crate::infrastructure::config::{endpoint_url, BackendSettings};
use crate::infrastructure::session::Session;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{RequestBuilder, StatusCode};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    session: Arc<Session>,
    dashboard_url: String,
    layout_url: String,
}

/// Saved layouts come back either bare or wrapped in `{"layout": [...]}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LayoutResponse {
    Bare(Vec<SavedCard>),
    Wrapped {
        #[serde(default)]
        layout: Option<Vec<SavedCard>>,
    },
}

impl LayoutResponse {
    fn into_layout(self) -> Option<Vec<SavedCard>> {
        let layout = match self {
            LayoutResponse::Bare(layout) => Some(layout),
            LayoutResponse::Wrapped { layout } => layout,
        };
        layout.filter(|l| !l.is_empty())
    }
}

impl HttpBackend {
    pub fn new(settings: &BackendSettings, session: Arc<Session>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            session,
            dashboard_url: endpoint_url(&settings.base_url, &settings.dashboard_path),
            layout_url: endpoint_url(&settings.base_url, &settings.layout_path),
        })
    }

    async fn authorize(&self, request: RequestBuilder) -> Result<RequestBuilder> {
        let request = request.header("Accept", "application/json");
        match self.session.bearer().await? {
            Some(token) => Ok(request.bearer_auth(token)),
            None => Ok(request),
        }
    }

    async fn send(&self, request: RequestBuilder, what: &str) -> Result<reqwest::Response> {
        let response = self
            .authorize(request)
            .await?
            .send()
            .await
            .with_context(|| format!("Failed to send {} request", what))?;
        Ok(response)
    }
}

async fn ensure_success(response: reqwest::Response, what: &str) -> Result<reqwest::Response> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    anyhow::bail!("{} request failed with status {}: {}", what, status, body);
}

#[async_trait]
impl DashboardDataService for HttpBackend {
    async fn fetch(&self) -> Result<DashboardSnapshot> {
        let response = self
            .send(self.client.get(&self.dashboard_url), "dashboard")
            .await?;
        let response = ensure_success(response, "dashboard").await?;

        let body = response
            .json::<serde_json::Value>()
            .await
            .context("Failed to parse dashboard response")?;
        Ok(DashboardSnapshot::new(body))
    }
}

#[async_trait]
impl LayoutStore for HttpBackend {
    async fn load(&self) -> Result<Option<Vec<SavedCard>>> {
        let response = self
            .send(self.client.get(&self.layout_url), "layout load")
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            tracing::debug!("no saved dashboard layout");
            return Ok(None);
        }
        let response = ensure_success(response, "layout load").await?;

        let body = response
            .text()
            .await
            .context("Failed to read layout response")?;
        parse_layout(&body)
    }

    async fn save(&self, layout: &[SavedCard]) -> Result<()> {
        tracing::debug!(cards = layout.len(), url = %self.layout_url, "saving dashboard layout");
        let response = self
            .send(self.client.put(&self.layout_url).json(layout), "layout save")
            .await?;
        ensure_success(response, "layout save").await?;
        Ok(())
    }
}

fn parse_layout(body: &str) -> Result<Option<Vec<SavedCard>>> {
    if body.trim().is_empty() || body.trim() == "null" {
        return Ok(None);
    }
    let parsed: LayoutResponse =
        serde_json::from_str(body).context("Failed to parse layout response")?;
    Ok(parsed.into_layout())
}
