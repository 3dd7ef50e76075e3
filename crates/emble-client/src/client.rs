use emble_types::{
    AccountGroups, ChatRequest, ChatResponse, KpiSummary, MaWindow, SeriesResponse, Validate,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

use crate::config::ClientConfig;
use crate::error::{RequestError, Result};
use crate::transport::{HttpTransport, ReqwestTransport};

/// Backend routes
pub mod paths {
    pub const KPI_SUMMARY: &str = "/kpi/summary";
    pub const ACCOUNT_GROUPS: &str = "/account-groups";
    pub const SERIES_BY_GROUP: &str = "/series/amount-by-group";
    pub const CHAT: &str = "/chat";
}

/// Path and query for one series fetch.
pub fn series_path(group: &str, window: MaWindow) -> String {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("group", group)
        .append_pair("window", &window.months().to_string())
        .finish();
    format!("{}?{}", paths::SERIES_BY_GROUP, query)
}

/// Typed façade over an [`HttpTransport`].
///
/// Responses are decoded into the `emble-types` structs and validated before
/// they are handed back; shape or rule violations surface as
/// [`RequestError::Decode`] / [`RequestError::Validation`].
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn HttpTransport>,
}

impl ApiClient {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }

    /// Build a client backed by reqwest
    pub fn from_config(config: ClientConfig) -> anyhow::Result<Self> {
        let transport = ReqwestTransport::new(config)?;
        Ok(Self::new(Arc::new(transport)))
    }

    pub async fn get<T>(&self, path: &str) -> Result<T>
    where
        T: DeserializeOwned + Validate,
    {
        let value = self.transport.get(path).await?;
        decode(path, value)
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned + Validate,
    {
        let body = serde_json::to_value(body).map_err(|e| RequestError::Encode {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        let value = self.transport.post(path, body).await?;
        decode(path, value)
    }

    pub async fn kpi_summary(&self) -> Result<KpiSummary> {
        self.get(paths::KPI_SUMMARY).await
    }

    pub async fn account_groups(&self) -> Result<AccountGroups> {
        self.get(paths::ACCOUNT_GROUPS).await
    }

    pub async fn series(&self, group: &str, window: MaWindow) -> Result<SeriesResponse> {
        self.get(&series_path(group, window)).await
    }

    pub async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse> {
        self.post(paths::CHAT, request).await
    }
}

fn decode<T>(path: &str, value: Value) -> Result<T>
where
    T: DeserializeOwned + Validate,
{
    let decoded: T = serde_json::from_value(value).map_err(|e| RequestError::Decode {
        path: path.to_string(),
        message: e.to_string(),
    })?;

    decoded
        .validate()
        .map_err(|source| RequestError::Validation {
            path: path.to_string(),
            source,
        })?;

    Ok(decoded)
}
