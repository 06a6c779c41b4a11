//! HTTP client for the GA4 Data API v1beta

use crate::client::auth::TokenSigner;
use crate::client::ReportService;
use crate::config::Ga4Config;
use crate::error::{Ga4Error, RemoteQueryError};
use crate::report::{ReportRequest, TabularResponse};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Longest slice of an error body kept in `RemoteQueryError::Api`
const MAX_ERROR_BODY: usize = 2000;

pub struct Ga4Client {
    http: Client,
    base_url: String,
    property: String,
    signer: TokenSigner,
}

impl Ga4Client {
    /// Build the client; credentials are parsed once here and never refreshed
    pub fn new(config: &Ga4Config) -> Result<Self, Ga4Error> {
        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(RemoteQueryError::from)?;

        Ok(Self {
            http,
            base_url: config.api_base_url.clone(),
            property: config.property_resource(),
            signer: TokenSigner::new(&config.credentials)?,
        })
    }

    fn url(&self, suffix: &str) -> String {
        format!("{}/v1beta/{}{}", self.base_url, self.property, suffix)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder, what: &str) -> Result<T, RemoteQueryError> {
        let token = self.signer.sign(Utc::now())?;
        let response = request.bearer_auth(token).send().await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            warn!(%status, "{what} failed");
            return Err(RemoteQueryError::Api {
                status: status.as_u16(),
                body: body.chars().take(MAX_ERROR_BODY).collect(),
            });
        }

        serde_json::from_str(&body).map_err(|e| RemoteQueryError::Decode(format!("{what}: {e}")))
    }
}

#[async_trait]
impl ReportService for Ga4Client {
    async fn run_report(&self, request: &ReportRequest) -> Result<TabularResponse, RemoteQueryError> {
        if tracing::enabled!(tracing::Level::DEBUG) {
            debug!(
                request = %serde_json::to_string(request).unwrap_or_default(),
                "runReport"
            );
        }

        let response: TabularResponse = self
            .send(self.http.post(self.url(":runReport")).json(request), "runReport")
            .await?;

        debug!(
            rows = response.rows.as_ref().map_or(0, Vec::len),
            row_count = ?response.row_count,
            "runReport returned"
        );
        Ok(response)
    }

    async fn property_metadata(&self) -> Result<Value, RemoteQueryError> {
        self.send(self.http.get(self.url("/metadata")), "getMetadata").await
    }
}
