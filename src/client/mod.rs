//! GA4 Data API client module
//!
//! `ReportService` is the only async boundary in the crate; the pipeline and
//! the MCP handlers depend on the trait, `Ga4Client` implements it over HTTP.

mod auth;
mod http;

pub use auth::*;
pub use http::*;

use crate::error::RemoteQueryError;
use crate::report::{ReportRequest, TabularResponse};
use async_trait::async_trait;
use serde_json::Value;

/// Remote reporting backend
#[async_trait]
pub trait ReportService: Send + Sync {
    /// Execute one `runReport` call
    async fn run_report(&self, request: &ReportRequest) -> Result<TabularResponse, RemoteQueryError>;

    /// Dimension and metric metadata of the configured property
    async fn property_metadata(&self) -> Result<Value, RemoteQueryError>;
}
