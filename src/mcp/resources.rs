//! MCP resources: static reference documents and live property metadata

use crate::client::ReportService;
use crate::mcp::protocol::{JsonRpcError, ReadResourceResult, Resource, ResourceContents};
use tracing::warn;

pub const PROPERTY_INFO_URI: &str = "ga4://property-info";
pub const DIMENSIONS_URI: &str = "ga4://dimensions";
pub const METRICS_URI: &str = "ga4://metrics";
pub const FILTERS_HELP_URI: &str = "ga4://filters-help";

const MARKDOWN: &str = "text/markdown";
const JSON: &str = "application/json";

static DIMENSIONS: &str = include_str!("../../resources/dimensions.md");
static METRICS: &str = include_str!("../../resources/metrics.md");
static FILTERS_HELP: &str = include_str!("../../resources/filters-help.md");

pub fn list_resources() -> Vec<Resource> {
    [
        (PROPERTY_INFO_URI, "ga4-property", "Dimension and metric metadata of the GA4 property", JSON),
        (DIMENSIONS_URI, "ga4-dimensions", "Commonly used GA4 dimensions", MARKDOWN),
        (METRICS_URI, "ga4-metrics", "Commonly used GA4 metrics", MARKDOWN),
        (FILTERS_HELP_URI, "ga4-filters-help", "How to write the filter argument", MARKDOWN),
    ]
    .into_iter()
    .map(|(uri, name, description, mime_type)| Resource {
        uri: uri.into(),
        name: name.into(),
        description: description.into(),
        mime_type: mime_type.into(),
    })
    .collect()
}

pub async fn read_resource(
    uri: &str,
    service: &dyn ReportService,
) -> Result<ReadResourceResult, JsonRpcError> {
    let (mime_type, text) = match uri {
        DIMENSIONS_URI => (MARKDOWN, DIMENSIONS.to_string()),
        METRICS_URI => (MARKDOWN, METRICS.to_string()),
        FILTERS_HELP_URI => (MARKDOWN, FILTERS_HELP.to_string()),
        PROPERTY_INFO_URI => {
            let metadata = service.property_metadata().await.map_err(|e| {
                warn!(error = %e, "metadata request failed");
                JsonRpcError::internal(format!("Failed to get GA4 property information: {e}"))
            })?;
            let text = serde_json::to_string_pretty(&metadata)
                .map_err(|e| JsonRpcError::internal(e.to_string()))?;
            (JSON, text)
        }
        other => return Err(JsonRpcError::invalid_params(format!("Unknown resource: {other}"))),
    };

    Ok(ReadResourceResult {
        contents: vec![ResourceContents {
            uri: uri.into(),
            mime_type: mime_type.into(),
            text,
        }],
    })
}
