//! Tool call dispatch

use crate::client::ReportService;
use crate::error::ReportError;
use crate::mcp::protocol::ToolCallResult;
use crate::pipeline::build_and_normalize;
use crate::report::ReportKind;
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

pub struct ToolHandlers {
    service: Arc<dyn ReportService>,
}

impl ToolHandlers {
    pub fn new(service: Arc<dyn ReportService>) -> Self {
        Self { service }
    }

    /// Run a tool by name
    ///
    /// Failures are reported inside the result with `isError` set rather than
    /// as JSON-RPC errors, so the model can read and react to them.
    pub async fn handle(&self, name: &str, arguments: Value) -> ToolCallResult {
        let Some(kind) = ReportKind::from_tool_name(name) else {
            return ToolCallResult::error(format!("Error: Unknown tool: {name}"));
        };

        info!(tool = name, "executing report tool");
        match build_and_normalize(kind, &arguments, self.service.as_ref()).await {
            Ok(result) => match serde_json::to_string_pretty(&result) {
                Ok(text) => ToolCallResult::text(text),
                Err(e) => ToolCallResult::error(format!("Error: {e}")),
            },
            Err(e) => {
                warn!(tool = name, error = %e, "report tool failed");
                ToolCallResult::error(error_text(&e))
            }
        }
    }
}

/// `Error: <message>` followed by structured details when there are any
pub fn error_text(err: &ReportError) -> String {
    let details = match err {
        ReportError::Validation(v) => serde_json::to_string_pretty(&v.details).ok(),
        ReportError::Remote(_) => None,
    };

    match details {
        Some(details) => format!("Error: {err}\nDetails: {details}"),
        None => format!("Error: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RemoteQueryError;
    use crate::report::{ReportRequest, Row, TabularResponse};
    use async_trait::async_trait;
    use serde_json::json;

    struct OneRow;

    #[async_trait]
    impl ReportService for OneRow {
        async fn run_report(&self, _request: &ReportRequest) -> Result<TabularResponse, RemoteQueryError> {
            Ok(TabularResponse {
                dimension_headers: vec!["hostName".into()],
                metric_headers: vec!["screenPageViews".into()],
                rows: Some(vec![Row::new(&["example.com"], &["42"])]),
                row_count: Some(1),
            })
        }

        async fn property_metadata(&self) -> Result<Value, RemoteQueryError> {
            Ok(json!({}))
        }
    }

    fn handlers() -> ToolHandlers {
        ToolHandlers::new(Arc::new(OneRow))
    }

    #[tokio::test]
    async fn test_success_is_pretty_json() {
        let result = handlers()
            .handle(
                "get-page-views",
                json!({ "startDate": "2024-01-01", "endDate": "2024-01-31" }),
            )
            .await;

        assert_eq!(result.is_error, None);
        let body: Value = serde_json::from_str(&result.content[0].text).unwrap();
        assert_eq!(body["records"], json!([{ "hostName": "example.com", "screenPageViews": "42" }]));
        assert!(result.content[0].text.contains('\n'));
    }

    #[tokio::test]
    async fn test_validation_failure_reports_details() {
        let result = handlers()
            .handle("get-events", json!({ "startDate": "2024/01/01", "endDate": "2024-01-31" }))
            .await;

        assert_eq!(result.is_error, Some(true));
        let text = &result.content[0].text;
        assert!(text.starts_with("Error: Invalid parameters: startDate"));
        assert!(text.contains("\nDetails: "));
        assert!(text.contains("\"path\": \"startDate\""));
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let result = handlers().handle("get-revenue", json!({})).await;
        assert_eq!(result.is_error, Some(true));
        assert_eq!(result.content[0].text, "Error: Unknown tool: get-revenue");
    }

    #[test]
    fn test_remote_error_text() {
        let err = ReportError::Remote(RemoteQueryError::Api {
            status: 400,
            body: "{\"error\":{\"message\":\"Field foo is not a valid dimension\"}}".to_string(),
        });
        let text = error_text(&err);
        assert!(text.starts_with("Error: GA4 API returned 400: {\"error\""));
        assert!(!text.contains("Details:"));

        let err = ReportError::Remote(RemoteQueryError::Auth("token rejected".to_string()));
        assert_eq!(error_text(&err), "Error: Authentication error: token rejected");
    }
}
