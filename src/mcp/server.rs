//! MCP server
//!
//! Main server loop handling line-delimited JSON-RPC messages over stdio.

use crate::client::ReportService;
use crate::error::Result;
use crate::mcp::handlers::ToolHandlers;
use crate::mcp::prompts::{get_prompt, list_prompts};
use crate::mcp::protocol::*;
use crate::mcp::resources::{list_resources, read_resource};
use crate::mcp::tools::get_tools;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};

/// Longest message prefix written to the debug log
const LOG_PREVIEW: usize = 200;

pub struct McpServer {
    service: Arc<dyn ReportService>,
    handlers: ToolHandlers,
}

impl McpServer {
    pub fn new(service: Arc<dyn ReportService>) -> Self {
        Self {
            handlers: ToolHandlers::new(service.clone()),
            service,
        }
    }

    /// Serve stdin/stdout until stdin closes
    pub async fn run(&self) -> Result<()> {
        let stdin = BufReader::new(tokio::io::stdin());
        let stdout = tokio::io::stdout();
        self.serve(stdin, stdout).await
    }

    /// Serve one message per line from `reader`, answering on `writer`
    pub async fn serve<R, W>(&self, reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        info!("server started, waiting for messages");
        let mut lines = reader.lines();

        while let Some(line) = lines.next_line().await? {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            debug!("<- {}", preview(line));

            let Some(response) = self.handle(line).await else {
                continue;
            };
            let out = serde_json::to_string(&response)?;
            debug!("-> {}", preview(&out));

            writer.write_all(out.as_bytes()).await?;
            writer.write_all(b"\n").await?;
            writer.flush().await?;
        }

        info!("input closed, server shutting down");
        Ok(())
    }

    /// Handle a single JSON-RPC message; notifications get no response
    pub async fn handle(&self, msg: &str) -> Option<JsonRpcResponse> {
        let req: JsonRpcRequest = match serde_json::from_str(msg) {
            Ok(r) => r,
            Err(e) => return Some(JsonRpcResponse::error(None, PARSE_ERROR, e.to_string())),
        };

        if req.jsonrpc != "2.0" {
            return Some(JsonRpcResponse::error(
                req.id,
                INVALID_REQUEST,
                format!("Unsupported jsonrpc version: {}", req.jsonrpc),
            ));
        }

        if req.is_notification() {
            debug!(method = %req.method, "notification");
            return None;
        }

        let id = req.id.clone();
        let outcome = self.dispatch(req).await;
        Some(match outcome {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(error) => JsonRpcResponse::failure(id, error),
        })
    }

    async fn dispatch(&self, req: JsonRpcRequest) -> std::result::Result<Value, JsonRpcError> {
        match req.method.as_str() {
            "initialize" => to_value(InitializeResult::current()),

            "ping" => Ok(json!({})),

            "tools/list" => to_value(ToolsListResult { tools: get_tools() }),

            "tools/call" => {
                let params: ToolCallParams = parse_params(req.params)?;
                info!(tool = %params.name, "tool call");
                to_value(self.handlers.handle(&params.name, params.arguments).await)
            }

            "resources/list" => to_value(ResourcesListResult {
                resources: list_resources(),
            }),

            "resources/read" => {
                let params: ReadResourceParams = parse_params(req.params)?;
                to_value(read_resource(&params.uri, self.service.as_ref()).await?)
            }

            "prompts/list" => to_value(PromptsListResult {
                prompts: list_prompts(),
            }),

            "prompts/get" => {
                let params: GetPromptParams = parse_params(req.params)?;
                to_value(get_prompt(&params.name, &params.arguments)?)
            }

            other => {
                warn!(method = other, "unknown method");
                Err(JsonRpcError::new(
                    METHOD_NOT_FOUND,
                    format!("Unknown method: {other}"),
                ))
            }
        }
    }
}

fn parse_params<T: DeserializeOwned>(params: Value) -> std::result::Result<T, JsonRpcError> {
    serde_json::from_value(params).map_err(|e| JsonRpcError::invalid_params(e.to_string()))
}

fn to_value<T: Serialize>(result: T) -> std::result::Result<Value, JsonRpcError> {
    serde_json::to_value(result)
        .map_err(|e| JsonRpcError::internal(format!("Serialization error: {e}")))
}

fn preview(line: &str) -> &str {
    match line.char_indices().nth(LOG_PREVIEW) {
        Some((end, _)) => &line[..end],
        None => line,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RemoteQueryError;
    use crate::report::{ReportRequest, Row, TabularResponse};
    use async_trait::async_trait;

    struct FixedService;

    #[async_trait]
    impl ReportService for FixedService {
        async fn run_report(&self, request: &ReportRequest) -> std::result::Result<TabularResponse, RemoteQueryError> {
            Ok(TabularResponse {
                dimension_headers: request.dimensions.iter().map(|d| d.name.as_str().into()).collect(),
                metric_headers: request.metrics.iter().map(|m| m.name.as_str().into()).collect(),
                rows: Some(vec![Row::new(&["2024-01-01"], &["5", "2"])]),
                row_count: Some(1),
            })
        }

        async fn property_metadata(&self) -> std::result::Result<Value, RemoteQueryError> {
            Ok(json!({ "name": "properties/1/metadata" }))
        }
    }

    fn server() -> McpServer {
        McpServer::new(Arc::new(FixedService))
    }

    async fn call(msg: Value) -> Value {
        let response = server().handle(&msg.to_string()).await.unwrap();
        serde_json::to_value(response).unwrap()
    }

    #[tokio::test]
    async fn test_initialize() {
        let response = call(json!({ "jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {} })).await;
        assert_eq!(response["id"], json!(1));
        assert_eq!(response["result"]["protocolVersion"], json!(PROTOCOL_VERSION));
    }

    #[tokio::test]
    async fn test_notification_gets_no_response() {
        let msg = json!({ "jsonrpc": "2.0", "method": "notifications/initialized" });
        assert!(server().handle(&msg.to_string()).await.is_none());
    }

    #[tokio::test]
    async fn test_null_id_gets_a_response() {
        let response = call(json!({ "jsonrpc": "2.0", "id": null, "method": "ping" })).await;
        assert_eq!(response["id"], Value::Null);
        assert_eq!(response["result"], json!({}));
    }

    #[tokio::test]
    async fn test_parse_error() {
        let response = server().handle("{not json").await.unwrap();
        assert_eq!(response.error.unwrap().code, PARSE_ERROR);
        assert_eq!(response.id, Value::Null);
    }

    #[tokio::test]
    async fn test_unknown_method() {
        let response = call(json!({ "jsonrpc": "2.0", "id": "a", "method": "sampling/createMessage" })).await;
        assert_eq!(response["error"]["code"], json!(METHOD_NOT_FOUND));
    }

    #[tokio::test]
    async fn test_tools_call_active_users() {
        let response = call(json!({
            "jsonrpc": "2.0",
            "id": 2,
            "method": "tools/call",
            "params": {
                "name": "get-active-users",
                "arguments": { "startDate": "2024-01-01", "endDate": "2024-01-01" }
            }
        }))
        .await;

        let text = response["result"]["content"][0]["text"].as_str().unwrap();
        let body: Value = serde_json::from_str(text).unwrap();
        assert_eq!(
            body["records"],
            json!([{ "date": "2024-01-01", "activeUsers": "5", "newUsers": "2" }])
        );
        assert!(response["result"].get("isError").is_none());
    }

    #[tokio::test]
    async fn test_tools_call_missing_name() {
        let response = call(json!({ "jsonrpc": "2.0", "id": 3, "method": "tools/call", "params": {} })).await;
        assert_eq!(response["error"]["code"], json!(INVALID_PARAMS));
    }

    #[tokio::test]
    async fn test_resources_and_prompts() {
        let listed = call(json!({ "jsonrpc": "2.0", "id": 4, "method": "resources/list" })).await;
        assert_eq!(listed["result"]["resources"].as_array().unwrap().len(), 4);

        let read = call(json!({
            "jsonrpc": "2.0",
            "id": 5,
            "method": "resources/read",
            "params": { "uri": "ga4://property-info" }
        }))
        .await;
        assert_eq!(read["result"]["contents"][0]["mimeType"], json!("application/json"));

        let prompt = call(json!({
            "jsonrpc": "2.0",
            "id": 6,
            "method": "prompts/get",
            "params": { "name": "select-dimensions", "arguments": { "metricType": "users" } }
        }))
        .await;
        assert_eq!(prompt["error"]["code"], json!(INVALID_PARAMS));
    }

    #[tokio::test]
    async fn test_serve_line_protocol() {
        let input = concat!(
            r#"{"jsonrpc":"2.0","id":1,"method":"ping"}"#,
            "\n\n",
            r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
            "\n",
            r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#,
            "\n",
        );
        let mut output = Vec::new();
        server().serve(input.as_bytes(), &mut output).await.unwrap();

        let lines: Vec<Value> = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], json!({ "jsonrpc": "2.0", "id": 1, "result": {} }));
        assert_eq!(lines[1]["result"]["tools"].as_array().unwrap().len(), 5);
    }

    #[test]
    fn test_preview_respects_char_boundaries() {
        let long = "é".repeat(LOG_PREVIEW + 10);
        assert_eq!(preview(&long).chars().count(), LOG_PREVIEW);
        assert_eq!(preview("short"), "short");
    }
}
