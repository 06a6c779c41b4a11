//! MCP tool definitions
//!
//! One tool per report kind. Each tool advertises the same JSON Schema its
//! arguments are validated against.

use crate::mcp::protocol::Tool;
use crate::report::ReportKind;
use crate::validation::input_schema;

pub fn get_tools() -> Vec<Tool> {
    ReportKind::ALL
        .into_iter()
        .map(|kind| Tool {
            name: kind.tool_name().into(),
            description: kind.description().into(),
            input_schema: input_schema(kind),
        })
        .collect()
}
