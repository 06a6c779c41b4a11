//! GA4 MCP Server - Google Analytics 4 reporting over the Model Context Protocol
//!
//! This crate compiles simple filters into GA4 `FilterExpression` trees,
//! builds `runReport` requests for five fixed report shapes, and flattens the
//! tabular responses into paged records served as MCP tools.

pub mod client;
pub mod config;
pub mod error;
pub mod filter;
pub mod mcp;
pub mod pipeline;
pub mod report;
pub mod validation;

pub use client::{Ga4Client, ReportService};
pub use config::Ga4Config;
pub use error::{Ga4Error, ReportError, Result};
pub use mcp::McpServer;
pub use pipeline::build_and_normalize;
