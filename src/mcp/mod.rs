//! Model Context Protocol server module
//!
//! JSON-RPC 2.0 over stdio exposing the report tools, reference resources
//! and prompt templates.

mod handlers;
mod prompts;
mod protocol;
mod resources;
mod server;
mod tools;

pub use handlers::*;
pub use prompts::*;
pub use protocol::*;
pub use resources::*;
pub use server::*;
pub use tools::*;
