//! Parameter validation module
//!
//! This module checks raw tool arguments against each tool's JSON Schema,
//! applies defaults and reports every violated constraint in a single
//! `ValidationError`.

mod params;
mod schema;


pub use params::*;
pub use schema::*;
