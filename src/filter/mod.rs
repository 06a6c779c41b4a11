//! Filter compilation module
//!
//! This module turns the flat, caller-facing `SimpleFilter` into the nested
//! `FilterExpression` tree understood by the GA4 Data API.

mod compiler;
mod expression;
mod simple;


pub use compiler::*;
pub use expression::*;
pub use simple::*;
