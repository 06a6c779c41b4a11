//! Configuration module
//!
//! This module loads the GA4 property and service account credentials from
//! the process environment.

mod credentials;
mod env;

pub use credentials::*;
pub use env::*;
