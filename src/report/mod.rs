//! Report assembly and normalization module
//!
//! Builds `runReport` requests for the five report kinds and flattens the
//! tabular responses into paged records.

mod builder;
mod kind;
mod paginate;
mod request;
mod response;


pub use builder::*;
pub use kind::*;
pub use paginate::*;
pub use request::*;
pub use response::*;
