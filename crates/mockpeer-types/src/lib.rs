#![forbid(unsafe_code)]
#![doc = "Common algorithm identifiers and error types for the mockpeer TLS test server."]

pub mod algorithm;
pub mod error;

pub use algorithm::*;
pub use error::*;
