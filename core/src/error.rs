//! Error types for descriptor conversions.
//!
//! # Design
//! Constructing a descriptor from typed inputs never fails, so nothing on
//! the factory path returns these. They come from the entry points that
//! parse untyped input (`create_from_str`) and from conversions into and
//! out of `http::Response`, where the `http` crate is stricter than the
//! descriptor itself.

use thiserror::Error;

/// Errors returned by descriptor parsing and conversion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DescriptorError {
    /// An input could not be turned into the typed field it feeds.
    #[error("invalid argument `{name}`: {reason}")]
    InvalidArgument { name: &'static str, reason: String },

    /// The status code does not fit `http::StatusCode` (100..=999).
    #[error("status code {0} is outside 100..=999")]
    InvalidStatusCode(i64),

    /// A header name or value is not representable as an `http` header.
    #[error("invalid header `{name}`: {reason}")]
    InvalidHeader { name: String, reason: String },
}
