//! Immutable HTTP response descriptors.
//!
//! # Overview
//! An `HttpResponseDescriptor` captures the URL, status code, protocol
//! version label and header fields of an HTTP response as plain data,
//! independent of any connection. `create` builds one from explicit inputs;
//! the `interop` conversions let it stand in for `http::Response`.
//!
//! # Design
//! - Construction never validates and never fails; validation lives in the
//!   conversions that need it.
//! - Header names compare case-insensitively; entries keep insertion order.
//! - Owned `String` / `Vec` fields keep the type simple to mirror across the
//!   C boundary in the `ffi` crate.

pub mod descriptor;
pub mod error;
pub mod factory;
pub mod headers;
pub mod interop;

pub use descriptor::HttpResponseDescriptor;
pub use error::DescriptorError;
pub use factory::{create, create_from_str};
pub use headers::HeaderFields;
pub use url::Url;
