//! The HTTP response descriptor value.
//!
//! # Design
//! A descriptor records what a response said (URL, status, version label,
//! header fields) as plain owned data, detached from any connection. Fields
//! are private and only readable, so a descriptor never changes after
//! construction; derived views such as the reason phrase or the serialized
//! head are computed on demand rather than stored.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::DescriptorError;
use crate::headers::HeaderFields;
use crate::interop::checked_header;

/// An immutable description of an HTTP response.
///
/// Built by [`create`](crate::create) or [`HttpResponseDescriptor::new`].
/// The status code and version are accepted as given; only conversion into
/// `http::Response` checks them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpResponseDescriptor {
    url: Url,
    status_code: i64,
    http_version: String,
    header_fields: HeaderFields,
}

impl HttpResponseDescriptor {
    /// Same as [`create`](crate::create).
    pub fn new(
        url: Url,
        status_code: i64,
        http_version: impl Into<String>,
        header_fields: impl Into<HeaderFields>,
    ) -> Self {
        Self {
            url,
            status_code,
            http_version: http_version.into(),
            header_fields: header_fields.into(),
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn status_code(&self) -> i64 {
        self.status_code
    }

    pub fn http_version(&self) -> &str {
        &self.http_version
    }

    pub fn header_fields(&self) -> &HeaderFields {
        &self.header_fields
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.header_fields.get(name)
    }

    /// Canonical reason phrase, or `None` for codes without one.
    pub fn reason_phrase(&self) -> Option<&'static str> {
        let code = u16::try_from(self.status_code).ok()?;
        http::StatusCode::from_u16(code).ok()?.canonical_reason()
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    /// Serialize the status line and header block, ending with the blank
    /// line. No body is written.
    ///
    /// Fields are checked before anything is written, so no stored value can
    /// add lines to the message: a version label with control bytes fails with
    /// `InvalidArgument`, and a header that `http` would refuse fails with
    /// `InvalidHeader`.
    pub fn serialize_head(&self) -> Result<Vec<u8>, DescriptorError> {
        if self.http_version.bytes().any(|b| b.is_ascii_control()) {
            return Err(DescriptorError::InvalidArgument {
                name: "http_version",
                reason: "version label contains control bytes".to_string(),
            });
        }
        for (name, value) in self.header_fields.iter() {
            checked_header(name, value)?;
        }

        let mut out = format!(
            "{} {} {}\r\n",
            self.http_version,
            self.status_code,
            self.reason_phrase().unwrap_or("")
        )
        .into_bytes();
        for (name, value) in self.header_fields.iter() {
            out.extend_from_slice(name.as_bytes());
            out.extend_from_slice(b": ");
            out.extend_from_slice(value.as_bytes());
            out.extend_from_slice(b"\r\n");
        }
        out.extend_from_slice(b"\r\n");
        Ok(out)
    }

    /// Take the fields back out, in construction order.
    pub fn into_parts(self) -> (Url, i64, String, HeaderFields) {
        (self.url, self.status_code, self.http_version, self.header_fields)
    }
}
