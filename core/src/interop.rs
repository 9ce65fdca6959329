//! Conversions between descriptors and `http::Response`.
//!
//! # Design
//! The descriptor is deliberately looser than `http`: any integer status and
//! any version label are accepted at construction. Going to `http::Response`
//! is therefore fallible and validates each field; coming from one only
//! fails when a header value is not visible ASCII or the version has no
//! label. Repeated header values are
//! joined with `", "` in received order, so a descriptor keeps one entry per
//! name.

use http::header::{HeaderName, HeaderValue};
use http::{Response, StatusCode, Version};
use url::Url;

use crate::descriptor::HttpResponseDescriptor;
use crate::error::DescriptorError;
use crate::headers::HeaderFields;

impl HttpResponseDescriptor {
    /// Build an `http::Response` with an empty body from this descriptor.
    pub fn to_http_response(&self) -> Result<Response<()>, DescriptorError> {
        let status = u16::try_from(self.status_code())
            .ok()
            .and_then(|code| StatusCode::from_u16(code).ok())
            .ok_or(DescriptorError::InvalidStatusCode(self.status_code()))?;
        let version = parse_version(self.http_version())?;

        let mut response = Response::new(());
        *response.status_mut() = status;
        *response.version_mut() = version;

        for (name, value) in self.header_fields().iter() {
            let (header_name, header_value) = checked_header(name, value)?;
            response.headers_mut().insert(header_name, header_value);
        }
        Ok(response)
    }

    /// Describe `response` as received from `url`.
    pub fn from_http_response<B>(url: Url, response: &Response<B>) -> Result<Self, DescriptorError> {
        let mut fields: Vec<(String, String)> = Vec::with_capacity(response.headers().keys_len());
        for name in response.headers().keys() {
            let mut joined = String::new();
            for value in response.headers().get_all(name) {
                let value = value.to_str().map_err(|e| invalid_header(name.as_str(), e))?;
                if !joined.is_empty() {
                    joined.push_str(", ");
                }
                joined.push_str(value);
            }
            fields.push((name.as_str().to_string(), joined));
        }

        Ok(crate::create(
            url,
            i64::from(response.status().as_u16()),
            version_label(response.version())?,
            HeaderFields::from(fields),
        ))
    }
}

fn parse_version(label: &str) -> Result<Version, DescriptorError> {
    match label {
        "HTTP/0.9" => Ok(Version::HTTP_09),
        "HTTP/1.0" => Ok(Version::HTTP_10),
        "HTTP/1.1" => Ok(Version::HTTP_11),
        "HTTP/2" | "HTTP/2.0" => Ok(Version::HTTP_2),
        "HTTP/3" | "HTTP/3.0" => Ok(Version::HTTP_3),
        other => Err(DescriptorError::InvalidArgument {
            name: "http_version",
            reason: format!("unsupported version label {other:?}"),
        }),
    }
}

fn version_label(version: Version) -> Result<&'static str, DescriptorError> {
    match version {
        Version::HTTP_09 => Ok("HTTP/0.9"),
        Version::HTTP_10 => Ok("HTTP/1.0"),
        Version::HTTP_11 => Ok("HTTP/1.1"),
        Version::HTTP_2 => Ok("HTTP/2.0"),
        Version::HTTP_3 => Ok("HTTP/3.0"),
        other => Err(DescriptorError::InvalidArgument {
            name: "http_version",
            reason: format!("unsupported version {other:?}"),
        }),
    }
}

/// Validate a header pair the way `http` does. Names must be tokens and
/// values must not contain CR, LF, NUL or other control bytes except tab.
pub(crate) fn checked_header(
    name: &str,
    value: &str,
) -> Result<(HeaderName, HeaderValue), DescriptorError> {
    let header_name =
        HeaderName::from_bytes(name.as_bytes()).map_err(|e| invalid_header(name, e))?;
    let header_value = HeaderValue::from_str(value).map_err(|e| invalid_header(name, e))?;
    Ok((header_name, header_value))
}

fn invalid_header(name: &str, err: impl std::fmt::Display) -> DescriptorError {
    tracing::debug!(header = name, error = %err, "rejected header during conversion");
    DescriptorError::InvalidHeader {
        name: name.to_string(),
        reason: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url() -> Url {
        Url::parse("https://example.com/x").unwrap()
    }

    #[test]
    fn to_http_response_copies_fields() {
        let d = crate::create(
            url(),
            404,
            "HTTP/1.0",
            [("Content-Type", "text/plain"), ("X-Id", "7")],
        );
        let resp = d.to_http_response().unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(resp.version(), Version::HTTP_10);
        assert_eq!(resp.headers()["content-type"], "text/plain");
        assert_eq!(resp.headers()["x-id"], "7");
    }

    #[test]
    fn to_http_response_accepts_nonstandard_code_in_range() {
        let d = crate::create(url(), 599, "HTTP/1.1", HeaderFields::new());
        assert_eq!(d.to_http_response().unwrap().status().as_u16(), 599);
    }

    #[test]
    fn to_http_response_rejects_out_of_range_status() {
        for code in [42, -1, 1000, 70_000] {
            let d = crate::create(url(), code, "HTTP/1.1", HeaderFields::new());
            assert_eq!(
                d.to_http_response().unwrap_err(),
                DescriptorError::InvalidStatusCode(code)
            );
        }
    }

    #[test]
    fn to_http_response_rejects_unknown_version() {
        let d = crate::create(url(), 200, "SPDY/3", HeaderFields::new());
        let err = d.to_http_response().unwrap_err();
        assert!(matches!(
            err,
            DescriptorError::InvalidArgument { name: "http_version", .. }
        ));
    }

    #[test]
    fn to_http_response_rejects_bad_header_name() {
        let d = crate::create(url(), 200, "HTTP/1.1", [("Bad Name", "v")]);
        let err = d.to_http_response().unwrap_err();
        assert!(matches!(err, DescriptorError::InvalidHeader { ref name, .. } if name == "Bad Name"));
    }

    #[test]
    fn to_http_response_rejects_newline_in_value() {
        let d = crate::create(url(), 200, "HTTP/1.1", [("X-Split", "a\r\nb")]);
        assert!(matches!(
            d.to_http_response().unwrap_err(),
            DescriptorError::InvalidHeader { .. }
        ));
    }

    #[test]
    fn from_http_response_joins_repeated_values() {
        let resp = Response::builder()
            .status(200)
            .version(Version::HTTP_11)
            .header("Vary", "Accept")
            .header("Vary", "Origin")
            .header("Content-Type", "text/plain")
            .body(())
            .unwrap();
        let d = HttpResponseDescriptor::from_http_response(url(), &resp).unwrap();
        assert_eq!(d.status_code(), 200);
        assert_eq!(d.http_version(), "HTTP/1.1");
        assert_eq!(d.header("vary"), Some("Accept, Origin"));
        assert_eq!(d.header("Content-Type"), Some("text/plain"));
        assert_eq!(d.header_fields().len(), 2);
    }

    #[test]
    fn from_http_response_rejects_opaque_value() {
        let resp = Response::builder()
            .status(200)
            .header("X-Bin", HeaderValue::from_bytes(b"caf\xe9").unwrap())
            .body(())
            .unwrap();
        let err = HttpResponseDescriptor::from_http_response(url(), &resp).unwrap_err();
        assert!(matches!(err, DescriptorError::InvalidHeader { ref name, .. } if name == "x-bin"));
    }

    #[test]
    fn http_response_roundtrip_preserves_values() {
        let d = crate::create(url(), 302, "HTTP/2", [("location", "/next")]);
        let back = HttpResponseDescriptor::from_http_response(url(), &d.to_http_response().unwrap())
            .unwrap();
        assert_eq!(back.status_code(), 302);
        assert_eq!(back.http_version(), "HTTP/2.0");
        assert_eq!(back.header("Location"), Some("/next"));
    }

    #[test]
    fn version_labels_cover_every_known_version() {
        let cases = [
            (Version::HTTP_09, "HTTP/0.9"),
            (Version::HTTP_10, "HTTP/1.0"),
            (Version::HTTP_11, "HTTP/1.1"),
            (Version::HTTP_2, "HTTP/2.0"),
            (Version::HTTP_3, "HTTP/3.0"),
        ];
        for (version, label) in cases {
            assert_eq!(version_label(version).unwrap(), label);
            assert_eq!(parse_version(label).unwrap(), version);
        }
    }

    #[test]
    fn checked_header_rejects_line_breaks_and_nul() {
        assert!(checked_header("X-A", "plain value").is_ok());
        assert!(checked_header("X-A", "tab\tok").is_ok());
        for value in ["v\r\nSet-Cookie: evil=1", "v\nX: y", "v\0"] {
            assert!(matches!(
                checked_header("X-A", value),
                Err(DescriptorError::InvalidHeader { ref name, .. }) if name == "X-A"
            ));
        }
        assert!(checked_header("X-A\r\nX-B", "v").is_err());
    }
}
