//! Construction of response descriptors.
//!
//! # Design
//! `create` is the single constructor: every field of the result is exactly
//! the argument supplied, nothing is defaulted or derived, and each call
//! yields a fresh value. Typed inputs cannot be missing, so it cannot fail.
//! `create_from_str` is the entry for callers holding an unparsed URL; it is
//! the only place a bad URL is rejected.

use url::Url;

use crate::descriptor::HttpResponseDescriptor;
use crate::error::DescriptorError;
use crate::headers::HeaderFields;

/// Build a descriptor from its four fields.
pub fn create(
    url: Url,
    status_code: i64,
    http_version: impl Into<String>,
    header_fields: impl Into<HeaderFields>,
) -> HttpResponseDescriptor {
    let descriptor = HttpResponseDescriptor::new(url, status_code, http_version, header_fields);
    tracing::trace!(
        url = %descriptor.url(),
        status_code,
        http_version = descriptor.http_version(),
        headers = descriptor.header_fields().len(),
        "created response descriptor"
    );
    descriptor
}

/// Like [`create`], parsing `url` first. Fails with
/// `DescriptorError::InvalidArgument` if it is not an absolute URL.
///
/// The stored URL is the parsed form, which the `url` crate normalizes:
/// `https://EXAMPLE.com` reads back as `https://example.com/`.
pub fn create_from_str(
    url: &str,
    status_code: i64,
    http_version: impl Into<String>,
    header_fields: impl Into<HeaderFields>,
) -> Result<HttpResponseDescriptor, DescriptorError> {
    let url = Url::parse(url).map_err(|e| {
        tracing::debug!(url, error = %e, "rejected response url");
        DescriptorError::InvalidArgument {
            name: "url",
            reason: e.to_string(),
        }
    })?;
    Ok(create(url, status_code, http_version, header_fields))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn fields_are_exactly_the_inputs() {
        let d = create(
            url("https://example.com/x"),
            200,
            "HTTP/1.1",
            [("Content-Type", "text/plain")],
        );
        assert_eq!(d.url().as_str(), "https://example.com/x");
        assert_eq!(d.status_code(), 200);
        assert_eq!(d.http_version(), "HTTP/1.1");
        assert_eq!(d.header("Content-Type"), Some("text/plain"));
        assert_eq!(d.header_fields().len(), 1);
    }

    #[test]
    fn empty_headers_stay_empty() {
        let d = create(
            url("https://example.com/missing"),
            404,
            "HTTP/1.1",
            HeaderFields::new(),
        );
        assert_eq!(d.status_code(), 404);
        assert!(d.header_fields().is_empty());
    }

    #[test]
    fn no_validation_of_status_or_version() {
        let d = create(url("http://host.test/"), -7, "not a version", HeaderFields::new());
        assert_eq!(d.status_code(), -7);
        assert_eq!(d.http_version(), "not a version");
    }

    #[test]
    fn repeated_calls_give_equal_but_distinct_values() {
        let a = create(url("https://example.com/x"), 200, "HTTP/1.1", [("A", "1")]);
        let b = create(url("https://example.com/x"), 200, "HTTP/1.1", [("A", "1")]);
        assert_eq!(a, b);
        assert!(!std::ptr::eq(&a, &b));
        assert!(!std::ptr::eq(a.header_fields(), b.header_fields()));
    }

    #[test]
    fn matches_associated_constructor() {
        let a = create(url("https://example.com/x"), 301, "HTTP/1.0", [("Location", "/y")]);
        let b = HttpResponseDescriptor::new(
            url("https://example.com/x"),
            301,
            "HTTP/1.0",
            [("Location", "/y")],
        );
        assert_eq!(a, b);
    }

    #[test]
    fn create_from_str_parses_url() {
        let d = create_from_str("https://example.com/x", 200, "HTTP/1.1", HeaderFields::new())
            .unwrap();
        assert_eq!(d.url().host_str(), Some("example.com"));
    }

    #[test]
    fn create_from_str_rejects_relative_url() {
        let err = create_from_str("/relative", 200, "HTTP/1.1", HeaderFields::new()).unwrap_err();
        assert!(matches!(err, DescriptorError::InvalidArgument { name: "url", .. }));
    }

    #[test]
    fn equal_hash_map_inputs_give_equal_descriptors() {
        let pairs: Vec<(String, String)> = (0..8)
            .map(|i| (format!("X-Field-{i}"), i.to_string()))
            .collect();
        let first: HashMap<String, String> = pairs.iter().cloned().collect();
        let second: HashMap<String, String> = pairs.iter().cloned().collect();
        assert_eq!(first, second);

        let a = create(url("https://example.com/x"), 200, "HTTP/1.1", first);
        let b = create(url("https://example.com/x"), 200, "HTTP/1.1", second);
        assert_eq!(a, b);
    }

    #[test]
    fn create_from_str_stores_normalized_url() {
        let d = create_from_str("https://EXAMPLE.com", 200, "HTTP/1.1", HeaderFields::new())
            .unwrap();
        assert_eq!(d.url().as_str(), "https://example.com/");
    }
}
