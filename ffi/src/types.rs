//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Input types (`FfiHeader`) borrow caller-owned C strings and are never
//! freed here. Output types own their allocations and each has a matching
//! `http_response_free_*` function. Conversion helpers live here to keep
//! `lib.rs` focused on the `extern "C"` surface.

use std::ffi::CString;
use std::os::raw::c_char;

use http_response_core::{DescriptorError, HeaderFields, HttpResponseDescriptor};

/// Opaque handle to an `HttpResponseDescriptor`. C callers receive a pointer
/// to this and pass it back into every accessor.
pub struct FfiResponse {
    pub(crate) inner: HttpResponseDescriptor,
}

// ---------------------------------------------------------------------------
// Input types (caller-owned)
// ---------------------------------------------------------------------------

/// A header name/value pair supplied by the caller. Both strings must be
/// NUL-terminated UTF-8; the library only reads them.
#[repr(C)]
pub struct FfiHeader {
    pub name: *const c_char,
    pub value: *const c_char,
}

// ---------------------------------------------------------------------------
// Output types (library-owned until freed)
// ---------------------------------------------------------------------------

/// A header pair owned by the library. A field is null when the stored
/// string contains an interior NUL and cannot be represented in C.
#[repr(C)]
pub struct FfiOwnedHeader {
    pub name: *mut c_char,
    pub value: *mut c_char,
}

/// Header fields in insertion order. Free with `http_response_free_header_list`.
#[repr(C)]
pub struct FfiHeaderList {
    pub items: *mut FfiOwnedHeader,
    pub len: u32,
}

impl FfiHeaderList {
    /// Null if the header count does not fit in `len`.
    pub(crate) fn from_core(fields: &HeaderFields) -> *mut Self {
        let Some(len) = list_len(fields.len()) else {
            return std::ptr::null_mut();
        };
        let items: Box<[FfiOwnedHeader]> = fields
            .iter()
            .map(|(name, value)| FfiOwnedHeader {
                name: c_string(name),
                value: c_string(value),
            })
            .collect();
        let items = if items.is_empty() {
            std::ptr::null_mut()
        } else {
            Box::into_raw(items) as *mut FfiOwnedHeader
        };
        Box::into_raw(Box::new(FfiHeaderList { items, len }))
    }
}

/// A byte buffer owned by the library. Free with `http_response_free_bytes`.
#[repr(C)]
pub struct FfiBytes {
    pub data: *mut u8,
    pub len: usize,
}

impl FfiBytes {
    pub(crate) fn from_vec(bytes: Vec<u8>) -> *mut Self {
        let len = bytes.len();
        let data = Box::into_raw(bytes.into_boxed_slice()) as *mut u8;
        Box::into_raw(Box::new(FfiBytes { data, len }))
    }
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Error codes reported across the boundary.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiErrorCode {
    Ok = 0,
    NullArg = 1,
    InvalidArgument = 2,
    InvalidStatusCode = 3,
    InvalidHeader = 4,
    Panic = 5,
}

impl From<&DescriptorError> for FfiErrorCode {
    fn from(err: &DescriptorError) -> Self {
        match err {
            DescriptorError::InvalidArgument { .. } => FfiErrorCode::InvalidArgument,
            DescriptorError::InvalidStatusCode(_) => FfiErrorCode::InvalidStatusCode,
            DescriptorError::InvalidHeader { .. } => FfiErrorCode::InvalidHeader,
        }
    }
}

/// Result envelope for `http_response_create`.
///
/// On success `error_code` is `Ok`, `error_message` is null and `response`
/// points to the new descriptor. On failure `error_message` is a
/// human-readable C string and `response` is null. The result owns
/// `response` until `http_response_result_take` detaches it.
#[repr(C)]
pub struct FfiCreateResult {
    pub error_code: FfiErrorCode,
    pub error_message: *mut c_char,
    pub response: *mut FfiResponse,
}

impl FfiCreateResult {
    pub(crate) fn ok(descriptor: HttpResponseDescriptor) -> *mut Self {
        let response = Box::into_raw(Box::new(FfiResponse { inner: descriptor }));
        Box::into_raw(Box::new(FfiCreateResult {
            error_code: FfiErrorCode::Ok,
            error_message: std::ptr::null_mut(),
            response,
        }))
    }

    pub(crate) fn error(error_code: FfiErrorCode, msg: &str) -> *mut Self {
        Box::into_raw(Box::new(FfiCreateResult {
            error_code,
            error_message: c_string(msg),
            response: std::ptr::null_mut(),
        }))
    }

    pub(crate) fn from_error(err: &DescriptorError) -> *mut Self {
        Self::error(err.into(), &err.to_string())
    }
}

/// Length of a C array as the `u32` the boundary types carry.
pub(crate) fn list_len(len: usize) -> Option<u32> {
    u32::try_from(len).ok()
}

/// Convert to an owned C string, or null if `s` contains an interior NUL.
pub(crate) fn c_string(s: &str) -> *mut c_char {
    CString::new(s)
        .map(CString::into_raw)
        .unwrap_or(std::ptr::null_mut())
}
