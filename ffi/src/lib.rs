//! C-ABI wrapper around `http-response-core`.
//!
//! # Overview
//! Exposes descriptor construction and its read accessors through
//! `extern "C"` functions, so hosts whose native HTTP response type lacks a
//! usable constructor can build one from plain C data.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - Null policy: a null `url` or `http_version` is rejected with `NullArg`;
//!   a null `headers` array means no headers, whatever `headers_len` says.
//! - The C caller owns all returned pointers and must call the matching
//!   `http_response_free_*` function to release them.

pub mod types;

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::panic::catch_unwind;

use http_response_core::HttpResponseDescriptor;

use types::*;

/// Why a `create` argument was refused.
enum ArgError {
    Null(String),
    Invalid(String),
}

/// Read a required C string argument as UTF-8.
///
/// # Safety
/// `ptr` must be null or point to a NUL-terminated string that stays valid
/// and unmodified for the whole of `'a`. Callers pick `'a` no longer than
/// the `extern "C"` call that received `ptr`.
unsafe fn str_arg<'a>(ptr: *const c_char, name: &str) -> Result<&'a str, ArgError> {
    if ptr.is_null() {
        return Err(ArgError::Null(name.to_string()));
    }
    unsafe { CStr::from_ptr(ptr) }
        .to_str()
        .map_err(|_| ArgError::Invalid(format!("argument `{name}` is not valid UTF-8")))
}

/// Collect the caller's header array. A null array is an empty mapping.
///
/// # Safety
/// `headers` must be null or point to `headers_len` initialized entries,
/// each satisfying the contract of [`str_arg`] for the duration of the call.
unsafe fn header_args(
    headers: *const FfiHeader,
    headers_len: u32,
) -> Result<Vec<(String, String)>, ArgError> {
    if headers.is_null() || headers_len == 0 {
        return Ok(Vec::new());
    }
    let entries = unsafe { std::slice::from_raw_parts(headers, headers_len as usize) };
    entries
        .iter()
        .enumerate()
        .map(|(i, h)| {
            let name = unsafe { str_arg(h.name, &format!("headers[{i}].name")) }?;
            let value = unsafe { str_arg(h.value, &format!("headers[{i}].value")) }?;
            Ok((name.to_string(), value.to_string()))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

/// Create a response descriptor from `url`, `status_code`, `http_version`
/// and `headers_len` entries of `headers`.
///
/// The stored URL is the parsed form, which the `url` crate normalizes, so
/// `http_response_url` may differ from the input: `https://EXAMPLE.com`
/// reads back as `https://example.com/`. The other fields are stored as
/// supplied.
///
/// Always returns a result (never null). Check `error_code`, then detach the
/// response with `http_response_result_take` or read it in place. The caller
/// must free the result with `http_response_free_result`.
#[unsafe(no_mangle)]
pub extern "C" fn http_response_create(
    url: *const c_char,
    status_code: i64,
    http_version: *const c_char,
    headers: *const FfiHeader,
    headers_len: u32,
) -> *mut FfiCreateResult {
    catch_unwind(|| {
        // The C caller keeps every argument alive for the duration of this call.
        let args = unsafe { str_arg(url, "url") }.and_then(|url| {
            let version = unsafe { str_arg(http_version, "http_version") }?;
            let fields = unsafe { header_args(headers, headers_len) }?;
            Ok((url, version, fields))
        });
        let (url, version, fields) = match args {
            Ok(args) => args,
            Err(ArgError::Null(name)) => {
                tracing::debug!(argument = %name, "rejected null argument");
                return FfiCreateResult::error(
                    FfiErrorCode::NullArg,
                    &format!("null argument: {name}"),
                );
            }
            Err(ArgError::Invalid(msg)) => {
                tracing::debug!(%msg, "rejected argument");
                return FfiCreateResult::error(FfiErrorCode::InvalidArgument, &msg);
            }
        };
        match http_response_core::create_from_str(url, status_code, version, fields) {
            Ok(descriptor) => FfiCreateResult::ok(descriptor),
            Err(e) => FfiCreateResult::from_error(&e),
        }
    })
    .unwrap_or_else(|_| FfiCreateResult::error(FfiErrorCode::Panic, "panic in http_response_create"))
}

/// Detach the response from a create result. The result keeps its error
/// fields but no longer frees the response. Returns null if `result` is null
/// or holds no response; the caller frees the returned pointer with
/// `http_response_free`.
#[unsafe(no_mangle)]
pub extern "C" fn http_response_result_take(result: *mut FfiCreateResult) -> *mut FfiResponse {
    if result.is_null() {
        return std::ptr::null_mut();
    }
    let result = unsafe { &mut *result };
    std::mem::replace(&mut result.response, std::ptr::null_mut())
}

/// Check that `response` converts to a well-formed HTTP response: status in
/// 100..=999, a known version label, and valid header names and values.
#[unsafe(no_mangle)]
pub extern "C" fn http_response_validate(response: *const FfiResponse) -> FfiErrorCode {
    catch_unwind(|| {
        let Some(response) = (unsafe { response.as_ref() }) else {
            return FfiErrorCode::NullArg;
        };
        match response.inner.to_http_response() {
            Ok(_) => FfiErrorCode::Ok,
            Err(e) => FfiErrorCode::from(&e),
        }
    })
    .unwrap_or(FfiErrorCode::Panic)
}

// ---------------------------------------------------------------------------
// Accessors
// ---------------------------------------------------------------------------

/// Run `f` on the descriptor behind `response`, or return `fallback` if the
/// handle is null or `f` panics.
fn with_descriptor<T>(
    response: *const FfiResponse,
    fallback: T,
    f: impl FnOnce(&HttpResponseDescriptor) -> T + std::panic::UnwindSafe,
) -> T {
    if response.is_null() {
        return fallback;
    }
    let descriptor = &unsafe { &*response }.inner;
    catch_unwind(|| f(descriptor)).unwrap_or(fallback)
}

/// The response URL as an owned C string. Null if `response` is null.
#[unsafe(no_mangle)]
pub extern "C" fn http_response_url(response: *const FfiResponse) -> *mut c_char {
    with_descriptor(response, std::ptr::null_mut(), |d| c_string(d.url().as_str()))
}

/// The status code. Returns 0 if `response` is null.
#[unsafe(no_mangle)]
pub extern "C" fn http_response_status_code(response: *const FfiResponse) -> i64 {
    with_descriptor(response, 0, |d| d.status_code())
}

/// The protocol version label as an owned C string. Null if `response` is null.
#[unsafe(no_mangle)]
pub extern "C" fn http_response_http_version(response: *const FfiResponse) -> *mut c_char {
    with_descriptor(response, std::ptr::null_mut(), |d| c_string(d.http_version()))
}

/// Value of header `name` (case-insensitive) as an owned C string. Null if
/// the header is absent or either argument is null.
#[unsafe(no_mangle)]
pub extern "C" fn http_response_header_value(
    response: *const FfiResponse,
    name: *const c_char,
) -> *mut c_char {
    if name.is_null() {
        return std::ptr::null_mut();
    }
    with_descriptor(response, std::ptr::null_mut(), |d| {
        let Ok(name) = (unsafe { CStr::from_ptr(name) }).to_str() else {
            return std::ptr::null_mut();
        };
        d.header(name).map(c_string).unwrap_or(std::ptr::null_mut())
    })
}

/// All header fields in insertion order. Null if `response` is null or the
/// count does not fit in `u32`.
#[unsafe(no_mangle)]
pub extern "C" fn http_response_header_fields(response: *const FfiResponse) -> *mut FfiHeaderList {
    with_descriptor(response, std::ptr::null_mut(), |d| {
        FfiHeaderList::from_core(d.header_fields())
    })
}

/// Serialize the status line and header block into `*out`.
///
/// Returns `Ok` and stores an owned `FfiBytes` in `*out` on success. On any
/// other code `*out` is set to null: `NullArg` for a null argument,
/// `InvalidHeader` or `InvalidArgument` when a stored header or version label
/// would break the message framing.
#[unsafe(no_mangle)]
pub extern "C" fn http_response_serialize_head(
    response: *const FfiResponse,
    out: *mut *mut FfiBytes,
) -> FfiErrorCode {
    if out.is_null() {
        return FfiErrorCode::NullArg;
    }
    unsafe { *out = std::ptr::null_mut() };
    if response.is_null() {
        return FfiErrorCode::NullArg;
    }
    with_descriptor(response, FfiErrorCode::Panic, move |d| match d.serialize_head() {
        Ok(bytes) => {
            unsafe { *out = FfiBytes::from_vec(bytes) };
            FfiErrorCode::Ok
        }
        Err(e) => {
            tracing::debug!(error = %e, "refused to serialize response head");
            FfiErrorCode::from(&e)
        }
    })
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free a create result, including its response unless it was taken.
/// Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn http_response_free_result(result: *mut FfiCreateResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let result = unsafe { Box::from_raw(result) };
        if !result.error_message.is_null() {
            drop(unsafe { CString::from_raw(result.error_message) });
        }
        if !result.response.is_null() {
            drop(unsafe { Box::from_raw(result.response) });
        }
    });
}

/// Free a response detached with `http_response_result_take`.
/// Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn http_response_free(response: *mut FfiResponse) {
    if !response.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(response) });
        });
    }
}

/// Free an `FfiHeaderList` from `http_response_header_fields`.
/// Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn http_response_free_header_list(list: *mut FfiHeaderList) {
    if list.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let list = unsafe { Box::from_raw(list) };
        if list.items.is_null() || list.len == 0 {
            return;
        }
        let items = unsafe {
            Box::from_raw(std::ptr::slice_from_raw_parts_mut(
                list.items,
                list.len as usize,
            ))
        };
        for item in items.iter() {
            if !item.name.is_null() {
                drop(unsafe { CString::from_raw(item.name) });
            }
            if !item.value.is_null() {
                drop(unsafe { CString::from_raw(item.value) });
            }
        }
    });
}

/// Free an `FfiBytes` from `http_response_serialize_head`.
/// Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn http_response_free_bytes(bytes: *mut FfiBytes) {
    if bytes.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let bytes = unsafe { Box::from_raw(bytes) };
        if !bytes.data.is_null() {
            drop(unsafe {
                Box::from_raw(std::ptr::slice_from_raw_parts_mut(bytes.data, bytes.len))
            });
        }
    });
}

/// Free a C string allocated by this library. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn http_response_free_string(s: *mut c_char) {
    if !s.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { CString::from_raw(s) });
        });
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
