//! FFI bindings for Synheart Vitals
//!
//! C-compatible access to the metric catalog and the statistics helper for the
//! mobile rendering layer. All functions take and return null-terminated C
//! strings; returned strings are allocated here and must be released with
//! `vitals_free_string`.

use std::cell::RefCell;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;

use crate::catalog::{self, MetricDefinition};
use crate::error::VitalsError;
use crate::stats::compute_stats;
use crate::types::{DataPoint, Platform};

// Thread-local storage for the last error message
thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

fn set_last_error(msg: &str) {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = CString::new(msg).ok();
    });
}

fn clear_last_error() {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = None;
    });
}

unsafe fn cstr_to_string(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    CStr::from_ptr(ptr).to_str().ok().map(|s| s.to_string())
}

fn string_to_cstr(s: &str) -> *mut c_char {
    match CString::new(s) {
        Ok(cstr) => cstr.into_raw(),
        Err(_) => ptr::null_mut(),
    }
}

/// Hand a result across the boundary: JSON string on success, NULL plus
/// last error on failure
fn respond(result: Result<String, VitalsError>) -> *mut c_char {
    match result {
        Ok(json) => string_to_cstr(&json),
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

fn catalog_json(platform: Option<String>) -> Result<String, VitalsError> {
    let definitions: Vec<&MetricDefinition> = match platform {
        Some(name) => catalog::list_for_platform(name.parse::<Platform>()?),
        None => catalog::all().iter().collect(),
    };
    Ok(serde_json::to_string(&definitions)?)
}

fn metric_json(id: &str) -> Result<String, VitalsError> {
    let definition =
        catalog::lookup(id).ok_or_else(|| VitalsError::UnknownMetric(id.to_string()))?;
    Ok(serde_json::to_string(definition)?)
}

fn stats_json(points_json: &str) -> Result<String, VitalsError> {
    let points: Vec<DataPoint> = serde_json::from_str(points_json)?;
    Ok(serde_json::to_string(&compute_stats(&points))?)
}

// ============================================================================
// Catalog
// ============================================================================

/// List metric definitions as a JSON array.
///
/// # Safety
/// - `platform` may be NULL (all metrics) or a null-terminated C string naming
///   a platform (`health_kit`, `health_connect`, `ios`, `android`).
/// - Returns a newly allocated string that must be freed with `vitals_free_string`.
/// - Returns NULL on error; call `vitals_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn vitals_catalog_json(platform: *const c_char) -> *mut c_char {
    clear_last_error();

    let platform = if platform.is_null() {
        None
    } else {
        match cstr_to_string(platform) {
            Some(s) => Some(s),
            None => {
                set_last_error("Invalid platform string");
                return ptr::null_mut();
            }
        }
    };

    respond(catalog_json(platform))
}

/// Look up one metric definition as a JSON object.
///
/// # Safety
/// - `id` must be a valid null-terminated C string.
/// - Returns a newly allocated string that must be freed with `vitals_free_string`.
/// - Returns NULL for unknown ids; call `vitals_last_error` for the message.
#[no_mangle]
pub unsafe extern "C" fn vitals_metric_json(id: *const c_char) -> *mut c_char {
    clear_last_error();

    let id = match cstr_to_string(id) {
        Some(s) => s,
        None => {
            set_last_error("Invalid metric id pointer");
            return ptr::null_mut();
        }
    };

    respond(metric_json(&id))
}

// ============================================================================
// Statistics
// ============================================================================

/// Compute aggregate statistics over a JSON array of data points.
///
/// # Safety
/// - `points_json` must be a valid null-terminated C string.
/// - Returns a newly allocated string that must be freed with `vitals_free_string`.
/// - Returns NULL on error; call `vitals_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn vitals_compute_stats_json(points_json: *const c_char) -> *mut c_char {
    clear_last_error();

    let json = match cstr_to_string(points_json) {
        Some(s) => s,
        None => {
            set_last_error("Invalid JSON string pointer");
            return ptr::null_mut();
        }
    };

    respond(stats_json(&json))
}

// ============================================================================
// Memory Management
// ============================================================================

/// Free a string returned by any `vitals_*` function.
///
/// # Safety
/// - `ptr` must be NULL or a pointer previously returned by this library.
/// - Must not be freed twice.
#[no_mangle]
pub unsafe extern "C" fn vitals_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(CString::from_raw(ptr));
    }
}

// ============================================================================
// Error Handling
// ============================================================================

/// Get the last error message.
///
/// # Safety
/// - Returns a pointer to a thread-local error string.
/// - The pointer is valid until the next `vitals_*` call on this thread.
/// - Do NOT free the returned pointer.
/// - Returns NULL if no error occurred.
#[no_mangle]
pub unsafe extern "C" fn vitals_last_error() -> *const c_char {
    LAST_ERROR.with(|e| match &*e.borrow() {
        Some(cstr) => cstr.as_ptr(),
        None => ptr::null(),
    })
}

/// Library version.
///
/// # Safety
/// - Returns a pointer to a static string. Do NOT free it.
#[no_mangle]
pub unsafe extern "C" fn vitals_version() -> *const c_char {
    static VERSION: &[u8] = concat!(env!("CARGO_PKG_VERSION"), "\0").as_bytes();
    VERSION.as_ptr() as *const c_char
}
