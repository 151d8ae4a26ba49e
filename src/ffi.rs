//! FFI bindings for the COPSOQ scoring engine
//!
//! This module provides C-compatible functions for calling the engine from
//! other languages. All functions use C strings (null-terminated) and return
//! allocated memory that must be freed by the caller using `copsoq_free_string`.

use std::cell::RefCell;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;

use crate::error::ScoringError;
use crate::pipeline::CopsoqProcessor;
use crate::types::Locale;

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

/// Helper to convert C string to Rust string
unsafe fn cstr_to_string(ptr: *const c_char) -> Result<String, ScoringError> {
    if ptr.is_null() {
        return Err(ScoringError::EncodingError("null string pointer".to_string()));
    }
    CStr::from_ptr(ptr)
        .to_str()
        .map(|s| s.to_string())
        .map_err(|e| ScoringError::EncodingError(e.to_string()))
}

/// Helper to convert Rust string to C string (caller must free)
fn string_to_cstr(s: &str) -> *mut c_char {
    match CString::new(s) {
        Ok(cstr) => cstr.into_raw(),
        Err(_) => ptr::null_mut(),
    }
}

/// Run a JSON-in/JSON-out call, recording failures in the last-error slot
unsafe fn call_json(
    json: *const c_char,
    f: impl FnOnce(&str) -> Result<String, ScoringError>,
) -> *mut c_char {
    clear_last_error();

    match cstr_to_string(json).and_then(|json_str| f(&json_str)) {
        Ok(result) => string_to_cstr(&result),
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

// ============================================================================
// Stateless API
// ============================================================================

/// Score a JSON array of answers and return the report JSON.
///
/// # Safety
/// - `answers_json` must be a valid null-terminated C string.
/// - Returns a newly allocated string that must be freed with `copsoq_free_string`.
/// - Returns NULL on error; call `copsoq_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn copsoq_score_json(answers_json: *const c_char) -> *mut c_char {
    call_json(answers_json, |json| CopsoqProcessor::new().score_json(json))
}

/// Score a JSON array of answers and return the submission record JSON.
///
/// # Safety
/// - `answers_json` must be a valid null-terminated C string.
/// - Returns a newly allocated string that must be freed with `copsoq_free_string`.
/// - Returns NULL on error; call `copsoq_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn copsoq_record_json(answers_json: *const c_char) -> *mut c_char {
    call_json(answers_json, |json| CopsoqProcessor::new().record_json(json))
}

// ============================================================================
// Processor API
// ============================================================================

/// Opaque handle to a CopsoqProcessor
pub struct CopsoqProcessorHandle {
    processor: CopsoqProcessor,
}

/// Create a processor. `locale` 0 = Portuguese labels, 1 = English labels;
/// other values fall back to Portuguese.
///
/// # Safety
/// - Returns a pointer to a newly allocated processor.
/// - Must be freed with `copsoq_processor_free`.
#[no_mangle]
pub unsafe extern "C" fn copsoq_processor_new(locale: i32) -> *mut CopsoqProcessorHandle {
    clear_last_error();

    let locale = match locale {
        1 => Locale::En,
        _ => Locale::Pt,
    };

    let processor = CopsoqProcessor::new().with_locale(locale);
    Box::into_raw(Box::new(CopsoqProcessorHandle { processor }))
}

/// Free a processor.
///
/// # Safety
/// - `processor` must be a valid pointer returned by `copsoq_processor_new`, or NULL.
/// - After calling this function, the pointer is invalid.
#[no_mangle]
pub unsafe extern "C" fn copsoq_processor_free(processor: *mut CopsoqProcessorHandle) {
    if !processor.is_null() {
        drop(Box::from_raw(processor));
    }
}

/// Score a JSON array of answers with a processor.
///
/// # Safety
/// - `processor` must be a valid pointer returned by `copsoq_processor_new`.
/// - `answers_json` must be a valid null-terminated C string.
/// - Returns a newly allocated string that must be freed with `copsoq_free_string`.
/// - Returns NULL on error; call `copsoq_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn copsoq_processor_score(
    processor: *const CopsoqProcessorHandle,
    answers_json: *const c_char,
) -> *mut c_char {
    if processor.is_null() {
        clear_last_error();
        set_last_error("Null processor pointer");
        return ptr::null_mut();
    }

    let handle = &*processor;
    call_json(answers_json, |json| handle.processor.score_json(json))
}

/// Free a string returned by this library.
///
/// # Safety
/// - `ptr` must be a valid pointer returned by a `copsoq_` function, or NULL.
/// - After calling this function, the pointer is invalid.
#[no_mangle]
pub unsafe extern "C" fn copsoq_free_string(ptr: *mut c_char) {
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
/// - The returned pointer is valid until the next library call on this thread.
/// - Do NOT free the returned pointer.
/// - Returns NULL if no error occurred.
#[no_mangle]
pub unsafe extern "C" fn copsoq_last_error() -> *const c_char {
    LAST_ERROR.with(|e| match &*e.borrow() {
        Some(cstr) => cstr.as_ptr(),
        None => ptr::null(),
    })
}

/// Get the library version.
///
/// # Safety
/// - Returns a pointer to a static string. Do NOT free.
#[no_mangle]
pub unsafe extern "C" fn copsoq_version() -> *const c_char {
    static VERSION: &[u8] = concat!(env!("CARGO_PKG_VERSION"), "\0").as_bytes();
    VERSION.as_ptr() as *const c_char
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ffi_score_json() {
        let json = CString::new(r#"["Sempre", "Nunca", "Às vezes"]"#).unwrap();

        unsafe {
            let result = copsoq_score_json(json.as_ptr());
            assert!(!result.is_null());

            let result_str = CStr::from_ptr(result).to_str().unwrap();
            let payload: serde_json::Value = serde_json::from_str(result_str).unwrap();
            assert_eq!(payload["results"][0]["score"], 50.0);

            copsoq_free_string(result);
        }
    }

    #[test]
    fn test_ffi_record_json() {
        let json = CString::new(r#"["Sempre"]"#).unwrap();

        unsafe {
            let result = copsoq_record_json(json.as_ptr());
            assert!(!result.is_null());

            let result_str = CStr::from_ptr(result).to_str().unwrap();
            assert!(result_str.contains("submission_id"));

            copsoq_free_string(result);
        }
    }

    #[test]
    fn test_ffi_processor_lifecycle() {
        unsafe {
            let processor = copsoq_processor_new(1);
            assert!(!processor.is_null());

            let json = CString::new(r#"["Sempre", "Sempre", "Sempre"]"#).unwrap();
            let result = copsoq_processor_score(processor, json.as_ptr());
            assert!(!result.is_null());

            let result_str = CStr::from_ptr(result).to_str().unwrap();
            assert!(result_str.contains("High Risk"));

            copsoq_free_string(result);
            copsoq_processor_free(processor);
        }
    }

    #[test]
    fn test_ffi_error_handling() {
        unsafe {
            let invalid_json = CString::new("not json").unwrap();
            let result = copsoq_score_json(invalid_json.as_ptr());
            assert!(result.is_null());

            let error = copsoq_last_error();
            assert!(!error.is_null());
            let error_str = CStr::from_ptr(error).to_str().unwrap();
            assert!(error_str.contains("Invalid JSON"));

            let result = copsoq_score_json(ptr::null());
            assert!(result.is_null());
            let error_str = CStr::from_ptr(copsoq_last_error()).to_str().unwrap();
            assert!(error_str.starts_with("Encoding error"));

            let invalid_utf8 = CString::new(vec![b'[', 0xff, b']']).unwrap();
            assert!(copsoq_score_json(invalid_utf8.as_ptr()).is_null());

            let result = copsoq_processor_score(ptr::null(), invalid_json.as_ptr());
            assert!(result.is_null());
        }
    }

    #[test]
    fn test_ffi_version() {
        unsafe {
            let version = copsoq_version();
            assert!(!version.is_null());

            let version_str = CStr::from_ptr(version).to_str().unwrap();
            assert_eq!(version_str, crate::ENGINE_VERSION);
        }
    }
}
