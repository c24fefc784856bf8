//! Run function implementation for Python bindings
//!
//! This module implements both synchronous and asynchronous run functions
//! for executing provider requests and getting normalized responses.

use pyo3::prelude::*;
use pyo3::exceptions::{PyValueError, PyRuntimeError};
use pyo3_asyncio::tokio::future_into_py;
use std::ffi::{CString, CStr};
use std::ptr;
use std::time::Duration;
use specado_ffi::SpecadoResult;
use crate::error::{map_ffi_result_to_py_err, get_last_ffi_error};
use crate::types::PyUniformResponse;
use specado_core::types::UniformResponse;
use serde_json::Value;

/// Run a provider request asynchronously
/// 
/// Args:
///     request (dict): The provider request to execute
///     provider_spec (ProviderSpec): The provider specification
///     timeout (Optional[int]): Timeout in seconds (None for default)
/// 
/// Returns:
///     UniformResponse: The normalized response from the provider
/// 
/// Raises:
///     ProviderError: If the provider request fails
///     TimeoutError: If the request times out
///     NetworkError: If there are network issues
#[pyfunction]
#[pyo3(signature = (request, provider_spec, timeout=None))]
pub fn run_async<'p>(
    py: Python<'p>,
    request: PyObject,
    provider_spec: &crate::types::PyProviderSpec,
    timeout: Option<u32>,
) -> PyResult<&'p PyAny> {
    // Convert inputs to the format expected by the async function
    let request_json = Python::with_gil(|py| {
        let request_value = crate::types::py_to_json(py, request.as_ref(py))?;
        serde_json::to_string(&request_value)
            .map_err(|e| PyValueError::new_err(format!("Failed to serialize request: {}", e)))
    })?;
    
    future_into_py(py, async move {
        run_internal_async(&request_json, timeout).await
    })
}

/// Run a provider request synchronously
/// 
/// Args:
///     request (dict): The provider request to execute
///     provider_spec (ProviderSpec): The provider specification
///     timeout (Optional[int]): Timeout in seconds (None for default)
/// 
/// Returns:
///     UniformResponse: The normalized response from the provider
/// 
/// Raises:
///     ProviderError: If the provider request fails
///     TimeoutError: If the request times out
///     NetworkError: If there are network issues
#[pyfunction]
#[pyo3(signature = (request, provider_spec, timeout=None))]
pub fn run_sync(
    py: Python<'_>,
    request: PyObject,
    provider_spec: &crate::types::PyProviderSpec,
    timeout: Option<u32>,
) -> PyResult<PyUniformResponse> {
    // Convert request to JSON
    let request_json = Python::with_gil(|py| {
        let request_value = crate::types::py_to_json(py, request.as_ref(py))?;
        serde_json::to_string(&request_value)
            .map_err(|e| PyValueError::new_err(format!("Failed to serialize request: {}", e)))
    })?;
    
    // Convert to C string
    let request_cstr = CString::new(request_json)
        .map_err(|e| PyValueError::new_err(format!("Invalid request JSON: {}", e)))?;
    
    // Call FFI function
    let mut result_ptr: *mut std::os::raw::c_char = ptr::null_mut();
    let timeout_seconds = timeout.unwrap_or(0) as std::os::raw::c_int;
    
    let ffi_result = unsafe {
        specado_ffi::specado_run(
            request_cstr.as_ptr(),
            timeout_seconds,
            &mut result_ptr,
        )
    };
    
    // Check for success
    if ffi_result != SpecadoResult::Success {
        let error_msg = get_last_ffi_error();
        return Err(map_ffi_result_to_py_err(ffi_result, error_msg));
    }
    
    // Convert result back to Rust
    if result_ptr.is_null() {
        return Err(PyRuntimeError::new_err("FFI returned null result"));
    }
    
    let result_json = unsafe {
        let c_str = CStr::from_ptr(result_ptr);
        let rust_str = c_str.to_str()
            .map_err(|e| PyValueError::new_err(format!("Invalid UTF-8 in result: {}", e)))?;
        let json_copy = rust_str.to_string();
        
        // Free the FFI-allocated string
        specado_ffi::specado_string_free(result_ptr);
        
        json_copy
    };
    
    // Parse the result JSON
    let result: UniformResponse = serde_json::from_str(&result_json)
        .map_err(|e| PyRuntimeError::new_err(format!("Failed to parse result JSON: {}", e)))?;
    
    Ok(PyUniformResponse { inner: result })
}

/// Internal async implementation
async fn run_internal_async(
    request_json: &str,
    timeout: Option<u32>,
) -> PyResult<PyUniformResponse> {
    // This is a placeholder implementation. In a real implementation,
    // we would need to integrate with the actual async runtime and
    // provider execution logic from specado-core.
    
    // Simulate async execution with tokio
    let request_json = request_json.to_string();
    let result = tokio::task::spawn_blocking(move || {
        execute_provider_request_blocking(&request_json, timeout)
    }).await
    .map_err(|e| PyRuntimeError::new_err(format!("Async execution failed: {}", e)))??;
    
    Ok(result)
}

/// Blocking implementation for provider request execution
fn execute_provider_request_blocking(
    request_json: &str,
    timeout: Option<u32>,
) -> PyResult<PyUniformResponse> {
    // Convert to C string
    let request_cstr = CString::new(request_json)
        .map_err(|e| PyValueError::new_err(format!("Invalid request JSON: {}", e)))?;
    
    // Call FFI function
    let mut result_ptr: *mut std::os::raw::c_char = ptr::null_mut();
    let timeout_seconds = timeout.unwrap_or(0) as std::os::raw::c_int;
    
    let ffi_result = unsafe {
        specado_ffi::specado_run(
            request_cstr.as_ptr(),
            timeout_seconds,
            &mut result_ptr,
        )
    };
    
    // Check for success
    if ffi_result != SpecadoResult::Success {
        let error_msg = get_last_ffi_error();
        return Err(map_ffi_result_to_py_err(ffi_result, error_msg));
    }
    
    // Convert result back to Rust
    if result_ptr.is_null() {
        return Err(PyRuntimeError::new_err("FFI returned null result"));
    }
    
    let result_json = unsafe {
        let c_str = CStr::from_ptr(result_ptr);
        let rust_str = c_str.to_str()
            .map_err(|e| PyValueError::new_err(format!("Invalid UTF-8 in result: {}", e)))?;
        let json_copy = rust_str.to_string();
        
        // Free the FFI-allocated string
        specado_ffi::specado_string_free(result_ptr);
        
        json_copy
    };
    
    // Parse the result JSON
    let result: UniformResponse = serde_json::from_str(&result_json)
        .map_err(|e| PyRuntimeError::new_err(format!("Failed to parse result JSON: {}", e)))?;
    
    Ok(PyUniformResponse { inner: result })
}

/// Create a provider request from a translation result
/// 
/// This is a helper function to make it easier to chain translate -> run operations.
/// 
/// Args:
///     translation_result (TranslationResult): Result from translate function
///     provider_spec (ProviderSpec): The provider specification used for translation
/// 
/// Returns:
///     dict: Provider request ready for execution
#[pyfunction]
pub fn create_provider_request(
    py: Python<'_>,
    translation_result: &crate::types::PyTranslationResult,
    provider_spec: &crate::types::PyProviderSpec,
) -> PyResult<PyObject> {
    // Extract the provider request JSON from the translation result
    let provider_request = &translation_result.inner.provider_request_json;
    
    // Convert to Python object
    crate::types::json_to_py(py, provider_request)
}
