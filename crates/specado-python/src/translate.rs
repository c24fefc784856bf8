//! Translation function implementation for Python bindings
//!
//! This module implements the translate function that converts
//! prompts to provider-specific requests.

use pyo3::prelude::*;
use pyo3::exceptions::{PyValueError, PyRuntimeError};
use std::ffi::{CString, CStr};
use std::ptr;
use specado_ffi::SpecadoResult;
use crate::error::{map_ffi_result_to_py_err, get_last_ffi_error};
use crate::types::{PyPromptSpec, PyProviderSpec, PyTranslationResult};
use specado_core::types::TranslationResult;

/// Translate a prompt to a provider-specific request
/// 
/// Args:
///     prompt (PromptSpec): The prompt specification to translate
///     provider_spec (ProviderSpec): The provider specification
///     model_id (str): The model identifier to use
///     mode (str): Translation mode ("standard" or "strict"), defaults to "standard"
/// 
/// Returns:
///     TranslationResult: The translated provider request with lossiness information
/// 
/// Raises:
///     TranslationError: If translation fails
///     ValidationError: If input validation fails
///     ProviderError: If provider or model is not found
#[pyfunction]
#[pyo3(signature = (prompt, provider_spec, model_id, mode="standard"))]
pub fn translate(
    prompt: &PyPromptSpec,
    provider_spec: &PyProviderSpec,
    model_id: &str,
    mode: &str,
) -> PyResult<PyTranslationResult> {
    // Serialize inputs to JSON
    let prompt_json = serde_json::to_string(&prompt.inner)
        .map_err(|e| PyValueError::new_err(format!("Failed to serialize prompt: {}", e)))?;
    
    let provider_spec_json = serde_json::to_string(&provider_spec.inner)
        .map_err(|e| PyValueError::new_err(format!("Failed to serialize provider spec: {}", e)))?;
    
    // Convert strings to C strings
    let prompt_cstr = CString::new(prompt_json)
        .map_err(|e| PyValueError::new_err(format!("Invalid prompt JSON: {}", e)))?;
    let provider_spec_cstr = CString::new(provider_spec_json)
        .map_err(|e| PyValueError::new_err(format!("Invalid provider spec JSON: {}", e)))?;
    let model_id_cstr = CString::new(model_id)
        .map_err(|e| PyValueError::new_err(format!("Invalid model ID: {}", e)))?;
    let mode_cstr = CString::new(mode)
        .map_err(|e| PyValueError::new_err(format!("Invalid mode: {}", e)))?;
    
    // Call FFI function
    let mut result_ptr: *mut std::os::raw::c_char = ptr::null_mut();
    
    let ffi_result = unsafe {
        specado_ffi::specado_translate(
            prompt_cstr.as_ptr(),
            provider_spec_cstr.as_ptr(),
            model_id_cstr.as_ptr(),
            mode_cstr.as_ptr(),
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
    
    // Parse the result JSON as TranslationResult (not the old wrapper)
    let result: TranslationResult = serde_json::from_str(&result_json)
        .map_err(|e| PyRuntimeError::new_err(format!("Failed to parse result JSON: {}", e)))?;
    
    Ok(PyTranslationResult { inner: result })
}
