//! Capability types and detection for modern LLM models
//!
//! This module defines capability structures that extend the existing ModelSpec
//! with optional capability metadata. It's designed to work with the existing
//! provider_discovery module for runtime capability detection.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use chrono::{DateTime, Utc};

/// Capability metadata for models (optional extension to ModelSpec)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Capabilities {
    /// Core capabilities (always present)
    pub text_generation: bool,
    pub vision: bool,
    pub function_calling: bool,
    pub streaming: bool,
    
    /// Modern capabilities (optional for new models)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<bool>,
    
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extended_context: Option<bool>,
    
    /// Multimodal capabilities (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multimodal: Option<Vec<String>>,
    
    /// Future-proofing for unknown capabilities
    #[serde(flatten)]
    pub experimental: HashMap<String, serde_json::Value>,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            text_generation: true,
            vision: false,
            function_calling: false,
            streaming: false,
            reasoning: None,
            extended_context: None,
            multimodal: None,
            experimental: HashMap::new(),
        }
    }
}

/// Cached capability information with TTL
#[derive(Debug, Clone)]
pub struct CachedCapabilities {
    pub capabilities: Capabilities,
    pub cached_at: DateTime<Utc>,
    pub confidence: f64,
}

impl CachedCapabilities {
    /// Check if cached capabilities are still fresh (1 hour TTL)
    pub fn is_fresh(&self) -> bool {
        let age = Utc::now().signed_duration_since(self.cached_at);
        age.num_seconds() < 3600 // 1 hour TTL
    }
}

/// Feature flags for capability discovery
#[derive(Debug, Clone)]
pub struct DiscoveryFlags {
    /// Enable capability discovery (default: false for safety)
    pub enable_capability_discovery: bool,
}

impl Default for DiscoveryFlags {
    fn default() -> Self {
        Self {
            enable_capability_discovery: false,
        }
    }
}

/// Capability detection utilities (spec-driven, no hardcoded model names)
pub struct CapabilityDetector;

impl CapabilityDetector {
    /// Extract capabilities from a ModelSpec's capabilities field or infer from spec structure
    pub fn extract_capabilities_from_spec(model_spec: &crate::types::ModelSpec) -> Capabilities {
        // First, check if capabilities are explicitly defined in the spec
        if let Some(capabilities_value) = model_spec.parameters.get("capabilities") {
            if let Ok(capabilities) = serde_json::from_value::<Capabilities>(capabilities_value.clone()) {
                return capabilities;
            }
        }
        
        // If no explicit capabilities, infer from spec structure
        Self::infer_capabilities_from_spec(model_spec)
    }
    
    /// Infer capabilities from ModelSpec structure (spec-driven detection)
    fn infer_capabilities_from_spec(model_spec: &crate::types::ModelSpec) -> Capabilities {
        let mut capabilities = Capabilities::default();
        
        // Infer from input_modes
        capabilities.vision = model_spec.input_modes.images.unwrap_or(false);
        
        // Infer from tooling config
        capabilities.function_calling = model_spec.tooling.tools_supported;
        capabilities.streaming = model_spec.endpoints.streaming_chat_completion.is_some();
        
        // Infer from parameters (check for reasoning/thinking parameters)
        if let Some(params_obj) = model_spec.parameters.as_object() {
            capabilities.reasoning = params_obj.contains_key("reasoning_depth")
                .or(params_obj.contains_key("thinking_budget"))
                .or(params_obj.contains_key("reasoning_mode"))
                .then_some(true);
                
            capabilities.extended_context = Self::detect_extended_context(params_obj);
            
            // Extract experimental features from parameters
            for (key, value) in params_obj {
                if key.contains("thinking") || key.contains("reasoning") || key.contains("experimental") {
                    capabilities.experimental.insert(key.clone(), value.clone());
                }
            }
        }
        
        // Infer multimodal from input modes
        let mut modalities = vec!["text".to_string()];
        if model_spec.input_modes.images.unwrap_or(false) {
            modalities.push("image".to_string());
        }
        if let Some(audio) = model_spec.input_modes.audio {
            if audio {
                modalities.push("audio".to_string());
            }
        }
        if modalities.len() > 1 {
            capabilities.multimodal = Some(modalities);
        }
        
        capabilities
    }
    
    /// Detect extended context from parameters (look for large max_tokens values)
    fn detect_extended_context(params: &serde_json::Map<String, serde_json::Value>) -> Option<bool> {
        // Look for max_tokens or context_window parameters
        for key in ["max_tokens", "max_output_tokens", "context_window"] {
            if let Some(value) = params.get(key) {
                if let Some(max_val) = value.as_u64() {
                    // Consider >100k tokens as "extended context"
                    if max_val > 100_000 {
                        return Some(true);
                    }
                }
                if let Some(obj) = value.as_object() {
                    if let Some(max_val) = obj.get("maximum").and_then(|v| v.as_u64()) {
                        if max_val > 100_000 {
                            return Some(true);
                        }
                    }
                }
            }
        }
        None
    }
    
    /// Check if a model has capabilities defined (either explicit or inferable)
    pub fn has_enhanced_capabilities(model_spec: &crate::types::ModelSpec) -> bool {
        // Check for explicit capabilities field
        if model_spec.parameters.get("capabilities").is_some() {
            return true;
        }
        
        // Check for modern capability indicators in parameters
        if let Some(params_obj) = model_spec.parameters.as_object() {
            return params_obj.keys().any(|k| {
                k.contains("reasoning") || k.contains("thinking") || k.contains("experimental")
            });
        }
        
        false
    }
    
    /// Get confidence score based on spec completeness
    pub fn get_detection_confidence(model_spec: &crate::types::ModelSpec) -> f64 {
        let mut confidence = 0.5; // Base confidence
        
        // Higher confidence if explicit capabilities are defined
        if model_spec.parameters.get("capabilities").is_some() {
            confidence = 0.95;
        } else {
            // Increase confidence based on spec completeness
            if model_spec.input_modes.images.is_some() {
                confidence += 0.1;
            }
            if model_spec.tooling.tools_supported {
                confidence += 0.1;
            }
            if let Some(params_obj) = model_spec.parameters.as_object() {
                if params_obj.contains_key("reasoning_depth") || params_obj.contains_key("thinking_budget") {
                    confidence += 0.2;
                }
            }
        }
        
        confidence.min(0.95) // Cap at 95%
    }
}
