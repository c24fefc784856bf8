//! Response normalization for provider API responses
//!
//! This module normalizes provider-specific response formats into the
//! standard UniformResponse structure using JSONPath rules from ProviderSpec.

use serde_json::Value;
use crate::types::{
    UniformResponse, FinishReason, ToolCall,
    ModelSpec, SyncNormalization,
};
use crate::translation::jsonpath::JSONPath;
use crate::Result;

/// Response normalizer that converts provider responses to UniformResponse
#[derive(Debug)]
pub struct ResponseNormalizer {
    /// Model specification containing normalization rules
    model_spec: ModelSpec,
}

impl ResponseNormalizer {
    /// Create a new normalizer for a specific model
    pub fn new(model_spec: ModelSpec) -> Self {
        Self { model_spec }
    }
    
    /// Normalize a provider response to UniformResponse format
    pub fn normalize_response(
        &self,
        provider_response: &Value,
        model_id: &str,
    ) -> Result<UniformResponse> {
        let norm_config = &self.model_spec.response_normalization.sync;
        
        // Extract content using JSONPath
        let content = self.extract_content(provider_response, norm_config)?;
        
        // Extract and map finish reason
        let finish_reason = self.extract_finish_reason(provider_response, norm_config)?;
        
        // Extract tool calls if present
        let tool_calls = self.extract_tool_calls(provider_response, norm_config)?;
        
        Ok(UniformResponse {
            model: model_id.to_string(),
            content,
            finish_reason,
            tool_calls,
            raw_metadata: provider_response.clone(),
        })
    }
    
    /// Extract content from the response
    fn extract_content(
        &self,
        response: &Value,
        config: &SyncNormalization,
    ) -> Result<String> {
        // Special handling for Anthropic content blocks
        if config.content_path.contains("$.content") && config.content_path.contains("text") {
            // Try to extract text from Anthropic-style content array
            if let Some(content_array) = response.get("content").and_then(|c| c.as_array()) {
                // Collect all text blocks
                let text_parts: Vec<String> = content_array.iter()
                    .filter_map(|block| {
                        if block.get("type").and_then(|t| t.as_str()) == Some("text") {
                            block.get("text").and_then(|t| t.as_str()).map(|s| s.to_string())
                        } else {
                            None
                        }
                    })
                    .collect();
                
                if !text_parts.is_empty() {
                    return Ok(text_parts.join(""));
                }
            }
        }
        
        // Standard JSONPath extraction
        let path = JSONPath::parse(&config.content_path)?;
        let results = path.execute(response)?;
        
        // Get the first result and convert to string
        if let Some(value) = results.first() {
            match value {
                Value::String(s) => Ok(s.clone()),
                Value::Null => Ok(String::new()), // Handle null content explicitly
                Value::Array(arr) => {
                    // Handle array of content blocks
                    let text_parts: Vec<String> = arr.iter()
                        .filter_map(|v| {
                            if let Some(text) = v.get("text").and_then(|t| t.as_str()) {
                                Some(text.to_string())
                            } else {
                                v.as_str().map(|s| s.to_string())
                            }
                        })
                        .collect();
                    Ok(text_parts.join(""))
                }
                _ => Ok(value.to_string()),
            }
        } else {
            // If no content found, return empty string
            Ok(String::new())
        }
    }
    
    /// Extract and map finish reason
    fn extract_finish_reason(
        &self,
        response: &Value,
        config: &SyncNormalization,
    ) -> Result<FinishReason> {
        let path = JSONPath::parse(&config.finish_reason_path)?;
        let results = path.execute(response)?;
        
        if let Some(value) = results.first() {
            if let Some(reason_str) = value.as_str() {
                // Map using the provider's mapping table
                if let Some(mapped) = config.finish_reason_map.get(reason_str) {
                    return self.parse_finish_reason(mapped);
                }
                // Try to parse directly if not in mapping
                return self.parse_finish_reason(reason_str);
            }
        }
        
        // Default to "stop" if no finish reason found
        Ok(FinishReason::Stop)
    }
    
    /// Parse finish reason string to enum
    fn parse_finish_reason(&self, reason: &str) -> Result<FinishReason> {
        Ok(match reason.to_lowercase().as_str() {
            "stop" | "end_turn" => FinishReason::Stop,
            "length" | "max_tokens" => FinishReason::Length,
            "tool_call" | "tool_calls" | "tool_use" => FinishReason::ToolCall,
            "end_conversation" | "end" => FinishReason::EndConversation,
            _ => FinishReason::Other,
        })
    }
    
    /// Extract tool calls from the response
    fn extract_tool_calls(
        &self,
        response: &Value,
        _config: &SyncNormalization,
    ) -> Result<Option<Vec<ToolCall>>> {
        // Try common patterns for tool calls
        let tool_calls = self.try_extract_openai_tools(response)
            .or_else(|| self.try_extract_anthropic_tools(response));
        
        Ok(tool_calls)
    }
    
    /// Try to extract OpenAI-style tool calls
    fn try_extract_openai_tools(&self, response: &Value) -> Option<Vec<ToolCall>> {
        // OpenAI format: choices[0].message.tool_calls
        response.get("choices")
            .and_then(|c| c.get(0))
            .and_then(|choice| choice.get("message"))
            .and_then(|msg| msg.get("tool_calls"))
            .and_then(|tools| tools.as_array())
            .map(|tools| {
                tools.iter()
                    .filter_map(|tool| {
                        let name = tool.get("function")
                            .and_then(|f| f.get("name"))
                            .and_then(|n| n.as_str())?;
                        
                        let arguments = tool.get("function")
                            .and_then(|f| f.get("arguments"))
                            .cloned()
                            .unwrap_or(Value::Null);
                        
                        let id = tool.get("id")
                            .and_then(|i| i.as_str())
                            .map(|s| s.to_string());
                        
                        Some(ToolCall {
                            name: name.to_string(),
                            arguments,
                            id,
                        })
                    })
                    .collect()
            })
            .filter(|v: &Vec<ToolCall>| !v.is_empty())
    }
    
    /// Try to extract Anthropic-style tool calls
    fn try_extract_anthropic_tools(&self, response: &Value) -> Option<Vec<ToolCall>> {
        // Anthropic format: content array with tool_use blocks
        response.get("content")
            .and_then(|content| content.as_array())
            .map(|blocks| {
                blocks.iter()
                    .filter_map(|block| {
                        if block.get("type").and_then(|t| t.as_str()) == Some("tool_use") {
                            let name = block.get("name")
                                .and_then(|n| n.as_str())?;
                            
                            let arguments = block.get("input")
                                .cloned()
                                .unwrap_or(Value::Null);
                            
                            let id = block.get("id")
                                .and_then(|i| i.as_str())
                                .map(|s| s.to_string());
                            
                            Some(ToolCall {
                                name: name.to_string(),
                                arguments,
                                id,
                            })
                        } else {
                            None
                        }
                    })
                    .collect()
            })
            .filter(|v: &Vec<ToolCall>| !v.is_empty())
    }
}

/// Normalize a response using model-specific rules
pub fn normalize_response(
    provider_response: &Value,
    model_spec: &ModelSpec,
    model_id: &str,
) -> Result<UniformResponse> {
    let normalizer = ResponseNormalizer::new(model_spec.clone());
    normalizer.normalize_response(provider_response, model_id)
}
