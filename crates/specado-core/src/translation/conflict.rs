//! Conflict resolution for mutually exclusive fields during translation
//!
//! This module handles conflicts between fields that cannot be used together
//! according to provider constraints, using strictness policies and lossiness
//! tracking to ensure proper resolution.
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use crate::{Error, Result, StrictMode, LossinessItem, LossinessCode, Severity};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use chrono::Utc;

use super::{
    TranslationContext,
    StrictnessPolicy,
    StrictnessAction,
    LossinessTracker,
    lossiness::{OperationType, TransformationRecord},
};

/// Represents a conflict between mutually exclusive fields
#[derive(Debug, Clone)]
pub struct FieldConflict {
    /// The group of mutually exclusive fields
    pub conflict_group: Vec<String>,
    
    /// Fields from the group that are actually present
    pub present_fields: Vec<String>,
    
    /// Values of the present fields
    pub field_values: HashMap<String, Value>,
    
    /// The field that will be kept after resolution
    pub winner: Option<String>,
    
    /// Fields that will be dropped
    pub losers: Vec<String>,
    
    /// Reason for the resolution decision
    pub resolution_reason: String,
    
    /// Whether this conflict was auto-resolved
    pub auto_resolved: bool,
}

/// Strategies for resolving conflicts
#[derive(Debug, Clone, PartialEq)]
pub enum ResolutionStrategy {
    /// Use provider's resolution preferences
    PreferenceOrder,
    
    /// Keep the first field in document order
    FirstWins,
    
    /// Keep the last field in document order
    LastWins,
    
    /// Keep the field with the most specific value
    MostSpecific,
    
    /// Fail on any conflict
    Fail,
    
    /// Custom resolution logic
    Custom(String),
}

/// Configuration for conflict resolution
#[derive(Debug, Clone)]
pub struct ConflictResolutionConfig {
    /// Strategy to use for resolution
    pub strategy: ResolutionStrategy,
    
    /// Whether to track dropped fields in lossiness
    pub track_lossiness: bool,
    
    /// Whether to emit warnings for auto-resolved conflicts
    pub warn_on_resolution: bool,
    
    /// Maximum number of conflicts to auto-resolve
    pub max_auto_resolutions: Option<usize>,
}

impl Default for ConflictResolutionConfig {
    fn default() -> Self {
        Self {
            strategy: ResolutionStrategy::PreferenceOrder,
            track_lossiness: true,
            warn_on_resolution: true,
            max_auto_resolutions: None,
        }
    }
}

/// Main conflict resolver that handles mutually exclusive fields
pub struct ConflictResolver {
    context: TranslationContext,
    config: ConflictResolutionConfig,
    strictness_policy: StrictnessPolicy,
}

impl ConflictResolver {
    /// Create a new conflict resolver
    pub fn new(context: TranslationContext) -> Self {
        let strictness_policy = StrictnessPolicy::new(context.clone());
        Self {
            context,
            config: ConflictResolutionConfig::default(),
            strictness_policy,
        }
    }
    
    /// Create with custom configuration
    pub fn with_config(context: TranslationContext, config: ConflictResolutionConfig) -> Self {
        let strictness_policy = StrictnessPolicy::new(context.clone());
        Self {
            context,
            config,
            strictness_policy,
        }
    }
    
    /// Detect conflicts in the current request
    pub fn detect_conflicts(&self, request: &Value) -> Vec<FieldConflict> {
        let mut conflicts = Vec::new();
        
        // Get the request as an object
        let request_obj = match request.as_object() {
            Some(obj) => obj,
            None => return conflicts,
        };
        
        // Check each mutually exclusive group
        for exclusive_group in &self.context.model_spec.constraints.mutually_exclusive {
            let mut present_fields = Vec::new();
            let mut field_values = HashMap::new();
            
            // Check which fields from the group are present
            for field in exclusive_group {
                if let Some(value) = self.get_field_value(request_obj, field) {
                    present_fields.push(field.clone());
                    field_values.insert(field.clone(), value);
                }
            }
            
            // If more than one field is present, we have a conflict
            if present_fields.len() > 1 {
                conflicts.push(FieldConflict {
                    conflict_group: exclusive_group.clone(),
                    present_fields: present_fields.clone(),
                    field_values,
                    winner: None,
                    losers: vec![],
                    resolution_reason: String::new(),
                    auto_resolved: false,
                });
            }
        }
        
        conflicts
    }
    
    /// Resolve all detected conflicts
    pub fn resolve_conflicts(
        &self,
        request: &mut Value,
        lossiness_tracker: Option<&Arc<Mutex<LossinessTracker>>>,
    ) -> Result<Vec<FieldConflict>> {
        let mut conflicts = self.detect_conflicts(request);
        
        // If there are no conflicts, return early
        if conflicts.is_empty() {
            return Ok(conflicts);
        }
        
        // Check if we should fail on conflicts based on strict mode
        if self.context.strict_mode == StrictMode::Strict && self.config.strategy == ResolutionStrategy::Fail {
            return Err(Error::Translation {
                message: format!(
                    "Found {} field conflicts in strict mode with fail strategy",
                    conflicts.len()
                ),
                context: Some(format!("Conflicts: {:?}", conflicts)),
            });
        }
        
        // Resolve each conflict
        for conflict in &mut conflicts {
            self.resolve_single_conflict(conflict, request, lossiness_tracker)?;
        }
        
        Ok(conflicts)
    }
    
    /// Resolve a single conflict
    fn resolve_single_conflict(
        &self,
        conflict: &mut FieldConflict,
        request: &mut Value,
        lossiness_tracker: Option<&Arc<Mutex<LossinessTracker>>>,
    ) -> Result<()> {
        // Determine which field to keep based on strategy
        let winner = self.determine_winner(conflict)?;
        
        // Set the winner and losers
        conflict.winner = Some(winner.clone());
        conflict.losers = conflict.present_fields
            .iter()
            .filter(|f| **f != winner)
            .cloned()
            .collect();
        
        // Use strictness policy to evaluate the conflict resolution
        let dropped_values: HashMap<String, Value> = conflict.losers
            .iter()
            .filter_map(|field| {
                conflict.field_values.get(field).map(|v| (field.clone(), v.clone()))
            })
            .collect();
        
        let policy_result = self.strictness_policy.evaluate_conflict_resolution(
            &winner,
            &conflict.losers,
            &conflict.resolution_reason,
            Some(serde_json::json!(dropped_values)),
        );
        
        // Handle the policy action
        match policy_result.action {
            StrictnessAction::Fail { error } => return Err(error),
            StrictnessAction::Warn { message } => {
                if self.config.warn_on_resolution {
                    log::warn!("{}", message);
                }
            }
            StrictnessAction::Proceed | StrictnessAction::Coerce { .. } => {
                // Continue with resolution
            }
        }
        
        // Track lossiness if configured
        if self.config.track_lossiness {
            if let Some(tracker) = lossiness_tracker {
                if let Ok(mut tracker) = tracker.lock() {
                    // Add policy lossiness item if present
                    if let Some(lossiness_item) = policy_result.lossiness_item {
                        tracker.add_item(lossiness_item);
                    }
                    
                    // Track each dropped field
                    for loser in &conflict.losers {
                        let mut metadata = HashMap::new();
                        metadata.insert("conflict_group".to_string(), format!("{:?}", conflict.conflict_group));
                        metadata.insert("winner".to_string(), winner.clone());
                        metadata.insert("strategy".to_string(), format!("{:?}", self.config.strategy));
                        
                        tracker.track_transformation(
                            loser,
                            OperationType::Dropped,
                            conflict.field_values.get(loser).cloned(),
                            None,
                            &format!(
                                "Dropped due to conflict with '{}': {}",
                                winner, conflict.resolution_reason
                            ),
                            Some(self.context.provider_name().to_string()),
                            metadata,
                        );
                    }
                }
            }
        }
        
        // Remove the losing fields from the request
        if let Some(obj) = request.as_object_mut() {
            for loser in &conflict.losers {
                self.remove_field(obj, loser);
            }
        }
        
        conflict.auto_resolved = true;
        
        Ok(())
    }
    
    /// Determine which field should win based on the resolution strategy
    fn determine_winner(&self, conflict: &FieldConflict) -> Result<String> {
        let winner = match &self.config.strategy {
            ResolutionStrategy::PreferenceOrder => {
                self.resolve_by_preference(conflict)?
            }
            ResolutionStrategy::FirstWins => {
                conflict.present_fields.first()
                    .cloned()
                    .ok_or_else(|| Error::Translation {
                        message: "No fields present in conflict".to_string(),
                        context: None,
                    })?
            }
            ResolutionStrategy::LastWins => {
                conflict.present_fields.last()
                    .cloned()
                    .ok_or_else(|| Error::Translation {
                        message: "No fields present in conflict".to_string(),
                        context: None,
                    })?
            }
            ResolutionStrategy::MostSpecific => {
                self.resolve_by_specificity(conflict)?
            }
            ResolutionStrategy::Fail => {
                return Err(Error::Translation {
                    message: format!(
                        "Conflict between mutually exclusive fields: {:?}",
                        conflict.present_fields
                    ),
                    context: Some(format!("Conflict group: {:?}", conflict.conflict_group)),
                });
            }
            ResolutionStrategy::Custom(logic) => {
                self.resolve_by_custom_logic(conflict, logic)?
            }
        };
        
        Ok(winner)
    }
    
    /// Resolve conflict using provider's resolution preferences
    fn resolve_by_preference(&self, conflict: &FieldConflict) -> Result<String> {
        let preferences = &self.context.model_spec.constraints.resolution_preferences;
        
        // If no preferences defined, fall back to first wins
        if preferences.is_empty() {
            return conflict.present_fields.first()
                .cloned()
                .ok_or_else(|| Error::Translation {
                    message: "No fields present in conflict".to_string(),
                    context: None,
                });
        }
        
        // Find the first field in preferences that is present
        for pref_field in preferences {
            if conflict.present_fields.contains(pref_field) {
                return Ok(pref_field.clone());
            }
        }
        
        // If none of the present fields are in preferences, use first present
        conflict.present_fields.first()
            .cloned()
            .ok_or_else(|| Error::Translation {
                message: "No fields present in conflict".to_string(),
                context: None,
            })
    }
    
    /// Resolve conflict by choosing the most specific value
    fn resolve_by_specificity(&self, conflict: &FieldConflict) -> Result<String> {
        let mut most_specific = None;
        let mut highest_score = 0;
        
        for field in &conflict.present_fields {
            let score = self.calculate_specificity_score(
                conflict.field_values.get(field)
            );
            if score > highest_score {
                highest_score = score;
                most_specific = Some(field.clone());
            }
        }
        
        most_specific.ok_or_else(|| Error::Translation {
            message: "Could not determine most specific field".to_string(),
            context: None,
        })
    }
    
    /// Calculate how specific a value is (higher = more specific)
    fn calculate_specificity_score(&self, value: Option<&Value>) -> usize {
        match value {
            None => 0,
            Some(Value::Null) => 1,
            Some(Value::Bool(_)) => 2,
            Some(Value::Number(_)) => 3,
            Some(Value::String(s)) => 4 + s.len(),
            Some(Value::Array(a)) => 5 + a.len() * 10,
            Some(Value::Object(o)) => 6 + o.len() * 20,
        }
    }
    
    /// Resolve using custom logic (placeholder for extensibility)
    fn resolve_by_custom_logic(&self, conflict: &FieldConflict, logic: &str) -> Result<String> {
        // This could be extended to support custom resolution patterns
        // For now, just return the first field with a note
        log::warn!("Custom resolution logic '{}' not implemented, using first field", logic);
        conflict.present_fields.first()
            .cloned()
            .ok_or_else(|| Error::Translation {
                message: "No fields present in conflict".to_string(),
                context: None,
            })
    }
    
    /// Get a field value from the request, handling nested paths
    fn get_field_value(&self, obj: &serde_json::Map<String, Value>, field: &str) -> Option<Value> {
        // Handle simple field names
        if !field.contains('.') {
            return obj.get(field).cloned();
        }
        
        // Handle nested paths (e.g., "sampling.temperature")
        let parts: Vec<&str> = field.split('.').collect();
        let mut current = Value::Object(obj.clone());
        
        for part in parts {
            match current {
                Value::Object(ref obj) => {
                    current = obj.get(part)?.clone();
                }
                _ => return None,
            }
        }
        
        Some(current)
    }
    
    /// Remove a field from the request, handling nested paths
    fn remove_field(&self, obj: &mut serde_json::Map<String, Value>, field: &str) {
        // Handle simple field names
        if !field.contains('.') {
            obj.remove(field);
            return;
        }
        
        // Handle nested paths
        let parts: Vec<&str> = field.split('.').collect();
        if parts.is_empty() {
            return;
        }
        
        // Navigate to the parent object
        let (last, parents) = parts.split_last().unwrap();
        let mut current = obj;
        
        for part in parents {
            match current.get_mut(*part) {
                Some(Value::Object(ref mut nested)) => {
                    current = nested;
                }
                _ => return,
            }
        }
        
        // Remove the field
        current.remove(*last);
    }
}

/// Extension trait for StrictnessPolicy to handle conflict resolution
impl StrictnessPolicy {
    /// Evaluate a conflict resolution decision
    pub fn evaluate_conflict_resolution(
        &self,
        winner: &str,
        losers: &[String],
        reason: &str,
        dropped_values: Option<Value>,
    ) -> super::PolicyResult {
        let message = format!(
            "Resolved conflict: keeping '{}', dropping {:?}. Reason: {}",
            winner, losers, reason
        );
        
        match self.context().strict_mode {
            StrictMode::Strict => {
                // In strict mode, conflicts might be errors
                if losers.len() > 1 {
                    super::PolicyResult {
                        action: StrictnessAction::Fail {
                            error: Error::Translation {
                                message: format!("Multiple field conflicts in strict mode: {:?}", losers),
                                context: Some(message),
                            },
                        },
                        lossiness_item: None,
                    }
                } else {
                    // Single conflict can be resolved with warning
                    super::PolicyResult {
                        action: StrictnessAction::Warn { message: message.clone() },
                        lossiness_item: Some(LossinessItem {
                            code: LossinessCode::Conflict,
                            path: losers.join(", "),
                            message,
                            severity: Severity::Warning,
                            before: dropped_values.clone(),
                            after: None,
                        }),
                    }
                }
            }
            StrictMode::Warn => {
                super::PolicyResult {
                    action: StrictnessAction::Warn { message: message.clone() },
                    lossiness_item: Some(LossinessItem {
                        code: LossinessCode::Drop,
                        path: losers.join(", "),
                        message,
                        severity: Severity::Info,
                        before: dropped_values.clone(),
                        after: None,
                    }),
                }
            }
            StrictMode::Coerce => {
                super::PolicyResult {
                    action: StrictnessAction::Proceed,
                    lossiness_item: Some(LossinessItem {
                        code: LossinessCode::Drop,
                        path: losers.join(", "),
                        message,
                        severity: Severity::Info,
                        before: dropped_values.clone(),
                        after: None,
                    }),
                }
            }
        }
    }
}
