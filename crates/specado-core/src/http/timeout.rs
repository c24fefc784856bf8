//! Timeout configuration and management for HTTP requests
//!
//! Provides configurable request and connection timeouts with per-request overrides

use std::time::Duration;
use serde::{Deserialize, Serialize};

/// Timeout configuration for HTTP requests
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeoutConfig {
    /// Connection timeout - time to establish a connection
    pub connect_timeout: Duration,
    /// Request timeout - total time for the entire request
    pub request_timeout: Duration,
    /// Read timeout - time to wait for response data
    pub read_timeout: Option<Duration>,
    /// Keep-alive timeout for connection reuse
    pub keepalive_timeout: Option<Duration>,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            read_timeout: Some(Duration::from_secs(30)),
            keepalive_timeout: Some(Duration::from_secs(90)),
        }
    }
}

impl TimeoutConfig {
    /// Create a new timeout configuration
    pub fn new(
        connect_timeout: Duration,
        request_timeout: Duration,
        read_timeout: Option<Duration>,
        keepalive_timeout: Option<Duration>,
    ) -> Self {
        Self {
            connect_timeout,
            request_timeout,
            read_timeout,
            keepalive_timeout,
        }
    }
    
    /// Create a fast timeout configuration (for testing/development)
    pub fn fast() -> Self {
        Self {
            connect_timeout: Duration::from_secs(5),
            request_timeout: Duration::from_secs(15),
            read_timeout: Some(Duration::from_secs(15)),
            keepalive_timeout: Some(Duration::from_secs(30)),
        }
    }
    
    /// Create a slow timeout configuration (for large requests)
    pub fn slow() -> Self {
        Self {
            connect_timeout: Duration::from_secs(30),
            request_timeout: Duration::from_secs(300), // 5 minutes
            read_timeout: Some(Duration::from_secs(300)),
            keepalive_timeout: Some(Duration::from_secs(300)),
        }
    }
    
    /// Override the request timeout for a specific request
    pub fn with_request_timeout(&self, timeout: Duration) -> Self {
        let mut config = self.clone();
        config.request_timeout = timeout;
        config
    }
    
    /// Validate timeout configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.connect_timeout.is_zero() {
            return Err("Connect timeout cannot be zero".to_string());
        }
        
        if self.request_timeout.is_zero() {
            return Err("Request timeout cannot be zero".to_string());
        }
        
        // Request timeout should be >= connect timeout
        if self.request_timeout < self.connect_timeout {
            return Err("Request timeout should be >= connect timeout".to_string());
        }
        
        // If read timeout is set, it should be <= request timeout
        if let Some(read_timeout) = self.read_timeout {
            if read_timeout > self.request_timeout {
                return Err("Read timeout should be <= request timeout".to_string());
            }
        }
        
        Ok(())
    }
}

/// Per-request timeout override
#[derive(Debug, Clone)]
pub struct RequestTimeout {
    /// Override for the entire request
    pub request_timeout: Option<Duration>,
    /// Override for connection establishment
    pub connect_timeout: Option<Duration>,
}

impl RequestTimeout {
    /// Create a new request timeout override
    pub fn new(request_timeout: Option<Duration>, connect_timeout: Option<Duration>) -> Self {
        Self {
            request_timeout,
            connect_timeout,
        }
    }
    
    /// Create request timeout override with just request timeout
    pub fn request_only(timeout: Duration) -> Self {
        Self {
            request_timeout: Some(timeout),
            connect_timeout: None,
        }
    }
    
    /// Apply override to a timeout configuration
    pub fn apply_to(&self, config: &TimeoutConfig) -> TimeoutConfig {
        let mut new_config = config.clone();
        
        if let Some(request_timeout) = self.request_timeout {
            new_config.request_timeout = request_timeout;
        }
        
        if let Some(connect_timeout) = self.connect_timeout {
            new_config.connect_timeout = connect_timeout;
        }
        
        new_config
    }
}

/// Timeout wrapper using tokio::time::timeout
pub async fn with_timeout<F, T>(
    future: F,
    timeout_config: &TimeoutConfig,
    request_override: Option<&RequestTimeout>,
) -> Result<T, tokio::time::error::Elapsed>
where
    F: std::future::Future<Output = T>,
{
    let timeout_duration = if let Some(override_config) = request_override {
        override_config
            .request_timeout
            .unwrap_or(timeout_config.request_timeout)
    } else {
        timeout_config.request_timeout
    };
    
    tokio::time::timeout(timeout_duration, future).await
}
