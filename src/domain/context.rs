//! Operation Context
//!
//! Contains metadata about the current request for logging and tracing.

use serde::{Deserialize, Serialize};

/// Context for an operation, used for tracing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationContext {
    /// Request ID from the `x-request-id` header
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,

    /// Email carried by the verified bearer token
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity: Option<String>,
}

impl OperationContext {
    /// Create a new empty context
    pub fn new() -> Self {
        Self {
            request_id: None,
            identity: None,
        }
    }

    /// Create context with request ID
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    /// Create context with authenticated identity
    pub fn with_identity(mut self, identity: impl Into<String>) -> Self {
        self.identity = Some(identity.into());
        self
    }

    /// Request ID for log fields, `-` when absent
    pub fn request_id_or_dash(&self) -> &str {
        self.request_id.as_deref().unwrap_or("-")
    }
}

impl Default for OperationContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_builder() {
        let context = OperationContext::new()
            .with_request_id("req-1")
            .with_identity("jane.doe@x.com");

        assert_eq!(context.request_id.as_deref(), Some("req-1"));
        assert_eq!(context.identity.as_deref(), Some("jane.doe@x.com"));
        assert_eq!(context.request_id_or_dash(), "req-1");
    }

    #[test]
    fn test_missing_request_id() {
        let context = OperationContext::default();
        assert_eq!(context.request_id_or_dash(), "-");
        assert!(context.identity.is_none());
    }
}
