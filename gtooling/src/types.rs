//! Invocation context and the uniform result envelope.

use gcommon::{CallId, MetadataMap, TraceId};
use serde_json::{Value, json};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvocationContext {
    pub call_id: Option<CallId>,
    pub trace_id: Option<TraceId>,
    pub metadata: MetadataMap,
}

impl InvocationContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_call_id(mut self, call_id: impl Into<CallId>) -> Self {
        self.call_id = Some(call_id.into());
        self
    }

    pub fn with_trace_id(mut self, trace_id: impl Into<TraceId>) -> Self {
        self.trace_id = Some(trace_id.into());
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

/// Outcome of every dispatch. Handler failures never escape as anything else.
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope {
    Success { payload: Value },
    Failure { message: String },
}

impl Envelope {
    pub fn success(payload: Value) -> Self {
        Self::Success { payload }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure {
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn payload(&self) -> Option<&Value> {
        match self {
            Self::Success { payload } => Some(payload),
            Self::Failure { .. } => None,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { message } => Some(message),
        }
    }

    /// Wire form: `{"ok": true, "payload": …}` or `{"ok": false, "message": …}`.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Success { payload } => json!({ "ok": true, "payload": payload }),
            Self::Failure { message } => json!({ "ok": false, "message": message }),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn envelope_wire_form_carries_ok_flag() {
        let success = Envelope::success(json!({"echo": "hi"}));
        let failure = Envelope::failure("unknown operation: noop");

        assert_eq!(
            success.to_json(),
            json!({"ok": true, "payload": {"echo": "hi"}})
        );
        assert_eq!(
            failure.to_json(),
            json!({"ok": false, "message": "unknown operation: noop"})
        );
        assert_eq!(failure.message(), Some("unknown operation: noop"));
        assert!(success.payload().is_some());
    }

    #[test]
    fn context_builder_sets_ids_and_metadata() {
        let context = InvocationContext::new()
            .with_call_id("call-1")
            .with_trace_id("trace-1")
            .with_metadata("transport", "http");

        assert_eq!(context.call_id.as_ref().map(CallId::as_str), Some("call-1"));
        assert_eq!(context.trace_id.as_ref().map(TraceId::as_str), Some("trace-1"));
        assert_eq!(context.metadata.get("transport").map(String::as_str), Some("http"));
    }
}
