use async_trait::async_trait;
use serde_json::Value;

use crate::error::EventError;

/// Port to the downstream event bus / UI notifier
///
/// Fan-out of state transitions; the core treats it as a sink and never
/// reads back.
#[async_trait]
pub trait EventSink: Send + Sync {
    /// Publish a typed payload (e.g. "session.status", "handoff.fired")
    async fn publish(&self, event_type: &str, payload: Value) -> Result<(), EventError>;
}
