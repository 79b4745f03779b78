use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::phase::SessionPhase;

/// Session status, emitted on every scheduler tick
///
/// The scheduler is stateless between ticks and publishes the current
/// phase whether or not it changed; downstream consumers diff. A restart
/// therefore reproduces the same event stream without reloading state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStatusEvent {
    pub event_id: Uuid,
    pub session_id: String,
    pub phase: SessionPhase,
    pub universe: String,
    pub timestamp: DateTime<Utc>,
}

impl SessionStatusEvent {
    pub fn new(
        session_id: impl Into<String>,
        phase: SessionPhase,
        universe: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            session_id: session_id.into(),
            phase,
            universe: universe.into(),
            timestamp,
        }
    }
}

/// Emitted when a handoff rule fires
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandoffEvent {
    pub event_id: Uuid,
    /// Human-readable rule description (e.g. "wind_down@13:30")
    pub rule: String,
    /// Session-id scope prefix the rule acted on
    pub scope: String,
    pub fired_at: DateTime<Utc>,
}

impl HandoffEvent {
    pub fn new(rule: impl Into<String>, scope: impl Into<String>, fired_at: DateTime<Utc>) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            rule: rule.into(),
            scope: scope.into(),
            fired_at,
        }
    }
}
