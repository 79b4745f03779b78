//! Meridian Core Domain
//!
//! Pure domain types for the Meridian session orchestrator.
//! This crate contains no async, no I/O, and is 100% unit testable.

pub mod budget;
pub mod error;
pub mod events;
pub mod gate;
pub mod phase;
pub mod registry;
pub mod session;
pub mod weekdays;

// Re-export commonly used types at crate root
pub use budget::RiskBudget;
pub use error::ConfigError;
pub use events::{HandoffEvent, SessionStatusEvent};
pub use gate::{GateDecision, GateReason};
pub use phase::{SessionPhase, resolve_phase};
pub use registry::SessionRegistry;
pub use session::Session;
pub use weekdays::WeekdayMask;

/// Canonical timestamp type used across the system
pub type Timestamp = chrono::DateTime<chrono::Utc>;
