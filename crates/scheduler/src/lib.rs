//! Meridian Session Scheduler
//!
//! The orchestration core: a periodic control loop that classifies every
//! configured session's phase, drives agent enablement, and applies
//! cross-session handoff rules near region boundaries.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                      Orchestrator                        │
//! │   (single timer, ticks never overlap, stoppable)         │
//! │                                                          │
//! │   tick ──► SessionScheduler ──► phase per session        │
//! │              │                    │                      │
//! │              │                    ├─► RiskBudgetController│
//! │              │                    ├─► AgentControl       │
//! │              │                    └─► EventSink          │
//! │              ▼                                           │
//! │            HandoffCoordinator ──► PortfolioControl       │
//! │            (minute-exact rules,   RiskBudgetController   │
//! │             at most once per day) EventSink              │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Within one tick, session-phase evaluation completes before handoff
//! rules run, so a handoff rule always sees that tick's fresh phases.

pub mod handoff;
pub mod runner;
pub mod scheduler;

pub use handoff::{HandoffAction, HandoffCoordinator, HandoffRule, DEFAULT_WIND_DOWN_FACTOR};
pub use runner::{Orchestrator, OrchestratorConfig, OrchestratorHandle};
pub use scheduler::{SchedulerConfig, SessionScheduler};
