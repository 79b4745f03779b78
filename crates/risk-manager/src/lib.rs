//! Meridian Risk Budgets
//!
//! Live, mutable risk parameters per session. The scheduler pushes a
//! session's static caps here when the session opens; the handoff
//! coordinator ramps them down near region boundaries; order-sizing logic
//! elsewhere reads them.
//!
//! ```text
//! Scheduler (OPEN) ──── set_budget ────►┌──────────────────────┐
//!                                       │ RiskBudgetController │──► order sizing
//! Handoff ──────────── scale_budget ───►└──────────────────────┘
//! ```
//!
//! This component is a source of truth for per-session values, not an
//! enforcer of the global gross-exposure ceiling: whoever consumes the
//! budgets when sizing orders is responsible for keeping the sum of all
//! targets under the global maximum (see
//! [`RiskBudgetController::total_target_exposure`]).

mod controller;

pub use controller::{RiskBudgetController, RiskError};
