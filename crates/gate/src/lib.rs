//! Meridian Microstructure Gate
//!
//! Stateless pre-trade admission check, called synchronously before any
//! order is placed, independent of which session initiated the request:
//!
//! - **Spread**: relative spread above the threshold rejects the attempt
//! - **Depth**: thin top-of-book rejects the attempt
//! - **Latency**: a slow data path rejects the attempt
//!
//! Checks run in that fixed order and the first failure supplies the
//! reason code. Quotes and latency are fetched live at call time - never
//! cached, since staleness defeats the purpose of the check. The gate
//! holds no mutable state and needs no locking; the caller decides what
//! to do with a rejection.

mod microstructure;

pub use microstructure::{GateConfig, MicrostructureGate};

// Re-export the decision types callers match on
pub use meridian_core::{GateDecision, GateReason};
