use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Why an order attempt was admitted or rejected
///
/// Checks run in a fixed priority order; the first failing check supplies
/// the reason. Callers must not assume simultaneous failures are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GateReason {
    /// Relative spread too wide
    Spread,
    /// Insufficient top-of-book depth
    Depth,
    /// Market-data path too slow
    Latency,
    /// All checks passed
    Ok,
}

/// Result of one pre-trade admission check
///
/// Ephemeral: produced per call, never stored. The observed quantities are
/// carried for telemetry; a rejection before a quantity could be measured
/// leaves it `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateDecision {
    pub admit: bool,
    pub reason: GateReason,
    /// Relative spread in basis points, if a usable quote was seen
    pub spread_bps: Option<Decimal>,
    /// Bid size + ask size, if a usable quote was seen
    pub total_depth: Option<Decimal>,
    /// Most recent data-path latency, if resolved
    pub latency_ms: Option<u64>,
}

impl GateDecision {
    /// Admission with all observed quantities
    pub fn admitted(spread_bps: Decimal, total_depth: Decimal, latency_ms: u64) -> Self {
        Self {
            admit: true,
            reason: GateReason::Ok,
            spread_bps: Some(spread_bps),
            total_depth: Some(total_depth),
            latency_ms: Some(latency_ms),
        }
    }

    /// Rejection with whatever was measured before the failing check
    pub fn rejected(reason: GateReason) -> Self {
        Self {
            admit: false,
            reason,
            spread_bps: None,
            total_depth: None,
            latency_ms: None,
        }
    }

    pub fn with_spread(mut self, spread_bps: Decimal) -> Self {
        self.spread_bps = Some(spread_bps);
        self
    }

    pub fn with_depth(mut self, total_depth: Decimal) -> Self {
        self.total_depth = Some(total_depth);
        self
    }

    pub fn with_latency(mut self, latency_ms: u64) -> Self {
        self.latency_ms = Some(latency_ms);
        self
    }
}
