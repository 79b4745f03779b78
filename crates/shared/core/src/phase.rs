use serde::{Deserialize, Serialize};
use std::fmt;

/// Per-tick classification of a session's tradability
///
/// Derived from scratch on every tick; never persisted. Components that
/// want to detect transitions diff consecutive events themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionPhase {
    /// Current time is outside the session's configured window
    OutOfWindow,
    /// Inside the window, but an exchange auction is running and the
    /// session is configured to sit auctions out
    Auction,
    /// Inside the window, no auction, but the exchanges are not open
    ClosedExchange,
    /// Tradable: in window, exchanges open, no blocking auction
    Open,
}

impl SessionPhase {
    /// Should the session's agents be running in this phase?
    pub fn is_tradable(&self) -> bool {
        matches!(self, SessionPhase::Open)
    }
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionPhase::OutOfWindow => "OUT_OF_WINDOW",
            SessionPhase::Auction => "AUCTION",
            SessionPhase::ClosedExchange => "CLOSED_EXCHANGE",
            SessionPhase::Open => "OPEN",
        };
        f.write_str(name)
    }
}

/// Resolve a session's phase from the three gating conditions.
///
/// Priority order: out-of-window beats auction beats closed-exchange.
/// `in_auction` must already account for `skip_auctions` (pass false for
/// sessions that trade through auctions).
pub fn resolve_phase(in_window: bool, exchanges_open: bool, in_auction: bool) -> SessionPhase {
    if !in_window {
        SessionPhase::OutOfWindow
    } else if in_auction {
        SessionPhase::Auction
    } else if !exchanges_open {
        SessionPhase::ClosedExchange
    } else {
        SessionPhase::Open
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_priority_order() {
        // Out of window wins regardless of the other flags
        assert_eq!(
            resolve_phase(false, true, true),
            SessionPhase::OutOfWindow
        );
        assert_eq!(
            resolve_phase(false, false, false),
            SessionPhase::OutOfWindow
        );

        // In window, auction beats closed exchange
        assert_eq!(resolve_phase(true, false, true), SessionPhase::Auction);
        assert_eq!(resolve_phase(true, true, true), SessionPhase::Auction);

        // In window, no auction, exchanges closed
        assert_eq!(
            resolve_phase(true, false, false),
            SessionPhase::ClosedExchange
        );

        // All clear
        assert_eq!(resolve_phase(true, true, false), SessionPhase::Open);
    }

    #[test]
    fn test_open_iff_all_conditions() {
        // phase == Open implies in_window && open && !auction, and conversely
        for in_window in [false, true] {
            for open in [false, true] {
                for auction in [false, true] {
                    let phase = resolve_phase(in_window, open, auction);
                    let all_clear = in_window && open && !auction;
                    assert_eq!(phase == SessionPhase::Open, all_clear);
                    assert_eq!(phase.is_tradable(), all_clear);
                }
            }
        }
    }

    #[test]
    fn test_serialized_names() {
        assert_eq!(
            serde_json::to_string(&SessionPhase::OutOfWindow).unwrap(),
            r#""OUT_OF_WINDOW""#
        );
        assert_eq!(
            serde_json::to_string(&SessionPhase::ClosedExchange).unwrap(),
            r#""CLOSED_EXCHANGE""#
        );
        assert_eq!(SessionPhase::Open.to_string(), "OPEN");
    }
}
