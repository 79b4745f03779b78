use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Live risk envelope for one session
///
/// Owned by the risk budget controller; created lazily on a session's
/// first OPEN transition and overwritten on every re-evaluation and
/// handoff ramp-down. Entries are never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskBudget {
    /// Current exposure target as a fraction of total capital.
    /// May sit below the session's static cap during a handoff ramp-down.
    pub target_gross_exposure_pct: Decimal,
    /// Current per-order notional ceiling
    pub max_order_notional: Decimal,
    /// When this budget was last written
    pub last_updated: DateTime<Utc>,
}

impl RiskBudget {
    pub fn new(
        target_gross_exposure_pct: Decimal,
        max_order_notional: Decimal,
        last_updated: DateTime<Utc>,
    ) -> Self {
        Self {
            target_gross_exposure_pct,
            max_order_notional,
            last_updated,
        }
    }

    /// The no-trading budget returned for sessions that have never opened
    pub fn zero(now: DateTime<Utc>) -> Self {
        Self {
            target_gross_exposure_pct: Decimal::ZERO,
            max_order_notional: Decimal::ZERO,
            last_updated: now,
        }
    }

    /// Does this budget permit any trading at all?
    pub fn permits_trading(&self) -> bool {
        self.target_gross_exposure_pct > Decimal::ZERO && self.max_order_notional > Decimal::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_zero_budget_blocks_trading() {
        let budget = RiskBudget::zero(Utc::now());
        assert!(!budget.permits_trading());
        assert_eq!(budget.target_gross_exposure_pct, Decimal::ZERO);
    }

    #[test]
    fn test_live_budget_permits_trading() {
        let budget = RiskBudget::new(dec!(0.25), dec!(50_000), Utc::now());
        assert!(budget.permits_trading());
    }
}
