use chrono::Utc;
use dashmap::DashMap;
use log::{info, warn};
use meridian_core::RiskBudget;
use rust_decimal::Decimal;
use thiserror::Error;

/// Invariant violations on budget mutation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RiskError {
    #[error("Scale factor must be in (0, 1], got {0}")]
    InvalidScaleFactor(Decimal),
}

/// Holds the live risk budget for every session
///
/// Budgets are keyed by session id. Entries appear on a session's first
/// OPEN transition and are only ever overwritten, never removed. Each
/// entry is updated atomically (a reader never observes a half-written
/// budget); no atomicity is promised across sessions.
pub struct RiskBudgetController {
    budgets: DashMap<String, RiskBudget>,
}

impl RiskBudgetController {
    pub fn new() -> Self {
        Self {
            budgets: DashMap::new(),
        }
    }

    /// Absolute overwrite of a session's budget
    ///
    /// Called by the scheduler when a session is (re-)opened; this is the
    /// authority for a freshly opened session and unconditionally replaces
    /// any ramped-down value a handoff left behind.
    pub fn set_budget(
        &self,
        session_id: &str,
        max_gross_exposure_pct: Decimal,
        max_order_notional: Decimal,
    ) {
        let budget = RiskBudget::new(max_gross_exposure_pct, max_order_notional, Utc::now());
        self.budgets.insert(session_id.to_string(), budget);
    }

    /// Scale the exposure target of every session matching a scope prefix
    ///
    /// Ramp-down primitive only: `factor` must be in (0, 1]. The current
    /// target is multiplied in place and floored at zero; the per-order
    /// notional ceiling is left untouched. Returns how many sessions
    /// matched.
    ///
    /// Repeated application compounds (0.70 then 0.70 gives 0.49):
    /// exactly-once-per-day is the caller's guard, not this method's.
    pub fn scale_budget(&self, scope: &str, factor: Decimal) -> Result<usize, RiskError> {
        if factor <= Decimal::ZERO || factor > Decimal::ONE {
            warn!("[RISK] Rejected scale factor {} for scope {}", factor, scope);
            return Err(RiskError::InvalidScaleFactor(factor));
        }

        let mut matched = 0;
        for mut entry in self.budgets.iter_mut() {
            if !entry.key().starts_with(scope) {
                continue;
            }
            matched += 1;

            let scaled = (entry.target_gross_exposure_pct * factor).max(Decimal::ZERO);
            info!(
                "[RISK] Scaling {}: exposure target {} -> {}",
                entry.key(),
                entry.target_gross_exposure_pct,
                scaled
            );
            entry.target_gross_exposure_pct = scaled;
            entry.last_updated = Utc::now();
        }

        if matched == 0 {
            warn!("[RISK] Scale for scope {} matched no sessions", scope);
        }

        Ok(matched)
    }

    /// Current budget for a session
    ///
    /// A session that has never opened gets the zero budget - no trading
    /// permitted - rather than an error.
    pub fn budget(&self, session_id: &str) -> RiskBudget {
        self.budgets
            .get(session_id)
            .map(|entry| entry.value().clone())
            .unwrap_or_else(|| RiskBudget::zero(Utc::now()))
    }

    /// Sum of all sessions' exposure targets
    ///
    /// For the external consumer that enforces the global gross-exposure
    /// ceiling; this controller does not enforce the sum itself.
    pub fn total_target_exposure(&self) -> Decimal {
        self.budgets
            .iter()
            .map(|entry| entry.target_gross_exposure_pct)
            .sum()
    }

    /// Number of sessions with a budget entry
    pub fn len(&self) -> usize {
        self.budgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.budgets.is_empty()
    }
}

impl Default for RiskBudgetController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_unknown_session_gets_zero_budget() {
        let controller = RiskBudgetController::new();
        let budget = controller.budget("NEVER_OPENED");

        assert!(!budget.permits_trading());
        assert_eq!(budget.target_gross_exposure_pct, Decimal::ZERO);
        assert_eq!(budget.max_order_notional, Decimal::ZERO);
    }

    #[test]
    fn test_set_budget_overwrites() {
        let controller = RiskBudgetController::new();

        controller.set_budget("EU_MORNING", dec!(0.25), dec!(50_000));
        assert_eq!(
            controller.budget("EU_MORNING").target_gross_exposure_pct,
            dec!(0.25)
        );

        // Absolute set wins over whatever was there
        controller.set_budget("EU_MORNING", dec!(0.30), dec!(60_000));
        let budget = controller.budget("EU_MORNING");
        assert_eq!(budget.target_gross_exposure_pct, dec!(0.30));
        assert_eq!(budget.max_order_notional, dec!(60_000));
    }

    #[test]
    fn test_scale_budget_prefix_scope() {
        let controller = RiskBudgetController::new();
        controller.set_budget("EU_MORNING", dec!(0.20), dec!(50_000));
        controller.set_budget("EU_AFTERNOON", dec!(0.10), dec!(50_000));
        controller.set_budget("US_CORE", dec!(0.40), dec!(100_000));

        let matched = controller.scale_budget("EU_", dec!(0.70)).unwrap();
        assert_eq!(matched, 2);

        assert_eq!(
            controller.budget("EU_MORNING").target_gross_exposure_pct,
            dec!(0.140)
        );
        assert_eq!(
            controller.budget("EU_AFTERNOON").target_gross_exposure_pct,
            dec!(0.070)
        );
        // Other regions untouched
        assert_eq!(
            controller.budget("US_CORE").target_gross_exposure_pct,
            dec!(0.40)
        );
    }

    #[test]
    fn test_scale_budget_compounds() {
        // Deliberately NOT idempotent: exactly-once is the caller's guard
        let controller = RiskBudgetController::new();
        controller.set_budget("EU_MORNING", dec!(1.0), dec!(50_000));

        controller.scale_budget("EU_", dec!(0.7)).unwrap();
        controller.scale_budget("EU_", dec!(0.7)).unwrap();

        assert_eq!(
            controller.budget("EU_MORNING").target_gross_exposure_pct,
            dec!(0.49)
        );
    }

    #[test]
    fn test_scale_budget_rejects_bad_factor() {
        let controller = RiskBudgetController::new();
        controller.set_budget("EU_MORNING", dec!(0.25), dec!(50_000));

        assert_eq!(
            controller.scale_budget("EU_", dec!(1.5)),
            Err(RiskError::InvalidScaleFactor(dec!(1.5)))
        );
        assert_eq!(
            controller.scale_budget("EU_", Decimal::ZERO),
            Err(RiskError::InvalidScaleFactor(Decimal::ZERO))
        );
        assert_eq!(
            controller.scale_budget("EU_", dec!(-0.5)),
            Err(RiskError::InvalidScaleFactor(dec!(-0.5)))
        );

        // Budget untouched after rejections
        assert_eq!(
            controller.budget("EU_MORNING").target_gross_exposure_pct,
            dec!(0.25)
        );
    }

    #[test]
    fn test_scale_factor_one_is_noop() {
        let controller = RiskBudgetController::new();
        controller.set_budget("EU_MORNING", dec!(0.25), dec!(50_000));

        let matched = controller.scale_budget("EU_", Decimal::ONE).unwrap();
        assert_eq!(matched, 1);
        assert_eq!(
            controller.budget("EU_MORNING").target_gross_exposure_pct,
            dec!(0.25)
        );
    }

    #[test]
    fn test_scale_does_not_touch_notional() {
        let controller = RiskBudgetController::new();
        controller.set_budget("EU_MORNING", dec!(0.25), dec!(50_000));

        controller.scale_budget("EU_", dec!(0.5)).unwrap();
        assert_eq!(controller.budget("EU_MORNING").max_order_notional, dec!(50_000));
    }

    #[test]
    fn test_total_target_exposure() {
        let controller = RiskBudgetController::new();
        controller.set_budget("EU_MORNING", dec!(0.25), dec!(50_000));
        controller.set_budget("US_CORE", dec!(0.40), dec!(100_000));

        assert_eq!(controller.total_target_exposure(), dec!(0.65));
    }

    #[test]
    fn test_reopen_restores_static_caps_after_ramp_down() {
        let controller = RiskBudgetController::new();
        controller.set_budget("EU_MORNING", dec!(0.25), dec!(50_000));
        controller.scale_budget("EU_", dec!(0.7)).unwrap();
        assert!(controller.budget("EU_MORNING").target_gross_exposure_pct < dec!(0.25));

        // Next OPEN evaluation pushes the static caps again
        controller.set_budget("EU_MORNING", dec!(0.25), dec!(50_000));
        assert_eq!(
            controller.budget("EU_MORNING").target_gross_exposure_pct,
            dec!(0.25)
        );
    }
}
